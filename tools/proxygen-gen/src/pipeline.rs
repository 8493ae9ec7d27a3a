// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Locator, extractor and emitter chained over a set of source files.

use crate::codegen::{EmitError, Emitter, GeneratedSource};
use crate::config::GeneratorConfig;
use crate::descriptor::InterfaceDescriptor;
use crate::extractor::extract;
use crate::locator::{locate_candidates, module_scopes};
use crate::source::SourceFile;
use std::path::PathBuf;

/// A source file that did not parse. Its traits produce no output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnparsedFile {
    pub path: PathBuf,
    pub message: String,
}

/// Descriptors extracted from a set of files.
#[derive(Debug, Clone, Default)]
pub struct Extraction {
    pub descriptors: Vec<InterfaceDescriptor>,
    /// Candidates located but not confirmed or not resolvable.
    pub skipped: usize,
    pub unparsed: Vec<UnparsedFile>,
}

/// Result of one pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub extraction: Extraction,
    pub sources: Vec<GeneratedSource>,
}

pub struct Pipeline {
    config: GeneratorConfig,
    emitter: Emitter,
}

impl Pipeline {
    pub fn new(config: GeneratorConfig) -> Result<Self, EmitError> {
        let emitter = Emitter::new(config.emit.clone())?;
        Ok(Self { config, emitter })
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Locate and extract every descriptor in `files`, in file order then
    /// source order.
    pub fn extract(&self, files: &[SourceFile]) -> Extraction {
        let mut extraction = Extraction::default();
        for file in files {
            let parsed = match syn::parse_file(&file.text) {
                Ok(parsed) => parsed,
                Err(err) => {
                    tracing::warn!("{}: not parsed: {}", file.path.display(), err);
                    extraction.unparsed.push(UnparsedFile {
                        path: file.path.clone(),
                        message: err.to_string(),
                    });
                    continue;
                }
            };

            let scopes = module_scopes(&file.module_path, &parsed.items);
            for candidate in locate_candidates(&scopes) {
                match extract(&candidate, &self.config.markers) {
                    Some(descriptor) => {
                        tracing::debug!(
                            "{}: {} -> {} ({} member(s))",
                            file.path.display(),
                            descriptor.name,
                            descriptor.proxy_name,
                            descriptor.methods.len()
                        );
                        extraction.descriptors.push(descriptor);
                    }
                    None => extraction.skipped += 1,
                }
            }
        }
        extraction
    }

    /// Run the whole pipeline over `files`.
    pub fn run(&self, files: &[SourceFile]) -> Result<PipelineOutput, EmitError> {
        let extraction = self.extract(files);
        let sources = self.emitter.emit_all(&extraction.descriptors)?;
        tracing::info!(
            "generated {} proxy unit(s) from {} file(s)",
            extraction.descriptors.len(),
            files.len()
        );
        Ok(PipelineOutput {
            extraction,
            sources,
        })
    }
}
