// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Build-script entry point.
//!
//! ```rust,ignore
//! // build.rs
//! fn main() -> anyhow::Result<()> {
//!     proxygen_gen::Builder::new().compile()?;
//!     Ok(())
//! }
//! ```
//!
//! Generated units land in `OUT_DIR` and are pulled into the crate with
//! `proxygen::include_proxy!` and `proxygen::include_manifest!`.

use crate::codegen::GeneratedSource;
use crate::config::GeneratorConfig;
use crate::pipeline::{Pipeline, UnparsedFile};
use crate::source::collect_sources;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Configures and runs the pipeline from a build script.
#[derive(Debug, Clone)]
pub struct Builder {
    source_root: PathBuf,
    out_dir: Option<PathBuf>,
    config: Option<GeneratorConfig>,
    config_file: Option<PathBuf>,
    emit_rerun_if_changed: bool,
}

impl Default for Builder {
    fn default() -> Self {
        Self::new()
    }
}

/// What a [`Builder::compile`] run produced.
#[derive(Debug, Clone, Default)]
pub struct BuildReport {
    /// Fully qualified names of the traits that got a proxy.
    pub proxies: Vec<String>,
    /// Units whose content changed and were written.
    pub written: Vec<PathBuf>,
    /// Units already up to date.
    pub unchanged: Vec<PathBuf>,
    pub unparsed: Vec<UnparsedFile>,
}

impl Builder {
    /// Scan `src`, write to `OUT_DIR`, default configuration.
    pub fn new() -> Self {
        Self {
            source_root: PathBuf::from("src"),
            out_dir: None,
            config: None,
            config_file: None,
            emit_rerun_if_changed: true,
        }
    }

    #[must_use]
    pub fn source_root(mut self, path: impl Into<PathBuf>) -> Self {
        self.source_root = path.into();
        self
    }

    /// Write here instead of `OUT_DIR`.
    #[must_use]
    pub fn out_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.out_dir = Some(path.into());
        self
    }

    #[must_use]
    pub fn config(mut self, config: GeneratorConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Load the configuration from a TOML file. Ignored when
    /// [`Builder::config`] is also set.
    #[must_use]
    pub fn config_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_file = Some(path.into());
        self
    }

    /// Print `cargo:rerun-if-changed` lines (default: on).
    #[must_use]
    pub fn emit_rerun_if_changed(mut self, enabled: bool) -> Self {
        self.emit_rerun_if_changed = enabled;
        self
    }

    pub fn compile(self) -> Result<BuildReport> {
        let config = match (self.config, &self.config_file) {
            (Some(config), _) => config,
            (None, Some(path)) => {
                if self.emit_rerun_if_changed {
                    println!("cargo:rerun-if-changed={}", path.display());
                }
                GeneratorConfig::from_file(path)
                    .with_context(|| format!("Failed to load {}", path.display()))?
            }
            (None, None) => GeneratorConfig::default(),
        };

        let out_dir = match self.out_dir {
            Some(dir) => dir,
            None => std::env::var_os("OUT_DIR")
                .map(PathBuf::from)
                .context("OUT_DIR is not set; call compile() from a build script or set out_dir()")?,
        };

        if self.emit_rerun_if_changed {
            println!("cargo:rerun-if-changed={}", self.source_root.display());
        }
        let files = collect_sources(&self.source_root)?;
        if self.emit_rerun_if_changed {
            for file in &files {
                println!("cargo:rerun-if-changed={}", file.path.display());
            }
        }

        let pipeline = Pipeline::new(config).context("Failed to initialize the emitter")?;
        let output = pipeline.run(&files).context("Failed to emit proxies")?;

        for unparsed in &output.extraction.unparsed {
            println!(
                "cargo:warning=proxygen: skipped {}: {}",
                unparsed.path.display(),
                unparsed.message
            );
        }

        let (written, unchanged) = write_sources(&out_dir, &output.sources)?;
        Ok(BuildReport {
            proxies: output
                .extraction
                .descriptors
                .iter()
                .map(|d| d.name.clone())
                .collect(),
            written,
            unchanged,
            unparsed: output.extraction.unparsed,
        })
    }
}

/// Write every unit into `out_dir`, leaving files with identical content
/// untouched. Returns the written and the unchanged paths.
pub fn write_sources(
    out_dir: &Path,
    sources: &[GeneratedSource],
) -> Result<(Vec<PathBuf>, Vec<PathBuf>)> {
    fs::create_dir_all(out_dir)
        .with_context(|| format!("Failed to create {}", out_dir.display()))?;

    let mut written = Vec::new();
    let mut unchanged = Vec::new();
    for source in sources {
        let path = out_dir.join(&source.hint_name);
        if write_if_changed(&path, &source.text)? {
            tracing::debug!("wrote {}", path.display());
            written.push(path);
        } else {
            unchanged.push(path);
        }
    }
    Ok((written, unchanged))
}

fn write_if_changed(path: &Path, text: &str) -> Result<bool> {
    if let Ok(existing) = fs::read_to_string(path) {
        if existing == text {
            return Ok(false);
        }
    }
    fs::write(path, text).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(true)
}
