// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Build-time generator for proxygen activity proxies.
//!
//! The pipeline runs in three stages, each a pure function of its input:
//!
//! ```text
//! SourceFile ──► locator ──► Candidate ──► extractor ──► InterfaceDescriptor ──► codegen ──► GeneratedSource
//!                (syntax)                  (symbols)                             (tera)
//! ```
//!
//! - [`locator`] flags traits carrying any non-doc attribute.
//! - [`extractor`] confirms the `proxygen::activity_proxy` marker through the
//!   module's [`symbols`] table and builds descriptors. Traits it cannot
//!   resolve are skipped without a diagnostic.
//! - [`codegen`] renders one `<ProxyName>.g.rs` unit per descriptor and the
//!   `ActivityProxies.g.rs` manifest.
//!
//! [`Builder`] drives the pipeline from a build script; the `proxygen-gen`
//! binary drives it from the command line.

pub mod builder;
pub mod codegen;
pub mod config;
pub mod descriptor;
pub mod extractor;
pub mod locator;
pub mod pipeline;
pub mod source;
pub mod symbols;

pub use builder::{BuildReport, Builder};
pub use codegen::{EmitError, Emitter, GeneratedSource, MANIFEST_HINT_NAME};
pub use config::{ConfigError, GeneratorConfig};
pub use descriptor::{
    proxy_name_for, InterfaceDescriptor, MemberShape, MethodDescriptor, ParameterDescriptor,
};
pub use pipeline::{Extraction, Pipeline, PipelineOutput, UnparsedFile};
pub use source::{collect_sources, module_path_for, SourceFile};
