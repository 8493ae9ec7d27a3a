// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Proxy emission.
//!
//! Output is a pure function of the descriptors and the emit resources:
//! identical input renders byte-identical text. Nothing here touches the
//! filesystem.

pub mod emitter;

pub use emitter::Emitter;

use serde::Serialize;
use thiserror::Error;

/// File name of the crate manifest unit.
pub const MANIFEST_HINT_NAME: &str = "ActivityProxies.g.rs";

/// One generated source unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedSource {
    /// File name, `<ProxyName>.g.rs` or [`MANIFEST_HINT_NAME`].
    pub hint_name: String,
    /// Module the unit must be included into.
    pub namespace: String,
    pub text: String,
}

#[derive(Debug, Error)]
pub enum EmitError {
    #[error("template error: {0}")]
    Template(#[from] tera::Error),

    #[error("proxy '{proxy_name}' would be generated for both '{first}' and '{second}'")]
    DuplicateProxy {
        proxy_name: String,
        first: String,
        second: String,
    },
}
