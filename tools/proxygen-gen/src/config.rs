// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Generator configuration.
//!
//! Every field has a default, so an empty TOML file is a valid configuration.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Generator configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Marker names recognised in source.
    #[serde(default)]
    pub markers: MarkerConfig,

    /// Emission resources.
    #[serde(default)]
    pub emit: EmitConfig,
}

/// Marker names recognised by the locator and the extractor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkerConfig {
    /// Fully qualified path of the trait-level marker, matched exactly.
    #[serde(default = "default_type_marker")]
    pub type_marker: String,

    /// Member-level marker, matched as a substring of the resolved path.
    #[serde(default = "default_member_marker")]
    pub member_marker: String,

    /// Return types containing this text complete with a value.
    #[serde(default = "default_completion_with_value")]
    pub completion_with_value: String,
}

fn default_type_marker() -> String {
    "proxygen::activity_proxy".to_string()
}

fn default_member_marker() -> String {
    "activity".to_string()
}

fn default_completion_with_value() -> String {
    "proxygen::Completion<".to_string()
}

impl Default for MarkerConfig {
    fn default() -> Self {
        Self {
            type_marker: default_type_marker(),
            member_marker: default_member_marker(),
            completion_with_value: default_completion_with_value(),
        }
    }
}

/// Fixed text placed at the top of every generated unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmitConfig {
    /// Header lines, emitted verbatim.
    #[serde(default = "default_header")]
    pub header: Vec<String>,

    /// Import lines emitted after the header of every proxy unit.
    #[serde(default)]
    pub imports: Vec<String>,

    /// Emit the `ActivityProxies.g.rs` manifest.
    #[serde(default = "default_true")]
    pub manifest: bool,
}

fn default_header() -> Vec<String> {
    vec![
        "// <auto-generated/>".to_string(),
        "// Generated by proxygen-gen. Do not edit.".to_string(),
    ]
}

fn default_true() -> bool {
    true
}

impl Default for EmitConfig {
    fn default() -> Self {
        Self {
            header: default_header(),
            imports: Vec::new(),
            manifest: true,
        }
    }
}

impl GeneratorConfig {
    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Render the configuration as TOML.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let markers = &self.markers;
        if markers.type_marker.trim().is_empty() {
            return Err(ConfigError::Invalid("type_marker is empty".into()));
        }
        let type_marker = markers.type_marker.trim_start_matches("::");
        if !type_marker.contains("::") || type_marker.split("::").any(|s| !is_identifier(s)) {
            return Err(ConfigError::Invalid(format!(
                "type_marker '{}' is not a path such as 'proxygen::activity_proxy'",
                markers.type_marker
            )));
        }
        if markers.member_marker.is_empty() {
            return Err(ConfigError::Invalid("member_marker is empty".into()));
        }
        if markers.completion_with_value.is_empty() {
            return Err(ConfigError::Invalid("completion_with_value is empty".into()));
        }

        for line in self.emit.header.iter().chain(&self.emit.imports) {
            if line.contains('\n') {
                return Err(ConfigError::Invalid(format!(
                    "emit line {line:?} spans several lines; use one entry per line"
                )));
            }
        }

        Ok(())
    }
}

fn is_identifier(segment: &str) -> bool {
    let mut chars = segment.chars();
    matches!(chars.next(), Some(c) if c == '_' || c.is_alphabetic())
        && chars.all(|c| c == '_' || c.is_alphanumeric())
}
