// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Source files fed to the pipeline.

use anyhow::{Context, Result};
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

/// One Rust source file and the module path it defines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub path: PathBuf,
    /// Module path of the file's top-level items, e.g. `crate::activities`.
    pub module_path: String,
    pub text: String,
}

impl SourceFile {
    pub fn new(
        path: impl Into<PathBuf>,
        module_path: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            module_path: module_path.into(),
            text: text.into(),
        }
    }

    /// In-memory source whose path is derived from its module path.
    pub fn in_memory(module_path: impl Into<String>, text: impl Into<String>) -> Self {
        let module_path = module_path.into();
        let path = PathBuf::from(format!("{}.rs", module_path.replace("::", "/")));
        Self::new(path, module_path, text)
    }
}

/// Derive the module path of a file from its path relative to the source root.
///
/// `lib.rs` and `main.rs` at the root map to `crate`, `a/mod.rs` to
/// `crate::a` and `a/b.rs` to `crate::a::b`. Returns `None` for paths that
/// are not `.rs` files or that contain non-identifier components.
pub fn module_path_for(relative: &Path) -> Option<String> {
    if relative.extension()? != "rs" {
        return None;
    }

    let mut segments = vec!["crate".to_string()];
    let parent = relative.parent().unwrap_or_else(|| Path::new(""));
    for component in parent.components() {
        match component {
            Component::Normal(name) => segments.push(name.to_str()?.to_string()),
            Component::CurDir => {}
            _ => return None,
        }
    }

    let stem = relative.file_stem()?.to_str()?;
    let at_root = segments.len() == 1;
    match stem {
        "mod" => {}
        "lib" | "main" if at_root => {}
        _ => segments.push(stem.to_string()),
    }

    let valid = segments[1..]
        .iter()
        .all(|s| !s.is_empty() && !s.contains(['-', '.', ' ']));
    valid.then(|| segments.join("::"))
}

/// Read every `.rs` file under `root`, sorted by path.
///
/// `src/bin` is skipped: files there are separate crates. Files whose path
/// does not map to a module are skipped as well.
pub fn collect_sources(root: &Path) -> Result<Vec<SourceFile>> {
    let mut files = Vec::new();
    let walker = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| !(entry.depth() == 1 && entry.file_name() == "bin"));

    for entry in walker {
        let entry = entry.with_context(|| format!("Failed to walk {}", root.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        let Ok(relative) = path.strip_prefix(root) else {
            continue;
        };
        let Some(module_path) = module_path_for(relative) else {
            tracing::debug!("skipping {}: not a module file", path.display());
            continue;
        };

        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        files.push(SourceFile::new(path, module_path, text));
    }

    Ok(files)
}
