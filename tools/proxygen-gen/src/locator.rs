// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Cheap syntactic filter for proxy candidates.
//!
//! Flags every trait declaration that carries at least one non-doc
//! attribute, including traits nested in inline `mod` blocks. No name
//! resolution happens here; the extractor confirms candidates.

use syn::{Item, ItemTrait};

/// A trait that may carry the proxy marker.
#[derive(Debug, Clone, Copy)]
pub struct Candidate<'a> {
    /// Module path the trait is declared in.
    pub module_path: &'a str,
    pub item: &'a ItemTrait,
    /// Items of the enclosing module, for symbol resolution.
    pub scope: &'a [Item],
}

/// Module path and items of one module, kept alive for the candidates
/// borrowing them.
#[derive(Debug)]
pub struct ModuleScope<'a> {
    pub module_path: String,
    pub items: &'a [Item],
}

/// Collect every module reachable from `items` through inline `mod` blocks,
/// the root module first.
pub fn module_scopes<'a>(module_path: &str, items: &'a [Item]) -> Vec<ModuleScope<'a>> {
    let mut scopes = Vec::new();
    collect_scopes(module_path.to_string(), items, &mut scopes);
    scopes
}

fn collect_scopes<'a>(module_path: String, items: &'a [Item], scopes: &mut Vec<ModuleScope<'a>>) {
    let nested: Vec<(String, &'a [Item])> = items
        .iter()
        .filter_map(|item| match item {
            Item::Mod(item_mod) => item_mod
                .content
                .as_ref()
                .map(|(_, content)| (format!("{module_path}::{}", item_mod.ident), content.as_slice())),
            _ => None,
        })
        .collect();

    scopes.push(ModuleScope { module_path, items });
    for (path, content) in nested {
        collect_scopes(path, content, scopes);
    }
}

/// Locate candidate traits in the given modules, in source order.
pub fn locate_candidates<'a>(scopes: &'a [ModuleScope<'a>]) -> Vec<Candidate<'a>> {
    scopes
        .iter()
        .flat_map(|scope| {
            scope.items.iter().filter_map(move |item| match item {
                Item::Trait(item_trait) if is_candidate(item_trait) => Some(Candidate {
                    module_path: &scope.module_path,
                    item: item_trait,
                    scope: scope.items,
                }),
                _ => None,
            })
        })
        .collect()
}

/// A trait with at least one attribute other than a doc comment.
pub fn is_candidate(item: &ItemTrait) -> bool {
    item.attrs.iter().any(|attr| !attr.path().is_ident("doc"))
}
