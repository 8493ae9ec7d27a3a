// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Per-module symbol table.
//!
//! Maps the names visible in one module (its `use` declarations and the
//! items declared in it) to fully qualified paths, and renders paths and
//! types through that mapping. Names the table does not know (primitives,
//! prelude items, glob imports) are rendered as written.

use quote::ToTokens;
use std::collections::BTreeMap;
use syn::{
    GenericArgument, Item, Path, PathArguments, QSelf, ReturnType, Type, TypeParamBound, UseTree,
};

const MAX_ALIAS_DEPTH: usize = 16;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Symbol {
    /// Item declared in the module, stored fully qualified.
    Declared(String),
    /// Target of a `use` declaration, as written.
    Imported {
        leading_colon: bool,
        segments: Vec<String>,
    },
}

/// Names visible in one module.
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    module_path: String,
    symbols: BTreeMap<String, Symbol>,
}

impl SymbolTable {
    /// Build the table for the module at `module_path` holding `items`.
    pub fn build(module_path: &str, items: &[Item]) -> Self {
        let mut table = Self {
            module_path: module_path.to_string(),
            symbols: BTreeMap::new(),
        };

        for item in items {
            match item {
                Item::Use(item_use) => {
                    table.add_use(item_use.leading_colon.is_some(), &mut Vec::new(), &item_use.tree);
                }
                Item::ExternCrate(item) => {
                    let alias = item
                        .rename
                        .as_ref()
                        .map_or(&item.ident, |(_, rename)| rename);
                    table.symbols.insert(
                        alias.to_string(),
                        Symbol::Imported {
                            leading_colon: true,
                            segments: vec![item.ident.to_string()],
                        },
                    );
                }
                _ => {
                    if let Some(ident) = declared_ident(item) {
                        table.symbols.insert(
                            ident.to_string(),
                            Symbol::Declared(format!("{module_path}::{ident}")),
                        );
                    }
                }
            }
        }

        table
    }

    pub fn module_path(&self) -> &str {
        &self.module_path
    }

    fn add_use(&mut self, leading_colon: bool, prefix: &mut Vec<String>, tree: &UseTree) {
        match tree {
            UseTree::Path(path) => {
                prefix.push(path.ident.to_string());
                self.add_use(leading_colon, prefix, &path.tree);
                prefix.pop();
            }
            UseTree::Name(name) => {
                if name.ident == "self" {
                    if let Some(last) = prefix.last() {
                        self.import(last.clone(), leading_colon, prefix.clone());
                    }
                } else {
                    let mut segments = prefix.clone();
                    segments.push(name.ident.to_string());
                    self.import(name.ident.to_string(), leading_colon, segments);
                }
            }
            UseTree::Rename(rename) => {
                if rename.rename == "_" {
                    return;
                }
                let mut segments = prefix.clone();
                if rename.ident != "self" {
                    segments.push(rename.ident.to_string());
                }
                self.import(rename.rename.to_string(), leading_colon, segments);
            }
            UseTree::Group(group) => {
                for tree in &group.items {
                    self.add_use(leading_colon, prefix, tree);
                }
            }
            UseTree::Glob(_) => {}
        }
    }

    fn import(&mut self, alias: String, leading_colon: bool, segments: Vec<String>) {
        if segments.is_empty() {
            return;
        }
        self.symbols.insert(
            alias,
            Symbol::Imported {
                leading_colon,
                segments,
            },
        );
    }

    /// Resolve a path to its fully qualified display form, without generic
    /// arguments. A leading `::` is dropped.
    pub fn resolve_path(&self, path: &Path) -> String {
        let segments: Vec<String> = path.segments.iter().map(|s| s.ident.to_string()).collect();
        let resolved = self.resolve_segments(path.leading_colon.is_some(), &segments, 0);
        resolved.trim_start_matches("::").to_string()
    }

    fn resolve_segments(&self, leading_colon: bool, segments: &[String], depth: usize) -> String {
        match self.resolve_head(leading_colon, segments, depth) {
            Some((head, consumed)) => {
                let mut out = head;
                for segment in &segments[consumed..] {
                    out.push_str("::");
                    out.push_str(segment);
                }
                out
            }
            None => {
                let joined = segments.join("::");
                if leading_colon {
                    format!("::{joined}")
                } else {
                    joined
                }
            }
        }
    }

    /// Resolve the leading segments of a path. Returns the qualified
    /// replacement and how many segments it covers.
    fn resolve_head(
        &self,
        leading_colon: bool,
        segments: &[String],
        depth: usize,
    ) -> Option<(String, usize)> {
        if leading_colon || depth > MAX_ALIAS_DEPTH {
            return None;
        }
        let first = segments.first()?;
        match first.as_str() {
            "crate" => Some(("crate".to_string(), 1)),
            "self" => Some((self.module_path.clone(), 1)),
            "super" => {
                let count = segments.iter().take_while(|s| *s == "super").count();
                let mut parent: Vec<&str> = self.module_path.split("::").collect();
                if parent.len() <= count {
                    return None;
                }
                parent.truncate(parent.len() - count);
                Some((parent.join("::"), count))
            }
            _ => match self.symbols.get(first)? {
                Symbol::Declared(path) => Some((path.clone(), 1)),
                Symbol::Imported {
                    leading_colon,
                    segments: target,
                } => {
                    // `use serde;` names the extern crate itself.
                    if !*leading_colon && target.len() == 1 && target[0] == *first {
                        return Some((first.clone(), 1));
                    }
                    let resolved = if target.first() == Some(first) {
                        let joined = target.join("::");
                        if *leading_colon {
                            format!("::{joined}")
                        } else {
                            joined
                        }
                    } else {
                        self.resolve_segments(*leading_colon, target, depth + 1)
                    };
                    Some((resolved, 1))
                }
            },
        }
    }

    /// Render a type with every path qualified through the table.
    pub fn qualify_type(&self, ty: &Type) -> String {
        let mut out = String::new();
        self.write_type(&mut out, ty);
        out
    }

    /// Render a declared return type; `()` when absent.
    pub fn qualify_return_type(&self, output: &ReturnType) -> String {
        match output {
            ReturnType::Default => "()".to_string(),
            ReturnType::Type(_, ty) => self.qualify_type(ty),
        }
    }

    fn write_type(&self, out: &mut String, ty: &Type) {
        match ty {
            Type::Path(type_path) => {
                self.write_path(out, type_path.qself.as_ref(), &type_path.path);
            }
            Type::Reference(reference) => {
                out.push('&');
                if let Some(lifetime) = &reference.lifetime {
                    out.push_str(&lifetime.to_string());
                    out.push(' ');
                }
                if reference.mutability.is_some() {
                    out.push_str("mut ");
                }
                self.write_type(out, &reference.elem);
            }
            Type::Tuple(tuple) => {
                out.push('(');
                for (index, elem) in tuple.elems.iter().enumerate() {
                    if index > 0 {
                        out.push_str(", ");
                    }
                    self.write_type(out, elem);
                }
                if tuple.elems.len() == 1 {
                    out.push(',');
                }
                out.push(')');
            }
            Type::Slice(slice) => {
                out.push('[');
                self.write_type(out, &slice.elem);
                out.push(']');
            }
            Type::Array(array) => {
                out.push('[');
                self.write_type(out, &array.elem);
                out.push_str("; ");
                out.push_str(&compact_tokens(&array.len));
                out.push(']');
            }
            Type::Ptr(ptr) => {
                out.push_str(if ptr.mutability.is_some() { "*mut " } else { "*const " });
                self.write_type(out, &ptr.elem);
            }
            Type::Paren(paren) => {
                out.push('(');
                self.write_type(out, &paren.elem);
                out.push(')');
            }
            Type::Group(group) => self.write_type(out, &group.elem),
            Type::Never(_) => out.push('!'),
            Type::Infer(_) => out.push('_'),
            Type::TraitObject(object) => {
                out.push_str("dyn ");
                self.write_bounds(out, object.bounds.iter());
            }
            Type::ImplTrait(impl_trait) => {
                out.push_str("impl ");
                self.write_bounds(out, impl_trait.bounds.iter());
            }
            other => out.push_str(&compact_tokens(other)),
        }
    }

    fn write_bounds<'a>(&self, out: &mut String, bounds: impl Iterator<Item = &'a TypeParamBound>) {
        for (index, bound) in bounds.enumerate() {
            if index > 0 {
                out.push_str(" + ");
            }
            match bound {
                TypeParamBound::Trait(bound) => {
                    if matches!(bound.modifier, syn::TraitBoundModifier::Maybe(_)) {
                        out.push('?');
                    }
                    self.write_path(out, None, &bound.path);
                }
                TypeParamBound::Lifetime(lifetime) => out.push_str(&lifetime.to_string()),
                other => out.push_str(&compact_tokens(other)),
            }
        }
    }

    fn write_path(&self, out: &mut String, qself: Option<&QSelf>, path: &Path) {
        let start;
        if let Some(qself) = qself {
            out.push('<');
            self.write_type(out, &qself.ty);
            if qself.position > 0 {
                out.push_str(" as ");
                let trait_path = Path {
                    leading_colon: path.leading_colon,
                    segments: path.segments.iter().take(qself.position).cloned().collect(),
                };
                self.write_path(out, None, &trait_path);
            }
            out.push('>');
            start = qself.position;
        } else {
            let idents: Vec<String> = path.segments.iter().map(|s| s.ident.to_string()).collect();
            match self.resolve_head(path.leading_colon.is_some(), &idents, 0) {
                Some((head, consumed)) => {
                    out.push_str(&head);
                    if let Some(segment) = path.segments.iter().nth(consumed - 1) {
                        self.write_arguments(out, &segment.arguments);
                    }
                    start = consumed;
                }
                None => {
                    if path.leading_colon.is_some() {
                        out.push_str("::");
                    }
                    if let Some(first) = path.segments.first() {
                        out.push_str(&first.ident.to_string());
                        self.write_arguments(out, &first.arguments);
                    }
                    start = 1;
                }
            }
        }

        for segment in path.segments.iter().skip(start) {
            out.push_str("::");
            out.push_str(&segment.ident.to_string());
            self.write_arguments(out, &segment.arguments);
        }
    }

    fn write_arguments(&self, out: &mut String, arguments: &PathArguments) {
        match arguments {
            PathArguments::None => {}
            PathArguments::AngleBracketed(angle) => {
                if angle.colon2_token.is_some() {
                    out.push_str("::");
                }
                out.push('<');
                for (index, argument) in angle.args.iter().enumerate() {
                    if index > 0 {
                        out.push_str(", ");
                    }
                    match argument {
                        GenericArgument::Lifetime(lifetime) => out.push_str(&lifetime.to_string()),
                        GenericArgument::Type(ty) => self.write_type(out, ty),
                        GenericArgument::AssocType(assoc) => {
                            out.push_str(&assoc.ident.to_string());
                            out.push_str(" = ");
                            self.write_type(out, &assoc.ty);
                        }
                        other => out.push_str(&compact_tokens(other)),
                    }
                }
                out.push('>');
            }
            PathArguments::Parenthesized(parenthesized) => {
                out.push('(');
                for (index, input) in parenthesized.inputs.iter().enumerate() {
                    if index > 0 {
                        out.push_str(", ");
                    }
                    self.write_type(out, input);
                }
                out.push(')');
                if let ReturnType::Type(_, ty) = &parenthesized.output {
                    out.push_str(" -> ");
                    self.write_type(out, ty);
                }
            }
        }
    }
}

fn declared_ident(item: &Item) -> Option<&syn::Ident> {
    match item {
        Item::Struct(item) => Some(&item.ident),
        Item::Enum(item) => Some(&item.ident),
        Item::Union(item) => Some(&item.ident),
        Item::Trait(item) => Some(&item.ident),
        Item::TraitAlias(item) => Some(&item.ident),
        Item::Type(item) => Some(&item.ident),
        Item::Fn(item) => Some(&item.sig.ident),
        Item::Mod(item) => Some(&item.ident),
        Item::Const(item) => Some(&item.ident),
        Item::Static(item) => Some(&item.ident),
        Item::Macro(item) => item.ident.as_ref(),
        _ => None,
    }
}

/// Token text with the spacing `proc_macro2` inserts between punctuation removed.
fn compact_tokens(tokens: &impl ToTokens) -> String {
    tokens
        .to_token_stream()
        .to_string()
        .replace(" :: ", "::")
        .replace(" < ", "<")
        .replace(" >", ">")
        .replace("< ", "<")
        .replace(" ,", ",")
}
