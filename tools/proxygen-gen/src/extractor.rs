// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Semantic extraction of confirmed candidates into descriptors.

use crate::config::MarkerConfig;
use crate::descriptor::{InterfaceDescriptor, MemberShape, MethodDescriptor};
use crate::locator::Candidate;
use crate::symbols::SymbolTable;
use quote::ToTokens;
use syn::punctuated::Punctuated;
use syn::{Attribute, Expr, FnArg, Lit, Meta, Pat, ReturnType, Token, TraitItem, TraitItemFn};

/// Extract the descriptor of one candidate.
///
/// Returns `None` when the candidate does not carry the type marker (after
/// resolving its attributes through the module's symbol table) or when the
/// trait cannot be resolved: generic traits, and traits with a selected
/// member that takes no `&self` receiver, has a non-identifier parameter
/// pattern, is generic, or cannot be mapped to a shape.
pub fn extract(candidate: &Candidate<'_>, markers: &MarkerConfig) -> Option<InterfaceDescriptor> {
    let symbols = SymbolTable::build(candidate.module_path, candidate.scope);
    if !has_type_marker(&candidate.item.attrs, &symbols, markers) {
        return None;
    }

    if !candidate.item.generics.params.is_empty() {
        return None;
    }

    let methods = candidate
        .item
        .items
        .iter()
        .filter_map(|item| match item {
            TraitItem::Fn(member) => Some(member),
            _ => None,
        })
        .filter_map(|member| {
            member_marker(&member.attrs, &symbols, markers).map(|attr| (member, attr))
        })
        .map(|(member, attr)| extract_method(member, attr, &symbols, markers))
        .collect::<Option<Vec<_>>>()?;

    Some(
        InterfaceDescriptor::new(candidate.module_path, &candidate.item.ident.to_string())
            .with_methods(methods),
    )
}

/// True when one attribute resolves exactly to the configured type marker.
pub fn has_type_marker(attrs: &[Attribute], symbols: &SymbolTable, markers: &MarkerConfig) -> bool {
    let expected = markers.type_marker.trim_start_matches("::");
    attrs
        .iter()
        .any(|attr| symbols.resolve_path(attr.path()) == expected)
}

/// First attribute whose resolved path contains the member marker.
fn member_marker<'a>(
    attrs: &'a [Attribute],
    symbols: &SymbolTable,
    markers: &MarkerConfig,
) -> Option<&'a Attribute> {
    attrs
        .iter()
        .find(|attr| symbols.resolve_path(attr.path()).contains(&markers.member_marker))
}

fn extract_method(
    member: &TraitItemFn,
    marker: &Attribute,
    symbols: &SymbolTable,
    markers: &MarkerConfig,
) -> Option<MethodDescriptor> {
    let sig = &member.sig;
    if !sig.generics.params.is_empty() || sig.variadic.is_some() {
        return None;
    }

    let mut inputs = sig.inputs.iter();
    match inputs.next()? {
        FnArg::Receiver(receiver)
            if receiver.reference.is_some()
                && receiver.mutability.is_none()
                && receiver.colon_token.is_none() => {}
        _ => return None,
    }

    let return_type = symbols.qualify_return_type(&sig.output);
    let shape = match (sig.asyncness.is_some(), &sig.output) {
        (false, ReturnType::Default) => MemberShape::Void,
        (false, ReturnType::Type(..)) | (true, ReturnType::Default) => return None,
        (true, ReturnType::Type(..)) if return_type.contains(&markers.completion_with_value) => {
            MemberShape::CompletionWithValue
        }
        (true, ReturnType::Type(..)) => MemberShape::Completion,
    };

    let mut method = MethodDescriptor::new(sig.ident.to_string(), return_type, shape);
    for input in inputs {
        let FnArg::Typed(typed) = input else {
            return None;
        };
        let Pat::Ident(pat) = typed.pat.as_ref() else {
            return None;
        };
        if pat.by_ref.is_some() || pat.subpat.is_some() {
            return None;
        }
        method = method.with_parameter(pat.ident.to_string(), symbols.qualify_type(&typed.ty));
    }

    if let Some(activity_name) = activity_name(marker) {
        method = method.with_activity_name(activity_name);
    }
    Some(method)
}

/// Literal first positional argument of the member marker.
///
/// String literals yield their value, other literals their source text.
/// Named or non-literal arguments yield nothing.
fn activity_name(marker: &Attribute) -> Option<String> {
    let Meta::List(list) = &marker.meta else {
        return None;
    };
    let args = list
        .parse_args_with(Punctuated::<Expr, Token![,]>::parse_terminated)
        .ok()?;
    match args.first()? {
        Expr::Lit(expr) => Some(match &expr.lit {
            Lit::Str(lit) => lit.value(),
            other => other.to_token_stream().to_string(),
        }),
        _ => None,
    }
}
