// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Marker attributes recognised by `proxygen-gen`.
//!
//! Both attributes leave the annotated item untouched. They exist so that
//! annotated traits compile and so that misplaced markers are reported at the
//! annotation site instead of being silently ignored by the generator.

extern crate proc_macro;

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::ToTokens;
use syn::parse::Parser;
use syn::punctuated::Punctuated;
use syn::{ImplItemFn, ItemFn, ItemTrait, Lit, Token, TraitItemFn};

/// Marks a trait as a source for a generated forwarding proxy.
///
/// Takes no arguments. Combine with `#[proxygen::async_trait]` when the trait
/// has async members; `activity_proxy` must come first.
///
/// Example:
/// ```ignore
/// #[proxygen::activity_proxy]
/// #[proxygen::async_trait]
/// pub trait IShippingActivities: Send + Sync {
///     #[proxygen::activity("custom-activity-name")]
///     async fn ship_items(&self, input: ShipItemsInput) -> proxygen::Completion<ShipItemsOutput>;
/// }
/// ```
#[proc_macro_attribute]
pub fn activity_proxy(args: TokenStream, item: TokenStream) -> TokenStream {
    expand_activity_proxy(args.into(), item.into())
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

/// Marks a trait member as an activity, optionally overriding its tag name.
///
/// `#[activity]` registers the member under its own name,
/// `#[activity("name")]` under the given literal. Other literals register
/// under their source text, so `#[activity(42)]` is tagged `42`.
#[proc_macro_attribute]
pub fn activity(args: TokenStream, item: TokenStream) -> TokenStream {
    expand_activity(args.into(), item.into())
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn expand_activity_proxy(args: TokenStream2, item: TokenStream2) -> syn::Result<TokenStream2> {
    if !args.is_empty() {
        return Err(syn::Error::new_spanned(
            args,
            "#[activity_proxy] does not take arguments",
        ));
    }
    syn::parse2::<ItemTrait>(item.clone()).map_err(|err| {
        syn::Error::new(err.span(), "#[activity_proxy] can only be applied to a trait")
    })?;
    Ok(item)
}

fn expand_activity(args: TokenStream2, item: TokenStream2) -> syn::Result<TokenStream2> {
    let names = Punctuated::<Lit, Token![,]>::parse_terminated.parse2(args)?;
    if names.len() > 1 {
        return Err(syn::Error::new_spanned(
            names.into_token_stream(),
            "#[activity] takes at most one name",
        ));
    }
    if let Some(Lit::Str(name)) = names.first() {
        if name.value().is_empty() {
            return Err(syn::Error::new_spanned(name, "activity name cannot be empty"));
        }
    }

    let is_fn = syn::parse2::<TraitItemFn>(item.clone()).is_ok()
        || syn::parse2::<ImplItemFn>(item.clone()).is_ok()
        || syn::parse2::<ItemFn>(item.clone()).is_ok();
    if !is_fn {
        return Err(syn::Error::new_spanned(
            item,
            "#[activity] can only be applied to a function",
        ));
    }
    Ok(item)
}
