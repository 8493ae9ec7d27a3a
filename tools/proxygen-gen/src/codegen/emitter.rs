// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

use super::{EmitError, GeneratedSource, MANIFEST_HINT_NAME};
use crate::config::EmitConfig;
use crate::descriptor::{InterfaceDescriptor, MethodDescriptor};
use serde::Serialize;
use std::collections::BTreeMap;
use tera::{Context, Tera};

const PROXY_TEMPLATE: &str = include_str!("templates/proxy.rs.tera");
const MANIFEST_TEMPLATE: &str = include_str!("templates/manifest.rs.tera");

/// Renders descriptors into Rust source units.
pub struct Emitter {
    tera: Tera,
    resources: EmitConfig,
}

#[derive(Serialize)]
struct ProxyView<'a> {
    header: &'a [String],
    imports: &'a [String],
    trait_path: &'a str,
    proxy_name: &'a str,
    proxy_path_literal: String,
    methods: Vec<MethodView>,
}

#[derive(Serialize)]
struct MethodView {
    name: String,
    name_literal: String,
    activity_attribute: String,
    activity_name: String,
    shape: &'static str,
    constructor: &'static str,
    return_type: String,
    return_type_literal: String,
    params_decl: String,
    call_args: String,
    forward_args: String,
    arguments_binding: &'static str,
    parameters: Vec<ParameterView>,
}

#[derive(Serialize)]
struct ParameterView {
    name: String,
    name_literal: String,
    type_name: String,
    type_literal: String,
}

#[derive(Serialize)]
struct ManifestView<'a> {
    header: &'a [String],
    records: Vec<String>,
}

impl Emitter {
    pub fn new(resources: EmitConfig) -> Result<Self, EmitError> {
        let mut tera = Tera::default();
        tera.autoescape_on(vec![]);
        tera.add_raw_templates(vec![
            ("proxy.rs", PROXY_TEMPLATE),
            ("manifest.rs", MANIFEST_TEMPLATE),
        ])?;
        Ok(Self { tera, resources })
    }

    /// Render the proxy unit of one descriptor.
    pub fn emit_proxy(&self, descriptor: &InterfaceDescriptor) -> Result<GeneratedSource, EmitError> {
        let view = ProxyView {
            header: &self.resources.header,
            imports: &self.resources.imports,
            trait_path: &descriptor.name,
            proxy_name: &descriptor.proxy_name,
            proxy_path_literal: literal(&descriptor.proxy_path()),
            methods: descriptor.methods.iter().map(method_view).collect(),
        };
        let text = self
            .tera
            .render("proxy.rs", &Context::from_serialize(&view)?)?;
        Ok(GeneratedSource {
            hint_name: descriptor.hint_name(),
            namespace: descriptor.namespace.clone(),
            text,
        })
    }

    /// Render the crate manifest listing every descriptor's record.
    pub fn emit_manifest(
        &self,
        descriptors: &[InterfaceDescriptor],
    ) -> Result<GeneratedSource, EmitError> {
        let view = ManifestView {
            header: &self.resources.header,
            records: descriptors.iter().map(InterfaceDescriptor::proxy_path).collect(),
        };
        let text = self
            .tera
            .render("manifest.rs", &Context::from_serialize(&view)?)?;
        Ok(GeneratedSource {
            hint_name: MANIFEST_HINT_NAME.to_string(),
            namespace: "crate".to_string(),
            text,
        })
    }

    /// Render every proxy unit, then the manifest when enabled.
    ///
    /// Two descriptors deriving the same proxy name would write the same
    /// unit; that is reported instead of letting one overwrite the other.
    pub fn emit_all(
        &self,
        descriptors: &[InterfaceDescriptor],
    ) -> Result<Vec<GeneratedSource>, EmitError> {
        let mut seen: BTreeMap<&str, &str> = BTreeMap::new();
        for descriptor in descriptors {
            if let Some(first) = seen.insert(&descriptor.proxy_name, &descriptor.name) {
                return Err(EmitError::DuplicateProxy {
                    proxy_name: descriptor.proxy_name.clone(),
                    first: first.to_string(),
                    second: descriptor.name.clone(),
                });
            }
        }

        let mut sources = descriptors
            .iter()
            .map(|descriptor| self.emit_proxy(descriptor))
            .collect::<Result<Vec<_>, _>>()?;
        if self.resources.manifest {
            sources.push(self.emit_manifest(descriptors)?);
        }
        Ok(sources)
    }
}

fn method_view(method: &MethodDescriptor) -> MethodView {
    let activity_attribute = match &method.activity_name {
        Some(name) => format!("#[::proxygen::activity({})]", literal(name)),
        None => "#[::proxygen::activity]".to_string(),
    };
    let activity_name = match &method.activity_name {
        Some(name) => format!("::std::option::Option::Some({})", literal(name)),
        None => "::std::option::Option::None".to_string(),
    };

    let params_decl: String = method
        .parameters
        .iter()
        .map(|p| format!(", {}: {}", p.name, p.type_name))
        .collect();
    let names: Vec<&str> = method.parameters.iter().map(|p| p.name.as_str()).collect();
    let forward_args: String = names.iter().map(|name| format!(", {name}")).collect();

    MethodView {
        name: method.name.clone(),
        name_literal: literal(&method.name),
        activity_attribute,
        activity_name,
        shape: method.shape.runtime_variant(),
        constructor: method.shape.binding_constructor(),
        return_type: method.return_type.clone(),
        return_type_literal: literal(&method.return_type),
        params_decl,
        call_args: names.join(", "),
        forward_args,
        arguments_binding: if method.parameters.is_empty() {
            "_"
        } else {
            "mut __arguments"
        },
        parameters: method
            .parameters
            .iter()
            .map(|p| ParameterView {
                name: p.name.clone(),
                name_literal: literal(&p.name),
                type_name: p.type_name.clone(),
                type_literal: literal(&p.type_name),
            })
            .collect(),
    }
}

/// Rust string literal for `value`.
fn literal(value: &str) -> String {
    format!("{value:?}")
}
