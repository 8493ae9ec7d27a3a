// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Descriptors produced by the extractor and consumed by the emitter.

use serde::Serialize;

/// One annotated trait, resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InterfaceDescriptor {
    /// Fully qualified trait path, e.g. `crate::activities::IShippingActivities`.
    pub name: String,
    /// Module path the trait is declared in, e.g. `crate::activities`.
    pub namespace: String,
    pub proxy_name: String,
    /// Selected members in declaration order.
    pub methods: Vec<MethodDescriptor>,
}

impl InterfaceDescriptor {
    pub fn new(namespace: impl Into<String>, trait_name: &str) -> Self {
        let namespace = namespace.into();
        let name = format!("{namespace}::{trait_name}");
        let proxy_name = proxy_name_for(&name);
        Self {
            name,
            namespace,
            proxy_name,
            methods: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_methods(mut self, methods: Vec<MethodDescriptor>) -> Self {
        self.methods = methods;
        self
    }

    /// Fully qualified path of the generated proxy type.
    pub fn proxy_path(&self) -> String {
        format!("{}::{}", self.namespace, self.proxy_name)
    }

    /// File name of the generated unit.
    pub fn hint_name(&self) -> String {
        format!("{}.g.rs", self.proxy_name)
    }
}

/// Derive the proxy name from a fully qualified trait name.
///
/// Takes the last `::` segment, drops every uppercase `I` in it and appends
/// `Proxy`: `IOrderProcessingActivities` gives `OrderProcessingActivitiesProxy`,
/// `IInvoiceActivities` gives `nvoiceActivitiesProxy`.
pub fn proxy_name_for(name: &str) -> String {
    let last = name.rsplit("::").next().unwrap_or(name);
    format!("{}Proxy", last.replace('I', ""))
}

/// How a member completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberShape {
    /// Synchronous, no return value.
    Void,
    /// Asynchronous, completes without a value.
    Completion,
    /// Asynchronous, completes with a value.
    CompletionWithValue,
}

impl MemberShape {
    /// Variant name of `proxygen::ReturnShape`.
    pub fn runtime_variant(self) -> &'static str {
        match self {
            Self::Void => "Void",
            Self::Completion => "Completion",
            Self::CompletionWithValue => "CompletionWithValue",
        }
    }

    /// Name of the `proxygen::MemberBinding` constructor for this shape.
    pub fn binding_constructor(self) -> &'static str {
        match self {
            Self::Void => "void",
            Self::Completion => "completion",
            Self::CompletionWithValue => "completion_with_value",
        }
    }
}

/// One selected trait member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MethodDescriptor {
    pub name: String,
    /// Declared return type with every path qualified; `()` when absent.
    pub return_type: String,
    pub shape: MemberShape,
    pub parameters: Vec<ParameterDescriptor>,
    /// Literal first argument of the member marker, if any.
    pub activity_name: Option<String>,
}

impl MethodDescriptor {
    pub fn new(name: impl Into<String>, return_type: impl Into<String>, shape: MemberShape) -> Self {
        Self {
            name: name.into(),
            return_type: return_type.into(),
            shape,
            parameters: Vec::new(),
            activity_name: None,
        }
    }

    #[must_use]
    pub fn with_parameter(mut self, name: impl Into<String>, type_name: impl Into<String>) -> Self {
        self.parameters.push(ParameterDescriptor {
            name: name.into(),
            type_name: type_name.into(),
        });
        self
    }

    #[must_use]
    pub fn with_activity_name(mut self, activity_name: impl Into<String>) -> Self {
        self.activity_name = Some(activity_name.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParameterDescriptor {
    pub name: String,
    /// Declared type with every path qualified.
    pub type_name: String,
}
