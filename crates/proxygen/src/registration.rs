// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Registration records for generated proxies.
//!
//! Every generated proxy carries exactly one [`RegistrationRecord`] as its
//! associated `REGISTRATION` const. The generator also emits one manifest per
//! crate, a `static` [`CompiledUnit`] listing all of them; discovery scans
//! manifests instead of inspecting the binary.

use crate::binding::MemberBinding;
use crate::resolve::ServiceProvider;
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

/// Implemented by every generated proxy.
pub trait ActivityProxy: Send + Sync + 'static {
    /// Fully qualified name of the proxy type.
    fn type_name(&self) -> &'static str;

    /// Bind every forwarding member of this instance, in declaration order.
    ///
    /// Only the sealed trait-implementing forwarders are listed; constructors
    /// and other inherent functions of the proxy are never exposed.
    fn bind_members(self: Arc<Self>) -> Vec<MemberBinding>;
}

/// Instantiates a proxy, handing it the resolution root as its only argument.
pub type Instantiate = fn(ServiceProvider) -> Option<Arc<dyn ActivityProxy>>;

/// Reference to a concrete proxy type.
#[derive(Clone, Copy)]
pub struct ProxyType {
    pub name: &'static str,
    pub instantiate: Instantiate,
}

impl ProxyType {
    pub const fn new(name: &'static str, instantiate: Instantiate) -> Self {
        Self { name, instantiate }
    }
}

impl fmt::Debug for ProxyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProxyType")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Declarative record referencing one generated proxy type.
#[derive(Debug, Clone, Copy)]
pub struct RegistrationRecord {
    proxy_type: Option<ProxyType>,
}

impl RegistrationRecord {
    pub const fn new(proxy_type: ProxyType) -> Self {
        Self {
            proxy_type: Some(proxy_type),
        }
    }

    /// A record whose type reference was never set. Discovery rejects it.
    pub const fn unset() -> Self {
        Self { proxy_type: None }
    }

    pub fn proxy_type(&self) -> Option<&ProxyType> {
        self.proxy_type.as_ref()
    }
}

/// Registration records of one compiled crate.
#[derive(Debug, Clone)]
pub struct CompiledUnit {
    name: &'static str,
    records: Cow<'static, [RegistrationRecord]>,
}

impl CompiledUnit {
    /// Manifest over a static record list, usable in `static` items.
    pub const fn new(name: &'static str, records: &'static [RegistrationRecord]) -> Self {
        Self {
            name,
            records: Cow::Borrowed(records),
        }
    }

    /// Manifest assembled at runtime.
    pub fn from_records(name: &'static str, records: Vec<RegistrationRecord>) -> Self {
        Self {
            name,
            records: Cow::Owned(records),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn records(&self) -> &[RegistrationRecord] {
        &self.records
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
