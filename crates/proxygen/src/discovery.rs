// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Runtime discovery of generated proxies.
//!
//! Walks the registration records of the given compiled units, instantiates
//! each referenced proxy with the resolution root and turns every forwarding
//! member into a [`CallableHandle`]. Records are processed on demand as the
//! caller iterates. A record that cannot produce an instance is a
//! configuration error: it is yielded once and ends the scan.

use crate::binding::CallableHandle;
use crate::error::ConfigurationError;
use crate::registration::{CompiledUnit, RegistrationRecord};
use crate::resolve::ServiceProvider;
use std::iter::FusedIterator;
use std::sync::Arc;

/// Discover every generated proxy registered in `units`.
///
/// Meant to run once at startup, before the dispatcher accepts work. The
/// returned iterator is lazy and single-pass; dropping it early leaves the
/// remaining records unscanned.
///
/// # Example
///
/// ```rust,ignore
/// let handles = proxygen::discover_activity_proxies(&provider, &[&crate::ACTIVITY_PROXIES])
///     .collect::<Result<Vec<_>, _>>()?;
/// for handle in &handles {
///     worker.register(handle.activity_name(), handle.clone());
/// }
/// ```
pub fn discover_activity_proxies<'a>(
    service_provider: &ServiceProvider,
    units: &'a [&'a CompiledUnit],
) -> ProxyDiscovery<'a> {
    let no_records: &'a [RegistrationRecord] = &[];
    ProxyDiscovery {
        service_provider: Arc::clone(service_provider),
        units: units.iter(),
        unit_name: "",
        records: no_records.iter().enumerate(),
        pending: Vec::new().into_iter(),
        failed: false,
    }
}

/// Lazy sequence of handles produced by [`discover_activity_proxies`].
pub struct ProxyDiscovery<'a> {
    service_provider: ServiceProvider,
    units: std::slice::Iter<'a, &'a CompiledUnit>,
    unit_name: &'static str,
    records: std::iter::Enumerate<std::slice::Iter<'a, RegistrationRecord>>,
    pending: std::vec::IntoIter<CallableHandle>,
    failed: bool,
}

impl ProxyDiscovery<'_> {
    fn bind(
        &self,
        index: usize,
        record: &RegistrationRecord,
    ) -> Result<Vec<CallableHandle>, ConfigurationError> {
        let proxy_type = record
            .proxy_type()
            .ok_or(ConfigurationError::MissingProxyType {
                unit: self.unit_name,
                index,
            })?;

        let proxy = (proxy_type.instantiate)(Arc::clone(&self.service_provider)).ok_or(
            ConfigurationError::InstantiationFailed {
                unit: self.unit_name,
                proxy_type: proxy_type.name,
            },
        )?;

        let type_name = proxy.type_name();
        let handles: Vec<CallableHandle> = proxy
            .bind_members()
            .into_iter()
            .map(|binding| CallableHandle::new(type_name, binding))
            .collect();

        log::debug!(
            "proxy discovery: bound {} member(s) of '{}' from unit '{}'",
            handles.len(),
            type_name,
            self.unit_name
        );
        Ok(handles)
    }
}

impl Iterator for ProxyDiscovery<'_> {
    type Item = Result<CallableHandle, ConfigurationError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.failed {
                return None;
            }

            if let Some(handle) = self.pending.next() {
                return Some(Ok(handle));
            }

            if let Some((index, record)) = self.records.next() {
                match self.bind(index, record) {
                    Ok(handles) => self.pending = handles.into_iter(),
                    Err(err) => {
                        self.failed = true;
                        return Some(Err(err));
                    }
                }
                continue;
            }

            let unit = self.units.next()?;
            log::debug!(
                "proxy discovery: scanning unit '{}' ({} record(s))",
                unit.name(),
                unit.records().len()
            );
            self.unit_name = unit.name();
            self.records = unit.records().iter().enumerate();
        }
    }
}

impl FusedIterator for ProxyDiscovery<'_> {}
