// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! A small factory container adapted to [`proxygen::ResolutionRoot`].
//!
//! Every resolution calls the registered factory, so each scope gets its own
//! implementation instances. The container counts opened and released
//! scopes so callers can check that every call cleaned up after itself.

use proxygen::{ResolutionRoot, ScopedResolver, ServiceProvider, ServiceScope};
use std::any::{type_name, Any, TypeId};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

type Factory = Arc<dyn Fn() -> Box<dyn Any + Send> + Send + Sync>;

#[derive(Default)]
pub struct Container {
    factories: HashMap<TypeId, (&'static str, Factory)>,
    metrics: ScopeMetrics,
}

impl Container {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a factory producing a fresh `T` for every resolution.
    ///
    /// Activity implementations are registered as `Arc<dyn Trait>`.
    #[must_use]
    pub fn register<T, F>(mut self, factory: F) -> Self
    where
        T: Any + Send,
        F: Fn() -> T + Send + Sync + 'static,
    {
        self.factories.insert(
            TypeId::of::<T>(),
            (
                type_name::<T>(),
                Arc::new(move || -> Box<dyn Any + Send> { Box::new(factory()) }),
            ),
        );
        self
    }

    pub fn metrics(&self) -> ScopeMetrics {
        self.metrics.clone()
    }

    pub fn into_provider(self) -> ServiceProvider {
        Arc::new(self)
    }
}

impl ResolutionRoot for Container {
    fn create_scope(&self) -> ServiceScope {
        let id = self.metrics.opened.fetch_add(1, Ordering::SeqCst) + 1;
        tracing::debug!(scope = id, "scope opened");
        ServiceScope::new(Scope {
            id,
            factories: self.factories.clone(),
            metrics: self.metrics.clone(),
        })
    }
}

struct Scope {
    id: usize,
    factories: HashMap<TypeId, (&'static str, Factory)>,
    metrics: ScopeMetrics,
}

impl ScopedResolver for Scope {
    fn resolve(&self, service: TypeId) -> Option<Box<dyn Any + Send>> {
        let (name, factory) = self.factories.get(&service)?;
        tracing::trace!(scope = self.id, service = *name, "resolving");
        Some(factory())
    }

    fn release(&mut self) {
        self.metrics.released.fetch_add(1, Ordering::SeqCst);
        tracing::debug!(scope = self.id, "scope released");
    }
}

/// Shared scope counters of a [`Container`].
#[derive(Debug, Clone, Default)]
pub struct ScopeMetrics {
    opened: Arc<AtomicUsize>,
    released: Arc<AtomicUsize>,
}

impl ScopeMetrics {
    pub fn opened(&self) -> usize {
        self.opened.load(Ordering::SeqCst)
    }

    pub fn released(&self) -> usize {
        self.released.load(Ordering::SeqCst)
    }
}
