// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Minimal container used by the integration tests.

#![allow(dead_code)]

use proxygen::{ResolutionRoot, ScopedResolver, ServiceProvider, ServiceScope};
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

type Factory = Arc<dyn Fn() -> Box<dyn Any + Send> + Send + Sync>;

#[derive(Default)]
pub struct TestContainer {
    factories: HashMap<TypeId, Factory>,
    opened: Arc<AtomicUsize>,
    released: Arc<AtomicUsize>,
}

impl TestContainer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a factory producing a fresh `T` for every resolution.
    pub fn add<T, F>(mut self, factory: F) -> Self
    where
        T: Any + Send,
        F: Fn() -> T + Send + Sync + 'static,
    {
        self.factories
            .insert(TypeId::of::<T>(), Arc::new(move || -> Box<dyn Any + Send> { Box::new(factory()) }));
        self
    }

    pub fn counters(&self) -> ScopeCounters {
        ScopeCounters {
            opened: Arc::clone(&self.opened),
            released: Arc::clone(&self.released),
        }
    }

    pub fn into_provider(self) -> ServiceProvider {
        Arc::new(self)
    }
}

impl ResolutionRoot for TestContainer {
    fn create_scope(&self) -> ServiceScope {
        self.opened.fetch_add(1, Ordering::SeqCst);
        ServiceScope::new(TestScope {
            factories: self.factories.clone(),
            released: Arc::clone(&self.released),
        })
    }
}

struct TestScope {
    factories: HashMap<TypeId, Factory>,
    released: Arc<AtomicUsize>,
}

impl ScopedResolver for TestScope {
    fn resolve(&self, service: TypeId) -> Option<Box<dyn Any + Send>> {
        self.factories.get(&service).map(|factory| factory())
    }

    fn release(&mut self) {
        self.released.fetch_add(1, Ordering::SeqCst);
    }
}

#[derive(Clone)]
pub struct ScopeCounters {
    opened: Arc<AtomicUsize>,
    released: Arc<AtomicUsize>,
}

impl ScopeCounters {
    pub fn opened(&self) -> usize {
        self.opened.load(Ordering::SeqCst)
    }

    pub fn released(&self) -> usize {
        self.released.load(Ordering::SeqCst)
    }
}
