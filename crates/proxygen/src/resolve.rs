// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Seam to the external dependency container.
//!
//! proxygen never builds services itself. A container adapts itself to
//! [`ResolutionRoot`] and hands out [`ServiceScope`]s; generated proxies open
//! one scope per call, resolve the real implementation from it and drop the
//! scope when the call finishes, fails or is cancelled.

use crate::error::ResolveError;
use async_trait::async_trait;
use std::any::{type_name, Any, TypeId};
use std::fmt;
use std::sync::Arc;

/// Shared handle to the resolution root, captured by every generated proxy.
pub type ServiceProvider = Arc<dyn ResolutionRoot>;

/// Root of the external container.
#[async_trait]
pub trait ResolutionRoot: Send + Sync + 'static {
    /// Open a new scope. Services resolved from it live until it is dropped.
    fn create_scope(&self) -> ServiceScope;

    /// Open a new scope from async code.
    ///
    /// Generated async members acquire their scope through this method.
    async fn create_async_scope(&self) -> ServiceScope {
        self.create_scope()
    }
}

/// Type-keyed lookup backing one [`ServiceScope`].
pub trait ScopedResolver: Send + Sync {
    /// Produce an instance of the service identified by `service`.
    ///
    /// The returned box must hold a value of exactly that type.
    fn resolve(&self, service: TypeId) -> Option<Box<dyn Any + Send>>;

    /// Release everything created for this scope. Called once, on drop.
    fn release(&mut self) {}
}

/// A scope opened on a [`ResolutionRoot`]; releases its resolver on drop.
pub struct ServiceScope {
    resolver: Box<dyn ScopedResolver>,
}

impl ServiceScope {
    /// Wrap a container-specific resolver.
    pub fn new(resolver: impl ScopedResolver + 'static) -> Self {
        Self {
            resolver: Box::new(resolver),
        }
    }

    /// Resolve `T` if the scope knows it.
    pub fn get<T: Any + Send>(&self) -> Result<Option<T>, ResolveError> {
        match self.resolver.resolve(TypeId::of::<T>()) {
            None => Ok(None),
            Some(instance) => instance
                .downcast::<T>()
                .map(|boxed| Some(*boxed))
                .map_err(|_| ResolveError::Mismatch {
                    service: type_name::<T>(),
                }),
        }
    }

    /// Resolve `T`, failing when the scope has no registration for it.
    pub fn get_required<T: Any + Send>(&self) -> Result<T, ResolveError> {
        self.get::<T>()?.ok_or(ResolveError::Missing {
            service: type_name::<T>(),
        })
    }

    /// Resolve `T` for members without an error channel.
    ///
    /// # Panics
    ///
    /// Panics with the [`ResolveError`] message when `T` cannot be resolved.
    pub fn require<T: Any + Send>(&self) -> T {
        match self.get_required::<T>() {
            Ok(instance) => instance,
            Err(err) => panic!("{err}"),
        }
    }
}

impl Drop for ServiceScope {
    fn drop(&mut self) {
        self.resolver.release();
    }
}

impl fmt::Debug for ServiceScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceScope").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    trait Greeter: Send + Sync {
        fn greet(&self) -> String;
    }

    struct English;

    impl Greeter for English {
        fn greet(&self) -> String {
            "hello".to_string()
        }
    }

    struct OneService {
        released: Arc<AtomicUsize>,
        wrong_type: bool,
    }

    impl ScopedResolver for OneService {
        fn resolve(&self, service: TypeId) -> Option<Box<dyn Any + Send>> {
            if service != TypeId::of::<Arc<dyn Greeter>>() {
                return None;
            }
            if self.wrong_type {
                return Some(Box::new(42_u32));
            }
            let greeter: Arc<dyn Greeter> = Arc::new(English);
            Some(Box::new(greeter))
        }

        fn release(&mut self) {
            self.released.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn scope(released: &Arc<AtomicUsize>, wrong_type: bool) -> ServiceScope {
        ServiceScope::new(OneService {
            released: Arc::clone(released),
            wrong_type,
        })
    }

    #[test]
    fn get_required_resolves_trait_object() {
        let released = Arc::new(AtomicUsize::new(0));
        let scope = scope(&released, false);
        let greeter = scope.get_required::<Arc<dyn Greeter>>().unwrap();
        assert_eq!(greeter.greet(), "hello");
    }

    #[test]
    fn get_required_reports_missing_service() {
        let released = Arc::new(AtomicUsize::new(0));
        let scope = scope(&released, false);
        let err = scope.get_required::<String>().unwrap_err();
        assert!(matches!(err, ResolveError::Missing { .. }));
        assert!(scope.get::<String>().unwrap().is_none());
    }

    #[test]
    fn mismatched_instance_is_an_error() {
        let released = Arc::new(AtomicUsize::new(0));
        let scope = scope(&released, true);
        let err = scope.get_required::<Arc<dyn Greeter>>().err().unwrap();
        assert!(matches!(err, ResolveError::Mismatch { .. }));
    }

    #[test]
    fn drop_releases_exactly_once() {
        let released = Arc::new(AtomicUsize::new(0));
        {
            let _scope = scope(&released, false);
            assert_eq!(released.load(Ordering::SeqCst), 0);
        }
        assert_eq!(released.load(Ordering::SeqCst), 1);
    }

    #[test]
    #[should_panic(expected = "No service registered")]
    fn require_panics_on_missing_service() {
        let released = Arc::new(AtomicUsize::new(0));
        let scope = scope(&released, false);
        let _ = scope.require::<String>();
    }
}
