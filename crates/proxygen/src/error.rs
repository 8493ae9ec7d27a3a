// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Error types for proxy resolution, handle invocation and discovery.

use thiserror::Error;

/// Boxed application error carried by [`ActivityError::Application`].
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// A required service could not be produced by a [`crate::ServiceScope`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// The scope has no registration for the requested service.
    #[error("No service registered for type '{service}'")]
    Missing { service: &'static str },

    /// The scope returned an instance of a different type.
    #[error("Service registered for type '{service}' resolved to an incompatible instance")]
    Mismatch { service: &'static str },
}

/// Failure of an activity member, the error half of [`crate::Completion`].
#[derive(Debug, Error)]
pub enum ActivityError {
    /// The proxy could not resolve the implementation for this call.
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    /// The implementation failed.
    #[error("Activity failed: {0}")]
    Application(#[source] BoxError),

    /// The implementation observed cancellation and gave up.
    #[error("Activity cancelled")]
    Cancelled,
}

impl ActivityError {
    /// Wrap an implementation error.
    pub fn application(err: impl Into<BoxError>) -> Self {
        Self::Application(err.into())
    }

    /// Create an application failure from a plain message.
    pub fn message(message: impl Into<String>) -> Self {
        let message: String = message.into();
        Self::Application(message.into())
    }
}

/// Errors raised while invoking a [`crate::CallableHandle`].
#[derive(Debug, Error)]
pub enum InvokeError {
    /// Wrong number of arguments for the bound member.
    #[error("Activity '{member}' expects {expected} argument(s), got {actual}")]
    Arity {
        member: &'static str,
        expected: usize,
        actual: usize,
    },

    /// An argument payload did not decode into the declared parameter type.
    #[error("Failed to decode argument '{parameter}': {source}")]
    Decode {
        parameter: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// Fewer payloads than parameters reached the generated invoker.
    #[error("Missing argument '{parameter}'")]
    MissingArgument { parameter: &'static str },

    /// The member's result could not be encoded as a payload.
    #[error("Failed to encode activity result: {0}")]
    Encode(#[source] serde_json::Error),

    /// The forwarded call itself failed.
    #[error(transparent)]
    Activity(#[from] ActivityError),
}

impl From<ResolveError> for InvokeError {
    fn from(err: ResolveError) -> Self {
        Self::Activity(ActivityError::Resolve(err))
    }
}

/// Fatal discovery errors: a registration record cannot be turned into a proxy.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    /// A registration record in `unit` carries no proxy type.
    #[error("Registration record #{index} in unit '{unit}' has no proxy type")]
    MissingProxyType { unit: &'static str, index: usize },

    /// The proxy type's instantiation produced no instance.
    #[error("Cannot create activity proxy instance of '{proxy_type}' (unit '{unit}')")]
    InstantiationFailed {
        unit: &'static str,
        proxy_type: &'static str,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_error_names_service() {
        let err = ResolveError::Missing {
            service: "alloc::sync::Arc<dyn app::IShippingActivities>",
        };
        assert!(err.to_string().contains("IShippingActivities"));
    }

    #[test]
    fn activity_error_wraps_resolve_transparently() {
        let err: ActivityError = ResolveError::Missing { service: "svc" }.into();
        assert_eq!(err.to_string(), "No service registered for type 'svc'");
    }

    #[test]
    fn invoke_error_from_activity_error() {
        let err: InvokeError = ActivityError::message("carrier unavailable").into();
        assert!(matches!(err, InvokeError::Activity(_)));
        assert!(err.to_string().contains("carrier unavailable"));
    }

    #[test]
    fn invoke_error_from_resolve_error() {
        let err: InvokeError = ResolveError::Missing { service: "svc" }.into();
        assert!(matches!(
            err,
            InvokeError::Activity(ActivityError::Resolve(ResolveError::Missing { service: "svc" }))
        ));
    }

    #[test]
    fn configuration_error_display() {
        let err = ConfigurationError::MissingProxyType {
            unit: "orders",
            index: 2,
        };
        assert!(err.to_string().contains("#2"));
        assert!(err.to_string().contains("orders"));

        let err = ConfigurationError::InstantiationFailed {
            unit: "orders",
            proxy_type: "crate::ShippingActivitiesProxy",
        };
        assert!(err.to_string().contains("ShippingActivitiesProxy"));
    }
}
