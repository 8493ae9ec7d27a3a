// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! # proxygen - forwarding activity proxies
//!
//! Runtime companion of the `proxygen-gen` code generator. The generator reads
//! traits annotated with [`activity_proxy`] and emits, for each one, a proxy
//! type that implements the trait by opening a [`ServiceScope`], resolving the
//! real implementation from it and forwarding the call. This crate provides
//! the pieces that generated code links against and the discovery step that
//! turns generated proxies into [`CallableHandle`]s for an activity worker.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use proxygen::{activity, activity_proxy, async_trait, Completion};
//!
//! #[activity_proxy]
//! #[async_trait]
//! pub trait IShippingActivities: Send + Sync {
//!     #[activity("custom-activity-name")]
//!     async fn ship_items(&self, input: ShipItemsInput) -> Completion<ShipItemsOutput>;
//! }
//!
//! // Generated by proxygen-gen (build.rs) into OUT_DIR
//! proxygen::include_proxy!("ShippingActivitiesProxy");
//!
//! // At the crate root
//! proxygen::include_manifest!();
//!
//! fn register(provider: &proxygen::ServiceProvider) -> Result<(), proxygen::ConfigurationError> {
//!     for handle in proxygen::discover_activity_proxies(provider, &[&crate::ACTIVITY_PROXIES]) {
//!         let handle = handle?;
//!         println!("{}", handle.activity_name());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! +--------------------------------------------------------------+
//! |  Activity worker (external): registers handles by name       |
//! +--------------------------------------------------------------+
//! |  discovery: CompiledUnit -> RegistrationRecord -> proxy      |
//! |             -> MemberBinding -> CallableHandle               |
//! +--------------------------------------------------------------+
//! |  generated proxy: ServiceScope -> Arc<dyn Trait> -> call     |
//! +--------------------------------------------------------------+
//! |  ResolutionRoot (external container behind a trait)          |
//! +--------------------------------------------------------------+
//! ```
//!
//! ## Key Types
//!
//! | Type | Description |
//! |------|-------------|
//! | [`ResolutionRoot`] | Seam to the external dependency container |
//! | [`ServiceScope`] | Per-call scope guard, released on drop |
//! | [`RegistrationRecord`] | One per generated proxy, references its type |
//! | [`CompiledUnit`] | Manifest of the records of one crate |
//! | [`CallableHandle`] | Signature-erased invocable bound to one proxy member |

// Generated proxies refer to `::proxygen::...`; keep that valid inside this crate's tests.
extern crate self as proxygen;

/// Signature-erased member bindings and callable handles.
pub mod binding;
/// Runtime discovery of generated proxies.
pub mod discovery;
/// Error types for resolution, invocation and discovery.
pub mod error;
/// Registration records, proxy types and compiled-unit manifests.
pub mod registration;
/// Resolution root and scope seam to the external container.
pub mod resolve;

pub use binding::{
    encode_output, Arguments, CallableHandle, Invoker, MemberBinding, MemberSignature,
    ParameterSignature, Payload, ReturnShape,
};
pub use discovery::{discover_activity_proxies, ProxyDiscovery};
pub use error::{ActivityError, ConfigurationError, InvokeError, ResolveError};
pub use registration::{ActivityProxy, CompiledUnit, Instantiate, ProxyType, RegistrationRecord};
pub use resolve::{ResolutionRoot, ScopedResolver, ServiceProvider, ServiceScope};

pub use async_trait::async_trait;
pub use proxygen_macros::{activity, activity_proxy};

/// Outcome of an activity member: `Completion` for members without a value,
/// `Completion<T>` for members that resolve to a value.
pub type Completion<T = ()> = std::result::Result<T, ActivityError>;

/// Include a proxy unit that `proxygen-gen` wrote to `OUT_DIR`.
///
/// Invoke it in the module declaring the source trait; the unit refers to
/// the trait and its types by their paths from there.
#[macro_export]
macro_rules! include_proxy {
    ($proxy:literal) => {
        ::core::include!(::core::concat!(::core::env!("OUT_DIR"), "/", $proxy, ".g.rs"));
    };
}

/// Include the `ACTIVITY_PROXIES` manifest that `proxygen-gen` wrote to
/// `OUT_DIR`. Invoke it once, at the crate root.
#[macro_export]
macro_rules! include_manifest {
    () => {
        ::core::include!(::core::concat!(::core::env!("OUT_DIR"), "/ActivityProxies.g.rs"));
    };
}
