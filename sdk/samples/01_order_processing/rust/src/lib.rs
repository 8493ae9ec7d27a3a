// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! # proxygen Sample: Order Processing
//!
//! Two activity traits, one per module. The build script generates a
//! forwarding proxy for each and a manifest listing both; the binary
//! discovers them at startup and invokes every handle.
//!
//! ```text
//! build.rs ── proxygen-gen ──► OUT_DIR/OrderProcessingActivitiesProxy.g.rs
//!                              OUT_DIR/ShippingActivitiesProxy.g.rs
//!                              OUT_DIR/ActivityProxies.g.rs
//! ```
//!
//! ## Running the Sample
//!
//! ```bash
//! cargo run --bin order_processing
//! ```

pub mod activities;
pub mod container;
pub mod implementations;

use proxygen::{activity, activity_proxy, async_trait, Completion};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotifyOrderProcessedInput {
    pub order_id: Uuid,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShipItemsInput {
    pub order_id: Uuid,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShipItemsOutput {
    pub tracking_number: String,
}

/// Notifications sent once an order went through the workflow.
#[activity_proxy]
#[async_trait]
pub trait IOrderProcessingActivities: Send + Sync {
    #[activity]
    async fn notify_order_processed(&self, input: NotifyOrderProcessedInput) -> Completion;
}

proxygen::include_proxy!("OrderProcessingActivitiesProxy");
proxygen::include_manifest!();
