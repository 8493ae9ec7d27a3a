// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Discovers the generated activity proxies, prints the activity names and
//! runs every activity once against a new order.
//!
//! ```bash
//! RUST_LOG=debug cargo run --bin order_processing
//! ```

use proxygen::discover_activity_proxies;
use proxygen_samples_01_order_processing::activities::IShippingActivities;
use proxygen_samples_01_order_processing::container::Container;
use proxygen_samples_01_order_processing::implementations::{
    OrderProcessingActivities, ShippingActivities,
};
use proxygen_samples_01_order_processing::{IOrderProcessingActivities, ACTIVITY_PROXIES};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let (processed_tx, mut processed_rx) = tokio::sync::mpsc::unbounded_channel();
    let container = Container::new()
        .register(|| -> Arc<dyn IShippingActivities> { Arc::new(ShippingActivities) })
        .register(move || -> Arc<dyn IOrderProcessingActivities> {
            Arc::new(OrderProcessingActivities::new(processed_tx.clone()))
        });
    let metrics = container.metrics();
    let provider = container.into_provider();

    let handles = discover_activity_proxies(&provider, &[&ACTIVITY_PROXIES])
        .collect::<Result<Vec<_>, _>>()?;

    println!("Discovered {} activities in {}:", handles.len(), ACTIVITY_PROXIES.name());
    for handle in &handles {
        println!("  {} ({}::{})", handle.activity_name(), handle.proxy_type(), handle.member_name());
    }

    let order_id = Uuid::new_v4();
    for handle in &handles {
        let output = handle
            .invoke(vec![serde_json::json!({ "order_id": order_id })])
            .await?;
        match output {
            Some(payload) => println!("{} -> {}", handle.activity_name(), payload),
            None => println!("{} -> done", handle.activity_name()),
        }
    }

    while let Ok(id) = processed_rx.try_recv() {
        println!("Order {id} processed");
    }
    println!("Scopes opened: {}, released: {}", metrics.opened(), metrics.released());
    Ok(())
}
