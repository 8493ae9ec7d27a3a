// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Real implementations resolved by the generated proxies.

use crate::activities::IShippingActivities;
use crate::{IOrderProcessingActivities, NotifyOrderProcessedInput, ShipItemsInput, ShipItemsOutput};
use proxygen::{async_trait, ActivityError, Completion};
use tokio::sync::mpsc::UnboundedSender;
use uuid::Uuid;

/// Publishes the id of every processed order on a channel.
pub struct OrderProcessingActivities {
    processed: UnboundedSender<Uuid>,
}

impl OrderProcessingActivities {
    pub fn new(processed: UnboundedSender<Uuid>) -> Self {
        Self { processed }
    }
}

#[async_trait]
impl IOrderProcessingActivities for OrderProcessingActivities {
    async fn notify_order_processed(&self, input: NotifyOrderProcessedInput) -> Completion {
        tracing::info!(order_id = %input.order_id, "order processed");
        self.processed
            .send(input.order_id)
            .map_err(|_| ActivityError::message("order notification channel closed"))
    }
}

#[derive(Debug, Default)]
pub struct ShippingActivities;

#[async_trait]
impl IShippingActivities for ShippingActivities {
    async fn ship_items(&self, input: ShipItemsInput) -> Completion<ShipItemsOutput> {
        if input.order_id.is_nil() {
            return Err(ActivityError::message("cannot ship an order without an id"));
        }
        let tracking_number = format!("TRK-{}", input.order_id.simple());
        tracing::info!(order_id = %input.order_id, %tracking_number, "items shipped");
        Ok(ShipItemsOutput { tracking_number })
    }
}
