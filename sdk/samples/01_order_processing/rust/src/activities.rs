// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Shipping activities, registered under a custom activity name.

use crate::{ShipItemsInput, ShipItemsOutput};
use proxygen::{activity, activity_proxy, async_trait, Completion};

#[activity_proxy]
#[async_trait]
pub trait IShippingActivities: Send + Sync {
    #[activity("custom-activity-name")]
    async fn ship_items(&self, input: ShipItemsInput) -> Completion<ShipItemsOutput>;
}

proxygen::include_proxy!("ShippingActivitiesProxy");
