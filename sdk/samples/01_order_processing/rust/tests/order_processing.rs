// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Discovery and invocation through the proxies generated by build.rs.

use proxygen::{discover_activity_proxies, ActivityError, CallableHandle, InvokeError, ReturnShape};
use proxygen_samples_01_order_processing::activities::{IShippingActivities, ShippingActivitiesProxy};
use proxygen_samples_01_order_processing::container::{Container, ScopeMetrics};
use proxygen_samples_01_order_processing::implementations::{
    OrderProcessingActivities, ShippingActivities,
};
use proxygen_samples_01_order_processing::{
    IOrderProcessingActivities, ShipItemsInput, ACTIVITY_PROXIES,
};
use serde_json::json;
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedReceiver;
use uuid::Uuid;

struct Fixture {
    handles: Vec<CallableHandle>,
    metrics: ScopeMetrics,
    processed: UnboundedReceiver<Uuid>,
}

fn fixture() -> Fixture {
    let (tx, processed) = tokio::sync::mpsc::unbounded_channel();
    let container = Container::new()
        .register(|| -> Arc<dyn IShippingActivities> { Arc::new(ShippingActivities) })
        .register(move || -> Arc<dyn IOrderProcessingActivities> {
            Arc::new(OrderProcessingActivities::new(tx.clone()))
        });
    let metrics = container.metrics();
    let provider = container.into_provider();
    let handles = discover_activity_proxies(&provider, &[&ACTIVITY_PROXIES])
        .collect::<Result<Vec<_>, _>>()
        .unwrap();
    Fixture {
        handles,
        metrics,
        processed,
    }
}

fn handle<'a>(handles: &'a [CallableHandle], activity_name: &str) -> &'a CallableHandle {
    handles
        .iter()
        .find(|h| h.activity_name() == activity_name)
        .unwrap_or_else(|| panic!("{activity_name} not discovered"))
}

#[test]
fn manifest_lists_both_proxies() {
    assert_eq!(ACTIVITY_PROXIES.name(), "proxygen-samples-01-order-processing");
    let proxies: Vec<_> = ACTIVITY_PROXIES
        .records()
        .iter()
        .map(|r| r.proxy_type().unwrap().name)
        .collect();
    assert_eq!(
        proxies,
        [
            "crate::activities::ShippingActivitiesProxy",
            "crate::OrderProcessingActivitiesProxy",
        ]
    );
}

#[test]
fn discovery_yields_one_handle_per_activity() {
    let fixture = fixture();
    let names: Vec<_> = fixture.handles.iter().map(|h| h.activity_name()).collect();
    assert_eq!(names, ["custom-activity-name", "notify_order_processed"]);

    let ship = handle(&fixture.handles, "custom-activity-name");
    assert_eq!(ship.member_name(), "ship_items");
    assert_eq!(ship.shape(), ReturnShape::CompletionWithValue);
    assert_eq!(ship.signature().parameters.len(), 1);

    let notify = handle(&fixture.handles, "notify_order_processed");
    assert_eq!(notify.shape(), ReturnShape::Completion);

    // Discovery only instantiates proxies; no call has been forwarded yet.
    assert_eq!(fixture.metrics.opened(), 0);
}

#[tokio::test]
async fn ship_items_returns_the_tracking_number() {
    let fixture = fixture();
    let order_id = Uuid::new_v4();

    let output = handle(&fixture.handles, "custom-activity-name")
        .invoke(vec![json!({ "order_id": order_id })])
        .await
        .unwrap();

    assert_eq!(
        output,
        Some(json!({ "tracking_number": format!("TRK-{}", order_id.simple()) }))
    );
    assert_eq!(fixture.metrics.opened(), 1);
    assert_eq!(fixture.metrics.released(), 1);
}

#[tokio::test]
async fn notify_order_processed_reaches_the_implementation() {
    let mut fixture = fixture();
    let order_id = Uuid::new_v4();

    let output = handle(&fixture.handles, "notify_order_processed")
        .invoke(vec![json!({ "order_id": order_id })])
        .await
        .unwrap();

    assert_eq!(output, None);
    assert_eq!(fixture.processed.try_recv().unwrap(), order_id);
    assert_eq!(fixture.metrics.released(), 1);
}

#[tokio::test]
async fn activity_failure_is_reported_and_scope_released() {
    let fixture = fixture();

    let err = handle(&fixture.handles, "custom-activity-name")
        .invoke(vec![json!({ "order_id": Uuid::nil() })])
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        InvokeError::Activity(ActivityError::Application(_))
    ));
    assert_eq!(fixture.metrics.opened(), 1);
    assert_eq!(fixture.metrics.released(), 1);
}

#[tokio::test]
async fn bad_payload_is_rejected_before_dispatch() {
    let fixture = fixture();
    let ship = handle(&fixture.handles, "custom-activity-name");

    let err = ship.invoke(vec![]).await.unwrap_err();
    assert!(matches!(err, InvokeError::Arity { expected: 1, actual: 0, .. }));

    let err = ship.invoke(vec![json!("not an order")]).await.unwrap_err();
    assert!(matches!(err, InvokeError::Decode { parameter: "input", .. }));

    assert_eq!(fixture.metrics.opened(), 0);
}

#[tokio::test]
async fn each_call_uses_its_own_scope() {
    let fixture = fixture();
    let ship = handle(&fixture.handles, "custom-activity-name");

    for _ in 0..3 {
        ship.invoke(vec![json!({ "order_id": Uuid::new_v4() })])
            .await
            .unwrap();
    }

    assert_eq!(fixture.metrics.opened(), 3);
    assert_eq!(fixture.metrics.released(), 3);
}

#[tokio::test]
async fn proxy_can_be_called_directly() {
    let container = Container::new()
        .register(|| -> Arc<dyn IShippingActivities> { Arc::new(ShippingActivities) });
    let metrics = container.metrics();
    let proxy = ShippingActivitiesProxy::new(container.into_provider());

    let order_id = Uuid::new_v4();
    let output = proxy.ship_items(ShipItemsInput { order_id }).await.unwrap();

    assert_eq!(output.tracking_number, format!("TRK-{}", order_id.simple()));
    assert_eq!(metrics.released(), 1);
}

#[tokio::test]
async fn missing_implementation_fails_the_call_not_discovery() {
    let container = Container::new();
    let metrics = container.metrics();
    let provider = container.into_provider();
    let handles = discover_activity_proxies(&provider, &[&ACTIVITY_PROXIES])
        .collect::<Result<Vec<_>, _>>()
        .unwrap();
    assert_eq!(handles.len(), 2);

    let err = handle(&handles, "notify_order_processed")
        .invoke(vec![json!({ "order_id": Uuid::new_v4() })])
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        InvokeError::Activity(ActivityError::Resolve(_))
    ));
    assert_eq!(metrics.released(), 1);
}
