// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

use pretty_assertions::assert_eq;
use proxygen_gen::{GeneratedSource, GeneratorConfig, Pipeline, SourceFile};

const ACTIVITIES: &str = r#"
use proxygen::{activity, activity_proxy, async_trait, Completion};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct ShipItemsInput {
    pub order_id: u64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ShipItemsOutput {
    pub tracking_number: String,
}

#[activity_proxy]
#[async_trait]
pub trait IShippingActivities: Send + Sync {
    #[activity("custom-activity-name")]
    async fn ship_items(&self, input: ShipItemsInput) -> Completion<ShipItemsOutput>;
}
"#;

const ROOT: &str = r#"
pub mod activities;

use proxygen::Completion;

pub struct NotifyOrderProcessedInput;

#[proxygen::activity_proxy]
#[proxygen::async_trait]
pub trait IOrderProcessingActivities: Send + Sync {
    #[proxygen::activity]
    async fn notify_order_processed(&self, input: NotifyOrderProcessedInput) -> Completion;

    #[proxygen::activity]
    fn audit(&self, entry: String, level: u8, tags: Vec<activities::ShipItemsInput>);

    fn not_an_activity(&self) {}
}
"#;

fn files() -> Vec<SourceFile> {
    vec![
        SourceFile::in_memory("crate", ROOT),
        SourceFile::in_memory("crate::activities", ACTIVITIES),
    ]
}

fn generate(files: &[SourceFile]) -> Vec<GeneratedSource> {
    Pipeline::new(GeneratorConfig::default())
        .unwrap()
        .run(files)
        .unwrap()
        .sources
}

fn unit<'a>(sources: &'a [GeneratedSource], hint_name: &str) -> &'a str {
    &sources
        .iter()
        .find(|s| s.hint_name == hint_name)
        .unwrap_or_else(|| panic!("{hint_name} not generated"))
        .text
}

#[test]
fn one_unit_per_proxy_plus_manifest() {
    let sources = generate(&files());
    let names: Vec<_> = sources
        .iter()
        .map(|s| (s.hint_name.as_str(), s.namespace.as_str()))
        .collect();
    assert_eq!(
        names,
        [
            ("OrderProcessingActivitiesProxy.g.rs", "crate"),
            ("ShippingActivitiesProxy.g.rs", "crate::activities"),
            ("ActivityProxies.g.rs", "crate"),
        ]
    );
}

#[test]
fn completion_with_value_returns_the_implementation_result() {
    let sources = generate(&files());
    let text = unit(&sources, "ShippingActivitiesProxy.g.rs");

    assert!(text.starts_with("// <auto-generated/>\n// Generated by proxygen-gen. Do not edit.\n\n"));
    assert!(text.contains("pub struct ShippingActivitiesProxy {\n    service_provider: ::proxygen::ServiceProvider,\n}"));
    assert!(text.contains("impl crate::activities::IShippingActivities for ShippingActivitiesProxy {"));
    assert!(text.contains(
        "    #[::proxygen::activity(\"custom-activity-name\")]\n    async fn ship_items(&self, input: crate::activities::ShipItemsInput) -> proxygen::Completion<crate::activities::ShipItemsOutput> {\n"
    ));
    assert!(text.contains(
        "        let __scope = self.service_provider.create_async_scope().await;\n        let __implementation =\n            __scope.get_required::<::std::sync::Arc<dyn crate::activities::IShippingActivities>>()?;\n        __implementation.ship_items(input).await\n    }\n"
    ));
    assert!(text.contains("activity_name: ::std::option::Option::Some(\"custom-activity-name\"),"));
    assert!(text.contains("::proxygen::MemberBinding::completion_with_value("));
    assert!(text.contains("::proxygen::ProxyType::new(\n            \"crate::activities::ShippingActivitiesProxy\","));
}

#[test]
fn completion_awaits_without_returning_a_value() {
    let sources = generate(&files());
    let text = unit(&sources, "OrderProcessingActivitiesProxy.g.rs");

    assert!(text.contains("    #[::proxygen::activity]\n    async fn notify_order_processed(&self, input: crate::NotifyOrderProcessedInput) -> proxygen::Completion {\n"));
    assert!(text.contains(
        "        __implementation.notify_order_processed(input).await?;\n        ::std::result::Result::Ok(())\n    }"
    ));
    assert!(!text.contains("__implementation.notify_order_processed(input).await\n"));
    assert!(text.contains("::proxygen::MemberBinding::completion("));
}

#[test]
fn void_members_forward_synchronously_in_declaration_order() {
    let sources = generate(&files());
    let text = unit(&sources, "OrderProcessingActivitiesProxy.g.rs");

    assert!(text.contains(
        "    fn audit(&self, entry: String, level: u8, tags: Vec<crate::activities::ShipItemsInput>) {\n        let __scope = self.service_provider.create_scope();\n        let __implementation = __scope.require::<::std::sync::Arc<dyn crate::IOrderProcessingActivities>>();\n        __implementation.audit(entry, level, tags);\n    }"
    ));
    assert!(text.contains(
        "    fn __forward_audit(&self, entry: String, level: u8, tags: Vec<crate::activities::ShipItemsInput>) -> ::std::result::Result<(), ::proxygen::ResolveError> {\n        let __scope = self.service_provider.create_scope();\n        let __implementation =\n            __scope.get_required::<::std::sync::Arc<dyn crate::IOrderProcessingActivities>>()?;\n        __implementation.audit(entry, level, tags);\n        ::std::result::Result::Ok(())\n    }\n}"
    ));
    assert!(text.contains("__proxy.__forward_audit(entry, level, tags)?;"));
    assert!(!text.contains("fn __forward_notify_order_processed"));
    assert!(!text.contains("not_an_activity"));

    let notify = text.find("async fn notify_order_processed").unwrap();
    let audit = text.find("fn audit").unwrap();
    assert!(notify < audit);

    let entry = text.find("__arguments.next::<String>(\"entry\")").unwrap();
    let level = text.find("__arguments.next::<u8>(\"level\")").unwrap();
    let tags = text.find("__arguments.next::<Vec<crate::activities::ShipItemsInput>>(\"tags\")").unwrap();
    assert!(entry < level && level < tags);
}

#[test]
fn every_tagged_member_gets_exactly_one_forwarder() {
    let source = r#"
        #[proxygen::activity_proxy]
        pub trait IMany: Send + Sync {
            #[activity] fn a(&self);
            #[activity] fn b(&self, x: u8);
            #[activity] async fn c(&self) -> proxygen::Completion;
            #[activity] async fn d(&self, y: u16, z: u32) -> proxygen::Completion<u64>;
            fn e(&self) {}
        }
    "#;
    let sources = generate(&[SourceFile::in_memory("crate", source)]);
    let text = unit(&sources, "ManyProxy.g.rs");

    assert_eq!(text.matches("    #[::proxygen::activity]\n").count(), 4);
    assert_eq!(text.matches("::proxygen::MemberSignature {").count(), 4);
    assert_eq!(text.matches("let __scope = ").count(), 6);
    assert_eq!(text.matches("fn __forward_").count(), 2);
    assert!(text.contains("async fn d(&self, y: u16, z: u32) -> proxygen::Completion<u64> {"));
    assert!(text.contains("move |_: ::proxygen::Arguments| {"));
}

#[test]
fn manifest_lists_every_registration_in_order() {
    let sources = generate(&files());
    let text = unit(&sources, "ActivityProxies.g.rs");

    assert!(text.contains(
        "pub static ACTIVITY_PROXIES: ::proxygen::CompiledUnit = ::proxygen::CompiledUnit::new(\n    ::std::env!(\"CARGO_PKG_NAME\"),\n    &[\n        crate::OrderProcessingActivitiesProxy::REGISTRATION,\n        crate::activities::ShippingActivitiesProxy::REGISTRATION,\n    ],\n);"
    ));
}

#[test]
fn emission_is_byte_identical_across_runs() {
    let first = generate(&files());
    let second = generate(&files());
    assert_eq!(first, second);
}

#[test]
fn every_uppercase_i_is_dropped_from_the_proxy_name() {
    let source = r#"
        #[proxygen::activity_proxy]
        pub trait IInvoiceActivities {
            #[activity]
            fn issue(&self);
        }
    "#;
    let sources = generate(&[SourceFile::in_memory("crate::billing", source)]);
    let text = unit(&sources, "nvoiceActivitiesProxy.g.rs");
    assert!(text.contains("#[allow(non_camel_case_types)]\npub struct nvoiceActivitiesProxy {"));
}

#[test]
fn unresolvable_trait_is_skipped_while_siblings_generate() {
    let source = r#"
        use proxygen::activity_proxy;

        #[activity_proxy]
        pub trait IRepository<T> {
            #[activity]
            fn store(&self, value: T);
        }

        #[activity_proxy]
        pub trait INotifier {
            #[activity]
            fn notify(&self, message: String);
        }
    "#;
    let output = Pipeline::new(GeneratorConfig::default())
        .unwrap()
        .run(&[SourceFile::in_memory("crate", source)])
        .unwrap();
    let names: Vec<_> = output.sources.iter().map(|s| s.hint_name.as_str()).collect();
    assert_eq!(names, ["NotifierProxy.g.rs", "ActivityProxies.g.rs"]);
    assert_eq!(output.extraction.skipped, 1);
}

#[test]
fn configured_markers_and_imports() {
    let config = GeneratorConfig::from_toml_str(
        r#"
        [markers]
        type_marker = "workflows::proxy"
        member_marker = "step"
        completion_with_value = "workflows::Done<"

        [emit]
        header = ["// generated"]
        imports = ["use proxygen as _;"]
        manifest = false
        "#,
    )
    .unwrap();
    let source = r#"
        use workflows::{proxy, step, Done};

        #[proxy]
        #[proxygen::activity_proxy]
        pub trait IFlow: Send + Sync {
            #[step("run")]
            async fn run(&self) -> Done<u8>;
            #[activity]
            fn ignored(&self);
        }
    "#;
    let output = Pipeline::new(config)
        .unwrap()
        .run(&[SourceFile::in_memory("crate", source)])
        .unwrap();
    assert_eq!(output.sources.len(), 1);

    let text = &output.sources[0].text;
    assert!(text.starts_with("// generated\n\nuse proxygen as _;\n\n/// Forwarding proxy"));
    assert!(text.contains("async fn run(&self) -> workflows::Done<u8> {"));
    assert!(text.contains("::proxygen::ReturnShape::CompletionWithValue"));
    assert!(!text.contains("fn ignored"));
}
