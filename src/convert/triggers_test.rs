#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use crate::crd::ImageChangeParams;
use k8s_openapi::api::core::v1::ObjectReference;

fn image_change(containers: &[&str], namespace: &str, name: &str) -> DeploymentTrigger {
    DeploymentTrigger::ImageChange {
        image_change_params: ImageChangeParams {
            automatic: true,
            container_names: containers.iter().map(|c| c.to_string()).collect(),
            from: ObjectReference {
                kind: Some("ImageStreamTag".to_string()),
                name: Some(name.to_string()),
                namespace: Some(namespace.to_string()),
                ..Default::default()
            },
            last_triggered_image: None,
        },
    }
}

#[test]
fn test_one_entry_per_container() {
    let triggers = vec![image_change(&["web", "sidecar"], "default", "myapp:latest")];

    let payload = encode(&triggers).unwrap().expect("payload");
    let entries: Vec<ObjectFieldTrigger> = serde_json::from_str(&payload).unwrap();

    assert_eq!(entries.len(), 2);
    assert_eq!(
        entries[0].field_path,
        r#"spec.template.spec.containers[?(@.name=="web")]"#
    );
    assert_eq!(
        entries[1].field_path,
        r#"spec.template.spec.containers[?(@.name=="sidecar")]"#
    );
    for entry in &entries {
        assert_eq!(entry.from.kind, "ImageStreamTag");
        assert_eq!(entry.from.name, "myapp:latest");
        assert_eq!(entry.from.namespace, "default");
    }
}

#[test]
fn test_payload_wire_format() {
    let triggers = vec![image_change(&["web"], "default", "myapp:latest")];

    let payload = encode(&triggers).unwrap().unwrap();

    // Empty apiVersion is omitted
    assert_eq!(
        payload,
        r#"[{"from":{"kind":"ImageStreamTag","name":"myapp:latest","namespace":"default"},"fieldPath":"spec.template.spec.containers[?(@.name==\"web\")]"}]"#
    );
}

#[test]
fn test_payload_always_carries_kind_and_name() {
    let triggers = vec![DeploymentTrigger::ImageChange {
        image_change_params: ImageChangeParams {
            container_names: vec!["web".to_string()],
            ..Default::default()
        },
    }];

    let payload = encode(&triggers).unwrap().unwrap();

    assert_eq!(
        payload,
        r#"[{"from":{"kind":"","name":""},"fieldPath":"spec.template.spec.containers[?(@.name==\"web\")]"}]"#
    );
}

#[test]
fn test_entries_follow_trigger_then_container_order() {
    let triggers = vec![
        image_change(&["b", "a"], "ns", "first:1"),
        DeploymentTrigger::ConfigChange,
        image_change(&["c"], "ns", "second:1"),
    ];

    let entries = object_field_triggers(&triggers);

    let order: Vec<(&str, &str)> = entries
        .iter()
        .map(|e| (e.from.name.as_str(), e.field_path.as_str()))
        .collect();
    assert_eq!(
        order,
        vec![
            ("first:1", r#"spec.template.spec.containers[?(@.name=="b")]"#),
            ("first:1", r#"spec.template.spec.containers[?(@.name=="a")]"#),
            ("second:1", r#"spec.template.spec.containers[?(@.name=="c")]"#),
        ]
    );
}

#[test]
fn test_config_change_only_yields_no_payload() {
    let triggers = vec![DeploymentTrigger::ConfigChange];

    assert_eq!(encode(&triggers).unwrap(), None);
}

#[test]
fn test_no_triggers_yields_no_payload() {
    assert_eq!(encode(&[]).unwrap(), None);
}

#[test]
fn test_image_change_without_containers_yields_no_payload() {
    let triggers = vec![image_change(&[], "ns", "app:latest")];

    assert_eq!(encode(&triggers).unwrap(), None);
}
