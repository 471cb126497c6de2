mod common;

use berth_core::models::shapes::{AwsVpcConfiguration, NetworkConfiguration};
use berth_core::{Action, ActionRequest, ServiceSpec};
use berth_provisioner::normalize::{create_input, delete_input, describe_input, update_input};
use serde_json::json;

use common::spec;

#[test]
fn describe_asks_for_tags() {
    let input = describe_input(&spec()).unwrap();

    assert_eq!(
        serde_json::to_value(&input).unwrap(),
        json!({"cluster": "my-cluster", "services": ["my-service"], "include": ["TAGS"]})
    );
}

#[test]
fn describe_omits_cluster_when_unset() {
    let mut desired = spec();
    desired.cluster = None;

    let value = serde_json::to_value(describe_input(&desired).unwrap()).unwrap();

    assert!(value.get("cluster").is_none());
}

#[test]
fn delete_only_carries_force_when_requested() {
    let plain = serde_json::to_value(delete_input(&spec(), false).unwrap()).unwrap();
    let forced = serde_json::to_value(delete_input(&spec(), true).unwrap()).unwrap();

    assert_eq!(plain, json!({"cluster": "my-cluster", "service": "my-service"}));
    assert_eq!(
        forced,
        json!({"cluster": "my-cluster", "service": "my-service", "force": true})
    );
}

#[test]
fn update_renames_service_name_and_drops_create_only_fields() {
    let mut desired = spec();
    desired.tags = Some(vec![]);
    desired.role = Some("arn:aws:iam::123456789012:role/ecs".into());

    let value = serde_json::to_value(update_input(&ActionRequest::new(Action::Update, desired)))
        .unwrap();

    assert_eq!(
        value,
        json!({
            "cluster": "my-cluster",
            "service": "my-service",
            "desiredCount": 1,
            "taskDefinition": "web:3"
        })
    );
}

#[test]
fn create_input_is_the_spec_as_declared() {
    let desired = ServiceSpec {
        network_configuration: Some(NetworkConfiguration {
            awsvpc_configuration: Some(AwsVpcConfiguration {
                subnets: vec!["subnet-1".into()],
                security_groups: None,
                assign_public_ip: Some("DISABLED".into()),
            }),
        }),
        ..spec()
    };

    let input = create_input(&desired);
    let value = serde_json::to_value(&input).unwrap();

    assert_eq!(input, desired);
    assert_eq!(
        value["networkConfiguration"],
        json!({"awsvpcConfiguration": {"subnets": ["subnet-1"], "assignPublicIp": "DISABLED"}})
    );
}

#[test]
fn payloads_never_carry_null_values() {
    let request = ActionRequest::new(Action::Update, ServiceSpec {
        service_name: Some("bare".into()),
        ..Default::default()
    });

    let payloads = [
        serde_json::to_value(describe_input(&request.spec).unwrap()).unwrap(),
        serde_json::to_value(create_input(&request.spec)).unwrap(),
        serde_json::to_value(update_input(&request)).unwrap(),
        serde_json::to_value(delete_input(&request.spec, false).unwrap()).unwrap(),
    ];

    for payload in payloads {
        let object = payload.as_object().unwrap();
        assert!(object.values().all(|v| !v.is_null()), "null in {payload}");
    }
}

#[test]
fn every_payload_requires_a_service_name() {
    let nameless = ServiceSpec::default();

    assert!(describe_input(&nameless).is_err());
    assert!(delete_input(&nameless, true).is_err());
}
