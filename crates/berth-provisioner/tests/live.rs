//! Integration tests against a real ECS cluster.
//!
//! These call AWS and require credentials in the environment plus an existing
//! service named by `BERTH_LIVE_CLUSTER` / `BERTH_LIVE_SERVICE`.
//!
//! Run with: `cargo test -p berth-provisioner --test live -- --ignored`

use berth_core::{Action, ActionRequest, ServiceSpec};
use berth_provisioner::{ClassifiedOutcome, EcsClient, Reconciler};

async fn build_config() -> aws_config::SdkConfig {
    aws_config::defaults(aws_config::BehaviorVersion::latest())
        .load()
        .await
}

fn live_spec() -> ServiceSpec {
    ServiceSpec {
        cluster: std::env::var("BERTH_LIVE_CLUSTER").ok(),
        service_name: Some(
            std::env::var("BERTH_LIVE_SERVICE").expect("BERTH_LIVE_SERVICE must be set"),
        ),
        ..Default::default()
    }
}

#[tokio::test]
#[ignore]
async fn describes_an_existing_service() {
    let config = build_config().await;
    let ecs = EcsClient::from_conf(&config);
    let request = ActionRequest::new(Action::Update, live_spec());

    let outcome = Reconciler::new(&ecs).describe(&request).await.unwrap();

    match outcome {
        ClassifiedOutcome::Found(service) => {
            println!(
                "{}: {} running / {} desired",
                service.service_arn.unwrap_or_default(),
                service.running_count.unwrap_or_default(),
                service.desired_count.unwrap_or_default(),
            );
        }
        other => panic!("expected an active service, got {other:?}"),
    }
}

#[tokio::test]
#[ignore]
async fn unknown_service_is_reported_missing() {
    let config = build_config().await;
    let ecs = EcsClient::from_conf(&config);
    let mut spec = live_spec();
    spec.service_name = Some("berth-does-not-exist".into());

    let outcome = Reconciler::new(&ecs)
        .describe(&ActionRequest::new(Action::Update, spec))
        .await
        .unwrap();

    assert_eq!(outcome, ClassifiedOutcome::NotFound(None));
}
