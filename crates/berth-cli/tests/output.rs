use berth_cli::output::{append, Outputs};
use berth_core::{ObservedService, ServiceStatus};
use berth_provisioner::Reconciled;

fn service() -> ObservedService {
    ObservedService {
        service_arn: Some(
            "arn:aws:ecs:us-east-1:123456789012:service/my-cluster/my-service".into(),
        ),
        service_name: Some("my-service".into()),
        status: Some(ServiceStatus::Active),
        desired_count: Some(1),
        ..Default::default()
    }
}

#[test]
fn outputs_carry_the_service_record_and_arn() {
    let outputs = Outputs::from_reconciled(&Reconciled::Created(service())).unwrap();

    assert_eq!(outputs.outcome, "created");
    assert_eq!(
        outputs.arn,
        "arn:aws:ecs:us-east-1:123456789012:service/my-cluster/my-service"
    );
    let record: serde_json::Value = serde_json::from_str(&outputs.service).unwrap();
    assert_eq!(record["serviceName"], "my-service");
    assert_eq!(record["status"], "ACTIVE");
    assert!(!outputs.service.contains('\n'));
}

#[test]
fn deleting_a_missing_service_reports_empty_outputs() {
    let outputs = Outputs::from_reconciled(&Reconciled::Deleted(None)).unwrap();

    assert_eq!(outputs.outcome, "deleted");
    assert_eq!(outputs.arn, "");
    assert_eq!(outputs.service, "null");
}

#[test]
fn render_uses_heredoc_for_the_service_record() {
    let outputs = Outputs {
        service: "{}".into(),
        arn: "arn:x".into(),
        outcome: "unchanged",
    };

    assert_eq!(
        outputs.render(),
        "service<<BERTH_OUTPUT_EOF\n{}\nBERTH_OUTPUT_EOF\narn=arn:x\noutcome=unchanged\n"
    );
}

#[test]
fn append_keeps_existing_step_outputs() {
    let file = tempfile::NamedTempFile::new().unwrap();
    std::fs::write(file.path(), "earlier=1\n").unwrap();

    append(file.path(), "arn=arn:x\n").unwrap();

    assert_eq!(
        std::fs::read_to_string(file.path()).unwrap(),
        "earlier=1\narn=arn:x\n"
    );
}
