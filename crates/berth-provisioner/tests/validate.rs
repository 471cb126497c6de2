mod common;

use berth_core::models::shapes::{
    DeploymentConfiguration, DeploymentController, DeploymentControllerType, NetworkConfiguration,
};
use berth_core::ObservedService;
use berth_provisioner::validate::updatable_fields;
use berth_provisioner::{validate_update_shape, UpdateServiceInput};

use common::{active, CLUSTER, SERVICE};

fn under(mode: Option<DeploymentControllerType>) -> ObservedService {
    ObservedService {
        deployment_controller: mode.map(DeploymentController::from),
        ..active()
    }
}

fn every_change() -> UpdateServiceInput {
    UpdateServiceInput {
        cluster: Some(CLUSTER.into()),
        service: Some(SERVICE.into()),
        desired_count: Some(2),
        force_new_deployment: Some(false),
        ..Default::default()
    }
}

#[test]
fn ecs_accepts_task_definition_and_placement() {
    let changes = UpdateServiceInput {
        deployment_configuration: Some(DeploymentConfiguration::default()),
        network_configuration: Some(NetworkConfiguration::default()),
        placement_constraints: Some(vec![]),
        placement_strategy: Some(vec![]),
        task_definition: Some("task-definition-family:123".into()),
        ..every_change()
    };

    assert_eq!(
        validate_update_shape(&under(Some(DeploymentControllerType::Ecs)), &changes),
        (true, vec![])
    );
}

#[test]
fn ecs_rejects_health_check_grace_period() {
    let changes = UpdateServiceInput {
        task_definition: Some("task-definition-family:123".into()),
        health_check_grace_period_seconds: Some(30),
        ..every_change()
    };

    assert_eq!(
        validate_update_shape(&under(Some(DeploymentControllerType::Ecs)), &changes),
        (false, vec!["healthCheckGracePeriodSeconds"])
    );
}

#[test]
fn missing_controller_is_treated_as_ecs() {
    let changes = UpdateServiceInput {
        health_check_grace_period_seconds: Some(30),
        ..every_change()
    };

    let (valid, _) = validate_update_shape(&under(None), &changes);

    assert!(!valid);
}

#[test]
fn code_deploy_accepts_grace_period_but_not_task_definition() {
    let observed = under(Some(DeploymentControllerType::CodeDeploy));
    let valid = UpdateServiceInput {
        deployment_configuration: Some(DeploymentConfiguration::default()),
        health_check_grace_period_seconds: Some(30),
        ..every_change()
    };
    let invalid = UpdateServiceInput {
        task_definition: Some("task-definition-family:123".into()),
        placement_strategy: Some(vec![]),
        ..valid.clone()
    };

    assert_eq!(validate_update_shape(&observed, &valid), (true, vec![]));
    assert_eq!(
        validate_update_shape(&observed, &invalid),
        (false, vec!["taskDefinition", "placementStrategy"])
    );
}

#[test]
fn external_is_the_most_restrictive() {
    let observed = under(Some(DeploymentControllerType::External));
    let valid = UpdateServiceInput {
        health_check_grace_period_seconds: Some(30),
        ..every_change()
    };
    let invalid = UpdateServiceInput {
        task_definition: Some("task-definition-family:123".into()),
        network_configuration: Some(NetworkConfiguration::default()),
        ..valid.clone()
    };

    assert_eq!(validate_update_shape(&observed, &valid), (true, vec![]));
    assert_eq!(
        validate_update_shape(&observed, &invalid),
        (false, vec!["taskDefinition", "networkConfiguration"])
    );
}

#[test]
fn every_mode_allows_addressing_and_scaling() {
    for mode in [
        DeploymentControllerType::Ecs,
        DeploymentControllerType::CodeDeploy,
        DeploymentControllerType::External,
    ] {
        let allowed = updatable_fields(mode);
        for field in ["cluster", "service", "desiredCount", "forceNewDeployment"] {
            assert!(allowed.contains(&field), "{mode} should allow {field}");
        }
    }
}
