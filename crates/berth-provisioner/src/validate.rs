use berth_core::ObservedService;
use berth_core::models::shapes::DeploymentControllerType;

use crate::normalize::UpdateServiceInput;

const ECS_UPDATABLE: &[&str] = &[
    "desiredCount",
    "capacityProviderStrategy",
    "deploymentConfiguration",
    "networkConfiguration",
    "placementConstraints",
    "placementStrategy",
    "platformVersion",
    "taskDefinition",
    "forceNewDeployment",
    "cluster",
    "service",
    "enableExecuteCommand",
];

const CODE_DEPLOY_UPDATABLE: &[&str] = &[
    "desiredCount",
    "deploymentConfiguration",
    "healthCheckGracePeriodSeconds",
    "networkConfiguration",
    "platformVersion",
    "forceNewDeployment",
    "cluster",
    "service",
    "enableExecuteCommand",
];

const EXTERNAL_UPDATABLE: &[&str] = &[
    "desiredCount",
    "healthCheckGracePeriodSeconds",
    "forceNewDeployment",
    "cluster",
    "service",
];

/// UpdateService members a service may change under `mode`.
pub fn updatable_fields(mode: DeploymentControllerType) -> &'static [&'static str] {
    match mode {
        DeploymentControllerType::Ecs => ECS_UPDATABLE,
        DeploymentControllerType::CodeDeploy => CODE_DEPLOY_UPDATABLE,
        DeploymentControllerType::External => EXTERNAL_UPDATABLE,
    }
}

/// Check a change-set against the observed service's deployment controller.
///
/// Returns `(false, keys)` listing every present member the mode does not
/// accept.
pub fn validate_update_shape(
    observed: &ObservedService,
    change_set: &UpdateServiceInput,
) -> (bool, Vec<&'static str>) {
    let allowed = updatable_fields(observed.deployment_mode());
    let disallowed: Vec<&'static str> = change_set
        .field_names()
        .into_iter()
        .filter(|f| !allowed.contains(f))
        .collect();
    (disallowed.is_empty(), disallowed)
}
