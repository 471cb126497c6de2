//! Payload shapes for the four ECS calls, derived from the desired spec.
//!
//! Pure functions. Every optional member is skipped when absent, so a
//! serialized payload never carries a null-valued key: ECS reads the presence
//! of a key as "set this field".

use berth_core::models::shapes::{
    CapacityProviderStrategyItem, DeploymentConfiguration, NetworkConfiguration,
    PlacementConstraint, PlacementStrategy,
};
use berth_core::{ActionRequest, ServiceSpec};
use serde::{Deserialize, Serialize};

use crate::error::ProvisionerError;

/// DescribeServices input for a single service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DescribeServicesInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cluster: Option<String>,
    pub services: Vec<String>,
    pub include: Vec<String>,
}

impl DescribeServicesInput {
    pub const INCLUDE_TAGS: &'static str = "TAGS";
}

/// UpdateService input. Doubles as the change-set produced by the diff.
///
/// The service is addressed as `service` here, not `serviceName`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateServiceInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cluster: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub desired_count: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_definition: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity_provider_strategy: Option<Vec<CapacityProviderStrategyItem>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deployment_configuration: Option<DeploymentConfiguration>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network_configuration: Option<NetworkConfiguration>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placement_constraints: Option<Vec<PlacementConstraint>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placement_strategy: Option<Vec<PlacementStrategy>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub force_new_deployment: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub health_check_grace_period_seconds: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_execute_command: Option<bool>,
}

impl UpdateServiceInput {
    /// Keys that address the service rather than change it.
    pub const ADDRESSING: [&'static str; 2] = ["cluster", "service"];

    /// Wire names of the members that are present, in declaration order.
    pub fn field_names(&self) -> Vec<&'static str> {
        [
            ("cluster", self.cluster.is_some()),
            ("service", self.service.is_some()),
            ("desiredCount", self.desired_count.is_some()),
            ("taskDefinition", self.task_definition.is_some()),
            (
                "capacityProviderStrategy",
                self.capacity_provider_strategy.is_some(),
            ),
            (
                "deploymentConfiguration",
                self.deployment_configuration.is_some(),
            ),
            ("networkConfiguration", self.network_configuration.is_some()),
            ("placementConstraints", self.placement_constraints.is_some()),
            ("placementStrategy", self.placement_strategy.is_some()),
            ("platformVersion", self.platform_version.is_some()),
            ("forceNewDeployment", self.force_new_deployment.is_some()),
            (
                "healthCheckGracePeriodSeconds",
                self.health_check_grace_period_seconds.is_some(),
            ),
            ("enableExecuteCommand", self.enable_execute_command.is_some()),
        ]
        .into_iter()
        .filter_map(|(name, present)| present.then_some(name))
        .collect()
    }

    /// True when anything beyond the addressing keys is present.
    pub fn has_changes(&self) -> bool {
        self.field_names()
            .iter()
            .any(|f| !Self::ADDRESSING.contains(f))
    }

    /// A change-set that only scales the service.
    pub fn scale_to(cluster: Option<String>, service: String, desired_count: i32) -> Self {
        Self {
            cluster,
            service: Some(service),
            desired_count: Some(desired_count),
            ..Self::default()
        }
    }
}

/// DeleteService input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteServiceInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cluster: Option<String>,
    pub service: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub force: Option<bool>,
}

pub fn describe_input(spec: &ServiceSpec) -> Result<DescribeServicesInput, ProvisionerError> {
    Ok(DescribeServicesInput {
        cluster: spec.cluster.clone(),
        services: vec![spec.require_service_name()?.to_string()],
        include: vec![DescribeServicesInput::INCLUDE_TAGS.to_string()],
    })
}

/// CreateService takes the spec as declared.
pub fn create_input(spec: &ServiceSpec) -> ServiceSpec {
    spec.clone()
}

/// The full update vocabulary taken from the request's spec.
///
/// Create-only attributes (launch type, load balancers, tags, ...) never
/// appear in an update.
pub fn update_input(request: &ActionRequest) -> UpdateServiceInput {
    let spec = &request.spec;
    UpdateServiceInput {
        cluster: spec.cluster.clone(),
        service: spec.service_name.clone(),
        desired_count: spec.desired_count,
        task_definition: spec.task_definition.clone(),
        capacity_provider_strategy: spec.capacity_provider_strategy.clone(),
        deployment_configuration: spec.deployment_configuration.clone(),
        network_configuration: spec.network_configuration.clone(),
        placement_constraints: spec.placement_constraints.clone(),
        placement_strategy: spec.placement_strategy.clone(),
        platform_version: spec.platform_version.clone(),
        force_new_deployment: request.force_new_deployment.then_some(true),
        health_check_grace_period_seconds: spec.health_check_grace_period_seconds,
        enable_execute_command: spec.enable_execute_command,
    }
}

pub fn delete_input(
    spec: &ServiceSpec,
    force_delete: bool,
) -> Result<DeleteServiceInput, ProvisionerError> {
    Ok(DeleteServiceInput {
        cluster: spec.cluster.clone(),
        service: spec.require_service_name()?.to_string(),
        force: force_delete.then_some(true),
    })
}
