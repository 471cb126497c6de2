//! Conversions between the berth model and `aws-sdk-ecs` types.
//!
//! SDK enums travel as their wire strings; list members the SDK reports as
//! empty slices become `Some(vec![])` on the observed record so they compare
//! equal to an explicitly empty list in the spec.

use aws_sdk_ecs::primitives::DateTime;
use aws_sdk_ecs::types as ecs;
use berth_core::models::observed::{Deployment, ServiceEvent};
use berth_core::models::shapes::{
    AwsVpcConfiguration, CapacityProviderStrategyItem, DeploymentCircuitBreaker,
    DeploymentConfiguration, DeploymentController, DeploymentControllerType, LoadBalancer,
    NetworkConfiguration, PlacementConstraint, PlacementStrategy, ServiceRegistry, Tag,
};
use berth_core::{Failure, ObservedService, ServiceStatus};

use crate::error::ProvisionerError;

// ── SDK → model ──────────────────────────────────────────────────────────

pub fn failure_from_sdk(f: &ecs::Failure) -> Failure {
    Failure {
        arn: f.arn().map(String::from),
        reason: f.reason().map(String::from),
        detail: f.detail().map(String::from),
    }
}

pub fn service_from_sdk(s: &ecs::Service) -> ObservedService {
    ObservedService {
        service_arn: s.service_arn().map(String::from),
        service_name: s.service_name().map(String::from),
        cluster_arn: s.cluster_arn().map(String::from),
        status: s.status().map(ServiceStatus::from),
        task_definition: s.task_definition().map(String::from),
        desired_count: Some(s.desired_count()),
        running_count: Some(s.running_count()),
        pending_count: Some(s.pending_count()),
        deployment_configuration: s
            .deployment_configuration()
            .map(deployment_configuration_from_sdk),
        deployment_controller: s
            .deployment_controller()
            .and_then(deployment_controller_from_sdk),
        network_configuration: s
            .network_configuration()
            .map(network_configuration_from_sdk),
        load_balancers: Some(s.load_balancers().iter().map(load_balancer_from_sdk).collect()),
        service_registries: Some(
            s.service_registries()
                .iter()
                .map(service_registry_from_sdk)
                .collect(),
        ),
        placement_constraints: Some(
            s.placement_constraints()
                .iter()
                .map(|c| PlacementConstraint {
                    kind: c.r#type().map(|t| t.as_str().to_string()),
                    expression: c.expression().map(String::from),
                })
                .collect(),
        ),
        placement_strategy: Some(
            s.placement_strategy()
                .iter()
                .map(|p| PlacementStrategy {
                    kind: p.r#type().map(|t| t.as_str().to_string()),
                    field: p.field().map(String::from),
                })
                .collect(),
        ),
        scheduling_strategy: s.scheduling_strategy().map(|t| t.as_str().to_string()),
        tags: Some(
            s.tags()
                .iter()
                .map(|t| Tag {
                    key: t.key().map(String::from),
                    value: t.value().map(String::from),
                })
                .collect(),
        ),
        launch_type: s.launch_type().map(|t| t.as_str().to_string()),
        capacity_provider_strategy: Some(
            s.capacity_provider_strategy()
                .iter()
                .map(|c| CapacityProviderStrategyItem {
                    capacity_provider: c.capacity_provider().to_string(),
                    weight: Some(c.weight()).filter(|w| *w != 0),
                    base: Some(c.base()).filter(|b| *b != 0),
                })
                .collect(),
        ),
        platform_version: s.platform_version().map(String::from),
        platform_family: s.platform_family().map(String::from),
        enable_execute_command: Some(s.enable_execute_command()),
        health_check_grace_period_seconds: s.health_check_grace_period_seconds(),
        enable_ecs_managed_tags: Some(s.enable_ecs_managed_tags()),
        propagate_tags: s.propagate_tags().map(|p| p.as_str().to_string()),
        role_arn: s.role_arn().map(String::from),
        created_at: s.created_at().and_then(timestamp_from_sdk),
        created_by: s.created_by().map(String::from),
        deployments: Some(s.deployments().iter().map(deployment_from_sdk).collect()),
        events: Some(
            s.events()
                .iter()
                .map(|e| ServiceEvent {
                    id: e.id().map(String::from),
                    created_at: e.created_at().and_then(timestamp_from_sdk),
                    message: e.message().map(String::from),
                })
                .collect(),
        ),
    }
}

fn deployment_configuration_from_sdk(c: &ecs::DeploymentConfiguration) -> DeploymentConfiguration {
    DeploymentConfiguration {
        deployment_circuit_breaker: c.deployment_circuit_breaker().map(|b| {
            DeploymentCircuitBreaker {
                enable: b.enable(),
                rollback: b.rollback(),
            }
        }),
        maximum_percent: c.maximum_percent(),
        minimum_healthy_percent: c.minimum_healthy_percent(),
    }
}

fn deployment_controller_from_sdk(c: &ecs::DeploymentController) -> Option<DeploymentController> {
    let kind = match c.r#type().as_str() {
        "ECS" => DeploymentControllerType::Ecs,
        "CODE_DEPLOY" => DeploymentControllerType::CodeDeploy,
        "EXTERNAL" => DeploymentControllerType::External,
        other => {
            tracing::warn!(controller = %other, "unrecognized deployment controller");
            return None;
        }
    };
    Some(DeploymentController { kind })
}

fn network_configuration_from_sdk(c: &ecs::NetworkConfiguration) -> NetworkConfiguration {
    NetworkConfiguration {
        awsvpc_configuration: c.awsvpc_configuration().map(|v| AwsVpcConfiguration {
            subnets: v.subnets().to_vec(),
            security_groups: Some(v.security_groups().to_vec()).filter(|sg| !sg.is_empty()),
            assign_public_ip: v.assign_public_ip().map(|a| a.as_str().to_string()),
        }),
    }
}

fn load_balancer_from_sdk(lb: &ecs::LoadBalancer) -> LoadBalancer {
    LoadBalancer {
        target_group_arn: lb.target_group_arn().map(String::from),
        load_balancer_name: lb.load_balancer_name().map(String::from),
        container_name: lb.container_name().map(String::from),
        container_port: lb.container_port(),
    }
}

fn service_registry_from_sdk(r: &ecs::ServiceRegistry) -> ServiceRegistry {
    ServiceRegistry {
        registry_arn: r.registry_arn().map(String::from),
        port: r.port(),
        container_name: r.container_name().map(String::from),
        container_port: r.container_port(),
    }
}

fn deployment_from_sdk(d: &ecs::Deployment) -> Deployment {
    Deployment {
        id: d.id().map(String::from),
        status: d.status().map(String::from),
        task_definition: d.task_definition().map(String::from),
        desired_count: Some(d.desired_count()),
        pending_count: Some(d.pending_count()),
        running_count: Some(d.running_count()),
        failed_tasks: Some(d.failed_tasks()),
        rollout_state: d.rollout_state().map(|r| r.as_str().to_string()),
        rollout_state_reason: d.rollout_state_reason().map(String::from),
        created_at: d.created_at().and_then(timestamp_from_sdk),
        updated_at: d.updated_at().and_then(timestamp_from_sdk),
    }
}

fn timestamp_from_sdk(dt: &DateTime) -> Option<jiff::Timestamp> {
    let nanos = i32::try_from(dt.subsec_nanos()).ok()?;
    jiff::Timestamp::new(dt.secs(), nanos).ok()
}

// ── model → SDK ──────────────────────────────────────────────────────────

pub fn deployment_configuration_to_sdk(
    c: &DeploymentConfiguration,
) -> ecs::DeploymentConfiguration {
    ecs::DeploymentConfiguration::builder()
        .set_deployment_circuit_breaker(c.deployment_circuit_breaker.map(|b| {
            ecs::DeploymentCircuitBreaker::builder()
                .enable(b.enable)
                .rollback(b.rollback)
                .build()
        }))
        .set_maximum_percent(c.maximum_percent)
        .set_minimum_healthy_percent(c.minimum_healthy_percent)
        .build()
}

pub fn deployment_controller_to_sdk(
    c: &DeploymentController,
) -> Result<ecs::DeploymentController, ProvisionerError> {
    ecs::DeploymentController::builder()
        .r#type(ecs::DeploymentControllerType::from(c.kind.as_str()))
        .build()
        .map_err(|e| ProvisionerError::InvalidSpec(format!("deploymentController: {e}")))
}

pub fn network_configuration_to_sdk(
    c: &NetworkConfiguration,
) -> Result<ecs::NetworkConfiguration, ProvisionerError> {
    let awsvpc = c
        .awsvpc_configuration
        .as_ref()
        .map(|v| {
            ecs::AwsVpcConfiguration::builder()
                .set_subnets(Some(v.subnets.clone()))
                .set_security_groups(v.security_groups.clone())
                .set_assign_public_ip(
                    v.assign_public_ip
                        .as_deref()
                        .map(ecs::AssignPublicIp::from),
                )
                .build()
                .map_err(|e| {
                    ProvisionerError::InvalidSpec(format!(
                        "networkConfiguration.awsvpcConfiguration: {e}"
                    ))
                })
        })
        .transpose()?;

    Ok(ecs::NetworkConfiguration::builder()
        .set_awsvpc_configuration(awsvpc)
        .build())
}

pub fn load_balancer_to_sdk(lb: &LoadBalancer) -> ecs::LoadBalancer {
    ecs::LoadBalancer::builder()
        .set_target_group_arn(lb.target_group_arn.clone())
        .set_load_balancer_name(lb.load_balancer_name.clone())
        .set_container_name(lb.container_name.clone())
        .set_container_port(lb.container_port)
        .build()
}

pub fn service_registry_to_sdk(r: &ServiceRegistry) -> ecs::ServiceRegistry {
    ecs::ServiceRegistry::builder()
        .set_registry_arn(r.registry_arn.clone())
        .set_port(r.port)
        .set_container_name(r.container_name.clone())
        .set_container_port(r.container_port)
        .build()
}

pub fn placement_constraints_to_sdk(cs: &[PlacementConstraint]) -> Vec<ecs::PlacementConstraint> {
    cs.iter()
        .map(|c| {
            ecs::PlacementConstraint::builder()
                .set_type(c.kind.as_deref().map(ecs::PlacementConstraintType::from))
                .set_expression(c.expression.clone())
                .build()
        })
        .collect()
}

pub fn placement_strategy_to_sdk(ps: &[PlacementStrategy]) -> Vec<ecs::PlacementStrategy> {
    ps.iter()
        .map(|p| {
            ecs::PlacementStrategy::builder()
                .set_type(p.kind.as_deref().map(ecs::PlacementStrategyType::from))
                .set_field(p.field.clone())
                .build()
        })
        .collect()
}

pub fn tag_to_sdk(t: &Tag) -> ecs::Tag {
    ecs::Tag::builder()
        .set_key(t.key.clone())
        .set_value(t.value.clone())
        .build()
}

pub fn capacity_provider_strategy_to_sdk(
    items: &[CapacityProviderStrategyItem],
) -> Result<Vec<ecs::CapacityProviderStrategyItem>, ProvisionerError> {
    items
        .iter()
        .map(|i| {
            ecs::CapacityProviderStrategyItem::builder()
                .capacity_provider(&i.capacity_provider)
                .set_weight(i.weight)
                .set_base(i.base)
                .build()
                .map_err(|e| {
                    ProvisionerError::InvalidSpec(format!("capacityProviderStrategy: {e}"))
                })
        })
        .collect()
}
