use berth_core::models::shapes::CapacityProviderStrategyItem;
use berth_core::{ActionRequest, ObservedService};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::normalize::{self, UpdateServiceInput};

/// Structured before/after for a single field that doesn't match desired state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDrift {
    /// Wire name, e.g. "desiredCount"
    pub field: String,
    /// What we want
    pub expected: Value,
    /// What ECS has
    pub actual: Value,
}

/// Minimal UpdateService payload that brings `observed` in line with the
/// request's spec.
///
/// Driven by the desired spec: a field the spec does not declare is never a
/// difference. Addressing keys are always kept, and so is a requested
/// `forceNewDeployment`.
pub fn compute_change_set(
    observed: &ObservedService,
    request: &ActionRequest,
) -> UpdateServiceInput {
    let desired = normalize::update_input(request);

    UpdateServiceInput {
        cluster: desired.cluster,
        service: desired.service,
        desired_count: changed(desired.desired_count, &observed.desired_count),
        task_definition: desired
            .task_definition
            .filter(|d| !task_definition_matches(d, observed.task_definition.as_deref())),
        capacity_provider_strategy: desired.capacity_provider_strategy.filter(|d| {
            !capacity_strategy_matches(d, observed.capacity_provider_strategy.as_deref())
        }),
        deployment_configuration: changed(
            desired.deployment_configuration,
            &observed.deployment_configuration,
        ),
        network_configuration: changed(
            desired.network_configuration,
            &observed.network_configuration,
        ),
        placement_constraints: changed(
            desired.placement_constraints,
            &observed.placement_constraints,
        ),
        placement_strategy: changed(desired.placement_strategy, &observed.placement_strategy),
        platform_version: changed(desired.platform_version, &observed.platform_version),
        force_new_deployment: desired.force_new_deployment,
        health_check_grace_period_seconds: changed(
            desired.health_check_grace_period_seconds,
            &observed.health_check_grace_period_seconds,
        ),
        enable_execute_command: changed(
            desired.enable_execute_command,
            &observed.enable_execute_command,
        ),
    }
}

/// Whether an update call is needed, and the change-set it would carry.
pub fn update_needed(
    observed: &ObservedService,
    request: &ActionRequest,
) -> (bool, UpdateServiceInput) {
    let change_set = compute_change_set(observed, request);
    (change_set.has_changes(), change_set)
}

/// Before/after rows for every field the change-set would modify.
pub fn drift(
    observed: &ObservedService,
    change_set: &UpdateServiceInput,
) -> Result<Vec<FieldDrift>, serde_json::Error> {
    let expected = serde_json::to_value(change_set)?;
    let actual = serde_json::to_value(observed)?;

    Ok(change_set
        .field_names()
        .into_iter()
        .filter(|f| !UpdateServiceInput::ADDRESSING.contains(f) && *f != "forceNewDeployment")
        .map(|f| FieldDrift {
            field: f.to_string(),
            expected: expected.get(f).cloned().unwrap_or(Value::Null),
            actual: actual.get(f).cloned().unwrap_or(Value::Null),
        })
        .collect())
}

fn changed<T: PartialEq>(desired: Option<T>, observed: &Option<T>) -> Option<T> {
    desired.filter(|d| observed.as_ref() != Some(d))
}

/// ECS echoes an omitted `weight` or `base` back as 0.
fn capacity_strategy_matches(
    desired: &[CapacityProviderStrategyItem],
    observed: Option<&[CapacityProviderStrategyItem]>,
) -> bool {
    let Some(observed) = observed else {
        return false;
    };
    desired.len() == observed.len()
        && desired.iter().zip(observed).all(|(d, o)| {
            d.capacity_provider == o.capacity_provider
                && d.weight.unwrap_or(0) == o.weight.unwrap_or(0)
                && d.base.unwrap_or(0) == o.base.unwrap_or(0)
        })
}

/// ECS reports the task definition as a full ARN even when it was declared
/// as `family:revision`.
fn task_definition_matches(desired: &str, observed: Option<&str>) -> bool {
    match observed {
        Some(observed) if observed == desired => true,
        Some(observed) => observed
            .rsplit_once(":task-definition/")
            .is_some_and(|(_, family_revision)| family_revision == desired),
        None => false,
    }
}
