//! [`EcsApi`] on top of `aws-sdk-ecs`.

pub mod convert;

use std::time::Duration;

use aws_sdk_ecs::client::Waiters;
use aws_sdk_ecs::types::ServiceField;
use aws_sdk_ecs::Client;
use berth_core::{ServiceResponse, ServiceSpec};

use crate::client::{BoxFuture, EcsApi, WaitState};
use crate::error::{format_err_chain, ProvisionerError};
use crate::normalize::{DeleteServiceInput, DescribeServicesInput, UpdateServiceInput};

pub struct EcsClient {
    client: Client,
}

impl EcsClient {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    pub fn from_conf(config: &aws_config::SdkConfig) -> Self {
        Self::new(Client::new(config))
    }
}

impl EcsApi for EcsClient {
    fn describe<'a>(
        &'a self,
        input: &'a DescribeServicesInput,
    ) -> BoxFuture<'a, Result<ServiceResponse, ProvisionerError>> {
        Box::pin(async move {
            let resp = self
                .client
                .describe_services()
                .set_cluster(input.cluster.clone())
                .set_services(Some(input.services.clone()))
                .set_include(Some(
                    input
                        .include
                        .iter()
                        .map(|f| ServiceField::from(f.as_str()))
                        .collect(),
                ))
                .send()
                .await
                .map_err(|e| {
                    ProvisionerError::Aws(format!(
                        "ecs:DescribeServices failed: {}",
                        format_err_chain(&e)
                    ))
                })?;

            Ok(ServiceResponse::Described {
                failures: resp.failures().iter().map(convert::failure_from_sdk).collect(),
                services: resp.services().iter().map(convert::service_from_sdk).collect(),
            })
        })
    }

    fn create<'a>(
        &'a self,
        input: &'a ServiceSpec,
    ) -> BoxFuture<'a, Result<ServiceResponse, ProvisionerError>> {
        Box::pin(async move {
            let resp = self
                .client
                .create_service()
                .set_cluster(input.cluster.clone())
                .set_service_name(input.service_name.clone())
                .set_task_definition(input.task_definition.clone())
                .set_desired_count(input.desired_count)
                .set_deployment_configuration(
                    input
                        .deployment_configuration
                        .as_ref()
                        .map(convert::deployment_configuration_to_sdk),
                )
                .set_deployment_controller(
                    input
                        .deployment_controller
                        .as_ref()
                        .map(convert::deployment_controller_to_sdk)
                        .transpose()?,
                )
                .set_network_configuration(
                    input
                        .network_configuration
                        .as_ref()
                        .map(convert::network_configuration_to_sdk)
                        .transpose()?,
                )
                .set_load_balancers(
                    input
                        .load_balancers
                        .as_deref()
                        .map(|lbs| lbs.iter().map(convert::load_balancer_to_sdk).collect()),
                )
                .set_service_registries(
                    input
                        .service_registries
                        .as_deref()
                        .map(|rs| rs.iter().map(convert::service_registry_to_sdk).collect()),
                )
                .set_placement_constraints(
                    input
                        .placement_constraints
                        .as_deref()
                        .map(convert::placement_constraints_to_sdk),
                )
                .set_placement_strategy(
                    input
                        .placement_strategy
                        .as_deref()
                        .map(convert::placement_strategy_to_sdk),
                )
                .set_scheduling_strategy(
                    input
                        .scheduling_strategy
                        .as_deref()
                        .map(aws_sdk_ecs::types::SchedulingStrategy::from),
                )
                .set_tags(
                    input
                        .tags
                        .as_deref()
                        .map(|tags| tags.iter().map(convert::tag_to_sdk).collect()),
                )
                .set_launch_type(
                    input
                        .launch_type
                        .as_deref()
                        .map(aws_sdk_ecs::types::LaunchType::from),
                )
                .set_capacity_provider_strategy(
                    input
                        .capacity_provider_strategy
                        .as_deref()
                        .map(convert::capacity_provider_strategy_to_sdk)
                        .transpose()?,
                )
                .set_platform_version(input.platform_version.clone())
                .set_enable_execute_command(input.enable_execute_command)
                .set_health_check_grace_period_seconds(input.health_check_grace_period_seconds)
                .set_client_token(input.client_token.clone())
                .set_role(input.role.clone())
                .set_enable_ecs_managed_tags(input.enable_ecs_managed_tags)
                .set_propagate_tags(
                    input
                        .propagate_tags
                        .as_deref()
                        .map(aws_sdk_ecs::types::PropagateTags::from),
                )
                .send()
                .await
                .map_err(|e| {
                    ProvisionerError::Aws(format!(
                        "ecs:CreateService failed: {}",
                        format_err_chain(&e)
                    ))
                })?;

            Ok(ServiceResponse::Single {
                service: resp.service().map(convert::service_from_sdk),
            })
        })
    }

    fn update<'a>(
        &'a self,
        input: &'a UpdateServiceInput,
    ) -> BoxFuture<'a, Result<ServiceResponse, ProvisionerError>> {
        Box::pin(async move {
            let resp = self
                .client
                .update_service()
                .set_cluster(input.cluster.clone())
                .set_service(input.service.clone())
                .set_desired_count(input.desired_count)
                .set_task_definition(input.task_definition.clone())
                .set_capacity_provider_strategy(
                    input
                        .capacity_provider_strategy
                        .as_deref()
                        .map(convert::capacity_provider_strategy_to_sdk)
                        .transpose()?,
                )
                .set_deployment_configuration(
                    input
                        .deployment_configuration
                        .as_ref()
                        .map(convert::deployment_configuration_to_sdk),
                )
                .set_network_configuration(
                    input
                        .network_configuration
                        .as_ref()
                        .map(convert::network_configuration_to_sdk)
                        .transpose()?,
                )
                .set_placement_constraints(
                    input
                        .placement_constraints
                        .as_deref()
                        .map(convert::placement_constraints_to_sdk),
                )
                .set_placement_strategy(
                    input
                        .placement_strategy
                        .as_deref()
                        .map(convert::placement_strategy_to_sdk),
                )
                .set_platform_version(input.platform_version.clone())
                .set_force_new_deployment(input.force_new_deployment)
                .set_health_check_grace_period_seconds(input.health_check_grace_period_seconds)
                .set_enable_execute_command(input.enable_execute_command)
                .send()
                .await
                .map_err(|e| {
                    ProvisionerError::Aws(format!(
                        "ecs:UpdateService failed: {}",
                        format_err_chain(&e)
                    ))
                })?;

            Ok(ServiceResponse::Single {
                service: resp.service().map(convert::service_from_sdk),
            })
        })
    }

    fn delete<'a>(
        &'a self,
        input: &'a DeleteServiceInput,
    ) -> BoxFuture<'a, Result<ServiceResponse, ProvisionerError>> {
        Box::pin(async move {
            let resp = self
                .client
                .delete_service()
                .set_cluster(input.cluster.clone())
                .service(&input.service)
                .set_force(input.force)
                .send()
                .await
                .map_err(|e| {
                    ProvisionerError::Aws(format!(
                        "ecs:DeleteService failed: {}",
                        format_err_chain(&e)
                    ))
                })?;

            Ok(ServiceResponse::Single {
                service: resp.service().map(convert::service_from_sdk),
            })
        })
    }

    fn wait_until_tasks_running<'a>(
        &'a self,
        cluster: Option<&'a str>,
        service: &'a str,
        timeout: Duration,
    ) -> BoxFuture<'a, Result<WaitState, ProvisionerError>> {
        Box::pin(async move {
            // ServicesStable: a single deployment whose running count equals
            // the desired count. Also covers "zero tasks" after a scale-down.
            let outcome = self
                .client
                .wait_until_services_stable()
                .set_cluster(cluster.map(String::from))
                .services(service)
                .wait(timeout)
                .await;

            Ok(match outcome {
                Ok(_) => WaitState::Success,
                Err(e) => {
                    let detail = format_err_chain(&e);
                    tracing::warn!(
                        service = %service,
                        error = %detail,
                        "services-stable wait failed"
                    );
                    WaitState::Failed(detail)
                }
            })
        })
    }

    fn wait_until_services_inactive<'a>(
        &'a self,
        cluster: Option<&'a str>,
        service: &'a str,
        timeout: Duration,
    ) -> BoxFuture<'a, Result<WaitState, ProvisionerError>> {
        Box::pin(async move {
            let outcome = self
                .client
                .wait_until_services_inactive()
                .set_cluster(cluster.map(String::from))
                .services(service)
                .wait(timeout)
                .await;

            Ok(match outcome {
                Ok(_) => WaitState::Success,
                Err(e) => {
                    let detail = format_err_chain(&e);
                    tracing::warn!(
                        service = %service,
                        error = %detail,
                        "services-inactive wait failed"
                    );
                    WaitState::Failed(detail)
                }
            })
        })
    }
}
