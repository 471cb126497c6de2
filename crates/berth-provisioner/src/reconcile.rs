use std::time::Duration;

use berth_core::{Action, ActionRequest, ObservedService};

use crate::classify::{classify, ClassifiedOutcome};
use crate::client::{EcsApi, WaitState};
use crate::diff;
use crate::error::ProvisionerError;
use crate::normalize::{self, UpdateServiceInput};
use crate::validate::validate_update_shape;

/// Default upper bound for a single stability wait.
pub const DEFAULT_WAIT_TIMEOUT: Duration = Duration::from_secs(600);

/// Terminal state of one reconciliation.
#[derive(Debug, Clone, PartialEq)]
pub enum Reconciled {
    Created(ObservedService),
    Updated(ObservedService),
    /// Already matched the spec; nothing was mutated.
    Unchanged(ObservedService),
    /// The record from the delete call, or the last observed record when the
    /// service was already gone (`None` if ECS reported it missing).
    Deleted(Option<ObservedService>),
}

impl Reconciled {
    pub fn service(&self) -> Option<&ObservedService> {
        match self {
            Self::Created(s) | Self::Updated(s) | Self::Unchanged(s) => Some(s),
            Self::Deleted(s) => s.as_ref(),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Created(_) => "created",
            Self::Updated(_) => "updated",
            Self::Unchanged(_) => "unchanged",
            Self::Deleted(_) => "deleted",
        }
    }
}

/// Sequences describe/create/update/delete for one service.
///
/// Strictly sequential: every call completes before the next is issued, and
/// the first failure ends the run. Nothing already applied is rolled back.
pub struct Reconciler<'a> {
    api: &'a dyn EcsApi,
    wait_timeout: Duration,
}

impl<'a> Reconciler<'a> {
    pub fn new(api: &'a dyn EcsApi) -> Self {
        Self {
            api,
            wait_timeout: DEFAULT_WAIT_TIMEOUT,
        }
    }

    pub fn with_wait_timeout(mut self, wait_timeout: Duration) -> Self {
        self.wait_timeout = wait_timeout;
        self
    }

    /// Run the path selected by the request's action.
    pub async fn reconcile(&self, request: &ActionRequest) -> Result<Reconciled, ProvisionerError> {
        tracing::info!(
            action = %request.action,
            cluster = %request.spec.cluster_label(),
            service = request.spec.service_name.as_deref().unwrap_or_default(),
            "reconciling service"
        );
        match request.action {
            Action::Create | Action::Update => self.find_or_create(request).await,
            Action::Delete => self.delete(request).await,
        }
    }

    /// Describe the service and classify what came back.
    pub async fn describe(
        &self,
        request: &ActionRequest,
    ) -> Result<ClassifiedOutcome, ProvisionerError> {
        let input = normalize::describe_input(&request.spec)?;
        let name = request.spec.require_service_name()?;
        let response = self.api.describe(&input).await?;
        Ok(classify(response, name))
    }

    /// Create when missing, update when drifted, otherwise leave alone.
    pub async fn find_or_create(
        &self,
        request: &ActionRequest,
    ) -> Result<Reconciled, ProvisionerError> {
        let cluster = request.spec.cluster_label();
        let name = request.spec.require_service_name()?;

        match self.describe(request).await? {
            ClassifiedOutcome::NotFound(previous) => {
                tracing::info!(
                    cluster = %cluster,
                    service = %name,
                    inactive = previous.is_some(),
                    "service not found, creating"
                );
                self.create(request).await.map(Reconciled::Created)
            }
            ClassifiedOutcome::Draining(_) => Err(ProvisionerError::Draining {
                cluster: cluster.to_string(),
                service: name.to_string(),
            }),
            ClassifiedOutcome::GenericFailure(detail) => Err(ProvisionerError::GenericFailure {
                cluster: cluster.to_string(),
                service: name.to_string(),
                detail,
            }),
            ClassifiedOutcome::Found(observed) => {
                let (needed, change_set) = diff::update_needed(&observed, request);
                if !needed {
                    tracing::info!(
                        cluster = %cluster,
                        service = %name,
                        "service in sync, no changes needed"
                    );
                    return Ok(Reconciled::Unchanged(observed));
                }
                self.update(&observed, &change_set, request)
                    .await
                    .map(Reconciled::Updated)
            }
        }
    }

    /// Issue CreateService with the full spec.
    pub async fn create(
        &self,
        request: &ActionRequest,
    ) -> Result<ObservedService, ProvisionerError> {
        let cluster = request.spec.cluster_label();
        let name = request.spec.require_service_name()?;

        let input = normalize::create_input(&request.spec);
        let response = self.api.create(&input).await?;
        let created = classify(response, name).into_service(cluster, name)?;
        tracing::info!(
            cluster = %cluster,
            service = %name,
            arn = created.service_arn.as_deref().unwrap_or_default(),
            "service created"
        );

        if request.wait_until_tasks_running {
            self.wait_for_tasks(request).await?;
        }
        Ok(created)
    }

    /// Validate `change_set` against the observed controller mode, then issue
    /// UpdateService with it.
    pub async fn update(
        &self,
        observed: &ObservedService,
        change_set: &UpdateServiceInput,
        request: &ActionRequest,
    ) -> Result<ObservedService, ProvisionerError> {
        let cluster = request.spec.cluster_label();
        let name = request.spec.require_service_name()?;

        let (valid, disallowed) = validate_update_shape(observed, change_set);
        if !valid {
            return Err(ProvisionerError::InvalidUpdateShape {
                cluster: cluster.to_string(),
                service: name.to_string(),
                mode: observed.deployment_mode(),
                fields: disallowed.into_iter().map(String::from).collect(),
            });
        }

        for drift in diff::drift(observed, change_set)? {
            tracing::info!(
                cluster = %cluster,
                service = %name,
                field = %drift.field,
                expected = %drift.expected,
                actual = %drift.actual,
                "field drifted"
            );
        }
        if change_set.force_new_deployment == Some(true) {
            tracing::info!(cluster = %cluster, service = %name, "forcing new deployment");
        }

        let response = self.api.update(change_set).await?;
        let updated = classify(response, name).into_service(cluster, name)?;
        tracing::info!(cluster = %cluster, service = %name, "service updated");

        if request.wait_until_tasks_running {
            self.wait_for_tasks(request).await?;
        }
        Ok(updated)
    }

    /// Delete the service, scaling it to zero first unless forced.
    pub async fn delete(&self, request: &ActionRequest) -> Result<Reconciled, ProvisionerError> {
        let cluster = request.spec.cluster_label();
        let name = request.spec.require_service_name()?;
        let input = normalize::delete_input(&request.spec, request.force_delete)?;

        if request.force_delete {
            tracing::info!(cluster = %cluster, service = %name, "force-deleting service");
            return self.issue_delete(&input, request).await;
        }

        match self.describe(request).await? {
            ClassifiedOutcome::Found(_) => {
                tracing::info!(
                    cluster = %cluster,
                    service = %name,
                    "scaling service to zero before delete"
                );
                let scale_down = UpdateServiceInput::scale_to(
                    request.spec.cluster.clone(),
                    name.to_string(),
                    0,
                );
                let response = self.api.update(&scale_down).await?;
                classify(response, name).into_service(cluster, name)?;
                self.wait_for_tasks(request).await?;

                self.issue_delete(&input, request).await
            }
            ClassifiedOutcome::NotFound(previous) => {
                tracing::info!(
                    cluster = %cluster,
                    service = %name,
                    "service already gone, nothing to delete"
                );
                Ok(Reconciled::Deleted(previous))
            }
            ClassifiedOutcome::Draining(_) => Err(ProvisionerError::Draining {
                cluster: cluster.to_string(),
                service: name.to_string(),
            }),
            ClassifiedOutcome::GenericFailure(detail) => Err(ProvisionerError::GenericFailure {
                cluster: cluster.to_string(),
                service: name.to_string(),
                detail,
            }),
        }
    }

    async fn issue_delete(
        &self,
        input: &normalize::DeleteServiceInput,
        request: &ActionRequest,
    ) -> Result<Reconciled, ProvisionerError> {
        let cluster = request.spec.cluster_label();
        let name = input.service.as_str();

        let response = self.api.delete(input).await?;
        // A deleted service comes back DRAINING (or INACTIVE once finished).
        let deleted = match classify(response, name) {
            ClassifiedOutcome::Found(s)
            | ClassifiedOutcome::Draining(s)
            | ClassifiedOutcome::NotFound(Some(s)) => s,
            ClassifiedOutcome::NotFound(None) => {
                return Err(ProvisionerError::NotFound {
                    cluster: cluster.to_string(),
                    service: name.to_string(),
                });
            }
            ClassifiedOutcome::GenericFailure(detail) => {
                return Err(ProvisionerError::GenericFailure {
                    cluster: cluster.to_string(),
                    service: name.to_string(),
                    detail,
                });
            }
        };
        tracing::info!(cluster = %cluster, service = %name, "service deleted");

        if request.wait_until_tasks_running {
            tracing::info!(
                cluster = %cluster,
                service = %name,
                "waiting for service to become inactive"
            );
            let state = self
                .api
                .wait_until_services_inactive(input.cluster.as_deref(), name, self.wait_timeout)
                .await?;
            expect_success(state, cluster, name)?;
        }
        Ok(Reconciled::Deleted(Some(deleted)))
    }

    async fn wait_for_tasks(&self, request: &ActionRequest) -> Result<(), ProvisionerError> {
        let cluster = request.spec.cluster_label();
        let name = request.spec.require_service_name()?;

        tracing::info!(
            cluster = %cluster,
            service = %name,
            timeout_secs = self.wait_timeout.as_secs(),
            "waiting for tasks to settle"
        );
        let state = self
            .api
            .wait_until_tasks_running(request.spec.cluster.as_deref(), name, self.wait_timeout)
            .await?;
        expect_success(state, cluster, name)
    }
}

fn expect_success(state: WaitState, cluster: &str, service: &str) -> Result<(), ProvisionerError> {
    match state {
        WaitState::Success => Ok(()),
        WaitState::Failed(detail) => Err(ProvisionerError::WaitFailed {
            cluster: cluster.to_string(),
            service: service.to_string(),
            detail,
        }),
    }
}
