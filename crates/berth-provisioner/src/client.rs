use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use berth_core::{ServiceResponse, ServiceSpec};

use crate::error::ProvisionerError;
use crate::normalize::{DeleteServiceInput, DescribeServicesInput, UpdateServiceInput};

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// How a long-poll for service stability ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WaitState {
    Success,
    /// Timed out, hit a failure state, or the polling call itself failed.
    Failed(String),
}

/// The ECS calls the reconciler needs. One impl talks to AWS
/// ([`crate::ecs::EcsClient`]); tests substitute an in-memory double.
///
/// Retries and backoff, if any, live behind this trait. The reconciler
/// issues each call exactly once.
pub trait EcsApi: Send + Sync {
    /// DescribeServices. Answers with the `Described` shape.
    fn describe<'a>(
        &'a self,
        input: &'a DescribeServicesInput,
    ) -> BoxFuture<'a, Result<ServiceResponse, ProvisionerError>>;

    /// CreateService with the full spec. Answers with the `Single` shape.
    fn create<'a>(
        &'a self,
        input: &'a ServiceSpec,
    ) -> BoxFuture<'a, Result<ServiceResponse, ProvisionerError>>;

    /// UpdateService with a change-set. Answers with the `Single` shape.
    fn update<'a>(
        &'a self,
        input: &'a UpdateServiceInput,
    ) -> BoxFuture<'a, Result<ServiceResponse, ProvisionerError>>;

    /// DeleteService. Answers with the `Single` shape.
    fn delete<'a>(
        &'a self,
        input: &'a DeleteServiceInput,
    ) -> BoxFuture<'a, Result<ServiceResponse, ProvisionerError>>;

    /// Block until the service's running count matches its desired count.
    fn wait_until_tasks_running<'a>(
        &'a self,
        cluster: Option<&'a str>,
        service: &'a str,
        timeout: Duration,
    ) -> BoxFuture<'a, Result<WaitState, ProvisionerError>>;

    /// Block until the service reports `INACTIVE`.
    fn wait_until_services_inactive<'a>(
        &'a self,
        cluster: Option<&'a str>,
        service: &'a str,
        timeout: Duration,
    ) -> BoxFuture<'a, Result<WaitState, ProvisionerError>>;
}
