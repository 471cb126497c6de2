//! In-memory `EcsApi` double shared by the integration tests.
//!
//! Responses are scripted per call kind and consumed in order; every call is
//! recorded so tests can assert on exactly what reached ECS.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use berth_core::models::shapes::{DeploymentController, DeploymentControllerType};
use berth_core::{Failure, ObservedService, ServiceResponse, ServiceSpec, ServiceStatus};
use berth_provisioner::client::BoxFuture;
use berth_provisioner::{
    DeleteServiceInput, DescribeServicesInput, EcsApi, ProvisionerError, UpdateServiceInput,
    WaitState,
};

pub const CLUSTER: &str = "my-cluster";
pub const SERVICE: &str = "my-service";

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Describe(DescribeServicesInput),
    Create(ServiceSpec),
    Update(UpdateServiceInput),
    Delete(DeleteServiceInput),
    WaitTasksRunning { cluster: Option<String>, service: String },
    WaitInactive { cluster: Option<String>, service: String },
}

type Scripted = Result<ServiceResponse, ProvisionerError>;

#[derive(Default)]
pub struct FakeEcs {
    calls: Mutex<Vec<Call>>,
    describe: Mutex<VecDeque<Scripted>>,
    create: Mutex<VecDeque<Scripted>>,
    update: Mutex<VecDeque<Scripted>>,
    delete: Mutex<VecDeque<Scripted>>,
    waits: Mutex<VecDeque<WaitState>>,
}

impl FakeEcs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_describe(self, response: ServiceResponse) -> Self {
        self.describe.lock().unwrap().push_back(Ok(response));
        self
    }

    pub fn on_create(self, response: ServiceResponse) -> Self {
        self.create.lock().unwrap().push_back(Ok(response));
        self
    }

    pub fn on_update(self, response: ServiceResponse) -> Self {
        self.update.lock().unwrap().push_back(Ok(response));
        self
    }

    pub fn on_delete(self, response: ServiceResponse) -> Self {
        self.delete.lock().unwrap().push_back(Ok(response));
        self
    }

    /// The next UpdateService call fails at the SDK layer.
    pub fn fail_update(self, message: &str) -> Self {
        self.update
            .lock()
            .unwrap()
            .push_back(Err(ProvisionerError::Aws(message.into())));
        self
    }

    /// Waits succeed unless scripted otherwise.
    pub fn on_wait(self, state: WaitState) -> Self {
        self.waits.lock().unwrap().push_back(state);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn mutations(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|c| matches!(c, Call::Create(_) | Call::Update(_) | Call::Delete(_)))
            .collect()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn next(queue: &Mutex<VecDeque<Scripted>>, operation: &str) -> Scripted {
        queue.lock().unwrap().pop_front().unwrap_or_else(|| {
            Err(ProvisionerError::Aws(format!(
                "no scripted response for {operation}"
            )))
        })
    }

    fn next_wait(&self) -> WaitState {
        self.waits
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(WaitState::Success)
    }
}

impl EcsApi for FakeEcs {
    fn describe<'a>(
        &'a self,
        input: &'a DescribeServicesInput,
    ) -> BoxFuture<'a, Result<ServiceResponse, ProvisionerError>> {
        self.record(Call::Describe(input.clone()));
        let next = Self::next(&self.describe, "DescribeServices");
        Box::pin(async move { next })
    }

    fn create<'a>(
        &'a self,
        input: &'a ServiceSpec,
    ) -> BoxFuture<'a, Result<ServiceResponse, ProvisionerError>> {
        self.record(Call::Create(input.clone()));
        let next = Self::next(&self.create, "CreateService");
        Box::pin(async move { next })
    }

    fn update<'a>(
        &'a self,
        input: &'a UpdateServiceInput,
    ) -> BoxFuture<'a, Result<ServiceResponse, ProvisionerError>> {
        self.record(Call::Update(input.clone()));
        let next = Self::next(&self.update, "UpdateService");
        Box::pin(async move { next })
    }

    fn delete<'a>(
        &'a self,
        input: &'a DeleteServiceInput,
    ) -> BoxFuture<'a, Result<ServiceResponse, ProvisionerError>> {
        self.record(Call::Delete(input.clone()));
        let next = Self::next(&self.delete, "DeleteService");
        Box::pin(async move { next })
    }

    fn wait_until_tasks_running<'a>(
        &'a self,
        cluster: Option<&'a str>,
        service: &'a str,
        _timeout: Duration,
    ) -> BoxFuture<'a, Result<WaitState, ProvisionerError>> {
        self.record(Call::WaitTasksRunning {
            cluster: cluster.map(String::from),
            service: service.to_string(),
        });
        let state = self.next_wait();
        Box::pin(async move { Ok(state) })
    }

    fn wait_until_services_inactive<'a>(
        &'a self,
        cluster: Option<&'a str>,
        service: &'a str,
        _timeout: Duration,
    ) -> BoxFuture<'a, Result<WaitState, ProvisionerError>> {
        self.record(Call::WaitInactive {
            cluster: cluster.map(String::from),
            service: service.to_string(),
        });
        let state = self.next_wait();
        Box::pin(async move { Ok(state) })
    }
}

// ── Fixtures ─────────────────────────────────────────────────────────────

/// The desired state used across the tests: `web:3`, one task.
pub fn spec() -> ServiceSpec {
    ServiceSpec {
        cluster: Some(CLUSTER.into()),
        service_name: Some(SERVICE.into()),
        task_definition: Some("web:3".into()),
        desired_count: Some(1),
        launch_type: Some("FARGATE".into()),
        ..Default::default()
    }
}

/// What ECS reports for [`spec`] once it is running.
pub fn observed(status: ServiceStatus) -> ObservedService {
    ObservedService {
        service_arn: Some(format!(
            "arn:aws:ecs:us-east-1:123456789012:service/{CLUSTER}/{SERVICE}"
        )),
        service_name: Some(SERVICE.into()),
        cluster_arn: Some(format!("arn:aws:ecs:us-east-1:123456789012:cluster/{CLUSTER}")),
        status: Some(status),
        task_definition: Some("arn:aws:ecs:us-east-1:123456789012:task-definition/web:3".into()),
        desired_count: Some(1),
        running_count: Some(1),
        pending_count: Some(0),
        launch_type: Some("FARGATE".into()),
        deployment_controller: Some(DeploymentController::from(DeploymentControllerType::Ecs)),
        ..Default::default()
    }
}

pub fn active() -> ObservedService {
    observed(ServiceStatus::Active)
}

pub fn missing() -> ServiceResponse {
    ServiceResponse::failed(vec![Failure {
        arn: Some(format!(
            "arn:aws:ecs:us-east-1:123456789012:service/{CLUSTER}/{SERVICE}"
        )),
        reason: Some(Failure::MISSING.into()),
        detail: None,
    }])
}
