//! berth-provisioner
//!
//! Reconciliation engine for a single ECS service.
//!
//! Public API:
//! - `normalize`: describe/create/update/delete payloads from a spec
//! - `classify()`: interpret an ECS response as found / not found / draining / failure
//! - `compute_change_set()` / `update_needed()`: minimal diff against the observed record
//! - `validate_update_shape()`: reject fields the deployment controller can't update
//! - `Reconciler`: describe → create / update / delete, with optional stability waits
//! - `EcsClient`: the `EcsApi` collaborator backed by `aws-sdk-ecs`

pub mod classify;
pub mod client;
pub mod diff;
pub mod ecs;
pub mod error;
pub mod normalize;
pub mod reconcile;
pub mod validate;

pub use crate::classify::{classify, ClassifiedOutcome};
pub use crate::client::{EcsApi, WaitState};
pub use crate::diff::{compute_change_set, update_needed, FieldDrift};
pub use crate::ecs::EcsClient;
pub use crate::error::ProvisionerError;
pub use crate::normalize::{DeleteServiceInput, DescribeServicesInput, UpdateServiceInput};
pub use crate::reconcile::{Reconciled, Reconciler, DEFAULT_WAIT_TIMEOUT};
pub use crate::validate::validate_update_shape;

/// Reconcile one request against ECS: find-or-create-or-update, or delete.
pub async fn reconcile(
    api: &dyn EcsApi,
    request: &berth_core::ActionRequest,
    wait_timeout: std::time::Duration,
) -> Result<Reconciled, ProvisionerError> {
    Reconciler::new(api)
        .with_wait_timeout(wait_timeout)
        .reconcile(request)
        .await
}
