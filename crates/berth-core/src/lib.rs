//! berth-core
//!
//! Pure domain types for ECS service reconciliation: the desired service spec,
//! the observed service record, the per-invocation action request and the raw
//! response shapes returned by the ECS API.
//! Nothing here talks to AWS; the provisioner and the CLI share these types.

pub mod error;
pub mod models;

pub use crate::error::CoreError;
pub use crate::models::observed::{ObservedService, ServiceStatus};
pub use crate::models::request::{Action, ActionRequest};
pub use crate::models::response::{Failure, ServiceResponse};
pub use crate::models::spec::ServiceSpec;
