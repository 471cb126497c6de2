use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::models::spec::ServiceSpec;

/// What the caller asked to happen to the service.
///
/// `create` and `update` share the find-or-create path: either one creates the
/// service when it is missing and updates it when it drifted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    #[default]
    Create,
    Update,
    Delete,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = CoreError;

    /// An empty string selects the default action (`create`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "create" => Ok(Self::Create),
            "update" => Ok(Self::Update),
            "delete" => Ok(Self::Delete),
            _ => Err(CoreError::UnknownAction(s.to_string())),
        }
    }
}

/// One reconciliation request: the desired spec plus the flags that steer the
/// state machine. Built once per invocation and never mutated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionRequest {
    #[serde(default)]
    pub action: Action,
    pub spec: ServiceSpec,
    /// Start a new deployment even when nothing in the spec changed.
    #[serde(default)]
    pub force_new_deployment: bool,
    /// Delete without scaling the service down to zero first.
    #[serde(default)]
    pub force_delete: bool,
    /// Block until the service's tasks are running (or, on delete, until the
    /// service is inactive).
    #[serde(default)]
    pub wait_until_tasks_running: bool,
}

impl ActionRequest {
    pub fn new(action: Action, spec: ServiceSpec) -> Self {
        Self {
            action,
            spec,
            ..Self::default()
        }
    }
}
