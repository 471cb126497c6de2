//! Assemble one [`ActionRequest`] from action-style inputs.
//!
//! Every input is both a flag and an `INPUT_*` environment variable, so the
//! binary runs unchanged as a GitHub Action step. An empty value means the
//! input was not supplied.

use std::path::PathBuf;

use berth_core::{Action, ActionRequest, CoreError, ServiceSpec};
use clap::{Args, Parser};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum InputError {
    #[error("either spec-file or spec must be supplied")]
    MissingSpec,

    #[error("Unable to open spec-file: {0}")]
    SpecFile(#[source] std::io::Error),

    #[error("Invalid JSON for spec: {source}: {input}")]
    InvalidJson {
        #[source]
        source: serde_json::Error,
        input: String,
    },

    #[error("invalid value for {name}: {value:?} (expected true or false)")]
    InvalidFlag { name: &'static str, value: String },

    #[error(transparent)]
    Core(#[from] CoreError),
}

#[derive(Parser, Debug)]
#[command(
    name = "berth",
    version,
    about = "Create, update or delete an ECS service to match a spec"
)]
pub struct Cli {
    #[command(flatten)]
    pub inputs: Inputs,

    /// Path to the berth config file
    #[arg(long, env = "BERTH_CONFIG")]
    pub config: Option<PathBuf>,

    /// AWS region (overrides the config file)
    #[arg(long, env = "AWS_REGION")]
    pub region: Option<String>,

    /// Upper bound for each stability wait, in seconds
    #[arg(long, env = "BERTH_WAIT_TIMEOUT_SECS")]
    pub wait_timeout_secs: Option<u64>,

    /// Emit logs as JSON
    #[arg(long, env = "BERTH_LOG_JSON")]
    pub log_json: bool,
}

#[derive(Args, Debug, Clone, Default)]
pub struct Inputs {
    /// create, update or delete (default: create)
    #[arg(long, env = "INPUT_ACTION", default_value = "")]
    pub action: String,

    /// Start a new deployment even if nothing changed
    #[arg(long, env = "INPUT_FORCE-NEW-DEPLOYMENT", default_value = "")]
    pub force_new_deployment: String,

    /// Delete without scaling to zero first
    #[arg(long, env = "INPUT_FORCE-DELETE", default_value = "")]
    pub force_delete: String,

    /// Wait for tasks to be running (or the service inactive, on delete)
    #[arg(long, env = "INPUT_WAIT-UNTIL-TASKS-RUNNING", default_value = "")]
    pub wait_until_tasks_running: String,

    /// Path to a JSON service spec (takes precedence over --spec)
    #[arg(long, env = "INPUT_SPEC-FILE", default_value = "")]
    pub spec_file: String,

    /// Inline JSON service spec
    #[arg(long, env = "INPUT_SPEC", default_value = "")]
    pub spec: String,
}

/// Build the request for this invocation.
pub fn load_request(inputs: &Inputs) -> Result<ActionRequest, InputError> {
    let action: Action = inputs.action.parse()?;
    let spec = load_spec(inputs)?;

    Ok(ActionRequest {
        action,
        spec,
        force_new_deployment: parse_flag("force-new-deployment", &inputs.force_new_deployment)?,
        force_delete: parse_flag("force-delete", &inputs.force_delete)?,
        wait_until_tasks_running: parse_flag(
            "wait-until-tasks-running",
            &inputs.wait_until_tasks_running,
        )?,
    })
}

fn load_spec(inputs: &Inputs) -> Result<ServiceSpec, InputError> {
    let raw = if !inputs.spec_file.is_empty() {
        tracing::debug!(path = %inputs.spec_file, "reading spec-file");
        std::fs::read_to_string(&inputs.spec_file).map_err(InputError::SpecFile)?
    } else if !inputs.spec.is_empty() {
        inputs.spec.clone()
    } else {
        return Err(InputError::MissingSpec);
    };

    serde_json::from_str(&raw).map_err(|source| InputError::InvalidJson { source, input: raw })
}

fn parse_flag(name: &'static str, value: &str) -> Result<bool, InputError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "" | "false" => Ok(false),
        "true" => Ok(true),
        _ => Err(InputError::InvalidFlag {
            name,
            value: value.to_string(),
        }),
    }
}
