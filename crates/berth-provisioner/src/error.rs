use berth_core::models::shapes::DeploymentControllerType;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProvisionerError {
    #[error("service not found: {cluster}/{service}")]
    NotFound { cluster: String, service: String },

    #[error("service is draining: {cluster}/{service} (retry once the drain has finished)")]
    Draining { cluster: String, service: String },

    #[error(
        "update not allowed for {mode} deployment controller on {cluster}/{service}: {}",
        .fields.join(", ")
    )]
    InvalidUpdateShape {
        cluster: String,
        service: String,
        mode: DeploymentControllerType,
        fields: Vec<String>,
    },

    #[error("ECS request failed for {cluster}/{service}: {detail}")]
    GenericFailure {
        cluster: String,
        service: String,
        detail: String,
    },

    #[error("service {cluster}/{service} did not stabilize: {detail}")]
    WaitFailed {
        cluster: String,
        service: String,
        detail: String,
    },

    #[error("AWS error: {0}")]
    Aws(String),

    #[error("invalid spec: {0}")]
    InvalidSpec(String),

    #[error(transparent)]
    Core(#[from] berth_core::CoreError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Walk the full error chain and join all causes into one string.
///
/// AWS SDK errors often have terse `Display` impls (e.g. "service error")
/// but useful detail in the source chain.
pub fn format_err_chain(err: &dyn std::error::Error) -> String {
    let mut msg = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        msg.push_str(": ");
        msg.push_str(&cause.to_string());
        source = cause.source();
    }
    msg
}
