use berth_core::{Failure, ObservedService, ServiceResponse, ServiceStatus};

use crate::error::ProvisionerError;

/// What an ECS response says about one service.
///
/// Not-found and draining are distinct signals that drive different branches
/// of the reconciler; neither is ever folded into the other.
#[derive(Debug, Clone, PartialEq)]
pub enum ClassifiedOutcome {
    /// The service exists and is `ACTIVE`.
    Found(ObservedService),
    /// The service is missing, or `INACTIVE` (carried when ECS returned it).
    NotFound(Option<ObservedService>),
    /// The service is being torn down.
    Draining(ObservedService),
    /// A rejection, a malformed response or an unexpected status.
    GenericFailure(String),
}

impl ClassifiedOutcome {
    /// Accept only `Found`, turning every other outcome into its error.
    pub fn into_service(
        self,
        cluster: &str,
        service: &str,
    ) -> Result<ObservedService, ProvisionerError> {
        match self {
            Self::Found(observed) => Ok(observed),
            Self::NotFound(_) => Err(ProvisionerError::NotFound {
                cluster: cluster.to_string(),
                service: service.to_string(),
            }),
            Self::Draining(_) => Err(ProvisionerError::Draining {
                cluster: cluster.to_string(),
                service: service.to_string(),
            }),
            Self::GenericFailure(detail) => Err(ProvisionerError::GenericFailure {
                cluster: cluster.to_string(),
                service: service.to_string(),
                detail,
            }),
        }
    }
}

/// Classify a describe/create/update/delete response for `service_name`.
///
/// An empty response is a failure, never evidence that the service is absent.
pub fn classify(response: ServiceResponse, service_name: &str) -> ClassifiedOutcome {
    let record = match response {
        ServiceResponse::Described { failures, services } => {
            if let Some(failure) = failures.first() {
                return if failure.is_missing() {
                    ClassifiedOutcome::NotFound(None)
                } else {
                    ClassifiedOutcome::GenericFailure(describe_failure(failure))
                };
            }
            if services.is_empty() {
                return ClassifiedOutcome::GenericFailure(
                    "malformed response: no service record and no failure".into(),
                );
            }
            match services
                .into_iter()
                .find(|s| s.service_name.as_deref() == Some(service_name))
            {
                Some(record) => record,
                None => return ClassifiedOutcome::NotFound(None),
            }
        }
        ServiceResponse::Single {
            service: Some(record),
        } => record,
        ServiceResponse::Single { service: None } => {
            return ClassifiedOutcome::GenericFailure(
                "malformed response: no service record".into(),
            );
        }
    };

    match record.status.clone() {
        Some(ServiceStatus::Active) => ClassifiedOutcome::Found(record),
        Some(ServiceStatus::Inactive) => ClassifiedOutcome::NotFound(Some(record)),
        Some(ServiceStatus::Draining) => ClassifiedOutcome::Draining(record),
        Some(ServiceStatus::Other(status)) => {
            ClassifiedOutcome::GenericFailure(format!("unexpected status: {status}"))
        }
        None => ClassifiedOutcome::GenericFailure("unexpected status: none reported".into()),
    }
}

fn describe_failure(failure: &Failure) -> String {
    let reason = failure.reason.as_deref().unwrap_or("UNKNOWN");
    match (&failure.arn, &failure.detail) {
        (Some(arn), Some(detail)) => format!("{reason} ({arn}): {detail}"),
        (Some(arn), None) => format!("{reason} ({arn})"),
        (None, Some(detail)) => format!("{reason}: {detail}"),
        (None, None) => reason.to_string(),
    }
}
