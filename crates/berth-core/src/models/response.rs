use serde::{Deserialize, Serialize};

use crate::models::observed::ObservedService;

/// A per-service failure entry from DescribeServices.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Failure {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arn: Option<String>,
    /// `MISSING` when the service does not exist.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl Failure {
    pub const MISSING: &'static str = "MISSING";

    pub fn is_missing(&self) -> bool {
        self.reason.as_deref() == Some(Self::MISSING)
    }
}

/// The two response shapes ECS returns for a service.
///
/// DescribeServices answers with a list plus failures; CreateService,
/// UpdateService and DeleteService answer with one record. The shape is
/// resolved once, at deserialization, so nothing downstream has to probe for
/// `services` versus `service` again.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "RawServiceResponse")]
pub enum ServiceResponse {
    Described {
        failures: Vec<Failure>,
        services: Vec<ObservedService>,
    },
    Single {
        service: Option<ObservedService>,
    },
}

impl ServiceResponse {
    pub fn described(services: Vec<ObservedService>) -> Self {
        Self::Described {
            failures: vec![],
            services,
        }
    }

    pub fn failed(failures: Vec<Failure>) -> Self {
        Self::Described {
            failures,
            services: vec![],
        }
    }

    pub fn single(service: ObservedService) -> Self {
        Self::Single {
            service: Some(service),
        }
    }
}

#[derive(Deserialize)]
struct RawServiceResponse {
    #[serde(default)]
    failures: Vec<Failure>,
    services: Option<Vec<ObservedService>>,
    service: Option<ObservedService>,
}

impl From<RawServiceResponse> for ServiceResponse {
    fn from(raw: RawServiceResponse) -> Self {
        match (raw.services, raw.service) {
            (Some(services), _) => Self::Described {
                failures: raw.failures,
                services,
            },
            (None, None) if !raw.failures.is_empty() => Self::Described {
                failures: raw.failures,
                services: vec![],
            },
            (None, service) => Self::Single { service },
        }
    }
}
