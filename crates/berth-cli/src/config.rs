use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Current config version. Bump this when adding fields or changing shape.
/// Each bump requires a corresponding entry in [`migrate`].
const CURRENT_VERSION: u32 = 1;

fn default_wait_timeout_secs() -> u64 {
    600
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BerthConfig {
    /// Schema version. Missing or 0 = pre-versioned config.
    #[serde(default)]
    pub config_version: u32,
    /// Falls back to the SDK's region chain when unset.
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub credentials: CredentialSource,
    /// Upper bound for each stability wait.
    #[serde(default = "default_wait_timeout_secs")]
    pub wait_timeout_secs: u64,
}

impl Default for BerthConfig {
    fn default() -> Self {
        Self {
            config_version: CURRENT_VERSION,
            region: None,
            credentials: CredentialSource::default(),
            wait_timeout_secs: default_wait_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CredentialSource {
    Inline {
        access_key_id: String,
        secret_access_key: String,
        #[serde(skip_serializing_if = "Option::is_none", default)]
        session_token: Option<String>,
    },
    Profile {
        profile_name: String,
    },
    #[default]
    DefaultChain,
}

impl CredentialSource {
    /// A log-safe description: never includes the secret, and only a hint of
    /// the access key.
    pub fn describe(&self) -> String {
        match self {
            Self::Inline {
                access_key_id,
                session_token,
                ..
            } => {
                let kind = if session_token.is_some() {
                    "temporary"
                } else {
                    "inline"
                };
                format!("{kind} ({})", redact_access_key(access_key_id))
            }
            Self::Profile { profile_name } => format!("profile ({profile_name})"),
            Self::DefaultChain => "default_chain".to_string(),
        }
    }
}

pub fn default_config_path() -> eyre::Result<PathBuf> {
    let base = dirs::config_dir().ok_or_else(|| eyre::eyre!("no config directory found"))?;
    Ok(base.join("berth").join("config.json"))
}

/// Load the config from `path`, or from the default location.
///
/// An explicit path must exist. A missing file at the default location means
/// "use the defaults".
pub fn load_config(path: Option<&Path>) -> eyre::Result<BerthConfig> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => {
            let default = default_config_path()?;
            if !default.exists() {
                tracing::debug!(path = %default.display(), "no config file, using defaults");
                return Ok(BerthConfig::default());
            }
            default
        }
    };

    let contents = std::fs::read_to_string(&path)
        .map_err(|e| eyre::eyre!("failed to read config at {}: {e}", path.display()))?;

    // Parse as raw JSON so we can run migrations before deserializing.
    let json: serde_json::Value = serde_json::from_str(&contents)?;
    let on_disk_version = match json.get("config_version") {
        None => 0,
        Some(v) => v
            .as_u64()
            .and_then(|n| u32::try_from(n).ok())
            .ok_or_else(|| eyre::eyre!("config_version must be a u32, got {v}"))?,
    };

    let migrated = migrate(json, on_disk_version)?;
    let config: BerthConfig = serde_json::from_value(migrated)?;
    tracing::debug!(path = %path.display(), version = config.config_version, "config loaded");
    Ok(config)
}

/// Run sequential migrations from `from_version` up to [`CURRENT_VERSION`].
///
/// Each migration is a pure transform on the raw JSON value.
fn migrate(mut json: serde_json::Value, from_version: u32) -> eyre::Result<serde_json::Value> {
    if from_version > CURRENT_VERSION {
        return Err(eyre::eyre!(
            "config_version {from_version} is newer than this build supports ({CURRENT_VERSION}). \
             Please update berth."
        ));
    }

    // v0 → v1: hand-written files may omit the version; the shape is the same.
    if from_version < 1 {
        let obj = json
            .as_object_mut()
            .ok_or_else(|| eyre::eyre!("config is not a JSON object"))?;
        obj.insert(
            "config_version".to_string(),
            serde_json::Value::Number(1.into()),
        );
        tracing::debug!("stamped unversioned config as v1");
    }

    Ok(json)
}

fn redact_access_key(key: &str) -> String {
    if key.len() <= 8 {
        return "****".to_string();
    }
    let prefix = &key[..4];
    let suffix = &key[key.len() - 4..];
    format!("{prefix}...{suffix}")
}
