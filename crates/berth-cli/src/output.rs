//! Report the reconciled service: `service`, `arn` and `outcome` outputs on
//! stdout, and in `$GITHUB_OUTPUT` when running as an action step.

use std::io::Write;
use std::path::Path;

use berth_provisioner::Reconciled;

const GITHUB_OUTPUT: &str = "GITHUB_OUTPUT";
const DELIMITER: &str = "BERTH_OUTPUT_EOF";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outputs {
    /// The service record as compact JSON, `null` when there is none.
    pub service: String,
    /// Empty when the service was already gone.
    pub arn: String,
    /// `created`, `updated`, `unchanged` or `deleted`
    pub outcome: &'static str,
}

impl Outputs {
    pub fn from_reconciled(result: &Reconciled) -> Result<Self, serde_json::Error> {
        let service = result.service();
        Ok(Self {
            service: serde_json::to_string(&service)?,
            arn: service
                .and_then(|s| s.service_arn.clone())
                .unwrap_or_default(),
            outcome: result.label(),
        })
    }

    /// `name=value` lines, with the multi-line-safe heredoc form for
    /// `service`.
    pub fn render(&self) -> String {
        format!(
            "service<<{DELIMITER}\n{}\n{DELIMITER}\narn={}\noutcome={}\n",
            self.service, self.arn, self.outcome
        )
    }
}

/// Print the outputs and, when `$GITHUB_OUTPUT` is set, append them there.
pub fn emit(outputs: &Outputs) -> eyre::Result<()> {
    let rendered = outputs.render();
    print!("{rendered}");

    if let Some(path) = std::env::var_os(GITHUB_OUTPUT).filter(|p| !p.is_empty()) {
        append(Path::new(&path), &rendered)?;
        tracing::debug!(path = %Path::new(&path).display(), "wrote step outputs");
    }
    Ok(())
}

/// Append rendered outputs to a step-output file.
pub fn append(path: &Path, rendered: &str) -> eyre::Result<()> {
    let mut file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| eyre::eyre!("failed to open {}: {e}", path.display()))?;
    file.write_all(rendered.as_bytes())?;
    Ok(())
}
