use std::time::Duration;

use berth_cli::output::Outputs;
use berth_cli::params::{self, Cli};
use berth_cli::{aws, config, logging, output};
use berth_provisioner::EcsClient;
use clap::Parser;
use eyre::Result;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    logging::init(cli.log_json);

    let config = config::load_config(cli.config.as_deref())?;
    let request = params::load_request(&cli.inputs)?;

    let region = cli.region.or(config.region);
    let wait_timeout =
        Duration::from_secs(cli.wait_timeout_secs.unwrap_or(config.wait_timeout_secs));
    tracing::info!(
        region = region.as_deref().unwrap_or("(sdk default)"),
        credentials = %config.credentials.describe(),
        "building AWS config"
    );
    let sdk_config = aws::build_aws_config(region.as_deref(), &config.credentials).await;
    let ecs = EcsClient::from_conf(&sdk_config);

    let result = berth_provisioner::reconcile(&ecs, &request, wait_timeout).await?;
    tracing::info!(outcome = result.label(), "reconciliation finished");

    output::emit(&Outputs::from_reconciled(&result)?)?;
    Ok(())
}
