use anyhow::Result;
use echo_solana_client::EchoPipeline;

use crate::args::Cli;
use crate::output;

pub async fn run(cli: Cli) -> Result<()> {
    let config = cli.to_config()?;
    tracing::info!(url = %config.rpc_url, commitment = %config.commitment, "connecting");

    let pipeline = EchoPipeline::connect(config)?;
    let outcome = pipeline.run(&cli.program_id, &cli.message).await?;

    tracing::info!(signature = %outcome.signature, "echo verified");
    output::print_outcome(&outcome)
}
