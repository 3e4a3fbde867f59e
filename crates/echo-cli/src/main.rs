use anyhow::Result;
use clap::Parser;

mod args;
mod logging;
mod output;
mod run;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = args::Cli::parse();
    output::init(cli.json);
    logging::init(cli.json);

    run::run(cli).await
}
