use clap::Parser;
use zonekit::cli::Cli;
use zonekit::init_logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging()?;

    let cli = Cli::parse();
    zonekit::commands::run(cli).await
}
