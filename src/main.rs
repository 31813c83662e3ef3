use clap::Parser;
use superpi::adapter::inbound::cli::{self, command::Cli};

#[tokio::main]
async fn main() -> miette::Result<()> {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    cli::run(cli).await
}
