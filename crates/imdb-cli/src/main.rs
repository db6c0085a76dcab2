use std::process::ExitCode;

use anyhow::Context as _;
use clap::Parser as _;

#[tokio::main]
async fn main() -> ExitCode {
    match try_main().await {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

async fn try_main() -> anyhow::Result<ExitCode> {
    imdb_cli::logging::init().context("init logging")?;

    let cli = imdb_cli::Cli::parse();
    tracing::debug!(?cli, "parsed cli");

    let mut stdout = std::io::stdout().lock();
    let summary = imdb_cli::run(&cli, &mut stdout).await?;

    if summary.succeeded(cli.saves()) {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}
