use autoprompt::cli::Cli;
use autoprompt::commands;
use autoprompt::core::storage::AppCtx;
use clap::Parser;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("• {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), String> {
    let cli = Cli::parse();
    let ctx = AppCtx::init()?;
    commands::dispatch(cli.command, &ctx).await
}
