use clap::Parser;
use taskboard_core::config::TaskboardConfig;

mod cli;
mod demo;
mod derive;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("taskboard error: {error:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    let config = TaskboardConfig::load(cli.config.as_deref())?;
    init_tracing(&config.log.filter, cli.quiet, cli.verbose)?;
    tracing::debug!(?config, "configuration loaded");

    match cli.command {
        cli::Commands::Demo => demo::handle(config.engine).await,
        cli::Commands::Derive { snapshot, board } => derive::handle(&snapshot, &board),
    }
}

fn init_tracing(default_filter: &str, quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        default_filter
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("TASKBOARD_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to initialize tracing: {e}"))
}
