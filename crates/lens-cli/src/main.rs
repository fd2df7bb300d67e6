use clap::Parser;

mod cli;
mod commands;
mod config_warnings;
mod output;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("lens error: {error:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    init_tracing(cli.quiet, cli.verbose)?;

    let flags = cli.global_flags();

    // Offline commands need no configuration.
    match &cli.command {
        cli::Commands::Plan(args) => return commands::plan::handle(args, &flags),
        cli::Commands::Schema => return commands::schema::handle(&flags),
        _ => {}
    }

    let config = lens_config::LensConfig::load_with_dotenv()?;
    config_warnings::warn_unconfigured(&config);

    match &cli.command {
        cli::Commands::Analyze(args) => commands::analyze::handle(args, &flags, &config).await,
        cli::Commands::Status => commands::status::handle(&flags, &config),
        cli::Commands::Plan(_) | cli::Commands::Schema => Ok(()),
    }
}

fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("LENS_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}
