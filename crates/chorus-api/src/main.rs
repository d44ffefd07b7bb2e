//! Chorus CLI entry point.
//!
//! Binary name: `chorus`
//!
//! Loads `.env`, parses CLI arguments, initializes tracing, then dispatches
//! to the appropriate command handler.

mod cli;
mod state;

use clap::Parser;
use clap_complete::generate;

use cli::{Cli, Commands};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Local credentials and the AI key may live in a .env file.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Set up tracing based on verbosity; RUST_LOG still wins when set.
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "info",
        1 => "info,chorus=debug",
        _ => "trace",
    };
    chorus_observe::tracing_setup::init_tracing(filter, cli.otel)
        .map_err(|e| anyhow::anyhow!(e))?;

    let state = AppState::init(cli.data_dir.clone())?;

    match cli.command {
        Commands::Add => {
            cli::agent::add_agent(&state).await?;
        }

        Commands::List => {
            cli::agent::list_agents(&state, cli.json).await?;
        }

        Commands::Delete { name, force } => {
            cli::agent::delete_agent(&state, name.as_deref(), force).await?;
        }

        Commands::Run { corpus } => {
            cli::run::run_agents(&state, &corpus).await?;
        }

        Commands::Completions { shell } => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            generate(shell, &mut cmd, "chorus", &mut std::io::stdout());
        }
    }

    chorus_observe::tracing_setup::shutdown_tracing();
    Ok(())
}
