//! CLI command definitions and dispatch for the `chorus` binary.
//!
//! Uses clap derive macros for argument parsing. Interactive flows (adding
//! and deleting agents) use dialoguer prompts.

pub mod agent;
pub mod run;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// Run automated chat agents against Discord channels.
#[derive(Parser)]
#[command(name = "chorus", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Data directory holding the agents file (defaults to ~/.chorus).
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Export spans through OpenTelemetry (stdout exporter).
    #[arg(long, global = true)]
    pub otel: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Add or update an agent interactively.
    Add,

    /// List configured agents.
    #[command(alias = "ls")]
    List,

    /// Delete one agent entry, or the whole configuration.
    #[command(alias = "rm")]
    Delete {
        /// Credential name of the agent to delete; omit to delete everything.
        name: Option<String>,

        /// Skip the confirmation prompt.
        #[arg(long)]
        force: bool,
    },

    /// Run all configured agents until interrupted.
    Run {
        /// Corpus file of candidate messages.
        #[arg(long, value_name = "FILE", default_value = "pesan.txt")]
        corpus: PathBuf,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}
