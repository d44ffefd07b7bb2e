//! The `run` command: start every configured agent and block until they
//! terminate or ctrl-c is pressed.

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use console::style;
use tokio_util::sync::CancellationToken;

use chorus_core::supervisor::Supervisor;
use chorus_infra::channel::DiscordClient;
use chorus_infra::completion::GeminiClient;
use chorus_infra::{corpus, secret};

use crate::state::AppState;

pub async fn run_agents(state: &AppState, corpus_path: &Path) -> Result<()> {
    let agents = state.store.load().await?;
    if agents.is_empty() {
        println!();
        println!(
            "  {} No agents configured. Add one with: {}",
            style("i").blue().bold(),
            style("chorus add").yellow()
        );
        println!();
        return Ok(());
    }

    let corpus = Arc::new(corpus::load_corpus(corpus_path).await);

    let completion = secret::resolve_ai_key().map(|key| Arc::new(GeminiClient::new(key)));
    if completion.is_none() && agents.values().any(|entry| entry.config.use_ai_reply) {
        tracing::warn!(
            "agents with AI replies configured but {} is not set, replies fall back to the corpus",
            secret::AI_API_KEY_VAR
        );
    }

    // Ctrl-c cancels the whole fleet; every worker winds down at its next
    // suspension point.
    let cancel = CancellationToken::new();
    let signal_cancel = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("shutdown requested, stopping agents");
            signal_cancel.cancel();
        }
    });

    let supervisor = Supervisor::new(corpus, completion, cancel);
    let started = supervisor
        .run(&agents, secret::resolve_credential, DiscordClient::new)
        .await?;

    tracing::info!(started, "all agents terminated");
    Ok(())
}
