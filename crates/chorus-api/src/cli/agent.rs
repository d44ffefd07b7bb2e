//! Agent management CLI commands: add, list, delete.

use anyhow::Result;
use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;
use dialoguer::{Confirm, Input, Select};

use chorus_types::agent::{AgentConfig, AgentEntry, Language};

use crate::state::AppState;

/// Interactively add (or overwrite) one agent entry.
///
/// The credential itself is never typed in: the entry stores the name of
/// the environment variable that holds it.
pub async fn add_agent(state: &AppState) -> Result<()> {
    let name: String = Input::<String>::new()
        .with_prompt("Credential name (.env variable, e.g. DISCORD_TOKEN_1)")
        .interact_text()?;
    let channel_id: String = Input::<String>::new()
        .with_prompt("Channel id")
        .interact_text()?;

    let use_reply = Confirm::new()
        .with_prompt("Reply to incoming messages? (no = broadcast mode)")
        .default(true)
        .interact()?;
    let use_ai_reply = Confirm::new()
        .with_prompt("Generate replies with the AI service?")
        .default(false)
        .interact()?;
    let use_file_reply = Confirm::new()
        .with_prompt("Pick replies from the corpus file?")
        .default(!use_ai_reply)
        .interact()?;
    let reply_threaded = Confirm::new()
        .with_prompt("Send replies as threaded replies?")
        .default(false)
        .interact()?;

    let languages = [Language::Id, Language::En];
    let language = languages[Select::new()
        .with_prompt("Reply language")
        .items(&["id", "en"])
        .default(0)
        .interact()?];

    let read_delay_secs = Input::<u64>::new()
        .with_prompt("Read delay (seconds)")
        .default(10)
        .interact_text()?;
    let reply_delay_secs = Input::<u64>::new()
        .with_prompt("Reply delay (seconds)")
        .default(0)
        .interact_text()?;
    let broadcast_interval_secs = Input::<u64>::new()
        .with_prompt("Broadcast interval (seconds)")
        .default(60)
        .interact_text()?;

    let auto_delete = Confirm::new()
        .with_prompt("Auto-delete sent messages?")
        .default(false)
        .interact()?;
    let delete_delay_secs = if auto_delete {
        Input::<u64>::new()
            .with_prompt("Delete delay (seconds)")
            .default(30)
            .interact_text()?
    } else {
        0
    };

    let config = AgentConfig {
        use_reply,
        use_ai_reply,
        use_file_reply,
        reply_threaded,
        language,
        read_delay_secs,
        reply_delay_secs,
        broadcast_interval_secs,
        auto_delete,
        delete_delay_secs,
    };
    config.validate()?;

    if chorus_infra::secret::resolve_credential(&name).is_none() {
        println!(
            "  {} '{}' is not set in the environment; the agent will be skipped at run time",
            style("!").yellow().bold(),
            style(&name).bold()
        );
    }

    let mut agents = state.store.load().await?;
    agents.insert(name.clone(), AgentEntry { channel_id, config });
    state.store.save(&agents).await?;

    println!(
        "  {} Agent '{}' saved to {}",
        style("✓").green().bold(),
        style(&name).bold(),
        state.store.path().display()
    );
    Ok(())
}

/// List configured agents.
pub async fn list_agents(state: &AppState, json: bool) -> Result<()> {
    let agents = state.store.load().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&agents)?);
        return Ok(());
    }

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

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("Credential").fg(Color::White),
        Cell::new("Channel").fg(Color::White),
        Cell::new("Mode").fg(Color::White),
        Cell::new("Strategy").fg(Color::White),
        Cell::new("Delays r/w/b").fg(Color::White),
        Cell::new("Auto-delete").fg(Color::White),
    ]);

    for (name, entry) in &agents {
        let config = &entry.config;
        let mode = if config.use_reply { "reply" } else { "broadcast" };
        let strategy = if config.use_file_reply {
            "corpus".to_string()
        } else if config.use_ai_reply {
            format!("ai ({})", config.language)
        } else {
            "corpus".to_string()
        };
        let delays = format!(
            "{}s/{}s/{}s",
            config.read_delay_secs, config.reply_delay_secs, config.broadcast_interval_secs
        );
        let auto_delete = if config.auto_delete {
            format!("after {}s", config.delete_delay_secs)
        } else {
            "off".to_string()
        };
        table.add_row(vec![
            name.clone(),
            entry.channel_id.clone(),
            mode.to_string(),
            strategy,
            delays,
            auto_delete,
        ]);
    }

    println!("{table}");
    Ok(())
}

/// Delete one agent entry, or the whole configuration when no name is given.
pub async fn delete_agent(state: &AppState, name: Option<&str>, force: bool) -> Result<()> {
    match name {
        Some(name) => {
            let confirmed = force
                || Confirm::new()
                    .with_prompt(format!("Delete configuration for '{name}'?"))
                    .default(false)
                    .interact()?;
            if !confirmed {
                println!("  aborted");
                return Ok(());
            }

            if state.store.remove(name).await? {
                println!(
                    "  {} Agent '{}' deleted",
                    style("✓").green().bold(),
                    style(name).bold()
                );
            } else {
                println!(
                    "  {} No agent named '{}'",
                    style("!").yellow().bold(),
                    style(name).bold()
                );
            }
        }
        None => {
            let confirmed = force
                || Confirm::new()
                    .with_prompt("Delete ALL agent configuration?")
                    .default(false)
                    .interact()?;
            if !confirmed {
                println!("  aborted");
                return Ok(());
            }

            state.store.clear().await?;
            println!(
                "  {} All agent configuration deleted",
                style("✓").green().bold()
            );
        }
    }

    Ok(())
}
