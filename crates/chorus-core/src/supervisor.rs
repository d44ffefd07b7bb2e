//! The supervisor: one worker task per configured agent.

use std::sync::Arc;

use secrecy::SecretString;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use chorus_types::agent::AgentsFile;
use chorus_types::error::ConfigError;

use crate::client::{ChannelClient, CompletionClient};
use crate::corpus::Corpus;
use crate::generate::ReplyGenerator;
use crate::identity::IdentityRegistry;
use crate::worker::AgentWorker;

/// Builds and runs one [`AgentWorker`] per configured agent, then blocks
/// until all of them terminate -- in practice only on init failure or
/// cancellation, since the worker loops are otherwise endless.
pub struct Supervisor<A> {
    corpus: Arc<Corpus>,
    completion: Option<Arc<A>>,
    cancel: CancellationToken,
}

impl<A: CompletionClient> Supervisor<A> {
    pub fn new(
        corpus: Arc<Corpus>,
        completion: Option<Arc<A>>,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            corpus,
            completion,
            cancel,
        }
    }

    /// Validate every configured agent, then start and await the fleet.
    ///
    /// Configuration problems are rejected before any worker starts. Agents
    /// whose credential cannot be resolved are skipped with a warning; the
    /// rest are unaffected. Returns the number of workers started.
    pub async fn run<C, R, F>(
        &self,
        agents: &AgentsFile,
        resolve_credential: R,
        make_client: F,
    ) -> Result<usize, ConfigError>
    where
        C: ChannelClient,
        R: Fn(&str) -> Option<SecretString>,
        F: Fn(SecretString) -> C,
    {
        for (name, entry) in agents {
            entry
                .config
                .validate()
                .map_err(|err| ConfigError::InvalidAgent {
                    name: name.clone(),
                    reason: err.to_string(),
                })?;
        }

        let identities = IdentityRegistry::new();
        let mut workers = JoinSet::new();

        for (name, entry) in agents {
            let Some(credential) = resolve_credential(name) else {
                tracing::warn!(agent = %name, "credential not found in environment, skipping");
                continue;
            };

            let client = Arc::new(make_client(credential));
            let generator = ReplyGenerator::new(
                entry.config.clone(),
                Arc::clone(&self.corpus),
                self.completion.clone(),
            );
            let worker = AgentWorker::new(
                name.clone(),
                entry.channel_id.clone(),
                entry.config.clone(),
                client,
                generator,
                identities.clone(),
                self.cancel.child_token(),
            );

            let mode = if entry.config.use_reply { "reply" } else { "broadcast" };
            tracing::info!(agent = %name, mode, channel = %entry.channel_id, "starting agent");
            workers.spawn(worker.run());
        }

        let started = workers.len();
        if started == 0 {
            tracing::warn!("no agents could be started");
        }

        while let Some(joined) = workers.join_next().await {
            match joined {
                // Worker outcomes (including init failures) are logged at
                // the worker; nothing to escalate here.
                Ok(_) => {}
                Err(err) => tracing::error!(error = %err, "worker task panicked"),
            }
        }

        Ok(started)
    }
}
