//! The per-agent worker: poll, decide, reply, optionally delete later.
//!
//! A worker owns one agent's full lifecycle. In reply mode it polls the
//! channel, filters out self-authored and system messages, deduplicates
//! against its cursor, generates a reply, and sends it (optionally
//! scheduling a detached delayed delete). In broadcast mode it sends corpus
//! lines on a fixed interval with no incoming-message awareness.
//!
//! Cancellation is checked at every suspension point -- fetches, sends, and
//! all sleeps -- so the whole fleet shuts down deterministically.

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use chorus_types::agent::AgentConfig;
use chorus_types::error::ChannelError;
use chorus_types::message::{ChannelCursor, ChannelMessage, REPLY_REMOVED_KIND};

use crate::client::{ChannelClient, CompletionClient};
use crate::generate::{APOLOGY_REPLY, ReplyGenerator};
use crate::identity::IdentityRegistry;

/// One agent's polling-and-reply engine.
///
/// All mutable state (cursor, generator) is owned by the worker; the only
/// shared structure is the read-mostly [`IdentityRegistry`].
pub struct AgentWorker<C, A> {
    name: String,
    channel_id: String,
    config: AgentConfig,
    client: Arc<C>,
    generator: ReplyGenerator<A>,
    identities: IdentityRegistry,
    cursor: ChannelCursor,
    cancel: CancellationToken,
}

impl<C: ChannelClient, A: CompletionClient> AgentWorker<C, A> {
    pub fn new(
        name: String,
        channel_id: String,
        config: AgentConfig,
        client: Arc<C>,
        generator: ReplyGenerator<A>,
        identities: IdentityRegistry,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            name,
            channel_id,
            config,
            client,
            generator,
            identities,
            cursor: ChannelCursor::new(),
            cancel,
        }
    }

    /// Run the worker to termination.
    ///
    /// Resolves the agent's own identity once; any failure there terminates
    /// the worker without retry. Afterwards the worker loops until
    /// cancelled.
    pub async fn run(mut self) -> Result<(), ChannelError> {
        let user_id = match self.client.fetch_self_identity().await {
            Ok(id) => id,
            Err(err) => {
                tracing::error!(
                    agent = %self.name,
                    error = %err,
                    "failed to resolve own identity, terminating"
                );
                return Err(err);
            }
        };
        tracing::info!(agent = %self.name, %user_id, channel = %self.channel_id, "agent online");
        self.identities.register(user_id);

        if self.config.use_reply {
            self.reply_loop().await;
        } else {
            self.broadcast_loop().await;
        }

        tracing::info!(agent = %self.name, "agent stopped");
        Ok(())
    }

    async fn reply_loop(&mut self) {
        loop {
            let fetched = tokio::select! {
                _ = self.cancel.cancelled() => break,
                res = self.client.fetch_recent_messages(&self.channel_id) => res,
            };

            match fetched {
                Ok(messages) => {
                    // Latest-only semantics: older unseen messages are
                    // intentionally skipped.
                    if let Some(latest) = messages.first() {
                        if self.should_reply(latest) {
                            let latest = latest.clone();
                            self.reply_to(&latest).await;
                        }
                    }
                }
                Err(err) => {
                    tracing::warn!(agent = %self.name, error = %err, "failed to fetch messages");
                }
            }

            if self.pause(self.config.read_delay_secs).await {
                break;
            }
        }
    }

    /// A message is a prompt iff it is strictly newer than the cursor, not
    /// authored by any of our agents, and not a system notice.
    fn should_reply(&self, message: &ChannelMessage) -> bool {
        self.cursor.is_newer(&message.id)
            && !self.identities.contains(&message.author_id)
            && message.kind != REPLY_REMOVED_KIND
    }

    async fn reply_to(&mut self, message: &ChannelMessage) {
        tracing::info!(
            agent = %self.name,
            message_id = %message.id,
            "received message: {}",
            message.content
        );

        // Simulated typing latency.
        if self.pause(self.config.reply_delay_secs).await {
            return;
        }

        let text = match self.generator.generate(&message.content).await {
            Ok(reply) => {
                tracing::debug!(agent = %self.name, source = %reply.source, "reply generated");
                reply.text
            }
            Err(err) => {
                tracing::warn!(agent = %self.name, error = %err, "no reply produced, sending apology");
                APOLOGY_REPLY.to_string()
            }
        };

        let reply_to = self.config.reply_threaded.then(|| message.id.as_str());
        let sent = tokio::select! {
            _ = self.cancel.cancelled() => return,
            res = self.client.post_message(&self.channel_id, &text, reply_to) => res,
        };
        match sent {
            Ok(sent_id) => {
                tracing::info!(agent = %self.name, %sent_id, "sent reply: {text}");
                if self.config.auto_delete {
                    self.schedule_delete(sent_id);
                }
            }
            Err(err) => {
                tracing::warn!(agent = %self.name, error = %err, "failed to send reply");
            }
        }

        // Advance even when the send failed, so a message is attempted at
        // most once.
        self.cursor.advance(&message.id);
    }

    /// Fire-and-forget delayed deletion of one of our own sent messages.
    /// The task owns only the client handle and the message id; it never
    /// blocks the worker.
    fn schedule_delete(&self, message_id: String) {
        let client = Arc::clone(&self.client);
        let channel_id = self.channel_id.clone();
        let agent = self.name.clone();
        let delay = Duration::from_secs(self.config.delete_delay_secs);

        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            match client.delete_message(&channel_id, &message_id).await {
                Ok(()) => tracing::debug!(%agent, %message_id, "deleted own message"),
                Err(err) => {
                    tracing::warn!(%agent, %message_id, error = %err, "failed to delete message");
                }
            }
        });
    }

    async fn broadcast_loop(&mut self) {
        loop {
            if self.cancel.is_cancelled() {
                break;
            }

            let text = self.generator.corpus_reply().text;
            let sent = tokio::select! {
                _ = self.cancel.cancelled() => break,
                res = self.client.post_message(&self.channel_id, &text, None) => res,
            };
            match sent {
                Ok(sent_id) => {
                    tracing::info!(agent = %self.name, %sent_id, "broadcast sent: {text}");
                    if self.config.auto_delete {
                        self.schedule_delete(sent_id);
                    }
                }
                Err(err) => {
                    tracing::warn!(agent = %self.name, error = %err, "failed to broadcast");
                }
            }

            if self.pause(self.config.broadcast_interval_secs).await {
                break;
            }
        }
    }

    /// Sleep `secs` unless cancelled first. Returns true when cancelled.
    async fn pause(&self, secs: u64) -> bool {
        tokio::select! {
            _ = self.cancel.cancelled() => true,
            _ = tokio::time::sleep(Duration::from_secs(secs)) => false,
        }
    }
}
