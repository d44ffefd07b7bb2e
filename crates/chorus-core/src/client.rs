//! Client trait definitions.
//!
//! These are the core abstractions over the messaging platform and the AI
//! completion service. Uses native async fn in traits (RPITIT, Rust 2024
//! edition); implementations live in chorus-infra.

use chorus_types::error::{ChannelError, CompletionError};
use chorus_types::message::ChannelMessage;

/// Messaging platform operations used by agent workers.
///
/// One client instance carries one agent's credential; workers share their
/// instance with detached deletion tasks through an `Arc`.
pub trait ChannelClient: Send + Sync + 'static {
    /// Resolve the calling agent's own user id.
    ///
    /// Callers must abort the worker on failure -- a bad credential will
    /// not self-heal.
    fn fetch_self_identity(
        &self,
    ) -> impl std::future::Future<Output = Result<String, ChannelError>> + Send;

    /// Fetch recent messages in `channel_id`, most recent first, at the
    /// platform's page size.
    fn fetch_recent_messages(
        &self,
        channel_id: &str,
    ) -> impl std::future::Future<Output = Result<Vec<ChannelMessage>, ChannelError>> + Send;

    /// Post `text` to `channel_id`, threaded onto `reply_to` when present.
    /// Returns the sent message id.
    fn post_message(
        &self,
        channel_id: &str,
        text: &str,
        reply_to: Option<&str>,
    ) -> impl std::future::Future<Output = Result<String, ChannelError>> + Send;

    /// Delete a message. Best-effort at every call site: failures are
    /// logged, never escalated.
    fn delete_message(
        &self,
        channel_id: &str,
        message_id: &str,
    ) -> impl std::future::Future<Output = Result<(), ChannelError>> + Send;
}

/// One-shot prompt-to-text completion service.
pub trait CompletionClient: Send + Sync + 'static {
    fn complete(
        &self,
        prompt: &str,
    ) -> impl std::future::Future<Output = Result<String, CompletionError>> + Send;
}
