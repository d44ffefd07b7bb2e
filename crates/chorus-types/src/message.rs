//! Channel message shapes and the per-agent dedup cursor.

use serde::{Deserialize, Serialize};

/// Platform type code for system "reply removed" notices. These are not
/// user prompts and must never trigger a reply.
pub const REPLY_REMOVED_KIND: u8 = 8;

/// A message observed in a channel. Transient -- read from a fetch result
/// and never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelMessage {
    /// Platform message id (an unsigned integer encoded as a string).
    pub id: String,
    /// Id of the user that authored the message.
    pub author_id: String,
    /// Message text.
    pub content: String,
    /// Platform message type code.
    pub kind: u8,
}

/// The last message id an agent has acted upon.
///
/// Advances only (never rewinds) except through [`ChannelCursor::reset`].
/// Message ids are compared numerically, not lexicographically: "100" is
/// newer than "99".
#[derive(Debug, Clone, Default)]
pub struct ChannelCursor {
    last_seen: Option<String>,
}

impl ChannelCursor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_seen(&self) -> Option<&str> {
        self.last_seen.as_deref()
    }

    /// Whether `id` is strictly newer than the last seen message id.
    ///
    /// An unset cursor considers every well-formed id newer. Ids that do not
    /// parse as u64 are treated as not newer; the platform guarantees
    /// integer ids, so this only guards against malformed payloads.
    pub fn is_newer(&self, id: &str) -> bool {
        let Ok(incoming) = id.parse::<u64>() else {
            return false;
        };
        match self.last_seen.as_deref().and_then(|s| s.parse::<u64>().ok()) {
            Some(seen) => incoming > seen,
            None => true,
        }
    }

    /// Advance the cursor to `id`. No-op unless `id` is strictly newer.
    pub fn advance(&mut self, id: &str) {
        if self.is_newer(id) {
            self.last_seen = Some(id.to_string());
        }
    }

    /// Forget the last seen message id.
    pub fn reset(&mut self) {
        self.last_seen = None;
    }
}
