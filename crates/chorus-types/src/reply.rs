//! Reply generation results.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which strategy produced a reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReplySource {
    /// A line drawn from the corpus file.
    Corpus,
    /// Freshly generated by the AI completion service.
    Ai,
    /// The retry budget was exhausted on repeated AI text; the previous
    /// accepted text (or the fixed apology) was reused.
    Fallback,
}

impl fmt::Display for ReplySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReplySource::Corpus => write!(f, "corpus"),
            ReplySource::Ai => write!(f, "ai"),
            ReplySource::Fallback => write!(f, "fallback"),
        }
    }
}

/// The outcome of one reply-generation call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplyResult {
    /// The text to send.
    pub text: String,
    /// The strategy that produced it.
    pub source: ReplySource,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reply_source_display() {
        assert_eq!(ReplySource::Corpus.to_string(), "corpus");
        assert_eq!(ReplySource::Ai.to_string(), "ai");
        assert_eq!(ReplySource::Fallback.to_string(), "fallback");
    }
}
