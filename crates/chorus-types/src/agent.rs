//! Agent configuration types.
//!
//! An agents file (JSON) maps a credential name -- the environment variable
//! holding the agent's token -- to the channel it operates on and its
//! behavior configuration. All behavior fields have serde defaults so old
//! files keep loading as options are added.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Language used for AI-generated replies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// Indonesian (casual Jakarta register).
    Id,
    /// English (casual urban register).
    En,
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Language::Id => write!(f, "id"),
            Language::En => write!(f, "en"),
        }
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "id" => Ok(Language::Id),
            "en" => Ok(Language::En),
            other => Err(format!("invalid language: '{other}'")),
        }
    }
}

/// Behavior configuration for a single agent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Watch the channel and reply to new messages. When false the agent
    /// broadcasts corpus lines on `broadcast_interval_secs` instead.
    #[serde(default)]
    pub use_reply: bool,

    /// Generate reply text through the AI completion service.
    #[serde(default)]
    pub use_ai_reply: bool,

    /// Pick reply text from the corpus file. Takes precedence over
    /// `use_ai_reply`.
    #[serde(default)]
    pub use_file_reply: bool,

    /// Send replies as threaded replies referencing the prompt message.
    #[serde(default)]
    pub reply_threaded: bool,

    /// Language for AI-generated replies.
    #[serde(default = "default_language")]
    pub language: Language,

    /// Seconds between channel polls.
    #[serde(default = "default_read_delay")]
    pub read_delay_secs: u64,

    /// Seconds to wait before sending a reply (simulated typing latency).
    #[serde(default)]
    pub reply_delay_secs: u64,

    /// Seconds between broadcast sends (broadcast mode only).
    #[serde(default = "default_broadcast_interval")]
    pub broadcast_interval_secs: u64,

    /// Delete our own sent messages after `delete_delay_secs`.
    #[serde(default)]
    pub auto_delete: bool,

    /// Seconds to wait before deleting a sent message. Must be > 0 when
    /// `auto_delete` is set.
    #[serde(default)]
    pub delete_delay_secs: u64,
}

fn default_language() -> Language {
    Language::Id
}

fn default_read_delay() -> u64 {
    10
}

fn default_broadcast_interval() -> u64 {
    60
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            use_reply: false,
            use_ai_reply: false,
            use_file_reply: false,
            reply_threaded: false,
            language: default_language(),
            read_delay_secs: default_read_delay(),
            reply_delay_secs: 0,
            broadcast_interval_secs: default_broadcast_interval(),
            auto_delete: false,
            delete_delay_secs: 0,
        }
    }
}

impl AgentConfig {
    /// Validate the configuration before any worker is started.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.auto_delete && self.delete_delay_secs == 0 {
            return Err(ConfigError::MissingDeleteDelay);
        }
        Ok(())
    }
}

/// One configured agent: the channel it operates on plus its behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentEntry {
    /// The channel the agent polls and posts to.
    pub channel_id: String,
    /// Behavior configuration.
    pub config: AgentConfig,
}

/// The agents file: credential name -> agent entry.
///
/// `BTreeMap` keeps listing and on-disk ordering stable.
pub type AgentsFile = BTreeMap<String, AgentEntry>;
