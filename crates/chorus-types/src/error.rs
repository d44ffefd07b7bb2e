use thiserror::Error;

/// Errors from messaging platform operations.
#[derive(Debug, Error)]
pub enum ChannelError {
    /// The platform rejected our credential. Fatal to the owning worker;
    /// a bad credential will not self-heal, so it is never retried.
    #[error("authentication rejected by the platform")]
    Auth,

    /// The request never produced a usable response. Transient; the worker
    /// sleeps its read delay and retries.
    #[error("network error: {0}")]
    Network(String),

    /// The platform answered with an unexpected status.
    #[error("unexpected response (HTTP {status}): {message}")]
    Api { status: u16, message: String },
}

/// Errors from the AI completion service.
#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("network error: {0}")]
    Network(String),

    #[error("completion service error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    #[error("malformed completion response: {0}")]
    MalformedResponse(String),
}

/// Errors raised while building or loading agent configuration. Rejected
/// before any worker starts.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("auto_delete requires delete_delay_secs greater than zero")]
    MissingDeleteDelay,

    #[error("agent '{name}': {reason}")]
    InvalidAgent { name: String, reason: String },

    #[error("failed to read agents file: {0}")]
    Io(String),

    #[error("malformed agents file: {0}")]
    Parse(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_error_display() {
        let err = ChannelError::Api {
            status: 429,
            message: "rate limited".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "unexpected response (HTTP 429): rate limited"
        );
    }

    #[test]
    fn test_completion_error_display() {
        let err = CompletionError::MalformedResponse("no candidates".to_string());
        assert!(err.to_string().contains("no candidates"));
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::InvalidAgent {
            name: "DISCORD_TOKEN_1".to_string(),
            reason: "auto_delete requires delete_delay_secs greater than zero".to_string(),
        };
        assert!(err.to_string().contains("DISCORD_TOKEN_1"));
        assert!(err.to_string().contains("delete_delay_secs"));
    }
}
