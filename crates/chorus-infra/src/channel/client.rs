//! DiscordClient -- concrete [`ChannelClient`] implementation for the
//! Discord REST API.
//!
//! One instance per agent, carrying that agent's credential. The token is
//! wrapped in [`secrecy::SecretString`], only exposed when constructing the
//! authorization header, and never logged.

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};

use chorus_core::client::ChannelClient;
use chorus_types::error::ChannelError;
use chorus_types::message::ChannelMessage;

use super::types::{CreateMessage, CreatedMessage, DiscordMessage, DiscordUser, MessageReference};

/// Discord REST channel client.
pub struct DiscordClient {
    client: reqwest::Client,
    token: SecretString,
    base_url: String,
}

impl DiscordClient {
    /// Create a new client for one agent credential.
    pub fn new(token: SecretString) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("failed to create reqwest client");

        Self {
            client,
            token,
            base_url: "https://discord.com/api/v9".to_string(),
        }
    }

    /// Override the base URL (useful for testing or proxies).
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    /// Build the full API URL for a given path.
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

// DiscordClient intentionally does NOT derive Debug; the SecretString field
// keeps the token out of Debug output, and omitting Debug entirely avoids
// leaking it through wrappers.

impl ChannelClient for DiscordClient {
    async fn fetch_self_identity(&self) -> Result<String, ChannelError> {
        let response = self
            .client
            .get(self.url("/users/@me"))
            .header("Authorization", self.token.expose_secret())
            .send()
            .await
            .map_err(|e| ChannelError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ChannelError::Auth);
        }

        let user: DiscordUser = response
            .json()
            .await
            .map_err(|e| ChannelError::Network(format!("failed to parse identity: {e}")))?;
        Ok(user.id)
    }

    async fn fetch_recent_messages(
        &self,
        channel_id: &str,
    ) -> Result<Vec<ChannelMessage>, ChannelError> {
        let response = self
            .client
            .get(self.url(&format!("/channels/{channel_id}/messages")))
            .header("Authorization", self.token.expose_secret())
            .send()
            .await
            .map_err(|e| ChannelError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ChannelError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let messages: Vec<DiscordMessage> = response
            .json()
            .await
            .map_err(|e| ChannelError::Network(format!("failed to parse messages: {e}")))?;
        Ok(messages.into_iter().map(ChannelMessage::from).collect())
    }

    async fn post_message(
        &self,
        channel_id: &str,
        text: &str,
        reply_to: Option<&str>,
    ) -> Result<String, ChannelError> {
        let payload = CreateMessage {
            content: text,
            message_reference: reply_to.map(|message_id| MessageReference { message_id }),
        };

        let response = self
            .client
            .post(self.url(&format!("/channels/{channel_id}/messages")))
            .header("Authorization", self.token.expose_secret())
            .json(&payload)
            .send()
            .await
            .map_err(|e| ChannelError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ChannelError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let created: CreatedMessage = response
            .json()
            .await
            .map_err(|e| ChannelError::Network(format!("failed to parse send result: {e}")))?;
        Ok(created.id)
    }

    async fn delete_message(&self, channel_id: &str, message_id: &str) -> Result<(), ChannelError> {
        let response = self
            .client
            .delete(self.url(&format!("/channels/{channel_id}/messages/{message_id}")))
            .header("Authorization", self.token.expose_secret())
            .send()
            .await
            .map_err(|e| ChannelError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ChannelError::Api {
                status: status.as_u16(),
                message: body,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_client() -> DiscordClient {
        DiscordClient::new(SecretString::from("test-token-not-real"))
    }

    #[test]
    fn test_default_base_url() {
        let client = make_client();
        assert_eq!(
            client.url("/users/@me"),
            "https://discord.com/api/v9/users/@me"
        );
    }

    #[test]
    fn test_base_url_override() {
        let client = make_client().with_base_url("http://localhost:8080".to_string());
        assert_eq!(
            client.url("/channels/555/messages"),
            "http://localhost:8080/channels/555/messages"
        );
    }
}
