use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

use super::Delivery;
use crate::model::message::{icon_emoji, Message};
use crate::review::Report;

/// Posts reports to a chat incoming webhook.
pub struct SlackWebhook {
    webhook_url: SecretString,
    channel: String,
    username: String,
    icon_emoji: String,
    client: reqwest::Client,
}

impl SlackWebhook {
    pub fn new(webhook_url: SecretString) -> Self {
        Self {
            webhook_url,
            channel: String::new(),
            username: String::new(),
            icon_emoji: String::new(),
            client: reqwest::Client::new(),
        }
    }

    /// Envelope used when a plain-text report has to be wrapped into a message.
    pub fn with_identity(mut self, channel: &str, username: &str, emoji: &str) -> Self {
        self.channel = channel.to_string();
        self.username = username.to_string();
        self.icon_emoji = icon_emoji(emoji);
        self
    }

    fn envelope(&self, report: &Report) -> Message {
        match report {
            Report::Message(msg) => msg.clone(),
            Report::Text(text) => Message {
                channel: self.channel.clone(),
                username: self.username.clone(),
                icon_emoji: self.icon_emoji.clone(),
                text: Some(text.clone()),
                attachments: Vec::new(),
            },
        }
    }

    pub async fn send(&self, msg: &Message) -> Result<()> {
        let payload = msg.to_json().context("Failed to encode webhook message")?;

        let resp = self
            .client
            .post(self.webhook_url.expose_secret())
            .header("content-type", "application/json")
            .body(payload)
            .send()
            .await
            .context("Webhook request failed")?;

        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        if !status.is_success() {
            bail!("slack responded with status {}: {body}", status.as_u16());
        }
        debug!(status = status.as_u16(), "webhook accepted message");
        Ok(())
    }
}

#[async_trait]
impl Delivery for SlackWebhook {
    fn name(&self) -> &str {
        "slack"
    }

    async fn deliver(&self, report: &Report) -> Result<()> {
        self.send(&self.envelope(report)).await
    }
}
