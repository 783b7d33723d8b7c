use anyhow::{Context, Result};
use tracing::info;

use crate::config::{OutputTarget, ReportFormat, Settings};
use crate::delivery::console::ConsoleDelivery;
use crate::delivery::slack::SlackWebhook;
use crate::delivery::Delivery;
use crate::providers::trello::TrelloSource;
use crate::providers::{CardQuery, CardSource};
use crate::review::{AttachmentStyle, ReportStyle, TemplateStyle};

/// One trigger-to-completion run: fetch, render, deliver.
pub struct ReviewJob {
    source: Box<dyn CardSource>,
    style: Box<dyn ReportStyle>,
    delivery: Box<dyn Delivery>,
    query: CardQuery,
}

impl ReviewJob {
    pub fn new(
        source: Box<dyn CardSource>,
        style: Box<dyn ReportStyle>,
        delivery: Box<dyn Delivery>,
        query: CardQuery,
    ) -> Self {
        Self {
            source,
            style,
            delivery,
            query,
        }
    }

    pub fn from_settings(settings: Settings) -> Result<Self> {
        let Settings {
            trello,
            slack,
            format,
            output,
        } = settings;

        let style: Box<dyn ReportStyle> = match format {
            ReportFormat::Template => Box::new(TemplateStyle),
            ReportFormat::Attachments => Box::new(AttachmentStyle {
                list: trello.list.clone(),
                channel: slack.channel.clone(),
                username: slack.username.clone(),
                emoji: slack.emoji.clone(),
            }),
        };

        let delivery: Box<dyn Delivery> = match output {
            OutputTarget::Console => Box::new(ConsoleDelivery::stdout()),
            OutputTarget::Slack => {
                let url = slack
                    .webhook_url
                    .context("slack.webhook_url is required for slack output")?;
                Box::new(SlackWebhook::new(url).with_identity(
                    &slack.channel,
                    &slack.username,
                    &slack.emoji,
                ))
            }
        };

        let query = CardQuery {
            board: trello.board,
            list: trello.list,
            with_labels: trello.with_labels,
        };
        let source = Box::new(TrelloSource::new(trello.api_key, trello.token, trello.member));

        Ok(Self::new(source, style, delivery, query))
    }

    pub async fn run(&self) -> Result<()> {
        info!(
            source = self.source.name(),
            board = %self.query.board,
            list = %self.query.list,
            "fetching cards"
        );
        let cards = self.source.fetch_cards(&self.query).await?;
        info!(cards = cards.len(), "fetched cards");

        let report = self.style.render(cards)?;
        info!(style = self.style.name(), "rendered report");

        self.delivery
            .deliver(&report)
            .await
            .with_context(|| format!("Failed to deliver report via {}", self.delivery.name()))?;
        info!(delivery = self.delivery.name(), "report delivered");
        Ok(())
    }
}
