use anyhow::{bail, Context, Result};
use secrecy::SecretString;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::secrets::SecretEncoding;

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub trello: TrelloConfig,
    pub slack: SlackConfig,
    pub report: ReportConfig,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct TrelloConfig {
    pub api_key: Option<SecretString>,
    pub token: Option<SecretString>,
    pub member: Option<SecretString>,
    pub board: Option<String>,
    pub list: Option<String>,
    pub with_labels: Option<bool>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct SlackConfig {
    pub webhook_url: Option<SecretString>,
    pub channel: Option<String>,
    pub username: Option<String>,
    pub emoji: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct ReportConfig {
    pub format: Option<ReportFormat>,
    pub output: Option<OutputTarget>,
    pub secret_encoding: Option<SecretEncoding>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Template,
    Attachments,
}

impl ReportFormat {
    pub fn parse(value: &str) -> Result<Self> {
        match value.trim().to_lowercase().as_str() {
            "template" => Ok(Self::Template),
            "attachments" => Ok(Self::Attachments),
            other => bail!("Unknown report format '{other}' (expected template or attachments)"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputTarget {
    #[default]
    Console,
    Slack,
}

impl OutputTarget {
    pub fn parse(value: &str) -> Result<Self> {
        match value.trim().to_lowercase().as_str() {
            "console" => Ok(Self::Console),
            "slack" => Ok(Self::Slack),
            other => bail!("Unknown output '{other}' (expected console or slack)"),
        }
    }
}

/// Fully resolved settings for one run. Secrets are already plaintext.
#[derive(Debug)]
pub struct Settings {
    pub trello: TrelloSettings,
    pub slack: SlackSettings,
    pub format: ReportFormat,
    pub output: OutputTarget,
}

#[derive(Debug)]
pub struct TrelloSettings {
    pub api_key: SecretString,
    pub token: SecretString,
    pub member: SecretString,
    pub board: String,
    pub list: String,
    pub with_labels: bool,
}

/// Chat settings. `webhook_url` is only guaranteed when output is slack.
#[derive(Debug, Default)]
pub struct SlackSettings {
    pub webhook_url: Option<SecretString>,
    pub channel: String,
    pub username: String,
    pub emoji: String,
}

pub fn config_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".weekly-review")
        .join("config.toml")
}

/// Load the config file. A missing default file yields an empty config; an
/// explicitly requested file must exist.
pub fn load_config(path: Option<&Path>) -> Result<AppConfig> {
    let (path, explicit) = match path {
        Some(p) => (p.to_path_buf(), true),
        None => (config_path(), false),
    };
    if !path.exists() {
        if explicit {
            bail!("Config file {} does not exist", path.display());
        }
        return Ok(AppConfig::default());
    }
    let contents = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config from {}", path.display()))?;
    let config: AppConfig = toml::from_str(&contents)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    Ok(config)
}

impl AppConfig {
    /// Overlay environment variables on top of the file values.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(v) = get("TRELLO_APP_KEY") {
            self.trello.api_key = Some(SecretString::from(v));
        }
        if let Some(v) = get("TRELLO_APP_TOKEN") {
            self.trello.token = Some(SecretString::from(v));
        }
        if let Some(v) = get("TRELLO_MEMBER_NAME") {
            self.trello.member = Some(SecretString::from(v));
        }
        if let Some(v) = get("TRELLO_BOARD") {
            self.trello.board = Some(v);
        }
        if let Some(v) = get("TRELLO_LIST") {
            self.trello.list = Some(v);
        }
        if let Some(v) = get("SLACK_WEBHOOK_URL") {
            self.slack.webhook_url = Some(SecretString::from(v));
        }
        if let Some(v) = get("SLACK_CHANNEL") {
            self.slack.channel = Some(v);
        }
        if let Some(v) = get("SLACK_USER") {
            self.slack.username = Some(v);
        }
        if let Some(v) = get("SLACK_EMOJI") {
            self.slack.emoji = Some(v);
        }
        if let Some(v) = get("WEEKLY_REVIEW_FORMAT") {
            self.report.format = Some(ReportFormat::parse(&v)?);
        }
        if let Some(v) = get("WEEKLY_REVIEW_OUTPUT") {
            self.report.output = Some(OutputTarget::parse(&v)?);
        }
        if let Some(v) = get("WEEKLY_REVIEW_SECRET_ENCODING") {
            self.report.secret_encoding = Some(SecretEncoding::parse(&v)?);
        }
        Ok(())
    }

    /// Check required keys and decode secrets. Every missing key is reported at once.
    pub fn resolve(self) -> Result<Settings> {
        let output = self.report.output.unwrap_or_default();
        let format = self.report.format.unwrap_or_default();

        let mut missing: Vec<&str> = Vec::new();
        let mut require = |present: bool, key: &'static str| {
            if !present {
                missing.push(key);
            }
        };
        let t = &self.trello;
        require(t.api_key.is_some(), "trello.api_key (TRELLO_APP_KEY)");
        require(t.token.is_some(), "trello.token (TRELLO_APP_TOKEN)");
        require(t.member.is_some(), "trello.member (TRELLO_MEMBER_NAME)");
        require(t.board.is_some(), "trello.board (TRELLO_BOARD)");
        require(t.list.is_some(), "trello.list (TRELLO_LIST)");
        if output == OutputTarget::Slack {
            let s = &self.slack;
            require(s.webhook_url.is_some(), "slack.webhook_url (SLACK_WEBHOOK_URL)");
            require(s.channel.is_some(), "slack.channel (SLACK_CHANNEL)");
            require(s.username.is_some(), "slack.username (SLACK_USER)");
            require(s.emoji.is_some(), "slack.emoji (SLACK_EMOJI)");
        }
        if !missing.is_empty() {
            bail!("Missing required configuration: {}", missing.join(", "));
        }

        let resolver = self.report.secret_encoding.unwrap_or_default().resolver();
        let decode = |value: Option<SecretString>, key: &str| -> Result<Option<SecretString>> {
            value
                .map(|v| resolver.resolve(&v).with_context(|| format!("Failed to resolve {key}")))
                .transpose()
        };

        let TrelloConfig {
            api_key,
            token,
            member,
            board,
            list,
            with_labels,
        } = self.trello;

        let trello = TrelloSettings {
            api_key: decode(api_key, "trello.api_key")?.context("trello.api_key")?,
            token: decode(token, "trello.token")?.context("trello.token")?,
            member: decode(member, "trello.member")?.context("trello.member")?,
            board: board.unwrap_or_default(),
            list: list.unwrap_or_default(),
            with_labels: with_labels.unwrap_or(true),
        };

        let slack = SlackSettings {
            webhook_url: decode(self.slack.webhook_url, "slack.webhook_url")?,
            channel: self.slack.channel.unwrap_or_default(),
            username: self.slack.username.unwrap_or_default(),
            emoji: self.slack.emoji.unwrap_or_default(),
        };

        Ok(Settings {
            trello,
            slack,
            format,
            output,
        })
    }
}
