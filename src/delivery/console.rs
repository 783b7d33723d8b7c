use std::io::Write;
use std::sync::Mutex;

use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::info;

use super::Delivery;
use crate::model::message::Message;
use crate::review::Report;

/// Writes reports to a terminal or any other writer.
pub struct ConsoleDelivery<W> {
    out: Mutex<W>,
}

impl ConsoleDelivery<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write + Send> ConsoleDelivery<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out.into_inner().unwrap_or_else(|e| e.into_inner())
    }
}

pub fn format_message(msg: &Message) -> String {
    let mut blocks = Vec::new();
    if let Some(text) = &msg.text {
        blocks.push(text.trim_end().to_string());
    }
    for attachment in &msg.attachments {
        if attachment.text.is_empty() {
            blocks.push(attachment.title.clone());
        } else {
            blocks.push(format!("{}\n{}", attachment.title, attachment.text));
        }
    }
    let mut out = blocks.join("\n\n");
    out.push('\n');
    out
}

#[async_trait]
impl<W: Write + Send + 'static> Delivery for ConsoleDelivery<W> {
    fn name(&self) -> &str {
        "console"
    }

    async fn deliver(&self, report: &Report) -> Result<()> {
        let rendered = match report {
            Report::Text(text) => text.clone(),
            Report::Message(msg) => format_message(msg),
        };

        {
            let mut out = self
                .out
                .lock()
                .map_err(|_| anyhow::anyhow!("Console writer lock poisoned"))?;
            out.write_all(rendered.as_bytes())
                .and_then(|_| out.flush())
                .context("Failed to write report")?;
        }

        info!(bytes = rendered.len(), "report written to console");
        Ok(())
    }
}
