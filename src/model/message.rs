use serde::{Deserialize, Serialize};

/// Message envelope accepted by a chat incoming webhook.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub channel: String,
    pub username: String,
    pub icon_emoji: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Attachment {
    pub fallback: String,
    pub color: String,
    pub pretext: String,
    pub author_name: String,
    pub title: String,
    pub title_link: String,
    pub text: String,
    pub ts: i64,
}

/// `ghost` or `:ghost:` becomes `:ghost:`; empty stays empty.
pub fn icon_emoji(emoji: &str) -> String {
    let name = emoji.trim().trim_matches(':');
    if name.is_empty() {
        String::new()
    } else {
        format!(":{name}:")
    }
}

impl Message {
    pub fn to_json(&self) -> serde_json::Result<Vec<u8>> {
        serde_json::to_vec(self)
    }
}
