//! Discord webhook message builders.
//!
//! Pages post leave, delivery and report notifications as embeds. Files go
//! out as multipart with the message JSON in the `payload_json` field.

#[cfg(test)]
#[path = "discord_test.rs"]
mod discord_test;

use serde::Serialize;

use super::payload::{FilePart, MultipartForm, WebhookPayload};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DiscordMessage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub embeds: Vec<Embed>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Embed {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<u32>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<EmbedField>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer: Option<EmbedFooter>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub inline: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmbedFooter {
    pub text: String,
}

impl DiscordMessage {
    #[must_use]
    pub fn text(content: impl Into<String>) -> Self {
        Self { content: Some(content.into()), ..Self::default() }
    }

    #[must_use]
    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    #[must_use]
    pub fn avatar_url(mut self, url: impl Into<String>) -> Self {
        self.avatar_url = Some(url.into());
        self
    }

    #[must_use]
    pub fn embed(mut self, embed: Embed) -> Self {
        self.embeds.push(embed);
        self
    }

    #[must_use]
    pub fn into_payload(self) -> WebhookPayload {
        WebhookPayload::Json(serde_json::to_value(&self).unwrap_or_default())
    }

    /// Multipart body carrying `files` as `files[i]` next to the message JSON.
    #[must_use]
    pub fn into_multipart(self, files: Vec<FilePart>) -> WebhookPayload {
        let json = serde_json::to_string(&self).unwrap_or_default();
        let form = files
            .into_iter()
            .enumerate()
            .fold(MultipartForm::new().text("payload_json", json), |form, (i, mut file)| {
                file.name = format!("files[{i}]");
                form.file(file)
            });
        WebhookPayload::Multipart(form)
    }
}

impl Embed {
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self { title: Some(title.into()), ..Self::default() }
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn color(mut self, color: u32) -> Self {
        self.color = Some(color);
        self
    }

    /// Use a CSS hex color such as the site's accent color; invalid input is ignored.
    #[must_use]
    pub fn color_hex(mut self, hex: &str) -> Self {
        if let Some(color) = parse_hex_color(hex) {
            self.color = Some(color);
        }
        self
    }

    #[must_use]
    pub fn field(mut self, name: impl Into<String>, value: impl Into<String>, inline: bool) -> Self {
        self.fields.push(EmbedField { name: name.into(), value: value.into(), inline });
        self
    }

    #[must_use]
    pub fn timestamp(mut self, rfc3339: impl Into<String>) -> Self {
        self.timestamp = Some(rfc3339.into());
        self
    }

    #[must_use]
    pub fn footer(mut self, text: impl Into<String>) -> Self {
        self.footer = Some(EmbedFooter { text: text.into() });
        self
    }
}

impl From<DiscordMessage> for WebhookPayload {
    fn from(message: DiscordMessage) -> Self {
        message.into_payload()
    }
}

/// `#rrggbb` or `#rgb` → `0xRRGGBB`.
#[must_use]
pub fn parse_hex_color(hex: &str) -> Option<u32> {
    let digits = hex.trim().strip_prefix('#')?;
    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    match digits.len() {
        6 => u32::from_str_radix(digits, 16).ok(),
        3 => {
            let expanded: String = digits.chars().flat_map(|c| [c, c]).collect();
            u32::from_str_radix(&expanded, 16).ok()
        }
        _ => None,
    }
}
