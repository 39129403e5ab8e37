//! Site-wide settings: theme, webhooks, groups, permissions, fines and users.
//!
//! DESIGN
//! ======
//! The stored document keeps the camelCase field names page scripts have
//! always written. Loading is a fixed pipeline over the raw JSON:
//! parse → [`migrate`] → [`merge::fill_missing`] against the defaults →
//! typed decode → invariants. Nothing in the pipeline writes back; callers
//! persist explicitly through [`crate::Store::save_settings`].
//!
//! ERROR HANDLING
//! ==============
//! A missing, corrupt or undecodable document yields [`Settings::default`]
//! with a `warn` log. Individually malformed users, fines or permission
//! entries are dropped with a `warn` instead of discarding the document.

pub mod defaults;
pub mod merge;
pub mod migrate;

#[cfg(test)]
#[path = "settings_test.rs"]
mod settings_test;

use std::collections::BTreeMap;
use std::fmt;

use serde::de::{DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};
use tracing::warn;

use crate::util::take_field;

use defaults::{ADMIN_GROUP, ADMIN_USERNAME};

/// Singleton configuration record stored under `websiteSettings`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub website_name: String,
    pub background_color: String,
    pub text_color: String,
    pub background_image_url: String,
    pub logo_image_url: String,
    pub theme_accent_color: String,
    /// Leave request notifications.
    pub webhook_url: String,
    pub registration_webhook_url: String,
    pub delivery_webhook_url: String,
    pub report_webhook_url: String,
    pub leave_types: Vec<String>,
    pub available_groups: Vec<String>,
    #[serde(deserialize_with = "lenient_map")]
    pub group_permissions: BTreeMap<String, Vec<String>>,
    #[serde(deserialize_with = "lenient_vec")]
    pub fine_list: Vec<FineType>,
    #[serde(deserialize_with = "lenient_map")]
    pub users: BTreeMap<String, User>,
    pub schema_version: u32,
    /// Keys this version does not know about, preserved across load/save.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Entry of the user directory, keyed by username.
///
/// Only string `password` and `group` values are lifted out of the stored
/// object. Anything else, including a legacy `role` or a non-string
/// password, stays in `extra` and is written back unchanged. An empty
/// password or group is written as an absent key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Map<String, Value>")]
pub struct User {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub password: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub group: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl User {
    pub fn new(password: impl Into<String>, group: impl Into<String>) -> Self {
        Self { password: password.into(), group: group.into(), extra: Map::new() }
    }
}

impl From<Map<String, Value>> for User {
    fn from(mut extra: Map<String, Value>) -> Self {
        Self {
            password: take_field(&mut extra, "password").unwrap_or_default(),
            group: take_field(&mut extra, "group").unwrap_or_default(),
            extra,
        }
    }
}

/// A fine that can be issued, looked up by exact name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FineType {
    pub name: String,
    /// Kept as the stored JSON number, integral or not.
    #[serde(deserialize_with = "lenient_amount")]
    pub amount: Number,
}

/// Which of the configured webhook URLs a notification goes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WebhookChannel {
    Leave,
    Registration,
    Delivery,
    Report,
}

impl WebhookChannel {
    pub const ALL: [Self; 4] = [Self::Leave, Self::Registration, Self::Delivery, Self::Report];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Leave => "leave",
            Self::Registration => "registration",
            Self::Delivery => "delivery",
            Self::Report => "report",
        }
    }
}

impl fmt::Display for WebhookChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for WebhookChannel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown webhook channel: {s}"))
    }
}

impl Settings {
    /// Run the load pipeline over a raw stored document (`None` = never saved).
    #[must_use]
    pub fn from_stored(raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            return Self::default();
        };
        let mut doc = match serde_json::from_str::<Value>(raw) {
            Ok(Value::Object(doc)) => doc,
            Ok(other) => {
                warn!(kind = json_kind(&other), "stored settings are not an object; using defaults");
                return Self::default();
            }
            Err(e) => {
                warn!(error = %e, "failed to parse stored settings; using defaults");
                return Self::default();
            }
        };

        migrate::migrate(&mut doc);

        let mut doc = Value::Object(doc);
        match serde_json::to_value(Self::default()) {
            Ok(mut template) => {
                // Existing users are never merged field by field; a missing
                // admin is added whole by `enforce_invariants`.
                if let Value::Object(fields) = &mut template {
                    fields.insert("users".to_owned(), Value::Object(Map::new()));
                }
                merge::fill_missing(&mut doc, &template);
            }
            Err(e) => warn!(error = %e, "failed to encode default settings template"),
        }

        let mut settings = match serde_json::from_value::<Self>(doc) {
            Ok(settings) => settings,
            Err(e) => {
                warn!(error = %e, "failed to decode stored settings; using defaults");
                return Self::default();
            }
        };
        settings.enforce_invariants();
        settings
    }

    /// Restore the invariants every reader relies on: non-empty group and
    /// fine lists, and an `admin` user, group and permission entry.
    pub fn enforce_invariants(&mut self) {
        if self.available_groups.is_empty() {
            self.available_groups = defaults::available_groups();
        }
        if !self.available_groups.iter().any(|g| g == ADMIN_GROUP) {
            self.available_groups.push(ADMIN_GROUP.to_owned());
        }
        if self.fine_list.is_empty() {
            self.fine_list = defaults::fine_list();
        }
        for (group, pages) in defaults::group_permissions() {
            self.group_permissions.entry(group).or_insert(pages);
        }
        self.users
            .entry(ADMIN_USERNAME.to_owned())
            .or_insert_with(defaults::admin_user);
    }

    /// Pages `group` may open, or `None` for an unknown group.
    #[must_use]
    pub fn allowed_pages(&self, group: &str) -> Option<&[String]> {
        self.group_permissions.get(group).map(Vec::as_slice)
    }

    /// Whether `group` may open `page`. Unknown groups may open nothing.
    #[must_use]
    pub fn check_page_permission(&self, group: &str, page: &str) -> bool {
        self.allowed_pages(group)
            .is_some_and(|pages| pages.iter().any(|p| p == page))
    }

    /// First fine whose name matches exactly.
    #[must_use]
    pub fn fine_details(&self, name: &str) -> Option<&FineType> {
        self.fine_list.iter().find(|fine| fine.name == name)
    }

    /// Configured URL for `channel`; empty strings count as not configured.
    #[must_use]
    pub fn webhook_url(&self, channel: WebhookChannel) -> Option<&str> {
        let url = match channel {
            WebhookChannel::Leave => &self.webhook_url,
            WebhookChannel::Registration => &self.registration_webhook_url,
            WebhookChannel::Delivery => &self.delivery_webhook_url,
            WebhookChannel::Report => &self.report_webhook_url,
        };
        let url = url.trim();
        (!url.is_empty()).then_some(url)
    }

    pub fn set_webhook_url(&mut self, channel: WebhookChannel, url: impl Into<String>) {
        let slot = match channel {
            WebhookChannel::Leave => &mut self.webhook_url,
            WebhookChannel::Registration => &mut self.registration_webhook_url,
            WebhookChannel::Delivery => &mut self.delivery_webhook_url,
            WebhookChannel::Report => &mut self.report_webhook_url,
        };
        *slot = url.into();
    }

    /// Look up `username` and compare the stored password verbatim. A user
    /// whose stored password is not a string never matches.
    #[must_use]
    pub fn verify_credentials(&self, username: &str, password: &str) -> Option<&User> {
        self.users
            .get(username)
            .filter(|user| !user.extra.contains_key("password") && user.password == password)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// =============================================================================
// LENIENT DECODING
// =============================================================================

fn lenient_map<'de, D, T>(deserializer: D) -> Result<BTreeMap<String, T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let raw = BTreeMap::<String, Value>::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .filter_map(|(key, value)| match serde_json::from_value(value) {
            Ok(item) => Some((key, item)),
            Err(e) => {
                warn!(%key, error = %e, "dropping malformed settings entry");
                None
            }
        })
        .collect())
}

fn lenient_vec<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let raw = Vec::<Value>::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| match serde_json::from_value(value) {
            Ok(item) => Some(item),
            Err(e) => {
                warn!(index, error = %e, "dropping malformed settings list item");
                None
            }
        })
        .collect())
}

/// Fine amounts typed into admin forms arrive as numbers or numeric strings.
fn lenient_amount<'de, D>(deserializer: D) -> Result<Number, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    match Value::deserialize(deserializer)? {
        Value::Number(n) => Ok(n),
        Value::String(s) => {
            let trimmed = s.trim();
            trimmed
                .parse::<i64>()
                .ok()
                .map(Number::from)
                .or_else(|| trimmed.parse::<f64>().ok().and_then(Number::from_f64))
                .ok_or_else(|| D::Error::custom(format!("fine amount {s:?} is not a number")))
        }
        other => Err(D::Error::custom(format!("fine amount must be a number, got {}", json_kind(&other)))),
    }
}
