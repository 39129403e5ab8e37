//! Runtime configuration parsed from environment variables.
//!
//! Only the native build reads the environment; the browser build uses
//! [`PortalConfig::default`].

use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_DATA_DIR: &str = "./portal-data";
pub const DEFAULT_WEBHOOK_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_WEBHOOK_CONNECT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_MESSAGE_VISIBLE_MS: u64 = 3000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortalConfig {
    /// Directory holding one JSON file per storage key.
    pub data_dir: PathBuf,
    pub webhook: WebhookTimeouts,
    /// How long a feedback message stays on screen before fading out.
    pub message_visible_ms: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WebhookTimeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

impl WebhookTimeouts {
    #[must_use]
    pub fn request(&self) -> Duration {
        Duration::from_secs(self.request_secs)
    }

    #[must_use]
    pub fn connect(&self) -> Duration {
        Duration::from_secs(self.connect_secs)
    }
}

impl Default for WebhookTimeouts {
    fn default() -> Self {
        Self { request_secs: DEFAULT_WEBHOOK_TIMEOUT_SECS, connect_secs: DEFAULT_WEBHOOK_CONNECT_TIMEOUT_SECS }
    }
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            webhook: WebhookTimeouts::default(),
            message_visible_ms: DEFAULT_MESSAGE_VISIBLE_MS,
        }
    }
}

impl PortalConfig {
    /// Build typed config from environment variables.
    ///
    /// - `PORTAL_DATA_DIR`: default `./portal-data`
    /// - `PORTAL_WEBHOOK_TIMEOUT_SECS`: default 30
    /// - `PORTAL_WEBHOOK_CONNECT_TIMEOUT_SECS`: default 10
    /// - `PORTAL_MESSAGE_VISIBLE_MS`: default 3000
    ///
    /// Absent or unparseable values fall back to their defaults.
    #[must_use]
    pub fn from_env() -> Self {
        let data_dir = std::env::var("PORTAL_DATA_DIR")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .map_or_else(|| PathBuf::from(DEFAULT_DATA_DIR), PathBuf::from);
        Self {
            data_dir,
            webhook: WebhookTimeouts {
                request_secs: env_parse("PORTAL_WEBHOOK_TIMEOUT_SECS", DEFAULT_WEBHOOK_TIMEOUT_SECS),
                connect_secs: env_parse("PORTAL_WEBHOOK_CONNECT_TIMEOUT_SECS", DEFAULT_WEBHOOK_CONNECT_TIMEOUT_SECS),
            },
            message_visible_ms: env_parse("PORTAL_MESSAGE_VISIBLE_MS", DEFAULT_MESSAGE_VISIBLE_MS),
        }
    }
}

pub(crate) fn env_parse<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr + Copy,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse::<T>().ok())
        .unwrap_or(default)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
