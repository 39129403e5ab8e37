//! Outbound webhook notifications (Discord-style endpoints).
//!
//! DESIGN
//! ======
//! One POST per call, no retry. Hydrate builds go through `gloo-net`
//! (browser `fetch`); native builds use `reqwest` with the configured
//! timeouts.
//!
//! ERROR HANDLING
//! ==============
//! A non-2xx response becomes [`WebhookError::Status`] carrying the status
//! and response body; transport failures become [`WebhookError::Request`].
//! Every failure is logged at `error` and then returned to the caller, which
//! decides whether to tell the user.

pub mod discord;
pub mod payload;

#[cfg(test)]
#[path = "webhook_test.rs"]
mod webhook_test;

pub use discord::{DiscordMessage, Embed};
pub use payload::{FilePart, FormPart, MultipartForm, WebhookPayload};

use tracing::{debug, error};

use crate::config::WebhookTimeouts;
use crate::error::ErrorCode;
use crate::settings::WebhookChannel;

/// Errors produced when dispatching a webhook.
#[derive(Debug, thiserror::Error)]
pub enum WebhookError {
    /// No URL is configured for the channel.
    #[error("no webhook URL configured for {0} notifications")]
    NotConfigured(WebhookChannel),

    /// The payload could not be turned into a request body.
    #[error("invalid webhook payload: {0}")]
    InvalidPayload(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),

    /// The request never produced a response (DNS, TLS, connection, timeout).
    #[error("webhook request failed: {0}")]
    Request(String),

    /// The endpoint answered with a non-success status.
    #[error("webhook error! status: {status}, response: {body}")]
    Status { status: u16, body: String },
}

impl ErrorCode for WebhookError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::NotConfigured(_) => "E_WEBHOOK_NOT_CONFIGURED",
            Self::InvalidPayload(_) => "E_WEBHOOK_PAYLOAD",
            Self::HttpClientBuild(_) => "E_HTTP_CLIENT_BUILD",
            Self::Request(_) => "E_WEBHOOK_REQUEST",
            Self::Status { .. } => "E_WEBHOOK_STATUS",
        }
    }

    fn retryable(&self) -> bool {
        matches!(self, Self::Request(_) | Self::Status { status: 429 | 500..=599, .. })
    }
}

// =============================================================================
// CLIENT
// =============================================================================

#[derive(Debug, Clone)]
pub struct WebhookClient {
    #[cfg(not(feature = "hydrate"))]
    http: reqwest::Client,
}

impl WebhookClient {
    /// # Errors
    ///
    /// Returns an error if the native HTTP client cannot be built.
    #[cfg_attr(feature = "hydrate", allow(clippy::unnecessary_wraps))]
    pub fn new(timeouts: WebhookTimeouts) -> Result<Self, WebhookError> {
        #[cfg(not(feature = "hydrate"))]
        {
            let http = reqwest::Client::builder()
                .timeout(timeouts.request())
                .connect_timeout(timeouts.connect())
                .build()
                .map_err(|e| WebhookError::HttpClientBuild(e.to_string()))?;
            Ok(Self { http })
        }
        #[cfg(feature = "hydrate")]
        {
            // The browser owns connection timeouts.
            let _ = timeouts;
            Ok(Self {})
        }
    }

    /// POST `payload` to `url`.
    ///
    /// # Errors
    ///
    /// Returns [`WebhookError::Status`] for a non-2xx response and
    /// [`WebhookError::Request`] when no response arrives.
    pub async fn send(&self, url: &str, payload: &WebhookPayload) -> Result<(), WebhookError> {
        let target = redact_url(url);
        match self.dispatch(url, payload).await {
            Ok(status) => {
                debug!(url = %target, status, "webhook delivered");
                Ok(())
            }
            Err(e) => {
                error!(url = %target, error = %e, "failed to send webhook");
                Err(e)
            }
        }
    }

    #[cfg(not(feature = "hydrate"))]
    async fn dispatch(&self, url: &str, payload: &WebhookPayload) -> Result<u16, WebhookError> {
        let request = match payload {
            WebhookPayload::Json(body) => self.http.post(url).json(body),
            WebhookPayload::Multipart(form) => self.http.post(url).multipart(form.to_reqwest()?),
        };
        let response = request
            .send()
            .await
            .map_err(|e| WebhookError::Request(e.to_string()))?;

        let status = response.status().as_u16();
        if !response.status().is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(WebhookError::Status { status, body });
        }
        Ok(status)
    }

    #[cfg(feature = "hydrate")]
    async fn dispatch(&self, url: &str, payload: &WebhookPayload) -> Result<u16, WebhookError> {
        let builder = gloo_net::http::Request::post(url);
        let request = match payload {
            WebhookPayload::Json(body) => builder.json(body),
            WebhookPayload::Multipart(form) => builder.body(form.to_form_data()?),
        }
        .map_err(|e| WebhookError::InvalidPayload(e.to_string()))?;

        let response = request
            .send()
            .await
            .map_err(|e| WebhookError::Request(e.to_string()))?;

        let status = response.status();
        if !response.ok() {
            let body = response.text().await.unwrap_or_default();
            return Err(WebhookError::Status { status, body });
        }
        Ok(status)
    }
}

/// Webhook URLs embed their secret token in the path; log only the origin.
fn redact_url(url: &str) -> String {
    let Some((scheme, rest)) = url.split_once("://") else {
        return "<invalid url>".to_owned();
    };
    let host = rest.split(['/', '?', '#']).next().unwrap_or_default();
    format!("{scheme}://{host}/…")
}

// =============================================================================
// TEST HELPERS
// =============================================================================
