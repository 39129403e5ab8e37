//! Transient success/error messages shown in a page's message box.
//!
//! The box fades in, stays visible for a while, fades out and is hidden.
//! Nothing is retained afterwards. If another message replaced the fade-out
//! animation in the meantime, the box is left visible for that message.

#[cfg(test)]
#[path = "feedback_test.rs"]
mod feedback_test;

use std::time::Duration;

use crate::config::DEFAULT_MESSAGE_VISIBLE_MS;
use crate::page::Page;
use crate::util;

pub const ERROR_BORDER_COLOR: &str = "#FF4500";
pub const SUCCESS_BORDER_COLOR: &str = "#32CD32";
pub const FADE_IN_ANIMATION: &str = "fadeIn";
pub const FADE_OUT_ANIMATION: &str = "fadeOut";
const FADE_MS: u64 = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
}

impl Severity {
    #[must_use]
    pub fn from_is_error(is_error: bool) -> Self {
        if is_error { Self::Error } else { Self::Success }
    }

    #[must_use]
    pub fn border_color(self) -> &'static str {
        match self {
            Self::Success => SUCCESS_BORDER_COLOR,
            Self::Error => ERROR_BORDER_COLOR,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedbackTiming {
    /// Delay between showing the message and starting the fade-out.
    pub visible: Duration,
    /// Length of the fade-out animation.
    pub fade: Duration,
}

impl FeedbackTiming {
    #[must_use]
    pub fn from_visible_ms(visible_ms: u64) -> Self {
        Self { visible: Duration::from_millis(visible_ms), fade: Duration::from_millis(FADE_MS) }
    }
}

impl Default for FeedbackTiming {
    fn default() -> Self {
        Self::from_visible_ms(DEFAULT_MESSAGE_VISIBLE_MS)
    }
}

/// Show `text` in the element `box_id`, then fade it out and hide it.
///
/// Resolves once the box has been hidden (or handed over to a newer
/// message). A missing element resolves immediately.
pub async fn show_message<P: Page + ?Sized>(
    page: &P,
    box_id: &str,
    text: &str,
    severity: Severity,
    timing: &FeedbackTiming,
) {
    if !page.set_text(box_id, text) {
        return;
    }
    page.set_style(box_id, "display", "block");
    page.set_style(box_id, "border-color", severity.border_color());
    play(page, box_id, FADE_IN_ANIMATION, timing.fade);

    util::sleep(timing.visible).await;
    play(page, box_id, FADE_OUT_ANIMATION, timing.fade);

    util::sleep(timing.fade).await;
    if page.style(box_id, "animation-name").as_deref() == Some(FADE_OUT_ANIMATION) {
        page.set_style(box_id, "display", "none");
    }
}

/// Longhand properties, so the running animation can be read back by name.
fn play<P: Page + ?Sized>(page: &P, box_id: &str, name: &str, duration: Duration) {
    page.set_style(box_id, "animation-name", name);
    page.set_style(box_id, "animation-duration", &format!("{}ms", duration.as_millis()));
    page.set_style(box_id, "animation-fill-mode", "forwards");
}
