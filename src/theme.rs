//! Apply the stored site theme to a page.
//!
//! Side-effecting only: elements missing from the current page are skipped.

#[cfg(test)]
#[path = "theme_test.rs"]
mod theme_test;

use crate::page::Page;
use crate::settings::Settings;

pub const TITLE_ID: &str = "websiteTitle";
/// Logo element ids in lookup order.
pub const LOGO_IDS: [&str; 2] = ["bioniczLogo", "logo"];
pub const COPYRIGHT_YEAR_ID: &str = "copyrightYear";
pub const COPYRIGHT_NAME_ID: &str = "copyrightName";
pub const ACCENT_COLOR_PROPERTY: &str = "--theme-accent-color";

/// Resolved theme values ready to be written to a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub title: String,
    pub background_color: String,
    pub text_color: String,
    /// CSS `background-image` value, already wrapped in `url('…')`.
    pub background_image: String,
    pub accent_color: String,
    pub logo_url: String,
    pub copyright_year: i32,
}

impl Theme {
    #[must_use]
    pub fn from_settings(settings: &Settings, year: i32) -> Self {
        Self {
            title: settings.website_name.clone(),
            background_color: settings.background_color.clone(),
            text_color: settings.text_color.clone(),
            background_image: format!("url('{}')", settings.background_image_url),
            accent_color: settings.theme_accent_color.clone(),
            logo_url: settings.logo_image_url.clone(),
            copyright_year: year,
        }
    }
}

pub fn apply_theme<P: Page + ?Sized>(page: &P, theme: &Theme) {
    page.set_text(TITLE_ID, &theme.title);

    page.set_body_style("background-color", &theme.background_color);
    page.set_body_style("color", &theme.text_color);
    page.set_body_style("background-image", &theme.background_image);
    page.set_root_property(ACCENT_COLOR_PROPERTY, &theme.accent_color);

    // Older pages use `logo`; only the first element found is updated.
    for id in LOGO_IDS {
        if page.set_attribute(id, "src", &theme.logo_url) {
            break;
        }
    }

    page.set_text(COPYRIGHT_YEAR_ID, &theme.copyright_year.to_string());
    page.set_text(COPYRIGHT_NAME_ID, &theme.title);
}

/// Current calendar year in UTC.
#[must_use]
pub fn current_year() -> i32 {
    time::OffsetDateTime::now_utc().year()
}
