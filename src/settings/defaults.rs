//! Built-in site configuration used when nothing (or garbage) is stored.

use std::collections::BTreeMap;

use serde_json::{Map, Number};

use super::migrate::CURRENT_SCHEMA_VERSION;
use super::{FineType, Settings, User};

pub const WEBSITE_NAME: &str = "WAIGON [WG]";
pub const BACKGROUND_COLOR: &str = "#1b0088";
pub const TEXT_COLOR: &str = "#ffffff";
pub const BACKGROUND_IMAGE_URL: &str = "https://img2.pic.in.th/pic/wp8012828-fivem-wallpapers.jpg";
pub const LOGO_IMAGE_URL: &str = "https://img5.pic.in.th/file/secure-sv1/logo-nobg.png";
pub const THEME_ACCENT_COLOR: &str = "#1b00a3";

pub const LEAVE_TYPES: [&str; 4] = ["Airdrop", "ลาประชุม", "ลาธุระ", "ลาป่วย"];

pub const ADMIN_GROUP: &str = "admin";
pub const STAFF_GROUP: &str = "staff";
pub const MEMBER_GROUP: &str = "member";
pub const AVAILABLE_GROUPS: [&str; 3] = [MEMBER_GROUP, STAFF_GROUP, ADMIN_GROUP];

pub const ADMIN_USERNAME: &str = "admin";
pub const ADMIN_PASSWORD: &str = "admin";

pub const ADMIN_PAGES: [&str; 8] = [
    "admin.html",
    "user.html",
    "staff.html",
    "leave_form.html",
    "delivery_form.html",
    "report_form.html",
    "house_list.html",
    "fine_form.html",
];
pub const STAFF_PAGES: [&str; 7] = [
    "user.html",
    "staff.html",
    "leave_form.html",
    "delivery_form.html",
    "report_form.html",
    "house_list.html",
    "fine_form.html",
];
pub const MEMBER_PAGES: [&str; 4] = ["user.html", "leave_form.html", "delivery_form.html", "report_form.html"];

pub const FINES: [(&str, i64); 2] = [("วิ่งแก้บน", 500), ("นอนเวลางาน", 1000)];

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_owned()).collect()
}

#[must_use]
pub fn available_groups() -> Vec<String> {
    strings(&AVAILABLE_GROUPS)
}

#[must_use]
pub fn group_permissions() -> BTreeMap<String, Vec<String>> {
    BTreeMap::from([
        (ADMIN_GROUP.to_owned(), strings(&ADMIN_PAGES)),
        (STAFF_GROUP.to_owned(), strings(&STAFF_PAGES)),
        (MEMBER_GROUP.to_owned(), strings(&MEMBER_PAGES)),
    ])
}

#[must_use]
pub fn fine_list() -> Vec<FineType> {
    FINES.iter().map(|(name, amount)| FineType { name: (*name).to_owned(), amount: Number::from(*amount) }).collect()
}

#[must_use]
pub fn admin_user() -> User {
    User::new(ADMIN_PASSWORD, ADMIN_GROUP)
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            website_name: WEBSITE_NAME.to_owned(),
            background_color: BACKGROUND_COLOR.to_owned(),
            text_color: TEXT_COLOR.to_owned(),
            background_image_url: BACKGROUND_IMAGE_URL.to_owned(),
            logo_image_url: LOGO_IMAGE_URL.to_owned(),
            theme_accent_color: THEME_ACCENT_COLOR.to_owned(),
            webhook_url: String::new(),
            registration_webhook_url: String::new(),
            delivery_webhook_url: String::new(),
            report_webhook_url: String::new(),
            leave_types: strings(&LEAVE_TYPES),
            available_groups: available_groups(),
            group_permissions: group_permissions(),
            fine_list: fine_list(),
            users: BTreeMap::from([(ADMIN_USERNAME.to_owned(), admin_user())]),
            schema_version: CURRENT_SCHEMA_VERSION,
            extra: Map::new(),
        }
    }
}
