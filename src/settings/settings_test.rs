use super::*;
use serde_json::json;

fn load(doc: &Value) -> Settings {
    Settings::from_stored(Some(&doc.to_string()))
}

// =============================================================================
// Load pipeline fallbacks
// =============================================================================

#[test]
fn absent_document_yields_defaults() {
    assert_eq!(Settings::from_stored(None), Settings::default());
}

#[test]
fn corrupt_json_yields_defaults() {
    assert_eq!(Settings::from_stored(Some("{not json")), Settings::default());
    assert_eq!(Settings::from_stored(Some("")), Settings::default());
}

#[test]
fn non_object_root_yields_defaults() {
    assert_eq!(Settings::from_stored(Some("[1,2,3]")), Settings::default());
    assert_eq!(Settings::from_stored(Some("null")), Settings::default());
}

#[test]
fn default_document_round_trips_unchanged() {
    let raw = serde_json::to_string(&Settings::default()).unwrap();
    assert_eq!(Settings::from_stored(Some(&raw)), Settings::default());
}

// =============================================================================
// Back-filling
// =============================================================================

#[test]
fn partial_document_keeps_values_and_fills_the_rest() {
    let settings = load(&json!({ "websiteName": "Baan Suan", "textColor": "#000000" }));
    assert_eq!(settings.website_name, "Baan Suan");
    assert_eq!(settings.text_color, "#000000");
    assert_eq!(settings.background_color, defaults::BACKGROUND_COLOR);
    assert_eq!(settings.available_groups, defaults::available_groups());
    assert_eq!(settings.group_permissions, defaults::group_permissions());
    assert_eq!(settings.fine_list, defaults::fine_list());
}

#[test]
fn empty_groups_and_fines_fall_back_to_defaults() {
    let settings = load(&json!({ "availableGroups": [], "fineList": [] }));
    assert_eq!(settings.available_groups, defaults::available_groups());
    assert_eq!(settings.fine_list, defaults::fine_list());
}

#[test]
fn malformed_substructures_are_replaced_wholesale() {
    let settings = load(&json!({ "availableGroups": "admin", "groupPermissions": 7, "users": [] }));
    assert_eq!(settings.available_groups, defaults::available_groups());
    assert_eq!(settings.group_permissions, defaults::group_permissions());
    assert_eq!(settings.users.len(), 1);
    assert_eq!(settings.users["admin"], defaults::admin_user());
}

#[test]
fn missing_default_groups_are_added_and_custom_lists_kept() {
    let settings = load(&json!({
        "groupPermissions": { "staff": ["user.html"], "guest": [] }
    }));
    assert_eq!(settings.allowed_pages("staff").unwrap(), ["user.html".to_owned()]);
    assert!(settings.allowed_pages("guest").unwrap().is_empty());
    assert_eq!(settings.allowed_pages("admin").unwrap().len(), defaults::ADMIN_PAGES.len());
    assert_eq!(settings.allowed_pages("member").unwrap().len(), defaults::MEMBER_PAGES.len());
}

#[test]
fn admin_user_and_group_always_present() {
    let settings = load(&json!({
        "availableGroups": ["member"],
        "users": { "lek": { "password": "1234", "group": "member" } }
    }));
    assert_eq!(settings.users["admin"], defaults::admin_user());
    assert_eq!(settings.users["lek"].group, "member");
    assert_eq!(settings.available_groups, vec!["member".to_owned(), "admin".to_owned()]);
}

#[test]
fn existing_admin_user_is_not_overwritten() {
    let settings = load(&json!({
        "users": { "admin": { "password": "s3cret", "group": "admin" } }
    }));
    assert_eq!(settings.users["admin"].password, "s3cret");
}

#[test]
fn admin_without_group_keeps_its_password() {
    let settings = load(&json!({
        "users": { "admin": { "password": "1234" }, "lek": { "password": "p" } }
    }));
    assert_eq!(settings.users["admin"].password, "1234");
    assert!(settings.verify_credentials("admin", "1234").is_some());
    assert!(settings.verify_credentials("admin", defaults::ADMIN_PASSWORD).is_none());
    assert_eq!(settings.users["lek"], User::new("p", ""));
}

#[test]
fn non_string_password_keeps_the_user_but_never_matches() {
    let settings = load(&json!({
        "users": { "lek": { "password": 1234, "group": "member" } }
    }));
    assert_eq!(settings.users["lek"].group, "member");
    assert_eq!(settings.users["lek"].extra["password"], json!(1234));
    assert!(settings.verify_credentials("lek", "").is_none());
    assert!(settings.verify_credentials("lek", "1234").is_none());
    let saved = serde_json::to_value(&settings.users["lek"]).unwrap();
    assert_eq!(saved, json!({ "password": 1234, "group": "member" }));
}

#[test]
fn malformed_entries_are_dropped_individually() {
    let settings = load(&json!({
        "users": { "ok": { "password": "p", "group": "staff" }, "bad": "oops" },
        "fineList": [{ "name": "late", "amount": "250" }, { "name": "broken" }, 12],
        "groupPermissions": { "staff": "all" }
    }));
    assert!(settings.users.contains_key("ok"));
    assert!(!settings.users.contains_key("bad"));
    assert_eq!(settings.fine_list, vec![FineType { name: "late".to_owned(), amount: 250_i64.into() }]);
    assert_eq!(settings.group_permissions, defaults::group_permissions());
}

#[test]
fn fractional_fine_amounts_are_kept() {
    let settings = load(&json!({
        "fineList": [{ "name": "late", "amount": 99.5 }, { "name": "noise", "amount": " 12.25 " }]
    }));
    assert_eq!(settings.fine_list.len(), 2);
    assert_eq!(settings.fine_list[0].amount.as_f64(), Some(99.5));
    assert_eq!(settings.fine_list[1].amount.as_f64(), Some(12.25));
    let saved = serde_json::to_value(&settings.fine_list[0]).unwrap();
    assert_eq!(saved, json!({ "name": "late", "amount": 99.5 }));
}

#[test]
fn unknown_keys_survive_a_load_save_cycle() {
    let settings = load(&json!({ "announcement": "Water off Monday" }));
    assert_eq!(settings.extra["announcement"], json!("Water off Monday"));
    let saved = serde_json::to_value(&settings).unwrap();
    assert_eq!(saved["announcement"], json!("Water off Monday"));
}

// =============================================================================
// Migration through the pipeline
// =============================================================================

#[test]
fn legacy_role_becomes_group_without_role_key() {
    let settings = load(&json!({
        "users": { "somchai": { "password": "x", "role": "staff" } }
    }));
    assert_eq!(settings.users["somchai"], User::new("x", "staff"));
    let encoded = serde_json::to_value(&settings.users["somchai"]).unwrap();
    assert_eq!(encoded, json!({ "password": "x", "group": "staff" }));
    assert_eq!(settings.schema_version, migrate::CURRENT_SCHEMA_VERSION);
}

#[test]
fn legacy_role_in_current_document_still_grants_group() {
    let settings = load(&json!({
        "schemaVersion": 1,
        "users": { "nok": { "password": "p", "role": "staff" } }
    }));
    assert_eq!(settings.users["nok"].group, "staff");
    assert!(settings.users["nok"].extra.is_empty());
}

#[test]
fn unknown_user_fields_survive_a_load_save_cycle() {
    let settings = load(&json!({
        "users": { "lek": { "password": "p", "group": "member", "phone": "081", "role": "" } }
    }));
    let saved = serde_json::to_value(&settings.users["lek"]).unwrap();
    assert_eq!(saved, json!({ "password": "p", "group": "member", "phone": "081", "role": "" }));
}

// =============================================================================
// Lookups
// =============================================================================

#[test]
fn default_permissions() {
    let settings = Settings::default();
    assert!(!settings.check_page_permission("member", "admin.html"));
    assert!(settings.check_page_permission("admin", "admin.html"));
    assert!(settings.check_page_permission("staff", "fine_form.html"));
    assert!(!settings.check_page_permission("nobody", "user.html"));
}

#[test]
fn fine_details_matches_exact_name() {
    let settings = Settings::default();
    assert_eq!(
        settings.fine_details("วิ่งแก้บน"),
        Some(&FineType { name: "วิ่งแก้บน".to_owned(), amount: 500_i64.into() })
    );
    assert_eq!(settings.fine_details("nonexistent"), None);
    assert_eq!(settings.fine_details("วิ่งแก้บน "), None);
}

#[test]
fn fine_details_returns_first_match() {
    let mut settings = Settings::default();
    settings.fine_list = vec![
        FineType { name: "late".to_owned(), amount: 100_i64.into() },
        FineType { name: "late".to_owned(), amount: 900_i64.into() },
    ];
    assert_eq!(settings.fine_details("late").unwrap().amount.as_i64(), Some(100));
}

#[test]
fn webhook_urls_by_channel() {
    let mut settings = Settings::default();
    assert_eq!(settings.webhook_url(WebhookChannel::Leave), None);
    settings.set_webhook_url(WebhookChannel::Delivery, " https://discord.test/hook ");
    assert_eq!(settings.webhook_url(WebhookChannel::Delivery), Some("https://discord.test/hook"));
    assert_eq!(settings.webhook_url(WebhookChannel::Report), None);
}

#[test]
fn webhook_channel_parses_names() {
    assert_eq!("Delivery".parse::<WebhookChannel>(), Ok(WebhookChannel::Delivery));
    assert_eq!(WebhookChannel::Registration.to_string(), "registration");
    assert!("fines".parse::<WebhookChannel>().is_err());
}

#[test]
fn verify_credentials_requires_exact_password() {
    let settings = Settings::default();
    assert_eq!(settings.verify_credentials("admin", "admin"), Some(&defaults::admin_user()));
    assert_eq!(settings.verify_credentials("admin", "Admin"), None);
    assert_eq!(settings.verify_credentials("ghost", "admin"), None);
}
