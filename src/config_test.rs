use super::*;

/// # Safety
/// Each test uses its own variable names, so parallel runs do not race.
unsafe fn clear_portal_env() {
    unsafe {
        std::env::remove_var("PORTAL_DATA_DIR");
        std::env::remove_var("PORTAL_WEBHOOK_TIMEOUT_SECS");
        std::env::remove_var("PORTAL_WEBHOOK_CONNECT_TIMEOUT_SECS");
        std::env::remove_var("PORTAL_MESSAGE_VISIBLE_MS");
    }
}

// =============================================================================
// env_parse
// =============================================================================

#[test]
fn env_parse_missing_returns_default() {
    let val: u64 = env_parse("__PORTAL_TEST_NONEXISTENT__", 42);
    assert_eq!(val, 42);
}

#[test]
fn env_parse_present_valid() {
    unsafe { std::env::set_var("__PORTAL_TEST_EP_VALID__", " 99 ") };
    let val: u64 = env_parse("__PORTAL_TEST_EP_VALID__", 0);
    assert_eq!(val, 99);
    unsafe { std::env::remove_var("__PORTAL_TEST_EP_VALID__") };
}

#[test]
fn env_parse_present_invalid_returns_default() {
    unsafe { std::env::set_var("__PORTAL_TEST_EP_INVALID__", "soon") };
    let val: u64 = env_parse("__PORTAL_TEST_EP_INVALID__", 7);
    assert_eq!(val, 7);
    unsafe { std::env::remove_var("__PORTAL_TEST_EP_INVALID__") };
}

// =============================================================================
// PortalConfig
// =============================================================================

#[test]
fn from_env_uses_defaults_and_then_overrides() {
    unsafe { clear_portal_env() };
    assert_eq!(PortalConfig::from_env(), PortalConfig::default());

    unsafe {
        std::env::set_var("PORTAL_DATA_DIR", "/var/lib/portal");
        std::env::set_var("PORTAL_WEBHOOK_TIMEOUT_SECS", "5");
        std::env::set_var("PORTAL_WEBHOOK_CONNECT_TIMEOUT_SECS", "2");
        std::env::set_var("PORTAL_MESSAGE_VISIBLE_MS", "1500");
    }
    let cfg = PortalConfig::from_env();
    assert_eq!(cfg.data_dir, PathBuf::from("/var/lib/portal"));
    assert_eq!(cfg.webhook, WebhookTimeouts { request_secs: 5, connect_secs: 2 });
    assert_eq!(cfg.message_visible_ms, 1500);

    unsafe { std::env::set_var("PORTAL_DATA_DIR", "   ") };
    assert_eq!(PortalConfig::from_env().data_dir, PathBuf::from(DEFAULT_DATA_DIR));

    unsafe { clear_portal_env() };
}

#[test]
fn webhook_timeouts_convert_to_durations() {
    let t = WebhookTimeouts { request_secs: 3, connect_secs: 1 };
    assert_eq!(t.request(), Duration::from_secs(3));
    assert_eq!(t.connect(), Duration::from_secs(1));
}
