use std::sync::Arc;

use super::*;
use crate::page::VirtualPage;

const BOX: &str = "messageBox";

fn spawn_message(page: &Arc<VirtualPage>, text: &'static str, severity: Severity) -> tokio::task::JoinHandle<()> {
    let page = Arc::clone(page);
    tokio::spawn(async move {
        show_message(&*page, BOX, text, severity, &FeedbackTiming::default()).await;
    })
}

#[test]
fn severity_picks_border_color() {
    assert_eq!(Severity::from_is_error(true).border_color(), "#FF4500");
    assert_eq!(Severity::from_is_error(false).border_color(), "#32CD32");
}

#[test]
fn default_timing_matches_config_default() {
    let timing = FeedbackTiming::default();
    assert_eq!(timing.visible, Duration::from_millis(3000));
    assert_eq!(timing.fade, Duration::from_millis(500));
}

#[tokio::test(start_paused = true)]
async fn message_fades_in_then_out_then_hides() {
    let page = Arc::new(VirtualPage::with_elements([BOX]));
    let handle = spawn_message(&page, "Saved!", Severity::Success);

    tokio::task::yield_now().await;
    assert_eq!(page.text(BOX).as_deref(), Some("Saved!"));
    assert_eq!(page.style(BOX, "display").as_deref(), Some("block"));
    assert_eq!(page.style(BOX, "border-color").as_deref(), Some(SUCCESS_BORDER_COLOR));
    assert_eq!(page.style(BOX, "animation-name").as_deref(), Some(FADE_IN_ANIMATION));

    tokio::time::sleep(Duration::from_millis(3100)).await;
    assert_eq!(page.style(BOX, "animation-name").as_deref(), Some(FADE_OUT_ANIMATION));
    assert_eq!(page.style(BOX, "display").as_deref(), Some("block"));

    handle.await.unwrap();
    assert_eq!(page.style(BOX, "display").as_deref(), Some("none"));
}

#[tokio::test(start_paused = true)]
async fn newer_animation_keeps_box_visible() {
    let page = Arc::new(VirtualPage::with_elements([BOX]));
    let handle = spawn_message(&page, "Failed", Severity::Error);

    tokio::task::yield_now().await;
    assert_eq!(page.style(BOX, "border-color").as_deref(), Some(ERROR_BORDER_COLOR));

    tokio::time::sleep(Duration::from_millis(3100)).await;
    // Another message restarts the fade-in while the first is fading out.
    page.set_style(BOX, "animation-name", FADE_IN_ANIMATION);

    handle.await.unwrap();
    assert_eq!(page.style(BOX, "display").as_deref(), Some("block"));
}

#[tokio::test]
async fn missing_box_is_a_noop() {
    let page = VirtualPage::new();
    show_message(&page, BOX, "ignored", Severity::Success, &FeedbackTiming::from_visible_ms(60_000)).await;
    assert_eq!(page.text(BOX), None);
}
