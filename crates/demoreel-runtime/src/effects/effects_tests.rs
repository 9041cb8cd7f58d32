use super::*;
use crate::test_support::{CallLog, MockPage};
use demoreel_script::{HighlightStyle, NarrationPosition};
use tokio::time::Instant;

fn assert_close(actual: Duration, expected_ms: u64) {
    let expected = Duration::from_millis(expected_ms);
    assert!(
        actual >= expected && actual < expected + Duration::from_millis(5),
        "expected ~{:?}, got {:?}",
        expected,
        actual
    );
}

fn renderer(page: MockPage) -> EffectRenderer {
    EffectRenderer::new(Arc::new(page))
}

fn highlight(selector: &str, duration: u64) -> HighlightStep {
    HighlightStep {
        selector: selector.to_string(),
        color: "#4A90E2".to_string(),
        duration,
        style: HighlightStyle::Glow,
        border_width: 3,
    }
}

#[tokio::test(start_paused = true)]
async fn test_styles_injected_once() {
    let log = CallLog::default();
    let effects = renderer(MockPage::new(log.clone()));

    effects.highlight(&highlight(".a", 0)).await.unwrap();
    effects.highlight(&highlight(".b", 0)).await.unwrap();

    assert_eq!(log.count("add_style"), 1);
    assert_eq!(log.count("eval show_highlight"), 2);
}

#[tokio::test(start_paused = true)]
async fn test_highlight_clears_after_duration() {
    let log = CallLog::default();
    let effects = renderer(MockPage::new(log.clone()));

    effects.highlight(&highlight(".cta", 2000)).await.unwrap();

    let timed = log.timed();
    let shown = timed.iter().find(|(_, c)| c == "eval show_highlight").unwrap().0;
    let cleared = timed.iter().find(|(_, c)| c == "eval clear_highlights").unwrap().0;
    assert_close(cleared - shown, 2000);
}

#[tokio::test(start_paused = true)]
async fn test_zero_duration_leaves_overlay() {
    let log = CallLog::default();
    let effects = renderer(MockPage::new(log.clone()));

    effects.highlight(&highlight(".cta", 0)).await.unwrap();
    assert!(!log.contains("eval clear_highlights"));
}

#[tokio::test(start_paused = true)]
async fn test_missing_element() {
    let log = CallLog::default();
    let effects = renderer(MockPage::new(log.clone()).with_hidden(".gone"));

    let err = effects.highlight(&highlight(".gone", 2000)).await.unwrap_err();
    assert!(matches!(err, StepError::ElementNotFound(ref s) if s == ".gone"));
    assert_eq!(log.count("eval show_highlight"), 0);
}

#[tokio::test(start_paused = true)]
async fn test_zoom_reverts_with_transition_wait() {
    let log = CallLog::default();
    let effects = renderer(MockPage::new(log.clone()));
    let start = Instant::now();

    effects
        .zoom(&ZoomStep {
            selector: "#chart".to_string(),
            scale: 2.0,
            duration: 1000,
            padding: 20,
        })
        .await
        .unwrap();

    assert!(log.contains("eval apply_zoom"));
    assert!(log.contains("eval clear_zoom"));
    assert_close(start.elapsed(), 1500);
}

#[tokio::test(start_paused = true)]
async fn test_spotlight_and_narration() {
    let log = CallLog::default();
    let effects = renderer(MockPage::new(log.clone()));

    effects
        .spotlight(&SpotlightStep {
            selector: "#panel".to_string(),
            duration: 100,
            dimness: 0.5,
            border_radius: 8,
        })
        .await
        .unwrap();
    effects
        .show_narration(&NarrationStep {
            text: "Welcome".to_string(),
            duration: 100,
            position: NarrationPosition::Top,
            font_size: 24,
            auto_generate: false,
        })
        .await
        .unwrap();

    let calls = log.calls();
    assert!(calls.contains(&"eval show_spotlight".to_string()));
    assert!(calls.contains(&"eval clear_spotlight".to_string()));
    assert!(calls.contains(&"eval show_narration".to_string()));
    assert!(calls.contains(&"eval clear_narration".to_string()));
}

#[tokio::test(start_paused = true)]
async fn test_clear_all_runs_every_family() {
    let log = CallLog::default();
    let effects = renderer(MockPage::new(log.clone()));
    let start = Instant::now();

    effects.clear_all().await.unwrap();

    for name in ["clear_highlights", "clear_zoom", "clear_spotlight", "clear_narration"] {
        assert_eq!(log.count(&format!("eval {}", name)), 1, "{}", name);
    }
    // Zoom (500ms) and narration (400ms) waits overlap.
    assert_close(start.elapsed(), 500);
}

#[test]
fn test_stylesheet_covers_effects() {
    for class in [
        ".demo-highlight.pulse",
        ".demo-highlight.glow",
        ".demo-spotlight-overlay",
        ".demo-narration-overlay.visible",
    ] {
        assert!(STYLES.contains(class), "{}", class);
    }
}
