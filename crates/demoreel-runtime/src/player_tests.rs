use super::*;
use crate::test_support::{CallLog, MockLauncher, MockPage, ScriptedControl};
use demoreel_protocols::ControlSignal;
use demoreel_script::ScriptValidator;
use serde_json::{Value, json};

fn script(steps: Value, extra_config: Value, auth: Option<Value>) -> DemoScript {
    let mut config = json!({
        "baseUrl": "https://app.example.com",
        "videoPath": std::env::temp_dir().join("demoreel-tests/demo.webm").to_string_lossy(),
    });
    if let (Some(target), Some(extra)) = (config.as_object_mut(), extra_config.as_object()) {
        for (k, v) in extra {
            target.insert(k.clone(), v.clone());
        }
    }
    let mut demo = json!({ "name": "Player test", "config": config, "steps": steps });
    if let Some(auth) = auth {
        demo["auth"] = auth;
    }
    ScriptValidator::validate(&json!({ "demo": demo })).unwrap()
}

fn player(log: &CallLog, page: MockPage, signal: ControlSignal) -> DemoPlayer {
    DemoPlayer::new(
        Arc::new(MockLauncher::new(log.clone(), page)),
        Arc::new(ScriptedControl::new(log.clone(), signal)),
    )
}

fn assert_torn_down(log: &CallLog) {
    let page = log.position("page.close").expect("page closed");
    let context = log.position("context.close").expect("context closed");
    let browser = log.position("browser.close").expect("browser closed");
    assert!(page < context && context < browser);
}

#[tokio::test(start_paused = true)]
async fn test_navigate_and_highlight_scenario() {
    let log = CallLog::default();
    let player = player(&log, MockPage::new(log.clone()), ControlSignal::Continue);
    let script = script(
        json!([
            { "type": "navigate", "url": "/" },
            { "type": "highlight", "selector": ".cta" }
        ]),
        json!({}),
        None,
    );

    let report = player.play(&script, &PlayOptions::default()).await.unwrap();

    assert_eq!(report.steps_executed, 2);
    assert_eq!(report.name, "Player test");
    assert!(report.storage_state_saved.is_none());

    let calls = log.calls();
    assert_eq!(calls[0], "launch headless=false slow_mo=None");
    assert_eq!(calls[1], "browser.new_context 1920x1080 state=false");
    assert!(log.contains("goto https://app.example.com/ load"));

    let timed = log.timed();
    let shown = timed.iter().find(|(_, c)| c == "eval show_highlight").unwrap().0;
    let cleared = timed.iter().find(|(_, c)| c == "eval clear_highlights").unwrap().0;
    assert!(cleared - shown >= std::time::Duration::from_millis(2000));
    assert_torn_down(&log);
}

#[tokio::test(start_paused = true)]
async fn test_command_line_overrides_config() {
    let log = CallLog::default();
    let player = player(&log, MockPage::new(log.clone()), ControlSignal::Continue);
    let script = script(
        json!([{ "type": "wait", "duration": 10 }]),
        json!({ "headless": false, "slowMo": 50 }),
        None,
    );

    let options = PlayOptions {
        headless: Some(true),
        slow_mo: Some(250),
        screenshot_on_error: true,
    };
    player.play(&script, &options).await.unwrap();

    assert_eq!(log.calls()[0], "launch headless=true slow_mo=Some(250)");
}

#[tokio::test(start_paused = true)]
async fn test_failing_step_skips_rest_and_tears_down() {
    let log = CallLog::default();
    let page = MockPage::new(log.clone()).with_hidden("#missing");
    let player = player(&log, page, ControlSignal::Continue);
    let script = script(
        json!([
            { "type": "navigate", "url": "/" },
            { "type": "wait", "duration": 10 },
            { "type": "wait", "selector": "#missing", "timeout": 1000 },
            { "type": "navigate", "url": "/after" },
            { "type": "click", "selector": "#later" }
        ]),
        json!({}),
        None,
    );

    let err = player.play(&script, &PlayOptions::default()).await.unwrap_err();

    match &err {
        PlayerError::Step {
            index,
            description,
            source,
        } => {
            assert_eq!(*index, 3);
            assert_eq!(description, "Wait for #missing");
            assert!(matches!(source, StepError::Timeout { timeout_ms: 1000, .. }));
        }
        other => panic!("unexpected error: {}", other),
    }
    assert!(!log.contains("goto https://app.example.com/after load"));
    assert!(!log.calls().iter().any(|c| c.starts_with("click")));
    assert!(log.contains("screenshot ./error-screenshot.png"));
    assert_torn_down(&log);
}

#[tokio::test(start_paused = true)]
async fn test_each_close_runs_when_earlier_ones_fail() {
    let log = CallLog::default();
    let page = MockPage::new(log.clone())
        .with_hidden("#missing")
        .with_failing_teardown();
    let player = DemoPlayer::new(
        Arc::new(MockLauncher::new(log.clone(), page).with_failing_context_close()),
        Arc::new(ScriptedControl::new(log.clone(), ControlSignal::Continue)),
    );
    let script = script(
        json!([
            { "type": "navigate", "url": "/" },
            { "type": "click", "selector": "#missing" }
        ]),
        json!({}),
        None,
    );

    let err = player.play(&script, &PlayOptions::default()).await.unwrap_err();

    match &err {
        PlayerError::Step { index, source, .. } => {
            assert_eq!(*index, 2);
            assert!(matches!(source, StepError::ClickFailed { .. }));
        }
        other => panic!("unexpected error: {}", other),
    }
    for clear in ["eval clear_highlights", "eval clear_zoom", "eval clear_spotlight", "eval clear_narration"] {
        assert!(log.contains(clear), "{} not attempted", clear);
    }
    assert_torn_down(&log);
}

#[tokio::test(start_paused = true)]
async fn test_screenshot_failure_is_swallowed() {
    let log = CallLog::default();
    let page = MockPage::new(log.clone())
        .with_hidden("#missing")
        .with_failing_screenshots();
    let player = player(&log, page, ControlSignal::Continue);
    let script = script(
        json!([{ "type": "wait", "selector": "#missing", "timeout": 10 }]),
        json!({}),
        None,
    );

    let err = player.play(&script, &PlayOptions::default()).await.unwrap_err();
    assert!(matches!(err, PlayerError::Step { index: 1, .. }));
    assert_torn_down(&log);
}

#[tokio::test(start_paused = true)]
async fn test_no_screenshot_when_disabled() {
    let log = CallLog::default();
    let page = MockPage::new(log.clone()).with_hidden("#missing");
    let player = player(&log, page, ControlSignal::Continue);
    let script = script(
        json!([{ "type": "wait", "selector": "#missing", "timeout": 10 }]),
        json!({}),
        None,
    );

    let options = PlayOptions {
        screenshot_on_error: false,
        ..Default::default()
    };
    player.play(&script, &options).await.unwrap_err();
    assert_eq!(log.count("screenshot"), 0);
}

#[tokio::test(start_paused = true)]
async fn test_form_auth_missing_username_field() {
    let log = CallLog::default();
    let page = MockPage::new(log.clone()).with_hidden("#email");
    let player = player(&log, page, ControlSignal::Continue);
    let script = script(
        json!([{ "type": "navigate", "url": "/dashboard" }]),
        json!({}),
        Some(json!({
            "type": "form",
            "url": "/login",
            "credentials": { "username": "demo", "password": "secret" },
            "selectors": {
                "usernameField": "#email",
                "passwordField": "#password",
                "submitButton": "button[type=submit]"
            }
        })),
    );

    let err = player.play(&script, &PlayOptions::default()).await.unwrap_err();

    match &err {
        PlayerError::Authentication {
            login_url,
            username_field,
            source,
            ..
        } => {
            assert_eq!(login_url, "https://app.example.com/login");
            assert_eq!(username_field, "#email");
            assert!(matches!(source, StepError::Timeout { timeout_ms: 10_000, .. }));
        }
        other => panic!("unexpected error: {}", other),
    }
    let display = err.to_string();
    assert!(display.contains("#email"));
    assert!(display.contains("https://app.example.com/login"));
    assert!(log.contains("screenshot ./auth-error.png"));
    assert!(!log.contains("goto https://app.example.com/dashboard load"));
    assert_torn_down(&log);
}

#[tokio::test(start_paused = true)]
async fn test_form_auth_success_order() {
    let log = CallLog::default();
    let player = player(&log, MockPage::new(log.clone()), ControlSignal::Continue);
    let script = script(
        json!([{ "type": "navigate", "url": "/dashboard" }]),
        json!({}),
        Some(json!({
            "type": "form",
            "url": "https://auth.example.com/login",
            "credentials": { "username": "demo", "password": "secret" },
            "selectors": {
                "usernameField": "#email",
                "passwordField": "#password",
                "submitButton": "#submit"
            }
        })),
    );

    player.play(&script, &PlayOptions::default()).await.unwrap();

    let login = log.position("goto https://auth.example.com/login load").unwrap();
    let fill_user = log.position("fill #email demo").unwrap();
    let fill_pass = log.position("fill #password secret").unwrap();
    let submit = log.position("click #submit left x1").unwrap();
    let idle = log.position("load_state networkidle").unwrap();
    let first_step = log.position("goto https://app.example.com/dashboard load").unwrap();
    assert!(login < fill_user && fill_user < fill_pass && fill_pass < submit);
    assert!(submit < idle && idle < first_step);
}

#[tokio::test(start_paused = true)]
async fn test_basic_auth_sets_credentials_without_navigation() {
    let log = CallLog::default();
    let player = player(&log, MockPage::new(log.clone()), ControlSignal::Continue);
    let script = script(
        json!([{ "type": "wait", "duration": 5 }]),
        json!({}),
        Some(json!({ "type": "basic", "username": "admin", "password": "pw" })),
    );

    player.play(&script, &PlayOptions::default()).await.unwrap();

    assert!(log.contains("context.credentials admin"));
    assert_eq!(log.count("goto"), 0);
}

#[tokio::test(start_paused = true)]
async fn test_missing_storage_state_fails_before_launch() {
    let log = CallLog::default();
    let player = player(&log, MockPage::new(log.clone()), ControlSignal::Continue);
    let script = script(
        json!([{ "type": "wait", "duration": 5 }]),
        json!({ "storageStatePath": "/nonexistent/demoreel/state.json" }),
        None,
    );

    let err = player.play(&script, &PlayOptions::default()).await.unwrap_err();
    assert!(matches!(err, PlayerError::StorageStateMissing { .. }));
    assert_eq!(log.count("launch"), 0);
}

#[tokio::test(start_paused = true)]
async fn test_storage_state_restored_and_saved() {
    let dir = tempfile::tempdir().unwrap();
    let existing = dir.path().join("state.json");
    std::fs::write(&existing, "{}").unwrap();
    let saved = dir.path().join("out/saved.json");

    let log = CallLog::default();
    let player = player(&log, MockPage::new(log.clone()), ControlSignal::Continue);
    let script = script(
        json!([{ "type": "wait", "duration": 5 }]),
        json!({
            "storageStatePath": existing.to_string_lossy(),
            "saveStorageStatePath": saved.to_string_lossy()
        }),
        None,
    );

    let report = player.play(&script, &PlayOptions::default()).await.unwrap();

    assert_eq!(report.storage_state_saved.as_deref(), Some(saved.as_path()));
    assert!(dir.path().join("out").is_dir());
    assert!(log.contains("browser.new_context 1920x1080 state=true"));
    assert!(log.contains(&format!("context.save_state {}", saved.display())));
}

#[tokio::test]
async fn test_pause_cancel_skips_error_screenshot() {
    let log = CallLog::default();
    let player = player(&log, MockPage::new(log.clone()), ControlSignal::Cancel);
    let script = script(
        json!([
            { "type": "pause", "message": "check" },
            { "type": "navigate", "url": "/next" }
        ]),
        json!({}),
        None,
    );

    let err = player.play(&script, &PlayOptions::default()).await.unwrap_err();

    assert!(err.is_cancelled());
    assert_eq!(log.count("screenshot"), 0);
    assert_eq!(log.count("goto"), 0);
    assert_torn_down(&log);
}

#[test]
fn test_phase_display() {
    assert_eq!(PlaybackPhase::Init.to_string(), "init");
    assert_eq!(PlaybackPhase::Cleanup.to_string(), "cleanup");
}
