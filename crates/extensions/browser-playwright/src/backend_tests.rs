use super::*;
use crate::test_support::{Reply, Requests, fake_bridge};
use demoreel_protocols::{MouseButton, VideoOptions, ViewportSize};
use serde_json::json;
use std::path::PathBuf;

async fn browser() -> (PlaywrightBrowser, Requests) {
    let (bridge, requests) = fake_bridge(PlaywrightBridgeConfig::default(), |method, params| {
        match method {
            "newContext" => Reply::Result(json!("context-2")),
            "newPage" => Reply::Result(json!("page-3")),
            "url" => Reply::Result(json!("https://app.example.com/")),
            "evaluate" => Reply::Result(params["arg"].clone()),
            "goto" if params["url"] == "https://down.example.com/" => {
                Reply::Error("navigation", "net::ERR_CONNECTION_REFUSED")
            }
            "waitForSelector" if params["selector"] == "#missing" => {
                Reply::Error("timeout", "Timeout 100ms exceeded")
            }
            _ => Reply::Result(Value::Null),
        }
    })
    .await;
    (PlaywrightBrowser::new(bridge, "browser-1".to_string()), requests)
}

fn last(requests: &Requests) -> (String, Value) {
    requests.lock().last().cloned().unwrap()
}

#[test]
fn test_launcher_name() {
    assert_eq!(PlaywrightLauncher::default().name(), "playwright");
}

#[tokio::test]
async fn test_new_context_sends_recording_options() {
    let (browser, requests) = browser().await;

    browser
        .new_context(ContextOptions {
            viewport: ViewportSize {
                width: 1280,
                height: 720,
            },
            record_video: Some(VideoOptions {
                dir: PathBuf::from("videos"),
                size: ViewportSize {
                    width: 1280,
                    height: 720,
                },
                save_as: Some(PathBuf::from("videos/demo.webm")),
            }),
            storage_state: None,
        })
        .await
        .unwrap();

    let (method, params) = last(&requests);
    assert_eq!(method, "newContext");
    assert_eq!(params["browserId"], "browser-1");
    assert_eq!(params["options"]["viewport"], json!({ "width": 1280, "height": 720 }));
    assert_eq!(params["options"]["recordVideo"]["dir"], "videos");
    assert_eq!(params["options"]["recordVideo"]["saveAs"], "videos/demo.webm");
    assert!(params["options"].get("storageState").is_none());
}

#[tokio::test]
async fn test_page_operations_use_page_handle() {
    let (browser, requests) = browser().await;
    let context = browser.new_context(ContextOptions::default()).await.unwrap();
    let page = context.new_page().await.unwrap();

    page.goto("https://app.example.com/", LoadState::NetworkIdle)
        .await
        .unwrap();
    let (method, params) = last(&requests);
    assert_eq!(method, "goto");
    assert_eq!(
        params,
        json!({ "pageId": "page-3", "url": "https://app.example.com/", "waitUntil": "networkidle" })
    );

    page.click(
        "#buy",
        ClickOptions {
            button: MouseButton::Right,
            click_count: 2,
        },
    )
    .await
    .unwrap();
    let (_, params) = last(&requests);
    assert_eq!(params["button"], "right");
    assert_eq!(params["clickCount"], 2);

    page.type_text("#q", "hello", 80).await.unwrap();
    let (method, params) = last(&requests);
    assert_eq!(method, "type");
    assert_eq!(params["delay"], 80);

    assert_eq!(page.url().await.unwrap(), "https://app.example.com/");
}

#[tokio::test]
async fn test_evaluate_passes_script_and_argument() {
    let (browser, requests) = browser().await;
    let context = browser.new_context(ContextOptions::default()).await.unwrap();
    let page = context.new_page().await.unwrap();

    let result = page
        .evaluate("(arg) => arg", json!({ "selector": ".cta" }))
        .await
        .unwrap();

    assert_eq!(result, json!({ "selector": ".cta" }));
    let (_, params) = last(&requests);
    assert_eq!(params["script"], "(arg) => arg");
}

#[tokio::test]
async fn test_screenshot_params() {
    let (browser, requests) = browser().await;
    let context = browser.new_context(ContextOptions::default()).await.unwrap();
    let page = context.new_page().await.unwrap();

    page.screenshot(ScreenshotOptions {
        path: PathBuf::from("shots/chart.png"),
        full_page: false,
        selector: Some("#chart".to_string()),
    })
    .await
    .unwrap();

    let (method, params) = last(&requests);
    assert_eq!(method, "screenshot");
    assert_eq!(
        params,
        json!({ "pageId": "page-3", "path": "shots/chart.png", "fullPage": false, "selector": "#chart" })
    );
}

#[tokio::test]
async fn test_remote_errors_become_browser_errors() {
    let (browser, _) = browser().await;
    let context = browser.new_context(ContextOptions::default()).await.unwrap();
    let page = context.new_page().await.unwrap();

    let err = page.wait_for_selector("#missing", 100).await.unwrap_err();
    assert!(err.is_timeout());

    let err = page
        .goto("https://down.example.com/", LoadState::Load)
        .await
        .unwrap_err();
    assert!(matches!(err, BrowserError::NavigationFailed(ref m) if m.contains("REFUSED")));
}

#[tokio::test]
async fn test_context_storage_and_credentials() {
    let (browser, requests) = browser().await;
    let context = browser.new_context(ContextOptions::default()).await.unwrap();

    context
        .set_http_credentials(HttpCredentials {
            username: "admin".to_string(),
            password: "pw".to_string(),
        })
        .await
        .unwrap();
    context
        .save_storage_state(Path::new("state/session.json"))
        .await
        .unwrap();
    context.close().await.unwrap();

    let requests = requests.lock();
    let methods: Vec<&str> = requests.iter().map(|(m, _)| m.as_str()).collect();
    assert_eq!(
        methods,
        vec!["newContext", "setHttpCredentials", "storageState", "closeContext"]
    );
    assert_eq!(requests[1].1["username"], "admin");
    assert_eq!(requests[2].1["path"], "state/session.json");
    assert_eq!(requests[3].1["contextId"], "context-2");
}

#[tokio::test]
async fn test_browser_close_shuts_down_bridge() {
    let (browser, requests) = browser().await;

    browser.close().await.unwrap();

    let methods: Vec<String> = requests.lock().iter().map(|(m, _)| m.clone()).collect();
    assert_eq!(methods, vec!["closeBrowser", "shutdown"]);
}
