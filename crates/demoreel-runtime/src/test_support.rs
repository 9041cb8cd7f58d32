//! Recording browser doubles for unit tests.

use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::{Value, json};
use tokio::time::Instant;

use demoreel_protocols::{
    Browser, BrowserContext, BrowserError, BrowserLauncher, ClickOptions, ContextOptions,
    ControlError, ControlInput, ControlSignal, HttpCredentials, LaunchOptions, LoadState, Page,
    ScreenshotOptions,
};

use crate::effects::scripts;

/// Shared, timestamped call log.
#[derive(Clone, Default)]
pub struct CallLog {
    entries: Arc<Mutex<Vec<(Instant, String)>>>,
}

impl CallLog {
    pub fn push(&self, call: impl Into<String>) {
        self.entries.lock().push((Instant::now(), call.into()));
    }

    pub fn calls(&self) -> Vec<String> {
        self.entries.lock().iter().map(|(_, c)| c.clone()).collect()
    }

    pub fn timed(&self) -> Vec<(Instant, String)> {
        self.entries.lock().clone()
    }

    pub fn count(&self, prefix: &str) -> usize {
        self.calls().iter().filter(|c| c.starts_with(prefix)).count()
    }

    pub fn contains(&self, call: &str) -> bool {
        self.calls().iter().any(|c| c == call)
    }

    pub fn position(&self, call: &str) -> Option<usize> {
        self.calls().iter().position(|c| c == call)
    }
}

fn script_name(script: &str) -> &'static str {
    match script {
        s if s == scripts::MEASURE => "measure",
        s if s == scripts::SHOW_HIGHLIGHT => "show_highlight",
        s if s == scripts::APPLY_ZOOM => "apply_zoom",
        s if s == scripts::SHOW_SPOTLIGHT => "show_spotlight",
        s if s == scripts::SHOW_NARRATION => "show_narration",
        s if s == scripts::CLEAR_HIGHLIGHTS => "clear_highlights",
        s if s == scripts::CLEAR_ZOOM => "clear_zoom",
        s if s == scripts::CLEAR_SPOTLIGHT => "clear_spotlight",
        s if s == scripts::CLEAR_NARRATION => "clear_narration",
        s if s == scripts::SCROLL_INTO_VIEW => "scroll_into_view",
        _ => "script",
    }
}

/// Page double. Selectors in `hidden` never become visible.
pub struct MockPage {
    log: CallLog,
    hidden: Mutex<HashSet<String>>,
    fail_screenshots: bool,
    fail_teardown: bool,
    url: Mutex<String>,
}

impl MockPage {
    pub fn new(log: CallLog) -> Self {
        Self {
            log,
            hidden: Mutex::new(HashSet::new()),
            fail_screenshots: false,
            fail_teardown: false,
            url: Mutex::new("about:blank".to_string()),
        }
    }

    pub fn with_hidden(self, selector: &str) -> Self {
        self.hidden.lock().insert(selector.to_string());
        self
    }

    pub fn with_failing_screenshots(mut self) -> Self {
        self.fail_screenshots = true;
        self
    }

    /// Effect clears and `close` fail.
    pub fn with_failing_teardown(mut self) -> Self {
        self.fail_teardown = true;
        self
    }

    fn is_hidden(&self, selector: &str) -> bool {
        self.hidden.lock().contains(selector)
    }
}

#[async_trait]
impl Page for MockPage {
    async fn goto(&self, url: &str, wait_until: LoadState) -> Result<(), BrowserError> {
        self.log.push(format!("goto {} {}", url, wait_until.as_str()));
        *self.url.lock() = url.to_string();
        Ok(())
    }

    async fn wait_for_load_state(&self, state: LoadState) -> Result<(), BrowserError> {
        self.log.push(format!("load_state {}", state.as_str()));
        Ok(())
    }

    async fn wait_for_selector(&self, selector: &str, timeout_ms: u64) -> Result<(), BrowserError> {
        self.log.push(format!("wait_for {} {}", selector, timeout_ms));
        if self.is_hidden(selector) {
            tokio::time::sleep(Duration::from_millis(timeout_ms)).await;
            return Err(BrowserError::Timeout(format!("waiting for {}", selector)));
        }
        Ok(())
    }

    async fn click(&self, selector: &str, options: ClickOptions) -> Result<(), BrowserError> {
        self.log.push(format!(
            "click {} {} x{}",
            selector,
            options.button.as_str(),
            options.click_count
        ));
        Ok(())
    }

    async fn fill(&self, selector: &str, value: &str) -> Result<(), BrowserError> {
        self.log.push(format!("fill {} {}", selector, value));
        Ok(())
    }

    async fn type_text(&self, selector: &str, text: &str, delay_ms: u64) -> Result<(), BrowserError> {
        self.log.push(format!("type {} {} {}", selector, text, delay_ms));
        Ok(())
    }

    async fn evaluate(&self, script: &str, arg: Value) -> Result<Value, BrowserError> {
        let name = script_name(script);
        let selector = match &arg {
            Value::String(s) => Some(s.clone()),
            Value::Object(map) => map.get("selector").and_then(Value::as_str).map(str::to_string),
            _ => None,
        };
        match &selector {
            Some(selector) => self.log.push(format!("eval {} {}", name, selector)),
            None => self.log.push(format!("eval {}", name)),
        }

        if self.fail_teardown && name.starts_with("clear_") {
            return Err(BrowserError::JavaScriptError("Execution context was destroyed".to_string()));
        }

        let hidden = selector.as_deref().is_some_and(|s| self.is_hidden(s));
        Ok(match name {
            "measure" if hidden => Value::Null,
            "measure" => json!({
                "rect": { "x": 100.0, "y": 200.0, "width": 300.0, "height": 50.0 },
                "scroll": { "x": 0.0, "y": 0.0 },
                "viewport": { "width": 1920.0, "height": 1080.0 }
            }),
            "scroll_into_view" => Value::Bool(!hidden),
            _ => Value::Null,
        })
    }

    async fn add_style_tag(&self, _css: &str) -> Result<(), BrowserError> {
        self.log.push("add_style");
        Ok(())
    }

    async fn screenshot(&self, options: ScreenshotOptions) -> Result<(), BrowserError> {
        self.log.push(format!("screenshot {}", options.path.display()));
        if self.fail_screenshots {
            return Err(BrowserError::ScreenshotFailed("disk full".to_string()));
        }
        Ok(())
    }

    async fn url(&self) -> Result<String, BrowserError> {
        Ok(self.url.lock().clone())
    }

    async fn close(&self) -> Result<(), BrowserError> {
        self.log.push("page.close");
        if self.fail_teardown {
            return Err(BrowserError::Closed("page crashed".to_string()));
        }
        Ok(())
    }
}

pub struct MockContext {
    log: CallLog,
    page: Arc<MockPage>,
    fail_close: bool,
}

#[async_trait]
impl BrowserContext for MockContext {
    async fn new_page(&self) -> Result<Arc<dyn Page>, BrowserError> {
        self.log.push("context.new_page");
        Ok(self.page.clone())
    }

    async fn set_http_credentials(&self, credentials: HttpCredentials) -> Result<(), BrowserError> {
        self.log.push(format!("context.credentials {}", credentials.username));
        Ok(())
    }

    async fn save_storage_state(&self, path: &Path) -> Result<(), BrowserError> {
        self.log.push(format!("context.save_state {}", path.display()));
        Ok(())
    }

    async fn close(&self) -> Result<(), BrowserError> {
        self.log.push("context.close");
        if self.fail_close {
            return Err(BrowserError::Closed("context already closed".to_string()));
        }
        Ok(())
    }
}

pub struct MockBrowser {
    log: CallLog,
    page: Arc<MockPage>,
    fail_context_close: bool,
}

#[async_trait]
impl Browser for MockBrowser {
    async fn new_context(
        &self,
        options: ContextOptions,
    ) -> Result<Box<dyn BrowserContext>, BrowserError> {
        self.log.push(format!(
            "browser.new_context {}x{} state={}",
            options.viewport.width,
            options.viewport.height,
            options.storage_state.is_some()
        ));
        Ok(Box::new(MockContext {
            log: self.log.clone(),
            page: self.page.clone(),
            fail_close: self.fail_context_close,
        }))
    }

    async fn close(&self) -> Result<(), BrowserError> {
        self.log.push("browser.close");
        Ok(())
    }
}

pub struct MockLauncher {
    log: CallLog,
    page: Arc<MockPage>,
    fail_context_close: bool,
}

impl MockLauncher {
    pub fn new(log: CallLog, page: MockPage) -> Self {
        Self {
            log,
            page: Arc::new(page),
            fail_context_close: false,
        }
    }

    pub fn with_failing_context_close(mut self) -> Self {
        self.fail_context_close = true;
        self
    }
}

#[async_trait]
impl BrowserLauncher for MockLauncher {
    fn name(&self) -> &str {
        "mock"
    }

    async fn launch(&self, options: LaunchOptions) -> Result<Box<dyn Browser>, BrowserError> {
        self.log.push(format!(
            "launch headless={} slow_mo={:?}",
            options.headless, options.slow_mo_ms
        ));
        Ok(Box::new(MockBrowser {
            log: self.log.clone(),
            page: self.page.clone(),
            fail_context_close: self.fail_context_close,
        }))
    }
}

/// Control double returning a fixed signal.
pub struct ScriptedControl {
    signal: ControlSignal,
    log: CallLog,
}

impl ScriptedControl {
    pub fn new(log: CallLog, signal: ControlSignal) -> Self {
        Self { signal, log }
    }
}

impl ControlInput for ScriptedControl {
    fn read_confirmation(&self, prompt: &str) -> Result<ControlSignal, ControlError> {
        self.log.push(format!("confirm {}", prompt));
        Ok(self.signal)
    }
}
