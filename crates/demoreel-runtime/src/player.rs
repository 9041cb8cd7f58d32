//! Playback engine.
//!
//! Owns one browser session per [`DemoPlayer::play`] call:
//! `Init -> Auth? -> Running -> (Complete | Failed) -> Cleanup`.
//! Cleanup runs on every exit path and closes each resource independently.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, error, info, warn};

use demoreel_protocols::{
    Browser, BrowserContext, BrowserLauncher, ClickOptions, ContextOptions, ControlInput,
    HttpCredentials, LaunchOptions, LoadState, Page, ScreenshotOptions, VideoOptions,
};
use demoreel_script::{Auth, DemoScript, FormAuth, ScriptLoader};

use crate::config::PlayerConfig;
use crate::effects::EffectRenderer;
use crate::error::{PlayerError, StepError};
use crate::executors::{ExecutionContext, ExecutorRegistry};

/// Per-run overrides from the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayOptions {
    /// Overrides `config.headless` when set.
    pub headless: Option<bool>,
    /// Overrides `config.slowMo` when set.
    pub slow_mo: Option<u64>,
    pub screenshot_on_error: bool,
}

impl Default for PlayOptions {
    fn default() -> Self {
        Self {
            headless: None,
            slow_mo: None,
            screenshot_on_error: true,
        }
    }
}

/// Outcome of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaybackReport {
    pub name: String,
    pub steps_executed: usize,
    pub video_path: PathBuf,
    pub storage_state_saved: Option<PathBuf>,
}

/// Playback lifecycle phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackPhase {
    Init,
    Auth,
    Running,
    Complete,
    Failed,
    Cleanup,
}

impl fmt::Display for PlaybackPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PlaybackPhase::Init => "init",
            PlaybackPhase::Auth => "auth",
            PlaybackPhase::Running => "running",
            PlaybackPhase::Complete => "complete",
            PlaybackPhase::Failed => "failed",
            PlaybackPhase::Cleanup => "cleanup",
        };
        f.write_str(name)
    }
}

fn enter(phase: PlaybackPhase) {
    debug!(%phase, "Playback phase");
}

/// Resources owned by one run.
#[derive(Default)]
struct Session {
    browser: Option<Box<dyn Browser>>,
    context: Option<Box<dyn BrowserContext>>,
    page: Option<Arc<dyn Page>>,
    effects: Option<EffectRenderer>,
}

impl Session {
    /// Best-effort full-page screenshot; failures are only logged.
    async fn capture(&self, path: &Path) {
        let Some(page) = &self.page else {
            return;
        };
        match page.screenshot(ScreenshotOptions::full_page(path)).await {
            Ok(()) => info!("Error screenshot saved to {}", path.display()),
            Err(e) => warn!("Failed to capture screenshot {}: {}", path.display(), e),
        }
    }

    /// Clear effects, then close page, context and browser.
    async fn teardown(&mut self) {
        if let Some(effects) = self.effects.take() {
            if let Err(e) = effects.clear_all().await {
                warn!("Failed to clear effects: {}", e);
            }
        }
        if let Some(page) = self.page.take() {
            if let Err(e) = page.close().await {
                warn!("Failed to close page: {}", e);
            }
        }
        if let Some(context) = self.context.take() {
            if let Err(e) = context.close().await {
                warn!("Failed to close browser context: {}", e);
            }
        }
        if let Some(browser) = self.browser.take() {
            if let Err(e) = browser.close().await {
                warn!("Failed to close browser: {}", e);
            }
        }
    }
}

/// Replays demo scripts against a browser backend.
pub struct DemoPlayer {
    launcher: Arc<dyn BrowserLauncher>,
    control: Arc<dyn ControlInput>,
    config: PlayerConfig,
}

impl DemoPlayer {
    pub fn new(launcher: Arc<dyn BrowserLauncher>, control: Arc<dyn ControlInput>) -> Self {
        Self::with_config(launcher, control, PlayerConfig::default())
    }

    pub fn with_config(
        launcher: Arc<dyn BrowserLauncher>,
        control: Arc<dyn ControlInput>,
        config: PlayerConfig,
    ) -> Self {
        Self {
            launcher,
            control,
            config,
        }
    }

    pub fn config(&self) -> &PlayerConfig {
        &self.config
    }

    /// Load a script file and play it.
    pub async fn play_file(
        &self,
        loader: &ScriptLoader,
        path: &Path,
        options: &PlayOptions,
    ) -> Result<PlaybackReport, PlayerError> {
        let script = loader.load(path)?;
        self.play(&script, options).await
    }

    /// Play a validated script.
    pub async fn play(
        &self,
        script: &DemoScript,
        options: &PlayOptions,
    ) -> Result<PlaybackReport, PlayerError> {
        info!("Starting demo: {}", script.name);
        if let Some(description) = &script.description {
            info!("  {}", description);
        }

        let mut session = Session::default();
        let result = self.run(script, options, &mut session).await;

        match &result {
            Ok(report) => {
                enter(PlaybackPhase::Complete);
                info!("Demo completed successfully");
                info!("Video saved to: {}", report.video_path.display());
            }
            Err(e) => {
                enter(PlaybackPhase::Failed);
                error!("Demo failed: {}", e);
                if options.screenshot_on_error && !e.is_cancelled() {
                    session.capture(&self.config.diagnostics.error_screenshot).await;
                }
            }
        }

        enter(PlaybackPhase::Cleanup);
        session.teardown().await;
        result
    }

    async fn run(
        &self,
        script: &DemoScript,
        options: &PlayOptions,
        session: &mut Session,
    ) -> Result<PlaybackReport, PlayerError> {
        enter(PlaybackPhase::Init);
        let config = &script.config;

        let video_dir = config
            .video_path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        tokio::fs::create_dir_all(&video_dir).await?;

        if let Some(state) = &config.storage_state_path {
            if !tokio::fs::try_exists(state).await.unwrap_or(false) {
                return Err(PlayerError::StorageStateMissing {
                    path: state.clone(),
                });
            }
        }

        let launch = LaunchOptions {
            headless: options.headless.unwrap_or(config.headless),
            slow_mo_ms: options.slow_mo.or(config.slow_mo),
            args: Vec::new(),
        };
        debug!("Launching {} browser: {:?}", self.launcher.name(), launch);
        let browser = session.browser.insert(self.launcher.launch(launch).await?);

        let context = browser
            .new_context(ContextOptions {
                viewport: config.viewport,
                record_video: Some(VideoOptions {
                    dir: video_dir,
                    size: config.viewport,
                    save_as: Some(config.video_path.clone()),
                }),
                storage_state: config.storage_state_path.clone(),
            })
            .await?;
        let context = session.context.insert(context);

        let page = context.new_page().await?;
        let effects = EffectRenderer::new(page.clone());
        session.page = Some(page.clone());
        session.effects = Some(effects.clone());

        let ctx = ExecutionContext::new(
            page,
            effects,
            self.control.clone(),
            config.base_url.clone(),
            self.config.timings.clone(),
        );
        let registry = ExecutorRegistry::new();

        if let Some(auth) = script.effective_auth() {
            enter(PlaybackPhase::Auth);
            info!("Authenticating...");
            match auth {
                Auth::Form(form) => self.authenticate_form(form, &ctx).await?,
                Auth::Basic { username, password } => {
                    context
                        .set_http_credentials(HttpCredentials {
                            username: username.clone(),
                            password: password.clone(),
                        })
                        .await?
                }
                Auth::None => {}
            }
            info!("Authentication successful");
        }

        enter(PlaybackPhase::Running);
        let total = script.steps.len();
        for (i, step) in script.steps.iter().enumerate() {
            let index = i + 1;
            let description = step.description();
            info!("[{}/{}] {}", index, total, description);

            if let Err(source) = registry.dispatch(step, &ctx).await {
                error!("Step {} failed: {}", index, source);
                return Err(PlayerError::Step {
                    index,
                    description,
                    source,
                });
            }
        }

        let storage_state_saved = match &config.save_storage_state_path {
            Some(path) => {
                if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    tokio::fs::create_dir_all(parent).await?;
                }
                context.save_storage_state(path).await?;
                info!("Session state saved to {}", path.display());
                Some(path.clone())
            }
            None => None,
        };

        Ok(PlaybackReport {
            name: script.name.clone(),
            steps_executed: total,
            video_path: config.video_path.clone(),
            storage_state_saved,
        })
    }

    async fn authenticate_form(
        &self,
        form: &FormAuth,
        ctx: &ExecutionContext,
    ) -> Result<(), PlayerError> {
        let login_url = ctx.resolve_url(&form.url);
        let timeout = self.config.timings.auth_selector_timeout_ms;
        let selectors = &form.selectors;

        let attempt: Result<(), StepError> = async {
            ctx.page.goto(&login_url, LoadState::Load).await?;

            ctx.wait_visible(&selectors.username_field, timeout).await?;
            ctx.page
                .fill(&selectors.username_field, &form.credentials.username)
                .await?;

            ctx.wait_visible(&selectors.password_field, timeout).await?;
            ctx.page
                .fill(&selectors.password_field, &form.credentials.password)
                .await?;

            ctx.wait_visible(&selectors.submit_button, timeout).await?;
            ctx.page
                .click(&selectors.submit_button, ClickOptions::default())
                .await?;

            ctx.page.wait_for_load_state(LoadState::NetworkIdle).await?;
            Ok(())
        }
        .await;

        let Err(source) = attempt else {
            return Ok(());
        };

        let screenshot = &self.config.diagnostics.auth_screenshot;
        match ctx.page.screenshot(ScreenshotOptions::full_page(screenshot)).await {
            Ok(()) => info!("Authentication screenshot saved to {}", screenshot.display()),
            Err(e) => warn!("Failed to capture authentication screenshot: {}", e),
        }
        let current_url = ctx
            .page
            .url()
            .await
            .unwrap_or_else(|_| "<unknown>".to_string());

        Err(PlayerError::Authentication {
            login_url,
            current_url,
            username_field: selectors.username_field.clone(),
            password_field: selectors.password_field.clone(),
            submit_button: selectors.submit_button.clone(),
            source,
        })
    }
}

#[cfg(test)]
#[path = "player_tests.rs"]
mod tests;
