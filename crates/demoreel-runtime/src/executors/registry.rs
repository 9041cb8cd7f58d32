//! Step executor registry.

use demoreel_script::Step;

use super::*;

/// Fixed mapping from step kind to executor.
///
/// Dispatch is an exhaustive match, so adding a step kind without an
/// executor does not compile.
pub struct ExecutorRegistry {
    navigate: NavigateExecutor,
    click: ClickExecutor,
    type_text: TypeExecutor,
    wait: WaitExecutor,
    highlight: HighlightExecutor,
    zoom: ZoomExecutor,
    spotlight: SpotlightExecutor,
    scroll: ScrollExecutor,
    screenshot: ScreenshotExecutor,
    narration: NarrationExecutor,
    pause: PauseExecutor,
}

impl ExecutorRegistry {
    pub fn new() -> Self {
        Self {
            navigate: NavigateExecutor,
            click: ClickExecutor,
            type_text: TypeExecutor,
            wait: WaitExecutor,
            highlight: HighlightExecutor,
            zoom: ZoomExecutor,
            spotlight: SpotlightExecutor,
            scroll: ScrollExecutor,
            screenshot: ScreenshotExecutor,
            narration: NarrationExecutor,
            pause: PauseExecutor,
        }
    }

    /// Run `step` with its executor.
    pub async fn dispatch(&self, step: &Step, ctx: &ExecutionContext) -> Result<(), StepError> {
        match step {
            Step::Navigate(s) => self.navigate.execute(s, ctx).await,
            Step::Click(s) => self.click.execute(s, ctx).await,
            Step::Type(s) => self.type_text.execute(s, ctx).await,
            Step::Wait(s) => self.wait.execute(s, ctx).await,
            Step::Highlight(s) => self.highlight.execute(s, ctx).await,
            Step::Zoom(s) => self.zoom.execute(s, ctx).await,
            Step::Spotlight(s) => self.spotlight.execute(s, ctx).await,
            Step::Scroll(s) => self.scroll.execute(s, ctx).await,
            Step::Screenshot(s) => self.screenshot.execute(s, ctx).await,
            Step::Narration(s) => self.narration.execute(s, ctx).await,
            Step::Pause(s) => self.pause.execute(s, ctx).await,
        }
    }
}

impl Default for ExecutorRegistry {
    fn default() -> Self {
        Self::new()
    }
}
