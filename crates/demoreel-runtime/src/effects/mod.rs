//! Visual effect renderer.
//!
//! Draws highlight, zoom, spotlight and caption overlays on a live page.
//! Overlay nodes carry a `data-demo-effect` attribute so each family can be
//! cleared independently. The stylesheet is injected once per renderer.

pub mod geometry;
pub mod scripts;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use serde_json::{Value, json};
use tokio::time::sleep;
use tracing::debug;

use demoreel_protocols::{BrowserError, Page};
use demoreel_script::{HighlightStep, NarrationStep, SpotlightStep, ZoomStep};

use crate::error::StepError;
use geometry::{Measurement, zoom_offset};

/// Overlay stylesheet.
pub const STYLES: &str = include_str!("styles.css");

const ZOOM_REVERT: Duration = Duration::from_millis(500);
const NARRATION_FADE_OUT: Duration = Duration::from_millis(400);

/// Session-scoped overlay renderer bound to one page.
#[derive(Clone)]
pub struct EffectRenderer {
    page: Arc<dyn Page>,
    styles_injected: Arc<AtomicBool>,
}

impl EffectRenderer {
    pub fn new(page: Arc<dyn Page>) -> Self {
        Self {
            page,
            styles_injected: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Inject the overlay stylesheet unless already present.
    pub async fn inject_styles(&self) -> Result<(), StepError> {
        if self.styles_injected.load(Ordering::SeqCst) {
            return Ok(());
        }
        self.page.add_style_tag(STYLES).await?;
        self.styles_injected.store(true, Ordering::SeqCst);
        debug!("Injected overlay stylesheet");
        Ok(())
    }

    /// Measure the first element matching `selector`.
    pub async fn measure(&self, selector: &str) -> Result<Measurement, StepError> {
        let value = self.page.evaluate(scripts::MEASURE, json!(selector)).await?;
        if value.is_null() {
            return Err(StepError::ElementNotFound(selector.to_string()));
        }
        serde_json::from_value(value).map_err(|e| {
            StepError::Browser(BrowserError::JavaScriptError(format!(
                "unexpected measurement for {}: {}",
                selector, e
            )))
        })
    }

    pub async fn highlight(&self, step: &HighlightStep) -> Result<(), StepError> {
        self.inject_styles().await?;
        let measurement = self.measure(&step.selector).await?;
        let area = measurement.document_box();
        debug!("Highlight {} at {:?}", step.selector, area);

        self.run(
            scripts::SHOW_HIGHLIGHT,
            json!({
                "box": area,
                "color": step.color,
                "borderWidth": step.border_width,
                "style": step.style.as_str(),
            }),
        )
        .await?;

        if step.duration > 0 {
            sleep(Duration::from_millis(step.duration)).await;
            self.clear_highlights().await?;
        }
        Ok(())
    }

    /// Scale the page about the element. `padding` does not move the element
    /// center, so it has no effect on the transform.
    pub async fn zoom(&self, step: &ZoomStep) -> Result<(), StepError> {
        self.inject_styles().await?;
        let measurement = self.measure(&step.selector).await?;
        let offset = zoom_offset(measurement.viewport, measurement.rect, step.scale);
        let origin = measurement.document_box().center();
        debug!(
            "Zoom {} x{} origin={:?} offset={:?}",
            step.selector, step.scale, origin, offset
        );

        self.run(
            scripts::APPLY_ZOOM,
            json!({
                "originX": origin.x,
                "originY": origin.y,
                "scale": step.scale,
                "offsetX": offset.x,
                "offsetY": offset.y,
            }),
        )
        .await?;

        if step.duration > 0 {
            sleep(Duration::from_millis(step.duration)).await;
            self.clear_zoom().await?;
        }
        Ok(())
    }

    pub async fn spotlight(&self, step: &SpotlightStep) -> Result<(), StepError> {
        self.inject_styles().await?;
        let measurement = self.measure(&step.selector).await?;

        self.run(
            scripts::SHOW_SPOTLIGHT,
            json!({
                "box": measurement.document_box(),
                "dimness": step.dimness,
                "borderRadius": step.border_radius,
            }),
        )
        .await?;

        if step.duration > 0 {
            sleep(Duration::from_millis(step.duration)).await;
            self.clear_spotlight().await?;
        }
        Ok(())
    }

    pub async fn show_narration(&self, step: &NarrationStep) -> Result<(), StepError> {
        self.inject_styles().await?;
        self.run(
            scripts::SHOW_NARRATION,
            json!({
                "text": step.text,
                "position": step.position.as_str(),
                "fontSize": step.font_size,
            }),
        )
        .await?;

        if step.duration > 0 {
            sleep(Duration::from_millis(step.duration)).await;
            self.clear_narration().await?;
        }
        Ok(())
    }

    pub async fn clear_highlights(&self) -> Result<(), StepError> {
        self.run(scripts::CLEAR_HIGHLIGHTS, Value::Null).await
    }

    /// Revert the zoom transform and wait for the transition to finish.
    pub async fn clear_zoom(&self) -> Result<(), StepError> {
        self.run(scripts::CLEAR_ZOOM, Value::Null).await?;
        sleep(ZOOM_REVERT).await;
        Ok(())
    }

    pub async fn clear_spotlight(&self) -> Result<(), StepError> {
        self.run(scripts::CLEAR_SPOTLIGHT, Value::Null).await
    }

    /// Fade the caption out and wait for it to be removed.
    pub async fn clear_narration(&self) -> Result<(), StepError> {
        self.run(scripts::CLEAR_NARRATION, Value::Null).await?;
        sleep(NARRATION_FADE_OUT).await;
        Ok(())
    }

    /// Clear every effect family concurrently.
    ///
    /// All four clears run even if one fails; the first failure is returned.
    pub async fn clear_all(&self) -> Result<(), StepError> {
        let (highlights, zoom, spotlight, narration) = futures::join!(
            self.clear_highlights(),
            self.clear_zoom(),
            self.clear_spotlight(),
            self.clear_narration(),
        );
        highlights.and(zoom).and(spotlight).and(narration)
    }

    async fn run(&self, script: &str, arg: Value) -> Result<(), StepError> {
        self.page.evaluate(script, arg).await?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "effects_tests.rs"]
mod tests;
