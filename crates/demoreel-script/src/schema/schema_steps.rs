//! Step schema definitions.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::Serialize;

use super::{LoadState, MouseButton};
use crate::error::UnknownStepKind;

/// Declares a closed set of lowercase wire names.
macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident { $($variant:ident => $wire:literal),+ $(,)? }
        default = $default:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
        pub enum $name {
            $(
                #[serde(rename = $wire)]
                $variant,
            )+
        }

        impl $name {
            /// Accepted wire names, in declaration order.
            pub const VARIANTS: &'static [&'static str] = &[$($wire),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $wire,)+
                }
            }

            pub fn parse(value: &str) -> Option<Self> {
                match value {
                    $($wire => Some($name::$variant),)+
                    _ => None,
                }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                $name::$default
            }
        }
    };
}

wire_enum! {
    /// Highlight animation variant.
    pub enum HighlightStyle { Pulse => "pulse", Solid => "solid", Glow => "glow" }
    default = Pulse
}

wire_enum! {
    /// `scrollIntoView` behavior.
    pub enum ScrollBehavior { Auto => "auto", Smooth => "smooth" }
    default = Smooth
}

wire_enum! {
    /// `scrollIntoView` vertical alignment.
    pub enum ScrollBlock { Start => "start", Center => "center", End => "end", Nearest => "nearest" }
    default = Center
}

wire_enum! {
    /// Caption placement.
    pub enum NarrationPosition { Top => "top", Bottom => "bottom", Center => "center" }
    default = Bottom
}

/// Step discriminant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepKind {
    Navigate,
    Click,
    Type,
    Wait,
    Highlight,
    Zoom,
    Spotlight,
    Scroll,
    Screenshot,
    Narration,
    Pause,
}

impl StepKind {
    pub const ALL: [StepKind; 11] = [
        StepKind::Navigate,
        StepKind::Click,
        StepKind::Type,
        StepKind::Wait,
        StepKind::Highlight,
        StepKind::Zoom,
        StepKind::Spotlight,
        StepKind::Scroll,
        StepKind::Screenshot,
        StepKind::Narration,
        StepKind::Pause,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StepKind::Navigate => "navigate",
            StepKind::Click => "click",
            StepKind::Type => "type",
            StepKind::Wait => "wait",
            StepKind::Highlight => "highlight",
            StepKind::Zoom => "zoom",
            StepKind::Spotlight => "spotlight",
            StepKind::Scroll => "scroll",
            StepKind::Screenshot => "screenshot",
            StepKind::Narration => "narration",
            StepKind::Pause => "pause",
        }
    }
}

impl FromStr for StepKind {
    type Err = UnknownStepKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StepKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| UnknownStepKind(s.to_string()))
    }
}

impl fmt::Display for StepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One scripted action or effect.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Step {
    Navigate(NavigateStep),
    Click(ClickStep),
    Type(TypeStep),
    Wait(WaitStep),
    Highlight(HighlightStep),
    Zoom(ZoomStep),
    Spotlight(SpotlightStep),
    Scroll(ScrollStep),
    Screenshot(ScreenshotStep),
    Narration(NarrationStep),
    Pause(PauseStep),
}

impl Step {
    pub fn kind(&self) -> StepKind {
        match self {
            Step::Navigate(_) => StepKind::Navigate,
            Step::Click(_) => StepKind::Click,
            Step::Type(_) => StepKind::Type,
            Step::Wait(_) => StepKind::Wait,
            Step::Highlight(_) => StepKind::Highlight,
            Step::Zoom(_) => StepKind::Zoom,
            Step::Spotlight(_) => StepKind::Spotlight,
            Step::Scroll(_) => StepKind::Scroll,
            Step::Screenshot(_) => StepKind::Screenshot,
            Step::Narration(_) => StepKind::Narration,
            Step::Pause(_) => StepKind::Pause,
        }
    }

    /// Human-readable one-line description used in progress logs and errors.
    pub fn description(&self) -> String {
        match self {
            Step::Navigate(step) => format!("Navigate to {}", step.url),
            Step::Click(step) => format!("Click {}", step.selector),
            Step::Type(step) => format!("Type \"{}\" into {}", step.text, step.selector),
            Step::Wait(step) => match step.target() {
                WaitTarget::Selector { selector, .. } => format!("Wait for {}", selector),
                WaitTarget::Duration(ms) => format!("Wait {}ms", ms),
            },
            Step::Highlight(step) => format!("Highlight {}", step.selector),
            Step::Zoom(step) => format!("Zoom to {}", step.selector),
            Step::Spotlight(step) => format!("Spotlight {}", step.selector),
            Step::Scroll(step) => format!("Scroll to {}", step.target),
            Step::Screenshot(step) => format!("Capture screenshot: {}", step.path.display()),
            Step::Narration(step) => format!("Show narration: \"{}\"", step.text),
            Step::Pause(step) => match &step.message {
                Some(message) => format!("Pause: {}", message),
                None => "Pause".to_string(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavigateStep {
    pub url: String,
    pub wait: LoadState,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClickStep {
    pub selector: String,
    pub button: MouseButton,
    pub click_count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeStep {
    pub selector: String,
    pub text: String,
    /// Delay between keystrokes in milliseconds.
    pub speed: u64,
    pub clear: bool,
}

/// Either a fixed sleep or a selector wait; the validator guarantees exactly one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WaitStep {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selector: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,
}

/// What a [`WaitStep`] waits for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitTarget<'a> {
    Selector { selector: &'a str, timeout_ms: u64 },
    Duration(u64),
}

impl WaitStep {
    pub fn target(&self) -> WaitTarget<'_> {
        match (&self.selector, self.duration) {
            (Some(selector), _) => WaitTarget::Selector {
                selector,
                timeout_ms: self.timeout.unwrap_or(super::defaults::WAIT_TIMEOUT_MS),
            },
            (None, duration) => WaitTarget::Duration(duration.unwrap_or(0)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HighlightStep {
    pub selector: String,
    pub color: String,
    pub duration: u64,
    pub style: HighlightStyle,
    pub border_width: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ZoomStep {
    pub selector: String,
    pub scale: f64,
    pub duration: u64,
    pub padding: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpotlightStep {
    pub selector: String,
    pub duration: u64,
    pub dimness: f64,
    pub border_radius: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScrollStep {
    pub target: String,
    pub behavior: ScrollBehavior,
    pub block: ScrollBlock,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenshotStep {
    pub path: PathBuf,
    pub full_page: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selector: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NarrationStep {
    pub text: String,
    pub duration: u64,
    pub position: NarrationPosition,
    pub font_size: u32,
    pub auto_generate: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PauseStep {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}
