//! Script schema validation.
//!
//! Walks a parsed document and builds the typed [`DemoScript`]. Every
//! violation is recorded with its path; nothing stops at the first error and
//! nothing is coerced (a string `"3"` is not a number, unknown fields are
//! rejected).

use serde_json::{Map, Value};

use crate::error::{ValidationError, ValidationReport};
use crate::schema::*;

/// Script validator.
pub struct ScriptValidator;

impl ScriptValidator {
    /// Validate a parsed (and already substituted) document.
    pub fn validate(value: &Value) -> Result<DemoScript, ValidationReport> {
        let mut report = ValidationReport::default();
        let script = read_root(&mut report, value);

        match script {
            Some(script) if report.is_valid() => Ok(script),
            _ => {
                if report.is_valid() {
                    report.add_error(ValidationError::new("<root>", "invalid document"));
                }
                Err(report)
            }
        }
    }
}

// ============================================================================
// Field access
// ============================================================================

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn join(path: &str, name: &str) -> String {
    if path.is_empty() {
        name.to_string()
    } else {
        format!("{}.{}", path, name)
    }
}

/// Typed access to the fields of one object, recording violations.
struct Fields<'a> {
    map: &'a Map<String, Value>,
    path: String,
}

impl<'a> Fields<'a> {
    fn open(report: &mut ValidationReport, value: &'a Value, path: &str) -> Option<Self> {
        match value.as_object() {
            Some(map) => Some(Self {
                map,
                path: path.to_string(),
            }),
            None => {
                let path = if path.is_empty() { "<root>" } else { path };
                report.add_error(ValidationError::new(
                    path,
                    format!("expected object, got {}", type_name(value)),
                ));
                None
            }
        }
    }

    fn path_of(&self, name: &str) -> String {
        join(&self.path, name)
    }

    fn error(&self, report: &mut ValidationReport, name: &str, message: impl Into<String>) {
        report.add_error(ValidationError::new(self.path_of(name), message));
    }

    fn missing(&self, report: &mut ValidationReport, name: &str) {
        self.error(report, name, "required field is missing");
    }

    /// Reject fields outside `allowed`.
    fn deny_unknown(&self, report: &mut ValidationReport, allowed: &[&str]) {
        for key in self.map.keys() {
            if !allowed.contains(&key.as_str()) {
                self.error(report, key, "unrecognized field");
            }
        }
    }

    fn optional_str(&self, report: &mut ValidationReport, name: &str) -> Option<String> {
        match self.map.get(name)? {
            Value::String(s) => Some(s.clone()),
            other => {
                self.error(report, name, format!("expected string, got {}", type_name(other)));
                None
            }
        }
    }

    fn required_str(&self, report: &mut ValidationReport, name: &str) -> Option<String> {
        if !self.map.contains_key(name) {
            self.missing(report, name);
            return None;
        }
        self.optional_str(report, name)
    }

    fn bool_or(&self, report: &mut ValidationReport, name: &str, default: bool) -> bool {
        match self.map.get(name) {
            None => default,
            Some(Value::Bool(b)) => *b,
            Some(other) => {
                self.error(report, name, format!("expected boolean, got {}", type_name(other)));
                default
            }
        }
    }

    /// Integer `>= min`, `None` when absent or invalid.
    fn int(&self, report: &mut ValidationReport, name: &str, min: u64) -> Option<u64> {
        let value = self.map.get(name)?;
        let Value::Number(number) = value else {
            self.error(report, name, format!("expected integer, got {}", type_name(value)));
            return None;
        };

        // Integral floats such as `2000.0` count as integers.
        let integral = number.as_u64().or_else(|| {
            number
                .as_f64()
                .filter(|f| f.fract() == 0.0 && *f >= 0.0 && *f <= u64::MAX as f64)
                .map(|f| f as u64)
        });

        match integral {
            Some(n) if n >= min => Some(n),
            Some(_) => {
                self.error(report, name, format!("must be greater than or equal to {}", min));
                None
            }
            None if number.as_i64().is_some()
                || number.as_f64().is_some_and(|f| f.fract() == 0.0 && f < 0.0) =>
            {
                self.error(report, name, format!("must be greater than or equal to {}", min));
                None
            }
            None => {
                self.error(report, name, "expected integer, got fractional number");
                None
            }
        }
    }

    fn int_or(&self, report: &mut ValidationReport, name: &str, min: u64, default: u64) -> u64 {
        self.int(report, name, min).unwrap_or(default)
    }

    fn u32_or(&self, report: &mut ValidationReport, name: &str, min: u64, default: u32) -> u32 {
        match self.int(report, name, min) {
            None => default,
            Some(n) => u32::try_from(n).unwrap_or_else(|_| {
                self.error(report, name, format!("must be less than or equal to {}", u32::MAX));
                default
            }),
        }
    }

    /// Number accepted by `check`, which returns the violation message otherwise.
    fn number_or(
        &self,
        report: &mut ValidationReport,
        name: &str,
        check: fn(f64) -> Option<&'static str>,
        default: f64,
    ) -> f64 {
        let Some(value) = self.map.get(name) else {
            return default;
        };
        match value.as_f64() {
            Some(n) => match check(n) {
                None => n,
                Some(message) => {
                    self.error(report, name, message);
                    default
                }
            },
            None => {
                self.error(report, name, format!("expected number, got {}", type_name(value)));
                default
            }
        }
    }

    /// One of a closed set of wire names.
    fn choice_or<T: Copy>(
        &self,
        report: &mut ValidationReport,
        name: &str,
        parse: fn(&str) -> Option<T>,
        allowed: &[&str],
        default: T,
    ) -> T {
        match self.map.get(name) {
            None => default,
            Some(Value::String(s)) => parse(s).unwrap_or_else(|| {
                self.error(
                    report,
                    name,
                    format!("invalid value '{}', expected one of: {}", s, allowed.join(", ")),
                );
                default
            }),
            Some(other) => {
                self.error(report, name, format!("expected string, got {}", type_name(other)));
                default
            }
        }
    }

    fn optional_object(&self, report: &mut ValidationReport, name: &str) -> Option<Fields<'a>> {
        let value = self.map.get(name)?;
        Fields::open(report, value, &self.path_of(name))
    }

    fn required_object(&self, report: &mut ValidationReport, name: &str) -> Option<Fields<'a>> {
        if !self.map.contains_key(name) {
            self.missing(report, name);
            return None;
        }
        self.optional_object(report, name)
    }
}

fn positive(n: f64) -> Option<&'static str> {
    if n > 0.0 {
        None
    } else {
        Some("must be greater than 0")
    }
}

fn unit_interval(n: f64) -> Option<&'static str> {
    if (0.0..=1.0).contains(&n) {
        None
    } else {
        Some("must be between 0 and 1")
    }
}

// ============================================================================
// Document
// ============================================================================

fn read_root(report: &mut ValidationReport, value: &Value) -> Option<DemoScript> {
    let root = Fields::open(report, value, "")?;
    root.deny_unknown(report, &["demo"]);
    let demo = root.required_object(report, "demo")?;

    demo.deny_unknown(report, &["name", "description", "config", "auth", "steps"]);
    let name = demo.required_str(report, "name");
    let description = demo.optional_str(report, "description");
    let config = demo
        .required_object(report, "config")
        .and_then(|config| read_config(report, &config));
    let auth = demo
        .map
        .get("auth")
        .map(|value| read_auth(report, value, &demo.path_of("auth")));
    let steps = read_steps(report, &demo);

    Some(DemoScript {
        name: name?,
        description,
        config: config?,
        auth: match auth {
            Some(auth) => Some(auth?),
            None => None,
        },
        steps: steps?,
    })
}

fn read_config(report: &mut ValidationReport, config: &Fields<'_>) -> Option<DemoConfig> {
    config.deny_unknown(
        report,
        &[
            "baseUrl",
            "viewport",
            "videoPath",
            "slowMo",
            "headless",
            "storageStatePath",
            "saveStorageStatePath",
        ],
    );

    let base_url = config.required_str(report, "baseUrl").and_then(|url| {
        match url::Url::parse(&url) {
            Ok(_) => Some(url),
            Err(e) => {
                config.error(report, "baseUrl", format!("invalid URL '{}': {}", url, e));
                None
            }
        }
    });

    let default_viewport = ViewportSize::default();
    let viewport = match config.optional_object(report, "viewport") {
        Some(viewport) => {
            viewport.deny_unknown(report, &["width", "height"]);
            ViewportSize {
                width: viewport.u32_or(report, "width", 1, default_viewport.width),
                height: viewport.u32_or(report, "height", 1, default_viewport.height),
            }
        }
        None => default_viewport,
    };

    let video_path = config
        .optional_str(report, "videoPath")
        .unwrap_or_else(|| defaults::VIDEO_PATH.to_string());

    Some(DemoConfig {
        viewport,
        video_path: video_path.into(),
        slow_mo: config.int(report, "slowMo", 0),
        headless: config.bool_or(report, "headless", false),
        storage_state_path: config.optional_str(report, "storageStatePath").map(Into::into),
        save_storage_state_path: config
            .optional_str(report, "saveStorageStatePath")
            .map(Into::into),
        base_url: base_url?,
    })
}

fn read_auth(report: &mut ValidationReport, value: &Value, path: &str) -> Option<Auth> {
    let auth = Fields::open(report, value, path)?;
    let kind = auth.required_str(report, "type")?;

    match kind.as_str() {
        "none" => {
            auth.deny_unknown(report, &["type"]);
            Some(Auth::None)
        }
        "basic" => {
            auth.deny_unknown(report, &["type", "username", "password"]);
            let username = auth.required_str(report, "username");
            let password = auth.required_str(report, "password");
            Some(Auth::Basic {
                username: username?,
                password: password?,
            })
        }
        "form" => {
            auth.deny_unknown(report, &["type", "url", "credentials", "selectors"]);
            let url = auth.required_str(report, "url");

            let credentials = auth.required_object(report, "credentials").and_then(|c| {
                c.deny_unknown(report, &["username", "password"]);
                let username = c.required_str(report, "username");
                let password = c.required_str(report, "password");
                Some(Credentials {
                    username: username?,
                    password: password?,
                })
            });

            let selectors = auth.required_object(report, "selectors").and_then(|s| {
                s.deny_unknown(report, &["usernameField", "passwordField", "submitButton"]);
                let username_field = s.required_str(report, "usernameField");
                let password_field = s.required_str(report, "passwordField");
                let submit_button = s.required_str(report, "submitButton");
                Some(FormSelectors {
                    username_field: username_field?,
                    password_field: password_field?,
                    submit_button: submit_button?,
                })
            });

            Some(Auth::Form(FormAuth {
                url: url?,
                credentials: credentials?,
                selectors: selectors?,
            }))
        }
        other => {
            auth.error(
                report,
                "type",
                format!("invalid auth type '{}', expected one of: none, basic, form", other),
            );
            None
        }
    }
}

// ============================================================================
// Steps
// ============================================================================

fn read_steps(report: &mut ValidationReport, demo: &Fields<'_>) -> Option<Vec<Step>> {
    let path = demo.path_of("steps");
    let Some(value) = demo.map.get("steps") else {
        demo.missing(report, "steps");
        return None;
    };
    let Some(items) = value.as_array() else {
        report.add_error(ValidationError::new(
            path,
            format!("expected array, got {}", type_name(value)),
        ));
        return None;
    };
    if items.is_empty() {
        report.add_error(ValidationError::new(path, "must contain at least one step"));
        return None;
    }

    // Read every step even after a failure so all violations are reported.
    let steps: Vec<Option<Step>> = items
        .iter()
        .enumerate()
        .map(|(i, item)| read_step(report, item, &format!("{}[{}]", path, i)))
        .collect();
    steps.into_iter().collect()
}

fn read_step(report: &mut ValidationReport, value: &Value, path: &str) -> Option<Step> {
    let step = Fields::open(report, value, path)?;
    let kind_name = step.required_str(report, "type")?;
    let kind = match kind_name.parse::<StepKind>() {
        Ok(kind) => kind,
        Err(unknown) => {
            let known: Vec<&str> = StepKind::ALL.iter().map(StepKind::as_str).collect();
            step.error(
                report,
                "type",
                format!("{}; expected one of: {}", unknown, known.join(", ")),
            );
            return None;
        }
    };

    match kind {
        StepKind::Navigate => {
            step.deny_unknown(report, &["type", "url", "wait"]);
            let url = step.required_str(report, "url");
            let wait = step.choice_or(
                report,
                "wait",
                LoadState::parse,
                &["load", "domcontentloaded", "networkidle"],
                LoadState::Load,
            );
            Some(Step::Navigate(NavigateStep { url: url?, wait }))
        }
        StepKind::Click => {
            step.deny_unknown(report, &["type", "selector", "button", "clickCount"]);
            let selector = step.required_str(report, "selector");
            let button = step.choice_or(
                report,
                "button",
                MouseButton::parse,
                &["left", "right", "middle"],
                MouseButton::Left,
            );
            let click_count = step.u32_or(report, "clickCount", 1, 1);
            Some(Step::Click(ClickStep {
                selector: selector?,
                button,
                click_count,
            }))
        }
        StepKind::Type => {
            step.deny_unknown(report, &["type", "selector", "text", "speed", "clear"]);
            let selector = step.required_str(report, "selector");
            let text = step.required_str(report, "text");
            let speed = step.int_or(report, "speed", 1, defaults::TYPE_SPEED_MS);
            let clear = step.bool_or(report, "clear", false);
            Some(Step::Type(TypeStep {
                selector: selector?,
                text: text?,
                speed,
                clear,
            }))
        }
        StepKind::Wait => read_wait(report, &step).map(Step::Wait),
        StepKind::Highlight => {
            step.deny_unknown(
                report,
                &["type", "selector", "color", "duration", "style", "borderWidth"],
            );
            let selector = step.required_str(report, "selector");
            let color = step
                .optional_str(report, "color")
                .unwrap_or_else(|| defaults::HIGHLIGHT_COLOR.to_string());
            let duration = step.int_or(report, "duration", 1, defaults::HIGHLIGHT_DURATION_MS);
            let style = step.choice_or(
                report,
                "style",
                HighlightStyle::parse,
                HighlightStyle::VARIANTS,
                HighlightStyle::default(),
            );
            let border_width =
                step.u32_or(report, "borderWidth", 1, defaults::HIGHLIGHT_BORDER_WIDTH);
            Some(Step::Highlight(HighlightStep {
                selector: selector?,
                color,
                duration,
                style,
                border_width,
            }))
        }
        StepKind::Zoom => {
            step.deny_unknown(report, &["type", "selector", "scale", "duration", "padding"]);
            let selector = step.required_str(report, "selector");
            let scale = step.number_or(report, "scale", positive, defaults::ZOOM_SCALE);
            let duration = step.int_or(report, "duration", 1, defaults::ZOOM_DURATION_MS);
            let padding = step.u32_or(report, "padding", 0, defaults::ZOOM_PADDING);
            Some(Step::Zoom(ZoomStep {
                selector: selector?,
                scale,
                duration,
                padding,
            }))
        }
        StepKind::Spotlight => {
            step.deny_unknown(
                report,
                &["type", "selector", "duration", "dimness", "borderRadius"],
            );
            let selector = step.required_str(report, "selector");
            let duration = step.int_or(report, "duration", 1, defaults::SPOTLIGHT_DURATION_MS);
            let dimness =
                step.number_or(report, "dimness", unit_interval, defaults::SPOTLIGHT_DIMNESS);
            let border_radius =
                step.u32_or(report, "borderRadius", 0, defaults::SPOTLIGHT_BORDER_RADIUS);
            Some(Step::Spotlight(SpotlightStep {
                selector: selector?,
                duration,
                dimness,
                border_radius,
            }))
        }
        StepKind::Scroll => {
            step.deny_unknown(report, &["type", "target", "behavior", "block"]);
            let target = step.required_str(report, "target");
            let behavior = step.choice_or(
                report,
                "behavior",
                ScrollBehavior::parse,
                ScrollBehavior::VARIANTS,
                ScrollBehavior::default(),
            );
            let block = step.choice_or(
                report,
                "block",
                ScrollBlock::parse,
                ScrollBlock::VARIANTS,
                ScrollBlock::default(),
            );
            Some(Step::Scroll(ScrollStep {
                target: target?,
                behavior,
                block,
            }))
        }
        StepKind::Screenshot => {
            step.deny_unknown(report, &["type", "path", "fullPage", "selector"]);
            let path = step.required_str(report, "path");
            let full_page = step.bool_or(report, "fullPage", false);
            let selector = step.optional_str(report, "selector");
            Some(Step::Screenshot(ScreenshotStep {
                path: path?.into(),
                full_page,
                selector,
            }))
        }
        StepKind::Narration => {
            step.deny_unknown(
                report,
                &["type", "text", "duration", "position", "fontSize", "autoGenerate"],
            );
            let text = step.required_str(report, "text");
            let duration = step.int_or(report, "duration", 1, defaults::NARRATION_DURATION_MS);
            let position = step.choice_or(
                report,
                "position",
                NarrationPosition::parse,
                NarrationPosition::VARIANTS,
                NarrationPosition::default(),
            );
            let font_size = step.u32_or(report, "fontSize", 1, defaults::NARRATION_FONT_SIZE);
            let auto_generate = step.bool_or(report, "autoGenerate", false);
            Some(Step::Narration(NarrationStep {
                text: text?,
                duration,
                position,
                font_size,
                auto_generate,
            }))
        }
        StepKind::Pause => {
            step.deny_unknown(report, &["type", "message"]);
            let message = step.optional_str(report, "message");
            Some(Step::Pause(PauseStep { message }))
        }
    }
}

fn read_wait(report: &mut ValidationReport, step: &Fields<'_>) -> Option<WaitStep> {
    step.deny_unknown(report, &["type", "duration", "selector", "timeout"]);
    let duration = step.int(report, "duration", 1);
    let selector = step.optional_str(report, "selector");
    let timeout = step.int(report, "timeout", 1);

    let has_duration = step.map.contains_key("duration");
    let has_selector = step.map.contains_key("selector");
    if has_duration == has_selector {
        report.add_error(ValidationError::new(
            step.path.clone(),
            "must set exactly one of `duration` or `selector`",
        ));
        return None;
    }

    // `timeout` is still range-checked above but has no effect on a duration wait.
    match (duration, selector) {
        (Some(duration), None) => Some(WaitStep {
            duration: Some(duration),
            selector: None,
            timeout: None,
        }),
        (None, Some(selector)) => Some(WaitStep {
            duration: None,
            selector: Some(selector),
            timeout: Some(timeout.unwrap_or(defaults::WAIT_TIMEOUT_MS)),
        }),
        _ => None,
    }
}

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;
