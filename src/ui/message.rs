//! Transient toast messages.
//!
//! Imperative API: call [`show`] (or a severity-specific shorthand) from any
//! event handler and a toast is appended to the document body, then removed
//! once its display duration elapses.
//!
//! VALIDATION POLICY
//! =================
//! Unlike the session store, an unrecognized severity here is a *hard*
//! failure ([`MessageError::InvalidSeverity`]): a bad severity is a
//! programmer error, not bad server data.

#[cfg(test)]
#[path = "message_test.rs"]
mod message_test;

use std::str::FromStr;

use thiserror::Error;

/// Errors raised by the toast layer.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum MessageError {
    /// The severity string is not one of the four recognized values.
    #[error("invalid message severity: {0}")]
    InvalidSeverity(String),
}

/// The four recognized toast severities.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
    Success,
    Warning,
    Error,
    Info,
}

impl Severity {
    /// Wire/class name for this severity.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Error => "error",
            Self::Info => "info",
        }
    }
}

impl FromStr for Severity {
    type Err = MessageError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "success" => Ok(Self::Success),
            "warning" => Ok(Self::Warning),
            "error" => Ok(Self::Error),
            "info" => Ok(Self::Info),
            other => Err(MessageError::InvalidSeverity(other.to_owned())),
        }
    }
}

/// Resolved display configuration for one toast.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MessageOptions {
    /// How long the toast stays visible, in milliseconds.
    pub duration_ms: u32,
    /// Whether a close affordance is rendered.
    pub show_close: bool,
    /// Whether the toast is horizontally centered.
    pub center: bool,
    /// Whether identical toasts are grouped.
    pub grouping: bool,
}

impl Default for MessageOptions {
    fn default() -> Self {
        Self {
            duration_ms: 2000,
            show_close: false,
            center: true,
            grouping: false,
        }
    }
}

/// Caller-supplied overrides, shallow-merged over [`MessageOptions::default`]
/// (the override wins on every set field).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Overrides {
    pub duration_ms: Option<u32>,
    pub show_close: Option<bool>,
    pub center: Option<bool>,
    pub grouping: Option<bool>,
}

impl Overrides {
    fn merged(self) -> MessageOptions {
        let defaults = MessageOptions::default();
        MessageOptions {
            duration_ms: self.duration_ms.unwrap_or(defaults.duration_ms),
            show_close: self.show_close.unwrap_or(defaults.show_close),
            center: self.center.unwrap_or(defaults.center),
            grouping: self.grouping.unwrap_or(defaults.grouping),
        }
    }
}

/// One displayed notification.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toast {
    pub text: String,
    pub severity: Severity,
    pub options: MessageOptions,
}

/// Show a toast with a severity given as a string.
///
/// # Errors
///
/// Returns [`MessageError::InvalidSeverity`] if `severity` is not one of
/// `success`, `warning`, `error`, `info`; nothing is displayed in that case.
pub fn show(text: &str, severity: &str, overrides: Overrides) -> Result<Toast, MessageError> {
    let severity = severity.parse::<Severity>()?;
    Ok(display(text, severity, overrides))
}

/// Show a success toast.
pub fn success(text: &str, overrides: Overrides) -> Toast {
    display(text, Severity::Success, overrides)
}

/// Show a warning toast.
pub fn warning(text: &str, overrides: Overrides) -> Toast {
    display(text, Severity::Warning, overrides)
}

/// Show an error toast.
pub fn error(text: &str, overrides: Overrides) -> Toast {
    display(text, Severity::Error, overrides)
}

/// Show an info toast.
pub fn info(text: &str, overrides: Overrides) -> Toast {
    display(text, Severity::Info, overrides)
}

fn display(text: &str, severity: Severity, overrides: Overrides) -> Toast {
    let toast = Toast {
        text: text.to_owned(),
        severity,
        options: overrides.merged(),
    };
    render(&toast);
    toast
}

/// Append the toast to the document body and schedule its removal.
#[cfg(feature = "hydrate")]
fn render(toast: &Toast) {
    use wasm_bindgen::JsCast;

    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    let Some(body) = document.body() else {
        return;
    };
    let Ok(root) = document.create_element("div") else {
        return;
    };

    let mut class = format!("toast toast--{}", toast.severity.as_str());
    if toast.options.center {
        class.push_str(" toast--center");
    }
    root.set_class_name(&class);
    root.set_text_content(Some(&toast.text));

    if toast.options.show_close {
        if let Ok(button) = document.create_element("button") {
            button.set_class_name("toast__close");
            button.set_text_content(Some("\u{d7}"));
            if let Ok(button) = button.dyn_into::<web_sys::HtmlElement>() {
                let target = root.clone();
                let on_click =
                    wasm_bindgen::closure::Closure::<dyn FnMut()>::new(move || target.remove());
                button.set_onclick(Some(on_click.as_ref().unchecked_ref()));
                on_click.forget();
                let _ = root.append_child(&button);
            }
        }
    }

    let _ = body.append_child(&root);

    let target = root;
    gloo_timers::callback::Timeout::new(toast.options.duration_ms, move || target.remove())
        .forget();
}

#[cfg(not(feature = "hydrate"))]
fn render(toast: &Toast) {
    let _ = toast;
}
