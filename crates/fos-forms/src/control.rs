//! Inner Controls
//!
//! The native-like widget a host wraps, and a reference `<input>` that
//! evaluates its own constraints.

use fos_dom::{AttributeMap, ValidityFlags, ValidityReason};
use regex::Regex;

/// Inner control of a form-associated host.
///
/// The host owns exactly one for its whole lifetime and is its only writer.
pub trait InnerControl {
    /// Current value
    fn value(&self) -> &str;

    /// Set the value programmatically
    fn set_value(&mut self, value: &str);

    /// Declared default value
    fn default_value(&self) -> &str;

    fn set_default_value(&mut self, value: &str);

    /// Raw per-reason validity snapshot
    fn validity(&self) -> ValidityFlags;

    /// Native message for the current failure (empty when valid)
    fn validation_message(&self) -> String;

    fn get_attribute(&self, name: &str) -> Option<&str>;

    fn set_attribute(&mut self, name: &str, value: &str);

    fn remove_attribute(&mut self, name: &str);

    fn is_disabled(&self) -> bool;

    fn set_disabled(&mut self, disabled: bool);

    /// Move focus to the control
    fn focus(&mut self);
}

/// Input types the reference input distinguishes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputType {
    #[default]
    Text,
    Password,
    Email,
    Number,
    Tel,
    Url,
    Search,
}

impl InputType {
    /// Parse from string; unknown types behave as text
    pub fn parse(s: &str) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "password" => Self::Password,
            "email" => Self::Email,
            "number" => Self::Number,
            "tel" => Self::Tel,
            "url" => Self::Url,
            "search" => Self::Search,
            _ => Self::Text,
        }
    }

    /// Whether `pattern`, `minlength` and `maxlength` apply
    pub fn is_text_like(&self) -> bool {
        !matches!(self, Self::Number)
    }
}

/// Reference `<input>` element.
///
/// Length constraints only apply once the value was last changed by a user
/// edit ([`NativeInput::type_text`]); a programmatic [`InnerControl::set_value`]
/// does not trigger them.
#[derive(Debug, Clone, Default)]
pub struct NativeInput {
    attributes: AttributeMap,
    /// Dirty value; `None` while the value still follows the `value` attribute
    value: Option<String>,
    edited_by_user: bool,
    focus_count: usize,
    /// Compiled `pattern`, rebuilt when the attribute changes
    pattern: Option<Regex>,
}

impl NativeInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate the user replacing the text
    pub fn type_text(&mut self, text: &str) {
        self.value = Some(text.to_string());
        self.edited_by_user = true;
    }

    pub fn attributes(&self) -> &AttributeMap {
        &self.attributes
    }

    pub fn input_type(&self) -> InputType {
        self.attributes.get_attribute("type").map(InputType::parse).unwrap_or_default()
    }

    /// Number of times focus was moved here
    pub fn focus_count(&self) -> usize {
        self.focus_count
    }

    fn number_attr(&self, name: &str) -> Option<f64> {
        self.attributes.get_attribute(name)?.trim().parse().ok()
    }

    fn length_attr(&self, name: &str) -> Option<usize> {
        self.attributes.get_attribute(name)?.trim().parse().ok()
    }

    fn compile_pattern(&mut self) {
        self.pattern = self.attributes.get_attribute("pattern").and_then(|pattern| {
            match Regex::new(&format!("^(?:{})$", pattern)) {
                Ok(regex) => Some(regex),
                Err(err) => {
                    // Invalid patterns are ignored, as browsers do
                    tracing::warn!("Ignoring invalid pattern {:?}: {}", pattern, err);
                    None
                }
            }
        });
    }

    fn check_number(&self, value: &str, flags: &mut ValidityFlags) {
        let Ok(number) = value.trim().parse::<f64>() else {
            flags.bad_input = true;
            return;
        };
        if !number.is_finite() {
            flags.bad_input = true;
            return;
        }

        let min = self.number_attr("min");
        if min.is_some_and(|min| number < min) {
            flags.range_underflow = true;
        }
        if self.number_attr("max").is_some_and(|max| number > max) {
            flags.range_overflow = true;
        }

        let step = match self.attributes.get_attribute("step") {
            Some(step) if step.eq_ignore_ascii_case("any") => None,
            Some(step) => step.trim().parse::<f64>().ok().filter(|s| *s > 0.0).or(Some(1.0)),
            None => Some(1.0),
        };
        if let Some(step) = step {
            let steps = (number - min.unwrap_or(0.0)) / step;
            if (steps - steps.round()).abs() > 1e-9 {
                flags.step_mismatch = true;
            }
        }
    }

    fn message_for(&self, reason: ValidityReason) -> String {
        let length = self.value().chars().count();
        let attr = |name: &str| self.attributes.get_attribute(name).unwrap_or_default().to_string();
        match reason {
            ValidityReason::TypeMismatch => match self.input_type() {
                InputType::Email => "Please enter an email address.".to_string(),
                InputType::Url => "Please enter a URL.".to_string(),
                _ => reason.default_message().to_string(),
            },
            ValidityReason::TooLong => format!(
                "Please shorten this text to {} characters or less (you are currently using {} characters).",
                attr("maxlength"),
                length
            ),
            ValidityReason::TooShort => format!(
                "Please lengthen this text to {} characters or more (you are currently using {} characters).",
                attr("minlength"),
                length
            ),
            ValidityReason::RangeUnderflow => {
                format!("Value must be greater than or equal to {}.", attr("min"))
            }
            ValidityReason::RangeOverflow => {
                format!("Value must be less than or equal to {}.", attr("max"))
            }
            _ => reason.default_message().to_string(),
        }
    }
}

impl InnerControl for NativeInput {
    fn value(&self) -> &str {
        match &self.value {
            Some(value) => value.as_str(),
            None => self.default_value(),
        }
    }

    fn set_value(&mut self, value: &str) {
        self.value = Some(value.to_string());
        self.edited_by_user = false;
    }

    fn default_value(&self) -> &str {
        self.attributes.get_attribute("value").unwrap_or_default()
    }

    fn set_default_value(&mut self, value: &str) {
        self.attributes.set_attribute("value", value);
    }

    fn validity(&self) -> ValidityFlags {
        let mut flags = ValidityFlags::default();
        // Disabled controls are barred from constraint validation
        if self.is_disabled() {
            return flags;
        }

        let value = self.value();
        let input_type = self.input_type();
        if value.is_empty() {
            flags.value_missing = self.attributes.has_attribute("required");
            return flags;
        }

        match input_type {
            InputType::Number => self.check_number(value, &mut flags),
            InputType::Email => {
                let well_formed = value.split_once('@').is_some_and(|(local, domain)| {
                    !local.is_empty()
                        && !domain.is_empty()
                        && !domain.starts_with('.')
                        && !domain.ends_with('.')
                        && !domain.contains('@')
                });
                if !well_formed || value.chars().any(char::is_whitespace) {
                    flags.type_mismatch = true;
                }
            }
            InputType::Url => {
                if url::Url::parse(value).is_err() {
                    flags.type_mismatch = true;
                }
            }
            _ => {}
        }

        if input_type.is_text_like() {
            if let Some(regex) = &self.pattern {
                if !regex.is_match(value) {
                    flags.pattern_mismatch = true;
                }
            }

            if self.edited_by_user {
                let length = value.chars().count();
                if self.length_attr("maxlength").is_some_and(|max| length > max) {
                    flags.too_long = true;
                }
                if self.length_attr("minlength").is_some_and(|min| length < min) {
                    flags.too_short = true;
                }
            }
        }

        flags
    }

    fn validation_message(&self) -> String {
        self.validity()
            .active()
            .last()
            .map(|reason| self.message_for(reason))
            .unwrap_or_default()
    }

    fn get_attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get_attribute(name)
    }

    fn set_attribute(&mut self, name: &str, value: &str) {
        self.attributes.set_attribute(name, value);
        if name == "pattern" {
            self.compile_pattern();
        }
    }

    fn remove_attribute(&mut self, name: &str) {
        if self.attributes.remove_attribute(name).is_some() && name == "pattern" {
            self.pattern = None;
        }
    }

    fn is_disabled(&self) -> bool {
        self.attributes.has_attribute("disabled")
    }

    fn set_disabled(&mut self, disabled: bool) {
        self.attributes.toggle_attribute("disabled", Some(disabled));
    }

    fn focus(&mut self) {
        self.focus_count += 1;
    }
}
