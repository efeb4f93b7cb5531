//! Attribute Synchronization
//!
//! Mirrors constraint attributes from a host onto its inner control.
//!
//! `minlength` is never forwarded. It is rewritten to `pattern=".{N,}"` on
//! both elements so the inner control enforces it for programmatic values
//! too, and so the effective constraint is visible on the host. A custom
//! `data-tooshort` message is copied to `data-patternmismatch` to follow the
//! changed failure reason. An explicit `pattern` blocks the rewrite.

use fos_dom::{AttributeMap, ValidityReason};

use crate::constraints::ConstraintAttribute;
use crate::control::InnerControl;
use crate::error::FieldDiagnostic;

const PATTERN: &str = "pattern";
const MIN_LENGTH: &str = "minlength";

/// Host-to-inner attribute mirror
#[derive(Debug, Clone, Default)]
pub struct AttributeSynchronizer {
    /// Pattern written by the minlength rewrite, while still in effect
    synthesized_pattern: Option<String>,
    /// `data-patternmismatch` was copied from `data-tooshort`
    copied_message: bool,
    /// Host's own `data-patternmismatch`, overwritten by the copy
    replaced_message: Option<String>,
}

impl AttributeSynchronizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pattern currently synthesized from `minlength`
    pub fn synthesized_pattern(&self) -> Option<&str> {
        self.synthesized_pattern.as_deref()
    }

    /// Push every constraint attribute already on the host through the
    /// same rules as later changes
    pub fn replay<C: InnerControl + ?Sized>(
        &mut self,
        host: &mut AttributeMap,
        inner: &mut C,
    ) -> Vec<FieldDiagnostic> {
        let mut diagnostics = Vec::new();
        for attr in ConstraintAttribute::ALL {
            let Some(value) = host.get_attribute(attr.name()).map(str::to_string) else {
                continue;
            };
            // Written by the minlength rewrite just above, already mirrored
            if attr == ConstraintAttribute::Pattern && self.synthesized_pattern.as_deref() == Some(value.as_str()) {
                continue;
            }
            diagnostics.extend(self.synchronize(attr, None, Some(&value), host, inner));
        }
        diagnostics
    }

    /// Mirror one attribute change
    pub fn synchronize<C: InnerControl + ?Sized>(
        &mut self,
        attr: ConstraintAttribute,
        old: Option<&str>,
        new: Option<&str>,
        host: &mut AttributeMap,
        inner: &mut C,
    ) -> Option<FieldDiagnostic> {
        tracing::trace!("Synchronizing {}: {:?} -> {:?}", attr.name(), old, new);
        match attr {
            ConstraintAttribute::MinLength => self.min_length_changed(new, host, inner),
            ConstraintAttribute::Pattern => self.pattern_changed(new, host, inner),
            _ => {
                match new {
                    Some(_) if attr.is_boolean() => inner.set_attribute(attr.name(), ""),
                    Some(value) => inner.set_attribute(attr.name(), value),
                    None => inner.remove_attribute(attr.name()),
                }
                None
            }
        }
    }

    fn min_length_changed<C: InnerControl + ?Sized>(
        &mut self,
        new: Option<&str>,
        host: &mut AttributeMap,
        inner: &mut C,
    ) -> Option<FieldDiagnostic> {
        let Some(min_length) = new else {
            self.drop_rewrite(host, inner);
            return None;
        };

        if let Some(pattern) = self.explicit_pattern(host) {
            let diagnostic = FieldDiagnostic::MinLengthWithPattern {
                min_length: min_length.to_string(),
                pattern: pattern.to_string(),
            };
            tracing::warn!("{}", diagnostic);
            return Some(diagnostic);
        }

        let pattern = format!(".{{{},}}", min_length);
        inner.set_attribute(PATTERN, &pattern);
        host.set_attribute(PATTERN, pattern.as_str());
        self.synthesized_pattern = Some(pattern);

        let too_short = ValidityReason::TooShort.data_attribute();
        if let Some(message) = host.get_attribute(&too_short).map(str::to_string) {
            let replaced = host.set_attribute(ValidityReason::PatternMismatch.data_attribute(), message);
            if !self.copied_message {
                self.replaced_message = replaced;
                self.copied_message = true;
            }
        }
        None
    }

    fn pattern_changed<C: InnerControl + ?Sized>(
        &mut self,
        new: Option<&str>,
        host: &mut AttributeMap,
        inner: &mut C,
    ) -> Option<FieldDiagnostic> {
        let Some(pattern) = new else {
            inner.remove_attribute(PATTERN);
            self.synthesized_pattern = None;
            return None;
        };

        inner.set_attribute(PATTERN, pattern);

        // An explicit pattern replaces a rewrite that was in effect. Without
        // one, any conflict was already reported when minlength arrived.
        if self.synthesized_pattern.take().is_none() {
            return None;
        }
        self.forget_copied_message(host);

        let min_length = host.get_attribute(MIN_LENGTH)?;
        let diagnostic = FieldDiagnostic::MinLengthWithPattern {
            min_length: min_length.to_string(),
            pattern: pattern.to_string(),
        };
        tracing::warn!("{}", diagnostic);
        Some(diagnostic)
    }

    /// Host `pattern` that was not produced by the rewrite
    fn explicit_pattern<'a>(&self, host: &'a AttributeMap) -> Option<&'a str> {
        host.get_attribute(PATTERN)
            .filter(|pattern| self.synthesized_pattern.as_deref() != Some(*pattern))
    }

    fn drop_rewrite<C: InnerControl + ?Sized>(&mut self, host: &mut AttributeMap, inner: &mut C) {
        if let Some(pattern) = self.synthesized_pattern.take() {
            if host.get_attribute(PATTERN) == Some(pattern.as_str()) {
                host.remove_attribute(PATTERN);
                inner.remove_attribute(PATTERN);
            }
        }
        self.forget_copied_message(host);
    }

    fn forget_copied_message(&mut self, host: &mut AttributeMap) {
        if !std::mem::take(&mut self.copied_message) {
            return;
        }
        let name = ValidityReason::PatternMismatch.data_attribute();
        match self.replaced_message.take() {
            Some(message) => {
                host.set_attribute(name, message);
            }
            None => {
                host.remove_attribute(&name);
            }
        }
    }
}
