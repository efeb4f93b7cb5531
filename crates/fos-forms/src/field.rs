//! Form-Associated Field Host
//!
//! Wraps an inner control and makes the pair behave like a native form
//! field: constraint attributes are mirrored down, validity is aggregated up
//! and the constraint validation API is exposed on the host.

use fos_dom::{
    AttributeMap, ElementInternals, EventListeners, FieldEvent, FormAssociation, FormId,
    ValidityFlags, ValidityReason,
};

use crate::config::FieldConfig;
use crate::constraints::ConstraintAttribute;
use crate::control::InnerControl;
use crate::error::{FieldDiagnostic, FieldError};
use crate::evaluator::ValidityEvaluator;
use crate::pristine::PristineTracker;
use crate::sync::AttributeSynchronizer;

pub(crate) const VALIDATE_ON_CHANGE: &str = "validate-on-change";
pub(crate) const CUSTOM_ERROR_DISPLAY: &str = "custom-error-display";
const INVALID: &str = "invalid";
const TAB_INDEX: &str = "tabindex";

/// The constraint validation API of a form-associated field.
///
/// Object safe, so an owning form can hold fields of any control type.
pub trait FormField {
    /// `name` attribute
    fn name(&self) -> Option<&str>;

    fn value(&self) -> &str;

    /// Set the value, keeping the submission value in lockstep
    fn set_value(&mut self, value: &str);

    fn default_value(&self) -> &str;

    fn is_disabled(&self) -> bool;

    fn set_disabled(&mut self, disabled: bool);

    fn form(&self) -> Option<FormId>;

    fn set_form(&mut self, form: Option<FormId>);

    /// Value submitted with the owning form
    fn form_value(&self) -> Option<&str>;

    /// Aggregated validity
    fn validity(&self) -> &ValidityFlags;

    fn validation_message(&self) -> &str;

    fn will_validate(&self) -> bool;

    /// True validity, regardless of pristine state
    fn check_validity(&self) -> bool;

    /// Validity with native reporting
    fn report_validity(&mut self) -> bool;

    /// Flag a custom error, or clear it with an empty message
    fn set_custom_validity(&mut self, message: &str);

    /// Flag a custom error and surface it immediately
    fn set_error_message(&mut self, message: &str);

    /// Presentation flag: invalid and no longer pristine
    fn is_invalid(&self) -> bool;

    fn is_pristine(&self) -> bool;

    /// Restore the declared default value and pristine state
    fn form_reset(&mut self);

    /// Validation forced by a submission attempt; returns validity
    fn force_validation(&mut self) -> bool;
}

/// Host element of a form-associated custom control
#[derive(Debug)]
pub struct FieldHost<C, A = ElementInternals> {
    pub(crate) local_name: String,
    pub(crate) attributes: AttributeMap,
    pub(crate) inner: Option<C>,
    pub(crate) internals: A,
    pub(crate) config: FieldConfig,
    pub(crate) sync: AttributeSynchronizer,
    pub(crate) pristine: PristineTracker,
    pub(crate) evaluator: ValidityEvaluator,
    pub(crate) invalid: bool,
    pub(crate) listeners: EventListeners,
    pub(crate) diagnostics: Vec<FieldDiagnostic>,
}

impl<C: InnerControl> FieldHost<C, ElementInternals> {
    pub fn new(local_name: &str) -> Self {
        Self::with_internals(local_name, ElementInternals::new())
    }
}

impl<C: InnerControl, A: FormAssociation> FieldHost<C, A> {
    pub fn with_internals(local_name: &str, internals: A) -> Self {
        Self {
            local_name: local_name.to_string(),
            attributes: AttributeMap::new(),
            inner: None,
            internals,
            config: FieldConfig::default(),
            sync: AttributeSynchronizer::new(),
            pristine: PristineTracker::new(),
            evaluator: ValidityEvaluator::new(),
            invalid: false,
            listeners: EventListeners::new(),
            diagnostics: Vec::new(),
        }
    }

    pub fn with_config(mut self, config: FieldConfig) -> Self {
        self.config = config;
        self
    }

    /// Set declarative attributes, as present in markup before binding
    pub fn with_attributes<'a>(mut self, attrs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        for (name, value) in attrs {
            self.set_attribute(name, value);
        }
        self
    }

    pub fn local_name(&self) -> &str {
        &self.local_name
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    /// Bind the inner control. Only the first call succeeds.
    ///
    /// Attributes already on the host are replayed through the synchronizer,
    /// a `tabindex` is assigned when missing and validity is evaluated.
    pub fn bind_input_node(&mut self, mut inner: C) -> Result<(), FieldError> {
        if self.inner.is_some() {
            return Err(FieldError::AlreadyBound(self.local_name.clone()));
        }

        let diagnostics = self.sync.replay(&mut self.attributes, &mut inner);
        self.diagnostics.extend(diagnostics);

        if !self.attributes.has_attribute(TAB_INDEX) {
            self.attributes
                .set_attribute(TAB_INDEX, self.config.default_tab_index.to_string());
        }

        self.internals.set_form_value(Some(inner.value()));
        self.internals.set_will_validate(!inner.is_disabled());
        self.inner = Some(inner);
        tracing::debug!("Bound input node to <{}>", self.local_name);

        self.evaluate();
        Ok(())
    }

    pub fn is_bound(&self) -> bool {
        self.inner.is_some()
    }

    pub fn inner(&self) -> Option<&C> {
        self.inner.as_ref()
    }

    /// Direct access for the control's own widget code. Changes made here
    /// reach the host through [`FieldHost::handle_inner_event`].
    pub fn inner_mut(&mut self) -> Option<&mut C> {
        self.inner.as_mut()
    }

    pub fn internals(&self) -> &A {
        &self.internals
    }

    pub fn attributes(&self) -> &AttributeMap {
        &self.attributes
    }

    pub fn get_attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get_attribute(&name.to_ascii_lowercase())
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.has_attribute(&name.to_ascii_lowercase())
    }

    pub fn set_attribute(&mut self, name: &str, value: &str) {
        let name = name.to_ascii_lowercase();
        let old = self.attributes.set_attribute(name.as_str(), value);
        self.attribute_changed(&name, old.as_deref(), Some(value));
    }

    pub fn remove_attribute(&mut self, name: &str) {
        let name = name.to_ascii_lowercase();
        if let Some(old) = self.attributes.remove_attribute(&name) {
            self.attribute_changed(&name, Some(&old), None);
        }
    }

    pub fn toggle_attribute(&mut self, name: &str, force: Option<bool>) -> bool {
        let present = force.unwrap_or_else(|| !self.has_attribute(name));
        if present {
            if !self.has_attribute(name) {
                self.set_attribute(name, "");
            }
        } else {
            self.remove_attribute(name);
        }
        present
    }

    fn attribute_changed(&mut self, name: &str, old: Option<&str>, new: Option<&str>) {
        if name == CUSTOM_ERROR_DISPLAY {
            self.reflect_invalid();
            return;
        }

        let Some(attr) = ConstraintAttribute::from_name(name) else {
            return;
        };
        if attr == ConstraintAttribute::Disabled {
            self.internals.set_will_validate(new.is_none());
        }

        let Some(inner) = self.inner.as_mut() else {
            return;
        };
        if let Some(diagnostic) = self.sync.synchronize(attr, old, new, &mut self.attributes, inner) {
            self.diagnostics.push(diagnostic);
        }
        // A clean inner value follows its `value` attribute
        if attr == ConstraintAttribute::Value {
            self.internals.set_form_value(Some(inner.value()));
        }
        self.evaluate();
    }

    /// Configuration conflicts found while mirroring attributes
    pub fn diagnostics(&self) -> &[FieldDiagnostic] {
        &self.diagnostics
    }

    pub fn validate_on_change(&self) -> bool {
        self.attributes.has_attribute(VALIDATE_ON_CHANGE)
    }

    pub fn custom_error_display(&self) -> bool {
        self.attributes.has_attribute(CUSTOM_ERROR_DISPLAY)
    }

    /// Reason most recently reported by evaluation or custom validity
    pub fn validation_error(&self) -> Option<ValidityReason> {
        self.evaluator.active_reason()
    }

    pub fn set_default_value(&mut self, value: &str) {
        if let Some(inner) = self.inner.as_mut() {
            inner.set_default_value(value);
        }
        self.set_attribute("value", value);
    }

    pub(crate) fn set_invalid(&mut self, invalid: bool) {
        self.invalid = invalid;
        self.reflect_invalid();
    }

    /// `invalid` attribute: only with custom error display
    fn reflect_invalid(&mut self) {
        let reflected = self.invalid && self.custom_error_display();
        self.attributes.toggle_attribute(INVALID, Some(reflected));
    }

    /// Re-derive validity from the inner control and surface it when the
    /// field is no longer pristine
    pub fn evaluate(&mut self) {
        self.set_invalid(false);
        let Some(inner) = self.inner.as_ref() else {
            return;
        };

        let evaluation = self.evaluator.evaluate(
            inner,
            &self.attributes,
            self.pristine.is_pristine(),
            &mut self.internals,
        );
        if evaluation.invalid {
            self.set_invalid(true);
            self.surface_invalid();
        }
    }

    /// Either hand the error to the caller through an `invalid` signal, or
    /// use native reporting
    pub(crate) fn surface_invalid(&mut self) {
        if self.custom_error_display() {
            self.raise_invalid(FieldEvent::invalid(false));
        } else {
            self.internals.report_validity();
        }
    }
}

impl<C: InnerControl, A: FormAssociation> FormField for FieldHost<C, A> {
    fn name(&self) -> Option<&str> {
        self.attributes.get_attribute("name")
    }

    fn value(&self) -> &str {
        self.inner.as_ref().map(|inner| inner.value()).unwrap_or_default()
    }

    fn set_value(&mut self, value: &str) {
        if let Some(inner) = self.inner.as_mut() {
            inner.set_value(value);
        }
        self.internals.set_form_value(Some(value));
        self.evaluate();
    }

    fn default_value(&self) -> &str {
        match &self.inner {
            Some(inner) => inner.default_value(),
            None => self.attributes.get_attribute("value").unwrap_or_default(),
        }
    }

    fn is_disabled(&self) -> bool {
        self.attributes.has_attribute("disabled")
    }

    fn set_disabled(&mut self, disabled: bool) {
        if let Some(inner) = self.inner.as_mut() {
            inner.set_disabled(disabled);
        }
        self.toggle_attribute("disabled", Some(disabled));
    }

    fn form(&self) -> Option<FormId> {
        self.internals.form()
    }

    fn set_form(&mut self, form: Option<FormId>) {
        self.internals.set_form(form);
    }

    fn form_value(&self) -> Option<&str> {
        self.internals.form_value()
    }

    fn validity(&self) -> &ValidityFlags {
        self.internals.validity()
    }

    fn validation_message(&self) -> &str {
        self.internals.validation_message()
    }

    fn will_validate(&self) -> bool {
        self.internals.will_validate()
    }

    fn check_validity(&self) -> bool {
        self.internals.check_validity()
    }

    fn report_validity(&mut self) -> bool {
        self.internals.report_validity()
    }

    fn set_custom_validity(&mut self, message: &str) {
        self.evaluator.set_custom_validity(message, &mut self.internals);
    }

    fn set_error_message(&mut self, message: &str) {
        self.evaluator.set_custom_validity(message, &mut self.internals);
        if self.internals.check_validity() {
            return;
        }
        self.pristine.on_forced_validation();
        self.set_invalid(true);
        self.surface_invalid();
    }

    fn is_invalid(&self) -> bool {
        self.invalid
    }

    fn is_pristine(&self) -> bool {
        self.pristine.is_pristine()
    }

    fn form_reset(&mut self) {
        self.pristine.reset();
        let default = self.attributes.get_attribute("value").unwrap_or_default().to_string();
        tracing::debug!("Resetting <{}> to {:?}", self.local_name, default);
        self.set_value(&default);
    }

    fn force_validation(&mut self) -> bool {
        if self.internals.check_validity() {
            return true;
        }

        // raise_invalid clears pristine
        if self.raise_invalid(FieldEvent::invalid(true)) {
            self.internals.report_validity();
        }
        false
    }
}
