//! Element Internals
//!
//! Form association for custom controls: submission value, form owner and the
//! host's aggregated validity.

use crate::validity::{ValidityError, ValidityFlags};

/// Identifier of an owning form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FormId(pub u32);

/// Form-association collaborator of a form-associated host
pub trait FormAssociation {
    /// Set the value submitted with the owning form (`None` submits nothing)
    fn set_form_value(&mut self, value: Option<&str>);

    /// Value submitted with the owning form
    fn form_value(&self) -> Option<&str>;

    /// Owning form
    fn form(&self) -> Option<FormId>;

    /// Associate with (or detach from) a form
    fn set_form(&mut self, form: Option<FormId>);

    /// Aggregated validity flags
    fn validity(&self) -> &ValidityFlags;

    /// Message attached to the current validity
    fn validation_message(&self) -> &str;

    /// Replace validity flags and message.
    ///
    /// Setting any flag with an empty message is rejected.
    fn set_validity(&mut self, flags: ValidityFlags, message: &str) -> Result<(), ValidityError>;

    /// Clear all flags and the message
    fn clear_validity(&mut self);

    /// Whether the control is a candidate for constraint validation
    fn will_validate(&self) -> bool;

    fn set_will_validate(&mut self, will_validate: bool);

    /// Validity without side effects
    fn check_validity(&self) -> bool {
        !self.will_validate() || self.validity().valid()
    }

    /// Validity with the platform's native reporting
    fn report_validity(&mut self) -> bool;
}

/// Default form association, standing in for the platform's `ElementInternals`
#[derive(Debug, Clone)]
pub struct ElementInternals {
    form: Option<FormId>,
    form_value: Option<String>,
    validity: ValidityFlags,
    validation_message: String,
    will_validate: bool,
    native_reports: usize,
}

impl Default for ElementInternals {
    fn default() -> Self {
        Self {
            form: None,
            form_value: None,
            validity: ValidityFlags::default(),
            validation_message: String::new(),
            will_validate: true,
            native_reports: 0,
        }
    }
}

impl ElementInternals {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of times native error UI would have been shown
    pub fn native_reports(&self) -> usize {
        self.native_reports
    }
}

impl FormAssociation for ElementInternals {
    fn set_form_value(&mut self, value: Option<&str>) {
        self.form_value = value.map(|v| v.to_string());
    }

    fn form_value(&self) -> Option<&str> {
        self.form_value.as_deref()
    }

    fn form(&self) -> Option<FormId> {
        self.form
    }

    fn set_form(&mut self, form: Option<FormId>) {
        self.form = form;
    }

    fn validity(&self) -> &ValidityFlags {
        &self.validity
    }

    fn validation_message(&self) -> &str {
        &self.validation_message
    }

    fn set_validity(&mut self, flags: ValidityFlags, message: &str) -> Result<(), ValidityError> {
        if let Some(reason) = flags.active().next() {
            if message.is_empty() {
                return Err(ValidityError::MissingMessage(reason));
            }
            self.validation_message = message.to_string();
        } else {
            self.validation_message.clear();
        }
        self.validity = flags;
        Ok(())
    }

    fn clear_validity(&mut self) {
        self.validity = ValidityFlags::default();
        self.validation_message.clear();
    }

    fn will_validate(&self) -> bool {
        self.will_validate
    }

    fn set_will_validate(&mut self, will_validate: bool) {
        self.will_validate = will_validate;
    }

    fn report_validity(&mut self) -> bool {
        let valid = self.check_validity();
        if !valid {
            self.native_reports += 1;
            tracing::debug!("Native validity report: {}", self.validation_message);
        }
        valid
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validity::ValidityReason;

    #[test]
    fn test_element_internals_default_valid() {
        let internals = ElementInternals::new();
        assert!(internals.check_validity());
        assert!(internals.will_validate());
        assert_eq!(internals.validation_message(), "");
    }

    #[test]
    fn test_set_validity_requires_message() {
        let mut internals = ElementInternals::new();
        let flags = ValidityFlags::only(ValidityReason::ValueMissing);

        assert_eq!(
            internals.set_validity(flags, ""),
            Err(ValidityError::MissingMessage(ValidityReason::ValueMissing))
        );
        assert!(internals.check_validity());

        internals.set_validity(flags, "Required").unwrap();
        assert!(!internals.check_validity());
        assert_eq!(internals.validation_message(), "Required");
    }

    #[test]
    fn test_clearing_validity_drops_message() {
        let mut internals = ElementInternals::new();
        internals
            .set_validity(ValidityFlags::only(ValidityReason::CustomError), "Nope")
            .unwrap();
        internals.set_validity(ValidityFlags::default(), "ignored").unwrap();

        assert!(internals.check_validity());
        assert_eq!(internals.validation_message(), "");
    }

    #[test]
    fn test_report_counts_only_failures() {
        let mut internals = ElementInternals::new();
        assert!(internals.report_validity());
        assert_eq!(internals.native_reports(), 0);

        internals
            .set_validity(ValidityFlags::only(ValidityReason::TooLong), "Too long")
            .unwrap();
        assert!(!internals.report_validity());
        assert_eq!(internals.native_reports(), 1);
    }

    #[test]
    fn test_barred_control_is_valid() {
        let mut internals = ElementInternals::new();
        internals
            .set_validity(ValidityFlags::only(ValidityReason::ValueMissing), "Required")
            .unwrap();
        internals.set_will_validate(false);

        assert!(internals.check_validity());
        assert!(!internals.validity().valid());
    }
}
