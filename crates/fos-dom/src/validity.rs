//! Validity State
//!
//! Constraint validation flags shared by inner controls and element internals.

use serde::{Deserialize, Serialize};

use crate::attributes::data_attribute_name;

/// A named constraint failure.
///
/// Declaration order is snapshot order; when several reasons are true at once
/// the last one in this order is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ValidityReason {
    ValueMissing,
    TypeMismatch,
    PatternMismatch,
    TooLong,
    TooShort,
    RangeUnderflow,
    RangeOverflow,
    StepMismatch,
    BadInput,
    CustomError,
}

impl ValidityReason {
    /// All reasons in snapshot order
    pub const ALL: [ValidityReason; 10] = [
        Self::ValueMissing,
        Self::TypeMismatch,
        Self::PatternMismatch,
        Self::TooLong,
        Self::TooShort,
        Self::RangeUnderflow,
        Self::RangeOverflow,
        Self::StepMismatch,
        Self::BadInput,
        Self::CustomError,
    ];

    /// camelCase key, as exposed on `ValidityState`
    pub fn key(self) -> &'static str {
        match self {
            Self::ValueMissing => "valueMissing",
            Self::TypeMismatch => "typeMismatch",
            Self::PatternMismatch => "patternMismatch",
            Self::TooLong => "tooLong",
            Self::TooShort => "tooShort",
            Self::RangeUnderflow => "rangeUnderflow",
            Self::RangeOverflow => "rangeOverflow",
            Self::StepMismatch => "stepMismatch",
            Self::BadInput => "badInput",
            Self::CustomError => "customError",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.key() == key)
    }

    /// Name of the host attribute carrying a custom message for this reason
    pub fn data_attribute(self) -> String {
        data_attribute_name(self.key())
    }

    /// Generic message used when nothing more specific is available
    pub fn default_message(self) -> &'static str {
        match self {
            Self::ValueMissing => "Please fill out this field.",
            Self::TypeMismatch => "Please enter a valid value.",
            Self::PatternMismatch => "Please match the requested format.",
            Self::TooLong => "Please shorten this text.",
            Self::TooShort => "Please lengthen this text.",
            Self::RangeUnderflow => "Value must be greater than or equal to the minimum.",
            Self::RangeOverflow => "Value must be less than or equal to the maximum.",
            Self::StepMismatch => "Please enter a valid value.",
            Self::BadInput => "Please enter a number.",
            Self::CustomError => "Please enter a valid value.",
        }
    }
}

impl std::fmt::Display for ValidityReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// Per-reason validity flags
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidityFlags {
    pub value_missing: bool,
    pub type_mismatch: bool,
    pub pattern_mismatch: bool,
    pub too_long: bool,
    pub too_short: bool,
    pub range_underflow: bool,
    pub range_overflow: bool,
    pub step_mismatch: bool,
    pub bad_input: bool,
    pub custom_error: bool,
}

impl ValidityFlags {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flags with exactly one reason set
    pub fn only(reason: ValidityReason) -> Self {
        let mut flags = Self::default();
        flags.set(reason, true);
        flags
    }

    pub fn get(&self, reason: ValidityReason) -> bool {
        match reason {
            ValidityReason::ValueMissing => self.value_missing,
            ValidityReason::TypeMismatch => self.type_mismatch,
            ValidityReason::PatternMismatch => self.pattern_mismatch,
            ValidityReason::TooLong => self.too_long,
            ValidityReason::TooShort => self.too_short,
            ValidityReason::RangeUnderflow => self.range_underflow,
            ValidityReason::RangeOverflow => self.range_overflow,
            ValidityReason::StepMismatch => self.step_mismatch,
            ValidityReason::BadInput => self.bad_input,
            ValidityReason::CustomError => self.custom_error,
        }
    }

    pub fn set(&mut self, reason: ValidityReason, value: bool) {
        let slot = match reason {
            ValidityReason::ValueMissing => &mut self.value_missing,
            ValidityReason::TypeMismatch => &mut self.type_mismatch,
            ValidityReason::PatternMismatch => &mut self.pattern_mismatch,
            ValidityReason::TooLong => &mut self.too_long,
            ValidityReason::TooShort => &mut self.too_short,
            ValidityReason::RangeUnderflow => &mut self.range_underflow,
            ValidityReason::RangeOverflow => &mut self.range_overflow,
            ValidityReason::StepMismatch => &mut self.step_mismatch,
            ValidityReason::BadInput => &mut self.bad_input,
            ValidityReason::CustomError => &mut self.custom_error,
        };
        *slot = value;
    }

    /// True iff no reason is set
    pub fn valid(&self) -> bool {
        self.active().next().is_none()
    }

    /// Reasons currently set, in snapshot order
    pub fn active(&self) -> impl Iterator<Item = ValidityReason> + '_ {
        ValidityReason::ALL.into_iter().filter(|r| self.get(*r))
    }
}

/// Validity write errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidityError {
    #[error("A validation message is required when setting the {0} flag")]
    MissingMessage(ValidityReason),
}
