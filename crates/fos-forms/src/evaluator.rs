//! Validity Evaluation
//!
//! Aggregates an inner control's multi-reason snapshot into the host's
//! single-reason validity.

use fos_dom::{AttributeMap, FormAssociation, ValidityFlags, ValidityReason};

use crate::control::InnerControl;
use crate::messages::ErrorMessageResolver;

/// Result of one evaluation
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Evaluation {
    /// Reported reason, `None` when valid
    pub reason: Option<ValidityReason>,
    /// Resolved message, empty when valid
    pub message: String,
    /// Whether the failure should be surfaced (invalid and not pristine)
    pub invalid: bool,
}

impl Evaluation {
    pub fn is_valid(&self) -> bool {
        self.reason.is_none()
    }
}

/// Sole writer of a host's aggregated validity
#[derive(Debug, Clone, Default)]
pub struct ValidityEvaluator {
    active: Option<ValidityReason>,
}

impl ValidityEvaluator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reason most recently reported
    pub fn active_reason(&self) -> Option<ValidityReason> {
        self.active
    }

    /// Re-derive aggregated validity from the inner control.
    ///
    /// Reasons are visited in snapshot order and the last failing one is
    /// kept, so `customError` outranks everything else.
    pub fn evaluate<C, A>(
        &mut self,
        inner: &C,
        host: &AttributeMap,
        pristine: bool,
        internals: &mut A,
    ) -> Evaluation
    where
        C: InnerControl + ?Sized,
        A: FormAssociation + ?Sized,
    {
        let snapshot = inner.validity();
        if snapshot.valid() {
            self.active = None;
            internals.clear_validity();
            return Evaluation::default();
        }

        let resolver = ErrorMessageResolver::new(host, inner);
        let mut evaluation = Evaluation::default();
        for reason in snapshot.active() {
            self.active = Some(reason);
            evaluation.invalid = !pristine;
            evaluation.message = resolver.resolve(reason);
            evaluation.reason = Some(reason);
        }

        if let Some(reason) = evaluation.reason {
            if let Err(err) = internals.set_validity(ValidityFlags::only(reason), &evaluation.message) {
                tracing::warn!("Rejected validity update: {}", err);
            }
        }
        tracing::debug!(
            "Evaluated validity: {:?} ({:?}), surfaced: {}",
            evaluation.reason,
            evaluation.message,
            evaluation.invalid
        );
        evaluation
    }

    /// Flag a custom error with `message`, or clear custom validity when
    /// `message` is empty
    pub fn set_custom_validity<A: FormAssociation + ?Sized>(&mut self, message: &str, internals: &mut A) {
        if message.is_empty() {
            self.active = None;
            internals.clear_validity();
            return;
        }

        self.active = Some(ValidityReason::CustomError);
        if let Err(err) = internals.set_validity(ValidityFlags::only(ValidityReason::CustomError), message) {
            tracing::warn!("Rejected custom validity: {}", err);
        }
    }
}
