//! Pristine Tracking
//!
//! Whether the user has interacted with a field yet. Errors are only surfaced
//! once a field is no longer pristine.

/// Pristine state of one field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PristineTracker {
    pristine: bool,
}

impl Default for PristineTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl PristineTracker {
    pub fn new() -> Self {
        Self { pristine: true }
    }

    pub fn is_pristine(&self) -> bool {
        self.pristine
    }

    /// Value-changing interaction; only counts with validate-on-change
    pub fn on_value_change(&mut self, validate_on_change: bool) {
        if validate_on_change {
            self.pristine = false;
        }
    }

    /// Forced validation (submission attempt, surfaced invalid signal)
    pub fn on_forced_validation(&mut self) {
        self.pristine = false;
    }

    /// Form reset
    pub fn reset(&mut self) {
        self.pristine = true;
    }
}
