//! Field errors and diagnostics

/// Field errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    #[error("Input node already bound to <{0}>")]
    AlreadyBound(String),
}

/// Non-fatal configuration problems found while mirroring attributes
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldDiagnostic {
    #[error(
        "minlength and pattern cannot be used together and should be combined if possible \
         (for example pattern=\"[a-z]\" and minlength=\"{min_length}\" as pattern=\"[a-z]{{{min_length},}}\"); \
         a \"data-tooshort\" message should move to \"data-patternmismatch\" (pattern={pattern:?})"
    )]
    MinLengthWithPattern { min_length: String, pattern: String },
}
