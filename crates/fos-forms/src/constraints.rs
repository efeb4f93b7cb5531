//! Constraint Attributes
//!
//! The attributes a host mirrors onto its inner control.

/// Recognized constraint attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConstraintAttribute {
    Type,
    Value,
    Placeholder,
    Required,
    Min,
    Max,
    MinLength,
    MaxLength,
    Pattern,
    Disabled,
}

impl ConstraintAttribute {
    /// All constraint attributes, in replay order
    pub const ALL: [ConstraintAttribute; 10] = [
        Self::Type,
        Self::Value,
        Self::Placeholder,
        Self::Required,
        Self::Min,
        Self::Max,
        Self::MinLength,
        Self::MaxLength,
        Self::Pattern,
        Self::Disabled,
    ];

    /// Attribute name (lowercase)
    pub fn name(&self) -> &'static str {
        match self {
            Self::Type => "type",
            Self::Value => "value",
            Self::Placeholder => "placeholder",
            Self::Required => "required",
            Self::Min => "min",
            Self::Max => "max",
            Self::MinLength => "minlength",
            Self::MaxLength => "maxlength",
            Self::Pattern => "pattern",
            Self::Disabled => "disabled",
        }
    }

    /// Parse an attribute name (ASCII case-insensitive)
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.name().eq_ignore_ascii_case(name))
    }

    /// Boolean attributes only carry presence
    pub fn is_boolean(&self) -> bool {
        matches!(self, Self::Required | Self::Disabled)
    }
}
