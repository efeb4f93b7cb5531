//! Field Configuration

/// Host configuration options.
///
/// Behaviour switches a page author toggles (`validate-on-change`,
/// `custom-error-display`) live on the host as attributes; these are the
/// options chosen by the control's implementer.
#[derive(Debug, Clone)]
pub struct FieldConfig {
    /// `tabindex` assigned at bind time when the host has none
    pub default_tab_index: i32,

    /// Focus reaches the inner control through the composition boundary on
    /// its own, so the host does not forward it
    pub delegates_focus: bool,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            default_tab_index: 0,
            delegates_focus: false,
        }
    }
}

impl FieldConfig {
    pub fn with_default_tab_index(mut self, tab_index: i32) -> Self {
        self.default_tab_index = tab_index;
        self
    }

    pub fn with_delegated_focus(mut self, delegates_focus: bool) -> Self {
        self.delegates_focus = delegates_focus;
        self
    }
}
