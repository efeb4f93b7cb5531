//! Error Messages
//!
//! Resolution of the message shown for a failing constraint.

use fos_dom::{AttributeMap, ValidityReason};

use crate::control::InnerControl;

/// Resolves messages from a host's `data-<reason>` attributes, falling back
/// to the inner control's native message.
pub struct ErrorMessageResolver<'a, C: InnerControl + ?Sized> {
    host: &'a AttributeMap,
    inner: &'a C,
}

impl<'a, C: InnerControl + ?Sized> ErrorMessageResolver<'a, C> {
    pub fn new(host: &'a AttributeMap, inner: &'a C) -> Self {
        Self { host, inner }
    }

    /// Message for `reason`; never empty
    pub fn resolve(&self, reason: ValidityReason) -> String {
        if let Some(custom) = self.custom_message(reason) {
            return custom.to_string();
        }

        let native = self.inner.validation_message();
        if native.is_empty() {
            reason.default_message().to_string()
        } else {
            native
        }
    }

    /// Non-empty `data-<reason>` message on the host
    pub fn custom_message(&self, reason: ValidityReason) -> Option<&'a str> {
        self.host
            .get_attribute(&reason.data_attribute())
            .filter(|message| !message.is_empty())
    }
}
