//! Event Bridge
//!
//! Signals between a host and its inner control: value changes are
//! re-dispatched from the host, invalid signals are handled on the host and
//! focus is forwarded down.

use fos_dom::{EventDispatcher, FieldEvent, FieldEventType, FormAssociation, ListenerId};

use crate::control::{InnerControl, NativeInput};
use crate::field::FieldHost;

impl<C: InnerControl, A: FormAssociation> FieldHost<C, A> {
    /// Listen for events dispatched from the host
    pub fn add_event_listener<F>(&mut self, event_type: FieldEventType, listener: F) -> ListenerId
    where
        F: FnMut(&mut FieldEvent) + 'static,
    {
        self.listeners.add(event_type, Box::new(listener))
    }

    pub fn remove_event_listener(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }

    /// Signal raised by the inner control
    pub fn handle_inner_event(&mut self, event: &FieldEvent) {
        match event.event_type {
            FieldEventType::Change => {
                let validate_on_change = self.validate_on_change();
                self.pristine.on_value_change(validate_on_change);
                self.sync_form_value();
                self.listeners.dispatch(&mut event.redispatched());
                self.evaluate();
            }
            FieldEventType::Input => {
                self.sync_form_value();
                self.listeners.dispatch(&mut event.redispatched());
            }
            FieldEventType::Invalid | FieldEventType::Focus => {
                tracing::trace!("Ignoring inner {} event", event.event_type.as_str());
            }
        }
    }

    fn sync_form_value(&mut self) {
        if let Some(inner) = self.inner.as_ref() {
            self.internals.set_form_value(Some(inner.value()));
        }
    }

    /// Dispatch an `invalid` signal raised by the host itself.
    ///
    /// The field becomes invalid and non-pristine. With custom error display
    /// the default (native reporting) is prevented. Returns false if the
    /// default was prevented.
    pub(crate) fn raise_invalid(&mut self, mut event: FieldEvent) -> bool {
        self.set_invalid(true);
        self.pristine.on_forced_validation();
        if self.custom_error_display() {
            event.prevent_default();
        }
        self.listeners.dispatch(&mut event);
        !event.is_default_prevented()
    }

    fn forward_focus(&mut self) {
        if self.config.delegates_focus {
            return;
        }
        if let Some(inner) = self.inner.as_mut() {
            inner.focus();
        }
    }
}

impl<C: InnerControl, A: FormAssociation> EventDispatcher for FieldHost<C, A> {
    fn dispatch_event(&mut self, mut event: FieldEvent) -> bool {
        if event.event_type == FieldEventType::Focus {
            self.forward_focus();
        }
        self.listeners.dispatch(&mut event);
        !event.is_default_prevented()
    }
}

impl<A: FormAssociation> FieldHost<NativeInput, A> {
    /// Simulate the user typing into the inner input and committing it
    pub fn type_text(&mut self, text: &str) {
        let Some(inner) = self.inner.as_mut() else {
            return;
        };
        inner.type_text(text);
        self.handle_inner_event(&FieldEvent::input());
        self.handle_inner_event(&FieldEvent::change());
    }
}
