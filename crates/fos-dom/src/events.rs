//! Field Events
//!
//! Typed value-changing, invalid and focus signals plus listener registration.

use std::fmt;

/// Field event types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldEventType {
    Input,
    Change,
    Invalid,
    Focus,
}

impl FieldEventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Input => "input",
            Self::Change => "change",
            Self::Invalid => "invalid",
            Self::Focus => "focus",
        }
    }
}

/// Field event
#[derive(Debug, Clone, PartialEq)]
pub struct FieldEvent {
    pub event_type: FieldEventType,
    pub bubbles: bool,
    pub cancelable: bool,
    pub composed: bool,
    pub timestamp: f64,
    default_prevented: bool,
}

impl FieldEvent {
    /// Plain event: no bubbling, not cancelable
    pub fn new(event_type: FieldEventType) -> Self {
        Self {
            event_type,
            bubbles: false,
            cancelable: false,
            composed: false,
            timestamp: 0.0,
            default_prevented: false,
        }
    }

    /// `change` as fired by a native control
    pub fn change() -> Self {
        Self {
            bubbles: true,
            ..Self::new(FieldEventType::Change)
        }
    }

    /// `input` as fired by a native control
    pub fn input() -> Self {
        Self {
            bubbles: true,
            composed: true,
            ..Self::new(FieldEventType::Input)
        }
    }

    /// `invalid`; cancelable when raised by constraint validation
    pub fn invalid(cancelable: bool) -> Self {
        Self {
            cancelable,
            ..Self::new(FieldEventType::Invalid)
        }
    }

    pub fn focus() -> Self {
        Self {
            composed: true,
            ..Self::new(FieldEventType::Focus)
        }
    }

    /// Copy of this event with the same type and init flags, ready to be
    /// dispatched from another target
    pub fn redispatched(&self) -> Self {
        Self {
            event_type: self.event_type,
            bubbles: self.bubbles,
            cancelable: self.cancelable,
            composed: self.composed,
            timestamp: self.timestamp,
            default_prevented: false,
        }
    }

    /// Prevent default action
    pub fn prevent_default(&mut self) {
        if self.cancelable {
            self.default_prevented = true;
        }
    }

    /// Check if default was prevented
    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }
}

/// Listener callback
pub type EventListener = Box<dyn FnMut(&mut FieldEvent)>;

/// Handle returned by [`EventListeners::add`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u32);

/// Listener registry for one event target
#[derive(Default)]
pub struct EventListeners {
    listeners: Vec<(ListenerId, FieldEventType, EventListener)>,
    next_id: u32,
}

impl fmt::Debug for EventListeners {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventListeners")
            .field("count", &self.listeners.len())
            .finish()
    }
}

impl EventListeners {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, event_type: FieldEventType, listener: EventListener) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, event_type, listener));
        id
    }

    pub fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _, _)| *lid != id);
        self.listeners.len() != before
    }

    /// Invoke every listener for the event's type in registration order.
    /// Returns the number of listeners invoked.
    pub fn dispatch(&mut self, event: &mut FieldEvent) -> usize {
        let mut invoked = 0;
        for (_, event_type, listener) in self.listeners.iter_mut() {
            if *event_type == event.event_type {
                listener(event);
                invoked += 1;
            }
        }
        invoked
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

/// Event dispatcher trait
pub trait EventDispatcher {
    /// Dispatch an event; returns false if its default was prevented
    fn dispatch_event(&mut self, event: FieldEvent) -> bool;
}
