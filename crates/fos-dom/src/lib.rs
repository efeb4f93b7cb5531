//! fOS DOM - element primitives for form controls
//!
//! Attribute storage, typed field events, constraint validity flags and the
//! form-association object used by form-associated custom elements.

mod attributes;
mod events;
mod internals;
mod validity;

pub use attributes::{data_attribute_name, Attr, AttributeMap};
pub use events::{EventDispatcher, EventListener, EventListeners, FieldEvent, FieldEventType, ListenerId};
pub use internals::{ElementInternals, FormAssociation, FormId};
pub use validity::{ValidityError, ValidityFlags, ValidityReason};
