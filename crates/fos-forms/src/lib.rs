//! fOS Forms - form-associated custom controls
//!
//! Makes a custom control behave like a native form field. A [`FieldHost`]
//! wraps any [`InnerControl`]:
//! - constraint attributes set on the host are mirrored onto the inner control
//!   (`minlength` becomes a `pattern`)
//! - the inner control's validity is aggregated into the host's
//!   [`ElementInternals`](fos_dom::ElementInternals), with `data-<reason>`
//!   attributes overriding messages
//! - errors stay hidden while the field is pristine
//! - value changes, `invalid` and focus are bridged between the two
//!
//! # Example
//! ```rust
//! use fos_forms::{FieldHost, FormField, NativeInput};
//!
//! let mut field = FieldHost::new("custom-input")
//!     .with_attributes([("required", ""), ("data-valuemissing", "You forgot something")]);
//! field.bind_input_node(NativeInput::new()).unwrap();
//!
//! assert!(!field.check_validity());
//! assert!(!field.is_invalid());
//! assert_eq!(field.validation_message(), "You forgot something");
//! ```

mod bridge;
mod config;
mod constraints;
mod control;
mod error;
mod evaluator;
mod field;
mod form;
mod messages;
mod pristine;
mod sync;

pub use config::FieldConfig;
pub use constraints::ConstraintAttribute;
pub use control::{InnerControl, InputType, NativeInput};
pub use error::{FieldDiagnostic, FieldError};
pub use evaluator::{Evaluation, ValidityEvaluator};
pub use field::{FieldHost, FormField};
pub use form::{Form, FormData, SubmitOutcome};
pub use messages::ErrorMessageResolver;
pub use pristine::PristineTracker;
pub use sync::AttributeSynchronizer;

// Re-export element primitives used in the public API
pub use fos_dom::{
    ElementInternals, EventDispatcher, FieldEvent, FieldEventType, FormAssociation, FormId,
    ListenerId, ValidityError, ValidityFlags, ValidityReason,
};
