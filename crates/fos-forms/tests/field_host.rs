//! Field host tests
//!
//! Attribute mirroring, pristine gating, validity aggregation and event
//! bridging on a single bound field.

use std::cell::RefCell;
use std::rc::Rc;

use fos_forms::{
    ElementInternals, EventDispatcher, FieldConfig, FieldDiagnostic, FieldError, FieldEvent,
    FieldEventType, FieldHost, FormAssociation, FormField, FormId, InnerControl, NativeInput,
    ValidityError, ValidityFlags,
};

type Events = Rc<RefCell<Vec<FieldEventType>>>;

fn custom_input(attrs: &[(&str, &str)]) -> FieldHost<NativeInput> {
    let mut field = FieldHost::new("custom-input").with_attributes(attrs.iter().copied());
    field.bind_input_node(NativeInput::new()).unwrap();
    field
}

fn record(field: &mut FieldHost<NativeInput>, event_type: FieldEventType, events: &Events) {
    let log = events.clone();
    field.add_event_listener(event_type, move |e| log.borrow_mut().push(e.event_type));
}

// ============================================================================
// BINDING & ATTRIBUTE MIRRORING
// ============================================================================

#[test]
fn test_gets_tabindex_automatically() {
    let field = custom_input(&[]);
    assert_eq!(field.get_attribute("tabindex"), Some("0"));
}

#[test]
fn test_keeps_existing_tabindex() {
    let field = custom_input(&[("tabindex", "3")]);
    assert_eq!(field.get_attribute("tabindex"), Some("3"));

    let mut field = FieldHost::new("custom-input").with_config(FieldConfig::default().with_default_tab_index(-1));
    field.bind_input_node(NativeInput::new()).unwrap();
    assert_eq!(field.get_attribute("tabindex"), Some("-1"));
}

#[test]
fn test_declarative_attributes_mirrored_on_bind() {
    let attrs = [
        ("type", "number"),
        ("value", "7"),
        ("placeholder", "Age"),
        ("min", "5"),
        ("max", "10"),
        ("maxlength", "2"),
    ];
    let field = custom_input(&attrs);
    let inner = field.inner().unwrap();

    for (name, value) in attrs {
        assert_eq!(inner.get_attribute(name), Some(value), "{}", name);
    }
    assert_eq!(field.value(), "7");
}

#[test]
fn test_boolean_attributes_mirrored_as_presence() {
    let field = custom_input(&[("required", "true")]);
    assert_eq!(field.inner().unwrap().get_attribute("required"), Some(""));
}

#[test]
fn test_attribute_names_are_case_insensitive() {
    let field = custom_input(&[("minLength", "5")]);
    assert_eq!(field.get_attribute("minlength"), Some("5"));
    assert_eq!(field.get_attribute("pattern"), Some(".{5,}"));
}

#[test]
fn test_later_attribute_changes_mirrored() {
    let mut field = custom_input(&[]);

    field.set_attribute("max", "10");
    assert_eq!(field.inner().unwrap().get_attribute("max"), Some("10"));

    field.remove_attribute("max");
    assert_eq!(field.inner().unwrap().get_attribute("max"), None);

    field.set_attribute("placeholder", "");
    assert_eq!(field.inner().unwrap().get_attribute("placeholder"), Some(""));
}

#[test]
fn test_unrecognized_attributes_stay_on_host() {
    let field = custom_input(&[("name", "email"), ("data-valuemissing", "Required")]);
    let inner = field.inner().unwrap();

    assert_eq!(inner.get_attribute("name"), None);
    assert_eq!(inner.get_attribute("data-valuemissing"), None);
    assert_eq!(field.name(), Some("email"));
}

#[test]
fn test_second_bind_refused() {
    let mut field = custom_input(&[("value", "first")]);

    let result = field.bind_input_node(NativeInput::new());
    assert_eq!(result, Err(FieldError::AlreadyBound("custom-input".to_string())));
    assert_eq!(field.value(), "first");
}

// ============================================================================
// MINLENGTH REWRITE
// ============================================================================

#[test]
fn test_minlength_rewritten_to_pattern() {
    let field = custom_input(&[
        ("type", "text"),
        ("minlength", "5"),
        ("value", "foo"),
        ("data-tooshort", "Must have at least 5 characters"),
    ]);

    assert_eq!(field.get_attribute("pattern"), Some(".{5,}"));
    assert_eq!(field.inner().unwrap().get_attribute("pattern"), Some(".{5,}"));
    assert_eq!(field.inner().unwrap().get_attribute("minlength"), None);
    assert_eq!(field.get_attribute("data-patternmismatch"), field.get_attribute("data-tooshort"));

    assert!(field.validity().pattern_mismatch);
    assert_eq!(field.validation_message(), "Must have at least 5 characters");
    assert!(field.diagnostics().is_empty());
}

#[test]
fn test_minlength_with_pattern_is_not_rewritten() {
    let field = custom_input(&[
        ("minlength", "5"),
        ("pattern", "x"),
        ("data-tooshort", "Too short"),
    ]);

    assert_eq!(field.get_attribute("pattern"), Some("x"));
    assert_eq!(field.inner().unwrap().get_attribute("pattern"), Some("x"));
    assert!(!field.has_attribute("data-patternmismatch"));
    assert_eq!(field.diagnostics().len(), 1);
    assert!(matches!(field.diagnostics()[0], FieldDiagnostic::MinLengthWithPattern { .. }));
}

#[test]
fn test_explicit_pattern_after_minlength_reports_conflict() {
    let mut field = custom_input(&[("minlength", "5"), ("data-tooshort", "Too short")]);
    assert_eq!(field.get_attribute("data-patternmismatch"), Some("Too short"));

    field.set_attribute("pattern", "x");

    assert_eq!(field.inner().unwrap().get_attribute("pattern"), Some("x"));
    assert!(!field.has_attribute("data-patternmismatch"));
    assert_eq!(field.diagnostics().len(), 1);
}

#[test]
fn test_own_mismatch_message_survives_minlength_removal() {
    let mut field = custom_input(&[
        ("data-patternmismatch", "Letters only"),
        ("data-tooshort", "Too short"),
        ("minlength", "5"),
    ]);
    assert_eq!(field.get_attribute("data-patternmismatch"), Some("Too short"));

    field.remove_attribute("minlength");

    assert_eq!(field.get_attribute("data-patternmismatch"), Some("Letters only"));
    assert!(!field.has_attribute("pattern"));
}

#[test]
fn test_user_typing_below_minlength() {
    let mut field = custom_input(&[
        ("minlength", "5"),
        ("validate-on-change", ""),
        ("data-tooshort", "Must have at least 5 characters"),
    ]);

    field.type_text("abc");
    assert!(field.is_invalid());
    assert!(field.validity().pattern_mismatch);
    assert_eq!(field.validation_message(), "Must have at least 5 characters");

    field.type_text("abcdef");
    assert!(!field.is_invalid());
    assert!(field.check_validity());
}

// ============================================================================
// PRISTINE GATING
// ============================================================================

#[test]
fn test_pristine_hides_invalid() {
    let field = custom_input(&[("required", ""), ("custom-error-display", "")]);

    assert!(field.is_pristine());
    assert!(!field.check_validity());
    assert!(!field.is_invalid());
    assert!(!field.has_attribute("invalid"));
    assert_eq!(field.internals().native_reports(), 0);
}

#[test]
fn test_change_without_validate_on_change_stays_pristine() {
    let mut field = custom_input(&[("required", "")]);

    field.handle_inner_event(&FieldEvent::change());

    assert!(field.is_pristine());
    assert!(!field.is_invalid());
    assert_eq!(field.internals().native_reports(), 0);
}

#[test]
fn test_validate_on_change_reports_natively() {
    let mut field = custom_input(&[
        ("type", "text"),
        ("name", "name"),
        ("required", ""),
        ("validate-on-change", ""),
        ("data-valuemissing", "You forgot something"),
    ]);

    field.handle_inner_event(&FieldEvent::change());

    assert!(!field.is_pristine());
    assert!(field.is_invalid());
    assert_eq!(field.internals().native_reports(), 1);
    // Native display never reflects the attribute
    assert!(!field.has_attribute("invalid"));
}

#[test]
fn test_validate_on_change_with_custom_display_dispatches_change_first() {
    let mut field = custom_input(&[
        ("required", ""),
        ("validate-on-change", ""),
        ("custom-error-display", ""),
        ("data-valuemissing", "You forgot something"),
    ]);
    let events: Events = Rc::default();
    record(&mut field, FieldEventType::Change, &events);
    record(&mut field, FieldEventType::Invalid, &events);

    field.handle_inner_event(&FieldEvent::change());

    assert_eq!(*events.borrow(), vec![FieldEventType::Change, FieldEventType::Invalid]);
    assert_eq!(field.internals().native_reports(), 0);
    assert!(field.has_attribute("invalid"));
    assert_eq!(field.validation_message(), "You forgot something");
}

// ============================================================================
// VALIDITY & MESSAGES
// ============================================================================

#[test]
fn test_required_empty_message() {
    let field = custom_input(&[("required", ""), ("data-valuemissing", "You forgot something")]);
    assert!(!field.check_validity());
    assert!(field.validity().value_missing);
    assert_eq!(field.validation_message(), "You forgot something");

    let field = custom_input(&[("required", "")]);
    assert_eq!(field.validation_message(), "Please fill out this field.");
}

#[test]
fn test_aggregate_has_single_reason() {
    let field = custom_input(&[("type", "number"), ("min", "5"), ("value", "4.5")]);

    // range-underflow and step-mismatch both fail; the later one is reported
    let inner = field.inner().unwrap().validity();
    assert!(inner.range_underflow && inner.step_mismatch);
    assert_eq!(field.validity(), &ValidityFlags { step_mismatch: true, ..Default::default() });
}

#[test]
fn test_constraint_attribute_change_reevaluates() {
    let mut field = custom_input(&[("required", "")]);
    assert!(!field.check_validity());

    field.remove_attribute("required");
    assert!(field.check_validity());
    assert_eq!(field.validation_message(), "");

    field.set_attribute("type", "email");
    field.set_value("nobody");
    assert!(field.validity().type_mismatch);
}

#[test]
fn test_set_custom_validity() {
    let mut field = custom_input(&[]);

    field.set_custom_validity("Name already taken");
    assert!(!field.check_validity());
    assert!(field.validity().custom_error);
    assert_eq!(field.validation_message(), "Name already taken");
    assert!(!field.is_invalid());

    field.set_custom_validity("");
    assert!(field.check_validity());
}

#[test]
fn test_set_error_message_reports_natively() {
    let mut field = custom_input(&[]);

    field.set_error_message("Server rejected this value");

    assert!(field.is_invalid());
    assert!(!field.is_pristine());
    assert!(field.validity().custom_error);
    assert_eq!(field.validation_error(), Some(fos_forms::ValidityReason::CustomError));
    assert_eq!(field.internals().native_reports(), 1);
}

#[test]
fn test_set_error_message_with_custom_display() {
    let mut field = custom_input(&[("custom-error-display", "")]);
    let events: Events = Rc::default();
    record(&mut field, FieldEventType::Invalid, &events);

    field.set_error_message("Server rejected this value");

    assert_eq!(events.borrow().len(), 1);
    assert_eq!(field.internals().native_reports(), 0);
    assert!(field.has_attribute("invalid"));
}

// ============================================================================
// VALUE, FOCUS, DISABLED, RESET
// ============================================================================

#[test]
fn test_value_round_trip() {
    let mut field = custom_input(&[("name", "firstname")]);

    field.set_value("X");
    assert_eq!(field.value(), "X");
    assert_eq!(field.form_value(), Some("X"));
}

#[test]
fn test_value_read_from_inner_control() {
    let mut field = custom_input(&[]);

    field.inner_mut().unwrap().set_value("foo");
    assert_eq!(field.value(), "foo");
}

#[test]
fn test_change_syncs_submission_value_and_redispatches() {
    let mut field = custom_input(&[]);
    let seen = Rc::new(RefCell::new(Vec::new()));
    let log = seen.clone();
    field.add_event_listener(FieldEventType::Change, move |e| log.borrow_mut().push(e.clone()));

    field.type_text("typed");

    assert_eq!(field.form_value(), Some("typed"));
    let seen = seen.borrow();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0], FieldEvent::change());
}

#[test]
fn test_focus_forwarded_to_inner() {
    let mut field = custom_input(&[]);

    assert!(field.dispatch_event(FieldEvent::focus()));
    assert_eq!(field.inner().unwrap().focus_count(), 1);
}

#[test]
fn test_delegated_focus_not_forwarded() {
    let mut field = FieldHost::new("custom-input").with_config(FieldConfig::default().with_delegated_focus(true));
    field.bind_input_node(NativeInput::new()).unwrap();

    field.dispatch_event(FieldEvent::focus());
    assert_eq!(field.inner().unwrap().focus_count(), 0);
}

#[test]
fn test_disabled_forwarded_and_barred() {
    let mut field = custom_input(&[("required", "")]);
    assert!(!field.check_validity());

    field.set_disabled(true);

    assert!(field.is_disabled());
    assert!(field.has_attribute("disabled"));
    assert!(field.inner().unwrap().is_disabled());
    assert!(!field.will_validate());
    assert!(field.check_validity());

    field.set_disabled(false);
    assert!(!field.inner().unwrap().is_disabled());
    assert!(field.will_validate());
    assert!(!field.check_validity());
}

#[test]
fn test_form_reset_restores_default_and_pristine() {
    let mut field = custom_input(&[("value", "John"), ("required", "")]);

    field.set_value("");
    assert!(!field.force_validation());
    assert!(field.is_invalid());

    field.form_reset();

    assert_eq!(field.value(), "John");
    assert_eq!(field.default_value(), "John");
    assert!(field.is_pristine());
    assert!(!field.is_invalid());
    assert!(field.check_validity());
}

#[test]
fn test_set_default_value() {
    let mut field = custom_input(&[]);

    field.set_default_value("fallback");
    assert_eq!(field.get_attribute("value"), Some("fallback"));
    assert_eq!(field.default_value(), "fallback");
    assert_eq!(field.value(), "fallback");
    assert_eq!(field.form_value(), Some("fallback"));
}

#[test]
fn test_value_attribute_after_bind_updates_submission_value() {
    let mut field = custom_input(&[("name", "nick")]);

    field.set_attribute("value", "X");
    assert_eq!(field.value(), "X");
    assert_eq!(field.form_value(), Some("X"));

    // An edited value no longer follows the attribute
    field.type_text("typed");
    field.set_attribute("value", "Y");
    assert_eq!(field.value(), "typed");
    assert_eq!(field.form_value(), Some("typed"));
}

// ============================================================================
// FORCED VALIDATION
// ============================================================================

#[test]
fn test_forced_validation_native() {
    let mut field = custom_input(&[("required", "")]);
    let events: Events = Rc::default();
    record(&mut field, FieldEventType::Invalid, &events);

    assert!(!field.force_validation());

    assert!(field.is_invalid());
    assert!(!field.is_pristine());
    assert_eq!(field.internals().native_reports(), 1);
    assert_eq!(events.borrow().len(), 1);
}

#[test]
fn test_forced_validation_custom_display_prevents_native() {
    let mut field = custom_input(&[("required", ""), ("custom-error-display", "")]);
    let prevented = Rc::new(RefCell::new(Vec::new()));
    let log = prevented.clone();
    field.add_event_listener(FieldEventType::Invalid, move |e| {
        log.borrow_mut().push(e.is_default_prevented())
    });

    assert!(!field.force_validation());

    assert_eq!(*prevented.borrow(), vec![true]);
    assert_eq!(field.internals().native_reports(), 0);
    assert!(field.has_attribute("invalid"));
}

#[test]
fn test_forced_validation_of_valid_field() {
    let mut field = custom_input(&[("value", "ok")]);

    assert!(field.force_validation());
    assert!(field.is_pristine());
    assert!(!field.is_invalid());
}

#[test]
fn test_removing_custom_display_unreflects_invalid() {
    let mut field = custom_input(&[("required", ""), ("custom-error-display", "")]);
    field.force_validation();
    assert!(field.has_attribute("invalid"));

    field.remove_attribute("custom-error-display");
    assert!(field.is_invalid());
    assert!(!field.has_attribute("invalid"));
}

// ============================================================================
// CUSTOM FORM ASSOCIATION
// ============================================================================

/// Association that records every submission value written
#[derive(Debug, Default)]
struct RecordingInternals {
    inner: ElementInternals,
    writes: Vec<Option<String>>,
}

impl FormAssociation for RecordingInternals {
    fn set_form_value(&mut self, value: Option<&str>) {
        self.writes.push(value.map(str::to_string));
        self.inner.set_form_value(value);
    }
    fn form_value(&self) -> Option<&str> {
        self.inner.form_value()
    }
    fn form(&self) -> Option<FormId> {
        self.inner.form()
    }
    fn set_form(&mut self, form: Option<FormId>) {
        self.inner.set_form(form);
    }
    fn validity(&self) -> &ValidityFlags {
        self.inner.validity()
    }
    fn validation_message(&self) -> &str {
        self.inner.validation_message()
    }
    fn set_validity(&mut self, flags: ValidityFlags, message: &str) -> Result<(), ValidityError> {
        self.inner.set_validity(flags, message)
    }
    fn clear_validity(&mut self) {
        self.inner.clear_validity();
    }
    fn will_validate(&self) -> bool {
        self.inner.will_validate()
    }
    fn set_will_validate(&mut self, will_validate: bool) {
        self.inner.set_will_validate(will_validate);
    }
    fn report_validity(&mut self) -> bool {
        self.inner.report_validity()
    }
}

#[test]
fn test_custom_association_kept_in_lockstep() {
    let mut field: FieldHost<NativeInput, RecordingInternals> =
        FieldHost::with_internals("custom-input", RecordingInternals::default())
            .with_attributes([("value", "a")]);
    field.bind_input_node(NativeInput::new()).unwrap();

    field.set_value("b");
    field.type_text("c");

    assert_eq!(
        field.internals().writes,
        vec![Some("a".to_string()), Some("b".to_string()), Some("c".to_string()), Some("c".to_string())]
    );
    assert_eq!(field.form_value(), Some("c"));
}
