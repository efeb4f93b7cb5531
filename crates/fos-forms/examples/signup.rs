//! Example: a signup form built from custom fields
//!
//! Run with `RUST_LOG=fos_forms=debug` to see validation decisions.

use anyhow::Context;
use fos_forms::{FieldEventType, FieldHost, Form, FormField, NativeInput, SubmitOutcome};
use tracing_subscriber::EnvFilter;

fn field(attrs: &[(&str, &str)]) -> anyhow::Result<FieldHost<NativeInput>> {
    let mut field = FieldHost::new("custom-input").with_attributes(attrs.iter().copied());
    field.bind_input_node(NativeInput::new())?;
    Ok(field)
}

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let username = field(&[
        ("name", "username"),
        ("required", ""),
        ("minlength", "3"),
        ("data-valuemissing", "Pick a username"),
        ("data-tooshort", "Usernames have at least 3 characters"),
    ])?;

    let mut email = field(&[
        ("name", "email"),
        ("type", "email"),
        ("required", ""),
        ("validate-on-change", ""),
        ("custom-error-display", ""),
    ])?;
    email.add_event_listener(FieldEventType::Invalid, |_| {
        println!("  (email shows its own error)");
    });

    let age = field(&[
        ("name", "age"),
        ("type", "number"),
        ("min", "13"),
        ("data-rangeunderflow", "You must be 13 or older"),
    ])?;

    let mut form = Form::new(1);
    form.add_field(Box::new(username));
    form.add_field(Box::new(email));
    form.add_field(Box::new(age));

    form.named("username").context("username field")?.set_value("jo");
    form.named("age").context("age field")?.set_value("12");

    println!("First attempt:");
    report(&mut form);

    form.named("username").context("username field")?.set_value("joanna");
    form.named("email").context("email field")?.set_value("jo@example.com");
    form.named("age").context("age field")?.set_value("30");

    println!("Second attempt:");
    report(&mut form);

    Ok(())
}

fn report(form: &mut Form) {
    match form.request_submit() {
        SubmitOutcome::Submitted(data) => println!("  submitted: {}", data.to_url_encoded()),
        SubmitOutcome::Blocked { invalid } => {
            for name in invalid {
                if let Some(field) = form.named(&name) {
                    println!("  {}: {}", name, field.validation_message());
                }
            }
        }
    }
}
