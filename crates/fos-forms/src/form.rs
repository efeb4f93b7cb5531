//! Form Owner
//!
//! Submission and reset for a set of form-associated fields.

use fos_dom::FormId;
use serde::{Deserialize, Serialize};

use crate::field::FormField;

/// Form data for submission
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormData {
    entries: Vec<(String, String)>,
}

impl FormData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.entries.push((name.into(), value.into()));
    }

    /// First value for `name`
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn get_all(&self, name: &str) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
            .collect()
    }

    pub fn has(&self, name: &str) -> bool {
        self.entries.iter().any(|(n, _)| n == name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    /// `application/x-www-form-urlencoded` body
    pub fn to_url_encoded(&self) -> String {
        url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.entries())
            .finish()
    }
}

/// Result of a submission attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Every field passed validation
    Submitted(FormData),
    /// Submission stopped by invalid fields (their names, or local index
    /// `#n` for unnamed fields)
    Blocked { invalid: Vec<String> },
}

impl SubmitOutcome {
    pub fn is_submitted(&self) -> bool {
        matches!(self, Self::Submitted(_))
    }
}

/// Form owning a list of fields
pub struct Form {
    id: FormId,
    novalidate: bool,
    fields: Vec<Box<dyn FormField>>,
}

impl std::fmt::Debug for Form {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Form")
            .field("id", &self.id)
            .field("novalidate", &self.novalidate)
            .field("fields", &self.fields.len())
            .finish()
    }
}

impl Form {
    pub fn new(id: u32) -> Self {
        Self {
            id: FormId(id),
            novalidate: false,
            fields: Vec::new(),
        }
    }

    /// Skip constraint validation on submit
    pub fn with_novalidate(mut self, novalidate: bool) -> Self {
        self.novalidate = novalidate;
        self
    }

    pub fn id(&self) -> FormId {
        self.id
    }

    /// Associate a field with this form; returns its index
    pub fn add_field(&mut self, mut field: Box<dyn FormField>) -> usize {
        field.set_form(Some(self.id));
        self.fields.push(field);
        self.fields.len() - 1
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn field(&self, index: usize) -> Option<&dyn FormField> {
        self.fields.get(index).map(|f| f.as_ref())
    }

    pub fn field_mut(&mut self, index: usize) -> Option<&mut (dyn FormField + 'static)> {
        self.fields.get_mut(index).map(|f| f.as_mut())
    }

    /// First field with the given name
    pub fn named(&mut self, name: &str) -> Option<&mut (dyn FormField + 'static)> {
        self.fields
            .iter_mut()
            .find(|f| f.name() == Some(name))
            .map(|f| f.as_mut())
    }

    /// Validity of every field, without surfacing anything
    pub fn check_validity(&self) -> bool {
        self.fields.iter().all(|f| f.check_validity())
    }

    /// Entries of enabled, named fields in tree order
    pub fn form_data(&self) -> FormData {
        let mut data = FormData::new();
        for field in &self.fields {
            if field.is_disabled() {
                continue;
            }
            if let (Some(name), Some(value)) = (field.name(), field.form_value()) {
                data.append(name, value);
            }
        }
        data
    }

    /// Attempt submission. Unless `novalidate` is set every field is forced
    /// to validate, and any invalid field blocks the submission.
    pub fn request_submit(&mut self) -> SubmitOutcome {
        if !self.novalidate {
            let mut invalid = Vec::new();
            for (index, field) in self.fields.iter_mut().enumerate() {
                if !field.force_validation() {
                    invalid.push(field.name().map_or_else(|| format!("#{}", index), str::to_string));
                }
            }
            if !invalid.is_empty() {
                tracing::debug!("Submission of form {:?} blocked by {:?}", self.id, invalid);
                return SubmitOutcome::Blocked { invalid };
            }
        }

        let data = self.form_data();
        tracing::debug!("Submitting form {:?} with {} entries", self.id, data.len());
        SubmitOutcome::Submitted(data)
    }

    /// Reset every field to its default value and pristine state
    pub fn reset(&mut self) {
        for field in self.fields.iter_mut() {
            field.form_reset();
        }
    }
}
