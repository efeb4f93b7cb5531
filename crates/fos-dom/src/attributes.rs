//! Element Attributes
//!
//! Ordered attribute storage for hosts and inner controls.

use std::collections::HashMap;

/// Ordered attribute collection.
///
/// Presence is significant: a missing attribute and an attribute set to the
/// empty string are different states.
#[derive(Debug, Clone, Default)]
pub struct AttributeMap {
    attributes: Vec<Attr>,
    by_name: HashMap<String, usize>,
}

/// Single attribute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attr {
    pub name: String,
    pub value: String,
}

impl Attr {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

impl AttributeMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `(name, value)` pairs, later pairs overriding earlier ones
    pub fn from_pairs<I, N, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (N, V)>,
        N: Into<String>,
        V: Into<String>,
    {
        let mut map = Self::new();
        for (name, value) in pairs {
            map.set_attribute(name, value);
        }
        map
    }

    /// Number of attributes
    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    /// Get attribute value
    pub fn get_attribute(&self, name: &str) -> Option<&str> {
        self.by_name
            .get(name)
            .and_then(|&i| self.attributes.get(i))
            .map(|a| a.value.as_str())
    }

    /// Set attribute, returning the previous value if there was one
    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let attr = Attr::new(name, value);
        if let Some(&index) = self.by_name.get(&attr.name) {
            let old = std::mem::replace(&mut self.attributes[index], attr);
            Some(old.value)
        } else {
            self.by_name.insert(attr.name.clone(), self.attributes.len());
            self.attributes.push(attr);
            None
        }
    }

    /// Remove attribute, returning its value if it was present
    pub fn remove_attribute(&mut self, name: &str) -> Option<String> {
        let index = self.by_name.remove(name)?;
        for idx in self.by_name.values_mut() {
            if *idx > index {
                *idx -= 1;
            }
        }
        Some(self.attributes.remove(index).value)
    }

    /// Check if attribute exists
    pub fn has_attribute(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Toggle a boolean attribute
    pub fn toggle_attribute(&mut self, name: &str, force: Option<bool>) -> bool {
        let present = match force {
            Some(present) => present,
            None => !self.has_attribute(name),
        };
        if present {
            if !self.has_attribute(name) {
                self.set_attribute(name, "");
            }
        } else {
            self.remove_attribute(name);
        }
        present
    }

    /// Attribute names in insertion order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.attributes.iter().map(|a| a.name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Attr> {
        self.attributes.iter()
    }
}

/// `data-*` attribute name for a camelCase key (`valueMissing` -> `data-valuemissing`)
pub fn data_attribute_name(key: &str) -> String {
    format!("data-{}", key.to_ascii_lowercase())
}
