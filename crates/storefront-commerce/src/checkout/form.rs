//! The checkout form.

use crate::checkout::FormField;
use serde::{Deserialize, Serialize};

/// Contact and shipping details entered at checkout.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct OrderForm {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip: String,
}

impl OrderForm {
    /// Raw value of a field.
    pub fn value(&self, field: FormField) -> &str {
        match field {
            FormField::FullName => &self.full_name,
            FormField::Email => &self.email,
            FormField::Phone => &self.phone,
            FormField::Address => &self.address,
            FormField::City => &self.city,
            FormField::State => &self.state,
            FormField::Zip => &self.zip,
        }
    }

    /// Mutable access to a field, for UIs that fill the form one field at a
    /// time.
    pub fn value_mut(&mut self, field: FormField) -> &mut String {
        match field {
            FormField::FullName => &mut self.full_name,
            FormField::Email => &mut self.email,
            FormField::Phone => &mut self.phone,
            FormField::Address => &mut self.address,
            FormField::City => &mut self.city,
            FormField::State => &mut self.state,
            FormField::Zip => &mut self.zip,
        }
    }

    /// Copy with surrounding whitespace removed from every field.
    pub fn trimmed(&self) -> Self {
        let mut out = self.clone();
        for field in FormField::ALL {
            let value = out.value_mut(field);
            *value = value.trim().to_string();
        }
        out
    }

    /// One-line shipping address: `fullName, address, city, state zip`.
    pub fn shipping_summary(&self) -> String {
        let f = self.trimmed();
        format!(
            "{}, {}, {}, {} {}",
            f.full_name, f.address, f.city, f.state, f.zip
        )
    }
}
