//! Declarative checkout form validation.
//!
//! Each [`FormField`] maps to a [`FieldRule`]; every field is evaluated the
//! same way: trim, reject empty if required, then match the pattern if the
//! rule has one.

use crate::checkout::OrderForm;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;
use thiserror::Error;

/// Fields of the checkout form, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FormField {
    FullName,
    Email,
    Phone,
    Address,
    City,
    State,
    Zip,
}

impl FormField {
    pub const ALL: [FormField; 7] = [
        FormField::FullName,
        FormField::Email,
        FormField::Phone,
        FormField::Address,
        FormField::City,
        FormField::State,
        FormField::Zip,
    ];

    /// Id of the form control bound to this field.
    pub fn input_id(&self) -> &'static str {
        match self {
            FormField::FullName => "full-name",
            FormField::Email => "email",
            FormField::Phone => "phone",
            FormField::Address => "address",
            FormField::City => "city",
            FormField::State => "state",
            FormField::Zip => "zip",
        }
    }

    /// Id of the element that shows this field's error.
    pub fn error_id(&self) -> String {
        format!("{}-error", self.input_id())
    }

    pub fn label(&self) -> &'static str {
        match self {
            FormField::FullName => "Full Name",
            FormField::Email => "Email",
            FormField::Phone => "Phone",
            FormField::Address => "Address",
            FormField::City => "City",
            FormField::State => "State",
            FormField::Zip => "ZIP Code",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.input_id())
    }
}

impl FromStr for FormField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "full-name" | "fullName" => Ok(FormField::FullName),
            "email" => Ok(FormField::Email),
            "phone" => Ok(FormField::Phone),
            "address" => Ok(FormField::Address),
            "city" => Ok(FormField::City),
            "state" => Ok(FormField::State),
            "zip" | "zipCode" => Ok(FormField::Zip),
            _ => Err(format!("unknown form field: {}", s)),
        }
    }
}

/// Why a field failed validation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    #[error("This field is required")]
    Required,

    #[error("{0}")]
    Invalid(String),
}

/// Rule for one field.
#[derive(Debug, Clone)]
pub struct FieldRule {
    pub required: bool,
    pub pattern: Option<Regex>,
    /// Shown when the value is present but does not match.
    pub message: String,
}

impl FieldRule {
    fn new(pattern: Option<&str>, message: &str) -> Self {
        Self {
            required: true,
            pattern: pattern.map(|p| Regex::new(p).expect("Invalid regex")),
            message: message.to_string(),
        }
    }

    /// Check a raw value. Surrounding whitespace is ignored.
    pub fn check(&self, value: &str) -> Result<(), FieldError> {
        let value = value.trim();

        if value.is_empty() {
            return if self.required {
                Err(FieldError::Required)
            } else {
                Ok(())
            };
        }

        match &self.pattern {
            Some(pattern) if !pattern.is_match(value) => {
                Err(FieldError::Invalid(self.message.clone()))
            }
            _ => Ok(()),
        }
    }
}

/// Field to rule table.
#[derive(Debug, Clone)]
pub struct ValidationRules {
    rules: BTreeMap<FormField, FieldRule>,
}

static STANDARD_RULES: LazyLock<ValidationRules> = LazyLock::new(|| {
    let rules = [
        (
            FormField::FullName,
            FieldRule::new(
                Some(r"^[A-Za-z\s]{2,50}$"),
                "Please enter a valid full name (2-50 characters)",
            ),
        ),
        (
            FormField::Email,
            FieldRule::new(
                Some(r"^[^\s@]+@[^\s@]+\.[^\s@]+$"),
                "Please enter a valid email address",
            ),
        ),
        (
            FormField::Phone,
            FieldRule::new(
                Some(r"^\+?[1-9][0-9]{0,15}$"),
                "Please enter a valid phone number",
            ),
        ),
        (
            FormField::Address,
            FieldRule::new(
                Some(r"^[A-Za-z0-9\s,.-]{5,100}$"),
                "Please enter a valid address",
            ),
        ),
        (
            FormField::City,
            FieldRule::new(Some(r"^[A-Za-z\s]{2,50}$"), "Please enter a valid city name"),
        ),
        (FormField::State, FieldRule::new(None, "Please select a state")),
        (
            FormField::Zip,
            FieldRule::new(Some(r"^[0-9]{5}(-[0-9]{4})?$"), "Please enter a valid ZIP code"),
        ),
    ];
    ValidationRules {
        rules: rules.into_iter().collect(),
    }
});

impl ValidationRules {
    /// The storefront's checkout rules.
    pub fn standard() -> &'static ValidationRules {
        &STANDARD_RULES
    }

    pub fn get(&self, field: FormField) -> Option<&FieldRule> {
        self.rules.get(&field)
    }

    /// Replace the rule for one field.
    pub fn set(&mut self, field: FormField, rule: FieldRule) {
        self.rules.insert(field, rule);
    }

    /// Check one value. Fields without a rule always pass.
    pub fn check(&self, field: FormField, value: &str) -> Result<(), FieldError> {
        match self.rules.get(&field) {
            Some(rule) => rule.check(value),
            None => Ok(()),
        }
    }
}

/// Outstanding per-field errors, in field order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors(BTreeMap<FormField, FieldError>);

impl FormErrors {
    pub fn get(&self, field: FormField) -> Option<&FieldError> {
        self.0.get(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FormField, &FieldError)> {
        self.0.iter().map(|(f, e)| (*f, e))
    }
}

/// Validates the checkout form and remembers the errors it found, so a UI
/// can show them next to each field.
#[derive(Debug, Clone)]
pub struct FormValidator {
    rules: ValidationRules,
    errors: FormErrors,
}

impl Default for FormValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl FormValidator {
    /// Validator with the standard rules.
    pub fn new() -> Self {
        Self::with_rules(ValidationRules::standard().clone())
    }

    pub fn with_rules(rules: ValidationRules) -> Self {
        Self {
            rules,
            errors: FormErrors::default(),
        }
    }

    /// Check one field, recording or clearing its error.
    pub fn validate_field(&mut self, field: FormField, value: &str) -> bool {
        match self.rules.check(field, value) {
            Ok(()) => {
                self.errors.0.remove(&field);
                true
            }
            Err(e) => {
                self.errors.0.insert(field, e);
                false
            }
        }
    }

    /// Check every field. All fields are evaluated even after a failure.
    pub fn validate_form(&mut self, form: &OrderForm) -> bool {
        FormField::ALL
            .into_iter()
            .fold(true, |valid, field| {
                self.validate_field(field, form.value(field)) && valid
            })
    }

    pub fn errors(&self) -> &FormErrors {
        &self.errors
    }

    pub fn error_for(&self, field: FormField) -> Option<&FieldError> {
        self.errors.get(field)
    }

    pub fn clear(&mut self) {
        self.errors.0.clear();
    }
}
