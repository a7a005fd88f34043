//! Bounded text fields shared by users and notes
//!
//! Every persisted string is capped at [`MAX_TEXT_LENGTH`] characters.
//! Required fields also reject blank input.

/// Maximum length, in characters, of any stored text field
pub const MAX_TEXT_LENGTH: usize = 100;

/// Validates a required text field
///
/// # Returns
/// * `Ok(String)` - The input value, untouched
/// * `Err(String)` - Message naming the violated rule
pub fn required_text(field: &str, value: &str) -> Result<String, String> {
    if value.trim().is_empty() {
        return Err(format!("The {} field is required.", field));
    }
    bounded_text(field, value)
}

/// Fails with the "field is required" message when `value` is absent
pub fn required<T>(field: &str, value: Option<T>) -> Result<T, String> {
    value.ok_or_else(|| format!("The {} field is required.", field))
}

/// Validates an optional text field; only the length cap applies
pub fn optional_text(field: &str, value: Option<&str>) -> Result<Option<String>, String> {
    value.map(|v| bounded_text(field, v)).transpose()
}

fn bounded_text(field: &str, value: &str) -> Result<String, String> {
    if value.chars().count() > MAX_TEXT_LENGTH {
        return Err(format!(
            "The field {} must be a string with a maximum length of {}.",
            field, MAX_TEXT_LENGTH
        ));
    }
    Ok(value.to_string())
}

/// Declares a validated string newtype
macro_rules! bounded_string {
    ($(#[$meta:meta])* $name:ident, $field:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub struct $name(String);

        impl $name {
            pub fn new(value: impl AsRef<str>) -> Result<Self, String> {
                $crate::domain::value_objects::required_text($field, value.as_ref()).map($name)
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter) -> ::std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

pub(crate) use bounded_string;
