use crate::api::errors::{ApiError, FieldErrors};

/// Collects per-field validation failures for one request body
///
/// Usage:
/// ```rust,ignore
/// let mut v = Validator::new();
/// let title = v.check("title", Title::new(req.title.as_deref().unwrap_or_default()));
/// let description = v.check("description", optional_text("Description", req.description.as_deref()));
/// let (Some(title), Some(description)) = (title, description) else {
///     return Err(v.into_error());
/// };
/// ```
#[derive(Debug, Default)]
pub struct Validator {
    errors: FieldErrors,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the error of `result` under `field`, returning the value on success
    pub fn check<T>(&mut self, field: &str, result: Result<T, String>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(message) => {
                self.errors.entry(field.to_string()).or_default().push(message);
                None
            }
        }
    }

    /// Converts the collected failures into a 400 validation problem
    pub fn into_error(self) -> ApiError {
        ApiError::validation(self.errors)
    }
}
