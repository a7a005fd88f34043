use crate::domain::value_objects::bounded_string;

bounded_string!(
    /// Title of a note
    ///
    /// # Invariants
    /// - Must not be blank
    /// - At most 100 characters
    Title,
    "Title"
);
