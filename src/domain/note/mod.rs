// Note domain module
// Contains the note entity, its view models and validated fields

#![allow(clippy::module_inception)]

pub mod note;
pub mod value_objects;

pub use note::{Note, NoteDetail, NoteFields, NoteSummary};
pub use value_objects::Title;
