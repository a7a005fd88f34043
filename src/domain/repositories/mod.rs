// Repository contracts (ports)
// Implemented by adapters in the infrastructure layer

pub mod note_repository;
pub mod user_repository;

pub use note_repository::NoteRepository;
pub use user_repository::UserRepository;
