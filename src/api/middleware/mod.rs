// Request extractors and middleware shared by the route handlers

pub mod logging;
pub mod validation;

pub use logging::log_requests;
pub use validation::{ValidId, ValidJson};
