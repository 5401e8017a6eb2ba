pub mod error;

pub use error::{json_error_handler, method_not_allowed, not_found, ApiError};
