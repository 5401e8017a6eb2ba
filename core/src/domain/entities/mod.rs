//! Domain entities representing core business objects.

pub mod claims;
pub mod user;

// Re-export commonly used types
pub use claims::{Claims, Identity};
pub use user::{User, UserProfile};
