//! Client-side session management
//!
//! Keeps the credential and cached profile of the signed-in user, persists
//! them through a [`SessionStore`] and talks to the server through an
//! [`AuthGateway`].

mod controller;
mod memory_store;
mod traits;

#[cfg(test)]
mod tests;

pub use controller::{SessionController, SessionStatus};
pub use memory_store::MemorySessionStore;
pub use traits::{AuthGateway, SessionStore, StoredSession};
