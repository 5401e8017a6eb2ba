//! Database module - user repository implementations
//!
//! - An in-memory repository used when no database is configured
//! - Connection pool management for MySQL
//! - The MySQL user repository

mod memory;

#[cfg(feature = "mysql")]
pub mod connection;
#[cfg(feature = "mysql")]
pub mod mysql;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use memory::InMemoryUserRepository;

#[cfg(feature = "mysql")]
pub use connection::{DatabasePool, PoolStatistics};
#[cfg(feature = "mysql")]
pub use mysql::MySqlUserRepository;
