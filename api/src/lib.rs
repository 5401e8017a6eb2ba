//! # Ticklist API
//!
//! Actix-web server exposing registration, login, credential refresh, logout
//! and the current-user endpoint under `/api/auth`.

pub mod app;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;

pub use app::{create_app, run, AppState};
