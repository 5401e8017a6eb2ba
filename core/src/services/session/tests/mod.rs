//! Tests for the session controller and stores
