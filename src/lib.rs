//! Library entry for upwall exposing the client core for the binary and integration tests.

pub mod args;
pub mod config;
pub mod logic;
pub mod session;
pub mod sources;
pub mod state;
pub mod util;
