#![deny(missing_docs)]

//! Client library for searching an uploaded PDF through a ranking service.

/// Search service contract and its HTTP client.
pub mod backend;
/// Environment-driven configuration management.
pub mod config;
/// Search-submission state machine.
pub mod controller;
/// Candidate files and media-type handling.
pub mod document;
/// Structured logging and tracing setup.
pub mod logging;
/// Derived view model and terminal rendering.
pub mod render;
