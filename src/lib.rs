//! Core library for the `agify-testkit` behaviour suite.
//!
//! This crate provides the building blocks the behaviour tests are written
//! against: environment-backed configuration, the rate-limited request
//! dispatcher (the per-scenario "world"), and the typed schema accessor for
//! Agify response bodies. The behaviour scenarios themselves live under
//! `tests/` and drive these pieces through a cucumber harness.
pub mod config;
pub mod error;
pub mod http;
pub mod schema;

mod logger;

pub use logger::init_logging;
