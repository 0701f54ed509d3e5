//! Steermock - rule-driven relay for contract-mock backends
//!
//! This crate provides a daemon that sits between API clients and a
//! contract-mock backend. It matches each request body against a static
//! per-endpoint rule table, encodes the selected canned-response variant
//! (or forced status code) into the `prefer` header, forwards the request,
//! and relays the backend's response back verbatim.

pub mod config;
pub mod error;
pub mod relay;
pub mod rules;

pub use error::SteerError;
