#![cfg_attr(not(test), deny(unsafe_code))]
#![warn(
    clippy::pedantic,
    clippy::unwrap_used,
    clippy::missing_docs_in_private_items
)]

//! Shared HTTP client abstractions for AI provider clients
//!
//! This crate provides the request plumbing, error type and token accounting
//! used by the ai-ox provider clients so that every client behaves the same way
//! on the wire.

pub mod error;
pub mod request_builder;
pub mod usage;

pub use error::CommonRequestError;
pub use request_builder::{AuthMethod, Endpoint, RequestBuilder, RequestConfig};
pub use usage::TokenUsage;
