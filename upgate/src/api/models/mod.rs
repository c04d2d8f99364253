//! API request and response data models.
//!
//! This module contains the data structures used for HTTP request
//! deserialization and response serialization. These models define the public
//! API contract.
//!
//! # Design Principles
//!
//! - **Validation in handlers**: Request fields are optional at the serde
//!   level so that a missing field surfaces as the API's own validation
//!   error rather than a deserialization rejection
//! - **OpenAPI**: All models are annotated with `utoipa` for automatic API docs
//! - **Wire format**: Field names are camelCase on the wire, snake_case in Rust
//!
//! # Model Categories
//!
//! - [`uploads`]: Presigned upload URL request and response bodies
//! - [`health`]: Health check response

pub mod health;
pub mod uploads;
