//! HTTP request handlers for all API endpoints.
//!
//! This module contains Axum route handlers organized by resource type.
//! Each handler is responsible for:
//! - Request validation and deserialization
//! - Business logic execution via the signing client
//! - Response serialization
//!
//! # Handler Modules
//!
//! - [`uploads`]: Presigned upload URL generation
//! - [`health`]: Service liveness reporting

pub mod health;
pub mod uploads;
