//! # REST API Interface Layer
//!
//! HTTP endpoints for the booking backend. This layer handles:
//! - Request/response serialization
//! - Input validation before the domain layer runs
//! - Error translation from domain errors to HTTP status codes
//! - Request logging
//!
//! Business logic stays in the domain layer; handlers here are pure
//! translation.

pub mod admin_apis;
pub mod appointment_apis;
pub mod calendar_apis;
pub mod contact_apis;
pub mod service_apis;
