//! REST API layer for HTTP request/response handling.
//!
//! Translates HTTP requests into service calls and maps [`crate::error::AppError`]
//! kinds onto status codes.
//!
//! # Modules
//!
//! - [`dto`] - Request and response bodies
//! - [`handlers`] - HTTP request handlers
//! - [`middleware`] - API key authentication and request tracing
//! - [`routes`] - Protected and public `/api` routes

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
