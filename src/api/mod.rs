//! The HTTP client for the remote marketplace API.

mod client;

pub use client::{ApiClient, ApiError, RegisterResponse};
