//! Error taxonomy for remote-service calls.
//!
//! Every operation fails terminally: no retries, no backoff. The view layer
//! decides how to surface each variant; session restoration is the one path
//! that swallows these (see `User::restore`).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Signup/login rejected the supplied credentials.
    #[error("invalid username or password")]
    Authentication,

    /// A mutating call was rejected because the session token is invalid,
    /// expired, or missing.
    #[error("not authorized: {0}")]
    Authorization(String),

    /// The service has no record of the requested resource.
    #[error("not found: {0}")]
    NotFound(String),

    /// Transport-level failure (connection refused, timeout, DNS, ...).
    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// The service answered but the body did not match the expected shape.
    #[error("unexpected response body: {0}")]
    Decode(String),

    /// Any other non-success status the service returned.
    #[error("service returned {status}: {message}")]
    Unexpected { status: u16, message: String },

    /// An identical request is already in flight (duplicate submit guard).
    #[error("a {operation} request for '{target}' is already in flight")]
    DuplicateRequest { operation: String, target: String },
}
