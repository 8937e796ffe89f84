//! Error types for the Paystack client.
//!
//! Only *caller* errors surface through this module: malformed input detected
//! before any network traffic. API-level rejections and transport failures are
//! folded into [`Envelope::Failure`](crate::models::Envelope) by the request
//! executor and never raised as errors.
//!
//! # Examples
//!
//! ```
//! use paystack_client::error::{PaystackError, Result};
//!
//! fn require_code(code: Option<&str>) -> Result<&str> {
//!     code.ok_or(PaystackError::MissingField("recipient_code"))
//! }
//! ```

use thiserror::Error;

/// Result type alias for client operations.
///
/// The `Err` side carries [`PaystackError`] and is reserved for programming
/// errors in the calling code; ordinary API failures are reported through the
/// success flag of the returned envelope instead.
pub type Result<T> = std::result::Result<T, PaystackError>;

/// Errors raised by the Paystack client before a request is sent.
///
/// All variants indicate a defect in the calling code rather than a runtime
/// condition, so the appropriate response is to fix the input, not to retry.
#[must_use = "errors should be handled, propagated, or explicitly panicked"]
#[derive(Debug, Error)]
pub enum PaystackError {
    /// A required field is absent from a caller-supplied descriptor.
    ///
    /// Raised eagerly by payload builders, e.g. a
    /// [`RecipientDetails`](crate::models::RecipientDetails) without a `name`
    /// passed to `create_transfer_recipient`, or one without a
    /// `recipient_code` passed to `bank_transfer`. No network call is made.
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// An amount cannot be represented in minor currency units.
    ///
    /// Conversion multiplies the major-unit amount by 100 and truncates; this
    /// error is returned when the result does not fit the wire integer type
    /// (a negative amount, or a magnitude beyond `i64`).
    #[error("amount not representable in minor units: {0}")]
    InvalidAmount(String),

    /// The configured base URL override is not a valid URL.
    ///
    /// Only possible at construction time via
    /// [`ClientConfig`](crate::client::ClientConfig); the built-in production
    /// base URL always parses.
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),

    /// The underlying HTTP client could not be built.
    ///
    /// Construction-time only; once a client exists, transport failures are
    /// reported through failure envelopes rather than this variant.
    #[error("HTTP client construction failed: {0}")]
    Http(#[from] reqwest::Error),
}
