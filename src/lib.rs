//! Async client for the Paystack REST API.
//!
//! This crate wraps the Paystack HTTP API: transaction initialization and
//! verification, card charges, single and bulk transfers, recipient
//! management, and bank lookup. Every operation is a stateless mapping from
//! method arguments to one REST call, normalized into a uniform
//! success/failure [`Envelope`].
//!
//! # Design
//!
//! - One shared request executor attaches `Authorization: Bearer <key>`,
//!   performs a single attempt, and converts HTTP-level rejections *and*
//!   transport failures into [`Envelope::Failure`]. Callers branch on the
//!   envelope instead of catching errors.
//! - Operations return `Err` only for caller mistakes detected before any
//!   network traffic: a descriptor missing a required field, or an amount
//!   that cannot be represented in minor units.
//! - Amounts are accepted in major currency units as [`rust_decimal::Decimal`]
//!   and transmitted as truncated integer minor units (×100).
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use paystack_client::{PaystackClient, RecipientDetails};
//!
//! # async fn example() -> paystack_client::error::Result<()> {
//! let client = PaystackClient::new("sk_test_xxxx")?;
//!
//! let banks = client.list_banks(None).await?;
//! if let Some(data) = banks.data() {
//!     println!("{} banks", data.as_array().map_or(0, Vec::len));
//! }
//!
//! let recipient = RecipientDetails {
//!     name: Some("Jane Doe".to_owned()),
//!     account_number: Some("0001234567".to_owned()),
//!     bank_code: Some("058".to_owned()),
//!     ..Default::default()
//! };
//! let created = client.create_transfer_recipient(&recipient).await?;
//! println!("success: {}", created.is_success());
//! # Ok(())
//! # }
//! ```
//!
//! # Module Organization
//!
//! - [`client`]: [`PaystackClient`], its configuration, and the operations
//! - [`models`]: descriptors, option structs, the envelope, unit conversion
//! - [`error`]: caller-error types
//!
//! # What this crate does not do
//!
//! No retries or backoff, no idempotency management beyond generated
//! references, no webhook handling, and no persistence. Callers needing
//! resilience wrap the operations themselves.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod client;
pub mod error;
pub mod models;

pub use client::{ClientConfig, PaystackClient};
pub use error::{PaystackError, Result};
pub use models::{
    CardDetails, ChargeOptions, Envelope, RecipientDetails, TransactionOptions, TransferOptions,
    TransferRequest,
};
