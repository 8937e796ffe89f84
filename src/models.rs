//! Data models for Paystack API operations.
//!
//! This module defines the caller-facing descriptors (cards, recipients,
//! transfer entries), the per-operation option structs, the normalized
//! response [`Envelope`], and the major-to-minor currency unit conversion.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{PaystackError, Result};

/// Normalized outcome of one API call.
///
/// Every operation resolves to exactly this two-part shape: a success flag
/// plus a JSON payload. Callers inspect the variant instead of catching
/// errors; HTTP-level and transport-level failures both collapse into
/// [`Envelope::Failure`].
#[derive(Debug, Clone, PartialEq)]
pub enum Envelope {
    /// The API accepted the call (HTTP 200/201). Carries the response's
    /// `data` sub-object, or the full decoded body when `data` is absent.
    Success(Value),
    /// The API rejected the call or the transport failed. Carries the decoded
    /// error body, or a synthetic `{"error": "..."}` object describing a
    /// transport failure.
    Failure(Value),
}

impl Envelope {
    /// Returns `true` for [`Envelope::Success`].
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Returns the data payload of a successful call.
    #[must_use]
    pub fn data(&self) -> Option<&Value> {
        match self {
            Self::Success(data) => Some(data),
            Self::Failure(_) => None,
        }
    }

    /// Returns the error payload of a failed call.
    #[must_use]
    pub fn error(&self) -> Option<&Value> {
        match self {
            Self::Success(_) => None,
            Self::Failure(error) => Some(error),
        }
    }

    /// Decomposes the envelope into `(success, payload)`.
    #[must_use]
    pub fn into_parts(self) -> (bool, Value) {
        match self {
            Self::Success(value) => (true, value),
            Self::Failure(value) => (false, value),
        }
    }
}

/// Converts a major-unit amount to integer minor units (kobo for NGN).
///
/// Multiplies by 100 and truncates any sub-minor-unit fraction, so
/// `50.505` becomes `5050`. Rounding is never applied.
///
/// # Errors
///
/// Returns [`PaystackError::InvalidAmount`] for negative amounts and for
/// magnitudes that do not fit in `i64`.
pub fn to_minor_units(amount: Decimal) -> Result<i64> {
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(PaystackError::InvalidAmount(format!("negative amount: {amount}")));
    }

    let minor = amount
        .checked_mul(Decimal::ONE_HUNDRED)
        .ok_or_else(|| PaystackError::InvalidAmount(format!("overflow at {amount}")))?
        .trunc();

    minor
        .to_i64()
        .ok_or_else(|| PaystackError::InvalidAmount(format!("overflow at {amount}")))
}

/// Card details for a direct charge.
///
/// Serialized as the `card` object of the `/charge` payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardDetails {
    /// Card PAN.
    pub number: String,
    /// Card verification value.
    pub cvv: String,
    /// Two-digit expiry month.
    pub expiry_month: String,
    /// Two- or four-digit expiry year.
    pub expiry_year: String,
}

/// Transfer recipient descriptor.
///
/// Used in two roles: as input to `create_transfer_recipient` (which requires
/// `name`, `account_number`, and `bank_code`) and as the destination of
/// `bank_transfer` (which requires the API-assigned `recipient_code`). All
/// fields are optional at construction; each operation validates the subset
/// it needs before any network call.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecipientDetails {
    /// Account holder name.
    pub name: Option<String>,
    /// Bank account number.
    pub account_number: Option<String>,
    /// Bank code as returned by the bank list endpoint.
    pub bank_code: Option<String>,
    /// Recipient type; defaults to `"nuban"` when omitted.
    #[serde(rename = "type")]
    pub recipient_type: Option<String>,
    /// Currency code; defaults to the client's currency when omitted.
    pub currency: Option<String>,
    /// Identifier assigned by Paystack to a previously created recipient.
    pub recipient_code: Option<String>,
}

/// One entry of a bulk transfer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransferRequest {
    /// Transfer amount in major units; converted to minor units on send.
    pub amount: Decimal,
    /// Recipient code of the destination.
    pub recipient: String,
    /// Unique reference; a random one is generated when omitted.
    pub reference: Option<String>,
    /// Optional narration shown on the recipient's statement.
    pub reason: Option<String>,
}

/// Optional parameters for `initialize_transaction`.
#[derive(Debug, Clone, Default)]
pub struct TransactionOptions {
    /// Currency override; the client default applies when `None`.
    pub currency: Option<String>,
    /// Additional payload fields, merged before the computed fields so they
    /// can never clobber the converted amount or resolved currency.
    pub extra: Map<String, Value>,
}

/// Optional parameters for `charge_card`.
#[derive(Debug, Clone, Default)]
pub struct ChargeOptions {
    /// Currency override.
    pub currency: Option<String>,
    /// Explicit transaction reference; generated when `None`.
    pub reference: Option<String>,
    /// Additional payload fields.
    pub extra: Map<String, Value>,
}

/// Optional parameters for `bank_transfer`.
#[derive(Debug, Clone, Default)]
pub struct TransferOptions {
    /// Currency override.
    pub currency: Option<String>,
    /// Explicit transfer reference; generated when `None`.
    pub reference: Option<String>,
    /// Optional narration shown on the recipient's statement.
    pub reason: Option<String>,
    /// Additional payload fields.
    pub extra: Map<String, Value>,
}
