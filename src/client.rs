//! Paystack API client and shared request executor.
//!
//! Every operation builds a JSON payload or query set and delegates to one
//! executor, which attaches bearer authentication, performs a single HTTP
//! round-trip, and normalizes the outcome into an [`Envelope`].

use std::fmt;
use std::time::Duration;

use reqwest::{Client, Method, StatusCode};
use rust_decimal::Decimal;
use serde_json::{Map, Value, json};
use tracing::{debug, instrument, warn};
use url::Url;
use uuid::Uuid;

use crate::error::{PaystackError, Result};
use crate::models::{
    CardDetails, ChargeOptions, Envelope, RecipientDetails, TransactionOptions, TransferOptions,
    TransferRequest, to_minor_units,
};

/// Production API host.
const BASE_URL: &str = "https://api.paystack.co";

/// Currency applied when the caller configures none.
const DEFAULT_CURRENCY: &str = "NGN";

/// Client construction parameters.
///
/// The defaults target the production API; the base URL override exists for
/// tests and staging environments.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Currency applied to payloads when an operation supplies none.
    pub default_currency: String,

    /// Base URL requests are issued against.
    pub base_url: String,

    /// Total request timeout in seconds.
    pub timeout_secs: u64,

    /// Connection timeout in seconds.
    pub connect_timeout_secs: u64,

    /// Maximum idle connections kept per host.
    pub pool_max_idle_per_host: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            default_currency: DEFAULT_CURRENCY.to_owned(),
            base_url: BASE_URL.to_owned(),
            timeout_secs: 30,
            connect_timeout_secs: 10,
            pool_max_idle_per_host: 10,
        }
    }
}

/// Client for the Paystack REST API.
///
/// Holds the secret key, the default currency, and a pooled HTTP client.
/// The configuration is immutable for the client's lifetime and no state is
/// shared across calls, so one instance can be used from concurrent tasks.
///
/// # Examples
///
/// ```rust,no_run
/// use paystack_client::{PaystackClient, TransactionOptions};
/// use rust_decimal::Decimal;
///
/// # async fn example() -> paystack_client::error::Result<()> {
/// let client = PaystackClient::new("sk_test_xxxx")?;
///
/// let envelope = client
///     .initialize_transaction("customer@example.com", Decimal::new(5050, 2), &TransactionOptions::default())
///     .await?;
///
/// if let Some(data) = envelope.data() {
///     println!("authorization_url: {}", data["authorization_url"]);
/// }
/// # Ok(())
/// # }
/// ```
pub struct PaystackClient {
    secret_key: String,
    default_currency: String,
    base_url: String,
    http: Client,
}

// Manual Debug keeps the secret key out of logs and panic messages.
impl fmt::Debug for PaystackClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PaystackClient")
            .field("secret_key", &"[redacted]")
            .field("default_currency", &self.default_currency)
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl PaystackClient {
    /// Creates a client with default configuration (production host, NGN).
    ///
    /// # Errors
    ///
    /// Returns [`PaystackError::Http`] if the HTTP client cannot be built.
    pub fn new(secret_key: impl Into<String>) -> Result<Self> {
        Self::with_config(secret_key, ClientConfig::default())
    }

    /// Creates a client with explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns [`PaystackError::InvalidBaseUrl`] when the configured base URL
    /// does not parse, or [`PaystackError::Http`] when the HTTP client cannot
    /// be built.
    pub fn with_config(secret_key: impl Into<String>, config: ClientConfig) -> Result<Self> {
        Url::parse(&config.base_url)
            .map_err(|e| PaystackError::InvalidBaseUrl(format!("{}: {e}", config.base_url)))?;

        let http = Client::builder()
            .pool_max_idle_per_host(config.pool_max_idle_per_host)
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .build()?;

        Ok(Self {
            secret_key: secret_key.into(),
            default_currency: config.default_currency,
            base_url: config.base_url.trim_end_matches('/').to_owned(),
            http,
        })
    }

    /// Returns the currency applied when operations supply none.
    #[must_use]
    pub fn default_currency(&self) -> &str {
        &self.default_currency
    }

    /// Returns the base URL requests are issued against.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Executes one API call and normalizes the outcome.
    ///
    /// Single choke point for all operations: attaches the bearer token and
    /// JSON content type, performs exactly one attempt, and converts every
    /// failure mode into a failure envelope. Transport errors never propagate
    /// past this method.
    #[instrument(skip_all, fields(method = %method, endpoint = endpoint))]
    async fn request(
        &self,
        method: Method,
        endpoint: &str,
        payload: Option<Value>,
        query: Option<&[(&str, String)]>,
    ) -> Envelope {
        let url = format!("{}{endpoint}", self.base_url);

        let mut request = self
            .http
            .request(method, &url)
            .bearer_auth(&self.secret_key)
            .header(reqwest::header::CONTENT_TYPE, "application/json");

        if let Some(params) = query {
            request = request.query(params);
        }

        if let Some(body) = &payload {
            request = request.json(body);
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(err) => {
                warn!(error = %err, "transport failure");
                return Envelope::Failure(json!({ "error": err.to_string() }));
            }
        };

        let status = response.status();
        let body = match response.json::<Value>().await {
            Ok(body) => body,
            Err(err) => {
                warn!(status = status.as_u16(), error = %err, "undecodable response body");
                return Envelope::Failure(json!({ "error": err.to_string() }));
            }
        };

        if status == StatusCode::OK || status == StatusCode::CREATED {
            debug!(status = status.as_u16(), "request succeeded");
            let mut body = body;
            match body.get_mut("data") {
                Some(data) => Envelope::Success(data.take()),
                None => Envelope::Success(body),
            }
        } else {
            debug!(status = status.as_u16(), "request rejected");
            Envelope::Failure(body)
        }
    }

    /// Initializes a transaction for a customer.
    ///
    /// The amount is given in major units and transmitted in minor units;
    /// the currency falls back to the client default.
    ///
    /// # Errors
    ///
    /// Returns [`PaystackError::InvalidAmount`] for non-representable
    /// amounts. API and transport failures are reported in the envelope.
    pub async fn initialize_transaction(
        &self,
        email: &str,
        amount: Decimal,
        opts: &TransactionOptions,
    ) -> Result<Envelope> {
        let payload = self.initialize_payload(email, amount, opts)?;
        Ok(self.request(Method::POST, "/transaction/initialize", Some(payload), None).await)
    }

    /// Fetches the status of a transaction by its reference.
    ///
    /// # Errors
    ///
    /// Infallible in practice; API and transport failures are reported in the
    /// envelope.
    pub async fn verify_transaction(&self, reference: &str) -> Result<Envelope> {
        let endpoint = format!("/transaction/verify/{reference}");
        Ok(self.request(Method::GET, &endpoint, None, None).await)
    }

    /// Charges a card directly.
    ///
    /// A random reference is generated when none is supplied, so each
    /// invocation is a distinct transaction attempt.
    ///
    /// # Errors
    ///
    /// Returns [`PaystackError::InvalidAmount`] for non-representable
    /// amounts.
    pub async fn charge_card(
        &self,
        email: &str,
        amount: Decimal,
        card: &CardDetails,
        opts: &ChargeOptions,
    ) -> Result<Envelope> {
        let payload = self.charge_payload(email, amount, card, opts)?;
        Ok(self.request(Method::POST, "/charge", Some(payload), None).await)
    }

    /// Transfers from the integration balance to a previously created
    /// recipient.
    ///
    /// # Errors
    ///
    /// Returns [`PaystackError::MissingField`] when the descriptor carries no
    /// `recipient_code`, and [`PaystackError::InvalidAmount`] for
    /// non-representable amounts.
    pub async fn bank_transfer(
        &self,
        recipient: &RecipientDetails,
        amount: Decimal,
        opts: &TransferOptions,
    ) -> Result<Envelope> {
        let payload = self.transfer_payload(recipient, amount, opts)?;
        Ok(self.request(Method::POST, "/transfer", Some(payload), None).await)
    }

    /// Queues several transfers in one call.
    ///
    /// Every entry's amount is converted to minor units and entries without a
    /// reference get a generated one.
    ///
    /// # Errors
    ///
    /// Returns [`PaystackError::InvalidAmount`] when any entry's amount is
    /// non-representable.
    pub async fn bulk_transfer(&self, transfers: &[TransferRequest]) -> Result<Envelope> {
        let payload = self.bulk_transfer_payload(transfers)?;
        Ok(self.request(Method::POST, "/transfer/bulk", Some(payload), None).await)
    }

    /// Lists banks for a country (default Nigeria).
    ///
    /// The country name is lowercased before transmission, as the API
    /// expects.
    ///
    /// # Errors
    ///
    /// Infallible in practice; API and transport failures are reported in the
    /// envelope.
    pub async fn list_banks(&self, country: Option<&str>) -> Result<Envelope> {
        let country = country.unwrap_or("Nigeria").to_lowercase();
        let query = [("country", country)];
        Ok(self.request(Method::GET, "/bank", None, Some(&query)).await)
    }

    /// Resolves the account holder for an account number and bank code.
    ///
    /// # Errors
    ///
    /// Infallible in practice; API and transport failures are reported in the
    /// envelope.
    pub async fn resolve_bank_account(
        &self,
        account_number: &str,
        bank_code: &str,
    ) -> Result<Envelope> {
        let query = [
            ("account_number", account_number.to_owned()),
            ("bank_code", bank_code.to_owned()),
        ];
        Ok(self.request(Method::GET, "/bank/resolve", None, Some(&query)).await)
    }

    /// Creates a transfer recipient.
    ///
    /// The recipient type defaults to `"nuban"` and the currency to the
    /// client default.
    ///
    /// # Errors
    ///
    /// Returns [`PaystackError::MissingField`] when `name`, `account_number`,
    /// or `bank_code` is absent from the descriptor.
    pub async fn create_transfer_recipient(&self, details: &RecipientDetails) -> Result<Envelope> {
        let payload = self.recipient_payload(details)?;
        Ok(self.request(Method::POST, "/transferrecipient", Some(payload), None).await)
    }

    fn initialize_payload(
        &self,
        email: &str,
        amount: Decimal,
        opts: &TransactionOptions,
    ) -> Result<Value> {
        // Extra fields go in first; computed fields always win.
        let mut payload = opts.extra.clone();
        payload.insert("email".to_owned(), json!(email));
        payload.insert("amount".to_owned(), json!(to_minor_units(amount)?));
        payload.insert("currency".to_owned(), json!(self.resolve_currency(opts.currency.as_deref())));
        Ok(Value::Object(payload))
    }

    fn charge_payload(
        &self,
        email: &str,
        amount: Decimal,
        card: &CardDetails,
        opts: &ChargeOptions,
    ) -> Result<Value> {
        let mut payload = opts.extra.clone();
        payload.insert("email".to_owned(), json!(email));
        payload.insert("amount".to_owned(), json!(to_minor_units(amount)?));
        payload.insert("card".to_owned(), json!(card));
        payload.insert("currency".to_owned(), json!(self.resolve_currency(opts.currency.as_deref())));
        payload.insert("reference".to_owned(), json!(resolve_reference(opts.reference.as_deref())));
        Ok(Value::Object(payload))
    }

    fn transfer_payload(
        &self,
        recipient: &RecipientDetails,
        amount: Decimal,
        opts: &TransferOptions,
    ) -> Result<Value> {
        let code = recipient
            .recipient_code
            .as_deref()
            .ok_or(PaystackError::MissingField("recipient_code"))?;

        let mut payload = opts.extra.clone();
        payload.insert("source".to_owned(), json!("balance"));
        payload.insert("amount".to_owned(), json!(to_minor_units(amount)?));
        payload.insert("recipient".to_owned(), json!(code));
        payload.insert("currency".to_owned(), json!(self.resolve_currency(opts.currency.as_deref())));
        payload.insert("reference".to_owned(), json!(resolve_reference(opts.reference.as_deref())));
        if let Some(reason) = &opts.reason {
            payload.insert("reason".to_owned(), json!(reason));
        }
        Ok(Value::Object(payload))
    }

    fn bulk_transfer_payload(&self, transfers: &[TransferRequest]) -> Result<Value> {
        let mut prepared = Vec::with_capacity(transfers.len());
        for transfer in transfers {
            let mut entry = Map::new();
            entry.insert("amount".to_owned(), json!(to_minor_units(transfer.amount)?));
            entry.insert("recipient".to_owned(), json!(transfer.recipient));
            entry
                .insert("reference".to_owned(), json!(resolve_reference(transfer.reference.as_deref())));
            if let Some(reason) = &transfer.reason {
                entry.insert("reason".to_owned(), json!(reason));
            }
            prepared.push(Value::Object(entry));
        }

        Ok(json!({
            "currency": self.default_currency,
            "source": "balance",
            "transfers": prepared,
        }))
    }

    fn recipient_payload(&self, details: &RecipientDetails) -> Result<Value> {
        let name = details.name.as_deref().ok_or(PaystackError::MissingField("name"))?;
        let account_number = details
            .account_number
            .as_deref()
            .ok_or(PaystackError::MissingField("account_number"))?;
        let bank_code =
            details.bank_code.as_deref().ok_or(PaystackError::MissingField("bank_code"))?;

        Ok(json!({
            "type": details.recipient_type.as_deref().unwrap_or("nuban"),
            "name": name,
            "account_number": account_number,
            "bank_code": bank_code,
            "currency": details.currency.as_deref().unwrap_or(&self.default_currency),
        }))
    }

    fn resolve_currency(&self, currency: Option<&str>) -> String {
        currency.unwrap_or(&self.default_currency).to_owned()
    }
}

/// Uses the explicit reference when given, otherwise generates a random one.
fn resolve_reference(reference: Option<&str>) -> String {
    reference.map_or_else(|| Uuid::new_v4().to_string(), ToOwned::to_owned)
}
