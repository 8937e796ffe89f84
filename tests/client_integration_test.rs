//! End-to-end tests for the Paystack client against a mock HTTP server.
//!
//! Covers response normalization (success, API error, transport error),
//! authentication headers, and the payload shapes of each operation.

use paystack_client::{
    CardDetails, ChargeOptions, ClientConfig, PaystackClient, PaystackError, RecipientDetails,
    TransactionOptions, TransferOptions, TransferRequest,
};
use rust_decimal::Decimal;
use serde_json::{Value, json};
use wiremock::matchers::{body_json, body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> PaystackClient {
    let config = ClientConfig { base_url: server.uri(), ..Default::default() };
    PaystackClient::with_config("sk_test_secret", config).expect("client should build")
}

#[tokio::test]
async fn initialize_transaction_sends_exact_payload_and_extracts_data() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/transaction/initialize"))
        .and(header("authorization", "Bearer sk_test_secret"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({
            "email": "a@b.com",
            "amount": 5050,
            "currency": "NGN",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": true,
            "message": "Authorization URL created",
            "data": {
                "authorization_url": "https://checkout.paystack.com/abc",
                "reference": "ref-1",
            },
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let envelope = client
        .initialize_transaction("a@b.com", Decimal::new(505, 1), &TransactionOptions::default())
        .await
        .unwrap();

    assert!(envelope.is_success());
    let data = envelope.data().unwrap();
    assert_eq!(data["authorization_url"], "https://checkout.paystack.com/abc");
    assert_eq!(data["reference"], "ref-1");
}

#[tokio::test]
async fn success_without_data_field_returns_full_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/transaction/verify/ref-42"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"status": true, "message": "ok"})),
        )
        .mount(&server)
        .await;

    let client = client_for(&server);
    let envelope = client.verify_transaction("ref-42").await.unwrap();

    assert!(envelope.is_success());
    assert_eq!(envelope.data().unwrap()["message"], "ok");
}

#[tokio::test]
async fn created_status_is_treated_as_success() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/transferrecipient"))
        .and(body_json(json!({
            "type": "nuban",
            "name": "Jane",
            "account_number": "0001",
            "bank_code": "058",
            "currency": "NGN",
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "status": true,
            "data": {"recipient_code": "RCP_new"},
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let details = RecipientDetails {
        name: Some("Jane".to_owned()),
        account_number: Some("0001".to_owned()),
        bank_code: Some("058".to_owned()),
        ..Default::default()
    };
    let envelope = client.create_transfer_recipient(&details).await.unwrap();

    assert!(envelope.is_success());
    assert_eq!(envelope.data().unwrap()["recipient_code"], "RCP_new");
}

#[tokio::test]
async fn api_error_body_is_returned_verbatim() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/transaction/initialize"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "status": false,
            "message": "Invalid key",
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let envelope = client
        .initialize_transaction("a@b.com", Decimal::new(10, 0), &TransactionOptions::default())
        .await
        .unwrap();

    assert!(!envelope.is_success());
    let error = envelope.error().unwrap();
    assert_eq!(error["message"], "Invalid key");
    assert_eq!(error["status"], false);
}

#[tokio::test]
async fn undecodable_error_body_becomes_synthetic_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/bank"))
        .respond_with(ResponseTemplate::new(500).set_body_string("<html>bad gateway</html>"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let envelope = client.list_banks(None).await.unwrap();

    assert!(!envelope.is_success());
    let description = envelope.error().unwrap()["error"].as_str().unwrap();
    assert!(!description.is_empty());
}

#[tokio::test]
async fn transport_failure_becomes_failure_envelope() {
    // Bind a server to learn a free port, then drop it so the connection
    // is refused.
    let server = MockServer::start().await;
    let uri = server.uri();
    drop(server);

    let config = ClientConfig { base_url: uri, ..Default::default() };
    let client = PaystackClient::with_config("sk_test_secret", config).unwrap();

    let envelope = client.verify_transaction("ref-1").await.unwrap();

    assert!(!envelope.is_success());
    let description = envelope.error().unwrap()["error"].as_str().unwrap();
    assert!(!description.is_empty());
}

#[tokio::test]
async fn charge_card_sends_card_object_and_reference() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/charge"))
        .and(body_partial_json(json!({
            "email": "a@b.com",
            "amount": 25000,
            "currency": "NGN",
            "card": {"number": "4084084084084081", "cvv": "408"},
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": true,
            "data": {"status": "success"},
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let card = CardDetails {
        number: "4084084084084081".to_owned(),
        cvv: "408".to_owned(),
        expiry_month: "01".to_owned(),
        expiry_year: "30".to_owned(),
    };
    let envelope =
        client.charge_card("a@b.com", Decimal::new(250, 0), &card, &ChargeOptions::default()).await.unwrap();

    assert!(envelope.is_success());

    let requests = server.received_requests().await.unwrap();
    let body: Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert!(!body["reference"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn bank_transfer_sends_balance_source_and_recipient_code() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/transfer"))
        .and(body_partial_json(json!({
            "source": "balance",
            "amount": 1234,
            "recipient": "RCP_xyz",
            "currency": "NGN",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": true,
            "data": {"transfer_code": "TRF_1"},
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let recipient =
        RecipientDetails { recipient_code: Some("RCP_xyz".to_owned()), ..Default::default() };
    let envelope = client
        .bank_transfer(&recipient, Decimal::new(1234, 2), &TransferOptions::default())
        .await
        .unwrap();

    assert_eq!(envelope.data().unwrap()["transfer_code"], "TRF_1");
}

#[tokio::test]
async fn bulk_transfer_converts_each_entry_and_fills_references() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/transfer/bulk"))
        .and(body_partial_json(json!({"currency": "NGN", "source": "balance"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": true,
            "data": [],
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let transfers = vec![
        TransferRequest {
            amount: Decimal::new(505, 1),
            recipient: "RCP_one".to_owned(),
            reference: None,
            reason: None,
        },
        TransferRequest {
            amount: Decimal::new(20, 0),
            recipient: "RCP_two".to_owned(),
            reference: Some("bulk-2".to_owned()),
            reason: None,
        },
    ];

    let envelope = client.bulk_transfer(&transfers).await.unwrap();
    assert!(envelope.is_success());

    let requests = server.received_requests().await.unwrap();
    let body: Value = serde_json::from_slice(&requests[0].body).unwrap();
    let entries = body["transfers"].as_array().unwrap();
    assert_eq!(entries[0]["amount"], 5050);
    assert!(!entries[0]["reference"].as_str().unwrap().is_empty());
    assert_eq!(entries[1]["amount"], 2000);
    assert_eq!(entries[1]["reference"], "bulk-2");
}

#[tokio::test]
async fn list_banks_lowercases_country() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/bank"))
        .and(query_param("country", "nigeria"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": true,
            "data": [{"name": "First Bank", "code": "011"}],
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let envelope = client.list_banks(None).await.unwrap();

    assert!(envelope.is_success());
    assert_eq!(envelope.data().unwrap()[0]["code"], "011");
}

#[tokio::test]
async fn list_banks_lowercases_explicit_country() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/bank"))
        .and(query_param("country", "ghana"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": true, "data": []})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let envelope = client.list_banks(Some("Ghana")).await.unwrap();
    assert!(envelope.is_success());
}

#[tokio::test]
async fn resolve_bank_account_sends_query_parameters() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/bank/resolve"))
        .and(query_param("account_number", "0001234567"))
        .and(query_param("bank_code", "058"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": true,
            "data": {"account_name": "JANE DOE"},
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let envelope = client.resolve_bank_account("0001234567", "058").await.unwrap();

    assert_eq!(envelope.data().unwrap()["account_name"], "JANE DOE");
}

#[tokio::test]
async fn missing_required_field_fails_before_any_network_call() {
    let server = MockServer::start().await;

    let client = client_for(&server);
    let details = RecipientDetails {
        account_number: Some("0001".to_owned()),
        bank_code: Some("058".to_owned()),
        ..Default::default()
    };

    let result = client.create_transfer_recipient(&details).await;
    assert!(matches!(result, Err(PaystackError::MissingField("name"))));

    let requests = server.received_requests().await.unwrap();
    assert!(requests.is_empty());
}

#[tokio::test]
async fn missing_recipient_code_fails_before_any_network_call() {
    let server = MockServer::start().await;

    let client = client_for(&server);
    let recipient = RecipientDetails { name: Some("Jane".to_owned()), ..Default::default() };

    let result =
        client.bank_transfer(&recipient, Decimal::new(10, 0), &TransferOptions::default()).await;
    assert!(matches!(result, Err(PaystackError::MissingField("recipient_code"))));

    let requests = server.received_requests().await.unwrap();
    assert!(requests.is_empty());
}
