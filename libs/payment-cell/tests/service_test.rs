use assert_matches::assert_matches;
use serde_json::json;
use uuid::Uuid;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use payment_cell::{PaymentService, VerifyPaymentRequest};
use shared_api::ApiClient;
use shared_models::ApiError;
use shared_utils::storage::TokenStore;
use shared_utils::test_utils::TestConfig;
use shared_utils::{keys, LocalStore};

fn service_for(uri: &str, dir: &tempfile::TempDir) -> PaymentService {
    let store = LocalStore::open(dir.path().join("local_store.json"));
    store.set(keys::AUTH_TOKEN, &"test-token");
    let config = TestConfig::with_api_base(uri).to_app_config();
    PaymentService::new(ApiClient::new(&config, TokenStore::new(store)))
}

#[tokio::test]
async fn create_order_then_verify_round_trip() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().expect("tempdir");
    let appointment_id = Uuid::new_v4();
    let payment_id = Uuid::new_v4();

    Mock::given(method("POST"))
        .and(path("/payments/order"))
        .and(body_partial_json(json!({ "appointmentId": appointment_id, "amount": 500.0 })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {
                "order": {
                    "orderId": "order_9xQ2",
                    "appointmentId": appointment_id,
                    "amount": 500.0,
                    "currency": "INR"
                }
            }
        })))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/payments/verify"))
        .and(body_partial_json(json!({ "orderId": "order_9xQ2" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {
                "payment": {
                    "id": payment_id,
                    "appointmentId": appointment_id,
                    "amount": 500.0,
                    "status": "paid",
                    "method": "upi",
                    "transactionId": "txn_551",
                    "paidAt": "2024-05-01T10:05:00Z"
                }
            }
        })))
        .mount(&server)
        .await;

    let service = service_for(&server.uri(), &dir);

    let order = service
        .create_order(appointment_id, 500.0)
        .await
        .expect("order creation");
    assert_eq!(order.order_id, "order_9xQ2");

    let record = service
        .verify(&VerifyPaymentRequest {
            order_id: order.order_id,
            payment_id: "pay_abc".to_string(),
            signature: "sig".to_string(),
        })
        .await
        .expect("verification");
    assert_eq!(record.id, payment_id);
    assert_eq!(record.transaction_id.as_deref(), Some("txn_551"));
}

#[tokio::test]
async fn failed_verification_carries_the_server_message() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().expect("tempdir");

    Mock::given(method("POST"))
        .and(path("/payments/verify"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "success": false,
            "message": "Signature mismatch"
        })))
        .mount(&server)
        .await;

    let service = service_for(&server.uri(), &dir);
    let result = service
        .verify(&VerifyPaymentRequest {
            order_id: "order_9xQ2".to_string(),
            payment_id: "pay_abc".to_string(),
            signature: "bad".to_string(),
        })
        .await;

    assert_matches!(result, Err(ApiError::Http { status: 400, message }) => {
        assert_eq!(message, "Signature mismatch");
    });
}
