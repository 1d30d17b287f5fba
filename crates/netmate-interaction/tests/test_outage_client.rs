use netmate_core::{CustomerId, OutageCheckResult, OutageChecker};
use netmate_interaction::OutageCheckClient;
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SERVICE_PATH: &str = "/dtv/genai/getServiceInfo";

fn customer() -> CustomerId {
    CustomerId::parse("0771234567").unwrap()
}

fn client_for(server: &MockServer, timeout: Duration) -> OutageCheckClient {
    OutageCheckClient::new(format!("{}{}", server.uri(), SERVICE_PATH), timeout).unwrap()
}

#[tokio::test]
async fn reports_affected_service_with_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(SERVICE_PATH))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({ "phoneNumber": "0771234567" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "isServiceAffected": true,
            "errorMsg": "Fibre cut in your area, ETA 4 hours."
        })))
        .expect(1)
        .mount(&server)
        .await;

    let result = client_for(&server, Duration::from_secs(10))
        .check(&customer())
        .await;

    assert_eq!(
        result,
        OutageCheckResult::Status {
            is_service_affected: true,
            message: "Fibre cut in your area, ETA 4 hours.".to_string(),
        }
    );
}

#[tokio::test]
async fn reports_unaffected_service() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(SERVICE_PATH))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "isServiceAffected": false })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let result = client_for(&server, Duration::from_secs(10))
        .check(&customer())
        .await;

    assert_eq!(
        result,
        OutageCheckResult::Status {
            is_service_affected: false,
            message: String::new(),
        }
    );
    assert!(!result.is_affected());
}

#[tokio::test]
async fn non_2xx_is_error_without_retry() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(SERVICE_PATH))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;

    let result = client_for(&server, Duration::from_secs(10))
        .check(&customer())
        .await;

    match result {
        OutageCheckResult::Error(cause) => assert!(cause.contains("503"), "cause: {cause}"),
        other => panic!("expected error, got {other:?}"),
    }
}

#[tokio::test]
async fn malformed_body_is_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(SERVICE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let result = client_for(&server, Duration::from_secs(10))
        .check(&customer())
        .await;

    match result {
        OutageCheckResult::Error(cause) => assert!(cause.contains("Malformed"), "cause: {cause}"),
        other => panic!("expected error, got {other:?}"),
    }
}

#[tokio::test]
async fn null_affected_flag_means_no_outage() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(SERVICE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "isServiceAffected": null,
            "errorMsg": null
        })))
        .mount(&server)
        .await;

    let result = client_for(&server, Duration::from_secs(10))
        .check(&customer())
        .await;

    assert_eq!(
        result,
        OutageCheckResult::Status {
            is_service_affected: false,
            message: String::new(),
        }
    );
}

#[tokio::test]
async fn error_key_in_success_body_is_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(SERVICE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "error": "subscriber lookup failed",
            "isServiceAffected": false
        })))
        .mount(&server)
        .await;

    let result = client_for(&server, Duration::from_secs(10))
        .check(&customer())
        .await;

    match result {
        OutageCheckResult::Error(cause) => {
            assert!(cause.contains("subscriber lookup failed"), "cause: {cause}")
        }
        other => panic!("expected error, got {other:?}"),
    }
}

#[tokio::test]
async fn slow_service_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(SERVICE_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "isServiceAffected": true }))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let result = client_for(&server, Duration::from_millis(200))
        .check(&customer())
        .await;

    match result {
        OutageCheckResult::Error(cause) => assert!(cause.contains("timed out"), "cause: {cause}"),
        other => panic!("expected timeout error, got {other:?}"),
    }
}

#[tokio::test]
async fn unreachable_service_is_error() {
    let server = MockServer::start().await;
    let endpoint = format!("{}{}", server.uri(), SERVICE_PATH);
    drop(server);

    let client = OutageCheckClient::new(endpoint, Duration::from_secs(2)).unwrap();
    let result = client.check(&customer()).await;

    assert!(matches!(result, OutageCheckResult::Error(_)));
}
