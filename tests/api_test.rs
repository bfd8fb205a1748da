use std::sync::{Arc, Mutex};

use actix_web::{http::StatusCode, test, web, App};
use async_trait::async_trait;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use grade_predictor::api::{self, MAX_BODY_BYTES};
use grade_predictor::error::PredictError;
use grade_predictor::inference::InferenceEndpoint;
use grade_predictor::model::feature_importance;

/// Replays a canned response and records what it was sent.
struct StubEndpoint {
    response: Result<Vec<u8>, String>,
    received: Mutex<Vec<Vec<u8>>>,
}

impl StubEndpoint {
    fn returning(body: &str) -> Arc<Self> {
        Arc::new(Self {
            response: Ok(body.as_bytes().to_vec()),
            received: Mutex::new(Vec::new()),
        })
    }

    fn failing(message: &str) -> Arc<Self> {
        Arc::new(Self {
            response: Err(message.to_string()),
            received: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait]
impl InferenceEndpoint for StubEndpoint {
    async fn invoke(&self, payload: Vec<u8>) -> Result<Vec<u8>, PredictError> {
        self.received.lock().unwrap().push(payload);
        self.response.clone().map_err(PredictError::Invocation)
    }
}

fn metrics() -> Value {
    json!({
        "studyHours": "20",
        "attendance": "92",
        "previousGrade": "78",
        "projectScore": "85",
        "quizAverage": "81",
        "studyGroupHours": "4",
        "tutorialAttendance": "90",
        "sleepHours": "7",
        "stressLevel": "5",
        "extracurricularHours": "6"
    })
}

async fn post_predict(stub: Arc<StubEndpoint>, body: Vec<u8>) -> (StatusCode, Value) {
    let endpoint: Arc<dyn InferenceEndpoint> = stub;
    let app = test::init_service(
        App::new()
            .app_data(web::Data::from(endpoint))
            .configure(api::configure),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/predict")
        .insert_header(("content-type", "application/json"))
        .set_payload(body)
        .to_request();
    let resp = test::call_service(&app, req).await;
    let status = resp.status();
    let body: Value = test::read_body_json(resp).await;
    (status, body)
}

#[actix_web::test]
async fn test_predict_rounds_and_attaches_importance() {
    let stub = StubEndpoint::returning("[87.666]");
    let (status, body) = post_predict(stub.clone(), metrics().to_string().into_bytes()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["prediction"], json!(87.67));
    assert_eq!(body["featureImportance"], serde_json::to_value(feature_importance()).unwrap());
}

#[actix_web::test]
async fn test_body_forwarded_unchanged() {
    let stub = StubEndpoint::returning("[70]");
    let body = json!({"studyHours": "12", "somethingElse": [1, 2]});
    post_predict(stub.clone(), body.to_string().into_bytes()).await;

    let received = stub.received.lock().unwrap();
    assert_eq!(received.len(), 1);
    let forwarded: Value = serde_json::from_slice(&received[0]).unwrap();
    assert_eq!(forwarded, body);
}

#[actix_web::test]
async fn test_forwarding_keeps_key_order() {
    let stub = StubEndpoint::returning("[70]");
    let body = r#"{"studyHours":"1","attendance":"2","stressLevel":"3"}"#;
    post_predict(stub.clone(), body.as_bytes().to_vec()).await;

    let received = stub.received.lock().unwrap();
    assert_eq!(String::from_utf8(received[0].clone()).unwrap(), body);
}

#[actix_web::test]
async fn test_oversized_body_is_500() {
    let stub = StubEndpoint::returning("[80]");
    let body = json!({ "studyHours": "x".repeat(MAX_BODY_BYTES + 1) });
    let (status, body) = post_predict(stub.clone(), body.to_string().into_bytes()).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Prediction failed");
    assert!(body["details"].as_str().unwrap().starts_with("Invalid request body"));
    assert!(stub.received.lock().unwrap().is_empty());
}

#[actix_web::test]
async fn test_importance_ignores_input() {
    let (_, first) = post_predict(StubEndpoint::returning("[10]"), metrics().to_string().into_bytes()).await;
    let (_, second) = post_predict(StubEndpoint::returning("[99.999]"), b"{}".to_vec()).await;

    assert_eq!(first["featureImportance"], second["featureImportance"]);
    assert_eq!(second["prediction"], json!(100.0));
}

#[actix_web::test]
async fn test_inference_failure_is_500() {
    let stub = StubEndpoint::failing("endpoint not found");
    let (status, body) = post_predict(stub, metrics().to_string().into_bytes()).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Prediction failed");
    assert_eq!(body["details"], "Inference endpoint error: endpoint not found");
}

#[actix_web::test]
async fn test_non_numeric_response_is_500() {
    let (status, body) = post_predict(StubEndpoint::returning("[\"n/a\"]"), metrics().to_string().into_bytes()).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Prediction failed");
}

#[actix_web::test]
async fn test_invalid_json_body_is_500() {
    let stub = StubEndpoint::returning("[80]");
    let (status, body) = post_predict(stub.clone(), b"not json".to_vec()).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Prediction failed");
    assert!(body["details"].as_str().unwrap().starts_with("Invalid request body"));
    assert!(stub.received.lock().unwrap().is_empty());
}

#[actix_web::test]
async fn test_homepage_and_health() {
    let endpoint: Arc<dyn InferenceEndpoint> = StubEndpoint::returning("[0]");
    let app = test::init_service(
        App::new()
            .app_data(web::Data::from(endpoint))
            .configure(api::configure),
    )
    .await;

    let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let page = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
    assert!(page.contains("\"key\":\"extracurricularHours\""));
    assert!(page.contains("/api/predict"));

    let resp = test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
}
