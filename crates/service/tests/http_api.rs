use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use phishguard_classifier::{
    Classifier, Model, ModelArtifact, ModelDescription, Node, Result as ClassifierResult,
    StandardScaler, Tree,
};
use phishguard_features::{Feature, FEATURE_COUNT};
use phishguard_service::{build_router, AppState, Detector, ServiceConfig, TrustedDomains};
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

struct StubClassifier(f64);

impl Classifier for StubClassifier {
    fn feature_count(&self) -> usize {
        FEATURE_COUNT
    }

    fn predict_proba(&self, _features: &[f64]) -> ClassifierResult<f64> {
        Ok(self.0)
    }

    fn describe(&self) -> ModelDescription {
        ModelDescription {
            model_type: "GradientBoostingClassifier".to_string(),
            accuracy: Some(99.71),
            feature_count: FEATURE_COUNT,
            model_hash: "ab".repeat(32),
            scaler_hash: "cd".repeat(32),
        }
    }
}

fn router_with(detector: Detector) -> Router {
    build_router(AppState::new(Arc::new(detector)), true)
}

fn ready_router(probability: f64) -> Router {
    router_with(Detector::ready(
        TrustedDomains::default(),
        Arc::new(StubClassifier(probability)),
    ))
}

fn not_ready_router() -> Router {
    router_with(Detector::not_ready(TrustedDomains::default(), "no artifacts"))
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn predict(body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/predict")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn predict_returns_assessment() {
    let (status, body) = send(
        ready_router(0.93),
        predict(json!({"url": "http://login-bank-verify.tk/account?id=123456789012"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["phishing"], 1);
    assert_eq!(body["proba"], 0.93);
    assert_eq!(body["message"], "Phishing Risk");
    let reasons = body["reasons"].as_array().unwrap();
    assert_eq!(reasons[0], "The site does NOT use HTTPS (not secure).");
    assert_eq!(
        reasons.last().unwrap(),
        "Contains suspicious keywords like: login, bank, verify, account."
    );
}

#[tokio::test]
async fn trusted_domain_short_circuits() {
    let (status, body) = send(
        ready_router(0.99),
        predict(json!({"url": "https://www.google.com/search"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "url": "https://www.google.com/search",
            "phishing": 0,
            "proba": 0.01,
            "message": "Trusted Domain",
            "reasons": ["Domain 'google.com' is in the trusted list."]
        })
    );
}

#[tokio::test]
async fn missing_or_empty_url_is_bad_request() {
    let (status, body) = send(ready_router(0.5), predict(json!({"url": ""}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "No URL provided"}));

    let (status, body) = send(ready_router(0.5), predict(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "No URL provided");
}

#[tokio::test]
async fn null_url_is_bad_request() {
    let (status, body) = send(ready_router(0.5), predict(json!({"url": null}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "No URL provided"}));
}

#[tokio::test]
async fn malformed_json_is_bad_request() {
    let request = Request::builder()
        .method("POST")
        .uri("/predict")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, body) = send(ready_router(0.5), request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn not_ready_predict_is_unavailable() {
    let (status, body) = send(
        not_ready_router(),
        predict(json!({"url": "https://www.google.com"})),
    )
    .await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(
        body,
        json!({"error": "Model or scaler not loaded. Server not ready."})
    );
}

#[tokio::test]
async fn model_info_reports_metadata() {
    let (status, body) = send(ready_router(0.5), get("/model-info")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["accuracy"], 99.71);
    assert_eq!(body["model_type"], "GradientBoostingClassifier");
    assert_eq!(body["status"], "ready");
    assert_eq!(body["feature_count"], 33);
    assert_eq!(body["model_hash"].as_str().unwrap().len(), 64);

    let (status, body) = send(not_ready_router(), get("/model-info")).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body, json!({"error": "Model not loaded."}));
}

#[tokio::test]
async fn health_counts_requests() {
    let app = ready_router(0.5);
    let (_, first) = send(app.clone(), get("/health")).await;
    let (status, second) = send(app, get("/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["status"], "ok");
    assert_eq!(first["model_ready"], true);
    assert_eq!(first["requests_total"], 1);
    assert_eq!(second["requests_total"], 2);

    let (status, body) = send(not_ready_router(), get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["model_ready"], false);
}

#[tokio::test]
async fn detector_loads_artifacts_from_config() {
    let dir = TempDir::new().unwrap();
    let tree = Tree::new(vec![
        Node::internal(Feature::IsSuspiciousTld.index() as i32, 0.5, 1, 2),
        Node::leaf(-3.0),
        Node::leaf(3.0),
    ]);
    let config = ServiceConfig {
        model_path: dir.path().join("model.json"),
        scaler_path: dir.path().join("scaler.json"),
        ..ServiceConfig::default()
    };
    ModelArtifact::new(Model::new(FEATURE_COUNT, 1.0, 0.0, vec![tree]), Some(98.0))
        .save_json(&config.model_path)
        .unwrap();
    StandardScaler::new(vec![0.0; FEATURE_COUNT], vec![1.0; FEATURE_COUNT])
        .save_json(&config.scaler_path)
        .unwrap();

    let detector = Detector::from_config(&config);
    assert!(detector.is_ready());

    let (status, body) = send(
        router_with(detector),
        predict(json!({"url": "https://paypal-secure.xyz/"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    // sigmoid(3.0)
    assert_eq!(body["proba"], 0.9526);
    assert_eq!(body["message"], "Phishing Risk");
}

#[tokio::test]
async fn missing_artifacts_leave_service_not_ready() {
    let dir = TempDir::new().unwrap();
    let config = ServiceConfig {
        model_path: dir.path().join("absent_model.json"),
        scaler_path: dir.path().join("absent_scaler.json"),
        ..ServiceConfig::default()
    };
    let detector = Detector::from_config(&config);
    assert!(!detector.is_ready());

    let (status, _) = send(
        router_with(detector),
        predict(json!({"url": "http://example.com"})),
    )
    .await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
}
