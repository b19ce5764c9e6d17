//! Integration tests for the resume parsing routes and the upstream client

use std::collections::HashMap;
use std::io::Write;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{HeaderMap, Request, StatusCode},
    response::Response,
    routing::post,
    Json, Router,
};
use base64::{engine::general_purpose, Engine as _};
use resume_parser::{
    config::Config,
    error::{AppError, AppResult},
    handlers::create_router,
    models::{sovren::ParsedDocument, ResumeDocument},
    services::{DocumentStore, ObjectStore, ResumeParser, SovrenClient},
    AppState,
};
use serde_json::{json, Value};
use tower::ServiceExt;

const FIXTURE: &str = include_str!("fixtures/parsed_document.json");
const TOKEN: &str = "test-token";

enum Outcome {
    Fixture,
    UpstreamStatus(u16),
}

struct FakeParser {
    outcome: Outcome,
    received: Mutex<Vec<String>>,
}

impl FakeParser {
    fn new(outcome: Outcome) -> Arc<Self> {
        Arc::new(Self {
            outcome,
            received: Mutex::new(Vec::new()),
        })
    }

    fn received(&self) -> Vec<String> {
        self.received.lock().unwrap().clone()
    }
}

#[async_trait]
impl ResumeParser for FakeParser {
    async fn parse(&self, document: &ResumeDocument) -> AppResult<ParsedDocument> {
        self.received.lock().unwrap().push(document.name.clone());
        match self.outcome {
            Outcome::Fixture => Ok(serde_json::from_str(FIXTURE)?),
            Outcome::UpstreamStatus(status) => Err(AppError::Upstream {
                status,
                message: "rejected".to_string(),
            }),
        }
    }
}

struct MemoryStore(HashMap<String, Vec<u8>>);

#[async_trait]
impl ObjectStore for MemoryStore {
    async fn fetch(&self, key: &str) -> AppResult<Vec<u8>> {
        self.0.get(key).cloned().ok_or_else(|| AppError::DocumentNotFound {
            key: key.to_string(),
        })
    }
}

struct FailingStore;

#[async_trait]
impl ObjectStore for FailingStore {
    async fn fetch(&self, _key: &str) -> AppResult<Vec<u8>> {
        Err(AppError::storage("AccessDenied"))
    }
}

fn test_config(vars: &[(&str, &str)]) -> Config {
    let mut map: HashMap<String, String> = [
        ("SOVREN_ACCOUNT_ID", "acct"),
        ("SOVREN_SERVICE_KEY", "key"),
        ("AUTH_TOKEN", TOKEN),
        ("MAX_FILE_SIZE_MB", "1"),
    ]
    .iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();
    for (k, v) in vars {
        map.insert(k.to_string(), v.to_string());
    }
    Config::from_lookup(|name| map.get(name).cloned()).unwrap()
}

fn app_with(config: Config, parser: Arc<FakeParser>) -> Router {
    let mut objects = HashMap::new();
    objects.insert("/uploads/abc/resume.pdf".to_string(), b"%PDF-1.4 stored".to_vec());
    objects.insert("/uploads/abc/empty.pdf".to_string(), Vec::new());

    app_with_store(config, parser, Some(Arc::new(MemoryStore(objects))))
}

fn app_with_store(
    config: Config,
    parser: Arc<dyn ResumeParser>,
    objects: Option<Arc<dyn ObjectStore>>,
) -> Router {
    let documents = DocumentStore::new(config.sample_document_path.clone(), objects);
    create_router(AppState::new(config, parser, documents))
}

fn stored_request() -> Request<Body> {
    json_request(
        "/parser",
        json!({
            "uid": "uid",
            "key": "/uploads/abc/resume.pdf",
            "file_name": "resume.pdf",
            "file_ext": "pdf"
        }),
    )
}

fn binary_request(body: Vec<u8>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/parser/binary")
        .header("content-type", "application/pdf")
        .header("authorization", format!("Bearer {}", TOKEN))
        .body(Body::from(body))
        .unwrap()
}

fn app(parser: Arc<FakeParser>) -> Router {
    app_with(test_config(&[]), parser)
}

fn json_request(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .header("authorization", format!("Bearer {}", TOKEN))
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_health_skips_auth() {
    let response = app(FakeParser::new(Outcome::Fixture))
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["services"]["credentials_configured"], true);
    assert_eq!(body["services"]["document_storage"], true);
    assert_eq!(body["auth_enabled"], true);
}

#[tokio::test]
async fn test_ready_requires_credentials() {
    let config = test_config(&[("SOVREN_SERVICE_KEY", "")]);
    let response = app_with(config, FakeParser::new(Outcome::Fixture))
        .oneshot(Request::get("/ready").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

    let response = app(FakeParser::new(Outcome::Fixture))
        .oneshot(Request::get("/ready").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_parser_requires_bearer_token() {
    let parser = FakeParser::new(Outcome::Fixture);
    let request = Request::builder()
        .method("POST")
        .uri("/parser")
        .header("content-type", "application/json")
        .header("authorization", "Bearer wrong")
        .body(Body::from(json!({ "document": "JVBERg==" }).to_string()))
        .unwrap();

    let response = app(parser.clone()).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "UNAUTHORIZED");
    assert!(parser.received().is_empty());
}

#[tokio::test]
async fn test_auth_disabled_without_tokens() {
    let config = test_config(&[("AUTH_TOKEN", "")]);
    let request = Request::builder()
        .method("POST")
        .uri("/parser")
        .header("content-type", "application/json")
        .body(Body::from(
            json!({
                "file_name": "resume.pdf",
                "document": general_purpose::STANDARD.encode(b"%PDF-1.4 inline")
            })
            .to_string(),
        ))
        .unwrap();

    let response = app_with(config, FakeParser::new(Outcome::Fixture))
        .oneshot(request)
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_parse_inline_document() {
    let parser = FakeParser::new(Outcome::Fixture);
    let request = json_request(
        "/parser",
        json!({
            "uid": "uid",
            "file_name": "resume",
            "file_ext": "pdf",
            "document": general_purpose::STANDARD.encode(b"%PDF-1.4 inline")
        }),
    );

    let response = app(parser.clone()).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("x-request-id"));
    let body = body_json(response).await;
    assert_eq!(body["code"], 200);
    assert_eq!(body["json"]["contact"]["first_name"], "Jane");
    assert_eq!(body["json"]["contact"]["email"], "jane.doe@example.org");
    assert_eq!(body["json"]["employment"][0]["employer"], "Acme Corporation");
    assert_eq!(body["json"]["education"][0]["degree_type"], "bachelors");
    assert_eq!(parser.received(), vec!["resume.pdf".to_string()]);
}

#[tokio::test]
async fn test_parse_stored_document() {
    let parser = FakeParser::new(Outcome::Fixture);
    let request = json_request(
        "/parser",
        json!({
            "uid": "uid",
            "key": "/uploads/abc/resume.pdf",
            "file_name": "resume.pdf",
            "file_ext": "pdf"
        }),
    );

    let response = app(parser.clone()).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(parser.received(), vec!["resume.pdf".to_string()]);
}

#[tokio::test]
async fn test_parse_reports_missing_keys() {
    let parser = FakeParser::new(Outcome::Fixture);
    let request = json_request("/parser", json!({ "uid": "uid", "file_ext": "pdf" }));

    let response = app(parser.clone()).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "REQUIRED_KEYS_MISSING");
    assert!(body["error"]["message"].as_str().unwrap().contains("key, file_name"));
    assert!(parser.received().is_empty());
}

#[tokio::test]
async fn test_parse_missing_and_empty_stored_documents() {
    let parser = FakeParser::new(Outcome::Fixture);
    let missing = json_request(
        "/parser",
        json!({ "uid": "u", "key": "/uploads/nope.pdf", "file_name": "nope", "file_ext": "pdf" }),
    );
    let response = app(parser.clone()).oneshot(missing).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body_json(response).await["error"]["code"], "DOCUMENT_NOT_FOUND");

    let empty = json_request(
        "/parser",
        json!({ "uid": "u", "key": "/uploads/abc/empty.pdf", "file_name": "empty", "file_ext": "pdf" }),
    );
    let response = app(parser.clone()).oneshot(empty).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"]["code"], "INVALID_FILE");

    assert!(parser.received().is_empty());
}

#[tokio::test]
async fn test_binary_upload_rejects_unsupported_type() {
    let parser = FakeParser::new(Outcome::Fixture);
    let request = Request::builder()
        .method("POST")
        .uri("/parser/binary")
        .header("content-type", "image/png")
        .header("authorization", format!("Bearer {}", TOKEN))
        .body(Body::from(vec![0x89, b'P', b'N', b'G']))
        .unwrap();

    let response = app(parser.clone()).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body_json(response).await["error"]["code"], "UNSUPPORTED_FILE_TYPE");
    assert!(parser.received().is_empty());
}

#[tokio::test]
async fn test_binary_upload_enforces_size_limit() {
    let parser = FakeParser::new(Outcome::Fixture);
    let request = Request::builder()
        .method("POST")
        .uri("/parser/binary")
        .header("content-type", "application/pdf")
        .header("authorization", format!("Bearer {}", TOKEN))
        .body(Body::from(vec![b'a'; 1024 * 1024 + 1]))
        .unwrap();

    let response = app(parser.clone()).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(body_json(response).await["error"]["code"], "FILE_TOO_LARGE");
    assert!(parser.received().is_empty());
}

#[tokio::test]
async fn test_binary_upload_rejects_empty_body() {
    let parser = FakeParser::new(Outcome::Fixture);

    let response = app(parser.clone()).oneshot(binary_request(Vec::new())).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"]["code"], "INVALID_FILE");
    assert!(parser.received().is_empty());
}

#[tokio::test]
async fn test_binary_upload_far_over_limit_is_file_too_large() {
    let parser = FakeParser::new(Outcome::Fixture);
    let request = binary_request(vec![b'a'; 3 * 1024 * 1024]);

    let response = app(parser.clone()).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    let body = body_json(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "FILE_TOO_LARGE");
    assert!(parser.received().is_empty());
}

#[tokio::test]
async fn test_binary_upload_uses_file_name_header() {
    let parser = FakeParser::new(Outcome::Fixture);
    let request = Request::builder()
        .method("POST")
        .uri("/parser/binary")
        .header("content-type", "application/msword")
        .header("x-file-name", "cv.doc")
        .header("authorization", format!("Bearer {}", TOKEN))
        .body(Body::from(vec![0xD0, 0xCF, 0x11, 0xE0, 0x00]))
        .unwrap();

    let response = app(parser.clone()).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(parser.received(), vec!["cv.doc".to_string()]);
}

#[tokio::test]
async fn test_multipart_upload() {
    let parser = FakeParser::new(Outcome::Fixture);
    let boundary = "X-RESUME-BOUNDARY";
    let body = format!(
        "--{b}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"resume.pdf\"\r\n\
         Content-Type: application/pdf\r\n\r\n%PDF-1.4 multipart\r\n--{b}--\r\n",
        b = boundary
    );
    let request = Request::builder()
        .method("POST")
        .uri("/parser/upload")
        .header("content-type", format!("multipart/form-data; boundary={}", boundary))
        .header("authorization", format!("Bearer {}", TOKEN))
        .body(Body::from(body))
        .unwrap();

    let response = app(parser.clone()).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(parser.received(), vec!["resume.pdf".to_string()]);
}

#[tokio::test]
async fn test_multipart_without_file_field() {
    let boundary = "X-RESUME-BOUNDARY";
    let body = format!(
        "--{b}\r\nContent-Disposition: form-data; name=\"note\"\r\n\r\nhello\r\n--{b}--\r\n",
        b = boundary
    );
    let request = Request::builder()
        .method("POST")
        .uri("/parser/upload")
        .header("content-type", format!("multipart/form-data; boundary={}", boundary))
        .header("authorization", format!("Bearer {}", TOKEN))
        .body(Body::from(body))
        .unwrap();

    let response = app(FakeParser::new(Outcome::Fixture)).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"]["code"], "MISSING_FILE");
}

#[tokio::test]
async fn test_multipart_over_limit_is_file_too_large() {
    let boundary = "X-RESUME-BOUNDARY";
    let mut body = format!(
        "--{b}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"big.pdf\"\r\n\
         Content-Type: application/pdf\r\n\r\n",
        b = boundary
    )
    .into_bytes();
    body.extend(vec![b'a'; 2 * 1024 * 1024]);
    body.extend(format!("\r\n--{}--\r\n", boundary).into_bytes());

    let request = Request::builder()
        .method("POST")
        .uri("/parser/upload")
        .header("content-type", format!("multipart/form-data; boundary={}", boundary))
        .header("authorization", format!("Bearer {}", TOKEN))
        .body(Body::from(body))
        .unwrap();

    let response = app(FakeParser::new(Outcome::Fixture)).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(body_json(response).await["error"]["code"], "FILE_TOO_LARGE");
}

#[tokio::test]
async fn test_malformed_json_body_uses_error_envelope() {
    let request = Request::builder()
        .method("POST")
        .uri("/parser")
        .header("content-type", "application/json")
        .header("authorization", format!("Bearer {}", TOKEN))
        .body(Body::from("{not json"))
        .unwrap();

    let response = app(FakeParser::new(Outcome::Fixture)).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(body["data"], Value::Null);
}

#[tokio::test]
async fn test_error_body_carries_request_id_header() {
    let request = Request::builder()
        .method("POST")
        .uri("/parser")
        .header("content-type", "application/json")
        .header("authorization", "Bearer wrong")
        .header("x-request-id", "abc-123")
        .body(Body::from(json!({ "document": "JVBERg==" }).to_string()))
        .unwrap();

    let response = app(FakeParser::new(Outcome::Fixture)).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(response.headers()["x-request-id"], "abc-123");
    assert_eq!(body_json(response).await["error"]["request_id"], "abc-123");
}

#[tokio::test]
async fn test_error_body_matches_generated_request_id() {
    let request = json_request("/parser", json!({ "uid": "uid" }));

    let response = app(FakeParser::new(Outcome::Fixture)).oneshot(request).await.unwrap();

    let header = response.headers()["x-request-id"].to_str().unwrap().to_string();
    assert!(!header.is_empty());
    assert_eq!(body_json(response).await["error"]["request_id"], header);
}

#[tokio::test]
async fn test_storage_failure_is_unprocessable() {
    let parser = FakeParser::new(Outcome::Fixture);
    let app = app_with_store(test_config(&[]), parser.clone(), Some(Arc::new(FailingStore)));

    let response = app.oneshot(stored_request()).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body_json(response).await["error"]["code"], "STORAGE_ERROR");
    assert!(parser.received().is_empty());
}

#[tokio::test]
async fn test_stored_document_without_storage_is_unavailable() {
    let parser = FakeParser::new(Outcome::Fixture);
    let app = app_with_store(test_config(&[]), parser.clone(), None);

    let response = app.oneshot(stored_request()).await.unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body_json(response).await["error"]["code"], "SERVICE_UNAVAILABLE");
    assert!(parser.received().is_empty());
}

#[tokio::test]
async fn test_upstream_error_status_is_forwarded() {
    let request = json_request(
        "/parser",
        json!({ "file_name": "resume.pdf", "document": "JVBERi0xLjQ=" }),
    );

    let response = app(FakeParser::new(Outcome::UpstreamStatus(403)))
        .oneshot(request)
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(body_json(response).await["error"]["code"], "UPSTREAM_ERROR");
}

#[tokio::test]
async fn test_sample_document_route() {
    let mut file = tempfile::Builder::new().suffix(".doc").tempfile().unwrap();
    file.write_all(&[0xD0, 0xCF, 0x11, 0xE0, 0xA1]).unwrap();
    let path = file.path().to_str().unwrap().to_string();

    let parser = FakeParser::new(Outcome::Fixture);
    let config = test_config(&[("SAMPLE_DOCUMENT_PATH", path.as_str())]);
    let request = Request::get("/parser/sample")
        .header("authorization", format!("Bearer {}", TOKEN))
        .body(Body::empty())
        .unwrap();

    let response = app_with(config, parser.clone()).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["json"]["contact"]["last_name"], "Doe");
    assert_eq!(parser.received().len(), 1);
}

// Upstream client against an in-process stand-in for the parsing service.

async fn mock_parse(headers: HeaderMap, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    let header = |name: &str| headers.get(name).and_then(|v| v.to_str().ok()).unwrap_or("");

    if header("Sovren-AccountId") != "acct" || header("Sovren-ServiceKey") != "key" {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "Info": { "Code": "AuthenticationError" } })),
        );
    }
    if header("accept") != "application/json" {
        return (StatusCode::NOT_ACCEPTABLE, Json(json!({})));
    }

    let document = body["DocumentAsBase64String"]
        .as_str()
        .and_then(|s| general_purpose::STANDARD.decode(s).ok());
    let revision_ok = body["RevisionDate"]
        .as_str()
        .map(|d| chrono::NaiveDate::parse_from_str(d, "%Y-%m-%d").is_ok())
        .unwrap_or(false);

    if document.as_deref() != Some(b"%PDF-1.4 resume".as_slice()) || !revision_ok {
        return (StatusCode::BAD_REQUEST, Json(json!({ "Info": { "Code": "MissingParameter" } })));
    }

    (
        StatusCode::OK,
        Json(json!({
            "Info": { "Code": "Success", "Message": "Success" },
            "Value": { "ParsedDocument": FIXTURE }
        })),
    )
}

async fn garbage_parse() -> (StatusCode, &'static str) {
    (StatusCode::OK, "<html>maintenance</html>")
}

async fn slow_parse() -> StatusCode {
    tokio::time::sleep(Duration::from_secs(3)).await;
    StatusCode::OK
}

async fn spawn_upstream() -> String {
    let router = Router::new()
        .route("/v9/parser/resume", post(mock_parse))
        .route("/garbage", post(garbage_parse))
        .route("/slow", post(slow_parse));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

fn pdf_document() -> ResumeDocument {
    ResumeDocument::new("resume.pdf".into(), b"%PDF-1.4 resume".to_vec())
}

#[tokio::test]
async fn test_client_parses_upstream_response() {
    let base = spawn_upstream().await;
    let endpoint = format!("{}/v9/parser/resume", base);
    let config = test_config(&[("PARSER_ENDPOINT", endpoint.as_str())]);
    let client = SovrenClient::new(&config).unwrap();
    assert_eq!(client.endpoint(), endpoint);

    let parsed = client.parse(&pdf_document()).await.unwrap();
    let employers = parsed.resume.structured.employment_history.unwrap().employers;
    assert_eq!(employers.len(), 2);
    assert_eq!(employers[0].name.as_deref(), Some("Acme Corporation"));
}

#[tokio::test]
async fn test_client_surfaces_upstream_status() {
    let base = spawn_upstream().await;
    let endpoint = format!("{}/v9/parser/resume", base);
    let config = test_config(&[("PARSER_ENDPOINT", endpoint.as_str()), ("SOVREN_SERVICE_KEY", "wrong")]);
    let client = SovrenClient::new(&config).unwrap();

    match client.parse(&pdf_document()).await {
        Err(AppError::Upstream { status, message }) => {
            assert_eq!(status, 401);
            assert!(message.contains("AuthenticationError"));
        }
        other => panic!("Expected Upstream error, got {:?}", other.map(|_| ())),
    }
}

#[tokio::test]
async fn test_malformed_upstream_body_is_bad_gateway() {
    let base = spawn_upstream().await;
    let endpoint = format!("{}/garbage", base);
    let config = test_config(&[("PARSER_ENDPOINT", endpoint.as_str())]);
    let client = SovrenClient::new(&config).unwrap();
    let app = app_with_store(config, Arc::new(client), None);

    let request = json_request(
        "/parser",
        json!({
            "file_name": "resume.pdf",
            "document": general_purpose::STANDARD.encode(b"%PDF-1.4 resume")
        }),
    );
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    assert_eq!(body_json(response).await["error"]["code"], "MALFORMED_RESPONSE");
}

#[tokio::test]
async fn test_client_times_out() {
    let base = spawn_upstream().await;
    let endpoint = format!("{}/slow", base);
    let config = test_config(&[("PARSER_ENDPOINT", endpoint.as_str()), ("REQUEST_TIMEOUT_SECONDS", "1")]);
    let client = SovrenClient::new(&config).unwrap();

    assert!(matches!(
        client.parse(&pdf_document()).await,
        Err(AppError::UpstreamTimeout)
    ));
}

#[tokio::test]
async fn test_client_reports_unreachable_service() {
    // Bind then drop to get a port nothing listens on.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let endpoint = format!("http://{}/v9/parser/resume", listener.local_addr().unwrap());
    drop(listener);

    let config = test_config(&[("PARSER_ENDPOINT", endpoint.as_str())]);
    let client = SovrenClient::new(&config).unwrap();

    assert!(matches!(
        client.parse(&pdf_document()).await,
        Err(AppError::UpstreamUnavailable { .. })
    ));
}
