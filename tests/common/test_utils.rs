use super::mocks::{MockClassifier, MockGeocoder, MockLlmClient, MockSearchApi};
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, Response},
};
use neuroscan::{
    chat::ChatAssistant,
    config::{Config, LlmConfig},
    search::{Geocoder, Location},
    server::{self, handlers::AppState},
    session::SessionStore,
};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

pub const BOUNDARY: &str = "neuroscan-test-boundary";

/// Router wired to mocks, with handles kept for assertions
pub struct TestApp {
    pub router: Router,
    pub llm: Arc<MockLlmClient>,
    pub classifier: Arc<MockClassifier>,
    pub search: Arc<MockSearchApi>,
    pub sessions: Arc<SessionStore>,
    pub upload_dir: TempDir,
}

pub struct TestAppBuilder {
    llm: MockLlmClient,
    classifier: MockClassifier,
    search: MockSearchApi,
    geocoder: Option<MockGeocoder>,
}

impl TestAppBuilder {
    pub fn new() -> Self {
        Self {
            llm: MockLlmClient::new(),
            classifier: MockClassifier::new("Mild_Demented"),
            search: MockSearchApi::new(),
            geocoder: None,
        }
    }

    pub fn llm(mut self, llm: MockLlmClient) -> Self {
        self.llm = llm;
        self
    }

    pub fn classifier(mut self, classifier: MockClassifier) -> Self {
        self.classifier = classifier;
        self
    }

    pub fn search(mut self, search: MockSearchApi) -> Self {
        self.search = search;
        self
    }

    pub fn geocoder(mut self, location: Option<Location>) -> Self {
        self.geocoder = Some(MockGeocoder { location });
        self
    }

    pub fn build(self) -> TestApp {
        let upload_dir = create_temp_dir();
        let llm = Arc::new(self.llm);
        let classifier = Arc::new(self.classifier);
        let search = Arc::new(self.search);
        let sessions = Arc::new(SessionStore::new(Duration::from_secs(3600)));

        let state = AppState {
            sessions: sessions.clone(),
            classifier: classifier.clone(),
            assistant: Arc::new(ChatAssistant::new(llm.clone(), &LlmConfig::default())),
            search: search.clone(),
            geocoder: self
                .geocoder
                .map(|geocoder| Arc::new(geocoder) as Arc<dyn Geocoder>),
            upload_dir: upload_dir.path().to_path_buf(),
            num_results: 10,
            places_results: 5,
        };

        let router = server::router(state, &Config::default().server.cors_origins);

        TestApp {
            router,
            llm,
            classifier,
            search,
            sessions,
            upload_dir,
        }
    }
}

impl Default for TestAppBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Create a temporary directory for test files
pub fn create_temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp directory")
}

pub fn json_request(method: &str, uri: &str, body: &Value, session: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(session) = session {
        builder = builder.header("x-session-id", session);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub fn get_request(uri: &str, session: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(session) = session {
        builder = builder.header("x-session-id", session);
    }
    builder.body(Body::empty()).unwrap()
}

/// Single-part multipart/form-data body
pub fn multipart_body(field: &str, file_name: &str, bytes: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"{field}\"; filename=\"{file_name}\"\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
    body
}

pub fn multipart_request(
    uri: &str,
    field: &str,
    file_name: &str,
    bytes: &[u8],
    session: Option<&str>,
) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        );
    if let Some(session) = session {
        builder = builder.header("x-session-id", session);
    }
    builder
        .body(Body::from(multipart_body(field, file_name, bytes)))
        .unwrap()
}

pub async fn read_json(response: Response<Body>) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn read_text(response: Response<Body>) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Generate unique session ID for tests
pub fn generate_test_session_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
