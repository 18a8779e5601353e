use async_trait::async_trait;
use neuroscan::{
    Error, Result,
    classifier::{Classifier, Prediction},
    llm::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage, Choice, LlmClient},
    search::{Geocoder, Location, SearchApi, SearchQuery},
};
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Mock LLM client for testing
#[derive(Debug)]
pub struct MockLlmClient {
    pub responses: Arc<Mutex<Vec<ChatCompletionResponse>>>,
    pub requests: Arc<Mutex<Vec<ChatCompletionRequest>>>,
    pub error: Option<String>,
}

impl MockLlmClient {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(Vec::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
            error: None,
        }
    }

    pub fn with_responses(self, responses: Vec<ChatCompletionResponse>) -> Self {
        *self.responses.lock().unwrap() = responses;
        self
    }

    pub fn with_error(mut self, error: &str) -> Self {
        self.error = Some(error.to_string());
        self
    }

    pub fn get_requests(&self) -> Vec<ChatCompletionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmClient for MockLlmClient {
    async fn create_chat_completion(
        &self,
        request: ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse> {
        self.requests.lock().unwrap().push(request);

        if let Some(ref error) = self.error {
            return Err(Error::llm(error.clone()));
        }

        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            return Err(Error::llm("No more mock responses available"));
        }

        Ok(responses.remove(0))
    }
}

impl Default for MockLlmClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Mock classifier that returns a fixed label and records image sizes
#[derive(Debug)]
pub struct MockClassifier {
    pub label: String,
    pub calls: Arc<Mutex<Vec<usize>>>,
    pub error: Option<String>,
}

impl MockClassifier {
    pub fn new(label: &str) -> Self {
        Self {
            label: label.to_string(),
            calls: Arc::new(Mutex::new(Vec::new())),
            error: None,
        }
    }

    pub fn with_error(mut self, error: &str) -> Self {
        self.error = Some(error.to_string());
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl Classifier for MockClassifier {
    async fn classify(&self, image: &[u8]) -> Result<Prediction> {
        self.calls.lock().unwrap().push(image.len());

        if let Some(ref error) = self.error {
            return Err(Error::classifier(error.clone()));
        }

        Ok(Prediction {
            label: self.label.clone(),
            score: 0.9,
        })
    }
}

/// Mock search API that replays canned JSON bodies in order
#[derive(Debug)]
pub struct MockSearchApi {
    pub responses: Arc<Mutex<VecDeque<Value>>>,
    pub queries: Arc<Mutex<Vec<SearchQuery>>>,
    pub error: Option<String>,
    pub api_key_present: bool,
}

impl MockSearchApi {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(VecDeque::new())),
            queries: Arc::new(Mutex::new(Vec::new())),
            error: None,
            api_key_present: true,
        }
    }

    pub fn with_responses(self, responses: Vec<Value>) -> Self {
        *self.responses.lock().unwrap() = responses.into();
        self
    }

    pub fn with_error(mut self, error: &str) -> Self {
        self.error = Some(error.to_string());
        self
    }

    pub fn get_queries(&self) -> Vec<SearchQuery> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl SearchApi for MockSearchApi {
    async fn search_raw(&self, query: &SearchQuery) -> Result<Value> {
        self.queries.lock().unwrap().push(query.clone());

        if let Some(ref error) = self.error {
            return Err(Error::search(error.clone()));
        }

        Ok(self
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| serde_json::json!({})))
    }

    fn has_api_key(&self) -> bool {
        self.api_key_present
    }
}

impl Default for MockSearchApi {
    fn default() -> Self {
        Self::new()
    }
}

/// Mock geocoder; `None` behaves like an empty result set
#[derive(Debug)]
pub struct MockGeocoder {
    pub location: Option<Location>,
}

#[async_trait]
impl Geocoder for MockGeocoder {
    async fn reverse(&self, _latitude: f64, _longitude: f64) -> Result<Location> {
        self.location
            .clone()
            .ok_or_else(|| Error::not_found("Location not found"))
    }
}

// Helper functions for creating test data

pub fn create_mock_chat_response(content: &str) -> ChatCompletionResponse {
    ChatCompletionResponse {
        id: "test-id".to_string(),
        model: "test-model".to_string(),
        choices: vec![Choice {
            index: 0,
            message: ChatMessage::assistant(content),
            finish_reason: Some("stop".to_string()),
        }],
        usage: None,
    }
}

pub fn create_empty_chat_response() -> ChatCompletionResponse {
    ChatCompletionResponse {
        id: "test-id".to_string(),
        model: "test-model".to_string(),
        choices: vec![],
        usage: None,
    }
}
