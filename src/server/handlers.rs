use super::{
    types::{
        ApiError, AppointmentsResponse, ChatRequest, ChatResponse, DoctorsResponse,
        LocationRequest, PredictResponse, SearchProbeResponse, SearchRequest,
    },
    upload,
};
use crate::{
    chat::ChatAssistant,
    classifier::Classifier,
    extract,
    llm::Role,
    search::{Geocoder, Location, SearchApi, SearchQuery},
    session::SessionStore,
};
use axum::{
    Json,
    extract::{Multipart, State, rejection::JsonRejection},
    http::HeaderMap,
    response::{Html, IntoResponse, Response},
};
use serde_json::{Value, json};
use std::{path::PathBuf, sync::Arc};
use tracing::{info, warn};
use uuid::Uuid;

pub const SESSION_HEADER: &str = "x-session-id";

const INDEX_PAGE: &str = include_str!("../../templates/index.html");
const UPLOAD_PAGE: &str = include_str!("../../templates/upload.html");

#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<SessionStore>,
    pub classifier: Arc<dyn Classifier>,
    pub assistant: Arc<ChatAssistant>,
    pub search: Arc<dyn SearchApi>,
    pub geocoder: Option<Arc<dyn Geocoder>>,
    pub upload_dir: PathBuf,
    pub num_results: u32,
    pub places_results: u32,
}

/// Session named by the request header, or a fresh UUID when absent.
fn session_id(headers: &HeaderMap) -> String {
    headers
        .get(SESSION_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| Uuid::new_v4().to_string())
}

fn with_session(session_id: &str, body: impl IntoResponse) -> Response {
    ([(SESSION_HEADER, session_id.to_string())], body).into_response()
}

fn required(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

pub async fn index() -> Html<&'static str> {
    Html(INDEX_PAGE)
}

pub async fn upload_page() -> Html<&'static str> {
    Html(UPLOAD_PAGE)
}

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Upload form target: multipart field `file`.
pub async fn image_upload(
    State(state): State<AppState>,
    headers: HeaderMap,
    multipart: Multipart,
) -> Result<Response, ApiError> {
    classify_upload(state, headers, multipart, "file", "No file part").await
}

/// API variant: multipart field `image`.
pub async fn predict(
    State(state): State<AppState>,
    headers: HeaderMap,
    multipart: Multipart,
) -> Result<Response, ApiError> {
    classify_upload(state, headers, multipart, "image", "No image provided").await
}

async fn classify_upload(
    state: AppState,
    headers: HeaderMap,
    mut multipart: Multipart,
    field: &str,
    missing_message: &str,
) -> Result<Response, ApiError> {
    let session_id = session_id(&headers);

    let upload = upload::read_field(&mut multipart, field)
        .await?
        .ok_or_else(|| ApiError::bad_request(missing_message))?;

    if upload.file_name.is_empty() {
        return Err(ApiError::bad_request("No file selected"));
    }
    if !upload::is_allowed_image(&upload.file_name) {
        return Err(ApiError::bad_request("Invalid file type"));
    }

    let path = upload::store(&state.upload_dir, &upload).await?;
    info!(
        "Classifying {} for session {}",
        path.display(),
        session_id
    );

    let prediction = state.classifier.classify_path(&path).await;
    upload::discard(&path).await;
    let prediction = prediction?;
    state
        .sessions
        .set_prediction(&session_id, &prediction.label)
        .await;

    Ok(with_session(
        &session_id,
        Json(PredictResponse {
            predicted_class: prediction.label,
            session_id: session_id.clone(),
        }),
    ))
}

/// Starts a new conversation about the session's latest prediction.
pub async fn start_chat(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    let session_id = session_id(&headers);
    let mut session = state.sessions.load(&session_id).await;

    let prediction = session.prediction.clone().ok_or_else(|| {
        ApiError::bad_request("No prediction for this session; upload an image first")
    })?;

    let response = state
        .assistant
        .start_diagnosis(&mut session.transcript, &prediction)
        .await?;

    let chat_history = session.transcript.clone();
    state.sessions.save(session).await;

    Ok(with_session(
        &session_id,
        Json(ChatResponse {
            response,
            chat_history,
            session_id: session_id.clone(),
        }),
    ))
}

pub async fn continue_chat(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let session_id = session_id(&headers);
    let Json(request) = payload?;
    let message =
        required(request.message).ok_or_else(|| ApiError::bad_request("Message is required"))?;

    let mut session = state.sessions.load(&session_id).await;
    session.transcript.push(Role::User, message);

    let response = state.assistant.reply(&mut session.transcript).await?;

    let chat_history = session.transcript.clone();
    state.sessions.save(session).await;

    Ok(with_session(
        &session_id,
        Json(ChatResponse {
            response,
            chat_history,
            session_id: session_id.clone(),
        }),
    ))
}

fn search_terms(request: SearchRequest) -> Result<(String, String), ApiError> {
    match (required(request.location), required(request.disease)) {
        (Some(location), Some(disease)) => Ok((location, disease)),
        _ => Err(ApiError::bad_request("Location and disease are required")),
    }
}

pub async fn find_doctors(
    State(state): State<AppState>,
    payload: Result<Json<SearchRequest>, JsonRejection>,
) -> Result<Json<DoctorsResponse>, ApiError> {
    let Json(request) = payload?;
    let (location, disease) = search_terms(request)?;
    info!("Searching doctors for {} in {}", disease, location);

    let query = SearchQuery::new(extract::doctors_query(&disease, &location), state.num_results);
    let results = state.search.search(&query).await?;
    let doctors = extract::doctor_listings(&results);

    info!("Found {} doctors", doctors.len());
    Ok(Json(DoctorsResponse { doctors }))
}

pub async fn find_appointments(
    State(state): State<AppState>,
    payload: Result<Json<SearchRequest>, JsonRejection>,
) -> Result<Json<AppointmentsResponse>, ApiError> {
    let Json(request) = payload?;
    let (location, disease) = search_terms(request)?;
    info!("Searching appointments for {} in {}", disease, location);

    let directory = SearchQuery::new(
        extract::directory_query(&disease, &location),
        state.num_results,
    );
    let directory_results = state.search.search(&directory).await?;
    let mut appointments = extract::directory_appointments(&directory_results, &location);

    let places = SearchQuery::places(
        extract::places_query(&disease, &location),
        state.places_results,
    );
    let places_results = state.search.search(&places).await?;
    appointments.extend(extract::clinic_appointments(&places_results, &location));

    info!("Found {} valid appointments", appointments.len());
    Ok(Json(AppointmentsResponse { appointments }))
}

pub async fn get_location(
    State(state): State<AppState>,
    payload: Result<Json<LocationRequest>, JsonRejection>,
) -> Result<Json<Location>, ApiError> {
    let Json(request) = payload?;
    let (Some(latitude), Some(longitude)) = (request.latitude, request.longitude) else {
        return Err(ApiError::bad_request("Latitude and longitude are required"));
    };
    if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
        return Err(ApiError::bad_request("Latitude or longitude out of range"));
    }

    let geocoder = state
        .geocoder
        .as_ref()
        .ok_or_else(|| ApiError::internal("Geocoding service not configured"))?;

    Ok(Json(geocoder.reverse(latitude, longitude).await?))
}

/// Diagnostic ping of the search API. Always answers 200.
pub async fn test_search(State(state): State<AppState>) -> Json<SearchProbeResponse> {
    let api_key_present = state.search.has_api_key();
    let query = SearchQuery::new("doctors in New York", 1);

    match state.search.search_raw(&query).await {
        Ok(response) => Json(SearchProbeResponse {
            status: "success",
            api_key_present,
            response: Some(response),
            error: None,
        }),
        Err(e) => {
            warn!("Search API probe failed: {}", e);
            Json(SearchProbeResponse {
                status: "error",
                api_key_present,
                response: None,
                error: Some(e.to_string()),
            })
        }
    }
}
