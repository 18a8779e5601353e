pub mod handlers;
pub mod types;
mod upload;

use crate::{
    Result,
    chat::ChatAssistant,
    classifier::HostedClassifier,
    config::Config,
    llm::OpenAiClient,
    search::{Geocoder, OpenCageClient, SerperClient},
    session::SessionStore,
};
use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::{HeaderName, HeaderValue, Method, header},
    routing::{get, post},
};
use handlers::{AppState, SESSION_HEADER};
use std::{net::SocketAddr, path::PathBuf, sync::Arc, time::Duration};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};

const MAX_UPLOAD_BYTES: usize = 16 * 1024 * 1024;

impl AppState {
    /// Builds every long-lived client once for the lifetime of the process.
    pub async fn from_config(config: &Config) -> Result<Self> {
        let upload_dir = PathBuf::from(&config.server.upload_dir);
        tokio::fs::create_dir_all(&upload_dir).await?;

        let llm_client = Arc::new(OpenAiClient::new(config.llm.clone()));
        let assistant = ChatAssistant::new(llm_client, &config.llm);

        let geocoder = OpenCageClient::from_config(config.geocoding.clone())
            .map(|client| Arc::new(client) as Arc<dyn Geocoder>);
        if geocoder.is_none() {
            info!("Geocoder disabled; /get-location will answer 500");
        }

        Ok(Self {
            sessions: Arc::new(SessionStore::new(Duration::from_secs(
                config.server.session_ttl_secs,
            ))),
            classifier: Arc::new(HostedClassifier::new(config.classifier.clone())),
            assistant: Arc::new(assistant),
            search: Arc::new(SerperClient::new(config.search.clone())),
            geocoder,
            upload_dir,
            num_results: config.search.num_results,
            places_results: config.search.places_results,
        })
    }
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    let session_header = HeaderName::from_static(SESSION_HEADER);
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, session_header.clone()])
        .expose_headers([session_header])
}

pub fn router(state: AppState, cors_origins: &[String]) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/health", get(handlers::health))
        .route(
            "/image",
            get(handlers::upload_page).post(handlers::image_upload),
        )
        .route("/predict", post(handlers::predict))
        .route(
            "/chat",
            get(handlers::start_chat).post(handlers::continue_chat),
        )
        .route("/find-doctors", post(handlers::find_doctors))
        .route("/find-appointments", post(handlers::find_appointments))
        .route("/get-location", post(handlers::get_location))
        .route("/test-serper", get(handlers::test_search))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(cors_origins))
        .with_state(state)
}

pub async fn run(config: Config) -> Result<()> {
    let app_state = AppState::from_config(&config).await?;
    let app = router(app_state, &config.server.cors_origins);

    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);

    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
