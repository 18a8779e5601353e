use crate::chat::Transcript;
use chrono::{DateTime, Utc};
use std::time::Instant;

/// Per-client conversational context: the latest prediction and the chat so far.
#[derive(Debug, Clone)]
pub struct Session {
    pub id: String,
    pub prediction: Option<String>,
    pub transcript: Transcript,
    pub created_at: DateTime<Utc>,
    pub(crate) last_seen: Instant,
}

impl Session {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            prediction: None,
            transcript: Transcript::new(),
            created_at: Utc::now(),
            last_seen: Instant::now(),
        }
    }
}
