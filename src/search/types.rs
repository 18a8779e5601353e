use serde::{Deserialize, Serialize};

/// Request body for the search API.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchQuery {
    pub q: String,
    pub num: u32,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

impl SearchQuery {
    pub fn new(q: impl Into<String>, num: u32) -> Self {
        Self {
            q: q.into(),
            num,
            kind: None,
        }
    }

    pub fn places(q: impl Into<String>, num: u32) -> Self {
        Self {
            kind: Some("places".to_string()),
            ..Self::new(q, num)
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub organic: Vec<OrganicResult>,
    #[serde(default)]
    pub places: Vec<PlaceResult>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrganicResult {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub snippet: String,
    #[serde(default)]
    pub position: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceResult {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub rating_count: Option<u64>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
}

/// City and country resolved from coordinates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Location {
    pub city: Option<String>,
    pub country: Option<String>,
}
