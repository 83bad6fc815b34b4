use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use crate::error::ClientError;

/// Number of ranked results to request. Only a handful of sizes are offered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct TopK(u32);

impl TopK {
    pub const ALLOWED: [u32; 3] = [5, 10, 15];

    pub fn new(value: u32) -> Result<Self, ClientError> {
        if Self::ALLOWED.contains(&value) {
            Ok(Self(value))
        } else {
            Err(ClientError::InvalidTopK(value))
        }
    }

    pub fn get(self) -> u32 {
        self.0
    }

    pub fn choices() -> impl Iterator<Item = TopK> {
        Self::ALLOWED.into_iter().map(TopK)
    }
}

impl Default for TopK {
    fn default() -> Self {
        Self(10)
    }
}

impl TryFrom<u32> for TopK {
    type Error = ClientError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TopK> for u32 {
    fn from(top_k: TopK) -> Self {
        top_k.0
    }
}

impl fmt::Display for TopK {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One candidate movie returned by the search endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub doc_id: String,
    pub movie_id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    pub year: Option<i32>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub genres: Vec<String>,
    pub rating: Option<f64>,
    pub vote_count: Option<u64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub overview: String,
    pub score: f64,
}

impl SearchResult {
    /// Similarity as a rounded whole percentage.
    pub fn score_percent(&self) -> i64 {
        // Halves round toward positive infinity, so -12.5 shows as -12.
        (self.score * 100.0 + 0.5).floor() as i64
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    pub query: String,
    pub top_k: u32,
    pub model_name: String,
    pub num_docs: u64,
    pub results: Vec<SearchResult>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Citation {
    #[serde(rename = "ref")]
    pub reference: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    pub movie_id: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QAResponse {
    pub question: String,
    pub query: String,
    pub top_k: u32,
    pub llm_model: String,
    pub answer: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub citations: Vec<Citation>,
    #[serde(default)]
    pub results_used: Vec<serde_json::Value>,
}

#[derive(Debug, Serialize)]
pub struct SearchRequest<'a> {
    pub query: &'a str,
    pub top_k: TopK,
    pub model_name: &'a str,
}

#[derive(Debug, Serialize)]
pub struct QARequest<'a> {
    pub question: &'a str,
    pub query: &'a str,
    pub top_k: TopK,
    pub model_name: &'a str,
    pub llm_model: &'a str,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
}

impl HealthStatus {
    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
