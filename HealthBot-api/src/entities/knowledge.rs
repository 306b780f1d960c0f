use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Recommendation for one topic
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TopicResponse {
    pub recommendation: String,
    pub benefits: String,
}

/// Knowledge base search parameters
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct SearchQuery {
    /// Case-insensitive text to look for
    pub q: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SearchHit {
    pub category: String,
    pub topic: String,
    pub info: TopicResponse,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SearchResponse {
    pub query: String,
    pub results: Vec<SearchHit>,
}

/// Categories and their topics, in table order
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CategoriesResponse {
    #[schema(value_type = Object)]
    pub categories: IndexMap<String, Vec<String>>,
}
