use axum::{
    extract::{Path, Query, State},
    Json,
};
use tracing::{debug, instrument};

use health_bot_domain::knowledge::TopicInfo;

use crate::api::state::AppState;
use crate::entities::knowledge::{
    CategoriesResponse, SearchHit, SearchQuery, SearchResponse, TopicResponse,
};
use crate::entities::ErrorResponse;

fn convert_to_public_topic(info: TopicInfo) -> TopicResponse {
    TopicResponse {
        recommendation: info.recommendation.to_string(),
        benefits: info.benefits.to_string(),
    }
}

/// Recommendation for one category and topic
#[utoipa::path(
    get,
    path = "/api/knowledge/{category}/{topic}",
    params(
        ("category" = String, Path, description = "Category, e.g. diet"),
        ("topic" = String, Path, description = "Topic, e.g. water")
    ),
    responses(
        (status = 200, description = "Topic found", body = TopicResponse),
        (status = 404, description = "Unknown category or topic", body = ErrorResponse),
    ),
    tag = "knowledge"
)]
#[instrument(skip(state))]
pub async fn get_topic(
    State(state): State<AppState>,
    Path((category, topic)): Path<(String, String)>,
) -> Result<Json<TopicResponse>, ErrorResponse> {
    state
        .knowledge
        .get_info(&category, &topic)
        .map(|info| Json(convert_to_public_topic(info)))
        .ok_or_else(|| ErrorResponse::not_found("knowledge topic"))
}

/// Search categories, topics and recommendations
#[utoipa::path(
    get,
    path = "/api/knowledge/search",
    params(SearchQuery),
    responses(
        (status = 200, description = "Matching topics in table order", body = SearchResponse),
        (status = 400, description = "Missing query", body = ErrorResponse),
    ),
    tag = "knowledge"
)]
#[instrument(skip(state))]
pub async fn search(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<SearchResponse>, ErrorResponse> {
    let q = query
        .q
        .ok_or_else(|| ErrorResponse::bad_request("Query parameter 'q' is required"))?;

    let results: Vec<SearchHit> = state
        .knowledge
        .search(&q)
        .into_iter()
        .map(|hit| SearchHit {
            category: hit.category.to_string(),
            topic: hit.topic.to_string(),
            info: convert_to_public_topic(hit.info),
        })
        .collect();
    debug!("Knowledge search '{}' matched {} topics", q, results.len());

    Ok(Json(SearchResponse { query: q, results }))
}

/// Categories with their topics
#[utoipa::path(
    get,
    path = "/api/knowledge",
    responses(
        (status = 200, description = "All categories", body = CategoriesResponse),
    ),
    tag = "knowledge"
)]
pub async fn list_categories(State(state): State<AppState>) -> Json<CategoriesResponse> {
    let categories = state
        .knowledge
        .categories()
        .into_iter()
        .map(|(category, topics)| {
            (
                category.to_string(),
                topics.into_iter().map(str::to_string).collect(),
            )
        })
        .collect();

    Json(CategoriesResponse { categories })
}
