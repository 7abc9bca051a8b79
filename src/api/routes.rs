use axum::{
    routing::get,
    Router,
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use tower_http::cors::{CorsLayer, Any};
use tracing::info;

use crate::error::Result;
use crate::api::models::HealthStatus;
use crate::api::{openapi, response};
use crate::wikipedia::{fetch_article_content, truncate_chars, ArticleContent, NOT_FOUND_MESSAGE};
use crate::AppState;

const TEXT_PLAIN: &str = "text/plain; charset=utf-8";

pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/GetWikiText", get(get_wiki_text).post(get_wiki_text))
        .route("/health", get(health))
        .route("/openapi.json", get(openapi_document))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(app_state)
}

async fn get_wiki_text(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Response> {
    let title = title_from_params(&params);
    let article = fetch_article_content(&state.config.wikipedia_api_url, &title).await?;

    let response = match article {
        ArticleContent::NotFound => {
            info!("A Wiki article for {} was not found", title);
            (
                StatusCode::BAD_REQUEST,
                [(header::CONTENT_TYPE, TEXT_PLAIN)],
                NOT_FOUND_MESSAGE,
            )
                .into_response()
        }
        ArticleContent::Found(content) => {
            info!("A Wiki article for {} was found", title);
            let body = truncate_chars(&content, state.config.max_article_chars).to_string();
            (StatusCode::OK, [(header::CONTENT_TYPE, TEXT_PLAIN)], body).into_response()
        }
    };

    Ok(response)
}

/// Joins every `title` value with commas; a missing title is empty.
fn title_from_params(params: &[(String, String)]) -> String {
    params
        .iter()
        .filter(|(key, _)| key == "title")
        .map(|(_, value)| value.as_str())
        .collect::<Vec<_>>()
        .join(",")
}

async fn health() -> impl IntoResponse {
    response::success(HealthStatus {
        status: "healthy".to_string(),
        service: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

async fn openapi_document() -> Json<serde_json::Value> {
    Json(openapi::document())
}
