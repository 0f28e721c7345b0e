mod books;
mod lookup;
mod prices;

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, Method, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::Serialize;
use sqlx::PgPool;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use shelfdb_core::AppConfig;
use shelfdb_lookup::LookupClient;
use shelfdb_scraper::PriceClient;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub(super) fn lookup_client(&self) -> LookupClient {
        LookupClient::new(
            &self.config.openbd_base_url,
            &self.config.ndl_base_url,
            self.config.http_timeout_secs,
        )
    }

    pub(super) fn price_client(&self) -> PriceClient {
        PriceClient::new(
            &self.config.bookoff_base_url,
            &self.config.scraper_user_agent,
            self.config.http_timeout_secs,
        )
    }
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new("not_found", message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new("conflict", message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new("internal_error", message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match self.code.as_str() {
            "not_found" => StatusCode::NOT_FOUND,
            "bad_request" | "validation_error" => StatusCode::BAD_REQUEST,
            "conflict" => StatusCode::CONFLICT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(self)).into_response()
    }
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
    database: &'static str,
}

pub(super) fn normalize_limit(limit: Option<i64>) -> i64 {
    limit.unwrap_or(100).clamp(1, 200)
}

pub(super) fn map_db_error(error: &shelfdb_db::DbError) -> ApiError {
    match error {
        shelfdb_db::DbError::NotFound => ApiError::not_found("book not found"),
        other => {
            tracing::error!(error = %other, "database query failed");
            ApiError::internal("database query failed")
        }
    }
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
        ])
        .allow_headers([header::CONTENT_TYPE])
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route(
            "/api/books",
            get(books::list_books).post(books::create_book),
        )
        .route(
            "/api/books/{id}",
            get(books::get_book)
                .put(books::update_book)
                .delete(books::delete_book),
        )
        .route("/api/lookup/{isbn}", get(lookup::lookup_book))
        .route("/api/prices/{isbn}", get(prices::get_prices))
        .route("/api/prices/{isbn}/refresh", axum::routing::post(prices::refresh_prices))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(build_cors()),
        )
        .with_state(state)
}

async fn health(State(state): State<AppState>) -> impl IntoResponse {
    match shelfdb_db::health_check(&state.pool).await {
        Ok(()) => (
            StatusCode::OK,
            Json(HealthData {
                status: "ok",
                database: "ok",
            }),
        ),
        Err(e) => {
            tracing::warn!(error = %e, "health check: database unavailable");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthData {
                    status: "degraded",
                    database: "unavailable",
                }),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_limit_defaults_to_100() {
        assert_eq!(normalize_limit(None), 100);
    }

    #[test]
    fn normalize_limit_clamps_extremes() {
        assert_eq!(normalize_limit(Some(0)), 1);
        assert_eq!(normalize_limit(Some(-5)), 1);
        assert_eq!(normalize_limit(Some(10_000)), 200);
    }

    #[test]
    fn db_not_found_maps_to_not_found_code() {
        let err = map_db_error(&shelfdb_db::DbError::NotFound);
        assert_eq!(err.code, "not_found");
    }
}
