use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use shelfdb_core::normalize_isbn;
use shelfdb_db::{BookPatch, BookRow, NewBook};

use super::{map_db_error, normalize_limit, ApiError, AppState};

#[derive(Debug, Serialize)]
pub(super) struct BookResponse {
    id: i64,
    isbn: String,
    title: String,
    author: Option<String>,
    publisher: Option<String>,
    page_count: Option<i32>,
    size: Option<String>,
    purchase_date: Option<NaiveDate>,
    purchase_price: Option<i32>,
    condition: Option<String>,
    summary: Option<String>,
    market_price: Option<i64>,
    list_price: Option<i64>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<BookRow> for BookResponse {
    fn from(row: BookRow) -> Self {
        Self {
            id: row.id,
            isbn: row.isbn,
            title: row.title,
            author: row.author,
            publisher: row.publisher,
            page_count: row.page_count,
            size: row.size,
            purchase_date: row.purchase_date,
            purchase_price: row.purchase_price,
            condition: row.condition,
            summary: row.summary,
            market_price: row.market_price,
            list_price: row.list_price,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct ListQuery {
    offset: Option<i64>,
    limit: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub(super) struct CreateBookRequest {
    isbn: String,
    title: String,
    #[serde(default)]
    author: Option<String>,
    #[serde(default)]
    publisher: Option<String>,
    #[serde(default)]
    page_count: Option<i32>,
    #[serde(default)]
    size: Option<String>,
    #[serde(default)]
    purchase_date: Option<NaiveDate>,
    #[serde(default)]
    purchase_price: Option<i32>,
    #[serde(default)]
    condition: Option<String>,
    #[serde(default)]
    summary: Option<String>,
    #[serde(default)]
    market_price: Option<i64>,
    #[serde(default)]
    list_price: Option<i64>,
}

/// Partial update; omitted fields are left untouched. The ISBN is the unique
/// key and is not updatable.
#[derive(Debug, Default, Deserialize)]
pub(super) struct UpdateBookRequest {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    author: Option<String>,
    #[serde(default)]
    publisher: Option<String>,
    #[serde(default)]
    page_count: Option<i32>,
    #[serde(default)]
    size: Option<String>,
    #[serde(default)]
    purchase_date: Option<NaiveDate>,
    #[serde(default)]
    purchase_price: Option<i32>,
    #[serde(default)]
    condition: Option<String>,
    #[serde(default)]
    summary: Option<String>,
    #[serde(default)]
    market_price: Option<i64>,
    #[serde(default)]
    list_price: Option<i64>,
}

impl From<UpdateBookRequest> for BookPatch {
    fn from(req: UpdateBookRequest) -> Self {
        Self {
            title: req.title,
            author: req.author,
            publisher: req.publisher,
            page_count: req.page_count,
            size: req.size,
            purchase_date: req.purchase_date,
            purchase_price: req.purchase_price,
            condition: req.condition,
            summary: req.summary,
            market_price: req.market_price,
            list_price: req.list_price,
        }
    }
}

pub(super) async fn list_books(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<BookResponse>>, ApiError> {
    let offset = query.offset.unwrap_or(0).max(0);
    let rows = shelfdb_db::list_books(&state.pool, offset, normalize_limit(query.limit))
        .await
        .map_err(|e| map_db_error(&e))?;
    Ok(Json(rows.into_iter().map(BookResponse::from).collect()))
}

pub(super) async fn get_book(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<BookResponse>, ApiError> {
    let row = shelfdb_db::get_book(&state.pool, id)
        .await
        .map_err(|e| map_db_error(&e))?;
    Ok(Json(row.into()))
}

pub(super) async fn create_book(
    State(state): State<AppState>,
    Json(req): Json<CreateBookRequest>,
) -> Result<(StatusCode, Json<BookResponse>), ApiError> {
    let isbn = normalize_isbn(&req.isbn);

    let existing = shelfdb_db::get_book_by_isbn(&state.pool, &isbn)
        .await
        .map_err(|e| map_db_error(&e))?;
    if existing.is_some() {
        return Err(ApiError::conflict("ISBN already registered"));
    }

    // Best-effort price enrichment at registration time; a successful scrape
    // overrides any price values sent in the request.
    let mut market_price = req.market_price;
    let mut list_price = req.list_price;
    if let Some(quote) = state.price_client().fetch_price(&isbn).await {
        market_price = Some(quote.market_price);
        list_price = Some(quote.list_price);
    }

    let new_book = NewBook {
        isbn,
        title: req.title,
        author: req.author,
        publisher: req.publisher,
        page_count: req.page_count,
        size: req.size,
        purchase_date: req.purchase_date,
        purchase_price: req.purchase_price,
        condition: req.condition,
        summary: req.summary,
        market_price,
        list_price,
    };

    let row = shelfdb_db::insert_book(&state.pool, &new_book)
        .await
        .map_err(|e| map_db_error(&e))?;
    Ok((StatusCode::CREATED, Json(row.into())))
}

pub(super) async fn update_book(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateBookRequest>,
) -> Result<Json<BookResponse>, ApiError> {
    let patch = BookPatch::from(req);
    let row = shelfdb_db::update_book(&state.pool, id, &patch)
        .await
        .map_err(|e| map_db_error(&e))?;
    Ok(Json(row.into()))
}

pub(super) async fn delete_book(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    shelfdb_db::delete_book(&state.pool, id)
        .await
        .map_err(|e| map_db_error(&e))?;
    Ok(StatusCode::NO_CONTENT)
}
