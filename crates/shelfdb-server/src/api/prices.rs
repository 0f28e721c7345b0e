use axum::{
    extract::{Path, State},
    Json,
};

use shelfdb_core::{normalize_isbn, PriceQuote};
use shelfdb_db::BookPatch;

use super::{books::BookResponse, map_db_error, ApiError, AppState};

/// Price scrape without persistence.
pub(super) async fn get_prices(
    State(state): State<AppState>,
    Path(isbn): Path<String>,
) -> Result<Json<PriceQuote>, ApiError> {
    let quote = state
        .price_client()
        .fetch_price(&isbn)
        .await
        .ok_or_else(|| ApiError::not_found("could not fetch prices for the given ISBN"))?;
    Ok(Json(quote))
}

/// Re-scrapes the storefront and patches only the stored record's price
/// fields; everything else on the row is left untouched.
pub(super) async fn refresh_prices(
    State(state): State<AppState>,
    Path(isbn): Path<String>,
) -> Result<Json<BookResponse>, ApiError> {
    let isbn = normalize_isbn(&isbn);

    let row = shelfdb_db::get_book_by_isbn(&state.pool, &isbn)
        .await
        .map_err(|e| map_db_error(&e))?
        .ok_or_else(|| ApiError::not_found("book not found"))?;

    let quote = state
        .price_client()
        .fetch_price(&row.isbn)
        .await
        .ok_or_else(|| ApiError::not_found("could not fetch prices for the given ISBN"))?;

    let patch = BookPatch {
        market_price: Some(quote.market_price),
        list_price: Some(quote.list_price),
        ..BookPatch::default()
    };

    let updated = shelfdb_db::update_book(&state.pool, row.id, &patch)
        .await
        .map_err(|e| map_db_error(&e))?;
    Ok(Json(updated.into()))
}
