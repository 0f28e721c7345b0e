use axum::{
    extract::{Path, State},
    Json,
};

use shelfdb_core::BookInfo;

use super::{ApiError, AppState};

/// Bibliographic lookup without persistence: openBD first, NDL fallback.
pub(super) async fn lookup_book(
    State(state): State<AppState>,
    Path(isbn): Path<String>,
) -> Result<Json<BookInfo>, ApiError> {
    let info = state
        .lookup_client()
        .lookup(&isbn)
        .await
        .ok_or_else(|| ApiError::not_found("book not found in any external source"))?;
    Ok(Json(info))
}
