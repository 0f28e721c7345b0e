//! Database operations for the `books` table.

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;

use crate::DbError;

const BOOK_COLUMNS: &str = "id, isbn, title, author, publisher, page_count, size, \
     purchase_date, purchase_price, condition, summary, market_price, list_price, \
     created_at, updated_at";

/// A row from the `books` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct BookRow {
    pub id: i64,
    /// NFKC-normalized; unique.
    pub isbn: String,
    pub title: String,
    pub author: Option<String>,
    pub publisher: Option<String>,
    pub page_count: Option<i32>,
    pub size: Option<String>,
    pub purchase_date: Option<NaiveDate>,
    pub purchase_price: Option<i32>,
    pub condition: Option<String>,
    pub summary: Option<String>,
    /// Whole yen, from the storefront scrape.
    pub market_price: Option<i64>,
    pub list_price: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields for inserting a new book. The caller normalizes the ISBN before
/// constructing this.
#[derive(Debug, Clone)]
pub struct NewBook {
    pub isbn: String,
    pub title: String,
    pub author: Option<String>,
    pub publisher: Option<String>,
    pub page_count: Option<i32>,
    pub size: Option<String>,
    pub purchase_date: Option<NaiveDate>,
    pub purchase_price: Option<i32>,
    pub condition: Option<String>,
    pub summary: Option<String>,
    pub market_price: Option<i64>,
    pub list_price: Option<i64>,
}

/// Partial update of a book. `None` means "leave the stored value unchanged";
/// a field cannot be nulled out through a patch. The ISBN is the unique key
/// and is not patchable.
#[derive(Debug, Clone, Default)]
pub struct BookPatch {
    pub title: Option<String>,
    pub author: Option<String>,
    pub publisher: Option<String>,
    pub page_count: Option<i32>,
    pub size: Option<String>,
    pub purchase_date: Option<NaiveDate>,
    pub purchase_price: Option<i32>,
    pub condition: Option<String>,
    pub summary: Option<String>,
    pub market_price: Option<i64>,
    pub list_price: Option<i64>,
}

impl BookPatch {
    /// Applies the carried fields onto `row`, leaving omitted fields as-is.
    pub fn apply_to(&self, row: &mut BookRow) {
        if let Some(title) = &self.title {
            row.title = title.clone();
        }
        if let Some(author) = &self.author {
            row.author = Some(author.clone());
        }
        if let Some(publisher) = &self.publisher {
            row.publisher = Some(publisher.clone());
        }
        if let Some(page_count) = self.page_count {
            row.page_count = Some(page_count);
        }
        if let Some(size) = &self.size {
            row.size = Some(size.clone());
        }
        if let Some(purchase_date) = self.purchase_date {
            row.purchase_date = Some(purchase_date);
        }
        if let Some(purchase_price) = self.purchase_price {
            row.purchase_price = Some(purchase_price);
        }
        if let Some(condition) = &self.condition {
            row.condition = Some(condition.clone());
        }
        if let Some(summary) = &self.summary {
            row.summary = Some(summary.clone());
        }
        if let Some(market_price) = self.market_price {
            row.market_price = Some(market_price);
        }
        if let Some(list_price) = self.list_price {
            row.list_price = Some(list_price);
        }
    }
}

/// Lists books ordered by id.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_books(pool: &PgPool, offset: i64, limit: i64) -> Result<Vec<BookRow>, DbError> {
    let rows = sqlx::query_as::<_, BookRow>(&format!(
        "SELECT {BOOK_COLUMNS} FROM books ORDER BY id OFFSET $1 LIMIT $2"
    ))
    .bind(offset)
    .bind(limit)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Fetches one book by id.
///
/// # Errors
///
/// Returns [`DbError::NotFound`] when no such row exists.
pub async fn get_book(pool: &PgPool, id: i64) -> Result<BookRow, DbError> {
    sqlx::query_as::<_, BookRow>(&format!("SELECT {BOOK_COLUMNS} FROM books WHERE id = $1"))
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or(DbError::NotFound)
}

/// Fetches one book by its normalized ISBN.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn get_book_by_isbn(pool: &PgPool, isbn: &str) -> Result<Option<BookRow>, DbError> {
    let row =
        sqlx::query_as::<_, BookRow>(&format!("SELECT {BOOK_COLUMNS} FROM books WHERE isbn = $1"))
            .bind(isbn)
            .fetch_optional(pool)
            .await?;
    Ok(row)
}

/// Inserts a new book and returns the stored row.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the insert fails (including unique-ISBN
/// violations; the server layer pre-checks those to return a clean conflict).
pub async fn insert_book(pool: &PgPool, book: &NewBook) -> Result<BookRow, DbError> {
    let row = sqlx::query_as::<_, BookRow>(&format!(
        "INSERT INTO books \
             (isbn, title, author, publisher, page_count, size, \
              purchase_date, purchase_price, condition, summary, \
              market_price, list_price) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12) \
         RETURNING {BOOK_COLUMNS}"
    ))
    .bind(&book.isbn)
    .bind(&book.title)
    .bind(&book.author)
    .bind(&book.publisher)
    .bind(book.page_count)
    .bind(&book.size)
    .bind(book.purchase_date)
    .bind(book.purchase_price)
    .bind(&book.condition)
    .bind(&book.summary)
    .bind(book.market_price)
    .bind(book.list_price)
    .fetch_one(pool)
    .await?;
    Ok(row)
}

/// Applies `patch` to the stored row (read-modify-write) and returns the
/// updated row. Fields the patch does not carry are left untouched.
///
/// # Errors
///
/// Returns [`DbError::NotFound`] when no such row exists.
pub async fn update_book(pool: &PgPool, id: i64, patch: &BookPatch) -> Result<BookRow, DbError> {
    let mut row = get_book(pool, id).await?;
    patch.apply_to(&mut row);

    let updated = sqlx::query_as::<_, BookRow>(&format!(
        "UPDATE books SET \
             title = $2, author = $3, publisher = $4, page_count = $5, size = $6, \
             purchase_date = $7, purchase_price = $8, condition = $9, summary = $10, \
             market_price = $11, list_price = $12, updated_at = NOW() \
         WHERE id = $1 \
         RETURNING {BOOK_COLUMNS}"
    ))
    .bind(row.id)
    .bind(&row.title)
    .bind(&row.author)
    .bind(&row.publisher)
    .bind(row.page_count)
    .bind(&row.size)
    .bind(row.purchase_date)
    .bind(row.purchase_price)
    .bind(&row.condition)
    .bind(&row.summary)
    .bind(row.market_price)
    .bind(row.list_price)
    .fetch_one(pool)
    .await?;
    Ok(updated)
}

/// Deletes a book by id.
///
/// # Errors
///
/// Returns [`DbError::NotFound`] when no such row exists.
pub async fn delete_book(pool: &PgPool, id: i64) -> Result<(), DbError> {
    let result = sqlx::query("DELETE FROM books WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(DbError::NotFound);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn sample_row() -> BookRow {
        BookRow {
            id: 1,
            isbn: "9784053049032".to_owned(),
            title: "T".to_owned(),
            author: Some("A".to_owned()),
            publisher: Some("P".to_owned()),
            page_count: Some(200),
            size: Some("X".to_owned()),
            purchase_date: None,
            purchase_price: Some(400),
            condition: Some("good".to_owned()),
            summary: None,
            market_price: Some(550),
            list_price: Some(1320),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn price_only_patch_leaves_every_other_field_unchanged() {
        let mut row = sample_row();
        let patch = BookPatch {
            market_price: Some(500),
            ..BookPatch::default()
        };

        patch.apply_to(&mut row);

        assert_eq!(row.market_price, Some(500));
        assert_eq!(row.title, "T");
        assert_eq!(row.author.as_deref(), Some("A"));
        assert_eq!(row.publisher.as_deref(), Some("P"));
        assert_eq!(row.page_count, Some(200));
        assert_eq!(row.purchase_price, Some(400));
        assert_eq!(row.condition.as_deref(), Some("good"));
        assert_eq!(row.list_price, Some(1320));
    }

    #[test]
    fn empty_patch_changes_nothing() {
        let mut row = sample_row();
        BookPatch::default().apply_to(&mut row);

        assert_eq!(row.title, "T");
        assert_eq!(row.market_price, Some(550));
        assert_eq!(row.list_price, Some(1320));
    }

    #[test]
    fn patch_fills_previously_absent_fields() {
        let mut row = sample_row();
        row.summary = None;
        let patch = BookPatch {
            summary: Some("a fine book".to_owned()),
            ..BookPatch::default()
        };

        patch.apply_to(&mut row);
        assert_eq!(row.summary.as_deref(), Some("a fine book"));
    }

    #[test]
    fn patch_never_nulls_out_a_field() {
        let mut row = sample_row();
        let patch = BookPatch {
            title: Some("T2".to_owned()),
            ..BookPatch::default()
        };

        patch.apply_to(&mut row);

        assert_eq!(row.title, "T2");
        // Omitted optional fields keep their stored values.
        assert_eq!(row.author.as_deref(), Some("A"));
    }
}
