use axum::extract::Query;
use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::BookData;
use crate::book::models::ListBooksQuery;
use crate::inbound::http::router::AppState;

pub async fn list_books(
    State(state): State<AppState>,
    Query(params): Query<ListBooksParams>,
) -> Result<Json<ListBooksResponse>, ApiError> {
    let query = ListBooksQuery::parse(
        params.search,
        params.category,
        params.order,
        params.page,
        params.limit,
    )?;

    let page = state.book_service.list(query).await?;

    Ok(Json(ListBooksResponse {
        current_page: page.current_page,
        total_pages: page.total_pages,
        total_data: page.total_data,
        data: page.books.iter().map(BookData::from).collect(),
    }))
}

/// Raw query-string values; validation happens in [`ListBooksQuery::parse`].
#[derive(Debug, Clone, Deserialize)]
pub struct ListBooksParams {
    search: Option<String>,
    category: Option<String>,
    order: Option<String>,
    page: Option<String>,
    limit: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListBooksResponse {
    pub current_page: i64,
    pub total_pages: i64,
    pub total_data: i64,
    pub data: Vec<BookData>,
}
