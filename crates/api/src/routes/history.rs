//! Session history queries.

use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use sentinel_core::limits::DEFAULT_PAGE_SIZE;
use sentinel_core::HistoryRecord;
use serde::{Deserialize, Serialize};

use crate::response::ApiError;
use crate::state::AppState;

// Parameters land as raw strings so a non-numeric value becomes our own 400
// body instead of axum's plain-text query rejection.
#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub page: Option<String>,
    #[serde(rename = "pageSize")]
    pub page_size: Option<String>,
}

fn parse_param(name: &str, raw: Option<&str>) -> Result<Option<i64>, ApiError> {
    raw.map(|value| {
        value
            .parse::<i64>()
            .map_err(|_| ApiError::bad_request(format!("{name} must be an integer, got {value:?}")))
    })
    .transpose()
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HistoryPage {
    pub records: Vec<HistoryRecord>,
    pub total: i64,
    pub page: i64,
    #[serde(rename = "pageSize")]
    pub page_size: i64,
}

/// GET /api/history - Closed sessions, most recent first.
///
/// With no pagination parameters at all the response is the legacy bare
/// array. Any parameter opts into the paginated envelope; the missing one
/// takes its default.
pub async fn history_handler(
    State(state): State<AppState>,
    Query(query): Query<HistoryQuery>,
) -> Result<Response, ApiError> {
    if query.page.is_none() && query.page_size.is_none() {
        let records = state.store.query_all()?;
        return Ok(Json(records).into_response());
    }

    let page = parse_param("page", query.page.as_deref())?.unwrap_or(1);
    let page_size =
        parse_param("pageSize", query.page_size.as_deref())?.unwrap_or(DEFAULT_PAGE_SIZE);
    let (records, total) = state.store.query(page, page_size)?;

    Ok(Json(HistoryPage {
        records,
        total,
        page,
        page_size: page_size.min(sentinel_core::limits::MAX_PAGE_SIZE),
    })
    .into_response())
}
