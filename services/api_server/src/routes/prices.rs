//! Latest prices across all clubs.

use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::IntoResponse;
use fantera_core::db::prices;
use tracing::error;

use crate::error::{api_success, ApiError};
use crate::routes::authenticate;
use crate::state::SharedState;

pub async fn list(
    State(state): State<SharedState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ApiError> {
    authenticate(&state, &headers).await?;

    let rows = prices::list_latest(&state.db).await.map_err(|err| {
        error!(error = %err, "price listing query failed");
        ApiError::system("INTERNAL_ERROR", "Failed to fetch prices")
    })?;

    Ok(api_success(prices::dedupe_latest(rows)))
}
