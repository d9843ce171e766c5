//! Club listing and detail.

use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::response::IntoResponse;
use fantera_core::catalog;
use fantera_core::db::clubs;
use fantera_core::models::{sort_by_price_desc, ClubPalette};
use serde_json::json;
use tracing::error;
use uuid::Uuid;

use crate::error::{api_success, ApiError};
use crate::routes::authenticate;
use crate::state::SharedState;

pub async fn list(
    State(state): State<SharedState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ApiError> {
    authenticate(&state, &headers).await?;

    let mut clubs = clubs::list_active_with_latest_price(&state.db)
        .await
        .map_err(|err| {
            error!(error = %err, "club listing query failed");
            ApiError::system("INTERNAL_ERROR", "Failed to fetch clubs")
        })?;
    sort_by_price_desc(&mut clubs);

    Ok(api_success(clubs))
}

pub async fn detail(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Path(club_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    authenticate(&state, &headers).await?;

    let club_not_found = || ApiError::not_found("NOT_FOUND", "Club not found");

    // An unparseable id cannot name a club; same outcome as a miss.
    let id = Uuid::parse_str(&club_id).map_err(|_| club_not_found())?;

    let club = clubs::find_active_with_latest_price(&state.db, id)
        .await
        .map_err(|err| {
            error!(error = %err, "club detail query failed");
            ApiError::system("INTERNAL_ERROR", "Failed to fetch club")
        })?
        .ok_or_else(club_not_found)?;

    let palette = ClubPalette::from_config(club.color_config.as_ref());
    let about = catalog::club_metadata(&club.ticker);

    Ok(api_success(json!({
        "id": club.id,
        "name": club.name,
        "ticker": club.ticker,
        "exchange": club.exchange,
        "crestUrl": club.crest_url,
        "colorConfig": palette,
        "price": club.price,
        "changePct": club.change_pct,
        "about": about,
    })))
}
