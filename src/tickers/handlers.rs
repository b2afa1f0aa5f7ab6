use axum::{
    extract::State,
    routing::get,
    Json, Router,
};
use time::OffsetDateTime;
use tracing::{info, instrument};

use crate::{
    auth::AuthUser,
    error::ApiError,
    extract::JsonBody,
    state::AppState,
    store::TickerList,
    tickers::dto::{UpdateTickersRequest, UpdateTickersResponse},
};

pub fn ticker_routes() -> Router<AppState> {
    Router::new().route("/tickers", get(get_tickers).put(update_tickers))
}

#[instrument(skip_all, fields(user_id = %user.user_id))]
pub async fn get_tickers(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<TickerList>, ApiError> {
    let list = state
        .store
        .load_tickers(&user.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User tickers not found".into()))?;
    Ok(Json(list))
}

#[instrument(skip_all, fields(user_id = %user.user_id))]
pub async fn update_tickers(
    State(state): State<AppState>,
    user: AuthUser,
    JsonBody(payload): JsonBody<UpdateTickersRequest>,
) -> Result<Json<UpdateTickersResponse>, ApiError> {
    let tickers = parse_tickers(payload.tickers)?;

    let now = OffsetDateTime::now_utc();
    let mut list = state
        .store
        .load_tickers(&user.user_id)
        .await?
        .unwrap_or_else(|| TickerList::empty(&user.user_id, &user.username, now));

    // Wholesale replacement, no merge.
    list.tickers = tickers;
    list.last_updated = now;
    state.store.save_tickers(&list).await?;

    info!(count = list.tickers.len(), "tickers updated");
    Ok(Json(UpdateTickersResponse {
        message: "Tickers updated successfully".into(),
        tickers: list.tickers,
    }))
}

fn parse_tickers(value: serde_json::Value) -> Result<Vec<String>, ApiError> {
    let items = value
        .as_array()
        .ok_or_else(|| ApiError::Validation("Tickers must be an array".into()))?;
    items
        .iter()
        .map(|v| {
            v.as_str()
                .map(|s| s.to_string())
                .ok_or_else(|| ApiError::Validation("Tickers must be an array".into()))
        })
        .collect()
}
