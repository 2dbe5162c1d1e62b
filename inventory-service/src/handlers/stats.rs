use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;

use service_core::error::AppError;

use crate::dtos::StatsResponse;
use crate::services::compute_stats;
use crate::startup::AppState;

pub async fn get_stats(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let items = state.inventory.list_items(None)?;
    let stats = compute_stats(&items);
    Ok(Json(StatsResponse::from(stats)))
}
