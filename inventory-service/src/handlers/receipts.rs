use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use service_core::error::AppError;

use crate::dtos::{ReceiptResponse, ReceiveStockRequest, ReceiveStockResponse};
use crate::middleware::Actor;
use crate::startup::AppState;

pub async fn list_receipts(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let receipts = state.inventory.list_receipts()?;
    let receipts: Vec<ReceiptResponse> = receipts.into_iter().map(ReceiptResponse::from).collect();
    Ok(Json(receipts))
}

pub async fn receive_stock(
    State(state): State<AppState>,
    actor: Actor,
    Json(body): Json<ReceiveStockRequest>,
) -> Result<impl IntoResponse, AppError> {
    let item_id = body.item_id()?.to_string();
    let quantity = body.quantity()?;
    let actor_label = body.received_by.clone().or(actor.0);

    let (item, receipt) = state
        .inventory
        .receive_stock(&item_id, quantity, actor_label)?;

    Ok((
        StatusCode::CREATED,
        Json(ReceiveStockResponse {
            updated_item: item.into(),
            receipt: receipt.into(),
        }),
    ))
}
