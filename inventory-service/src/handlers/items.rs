use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

use service_core::error::AppError;

use crate::dtos::{
    AdjustStockRequest, AdjustStockResponse, CreateItemRequest, ItemResponse, ItemSearchParams,
    UpdateItemRequest,
};
use crate::middleware::Actor;
use crate::startup::AppState;

pub async fn list_items(
    State(state): State<AppState>,
    Query(params): Query<ItemSearchParams>,
) -> Result<impl IntoResponse, AppError> {
    let items = state.inventory.list_items(params.search.as_deref())?;
    let items: Vec<ItemResponse> = items.into_iter().map(ItemResponse::from).collect();
    Ok(Json(items))
}

pub async fn create_item(
    State(state): State<AppState>,
    Json(body): Json<CreateItemRequest>,
) -> Result<impl IntoResponse, AppError> {
    let item = state.inventory.create_item(body.into_model()?)?;
    Ok((StatusCode::CREATED, Json(ItemResponse::from(item))))
}

pub async fn get_item(
    State(state): State<AppState>,
    Path(item_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let item = state.inventory.get_item(&item_id)?;
    Ok(Json(ItemResponse::from(item)))
}

pub async fn update_item(
    State(state): State<AppState>,
    Path(item_id): Path<String>,
    Json(body): Json<UpdateItemRequest>,
) -> Result<impl IntoResponse, AppError> {
    let item = state.inventory.update_item(&item_id, body.into_model()?)?;
    Ok(Json(ItemResponse::from(item)))
}

pub async fn delete_item(
    State(state): State<AppState>,
    Path(item_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.inventory.delete_item(&item_id)?;
    Ok(Json(json!({ "status": "ok" })))
}

pub async fn adjust_stock(
    State(state): State<AppState>,
    Path(item_id): Path<String>,
    actor: Actor,
    Json(body): Json<AdjustStockRequest>,
) -> Result<impl IntoResponse, AppError> {
    let delta = body.delta()?;
    let actor_label = body.changed_by.or(actor.0);

    let (item, receipt) = state.inventory.adjust_stock(&item_id, delta, actor_label)?;

    Ok(Json(AdjustStockResponse {
        item: ItemResponse::from(item),
        receipt: receipt.map(Into::into),
    }))
}
