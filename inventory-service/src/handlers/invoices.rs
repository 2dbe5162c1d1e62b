use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use service_core::error::AppError;

use crate::dtos::{CreateInvoiceRequest, InvoiceResponse, UpdateInvoiceRequest};
use crate::middleware::Actor;
use crate::startup::AppState;

pub async fn list_invoices(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let invoices = state.invoicing.list_invoices()?;
    let invoices: Vec<InvoiceResponse> = invoices.into_iter().map(InvoiceResponse::from).collect();
    Ok(Json(invoices))
}

pub async fn create_invoice(
    State(state): State<AppState>,
    actor: Actor,
    Json(body): Json<CreateInvoiceRequest>,
) -> Result<impl IntoResponse, AppError> {
    let (mut input, apply_stock_change) = body.into_model()?;
    if input.created_by.is_empty() {
        input.created_by = actor.0.unwrap_or_default();
    }

    let created = state.invoicing.create_invoice(input, apply_stock_change)?;
    Ok((StatusCode::CREATED, Json(InvoiceResponse::from(created))))
}

pub async fn get_invoice(
    State(state): State<AppState>,
    Path(invoice_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let invoice = state.invoicing.get_invoice(&invoice_id)?;
    Ok(Json(InvoiceResponse::from(invoice)))
}

pub async fn update_invoice(
    State(state): State<AppState>,
    Path(invoice_id): Path<String>,
    Json(body): Json<UpdateInvoiceRequest>,
) -> Result<impl IntoResponse, AppError> {
    let updated = state
        .invoicing
        .update_invoice(&invoice_id, body.into_model()?)?;
    Ok(Json(InvoiceResponse::from(updated)))
}
