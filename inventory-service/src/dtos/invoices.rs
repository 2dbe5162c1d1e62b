//! Invoice request/response shapes.

use bson::oid::ObjectId;
use chrono::{DateTime, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use service_core::error::AppError;

use crate::dtos::{coerce_decimal, coerce_decimal_lenient, coerce_int_lenient, coerce_opt_decimal};
use crate::models::{CreateInvoice, Invoice, InvoiceLine, InvoiceTotals, UpdateInvoice};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceLineInput {
    pub item_id: Option<String>,
    pub name: Option<String>,
    pub sku: Option<String>,
    pub price: Option<Value>,
    pub quantity: Option<Value>,
}

impl InvoiceLineInput {
    /// Normalize a line: a reference that does not parse is stored as absent
    /// rather than failing the invoice, and malformed price/quantity default
    /// to zero. Quantities floor at zero, prices at zero.
    fn normalize(self) -> InvoiceLine {
        let item_id = self
            .item_id
            .as_deref()
            .and_then(|raw| ObjectId::parse_str(raw).ok());

        InvoiceLine {
            item_id,
            name: self.name.unwrap_or_default(),
            sku: self.sku.unwrap_or_default(),
            price: coerce_decimal_lenient(self.price.as_ref()).max(Decimal::ZERO),
            quantity: coerce_int_lenient(self.quantity.as_ref()).max(0),
        }
    }
}

/// Resolve the caller-supplied timestamp: RFC 3339 first (a trailing `Z` is
/// the common case), then a bare ISO datetime; anything else falls back to
/// the current time. Stored as a naive instant.
fn parse_printed_at(raw: Option<&str>) -> NaiveDateTime {
    match raw {
        Some(s) => DateTime::parse_from_rfc3339(s)
            .map(|dt| dt.naive_utc())
            .or_else(|_| s.parse::<NaiveDateTime>())
            .unwrap_or_else(|_| Utc::now().naive_utc()),
        None => Utc::now().naive_utc(),
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateInvoiceRequest {
    pub number: Option<String>,
    pub printed_at: Option<String>,
    pub customer_name: Option<String>,
    pub customer_phone: Option<String>,
    pub tax_rate: Option<Value>,
    pub discount_rate: Option<Value>,
    pub lines: Option<Vec<InvoiceLineInput>>,
    pub apply_stock_change: Option<bool>,
    pub created_by: Option<String>,
}

impl CreateInvoiceRequest {
    /// Split into the invoice input and the stock-application flag. Presence
    /// of `number` and at least one line is checked by the service.
    pub fn into_model(self) -> Result<(CreateInvoice, bool), AppError> {
        let apply_stock_change = self.apply_stock_change.unwrap_or(false);
        let printed_at = parse_printed_at(self.printed_at.as_deref());

        let input = CreateInvoice {
            number: self.number.unwrap_or_default(),
            printed_at,
            customer_name: self.customer_name.unwrap_or_default(),
            customer_phone: self.customer_phone.unwrap_or_default(),
            tax_rate: coerce_decimal("taxRate", self.tax_rate.as_ref())?,
            discount_rate: coerce_decimal("discountRate", self.discount_rate.as_ref())?,
            lines: self
                .lines
                .unwrap_or_default()
                .into_iter()
                .map(InvoiceLineInput::normalize)
                .collect(),
            created_by: self.created_by.unwrap_or_default(),
        };

        Ok((input, apply_stock_change))
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateInvoiceRequest {
    pub customer_name: Option<String>,
    pub customer_phone: Option<String>,
    pub tax_rate: Option<Value>,
    pub discount_rate: Option<Value>,
    pub lines: Option<Vec<InvoiceLineInput>>,
}

impl UpdateInvoiceRequest {
    pub fn into_model(self) -> Result<UpdateInvoice, AppError> {
        Ok(UpdateInvoice {
            customer_name: self.customer_name,
            customer_phone: self.customer_phone,
            tax_rate: coerce_opt_decimal("taxRate", self.tax_rate.as_ref())?,
            discount_rate: coerce_opt_decimal("discountRate", self.discount_rate.as_ref())?,
            lines: self
                .lines
                .map(|lines| lines.into_iter().map(InvoiceLineInput::normalize).collect()),
        })
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceLineResponse {
    pub item_id: Option<String>,
    pub name: String,
    pub sku: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub quantity: i64,
    /// Whether the line's item reference resolved when it was recorded.
    pub resolved: bool,
}

impl From<&InvoiceLine> for InvoiceLineResponse {
    fn from(line: &InvoiceLine) -> Self {
        Self {
            item_id: line.item_id.map(|id| id.to_hex()),
            name: line.name.clone(),
            sku: line.sku.clone(),
            price: line.price,
            quantity: line.quantity,
            resolved: line.item_id.is_some(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceTotalsResponse {
    #[serde(with = "rust_decimal::serde::float")]
    pub subtotal: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub discount_rate: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub discount_amount: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub tax_rate: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub tax_amount: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
}

impl From<InvoiceTotals> for InvoiceTotalsResponse {
    fn from(totals: InvoiceTotals) -> Self {
        Self {
            subtotal: totals.subtotal,
            discount_rate: totals.discount_rate,
            discount_amount: totals.discount_amount,
            tax_rate: totals.tax_rate,
            tax_amount: totals.tax_amount,
            total: totals.total,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceResponse {
    pub id: String,
    pub number: String,
    pub printed_at: NaiveDateTime,
    pub customer_name: String,
    pub customer_phone: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub tax_rate: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub discount_rate: Decimal,
    pub created_by: String,
    pub lines: Vec<InvoiceLineResponse>,
    pub totals: InvoiceTotalsResponse,
}

impl From<(Invoice, InvoiceTotals)> for InvoiceResponse {
    fn from((invoice, totals): (Invoice, InvoiceTotals)) -> Self {
        Self {
            id: invoice.id.to_hex(),
            number: invoice.number,
            printed_at: invoice.printed_at,
            customer_name: invoice.customer_name,
            customer_phone: invoice.customer_phone,
            tax_rate: invoice.tax_rate,
            discount_rate: invoice.discount_rate,
            created_by: invoice.created_by,
            lines: invoice.lines.iter().map(InvoiceLineResponse::from).collect(),
            totals: InvoiceTotalsResponse::from(totals),
        }
    }
}
