//! Invoice engine.

use bson::oid::ObjectId;
use metrics::counter;
use tracing::{info, instrument};

use service_core::error::AppError;

use crate::models::{CreateInvoice, Invoice, InvoiceTotals, UpdateInvoice};
use crate::services::inventory::InventoryService;
use crate::services::parse_object_id;
use crate::services::store::Store;

/// Builds and edits invoices and drives the stock ledger when a sale should
/// deduct inventory. Totals are recomputed on every read.
#[derive(Clone)]
pub struct InvoicingService {
    store: Store,
    inventory: InventoryService,
}

impl InvoicingService {
    pub fn new(store: Store, inventory: InventoryService) -> Self {
        Self { store, inventory }
    }

    /// Persist a new invoice. With `apply_stock_change`, each resolved line
    /// deducts its quantity from stock first (floor at zero, no receipt);
    /// unresolved lines are skipped. Deductions already applied are not
    /// rolled back if a later step fails.
    #[instrument(skip(self, input), fields(number = %input.number))]
    pub fn create_invoice(
        &self,
        input: CreateInvoice,
        apply_stock_change: bool,
    ) -> Result<(Invoice, InvoiceTotals), AppError> {
        if input.number.trim().is_empty() || input.lines.is_empty() {
            return Err(AppError::BadRequest(anyhow::anyhow!(
                "number and lines are required"
            )));
        }

        let invoice = Invoice {
            id: ObjectId::new(),
            number: input.number,
            printed_at: input.printed_at,
            customer_name: input.customer_name,
            customer_phone: input.customer_phone,
            tax_rate: input.tax_rate,
            discount_rate: input.discount_rate,
            lines: input.lines,
            created_by: input.created_by,
        };

        if apply_stock_change {
            for line in &invoice.lines {
                if let Some(item_id) = &line.item_id {
                    self.inventory.deduct_for_sale(item_id, line.quantity)?;
                }
            }
        }

        self.store.invoices().insert_one(&invoice)?;
        counter!("invoices_created_total").increment(1);
        info!(
            invoice_id = %invoice.id,
            lines = invoice.lines.len(),
            apply_stock_change,
            "Invoice created"
        );

        let totals = invoice.totals();
        Ok((invoice, totals))
    }

    pub fn get_invoice(&self, id: &str) -> Result<(Invoice, InvoiceTotals), AppError> {
        let oid = parse_object_id(id, "invoice")?;
        let invoice = self
            .store
            .invoices()
            .find_one(&oid)?
            .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Invoice not found")))?;
        let totals = invoice.totals();
        Ok((invoice, totals))
    }

    /// Invoices newest first by printed timestamp.
    pub fn list_invoices(&self) -> Result<Vec<(Invoice, InvoiceTotals)>, AppError> {
        let mut invoices = self.store.invoices().find_all()?;
        invoices.sort_by(|a, b| b.printed_at.cmp(&a.printed_at));
        Ok(invoices
            .into_iter()
            .map(|invoice| {
                let totals = invoice.totals();
                (invoice, totals)
            })
            .collect())
    }

    /// Edits correct the record: customer info, rates, and lines may change,
    /// but stock is never touched. An update is not a new sales event.
    #[instrument(skip(self, update))]
    pub fn update_invoice(
        &self,
        id: &str,
        update: UpdateInvoice,
    ) -> Result<(Invoice, InvoiceTotals), AppError> {
        let oid = parse_object_id(id, "invoice")?;
        if update.is_empty() {
            return Err(AppError::BadRequest(anyhow::anyhow!("Nothing to update")));
        }

        let updated = self.store.invoices().update_one(&oid, |invoice| {
            if let Some(customer_name) = update.customer_name {
                invoice.customer_name = customer_name;
            }
            if let Some(customer_phone) = update.customer_phone {
                invoice.customer_phone = customer_phone;
            }
            if let Some(tax_rate) = update.tax_rate {
                invoice.tax_rate = tax_rate;
            }
            if let Some(discount_rate) = update.discount_rate {
                invoice.discount_rate = discount_rate;
            }
            if let Some(lines) = update.lines {
                invoice.lines = lines;
            }
        })?;

        let invoice =
            updated.ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Invoice not found")))?;
        info!(invoice_id = %invoice.id, "Invoice updated");

        let totals = invoice.totals();
        Ok((invoice, totals))
    }
}
