//! Invoice model and the totals engine.

use bson::oid::ObjectId;
use chrono::NaiveDateTime;
use rust_decimal::Decimal;

/// One line of a sale. The item reference is optional and non-owning: a
/// reference that never resolved (bad scan, free-form entry) is stored as
/// absent, and the name/SKU snapshot keeps the line readable either way.
#[derive(Debug, Clone, PartialEq)]
pub struct InvoiceLine {
    pub item_id: Option<ObjectId>,
    pub name: String,
    pub sku: String,
    pub price: Decimal,
    pub quantity: i64,
}

/// A sale record. `printed_at` is a naive instant (no offset) so invoices
/// sort consistently regardless of how the caller supplied the timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct Invoice {
    pub id: ObjectId,
    pub number: String,
    pub printed_at: NaiveDateTime,
    pub customer_name: String,
    pub customer_phone: String,
    pub tax_rate: Decimal,
    pub discount_rate: Decimal,
    pub lines: Vec<InvoiceLine>,
    pub created_by: String,
}

/// Derived financial summary. Never persisted: recomputing on every read
/// means the totals cannot go stale when rates or lines are edited.
#[derive(Debug, Clone, PartialEq)]
pub struct InvoiceTotals {
    pub subtotal: Decimal,
    pub discount_rate: Decimal,
    pub discount_amount: Decimal,
    pub tax_rate: Decimal,
    pub tax_amount: Decimal,
    pub total: Decimal,
}

impl Invoice {
    /// Totals are a pure function of the stored fields: discount applies to
    /// the subtotal, tax applies to the discounted amount, and every
    /// monetary output is rounded to two decimal places.
    pub fn totals(&self) -> InvoiceTotals {
        let subtotal: Decimal = self
            .lines
            .iter()
            .map(|line| line.price * Decimal::from(line.quantity))
            .sum();

        let discount_amount = subtotal * self.discount_rate / Decimal::ONE_HUNDRED;
        let after_discount = (subtotal - discount_amount).max(Decimal::ZERO);
        let tax_amount = after_discount * self.tax_rate / Decimal::ONE_HUNDRED;
        let total = after_discount + tax_amount;

        InvoiceTotals {
            subtotal: subtotal.round_dp(2),
            discount_rate: self.discount_rate,
            discount_amount: discount_amount.round_dp(2),
            tax_rate: self.tax_rate,
            tax_amount: tax_amount.round_dp(2),
            total: total.round_dp(2),
        }
    }
}

/// Input for creating an invoice. The request layer has already normalized
/// the lines and resolved `printed_at`; the service assigns the id.
#[derive(Debug, Clone)]
pub struct CreateInvoice {
    pub number: String,
    pub printed_at: NaiveDateTime,
    pub customer_name: String,
    pub customer_phone: String,
    pub tax_rate: Decimal,
    pub discount_rate: Decimal,
    pub lines: Vec<InvoiceLine>,
    pub created_by: String,
}

/// Partial update: only `Some` fields are applied. Replacing lines edits the
/// record only; stock is never touched by an update.
#[derive(Debug, Clone, Default)]
pub struct UpdateInvoice {
    pub customer_name: Option<String>,
    pub customer_phone: Option<String>,
    pub tax_rate: Option<Decimal>,
    pub discount_rate: Option<Decimal>,
    pub lines: Option<Vec<InvoiceLine>>,
}

impl UpdateInvoice {
    pub fn is_empty(&self) -> bool {
        self.customer_name.is_none()
            && self.customer_phone.is_none()
            && self.tax_rate.is_none()
            && self.discount_rate.is_none()
            && self.lines.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn invoice_with(lines: Vec<InvoiceLine>, discount_rate: i64, tax_rate: i64) -> Invoice {
        Invoice {
            id: ObjectId::new(),
            number: "INV-1".to_string(),
            printed_at: NaiveDate::from_ymd_opt(2025, 1, 1)
                .and_then(|d| d.and_hms_opt(12, 0, 0))
                .expect("valid timestamp"),
            customer_name: String::new(),
            customer_phone: String::new(),
            tax_rate: Decimal::from(tax_rate),
            discount_rate: Decimal::from(discount_rate),
            lines,
            created_by: String::new(),
        }
    }

    fn line(price: &str, quantity: i64) -> InvoiceLine {
        InvoiceLine {
            item_id: None,
            name: String::new(),
            sku: String::new(),
            price: price.parse().expect("valid decimal"),
            quantity,
        }
    }

    #[test]
    fn totals_apply_discount_then_tax() {
        let invoice = invoice_with(vec![line("30", 2), line("40", 1)], 10, 8);
        let totals = invoice.totals();

        assert_eq!(totals.subtotal, Decimal::from(100));
        assert_eq!(totals.discount_amount, "10.00".parse::<Decimal>().unwrap());
        assert_eq!(totals.tax_amount, "7.20".parse::<Decimal>().unwrap());
        assert_eq!(totals.total, "97.20".parse::<Decimal>().unwrap());
    }

    #[test]
    fn totals_zero_subtotal_is_zero_regardless_of_rates() {
        let invoice = invoice_with(vec![line("0", 5)], 25, 18);
        let totals = invoice.totals();

        assert_eq!(totals.subtotal, Decimal::ZERO);
        assert_eq!(totals.discount_amount, Decimal::ZERO);
        assert_eq!(totals.tax_amount, Decimal::ZERO);
        assert_eq!(totals.total, Decimal::ZERO);
    }

    #[test]
    fn totals_round_to_two_decimal_places() {
        // 5.49 * 3 = 16.47; 5% discount = 0.8235 -> 0.82
        let invoice = invoice_with(vec![line("5.49", 3)], 5, 0);
        let totals = invoice.totals();

        assert_eq!(totals.subtotal, "16.47".parse::<Decimal>().unwrap());
        assert_eq!(totals.discount_amount, "0.82".parse::<Decimal>().unwrap());
        assert_eq!(totals.total, "15.65".parse::<Decimal>().unwrap());
    }

    #[test]
    fn totals_clamp_after_discount_at_zero() {
        let invoice = invoice_with(vec![line("10", 1)], 150, 10);
        let totals = invoice.totals();

        assert_eq!(totals.tax_amount, Decimal::ZERO);
        assert_eq!(totals.total, Decimal::ZERO);
    }

    #[test]
    fn totals_ignore_lines_with_zero_quantity() {
        let invoice = invoice_with(vec![line("99.99", 0), line("2", 3)], 0, 0);
        let totals = invoice.totals();

        assert_eq!(totals.subtotal, Decimal::from(6));
        assert_eq!(totals.total, Decimal::from(6));
    }
}
