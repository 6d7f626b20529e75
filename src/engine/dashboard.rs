use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::domain::{CreditNote, Invoice, InvoiceStatus, SupplierPayment};
use crate::engine::supplier_credit::{self, SupplierCredit};

/// KPI scalars for the main dashboard.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DashboardStats {
    /// Invoice totals created on the as-of day.
    pub today_sales: f64,
    /// Sum of positive remainders on partial/credit invoices.
    pub outstanding_client_credit: f64,
    /// Credit-note value not yet applied.
    pub credit_note_balance: f64,
    /// Provided by the inventory collaborator; zero when that source fails.
    pub low_stock_count: u64,
    /// Sum of positive supplier remainders from the reconciler.
    pub supplier_debt: f64,
    /// Effective supplier payments dated in the as-of month.
    pub monthly_expenses: f64,
}

/// Computes the dashboard KPI scalars from snapshot record sets.
///
/// Each input is whatever its source fetch yielded; a failed fetch arrives
/// here as an empty set, so a degraded dashboard shows zeros instead of an
/// error screen.
pub fn stats(
    todays_invoices: &[Invoice],
    open_invoices: &[Invoice],
    credit_notes: &[CreditNote],
    supplier_credits: &[SupplierCredit],
    payments: &[SupplierPayment],
    low_stock_count: u64,
    as_of: NaiveDate,
) -> DashboardStats {
    let today_sales = todays_invoices.iter().map(|i| i.total_amount).sum();

    let outstanding_client_credit = open_invoices
        .iter()
        .filter(|i| matches!(i.status, InvoiceStatus::Partial | InvoiceStatus::Credit))
        .map(Invoice::remaining)
        .filter(|r| *r > 0.0)
        .sum();

    let credit_note_balance = credit_notes.iter().map(CreditNote::remaining).sum();

    let supplier_debt = supplier_credits
        .iter()
        .map(|c| c.remaining)
        .filter(|r| *r > 0.0)
        .sum();

    let monthly_expenses = supplier_credit::effective_payments(payments)
        .into_iter()
        .filter(|p| {
            p.payment_date.year() == as_of.year() && p.payment_date.month() == as_of.month()
        })
        .map(|p| p.amount)
        .sum();

    DashboardStats {
        today_sales,
        outstanding_client_credit,
        credit_note_balance,
        low_stock_count,
        supplier_debt,
        monthly_expenses,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Supplier;
    use crate::engine::supplier_credit::CreditStatus;
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn credit_entry(remaining: f64) -> SupplierCredit {
        let supplier = Supplier::new("S");
        SupplierCredit {
            supplier_id: supplier.id,
            supplier: supplier.name,
            total_purchases: remaining.max(0.0),
            total_paid: 0.0,
            remaining,
            status: CreditStatus::Debt,
            last_payment_date: None,
        }
    }

    #[test]
    fn sums_each_kpi_independently() {
        let as_of = date(2024, 6, 15);
        let created = Utc.with_ymd_and_hms(2024, 6, 15, 9, 0, 0).unwrap();
        let todays = vec![
            Invoice::new("A", 120.0, created),
            Invoice::new("B", 80.0, created),
        ];
        let open = vec![Invoice::new("C", 300.0, created)
            .with_status(InvoiceStatus::Partial)
            .with_paid(100.0)];
        let notes = vec![CreditNote::new(Uuid::new_v4(), 50.0)];
        let credits = vec![credit_entry(400.0), credit_entry(-30.0)];
        let payments = vec![
            SupplierPayment::new(Some(Uuid::new_v4()), 75.0, date(2024, 6, 2)),
            SupplierPayment::new(Some(Uuid::new_v4()), 25.0, date(2024, 5, 28)),
        ];

        let stats = stats(&todays, &open, &notes, &credits, &payments, 4, as_of);
        assert_eq!(stats.today_sales, 200.0);
        assert_eq!(stats.outstanding_client_credit, 200.0);
        assert_eq!(stats.credit_note_balance, 50.0);
        assert_eq!(stats.low_stock_count, 4);
        // overpaid suppliers do not offset debt owed to others
        assert_eq!(stats.supplier_debt, 400.0);
        assert_eq!(stats.monthly_expenses, 75.0);
    }

    #[test]
    fn empty_sources_yield_zeros() {
        let stats = stats(&[], &[], &[], &[], &[], 0, date(2024, 6, 1));
        assert_eq!(stats.today_sales, 0.0);
        assert_eq!(stats.supplier_debt, 0.0);
        assert_eq!(stats.monthly_expenses, 0.0);
    }
}
