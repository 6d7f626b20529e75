use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{Purchase, PurchaseStatus, Supplier, SupplierPayment};

/// Per-supplier reconciliation of purchases against payments.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SupplierCredit {
    pub supplier_id: Uuid,
    pub supplier: String,
    pub total_purchases: f64,
    pub total_paid: f64,
    /// May be negative when a supplier is overpaid; not clamped at this level.
    pub remaining: f64,
    pub status: CreditStatus,
    pub last_payment_date: Option<NaiveDate>,
}

/// Supplier-level credit classification.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CreditStatus {
    NoDebt,
    Debt,
    Partial,
    Paid,
}

/// Collapses the payment audit trail to the rows that count toward totals.
///
/// Settlement rows (those carrying a `purchase_ref`) record the cumulative
/// paid amount for their purchase, so only the latest row per purchase counts;
/// re-recording an identical settlement appends audit evidence without
/// changing the sum. Generic payments (no `purchase_ref`) all count.
pub fn effective_payments(payments: &[SupplierPayment]) -> Vec<&SupplierPayment> {
    let mut latest_settlement: HashMap<Uuid, &SupplierPayment> = HashMap::new();
    let mut generic: Vec<&SupplierPayment> = Vec::new();

    for payment in payments {
        match payment.purchase_ref {
            Some(purchase_id) => {
                let keep = latest_settlement
                    .get(&purchase_id)
                    .map(|current| payment.payment_date >= current.payment_date)
                    .unwrap_or(true);
                if keep {
                    latest_settlement.insert(purchase_id, payment);
                }
            }
            None => generic.push(payment),
        }
    }

    generic.extend(latest_settlement.into_values());
    generic
}

/// Aggregates received purchases against the full payment history into a
/// per-supplier credit/debt summary, ordered descending by remaining debt.
///
/// Suppliers with neither purchases nor payments have nothing to reconcile
/// and are excluded. Payments that cannot be attributed to a supplier are
/// skipped with a log line.
pub fn reconcile(
    purchases: &[Purchase],
    payments: &[SupplierPayment],
    suppliers: &[Supplier],
    fallback_label: &str,
) -> Vec<SupplierCredit> {
    let names: HashMap<Uuid, &str> = suppliers
        .iter()
        .map(|s| (s.id, s.name.as_str()))
        .collect();

    struct Acc {
        total_purchases: f64,
        total_paid: f64,
        last_payment_date: Option<NaiveDate>,
    }

    let mut grouped: HashMap<Uuid, Acc> = HashMap::new();

    for purchase in purchases {
        if purchase.status != PurchaseStatus::Received {
            continue;
        }
        let Some(supplier_id) = purchase.supplier_ref else {
            tracing::warn!(purchase = %purchase.number, "purchase without supplier ref skipped");
            continue;
        };
        grouped
            .entry(supplier_id)
            .or_insert(Acc {
                total_purchases: 0.0,
                total_paid: 0.0,
                last_payment_date: None,
            })
            .total_purchases += purchase.total_amount;
    }

    for payment in effective_payments(payments) {
        let Some(supplier_id) = payment.supplier_ref else {
            tracing::warn!(payment = %payment.id, "payment without supplier ref skipped");
            continue;
        };
        let acc = grouped.entry(supplier_id).or_insert(Acc {
            total_purchases: 0.0,
            total_paid: 0.0,
            last_payment_date: None,
        });
        acc.total_paid += payment.amount;
        acc.last_payment_date = match acc.last_payment_date {
            Some(current) => Some(current.max(payment.payment_date)),
            None => Some(payment.payment_date),
        };
    }

    let mut entries: Vec<SupplierCredit> = grouped
        .into_iter()
        .map(|(supplier_id, acc)| {
            let status = if acc.total_purchases == 0.0 {
                CreditStatus::NoDebt
            } else if acc.total_paid == 0.0 {
                CreditStatus::Debt
            } else if acc.total_paid >= acc.total_purchases {
                CreditStatus::Paid
            } else {
                CreditStatus::Partial
            };
            SupplierCredit {
                supplier_id,
                supplier: names
                    .get(&supplier_id)
                    .copied()
                    .unwrap_or(fallback_label)
                    .to_string(),
                total_purchases: acc.total_purchases,
                total_paid: acc.total_paid,
                remaining: acc.total_purchases - acc.total_paid,
                status,
                last_payment_date: acc.last_payment_date,
            }
        })
        .collect();

    entries.sort_by(|a, b| b.remaining.total_cmp(&a.remaining));
    entries
}
