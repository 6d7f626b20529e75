use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{PaymentKind, Purchase, Supplier};
use crate::engine::aging;

/// One entry on the cheque/credit due reminder surface.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DueReminder {
    pub purchase_id: Uuid,
    pub purchase_number: String,
    pub supplier: String,
    pub payment_kind: PaymentKind,
    pub amount: f64,
    pub due_date: NaiveDate,
    pub days_overdue: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_bank: Option<String>,
}

/// Builds the ranked reminder list for supplier obligations due by cheque
/// deposit or credit due date.
///
/// Purchases without a resolvable due date are treated as not yet scheduled
/// and dropped; rows not yet due are dropped. A missing supplier join gets
/// `fallback_label` rather than losing the reminder. Sorted most overdue
/// first, larger amounts breaking ties, truncated to `limit`.
pub fn due_reminders(
    purchases: &[Purchase],
    suppliers: &[Supplier],
    as_of: NaiveDate,
    limit: usize,
    fallback_label: &str,
) -> Vec<DueReminder> {
    let names: HashMap<Uuid, &str> = suppliers
        .iter()
        .map(|s| (s.id, s.name.as_str()))
        .collect();

    let mut entries: Vec<DueReminder> = purchases
        .iter()
        .filter(|p| matches!(p.payment_kind, PaymentKind::Check | PaymentKind::Credit))
        .filter_map(|p| {
            let due_date = p.due_date()?;
            let days_overdue = aging::days_overdue(due_date, as_of);
            if days_overdue < 0 {
                return None;
            }
            let supplier = p
                .supplier_ref
                .and_then(|id| names.get(&id).copied())
                .unwrap_or_else(|| {
                    tracing::warn!(purchase = %p.number, "supplier join missed for reminder");
                    fallback_label
                })
                .to_string();
            Some(DueReminder {
                purchase_id: p.id,
                purchase_number: p.number.clone(),
                supplier,
                payment_kind: p.payment_kind,
                amount: p.total_amount,
                due_date,
                days_overdue,
                check_number: p.check_number.clone(),
                check_bank: p.check_bank.clone(),
            })
        })
        .collect();

    entries.sort_by(|a, b| {
        b.days_overdue
            .cmp(&a.days_overdue)
            .then_with(|| b.amount.total_cmp(&a.amount))
    });
    entries.truncate(limit);
    entries
}
