use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{Client, Invoice, InvoiceStatus};
use crate::engine::aging;

/// Aggregated overdue debt for one client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClientDebt {
    pub client_id: Uuid,
    pub client: String,
    pub debt: f64,
    pub invoice_count: usize,
    /// Worst-case staleness: the maximum age across contributing invoices.
    pub days_overdue: i64,
}

/// The top-N delinquency list plus a flag for "more clients exist".
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClientDebtReport {
    pub entries: Vec<ClientDebt>,
    pub truncated: bool,
}

/// Groups overdue invoices by client into a ranked delinquency list.
///
/// An invoice contributes when its stored status is `partial` or `credit`
/// AND its creation date is more than `cutoff_days` in the past. The stored
/// status is trusted literally; only the remainder is recomputed, and rows
/// with a non-positive remainder are skipped. Rows without a client ref
/// cannot be grouped and are skipped with a log line.
pub fn overdue_clients(
    invoices: &[Invoice],
    clients: &[Client],
    as_of: NaiveDate,
    cutoff_days: i64,
    limit: usize,
    fallback_label: &str,
) -> ClientDebtReport {
    let names: HashMap<Uuid, &str> = clients.iter().map(|c| (c.id, c.name.as_str())).collect();

    struct Acc {
        debt: f64,
        invoice_count: usize,
        days_overdue: i64,
    }

    let mut grouped: HashMap<Uuid, Acc> = HashMap::new();
    for invoice in invoices {
        if !matches!(invoice.status, InvoiceStatus::Partial | InvoiceStatus::Credit) {
            continue;
        }
        if !aging::past_cutoff(invoice.created_at, as_of, cutoff_days) {
            continue;
        }
        let remaining = invoice.remaining();
        if remaining <= 0.0 {
            continue;
        }
        let Some(client_id) = invoice.client_ref else {
            tracing::warn!(invoice = %invoice.number, "invoice without client ref skipped");
            continue;
        };
        let age = aging::days_overdue_utc(invoice.created_at, as_of);
        let acc = grouped.entry(client_id).or_insert(Acc {
            debt: 0.0,
            invoice_count: 0,
            days_overdue: 0,
        });
        acc.debt += remaining;
        acc.invoice_count += 1;
        acc.days_overdue = acc.days_overdue.max(age);
    }

    let mut entries: Vec<ClientDebt> = grouped
        .into_iter()
        .map(|(client_id, acc)| ClientDebt {
            client_id,
            client: names
                .get(&client_id)
                .copied()
                .unwrap_or(fallback_label)
                .to_string(),
            debt: acc.debt,
            invoice_count: acc.invoice_count,
            days_overdue: acc.days_overdue,
        })
        .collect();

    entries.sort_by(|a, b| b.debt.total_cmp(&a.debt));
    let truncated = entries.len() >= limit;
    entries.truncate(limit);
    ClientDebtReport { entries, truncated }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    fn as_of() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    fn created_days_ago(days: i64) -> chrono::DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap() - Duration::days(days)
    }

    fn overdue_invoice(client: &Client, total: f64, paid: f64, days_old: i64) -> Invoice {
        Invoice::new("INV", total, created_days_ago(days_old))
            .with_client(client.id)
            .with_status(InvoiceStatus::Partial)
            .with_paid(paid)
    }

    #[test]
    fn groups_debt_per_client_with_max_staleness() {
        let client = Client::new("Hassan");
        let invoices = vec![
            overdue_invoice(&client, 100.0, 20.0, 40),
            overdue_invoice(&client, 50.0, 0.0, 60),
        ];
        let report = overdue_clients(
            &invoices,
            std::slice::from_ref(&client),
            as_of(),
            30,
            5,
            "(unknown)",
        );
        assert_eq!(report.entries.len(), 1);
        let entry = &report.entries[0];
        assert_eq!(entry.debt, 130.0);
        assert_eq!(entry.invoice_count, 2);
        assert_eq!(entry.days_overdue, 60);
        assert!(!report.truncated);
    }

    #[test]
    fn recent_invoices_do_not_contribute() {
        let client = Client::new("Recent");
        let invoices = vec![overdue_invoice(&client, 100.0, 0.0, 10)];
        let report = overdue_clients(
            &invoices,
            std::slice::from_ref(&client),
            as_of(),
            30,
            5,
            "(unknown)",
        );
        assert!(report.entries.is_empty());
    }

    #[test]
    fn settled_amounts_with_stale_status_are_skipped() {
        // The stored status says partial but the amounts say settled; the
        // aggregator trusts the status filter yet skips the zero remainder.
        let client = Client::new("Settled");
        let invoices = vec![overdue_invoice(&client, 500.0, 500.0, 45)];
        let report = overdue_clients(
            &invoices,
            std::slice::from_ref(&client),
            as_of(),
            30,
            5,
            "(unknown)",
        );
        assert!(report.entries.is_empty());
    }

    #[test]
    fn draft_and_paid_statuses_are_ignored_even_when_old() {
        let client = Client::new("Workflow");
        let invoices = vec![
            overdue_invoice(&client, 100.0, 0.0, 45).with_status(InvoiceStatus::Draft),
            overdue_invoice(&client, 100.0, 0.0, 45).with_status(InvoiceStatus::Sent),
            overdue_invoice(&client, 100.0, 0.0, 45).with_status(InvoiceStatus::Paid),
        ];
        let report = overdue_clients(
            &invoices,
            std::slice::from_ref(&client),
            as_of(),
            30,
            5,
            "(unknown)",
        );
        assert!(report.entries.is_empty());
    }

    #[test]
    fn rows_without_client_ref_are_skipped() {
        let orphan = Invoice::new("INV-0", 100.0, created_days_ago(45))
            .with_status(InvoiceStatus::Partial);
        let report = overdue_clients(&[orphan], &[], as_of(), 30, 5, "(unknown)");
        assert!(report.entries.is_empty());
    }

    #[test]
    fn sorted_descending_and_truncated_with_flag() {
        let clients: Vec<Client> = (0..6).map(|i| Client::new(format!("C{i}"))).collect();
        let invoices: Vec<Invoice> = clients
            .iter()
            .enumerate()
            .map(|(i, c)| overdue_invoice(c, 100.0 * (i as f64 + 1.0), 0.0, 45))
            .collect();
        let report = overdue_clients(&invoices, &clients, as_of(), 30, 5, "(unknown)");
        assert_eq!(report.entries.len(), 5);
        assert!(report.truncated);
        assert_eq!(report.entries[0].debt, 600.0);
        for pair in report.entries.windows(2) {
            assert!(pair[0].debt >= pair[1].debt);
        }
    }
}
