//! The reconciliation engine: pure aggregators plus the [`ReconEngine`]
//! facade that feeds them from a [`RecordSource`] and applies settlements.

pub mod aging;
pub mod balance;
pub mod client_debt;
pub mod dashboard;
pub mod reminders;
pub mod settlement;
pub mod supplier_credit;

pub use balance::{Balance, PaymentState};
pub use client_debt::{ClientDebt, ClientDebtReport};
pub use dashboard::DashboardStats;
pub use reminders::DueReminder;
pub use settlement::SettlementOutcome;
pub use supplier_credit::{CreditStatus, SupplierCredit};

use chrono::{Duration, NaiveDate};
use uuid::Uuid;

use crate::config::EngineConfig;
use crate::domain::{InvoiceStatus, PaymentKind, PurchaseStatus};
use crate::errors::ReconError;
use crate::source::RecordSource;

/// Facade that coordinates record fetches, aggregation, and settlement.
///
/// Every read method is a full re-aggregation from fresh snapshots; nothing
/// is cached between calls. A failed source fetch degrades to an empty set so
/// a dashboard renders partial truth rather than nothing.
pub struct ReconEngine {
    source: Box<dyn RecordSource>,
    config: EngineConfig,
}

impl ReconEngine {
    pub fn new(source: Box<dyn RecordSource>) -> Self {
        Self::with_config(source, EngineConfig::default())
    }

    pub fn with_config(source: Box<dyn RecordSource>, config: EngineConfig) -> Self {
        Self { source, config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The ranked cheque/credit due reminder list.
    pub fn due_reminders(&self, as_of: NaiveDate) -> Vec<DueReminder> {
        let purchases = self.fetch_or_empty(
            "purchases",
            self.source
                .purchases_with_kind(&[PaymentKind::Check, PaymentKind::Credit]),
        );
        let suppliers = self.fetch_or_empty("suppliers", self.source.suppliers());
        reminders::due_reminders(
            &purchases,
            &suppliers,
            as_of,
            self.config.reminder_limit,
            &self.config.fallback_party_label,
        )
    }

    /// The top-N overdue client debt list.
    pub fn overdue_clients(&self, as_of: NaiveDate) -> ClientDebtReport {
        let invoices = self.fetch_or_empty(
            "invoices",
            self.source
                .invoices_with_status(&[InvoiceStatus::Partial, InvoiceStatus::Credit]),
        );
        let clients = self.fetch_or_empty("clients", self.source.clients());
        client_debt::overdue_clients(
            &invoices,
            &clients,
            as_of,
            self.config.overdue_cutoff_days,
            self.config.delinquency_limit,
            &self.config.fallback_party_label,
        )
    }

    /// The per-supplier credit/debt reconciliation table.
    pub fn supplier_credits(&self) -> Vec<SupplierCredit> {
        let purchases = self.fetch_or_empty(
            "purchases",
            self.source.purchases_with_status(PurchaseStatus::Received),
        );
        let payments = self.fetch_or_empty("payments", self.source.supplier_payments());
        let suppliers = self.fetch_or_empty("suppliers", self.source.suppliers());
        supplier_credit::reconcile(
            &purchases,
            &payments,
            &suppliers,
            &self.config.fallback_party_label,
        )
    }

    /// The dashboard KPI scalars for the given day.
    pub fn dashboard(&self, as_of: NaiveDate) -> DashboardStats {
        let todays_invoices = self.fetch_or_empty(
            "today's invoices",
            self.source
                .invoices_created_between(as_of, as_of + Duration::days(1)),
        );
        let open_invoices = self.fetch_or_empty(
            "open invoices",
            self.source
                .invoices_with_status(&[InvoiceStatus::Partial, InvoiceStatus::Credit]),
        );
        let credit_notes = self.fetch_or_empty("credit notes", self.source.credit_notes());
        let payments = self.fetch_or_empty("payments", self.source.supplier_payments());
        let low_stock = match self.source.low_stock_count() {
            Ok(count) => count,
            Err(err) => {
                tracing::warn!(%err, "low stock source failed, degrading to zero");
                0
            }
        };
        let supplier_credits = self.supplier_credits();

        dashboard::stats(
            &todays_invoices,
            &open_invoices,
            &credit_notes,
            &supplier_credits,
            &payments,
            low_stock,
            as_of,
        )
    }

    /// Records a cheque/credit settlement against a purchase.
    ///
    /// Write path: invalid input raises instead of degrading. Writes the new
    /// `(paid, remaining)` pair back and appends a cumulative settlement
    /// payment row when any amount was paid.
    pub fn record_settlement(
        &self,
        purchase_id: Uuid,
        claimed_state: PaymentState,
        paid_amount: f64,
        today: NaiveDate,
    ) -> Result<SettlementOutcome, ReconError> {
        let purchase = self
            .source
            .purchase_by_id(purchase_id)?
            .ok_or(ReconError::UnknownPurchase(purchase_id))?;

        let outcome = settlement::prepare(&purchase, claimed_state, paid_amount, today)?;

        self.source.update_purchase_settlement(
            outcome.purchase_id,
            outcome.paid_amount,
            outcome.remaining,
        )?;
        if let Some(payment) = outcome.payment.clone() {
            self.source.append_supplier_payment(payment)?;
        }
        tracing::info!(
            purchase = %purchase.number,
            paid = outcome.paid_amount,
            remaining = outcome.remaining,
            "settlement recorded"
        );
        Ok(outcome)
    }

    fn fetch_or_empty<T>(&self, what: &str, result: Result<Vec<T>, ReconError>) -> Vec<T> {
        match result {
            Ok(records) => records,
            Err(err) => {
                tracing::warn!(%err, source = what, "source fetch failed, degrading to empty set");
                Vec::new()
            }
        }
    }
}
