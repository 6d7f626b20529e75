//! Boundary to the persistence collaborator.
//!
//! The engine never owns storage: it asks a [`RecordSource`] for filtered
//! snapshots (date range, status-set membership, foreign-key equality) and
//! hands back the two settlement write-backs. How records are transported is
//! the collaborator's business.

pub mod memory;

pub use memory::MemorySource;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::domain::{
    Client, CreditNote, Invoice, InvoiceStatus, PaymentKind, Purchase, PurchaseStatus, Supplier,
    SupplierPayment,
};
use crate::errors::ReconError;

/// Trait that abstracts the record store feeding the engine.
pub trait RecordSource: Send + Sync {
    /// Invoices with `created_at` in `[start, end)` (UTC calendar days).
    fn invoices_created_between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Invoice>, ReconError>;
    fn invoices_with_status(
        &self,
        statuses: &[InvoiceStatus],
    ) -> Result<Vec<Invoice>, ReconError>;
    fn credit_notes(&self) -> Result<Vec<CreditNote>, ReconError>;
    fn purchases_with_kind(&self, kinds: &[PaymentKind]) -> Result<Vec<Purchase>, ReconError>;
    fn purchases_with_status(&self, status: PurchaseStatus) -> Result<Vec<Purchase>, ReconError>;
    fn purchase_by_id(&self, id: Uuid) -> Result<Option<Purchase>, ReconError>;
    /// The full payment audit trail; the engine only ever sums it.
    fn supplier_payments(&self) -> Result<Vec<SupplierPayment>, ReconError>;
    fn clients(&self) -> Result<Vec<Client>, ReconError>;
    fn suppliers(&self) -> Result<Vec<Supplier>, ReconError>;
    /// Inventory KPI owned by another subsystem; surfaced as an opaque count.
    fn low_stock_count(&self) -> Result<u64, ReconError>;

    /// Writes the settled `(paid, remaining)` pair back onto a purchase.
    fn update_purchase_settlement(
        &self,
        id: Uuid,
        paid_amount: f64,
        remaining: f64,
    ) -> Result<(), ReconError>;
    /// Appends one payment audit row. Existing rows are never touched.
    fn append_supplier_payment(&self, payment: SupplierPayment) -> Result<(), ReconError>;
}
