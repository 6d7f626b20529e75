use std::sync::{Mutex, MutexGuard};

use chrono::NaiveDate;
use uuid::Uuid;

use crate::domain::{
    Client, CreditNote, Invoice, InvoiceStatus, PaymentKind, Purchase, PurchaseStatus, Supplier,
    SupplierPayment,
};
use crate::errors::ReconError;
use crate::source::RecordSource;

#[derive(Debug, Default)]
struct State {
    invoices: Vec<Invoice>,
    credit_notes: Vec<CreditNote>,
    purchases: Vec<Purchase>,
    payments: Vec<SupplierPayment>,
    clients: Vec<Client>,
    suppliers: Vec<Supplier>,
    low_stock: u64,
}

/// In-memory [`RecordSource`] used in tests and for embedding without a
/// database. Snapshot reads clone; writes land under a single lock, so the
/// last writer wins, matching the engine's concurrency contract.
#[derive(Debug, Default)]
pub struct MemorySource {
    state: Mutex<State>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> Result<MutexGuard<'_, State>, ReconError> {
        self.state
            .lock()
            .map_err(|_| ReconError::SourceFetch("memory source lock poisoned".into()))
    }

    pub fn add_invoice(&self, invoice: Invoice) -> Result<(), ReconError> {
        self.state()?.invoices.push(invoice);
        Ok(())
    }

    pub fn add_credit_note(&self, note: CreditNote) -> Result<(), ReconError> {
        self.state()?.credit_notes.push(note);
        Ok(())
    }

    pub fn add_purchase(&self, purchase: Purchase) -> Result<(), ReconError> {
        self.state()?.purchases.push(purchase);
        Ok(())
    }

    pub fn add_payment(&self, payment: SupplierPayment) -> Result<(), ReconError> {
        self.state()?.payments.push(payment);
        Ok(())
    }

    pub fn add_client(&self, client: Client) -> Result<(), ReconError> {
        self.state()?.clients.push(client);
        Ok(())
    }

    pub fn add_supplier(&self, supplier: Supplier) -> Result<(), ReconError> {
        self.state()?.suppliers.push(supplier);
        Ok(())
    }

    pub fn set_low_stock_count(&self, count: u64) -> Result<(), ReconError> {
        self.state()?.low_stock = count;
        Ok(())
    }

    pub fn payment_count(&self) -> Result<usize, ReconError> {
        Ok(self.state()?.payments.len())
    }
}

impl RecordSource for MemorySource {
    fn invoices_created_between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Invoice>, ReconError> {
        Ok(self
            .state()?
            .invoices
            .iter()
            .filter(|i| {
                let day = i.created_at.date_naive();
                day >= start && day < end
            })
            .cloned()
            .collect())
    }

    fn invoices_with_status(
        &self,
        statuses: &[InvoiceStatus],
    ) -> Result<Vec<Invoice>, ReconError> {
        Ok(self
            .state()?
            .invoices
            .iter()
            .filter(|i| statuses.contains(&i.status))
            .cloned()
            .collect())
    }

    fn credit_notes(&self) -> Result<Vec<CreditNote>, ReconError> {
        Ok(self.state()?.credit_notes.clone())
    }

    fn purchases_with_kind(&self, kinds: &[PaymentKind]) -> Result<Vec<Purchase>, ReconError> {
        Ok(self
            .state()?
            .purchases
            .iter()
            .filter(|p| kinds.contains(&p.payment_kind))
            .cloned()
            .collect())
    }

    fn purchases_with_status(&self, status: PurchaseStatus) -> Result<Vec<Purchase>, ReconError> {
        Ok(self
            .state()?
            .purchases
            .iter()
            .filter(|p| p.status == status)
            .cloned()
            .collect())
    }

    fn purchase_by_id(&self, id: Uuid) -> Result<Option<Purchase>, ReconError> {
        Ok(self.state()?.purchases.iter().find(|p| p.id == id).cloned())
    }

    fn supplier_payments(&self) -> Result<Vec<SupplierPayment>, ReconError> {
        Ok(self.state()?.payments.clone())
    }

    fn clients(&self) -> Result<Vec<Client>, ReconError> {
        Ok(self.state()?.clients.clone())
    }

    fn suppliers(&self) -> Result<Vec<Supplier>, ReconError> {
        Ok(self.state()?.suppliers.clone())
    }

    fn low_stock_count(&self) -> Result<u64, ReconError> {
        Ok(self.state()?.low_stock)
    }

    fn update_purchase_settlement(
        &self,
        id: Uuid,
        paid_amount: f64,
        remaining: f64,
    ) -> Result<(), ReconError> {
        let mut state = self.state()?;
        let Some(purchase) = state.purchases.iter_mut().find(|p| p.id == id) else {
            return Err(ReconError::UnknownPurchase(id));
        };
        purchase.paid_amount = paid_amount;
        debug_assert_eq!(purchase.remaining(), remaining);
        Ok(())
    }

    fn append_supplier_payment(&self, payment: SupplierPayment) -> Result<(), ReconError> {
        self.state()?.payments.push(payment);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn date_window_filter_is_half_open() {
        let source = MemorySource::new();
        for day in [1, 2, 3] {
            let created = Utc.with_ymd_and_hms(2024, 6, day, 10, 0, 0).unwrap();
            source
                .add_invoice(Invoice::new(format!("I-{day}"), 10.0, created))
                .unwrap();
        }
        let hits = source
            .invoices_created_between(date(2024, 6, 1), date(2024, 6, 3))
            .unwrap();
        assert_eq!(hits.len(), 2);
    }

    #[test]
    fn settlement_update_rejects_unknown_purchase() {
        let source = MemorySource::new();
        let err = source
            .update_purchase_settlement(Uuid::new_v4(), 10.0, 0.0)
            .unwrap_err();
        assert!(matches!(err, ReconError::UnknownPurchase(_)));
    }

    #[test]
    fn settlement_update_lands_on_purchase() {
        let source = MemorySource::new();
        let purchase = Purchase::new("P-1", 100.0, PaymentKind::Check);
        let id = purchase.id;
        source.add_purchase(purchase).unwrap();
        source.update_purchase_settlement(id, 40.0, 60.0).unwrap();
        let stored = source.purchase_by_id(id).unwrap().unwrap();
        assert_eq!(stored.paid_amount, 40.0);
        assert_eq!(stored.remaining(), 60.0);
    }
}
