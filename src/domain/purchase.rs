use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A supplier purchase as recorded by the purchasing subsystem.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Purchase {
    pub id: Uuid,
    pub number: String,
    pub supplier_ref: Option<Uuid>,
    pub total_amount: f64,
    pub paid_amount: f64,
    pub payment_kind: PaymentKind,
    pub status: PurchaseStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_bank: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_deposit_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credit_due_date: Option<NaiveDate>,
}

impl Purchase {
    pub fn new(number: impl Into<String>, total_amount: f64, payment_kind: PaymentKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            number: number.into(),
            supplier_ref: None,
            total_amount,
            paid_amount: 0.0,
            payment_kind,
            status: PurchaseStatus::Pending,
            check_number: None,
            check_bank: None,
            check_date: None,
            check_deposit_date: None,
            credit_due_date: None,
        }
    }

    pub fn with_supplier(mut self, supplier_ref: Uuid) -> Self {
        self.supplier_ref = Some(supplier_ref);
        self
    }

    pub fn with_status(mut self, status: PurchaseStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_paid(mut self, paid_amount: f64) -> Self {
        self.paid_amount = paid_amount;
        self
    }

    pub fn with_check(
        mut self,
        number: impl Into<String>,
        bank: impl Into<String>,
        deposit_date: NaiveDate,
    ) -> Self {
        self.check_number = Some(number.into());
        self.check_bank = Some(bank.into());
        self.check_deposit_date = Some(deposit_date);
        self
    }

    pub fn with_credit_due(mut self, due_date: NaiveDate) -> Self {
        self.credit_due_date = Some(due_date);
        self
    }

    /// Outstanding amount, clamped at zero.
    pub fn remaining(&self) -> f64 {
        (self.total_amount - self.paid_amount).max(0.0)
    }

    /// The date this obligation falls due: cheque deposit date for cheque
    /// purchases, credit due date otherwise. `None` means not yet scheduled.
    pub fn due_date(&self) -> Option<NaiveDate> {
        match self.payment_kind {
            PaymentKind::Check => self.check_deposit_date,
            _ => self.credit_due_date,
        }
    }
}

/// How a purchase is meant to be paid.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PaymentKind {
    Cash,
    Credit,
    Transfer,
    Check,
}

/// Stored purchase workflow status.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PurchaseStatus {
    Pending,
    Received,
    Cancelled,
}

/// Append-only audit evidence of money paid to a supplier.
///
/// `purchase_ref` distinguishes a cheque/credit settlement row (cumulative
/// paid amount for that purchase) from a generic supplier payment. The engine
/// only ever sums these records; it never mutates or deletes them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SupplierPayment {
    pub id: Uuid,
    pub supplier_ref: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purchase_ref: Option<Uuid>,
    pub amount: f64,
    pub payment_date: NaiveDate,
    pub method: PaymentMethod,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl SupplierPayment {
    pub fn new(supplier_ref: Option<Uuid>, amount: f64, payment_date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            supplier_ref,
            purchase_ref: None,
            amount,
            payment_date,
            method: PaymentMethod::Cash,
            note: None,
        }
    }

    pub fn with_method(mut self, method: PaymentMethod) -> Self {
        self.method = method;
        self
    }

    pub fn with_purchase(mut self, purchase_ref: Uuid) -> Self {
        self.purchase_ref = Some(purchase_ref);
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}

/// How a supplier payment was made.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Cash,
    Check,
    Transfer,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn due_date_prefers_deposit_date_for_cheques() {
        let purchase = Purchase::new("P-1", 200.0, PaymentKind::Check)
            .with_check("88412", "BMCE", date(2024, 3, 10));
        assert_eq!(purchase.due_date(), Some(date(2024, 3, 10)));
    }

    #[test]
    fn due_date_uses_credit_due_for_credit_purchases() {
        let purchase =
            Purchase::new("P-2", 200.0, PaymentKind::Credit).with_credit_due(date(2024, 4, 1));
        assert_eq!(purchase.due_date(), Some(date(2024, 4, 1)));
    }

    #[test]
    fn due_date_absent_when_unscheduled() {
        let purchase = Purchase::new("P-3", 200.0, PaymentKind::Check);
        assert_eq!(purchase.due_date(), None);
    }
}
