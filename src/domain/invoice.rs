use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A sales invoice as recorded by the billing subsystem.
///
/// `status` is the stored workflow field and may disagree with the amounts;
/// aggregators filter on it literally and derive balances from the amounts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Invoice {
    pub id: Uuid,
    pub number: String,
    pub client_ref: Option<Uuid>,
    pub total_amount: f64,
    pub paid_amount: f64,
    pub status: InvoiceStatus,
    pub created_at: DateTime<Utc>,
}

impl Invoice {
    pub fn new(number: impl Into<String>, total_amount: f64, created_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            number: number.into(),
            client_ref: None,
            total_amount,
            paid_amount: 0.0,
            status: InvoiceStatus::Draft,
            created_at,
        }
    }

    pub fn with_client(mut self, client_ref: Uuid) -> Self {
        self.client_ref = Some(client_ref);
        self
    }

    pub fn with_status(mut self, status: InvoiceStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_paid(mut self, paid_amount: f64) -> Self {
        self.paid_amount = paid_amount;
        self
    }

    /// Outstanding amount, clamped at zero.
    pub fn remaining(&self) -> f64 {
        (self.total_amount - self.paid_amount).max(0.0)
    }
}

/// Stored invoice workflow status. Distinct from the amount-derived
/// [`PaymentState`](crate::engine::balance::PaymentState).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceStatus {
    Draft,
    Sent,
    Partial,
    Paid,
    Credit,
}

/// A credit note issued against an invoice.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CreditNote {
    pub id: Uuid,
    pub invoice_ref: Uuid,
    pub total_credit_amount: f64,
    pub applied_amount: f64,
}

impl CreditNote {
    pub fn new(invoice_ref: Uuid, total_credit_amount: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            invoice_ref,
            total_credit_amount,
            applied_amount: 0.0,
        }
    }

    /// Credit still available to apply, clamped at zero.
    pub fn remaining(&self) -> f64 {
        (self.total_credit_amount - self.applied_amount).max(0.0)
    }
}
