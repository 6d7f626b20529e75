use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{PaymentMethod, Purchase, SupplierPayment};
use crate::engine::balance::{self, PaymentState};
use crate::errors::ReconError;

/// The state to write back after recording a cheque/credit settlement.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SettlementOutcome {
    pub purchase_id: Uuid,
    pub paid_amount: f64,
    pub remaining: f64,
    /// Derived from the amounts; the claimed state is only validated against.
    pub state: PaymentState,
    /// Audit row to append, present whenever any amount was paid. Carries the
    /// cumulative paid amount and the purchase ref so the reconciler can
    /// dedupe repeated recordings of the same settlement.
    pub payment: Option<SupplierPayment>,
}

/// Validates a settlement against its purchase and computes the write-back.
///
/// `claimed_state` is what the operator asserts; a claim of payment with no
/// amount given is rejected rather than silently corrupting the ledger.
pub fn prepare(
    purchase: &Purchase,
    claimed_state: PaymentState,
    paid_amount: f64,
    today: NaiveDate,
) -> Result<SettlementOutcome, ReconError> {
    if claimed_state != PaymentState::Unpaid && paid_amount <= 0.0 {
        return Err(ReconError::InconsistentSettlement(format!(
            "purchase {} marked {:?} with paid amount {}",
            purchase.number, claimed_state, paid_amount
        )));
    }

    let balance = balance::settle(purchase.total_amount, paid_amount)?;

    let payment = (paid_amount > 0.0).then(|| {
        SupplierPayment::new(purchase.supplier_ref, paid_amount, today)
            .with_method(PaymentMethod::Check)
            .with_purchase(purchase.id)
            .with_note(format!("settlement for purchase {}", purchase.number))
    });

    Ok(SettlementOutcome {
        purchase_id: purchase.id,
        paid_amount,
        remaining: balance.remaining,
        state: balance.state,
        payment,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PaymentKind;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    fn cheque_purchase(total: f64) -> Purchase {
        Purchase::new("P-77", total, PaymentKind::Check).with_supplier(Uuid::new_v4())
    }

    #[test]
    fn partial_settlement_produces_payment_row() {
        let purchase = cheque_purchase(1000.0);
        let outcome = prepare(&purchase, PaymentState::Partial, 400.0, today()).unwrap();
        assert_eq!(outcome.remaining, 600.0);
        assert_eq!(outcome.state, PaymentState::Partial);
        let payment = outcome.payment.expect("payment row");
        assert_eq!(payment.amount, 400.0);
        assert_eq!(payment.purchase_ref, Some(purchase.id));
        assert_eq!(payment.method, PaymentMethod::Check);
        assert!(payment.note.unwrap().contains("P-77"));
    }

    #[test]
    fn full_settlement_clamps_remaining() {
        let purchase = cheque_purchase(1000.0);
        let outcome = prepare(&purchase, PaymentState::Paid, 1000.0, today()).unwrap();
        assert_eq!(outcome.remaining, 0.0);
        assert_eq!(outcome.state, PaymentState::Paid);
    }

    #[test]
    fn marking_unpaid_with_zero_amount_is_allowed() {
        let purchase = cheque_purchase(1000.0);
        let outcome = prepare(&purchase, PaymentState::Unpaid, 0.0, today()).unwrap();
        assert_eq!(outcome.state, PaymentState::Unpaid);
        assert!(outcome.payment.is_none());
    }

    #[test]
    fn claiming_payment_without_amount_is_rejected() {
        let purchase = cheque_purchase(1000.0);
        let err = prepare(&purchase, PaymentState::Paid, 0.0, today()).unwrap_err();
        assert!(matches!(err, ReconError::InconsistentSettlement(_)));
    }

    #[test]
    fn negative_amount_is_rejected() {
        let purchase = cheque_purchase(1000.0);
        let err = prepare(&purchase, PaymentState::Unpaid, -10.0, today()).unwrap_err();
        assert!(matches!(err, ReconError::InvalidAmount(_)));
    }

    #[test]
    fn derived_state_wins_over_claim() {
        let purchase = cheque_purchase(1000.0);
        // operator claims full payment but only covers part
        let outcome = prepare(&purchase, PaymentState::Paid, 400.0, today()).unwrap();
        assert_eq!(outcome.state, PaymentState::Partial);
    }
}
