use serde::{Deserialize, Serialize};

use crate::errors::ReconError;

/// Outstanding amount and payment classification for one document.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Balance {
    pub remaining: f64,
    pub state: PaymentState,
}

/// Amount-derived payment classification. Never stored; always recomputed
/// from `(total, paid)` so it cannot drift from the amounts.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum PaymentState {
    Unpaid,
    Partial,
    Paid,
}

/// Computes the outstanding amount and payment state for a document.
///
/// Overpayment clamps `remaining` to zero rather than reporting a credit.
pub fn settle(total: f64, paid: f64) -> Result<Balance, ReconError> {
    validate_amount("total", total)?;
    validate_amount("paid", paid)?;

    let remaining = (total - paid).max(0.0);
    let state = if paid >= total {
        PaymentState::Paid
    } else if paid > 0.0 {
        PaymentState::Partial
    } else {
        PaymentState::Unpaid
    };
    Ok(Balance { remaining, state })
}

fn validate_amount(label: &str, value: f64) -> Result<(), ReconError> {
    if !value.is_finite() {
        return Err(ReconError::InvalidAmount(format!(
            "{} amount is not finite",
            label
        )));
    }
    if value < 0.0 {
        return Err(ReconError::InvalidAmount(format!(
            "{} amount is negative: {}",
            label, value
        )));
    }
    Ok(())
}
