#![doc(test(attr(deny(warnings))))]

//! Recon Core turns raw back-office records — sales invoices, supplier
//! purchases, supplier payments, credit notes, and cheque metadata — into
//! derived ledger state: outstanding balances, payment classification,
//! overdue aging, and the ranked reminder lists consumed by dashboards.

pub mod config;
pub mod domain;
pub mod engine;
pub mod errors;
pub mod source;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes the global tracing subscriber with sensible defaults.
pub fn init() {
    INIT_TRACING.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter =
            EnvFilter::from_default_env().add_directive("recon_core=info".parse().unwrap());

        fmt().with_env_filter(filter).init();
        tracing::info!("Recon Core tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
    }
}
