//! Snapshot record types handed to the engine by the persistence collaborator.
//!
//! These are read models, not storage schemas: the engine never owns their
//! persistence and tolerates upstream inconsistencies (e.g. a stored status
//! that disagrees with the amounts).

pub mod invoice;
pub mod party;
pub mod purchase;

pub use invoice::{CreditNote, Invoice, InvoiceStatus};
pub use party::{Client, Supplier};
pub use purchase::{PaymentKind, PaymentMethod, Purchase, PurchaseStatus, SupplierPayment};
