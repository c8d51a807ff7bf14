//! Invoice arithmetic and workflow rules. Everything here is pure; talking to
//! the backend is left to `services::invoicing`.

pub mod allocation;
pub mod amount;
pub mod money;
pub mod status;

pub use allocation::{
    AllocationEditor, AllocationError, AllocationField, AllocationSplit, update_allocation,
};
pub use amount::{InvoiceAmountInput, amount_for_records, compute_invoice_amount};
pub use status::{BulkPaymentSummary, InvoiceAction, check_invariants, pay_all, transition};

use bigdecimal::BigDecimal;
use thiserror::Error;

use crate::models::ApprovalStatus;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvoiceError {
    #[error("Invoice {id} cannot be {action} while {status}")]
    InvalidTransition {
        id: String,
        action: InvoiceAction,
        status: ApprovalStatus,
    },

    #[error("Final amount cannot be negative ({})", money::format_amount(.0))]
    NegativeFinal(BigDecimal),

    #[error("{field} cannot be negative")]
    NegativeInput { field: &'static str },

    #[error("Invoice {id} is marked paid but its payment is outstanding")]
    PaymentMismatch { id: String },

    #[error("No uninvoiced work records for worker {worker_id} in the selected period")]
    NoWorkRecords { worker_id: String },

    #[error("No invoices selected")]
    EmptySelection,
}
