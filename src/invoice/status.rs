use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

use crate::models::{ApprovalStatus, Invoice, PaymentStatus};

use super::{InvoiceError, money};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InvoiceAction {
    Approve,
    Reject,
    Pay,
}

impl std::fmt::Display for InvoiceAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvoiceAction::Approve => write!(f, "approved"),
            InvoiceAction::Reject => write!(f, "rejected"),
            InvoiceAction::Pay => write!(f, "paid"),
        }
    }
}

/// Statuses after applying `action`, or why it is not allowed.
///
/// Pending → Approved | Rejected, Approved → Paid. Paying also flips the
/// payment status so that `Paid` approval always implies a paid invoice.
pub fn next_status(
    invoice: &Invoice,
    action: InvoiceAction,
) -> Result<(ApprovalStatus, PaymentStatus), InvoiceError> {
    use ApprovalStatus::*;

    match (invoice.approval_status, action) {
        (Pending, InvoiceAction::Approve) => Ok((Approved, invoice.payment_status)),
        (Pending, InvoiceAction::Reject) => Ok((Rejected, invoice.payment_status)),
        (Approved, InvoiceAction::Pay) => Ok((Paid, PaymentStatus::Paid)),
        (status, action) => Err(InvoiceError::InvalidTransition {
            id: invoice.id.clone(),
            action,
            status,
        }),
    }
}

/// Apply `action` to a copy of the invoice.
pub fn transition(invoice: &Invoice, action: InvoiceAction) -> Result<Invoice, InvoiceError> {
    let (approval_status, payment_status) = next_status(invoice, action)?;
    let updated = Invoice {
        approval_status,
        payment_status,
        ..invoice.clone()
    };
    check_invariants(&updated)?;
    Ok(updated)
}

pub fn check_invariants(invoice: &Invoice) -> Result<(), InvoiceError> {
    invoice.amount.ensure_payable()?;
    if invoice.approval_status == ApprovalStatus::Paid
        && invoice.payment_status != PaymentStatus::Paid
    {
        return Err(InvoiceError::PaymentMismatch {
            id: invoice.id.clone(),
        });
    }
    Ok(())
}

/// Totals shown before a batch of invoices is paid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkPaymentSummary {
    pub invoice_ids: Vec<String>,
    pub count: usize,
    pub total: BigDecimal,
    pub total_display: String,
    /// Selected invoices that are not currently approved
    pub blocked: Vec<String>,
}

impl BulkPaymentSummary {
    pub fn for_invoices(invoices: &[Invoice]) -> Self {
        let total = money::sum(invoices.iter().map(|i| &i.amount.final_amount));
        Self {
            invoice_ids: invoices.iter().map(|i| i.id.clone()).collect(),
            count: invoices.len(),
            total_display: money::format_amount(&total),
            total,
            blocked: invoices
                .iter()
                .filter(|i| i.approval_status != ApprovalStatus::Approved)
                .map(|i| i.id.clone())
                .collect(),
        }
    }

    pub fn is_payable(&self) -> bool {
        self.count > 0 && self.blocked.is_empty()
    }
}

/// Every invoice paid, or the first reason the batch cannot be paid. Nothing
/// is changed unless the whole batch can move to `Paid`.
pub fn pay_all(invoices: &[Invoice]) -> Result<Vec<Invoice>, InvoiceError> {
    if invoices.is_empty() {
        return Err(InvoiceError::EmptySelection);
    }
    invoices
        .iter()
        .map(|invoice| transition(invoice, InvoiceAction::Pay))
        .collect()
}
