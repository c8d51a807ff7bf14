use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::invoice::{
    self, AllocationEditor, AllocationSplit, BulkPaymentSummary, InvoiceAction, InvoiceAmountInput,
    InvoiceError,
};
use crate::models::{
    ApprovalStatus, Invoice, NewInvoice, PaymentStatus, Record, Reference, WorkRecord, Worker,
    wire,
};

use super::AppContext;

/// Manually staged invoice, amount computed here rather than trusted from the client
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateInvoiceRequest {
    #[serde(alias = "workerId")]
    pub worker: Reference,
    #[serde(default, alias = "projectId")]
    pub project: Option<Reference>,
    #[serde(deserialize_with = "wire::date")]
    pub date: NaiveDate,
    #[serde(flatten)]
    pub amount: InvoiceAmountInput,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateInvoiceRequest {
    #[serde(deserialize_with = "wire::id")]
    pub worker_id: String,
    #[serde(default, deserialize_with = "wire::optional_date")]
    pub from: Option<NaiveDate>,
    #[serde(default, deserialize_with = "wire::optional_date")]
    pub to: Option<NaiveDate>,
    /// Extra adjustment on top of the records' own manual adjustments
    #[serde(default, deserialize_with = "wire::optional_decimal")]
    pub adjust: Option<BigDecimal>,
    #[serde(default, deserialize_with = "wire::optional_date")]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkPaymentResult {
    pub summary: BulkPaymentSummary,
    pub invoices: Vec<Invoice>,
}

pub async fn create_invoice(ctx: &AppContext, request: CreateInvoiceRequest) -> AppResult<Invoice> {
    request.amount.validate()?;
    let amount = invoice::compute_invoice_amount(&request.amount);
    amount.ensure_payable()?;

    let staged = NewInvoice {
        worker: request.worker,
        project: request.project,
        date: request.date,
        amount,
        approval_status: ApprovalStatus::Pending,
        payment_status: PaymentStatus::Unpaid,
        work_record_ids: Vec::new(),
        notes: request.notes,
    };
    let created: Invoice = ctx.create_from(&staged).await?;
    log::info!(
        "Created invoice {} for worker {} ({})",
        created.id,
        created.worker.id,
        invoice::money::format_amount(&created.amount.final_amount)
    );
    Ok(created)
}

/// Bill every un-invoiced work record of a worker within the period, then
/// stamp the records so they become read-only.
pub async fn generate_invoice(
    ctx: &AppContext,
    request: GenerateInvoiceRequest,
    today: NaiveDate,
) -> AppResult<Invoice> {
    if let (Some(from), Some(to)) = (request.from, request.to) {
        if from > to {
            return Err(AppError::validation("The period start must not be after its end"));
        }
    }

    let records: Vec<WorkRecord> = ctx
        .list::<WorkRecord>()
        .await?
        .into_iter()
        .filter(|r| r.worker.id == request.worker_id && !r.is_invoiced())
        .filter(|r| request.from.is_none_or(|from| r.date >= from))
        .filter(|r| request.to.is_none_or(|to| r.date <= to))
        .collect();

    if records.is_empty() {
        return Err(InvoiceError::NoWorkRecords {
            worker_id: request.worker_id,
        }
        .into());
    }

    let mut amount = invoice::amount_for_records(&records);
    if let Some(extra) = &request.adjust {
        amount = amount.adjusted_by(extra);
    }
    amount.ensure_payable()?;

    // Denormalize the worker's name when the backend knows it
    let worker = match ctx.get::<Worker>(&request.worker_id).await {
        Ok(worker) => Reference::named(worker.id, worker.name),
        Err(AppError::NotFound(_)) => Reference::new(request.worker_id.clone()),
        Err(e) => return Err(e),
    };

    let project = single_project(&records);
    let staged = NewInvoice {
        worker,
        project,
        date: request.date.unwrap_or(today),
        amount,
        approval_status: ApprovalStatus::Pending,
        payment_status: PaymentStatus::Unpaid,
        work_record_ids: records.iter().map(|r| r.id.clone()).collect(),
        notes: request.notes,
    };
    let created: Invoice = ctx.create_from(&staged).await?;

    let stamped: Vec<WorkRecord> = records
        .iter()
        .map(|record| WorkRecord {
            invoice_id: Some(created.id.clone()),
            ..record.clone()
        })
        .collect();
    if let Err(e) = save_all(ctx, &stamped, &records).await {
        log::error!(
            "Work records could not be marked as billed on invoice {}; removing it: {}",
            created.id,
            e
        );
        if let Err(cleanup) = ctx.delete::<Invoice>(&created.id).await {
            log::error!("Could not remove invoice {}: {}", created.id, cleanup);
        }
        return Err(e);
    }

    log::info!(
        "Generated invoice {} from {} work records",
        created.id,
        created.work_record_ids.len()
    );
    Ok(created)
}

/// Write `updated` one record at a time. If a write fails, the records
/// already written are put back to their `originals` and the error returned.
async fn save_all<T: Record>(
    ctx: &AppContext,
    updated: &[T],
    originals: &[T],
) -> AppResult<Vec<T>> {
    let mut saved = Vec::with_capacity(updated.len());
    for record in updated {
        match ctx.save(record).await {
            Ok(record) => saved.push(record),
            Err(e) => {
                restore(ctx, &originals[..saved.len()]).await;
                return Err(e);
            }
        }
    }
    Ok(saved)
}

async fn restore<T: Record>(ctx: &AppContext, originals: &[T]) {
    for original in originals {
        if let Err(e) = ctx.save(original).await {
            log::error!(
                "Could not restore {} {}: {}",
                T::COLLECTION,
                original.id(),
                e
            );
        }
    }
}

/// Delete an unpaid invoice and release its work records so they can be
/// edited and billed again.
pub async fn delete_invoice(ctx: &AppContext, id: &str) -> AppResult<()> {
    let current = ctx.get::<Invoice>(id).await?;
    if let Some(reason) = current.locked_reason() {
        return Err(AppError::Conflict(reason));
    }

    let billed: Vec<WorkRecord> = ctx
        .list::<WorkRecord>()
        .await?
        .into_iter()
        .filter(|r| r.invoice_id.as_deref() == Some(id))
        .collect();
    let released: Vec<WorkRecord> = billed
        .iter()
        .map(|record| WorkRecord {
            invoice_id: None,
            ..record.clone()
        })
        .collect();
    save_all(ctx, &released, &billed).await?;

    if let Err(e) = ctx.delete::<Invoice>(id).await {
        restore(ctx, &billed).await;
        return Err(e);
    }
    log::info!("Deleted invoice {} and released {} work records", id, billed.len());
    Ok(())
}

/// The common project when every record belongs to the same one.
fn single_project(records: &[WorkRecord]) -> Option<Reference> {
    let first = records.first()?.project.clone()?;
    records
        .iter()
        .all(|r| r.project.as_ref().is_some_and(|p| p.id == first.id))
        .then_some(first)
}

pub async fn apply_action(ctx: &AppContext, id: &str, action: InvoiceAction) -> AppResult<Invoice> {
    let current = ctx.get::<Invoice>(id).await?;
    let updated = invoice::transition(&current, action)?;
    let saved = ctx.save(&updated).await?;
    log::info!("Invoice {} {}", saved.id, action);
    Ok(saved)
}

async fn load_selection(ctx: &AppContext, ids: &[String]) -> AppResult<Vec<Invoice>> {
    if ids.is_empty() {
        return Err(InvoiceError::EmptySelection.into());
    }
    let all = ctx.list::<Invoice>().await?;
    ids.iter()
        .map(|id| {
            all.iter()
                .find(|invoice| &invoice.id == id)
                .cloned()
                .ok_or_else(|| AppError::NotFound(format!("Invoice {} not found", id)))
        })
        .collect()
}

pub async fn bulk_payment_summary(ctx: &AppContext, ids: &[String]) -> AppResult<BulkPaymentSummary> {
    let selection = load_selection(ctx, ids).await?;
    Ok(BulkPaymentSummary::for_invoices(&selection))
}

/// Pay a batch. Every invoice must be approved; otherwise nothing is written.
pub async fn bulk_pay(ctx: &AppContext, ids: &[String]) -> AppResult<BulkPaymentResult> {
    let selection = load_selection(ctx, ids).await?;
    let summary = BulkPaymentSummary::for_invoices(&selection);
    if !summary.is_payable() {
        return Err(AppError::Conflict(format!(
            "Only approved invoices can be paid; not approved: {}",
            summary.blocked.join(", ")
        )));
    }

    let paid = invoice::pay_all(&selection)?;
    let saved = save_all(ctx, &paid, &selection).await?;

    log::info!(
        "Paid {} invoices totalling {}",
        summary.count,
        summary.total_display
    );
    Ok(BulkPaymentResult {
        summary,
        invoices: saved,
    })
}

/// Store a balanced project split on the invoice.
pub async fn divide_invoice(
    ctx: &AppContext,
    id: &str,
    rows: Vec<AllocationSplit>,
) -> AppResult<Invoice> {
    let current = ctx.get::<Invoice>(id).await?;
    if let Some(reason) = current.locked_reason() {
        return Err(AppError::Conflict(reason));
    }

    let editor = AllocationEditor::from_rows(current.amount.final_amount.clone(), rows);
    let allocations = editor.submit()?;

    let updated = Invoice {
        allocations,
        ..current
    };
    ctx.save(&updated).await
}
