use actix_web::{HttpResponse, Result, web};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::handlers::shared::ApiResponse;
use crate::invoice::{self, AllocationSplit, InvoiceAction, InvoiceAmountInput};
use crate::models::InvoiceAmount;
use crate::services::AppContext;
use crate::services::invoicing::{self, CreateInvoiceRequest, GenerateInvoiceRequest};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceSelection {
    pub invoice_ids: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DivideInvoiceRequest {
    pub allocations: Vec<AllocationSplit>,
}

/// Exact breakdown plus the cent-rounded copy the form displays.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AmountPreview {
    pub amount: InvoiceAmount,
    pub display: InvoiceAmount,
}

/// Live recomputation while the invoice form is edited. Nothing is stored.
pub async fn compute_amount(input: web::Json<InvoiceAmountInput>) -> Result<HttpResponse> {
    let input = input.into_inner();
    input.validate().map_err(AppError::from)?;

    let amount = invoice::compute_invoice_amount(&input);
    Ok(ApiResponse::ok(AmountPreview {
        display: amount.rounded(),
        amount,
    }))
}

pub async fn create_invoice(
    ctx: web::Data<AppContext>,
    request: web::Json<CreateInvoiceRequest>,
) -> Result<HttpResponse> {
    let created = invoicing::create_invoice(&ctx, request.into_inner()).await?;
    Ok(ApiResponse::created(created))
}

pub async fn generate_invoice(
    ctx: web::Data<AppContext>,
    request: web::Json<GenerateInvoiceRequest>,
) -> Result<HttpResponse> {
    let today = Utc::now().date_naive();
    let created = invoicing::generate_invoice(&ctx, request.into_inner(), today).await?;
    Ok(ApiResponse::created(created))
}

pub async fn delete_invoice(
    ctx: web::Data<AppContext>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let id = path.into_inner();
    invoicing::delete_invoice(&ctx, &id).await?;
    let message = format!("Invoice {} deleted", id);
    Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_with_message(None, &message)))
}

async fn apply(ctx: &AppContext, id: &str, action: InvoiceAction) -> Result<HttpResponse> {
    let updated = invoicing::apply_action(ctx, id, action).await?;
    Ok(ApiResponse::ok(updated))
}

pub async fn approve_invoice(
    ctx: web::Data<AppContext>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    apply(&ctx, &path, InvoiceAction::Approve).await
}

pub async fn reject_invoice(
    ctx: web::Data<AppContext>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    apply(&ctx, &path, InvoiceAction::Reject).await
}

pub async fn pay_invoice(ctx: web::Data<AppContext>, path: web::Path<String>) -> Result<HttpResponse> {
    apply(&ctx, &path, InvoiceAction::Pay).await
}

pub async fn bulk_payment_summary(
    ctx: web::Data<AppContext>,
    selection: web::Json<InvoiceSelection>,
) -> Result<HttpResponse> {
    let summary = invoicing::bulk_payment_summary(&ctx, &selection.invoice_ids).await?;
    Ok(ApiResponse::ok(summary))
}

pub async fn bulk_pay(
    ctx: web::Data<AppContext>,
    selection: web::Json<InvoiceSelection>,
) -> Result<HttpResponse> {
    let result = invoicing::bulk_pay(&ctx, &selection.invoice_ids).await?;
    Ok(ApiResponse::ok(result))
}

pub async fn divide_invoice(
    ctx: web::Data<AppContext>,
    path: web::Path<String>,
    request: web::Json<DivideInvoiceRequest>,
) -> Result<HttpResponse> {
    let updated =
        invoicing::divide_invoice(&ctx, &path, request.into_inner().allocations).await?;
    Ok(ApiResponse::ok(updated))
}
