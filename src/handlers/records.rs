//! CRUD passthrough shared by every record collection. Each handler is
//! instantiated per record type when routes are registered, e.g. `list::<Task>`.

use actix_web::{HttpResponse, Result, web};
use serde_json::Value;

use crate::error::AppError;
use crate::filter::{FilterCriteria, filter_records};
use crate::handlers::shared::ApiResponse;
use crate::models::Record;
use crate::services::AppContext;

pub async fn list<T: Record>(
    ctx: web::Data<AppContext>,
    criteria: web::Query<FilterCriteria>,
) -> Result<HttpResponse> {
    let records = ctx.list::<T>().await?;
    let criteria = criteria.into_inner();
    let total = records.len();
    let filtered = filter_records(records, &criteria);

    log::debug!(
        "Listed {}: {} of {} records match",
        T::COLLECTION,
        filtered.len(),
        total
    );
    Ok(ApiResponse::ok(filtered))
}

pub async fn get<T: Record>(ctx: web::Data<AppContext>, path: web::Path<String>) -> Result<HttpResponse> {
    let record = ctx.get::<T>(&path).await?;
    Ok(ApiResponse::ok(record))
}

pub async fn create<T: Record>(
    ctx: web::Data<AppContext>,
    payload: web::Json<Value>,
) -> Result<HttpResponse> {
    let created = ctx.create::<T>(&payload).await?;
    log::info!("Created {} {}", T::COLLECTION, created.id());
    Ok(ApiResponse::created(created))
}

/// Refuses to touch a record that is frozen (billed work, paid invoices).
async fn ensure_editable<T: Record>(ctx: &AppContext, id: &str) -> Result<(), AppError> {
    let current = ctx.get::<T>(id).await?;
    match current.locked_reason() {
        Some(reason) => Err(AppError::Conflict(reason)),
        None => Ok(()),
    }
}

pub async fn update<T: Record>(
    ctx: web::Data<AppContext>,
    path: web::Path<String>,
    payload: web::Json<Value>,
) -> Result<HttpResponse> {
    let id = path.into_inner();
    ensure_editable::<T>(&ctx, &id).await?;

    let updated = ctx.update::<T>(&id, &payload).await?;
    log::info!("Updated {} {}", T::COLLECTION, id);
    Ok(ApiResponse::ok(updated))
}

pub async fn delete<T: Record>(ctx: web::Data<AppContext>, path: web::Path<String>) -> Result<HttpResponse> {
    let id = path.into_inner();
    ensure_editable::<T>(&ctx, &id).await?;

    ctx.delete::<T>(&id).await?;
    log::info!("Deleted {} {}", T::COLLECTION, id);
    let message = format!("{} {} deleted", T::COLLECTION, id);
    Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_with_message(None, &message)))
}
