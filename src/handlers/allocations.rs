use actix_web::{HttpResponse, Result, web};
use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::handlers::shared::ApiResponse;
use crate::invoice::{AllocationEditor, AllocationField, AllocationSplit, money};
use crate::models::wire;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAllocationRequest {
    #[serde(deserialize_with = "wire::decimal_or_zero")]
    pub total: BigDecimal,
    #[serde(default)]
    pub rows: Vec<AllocationSplit>,
    pub index: usize,
    pub field: AllocationField,
    #[serde(deserialize_with = "wire::decimal_or_zero")]
    pub value: BigDecimal,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RowAction {
    Add,
    Remove,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationRowsRequest {
    #[serde(deserialize_with = "wire::decimal_or_zero")]
    pub total: BigDecimal,
    #[serde(default)]
    pub rows: Vec<AllocationSplit>,
    pub action: RowAction,
    #[serde(default)]
    pub index: Option<usize>,
}

/// Editor state after an edit. Values are exact; `*_display` fields are the
/// same numbers rounded to cents.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationState {
    pub total: BigDecimal,
    pub rows: Vec<AllocationSplit>,
    pub allocated: BigDecimal,
    pub remaining: BigDecimal,
    pub balanced: bool,
    pub allocated_display: String,
    pub remaining_display: String,
}

impl From<AllocationEditor> for AllocationState {
    fn from(editor: AllocationEditor) -> Self {
        let allocated = editor.allocated();
        let remaining = editor.remaining();
        Self {
            balanced: editor.is_balanced(),
            allocated_display: money::format_amount(&allocated),
            remaining_display: money::format_amount(&remaining),
            total: editor.total().clone(),
            rows: editor.into_rows(),
            allocated,
            remaining,
        }
    }
}

pub async fn update_allocation(request: web::Json<UpdateAllocationRequest>) -> Result<HttpResponse> {
    let request = request.into_inner();
    let mut editor = AllocationEditor::with_rows(request.total, request.rows);
    editor
        .update(request.index, request.field, request.value)
        .map_err(AppError::from)?;
    Ok(ApiResponse::ok(AllocationState::from(editor)))
}

pub async fn edit_rows(request: web::Json<AllocationRowsRequest>) -> Result<HttpResponse> {
    let request = request.into_inner();
    let mut editor = AllocationEditor::with_rows(request.total, request.rows);
    match (request.action, request.index) {
        (RowAction::Add, _) => editor.add_row(),
        (RowAction::Remove, Some(index)) => {
            editor.remove_row(index).map_err(AppError::from)?;
        }
        (RowAction::Remove, None) => {
            return Err(AppError::BadRequest("index is required to remove a row".to_string()).into());
        }
    }
    Ok(ApiResponse::ok(AllocationState::from(editor)))
}
