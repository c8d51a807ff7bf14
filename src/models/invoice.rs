use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::macros::string_enum;
use super::{Reference, wire};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    #[serde(alias = "_id", deserialize_with = "wire::id")]
    pub id: String,
    #[serde(rename = "workerId", alias = "worker", serialize_with = "wire::reference_id")]
    pub worker: Reference,
    #[serde(
        rename = "projectId",
        alias = "project",
        default,
        serialize_with = "wire::optional_reference_id"
    )]
    pub project: Option<Reference>,
    #[serde(deserialize_with = "wire::date")]
    pub date: NaiveDate,
    #[serde(default)]
    pub amount: InvoiceAmount,
    #[serde(default)]
    pub approval_status: ApprovalStatus,
    #[serde(default)]
    pub payment_status: PaymentStatus,
    #[serde(default, deserialize_with = "wire::id_list")]
    pub work_record_ids: Vec<String>,
    #[serde(default)]
    pub allocations: Vec<ProjectAllocation>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Payload used to create an invoice; the backend assigns the id.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewInvoice {
    #[serde(rename = "workerId", serialize_with = "wire::reference_id")]
    pub worker: Reference,
    #[serde(
        rename = "projectId",
        skip_serializing_if = "Option::is_none",
        serialize_with = "wire::optional_reference_id"
    )]
    pub project: Option<Reference>,
    pub date: NaiveDate,
    pub amount: InvoiceAmount,
    pub approval_status: ApprovalStatus,
    pub payment_status: PaymentStatus,
    pub work_record_ids: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Amount breakdown. `final` is a keyword, hence the field rename.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceAmount {
    #[serde(default, deserialize_with = "wire::decimal_or_zero")]
    pub daily: BigDecimal,
    #[serde(default, deserialize_with = "wire::decimal_or_zero")]
    pub extra_hours: BigDecimal,
    #[serde(default, deserialize_with = "wire::decimal_or_zero")]
    pub calculated: BigDecimal,
    #[serde(default, deserialize_with = "wire::decimal_or_zero")]
    pub adjust: BigDecimal,
    #[serde(rename = "final", default, deserialize_with = "wire::decimal_or_zero")]
    pub final_amount: BigDecimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectAllocation {
    #[serde(rename = "projectId", alias = "project", serialize_with = "wire::reference_id")]
    pub project: Reference,
    #[serde(default, deserialize_with = "wire::decimal_or_zero")]
    pub amount: BigDecimal,
}

string_enum! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub enum ApprovalStatus {
        #[default]
        Pending => "pending",
        Approved => "approved",
        Rejected => "rejected",
        Paid => "paid",
    }
}

string_enum! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub enum PaymentStatus {
        Paid => "paid",
        #[default]
        Unpaid => "unpaid",
    }
}
