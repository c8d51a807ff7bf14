use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

use super::macros::string_enum;
use super::{Reference, wire};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Worker {
    #[serde(alias = "_id", deserialize_with = "wire::id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default, alias = "specializationId")]
    pub specialization: Option<Reference>,
    #[serde(default)]
    pub status: WorkerStatus,
    #[serde(default, deserialize_with = "wire::optional_decimal")]
    pub daily_rate: Option<BigDecimal>,
    #[serde(default, deserialize_with = "wire::optional_decimal")]
    pub overtime_rate: Option<BigDecimal>,
}

string_enum! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub enum WorkerStatus {
        #[default]
        Active => "active",
        Inactive => "inactive",
    }
}
