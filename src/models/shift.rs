use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use super::macros::string_enum;
use super::{Reference, wire};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shift {
    #[serde(alias = "_id", deserialize_with = "wire::id")]
    pub id: String,
    #[serde(default, alias = "workerId")]
    pub worker: Option<Reference>,
    #[serde(default, alias = "projectId")]
    pub project: Option<Reference>,
    #[serde(deserialize_with = "wire::date")]
    pub date: NaiveDate,
    #[serde(default)]
    pub start_time: Option<NaiveTime>,
    #[serde(default)]
    pub end_time: Option<NaiveTime>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub status: ShiftStatus,
}

string_enum! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub enum ShiftStatus {
        #[default]
        Scheduled => "scheduled",
        Completed => "completed",
        Cancelled => "cancelled",
    }
}
