use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::macros::string_enum;
use super::wire;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    #[serde(alias = "_id", deserialize_with = "wire::id")]
    pub id: String,
    #[serde(alias = "title")]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub client: Option<String>,
    #[serde(default)]
    pub status: ProjectStatus,
    #[serde(default, deserialize_with = "wire::optional_date")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "wire::optional_datetime")]
    pub deadline: Option<DateTime<Utc>>,
}

string_enum! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub enum ProjectStatus {
        #[default]
        Planned => "planned",
        Active => "active",
        OnHold => "on_hold",
        Completed => "completed",
    }
}
