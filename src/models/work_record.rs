use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{Reference, wire};

/// A logged day of work. Becomes read-only once `invoice_id` is stamped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkRecord {
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
    #[serde(default, deserialize_with = "wire::decimal_or_zero")]
    pub regular_hours: BigDecimal,
    #[serde(default, deserialize_with = "wire::decimal_or_zero")]
    pub overtime_hours: BigDecimal,
    #[serde(default, deserialize_with = "wire::decimal_or_zero")]
    pub daily_rate: BigDecimal,
    #[serde(default, deserialize_with = "wire::decimal_or_zero")]
    pub overtime_rate: BigDecimal,
    #[serde(default, deserialize_with = "wire::decimal_or_zero")]
    pub manual_adjustment: BigDecimal,
    /// Serialized as `null` when cleared so a merging backend drops the stamp.
    #[serde(default, deserialize_with = "wire::optional_id")]
    pub invoice_id: Option<String>,
}

impl WorkRecord {
    pub fn is_invoiced(&self) -> bool {
        self.invoice_id.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn writes_foreign_keys_as_ids() {
        let record: WorkRecord = serde_json::from_value(json!({
            "_id": 12,
            "worker": { "_id": "w-1", "name": "Dana Reyes" },
            "project": "p-1",
            "date": "2024-05-02",
            "dailyRate": "100"
        }))
        .unwrap();

        let written = serde_json::to_value(&record).unwrap();
        assert_eq!(written["id"], json!("12"));
        assert_eq!(written["workerId"], json!("w-1"));
        assert_eq!(written["projectId"], json!("p-1"));
        assert!(written["invoiceId"].is_null());
        assert!(written.get("worker").is_none());
    }
}
