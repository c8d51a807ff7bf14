use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_workers: usize,
    pub active_workers: usize,
    pub projects: ProjectStats,
    pub tasks: TaskStats,
    pub invoices: InvoiceStats,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectStats {
    pub planned: usize,
    pub active: usize,
    pub on_hold: usize,
    pub completed: usize,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskStats {
    pub open: usize,
    pub completed: usize,
    pub overdue: usize,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceStats {
    pub pending: usize,
    pub approved: usize,
    pub rejected: usize,
    pub paid: usize,
    /// Sum of final amounts of approved, not yet paid invoices
    pub unpaid_total: BigDecimal,
}
