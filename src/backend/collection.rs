use serde::{Deserialize, Serialize};

/// Remote collections exposed by the system of record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Collection {
    Workers,
    Projects,
    Specializations,
    Tasks,
    Shifts,
    WorkRecords,
    Invoices,
}

impl Collection {
    /// URL path segment, both on the backend and on our own API.
    pub fn path(&self) -> &'static str {
        match self {
            Collection::Workers => "workers",
            Collection::Projects => "projects",
            Collection::Specializations => "specializations",
            Collection::Tasks => "tasks",
            Collection::Shifts => "shifts",
            Collection::WorkRecords => "work-records",
            Collection::Invoices => "invoices",
        }
    }
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path())
    }
}
