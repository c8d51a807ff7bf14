pub mod invoice;
pub(crate) mod macros;
pub mod project;
pub mod reference;
pub mod shift;
pub mod specialization;
pub mod stats;
pub mod task;
pub(crate) mod wire;
pub mod work_record;
pub mod worker;

// Re-export all models for easy importing
pub use invoice::*;
pub use project::*;
pub use reference::*;
pub use shift::*;
pub use specialization::*;
pub use stats::*;
pub use task::*;
pub use work_record::*;
pub use worker::*;

use serde::{Serialize, de::DeserializeOwned};

use crate::backend::Collection;
use crate::filter::Filterable;

/// A record type owned by the backend and listed by the dashboard.
pub trait Record: Serialize + DeserializeOwned + Filterable + Clone + Send + Sync + 'static {
    const COLLECTION: Collection;

    fn id(&self) -> &str;

    /// Why the record may no longer be changed, if it is frozen.
    fn locked_reason(&self) -> Option<String> {
        None
    }
}

impl Record for Worker {
    const COLLECTION: Collection = Collection::Workers;

    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for Project {
    const COLLECTION: Collection = Collection::Projects;

    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for Specialization {
    const COLLECTION: Collection = Collection::Specializations;

    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for Task {
    const COLLECTION: Collection = Collection::Tasks;

    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for Shift {
    const COLLECTION: Collection = Collection::Shifts;

    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for WorkRecord {
    const COLLECTION: Collection = Collection::WorkRecords;

    fn id(&self) -> &str {
        &self.id
    }

    fn locked_reason(&self) -> Option<String> {
        self.invoice_id
            .as_ref()
            .map(|invoice_id| format!("Work record is already billed on invoice {}", invoice_id))
    }
}

impl Record for Invoice {
    const COLLECTION: Collection = Collection::Invoices;

    fn id(&self) -> &str {
        &self.id
    }

    fn locked_reason(&self) -> Option<String> {
        (self.approval_status == ApprovalStatus::Paid).then(|| "Invoice is already paid".to_string())
    }
}
