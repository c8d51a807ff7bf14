use chrono::{DateTime, NaiveDate, Utc};

use crate::models::{Invoice, Project, Reference, Shift, Specialization, Task, WorkRecord, Worker};

/// Foreign keys a listing can be narrowed by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceKind {
    Project,
    Specialization,
    Worker,
}

/// What the filter engine needs to know about a record.
///
/// Every accessor has a "field is missing" answer; missing fields simply make
/// the corresponding criterion fail for that record.
pub trait Filterable {
    fn status(&self) -> Option<&str> {
        None
    }

    /// Every label `status` criteria are compared with.
    fn status_labels(&self) -> Vec<&str> {
        self.status().into_iter().collect()
    }

    fn deadline(&self) -> Option<DateTime<Utc>> {
        None
    }

    /// Date the `from`/`to` range is tested against.
    fn primary_date(&self) -> Option<NaiveDate> {
        None
    }

    /// Fields the free-text search looks into.
    fn search_fields(&self) -> Vec<&str>;

    fn references(&self, _kind: ReferenceKind) -> Vec<&Reference> {
        Vec::new()
    }
}

fn reference_names(references: &[Reference]) -> impl Iterator<Item = &str> {
    references.iter().filter_map(|r| r.name.as_deref())
}

impl Filterable for Task {
    fn status(&self) -> Option<&str> {
        Some(self.status.as_str())
    }

    fn deadline(&self) -> Option<DateTime<Utc>> {
        self.deadline
    }

    fn primary_date(&self) -> Option<NaiveDate> {
        self.deadline.map(|deadline| deadline.date_naive())
    }

    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.id.as_str(), self.name.as_str()];
        fields.extend(self.description.as_deref());
        fields.extend(self.project.as_ref().and_then(|p| p.name.as_deref()));
        fields.extend(reference_names(&self.workers));
        fields.extend(self.subtasks.iter().map(|s| s.name.as_str()));
        fields
    }

    fn references(&self, kind: ReferenceKind) -> Vec<&Reference> {
        match kind {
            ReferenceKind::Project => self.project.iter().collect(),
            ReferenceKind::Worker => self.workers.iter().collect(),
            ReferenceKind::Specialization => Vec::new(),
        }
    }
}

impl Filterable for Worker {
    fn status(&self) -> Option<&str> {
        Some(self.status.as_str())
    }

    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.id.as_str(), self.name.as_str()];
        fields.extend(self.email.as_deref());
        fields.extend(self.phone.as_deref());
        fields.extend(self.specialization.as_ref().and_then(|s| s.name.as_deref()));
        fields
    }

    fn references(&self, kind: ReferenceKind) -> Vec<&Reference> {
        match kind {
            ReferenceKind::Specialization => self.specialization.iter().collect(),
            _ => Vec::new(),
        }
    }
}

impl Filterable for Project {
    fn status(&self) -> Option<&str> {
        Some(self.status.as_str())
    }

    fn deadline(&self) -> Option<DateTime<Utc>> {
        self.deadline
    }

    fn primary_date(&self) -> Option<NaiveDate> {
        self.start_date
    }

    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.id.as_str(), self.name.as_str()];
        fields.extend(self.description.as_deref());
        fields.extend(self.client.as_deref());
        fields
    }
}

impl Filterable for Specialization {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.id.as_str(), self.name.as_str()];
        fields.extend(self.description.as_deref());
        fields
    }
}

impl Filterable for Shift {
    fn status(&self) -> Option<&str> {
        Some(self.status.as_str())
    }

    fn primary_date(&self) -> Option<NaiveDate> {
        Some(self.date)
    }

    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.id.as_str()];
        fields.extend(self.notes.as_deref());
        fields.extend(self.worker.as_ref().and_then(|w| w.name.as_deref()));
        fields.extend(self.project.as_ref().and_then(|p| p.name.as_deref()));
        fields
    }

    fn references(&self, kind: ReferenceKind) -> Vec<&Reference> {
        match kind {
            ReferenceKind::Project => self.project.iter().collect(),
            ReferenceKind::Worker => self.worker.iter().collect(),
            ReferenceKind::Specialization => Vec::new(),
        }
    }
}

impl Filterable for WorkRecord {
    fn primary_date(&self) -> Option<NaiveDate> {
        Some(self.date)
    }

    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.id.as_str()];
        fields.extend(self.worker.name.as_deref());
        fields.extend(self.project.as_ref().and_then(|p| p.name.as_deref()));
        fields
    }

    fn references(&self, kind: ReferenceKind) -> Vec<&Reference> {
        match kind {
            ReferenceKind::Project => self.project.iter().collect(),
            ReferenceKind::Worker => vec![&self.worker],
            ReferenceKind::Specialization => Vec::new(),
        }
    }
}

impl Filterable for Invoice {
    fn status(&self) -> Option<&str> {
        Some(self.approval_status.as_str())
    }

    /// Approval and payment both count, so `unpaid` finds open invoices.
    fn status_labels(&self) -> Vec<&str> {
        vec![self.approval_status.as_str(), self.payment_status.as_str()]
    }

    fn primary_date(&self) -> Option<NaiveDate> {
        Some(self.date)
    }

    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.id.as_str()];
        fields.extend(self.worker.name.as_deref());
        fields.extend(self.project.as_ref().and_then(|p| p.name.as_deref()));
        fields.extend(self.notes.as_deref());
        fields
    }

    fn references(&self, kind: ReferenceKind) -> Vec<&Reference> {
        match kind {
            ReferenceKind::Project => self
                .project
                .iter()
                .chain(self.allocations.iter().map(|a| &a.project))
                .collect(),
            ReferenceKind::Worker => vec![&self.worker],
            ReferenceKind::Specialization => Vec::new(),
        }
    }
}
