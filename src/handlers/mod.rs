pub mod allocations;
pub mod invoices;
pub mod records;
pub mod shared;
pub mod stats;
