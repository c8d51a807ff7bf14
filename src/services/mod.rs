pub mod context;
pub mod invoicing;
pub mod stats;

pub use context::AppContext;
