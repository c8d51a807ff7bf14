pub mod backend;
pub mod config;
pub mod error;
pub mod filter;
pub mod handlers;
pub mod invoice;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

pub use config::Config;
pub use services::AppContext;
