use actix_web::web;

pub mod allocations;
pub mod invoices;
pub mod records;
pub mod stats;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(invoices::configure)
            .configure(allocations::configure)
            .configure(stats::configure)
            .configure(records::configure),
    );
}
