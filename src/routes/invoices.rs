use actix_web::web;

use crate::handlers::{invoices, records};
use crate::models::Invoice;

/// Invoices are created through validated endpoints and change status only
/// through the workflow actions, so there is no generic PUT. Deleting one
/// releases the work records it billed.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/invoices")
            .route("", web::get().to(records::list::<Invoice>))
            .route("", web::post().to(invoices::create_invoice))
            .route("/compute", web::post().to(invoices::compute_amount))
            .route("/generate", web::post().to(invoices::generate_invoice))
            .route(
                "/bulk-payment/summary",
                web::post().to(invoices::bulk_payment_summary),
            )
            .route("/bulk-payment", web::post().to(invoices::bulk_pay))
            .route("/{id}", web::get().to(records::get::<Invoice>))
            .route("/{id}", web::delete().to(invoices::delete_invoice))
            .route("/{id}/approve", web::post().to(invoices::approve_invoice))
            .route("/{id}/reject", web::post().to(invoices::reject_invoice))
            .route("/{id}/pay", web::post().to(invoices::pay_invoice))
            .route("/{id}/divide", web::post().to(invoices::divide_invoice)),
    );
}
