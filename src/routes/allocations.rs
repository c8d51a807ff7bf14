use actix_web::web;

use crate::handlers::allocations;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/allocations")
            .route("/update", web::post().to(allocations::update_allocation))
            .route("/rows", web::post().to(allocations::edit_rows)),
    );
}
