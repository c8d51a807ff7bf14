use actix_web::web;

use crate::handlers::records;
use crate::models::{Project, Record, Shift, Specialization, Task, WorkRecord, Worker};

/// Filtered listing plus single-record passthrough for one collection.
fn collection<T: Record>() -> actix_web::Scope {
    web::scope(&format!("/{}", T::COLLECTION.path()))
        .route("", web::get().to(records::list::<T>))
        .route("", web::post().to(records::create::<T>))
        .route("/{id}", web::get().to(records::get::<T>))
        .route("/{id}", web::put().to(records::update::<T>))
        .route("/{id}", web::delete().to(records::delete::<T>))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(collection::<Worker>())
        .service(collection::<Project>())
        .service(collection::<Specialization>())
        .service(collection::<Task>())
        .service(collection::<Shift>())
        .service(collection::<WorkRecord>());
}
