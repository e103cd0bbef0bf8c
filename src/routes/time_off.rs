use actix_web::web;

use crate::database::DataStore;
use crate::handlers::time_off;

pub fn configure<S: DataStore>(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/time-off")
            .route("", web::post().to(time_off::create_time_off_request::<S>))
            .route("", web::get().to(time_off::get_time_off_requests::<S>))
            .route("/{id}", web::get().to(time_off::get_time_off_request::<S>))
            .route(
                "/{id}/approve",
                web::post().to(time_off::approve_time_off_request::<S>),
            )
            .route(
                "/{id}/reject",
                web::post().to(time_off::reject_time_off_request::<S>),
            )
            .route(
                "/{id}/cancel",
                web::post().to(time_off::cancel_time_off_request::<S>),
            ),
    );
}
