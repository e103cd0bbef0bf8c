use actix_web::web;

use crate::database::DataStore;
use crate::handlers::payroll;

pub fn configure<S: DataStore>(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/payroll")
            .route("/line-items", web::get().to(payroll::get_line_items::<S>))
            .route("/line-items", web::post().to(payroll::create_line_item::<S>))
            .route(
                "/line-items/{id}",
                web::delete().to(payroll::delete_line_item::<S>),
            )
            .route("/summary", web::get().to(payroll::get_summary::<S>)),
    );
}
