use actix_web::web;

use crate::database::DataStore;
use crate::handlers::attendance;

pub fn configure<S: DataStore>(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/attendance")
            .route("/report", web::get().to(attendance::get_report::<S>))
            .route("/records", web::get().to(attendance::get_records::<S>)),
    );
}
