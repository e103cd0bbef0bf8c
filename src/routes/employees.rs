use actix_web::web;

use crate::database::DataStore;
use crate::handlers::employees;

pub fn configure<S: DataStore>(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/employees")
            .route("", web::get().to(employees::get_employees::<S>))
            .route("/{id}", web::get().to(employees::get_employee::<S>)),
    );
}
