use actix_web::web;

use crate::database::DataStore;
use crate::handlers::schedules;

pub fn configure<S: DataStore>(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/schedules").route("", web::get().to(schedules::get_schedules::<S>)));
}
