use actix_web::web;

use crate::database::DataStore;
use crate::handlers::health;

pub mod attendance;
pub mod employees;
pub mod onboarding;
pub mod payroll;
pub mod schedules;
pub mod time_off;

/// Mounts the whole API for one data-store backend. The matching
/// services must be registered as app data.
pub fn configure<S: DataStore>(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health::health)).service(
        web::scope("/api/v1")
            .configure(attendance::configure::<S>)
            .configure(payroll::configure::<S>)
            .configure(time_off::configure::<S>)
            .configure(onboarding::configure::<S>)
            .configure(employees::configure::<S>)
            .configure(schedules::configure::<S>),
    );
}
