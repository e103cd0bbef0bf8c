use actix_web::web;

use crate::database::DataStore;
use crate::handlers::onboarding;

pub fn configure<S: DataStore>(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/onboarding")
            .route("", web::post().to(onboarding::create_onboarding::<S>))
            .route("", web::get().to(onboarding::get_onboardings::<S>))
            .route("/{id}", web::get().to(onboarding::get_onboarding::<S>))
            .route(
                "/{id}/tasks/{task_id}/advance",
                web::post().to(onboarding::advance_task::<S>),
            ),
    );
}
