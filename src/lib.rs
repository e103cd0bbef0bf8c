use actix_web::web;

pub mod config;
pub mod database;
pub mod error;
pub mod format;
pub mod handlers;
pub mod reporting;
pub mod routes;
pub mod seed;
pub mod services;

pub use config::Config;
pub use error::AppError;

use database::DataStore;
use services::{
    AttendanceReportService, DirectoryService, OnboardingService, PayrollService,
    ScheduleService, TimeOffService,
};

/// Every service, built over one shared store handle.
pub struct AppState<S: DataStore> {
    pub attendance: web::Data<AttendanceReportService<S>>,
    pub payroll: web::Data<PayrollService<S>>,
    pub time_off: web::Data<TimeOffService<S>>,
    pub onboarding: web::Data<OnboardingService<S>>,
    pub directory: web::Data<DirectoryService<S>>,
    pub schedules: web::Data<ScheduleService<S>>,
}

impl<S: DataStore> AppState<S> {
    pub fn new(store: S) -> Self {
        Self {
            attendance: web::Data::new(AttendanceReportService::new(store.clone())),
            payroll: web::Data::new(PayrollService::new(store.clone())),
            time_off: web::Data::new(TimeOffService::new(store.clone())),
            onboarding: web::Data::new(OnboardingService::new(store.clone())),
            directory: web::Data::new(DirectoryService::new(store.clone())),
            schedules: web::Data::new(ScheduleService::new(store)),
        }
    }

    /// Registers the services and mounts the routes that use them.
    pub fn configure(&self, cfg: &mut web::ServiceConfig) {
        cfg.app_data(self.attendance.clone())
            .app_data(self.payroll.clone())
            .app_data(self.time_off.clone())
            .app_data(self.onboarding.clone())
            .app_data(self.directory.clone())
            .app_data(self.schedules.clone());
        routes::configure::<S>(cfg);
    }
}

impl<S: DataStore> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            attendance: self.attendance.clone(),
            payroll: self.payroll.clone(),
            time_off: self.time_off.clone(),
            onboarding: self.onboarding.clone(),
            directory: self.directory.clone(),
            schedules: self.schedules.clone(),
        }
    }
}
