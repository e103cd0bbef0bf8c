pub mod attendance;
pub mod employees;
pub mod health;
pub mod onboarding;
pub mod payroll;
pub mod schedules;
pub mod shared;
pub mod time_off;
