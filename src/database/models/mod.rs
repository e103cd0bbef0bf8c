pub mod attendance;
pub mod employee;
mod macros;
pub mod onboarding;
pub mod payroll;
pub mod schedule;
pub mod stats;
pub mod time_off;

// Re-export all models for easy importing
pub use attendance::*;
pub use employee::*;
pub use onboarding::*;
pub use payroll::*;
pub use schedule::*;
pub use stats::*;
pub use time_off::*;
