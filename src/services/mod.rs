pub mod attendance;
pub mod directory;
pub mod onboarding;
pub mod payroll;
pub mod schedules;
pub mod time_off;

pub use attendance::{AttendanceReportService, ReportQuery};
pub use directory::DirectoryService;
pub use onboarding::OnboardingService;
pub use payroll::{LineItemList, PayrollService};
pub use schedules::ScheduleService;
pub use time_off::TimeOffService;
