pub mod adjustments;
pub mod payroll;
pub mod scheduler;
pub mod settings;

pub use adjustments::AdjustmentService;
pub use payroll::PayrollService;
pub use scheduler::PayrollScheduler;
pub use settings::{Clock, FixedClock, SettingsService, SystemClock};
