pub mod calendar;
pub mod emi;
pub mod generator;
pub mod summary;

pub use calendar::{from_time_provider, with_payment_dates, DatedRow};
pub use emi::calculate_emi;
pub use generator::{generate_schedule, ScheduleRow, MAX_OVERRUN_MONTHS};
pub use summary::LoanSummary;
