pub mod engine;
pub mod errors;
pub mod request;
pub mod schedule;
pub mod tracker;
pub mod types;

// re-export key types
pub use engine::{CalculationEngine, Calculator, EngineStrategy, LocalEngine, WorkerEngine};
pub use errors::{LoanError, Result};
pub use request::{CalculationResponse, LoanRequest};
pub use schedule::{
    calculate_emi, generate_schedule, with_payment_dates, DatedRow, LoanSummary, ScheduleRow,
    MAX_OVERRUN_MONTHS,
};
pub use tracker::{PaymentProgress, PaymentTracker};
pub use types::{ExtraPayments, MonthNumber, PaymentStatus};

// re-export external dependencies that users will need
pub use chrono;
pub use hourglass_rs::{SafeTimeProvider, TimeSource};
pub use uuid::Uuid;
