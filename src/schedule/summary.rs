use serde::{Deserialize, Serialize};

use crate::schedule::generator::ScheduleRow;

/// headline figures derived from a generated schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanSummary {
    /// fixed installment taken from the first row
    pub emi: f64,
    /// nominal term the installment was sized for
    pub nominal_months: u32,
    /// months the loan actually ran
    pub actual_months: u32,
    /// interest accrued across the schedule
    pub total_interest: f64,
    /// everything paid: installments plus extras
    pub total_paid: f64,
    /// interest the loan would accrue over the nominal term with no extras
    pub baseline_interest: f64,
    /// baseline interest minus actual interest
    pub interest_saved: f64,
    /// months cut off the nominal term by extra payments
    pub months_reduced: u32,
}

impl LoanSummary {
    /// aggregate a schedule into its headline figures
    ///
    /// Returns `None` for an empty schedule. `months_reduced` is clamped at
    /// zero and reported as zero when no row carries an extra payment, so a
    /// residual payoff month never shows up as negative savings.
    pub fn from_schedule(
        principal: f64,
        nominal_months: u32,
        schedule: &[ScheduleRow],
    ) -> Option<Self> {
        let first = schedule.first()?;
        let emi = first.emi;
        let actual_months = schedule.len() as u32;
        let total_interest: f64 = schedule.iter().map(|r| r.interest).sum();
        let total_paid: f64 = schedule.iter().map(|r| r.emi + r.extra).sum();
        let baseline_interest = emi * nominal_months as f64 - principal;
        let interest_saved = baseline_interest - total_interest;

        let any_extra = schedule.iter().any(|r| r.extra > 0.0);
        let months_reduced = if any_extra {
            nominal_months.saturating_sub(actual_months)
        } else {
            0
        };

        Some(Self {
            emi,
            nominal_months,
            actual_months,
            total_interest,
            total_paid,
            baseline_interest,
            interest_saved,
            months_reduced,
        })
    }
}
