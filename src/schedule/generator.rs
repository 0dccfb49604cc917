use serde::{Deserialize, Serialize};

use crate::types::ExtraPayments;

/// months simulated past the nominal tenure before the schedule is cut off
///
/// Termination bound, not a business rule: when the EMI does not cover the
/// monthly interest the balance never reaches zero, and the loop stops after
/// this many extra months instead of running forever.
pub const MAX_OVERRUN_MONTHS: u32 = 240;

/// one month of an amortization schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleRow {
    /// 1-based month number, strictly increasing
    pub month: u32,
    /// fixed installment, identical on every row
    pub emi: f64,
    /// extra principal applied this month, 0 if none
    pub extra: f64,
    /// interest accrued this month on the opening balance
    pub interest: f64,
    /// principal retired this month, never more than the opening balance
    pub principal_paid: f64,
    /// balance after this month's payment
    pub principal_left: f64,
}

/// month-by-month amortization schedule
///
/// Simulates the loan one month at a time: interest accrues on the opening
/// balance, the installment plus any extra payment for that month retires
/// principal, and the payoff month is clamped so the balance never goes
/// negative. The absolute value on `principal_left` absorbs negative-zero
/// float residue, not real negative balances. A non-positive principal
/// produces an empty schedule; a NaN or infinite installment propagates
/// through the arithmetic under IEEE comparison rules and the loop ends by
/// the balance test or the `MAX_OVERRUN_MONTHS` cap.
pub fn generate_schedule(
    principal: f64,
    annual_rate_percent: f64,
    tenure_months: u32,
    emi: f64,
    extra_payments: &ExtraPayments,
) -> Vec<ScheduleRow> {
    let monthly_rate = annual_rate_percent / 12.0 / 100.0;
    let mut schedule = Vec::new();
    let mut balance = principal;
    let mut month: u32 = 1;

    while balance > 0.0 && month <= tenure_months + MAX_OVERRUN_MONTHS {
        let interest = balance * monthly_rate;
        let extra = extra_payments.amount_for(month);
        let mut principal_paid = emi - interest + extra;
        if principal_paid > balance {
            principal_paid = balance;
        }
        balance -= principal_paid;

        schedule.push(ScheduleRow {
            month,
            emi,
            extra,
            interest,
            principal_paid,
            principal_left: balance.abs(),
        });

        month += 1;
    }

    schedule
}
