use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::errors::{LoanError, Result};
use crate::schedule::generator::ScheduleRow;
use crate::types::{MonthNumber, PaymentStatus};

/// actual payments recorded against a schedule
///
/// Several payments may land in the same month, so each month keeps the
/// individual amounts rather than a single total.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PaymentTracker {
    payments: BTreeMap<MonthNumber, Vec<f64>>,
}

/// recorded totals measured against the scheduled totals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentProgress {
    pub total_scheduled: f64,
    pub total_recorded: f64,
    pub difference: f64,
    pub status: PaymentStatus,
}

impl PaymentTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// record a payment made in a month
    pub fn record(&mut self, month: MonthNumber, amount: f64) -> Result<()> {
        if month < 1 {
            return Err(LoanError::InvalidMonth { month });
        }
        if !amount.is_finite() || amount <= 0.0 {
            return Err(LoanError::InvalidPaymentAmount { amount });
        }
        self.payments.entry(month).or_default().push(amount);
        Ok(())
    }

    /// remove one recorded payment by position within its month
    pub fn remove(&mut self, month: MonthNumber, index: usize) -> Option<f64> {
        let list = self.payments.get_mut(&month)?;
        if index >= list.len() {
            return None;
        }
        let removed = list.remove(index);
        if list.is_empty() {
            self.payments.remove(&month);
        }
        Some(removed)
    }

    /// payments recorded for a month
    pub fn recorded_for_month(&self, month: MonthNumber) -> &[f64] {
        self.payments.get(&month).map(Vec::as_slice).unwrap_or(&[])
    }

    /// sum of everything recorded
    pub fn total_recorded(&self) -> f64 {
        self.payments.values().flatten().sum()
    }

    /// installment plus extra scheduled for a month, 0 when absent
    pub fn scheduled_for_month(schedule: &[ScheduleRow], month: MonthNumber) -> f64 {
        schedule
            .iter()
            .find(|r| r.month == month)
            .map(|r| r.emi + r.extra)
            .unwrap_or(0.0)
    }

    /// measure recorded payments against the schedule
    pub fn progress(&self, schedule: &[ScheduleRow]) -> PaymentProgress {
        let total_scheduled: f64 = schedule.iter().map(|r| r.emi + r.extra).sum();
        let total_recorded = self.total_recorded();
        let difference = total_recorded - total_scheduled;

        let status = if difference > 0.0 {
            PaymentStatus::ExtraPaid
        } else if difference < 0.0 {
            PaymentStatus::Pending
        } else {
            PaymentStatus::OnTrack
        };

        PaymentProgress {
            total_scheduled,
            total_recorded,
            difference,
            status,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.payments.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::generator::generate_schedule;
    use crate::types::ExtraPayments;

    fn schedule() -> Vec<ScheduleRow> {
        // zero-rate schedule keeps the totals exact
        generate_schedule(100_000.0, 0.0, 20, 5_000.0, &ExtraPayments::new())
    }

    #[test]
    fn test_record_validates_input() {
        let mut tracker = PaymentTracker::new();

        assert!(tracker.record(0, 5_000.0).is_err());
        assert!(tracker.record(1, 0.0).is_err());
        assert!(tracker.record(1, f64::NAN).is_err());
        assert!(tracker.is_empty());

        assert!(tracker.record(1, 5_000.0).is_ok());
        assert_eq!(tracker.recorded_for_month(1), &[5_000.0]);
    }

    #[test]
    fn test_multiple_payments_in_one_month() {
        let mut tracker = PaymentTracker::new();
        tracker.record(3, 2_000.0).unwrap();
        tracker.record(3, 3_000.0).unwrap();

        assert_eq!(tracker.recorded_for_month(3), &[2_000.0, 3_000.0]);
        assert_eq!(tracker.total_recorded(), 5_000.0);
    }

    #[test]
    fn test_remove_drops_empty_months() {
        let mut tracker = PaymentTracker::new();
        tracker.record(3, 2_000.0).unwrap();
        tracker.record(3, 3_000.0).unwrap();

        assert_eq!(tracker.remove(3, 0), Some(2_000.0));
        assert_eq!(tracker.remove(3, 5), None);
        assert_eq!(tracker.remove(3, 0), Some(3_000.0));
        assert!(tracker.is_empty());
        assert_eq!(tracker.remove(3, 0), None);
    }

    #[test]
    fn test_scheduled_for_month() {
        let schedule = schedule();

        assert_eq!(PaymentTracker::scheduled_for_month(&schedule, 1), 5_000.0);
        assert_eq!(PaymentTracker::scheduled_for_month(&schedule, 99), 0.0);
    }

    #[test]
    fn test_progress_status() {
        let schedule = schedule();
        let mut tracker = PaymentTracker::new();
        for month in 1..=20 {
            tracker.record(month, 5_000.0).unwrap();
        }

        let progress = tracker.progress(&schedule);
        assert_eq!(progress.total_scheduled, 100_000.0);
        assert_eq!(progress.difference, 0.0);
        assert_eq!(progress.status, PaymentStatus::OnTrack);

        tracker.record(21, 1_000.0).unwrap();
        assert_eq!(tracker.progress(&schedule).status, PaymentStatus::ExtraPaid);

        tracker.remove(21, 0).unwrap();
        tracker.remove(20, 0).unwrap();
        assert_eq!(tracker.progress(&schedule).status, PaymentStatus::Pending);
    }
}
