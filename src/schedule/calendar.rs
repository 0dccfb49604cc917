use chrono::{DateTime, Datelike, Utc};
use hourglass_rs::SafeTimeProvider;
use serde::{Deserialize, Serialize};

use crate::schedule::generator::ScheduleRow;

/// schedule row with its calendar due date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatedRow {
    pub due_date: DateTime<Utc>,
    #[serde(flatten)]
    pub row: ScheduleRow,
}

/// attach due dates to a schedule, one month apart starting at `first_due`
///
/// Day-of-month is clamped to the target month's length, so a schedule
/// anchored on Jan 31 falls due on Feb 28/29, Mar 31, Apr 30, and so on.
pub fn with_payment_dates(schedule: &[ScheduleRow], first_due: DateTime<Utc>) -> Vec<DatedRow> {
    schedule
        .iter()
        .map(|row| DatedRow {
            due_date: add_months(first_due, row.month - 1),
            row: row.clone(),
        })
        .collect()
}

/// attach due dates anchored one month after the provider's current time
pub fn from_time_provider(schedule: &[ScheduleRow], time: &SafeTimeProvider) -> Vec<DatedRow> {
    with_payment_dates(schedule, add_months(time.now(), 1))
}

/// add calendar months, clamping the day to the target month's length
fn add_months(date: DateTime<Utc>, months: u32) -> DateTime<Utc> {
    let total = date.year() * 12 + date.month0() as i32 + months as i32;
    let year = total.div_euclid(12);
    let month = total.rem_euclid(12) as u32 + 1;
    let day = date.day().min(days_in_month(year, month));

    date.with_day(1)
        .and_then(|d| d.with_year(year))
        .and_then(|d| d.with_month(month))
        .and_then(|d| d.with_day(day))
        .unwrap_or(date)
}

fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        _ => 30,
    }
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::emi::calculate_emi;
    use crate::schedule::generator::generate_schedule;
    use crate::types::ExtraPayments;
    use chrono::TimeZone;
    use hourglass_rs::TimeSource;

    #[test]
    fn test_dates_advance_month_by_month() {
        let emi = calculate_emi(100_000.0, 0.10 / 12.0, 24);
        let schedule = generate_schedule(100_000.0, 10.0, 24, emi, &ExtraPayments::new());
        let first_due = Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap();

        let dated = with_payment_dates(&schedule, first_due);

        assert_eq!(dated.len(), schedule.len());
        assert_eq!(dated[0].due_date, first_due);
        assert_eq!(dated[1].due_date, Utc.with_ymd_and_hms(2024, 2, 15, 0, 0, 0).unwrap());
        assert_eq!(dated[12].due_date, Utc.with_ymd_and_hms(2025, 1, 15, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_end_of_month_days_are_clamped() {
        let start = Utc.with_ymd_and_hms(2024, 1, 31, 0, 0, 0).unwrap();

        assert_eq!(add_months(start, 1), Utc.with_ymd_and_hms(2024, 2, 29, 0, 0, 0).unwrap());
        assert_eq!(add_months(start, 2), Utc.with_ymd_and_hms(2024, 3, 31, 0, 0, 0).unwrap());
        assert_eq!(add_months(start, 13), Utc.with_ymd_and_hms(2025, 2, 28, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_year_rollover() {
        let start = Utc.with_ymd_and_hms(2024, 11, 10, 0, 0, 0).unwrap();

        assert_eq!(add_months(start, 2), Utc.with_ymd_and_hms(2025, 1, 10, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_anchoring_from_time_provider() {
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        let time = SafeTimeProvider::new(TimeSource::Test(now));

        let emi = calculate_emi(50_000.0, 0.08 / 12.0, 12);
        let schedule = generate_schedule(50_000.0, 8.0, 12, emi, &ExtraPayments::new());
        let dated = from_time_provider(&schedule, &time);

        assert_eq!(dated[0].due_date, Utc.with_ymd_and_hms(2024, 7, 1, 0, 0, 0).unwrap());
    }
}
