/// payment tracking - record actual payments against the schedule
use emi_schedule_rs::{calculate_emi, generate_schedule, ExtraPayments, PaymentTracker};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let principal = 100_000.0;
    let annual_rate = 10.0;
    let tenure_months = 24;

    let emi = calculate_emi(principal, annual_rate / 12.0 / 100.0, tenure_months);
    let schedule = generate_schedule(
        principal,
        annual_rate,
        tenure_months,
        emi,
        &ExtraPayments::new(),
    );

    let mut tracker = PaymentTracker::new();
    tracker.record(1, emi)?;
    tracker.record(2, emi)?;
    tracker.record(2, 5_000.0)?; // extra payment on top of the installment

    println!(
        "scheduled for month 2: {:.2}",
        PaymentTracker::scheduled_for_month(&schedule, 2)
    );

    let progress = tracker.progress(&schedule);
    println!("total scheduled: {:.2}", progress.total_scheduled);
    println!("total recorded:  {:.2}", progress.total_recorded);
    println!("difference:      {:.2}", progress.difference);
    println!("status:          {:?}", progress.status);

    Ok(())
}
