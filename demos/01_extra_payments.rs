/// extra payments - shorten a loan with ad-hoc principal payments
use emi_schedule_rs::{calculate_emi, generate_schedule, ExtraPayments, LoanSummary};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let principal = 100_000.0;
    let annual_rate = 10.0;
    let tenure_months = 24;

    let emi = calculate_emi(principal, annual_rate / 12.0 / 100.0, tenure_months);

    let mut extras = ExtraPayments::new();
    extras.add(5, 10_000.0)?;
    extras.add(12, 8_000.0)?;

    let baseline = generate_schedule(principal, annual_rate, tenure_months, emi, &ExtraPayments::new());
    let shortened = generate_schedule(principal, annual_rate, tenure_months, emi, &extras);

    println!("without extras: {} months", baseline.len());
    println!("with extras:    {} months", shortened.len());

    if let Some(summary) = LoanSummary::from_schedule(principal, tenure_months, &shortened) {
        println!("interest saved: {:.2}", summary.interest_saved);
        println!("months reduced: {}", summary.months_reduced);
    }

    Ok(())
}
