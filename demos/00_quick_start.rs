/// quick start - compute an installment and its amortization schedule
use emi_schedule_rs::{calculate_emi, generate_schedule, ExtraPayments, LoanSummary};

fn main() {
    let principal = 100_000.0;
    let annual_rate = 10.0;
    let tenure_months = 24;

    let emi = calculate_emi(principal, annual_rate / 12.0 / 100.0, tenure_months);
    println!("monthly emi: {:.2}", emi);

    let schedule = generate_schedule(
        principal,
        annual_rate,
        tenure_months,
        emi,
        &ExtraPayments::new(),
    );

    println!("month  interest  principal  remaining");
    for row in &schedule {
        println!(
            "{:>5}  {:>8.2}  {:>9.2}  {:>9.2}",
            row.month, row.interest, row.principal_paid, row.principal_left
        );
    }

    if let Some(summary) = LoanSummary::from_schedule(principal, tenure_months, &schedule) {
        println!("total interest: {:.2}", summary.total_interest);
        println!("total paid: {:.2}", summary.total_paid);
    }
}
