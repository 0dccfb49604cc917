/// offline worker - dispatch a calculation to the background worker
use std::time::Duration;

use emi_schedule_rs::{Calculator, ExtraPayments, LoanRequest};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut extras = ExtraPayments::new();
    extras.add(5, 10_000.0)?;

    let request = LoanRequest::new(100_000.0, 10.0, 2).with_extra_payments(extras);
    request.validate()?;

    // worker-backed, with in-process fallback on timeout
    let mut calculator = Calculator::offline(Duration::from_millis(500));
    let response = calculator.calculate(&request);

    println!("emi: {:.2}", response.emi);
    println!("months: {}", response.schedule.len());
    println!("{}", response.to_json_pretty()?);

    Ok(())
}
