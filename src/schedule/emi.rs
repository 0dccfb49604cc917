/// fixed monthly installment for an amortizing loan
///
/// `monthly_rate` is the periodic rate: annual percent divided by 12 and by
/// 100. The formula `P * r * (1+r)^n / ((1+r)^n - 1)` is evaluated as
/// written, with no special cases. Degenerate inputs resolve to IEEE-754
/// values rather than errors: a zero rate yields NaN (the expression is
/// 0/0), a zero term with a positive rate yields +infinity, and a zero
/// principal yields exactly 0. Callers that want a guarded result go through
/// `LoanRequest::evaluate`.
pub fn calculate_emi(principal: f64, monthly_rate: f64, total_months: u32) -> f64 {
    let growth = (1.0 + monthly_rate).powf(total_months as f64);
    principal * monthly_rate * growth / (growth - 1.0)
}
