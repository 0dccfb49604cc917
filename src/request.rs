use serde::{Deserialize, Serialize};

use crate::errors::{LoanError, Result};
use crate::schedule::emi::calculate_emi;
use crate::schedule::generator::{generate_schedule, ScheduleRow};
use crate::types::ExtraPayments;

/// calculation request as submitted by a caller
///
/// `tenure` is in years; evaluation sizes the installment over `tenure * 12`
/// months. Serializes with the wire field names `amount`, `rate`, `tenure`,
/// `extraPayments`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanRequest {
    /// principal in currency units
    pub amount: f64,
    /// annual interest rate in percent, 10 means 10%
    pub rate: f64,
    /// loan tenure in years
    pub tenure: u32,
    /// extra principal payments keyed by month number
    #[serde(default)]
    pub extra_payments: ExtraPayments,
}

/// calculation response: the installment and the generated schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationResponse {
    pub emi: f64,
    pub schedule: Vec<ScheduleRow>,
}

impl LoanRequest {
    pub fn new(amount: f64, rate: f64, tenure: u32) -> Self {
        Self {
            amount,
            rate,
            tenure,
            extra_payments: ExtraPayments::new(),
        }
    }

    pub fn with_extra_payments(mut self, extra_payments: ExtraPayments) -> Self {
        self.extra_payments = extra_payments;
        self
    }

    /// reject input the calculator is not meant to see
    ///
    /// The raw schedule math never validates; this is the filter a calling
    /// surface applies before submitting a request.
    pub fn validate(&self) -> Result<()> {
        if !self.amount.is_finite() || self.amount <= 0.0 {
            return Err(LoanError::InvalidAmount { amount: self.amount });
        }
        if !self.rate.is_finite() || self.rate <= 0.0 {
            return Err(LoanError::InvalidRate { rate: self.rate });
        }
        if self.tenure == 0 {
            return Err(LoanError::InvalidTenure { tenure: self.tenure });
        }
        for (month, amount) in self.extra_payments.iter() {
            if month < 1 {
                return Err(LoanError::InvalidMonth { month });
            }
            if !amount.is_finite() || amount <= 0.0 {
                return Err(LoanError::InvalidPaymentAmount { amount });
            }
        }
        Ok(())
    }

    /// guarded evaluation of the request
    ///
    /// The installment is computed only when the amount, rate, and term are
    /// all positive (otherwise it is 0), and a schedule is generated only
    /// for a positive installment. Degenerate requests therefore resolve to
    /// `{emi: 0, schedule: []}` instead of surfacing NaN/infinity.
    pub fn evaluate(&self) -> CalculationResponse {
        let total_months = self.tenure * 12;
        let monthly_rate = self.rate / 12.0 / 100.0;

        let emi = if self.amount > 0.0 && monthly_rate > 0.0 && total_months > 0 {
            calculate_emi(self.amount, monthly_rate, total_months)
        } else {
            0.0
        };

        let schedule = if emi > 0.0 {
            generate_schedule(self.amount, self.rate, total_months, emi, &self.extra_payments)
        } else {
            Vec::new()
        };

        CalculationResponse { emi, schedule }
    }
}

impl CalculationResponse {
    /// convert to pretty-printed json string
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_evaluate_typical_request() {
        let response = LoanRequest::new(100_000.0, 10.0, 2).evaluate();

        assert_eq!((response.emi * 100.0).round() / 100.0, 4614.49);
        assert!(!response.schedule.is_empty());
        assert!(response.schedule.last().unwrap().principal_left < 1e-6);
    }

    #[test]
    fn test_evaluate_degenerate_requests_are_guarded() {
        for request in [
            LoanRequest::new(0.0, 10.0, 2),
            LoanRequest::new(100_000.0, 0.0, 2),
            LoanRequest::new(100_000.0, 10.0, 0),
        ] {
            let response = request.evaluate();
            assert_eq!(response.emi, 0.0);
            assert!(response.schedule.is_empty());
        }
    }

    #[test]
    fn test_evaluate_applies_extra_payments() {
        let extras: ExtraPayments = [(5, 10_000.0)].into_iter().collect();
        let baseline = LoanRequest::new(100_000.0, 10.0, 2).evaluate();
        let shortened = LoanRequest::new(100_000.0, 10.0, 2)
            .with_extra_payments(extras)
            .evaluate();

        assert!(shortened.schedule.len() < baseline.schedule.len());
        assert_eq!(shortened.emi, baseline.emi);
    }

    #[test]
    fn test_validate_filters_bad_input() {
        assert!(LoanRequest::new(100_000.0, 10.0, 2).validate().is_ok());
        assert!(LoanRequest::new(-1.0, 10.0, 2).validate().is_err());
        assert!(LoanRequest::new(f64::NAN, 10.0, 2).validate().is_err());
        assert!(LoanRequest::new(100_000.0, -0.5, 2).validate().is_err());
        assert!(LoanRequest::new(100_000.0, 10.0, 0).validate().is_err());
    }

    #[test]
    fn test_wire_field_names() {
        let extras: ExtraPayments = [(5, 10_000.0)].into_iter().collect();
        let request = LoanRequest::new(100_000.0, 10.0, 2).with_extra_payments(extras);
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["amount"], 100_000.0);
        assert_eq!(json["rate"], 10.0);
        assert_eq!(json["tenure"], 2);
        assert_eq!(json["extraPayments"]["5"], 10_000.0);

        let back: LoanRequest = serde_json::from_value(json).unwrap();
        assert_eq!(back, request);
    }

    #[test]
    fn test_extra_payments_default_on_deserialize() {
        let request: LoanRequest =
            serde_json::from_str(r#"{"amount":50000.0,"rate":8.0,"tenure":1}"#).unwrap();

        assert!(request.extra_payments.is_empty());
    }
}
