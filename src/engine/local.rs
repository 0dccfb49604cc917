use crate::engine::CalculationEngine;
use crate::errors::Result;
use crate::request::{CalculationResponse, LoanRequest};

/// synchronous in-process strategy
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalEngine;

impl CalculationEngine for LocalEngine {
    fn calculate(&mut self, request: &LoanRequest) -> Result<CalculationResponse> {
        Ok(request.evaluate())
    }
}
