pub mod local;
pub mod worker;

use std::time::Duration;

use crate::errors::Result;
use crate::request::{CalculationResponse, LoanRequest};

pub use local::LocalEngine;
pub use worker::{WorkerEngine, WorkerMessage, DEFAULT_RESPONSE_TIMEOUT};

/// trait for interchangeable calculation strategies
///
/// Both strategies must produce identical output for identical input; the
/// difference between them is where the computation runs, never what it
/// returns.
pub trait CalculationEngine {
    fn calculate(&mut self, request: &LoanRequest) -> Result<CalculationResponse>;
}

/// strategy selection for a `Calculator`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineStrategy {
    /// run in-process
    Local,
    /// dispatch to the background worker, falling back in-process
    Offline { timeout: Duration },
}

/// call-site wrapper that selects a strategy and guarantees a result
///
/// `calculate` is total: a worker failure (spawn, timeout, serialization)
/// is logged and answered by in-process evaluation, so callers always get a
/// response.
pub struct Calculator {
    engine: Box<dyn CalculationEngine + Send>,
}

impl Calculator {
    pub fn new(strategy: EngineStrategy) -> Self {
        match strategy {
            EngineStrategy::Local => Self::local(),
            EngineStrategy::Offline { timeout } => Self::offline(timeout),
        }
    }

    /// synchronous in-process calculator
    pub fn local() -> Self {
        Self {
            engine: Box::new(LocalEngine),
        }
    }

    /// worker-backed calculator with the given response timeout
    ///
    /// When the worker thread cannot be spawned the calculator starts in
    /// local mode instead.
    pub fn offline(timeout: Duration) -> Self {
        match WorkerEngine::with_timeout(timeout) {
            Ok(worker) => Self {
                engine: Box::new(worker),
            },
            Err(error) => {
                tracing::warn!(%error, "worker unavailable, starting in local mode");
                Self::local()
            }
        }
    }

    pub fn with_engine(engine: Box<dyn CalculationEngine + Send>) -> Self {
        Self { engine }
    }

    pub fn calculate(&mut self, request: &LoanRequest) -> CalculationResponse {
        match self.engine.calculate(request) {
            Ok(response) => response,
            Err(error) => {
                tracing::warn!(%error, "falling back to in-process calculation");
                request.evaluate()
            }
        }
    }
}
