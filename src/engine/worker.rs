use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::engine::CalculationEngine;
use crate::errors::{LoanError, Result};
use crate::request::{CalculationResponse, LoanRequest};

/// how long a dispatched request waits for its response
pub const DEFAULT_RESPONSE_TIMEOUT: Duration = Duration::from_millis(500);

/// messages exchanged with the worker thread
///
/// JSON envelope: `{"type": "CALCULATE_EMI" | "EMI_RESULT", "payload": ...}`
/// with the payload carrying a correlation id next to the flattened request
/// or response fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum WorkerMessage {
    #[serde(rename = "CALCULATE_EMI")]
    Calculate(CalculationTask),
    #[serde(rename = "EMI_RESULT")]
    EmiResult(CalculationOutcome),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationTask {
    pub id: Uuid,
    #[serde(flatten)]
    pub request: LoanRequest,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationOutcome {
    pub id: Uuid,
    #[serde(flatten)]
    pub response: CalculationResponse,
}

/// background-thread strategy
///
/// Requests travel to a dedicated thread as JSON-encoded messages and the
/// responses come back the same way, matched by correlation id. Requests
/// are independent and idempotent; a stale response from an abandoned
/// request is skipped, and a missing response within the timeout is an
/// error the caller resolves by computing in-process.
pub struct WorkerEngine {
    requests: Option<Sender<String>>,
    responses: Receiver<String>,
    timeout: Duration,
    handle: Option<JoinHandle<()>>,
}

impl WorkerEngine {
    pub fn spawn() -> Result<Self> {
        Self::with_timeout(DEFAULT_RESPONSE_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let (request_tx, request_rx) = mpsc::channel::<String>();
        let (response_tx, response_rx) = mpsc::channel::<String>();

        let handle = thread::Builder::new()
            .name("emi-worker".to_string())
            .spawn(move || worker_loop(request_rx, response_tx))
            .map_err(|e| LoanError::WorkerUnavailable {
                message: e.to_string(),
            })?;

        tracing::debug!("worker thread started");

        Ok(Self {
            requests: Some(request_tx),
            responses: response_rx,
            timeout,
            handle: Some(handle),
        })
    }
}

impl CalculationEngine for WorkerEngine {
    fn calculate(&mut self, request: &LoanRequest) -> Result<CalculationResponse> {
        let id = Uuid::new_v4();
        let message = WorkerMessage::Calculate(CalculationTask {
            id,
            request: request.clone(),
        });

        let sender = self.requests.as_ref().ok_or_else(|| LoanError::WorkerUnavailable {
            message: "request channel closed".to_string(),
        })?;
        sender
            .send(serde_json::to_string(&message)?)
            .map_err(|_| LoanError::WorkerUnavailable {
                message: "worker thread gone".to_string(),
            })?;

        let deadline = Instant::now() + self.timeout;
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match self.responses.recv_timeout(remaining) {
                Ok(raw) => match serde_json::from_str::<WorkerMessage>(&raw)? {
                    WorkerMessage::EmiResult(outcome) if outcome.id == id => {
                        return Ok(outcome.response);
                    }
                    other => {
                        // response to an abandoned request, or an echo
                        tracing::debug!(?other, "skipping unmatched worker message");
                    }
                },
                Err(RecvTimeoutError::Timeout) => {
                    return Err(LoanError::ResponseTimeout {
                        waited_ms: self.timeout.as_millis() as u64,
                    });
                }
                Err(RecvTimeoutError::Disconnected) => {
                    return Err(LoanError::WorkerUnavailable {
                        message: "worker thread gone".to_string(),
                    });
                }
            }
        }
    }
}

impl Drop for WorkerEngine {
    fn drop(&mut self) {
        // closing the request channel ends the worker loop
        self.requests.take();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

fn worker_loop(requests: Receiver<String>, responses: Sender<String>) {
    while let Ok(raw) = requests.recv() {
        let message = match serde_json::from_str::<WorkerMessage>(&raw) {
            Ok(message) => message,
            Err(error) => {
                tracing::warn!(%error, "dropping malformed worker request");
                continue;
            }
        };

        let WorkerMessage::Calculate(task) = message else {
            continue;
        };

        let outcome = CalculationOutcome {
            id: task.id,
            response: task.request.evaluate(),
        };

        let encoded = match serde_json::to_string(&WorkerMessage::EmiResult(outcome)) {
            Ok(encoded) => encoded,
            Err(error) => {
                tracing::warn!(%error, "dropping unencodable worker response");
                continue;
            }
        };

        if responses.send(encoded).is_err() {
            break;
        }
    }
}
