use reqwest::header::HeaderMap;
use reqwest::StatusCode;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Everything one run needs, built once at startup and shared read-only
/// by every worker.
#[derive(Clone, Debug)]
pub struct LoadConfig {
    pub url: String,
    pub headers: HeaderMap,
    pub workers: usize,
    pub duration: Duration,
}

/// Flip-once stop flag: set exactly once by the driver, polled by every
/// worker at the top of each iteration. Clones share the same flag, and
/// there is no way to unset it.
#[derive(Clone, Debug, Default)]
pub struct StopSignal(Arc<AtomicBool>);

impl StopSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_set(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Result of one GET attempt. Printed immediately, never retained.
/// A non-2xx status is still a `Success`; only transport-level trouble
/// (refused connection, timeout, unreadable body) counts as `Failure`.
#[derive(Debug)]
pub enum RequestOutcome {
    Success { status: StatusCode, body: String },
    Failure { reason: String },
}

impl fmt::Display for RequestOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestOutcome::Success { status, body } => {
                write!(f, "Status: {}, Body: {}", status.as_u16(), body)
            }
            RequestOutcome::Failure { reason } => {
                write!(f, "Request failed: {}", reason)
            }
        }
    }
}
