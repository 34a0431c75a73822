//! Per-transport call counters. Updated lock-free on every call and exposed
//! as a plain snapshot.

use crate::rpc::client::RpcError;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// How a single call ended, as far as the counters care.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CallOutcome {
    Success,
    Failure,
    Timeout,
    Cancelled,
}

impl CallOutcome {
    pub(crate) fn of<T>(result: &anyhow::Result<T>) -> Self {
        match result {
            Ok(_) => CallOutcome::Success,
            Err(err) => match err.downcast_ref::<RpcError>() {
                Some(RpcError::Timeout { .. }) => CallOutcome::Timeout,
                Some(RpcError::Cancelled { .. }) => CallOutcome::Cancelled,
                _ => CallOutcome::Failure,
            },
        }
    }
}

#[derive(Debug, Default)]
pub(crate) struct RpcMetrics {
    calls: AtomicU64,
    errors: AtomicU64,
    timeouts: AtomicU64,
    cancellations: AtomicU64,
    latency_ns: AtomicU64,
}

impl RpcMetrics {
    pub(crate) fn record(&self, outcome: CallOutcome, latency: Duration) {
        self.calls.fetch_add(1, Ordering::Relaxed);
        self.latency_ns
            .fetch_add(latency.as_nanos() as u64, Ordering::Relaxed);

        let extra = match outcome {
            CallOutcome::Success => return,
            CallOutcome::Failure => None,
            CallOutcome::Timeout => Some(&self.timeouts),
            CallOutcome::Cancelled => Some(&self.cancellations),
        };
        self.errors.fetch_add(1, Ordering::Relaxed);
        if let Some(counter) = extra {
            counter.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub(crate) fn snapshot(&self) -> RpcMetricsSnapshot {
        let total_requests = self.calls.load(Ordering::Relaxed);
        let total_errors = self.errors.load(Ordering::Relaxed);
        let per_call = |value: f64| {
            if total_requests == 0 {
                0.0
            } else {
                value / total_requests as f64
            }
        };

        RpcMetricsSnapshot {
            total_requests,
            total_errors,
            total_timeouts: self.timeouts.load(Ordering::Relaxed),
            total_cancellations: self.cancellations.load(Ordering::Relaxed),
            average_latency_ms: per_call(self.latency_ns.load(Ordering::Relaxed) as f64)
                / 1_000_000.0,
            error_rate: per_call(total_errors as f64),
        }
    }
}

/// Counters since the transport was built. Timeouts and cancellations are
/// also counted as errors.
#[derive(Debug, Copy, Clone)]
pub struct RpcMetricsSnapshot {
    pub total_requests: u64,
    pub total_errors: u64,
    pub total_timeouts: u64,
    pub total_cancellations: u64,
    pub average_latency_ms: f64,
    pub error_rate: f64,
}
