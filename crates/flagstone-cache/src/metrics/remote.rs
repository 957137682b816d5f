//! Remote refresh metrics.

use metrics::counter;

/// How a remote refresh ended, as seen by the cache services.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// The remote answered with a verified payload.
    Success,
    /// The remote was unreachable; an empty mapping was served instead.
    Degraded,
    /// The response failed signature verification.
    Rejected,
}

impl RefreshOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Degraded => "degraded",
            Self::Rejected => "rejected",
        }
    }
}

/// Registra las metricas de refresh remoto.
pub fn register_remote_metrics() {
    metrics::describe_counter!(
        "flagstone_remote_refresh_total",
        "Total number of remote refreshes by subject and outcome"
    );
}

/// Registra el resultado de un refresh remoto.
pub fn record_refresh(subject: &'static str, outcome: RefreshOutcome) {
    counter!(
        "flagstone_remote_refresh_total",
        "subject" => subject,
        "outcome" => outcome.as_str()
    )
    .increment(1);
}
