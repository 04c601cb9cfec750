// RestoreConfig - core/diagnostics.rs
//
// Injected diagnostic log. The panel records restoration failures here
// instead of writing to a process-wide logger, so tests can assert on
// exactly what was recorded.

use crate::core::model::Severity;
use crate::util::constants::DIAGNOSTICS_TARGET;

/// Sink for severity-tagged diagnostic text.
pub trait DiagnosticLog {
    fn record(&self, severity: Severity, message: &str);
}

/// Production diagnostics: forwards entries to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingDiagnostics;

impl DiagnosticLog for TracingDiagnostics {
    fn record(&self, severity: Severity, message: &str) {
        match severity {
            Severity::Error => tracing::error!(target: DIAGNOSTICS_TARGET, "{message}"),
            Severity::Warning => tracing::warn!(target: DIAGNOSTICS_TARGET, "{message}"),
            Severity::Info => tracing::info!(target: DIAGNOSTICS_TARGET, "{message}"),
            Severity::Debug => tracing::debug!(target: DIAGNOSTICS_TARGET, "{message}"),
        }
    }
}
