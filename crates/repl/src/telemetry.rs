//! Usage events raised by commands.
//!
//! Transmission is not part of the shell: front ends install a
//! [`TelemetrySink`] that forwards events wherever they need to go.

/// A user action worth reporting.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ShellEvent {
    /// `set header`; the value itself is never reported and names outside
    /// the well-known list arrive hashed.
    SetHeader { header_name: String, is_value_empty: bool },
    /// `set base`, with whether API metadata was found.
    SetBase { metadata_found: bool },
    /// `set swagger`, with whether the document was read.
    SetSwagger { succeeded: bool },
    /// `run`, with the number of lines replayed.
    Run { line_count: usize },
}

impl ShellEvent {
    pub fn name(&self) -> &'static str {
        match self {
            Self::SetHeader { .. } => "SetHeader",
            Self::SetBase { .. } => "SetBase",
            Self::SetSwagger { .. } => "SetSwagger",
            Self::Run { .. } => "Run",
        }
    }
}

pub trait TelemetrySink: Send + Sync {
    fn track_event(&self, event: ShellEvent);
}

/// Sink that drops every event.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopTelemetry;

impl TelemetrySink for NoopTelemetry {
    fn track_event(&self, event: ShellEvent) {
        tracing::trace!(event = event.name(), "telemetry disabled; dropping event");
    }
}
