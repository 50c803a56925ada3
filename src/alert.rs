//! Alert channel.
//!
//! Errors and informational messages from fetches and mutations are handed to
//! an [`AlertSink`]; rendering them is the caller's business.

use std::fmt;

use parking_lot::Mutex;

/// How an alert should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    /// A confirmation or notice.
    Info,
    /// A failed fetch or mutation.
    Error,
}

/// A message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    /// Presentation level.
    pub severity: Severity,
    /// Text to show.
    pub text: String,
}

impl Alert {
    /// Creates an informational alert.
    #[must_use]
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            severity: Severity::Info,
            text: text.into(),
        }
    }

    /// Creates an error alert.
    #[must_use]
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            text: text.into(),
        }
    }
}

impl fmt::Display for Alert {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.severity {
            Severity::Info => write!(formatter, "info: {}", self.text),
            Severity::Error => write!(formatter, "error: {}", self.text),
        }
    }
}

/// Receives alerts.
pub trait AlertSink: Send + Sync {
    /// Shows `alert`.
    fn show(&self, alert: Alert);
}

/// Writes alerts to the `tracing` log.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingAlertSink;

impl AlertSink for TracingAlertSink {
    fn show(&self, alert: Alert) {
        match alert.severity {
            Severity::Info => tracing::info!(text = %alert.text, "alert"),
            Severity::Error => tracing::error!(text = %alert.text, "alert"),
        }
    }
}

/// Keeps every alert in memory.
#[derive(Debug, Default)]
pub struct CollectingAlertSink {
    alerts: Mutex<Vec<Alert>>,
}

impl CollectingAlertSink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the alerts received so far.
    #[must_use]
    pub fn alerts(&self) -> Vec<Alert> {
        self.alerts.lock().clone()
    }

    /// Removes and returns the alerts received so far.
    pub fn drain(&self) -> Vec<Alert> {
        std::mem::take(&mut *self.alerts.lock())
    }
}

impl AlertSink for CollectingAlertSink {
    fn show(&self, alert: Alert) {
        self.alerts.lock().push(alert);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn collecting_sink_keeps_order() {
        let sink = CollectingAlertSink::new();
        sink.show(Alert::error("boom"));
        sink.show(Alert::info("saved"));

        assert_eq!(sink.drain(), vec![Alert::error("boom"), Alert::info("saved")]);
        assert!(sink.alerts().is_empty());
    }

    #[rstest]
    fn display_prefixes_severity() {
        assert_eq!(Alert::info("saved").to_string(), "info: saved");
    }
}
