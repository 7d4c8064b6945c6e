//! Session model representing one timed focus or break interval.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Planned length used when the caller does not supply one.
pub const DEFAULT_DURATION_MINUTES: f64 = 25.0;
/// Session label used when the caller does not supply one.
pub const DEFAULT_SESSION_TYPE: &str = "focus";
/// Environment label used when the caller does not supply one.
pub const DEFAULT_ENVIRONMENT: &str = "default";

/// A focus session, either in progress or finished.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Sequence number assigned when the session was started.
    pub id: u64,
    /// When the session was started.
    pub start_time: DateTime<Local>,
    /// Requested length in minutes.
    pub planned_duration: f64,
    /// Free-form label such as "focus" or "break".
    pub session_type: String,
    /// Free-form ambience label.
    pub environment: String,
    /// Whether the session ran to completion. False while in progress.
    pub completed: bool,
    /// When the session was ended (if it has been).
    pub end_time: Option<DateTime<Local>>,
    /// Minutes actually spent, as reported by the caller.
    pub actual_duration: Option<f64>,
}

impl Session {
    /// Create a new in-progress session starting now.
    pub fn new(
        id: u64,
        planned_duration: f64,
        session_type: impl Into<String>,
        environment: impl Into<String>,
    ) -> Self {
        Self {
            id,
            start_time: Local::now(),
            planned_duration,
            session_type: session_type.into(),
            environment: environment.into(),
            completed: false,
            end_time: None,
            actual_duration: None,
        }
    }

    /// Minutes counted towards statistics. Missing durations count as zero.
    pub fn counted_minutes(&self) -> f64 {
        self.actual_duration.unwrap_or(0.0)
    }
}
