//! Session statistics.
//!
//! Everything here is recomputed from the session history on each call;
//! no aggregates are stored.

use chrono::{Duration, Local, NaiveDate};
use serde::Serialize;

use crate::models::Session;

/// Days covered by the rolling breakdown on the stats endpoint.
pub const DEFAULT_WINDOW_DAYS: u32 = 7;
/// Records shown in the dashboard's recent history.
pub const RECENT_LIMIT: usize = 10;

/// Totals over the whole history.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Summary {
    pub total_sessions: usize,
    pub completed_sessions: usize,
    /// Minutes across completed sessions. Missing durations count as zero.
    pub total_minutes: f64,
}

/// Completed sessions started on one calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DailyStat {
    pub date: NaiveDate,
    pub sessions: usize,
    pub minutes: f64,
}

/// Compute totals over the full history.
pub fn summary(sessions: &[Session]) -> Summary {
    let completed = sessions.iter().filter(|s| s.completed);

    Summary {
        total_sessions: sessions.len(),
        completed_sessions: completed.clone().count(),
        total_minutes: completed.map(Session::counted_minutes).sum(),
    }
}

/// The last `limit` sessions, oldest first.
pub fn recent(sessions: &[Session], limit: usize) -> &[Session] {
    &sessions[sessions.len().saturating_sub(limit)..]
}

/// Per-day counts for the `window_days` days ending at `reference_date`.
///
/// Days come back oldest first and days without sessions are reported with
/// zero counts rather than omitted. Only completed sessions are counted, by
/// the local calendar date they started on. A window reaching past the
/// earliest representable date is cut short there.
pub fn daily_breakdown(
    sessions: &[Session],
    reference_date: NaiveDate,
    window_days: u32,
) -> Vec<DailyStat> {
    let mut days: Vec<DailyStat> = (0..window_days)
        .map_while(|offset| {
            reference_date.checked_sub_signed(Duration::days(i64::from(offset)))
        })
        .map(|date| {
            let day_sessions = sessions
                .iter()
                .filter(|s| s.completed && s.start_time.date_naive() == date);

            DailyStat {
                date,
                sessions: day_sessions.clone().count(),
                minutes: day_sessions.map(Session::counted_minutes).sum(),
            }
        })
        .collect();

    days.reverse();
    days
}

/// The default seven-day breakdown ending today.
pub fn last_week(sessions: &[Session]) -> Vec<DailyStat> {
    daily_breakdown(sessions, Local::now().date_naive(), DEFAULT_WINDOW_DAYS)
}
