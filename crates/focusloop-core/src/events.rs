use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::{SessionKind, TimerStatus};

/// Every state change in the engine produces an Event.
/// The UI layer consumes them; the CLI prints them as JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    TimerStarted {
        session_index: usize,
        kind: SessionKind,
        duration_secs: u64,
        at: DateTime<Utc>,
    },
    TimerPaused {
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    TimerResumed {
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    /// A session counted down to zero.
    SessionFinished {
        session_index: usize,
        kind: SessionKind,
        at: DateTime<Utc>,
    },
    /// A focus session finished; the engine is holding for an explicit
    /// break confirmation.
    BreakPrompted {
        session_index: usize,
        at: DateTime<Utc>,
    },
    /// The user confirmed the break and its countdown began.
    BreakStarted {
        session_index: usize,
        kind: SessionKind,
        duration_secs: u64,
        at: DateTime<Utc>,
    },
    /// The current session was abandoned; the run moved on.
    TimerStopped {
        from_session: usize,
        to_session: usize,
        at: DateTime<Utc>,
    },
    TimerSkipped {
        from_session: usize,
        to_session: usize,
        at: DateTime<Utc>,
    },
    TimerReset {
        at: DateTime<Utc>,
    },
    /// The whole schedule has been walked.
    RunCompleted {
        at: DateTime<Utc>,
    },
    StateSnapshot {
        status: TimerStatus,
        session_index: usize,
        kind: SessionKind,
        remaining_secs: u64,
        total_secs: u64,
        run_progress_pct: f64,
        at: DateTime<Utc>,
    },
}

impl Event {
    /// Stable lowercase tag for sequence comparisons and logging.
    pub fn name(&self) -> &'static str {
        match self {
            Event::TimerStarted { .. } => "timer_started",
            Event::TimerPaused { .. } => "timer_paused",
            Event::TimerResumed { .. } => "timer_resumed",
            Event::SessionFinished { .. } => "session_finished",
            Event::BreakPrompted { .. } => "break_prompted",
            Event::BreakStarted { .. } => "break_started",
            Event::TimerStopped { .. } => "timer_stopped",
            Event::TimerSkipped { .. } => "timer_skipped",
            Event::TimerReset { .. } => "timer_reset",
            Event::RunCompleted { .. } => "run_completed",
            Event::StateSnapshot { .. } => "state_snapshot",
        }
    }
}
