//! Schedule construction.
//!
//! A schedule is the ordered list of focus/break sessions a run walks
//! through. [`ScheduleBuilder`] derives it from a total focus budget using
//! the classic Pomodoro cadence: four focus blocks separated by short
//! breaks, then a long break, repeated until the budget is spent.

use serde::{Deserialize, Serialize};

use crate::error::ScheduleError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionKind {
    Focus,
    ShortBreak,
    LongBreak,
}

impl SessionKind {
    pub fn is_focus(self) -> bool {
        self == SessionKind::Focus
    }

    pub fn is_break(self) -> bool {
        !self.is_focus()
    }

    pub fn label(self) -> &'static str {
        match self {
            SessionKind::Focus => "Focus",
            SessionKind::ShortBreak => "Short Break",
            SessionKind::LongBreak => "Long Break",
        }
    }
}

/// One entry in a schedule. Built once, never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionDescriptor {
    pub kind: SessionKind,
    /// Duration in simulated seconds, resolved from the cadence at build
    /// time. Time compression scales the tick interval, never this value.
    pub duration_secs: u64,
}

/// Cadence knobs for the builder. Defaults are the standard
/// 25 / 5 / 15 minute blocks with a long break after every 4th focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cadence {
    #[serde(default = "default_focus_secs")]
    pub focus_secs: u64,
    #[serde(default = "default_short_break_secs")]
    pub short_break_secs: u64,
    #[serde(default = "default_long_break_secs")]
    pub long_break_secs: u64,
    #[serde(default = "default_sessions_before_long_break")]
    pub sessions_before_long_break: u64,
}

fn default_focus_secs() -> u64 {
    25 * 60
}
fn default_short_break_secs() -> u64 {
    5 * 60
}
fn default_long_break_secs() -> u64 {
    15 * 60
}
fn default_sessions_before_long_break() -> u64 {
    4
}

impl Default for Cadence {
    fn default() -> Self {
        Self {
            focus_secs: default_focus_secs(),
            short_break_secs: default_short_break_secs(),
            long_break_secs: default_long_break_secs(),
            sessions_before_long_break: default_sessions_before_long_break(),
        }
    }
}

impl Cadence {
    pub fn duration_secs(&self, kind: SessionKind) -> u64 {
        match kind {
            SessionKind::Focus => self.focus_secs,
            SessionKind::ShortBreak => self.short_break_secs,
            SessionKind::LongBreak => self.long_break_secs,
        }
    }

    fn validate(&self) -> Result<(), ScheduleError> {
        if self.focus_secs == 0
            || self.short_break_secs == 0
            || self.long_break_secs == 0
            || self.sessions_before_long_break == 0
        {
            return Err(ScheduleError::InvalidCadence);
        }
        Ok(())
    }
}

/// Ordered sequence of sessions. Immutable once built; a rebuild replaces
/// it wholesale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    sessions: Vec<SessionDescriptor>,
}

impl Default for Schedule {
    /// Empty schedule; a real one comes from [`ScheduleBuilder::build`].
    fn default() -> Self {
        Self {
            sessions: Vec::new(),
        }
    }
}

impl Schedule {
    pub fn sessions(&self) -> &[SessionDescriptor] {
        &self.sessions
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&SessionDescriptor> {
        self.sessions.get(index)
    }

    pub fn total_secs(&self) -> u64 {
        self.sessions.iter().map(|s| s.duration_secs).sum()
    }

    pub fn focus_count(&self) -> usize {
        self.sessions.iter().filter(|s| s.kind.is_focus()).count()
    }

    /// Seconds covered by sessions before `index`.
    pub fn cumulative_secs(&self, index: usize) -> u64 {
        self.sessions
            .iter()
            .take(index)
            .map(|s| s.duration_secs)
            .sum()
    }
}

/// Pure schedule builder.
///
/// Deterministic, no side effects. A zero total duration is rejected with
/// [`ScheduleError::InvalidDuration`]; any positive total yields at least
/// one focus session followed by a break, even when the budget is smaller
/// than a single focus block.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScheduleBuilder {
    cadence: Cadence,
}

impl ScheduleBuilder {
    pub fn new(cadence: Cadence) -> Self {
        Self { cadence }
    }

    pub fn cadence(&self) -> &Cadence {
        &self.cadence
    }

    pub fn build(&self, total_secs: u64) -> Result<Schedule, ScheduleError> {
        self.cadence.validate()?;
        if total_secs == 0 {
            return Err(ScheduleError::InvalidDuration { total_secs });
        }

        let c = &self.cadence;
        let cycle = c.focus_secs + c.short_break_secs;
        let full_cycle = c.sessions_before_long_break * cycle + c.long_break_secs;

        let full_cycles = total_secs / full_cycle;
        let remaining = total_secs % full_cycle;
        let extra_focus = remaining / cycle;

        let focus_sessions =
            (full_cycles * c.sessions_before_long_break + extra_focus).max(1);

        let mut sessions =
            Vec::with_capacity(usize::try_from(focus_sessions * 2).unwrap_or(2));
        for i in 1..=focus_sessions {
            sessions.push(SessionDescriptor {
                kind: SessionKind::Focus,
                duration_secs: c.focus_secs,
            });
            let break_kind = if i % c.sessions_before_long_break == 0 {
                SessionKind::LongBreak
            } else {
                SessionKind::ShortBreak
            };
            sessions.push(SessionDescriptor {
                kind: break_kind,
                duration_secs: c.duration_secs(break_kind),
            });
        }

        Ok(Schedule { sessions })
    }
}
