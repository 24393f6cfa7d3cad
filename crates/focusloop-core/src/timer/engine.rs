//! Timer engine implementation.
//!
//! The timer engine is a tick-driven state machine. It does not use
//! internal threads - the caller is responsible for calling `tick()` once
//! per simulated second (see [`TimerEngine::tick_interval`]).
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Running -> (Paused | AwaitingBreak) -> Running -> Completed
//! ```
//!
//! Every mutating call returns an [`Emitted`] batch: lifecycle events for
//! the UI plus side-effect intents for an
//! [`IntentDispatcher`](crate::ports::IntentDispatcher). The engine never
//! executes a side effect itself.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::schedule::{Cadence, Schedule, ScheduleBuilder, SessionDescriptor, SessionKind};
use crate::error::{CoreError, TimerError};
use crate::events::Event;
use crate::ports::{HapticStyle, Intent, NotificationKind};

/// Remaining seconds at which the soft pre-break warning fires.
const PRE_BREAK_WARNING_SECS: u64 = 60;
/// Delivery delay for the soft pre-break notification.
const PRE_BREAK_DELAY_SECS: u64 = 1;
/// Delivery delay for hard notifications.
const HARD_NOTIFY_DELAY_SECS: u64 = 2;
/// Wall-clock focus time after which suggesting a break is reasonable.
const BREAK_SUGGESTION_SECS: i64 = 300;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerStatus {
    Idle,
    Running,
    Paused,
    /// A focus session finished; the engine holds here until the user
    /// explicitly confirms the break. The looping alert keeps sounding.
    AwaitingBreak,
    Completed,
}

/// Events and side-effect intents produced by one engine call.
#[derive(Debug, Default)]
pub struct Emitted {
    pub events: Vec<Event>,
    pub intents: Vec<Intent>,
}

impl Emitted {
    pub fn is_empty(&self) -> bool {
        self.events.is_empty() && self.intents.is_empty()
    }

    /// Event tags in emission order; handy for sequence assertions.
    pub fn event_names(&self) -> Vec<&'static str> {
        self.events.iter().map(Event::name).collect()
    }

    fn event(&mut self, event: Event) {
        self.events.push(event);
    }

    fn intent(&mut self, intent: Intent) {
        self.intents.push(intent);
    }

    fn notify(&mut self, kind: NotificationKind, delay_secs: u64) {
        self.intent(Intent::Notify { kind, delay_secs });
    }

    fn haptic(&mut self, style: HapticStyle) {
        self.intent(Intent::Haptic { style });
    }
}

/// Core timer engine.
///
/// One logical timeline: a single tick source drives one engine, and all
/// control calls are serialized with it (`&mut self`). Duplicate `start()`
/// calls from the UI are tolerated as no-ops rather than errors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerEngine {
    schedule: Schedule,
    status: TimerStatus,
    current_index: usize,
    /// Remaining simulated seconds in the active session.
    remaining_secs: u64,
    #[serde(default)]
    cadence: Cadence,
    /// Simulated seconds per wall-clock second. 1 = real time; 60 makes a
    /// minute pass per second for QA runs. Scales the tick interval and
    /// notification delays, never the stored durations, so the emitted
    /// event sequence is identical at every scale.
    #[serde(default = "default_time_scale")]
    time_scale: u32,
    #[serde(default)]
    pre_break_notified: bool,
    #[serde(default)]
    break_notified: bool,
    #[serde(default)]
    started_at: Option<DateTime<Utc>>,
}

fn default_time_scale() -> u32 {
    1
}

impl Default for TimerEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TimerEngine {
    /// Create an idle engine with an empty schedule.
    pub fn new() -> Self {
        Self::with_cadence(Cadence::default())
    }

    pub fn with_cadence(cadence: Cadence) -> Self {
        Self {
            schedule: Schedule::default(),
            status: TimerStatus::Idle,
            current_index: 0,
            remaining_secs: 0,
            cadence,
            time_scale: 1,
            pre_break_notified: false,
            break_notified: false,
            started_at: None,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn status(&self) -> TimerStatus {
        self.status
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn remaining_secs(&self) -> u64 {
        self.remaining_secs
    }

    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    pub fn current_session(&self) -> Option<&SessionDescriptor> {
        self.schedule.get(self.current_index)
    }

    pub fn time_scale(&self) -> u32 {
        self.time_scale
    }

    pub fn is_testing(&self) -> bool {
        self.time_scale > 1
    }

    /// Wall-clock pause between ticks for the current time scale.
    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / f64::from(self.time_scale))
    }

    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    fn total_secs(&self) -> u64 {
        self.current_session().map(|s| s.duration_secs).unwrap_or(0)
    }

    /// 0.0 .. 1.0 progress within the current session.
    pub fn session_progress(&self) -> f64 {
        let total = self.total_secs();
        if total == 0 {
            return 0.0;
        }
        1.0 - (self.remaining_secs as f64 / total as f64)
    }

    /// 0.0 .. 100.0 progress across the entire schedule.
    pub fn run_progress_pct(&self) -> f64 {
        let total = self.schedule.total_secs() as f64;
        if total == 0.0 {
            return 0.0;
        }
        let completed = self.schedule.cumulative_secs(self.current_index) as f64;
        let current = self.total_secs() as f64 * self.session_progress();
        ((completed + current) / total * 100.0).min(100.0)
    }

    /// True once the current session has run for five wall-clock minutes.
    pub fn should_enter_break(&self) -> bool {
        self.started_at
            .map(|t| (Utc::now() - t).num_seconds() >= BREAK_SUGGESTION_SECS)
            .unwrap_or(false)
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self) -> Event {
        Event::StateSnapshot {
            status: self.status,
            session_index: self.current_index,
            kind: self
                .current_session()
                .map(|s| s.kind)
                .unwrap_or(SessionKind::Focus),
            remaining_secs: self.remaining_secs,
            total_secs: self.total_secs(),
            run_progress_pct: self.run_progress_pct(),
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Replace the schedule with one built for `total_secs` of focus time.
    ///
    /// Valid while Idle or Completed; rebuilding mid-run would throw the
    /// run away, so that surfaces [`TimerError::AlreadyActive`] instead.
    pub fn setup_schedule(&mut self, total_secs: u64) -> Result<(), CoreError> {
        match self.status {
            TimerStatus::Idle | TimerStatus::Completed => {}
            _ => return Err(TimerError::AlreadyActive.into()),
        }
        let schedule = ScheduleBuilder::new(self.cadence).build(total_secs)?;
        let first = schedule.get(0).ok_or(TimerError::EmptySchedule)?;
        self.remaining_secs = first.duration_secs;
        self.schedule = schedule;
        self.status = TimerStatus::Idle;
        self.current_index = 0;
        self.clear_session_flags();
        self.started_at = None;
        Ok(())
    }

    pub fn set_time_scale(&mut self, scale: u32) {
        self.time_scale = scale.max(1);
    }

    pub fn start(&mut self) -> Emitted {
        match self.status {
            TimerStatus::Idle => {
                let mut out = Emitted::default();
                if self.current_session().is_some() {
                    self.begin_session(&mut out);
                }
                out
            }
            TimerStatus::Paused => self.resume(),
            // Already running (or waiting on the user): duplicate UI calls
            // are tolerated, nothing happens.
            _ => Emitted::default(),
        }
    }

    pub fn pause(&mut self) -> Emitted {
        let mut out = Emitted::default();
        if self.status == TimerStatus::Running {
            self.status = TimerStatus::Paused;
            out.event(Event::TimerPaused {
                remaining_secs: self.remaining_secs,
                at: Utc::now(),
            });
        }
        out
    }

    pub fn resume(&mut self) -> Emitted {
        let mut out = Emitted::default();
        if self.status == TimerStatus::Paused {
            self.status = TimerStatus::Running;
            out.event(Event::TimerResumed {
                remaining_secs: self.remaining_secs,
                at: Utc::now(),
            });
        }
        out
    }

    /// Abandon the current session and move on.
    ///
    /// Stop does NOT halt the run: the next session (if any) starts
    /// immediately. Use [`reset`](Self::reset) to return to Idle.
    pub fn stop(&mut self) -> Emitted {
        let mut out = Emitted::default();
        match self.status {
            TimerStatus::Idle | TimerStatus::Completed => return out,
            TimerStatus::AwaitingBreak => out.intent(Intent::StopLoopingSound),
            _ => {}
        }
        let from = self.current_index;
        self.clear_session_flags();
        self.current_index += 1;
        out.event(Event::TimerStopped {
            from_session: from,
            to_session: self.current_index,
            at: Utc::now(),
        });
        match self.current_session().copied() {
            Some(next) => {
                self.remaining_secs = next.duration_secs;
                self.begin_session(&mut out);
            }
            None => self.complete(&mut out),
        }
        out
    }

    /// Jump past the current session.
    ///
    /// Skipping a running focus session lands in the break-confirmation
    /// hold (the break still has to be acknowledged); skipping from that
    /// hold drops the pending break and starts the following focus
    /// session; skipping a break starts the next focus session directly.
    pub fn skip(&mut self) -> Emitted {
        let mut out = Emitted::default();
        let from = self.current_index;
        match self.status {
            TimerStatus::Idle | TimerStatus::Completed => return out,
            TimerStatus::AwaitingBreak => {
                out.intent(Intent::StopLoopingSound);
                self.clear_session_flags();
                // Past the finished focus session and the unconfirmed break.
                self.current_index += 2;
                out.event(Event::TimerSkipped {
                    from_session: from,
                    to_session: self.current_index,
                    at: Utc::now(),
                });
                match self.current_session().copied() {
                    Some(next) => {
                        self.remaining_secs = next.duration_secs;
                        self.begin_session(&mut out);
                    }
                    None => self.complete(&mut out),
                }
            }
            _ => {
                let current_is_focus = self
                    .current_session()
                    .map(|s| s.kind.is_focus())
                    .unwrap_or(false);
                let next = self.schedule.get(self.current_index + 1).copied();
                self.clear_session_flags();
                match next {
                    Some(n) if n.kind.is_break() && current_is_focus => {
                        // Hold for confirmation, same as a natural finish.
                        self.remaining_secs = 0;
                        self.status = TimerStatus::AwaitingBreak;
                        out.event(Event::TimerSkipped {
                            from_session: from,
                            to_session: from + 1,
                            at: Utc::now(),
                        });
                        out.event(Event::BreakPrompted {
                            session_index: from,
                            at: Utc::now(),
                        });
                        out.intent(Intent::StartLoopingSound);
                    }
                    Some(n) => {
                        self.current_index += 1;
                        self.remaining_secs = n.duration_secs;
                        out.event(Event::TimerSkipped {
                            from_session: from,
                            to_session: self.current_index,
                            at: Utc::now(),
                        });
                        self.begin_session(&mut out);
                    }
                    None => {
                        self.current_index += 1;
                        out.event(Event::TimerSkipped {
                            from_session: from,
                            to_session: self.current_index,
                            at: Utc::now(),
                        });
                        self.complete(&mut out);
                    }
                }
            }
        }
        out
    }

    /// Full halt: back to Idle at the top of the schedule.
    pub fn reset(&mut self) -> Emitted {
        let mut out = Emitted::default();
        if self.status == TimerStatus::AwaitingBreak {
            out.intent(Intent::StopLoopingSound);
        }
        self.status = TimerStatus::Idle;
        self.current_index = 0;
        self.remaining_secs = self.schedule.get(0).map(|s| s.duration_secs).unwrap_or(0);
        self.clear_session_flags();
        self.started_at = None;
        out.event(Event::TimerReset { at: Utc::now() });
        out
    }

    /// Acknowledge the break prompt and start the break countdown.
    pub fn confirm_break_start(&mut self) -> Emitted {
        let mut out = Emitted::default();
        if self.status != TimerStatus::AwaitingBreak {
            return out;
        }
        out.intent(Intent::StopLoopingSound);
        self.clear_session_flags();
        self.current_index += 1;
        match self.current_session().copied() {
            Some(next) => {
                self.remaining_secs = next.duration_secs;
                self.status = TimerStatus::Running;
                self.started_at = Some(Utc::now());
                out.event(Event::BreakStarted {
                    session_index: self.current_index,
                    kind: next.kind,
                    duration_secs: next.duration_secs,
                    at: Utc::now(),
                });
                out.haptic(HapticStyle::Light);
            }
            // A focus session with no break after it cannot come out of the
            // builder; complete rather than index past the end.
            None => self.complete(&mut out),
        }
        out
    }

    /// Advance the countdown by one simulated second.
    ///
    /// Only acts while Running; a stale tick that fires after a
    /// transition is ignored.
    pub fn tick(&mut self) -> Emitted {
        let mut out = Emitted::default();
        if self.status != TimerStatus::Running {
            return out;
        }
        let current = match self.current_session().copied() {
            Some(c) => c,
            None => {
                self.complete(&mut out);
                return out;
            }
        };

        self.remaining_secs = self.remaining_secs.saturating_sub(1);

        if self.remaining_secs == PRE_BREAK_WARNING_SECS
            && current.kind.is_focus()
            && !self.pre_break_notified
        {
            self.pre_break_notified = true;
            out.notify(NotificationKind::PreBreak, PRE_BREAK_DELAY_SECS);
            out.haptic(HapticStyle::Light);
        }

        if self.remaining_secs == 0 {
            out.event(Event::SessionFinished {
                session_index: self.current_index,
                kind: current.kind,
                at: Utc::now(),
            });
            let is_last = self.current_index + 1 >= self.schedule.len();
            if is_last {
                self.complete(&mut out);
            } else if current.kind.is_focus() {
                // Hold for explicit confirmation; the break must be
                // acknowledged, never silently auto-started.
                self.status = TimerStatus::AwaitingBreak;
                if !self.break_notified {
                    self.break_notified = true;
                    out.notify(NotificationKind::Break, HARD_NOTIFY_DELAY_SECS);
                    out.haptic(HapticStyle::Heavy);
                }
                out.intent(Intent::StartLoopingSound);
                out.event(Event::BreakPrompted {
                    session_index: self.current_index,
                    at: Utc::now(),
                });
            } else {
                if current.kind == SessionKind::LongBreak {
                    out.notify(NotificationKind::LongBreak, HARD_NOTIFY_DELAY_SECS);
                    out.haptic(HapticStyle::Heavy);
                }
                self.clear_session_flags();
                self.current_index += 1;
                match self.current_session().copied() {
                    Some(next) => {
                        self.remaining_secs = next.duration_secs;
                        self.begin_session(&mut out);
                    }
                    None => self.complete(&mut out),
                }
            }
        }
        out
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn begin_session(&mut self, out: &mut Emitted) {
        let session = match self.current_session().copied() {
            Some(s) => s,
            None => return,
        };
        self.status = TimerStatus::Running;
        self.started_at = Some(Utc::now());
        out.event(Event::TimerStarted {
            session_index: self.current_index,
            kind: session.kind,
            duration_secs: session.duration_secs,
            at: Utc::now(),
        });
        out.haptic(HapticStyle::Light);
    }

    fn complete(&mut self, out: &mut Emitted) {
        self.status = TimerStatus::Completed;
        self.remaining_secs = 0;
        self.clear_session_flags();
        out.notify(NotificationKind::SessionComplete, HARD_NOTIFY_DELAY_SECS);
        out.haptic(HapticStyle::Heavy);
        out.event(Event::RunCompleted { at: Utc::now() });
    }

    fn clear_session_flags(&mut self) {
        self.pre_break_notified = false;
        self.break_notified = false;
    }
}
