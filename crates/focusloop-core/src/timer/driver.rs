//! Tick sources.
//!
//! The engine never owns a clock; anything able to call
//! [`TimerEngine::tick`] on a cadence can drive it. Tests step it by hand;
//! live runs use [`TickDriver`], an async loop pacing itself with the
//! engine's scaled tick interval.

use tokio::time;

use super::engine::{TimerEngine, TimerStatus};
use crate::events::Event;
use crate::ports::IntentDispatcher;

/// Wall-clock tick source.
///
/// Ticks the engine once per simulated second, dispatches the emitted
/// intents and hands events to the caller. Returns as soon as the engine
/// leaves `Running` - unless `auto_confirm_breaks` is set, in which case
/// break prompts are acknowledged immediately (unattended runs).
#[derive(Debug, Clone, Copy, Default)]
pub struct TickDriver {
    auto_confirm_breaks: bool,
}

impl TickDriver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn auto_confirm_breaks(mut self, yes: bool) -> Self {
        self.auto_confirm_breaks = yes;
        self
    }

    pub async fn run<F>(
        &self,
        engine: &mut TimerEngine,
        dispatcher: &IntentDispatcher,
        mut on_event: F,
    ) -> TimerStatus
    where
        F: FnMut(&Event),
    {
        loop {
            match engine.status() {
                TimerStatus::Running => {
                    time::sleep(engine.tick_interval()).await;
                    let out = engine.tick();
                    dispatcher.dispatch_all(&out.intents);
                    for event in &out.events {
                        on_event(event);
                    }
                }
                TimerStatus::AwaitingBreak if self.auto_confirm_breaks => {
                    let out = engine.confirm_break_start();
                    dispatcher.dispatch_all(&out.intents);
                    for event in &out.events {
                        on_event(event);
                    }
                }
                status => return status,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::test_support::recording_dispatcher;
    use crate::timer::Cadence;

    fn fast_engine() -> TimerEngine {
        let mut engine = TimerEngine::with_cadence(Cadence {
            focus_secs: 65,
            short_break_secs: 5,
            long_break_secs: 10,
            sessions_before_long_break: 4,
        });
        engine.setup_schedule(70).unwrap();
        // 1 ms per simulated second keeps the test quick.
        engine.set_time_scale(1000);
        engine
    }

    #[tokio::test]
    async fn drives_a_full_run_with_auto_confirm() {
        let mut engine = fast_engine();
        let (dispatcher, recorder) = recording_dispatcher();
        engine.start();

        let mut events = Vec::new();
        let status = TickDriver::new()
            .auto_confirm_breaks(true)
            .run(&mut engine, &dispatcher, |e| events.push(e.name()))
            .await;

        assert_eq!(status, TimerStatus::Completed);
        assert!(events.contains(&"session_finished"));
        assert!(events.contains(&"run_completed"));
        let calls = recorder.taken();
        assert!(calls.contains(&"sound:start".to_string()));
        assert!(calls.contains(&"sound:stop".to_string()));
    }

    #[tokio::test]
    async fn returns_at_break_prompt_without_auto_confirm() {
        let mut engine = fast_engine();
        let (dispatcher, _recorder) = recording_dispatcher();
        engine.start();

        let status = TickDriver::new()
            .run(&mut engine, &dispatcher, |_| {})
            .await;

        assert_eq!(status, TimerStatus::AwaitingBreak);
    }
}
