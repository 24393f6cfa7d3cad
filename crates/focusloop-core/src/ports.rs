//! Side-effect intents and the collaborator ports that execute them.
//!
//! The engine never touches notification, audio, or haptic machinery. It
//! emits [`Intent`] values; an [`IntentDispatcher`] holding injected port
//! instances turns them into calls. Port failures stay inside the port:
//! implementations log and swallow, nothing propagates back to the timer.

use serde::{Deserialize, Serialize};

/// Category of a notification request. Implementations map these to their
/// platform's identifiers, so repeated requests of one kind can replace a
/// pending one instead of stacking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    /// Soft one-minute warning before a focus session ends.
    PreBreak,
    /// Hard notification when a focus session ends.
    Break,
    /// A long break finished.
    LongBreak,
    /// The whole run finished.
    SessionComplete,
}

impl NotificationKind {
    pub fn identifier(self) -> &'static str {
        match self {
            NotificationKind::PreBreak => "SOFT_NOTIFICATION",
            NotificationKind::Break => "BREAK_NOTIFICATION",
            NotificationKind::LongBreak => "LONG_BREAK_NOTIFICATION",
            NotificationKind::SessionComplete => "SESSION_COMPLETE_NOTIFICATION",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HapticStyle {
    Light,
    Medium,
    Heavy,
}

/// A side-effect request emitted by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Intent {
    Notify {
        kind: NotificationKind,
        /// Delivery delay in simulated seconds.
        delay_secs: u64,
    },
    StartLoopingSound,
    StopLoopingSound,
    Haptic {
        style: HapticStyle,
    },
}

/// Schedules a local notification. Fire-and-forget: failures are logged by
/// the implementation, never returned.
///
/// `testing` tells the port the run is time-compressed; implementations
/// shrink the delivery delay accordingly.
pub trait NotificationPort {
    fn schedule(&self, kind: NotificationKind, delay_secs: u64, testing: bool);
}

/// Starts/stops the looping alert that plays while a break waits for
/// confirmation.
pub trait SoundPort {
    fn start_looping(&self);
    fn stop_looping(&self);
}

pub trait HapticPort {
    fn trigger(&self, style: HapticStyle);
}

/// Logging notification port for headless use.
#[derive(Debug, Default)]
pub struct LogNotificationPort;

impl NotificationPort for LogNotificationPort {
    fn schedule(&self, kind: NotificationKind, delay_secs: u64, testing: bool) {
        tracing::info!(
            id = kind.identifier(),
            delay_secs,
            testing,
            "notification scheduled"
        );
    }
}

/// Logging sound port for headless use.
#[derive(Debug, Default)]
pub struct LogSoundPort;

impl SoundPort for LogSoundPort {
    fn start_looping(&self) {
        tracing::info!("looping alert started");
    }

    fn stop_looping(&self) {
        tracing::info!("looping alert stopped");
    }
}

/// Logging haptic port for headless use.
#[derive(Debug, Default)]
pub struct LogHapticPort;

impl HapticPort for LogHapticPort {
    fn trigger(&self, style: HapticStyle) {
        tracing::info!(?style, "haptic triggered");
    }
}

/// Executes intents against injected ports, gated by the user's toggles.
pub struct IntentDispatcher {
    notifications: Box<dyn NotificationPort + Send + Sync>,
    sound: Box<dyn SoundPort + Send + Sync>,
    haptics: Box<dyn HapticPort + Send + Sync>,
    notifications_enabled: bool,
    sound_enabled: bool,
    haptics_enabled: bool,
    testing: bool,
}

impl IntentDispatcher {
    pub fn new(
        notifications: Box<dyn NotificationPort + Send + Sync>,
        sound: Box<dyn SoundPort + Send + Sync>,
        haptics: Box<dyn HapticPort + Send + Sync>,
    ) -> Self {
        Self {
            notifications,
            sound,
            haptics,
            notifications_enabled: true,
            sound_enabled: true,
            haptics_enabled: true,
            testing: false,
        }
    }

    /// Logging-only dispatcher.
    pub fn headless() -> Self {
        Self::new(
            Box::new(LogNotificationPort),
            Box::new(LogSoundPort),
            Box::new(LogHapticPort),
        )
    }

    pub fn notifications_enabled(mut self, enabled: bool) -> Self {
        self.notifications_enabled = enabled;
        self
    }

    pub fn sound_enabled(mut self, enabled: bool) -> Self {
        self.sound_enabled = enabled;
        self
    }

    pub fn haptics_enabled(mut self, enabled: bool) -> Self {
        self.haptics_enabled = enabled;
        self
    }

    /// Mark the run as time-compressed; forwarded to the notification port.
    pub fn testing(mut self, testing: bool) -> Self {
        self.testing = testing;
        self
    }

    pub fn dispatch(&self, intent: &Intent) {
        match intent {
            Intent::Notify { kind, delay_secs } => {
                if self.notifications_enabled {
                    self.notifications.schedule(*kind, *delay_secs, self.testing);
                }
            }
            Intent::StartLoopingSound => {
                if self.sound_enabled {
                    self.sound.start_looping();
                }
            }
            // Stop always goes through, so flipping the toggle off can
            // never strand a playing loop.
            Intent::StopLoopingSound => self.sound.stop_looping(),
            Intent::Haptic { style } => {
                if self.haptics_enabled {
                    self.haptics.trigger(*style);
                }
            }
        }
    }

    pub fn dispatch_all(&self, intents: &[Intent]) {
        for intent in intents {
            self.dispatch(intent);
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use std::sync::{Arc, Mutex};

    /// Records every port call for assertions.
    #[derive(Debug, Default, Clone)]
    pub struct Recorder {
        pub calls: Arc<Mutex<Vec<String>>>,
    }

    impl Recorder {
        pub fn log(&self, entry: String) {
            self.calls.lock().unwrap().push(entry);
        }

        pub fn taken(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl NotificationPort for Recorder {
        fn schedule(&self, kind: NotificationKind, delay_secs: u64, testing: bool) {
            self.log(format!(
                "notify:{}:{delay_secs}:{testing}",
                kind.identifier()
            ));
        }
    }

    impl SoundPort for Recorder {
        fn start_looping(&self) {
            self.log("sound:start".into());
        }

        fn stop_looping(&self) {
            self.log("sound:stop".into());
        }
    }

    impl HapticPort for Recorder {
        fn trigger(&self, style: HapticStyle) {
            self.log(format!("haptic:{style:?}"));
        }
    }

    pub fn recording_dispatcher() -> (IntentDispatcher, Recorder) {
        let recorder = Recorder::default();
        let dispatcher = IntentDispatcher::new(
            Box::new(recorder.clone()),
            Box::new(recorder.clone()),
            Box::new(recorder.clone()),
        );
        (dispatcher, recorder)
    }
}
