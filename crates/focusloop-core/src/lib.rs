//! # Focusloop Core Library
//!
//! Core business logic for the Focusloop focus/break timer. All operations
//! are available through a standalone CLI binary; GUI layers are thin
//! shells over this same library.
//!
//! ## Architecture
//!
//! - **Schedule builder**: a pure function turning a total focus budget
//!   into an ordered focus/break session sequence
//! - **Timer engine**: a tick-driven state machine that requires the
//!   caller to invoke `tick()` once per simulated second
//! - **Ports**: narrow interfaces for notifications, the looping break
//!   alert and haptics; the engine emits intents, injected ports execute
//!   them
//! - **Storage**: TOML configuration and a SQLite key-value store for
//!   engine state
//!
//! ## Key Components
//!
//! - [`ScheduleBuilder`]: cadence algorithm
//! - [`TimerEngine`]: countdown state machine
//! - [`IntentDispatcher`]: side-effect execution with config gating
//! - [`Config`]: application configuration management

pub mod error;
pub mod events;
pub mod ports;
pub mod storage;
pub mod timer;

pub use error::{ConfigError, CoreError, ScheduleError, StorageError, TimerError};
pub use events::Event;
pub use ports::{
    HapticPort, HapticStyle, Intent, IntentDispatcher, NotificationKind, NotificationPort,
    SoundPort,
};
pub use storage::{Config, StateDb};
pub use timer::{
    Cadence, Emitted, Schedule, ScheduleBuilder, SessionDescriptor, SessionKind, TickDriver,
    TimerEngine, TimerStatus,
};
