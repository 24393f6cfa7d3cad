mod driver;
mod engine;
mod schedule;

pub use driver::TickDriver;
pub use engine::{Emitted, TimerEngine, TimerStatus};
pub use schedule::{Cadence, Schedule, ScheduleBuilder, SessionDescriptor, SessionKind};
