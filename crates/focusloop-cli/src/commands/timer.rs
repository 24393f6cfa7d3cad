use clap::Subcommand;
use focusloop_core::storage::StateDb;
use focusloop_core::{
    Config, Emitted, IntentDispatcher, TickDriver, TimerEngine, TimerStatus,
};

const ENGINE_KEY: &str = "timer_engine";

#[derive(Subcommand)]
pub enum TimerAction {
    /// Build a focus/break schedule for a total budget
    Setup {
        /// Total focus budget in minutes
        minutes: u64,
        /// Simulated seconds per wall-clock second (QA time compression)
        #[arg(long)]
        time_scale: Option<u32>,
    },
    /// Start the current session
    Start,
    /// Pause the running countdown
    Pause,
    /// Resume a paused countdown
    Resume,
    /// Abandon the current session and move on to the next
    Stop,
    /// Jump past the current session
    Skip,
    /// Acknowledge the break prompt and start the break
    ConfirmBreak,
    /// Full halt: back to idle at the top of the schedule
    Reset,
    /// Print current timer state as JSON
    Status,
    /// Drive the countdown live, printing events as they happen
    Run {
        /// Acknowledge break prompts automatically (unattended run)
        #[arg(long)]
        auto_confirm: bool,
    },
}

fn load_engine(db: &StateDb, config: &Config) -> TimerEngine {
    if let Ok(Some(json)) = db.kv_get(ENGINE_KEY) {
        if let Ok(engine) = serde_json::from_str::<TimerEngine>(&json) {
            return engine;
        }
    }
    TimerEngine::with_cadence(config.cadence)
}

fn save_engine(db: &StateDb, engine: &TimerEngine) -> Result<(), Box<dyn std::error::Error>> {
    let json = serde_json::to_string(engine)?;
    db.kv_set(ENGINE_KEY, &json)?;
    Ok(())
}

fn dispatcher_for(config: &Config, engine: &TimerEngine) -> IntentDispatcher {
    IntentDispatcher::headless()
        .notifications_enabled(config.notifications.enabled)
        .sound_enabled(config.notifications.sound)
        .haptics_enabled(config.notifications.vibration)
        .testing(engine.is_testing())
}

/// Dispatch intents and print events; fall back to a snapshot when the
/// call emitted nothing.
fn report(
    engine: &TimerEngine,
    dispatcher: &IntentDispatcher,
    out: Emitted,
) -> Result<(), Box<dyn std::error::Error>> {
    dispatcher.dispatch_all(&out.intents);
    if out.events.is_empty() {
        println!("{}", serde_json::to_string_pretty(&engine.snapshot())?);
    } else {
        for event in &out.events {
            println!("{}", serde_json::to_string_pretty(event)?);
        }
    }
    Ok(())
}

pub fn run(action: TimerAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let db = StateDb::open()?;
    let mut engine = load_engine(&db, &config);

    match action {
        TimerAction::Setup { minutes, time_scale } => {
            engine.setup_schedule(minutes * 60)?;
            engine.set_time_scale(time_scale.unwrap_or(config.time_scale));
            println!("{}", serde_json::to_string_pretty(&engine.snapshot())?);
        }
        TimerAction::Start => {
            let out = engine.start();
            report(&engine, &dispatcher_for(&config, &engine), out)?;
        }
        TimerAction::Pause => {
            let out = engine.pause();
            report(&engine, &dispatcher_for(&config, &engine), out)?;
        }
        TimerAction::Resume => {
            let out = engine.resume();
            report(&engine, &dispatcher_for(&config, &engine), out)?;
        }
        TimerAction::Stop => {
            let out = engine.stop();
            report(&engine, &dispatcher_for(&config, &engine), out)?;
        }
        TimerAction::Skip => {
            let out = engine.skip();
            report(&engine, &dispatcher_for(&config, &engine), out)?;
        }
        TimerAction::ConfirmBreak => {
            let out = engine.confirm_break_start();
            report(&engine, &dispatcher_for(&config, &engine), out)?;
        }
        TimerAction::Reset => {
            let out = engine.reset();
            report(&engine, &dispatcher_for(&config, &engine), out)?;
        }
        TimerAction::Status => {
            println!("{}", serde_json::to_string_pretty(&engine.snapshot())?);
        }
        TimerAction::Run { auto_confirm } => {
            let dispatcher = dispatcher_for(&config, &engine);
            let out = engine.start();
            report(&engine, &dispatcher, out)?;

            if matches!(
                engine.status(),
                TimerStatus::Running | TimerStatus::AwaitingBreak
            ) {
                let runtime = tokio::runtime::Runtime::new()?;
                let status = runtime.block_on(
                    TickDriver::new()
                        .auto_confirm_breaks(auto_confirm)
                        .run(&mut engine, &dispatcher, |event| {
                            if let Ok(json) = serde_json::to_string_pretty(event) {
                                println!("{json}");
                            }
                        }),
                );
                tracing::info!(?status, "tick driver finished");
            }
            println!("{}", serde_json::to_string_pretty(&engine.snapshot())?);
        }
    }

    save_engine(&db, &engine)?;
    Ok(())
}
