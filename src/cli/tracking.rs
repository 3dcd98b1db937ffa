//! Foreground tracking loop: the CLI's stand-in for a tray clock.
//! Ticks the engine once per second and redraws a single status line until
//! SIGINT/SIGTERM.

use crate::core::{Clock, SessionEngine, TaskStore};
use crate::errors::AppResult;
use crate::ui::messages::{error, info};
use crate::utils::formatting::{format_duration_compact, status_line};
use std::io::{self, Write};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

const TICK: Duration = Duration::from_secs(1);

pub fn track_foreground<S: TaskStore, C: Clock>(engine: &mut SessionEngine<S, C>) -> AppResult<()> {
    let shutdown_flag = Arc::new(AtomicBool::new(false));
    signal_hook::flag::register(signal_hook::consts::SIGTERM, Arc::clone(&shutdown_flag))?;
    signal_hook::flag::register(signal_hook::consts::SIGINT, Arc::clone(&shutdown_flag))?;

    info("Tracking… press Ctrl-C to leave (the task stays open).");

    let mut show_colon = false;
    let listener = engine.subscribe(move |snap| {
        show_colon = !show_colon;
        let line = status_line(snap.task_name.as_deref(), snap.elapsed_secs);
        print!(
            "\r{}  ({})   ",
            line,
            format_duration_compact(snap.elapsed_secs, show_colon)
        );
        let _ = io::stdout().flush();
    });

    while !shutdown_flag.load(Ordering::Relaxed) {
        // A failed checkpoint keeps its window open and is retried next tick.
        if let Err(e) = engine.tick() {
            println!();
            error(format!("Checkpoint failed: {}", e));
        }
        thread::sleep(TICK);
    }

    engine.unsubscribe(listener);
    println!();
    Ok(())
}
