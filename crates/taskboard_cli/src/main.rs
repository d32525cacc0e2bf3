//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `taskboard_core` wiring.
//! - Print the demonstration board deterministically (no timestamps).
//!
//! Set `TASKBOARD_LOG_DIR` to an absolute path to enable file logging.

use taskboard_core::{default_log_level, init_logging, TaskController};

const LOG_DIR_ENV: &str = "TASKBOARD_LOG_DIR";

fn main() {
    if let Ok(log_dir) = std::env::var(LOG_DIR_ENV) {
        if let Err(err) = init_logging(default_log_level(), &log_dir) {
            eprintln!("taskboard logging disabled: {err}");
        }
    }

    println!("taskboard_core ping={}", taskboard_core::ping());
    println!("taskboard_core version={}", taskboard_core::core_version());

    let mut board = TaskController::new();
    board.subscribe_statistics(|stats| {
        println!(
            "stats total={} completed={} pending={}",
            stats.total, stats.completed, stats.pending
        );
    });
    board.load_sample_data();

    for (index, task) in board.model().iter().enumerate() {
        let mark = if task.completed() { "x" } else { " " };
        println!(
            "{index}. [{mark}] {:<6} {} - {}",
            task.priority_string(),
            task.title(),
            task.description()
        );
    }
}
