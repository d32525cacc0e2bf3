//! Core domain logic for the task board.
//! This crate is the single source of truth for task invariants; UI and FFI
//! layers only render what it reports.

pub mod logging;
pub mod model;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status, LogLevel, LoggingError};
pub use model::list::{
    ListenerId, ModelEvent, ModelListener, TaskListError, TaskListModel, TaskListResult, TaskValue,
};
pub use model::task::{priority_label, Priority, Task, TaskField};
pub use service::task_controller::{
    StatisticsListener, StatisticsListenerId, TaskController, TaskStatistics,
};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
