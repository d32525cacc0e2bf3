//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose board use-cases to Dart via FRB as sync calls.
//! - Flatten core results into plain DTOs and response envelopes.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - One board per UI thread; it is created lazily on first access.
//! - Negative or out-of-range indices are reported as failures, never clamped.

use log::warn;
use std::cell::RefCell;
use taskboard_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    Task, TaskController, TaskListResult, TaskStatistics,
};

const SAMPLE_DATA_ENV: &str = "TASKBOARD_SAMPLE_DATA";

thread_local! {
    static BOARD: RefCell<Option<TaskController>> = const { RefCell::new(None) };
}

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// One board row as rendered by the list view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskItem {
    /// Current row position; invalidated by the next insert/remove.
    pub index: i64,
    pub title: String,
    pub description: String,
    pub completed: bool,
    /// Raw priority literal (`0=Low, 1=Medium, 2=High`).
    pub priority: i64,
    pub priority_label: String,
    /// Creation time in Unix epoch milliseconds.
    pub created_at_ms: i64,
}

/// Header counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskStatisticsDto {
    pub total: i64,
    pub completed: i64,
    pub pending: i64,
}

/// Generic action response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskActionResponse {
    /// Whether operation succeeded.
    pub ok: bool,
    /// Affected row, when the action targets one.
    pub index: Option<i64>,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
    /// Statistics after the action.
    pub statistics: TaskStatisticsDto,
}

impl TaskActionResponse {
    fn success(message: impl Into<String>, index: Option<usize>, board: &TaskController) -> Self {
        Self {
            ok: true,
            index: index.map(to_ffi_int),
            message: message.into(),
            statistics: to_statistics_dto(board.statistics()),
        }
    }

    fn failure(message: impl Into<String>, board: &TaskController) -> Self {
        Self {
            ok: false,
            index: None,
            message: message.into(),
            statistics: to_statistics_dto(board.statistics()),
        }
    }
}

/// Lists every row in board order.
#[flutter_rust_bridge::frb(sync)]
pub fn task_list() -> Vec<TaskItem> {
    with_board(|board| {
        board
            .model()
            .iter()
            .enumerate()
            .map(|(index, task)| to_task_item(index, task))
            .collect()
    })
}

/// Returns current total/completed/pending counters.
#[flutter_rust_bridge::frb(sync)]
pub fn task_statistics() -> TaskStatisticsDto {
    with_board(|board| to_statistics_dto(board.statistics()))
}

/// Creates a task; `priority` outside `0..=2` keeps the default Medium.
#[flutter_rust_bridge::frb(sync)]
pub fn task_create(title: String, description: String, priority: i64) -> TaskActionResponse {
    with_board(|board| {
        let result = board.create_task(title.as_str(), description, priority);
        respond(board, "task_create", "Task created.", result)
    })
}

/// Deletes the row at `index`.
#[flutter_rust_bridge::frb(sync)]
pub fn task_delete(index: i64) -> TaskActionResponse {
    with_board(|board| {
        let Some(row) = to_row(index, board) else {
            return invalid_index(board, "task_delete", index);
        };
        let result = board.delete_task(row).map(|_| row);
        respond(board, "task_delete", "Task deleted.", result)
    })
}

/// Toggles completion of the row at `index`.
#[flutter_rust_bridge::frb(sync)]
pub fn task_toggle(index: i64) -> TaskActionResponse {
    with_board(|board| {
        let Some(row) = to_row(index, board) else {
            return invalid_index(board, "task_toggle", index);
        };
        board.toggle_task(row);
        TaskActionResponse::success("Task toggled.", Some(row), board)
    })
}

/// Removes every completed row.
#[flutter_rust_bridge::frb(sync)]
pub fn task_clear_completed() -> TaskActionResponse {
    with_board(|board| {
        let removed = board.clear_completed_tasks();
        TaskActionResponse::success(format!("Removed {removed} task(s)."), None, board)
    })
}

/// Appends the demonstration tasks.
#[flutter_rust_bridge::frb(sync)]
pub fn task_load_sample_data() -> TaskActionResponse {
    with_board(|board| {
        board.load_sample_data();
        TaskActionResponse::success("Sample tasks loaded.", None, board)
    })
}

/// Replaces the title of the row at `index`.
#[flutter_rust_bridge::frb(sync)]
pub fn task_set_title(index: i64, title: String) -> TaskActionResponse {
    with_board(|board| {
        let Some(row) = to_row(index, board) else {
            return invalid_index(board, "task_set_title", index);
        };
        let result = board.set_title(row, title).map(|_| row);
        respond(board, "task_set_title", "Title updated.", result)
    })
}

/// Replaces the description of the row at `index`.
#[flutter_rust_bridge::frb(sync)]
pub fn task_set_description(index: i64, description: String) -> TaskActionResponse {
    with_board(|board| {
        let Some(row) = to_row(index, board) else {
            return invalid_index(board, "task_set_description", index);
        };
        let result = board.set_description(row, description).map(|_| row);
        respond(board, "task_set_description", "Description updated.", result)
    })
}

/// Sets priority of the row at `index`; out-of-range literals change nothing.
#[flutter_rust_bridge::frb(sync)]
pub fn task_set_priority(index: i64, priority: i64) -> TaskActionResponse {
    with_board(|board| {
        let Some(row) = to_row(index, board) else {
            return invalid_index(board, "task_set_priority", index);
        };
        let result = board.set_priority(row, priority).map(|_| row);
        respond(board, "task_set_priority", "Priority updated.", result)
    })
}

/// Rows with the given raw priority, ascending.
#[flutter_rust_bridge::frb(sync)]
pub fn task_indices_by_priority(priority: i64) -> Vec<i64> {
    with_board(|board| to_ffi_indices(board.tasks_by_priority(priority)))
}

#[flutter_rust_bridge::frb(sync)]
pub fn task_completed_indices() -> Vec<i64> {
    with_board(|board| to_ffi_indices(board.completed_task_indices()))
}

#[flutter_rust_bridge::frb(sync)]
pub fn task_pending_indices() -> Vec<i64> {
    with_board(|board| to_ffi_indices(board.pending_task_indices()))
}

/// Drops the current board and starts an empty one.
#[flutter_rust_bridge::frb(sync)]
pub fn task_reset() {
    BOARD.with(|slot| {
        *slot.borrow_mut() = Some(TaskController::new());
    });
}

fn with_board<R>(f: impl FnOnce(&mut TaskController) -> R) -> R {
    BOARD.with(|slot| {
        let mut slot = slot.borrow_mut();
        let board = slot.get_or_insert_with(new_board);
        f(board)
    })
}

fn new_board() -> TaskController {
    let mut board = TaskController::new();
    if sample_data_requested() {
        board.load_sample_data();
    }
    board
}

fn sample_data_requested() -> bool {
    std::env::var(SAMPLE_DATA_ENV)
        .map(|raw| matches!(raw.trim().to_ascii_lowercase().as_str(), "1" | "true"))
        .unwrap_or(false)
}

fn respond(
    board: &TaskController,
    action: &str,
    message: &str,
    result: TaskListResult<usize>,
) -> TaskActionResponse {
    match result {
        Ok(row) => TaskActionResponse::success(message, Some(row), board),
        Err(err) => {
            warn!("event={action} module=ffi status=error");
            TaskActionResponse::failure(format!("{action} failed: {err}"), board)
        }
    }
}

fn invalid_index(board: &TaskController, action: &str, index: i64) -> TaskActionResponse {
    warn!("event={action} module=ffi status=error reason=invalid_index index={index}");
    TaskActionResponse::failure(
        format!(
            "{action} failed: task index {index} out of range for {} task(s)",
            board.total_tasks()
        ),
        board,
    )
}

fn to_row(index: i64, board: &TaskController) -> Option<usize> {
    usize::try_from(index)
        .ok()
        .filter(|row| *row < board.total_tasks())
}

fn to_ffi_int(value: usize) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

fn to_ffi_indices(indices: Vec<usize>) -> Vec<i64> {
    indices.into_iter().map(to_ffi_int).collect()
}

fn to_statistics_dto(statistics: TaskStatistics) -> TaskStatisticsDto {
    TaskStatisticsDto {
        total: to_ffi_int(statistics.total),
        completed: to_ffi_int(statistics.completed),
        pending: to_ffi_int(statistics.pending),
    }
}

fn to_task_item(index: usize, task: &Task) -> TaskItem {
    TaskItem {
        index: to_ffi_int(index),
        title: task.title().to_string(),
        description: task.description().to_string(),
        completed: task.completed(),
        priority: task.priority().as_raw(),
        priority_label: task.priority_string().to_string(),
        created_at_ms: task.created_at().timestamp_millis(),
    }
}

#[cfg(test)]
mod tests {
    use super::{
        core_version, init_logging, ping, task_clear_completed, task_completed_indices,
        task_create, task_delete, task_indices_by_priority, task_list, task_load_sample_data,
        task_pending_indices, task_reset, task_set_priority, task_set_title, task_statistics,
        task_toggle, TaskStatisticsDto,
    };

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn init_logging_rejects_empty_log_dir() {
        let error = init_logging("info".to_string(), String::new());
        assert!(!error.is_empty());
    }

    #[test]
    fn init_logging_rejects_unsupported_level() {
        let error = init_logging("verbose".to_string(), "tmp/logs".to_string());
        assert!(error.contains("unsupported log level"));
    }

    #[test]
    fn create_toggle_clear_flow() {
        task_reset();
        assert!(task_create("A".into(), String::new(), 2).ok);
        assert!(task_create("B".into(), String::new(), 1).ok);
        let created = task_create("C".into(), String::new(), 0);
        assert_eq!(created.index, Some(2));
        assert_eq!(
            created.statistics,
            TaskStatisticsDto {
                total: 3,
                completed: 0,
                pending: 3
            }
        );

        assert!(task_toggle(0).ok);
        let toggled = task_toggle(1);
        assert_eq!(toggled.statistics.completed, 2);
        assert_eq!(task_completed_indices(), [0, 1]);
        assert_eq!(task_pending_indices(), [2]);

        let cleared = task_clear_completed();
        assert!(cleared.message.contains('2'));
        let rows = task_list();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].title, "C");
        assert_eq!(rows[0].priority_label, "Low");
        assert!(!rows[0].completed);
        assert!(rows[0].created_at_ms > 0);
    }

    #[test]
    fn blank_title_is_reported() {
        task_reset();
        let response = task_create("   ".into(), "desc".into(), 1);
        assert!(!response.ok);
        assert!(response.message.contains("blank"));
        assert_eq!(task_statistics().total, 0);
    }

    #[test]
    fn invalid_indices_are_rejected() {
        task_reset();
        task_create("A".into(), String::new(), 1);

        assert!(!task_delete(-1).ok);
        assert!(!task_delete(1).ok);
        assert!(!task_toggle(3).ok);
        assert!(!task_set_title(9, "x".into()).ok);
        assert_eq!(task_statistics().total, 1);
        assert!(task_delete(0).ok);
    }

    #[test]
    fn sample_data_and_priority_queries() {
        task_reset();
        let loaded = task_load_sample_data();
        assert_eq!(loaded.statistics.total, 4);
        assert_eq!(task_indices_by_priority(1), [0, 3]);

        assert!(task_set_priority(0, 2).ok);
        assert!(task_set_priority(0, 7).ok);
        assert_eq!(task_indices_by_priority(2), [0, 1]);
        assert!(task_set_title(0, "Learn Flutter".into()).ok);
        assert_eq!(task_list()[0].title, "Learn Flutter");
    }
}
