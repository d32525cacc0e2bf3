//! Board controller: aggregate statistics and task use-cases.
//!
//! # Responsibility
//! - Own the `TaskListModel` for the lifetime of the board.
//! - Expose create/delete/toggle/clear entry points and index queries.
//! - Re-derive and publish `TaskStatistics` whenever the row count or a
//!   completed flag changes.
//!
//! # Invariants
//! - `completed + pending == total` for every published snapshot.
//! - Statistics are recomputed from the rows on every publish, never patched.
//! - Index queries return ascending row snapshots that go stale after the
//!   next structural change.

use crate::model::list::{ListenerId, ModelEvent, TaskListModel, TaskListResult, TaskValue};
use crate::model::task::{Priority, Task, TaskField};
use log::{debug, info, warn};
use serde::Serialize;
use std::cell::RefCell;
use std::fmt::{Debug, Formatter};
use std::rc::Rc;

/// Demonstration tasks appended by `load_sample_data`.
const SAMPLE_TASKS: [(&str, &str, Priority); 4] = [
    ("Learn Qt QML", "Study Qt Quick and QML basics", Priority::Medium),
    (
        "Write unit tests",
        "Add comprehensive test coverage",
        Priority::High,
    ),
    ("Documentation", "Write project documentation", Priority::Low),
    ("Code review", "Review pull requests", Priority::Medium),
];

/// Aggregate counts shown in the board header.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TaskStatistics {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
}

impl TaskStatistics {
    /// Counts rows with a single linear scan.
    pub fn from_tasks(tasks: &[Task]) -> Self {
        let total = tasks.len();
        let completed = tasks.iter().filter(|task| task.completed()).count();
        Self {
            total,
            completed,
            pending: total - completed,
        }
    }
}

/// Handle returned by `subscribe_statistics`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StatisticsListenerId(u64);

pub type StatisticsListener = Box<dyn FnMut(&TaskStatistics)>;

#[derive(Default)]
struct StatisticsHub {
    listeners: Vec<(StatisticsListenerId, StatisticsListener)>,
    next_id: u64,
}

impl StatisticsHub {
    fn publish(&mut self, statistics: TaskStatistics) {
        debug!(
            "event=statistics_publish module=controller status=ok total={} completed={} pending={}",
            statistics.total, statistics.completed, statistics.pending
        );
        for (_, listener) in self.listeners.iter_mut() {
            listener(&statistics);
        }
    }
}

fn affects_statistics(event: &ModelEvent) -> bool {
    matches!(
        event,
        ModelEvent::CountChanged { .. }
            | ModelEvent::DataChanged {
                field: TaskField::Completed,
                ..
            }
    )
}

/// Use-case controller for one task board.
pub struct TaskController {
    model: TaskListModel,
    hub: Rc<RefCell<StatisticsHub>>,
}

impl Debug for TaskController {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskController")
            .field("model", &self.model)
            .field("statistics", &self.statistics())
            .finish()
    }
}

impl Default for TaskController {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskController {
    /// Creates an empty board wired to republish statistics on model changes.
    pub fn new() -> Self {
        let hub = Rc::new(RefCell::new(StatisticsHub::default()));
        let mut model = TaskListModel::new();
        let sink = Rc::clone(&hub);
        model.subscribe(move |event, tasks| {
            if affects_statistics(event) {
                sink.borrow_mut().publish(TaskStatistics::from_tasks(tasks));
            }
        });
        Self { model, hub }
    }

    /// Read access for row rendering.
    pub fn model(&self) -> &TaskListModel {
        &self.model
    }

    /// Registers a binding-layer listener on the underlying model.
    pub fn subscribe_model(
        &mut self,
        listener: impl FnMut(&ModelEvent, &[Task]) + 'static,
    ) -> ListenerId {
        self.model.subscribe(listener)
    }

    pub fn unsubscribe_model(&mut self, id: ListenerId) -> bool {
        self.model.unsubscribe(id)
    }

    pub fn total_tasks(&self) -> usize {
        self.model.len()
    }

    pub fn completed_tasks(&self) -> usize {
        self.model.iter().filter(|task| task.completed()).count()
    }

    pub fn pending_tasks(&self) -> usize {
        self.total_tasks() - self.completed_tasks()
    }

    pub fn statistics(&self) -> TaskStatistics {
        TaskStatistics::from_tasks(self.model.tasks())
    }

    /// Registers a listener receiving every republished statistics snapshot.
    pub fn subscribe_statistics(
        &mut self,
        listener: impl FnMut(&TaskStatistics) + 'static,
    ) -> StatisticsListenerId {
        let mut hub = self.hub.borrow_mut();
        let id = StatisticsListenerId(hub.next_id);
        hub.next_id += 1;
        hub.listeners.push((id, Box::new(listener)));
        id
    }

    pub fn unsubscribe_statistics(&mut self, id: StatisticsListenerId) -> bool {
        let mut hub = self.hub.borrow_mut();
        let before = hub.listeners.len();
        hub.listeners.retain(|(listener_id, _)| *listener_id != id);
        hub.listeners.len() != before
    }

    /// Creates a task and applies `priority` when it is a valid non-default level.
    ///
    /// An out-of-range `priority` keeps the default `Medium`.
    ///
    /// # Errors
    /// - `BlankTitle` when the trimmed title is empty; the board is unchanged.
    pub fn create_task(
        &mut self,
        title: &str,
        description: impl Into<String>,
        priority: i64,
    ) -> TaskListResult<usize> {
        let row = self.model.add_task(title, description)?;
        if let Some(level) = Priority::from_raw(priority) {
            if level != Priority::default() {
                self.model.set_priority(row, level.as_raw())?;
            }
        }
        Ok(row)
    }

    /// Deletes the task at `index`.
    pub fn delete_task(&mut self, index: usize) -> TaskListResult<Task> {
        self.model.remove_task(index)
    }

    /// Toggles completion, then republishes statistics unconditionally.
    ///
    /// Returns `false` when `index` is invalid.
    pub fn toggle_task(&mut self, index: usize) -> bool {
        let toggled = self.model.toggle_completed(index);
        self.publish_statistics();
        toggled
    }

    /// Removes every completed task; returns how many were removed.
    pub fn clear_completed_tasks(&mut self) -> usize {
        self.model.clear_completed()
    }

    /// Writes one field through the model.
    pub fn set_task_field(&mut self, index: usize, field: TaskField, value: TaskValue) -> bool {
        self.model.set_data(index, field, value)
    }

    pub fn set_title(&mut self, index: usize, title: impl Into<String>) -> TaskListResult<bool> {
        self.model.set_title(index, title)
    }

    pub fn set_description(
        &mut self,
        index: usize,
        description: impl Into<String>,
    ) -> TaskListResult<bool> {
        self.model.set_description(index, description)
    }

    pub fn set_completed(&mut self, index: usize, completed: bool) -> TaskListResult<bool> {
        self.model.set_completed(index, completed)
    }

    /// Applies a raw priority literal; out-of-range values are a silent no-op.
    pub fn set_priority(&mut self, index: usize, priority: i64) -> TaskListResult<bool> {
        self.model.set_priority(index, priority)
    }

    /// Appends the fixed demonstration tasks.
    pub fn load_sample_data(&mut self) {
        for (title, description, priority) in SAMPLE_TASKS {
            if let Err(err) = self.create_task(title, description, priority.as_raw()) {
                warn!("event=sample_data_load module=controller status=error reason={err}");
            }
        }
        info!(
            "event=sample_data_load module=controller status=ok count={}",
            self.model.len()
        );
    }

    /// Rows whose priority equals the raw literal, ascending.
    pub fn tasks_by_priority(&self, priority: i64) -> Vec<usize> {
        self.indices_where(|task| task.priority().as_raw() == priority)
    }

    pub fn completed_task_indices(&self) -> Vec<usize> {
        self.indices_where(Task::completed)
    }

    pub fn pending_task_indices(&self) -> Vec<usize> {
        self.indices_where(|task| !task.completed())
    }

    fn indices_where(&self, predicate: impl Fn(&Task) -> bool) -> Vec<usize> {
        self.model
            .iter()
            .enumerate()
            .filter(|(_, task)| predicate(*task))
            .map(|(index, _)| index)
            .collect()
    }

    fn publish_statistics(&self) {
        let statistics = self.statistics();
        self.hub.borrow_mut().publish(statistics);
    }
}
