//! Ordered task collection with change notification.
//!
//! # Responsibility
//! - Own every `Task` on the board, in insertion order.
//! - Expose row/field access for the UI binding layer.
//! - Notify subscribers synchronously after each committed mutation.
//!
//! # Invariants
//! - Row index is the position in insertion order; removal shifts later rows
//!   down by one. There is no stable external ID.
//! - Tasks are only mutable through this model, so every field change emits
//!   `ModelEvent::DataChanged` naming the field.
//! - Writes that leave a value unchanged emit nothing.

use crate::model::task::{Task, TaskField};
use chrono::{DateTime, Local};
use log::debug;
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};

/// Typed value for role-based field access.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskValue {
    /// `Title` and `Description`.
    Text(String),
    /// `Completed`.
    Flag(bool),
    /// `Priority`, as the raw UI literal.
    Priority(i64),
    /// `CreatedAt`.
    Timestamp(DateTime<Local>),
}

/// Notification delivered to model subscribers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelEvent {
    /// Rows `first..=last` were appended.
    RowsInserted { first: usize, last: usize },
    /// Rows `first..=last` were removed; later rows moved up.
    RowsRemoved { first: usize, last: usize },
    /// One field of one row changed.
    DataChanged { row: usize, field: TaskField },
    /// Row count changed; `count` is the new length.
    CountChanged { count: usize },
}

/// Handle returned by `subscribe`, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Model subscriber. Receives the event and the committed rows.
pub type ModelListener = Box<dyn FnMut(&ModelEvent, &[Task])>;

/// Errors from collection operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskListError {
    /// Title is empty after trim.
    BlankTitle,
    /// Row index is not in `0..len`.
    IndexOutOfRange { index: usize, len: usize },
    /// Field cannot be written.
    ReadOnlyField(TaskField),
    /// Value variant does not match the field.
    TypeMismatch { field: TaskField },
}

impl Display for TaskListError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankTitle => write!(f, "task title must not be blank"),
            Self::IndexOutOfRange { index, len } => {
                write!(f, "task index {index} out of range for {len} task(s)")
            }
            Self::ReadOnlyField(field) => {
                write!(f, "task field `{}` is read-only", field.role_name())
            }
            Self::TypeMismatch { field } => {
                write!(f, "value type does not match task field `{}`", field.role_name())
            }
        }
    }
}

impl Error for TaskListError {}

pub type TaskListResult<T> = Result<T, TaskListError>;

/// In-memory list model backing the board view.
#[derive(Default)]
pub struct TaskListModel {
    tasks: Vec<Task>,
    listeners: Vec<(ListenerId, ModelListener)>,
    next_listener_id: u64,
}

impl Debug for TaskListModel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskListModel")
            .field("tasks", &self.tasks)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl TaskListModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Task> {
        self.tasks.iter()
    }

    /// Returns the task at `index`, or `None` when out of range.
    pub fn get(&self, index: usize) -> Option<&Task> {
        self.tasks.get(index)
    }

    /// Field bindings exposed to the UI layer, in declaration order.
    pub fn role_names(&self) -> Vec<(TaskField, &'static str)> {
        TaskField::ALL
            .iter()
            .map(|field| (*field, field.role_name()))
            .collect()
    }

    /// Registers a subscriber called after every committed mutation.
    pub fn subscribe(
        &mut self,
        listener: impl FnMut(&ModelEvent, &[Task]) + 'static,
    ) -> ListenerId {
        let id = ListenerId(self.next_listener_id);
        self.next_listener_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns `false` when `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    /// Appends a new open task and returns its row.
    ///
    /// # Errors
    /// - `BlankTitle` when the trimmed title is empty; the model is unchanged.
    pub fn add_task(
        &mut self,
        title: &str,
        description: impl Into<String>,
    ) -> TaskListResult<usize> {
        let title = title.trim();
        if title.is_empty() {
            debug!("event=task_add module=list status=rejected reason=blank_title");
            return Err(TaskListError::BlankTitle);
        }

        let row = self.tasks.len();
        self.tasks.push(Task::new(title, description));
        debug!("event=task_add module=list status=ok row={row}");

        self.emit(ModelEvent::RowsInserted {
            first: row,
            last: row,
        });
        self.emit(ModelEvent::CountChanged {
            count: self.tasks.len(),
        });
        Ok(row)
    }

    /// Removes and returns the task at `index`; later rows shift down.
    ///
    /// # Errors
    /// - `IndexOutOfRange` when `index >= len`; the model is unchanged.
    pub fn remove_task(&mut self, index: usize) -> TaskListResult<Task> {
        self.check_index(index)?;

        let task = self.tasks.remove(index);
        debug!(
            "event=task_remove module=list status=ok row={index} count={}",
            self.tasks.len()
        );

        self.emit(ModelEvent::RowsRemoved {
            first: index,
            last: index,
        });
        self.emit(ModelEvent::CountChanged {
            count: self.tasks.len(),
        });
        Ok(task)
    }

    /// Flips the completed flag; returns `false` for an invalid index.
    pub fn toggle_completed(&mut self, index: usize) -> bool {
        let Some(completed) = self.tasks.get(index).map(Task::completed) else {
            return false;
        };
        self.set_completed(index, !completed).is_ok()
    }

    /// Removes every completed task and returns how many were removed.
    ///
    /// Walks from the last row to the first so rows not yet visited keep
    /// their index while earlier removals happen.
    pub fn clear_completed(&mut self) -> usize {
        let mut removed = 0;
        for index in (0..self.tasks.len()).rev() {
            if self.tasks[index].completed() && self.remove_task(index).is_ok() {
                removed += 1;
            }
        }
        if removed > 0 {
            debug!("event=tasks_clear_completed module=list status=ok removed={removed}");
        }
        removed
    }

    /// Reads one field; `None` when `index` is out of range.
    pub fn data(&self, index: usize, field: TaskField) -> Option<TaskValue> {
        let task = self.tasks.get(index)?;
        let value = match field {
            TaskField::Title => TaskValue::Text(task.title().to_string()),
            TaskField::Description => TaskValue::Text(task.description().to_string()),
            TaskField::Completed => TaskValue::Flag(task.completed()),
            TaskField::CreatedAt => TaskValue::Timestamp(task.created_at()),
            TaskField::Priority => TaskValue::Priority(task.priority().as_raw()),
        };
        Some(value)
    }

    /// Writes one field; `false` when the write was refused.
    ///
    /// An out-of-range priority literal is accepted but changes nothing.
    pub fn set_data(&mut self, index: usize, field: TaskField, value: TaskValue) -> bool {
        self.try_set_data(index, field, value).is_ok()
    }

    /// Writes one field and reports whether the value changed.
    ///
    /// # Errors
    /// - `IndexOutOfRange` for an invalid row.
    /// - `ReadOnlyField` for `CreatedAt`.
    /// - `TypeMismatch` when `value` does not fit `field`.
    pub fn try_set_data(
        &mut self,
        index: usize,
        field: TaskField,
        value: TaskValue,
    ) -> TaskListResult<bool> {
        self.check_index(index)?;
        match (field, value) {
            (TaskField::Title, TaskValue::Text(title)) => {
                self.mutate(index, field, |task| task.set_title(title))
            }
            (TaskField::Description, TaskValue::Text(description)) => {
                self.mutate(index, field, |task| task.set_description(description))
            }
            (TaskField::Completed, TaskValue::Flag(completed)) => {
                self.mutate(index, field, |task| task.set_completed(completed))
            }
            (TaskField::Priority, TaskValue::Priority(raw)) => {
                self.mutate(index, field, |task| task.set_priority_raw(raw))
            }
            (TaskField::CreatedAt, _) => Err(TaskListError::ReadOnlyField(field)),
            (field, _) => Err(TaskListError::TypeMismatch { field }),
        }
    }

    pub fn set_title(&mut self, index: usize, title: impl Into<String>) -> TaskListResult<bool> {
        let title = title.into();
        self.mutate(index, TaskField::Title, |task| task.set_title(title))
    }

    pub fn set_description(
        &mut self,
        index: usize,
        description: impl Into<String>,
    ) -> TaskListResult<bool> {
        let description = description.into();
        self.mutate(index, TaskField::Description, |task| {
            task.set_description(description)
        })
    }

    pub fn set_completed(&mut self, index: usize, completed: bool) -> TaskListResult<bool> {
        self.mutate(index, TaskField::Completed, |task| {
            task.set_completed(completed)
        })
    }

    /// Applies a raw priority literal; out-of-range values are a silent no-op.
    pub fn set_priority(&mut self, index: usize, raw: i64) -> TaskListResult<bool> {
        self.mutate(index, TaskField::Priority, |task| task.set_priority_raw(raw))
    }

    fn mutate(
        &mut self,
        index: usize,
        field: TaskField,
        apply: impl FnOnce(&mut Task) -> bool,
    ) -> TaskListResult<bool> {
        self.check_index(index)?;
        let changed = apply(&mut self.tasks[index]);
        if changed {
            debug!(
                "event=task_update module=list status=ok row={index} field={}",
                field.role_name()
            );
            self.emit(ModelEvent::DataChanged { row: index, field });
        }
        Ok(changed)
    }

    fn check_index(&self, index: usize) -> TaskListResult<()> {
        if index < self.tasks.len() {
            Ok(())
        } else {
            Err(TaskListError::IndexOutOfRange {
                index,
                len: self.tasks.len(),
            })
        }
    }

    fn emit(&mut self, event: ModelEvent) {
        for (_, listener) in self.listeners.iter_mut() {
            listener(&event, &self.tasks);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ModelEvent, TaskListError, TaskListModel, TaskValue};
    use crate::model::task::{Priority, TaskField};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn recording_model() -> (TaskListModel, Rc<RefCell<Vec<ModelEvent>>>) {
        let mut model = TaskListModel::new();
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        model.subscribe(move |event, _| sink.borrow_mut().push(*event));
        (model, events)
    }

    #[test]
    fn add_task_trims_title_and_notifies() {
        let (mut model, events) = recording_model();

        let row = model.add_task("  Write report  ", "quarterly").expect("add");
        assert_eq!(row, 0);
        let task = model.get(0).expect("task");
        assert_eq!(task.title(), "Write report");
        assert_eq!(task.description(), "quarterly");
        assert_eq!(task.priority(), Priority::Medium);
        assert!(!task.completed());
        assert_eq!(
            *events.borrow(),
            [
                ModelEvent::RowsInserted { first: 0, last: 0 },
                ModelEvent::CountChanged { count: 1 },
            ]
        );
    }

    #[test]
    fn add_task_rejects_blank_title_silently() {
        let (mut model, events) = recording_model();
        assert_eq!(model.add_task("   ", ""), Err(TaskListError::BlankTitle));
        assert!(model.is_empty());
        assert!(events.borrow().is_empty());
    }

    #[test]
    fn remove_task_shifts_later_rows() {
        let (mut model, events) = recording_model();
        for title in ["a", "b", "c"] {
            model.add_task(title, "").expect("add");
        }
        events.borrow_mut().clear();

        let removed = model.remove_task(1).expect("remove");
        assert_eq!(removed.title(), "b");
        assert_eq!(model.get(1).expect("row 1").title(), "c");
        assert_eq!(
            *events.borrow(),
            [
                ModelEvent::RowsRemoved { first: 1, last: 1 },
                ModelEvent::CountChanged { count: 2 },
            ]
        );

        let err = model.remove_task(2).expect_err("out of range");
        assert_eq!(err, TaskListError::IndexOutOfRange { index: 2, len: 2 });
        assert_eq!(model.len(), 2);
    }

    #[test]
    fn toggle_completed_flips_and_ignores_bad_index() {
        let (mut model, events) = recording_model();
        model.add_task("a", "").expect("add");
        events.borrow_mut().clear();

        assert!(model.toggle_completed(0));
        assert!(model.get(0).expect("task").completed());
        assert!(model.toggle_completed(0));
        assert!(!model.get(0).expect("task").completed());
        assert!(!model.toggle_completed(5));
        assert_eq!(
            *events.borrow(),
            [
                ModelEvent::DataChanged {
                    row: 0,
                    field: TaskField::Completed
                },
                ModelEvent::DataChanged {
                    row: 0,
                    field: TaskField::Completed
                },
            ]
        );
    }

    #[test]
    fn clear_completed_removes_from_the_end() {
        let (mut model, events) = recording_model();
        for title in ["a", "b", "c", "d"] {
            model.add_task(title, "").expect("add");
        }
        model.toggle_completed(0);
        model.toggle_completed(2);
        events.borrow_mut().clear();

        assert_eq!(model.clear_completed(), 2);
        let titles: Vec<_> = model.iter().map(|task| task.title()).collect();
        assert_eq!(titles, ["b", "d"]);

        let removed_rows: Vec<_> = events
            .borrow()
            .iter()
            .filter_map(|event| match event {
                ModelEvent::RowsRemoved { first, .. } => Some(*first),
                _ => None,
            })
            .collect();
        assert_eq!(removed_rows, [2, 0]);

        assert_eq!(model.clear_completed(), 0);
        assert_eq!(model.len(), 2);
    }

    #[test]
    fn data_reads_typed_values() {
        let mut model = TaskListModel::new();
        model.add_task("a", "desc").expect("add");

        assert_eq!(
            model.data(0, TaskField::Title),
            Some(TaskValue::Text("a".to_string()))
        );
        assert_eq!(
            model.data(0, TaskField::Description),
            Some(TaskValue::Text("desc".to_string()))
        );
        assert_eq!(model.data(0, TaskField::Completed), Some(TaskValue::Flag(false)));
        assert_eq!(model.data(0, TaskField::Priority), Some(TaskValue::Priority(1)));
        let created = model.get(0).expect("task").created_at();
        assert_eq!(
            model.data(0, TaskField::CreatedAt),
            Some(TaskValue::Timestamp(created))
        );
        assert_eq!(model.data(1, TaskField::Title), None);
    }

    #[test]
    fn set_data_validates_and_notifies_once_per_change() {
        let (mut model, events) = recording_model();
        model.add_task("a", "").expect("add");
        events.borrow_mut().clear();

        assert!(model.set_data(0, TaskField::Priority, TaskValue::Priority(2)));
        assert!(model.set_data(0, TaskField::Priority, TaskValue::Priority(2)));
        assert!(model.set_data(0, TaskField::Priority, TaskValue::Priority(9)));
        assert_eq!(model.get(0).expect("task").priority(), Priority::High);

        assert!(!model.set_data(3, TaskField::Title, TaskValue::Text("x".into())));
        assert!(!model.set_data(0, TaskField::Title, TaskValue::Flag(true)));
        let created = model.get(0).expect("task").created_at();
        assert!(!model.set_data(0, TaskField::CreatedAt, TaskValue::Timestamp(created)));

        assert_eq!(
            *events.borrow(),
            [ModelEvent::DataChanged {
                row: 0,
                field: TaskField::Priority
            }]
        );
    }

    #[test]
    fn try_set_data_reports_refusal_reason() {
        let mut model = TaskListModel::new();
        model.add_task("a", "").expect("add");

        assert_eq!(
            model.try_set_data(0, TaskField::CreatedAt, TaskValue::Flag(true)),
            Err(TaskListError::ReadOnlyField(TaskField::CreatedAt))
        );
        assert_eq!(
            model.try_set_data(0, TaskField::Completed, TaskValue::Text("yes".into())),
            Err(TaskListError::TypeMismatch {
                field: TaskField::Completed
            })
        );
        assert_eq!(
            model.try_set_data(0, TaskField::Title, TaskValue::Text("b".into())),
            Ok(true)
        );
    }

    #[test]
    fn listeners_see_committed_rows_and_can_unsubscribe() {
        let mut model = TaskListModel::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let id = model.subscribe(move |event, tasks| {
            if let ModelEvent::CountChanged { count } = event {
                assert_eq!(*count, tasks.len());
                sink.borrow_mut().push(tasks.len());
            }
        });

        model.add_task("a", "").expect("add");
        model.add_task("b", "").expect("add");
        assert!(model.unsubscribe(id));
        assert!(!model.unsubscribe(id));
        model.add_task("c", "").expect("add");

        assert_eq!(*seen.borrow(), [1, 2]);
    }

    #[test]
    fn role_names_cover_every_field() {
        let model = TaskListModel::new();
        let names: Vec<_> = model.role_names().into_iter().map(|(_, name)| name).collect();
        assert_eq!(
            names,
            ["title", "description", "completed", "createdAt", "priority"]
        );
    }
}
