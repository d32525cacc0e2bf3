//! Task record.
//!
//! # Responsibility
//! - Define the single to-do entry rendered by every board row.
//! - Report whether a mutation actually changed state, so owners can
//!   decide whether to notify observers.
//!
//! # Invariants
//! - `created_at` is set at construction and never changes.
//! - `priority` is always one of the three `Priority` levels.
//! - Setting a field to its current value is reported as "unchanged".

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Task urgency level, ordered `Low < Medium < High`.
///
/// Raw values (`0..=2`) are the integer literals the UI layer passes in.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low = 0,
    #[default]
    Medium = 1,
    High = 2,
}

impl Priority {
    /// All levels in ascending order.
    pub const ALL: [Priority; 3] = [Priority::Low, Priority::Medium, Priority::High];

    /// Maps a raw UI literal to a level; `None` when out of range.
    pub fn from_raw(value: i64) -> Option<Self> {
        match value {
            0 => Some(Self::Low),
            1 => Some(Self::Medium),
            2 => Some(Self::High),
            _ => None,
        }
    }

    pub fn as_raw(self) -> i64 {
        self as i64
    }

    /// Display label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

/// Display label for a raw priority literal.
///
/// Returns `"Unknown"` for values outside `0..=2`.
pub fn priority_label(raw: i64) -> &'static str {
    Priority::from_raw(raw).map_or("Unknown", Priority::label)
}

/// Field selector used for role-based access and change notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskField {
    Title,
    Description,
    Completed,
    CreatedAt,
    Priority,
}

impl TaskField {
    pub const ALL: [TaskField; 5] = [
        TaskField::Title,
        TaskField::Description,
        TaskField::Completed,
        TaskField::CreatedAt,
        TaskField::Priority,
    ];

    /// Binding name exposed to the UI layer.
    pub fn role_name(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Description => "description",
            Self::Completed => "completed",
            Self::CreatedAt => "createdAt",
            Self::Priority => "priority",
        }
    }

    /// `CreatedAt` is the only read-only field.
    pub fn is_editable(self) -> bool {
        !matches!(self, Self::CreatedAt)
    }
}

/// One to-do entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    title: String,
    description: String,
    completed: bool,
    priority: Priority,
    created_at: DateTime<Local>,
}

impl Task {
    /// Creates an open task with `Medium` priority stamped with the current time.
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            completed: false,
            priority: Priority::default(),
            created_at: Local::now(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn completed(&self) -> bool {
        self.completed
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }

    pub fn created_at(&self) -> DateTime<Local> {
        self.created_at
    }

    /// Returns `true` when the title changed.
    pub fn set_title(&mut self, title: impl Into<String>) -> bool {
        replace_if_changed(&mut self.title, title.into())
    }

    /// Returns `true` when the description changed.
    pub fn set_description(&mut self, description: impl Into<String>) -> bool {
        replace_if_changed(&mut self.description, description.into())
    }

    /// Returns `true` when the completion flag changed.
    pub fn set_completed(&mut self, completed: bool) -> bool {
        replace_if_changed(&mut self.completed, completed)
    }

    /// Returns `true` when the priority changed.
    pub fn set_priority(&mut self, priority: Priority) -> bool {
        replace_if_changed(&mut self.priority, priority)
    }

    /// Applies a raw UI priority literal.
    ///
    /// Out-of-range values leave the priority untouched and report no change.
    pub fn set_priority_raw(&mut self, raw: i64) -> bool {
        match Priority::from_raw(raw) {
            Some(priority) => self.set_priority(priority),
            None => false,
        }
    }

    /// A task is valid when its trimmed title is non-empty.
    pub fn is_valid(&self) -> bool {
        !self.title.trim().is_empty()
    }

    pub fn priority_string(&self) -> &'static str {
        self.priority.label()
    }
}

fn replace_if_changed<T: PartialEq>(slot: &mut T, value: T) -> bool {
    if *slot == value {
        return false;
    }
    *slot = value;
    true
}
