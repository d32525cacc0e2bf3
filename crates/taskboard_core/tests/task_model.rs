use taskboard_core::{priority_label, Priority, Task, TaskField, TaskListModel, TaskValue};

#[test]
fn priority_strings_match_levels() {
    for (priority, label) in [
        (Priority::Low, "Low"),
        (Priority::Medium, "Medium"),
        (Priority::High, "High"),
    ] {
        let mut task = Task::new("x", "");
        task.set_priority(priority);
        assert_eq!(task.priority_string(), label);
        assert_eq!(priority_label(priority.as_raw()), label);
    }
    assert_eq!(priority_label(-1), "Unknown");
}

#[test]
fn validity_requires_non_blank_title() {
    for (title, valid) in [("", false), ("   ", false), ("x", true), ("  x  ", true)] {
        assert_eq!(Task::new(title, "").is_valid(), valid, "title {title:?}");
    }
}

#[test]
fn task_serialization_uses_expected_wire_fields() {
    let mut task = Task::new("Write docs", "README");
    task.set_priority(Priority::High);
    task.set_completed(true);

    let json = serde_json::to_value(&task).unwrap();
    assert_eq!(json["title"], "Write docs");
    assert_eq!(json["description"], "README");
    assert_eq!(json["completed"], true);
    assert_eq!(json["priority"], "high");
    assert!(json["created_at"].is_string());

    let decoded: Task = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, task);
}

#[test]
fn out_of_range_reads_and_writes_fail() {
    let mut model = TaskListModel::new();
    assert_eq!(model.data(0, TaskField::Title), None);
    assert!(!model.set_data(0, TaskField::Completed, TaskValue::Flag(true)));
    assert!(model.get(0).is_none());
    assert!(!model.toggle_completed(0));
}
