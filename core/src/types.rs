//! Domain DTOs for the todo collection.
//!
//! # Design
//! `Todo` is the authoritative shape returned by `GET /todos`. It is parsed
//! leniently: records written by other clients may lack a description or
//! carry a date that does not parse, and one such record must not fail the
//! whole list. Responses to PUT and PATCH are parsed into `TodoPatch`, where
//! every field is optional, so the store can merge whatever the server echoes
//! back. These types mirror the mock-server's schema but are defined
//! independently; integration tests catch drift.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Server-assigned identifier of a todo. Immutable once assigned.
///
/// Backends hand out either integers or opaque strings; both are kept in
/// the form they arrived in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TodoId {
    Num(u64),
    Str(String),
}

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TodoId::Num(n) => write!(f, "{n}"),
            TodoId::Str(s) => f.write_str(s),
        }
    }
}

/// A single todo item as stored by the remote collection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Todo {
    pub id: TodoId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Creation instant, set by the client when the todo is submitted.
    /// `None` when the stored value is missing or unreadable.
    #[serde(default, deserialize_with = "lenient_date")]
    pub date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub completed: bool,
}

impl Todo {
    /// Overwrite the fields present in `patch`, leaving the rest untouched.
    /// The id is never rewritten.
    pub fn merge(&mut self, patch: TodoPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(date) = patch.date {
            self.date = Some(date);
        }
        if let Some(completed) = patch.completed {
            self.completed = completed;
        }
    }
}

/// Accept any JSON value; only an RFC 3339 string yields a date.
fn lenient_date<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error> {
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(raw.and_then(|value| value.as_str().and_then(|s| s.parse().ok())))
}

/// The uncommitted "new todo" form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Draft {
    pub title: String,
    pub description: String,
}

/// Request payload for `POST /todos`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewTodo {
    pub title: String,
    pub description: String,
    pub date: DateTime<Utc>,
    pub completed: bool,
}

impl NewTodo {
    /// Inject the submission instant into a draft. New todos always start
    /// incomplete.
    pub fn from_draft(draft: &Draft, now: DateTime<Utc>) -> Self {
        Self {
            title: draft.title.clone(),
            description: draft.description.clone(),
            date: now,
            completed: false,
        }
    }
}

/// Request payload for `PUT /todos/{id}`. Only the fields present in the JSON
/// are applied; omitted fields remain unchanged on the server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoFields {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

/// A todo as echoed by PUT or PATCH. Any field may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TodoPatch {
    pub id: Option<TodoId>,
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(deserialize_with = "lenient_date")]
    pub date: Option<DateTime<Utc>>,
    pub completed: Option<bool>,
}

/// Body of `PATCH /todos/{id}`.
///
/// `Set` sends a bare JSON boolean. `Toggle` sends no body and leaves the
/// new value to the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Set(bool),
    Toggle,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample() -> Todo {
        Todo {
            id: TodoId::Num(3),
            title: "Buy milk".to_string(),
            description: "2%".to_string(),
            date: Some(Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap()),
            completed: false,
        }
    }

    #[test]
    fn numeric_id_is_a_bare_number_on_the_wire() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["id"], 3);
        assert_eq!(json["completed"], false);
    }

    #[test]
    fn string_ids_are_accepted() {
        let todo: Todo = serde_json::from_str(
            r#"{"id":"3f9a","title":"t","description":"","date":"2024-05-01T09:30:00.000Z","completed":false}"#,
        )
        .unwrap();
        assert_eq!(todo.id, TodoId::Str("3f9a".to_string()));
        assert_eq!(todo.id.to_string(), "3f9a");
        assert_eq!(serde_json::to_value(&todo).unwrap()["id"], "3f9a");
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let todo: Todo = serde_json::from_str(r#"{"id":2,"title":"legacy","completed":true}"#).unwrap();
        assert_eq!(todo.id, TodoId::Num(2));
        assert_eq!(todo.description, "");
        assert!(todo.date.is_none());
        assert!(todo.completed);
    }

    #[test]
    fn unreadable_dates_become_none() {
        let todo: Todo = serde_json::from_str(r#"{"id":4,"date":"Invalid Date"}"#).unwrap();
        assert!(todo.date.is_none());
        let todo: Todo = serde_json::from_str(r#"{"id":4,"date":1714555800000}"#).unwrap();
        assert!(todo.date.is_none());
        let todo: Todo = serde_json::from_str(r#"{"id":4,"date":null}"#).unwrap();
        assert!(todo.date.is_none());
    }

    #[test]
    fn merge_applies_only_present_fields() {
        let mut todo = sample();
        todo.merge(TodoPatch {
            completed: Some(true),
            ..TodoPatch::default()
        });
        assert!(todo.completed);
        assert_eq!(todo.title, "Buy milk");
        assert_eq!(todo.description, "2%");
        assert_eq!(todo.date, sample().date);
    }

    #[test]
    fn merge_never_rewrites_the_id() {
        let mut todo = sample();
        todo.merge(TodoPatch {
            id: Some(TodoId::Num(99)),
            title: Some("Buy oat milk".to_string()),
            ..TodoPatch::default()
        });
        assert_eq!(todo.id, TodoId::Num(3));
        assert_eq!(todo.title, "Buy oat milk");
    }

    #[test]
    fn patch_parses_partial_objects() {
        let patch: TodoPatch = serde_json::from_str(r#"{"id":3,"completed":true}"#).unwrap();
        assert_eq!(patch.id, Some(TodoId::Num(3)));
        assert_eq!(patch.completed, Some(true));
        assert!(patch.title.is_none());
        assert!(patch.date.is_none());
    }

    #[test]
    fn new_todo_always_starts_incomplete() {
        let draft = Draft {
            title: "Buy milk".to_string(),
            description: "2%".to_string(),
        };
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap();
        let new = NewTodo::from_draft(&draft, now);
        assert!(!new.completed);
        assert_eq!(new.date, now);
        assert_eq!(new.title, "Buy milk");
    }

    #[test]
    fn fields_omit_absent_values() {
        let fields = TodoFields {
            title: Some("Renamed".to_string()),
            ..TodoFields::default()
        };
        let json = serde_json::to_value(&fields).unwrap();
        assert_eq!(json, serde_json::json!({"title": "Renamed"}));
    }
}
