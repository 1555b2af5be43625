//! Todo domain model.
//!
//! # Responsibility
//! - Define the canonical to-do record and its lifecycle helpers.
//! - Evaluate the overdue rule at date granularity.
//!
//! # Invariants
//! - `id` is stable, non-nil and never reused for another todo.
//! - `is_resolved` starts as `false` and only changes through `toggle_resolved`.
//! - `is_overdue` depends on `due_date` alone; resolution state is ignored.

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for a todo record.
pub type TodoId = Uuid;

/// Validation errors for todo invariants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TodoValidationError {
    /// `Uuid::nil()` is reserved and cannot identify a todo.
    NilId,
}

impl Display for TodoValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NilId => write!(f, "todo id must not be nil"),
        }
    }
}

impl Error for TodoValidationError {}

/// Canonical to-do record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "TodoWire")]
pub struct Todo {
    /// Stable ID used for lookup, update and delete.
    pub id: TodoId,
    /// Human-readable label. May be empty at this layer.
    pub title: String,
    /// Free-form details, empty when not provided.
    pub description: String,
    /// Deadline date without time component. `None` means no deadline.
    pub due_date: Option<NaiveDate>,
    /// Whether the todo has been marked done.
    pub is_resolved: bool,
}

#[derive(Deserialize)]
struct TodoWire {
    id: TodoId,
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    due_date: Option<NaiveDate>,
    #[serde(default)]
    is_resolved: bool,
}

impl TryFrom<TodoWire> for Todo {
    type Error = TodoValidationError;

    fn try_from(wire: TodoWire) -> Result<Self, Self::Error> {
        let todo = Self {
            id: wire.id,
            title: wire.title,
            description: wire.description,
            due_date: wire.due_date,
            is_resolved: wire.is_resolved,
        };
        todo.validate()?;
        Ok(todo)
    }
}

impl Todo {
    /// Creates an unresolved todo with a generated stable ID.
    ///
    /// The title is stored as given; required-field checks belong to
    /// `form::TodoForm`.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        due_date: Option<NaiveDate>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            description: description.into(),
            due_date,
            is_resolved: false,
        }
    }

    /// Creates an unresolved todo with a caller-provided stable ID.
    ///
    /// # Errors
    /// - Returns `TodoValidationError::NilId` for `Uuid::nil()`.
    pub fn with_id(
        id: TodoId,
        title: impl Into<String>,
        description: impl Into<String>,
        due_date: Option<NaiveDate>,
    ) -> Result<Self, TodoValidationError> {
        let todo = Self {
            id,
            title: title.into(),
            description: description.into(),
            due_date,
            is_resolved: false,
        };
        todo.validate()?;
        Ok(todo)
    }

    /// Checks invariants that must hold before persistence.
    pub fn validate(&self) -> Result<(), TodoValidationError> {
        if self.id.is_nil() {
            return Err(TodoValidationError::NilId);
        }
        Ok(())
    }

    /// Returns whether the due date lies strictly before the current local date.
    pub fn is_overdue(&self) -> bool {
        self.is_overdue_on(Local::now().date_naive())
    }

    /// Returns whether the due date lies strictly before `today`.
    ///
    /// A todo due today is not overdue. Resolved todos are still evaluated.
    pub fn is_overdue_on(&self, today: NaiveDate) -> bool {
        self.due_date.is_some_and(|due| due < today)
    }

    /// Flips the resolved flag. Resolved todos can be reopened.
    pub fn toggle_resolved(&mut self) {
        self.is_resolved = !self.is_resolved;
    }

    /// Overwrites the editable fields, leaving `id` and `is_resolved` intact.
    pub fn apply(
        &mut self,
        title: impl Into<String>,
        description: impl Into<String>,
        due_date: Option<NaiveDate>,
    ) {
        self.title = title.into();
        self.description = description.into();
        self.due_date = due_date;
    }
}

impl Display for Todo {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.title)
    }
}

#[cfg(test)]
mod tests {
    use super::Todo;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid calendar date")
    }

    #[test]
    fn due_today_is_not_overdue() {
        let todo = Todo::new("pay rent", "", Some(date(2026, 3, 1)));
        assert!(!todo.is_overdue_on(date(2026, 3, 1)));
        assert!(todo.is_overdue_on(date(2026, 3, 2)));
    }

    #[test]
    fn resolution_does_not_clear_overdue() {
        let mut todo = Todo::new("file taxes", "", Some(date(2026, 1, 10)));
        todo.toggle_resolved();
        assert!(todo.is_resolved);
        assert!(todo.is_overdue_on(date(2026, 2, 1)));
    }

    #[test]
    fn empty_title_is_accepted_by_entity() {
        let todo = Todo::new("", "", None);
        assert_eq!(todo.to_string(), "");
        assert!(todo.validate().is_ok());
    }
}
