//! Typed parsing of user-entered todo fields.
//!
//! # Responsibility
//! - Turn raw text fields collected by a front end into a `TodoDraft`.
//! - Keep the required-field rule in one place for create and edit flows.
//!
//! # Invariants
//! - A draft always carries a non-blank, trimmed title.
//! - A blank due date means "no deadline", never a parse error.

use chrono::NaiveDate;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Accepted due-date input format (`YYYY-MM-DD`).
pub const DUE_DATE_FORMAT: &str = "%Y-%m-%d";

/// Form input rejection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    /// Title is absent or contains only whitespace.
    MissingTitle,
    /// Due date text is present but not a `YYYY-MM-DD` calendar date.
    InvalidDueDate(String),
}

impl Display for FormError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingTitle => write!(f, "title is required"),
            Self::InvalidDueDate(value) => {
                write!(f, "invalid due date `{value}`; expected YYYY-MM-DD")
            }
        }
    }
}

impl Error for FormError {}

/// Raw field values as submitted, before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoForm {
    pub title: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<String>,
}

/// Validated create/edit payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoDraft {
    pub title: String,
    pub description: String,
    pub due_date: Option<NaiveDate>,
}

impl TodoForm {
    /// Validates the submitted fields.
    ///
    /// # Errors
    /// - `FormError::MissingTitle` when the title is absent or blank.
    /// - `FormError::InvalidDueDate` when the due date cannot be parsed.
    pub fn into_draft(self) -> Result<TodoDraft, FormError> {
        let title = self
            .title
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .ok_or(FormError::MissingTitle)?
            .to_string();

        let due_date = match self.due_date.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(text) => Some(parse_due_date(text)?),
        };

        Ok(TodoDraft {
            title,
            description: self.description.unwrap_or_default(),
            due_date,
        })
    }
}

/// Parses a `YYYY-MM-DD` due date.
pub fn parse_due_date(text: &str) -> Result<NaiveDate, FormError> {
    NaiveDate::parse_from_str(text, DUE_DATE_FORMAT)
        .map_err(|_| FormError::InvalidDueDate(text.to_string()))
}
