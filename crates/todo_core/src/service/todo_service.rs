//! Todo use-case service.
//!
//! # Responsibility
//! - Provide create/get/list/update/toggle/delete entry points for callers.
//! - Guard every id-based mutation with an existence lookup.
//!
//! # Invariants
//! - `update` never changes `is_resolved`.
//! - Mutations return the record as read back from the store.

use crate::form::TodoDraft;
use crate::model::todo::{Todo, TodoId};
use crate::repo::todo_repo::{RepoError, TodoListQuery, TodoRepository};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for todo use-cases.
#[derive(Debug)]
pub enum TodoServiceError {
    /// No todo exists for the requested id.
    NotFound(TodoId),
    /// Persistence-layer failure.
    Repo(RepoError),
    /// A write succeeded but the read-back did not find the row.
    InconsistentState(&'static str),
}

impl Display for TodoServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(id) => write!(f, "todo not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
            Self::InconsistentState(details) => write!(f, "inconsistent todo state: {details}"),
        }
    }
}

impl Error for TodoServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for TodoServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(id) => Self::NotFound(id),
            other => Self::Repo(other),
        }
    }
}

pub type ServiceResult<T> = Result<T, TodoServiceError>;

/// Todo service facade over a repository implementation.
pub struct TodoService<R: TodoRepository> {
    repo: R,
}

impl<R: TodoRepository> TodoService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Stores a new unresolved todo built from `draft`.
    pub fn create(&self, draft: &TodoDraft) -> ServiceResult<Todo> {
        let todo = Todo::new(
            draft.title.as_str(),
            draft.description.as_str(),
            draft.due_date,
        );
        let id = self.repo.create_todo(&todo)?;
        info!("event=todo_create module=service status=ok todo_id={id}");
        self.read_back(id, "created todo not found in read-back")
    }

    /// Loads one todo by id.
    ///
    /// # Errors
    /// - `TodoServiceError::NotFound` when no row matches.
    pub fn get(&self, id: TodoId) -> ServiceResult<Todo> {
        self.repo
            .get_todo(id)?
            .ok_or(TodoServiceError::NotFound(id))
    }

    /// Lists todos in insertion order, filtered by `query`.
    pub fn list(&self, query: &TodoListQuery) -> ServiceResult<Vec<Todo>> {
        Ok(self.repo.list_todos(query)?)
    }

    /// Overwrites title, description and due date of an existing todo.
    pub fn update(&self, id: TodoId, draft: &TodoDraft) -> ServiceResult<Todo> {
        let mut todo = self.get(id)?;
        todo.apply(
            draft.title.as_str(),
            draft.description.as_str(),
            draft.due_date,
        );
        self.repo.update_todo(&todo)?;
        info!("event=todo_update module=service status=ok todo_id={id}");
        self.read_back(id, "updated todo not found in read-back")
    }

    /// Flips and persists the resolved flag of an existing todo.
    pub fn toggle_resolved(&self, id: TodoId) -> ServiceResult<Todo> {
        let mut todo = self.get(id)?;
        todo.toggle_resolved();
        self.repo.update_todo(&todo)?;
        info!(
            "event=todo_toggle module=service status=ok todo_id={id} is_resolved={}",
            todo.is_resolved
        );
        self.read_back(id, "toggled todo not found in read-back")
    }

    /// Permanently removes an existing todo.
    ///
    /// # Errors
    /// - `TodoServiceError::NotFound` when the id is unknown, including a
    ///   second delete of the same id.
    pub fn delete(&self, id: TodoId) -> ServiceResult<()> {
        self.get(id)?;
        self.repo.delete_todo(id)?;
        info!("event=todo_delete module=service status=ok todo_id={id}");
        Ok(())
    }

    fn read_back(&self, id: TodoId, details: &'static str) -> ServiceResult<Todo> {
        self.repo
            .get_todo(id)?
            .ok_or(TodoServiceError::InconsistentState(details))
    }
}
