//! Todo repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide create/read/update/delete over the `todos` table.
//! - Map rows to `Todo` and reject corrupt persisted state.
//!
//! # Invariants
//! - `due_date` is stored as `YYYY-MM-DD` text or NULL.
//! - `is_resolved` is stored as integer `0` or `1`.
//! - List order is `created_at ASC, rowid ASC` (insertion order).

use crate::db::migrations::{current_user_version, latest_version};
use crate::db::DbError;
use crate::form::DUE_DATE_FORMAT;
use crate::model::todo::{Todo, TodoId, TodoValidationError};
use chrono::NaiveDate;
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

const TODO_SELECT_SQL: &str = "SELECT
    id,
    title,
    description,
    due_date,
    is_resolved
FROM todos";

const TODOS_TABLE: &str = "todos";
const REQUIRED_TODO_COLUMNS: &[&str] = &[
    "id",
    "title",
    "description",
    "due_date",
    "is_resolved",
    "created_at",
    "updated_at",
];

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for todo persistence and queries.
#[derive(Debug)]
pub enum RepoError {
    Validation(TodoValidationError),
    Db(DbError),
    NotFound(TodoId),
    InvalidData(String),
    /// Connection was not opened through `db::open_db*` (schema not at latest).
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "todo not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted todo data: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match expected {expected_version}"
            ),
            Self::MissingRequiredTable(table) => write!(f, "missing required table `{table}`"),
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "missing required column `{table}.{column}`")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<TodoValidationError> for RepoError {
    fn from(value: TodoValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Filters for listing todos. The default lists everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoListQuery {
    /// `Some(true)` keeps resolved todos only, `Some(false)` open ones only.
    pub resolved: Option<bool>,
    /// Keeps todos whose due date is strictly before this date.
    pub overdue_on: Option<NaiveDate>,
}

/// Key-indexed store for todo records.
pub trait TodoRepository {
    fn create_todo(&self, todo: &Todo) -> RepoResult<TodoId>;
    fn update_todo(&self, todo: &Todo) -> RepoResult<()>;
    fn get_todo(&self, id: TodoId) -> RepoResult<Option<Todo>>;
    fn list_todos(&self, query: &TodoListQuery) -> RepoResult<Vec<Todo>>;
    fn delete_todo(&self, id: TodoId) -> RepoResult<()>;
}

/// SQLite-backed todo repository borrowing an open connection.
pub struct SqliteTodoRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteTodoRepository<'conn> {
    /// Wraps a connection after checking that its schema is usable.
    ///
    /// # Errors
    /// - `UninitializedConnection` when `user_version` is not the latest.
    /// - `MissingRequiredTable` / `MissingRequiredColumn` on schema drift.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        let expected_version = latest_version();
        let actual_version = current_user_version(conn)?;
        if actual_version != expected_version {
            return Err(RepoError::UninitializedConnection {
                expected_version,
                actual_version,
            });
        }

        ensure_todos_schema(conn)?;
        Ok(Self { conn })
    }
}

impl TodoRepository for SqliteTodoRepository<'_> {
    fn create_todo(&self, todo: &Todo) -> RepoResult<TodoId> {
        todo.validate()?;

        self.conn.execute(
            "INSERT INTO todos (
                id,
                title,
                description,
                due_date,
                is_resolved
            ) VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                todo.id.to_string(),
                todo.title.as_str(),
                todo.description.as_str(),
                todo.due_date.map(date_to_db),
                bool_to_int(todo.is_resolved),
            ],
        )?;

        Ok(todo.id)
    }

    fn update_todo(&self, todo: &Todo) -> RepoResult<()> {
        todo.validate()?;

        let changed = self.conn.execute(
            "UPDATE todos
             SET
                title = ?1,
                description = ?2,
                due_date = ?3,
                is_resolved = ?4,
                updated_at = (CAST(strftime('%s', 'now') AS INTEGER) * 1000)
             WHERE id = ?5;",
            params![
                todo.title.as_str(),
                todo.description.as_str(),
                todo.due_date.map(date_to_db),
                bool_to_int(todo.is_resolved),
                todo.id.to_string(),
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(todo.id));
        }

        Ok(())
    }

    fn get_todo(&self, id: TodoId) -> RepoResult<Option<Todo>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{TODO_SELECT_SQL} WHERE id = ?1;"))?;

        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_todo_row(row)?));
        }

        Ok(None)
    }

    fn list_todos(&self, query: &TodoListQuery) -> RepoResult<Vec<Todo>> {
        let mut sql = format!("{TODO_SELECT_SQL} WHERE 1 = 1");
        let mut bind_values: Vec<Value> = Vec::new();

        if let Some(resolved) = query.resolved {
            sql.push_str(" AND is_resolved = ?");
            bind_values.push(Value::Integer(bool_to_int(resolved)));
        }

        if query.overdue_on.is_some() {
            // Date comparison happens in `Todo::is_overdue_on`; text order breaks
            // for years outside four digits.
            sql.push_str(" AND due_date IS NOT NULL");
        }

        sql.push_str(" ORDER BY created_at ASC, rowid ASC");

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut todos = Vec::new();

        while let Some(row) = rows.next()? {
            let todo = parse_todo_row(row)?;
            if query
                .overdue_on
                .is_some_and(|today| !todo.is_overdue_on(today))
            {
                continue;
            }
            todos.push(todo);
        }

        Ok(todos)
    }

    fn delete_todo(&self, id: TodoId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM todos WHERE id = ?1;", [id.to_string()])?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }
}

fn ensure_todos_schema(conn: &Connection) -> RepoResult<()> {
    let mut stmt = conn.prepare("SELECT name FROM pragma_table_info(?1);")?;
    let columns = stmt
        .query_map([TODOS_TABLE], |row| row.get::<_, String>(0))?
        .collect::<Result<Vec<_>, _>>()?;

    if columns.is_empty() {
        return Err(RepoError::MissingRequiredTable(TODOS_TABLE));
    }

    if let Some(column) = REQUIRED_TODO_COLUMNS
        .iter()
        .copied()
        .find(|required| !columns.iter().any(|name| name == required))
    {
        return Err(RepoError::MissingRequiredColumn {
            table: TODOS_TABLE,
            column,
        });
    }

    Ok(())
}

fn parse_todo_row(row: &Row<'_>) -> RepoResult<Todo> {
    let id_text: String = row.get("id")?;
    let id = Uuid::parse_str(&id_text).map_err(|_| {
        RepoError::InvalidData(format!("invalid uuid value `{id_text}` in todos.id"))
    })?;

    let due_date = match row.get::<_, Option<String>>("due_date")? {
        Some(value) => Some(NaiveDate::parse_from_str(&value, DUE_DATE_FORMAT).map_err(
            |_| RepoError::InvalidData(format!("invalid date `{value}` in todos.due_date")),
        )?),
        None => None,
    };

    let is_resolved = match row.get::<_, i64>("is_resolved")? {
        0 => false,
        1 => true,
        other => {
            return Err(RepoError::InvalidData(format!(
                "invalid is_resolved value `{other}` in todos.is_resolved"
            )));
        }
    };

    let todo = Todo {
        id,
        title: row.get("title")?,
        description: row.get("description")?,
        due_date,
        is_resolved,
    };
    todo.validate()?;
    Ok(todo)
}

fn date_to_db(date: NaiveDate) -> String {
    date.format(DUE_DATE_FORMAT).to_string()
}

fn bool_to_int(value: bool) -> i64 {
    i64::from(value)
}
