//! Command-line front end for the todo list.
//!
//! # Responsibility
//! - Map subcommands onto `TodoService` use-cases.
//! - Render todos as plain text lines and errors as exit codes.

use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand};
use log::warn;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use todo_core::db::open_db;
use todo_core::{
    core_version, init_logging, load_dotenv, AppConfig, FormError, SqliteTodoRepository, Todo,
    TodoForm, TodoId, TodoListQuery, TodoService, TodoServiceError,
};

const EXIT_NOT_FOUND: u8 = 1;
const EXIT_INVALID_INPUT: u8 = 2;
const EXIT_FAILURE: u8 = 3;

#[derive(Debug, Parser)]
#[command(name = "todo", version = core_version(), about = "Manage a personal to-do list")]
struct Cli {
    /// SQLite database file (overrides TODO_DB_PATH)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Create a new todo
    Add(FieldArgs),
    /// List todos in creation order
    List(ListArgs),
    /// Show one todo
    Show { id: TodoId },
    /// Edit title, description or due date; omitted fields keep their value
    Edit {
        id: TodoId,
        #[command(flatten)]
        fields: FieldArgs,
    },
    /// Flip the resolved flag
    Toggle { id: TodoId },
    /// Delete a todo permanently
    Delete { id: TodoId },
}

#[derive(Debug, Args)]
struct FieldArgs {
    #[arg(long)]
    title: Option<String>,
    #[arg(long)]
    description: Option<String>,
    /// Due date as YYYY-MM-DD; pass an empty string to clear it
    #[arg(long)]
    due: Option<String>,
}

#[derive(Debug, Args)]
struct ListArgs {
    /// Only resolved todos
    #[arg(long, conflicts_with = "open")]
    resolved: bool,
    /// Only unresolved todos
    #[arg(long)]
    open: bool,
    /// Only todos whose due date has passed
    #[arg(long)]
    overdue: bool,
}

impl FieldArgs {
    /// Fields for a new todo; omitted flags stay absent.
    fn into_form(self) -> TodoForm {
        TodoForm {
            title: self.title,
            description: self.description,
            due_date: self.due,
        }
    }

    /// Fields for an edit; omitted flags keep the value from `current`.
    fn merge_into_form(self, current: &Todo) -> TodoForm {
        TodoForm {
            title: Some(self.title.unwrap_or_else(|| current.title.clone())),
            description: Some(
                self.description
                    .unwrap_or_else(|| current.description.clone()),
            ),
            due_date: self
                .due
                .or_else(|| current.due_date.map(|due| due.to_string())),
        }
    }
}

impl ListArgs {
    fn query(&self) -> TodoListQuery {
        let resolved = match (self.resolved, self.open) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        };
        TodoListQuery {
            resolved,
            overdue_on: self.overdue.then(today),
        }
    }
}

#[derive(Debug)]
enum CliError {
    Service(TodoServiceError),
    Input(String),
    Setup(String),
}

impl Display for CliError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Service(err) => write!(f, "{err}"),
            Self::Input(message) | Self::Setup(message) => f.write_str(message),
        }
    }
}

impl From<FormError> for CliError {
    fn from(value: FormError) -> Self {
        Self::Input(value.to_string())
    }
}

impl From<TodoServiceError> for CliError {
    fn from(value: TodoServiceError) -> Self {
        Self::Service(value)
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Ok(cwd) = std::env::current_dir() {
        load_dotenv(&cwd);
    }
    let mut config = AppConfig::from_env();
    if let Some(db) = cli.db {
        config.db_path = db;
    }

    if let Some(log_dir) = &config.log_dir {
        let log_dir = absolutize(log_dir);
        if let Err(err) = init_logging(&config.log_level, &log_dir) {
            eprintln!("warning: file logging disabled: {err}");
        }
    }

    match run(cli.command, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let code = exit_code(&err);
            if code == EXIT_FAILURE {
                warn!("event=cli_command module=cli status=error error={err}");
            }
            eprintln!("error: {err}");
            ExitCode::from(code)
        }
    }
}

fn exit_code(err: &CliError) -> u8 {
    match err {
        CliError::Service(TodoServiceError::NotFound(_)) => EXIT_NOT_FOUND,
        CliError::Input(_) => EXIT_INVALID_INPUT,
        CliError::Service(_) | CliError::Setup(_) => EXIT_FAILURE,
    }
}

fn run(command: Command, config: &AppConfig) -> Result<(), CliError> {
    let conn = open_db(&config.db_path).map_err(|err| {
        CliError::Setup(format!(
            "cannot open database `{}`: {err}",
            config.db_path.display()
        ))
    })?;
    let repo =
        SqliteTodoRepository::try_new(&conn).map_err(|err| CliError::Setup(err.to_string()))?;
    let service = TodoService::new(repo);

    match command {
        Command::Add(fields) => {
            let draft = fields.into_form().into_draft()?;
            let todo = service.create(&draft)?;
            println!("created {}", todo.id);
        }
        Command::List(args) => {
            for todo in service.list(&args.query())? {
                println!("{}", render_line(&todo));
            }
        }
        Command::Show { id } => {
            let todo = service.get(id)?;
            println!("{}", render_line(&todo));
            if !todo.description.is_empty() {
                println!();
                println!("{}", todo.description);
            }
        }
        Command::Edit { id, fields } => {
            let current = service.get(id)?;
            let draft = fields.merge_into_form(&current).into_draft()?;
            let todo = service.update(id, &draft)?;
            println!("updated {}", todo.id);
        }
        Command::Toggle { id } => {
            let todo = service.toggle_resolved(id)?;
            let state = if todo.is_resolved { "resolved" } else { "reopened" };
            println!("{state} {}", todo.id);
        }
        Command::Delete { id } => {
            service.delete(id)?;
            println!("deleted {id}");
        }
    }

    Ok(())
}

fn render_line(todo: &Todo) -> String {
    let check = if todo.is_resolved { "[x]" } else { "[ ]" };
    let overdue = if todo.is_overdue() { " OVERDUE" } else { "" };
    let due = todo
        .due_date
        .map(|due| format!(" (due {due})"))
        .unwrap_or_default();
    format!("{check}{overdue} {todo}{due}  {}", todo.id)
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn absolutize(path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    std::env::current_dir()
        .map(|cwd| cwd.join(path))
        .unwrap_or_else(|_| path.to_path_buf())
}
