//! Repository contracts and SQLite persistence for todos.
//!
//! # Responsibility
//! - Define the key-indexed record store used by the service layer.
//! - Keep SQL details out of use-case orchestration.
//!
//! # Invariants
//! - Writes run `Todo::validate()` before touching SQL.
//! - Missing rows surface as `RepoError::NotFound`, separate from transport errors.

pub mod todo_repo;
