//! Domain model for the personal to-do list.
//!
//! # Responsibility
//! - Define the canonical `Todo` record used by every core layer.
//! - Own the overdue rule so callers never re-derive it.
//!
//! # Invariants
//! - Every todo is identified by a stable, non-nil `TodoId`.
//! - Deletion is a hard delete owned by the repository, not a model flag.

pub mod todo;
