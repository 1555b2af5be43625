//! Core use-case services.
//!
//! # Responsibility
//! - Turn validated drafts and ids into repository calls.
//! - Keep front ends decoupled from storage details.

pub mod todo_service;
