//! Domain model for expense records.
//!
//! # Responsibility
//! - Define the canonical data structures used by storage and controllers.
//!
//! # Invariants
//! - Every record is identified by a stable `ExpenseId`.
//! - Deletion is a hard delete; the stores keep no tombstones.

pub mod expense;
