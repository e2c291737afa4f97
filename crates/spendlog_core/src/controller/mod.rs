//! View controllers for the two screens.
//!
//! # Responsibility
//! - Own per-view state (record cache, filter, form inputs).
//! - Drive storage through the `ExpenseStore` interface only.
//!
//! # Invariants
//! - Controller state is explicit and per-instance, never ambient globals.
//! - On any store failure the controller's state is left unchanged.

pub mod form;
pub mod list;
