//! Storage backends and the capability interface the controllers depend on.
//!
//! # Responsibility
//! - Define the `ExpenseStore` contract shared by both backend variants.
//! - Isolate serialization and persistence details from the controllers.
//!
//! # Invariants
//! - Write paths validate fields before touching durable state.
//! - `update` of a missing id fails with `NotFound` on every variant.
//! - `delete` of a missing id succeeds silently on every variant.

use crate::model::expense::{Expense, ExpenseFields, ExpenseId, ExpenseValidationError};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io;

pub mod document;
pub mod local;

pub use document::{DocumentStore, Subscription};
pub use local::JsonFileStore;

pub type StoreResult<T> = Result<T, StoreError>;

/// Storage-layer error taxonomy.
///
/// None of these is fatal to the caller: controllers leave their cache
/// unchanged on error and the user retries.
#[derive(Debug)]
pub enum StoreError {
    Validation(ExpenseValidationError),
    /// The stored collection exists but is not deserializable. Never
    /// coerced to an empty collection; corruption must surface.
    Parse(serde_json::Error),
    Read(io::Error),
    Write(io::Error),
    NotFound(ExpenseId),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Parse(err) => write!(f, "stored expense data is corrupt: {err}"),
            Self::Read(err) => write!(f, "failed to read expense storage: {err}"),
            Self::Write(err) => write!(f, "failed to write expense storage: {err}"),
            Self::NotFound(id) => write!(f, "expense not found: {id}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Parse(err) => Some(err),
            Self::Read(err) | Self::Write(err) => Some(err),
            Self::NotFound(_) => None,
        }
    }
}

impl From<ExpenseValidationError> for StoreError {
    fn from(value: ExpenseValidationError) -> Self {
        Self::Validation(value)
    }
}

/// Backend capability interface for expense persistence.
///
/// Both variants implement the same CRUD surface; the document store
/// additionally offers a live-snapshot subscription as an inherent API.
pub trait ExpenseStore {
    /// Returns the full current collection. An absent collection is an
    /// empty one; a corrupt collection is `StoreError::Parse`.
    fn list(&self) -> StoreResult<Vec<Expense>>;

    /// Validates and persists a new record, returning the assigned id.
    fn create(&self, fields: &ExpenseFields) -> StoreResult<ExpenseId>;

    /// Validates and merges `fields` into the record with `id`.
    fn update(&self, id: &ExpenseId, fields: &ExpenseFields) -> StoreResult<()>;

    /// Removes the record with `id`. Removing a missing id is not an error.
    fn delete(&self, id: &ExpenseId) -> StoreResult<()>;
}
