//! Expense record domain model.
//!
//! # Responsibility
//! - Define the canonical expense record and its fixed category set.
//! - Provide the submission-time validation shared by all write paths.
//!
//! # Invariants
//! - `id` is unique within a collection and immutable after creation.
//! - `amount` must be non-empty at submission time; `note` may be empty.
//! - `date` is an RFC 3339 string set at creation and refreshed on update.

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Stable identifier for one expense record.
///
/// Kept as a string newtype: the local store assigns millisecond-timestamp
/// ids while the document store assigns UUIDs, and neither shape should
/// leak into signatures.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExpenseId(String);

impl ExpenseId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ExpenseId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Fixed category set for expense records.
///
/// Wire names match the stored data exactly (`"Food"`, `"Travel"`, ...),
/// so collections written by earlier versions of the app deserialize as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    Food,
    Travel,
    Shopping,
    Bills,
    Others,
}

impl Category {
    /// Every category, in display order.
    pub const ALL: [Category; 5] = [
        Category::Food,
        Category::Travel,
        Category::Shopping,
        Category::Bills,
        Category::Others,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Food => "Food",
            Category::Travel => "Travel",
            Category::Shopping => "Shopping",
            Category::Bills => "Bills",
            Category::Others => "Others",
        }
    }

    /// Parses user input case-insensitively. Returns `None` for anything
    /// outside the fixed set.
    pub fn parse(value: &str) -> Option<Category> {
        match value.trim().to_ascii_lowercase().as_str() {
            "food" => Some(Category::Food),
            "travel" => Some(Category::Travel),
            "shopping" => Some(Category::Shopping),
            "bills" => Some(Category::Bills),
            "others" => Some(Category::Others),
            _ => None,
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validation failures for expense submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpenseValidationError {
    /// `amount` trims to an empty string.
    EmptyAmount,
}

impl Display for ExpenseValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyAmount => write!(f, "amount must not be empty"),
        }
    }
}

impl Error for ExpenseValidationError {}

/// The mutable fields of an expense record.
///
/// Write payloads carry these; the `id` never travels in a write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseFields {
    /// Amount as entered. Kept as text; the only rule is non-empty.
    pub amount: String,
    pub category: Category,
    /// Free text, may be empty.
    pub note: String,
    /// RFC 3339 timestamp of creation or last update.
    pub date: String,
}

impl ExpenseFields {
    pub fn validate(&self) -> Result<(), ExpenseValidationError> {
        if self.amount.trim().is_empty() {
            return Err(ExpenseValidationError::EmptyAmount);
        }
        Ok(())
    }
}

/// Canonical expense record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    pub id: ExpenseId,
    pub amount: String,
    pub category: Category,
    pub note: String,
    pub date: String,
}

impl Expense {
    /// Assembles a record from a store-assigned id and submitted fields.
    pub fn from_fields(id: ExpenseId, fields: &ExpenseFields) -> Self {
        Self {
            id,
            amount: fields.amount.clone(),
            category: fields.category,
            note: fields.note.clone(),
            date: fields.date.clone(),
        }
    }

    /// Copies the mutable fields out of this record, e.g. to pre-fill a form.
    pub fn fields(&self) -> ExpenseFields {
        ExpenseFields {
            amount: self.amount.clone(),
            category: self.category,
            note: self.note.clone(),
            date: self.date.clone(),
        }
    }

    pub fn validate(&self) -> Result<(), ExpenseValidationError> {
        if self.amount.trim().is_empty() {
            return Err(ExpenseValidationError::EmptyAmount);
        }
        Ok(())
    }
}

/// Current time as an RFC 3339 string with millisecond precision, the
/// format stored in every record's `date` field.
pub fn now_rfc3339() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
