//! Edit/create form controller.
//!
//! # Responsibility
//! - Manage input state for a single record (amount, category, note).
//! - Validate required fields and submit create-or-update accordingly.
//!
//! # Invariants
//! - Validation failures block submission before any backend call.
//! - A failed submission leaves the form state intact so the user can
//!   correct and retry.
//! - The edit target's `id` never changes across submissions.

use crate::model::expense::{now_rfc3339, Category, Expense, ExpenseFields, ExpenseId};
use crate::store::{ExpenseStore, StoreError};
use log::{error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Outcome of a successful submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Created(ExpenseId),
    Updated(ExpenseId),
}

/// Submission failures. Validation errors are local; `Store` wraps the
/// backend failure for the caller to surface.
#[derive(Debug)]
pub enum FormError {
    MissingAmount,
    MissingCategory,
    Store(StoreError),
}

impl Display for FormError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingAmount | Self::MissingCategory => {
                write!(f, "Amount and Category are required.")
            }
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for FormError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StoreError> for FormError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Controller backing the add/edit expense screen.
pub struct FormController<S: ExpenseStore> {
    store: S,
    editing: Option<ExpenseId>,
    amount: String,
    category: Option<Category>,
    note: String,
}

impl<S: ExpenseStore> FormController<S> {
    /// Blank form: submitting creates a new record.
    pub fn new(store: S) -> Self {
        Self {
            store,
            editing: None,
            amount: String::new(),
            category: None,
            note: String::new(),
        }
    }

    /// Form pre-filled from an existing record: submitting updates it.
    pub fn edit(store: S, expense: &Expense) -> Self {
        Self {
            store,
            editing: Some(expense.id.clone()),
            amount: expense.amount.clone(),
            category: Some(expense.category),
            note: expense.note.clone(),
        }
    }

    pub fn amount(&self) -> &str {
        &self.amount
    }

    pub fn category(&self) -> Option<Category> {
        self.category
    }

    pub fn note(&self) -> &str {
        &self.note
    }

    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    pub fn set_amount(&mut self, amount: impl Into<String>) {
        self.amount = amount.into();
    }

    pub fn set_category(&mut self, category: Category) {
        self.category = Some(category);
    }

    pub fn set_note(&mut self, note: impl Into<String>) {
        self.note = note.into();
    }

    /// Validates and submits. Creates a new record when no edit target was
    /// supplied, otherwise updates the target's fields; either way `date`
    /// is set to the submission time.
    pub fn submit(&mut self) -> Result<SubmitOutcome, FormError> {
        if self.amount.trim().is_empty() {
            warn!("event=form_submit module=controller status=rejected reason=missing_amount");
            return Err(FormError::MissingAmount);
        }
        let Some(category) = self.category else {
            warn!("event=form_submit module=controller status=rejected reason=missing_category");
            return Err(FormError::MissingCategory);
        };

        let fields = ExpenseFields {
            amount: self.amount.clone(),
            category,
            note: self.note.clone(),
            date: now_rfc3339(),
        };

        let result = match &self.editing {
            None => self
                .store
                .create(&fields)
                .map(SubmitOutcome::Created),
            Some(id) => self
                .store
                .update(id, &fields)
                .map(|()| SubmitOutcome::Updated(id.clone())),
        };

        match result {
            Ok(outcome) => {
                let (mode, id) = match &outcome {
                    SubmitOutcome::Created(id) => ("create", id),
                    SubmitOutcome::Updated(id) => ("update", id),
                };
                info!("event=form_submit module=controller status=ok mode={mode} id={id}");
                Ok(outcome)
            }
            Err(err) => {
                error!("event=form_submit module=controller status=error error={err}");
                Err(err.into())
            }
        }
    }
}
