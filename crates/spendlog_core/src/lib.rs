//! Core domain logic for Spendlog expense tracking.
//! This crate is the single source of truth for business invariants.

pub mod controller;
pub mod logging;
pub mod model;
pub mod store;

pub use controller::form::{FormController, FormError, SubmitOutcome};
pub use controller::list::ListController;
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::expense::{
    now_rfc3339, Category, Expense, ExpenseFields, ExpenseId, ExpenseValidationError,
};
pub use store::{
    DocumentStore, ExpenseStore, JsonFileStore, StoreError, StoreResult, Subscription,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
