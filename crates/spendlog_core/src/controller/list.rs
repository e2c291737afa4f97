//! List/filter view controller.
//!
//! # Responsibility
//! - Hold the last known full snapshot as a read-through cache.
//! - Apply the active category filter to produce the rendered view.
//! - Run the post-confirmation leg of the delete flow.
//!
//! # Invariants
//! - The cache is replaced wholesale on reload or pushed snapshot, never
//!   merged incrementally.
//! - A failed reload or delete leaves the cache exactly as it was.

use crate::model::expense::{Category, Expense, ExpenseId};
use crate::store::document::Subscription;
use crate::store::{ExpenseStore, StoreResult};
use log::{error, info};

/// Controller backing the expense list screen.
pub struct ListController<S: ExpenseStore> {
    store: S,
    records: Vec<Expense>,
    filter: Option<Category>,
}

impl<S: ExpenseStore> ListController<S> {
    /// Creates a controller with an empty cache and no filter. Callers
    /// refresh when the view becomes visible.
    pub fn new(store: S) -> Self {
        Self {
            store,
            records: Vec::new(),
            filter: None,
        }
    }

    /// Last known full snapshot.
    pub fn records(&self) -> &[Expense] {
        &self.records
    }

    pub fn filter(&self) -> Option<Category> {
        self.filter
    }

    /// Sets the active category filter; `None` shows everything.
    pub fn set_filter(&mut self, filter: Option<Category>) {
        self.filter = filter;
    }

    /// Full reload from the store. On error the cache is unchanged and
    /// the error is returned for the caller to surface.
    pub fn refresh(&mut self) -> StoreResult<()> {
        match self.store.list() {
            Ok(snapshot) => {
                info!(
                    "event=list_refresh module=controller status=ok count={}",
                    snapshot.len()
                );
                self.records = snapshot;
                Ok(())
            }
            Err(err) => {
                error!("event=list_refresh module=controller status=error error={err}");
                Err(err)
            }
        }
    }

    /// Replaces the cache with a pushed snapshot.
    pub fn apply_snapshot(&mut self, snapshot: Vec<Expense>) {
        self.records = snapshot;
    }

    /// Drains `subscription` and applies the newest snapshot, if any
    /// arrived. Returns whether the cache changed.
    pub fn sync_from(&mut self, subscription: &Subscription) -> bool {
        match subscription.recv_latest() {
            Some(snapshot) => {
                self.apply_snapshot(snapshot);
                true
            }
            None => false,
        }
    }

    /// Records passing the active filter, in cache order. No extra sort
    /// is applied; display order is insertion/backend order.
    pub fn filtered(&self) -> Vec<&Expense> {
        match self.filter {
            None => self.records.iter().collect(),
            Some(category) => self
                .records
                .iter()
                .filter(|record| record.category == category)
                .collect(),
        }
    }

    /// Deletes `id` after the user confirmed. The store mutation happens
    /// first; the cache is only touched on success.
    pub fn delete_confirmed(&mut self, id: &ExpenseId) -> StoreResult<()> {
        match self.store.delete(id) {
            Ok(()) => {
                self.records.retain(|record| record.id != *id);
                info!("event=expense_delete module=controller status=ok id={id}");
                Ok(())
            }
            Err(err) => {
                error!("event=expense_delete module=controller status=error id={id} error={err}");
                Err(err)
            }
        }
    }
}
