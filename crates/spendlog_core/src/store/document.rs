//! Document-collection store with live snapshot subscriptions.
//!
//! Stands in for a managed document backend: per-record documents with
//! backend-assigned ids, field-merge updates, and a push channel that
//! delivers the full snapshot after every change.
//!
//! # Invariants
//! - Document ids are assigned by the store and never reused.
//! - Snapshots preserve insertion order.
//! - A cancelled subscription receives no further snapshots and its
//!   listener slot is freed.

use crate::model::expense::{Expense, ExpenseFields, ExpenseId};
use crate::store::{ExpenseStore, StoreError, StoreResult};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::{Arc, Mutex, MutexGuard};
use uuid::Uuid;

/// In-process expense document collection.
///
/// Handles are cheap clones sharing one collection, the way multiple
/// screens share one backend client object.
#[derive(Clone, Default)]
pub struct DocumentStore {
    inner: Arc<Inner>,
}

#[derive(Default)]
struct Inner {
    documents: Mutex<Vec<Expense>>,
    watchers: Mutex<Vec<Watcher>>,
    next_watcher_id: AtomicU64,
}

struct Watcher {
    id: u64,
    tx: Sender<Vec<Expense>>,
}

/// Live-update handle returned by [`DocumentStore::subscribe`].
///
/// Delivers one full snapshot per collection change. Must be cancelled
/// (or dropped) when the consuming view is torn down; `Drop` unregisters
/// the listener as a backstop.
pub struct Subscription {
    watcher_id: u64,
    rx: Receiver<Vec<Expense>>,
    inner: Arc<Inner>,
}

impl Subscription {
    /// Drains all pending snapshots and returns the newest, without
    /// blocking. `None` when nothing arrived since the last call.
    pub fn recv_latest(&self) -> Option<Vec<Expense>> {
        let mut latest = None;
        while let Ok(snapshot) = self.rx.try_recv() {
            latest = Some(snapshot);
        }
        latest
    }

    /// Unregisters this listener; no snapshots are delivered afterwards.
    pub fn cancel(self) {
        // Drop does the actual unregistration.
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        let mut watchers = lock_unpoisoned(&self.inner.watchers);
        watchers.retain(|w| w.id != self.watcher_id);
    }
}

impl DocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a live listener. Every subsequent mutation delivers the
    /// full current snapshot on the returned handle.
    pub fn subscribe(&self) -> Subscription {
        let (tx, rx) = channel();
        let watcher_id = self.inner.next_watcher_id.fetch_add(1, Ordering::Relaxed);
        lock_unpoisoned(&self.inner.watchers).push(Watcher { id: watcher_id, tx });
        Subscription {
            watcher_id,
            rx,
            inner: Arc::clone(&self.inner),
        }
    }

    /// Number of registered live listeners.
    pub fn watcher_count(&self) -> usize {
        lock_unpoisoned(&self.inner.watchers).len()
    }

    /// Pushes the current snapshot to every listener, pruning the ones
    /// whose receiving side is gone.
    fn notify(&self, snapshot: &[Expense]) {
        let mut watchers = lock_unpoisoned(&self.inner.watchers);
        watchers.retain(|w| w.tx.send(snapshot.to_vec()).is_ok());
    }
}

impl ExpenseStore for DocumentStore {
    fn list(&self) -> StoreResult<Vec<Expense>> {
        Ok(lock_unpoisoned(&self.inner.documents).clone())
    }

    fn create(&self, fields: &ExpenseFields) -> StoreResult<ExpenseId> {
        fields.validate()?;

        let id = ExpenseId::new(Uuid::new_v4().to_string());
        let snapshot = {
            let mut documents = lock_unpoisoned(&self.inner.documents);
            documents.push(Expense::from_fields(id.clone(), fields));
            documents.clone()
        };
        self.notify(&snapshot);
        Ok(id)
    }

    fn update(&self, id: &ExpenseId, fields: &ExpenseFields) -> StoreResult<()> {
        fields.validate()?;

        let snapshot = {
            let mut documents = lock_unpoisoned(&self.inner.documents);
            let target = documents
                .iter_mut()
                .find(|doc| doc.id == *id)
                .ok_or_else(|| StoreError::NotFound(id.clone()))?;
            *target = Expense::from_fields(id.clone(), fields);
            documents.clone()
        };
        self.notify(&snapshot);
        Ok(())
    }

    fn delete(&self, id: &ExpenseId) -> StoreResult<()> {
        let snapshot = {
            let mut documents = lock_unpoisoned(&self.inner.documents);
            let before = documents.len();
            documents.retain(|doc| doc.id != *id);
            if documents.len() == before {
                // Delete of a missing document is a no-op by contract.
                return Ok(());
            }
            documents.clone()
        };
        self.notify(&snapshot);
        Ok(())
    }
}

/// Locks a mutex, recovering the data if a previous holder panicked.
fn lock_unpoisoned<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}
