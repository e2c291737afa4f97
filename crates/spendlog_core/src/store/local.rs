//! Local durable store: one JSON file holding the whole collection.
//!
//! # Responsibility
//! - Persist the serialized expense collection under a single path.
//! - Keep mutations as full read-modify-write cycles over that file.
//!
//! # Invariants
//! - `list()` on an absent file is an empty collection, never an error.
//! - `list()` on a corrupt file surfaces `StoreError::Parse`.
//! - `save()` replaces the file via temp-file + rename, so a reader never
//!   observes a partial write.
//! - Two overlapping mutations race between `list()` and `save()`; the
//!   last save wins. There is no locking.

use crate::model::expense::{Expense, ExpenseFields, ExpenseId};
use crate::store::{ExpenseStore, StoreError, StoreResult};
use chrono::Utc;
use log::{error, info};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// File-backed expense store holding one JSON-serialized collection.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Creates a store over `path`. The file (and its parent directory)
    /// is created lazily on the first save.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Serializes and durably replaces the whole collection.
    pub fn save(&self, expenses: &[Expense]) -> StoreResult<()> {
        let encoded = serde_json::to_vec(expenses).map_err(StoreError::Parse)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(StoreError::Write)?;
            }
        }

        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, encoded).map_err(StoreError::Write)?;
        if let Err(err) = fs::rename(&tmp_path, &self.path) {
            error!(
                "event=store_save module=store status=error backend=local path={} error={}",
                self.path.display(),
                err
            );
            return Err(StoreError::Write(err));
        }

        info!(
            "event=store_save module=store status=ok backend=local count={}",
            expenses.len()
        );
        Ok(())
    }

    /// Assigns a client-generated id: current epoch milliseconds as a
    /// decimal string, bumped while it collides with an existing record.
    fn assign_id(existing: &[Expense]) -> ExpenseId {
        let mut millis = Utc::now().timestamp_millis();
        loop {
            let candidate = millis.to_string();
            if !existing.iter().any(|e| e.id.as_str() == candidate) {
                return ExpenseId::new(candidate);
            }
            millis += 1;
        }
    }
}

impl ExpenseStore for JsonFileStore {
    fn list(&self) -> StoreResult<Vec<Expense>> {
        let raw = match fs::read(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => {
                error!(
                    "event=store_list module=store status=error backend=local path={} error={}",
                    self.path.display(),
                    err
                );
                return Err(StoreError::Read(err));
            }
        };

        serde_json::from_slice(&raw).map_err(|err| {
            error!(
                "event=store_list module=store status=error backend=local path={} error_code=corrupt error={}",
                self.path.display(),
                err
            );
            StoreError::Parse(err)
        })
    }

    fn create(&self, fields: &ExpenseFields) -> StoreResult<ExpenseId> {
        fields.validate()?;

        let mut expenses = self.list()?;
        let id = Self::assign_id(&expenses);
        expenses.push(Expense::from_fields(id.clone(), fields));
        self.save(&expenses)?;
        Ok(id)
    }

    fn update(&self, id: &ExpenseId, fields: &ExpenseFields) -> StoreResult<()> {
        fields.validate()?;

        let mut expenses = self.list()?;
        let target = expenses
            .iter_mut()
            .find(|e| e.id == *id)
            .ok_or_else(|| StoreError::NotFound(id.clone()))?;
        *target = Expense::from_fields(id.clone(), fields);
        self.save(&expenses)
    }

    fn delete(&self, id: &ExpenseId) -> StoreResult<()> {
        let mut expenses = self.list()?;
        let before = expenses.len();
        expenses.retain(|e| e.id != *id);
        if expenses.len() == before {
            // Deleting a missing id is a no-op, not an error.
            return Ok(());
        }
        self.save(&expenses)
    }
}
