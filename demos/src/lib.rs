// Copyright 2025 the Tabula Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared plumbing for the Tabula demos: logging setup and a JSON-file task
//! store standing in for browser local storage.
//!
//! Run:
//! - `cargo run -p tabula_demos --example reorder_list`
//! - `cargo run -p tabula_demos --example data_table`
//! - `cargo run -p tabula_demos --example modal_form`
//!
//! Set `RUST_LOG=trace` to see every hover decision.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde_json::{Value, json};
use tracing_subscriber::EnvFilter;

/// Default filter when `RUST_LOG` is not set.
const DEFAULT_LOG_FILTER: &str = "info";

/// Errors raised by the demo store.
#[derive(Debug, thiserror::Error)]
pub enum DemoError {
    /// Reading or writing the store file failed.
    #[error("task store {path} could not be accessed")]
    Io {
        /// Store location.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: io::Error,
    },
    /// The store file is not a JSON array of tasks.
    #[error("task store {path} is not valid JSON")]
    Json {
        /// Store location.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: serde_json::Error,
    },
}

/// Installs a `fmt` subscriber filtered by `RUST_LOG`.
///
/// Returns `false` if a global subscriber was already installed.
pub fn init_logging() -> bool {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .is_ok()
}

/// Tasks seeded into a fresh store.
#[must_use]
pub fn seed_tasks() -> Vec<Value> {
    vec![
        json!({ "id": 1, "title": "Draft the release notes", "owner": "Ana", "estimate": 3 }),
        json!({ "id": 2, "title": "Review the table pager", "owner": "Joe", "estimate": 2 }),
        json!({ "id": 3, "title": "Fix the drag preview", "owner": "Ana", "estimate": 5 }),
        json!({ "id": 4, "title": "Tag the release", "owner": "Kim", "estimate": 1 }),
        json!({ "id": 5, "title": "Write the form docs", "owner": "Joe" }),
    ]
}

/// A list of JSON tasks persisted to one file.
///
/// The store is the only writer of the committed order; demos call
/// [`move_task`](Self::move_task) from their drop handlers.
#[derive(Debug)]
pub struct TaskStore {
    path: PathBuf,
    tasks: Vec<Value>,
}

impl TaskStore {
    /// Opens the store at `path`, seeding it if the file does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns [`DemoError`] if the file exists but cannot be read or parsed.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, DemoError> {
        let path = path.into();
        let tasks = match fs::read_to_string(&path) {
            Ok(text) => serde_json::from_str(&text).map_err(|source| DemoError::Json {
                path: path.clone(),
                source,
            })?,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                tracing::info!(path = %path.display(), "seeding a new task store");
                seed_tasks()
            }
            Err(source) => return Err(DemoError::Io { path, source }),
        };
        Ok(Self { path, tasks })
    }

    /// Store location.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Tasks in committed order.
    #[must_use]
    pub fn tasks(&self) -> &[Value] {
        &self.tasks
    }

    /// Moves the task at `from` to position `to`, shifting the ones between.
    ///
    /// Returns `false` if either index is out of range.
    pub fn move_task(&mut self, from: usize, to: usize) -> bool {
        if from >= self.tasks.len() || to >= self.tasks.len() {
            tracing::warn!(from, to, len = self.tasks.len(), "move outside the store");
            return false;
        }
        let task = self.tasks.remove(from);
        self.tasks.insert(to, task);
        true
    }

    /// Writes the tasks back to disk.
    ///
    /// # Errors
    ///
    /// Returns [`DemoError::Io`] if the file cannot be written.
    pub fn save(&self) -> Result<(), DemoError> {
        let io_error = |source| DemoError::Io {
            path: self.path.clone(),
            source,
        };
        let text = serde_json::to_string_pretty(&self.tasks).map_err(|source| DemoError::Json {
            path: self.path.clone(),
            source,
        })?;
        fs::write(&self.path, text).map_err(io_error)?;
        tracing::debug!(path = %self.path.display(), tasks = self.tasks.len(), "task store saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::{TaskStore, seed_tasks};

    fn scratch(name: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("tabula-demos-{}-{name}.json", std::process::id()));
        let _ = fs::remove_file(&path);
        path
    }

    #[test]
    fn missing_file_is_seeded_and_round_trips() {
        let path = scratch("seed");
        let mut store = TaskStore::open(&path).unwrap();
        assert_eq!(store.tasks(), seed_tasks().as_slice());

        assert!(store.move_task(0, 2));
        assert!(!store.move_task(0, 9));
        store.save().unwrap();

        let reopened = TaskStore::open(&path).unwrap();
        let ids: Vec<_> = reopened.tasks().iter().map(|t| t["id"].clone()).collect();
        assert_eq!(ids, [2, 3, 1, 4, 5]);
        fs::remove_file(path).unwrap();
    }

    #[test]
    fn malformed_store_is_an_error() {
        let path = scratch("broken");
        fs::write(&path, "{ not json").unwrap();
        assert!(TaskStore::open(&path).is_err());
        fs::remove_file(path).unwrap();
    }
}
