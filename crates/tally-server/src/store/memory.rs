//! In-process backend. Rows are `AtomicU64`s in a sharded map, so increments
//! on the same key never serialize on anything wider than one shard.

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;
use tally_core::error::{Result, TallyError};

use super::CounterStore;

#[derive(Debug, Default)]
pub struct MemoryStore {
    rows: DashMap<String, AtomicU64>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a row. Only useful for tests and warm starts.
    pub fn with_row(key: &str, count: u64) -> Self {
        let store = Self::new();
        store.rows.insert(key.to_string(), AtomicU64::new(count));
        store
    }
}

#[async_trait]
impl CounterStore for MemoryStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn increment(&self, key: &str) -> Result<u64> {
        // Fast path: row exists, only a shard read lock is held.
        if let Some(row) = self.rows.get(key) {
            return bump(row.value(), key);
        }
        let row = self
            .rows
            .entry(key.to_string())
            .or_insert_with(|| AtomicU64::new(0));
        bump(row.value(), key)
    }
}

fn bump(cell: &AtomicU64, key: &str) -> Result<u64> {
    cell.fetch_update(Ordering::AcqRel, Ordering::Acquire, |n| n.checked_add(1))
        .map(|prev| prev + 1)
        .map_err(|_| TallyError::Internal(format!("counter {key} overflowed")))
}
