//! Database writer.
//!
//! RULE: Only the store talks to the database.
//! The pipeline hands rendered rows to `InteractionWriter`, which batches
//! them and commits through an `InteractionStore` backend.

mod sqlite;

pub use sqlite::{db_path, SqliteStore};

use crate::{
    error::{ConvertError, ConvertResult},
    types::RenderedRow,
};
use serde::Serialize;

/// Rows per committed transaction.
pub const DEFAULT_BATCH_SIZE: usize = 20;

/// Storage backend for one conversion run.
pub trait InteractionStore {
    /// Drop and recreate the metadata and interactions tables plus indices.
    fn setup_schema(&mut self, metadata_locale: &str) -> ConvertResult<()>;

    /// Insert `rows` in a single transaction.
    fn commit_batch(&mut self, rows: &[RenderedRow]) -> ConvertResult<()>;

    /// Reclaim free pages once all rows are written.
    fn compact(&mut self) -> ConvertResult<()>;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct WriterStats {
    pub rows_inserted: usize,
    pub commits: usize,
}

/// Batches rows and owns the store for the lifetime of the run.
pub struct InteractionWriter<S> {
    store: Option<S>,
    pending: Vec<RenderedRow>,
    batch_size: usize,
    stats: WriterStats,
}

impl<S: InteractionStore> InteractionWriter<S> {
    /// A writer with no store attached. `create` must succeed before `insert`.
    pub fn new(batch_size: usize) -> Self {
        let batch_size = batch_size.max(1);
        Self {
            store: None,
            pending: Vec::with_capacity(batch_size),
            batch_size,
            stats: WriterStats::default(),
        }
    }

    /// Set up the schema on `store` and take ownership of it.
    /// On failure the writer stays detached.
    pub fn create(&mut self, mut store: S, metadata_locale: &str) -> ConvertResult<()> {
        store.setup_schema(metadata_locale)?;
        self.store = Some(store);
        self.pending.clear();
        self.stats = WriterStats::default();
        Ok(())
    }

    pub fn is_created(&self) -> bool {
        self.store.is_some()
    }

    pub fn insert(&mut self, row: RenderedRow) -> ConvertResult<()> {
        if self.store.is_none() {
            log::error!(">> InteractionsDB: There is no database!");
            return Err(ConvertError::DatabaseNotCreated);
        }
        self.pending.push(row);
        if self.pending.len() >= self.batch_size {
            self.flush()?;
        }
        Ok(())
    }

    /// Commit whatever is pending. A no-op when nothing is queued.
    pub fn flush(&mut self) -> ConvertResult<()> {
        let store = self.store.as_mut().ok_or(ConvertError::DatabaseNotCreated)?;
        if self.pending.is_empty() {
            return Ok(());
        }
        store.commit_batch(&self.pending)?;
        self.stats.rows_inserted += self.pending.len();
        self.stats.commits += 1;
        log::debug!(
            "Committed batch of {} rows ({} total)",
            self.pending.len(),
            self.stats.rows_inserted
        );
        self.pending.clear();
        Ok(())
    }

    /// Flush the remainder, compact, and hand the store back.
    pub fn finish(mut self) -> ConvertResult<(S, WriterStats)> {
        self.flush()?;
        let mut store = self.store.take().ok_or(ConvertError::DatabaseNotCreated)?;
        store.compact()?;
        Ok((store, self.stats))
    }
}
