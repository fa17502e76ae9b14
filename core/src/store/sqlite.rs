//! SQLite backend: one database file per locale.

use super::InteractionStore;
use crate::{error::ConvertResult, types::RenderedRow};
use rusqlite::{params, Connection, OptionalExtension};
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

const SCHEMA: &str = include_str!("../../migrations/001_interactions.sql");

const INSERT_ROW: &str = "INSERT INTO interactionsdb VALUES (NULL, ?1, ?2, ?3, ?4, ?5)";

/// `<output_dir>/drug_interactions_idx_<language>.db`
pub fn db_path(output_dir: &Path, language: &str) -> PathBuf {
    output_dir.join(format!("drug_interactions_idx_{language}.db"))
}

pub struct SqliteStore {
    conn: Connection,
    path: Option<PathBuf>, // None for :memory:
}

impl SqliteStore {
    /// Resolve the locale's database path under `output_dir` and open it.
    pub fn create(output_dir: &Path, language: &str) -> ConvertResult<Self> {
        Self::open(&db_path(output_dir, language))
    }

    /// Open `path`, creating parent directories and an empty file if absent.
    pub fn open(path: &Path) -> ConvertResult<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        OpenOptions::new().write(true).create(true).truncate(false).open(path)?;
        let conn = Connection::open(path)?;
        log::info!("Opened interactions database {}", path.display());
        Ok(Self {
            conn,
            path: Some(path.to_path_buf()),
        })
    }

    /// Open an in-memory database (used in tests).
    pub fn in_memory() -> ConvertResult<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self { conn, path: None })
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    // ── Read-back ──────────────────────────────────────────────

    pub fn row_count(&self) -> ConvertResult<i64> {
        let n = self
            .conn
            .query_row("SELECT COUNT(*) FROM interactionsdb", [], |row| row.get(0))?;
        Ok(n)
    }

    pub fn distinct_atc1(&self) -> ConvertResult<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT DISTINCT atc1 FROM interactionsdb ORDER BY atc1")?;
        let keys = stmt
            .query_map([], |row| row.get(0))?
            .collect::<Result<Vec<String>, _>>()?;
        Ok(keys)
    }

    /// Content columns in insertion order.
    pub fn rows(&self) -> ConvertResult<Vec<RenderedRow>> {
        let mut stmt = self.conn.prepare(
            "SELECT atc1, name1, atc2, name2, content
             FROM interactionsdb ORDER BY _id ASC",
        )?;
        let rows = stmt
            .query_map([], |row| {
                Ok(RenderedRow {
                    atc1: row.get(0)?,
                    name1: row.get(1)?,
                    atc2: row.get(2)?,
                    name2: row.get(3)?,
                    content: row.get(4)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    pub fn metadata_locale(&self) -> ConvertResult<Option<String>> {
        let locale = self
            .conn
            .query_row("SELECT locale FROM inter_metadata LIMIT 1", [], |row| row.get(0))
            .optional()?;
        Ok(locale)
    }

    pub fn index_names(&self) -> ConvertResult<Vec<String>> {
        let mut stmt = self.conn.prepare(
            "SELECT name FROM sqlite_master
             WHERE type = 'index' AND tbl_name = 'interactionsdb' AND sql IS NOT NULL
             ORDER BY name",
        )?;
        let names = stmt
            .query_map([], |row| row.get(0))?
            .collect::<Result<Vec<String>, _>>()?;
        Ok(names)
    }
}

impl InteractionStore for SqliteStore {
    fn setup_schema(&mut self, metadata_locale: &str) -> ConvertResult<()> {
        let tx = self.conn.transaction()?;
        tx.execute_batch(SCHEMA)?;
        tx.execute(
            "INSERT INTO inter_metadata (locale) VALUES (?1)",
            params![metadata_locale],
        )?;
        tx.commit()?;
        Ok(())
    }

    fn commit_batch(&mut self, rows: &[RenderedRow]) -> ConvertResult<()> {
        let tx = self.conn.transaction()?;
        {
            let mut stmt = tx.prepare_cached(INSERT_ROW)?;
            for row in rows {
                stmt.execute(params![row.atc1, row.name1, row.atc2, row.name2, row.content])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn compact(&mut self) -> ConvertResult<()> {
        self.conn.execute_batch("VACUUM;")?;
        Ok(())
    }
}
