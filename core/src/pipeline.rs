//! The conversion driver.
//!
//! EXECUTION ORDER (fixed):
//!   1. Read and group the source file
//!   2. Create the store (schema, indices, metadata)
//!   3. Render + insert every record, group by group, keys sorted
//!   4. Flush the last batch and VACUUM
//!
//! An unreadable input degrades to an empty group. Store errors abort.

use crate::{
    config::ConverterConfig,
    error::ConvertResult,
    render::render_row,
    source::{read_interactions, ReadOutcome, SkippedLine},
    store::{InteractionStore, InteractionWriter, SqliteStore},
    types::InteractionGroup,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub language: String,
    pub db_path: Option<PathBuf>,
    pub started_at: DateTime<Utc>,
    /// Distinct ATC1 keys.
    pub groups: usize,
    pub records: usize,
    pub rows_inserted: usize,
    pub commits: usize,
    pub skipped_lines: Vec<SkippedLine>,
    pub input_unreadable: bool,
    pub interrupted: Option<String>,
    pub elapsed_secs: f64,
}

impl RunReport {
    pub fn summary_line(&self) -> String {
        format!(
            "processed {} drug interactions ({} ATC1 keys) in {:.3} sec",
            self.records, self.groups, self.elapsed_secs
        )
    }
}

pub struct Converter {
    config: ConverterConfig,
}

impl Converter {
    pub fn new(config: ConverterConfig) -> ConvertResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Full run against the locale's SQLite file under `output_dir`.
    pub fn run(&self) -> ConvertResult<RunReport> {
        let store = SqliteStore::create(&self.config.output_dir, &self.config.language)?;
        let db_path = store.path().map(PathBuf::from);
        let (_store, mut report) = self.run_with_store(store)?;
        report.db_path = db_path;
        Ok(report)
    }

    /// Full run against any backend. The store is handed back after compaction.
    pub fn run_with_store<S: InteractionStore>(&self, store: S) -> ConvertResult<(S, RunReport)> {
        let started_at = Utc::now();
        let timer = Instant::now();
        log::info!(
            "Processing drug interactions csv {} (locale {})",
            self.config.input.display(),
            self.config.language
        );

        let (outcome, input_unreadable) = match read_interactions(&self.config.input) {
            Ok(outcome) => (outcome, false),
            Err(e) => {
                log::error!(">> InteractionsDB: {e}");
                (ReadOutcome::default(), true)
            }
        };
        if !outcome.skipped.is_empty() {
            log::warn!("Skipped {} malformed lines", outcome.skipped.len());
        }

        let mut writer = InteractionWriter::new(self.config.batch_size);
        writer.create(store, &self.config.metadata_locale)?;
        self.write_groups(&outcome.group, &mut writer)?;
        let (store, stats) = writer.finish()?;

        let report = RunReport {
            language: self.config.language.clone(),
            db_path: None,
            started_at,
            groups: outcome.group.len(),
            records: outcome.group.record_count(),
            rows_inserted: stats.rows_inserted,
            commits: stats.commits,
            skipped_lines: outcome.skipped,
            input_unreadable,
            interrupted: outcome.interrupted,
            elapsed_secs: timer.elapsed().as_secs_f64(),
        };
        log::info!("{}", report.summary_line());
        Ok((store, report))
    }

    fn write_groups<S: InteractionStore>(
        &self,
        group: &InteractionGroup,
        writer: &mut InteractionWriter<S>,
    ) -> ConvertResult<()> {
        for (n, (key, records)) in group.iter().enumerate() {
            let progress = format!(
                "{}: {} interacts with {} meds",
                n + 1,
                key.to_uppercase(),
                records.len()
            );
            if self.config.show_progress {
                log::info!("{progress}");
            } else {
                log::debug!("{progress}");
            }

            for record in records {
                writer.insert(render_row(key, record))?;
            }
        }
        Ok(())
    }
}
