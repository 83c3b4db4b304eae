//! Dataset writer
//!
//! Writes both relational layouts as CSV directories and the summary record
//! under one output root. The event log is written separately, while sessions
//! are generated.

use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

use crate::schema::layout::*;
use crate::schema::{GeneratedDataset, SummaryStatistics};
use crate::simulation::SimulationResult;
use crate::types::SchemaLayout;

/// Event log file name
pub const EVENT_LOG_FILE: &str = "logs.jsonl";
/// Summary file name
pub const SUMMARY_FILE: &str = "SUMMARY.json";

/// Writes a dataset under an output root
#[derive(Debug, Clone)]
pub struct DatasetWriter {
    outdir: PathBuf,
}

impl DatasetWriter {
    /// Create a writer rooted at `outdir`
    pub fn new(outdir: impl Into<PathBuf>) -> Self {
        Self { outdir: outdir.into() }
    }

    /// Output root
    pub fn outdir(&self) -> &Path {
        &self.outdir
    }

    /// Path of the raw event log
    pub fn event_log_path(&self) -> PathBuf {
        self.outdir.join(EVENT_LOG_FILE)
    }

    /// Directory of a layout
    pub fn layout_dir(&self, layout: SchemaLayout) -> PathBuf {
        self.outdir.join(layout.dir_name())
    }

    /// Path of the summary record
    pub fn summary_path(&self) -> PathBuf {
        self.outdir.join(SUMMARY_FILE)
    }

    /// Create the output root
    pub fn prepare(&self) -> SimulationResult<()> {
        fs::create_dir_all(&self.outdir)?;
        Ok(())
    }

    /// Write both layouts and the summary
    #[instrument(skip(self, dataset), fields(outdir = %self.outdir.display()))]
    pub fn write_all(&self, dataset: &GeneratedDataset) -> SimulationResult<()> {
        self.write_layout(dataset, SchemaLayout::Star)?;
        self.write_layout(dataset, SchemaLayout::Snowflake)?;
        self.write_summary(&dataset.summary())?;
        info!("Wrote star and snowflake schemas under {}", self.outdir.display());
        Ok(())
    }

    /// Write one layout's tables into its directory
    pub fn write_layout(&self, dataset: &GeneratedDataset, layout: SchemaLayout) -> SimulationResult<PathBuf> {
        let dir = self.layout_dir(layout);
        fs::create_dir_all(&dir)?;

        match layout {
            SchemaLayout::Star => write_csv(&dir.join(DIM_USER_FILE), &dataset.users)?,
            SchemaLayout::Snowflake => {
                write_csv(&dir.join(DIM_USER_FILE), &dataset.snowflake_users())?;
                write_csv(&dir.join(DIM_DEVICE_FILE), dataset.dimensions.devices.rows())?;
            }
        }
        write_csv(&dir.join(FACT_CONVERSATION_FILE), &dataset.conversations)?;
        write_csv(&dir.join(FACT_INTENT_USAGE_FILE), &dataset.intent_usage)?;
        write_csv(&dir.join(DIM_TIME_FILE), dataset.time.rows())?;
        write_csv(&dir.join(DIM_INTENT_FILE), dataset.dimensions.intents.rows())?;
        write_csv(&dir.join(DIM_CHANNEL_FILE), dataset.dimensions.channels.rows())?;

        debug!("Wrote {} layout to {}", layout, dir.display());
        Ok(dir)
    }

    /// Write `SUMMARY.json` with two-space indentation
    pub fn write_summary(&self, summary: &SummaryStatistics) -> SimulationResult<()> {
        let content = serde_json::to_string_pretty(summary)?;
        fs::write(self.summary_path(), content)?;
        Ok(())
    }
}

/// Write rows as CSV with a header taken from the row's field names
pub fn write_csv<T: Serialize>(path: &Path, rows: &[T]) -> SimulationResult<()> {
    let mut writer = csv::Writer::from_path(path)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    debug!("Wrote {} rows to {}", rows.len(), path.display());
    Ok(())
}
