//! Relational output
//!
//! This module contains the fact rows, the in-memory dataset, the star and
//! snowflake layouts, the summary record and the writer that persists them.
//!
//! # Overview
//!
//! - **ConversationFact / IntentUsageFact**: fact rows shared by both layouts
//! - **GeneratedDataset**: everything a run produced, ready to be written
//! - **SnowflakeUserRow**: `Dim_User` normalized against `Dim_Device`
//! - **SummaryStatistics**: the `SUMMARY.json` record
//! - **DatasetWriter**: CSV directories per layout plus the summary
//! - **verify_integrity**: audit of every key reference and value range

pub mod dataset;
pub mod facts;
pub mod integrity;
pub mod layout;
pub mod summary;
pub mod writer;

pub use dataset::GeneratedDataset;
pub use facts::{ConversationFact, IntentUsageFact};
pub use integrity::{verify_integrity, IntegrityViolation};
pub use layout::{snowflake_users, table_files, SnowflakeUserRow};
pub use summary::SummaryStatistics;
pub use writer::{write_csv, DatasetWriter, EVENT_LOG_FILE, SUMMARY_FILE};
