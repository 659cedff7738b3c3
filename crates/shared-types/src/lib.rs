//! Shared data model for clause-by-clause policy comparison
//!
//! These types cross every boundary in the workspace: the engine produces
//! them, the CLI and any external exporter consume them.

pub mod report;
pub mod types;

pub use report::{AlignedClausePair, ComparisonReport, ReportRow, ReportSummary, Similarity};
pub use types::{ClauseCode, ClauseMap, ClauseRecord, NumericToken, Presence};
