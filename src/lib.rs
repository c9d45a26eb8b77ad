// Movie Log - Core Library
// Exposes the store, statistics and report modules for the CLI and tests

pub mod collector;
pub mod commands;
pub mod config;
pub mod entry;
pub mod error;
pub mod report;
pub mod stats;
pub mod store;

// Re-export commonly used types
pub use collector::{prompt_entry, EntryCollector, PartialEntry};
pub use commands::{add_entry, overview, regenerate_reports, ReportRun};
pub use config::Config;
pub use entry::{parse_first_watch, MovieEntry, RawEntry};
pub use error::MovieLogError;
pub use report::{
    build_reports, render_overview, render_year_report, write_reports, Artifact,
    OVERVIEW_FILE_NAME,
};
pub use stats::{group_by_year, MonthHistogram, Overview, YearGroup, YearStats, YearSummary};
pub use store::{append_entry, load_entries};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
