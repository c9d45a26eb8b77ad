// 🔁 Run pipeline: collect → append → recompute → render
//
// Each run reads the whole store and recomputes everything from scratch.

use crate::config::Config;
use crate::entry::{MovieEntry, RawEntry};
use crate::report::{build_reports, write_reports, Artifact};
use crate::stats::Overview;
use crate::store::{append_entry, load_entries};
use anyhow::{Context, Result};

/// Validate a raw entry and append it to the store.
///
/// Nothing is written if validation fails.
pub fn add_entry(config: &Config, raw: &RawEntry) -> Result<MovieEntry> {
    let entry = MovieEntry::from_raw(raw).context("Invalid movie entry")?;

    append_entry(&config.store_path, &entry).with_context(|| {
        format!("Failed to append to store: {}", config.store_path.display())
    })?;

    Ok(entry)
}

/// What a report run wrote, plus the statistics behind it
#[derive(Debug, Clone)]
pub struct ReportRun {
    pub artifacts: Vec<Artifact>,
    pub overview: Overview,
}

/// Rebuild every report from the full store.
///
/// The store is loaded and all reports rendered before the first file is
/// touched; any bad record aborts the run with no artifact rewritten.
pub fn regenerate_reports(config: &Config) -> Result<ReportRun> {
    let entries = load_store(config)?;
    let artifacts = build_reports(&entries, &config.report_dir);
    write_reports(&artifacts)?;
    Ok(ReportRun {
        artifacts,
        overview: Overview::from_entries(&entries),
    })
}

/// Overview statistics for the current store
pub fn overview(config: &Config) -> Result<Overview> {
    let entries = load_store(config)?;
    Ok(Overview::from_entries(&entries))
}

fn load_store(config: &Config) -> Result<Vec<MovieEntry>> {
    load_entries(&config.store_path)
        .with_context(|| format!("Failed to load store: {}", config.store_path.display()))
}
