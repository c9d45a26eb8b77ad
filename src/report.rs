// 📝 Report Renderer - markdown artifacts
//
// Two kinds of output:
//   movies_<year>.md  one listing table per watch year
//   overview.md       yearly statistics + monthly breakdown
//
// Everything is rendered in memory first and only then written, so a failure
// leaves every existing artifact untouched.

use crate::entry::{MovieEntry, DATE_FORMAT};
use crate::stats::{group_by_year, Overview, YearGroup, MONTH_NAMES};
use anyhow::{Context, Result};
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

pub const OVERVIEW_FILE_NAME: &str = "overview.md";

/// Marker shown in the "First Time?" column
pub const FIRST_WATCH_MARKER: char = 'X';

const YEAR_HEADER: &str = "| # | Date of Watching | Title | Year of Release | My Rating | First Time? |\n\
                           |---|------------------|-------|-----------------|-----------|-------------|\n";

const STATS_HEADER: &str = "| Year | Avg Rating | Avg Release Year | Median Release Year | Oldest | Newest | % First Time | Total Movies |\n\
                            |------|------------|------------------|---------------------|--------|--------|--------------|--------------|\n";

// ============================================================================
// ARTIFACT
// ============================================================================

/// A rendered report and where it goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub path: PathBuf,
    pub contents: String,
}

pub fn year_report_file_name(year: i32) -> String {
    format!("movies_{}.md", year)
}

// ============================================================================
// RENDERING
// ============================================================================

/// Listing table for one watch year, rows numbered from 1 in file order
pub fn render_year_report(group: &YearGroup) -> String {
    let mut out = String::from(YEAR_HEADER);

    for (index, movie) in group.entries().iter().enumerate() {
        // writing into a String cannot fail
        let _ = writeln!(
            out,
            "| {} | {} | {} | {:04} | {} | {} |",
            index + 1,
            movie.watched_date.format(DATE_FORMAT),
            escape_cell(&movie.title),
            movie.release_year,
            movie.rating_text(),
            first_watch_marker(movie),
        );
    }

    out
}

/// Yearly statistics table followed by the monthly breakdown table
pub fn render_overview(overview: &Overview) -> String {
    let mut out = String::from(STATS_HEADER);

    for summary in &overview.years {
        let stats = &summary.stats;
        let _ = writeln!(
            out,
            "| {} | {:.2} | {:.0} | {} | {} | {} | {:.2}% | {} |",
            stats.year,
            stats.avg_rating,
            stats.avg_release_year,
            stats.median_release_year,
            stats.oldest_release_year,
            stats.newest_release_year,
            stats.percent_first_time,
            stats.total_movies,
        );
    }

    out.push('\n');
    out.push_str(&monthly_header());

    for summary in &overview.years {
        let _ = write!(out, "| {} |", summary.stats.year);
        for (_, count) in summary.months.iter() {
            let _ = write!(out, " {} |", count);
        }
        out.push('\n');
    }

    out
}

fn monthly_header() -> String {
    let mut names = String::from("| Year |");
    let mut rule = String::from("|------|");
    for month in MONTH_NAMES {
        let _ = write!(names, " {} |", month);
        let _ = write!(rule, "{}|", "-".repeat(month.len() + 2));
    }
    format!("{}\n{}\n", names, rule)
}

fn first_watch_marker(movie: &MovieEntry) -> char {
    if movie.first_watch {
        FIRST_WATCH_MARKER
    } else {
        ' '
    }
}

/// A literal pipe would end the table cell early
fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|")
}

// ============================================================================
// BUILD + WRITE
// ============================================================================

/// Render every artifact for the given store contents.
///
/// Per-year reports come first, in first-encountered year order, followed by
/// the overview.
pub fn build_reports(entries: &[MovieEntry], out_dir: &Path) -> Vec<Artifact> {
    let groups = group_by_year(entries);

    let mut artifacts: Vec<Artifact> = groups
        .values()
        .map(|group| Artifact {
            path: out_dir.join(year_report_file_name(group.year())),
            contents: render_year_report(group),
        })
        .collect();

    artifacts.push(Artifact {
        path: out_dir.join(OVERVIEW_FILE_NAME),
        contents: render_overview(&Overview::from_groups(&groups)),
    });

    artifacts
}

/// Overwrite each artifact on disk. Existing content is replaced, never merged.
pub fn write_reports(artifacts: &[Artifact]) -> Result<()> {
    for artifact in artifacts {
        if let Some(parent) = artifact.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create report directory: {}", parent.display())
                })?;
            }
        }

        fs::write(&artifact.path, &artifact.contents)
            .with_context(|| format!("Failed to write report: {}", artifact.path.display()))?;
        log::info!("wrote {}", artifact.path.display());
    }

    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================
