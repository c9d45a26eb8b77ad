// 🗄️ Record Store - append-only CSV diary
//
// Format: one record per line, no header, five fields in fixed order
//   watched_date,title,release_year,rating,first_watch
// Records are appended, never rewritten.

use crate::entry::{MovieEntry, RawEntry};
use crate::error::{MovieLogError, Result};
use csv::{ReaderBuilder, Terminator, WriterBuilder};
use std::fs::{self, File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::Path;

/// Number of fields in every store record
pub const FIELD_COUNT: usize = 5;

/// Load the whole store, in file order.
///
/// A missing file is an empty store. The first malformed line aborts the
/// load; nothing is skipped silently.
pub fn load_entries(path: &Path) -> Result<Vec<MovieEntry>> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            log::info!("store {} does not exist yet, treating as empty", path.display());
            return Ok(Vec::new());
        }
        Err(err) => return Err(err.into()),
    };

    let entries = read_entries(file)?;
    log::info!("loaded {} entries from {}", entries.len(), path.display());
    Ok(entries)
}

/// Parse store records from any reader
pub fn read_entries<R: Read>(mut reader: R) -> Result<Vec<MovieEntry>> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;

    // The csv reader drops empty lines; a blank row is still a record with
    // missing fields.
    if let Some(line) = first_blank_line(&text) {
        return Err(MovieLogError::MalformedRecord { line, found: 0 });
    }

    // flexible: field counts are checked per record so the error names the line
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut entries = Vec::new();
    for result in rdr.records() {
        let record = result?;
        let line = record
            .position()
            .map(|p| p.line() as usize)
            .unwrap_or(entries.len() + 1);

        if record.len() != FIELD_COUNT {
            return Err(MovieLogError::MalformedRecord {
                line,
                found: record.len(),
            });
        }

        let raw = RawEntry::new(&record[0], &record[1], &record[2], &record[3], &record[4]);
        let entry = MovieEntry::from_raw(&raw).map_err(|err| err.at_line(line))?;
        entries.push(entry);
    }

    Ok(entries)
}

/// Append one record to the end of the store, creating it if needed.
pub fn append_entry(path: &Path, entry: &MovieEntry) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let mut file = OpenOptions::new()
        .create(true)
        .read(true)
        .append(true)
        .open(path)?;

    // A hand-edited store may lack the final newline
    if needs_leading_newline(&mut file)? {
        file.write_all(b"\n")?;
    }

    write_entry(&mut file, entry)?;
    file.flush()?;

    log::debug!("appended {:?} to {}", entry.title, path.display());
    Ok(())
}

/// Write a single store record
pub fn write_entry<W: Write>(writer: W, entry: &MovieEntry) -> Result<()> {
    let mut wtr = WriterBuilder::new()
        .has_headers(false)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(writer);

    wtr.write_record(entry.to_raw().fields())?;
    wtr.flush()?;
    Ok(())
}

/// 1-based number of the first empty line outside a quoted field
fn first_blank_line(text: &str) -> Option<usize> {
    let mut in_quotes = false;

    for (idx, line) in text.lines().enumerate() {
        if !in_quotes && line.trim_end_matches('\r').is_empty() {
            return Some(idx + 1);
        }
        // an escaped quote ("") toggles twice
        if line.matches('"').count() % 2 == 1 {
            in_quotes = !in_quotes;
        }
    }

    None
}

fn needs_leading_newline(file: &mut File) -> io::Result<bool> {
    let len = file.metadata()?.len();
    if len == 0 {
        return Ok(false);
    }

    let mut last = [0u8; 1];
    file.seek(SeekFrom::Start(len - 1))?;
    file.read_exact(&mut last)?;
    Ok(last[0] != b'\n')
}

// ============================================================================
// TESTS
// ============================================================================
