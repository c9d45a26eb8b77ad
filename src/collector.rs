// ⌨️ Entry Collector - gathers one diary entry as raw text
// Any field already supplied (e.g. via CLI flags) is not asked again.

use crate::entry::RawEntry;
use crate::error::{MovieLogError, Result};
use std::io::{BufRead, Write};

const DATE_PROMPT: &str = "Enter date of watching (YYYY-MM-DD): ";
const TITLE_PROMPT: &str = "Enter movie name: ";
const RELEASE_YEAR_PROMPT: &str = "Enter movie release year (YYYY): ";
const RATING_PROMPT: &str = "Enter your rating of the movie (X.X): ";
const FIRST_WATCH_PROMPT: &str = "Is this the first time watching it? (yes/no): ";

/// Fields known before prompting
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartialEntry {
    pub watched_date: Option<String>,
    pub title: Option<String>,
    pub release_year: Option<String>,
    pub rating: Option<String>,
    pub first_watch: Option<String>,
}

impl PartialEntry {
    pub fn is_complete(&self) -> bool {
        self.watched_date.is_some()
            && self.title.is_some()
            && self.release_year.is_some()
            && self.rating.is_some()
            && self.first_watch.is_some()
    }
}

/// Prompts on `output`, reads answers line by line from `input`
pub struct EntryCollector<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> EntryCollector<R, W> {
    pub fn new(input: R, output: W) -> Self {
        EntryCollector { input, output }
    }

    /// Collect every field of one entry, asking only for the missing ones
    pub fn collect(&mut self, preset: PartialEntry) -> Result<RawEntry> {
        let watched_date = self.field(preset.watched_date, DATE_PROMPT, "the watch date")?;
        let title = self.field(preset.title, TITLE_PROMPT, "the movie name")?;
        let release_year =
            self.field(preset.release_year, RELEASE_YEAR_PROMPT, "the release year")?;
        let rating = self.field(preset.rating, RATING_PROMPT, "the rating")?;
        let first_watch =
            self.field(preset.first_watch, FIRST_WATCH_PROMPT, "the first-watch answer")?;

        Ok(RawEntry {
            watched_date,
            title,
            release_year,
            rating,
            first_watch,
        })
    }

    fn field(
        &mut self,
        preset: Option<String>,
        prompt: &str,
        what: &'static str,
    ) -> Result<String> {
        match preset {
            Some(value) => Ok(value),
            None => self.ask(prompt, what),
        }
    }

    fn ask(&mut self, prompt: &str, what: &'static str) -> Result<String> {
        self.output.write_all(prompt.as_bytes())?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(MovieLogError::UnexpectedEndOfInput(what));
        }

        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }
}

/// Prompt for a full entry with nothing preset
pub fn prompt_entry<R: BufRead, W: Write>(input: R, output: W) -> Result<RawEntry> {
    EntryCollector::new(input, output).collect(PartialEntry::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_prompt_entry_reads_all_fields_in_order() {
        let input = Cursor::new("2023-01-15\nInception\n2010\n9.0\nYes\n");
        let mut output = Vec::new();

        let raw = prompt_entry(input, &mut output).unwrap();

        assert_eq!(raw, RawEntry::new("2023-01-15", "Inception", "2010", "9.0", "Yes"));
        let shown = String::from_utf8(output).unwrap();
        assert_eq!(
            shown,
            [DATE_PROMPT, TITLE_PROMPT, RELEASE_YEAR_PROMPT, RATING_PROMPT, FIRST_WATCH_PROMPT]
                .concat()
        );
    }

    #[test]
    fn test_prompt_entry_strips_crlf() {
        let input = Cursor::new("2023-01-15\r\nThe Thing\r\n1982\r\n8\r\nno\r\n");
        let raw = prompt_entry(input, Vec::new()).unwrap();
        assert_eq!(raw.title, "The Thing");
        assert_eq!(raw.first_watch, "no");
    }

    #[test]
    fn test_prompt_entry_early_eof() {
        let input = Cursor::new("2023-01-15\nInception\n");
        let err = prompt_entry(input, Vec::new()).unwrap_err();
        assert!(matches!(err, MovieLogError::UnexpectedEndOfInput("the release year")));
    }

    #[test]
    fn test_collect_skips_preset_fields() {
        let preset = PartialEntry {
            watched_date: Some("2024-03-01".to_string()),
            title: Some("Arrival".to_string()),
            release_year: None,
            rating: Some("8.0".to_string()),
            first_watch: None,
        };
        assert!(!preset.is_complete());

        let mut output = Vec::new();
        let raw = EntryCollector::new(Cursor::new("2016\nyes\n"), &mut output)
            .collect(preset)
            .unwrap();

        assert_eq!(raw, RawEntry::new("2024-03-01", "Arrival", "2016", "8.0", "yes"));
        assert_eq!(
            String::from_utf8(output).unwrap(),
            format!("{}{}", RELEASE_YEAR_PROMPT, FIRST_WATCH_PROMPT)
        );
    }
}
