use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use movie_log::{
    add_entry, overview, regenerate_reports, render_overview, Config, EntryCollector, Overview,
    PartialEntry,
};
use std::io;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "movie-log", version, about = "Personal movie-watching diary with markdown reports")]
struct Cli {
    /// CSV store file [env: MOVIE_LOG_STORE] [default: movies.csv]
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    /// Directory for the generated reports [env: MOVIE_LOG_DIR] [default: .]
    #[arg(long, global = true)]
    out_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Log one movie (prompting for missing fields), then regenerate reports
    Add(AddArgs),
    /// Regenerate all reports from the store
    Report,
    /// Print the overview statistics
    Stats {
        /// Emit JSON instead of markdown
        #[arg(long)]
        json: bool,
        /// Only this watch year
        #[arg(long)]
        year: Option<i32>,
    },
}

#[derive(Debug, Default, Args)]
struct AddArgs {
    /// Date of watching (YYYY-MM-DD)
    #[arg(long)]
    date: Option<String>,
    #[arg(long)]
    title: Option<String>,
    #[arg(long)]
    release_year: Option<String>,
    #[arg(long)]
    rating: Option<String>,
    /// "yes" for a first watch, anything else otherwise
    #[arg(long)]
    first_watch: Option<String>,
}

impl From<AddArgs> for PartialEntry {
    fn from(args: AddArgs) -> Self {
        PartialEntry {
            watched_date: args.date,
            title: args.title,
            release_year: args.release_year,
            rating: args.rating,
            first_watch: args.first_watch,
        }
    }
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::resolve(cli.store, cli.out_dir);
    log::debug!("using {:?}", config);

    match cli.command.unwrap_or(Command::Add(AddArgs::default())) {
        Command::Add(args) => run_add(&config, args),
        Command::Report => run_report(&config),
        Command::Stats { json, year } => run_stats(&config, json, year),
    }
}

fn run_add(config: &Config, args: AddArgs) -> Result<()> {
    let preset = PartialEntry::from(args);

    let raw = if preset.is_complete() {
        EntryCollector::new(io::empty(), io::sink()).collect(preset)?
    } else {
        let stdin = io::stdin();
        EntryCollector::new(stdin.lock(), io::stdout()).collect(preset)?
    };

    let entry = add_entry(config, &raw)?;
    println!("✅ Movie added successfully! ({} on {})", entry.title, entry.watched_date);

    run_report(config)
}

fn run_report(config: &Config) -> Result<()> {
    let run = regenerate_reports(config)?;

    let year_reports = run.artifacts.len().saturating_sub(1);
    println!("✓ {} yearly markdown file(s) updated", year_reports);
    println!(
        "✓ Overview markdown file updated! ({} movies across {} year(s))",
        run.overview.total_movies(),
        run.overview.years.len()
    );
    Ok(())
}

fn run_stats(config: &Config, json: bool, year: Option<i32>) -> Result<()> {
    let mut overview = overview(config)?;

    if let Some(year) = year {
        let summary = overview
            .get(year)
            .cloned()
            .with_context(|| format!("No movies logged in {}", year))?;
        overview = Overview {
            years: vec![summary],
        };
    }

    if json {
        let text = serde_json::to_string_pretty(&overview).context("Failed to serialize overview")?;
        println!("{}", text);
    } else {
        print!("{}", render_overview(&overview));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_subcommand_defaults_to_add() {
        let cli = Cli::try_parse_from(["movie-log"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_add_flags_fill_partial_entry() {
        let cli = Cli::try_parse_from([
            "movie-log",
            "add",
            "--date",
            "2023-01-15",
            "--title",
            "Inception",
            "--release-year",
            "2010",
            "--rating",
            "9.0",
            "--first-watch",
            "yes",
        ])
        .unwrap();

        let Some(Command::Add(args)) = cli.command else {
            panic!("expected add command");
        };
        let preset = PartialEntry::from(args);
        assert!(preset.is_complete());
        assert_eq!(preset.title.as_deref(), Some("Inception"));
    }

    #[test]
    fn test_stats_year_filter() {
        let cli = Cli::try_parse_from(["movie-log", "stats", "--year", "2023", "--json"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Command::Stats {
                json: true,
                year: Some(2023)
            })
        ));
    }

    #[test]
    fn test_global_paths_after_subcommand() {
        let cli = Cli::try_parse_from(["movie-log", "report", "--store", "x.csv", "--out-dir", "out"])
            .unwrap();
        assert_eq!(cli.store, Some(PathBuf::from("x.csv")));
        assert_eq!(cli.out_dir, Some(PathBuf::from("out")));
    }
}
