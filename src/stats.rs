// 📊 Statistics Engine
//
// Pure functions over the full record sequence: group by watch year (keeping
// the order in which years first appear), tally months, summarize each year.
// Nothing here is cached; every run recomputes from the store.

use crate::entry::MovieEntry;
use indexmap::IndexMap;
use serde::Serialize;

/// Full month names, calendar order
pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

// ============================================================================
// YEAR GROUP
// ============================================================================

/// All entries watched in one calendar year, in file order.
///
/// Only [`group_by_year`] builds these, and always from at least one entry,
/// so averages over a group never divide by zero.
#[derive(Debug, Clone, PartialEq)]
pub struct YearGroup {
    year: i32,
    entries: Vec<MovieEntry>,
}

impl YearGroup {
    fn new(first: MovieEntry) -> Self {
        YearGroup {
            year: first.watch_year(),
            entries: vec![first],
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn entries(&self) -> &[MovieEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Partition entries by watch year, keyed in first-encountered order.
pub fn group_by_year(entries: &[MovieEntry]) -> IndexMap<i32, YearGroup> {
    let mut groups: IndexMap<i32, YearGroup> = IndexMap::new();

    for entry in entries {
        match groups.get_mut(&entry.watch_year()) {
            Some(group) => group.entries.push(entry.clone()),
            None => {
                groups.insert(entry.watch_year(), YearGroup::new(entry.clone()));
            }
        }
    }

    groups
}

// ============================================================================
// MONTH HISTOGRAM
// ============================================================================

/// Entries per calendar month for one year. Empty months stay at zero.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MonthHistogram {
    counts: [usize; 12],
}

impl MonthHistogram {
    pub fn for_group(group: &YearGroup) -> Self {
        let mut histogram = MonthHistogram::default();
        for entry in group.entries() {
            histogram.counts[entry.watch_month0()] += 1;
        }
        histogram
    }

    /// Count for a full month name ("March"); unknown names are None
    pub fn get(&self, month: &str) -> Option<usize> {
        MONTH_NAMES
            .iter()
            .position(|name| name.eq_ignore_ascii_case(month))
            .map(|idx| self.counts[idx])
    }

    /// (month name, count) for all twelve months, January first
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, usize)> + '_ {
        MONTH_NAMES.iter().copied().zip(self.counts.iter().copied())
    }
}

impl Serialize for MonthHistogram {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let map: IndexMap<&str, usize> = self.iter().collect();
        map.serialize(serializer)
    }
}

// ============================================================================
// YEAR STATS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearStats {
    pub year: i32,
    pub avg_rating: f64,
    pub avg_release_year: f64,
    pub median_release_year: i32,
    pub oldest_release_year: i32,
    pub newest_release_year: i32,
    pub percent_first_time: f64,
    pub total_movies: usize,
}

impl YearStats {
    pub fn compute(group: &YearGroup) -> Self {
        let total = group.len();
        let count = total as f64;

        let rating_sum: f64 = group.entries().iter().map(|e| e.rating).sum();

        let mut release_years: Vec<i32> = group.entries().iter().map(|e| e.release_year).collect();
        release_years.sort_unstable();
        let release_sum: i64 = release_years.iter().map(|&y| i64::from(y)).sum();

        let first_time = group.entries().iter().filter(|e| e.first_watch).count();

        YearStats {
            year: group.year(),
            avg_rating: rating_sum / count,
            avg_release_year: release_sum as f64 / count,
            // Element at count/2 of the sorted list, never an average of the
            // two middle values.
            median_release_year: release_years[total / 2],
            oldest_release_year: release_years[0],
            newest_release_year: release_years[total - 1],
            percent_first_time: first_time as f64 * 100.0 / count,
            total_movies: total,
        }
    }
}

// ============================================================================
// OVERVIEW
// ============================================================================

/// Everything the overview report needs for one year
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearSummary {
    #[serde(flatten)]
    pub stats: YearStats,
    pub months: MonthHistogram,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Overview {
    pub years: Vec<YearSummary>,
}

impl Overview {
    pub fn from_groups(groups: &IndexMap<i32, YearGroup>) -> Self {
        let years = groups
            .values()
            .map(|group| YearSummary {
                stats: YearStats::compute(group),
                months: MonthHistogram::for_group(group),
            })
            .collect();

        Overview { years }
    }

    pub fn from_entries(entries: &[MovieEntry]) -> Self {
        Self::from_groups(&group_by_year(entries))
    }

    pub fn get(&self, year: i32) -> Option<&YearSummary> {
        self.years.iter().find(|summary| summary.stats.year == year)
    }

    pub fn total_movies(&self) -> usize {
        self.years.iter().map(|summary| summary.stats.total_movies).sum()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::RawEntry;

    fn entry(date: &str, year: i32, rating: f64, first: bool) -> MovieEntry {
        let raw = RawEntry::new(
            date,
            "Test Movie",
            year.to_string(),
            rating.to_string(),
            if first { "yes" } else { "no" },
        );
        MovieEntry::from_raw(&raw).unwrap()
    }

    fn scenario() -> Vec<MovieEntry> {
        vec![
            entry("2023-01-15", 2010, 9.0, true),
            entry("2023-06-02", 2010, 9.5, false),
            entry("2024-03-01", 2016, 8.0, true),
        ]
    }

    #[test]
    fn test_group_by_year_first_encountered_order() {
        let entries = vec![
            entry("2024-01-01", 2000, 7.0, true),
            entry("2022-05-05", 2001, 7.0, true),
            entry("2024-02-02", 2002, 7.0, true),
            entry("2023-03-03", 2003, 7.0, true),
        ];

        let groups = group_by_year(&entries);

        let years: Vec<i32> = groups.keys().copied().collect();
        assert_eq!(years, vec![2024, 2022, 2023]);
        let releases: Vec<i32> = groups[&2024].entries().iter().map(|e| e.release_year).collect();
        assert_eq!(releases, vec![2000, 2002]);
    }

    #[test]
    fn test_group_by_year_is_complete() {
        let entries = vec![
            entry("2021-01-01", 1990, 5.0, true),
            entry("2022-01-01", 1991, 6.0, false),
            entry("2021-12-31", 1992, 7.0, true),
            entry("2023-07-04", 1993, 8.0, false),
            entry("2022-02-02", 1994, 9.0, true),
        ];

        let groups = group_by_year(&entries);

        let total: usize = groups.values().map(YearGroup::len).sum();
        assert_eq!(total, entries.len());
        for group in groups.values() {
            assert!(!group.is_empty());
            assert!(group.entries().iter().all(|e| e.watch_year() == group.year()));
        }
        for e in &entries {
            let matching = groups
                .values()
                .filter(|g| g.entries().contains(e))
                .count();
            assert_eq!(matching, 1);
        }
    }

    #[test]
    fn test_group_by_year_empty() {
        assert!(group_by_year(&[]).is_empty());
        assert!(Overview::from_entries(&[]).years.is_empty());
    }

    #[test]
    fn test_median_odd_count() {
        let entries = vec![
            entry("2023-01-01", 2010, 5.0, true),
            entry("2023-01-02", 1990, 5.0, true),
            entry("2023-01-03", 2000, 5.0, true),
        ];
        let groups = group_by_year(&entries);

        let stats = YearStats::compute(&groups[&2023]);
        assert_eq!(stats.median_release_year, 2000);
    }

    #[test]
    fn test_median_even_count_takes_lower_middle_index() {
        let entries = vec![
            entry("2023-01-01", 2020, 5.0, true),
            entry("2023-01-02", 1990, 5.0, true),
            entry("2023-01-03", 2010, 5.0, true),
            entry("2023-01-04", 2000, 5.0, true),
        ];
        let groups = group_by_year(&entries);

        let stats = YearStats::compute(&groups[&2023]);
        // index 2 of [1990, 2000, 2010, 2020], not 2005
        assert_eq!(stats.median_release_year, 2010);
        assert_eq!(stats.oldest_release_year, 1990);
        assert_eq!(stats.newest_release_year, 2020);
        assert_eq!(stats.avg_release_year, 2005.0);
    }

    #[test]
    fn test_year_stats_scenario() {
        let overview = Overview::from_entries(&scenario());

        let y2023 = &overview.get(2023).unwrap().stats;
        assert_eq!(y2023.avg_rating, 9.25);
        assert_eq!(y2023.avg_release_year, 2010.0);
        assert_eq!(y2023.median_release_year, 2010);
        assert_eq!(y2023.oldest_release_year, 2010);
        assert_eq!(y2023.newest_release_year, 2010);
        assert_eq!(y2023.percent_first_time, 50.0);
        assert_eq!(y2023.total_movies, 2);

        let y2024 = &overview.get(2024).unwrap().stats;
        assert_eq!(y2024.avg_rating, 8.0);
        assert_eq!(y2024.percent_first_time, 100.0);
        assert_eq!(y2024.total_movies, 1);

        assert_eq!(overview.total_movies(), 3);
    }

    #[test]
    fn test_month_histogram_keeps_empty_months() {
        let entries = vec![
            entry("2023-03-10", 2000, 5.0, true),
            entry("2023-11-01", 2001, 5.0, true),
            entry("2023-03-20", 2002, 5.0, false),
        ];
        let groups = group_by_year(&entries);

        let histogram = MonthHistogram::for_group(&groups[&2023]);
        let months: Vec<(&str, usize)> = histogram.iter().collect();

        assert_eq!(months.len(), 12);
        assert_eq!(months[0], ("January", 0));
        assert_eq!(months[2], ("March", 2));
        assert_eq!(months[10], ("November", 1));
        assert_eq!(months.iter().filter(|(_, count)| *count == 0).count(), 10);
        assert_eq!(histogram.get("March"), Some(2));
        assert_eq!(histogram.get("Smarch"), None);
        assert_eq!(histogram.iter().map(|(_, count)| count).sum::<usize>(), 3);
    }

    #[test]
    fn test_overview_is_deterministic() {
        let first = Overview::from_entries(&scenario());
        let second = Overview::from_entries(&scenario());
        assert_eq!(first, second);
    }

    #[test]
    fn test_overview_serializes_months_in_calendar_order() {
        let overview = Overview::from_entries(&scenario());
        let json = serde_json::to_value(&overview).unwrap();

        let y2023 = &json["years"][0];
        assert_eq!(y2023["year"], 2023);
        assert_eq!(y2023["total_movies"], 2);
        assert_eq!(y2023["months"]["January"], 1);
        assert_eq!(y2023["months"]["June"], 1);
        assert_eq!(y2023["months"]["December"], 0);
    }
}
