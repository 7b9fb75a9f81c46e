use serde::Serialize;

use super::filter::{apply, Filters, View, DEFAULT_COUNTRIES};
use super::frequency::{count_by_key, count_exploded, count_values, FrequencyTable};
use super::model::{Catalog, Column, Title};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Knobs for one dashboard render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardConfig {
    /// Length of every "top N" table.
    pub top_n: usize,
    /// Number of popular titles listed in the sample table.
    pub popular_sample: usize,
    /// Countries preselected when a catalog is loaded.
    pub default_countries: Vec<String>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            top_n: 10,
            popular_sample: 10,
            default_countries: DEFAULT_COUNTRIES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl DashboardConfig {
    /// Initial filter selection for a freshly loaded catalog.
    pub fn default_filters(&self, catalog: &Catalog) -> Filters {
        Filters::defaults(catalog, &self.default_countries)
    }
}

// ---------------------------------------------------------------------------
// Report
// ---------------------------------------------------------------------------

/// Projection of a popular title shown in the sample table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PopularRow {
    pub title: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub release_year: Option<i32>,
    pub duration: Option<String>,
    pub listed_in: Option<String>,
}

impl From<&Title> for PopularRow {
    fn from(t: &Title) -> Self {
        PopularRow {
            title: t.title.clone(),
            kind: t.kind.clone(),
            release_year: t.release_year,
            duration: t.duration.clone(),
            listed_in: t.listed_in.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PopularSummary {
    /// Number of flagged rows in the filtered view.
    pub count: usize,
    /// First flagged rows, original order.
    pub sample: Vec<PopularRow>,
    /// Flagged rows per release year, ascending by year.
    pub by_release_year: FrequencyTable<i32>,
}

/// Everything the dashboard draws for one filter selection. Sections whose
/// source column is absent from the file are `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardReport {
    pub total_rows: usize,
    pub visible_rows: usize,
    pub type_counts: FrequencyTable<String>,
    pub added_by_year: Option<FrequencyTable<i32>>,
    pub added_by_month: Option<FrequencyTable<u32>>,
    pub rating_counts: Option<FrequencyTable<String>>,
    pub top_genres: Option<FrequencyTable<String>>,
    pub top_countries: Option<FrequencyTable<String>>,
    pub top_directors: Option<FrequencyTable<String>>,
    pub release_trend: Option<FrequencyTable<i32>>,
    pub popular: Option<PopularSummary>,
}

/// Run the whole pipeline for one filter selection.
///
/// Pure: the catalog is only read, and the same inputs always give the same
/// report.
pub fn render(catalog: &Catalog, filters: &Filters, config: &DashboardConfig) -> DashboardReport {
    let view = apply(catalog, filters);
    let n = config.top_n;

    let type_counts = count_values(view.iter().filter_map(|t| t.kind.clone()));

    let added_by_year = catalog
        .has(Column::DateAdded)
        .then(|| count_by_key(view.iter().filter_map(|t| t.year_added)));
    let added_by_month = catalog
        .has(Column::DateAdded)
        .then(|| count_by_key(view.iter().filter_map(|t| t.month_added)));

    let rating_counts = top_values(catalog, &view, Column::Rating, n, |t| t.rating.as_deref());
    let top_countries = top_values(catalog, &view, Column::Country, n, |t| t.country.as_deref());
    let top_directors = top_values(catalog, &view, Column::Director, n, |t| t.director.as_deref());

    let top_genres = catalog
        .has(Column::ListedIn)
        .then(|| count_exploded(view.iter().filter_map(|t| t.listed_in.as_deref())).top(n));

    let release_trend = catalog
        .has(Column::ReleaseYear)
        .then(|| count_by_key(view.iter().filter_map(|t| t.release_year)));

    let popularity_inputs = [Column::ReleaseYear, Column::ListedIn, Column::Duration];
    let popular = popularity_inputs.iter().all(|c| catalog.has(*c)).then(|| {
        let flagged = view.refine(|t| t.is_popular);
        PopularSummary {
            count: flagged.len(),
            sample: flagged
                .iter()
                .take(config.popular_sample)
                .map(PopularRow::from)
                .collect(),
            by_release_year: count_by_key(flagged.iter().filter_map(|t| t.release_year)),
        }
    });

    for c in Column::ALL {
        if !catalog.has(c) {
            log::debug!("column '{c}' not in source; dependent sections skipped");
        }
    }
    log::debug!(
        "rendered {} of {} rows ({} types selected, {} countries selected)",
        view.len(),
        catalog.len(),
        filters.types.len(),
        filters.countries.len()
    );

    DashboardReport {
        total_rows: catalog.len(),
        visible_rows: view.len(),
        type_counts,
        added_by_year,
        added_by_month,
        rating_counts,
        top_genres,
        top_countries,
        top_directors,
        release_trend,
        popular,
    }
}

/// Top-`n` counts of a single-valued text column, or `None` if the source
/// file lacks the column.
fn top_values(
    catalog: &Catalog,
    view: &View<'_>,
    column: Column,
    n: usize,
    pick: fn(&Title) -> Option<&str>,
) -> Option<FrequencyTable<String>> {
    catalog
        .has(column)
        .then(|| count_values(view.iter().filter_map(pick).map(str::to_string)).top(n))
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::data::model::RawRow;
    use crate::data::popularity::PopularityRule;

    fn raw(cells: &[(Column, &str)]) -> RawRow {
        cells.iter().map(|(c, v)| (*c, v.to_string())).collect()
    }

    fn full_catalog(rows: &[RawRow]) -> Catalog {
        Catalog::from_rows(
            Column::ALL.into_iter().collect(),
            rows,
            &PopularityRule::default(),
        )
        .unwrap()
    }

    fn scenario_rows() -> Vec<RawRow> {
        vec![
            raw(&[
                (Column::Title, "First"),
                (Column::Type, "Movie"),
                (Column::Country, "United States"),
                (Column::ReleaseYear, "2020"),
                (Column::ListedIn, "Drama, Action"),
                (Column::Duration, "100 min"),
                (Column::DateAdded, "January 5, 2021"),
            ]),
            raw(&[
                (Column::Title, "Second"),
                (Column::Type, "Movie"),
                (Column::Country, "India"),
                (Column::ReleaseYear, "2015"),
                (Column::ListedIn, "Drama"),
                (Column::Duration, "60 min"),
                (Column::DateAdded, "invalid"),
            ]),
        ]
    }

    #[test]
    fn default_filters_keep_both_scenario_rows_and_flag_only_the_first() {
        let catalog = full_catalog(&scenario_rows());
        let config = DashboardConfig::default();
        let report = render(&catalog, &config.default_filters(&catalog), &config);

        assert_eq!(report.visible_rows, 2);
        let popular = report.popular.unwrap();
        assert_eq!(popular.count, 1);
        assert_eq!(popular.sample[0].title.as_deref(), Some("First"));
        assert_eq!(popular.by_release_year.entries.len(), 1);
        assert_eq!(popular.by_release_year.entries[0].value, 2020);
    }

    #[test]
    fn invalid_date_row_still_counts_in_type_and_country_tables() {
        let catalog = full_catalog(&scenario_rows());
        let config = DashboardConfig::default();
        let report = render(&catalog, &config.default_filters(&catalog), &config);

        assert_eq!(report.type_counts.total(), 2);
        assert_eq!(report.top_countries.unwrap().total(), 2);
        // Only the parseable date contributes a year.
        assert_eq!(report.added_by_year.unwrap().total(), 1);
    }

    #[test]
    fn genres_are_exploded_before_ranking() {
        let catalog = full_catalog(&scenario_rows());
        let config = DashboardConfig::default();
        let report = render(&catalog, &config.default_filters(&catalog), &config);

        let genres = report.top_genres.unwrap();
        let got: Vec<(&str, usize)> = genres.iter().map(|(g, c)| (g.as_str(), c)).collect();
        assert_eq!(got, vec![("Drama", 2), ("Action", 1)]);
    }

    #[test]
    fn popular_sample_is_capped_and_ordered() {
        let rows: Vec<RawRow> = (0..15)
            .map(|i| {
                let title = format!("T{i}");
                let year = (2018 + i % 3).to_string();
                raw(&[
                    (Column::Title, title.as_str()),
                    (Column::Type, "Movie"),
                    (Column::Country, "India"),
                    (Column::ReleaseYear, year.as_str()),
                    (Column::ListedIn, "Dramas"),
                    (Column::Duration, "120 min"),
                ])
            })
            .collect();
        let catalog = full_catalog(&rows);
        let config = DashboardConfig::default();
        let report = render(&catalog, &config.default_filters(&catalog), &config);

        let popular = report.popular.unwrap();
        assert_eq!(popular.count, 15);
        assert_eq!(popular.sample.len(), 10);
        let titles: Vec<_> = popular.sample.iter().filter_map(|r| r.title.as_deref()).collect();
        assert_eq!(titles[..3], ["T0", "T1", "T2"]);
        let years: Vec<i32> = popular.by_release_year.iter().map(|(y, _)| *y).collect();
        assert_eq!(years, vec![2018, 2019, 2020]);
    }

    #[test]
    fn missing_optional_columns_skip_their_sections() {
        let columns: BTreeSet<Column> = [Column::Type, Column::Country, Column::Title]
            .into_iter()
            .collect();
        let rows = vec![raw(&[(Column::Type, "Movie"), (Column::Country, "India")])];
        let catalog =
            Catalog::from_rows(columns, &rows, &PopularityRule::default()).unwrap();
        let config = DashboardConfig::default();
        let report = render(&catalog, &config.default_filters(&catalog), &config);

        assert_eq!(report.visible_rows, 1);
        assert!(report.top_countries.is_some());
        assert!(report.added_by_year.is_none());
        assert!(report.top_directors.is_none());
        assert!(report.rating_counts.is_none());
        assert!(report.top_genres.is_none());
        assert!(report.popular.is_none());
    }

    #[test]
    fn render_does_not_touch_the_catalog() {
        let catalog = full_catalog(&scenario_rows());
        let before = catalog.titles.clone();
        let config = DashboardConfig::default();
        let filters = Filters {
            types: ["Movie".to_string()].into_iter().collect(),
            countries: ["India".to_string()].into_iter().collect(),
        };
        let first = render(&catalog, &filters, &config);
        let second = render(&catalog, &filters, &config);
        assert_eq!(first, second);
        assert_eq!(first.visible_rows, 1);
        assert_eq!(catalog.titles, before);
    }
}
