use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use chrono::NaiveDate;

use super::error::CatalogError;
use super::normalize::title_from_raw;
use super::popularity::PopularityRule;

// ---------------------------------------------------------------------------
// Column – the catalog columns the dashboard knows about
// ---------------------------------------------------------------------------

/// A catalog column. Source files may carry more (`show_id`, `cast`, ...);
/// those are ignored by the loaders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Column {
    Title,
    Type,
    Country,
    DateAdded,
    Rating,
    ListedIn,
    Director,
    ReleaseYear,
    Duration,
}

impl Column {
    pub const ALL: [Column; 9] = [
        Column::Title,
        Column::Type,
        Column::Country,
        Column::DateAdded,
        Column::Rating,
        Column::ListedIn,
        Column::Director,
        Column::ReleaseYear,
        Column::Duration,
    ];

    /// Columns both inclusion filters depend on. A file without them cannot
    /// be processed at all.
    pub const REQUIRED: [Column; 2] = [Column::Type, Column::Country];

    /// Header name as it appears in the source file.
    pub fn name(self) -> &'static str {
        match self {
            Column::Title => "title",
            Column::Type => "type",
            Column::Country => "country",
            Column::DateAdded => "date_added",
            Column::Rating => "rating",
            Column::ListedIn => "listed_in",
            Column::Director => "director",
            Column::ReleaseYear => "release_year",
            Column::Duration => "duration",
        }
    }

    /// Resolve a header cell. Surrounding whitespace is ignored, case is not.
    pub fn from_header(header: &str) -> Option<Column> {
        let header = header.trim();
        Column::ALL.into_iter().find(|c| c.name() == header)
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One source row before normalisation: column → non-empty cell text.
/// Empty cells are simply not present.
pub type RawRow = BTreeMap<Column, String>;

// ---------------------------------------------------------------------------
// Title – one row of the catalog
// ---------------------------------------------------------------------------

/// A single catalog entry with its derived fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Title {
    pub title: Option<String>,
    /// Content type ("Movie", "TV Show", ...).
    pub kind: Option<String>,
    /// Country, possibly a comma-joined list kept as one value.
    pub country: Option<String>,
    pub date_added: Option<NaiveDate>,
    pub rating: Option<String>,
    /// Comma-separated genres.
    pub listed_in: Option<String>,
    pub director: Option<String>,
    pub release_year: Option<i32>,
    /// Free text such as "90 min" or "2 Seasons".
    pub duration: Option<String>,

    /// Calendar year of `date_added`.
    pub year_added: Option<i32>,
    /// Month (1–12) of `date_added`.
    pub month_added: Option<u32>,
    /// Result of the popularity heuristic for this row.
    pub is_popular: bool,
}

// ---------------------------------------------------------------------------
// Catalog – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full normalised catalog plus the option lists the filter widgets need.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    /// All rows, in file order.
    pub titles: Vec<Title>,
    /// Columns present in the source file.
    pub columns: BTreeSet<Column>,
    /// Distinct non-missing `type` values, first-seen order.
    pub type_values: Vec<String>,
    /// Distinct non-missing `country` values, sorted.
    pub country_values: BTreeSet<String>,
}

impl Catalog {
    /// Validate the column set and normalise every raw row.
    ///
    /// Rows are kept one-to-one and in order; only a missing required column
    /// is fatal.
    pub fn from_rows(
        columns: BTreeSet<Column>,
        rows: &[RawRow],
        rule: &PopularityRule,
    ) -> Result<Self, CatalogError> {
        let missing: Vec<&'static str> = Column::REQUIRED
            .iter()
            .filter(|c| !columns.contains(*c))
            .map(|c| c.name())
            .collect();
        if !missing.is_empty() {
            return Err(CatalogError::MissingColumns(missing));
        }

        let titles: Vec<Title> = rows.iter().map(|raw| title_from_raw(raw, rule)).collect();

        let mut type_values: Vec<String> = Vec::new();
        let mut country_values = BTreeSet::new();
        for t in &titles {
            if let Some(kind) = &t.kind {
                if !type_values.contains(kind) {
                    type_values.push(kind.clone());
                }
            }
            if let Some(country) = &t.country {
                country_values.insert(country.clone());
            }
        }

        if columns.contains(&Column::DateAdded) {
            let unparsed = rows
                .iter()
                .zip(&titles)
                .filter(|(raw, t)| raw.contains_key(&Column::DateAdded) && t.date_added.is_none())
                .count();
            if unparsed > 0 {
                log::debug!("{unparsed} row(s) have an unparseable date_added");
            }
        }

        Ok(Catalog {
            titles,
            columns,
            type_values,
            country_values,
        })
    }

    /// Whether the source file carried `column`.
    pub fn has(&self, column: Column) -> bool {
        self.columns.contains(&column)
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.titles.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(cells: &[(Column, &str)]) -> RawRow {
        cells.iter().map(|(c, v)| (*c, v.to_string())).collect()
    }

    #[test]
    fn header_lookup_trims_but_is_case_sensitive() {
        assert_eq!(Column::from_header(" listed_in "), Some(Column::ListedIn));
        assert_eq!(Column::from_header("Type"), None);
        assert_eq!(Column::from_header("cast"), None);
    }

    #[test]
    fn missing_type_and_country_is_fatal() {
        let columns: BTreeSet<Column> = [Column::Title].into_iter().collect();
        let err = Catalog::from_rows(columns, &[], &PopularityRule::default()).unwrap_err();
        assert_eq!(err, CatalogError::MissingColumns(vec!["type", "country"]));
    }

    #[test]
    fn option_lists_skip_missing_values() {
        let columns: BTreeSet<Column> = Column::ALL.into_iter().collect();
        let rows = vec![
            raw(&[(Column::Type, "TV Show"), (Column::Country, "India")]),
            raw(&[(Column::Country, "Brazil")]),
            raw(&[(Column::Type, "Movie")]),
            raw(&[(Column::Type, "TV Show"), (Column::Country, "Brazil")]),
        ];
        let catalog = Catalog::from_rows(columns, &rows, &PopularityRule::default()).unwrap();

        assert_eq!(catalog.len(), 4);
        assert_eq!(catalog.type_values, vec!["TV Show", "Movie"]);
        assert_eq!(
            catalog.country_values.iter().collect::<Vec<_>>(),
            vec!["Brazil", "India"]
        );
    }
}
