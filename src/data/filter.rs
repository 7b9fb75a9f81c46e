use std::collections::BTreeSet;

use super::model::{Catalog, Title};

/// Country selection used when a catalog is first loaded.
pub const DEFAULT_COUNTRIES: [&str; 2] = ["United States", "India"];

// ---------------------------------------------------------------------------
// Inclusion sets
// ---------------------------------------------------------------------------

/// The two inclusion sets driving the dashboard.
///
/// * `types`: a row passes only if its type is in the set. Empty selects
///   nothing.
/// * `countries`: a row passes only if its country cell is in the set.
///   Empty means "no country restriction".
///
/// Rows with a missing value never match a non-empty set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Filters {
    pub types: BTreeSet<String>,
    pub countries: BTreeSet<String>,
}

impl Filters {
    /// All observed types, plus the given default country pair.
    pub fn defaults(catalog: &Catalog, default_countries: &[String]) -> Self {
        Filters {
            types: catalog.type_values.iter().cloned().collect(),
            countries: default_countries.iter().cloned().collect(),
        }
    }

    /// Whether `title` passes both inclusion sets.
    pub fn matches(&self, title: &Title) -> bool {
        let type_ok = title
            .kind
            .as_ref()
            .is_some_and(|k| self.types.contains(k));
        if !type_ok {
            return false;
        }
        if self.countries.is_empty() {
            return true;
        }
        title
            .country
            .as_ref()
            .is_some_and(|c| self.countries.contains(c))
    }

    /// Flip membership of `value` in `set`.
    pub fn toggle(set: &mut BTreeSet<String>, value: &str) {
        if !set.remove(value) {
            set.insert(value.to_string());
        }
    }
}

// ---------------------------------------------------------------------------
// Filtered view
// ---------------------------------------------------------------------------

/// A filtered, borrowed view over a catalog, in original row order.
#[derive(Debug, Clone)]
pub struct View<'a> {
    pub rows: Vec<&'a Title>,
}

impl<'a> View<'a> {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a Title> + '_ {
        self.rows.iter().copied()
    }

    /// Narrow this view further; the source rows are untouched.
    pub fn refine(&self, keep: impl Fn(&Title) -> bool) -> View<'a> {
        View {
            rows: self.rows.iter().copied().filter(|t| keep(t)).collect(),
        }
    }
}

/// Rows of `catalog` passing `filters`.
pub fn apply<'a>(catalog: &'a Catalog, filters: &Filters) -> View<'a> {
    View {
        rows: catalog.titles.iter().filter(|t| filters.matches(t)).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(kind: Option<&str>, country: Option<&str>) -> Title {
        Title {
            kind: kind.map(str::to_string),
            country: country.map(str::to_string),
            ..Title::default()
        }
    }

    fn catalog(rows: Vec<Title>) -> Catalog {
        let mut type_values: Vec<String> = Vec::new();
        for t in &rows {
            if let Some(k) = &t.kind {
                if !type_values.contains(k) {
                    type_values.push(k.clone());
                }
            }
        }
        Catalog {
            titles: rows,
            type_values,
            ..Catalog::default()
        }
    }

    fn set(values: &[&str]) -> BTreeSet<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn defaults_select_all_types_and_the_country_pair() {
        let cat = catalog(vec![row(Some("Movie"), None), row(Some("TV Show"), None)]);
        let defaults: Vec<String> = DEFAULT_COUNTRIES.iter().map(|s| s.to_string()).collect();
        let f = Filters::defaults(&cat, &defaults);
        assert_eq!(f.types, set(&["Movie", "TV Show"]));
        assert_eq!(f.countries, set(&["United States", "India"]));
    }

    #[test]
    fn empty_country_set_means_no_restriction() {
        let cat = catalog(vec![
            row(Some("Movie"), Some("France")),
            row(Some("Movie"), None),
            row(Some("TV Show"), Some("India")),
        ]);
        let f = Filters {
            types: set(&["Movie", "TV Show"]),
            countries: BTreeSet::new(),
        };
        assert_eq!(apply(&cat, &f).len(), 3);
    }

    #[test]
    fn empty_type_set_selects_nothing() {
        let cat = catalog(vec![row(Some("Movie"), Some("India"))]);
        let f = Filters {
            types: BTreeSet::new(),
            countries: BTreeSet::new(),
        };
        assert!(apply(&cat, &f).is_empty());
    }

    #[test]
    fn missing_values_never_match() {
        let cat = catalog(vec![
            row(None, Some("India")),
            row(Some("Movie"), None),
            row(Some("Movie"), Some("India")),
        ]);
        let f = Filters {
            types: set(&["Movie"]),
            countries: set(&["India"]),
        };
        let view = apply(&cat, &f);
        assert_eq!(view.len(), 1);
        assert_eq!(view.rows[0].country.as_deref(), Some("India"));
    }

    #[test]
    fn country_match_is_on_the_whole_cell() {
        let cat = catalog(vec![row(Some("Movie"), Some("United States, India"))]);
        let f = Filters {
            types: set(&["Movie"]),
            countries: set(&["India"]),
        };
        assert!(apply(&cat, &f).is_empty());
    }

    #[test]
    fn filtering_twice_is_the_same_as_once() {
        let cat = catalog(vec![
            row(Some("Movie"), Some("India")),
            row(Some("TV Show"), Some("India")),
            row(Some("Movie"), Some("Japan")),
        ]);
        let f = Filters {
            types: set(&["Movie"]),
            countries: set(&["India", "Japan"]),
        };
        let once = apply(&cat, &f);
        let twice = once.refine(|t| f.matches(t));
        assert_eq!(once.rows, twice.rows);
        assert_eq!(once.len(), 2);
    }

    #[test]
    fn toggle_adds_then_removes() {
        let mut s = set(&["Movie"]);
        Filters::toggle(&mut s, "TV Show");
        assert_eq!(s, set(&["Movie", "TV Show"]));
        Filters::toggle(&mut s, "Movie");
        assert_eq!(s, set(&["TV Show"]));
    }
}
