use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};

use super::model::{Column, RawRow, Title};
use super::popularity::PopularityRule;

// ---------------------------------------------------------------------------
// Date coercion
// ---------------------------------------------------------------------------

/// Date-only layouts tried in order. The first one is what catalog exports
/// actually use ("September 25, 2021").
const DATE_FORMATS: [&str; 6] = [
    "%B %d, %Y",
    "%b %d, %Y",
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%d-%b-%y",
];

/// Datetime layouts; `%.f` also accepts a missing fraction.
const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

/// Interpret a `date_added` cell as a calendar date.
///
/// Returns `None` for anything that is not a recognisable date; a bad cell
/// never fails the row.
pub fn parse_date_added(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(text, fmt) {
            return Some(d);
        }
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, fmt) {
            return Some(dt.date());
        }
    }
    DateTime::parse_from_rfc3339(text).ok().map(|dt| dt.date_naive())
}

/// Parse a release year. Accepts "2019" and the float form "2019.0" that
/// tabular exports produce for integer columns with gaps.
pub fn parse_release_year(text: &str) -> Option<i32> {
    let text = text.trim();
    if let Ok(y) = text.parse::<i32>() {
        return Some(y);
    }
    let f = text.parse::<f64>().ok()?;
    if f.is_finite() && f.fract() == 0.0 && f >= i32::MIN as f64 && f <= i32::MAX as f64 {
        Some(f as i32)
    } else {
        None
    }
}

// ---------------------------------------------------------------------------
// Row normalisation
// ---------------------------------------------------------------------------

/// Build a [`Title`] from a raw row, deriving `year_added`, `month_added`
/// and `is_popular`. Depends on nothing but the row itself.
pub fn title_from_raw(raw: &RawRow, rule: &PopularityRule) -> Title {
    let text = |c: Column| raw.get(&c).cloned();

    let date_added = raw.get(&Column::DateAdded).and_then(|s| parse_date_added(s));

    let mut title = Title {
        title: text(Column::Title),
        kind: text(Column::Type),
        country: text(Column::Country),
        date_added,
        rating: text(Column::Rating),
        listed_in: text(Column::ListedIn),
        director: text(Column::Director),
        release_year: raw.get(&Column::ReleaseYear).and_then(|s| parse_release_year(s)),
        duration: text(Column::Duration),
        year_added: date_added.map(|d| d.year()),
        month_added: date_added.map(|d| d.month()),
        is_popular: false,
    };
    title.is_popular = rule.is_popular(&title);
    title
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_catalog_export_dates() {
        let d = parse_date_added("September 25, 2021").unwrap();
        assert_eq!((d.year(), d.month(), d.day()), (2021, 9, 25));

        // Exports sometimes carry a leading space.
        let d = parse_date_added(" April 1, 2019").unwrap();
        assert_eq!((d.year(), d.month()), (2019, 4));
    }

    #[test]
    fn parses_iso_and_timestamp_forms() {
        assert_eq!(
            parse_date_added("2020-01-15"),
            NaiveDate::from_ymd_opt(2020, 1, 15)
        );
        assert_eq!(
            parse_date_added("2020-01-15 08:30:00"),
            NaiveDate::from_ymd_opt(2020, 1, 15)
        );
        assert_eq!(
            parse_date_added("2020-01-15 08:30:00.250000"),
            NaiveDate::from_ymd_opt(2020, 1, 15)
        );
        assert_eq!(
            parse_date_added("2020-01-15T08:30:00+02:00"),
            NaiveDate::from_ymd_opt(2020, 1, 15)
        );
    }

    #[test]
    fn garbage_dates_are_absent() {
        assert_eq!(parse_date_added("invalid"), None);
        assert_eq!(parse_date_added(""), None);
        assert_eq!(parse_date_added("February 30, 2021"), None);
    }

    #[test]
    fn release_year_accepts_float_form() {
        assert_eq!(parse_release_year("2019"), Some(2019));
        assert_eq!(parse_release_year("2019.0"), Some(2019));
        assert_eq!(parse_release_year("2019.5"), None);
        assert_eq!(parse_release_year("soon"), None);
    }

    #[test]
    fn invalid_date_keeps_the_row_without_derived_fields() {
        let raw: RawRow = [
            (Column::Title, "Broken"),
            (Column::Type, "Movie"),
            (Column::DateAdded, "invalid"),
        ]
        .into_iter()
        .map(|(c, v)| (c, v.to_string()))
        .collect();

        let t = title_from_raw(&raw, &PopularityRule::default());
        assert_eq!(t.title.as_deref(), Some("Broken"));
        assert_eq!(t.kind.as_deref(), Some("Movie"));
        assert_eq!(t.date_added, None);
        assert_eq!(t.year_added, None);
        assert_eq!(t.month_added, None);
    }

    #[test]
    fn derives_year_month_and_popularity() {
        let raw: RawRow = [
            (Column::DateAdded, "March 3, 2021"),
            (Column::ReleaseYear, "2020"),
            (Column::ListedIn, "Dramas, International Movies"),
            (Column::Duration, "121 min"),
        ]
        .into_iter()
        .map(|(c, v)| (c, v.to_string()))
        .collect();

        let t = title_from_raw(&raw, &PopularityRule::default());
        assert_eq!(t.year_added, Some(2021));
        assert_eq!(t.month_added, Some(3));
        assert!(t.is_popular);
    }
}
