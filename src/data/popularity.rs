use super::model::Title;

// ---------------------------------------------------------------------------
// Simulated popularity heuristic
// ---------------------------------------------------------------------------

/// Three-threshold rule flagging a title as "likely popular".
///
/// This is a placeholder heuristic, not a model. The genre check is a plain
/// case-sensitive substring test on the raw `listed_in` text, so
/// "International TV Dramas" and "K-Dramas" both count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopularityRule {
    pub min_release_year: i32,
    pub genre_marker: String,
    pub min_duration: i64,
}

impl Default for PopularityRule {
    fn default() -> Self {
        Self {
            min_release_year: 2018,
            genre_marker: "Drama".to_string(),
            min_duration: 90,
        }
    }
}

impl PopularityRule {
    /// True iff release year, genre marker and duration all clear their
    /// thresholds. Missing inputs fail their condition.
    pub fn is_popular(&self, title: &Title) -> bool {
        let recent = title
            .release_year
            .is_some_and(|y| y >= self.min_release_year);
        let genre = title
            .listed_in
            .as_deref()
            .is_some_and(|g| g.contains(self.genre_marker.as_str()));
        let long_enough = effective_duration(title.duration.as_deref()) >= self.min_duration;

        recent && genre && long_enough
    }
}

/// Leading integer of a duration such as "90 min" or "2 Seasons".
/// The unit is ignored; `None` when the first whitespace token is not an
/// integer or the field is missing.
pub fn parse_duration(duration: Option<&str>) -> Option<i64> {
    duration?.split_whitespace().next()?.parse::<i64>().ok()
}

/// Duration used by the heuristic: anything unparseable counts as 0.
pub fn effective_duration(duration: Option<&str>) -> i64 {
    match parse_duration(duration) {
        Some(d) => d,
        None => 0,
    }
}
