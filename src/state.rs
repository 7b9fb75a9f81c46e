use flixboard::data::filter::Filters;
use flixboard::data::model::Catalog;
use flixboard::data::report::{render, DashboardConfig, DashboardReport};

use crate::color::ColorMap;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
#[derive(Default)]
pub struct AppState {
    /// Loaded catalog (None until user loads a file).
    pub catalog: Option<Catalog>,

    /// File name of the loaded catalog, for the top bar.
    pub source_name: Option<String>,

    /// Current type / country selection.
    pub filters: Filters,

    /// Render settings.
    pub config: DashboardConfig,

    /// Report for `rendered_for` (cached).
    pub report: Option<DashboardReport>,

    /// Selection the cached report was computed for.
    rendered_for: Option<Filters>,

    /// Text typed into the country search box.
    pub country_search: String,

    /// Colours per content type.
    pub type_colors: Option<ColorMap>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    /// Replace the catalog, reset filters to their defaults and render.
    pub fn set_catalog(&mut self, catalog: Catalog, source_name: Option<String>) {
        self.filters = self.config.default_filters(&catalog);
        self.type_colors = Some(ColorMap::new(&catalog.type_values));
        self.catalog = Some(catalog);
        self.source_name = source_name;
        self.country_search.clear();
        self.status_message = None;
        self.rendered_for = None;
        self.refresh();
    }

    /// Re-render if the selection changed since the last render.
    pub fn refresh(&mut self) {
        let Some(catalog) = &self.catalog else {
            return;
        };
        if self.rendered_for.as_ref() == Some(&self.filters) {
            return;
        }
        self.report = Some(render(catalog, &self.filters, &self.config));
        self.rendered_for = Some(self.filters.clone());
    }

    /// Toggle a single content type.
    pub fn toggle_type(&mut self, value: &str) {
        Filters::toggle(&mut self.filters.types, value);
        self.refresh();
    }

    /// Toggle a single country.
    pub fn toggle_country(&mut self, value: &str) {
        Filters::toggle(&mut self.filters.countries, value);
        self.refresh();
    }

    /// Select every observed content type.
    pub fn select_all_types(&mut self) {
        if let Some(catalog) = &self.catalog {
            self.filters.types = catalog.type_values.iter().cloned().collect();
            self.refresh();
        }
    }

    /// Deselect all content types (shows nothing).
    pub fn select_no_types(&mut self) {
        self.filters.types.clear();
        self.refresh();
    }

    /// Drop the country restriction entirely.
    pub fn clear_countries(&mut self) {
        self.filters.countries.clear();
        self.refresh();
    }

    /// Back to the configured default countries.
    pub fn reset_countries(&mut self) {
        self.filters.countries = self.config.default_countries.iter().cloned().collect();
        self.refresh();
    }

    /// Countries matching the search box, case-insensitively.
    pub fn visible_country_options(&self) -> Vec<String> {
        let Some(catalog) = &self.catalog else {
            return Vec::new();
        };
        let needle = self.country_search.trim().to_lowercase();
        catalog
            .country_values
            .iter()
            .filter(|c| needle.is_empty() || c.to_lowercase().contains(&needle))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CSV: &str = "\
type,country,title,release_year,listed_in,duration
Movie,United States,A,2020,\"Dramas, Action\",100 min
Movie,India,B,2015,Dramas,60 min
TV Show,Japan,C,2021,Anime Series,1 Season
";

    fn loaded() -> AppState {
        let catalog = flixboard::data::loader::load_csv_reader(CSV.as_bytes()).unwrap();
        let mut state = AppState::default();
        state.set_catalog(catalog, Some("test.csv".to_string()));
        state
    }

    #[test]
    fn loading_applies_default_filters_and_renders() {
        let state = loaded();
        assert_eq!(state.filters.types.len(), 2);
        let report = state.report.as_ref().unwrap();
        assert_eq!(report.total_rows, 3);
        assert_eq!(report.visible_rows, 2);
    }

    #[test]
    fn clearing_countries_shows_everything() {
        let mut state = loaded();
        state.clear_countries();
        assert_eq!(state.report.as_ref().unwrap().visible_rows, 3);
        state.reset_countries();
        assert_eq!(state.report.as_ref().unwrap().visible_rows, 2);
    }

    #[test]
    fn toggling_a_type_rerenders() {
        let mut state = loaded();
        state.clear_countries();
        state.toggle_type("Movie");
        assert_eq!(state.report.as_ref().unwrap().visible_rows, 1);
        state.select_no_types();
        assert_eq!(state.report.as_ref().unwrap().visible_rows, 0);
        state.select_all_types();
        assert_eq!(state.report.as_ref().unwrap().visible_rows, 3);
    }

    #[test]
    fn country_search_is_case_insensitive() {
        let mut state = loaded();
        state.country_search = "ind".to_string();
        assert_eq!(state.visible_country_options(), vec!["India".to_string()]);
    }
}
