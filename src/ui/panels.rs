use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    let Some(catalog) = &state.catalog else {
        ui.label("No catalog loaded.");
        return;
    };

    // Clone what we need so we can mutate state inside the loops.
    let type_options = catalog.type_values.clone();
    let n_countries = catalog.country_values.len();

    // ---- Type multiselect ----
    let header = format!("Type  ({}/{})", state.filters.types.len(), type_options.len());
    egui::CollapsingHeader::new(RichText::new(header).strong())
        .id_salt("type_filter")
        .default_open(true)
        .show(ui, |ui: &mut Ui| {
            ui.horizontal(|ui: &mut Ui| {
                if ui.small_button("All").clicked() {
                    state.select_all_types();
                }
                if ui.small_button("None").clicked() {
                    state.select_no_types();
                }
            });

            for value in &type_options {
                let mut checked = state.filters.types.contains(value);
                let mut text = RichText::new(value);
                if let Some(cm) = &state.type_colors {
                    text = text.color(cm.color_for(value));
                }
                if ui.checkbox(&mut checked, text).changed() {
                    state.toggle_type(value);
                }
            }
        });

    ui.separator();

    // ---- Country multiselect ----
    let header = if state.filters.countries.is_empty() {
        format!("Country  (any of {n_countries})")
    } else {
        format!("Country  ({}/{n_countries})", state.filters.countries.len())
    };
    egui::CollapsingHeader::new(RichText::new(header).strong())
        .id_salt("country_filter")
        .default_open(true)
        .show(ui, |ui: &mut Ui| {
            ui.horizontal(|ui: &mut Ui| {
                if ui.small_button("Any").clicked() {
                    state.clear_countries();
                }
                if ui.small_button("Defaults").clicked() {
                    state.reset_countries();
                }
            });

            // Selected countries first so they stay visible while searching.
            let selected: Vec<String> = state.filters.countries.iter().cloned().collect();
            for value in &selected {
                let mut checked = true;
                if ui.checkbox(&mut checked, RichText::new(value).strong()).changed() {
                    state.toggle_country(value);
                }
            }
            if !selected.is_empty() {
                ui.separator();
            }

            ui.add(
                egui::TextEdit::singleline(&mut state.country_search)
                    .hint_text("Search countries…"),
            );

            let options: Vec<String> = state
                .visible_country_options()
                .into_iter()
                .filter(|v| !state.filters.countries.contains(v))
                .collect();
            ScrollArea::vertical()
                .id_salt("country_options")
                .max_height(360.0)
                .auto_shrink([false, true])
                .show(ui, |ui: &mut Ui| {
                    for value in &options {
                        let mut checked = false;
                        if ui.checkbox(&mut checked, value.as_str()).changed() {
                            state.toggle_country(value);
                        }
                    }
                });
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let (Some(name), Some(report)) = (&state.source_name, &state.report) {
            ui.label(format!(
                "{name}: {} titles loaded, {} visible",
                report.total_rows, report.visible_rows
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open catalog")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    let Some(path) = file else {
        return;
    };

    match flixboard::data::loader::load_file(&path) {
        Ok(catalog) => {
            log::info!(
                "Loaded {} titles from {} with columns {:?}",
                catalog.len(),
                path.display(),
                catalog.columns
            );
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned());
            state.set_catalog(catalog, name);
        }
        Err(e) => {
            log::error!("Cannot process {}: {e:#}", path.display());
            state.status_message = Some(format!("Cannot process this file: {e:#}"));
        }
    }
}
