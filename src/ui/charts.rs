use std::ops::RangeInclusive;

use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};
use egui_plot::{Bar, BarChart, GridMark, Legend, Line, Plot, PlotPoints, Points};

use flixboard::data::frequency::FrequencyTable;
use flixboard::data::report::{DashboardReport, PopularSummary};

use crate::color::{generate_palette, ColorMap};
use crate::state::AppState;

const CHART_HEIGHT: f32 = 260.0;

// ---------------------------------------------------------------------------
// Central panel
// ---------------------------------------------------------------------------

/// Render every dashboard section for the current report.
pub fn dashboard(ui: &mut Ui, state: &AppState) {
    let Some(report) = &state.report else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a catalog to begin  (File → Open…)");
        });
        return;
    };

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.columns(2, |cols| {
                type_chart(&mut cols[0], report, state.type_colors.as_ref());
                section(&mut cols[1], "Content Added by Year", "date_added", |ui| {
                    let table = report.added_by_year.as_ref()?;
                    trend_chart(ui, "added_by_year", "Year added", table);
                    Some(())
                });
            });
            ui.separator();

            ui.columns(2, |cols| {
                section(&mut cols[0], "Rating Distribution", "rating", |ui| {
                    let table = report.rating_counts.as_ref()?;
                    column_chart(ui, "ratings", table);
                    Some(())
                });
                section(&mut cols[1], "Content Added by Month", "date_added", |ui| {
                    let table = report.added_by_month.as_ref()?;
                    keyed_bars(ui, "added_by_month", "Month", table);
                    Some(())
                });
            });
            ui.separator();

            ui.columns(2, |cols| {
                section(&mut cols[0], "Top 10 Genres", "listed_in", |ui| {
                    let table = report.top_genres.as_ref()?;
                    ranked_bars(ui, "genres", table);
                    Some(())
                });
                section(&mut cols[1], "Top Countries by Content Count", "country", |ui| {
                    let table = report.top_countries.as_ref()?;
                    ranked_bars(ui, "countries", table);
                    Some(())
                });
            });
            ui.separator();

            ui.columns(2, |cols| {
                section(&mut cols[0], "Top 10 Directors", "director", |ui| {
                    let table = report.top_directors.as_ref()?;
                    ranked_bars(ui, "directors", table);
                    Some(())
                });
                section(&mut cols[1], "Content Release Trend by Year", "release_year", |ui| {
                    let table = report.release_trend.as_ref()?;
                    trend_chart(ui, "release_trend", "Release year", table);
                    Some(())
                });
            });
            ui.separator();

            section(
                ui,
                "Simulated Popularity Prediction",
                "release_year, listed_in or duration",
                |ui| {
                    popular_section(ui, report.popular.as_ref()?);
                    Some(())
                },
            );
        });
}

/// Heading plus body; the body returns `None` when its table was skipped
/// because the source file lacks `needs`.
fn section(ui: &mut Ui, title: &str, needs: &str, body: impl FnOnce(&mut Ui) -> Option<()>) {
    ui.heading(title);
    if body(ui).is_none() {
        ui.label(RichText::new(format!("Not available: the file has no {needs} column.")).weak());
    }
}

// ---------------------------------------------------------------------------
// Individual charts
// ---------------------------------------------------------------------------

fn type_chart(ui: &mut Ui, report: &DashboardReport, colors: Option<&ColorMap>) {
    ui.heading("Content Type Distribution");
    let labels: Vec<String> = report.type_counts.iter().map(|(v, _)| v.clone()).collect();
    let bars: Vec<Bar> = report
        .type_counts
        .iter()
        .enumerate()
        .map(|(i, (value, count))| {
            let fill = colors.map_or(Color32::LIGHT_BLUE, |cm| cm.color_for(value));
            Bar::new(i as f64, count as f64).name(value).fill(fill)
        })
        .collect();

    Plot::new("type_counts")
        .height(CHART_HEIGHT)
        .allow_scroll(false)
        .allow_drag(false)
        .x_axis_formatter(category_formatter(labels))
        .y_axis_label("Titles")
        .show(ui, |plot_ui| plot_ui.bar_chart(BarChart::new(bars).width(0.6)));
}

/// Vertical bars, one per category, in table order.
fn column_chart(ui: &mut Ui, id: &str, table: &FrequencyTable<String>) {
    let palette = generate_palette(table.len());
    let labels: Vec<String> = table.iter().map(|(v, _)| v.clone()).collect();
    let bars: Vec<Bar> = table
        .iter()
        .zip(palette)
        .enumerate()
        .map(|(i, ((value, count), fill))| Bar::new(i as f64, count as f64).name(value).fill(fill))
        .collect();

    Plot::new(id)
        .height(CHART_HEIGHT)
        .allow_scroll(false)
        .allow_drag(false)
        .x_axis_formatter(category_formatter(labels))
        .y_axis_label("Titles")
        .show(ui, |plot_ui| plot_ui.bar_chart(BarChart::new(bars).width(0.6)));
}

/// Horizontal bars with the highest count on top.
fn ranked_bars(ui: &mut Ui, id: &str, table: &FrequencyTable<String>) {
    let n = table.len();
    let palette = generate_palette(n);
    let mut labels: Vec<String> = table.iter().map(|(v, _)| v.clone()).collect();
    labels.reverse();
    let bars: Vec<Bar> = table
        .iter()
        .zip(palette)
        .enumerate()
        .map(|(rank, ((value, count), fill))| {
            Bar::new((n - 1 - rank) as f64, count as f64)
                .name(value)
                .fill(fill)
        })
        .collect();

    Plot::new(id)
        .height(CHART_HEIGHT)
        .allow_scroll(false)
        .allow_drag(false)
        .y_axis_formatter(category_formatter(labels))
        .y_axis_min_width(140.0)
        .x_axis_label("Count")
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).width(0.7).horizontal())
        });
}

/// Bars at numeric positions (years, months).
fn keyed_bars<K: Copy + Into<f64>>(ui: &mut Ui, id: &str, x_label: &str, table: &FrequencyTable<K>) {
    let bars: Vec<Bar> = table
        .iter()
        .map(|(key, count)| Bar::new((*key).into(), count as f64).fill(Color32::LIGHT_BLUE))
        .collect();

    Plot::new(id)
        .height(CHART_HEIGHT)
        .allow_scroll(false)
        .x_axis_label(x_label)
        .y_axis_label("Titles")
        .show(ui, |plot_ui| plot_ui.bar_chart(BarChart::new(bars).width(0.7)));
}

/// Line with point markers over an ascending key.
fn trend_chart<K: Copy + Into<f64>>(ui: &mut Ui, id: &str, x_label: &str, table: &FrequencyTable<K>) {
    let coords: Vec<[f64; 2]> = table
        .iter()
        .map(|(key, count)| [(*key).into(), count as f64])
        .collect();

    Plot::new(id)
        .height(CHART_HEIGHT)
        .allow_scroll(false)
        .legend(Legend::default())
        .x_axis_label(x_label)
        .y_axis_label("Number of titles")
        .show(ui, |plot_ui| {
            plot_ui.line(
                Line::new(PlotPoints::from(coords.clone()))
                    .name("Titles")
                    .color(Color32::LIGHT_BLUE)
                    .width(1.5),
            );
            plot_ui.points(
                Points::new(PlotPoints::from(coords))
                    .color(Color32::LIGHT_BLUE)
                    .radius(3.0),
            );
        });
}

fn popular_section(ui: &mut Ui, popular: &PopularSummary) {
    ui.label(format!("Number of simulated popular titles: {}", popular.count));
    ui.add_space(4.0);

    TableBuilder::new(ui)
        .striped(true)
        .vscroll(false)
        .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
        .column(Column::initial(220.0).resizable(true))
        .column(Column::auto())
        .column(Column::auto())
        .column(Column::auto())
        .column(Column::remainder())
        .header(20.0, |mut header| {
            for name in ["Title", "Type", "Release year", "Duration", "Genres"] {
                header.col(|ui| {
                    ui.strong(name);
                });
            }
        })
        .body(|mut body| {
            for row in &popular.sample {
                body.row(18.0, |mut tr| {
                    tr.col(|ui| {
                        ui.label(row.title.as_deref().unwrap_or(""));
                    });
                    tr.col(|ui| {
                        ui.label(row.kind.as_deref().unwrap_or(""));
                    });
                    tr.col(|ui| {
                        ui.label(row.release_year.map(|y| y.to_string()).unwrap_or_default());
                    });
                    tr.col(|ui| {
                        ui.label(row.duration.as_deref().unwrap_or(""));
                    });
                    tr.col(|ui| {
                        ui.label(row.listed_in.as_deref().unwrap_or(""));
                    });
                });
            }
        });

    ui.add_space(8.0);
    ui.heading("Popular Titles by Release Year");
    keyed_bars(ui, "popular_by_year", "Release year", &popular.by_release_year);
}

// ---------------------------------------------------------------------------
// Axis helpers
// ---------------------------------------------------------------------------

/// Axis formatter printing `labels[i]` at integer position `i` and nothing
/// in between.
fn category_formatter(labels: Vec<String>) -> impl Fn(GridMark, &RangeInclusive<f64>) -> String {
    move |mark: GridMark, _range: &RangeInclusive<f64>| {
        let pos = mark.value.round();
        if (mark.value - pos).abs() > 1e-6 || pos < 0.0 {
            return String::new();
        }
        labels.get(pos as usize).cloned().unwrap_or_default()
    }
}
