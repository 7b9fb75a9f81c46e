//! Headless dashboard: load a catalog, render it with the default filters
//! and print the report as JSON.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use flixboard::{load_file, render, DashboardConfig};

const USAGE: &str = "usage: catalog-report <catalog.csv|json|parquet>";

/// Exit status for a bad command line, distinct from a bad file.
const USAGE_ERROR: u8 = 2;

/// The single input path, or `None` when the arguments do not fit.
fn input_path(args: impl IntoIterator<Item = OsString>) -> Option<PathBuf> {
    let mut args = args.into_iter();
    let path = args.next().map(PathBuf::from)?;
    args.next().is_none().then_some(path)
}

fn run(path: &Path) -> Result<()> {
    let catalog = load_file(path).with_context(|| format!("loading {}", path.display()))?;
    log::info!("Loaded {} titles from {}", catalog.len(), path.display());

    let config = DashboardConfig::default();
    let filters = config.default_filters(&catalog);
    let report = render(&catalog, &filters, &config);

    let json = serde_json::to_string_pretty(&report).context("serialising report")?;
    println!("{json}");
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();

    let Some(path) = input_path(std::env::args_os().skip(1)) else {
        eprintln!("{USAGE}");
        return ExitCode::from(USAGE_ERROR);
    };

    match run(&path) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e:#}");
            eprintln!("Cannot process this file: {e:#}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(values: &[&str]) -> Vec<OsString> {
        values.iter().map(OsString::from).collect()
    }

    #[test]
    fn exactly_one_path_is_accepted() {
        assert_eq!(
            input_path(args(&["titles.csv"])),
            Some(PathBuf::from("titles.csv"))
        );
    }

    #[test]
    fn missing_or_extra_arguments_are_usage_errors() {
        assert_eq!(input_path(args(&[])), None);
        assert_eq!(input_path(args(&["a.csv", "b.csv"])), None);
    }
}
