//! Streaming catalog dashboard: data layer shared by the desktop app and
//! the headless report binary.

pub mod data;

pub use data::filter::Filters;
pub use data::loader::load_file;
pub use data::model::{Catalog, Column, Title};
pub use data::report::{render, DashboardConfig, DashboardReport};
