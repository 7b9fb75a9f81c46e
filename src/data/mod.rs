/// Data layer: catalog types, loading, filtering and aggregation.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → raw rows + column set
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ normalize │  dates → year/month, release year, popularity flag
///   └───────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  type / country inclusion sets → View
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  report   │  frequency tables + popular subset → DashboardReport
///   └──────────┘
/// ```

pub mod error;
pub mod filter;
pub mod frequency;
pub mod loader;
pub mod model;
pub mod normalize;
pub mod popularity;
pub mod report;
