use thiserror::Error;

/// Shape problems that make a catalog file unusable as a whole.
///
/// Per-row problems (bad dates, odd durations) never surface here; they are
/// absorbed during normalisation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Unsupported file extension: .{0}")]
    UnsupportedExtension(String),

    #[error("Missing required column(s): {}", .0.join(", "))]
    MissingColumns(Vec<&'static str>),

    #[error("Expected a top-level JSON array of records")]
    NotRecordArray,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_columns_lists_every_name() {
        let err = CatalogError::MissingColumns(vec!["type", "country"]);
        assert_eq!(err.to_string(), "Missing required column(s): type, country");
    }
}
