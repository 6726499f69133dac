//! Error types for statement retrieval and diagram rendering.
//!
//! This module defines [`SankeyError`] which covers all error cases that can occur
//! when fetching concepts, assembling the statement table, building the flow data,
//! or exporting a figure.

use thiserror::Error;

/// Errors that can occur while building a statement Sankey diagram.
#[derive(Error, Debug)]
pub enum SankeyError {
    /// Network-related errors (connection failures, timeouts, HTTP status errors).
    #[error("Network error: {0}")]
    Network(String),

    /// Rate limit exceeded by the filings API.
    #[error("Rate limited by {provider}: retry after {retry_after:?}")]
    RateLimited {
        /// The provider that rate limited the request.
        provider: String,
        /// Suggested time to wait before retrying.
        retry_after: Option<std::time::Duration>,
    },

    /// The company has never reported the requested concept.
    #[error("Concept {taxonomy}/{tag} not found for CIK {cik}")]
    ConceptNotFound {
        /// Company CIK.
        cik: String,
        /// Taxonomy name.
        taxonomy: String,
        /// Concept tag.
        tag: String,
    },

    /// The concept response has no observations in the expected unit.
    #[error("Concept {tag} has no observations in unit {unit}")]
    MissingUnit {
        /// Concept tag.
        tag: String,
        /// The unit that was expected (e.g. "USD").
        unit: String,
    },

    /// Error parsing data returned by the provider.
    #[error("Parse error: {0}")]
    Parse(String),

    /// No statement row exists for the requested reporting frame.
    #[error("No statement data for period {0}")]
    PeriodNotFound(String),

    /// Some periods were reported for only a subset of the concepts.
    #[error("Periods missing at least one concept: {}", .0.join(", "))]
    IncompletePeriods(Vec<String>),

    /// Revenue is zero, so margins cannot be computed.
    #[error("Revenue is zero for period {0}; margins are undefined")]
    ZeroRevenue(String),

    /// An invalid parameter was provided.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// The requested configuration is recognised but not implemented.
    #[error("Not implemented: {0}")]
    NotImplemented(String),

    /// The requested feature is not supported by this build.
    #[error("Feature not supported: {0}")]
    NotSupported(String),

    /// A figure could not be rendered to a file.
    #[error("Export failed: {0}")]
    Export(String),

    /// Filesystem error during export.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Any other error.
    #[error("{0}")]
    Other(String),
}

/// Result type alias using [`SankeyError`].
pub type Result<T> = std::result::Result<T, SankeyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_incomplete_periods_message() {
        let err = SankeyError::IncompletePeriods(vec!["CY2019".into(), "CY2020".into()]);
        assert_eq!(
            err.to_string(),
            "Periods missing at least one concept: CY2019, CY2020"
        );
    }

    #[test]
    fn test_export_message() {
        let err = SankeyError::Export("AAPL2022.png: no webdriver".into());
        assert_eq!(err.to_string(), "Export failed: AAPL2022.png: no webdriver");
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: SankeyError = io.into();
        assert!(matches!(err, SankeyError::Io(_)));
    }
}
