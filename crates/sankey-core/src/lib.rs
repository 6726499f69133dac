#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/sankey/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Core types for financial statement Sankey diagrams.
//!
//! This crate provides the foundational abstractions shared by the fetcher,
//! the assembler and the chart builder:
//!
//! - [`ConceptProvider`](provider::ConceptProvider) - Source of company concepts
//! - [`Line`](types::Line) - The nine statement lines and their concept tags
//! - [`StatementRow`](types::StatementRow) - One period's values
//! - [`PeriodType`](frequency::PeriodType) and [`Scale`](frequency::Scale) - Settings
//! - [`SankeyError`](error::SankeyError) - Error type

/// Error types for all operations.
pub mod error;
/// Reporting period and scale definitions.
pub mod frequency;
/// Provider trait for fetching company concepts.
pub mod provider;
/// Core data types (Cik, Ticker, Line, StatementRow, API responses).
pub mod types;

// Re-export commonly used items at crate root
pub use error::{Result, SankeyError};
pub use frequency::{ANNUAL_FORMS, PeriodType, Scale};
pub use provider::ConceptProvider;
pub use types::{Cik, CompanyConcept, Line, Observation, StatementRow, Ticker};
