#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/sankey/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Income statement Sankey diagrams from SEC EDGAR filings.
//!
//! This crate re-exports the core types, the EDGAR client and the chart
//! builder, and wires them together in [`FinancialSankey`].
//!
//! # Features
//!
//! - `png` - PNG export through plotly's webdriver-based static export

mod config;
mod pipeline;

pub use config::{DEFAULT_TAXONOMY, SankeyConfig, SankeyConfigBuilder};
pub use pipeline::FinancialSankey;

// Core types and traits
pub use sankey_core::*;

// Provider and statement assembly
pub use sankey_edgar::{EdgarClient, IncomeStatement, MissingPeriodPolicy};

// Charting
pub use sankey_chart::{SankeyData, SankeyFigure, SaveAs};
