#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/sankey/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Sankey flow data, plotly rendering and export for one income statement period.
//!
//! # Example
//!
//! ```no_run
//! use sankey_chart::{FigureRenderer, SankeyDataBuilder, SaveAs};
//! use sankey_core::{Scale, StatementRow};
//!
//! # fn main() -> sankey_core::Result<()> {
//! let row = StatementRow::new("CY2022".into(), [100, 40, 60, 30, 30, 0, 30, 9, 21]);
//! let data = SankeyDataBuilder::new(Scale::Millions).build(&row)?;
//! let figure = FigureRenderer::new("AAPL").render(2022, data);
//! figure.show(SaveAs::Html, None)?;
//! # Ok(())
//! # }
//! ```

/// Hex color conversion.
pub mod color;
/// Display and file export.
pub mod export;
/// Statement flow graph and per-period node/link data.
pub mod flow;
/// Figure layout and plotly construction.
pub mod render;

pub use color::{DEFAULT_LINK_ALPHA, color_transform};
pub use export::{SaveAs, destination, export, output_path};
pub use flow::{
    Flow, INCOME_FLOWS, Routing, SankeyData, SankeyDataBuilder, SankeyLink, SankeyNode, Tone,
    format_amount, margin_percent, node_text,
};
pub use render::{FigureRenderer, NODE_TONES, NODE_X, NODE_Y, SankeyFigure};
