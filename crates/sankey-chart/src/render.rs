//! Plotly figure construction with the fixed statement layout.

use std::fmt;

use plotly::{
    Plot, Sankey,
    common::{Font, Title},
    layout::{Annotation, HAlign, HoverMode, Layout},
    sankey::{Arrangement, Link, Node},
};
use sankey_core::{Line, Ticker};
use tracing::debug;

use crate::flow::{SankeyData, Tone};

/// Horizontal node positions, one per line.
pub const NODE_X: [f64; 9] = [0.0, 0.25, 0.25, 0.5, 0.5, 0.625, 0.75, 1.0, 1.0];

/// Vertical node positions, one per line (plotly's y grows downwards).
pub const NODE_Y: [f64; 9] = [0.3, 0.8, 0.25, 0.7, 0.2, 0.5, 0.2, 0.5, 0.05];

/// Node tones, one per line.
pub const NODE_TONES: [Tone; 9] = [
    Tone::Accent,
    Tone::Neutral,
    Tone::Accent,
    Tone::Neutral,
    Tone::Accent,
    Tone::Accent,
    Tone::Accent,
    Tone::Neutral,
    Tone::Accent,
];

const NODE_PAD: usize = 15;
const NODE_THICKNESS: usize = 20;
const ANNOTATION_X_OFFSET: f64 = 0.02;
const FONT_SIZE: usize = 11;

/// Builds [`SankeyFigure`]s for one company.
#[derive(Clone, Debug)]
pub struct FigureRenderer {
    ticker: Ticker,
}

impl FigureRenderer {
    /// Renderer titling figures with `ticker`.
    pub fn new(ticker: impl Into<Ticker>) -> Self {
        Self {
            ticker: ticker.into(),
        }
    }

    /// Figure title for a year.
    #[must_use]
    pub fn title(&self, year: i32) -> String {
        format!("Financial Statement - {} {}", self.ticker, year)
    }

    /// Lay out `data` and build the figure.
    #[must_use]
    pub fn render(&self, year: i32, data: SankeyData) -> SankeyFigure {
        let node = Node::new()
            .pad(NODE_PAD)
            .thickness(NODE_THICKNESS)
            .color_array(NODE_TONES.iter().map(|t| t.hex().to_string()).collect())
            .x(NODE_X.to_vec())
            .y(NODE_Y.to_vec());

        let link = Link::new()
            .source(data.links.iter().map(|l| l.source).collect())
            .target(data.links.iter().map(|l| l.target).collect())
            .value(data.links.iter().map(|l| l.value).collect())
            .color_array(data.links.iter().map(|l| l.color.clone()).collect());

        let trace = Sankey::new()
            .node(node)
            .link(link)
            .value_format("$,")
            .value_suffix(data.scale.suffix())
            .arrangement(Arrangement::Snap);

        let annotations = data
            .nodes
            .iter()
            .map(|n| {
                let at = n.line.index();
                Annotation::new()
                    .x(NODE_X[at] - ANNOTATION_X_OFFSET)
                    .y(1.0 - NODE_Y[at])
                    .text(n.text.as_str())
                    .align(HAlign::Center)
                    .show_arrow(false)
            })
            .collect();

        let title = self.title(year);
        let layout = Layout::new()
            .title(Title::from(title.as_str()))
            .hover_mode(HoverMode::X)
            .font(Font::new().size(FONT_SIZE))
            .annotations(annotations);

        let mut plot = Plot::new();
        plot.add_trace(trace);
        plot.set_layout(layout);

        debug!(ticker = %self.ticker, year, frame = %data.frame, "Rendered figure");
        SankeyFigure {
            ticker: self.ticker.clone(),
            year,
            data,
            plot,
        }
    }
}

/// A rendered statement diagram for one company and year.
pub struct SankeyFigure {
    ticker: Ticker,
    year: i32,
    data: SankeyData,
    plot: Plot,
}

impl fmt::Debug for SankeyFigure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SankeyFigure")
            .field("ticker", &self.ticker)
            .field("year", &self.year)
            .field("data", &self.data)
            .finish_non_exhaustive()
    }
}

impl SankeyFigure {
    /// Company ticker.
    #[must_use]
    pub const fn ticker(&self) -> &Ticker {
        &self.ticker
    }

    /// Fiscal year shown.
    #[must_use]
    pub const fn year(&self) -> i32 {
        self.year
    }

    /// Node and link data behind the figure.
    #[must_use]
    pub const fn data(&self) -> &SankeyData {
        &self.data
    }

    /// The plotly figure.
    #[must_use]
    pub const fn plot(&self) -> &Plot {
        &self.plot
    }

    /// Annotation text of one line's node.
    #[must_use]
    pub fn node_text(&self, line: Line) -> &str {
        &self.data.nodes[line.index()].text
    }

    /// Standalone HTML document.
    #[must_use]
    pub fn to_html(&self) -> String {
        self.plot.to_html()
    }

    /// Figure as plotly JSON.
    #[must_use]
    pub fn to_json(&self) -> String {
        self.plot.to_json()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flow::SankeyDataBuilder;
    use sankey_core::{Scale, StatementRow};
    use serde_json::Value;

    fn figure() -> SankeyFigure {
        let row = StatementRow::new(
            "CY2022".into(),
            [394_328, 223_546, 170_782, 51_345, 119_437, -334, 119_103, 19_300, 99_803],
        );
        let data = SankeyDataBuilder::new(Scale::Millions).build(&row).unwrap();
        FigureRenderer::new("aapl").render(2022, data)
    }

    fn json() -> Value {
        serde_json::from_str(&figure().to_json()).unwrap()
    }

    #[test]
    fn test_title_uses_ticker_and_year() {
        let json = json();
        assert_eq!(
            json["layout"]["title"]["text"],
            "Financial Statement - AAPL 2022"
        );
    }

    #[test]
    fn test_trace_settings() {
        let json = json();
        let trace = &json["data"][0];

        assert_eq!(trace["type"], "sankey");
        assert_eq!(trace["arrangement"], "snap");
        assert_eq!(trace["valueformat"], "$,");
        assert_eq!(trace["valuesuffix"], "M");
        assert_eq!(trace["node"]["pad"], 15);
        assert_eq!(trace["node"]["thickness"], 20);
        assert_eq!(trace["node"]["x"][5], 0.625);
        assert_eq!(trace["node"]["color"][1], "#666666");
        assert_eq!(trace["link"]["target"][4], 6);
        assert_eq!(trace["link"]["value"][7], 99_803);
    }

    #[test]
    fn test_annotations_follow_nodes() {
        let json = json();
        let annotations = json["layout"]["annotations"].as_array().unwrap();

        assert_eq!(annotations.len(), 9);
        let net = &annotations[Line::NetIncome.index()];
        assert_eq!(net["x"], 0.98);
        assert_eq!(net["y"], 0.95);
        assert_eq!(net["showarrow"], false);
        assert!(annotations.iter().all(|a| a["align"] == "center"));
        assert_eq!(net["text"], "Net Income<br>$99,803M<br>Margin: 25%");
    }

    #[test]
    fn test_layout_font_and_hover() {
        let json = json();
        assert_eq!(json["layout"]["hovermode"], "x");
        assert_eq!(json["layout"]["font"]["size"], 11);
    }

    #[test]
    fn test_html_embeds_plot() {
        let html = figure().to_html();
        assert!(html.contains("<html"));
        assert!(html.contains("Financial Statement - AAPL 2022"));
    }

    #[test]
    fn test_node_text_accessor() {
        assert_eq!(
            figure().node_text(Line::GrossProfit),
            "Gross Profit<br>$170,782M<br>Gross margin: 43%"
        );
    }
}
