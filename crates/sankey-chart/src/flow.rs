//! Flow graph of the income statement and the per-year Sankey data built from it.
//!
//! The graph is declared as a list of [`Flow`] edges with named endpoints. Each
//! edge carries the value of one statement line into that line's own node,
//! unless the edge is explicitly rerouted: non-operating income is drawn as an
//! inflow into pre-tax profit rather than as a node fed by anything.

use sankey_core::{Line, Result, SankeyError, Scale, StatementRow};
use serde::Serialize;
use tracing::debug;

use crate::color::{DEFAULT_LINK_ALPHA, color_transform};

/// Color family of a node or link.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Tone {
    /// Costs and outflows (gray).
    Neutral,
    /// Revenue, profits and inflows (blue).
    Accent,
}

impl Tone {
    /// Hex color of this tone.
    #[must_use]
    pub const fn hex(&self) -> &'static str {
        match self {
            Self::Neutral => "#666666",
            Self::Accent => "#0088cc",
        }
    }
}

/// Where an edge ends.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Routing {
    /// Into the node of the quantity it carries.
    Natural,
    /// Into another node.
    Into(Line),
}

/// One edge of the statement flow graph.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Flow {
    /// Line whose value the edge carries.
    pub quantity: Line,
    /// Node the edge leaves.
    pub source: Line,
    /// Where the edge ends.
    pub routing: Routing,
    /// Link color family.
    pub tone: Tone,
}

impl Flow {
    const fn natural(source: Line, quantity: Line, tone: Tone) -> Self {
        Self {
            quantity,
            source,
            routing: Routing::Natural,
            tone,
        }
    }

    /// Node the edge enters.
    #[must_use]
    pub const fn target(&self) -> Line {
        match self.routing {
            Routing::Natural => self.quantity,
            Routing::Into(line) => line,
        }
    }

    /// True if the edge does not end at its quantity's node.
    #[must_use]
    pub const fn is_rerouted(&self) -> bool {
        matches!(self.routing, Routing::Into(_))
    }
}

/// The income statement flow graph, in link order.
pub const INCOME_FLOWS: [Flow; 8] = [
    Flow::natural(Line::Revenue, Line::CostOfSales, Tone::Neutral),
    Flow::natural(Line::Revenue, Line::GrossProfit, Tone::Accent),
    Flow::natural(Line::GrossProfit, Line::OperatingExpense, Tone::Neutral),
    Flow::natural(Line::GrossProfit, Line::OperatingProfit, Tone::Accent),
    Flow {
        quantity: Line::OtherIncome,
        source: Line::OtherIncome,
        routing: Routing::Into(Line::PreTaxProfit),
        tone: Tone::Accent,
    },
    Flow::natural(Line::OperatingProfit, Line::PreTaxProfit, Tone::Accent),
    Flow::natural(Line::PreTaxProfit, Line::Tax, Tone::Neutral),
    Flow::natural(Line::PreTaxProfit, Line::NetIncome, Tone::Accent),
];

/// A diagram node with its display text.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SankeyNode {
    /// Statement line drawn by this node.
    pub line: Line,
    /// Scaled value.
    pub value: i64,
    /// Annotation text: label, value and, where applicable, a margin.
    pub text: String,
}

/// A diagram link in positional form.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SankeyLink {
    /// Line whose value the link carries.
    pub quantity: Line,
    /// Source node index.
    pub source: usize,
    /// Target node index.
    pub target: usize,
    /// Scaled value.
    pub value: i64,
    /// `rgba()` color.
    pub color: String,
}

/// Nodes and links for one period.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SankeyData {
    /// Reporting frame the values come from.
    pub frame: String,
    /// Revenue, the denominator of every margin.
    pub revenue: i64,
    /// Scale the values are expressed in.
    pub scale: Scale,
    /// One node per line, in [`Line::ALL`] order.
    pub nodes: Vec<SankeyNode>,
    /// One link per flow, in [`INCOME_FLOWS`] order.
    pub links: Vec<SankeyLink>,
}

/// Builds [`SankeyData`] from a statement row.
#[derive(Clone, Debug)]
pub struct SankeyDataBuilder {
    flows: Vec<Flow>,
    scale: Scale,
    link_alpha: f64,
}

impl SankeyDataBuilder {
    /// Builder over [`INCOME_FLOWS`] with half-transparent links.
    #[must_use]
    pub fn new(scale: Scale) -> Self {
        Self {
            flows: INCOME_FLOWS.to_vec(),
            scale,
            link_alpha: DEFAULT_LINK_ALPHA,
        }
    }

    /// Override the link opacity.
    #[must_use]
    pub const fn with_link_alpha(mut self, alpha: f64) -> Self {
        self.link_alpha = alpha;
        self
    }

    /// Build nodes and links for one period.
    ///
    /// Fails with [`SankeyError::ZeroRevenue`] when revenue is zero.
    pub fn build(&self, row: &StatementRow) -> Result<SankeyData> {
        let revenue = row.revenue();
        if revenue == 0 {
            return Err(SankeyError::ZeroRevenue(row.frame.clone()));
        }

        let nodes = row
            .iter()
            .map(|(line, value)| SankeyNode {
                line,
                value,
                text: node_text(line, value, revenue, self.scale),
            })
            .collect();

        let links = self
            .flows
            .iter()
            .map(|flow| {
                Ok(SankeyLink {
                    quantity: flow.quantity,
                    source: flow.source.index(),
                    target: flow.target().index(),
                    value: row.value(flow.quantity),
                    color: color_transform(flow.tone.hex(), self.link_alpha)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        debug!(frame = %row.frame, revenue, "Built sankey data");
        Ok(SankeyData {
            frame: row.frame.clone(),
            revenue,
            scale: self.scale,
            nodes,
            links,
        })
    }
}

/// Margin caption for lines that show one.
const fn margin_prefix(line: Line) -> Option<&'static str> {
    match line {
        Line::GrossProfit => Some("Gross margin"),
        Line::OperatingProfit | Line::PreTaxProfit | Line::NetIncome => Some("Margin"),
        Line::Tax => Some("Tax rate"),
        _ => None,
    }
}

/// `value / revenue` as a whole percentage, rounding half to even.
#[must_use]
pub fn margin_percent(value: i64, revenue: i64) -> i64 {
    (value as f64 * 100.0 / revenue as f64).round_ties_even() as i64
}

/// `$` amount with thousands separators and the scale suffix, e.g. `$394,328M`.
#[must_use]
pub fn format_amount(value: i64, scale: Scale) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 3);
    out.push('$');
    if value < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out.push_str(scale.suffix());
    out
}

/// Annotation text for a node.
#[must_use]
pub fn node_text(line: Line, value: i64, revenue: i64, scale: Scale) -> String {
    let mut text = format!("{}<br>{}", line.label(), format_amount(value, scale));
    if let Some(prefix) = margin_prefix(line) {
        text.push_str(&format!(
            "<br>{prefix}: {}%",
            margin_percent(value, revenue)
        ));
    }
    text
}
