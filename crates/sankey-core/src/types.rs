//! Core data types for statement retrieval.
//!
//! This module defines the fundamental data structures:
//!
//! - [`Cik`] - SEC Central Index Key
//! - [`Ticker`] - Trading symbol used for titles and file names
//! - [`Line`] - The nine income-statement lines drawn in the diagram
//! - [`StatementRow`] - One fiscal period's values for all nine lines
//! - [`CompanyConcept`] / [`Observation`] - EDGAR company-concept response

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use crate::error::{Result, SankeyError};

/// SEC Central Index Key.
///
/// Stored without padding; [`Cik::padded`] yields the 10-digit form used in URLs.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cik(String);

impl Cik {
    /// Creates a CIK from its decimal digits, with or without zero padding.
    pub fn new(s: impl AsRef<str>) -> Result<Self> {
        let trimmed = s.as_ref().trim();
        let digits = trimmed.strip_prefix("CIK").unwrap_or(trimmed);
        if digits.is_empty() || digits.len() > 10 || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(SankeyError::InvalidParameter(format!(
                "CIK must be 1-10 digits, got {:?}",
                s.as_ref()
            )));
        }
        Ok(Self(digits.to_string()))
    }

    /// Returns the CIK zero-padded to 10 digits.
    #[must_use]
    pub fn padded(&self) -> String {
        format!("{:0>10}", self.0)
    }

    /// Returns the CIK as given.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Cik {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A trading symbol/ticker.
///
/// Tickers are automatically uppercased on creation.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Ticker(String);

impl Ticker {
    /// Creates a new ticker from a string, converting to uppercase.
    #[must_use]
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into().trim().to_uppercase())
    }

    /// Returns the ticker as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if the ticker is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Ticker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Ticker {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Ticker {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

/// An income-statement line drawn as a node of the diagram.
///
/// The declaration order is the node order: revenue first, net income last.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Line {
    /// Revenue from contracts with customers.
    Revenue,
    /// Cost of goods and services sold.
    CostOfSales,
    /// Gross profit.
    GrossProfit,
    /// Operating expenses.
    OperatingExpense,
    /// Operating income.
    OperatingProfit,
    /// Non-operating income or expense.
    OtherIncome,
    /// Income before income taxes.
    PreTaxProfit,
    /// Income tax expense.
    Tax,
    /// Net income.
    NetIncome,
}

impl Line {
    /// All lines in node order.
    pub const ALL: [Self; 9] = [
        Self::Revenue,
        Self::CostOfSales,
        Self::GrossProfit,
        Self::OperatingExpense,
        Self::OperatingProfit,
        Self::OtherIncome,
        Self::PreTaxProfit,
        Self::Tax,
        Self::NetIncome,
    ];

    /// Node index of this line.
    #[must_use]
    pub const fn index(&self) -> usize {
        *self as usize
    }

    /// US-GAAP concept tag reported for this line.
    #[must_use]
    pub const fn tag(&self) -> &'static str {
        match self {
            Self::Revenue => "RevenueFromContractWithCustomerExcludingAssessedTax",
            Self::CostOfSales => "CostOfGoodsAndServicesSold",
            Self::GrossProfit => "GrossProfit",
            Self::OperatingExpense => "OperatingExpenses",
            Self::OperatingProfit => "OperatingIncomeLoss",
            Self::OtherIncome => "NonoperatingIncomeExpense",
            Self::PreTaxProfit => {
                "IncomeLossFromContinuingOperationsBeforeIncomeTaxesExtraordinaryItemsNoncontrollingInterest"
            }
            Self::Tax => "IncomeTaxExpenseBenefit",
            Self::NetIncome => "NetIncomeLoss",
        }
    }

    /// Human-readable label, also used as the statement table column name.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Revenue => "Revenue",
            Self::CostOfSales => "Cost of Sales",
            Self::GrossProfit => "Gross Profit",
            Self::OperatingExpense => "Operating Expense",
            Self::OperatingProfit => "Operating Profit",
            Self::OtherIncome => "Other Income",
            Self::PreTaxProfit => "Pre-tax Profit",
            Self::Tax => "Tax",
            Self::NetIncome => "Net Income",
        }
    }

    /// Looks up a line by its concept tag.
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|line| line.tag() == tag)
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One fiscal period's scaled values for all nine lines.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatementRow {
    /// Reporting frame, e.g. `CY2022`.
    pub frame: String,
    values: [i64; 9],
}

impl StatementRow {
    /// Creates a row from values in [`Line::ALL`] order.
    #[must_use]
    pub const fn new(frame: String, values: [i64; 9]) -> Self {
        Self { frame, values }
    }

    /// Value reported for a line.
    #[must_use]
    pub const fn value(&self, line: Line) -> i64 {
        self.values[line.index()]
    }

    /// Revenue, the denominator of every margin.
    #[must_use]
    pub const fn revenue(&self) -> i64 {
        self.value(Line::Revenue)
    }

    /// Iterates `(line, value)` pairs in node order.
    pub fn iter(&self) -> impl Iterator<Item = (Line, i64)> + '_ {
        Line::ALL.into_iter().map(|line| (line, self.value(line)))
    }
}

/// Response from the EDGAR company-concept endpoint.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyConcept {
    /// CIK as a number.
    pub cik: u64,
    /// Taxonomy name.
    pub taxonomy: String,
    /// Concept tag.
    pub tag: String,
    /// Entity name.
    #[serde(default)]
    pub entity_name: Option<String>,
    /// Concept label.
    #[serde(default)]
    pub label: Option<String>,
    /// Observations keyed by unit (`USD`, `shares`, ...).
    #[serde(default)]
    pub units: HashMap<String, Vec<Observation>>,
}

/// A single reported value with its filing metadata.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct Observation {
    /// Start of the period; absent for instant facts.
    #[serde(default)]
    pub start: Option<String>,
    /// End of the period.
    pub end: String,
    /// Reported value; usually a number, occasionally a numeric string.
    pub val: serde_json::Value,
    /// Accession number of the filing.
    #[serde(default)]
    pub accn: Option<String>,
    /// Fiscal year of the filing.
    #[serde(default)]
    pub fy: Option<i32>,
    /// Fiscal period of the filing (FY, Q1, ...).
    #[serde(default)]
    pub fp: Option<String>,
    /// Form type (10-K, 10-Q, ...).
    pub form: String,
    /// Filed date.
    #[serde(default)]
    pub filed: Option<String>,
    /// Calendar frame; only the fact that best represents a period carries one.
    #[serde(default)]
    pub frame: Option<String>,
}

impl Observation {
    /// Numeric value, coercing numeric strings.
    pub fn numeric_value(&self) -> Result<f64> {
        match &self.val {
            serde_json::Value::Number(n) => n
                .as_f64()
                .ok_or_else(|| SankeyError::Parse(format!("value {n} is not representable"))),
            serde_json::Value::String(s) => s.trim().parse::<f64>().map_err(|e| {
                SankeyError::Parse(format!("non-numeric value {s:?} ending {}: {e}", self.end))
            }),
            other => Err(SankeyError::Parse(format!(
                "non-numeric value {other} ending {}",
                self.end
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cik_padding() {
        let cik = Cik::new("320193").unwrap();
        assert_eq!(cik.padded(), "0000320193");
        assert_eq!(cik.as_str(), "320193");

        let prefixed = Cik::new("CIK0000320193").unwrap();
        assert_eq!(prefixed.padded(), "0000320193");
    }

    #[test]
    fn test_cik_rejects_garbage() {
        assert!(Cik::new("").is_err());
        assert!(Cik::new("AAPL").is_err());
        assert!(Cik::new("12345678901").is_err());
    }

    #[test]
    fn test_ticker_creation() {
        let ticker = Ticker::new("aapl");
        assert_eq!(ticker.as_str(), "AAPL");
        assert_eq!(Ticker::from("msft").to_string(), "MSFT");
    }

    #[test]
    fn test_line_order() {
        for (i, line) in Line::ALL.iter().enumerate() {
            assert_eq!(line.index(), i);
        }
        assert_eq!(Line::OtherIncome.index(), 5);
        assert_eq!(Line::PreTaxProfit.index(), 6);
    }

    #[test]
    fn test_line_tags_round_trip() {
        assert_eq!(Line::from_tag("NetIncomeLoss"), Some(Line::NetIncome));
        assert_eq!(Line::from_tag("Assets"), None);
    }

    #[test]
    fn test_statement_row_lookup() {
        let row = StatementRow::new("CY2022".into(), [100, 60, 40, 10, 30, 1, 31, 10, 21]);
        assert_eq!(row.revenue(), 100);
        assert_eq!(row.value(Line::NetIncome), 21);
        assert_eq!(row.iter().count(), 9);
    }

    #[test]
    fn test_parse_observation() {
        let json = r#"{
            "start": "2021-09-26", "end": "2022-09-24", "val": 394328000000,
            "accn": "0000320193-22-000108", "fy": 2022, "fp": "FY",
            "form": "10-K", "filed": "2022-10-28", "frame": "CY2022"
        }"#;
        let obs: Observation = serde_json::from_str(json).unwrap();
        assert_eq!(obs.frame.as_deref(), Some("CY2022"));
        assert_eq!(obs.numeric_value().unwrap(), 394_328_000_000.0);
    }

    #[test]
    fn test_observation_value_coercion() {
        let mut obs: Observation =
            serde_json::from_str(r#"{"end": "2022-09-24", "val": "1500", "form": "10-K"}"#)
                .unwrap();
        assert_eq!(obs.numeric_value().unwrap(), 1500.0);

        obs.val = serde_json::Value::String("n/a".into());
        assert!(matches!(obs.numeric_value(), Err(SankeyError::Parse(_))));

        obs.val = serde_json::Value::Null;
        assert!(obs.numeric_value().is_err());
    }
}
