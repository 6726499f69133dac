//! Reporting period and display scale definitions.
//!
//! This module defines [`PeriodType`] for the statement granularity and [`Scale`]
//! for the divisor applied to raw currency values before display.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Result, SankeyError};

/// Filing forms that carry annual statements, including amendments.
pub const ANNUAL_FORMS: &[&str] = &["10-K", "10-K/A"];

/// Period type for fundamental financial data.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PeriodType {
    /// Annual reporting period.
    #[default]
    Annual,
    /// Quarterly reporting period.
    Quarterly,
}

impl PeriodType {
    /// Filing forms whose observations belong to this period type.
    ///
    /// Only annual statements are supported; quarterly returns
    /// [`SankeyError::NotImplemented`].
    pub fn form_types(&self) -> Result<&'static [&'static str]> {
        match self {
            Self::Annual => Ok(ANNUAL_FORMS),
            Self::Quarterly => Err(SankeyError::NotImplemented(
                "quarterly statements are not supported yet".to_string(),
            )),
        }
    }

    /// Reporting frame identifier for a year, e.g. `CY2022`.
    #[must_use]
    pub fn frame(&self, year: i32) -> String {
        format!("CY{year}")
    }
}

impl FromStr for PeriodType {
    type Err = SankeyError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "Y" | "y" | "annual" => Ok(Self::Annual),
            "Q" | "q" | "quarterly" => Ok(Self::Quarterly),
            other => Err(SankeyError::NotImplemented(format!(
                "period {other:?}; only annual (Y) or quarterly (Q) are recognised"
            ))),
        }
    }
}

/// Divisor applied to raw currency values before display.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Scale {
    /// Millions, suffix `M`.
    #[default]
    Millions,
    /// Thousands, suffix `k`.
    Thousands,
}

impl Scale {
    /// Raw value divisor.
    #[must_use]
    pub const fn divisor(&self) -> f64 {
        match self {
            Self::Millions => 1e6,
            Self::Thousands => 1e3,
        }
    }

    /// Suffix appended to scaled values.
    #[must_use]
    pub const fn suffix(&self) -> &'static str {
        match self {
            Self::Millions => "M",
            Self::Thousands => "k",
        }
    }

    /// Resolve a raw divisor; only one million and one thousand are supported.
    pub fn from_divisor(divisor: f64) -> Result<Self> {
        if divisor == 1e6 {
            Ok(Self::Millions)
        } else if divisor == 1e3 {
            Ok(Self::Thousands)
        } else {
            Err(SankeyError::NotImplemented(format!(
                "scale divisor {divisor}; only 1e6 (M) and 1e3 (k) are supported"
            )))
        }
    }

    /// Scale a raw value, truncating toward zero.
    #[must_use]
    pub fn apply(&self, raw: f64) -> i64 {
        (raw / self.divisor()).trunc() as i64
    }
}

impl fmt::Display for Scale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.suffix())
    }
}
