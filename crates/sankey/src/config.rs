//! Validated settings for one company's statement diagrams.

use sankey_core::{Cik, PeriodType, Result, SankeyError, Scale, Ticker};
use sankey_edgar::MissingPeriodPolicy;

/// Default XBRL taxonomy.
pub const DEFAULT_TAXONOMY: &str = "us-gaap";

/// Settings for a [`FinancialSankey`](crate::FinancialSankey).
///
/// Built with [`SankeyConfig::builder`]; every field is checked once in
/// [`SankeyConfigBuilder::build`].
#[derive(Clone, Debug, PartialEq)]
pub struct SankeyConfig {
    organization: String,
    email: String,
    cik: Cik,
    ticker: Ticker,
    taxonomy: String,
    period: PeriodType,
    scale: Scale,
    missing_periods: MissingPeriodPolicy,
}

impl SankeyConfig {
    /// Start a builder.
    #[must_use]
    pub fn builder() -> SankeyConfigBuilder {
        SankeyConfigBuilder::default()
    }

    /// User agent sent to EDGAR: `"{organization} {email}"`.
    #[must_use]
    pub fn user_agent(&self) -> String {
        format!("{} {}", self.organization, self.email)
    }

    /// Company CIK.
    #[must_use]
    pub const fn cik(&self) -> &Cik {
        &self.cik
    }

    /// Company ticker.
    #[must_use]
    pub const fn ticker(&self) -> &Ticker {
        &self.ticker
    }

    /// XBRL taxonomy.
    #[must_use]
    pub fn taxonomy(&self) -> &str {
        &self.taxonomy
    }

    /// Reporting period.
    #[must_use]
    pub const fn period(&self) -> PeriodType {
        self.period
    }

    /// Value scale.
    #[must_use]
    pub const fn scale(&self) -> Scale {
        self.scale
    }

    /// Handling of periods some concepts do not report.
    #[must_use]
    pub const fn missing_periods(&self) -> MissingPeriodPolicy {
        self.missing_periods
    }
}

/// Builder for [`SankeyConfig`].
#[derive(Clone, Debug, Default)]
pub struct SankeyConfigBuilder {
    organization: String,
    email: String,
    cik: String,
    ticker: String,
    taxonomy: Option<String>,
    period: PeriodType,
    scale: Scale,
    divisor: Option<f64>,
    missing_periods: MissingPeriodPolicy,
}

impl SankeyConfigBuilder {
    /// Organization named in the user agent.
    #[must_use]
    pub fn organization(mut self, name: impl Into<String>) -> Self {
        self.organization = name.into();
        self
    }

    /// Contact email named in the user agent.
    #[must_use]
    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    /// Company CIK, with or without zero padding.
    #[must_use]
    pub fn cik(mut self, cik: impl Into<String>) -> Self {
        self.cik = cik.into();
        self
    }

    /// Ticker used in titles and file names.
    #[must_use]
    pub fn ticker(mut self, ticker: impl Into<String>) -> Self {
        self.ticker = ticker.into();
        self
    }

    /// XBRL taxonomy; defaults to [`DEFAULT_TAXONOMY`].
    #[must_use]
    pub fn taxonomy(mut self, taxonomy: impl Into<String>) -> Self {
        self.taxonomy = Some(taxonomy.into());
        self
    }

    /// Reporting period; defaults to annual.
    #[must_use]
    pub const fn period(mut self, period: PeriodType) -> Self {
        self.period = period;
        self
    }

    /// Value scale; defaults to millions.
    #[must_use]
    pub const fn scale(mut self, scale: Scale) -> Self {
        self.scale = scale;
        self.divisor = None;
        self
    }

    /// Value scale as a raw divisor, resolved when building.
    #[must_use]
    pub const fn scale_divisor(mut self, divisor: f64) -> Self {
        self.divisor = Some(divisor);
        self
    }

    /// Missing-period handling; defaults to [`MissingPeriodPolicy::Drop`].
    #[must_use]
    pub const fn missing_periods(mut self, policy: MissingPeriodPolicy) -> Self {
        self.missing_periods = policy;
        self
    }

    /// Validate and build.
    ///
    /// # Errors
    /// - [`SankeyError::InvalidParameter`] for an empty organization, email or
    ///   ticker, or a malformed CIK
    /// - [`SankeyError::NotImplemented`] for quarterly periods or an
    ///   unsupported divisor
    pub fn build(self) -> Result<SankeyConfig> {
        let organization = self.organization.trim().to_string();
        let email = self.email.trim().to_string();
        if organization.is_empty() || email.is_empty() {
            return Err(SankeyError::InvalidParameter(
                "organization name and contact email are required for the EDGAR user agent"
                    .to_string(),
            ));
        }

        let ticker = Ticker::new(self.ticker);
        if ticker.is_empty() {
            return Err(SankeyError::InvalidParameter("ticker is required".to_string()));
        }
        let cik = Cik::new(&self.cik)?;

        self.period.form_types()?;
        let scale = match self.divisor {
            Some(divisor) => Scale::from_divisor(divisor)?,
            None => self.scale,
        };

        let taxonomy = self
            .taxonomy
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| DEFAULT_TAXONOMY.to_string());

        Ok(SankeyConfig {
            organization,
            email,
            cik,
            ticker,
            taxonomy,
            period: self.period,
            scale,
            missing_periods: self.missing_periods,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apple() -> SankeyConfigBuilder {
        SankeyConfig::builder()
            .organization("Example Corp")
            .email("admin@example.com")
            .cik("0000320193")
            .ticker("aapl")
    }

    #[test]
    fn test_defaults() {
        let config = apple().build().unwrap();

        assert_eq!(config.user_agent(), "Example Corp admin@example.com");
        assert_eq!(config.cik().padded(), "0000320193");
        assert_eq!(config.ticker().as_str(), "AAPL");
        assert_eq!(config.taxonomy(), "us-gaap");
        assert_eq!(config.period(), PeriodType::Annual);
        assert_eq!(config.scale(), Scale::Millions);
        assert_eq!(config.missing_periods(), MissingPeriodPolicy::Drop);
    }

    #[test]
    fn test_divisor_resolution() {
        let config = apple().scale_divisor(1e3).build().unwrap();
        assert_eq!(config.scale(), Scale::Thousands);

        assert!(matches!(
            apple().scale_divisor(1e9).build(),
            Err(SankeyError::NotImplemented(_))
        ));
    }

    #[test]
    fn test_quarterly_not_implemented() {
        assert!(matches!(
            apple().period(PeriodType::Quarterly).build(),
            Err(SankeyError::NotImplemented(_))
        ));
    }

    #[test]
    fn test_required_fields() {
        assert!(matches!(
            apple().email("  ").build(),
            Err(SankeyError::InvalidParameter(_))
        ));
        assert!(matches!(
            apple().ticker("").build(),
            Err(SankeyError::InvalidParameter(_))
        ));
        assert!(matches!(
            apple().cik("").build(),
            Err(SankeyError::InvalidParameter(_))
        ));
    }
}
