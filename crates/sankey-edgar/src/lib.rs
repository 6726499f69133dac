#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/sankey/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! SEC EDGAR concept fetching and income statement assembly.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use sankey_core::{Cik, PeriodType, Scale};
//! use sankey_edgar::{ConceptFetcher, EdgarClient, StatementAssembler};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = Arc::new(EdgarClient::new("Example Corp admin@example.com")?);
//!     let forms = PeriodType::Annual.form_types()?;
//!     let fetcher = ConceptFetcher::new(client, Cik::new("320193")?, "us-gaap", forms, Scale::Millions);
//!
//!     let statement = StatementAssembler::new(fetcher).assemble().await?;
//!     let row = statement.row_for_year(2022)?;
//!     println!("{}: revenue {}M", row.frame, row.revenue());
//!     Ok(())
//! }
//! ```

use async_trait::async_trait;
use sankey_core::{Cik, CompanyConcept, ConceptProvider, Result, SankeyError};
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::{Instant, sleep};
use tracing::debug;

mod concept;
mod statement;

pub use concept::{ConceptFetcher, METADATA_COLUMNS, VALUE_UNIT, concept_table};
pub use statement::{IncomeStatement, MissingPeriodPolicy, StatementAssembler, join_concepts};

/// SEC EDGAR API base URL
const EDGAR_BASE_URL: &str = "https://data.sec.gov";

/// Default rate limit: 10 requests per second (SEC requirement)
const DEFAULT_RATE_LIMIT: Duration = Duration::from_millis(100);

/// Request timeout for concept downloads.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Rate limiter to ensure we don't exceed SEC's rate limits
#[derive(Debug)]
struct RateLimiter {
    last_request: Option<Instant>,
    min_interval: Duration,
}

impl RateLimiter {
    const fn new(min_interval: Duration) -> Self {
        Self {
            last_request: None,
            min_interval,
        }
    }

    async fn wait(&mut self) {
        if let Some(last) = self.last_request {
            let elapsed = last.elapsed();
            if elapsed < self.min_interval {
                sleep(self.min_interval - elapsed).await;
            }
        }
        self.last_request = Some(Instant::now());
    }
}

/// SEC EDGAR company-concept client.
///
/// Fetches one XBRL concept at a time for a company. Every request carries the
/// identifying user agent the SEC requires and passes through a rate limiter
/// (max 10 requests/second).
#[derive(Debug)]
pub struct EdgarClient {
    client: reqwest::Client,
    base_url: String,
    rate_limiter: Mutex<RateLimiter>,
    user_agent: String,
}

impl EdgarClient {
    /// Create a new EDGAR client with the specified user agent.
    ///
    /// The SEC requires identifying user agent headers, conventionally
    /// "Organisation Name contact@email.com".
    ///
    /// # Arguments
    /// * `user_agent` - User agent string identifying your organisation
    ///
    /// # Example
    /// ```
    /// use sankey_edgar::EdgarClient;
    ///
    /// let client = EdgarClient::new("Example Corp admin@example.com").unwrap();
    /// assert_eq!(client.user_agent(), "Example Corp admin@example.com");
    /// ```
    pub fn new(user_agent: &str) -> Result<Self> {
        if user_agent.trim().is_empty() {
            return Err(SankeyError::InvalidParameter(
                "EDGAR requires a non-empty user agent".to_string(),
            ));
        }

        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| SankeyError::Network(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self::with_client(client, user_agent))
    }

    /// Create a new EDGAR client with a custom HTTP client.
    ///
    /// # Arguments
    /// * `client` - Pre-configured reqwest client (should already carry the user agent)
    /// * `user_agent` - User agent string (for identification purposes)
    pub fn with_client(client: reqwest::Client, user_agent: &str) -> Self {
        Self {
            client,
            base_url: EDGAR_BASE_URL.to_string(),
            rate_limiter: Mutex::new(RateLimiter::new(DEFAULT_RATE_LIMIT)),
            user_agent: user_agent.to_string(),
        }
    }

    /// Point the client at a different host, e.g. a local mock server.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Override the minimum interval between requests.
    #[must_use]
    pub fn with_rate_limit(mut self, min_interval: Duration) -> Self {
        self.rate_limiter = Mutex::new(RateLimiter::new(min_interval));
        self
    }

    /// User agent sent with every request.
    #[must_use]
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    fn concept_url(&self, cik: &Cik, taxonomy: &str, tag: &str) -> String {
        format!(
            "{}/api/xbrl/companyconcept/CIK{}/{}/{}.json",
            self.base_url,
            cik.padded(),
            taxonomy,
            tag
        )
    }
}

#[async_trait]
impl ConceptProvider for EdgarClient {
    fn name(&self) -> &str {
        "SEC EDGAR"
    }

    async fn company_concept(
        &self,
        cik: &Cik,
        taxonomy: &str,
        tag: &str,
    ) -> Result<CompanyConcept> {
        // Rate limit
        self.rate_limiter.lock().await.wait().await;

        let url = self.concept_url(cik, taxonomy, tag);
        debug!("Fetching company concept from {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| SankeyError::Network(e.to_string()))?;

        match response.status() {
            reqwest::StatusCode::NOT_FOUND => {
                return Err(SankeyError::ConceptNotFound {
                    cik: cik.padded(),
                    taxonomy: taxonomy.to_string(),
                    tag: tag.to_string(),
                });
            }
            reqwest::StatusCode::TOO_MANY_REQUESTS => {
                return Err(SankeyError::RateLimited {
                    provider: self.name().to_string(),
                    retry_after: Some(Duration::from_secs(10)),
                });
            }
            status if !status.is_success() => {
                return Err(SankeyError::Network(format!(
                    "Failed to fetch {}/{} for CIK {}: HTTP {}",
                    taxonomy,
                    tag,
                    cik.padded(),
                    status
                )));
            }
            _ => {}
        }

        response.json::<CompanyConcept>().await.map_err(|e| {
            SankeyError::Parse(format!("Failed to parse company concept {tag}: {e}"))
        })
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_concept_url() {
        let client = EdgarClient::new("Test Corp test@example.com").unwrap();
        let cik = Cik::new("320193").unwrap();

        let url = client.concept_url(&cik, "us-gaap", "NetIncomeLoss");
        assert_eq!(
            url,
            "https://data.sec.gov/api/xbrl/companyconcept/CIK0000320193/us-gaap/NetIncomeLoss.json"
        );
    }

    #[test]
    fn test_base_url_override() {
        let client = EdgarClient::new("Test Corp test@example.com")
            .unwrap()
            .with_base_url("http://127.0.0.1:9000/");
        let cik = Cik::new("1").unwrap();

        assert!(
            client
                .concept_url(&cik, "us-gaap", "GrossProfit")
                .starts_with("http://127.0.0.1:9000/api/xbrl/")
        );
    }

    #[test]
    fn test_empty_user_agent_rejected() {
        assert!(matches!(
            EdgarClient::new("  "),
            Err(SankeyError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_provider_name() {
        let client = EdgarClient::new("Test Corp test@example.com").unwrap();
        assert_eq!(client.name(), "SEC EDGAR");
    }

    #[tokio::test]
    async fn test_rate_limiter_spacing() {
        let mut limiter = RateLimiter::new(Duration::from_millis(20));
        let start = Instant::now();
        limiter.wait().await;
        limiter.wait().await;
        assert!(start.elapsed() >= Duration::from_millis(20));
    }
}
