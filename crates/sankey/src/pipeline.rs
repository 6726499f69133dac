//! End-to-end pipeline: fetch and assemble once, then render any reported year.

use std::sync::Arc;

use sankey_chart::{FigureRenderer, SankeyDataBuilder, SankeyFigure};
use sankey_core::{ConceptProvider, Result, StatementRow};
use sankey_edgar::{ConceptFetcher, EdgarClient, IncomeStatement, StatementAssembler};
use tracing::{debug, info};

use crate::config::SankeyConfig;

/// One company's income statement, ready to be drawn for any reported year.
///
/// The statement is fetched and joined once at construction; [`prepare`](Self::prepare)
/// only reads it.
///
/// # Example
///
/// ```no_run
/// use sankey::{FinancialSankey, SankeyConfig, SaveAs};
///
/// #[tokio::main]
/// async fn main() -> sankey::Result<()> {
///     let config = SankeyConfig::builder()
///         .organization("Example Corp")
///         .email("admin@example.com")
///         .cik("320193")
///         .ticker("AAPL")
///         .build()?;
///
///     let sankey = FinancialSankey::connect(config).await?;
///     sankey.prepare(2022)?.show(SaveAs::Html, None)?;
///     Ok(())
/// }
/// ```
#[derive(Debug)]
pub struct FinancialSankey {
    config: SankeyConfig,
    statement: IncomeStatement,
    builder: SankeyDataBuilder,
    renderer: FigureRenderer,
}

impl FinancialSankey {
    /// Fetch the statement from SEC EDGAR.
    pub async fn connect(config: SankeyConfig) -> Result<Self> {
        let client = EdgarClient::new(&config.user_agent())?;
        Self::with_provider(Arc::new(client), config).await
    }

    /// Fetch the statement from any concept provider.
    pub async fn with_provider(
        provider: Arc<dyn ConceptProvider>,
        config: SankeyConfig,
    ) -> Result<Self> {
        debug!(provider = provider.name(), cik = %config.cik(), "Assembling statement");
        let fetcher = ConceptFetcher::new(
            provider,
            config.cik().clone(),
            config.taxonomy(),
            config.period().form_types()?,
            config.scale(),
        );
        let statement = StatementAssembler::new(fetcher)
            .with_policy(config.missing_periods())
            .assemble()
            .await?;

        Ok(Self {
            builder: SankeyDataBuilder::new(config.scale()),
            renderer: FigureRenderer::new(config.ticker().clone()),
            config,
            statement,
        })
    }

    /// Settings in use.
    #[must_use]
    pub const fn config(&self) -> &SankeyConfig {
        &self.config
    }

    /// The joined statement.
    #[must_use]
    pub const fn statement(&self) -> &IncomeStatement {
        &self.statement
    }

    /// Reporting frames available to [`prepare`](Self::prepare).
    pub fn frames(&self) -> Result<Vec<String>> {
        self.statement.frames()
    }

    /// Statement values for one year.
    pub fn row(&self, year: i32) -> Result<StatementRow> {
        self.statement.row_for_frame(&self.config.period().frame(year))
    }

    /// Build the diagram for one year.
    pub fn prepare(&self, year: i32) -> Result<SankeyFigure> {
        let row = self.row(year)?;
        let data = self.builder.build(&row)?;
        info!(ticker = %self.config.ticker(), year, revenue = data.revenue, "Prepared figure");
        Ok(self.renderer.render(year, data))
    }
}
