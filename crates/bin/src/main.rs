//! fin-sankey CLI binary.
//!
//! Fetches a company's income statement from SEC EDGAR and draws one year of it
//! as a Sankey diagram.

use std::path::PathBuf;

use anyhow::Context;
use chrono::{Datelike, Utc};
use clap::{Parser, ValueEnum};
use sankey::{FinancialSankey, MissingPeriodPolicy, SankeyConfig, SaveAs, Scale};
use tracing::info;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "warn,sankey=info,sankey_edgar=info,sankey_chart=info";

#[derive(Debug, Parser)]
#[command(name = "fin-sankey")]
#[command(about = "Income statement Sankey diagrams from SEC EDGAR", long_about = None)]
#[command(version)]
struct Cli {
    /// Organization name sent in the EDGAR user agent
    #[arg(long)]
    name: String,

    /// Contact email sent in the EDGAR user agent
    #[arg(long)]
    email: String,

    /// Company CIK (e.g. 320193)
    #[arg(long)]
    cik: String,

    /// Ticker used in the title and file name
    #[arg(long)]
    ticker: String,

    /// XBRL taxonomy
    #[arg(long, default_value = sankey::DEFAULT_TAXONOMY)]
    taxonomy: String,

    /// Calendar year to draw (defaults to last year)
    #[arg(long)]
    year: Option<i32>,

    /// Value scale
    #[arg(long, value_enum, default_value_t = ScaleArg::Millions)]
    scale: ScaleArg,

    /// Write `html` or `png` instead of opening a browser
    #[arg(long)]
    save_as: Option<SaveAs>,

    /// Output directory (defaults to the current directory)
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// Fail if any period is missing a concept instead of skipping it
    #[arg(long)]
    strict_periods: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum ScaleArg {
    Millions,
    Thousands,
}

impl From<ScaleArg> for Scale {
    fn from(arg: ScaleArg) -> Self {
        match arg {
            ScaleArg::Millions => Self::Millions,
            ScaleArg::Thousands => Self::Thousands,
        }
    }
}

impl Cli {
    fn config(&self) -> sankey::Result<SankeyConfig> {
        let policy = if self.strict_periods {
            MissingPeriodPolicy::Strict
        } else {
            MissingPeriodPolicy::Drop
        };
        SankeyConfig::builder()
            .organization(&self.name)
            .email(&self.email)
            .cik(&self.cik)
            .ticker(&self.ticker)
            .taxonomy(&self.taxonomy)
            .scale(self.scale.into())
            .missing_periods(policy)
            .build()
    }

    fn year(&self) -> i32 {
        self.year.unwrap_or_else(|| Utc::now().year() - 1)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    let cli = Cli::parse();
    let year = cli.year();
    let config = cli.config().context("invalid settings")?;

    let sankey = FinancialSankey::connect(config)
        .await
        .with_context(|| format!("failed to assemble the statement for CIK {}", cli.cik))?;
    let figure = sankey
        .prepare(year)
        .with_context(|| format!("failed to prepare {} {year}", cli.ticker))?;

    let save_as = cli.save_as.unwrap_or_default();
    match figure.show(save_as, cli.out_dir.as_deref())? {
        Some(path) => println!("{}", path.display()),
        None => info!(year, "Opened figure in browser"),
    }
    Ok(())
}
