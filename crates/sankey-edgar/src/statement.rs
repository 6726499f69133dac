//! Income statement assembly from the nine concept tables.

use std::collections::BTreeSet;

use polars::prelude::*;
use sankey_core::{Line, PeriodType, Result, SankeyError, StatementRow};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::concept::ConceptFetcher;

/// What to do with periods reported for only some of the nine concepts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MissingPeriodPolicy {
    /// Exclude them from the statement and log the excluded frames.
    #[default]
    Drop,
    /// Fail with [`SankeyError::IncompletePeriods`].
    Strict,
}

/// Fetches every line and joins them into an [`IncomeStatement`].
#[derive(Debug, Clone)]
pub struct StatementAssembler {
    fetcher: ConceptFetcher,
    policy: MissingPeriodPolicy,
}

impl StatementAssembler {
    /// Create an assembler with the default [`MissingPeriodPolicy::Drop`].
    #[must_use]
    pub fn new(fetcher: ConceptFetcher) -> Self {
        Self {
            fetcher,
            policy: MissingPeriodPolicy::default(),
        }
    }

    /// Set the missing-period policy.
    #[must_use]
    pub const fn with_policy(mut self, policy: MissingPeriodPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Fetch the nine concepts in order and join them.
    pub async fn assemble(&self) -> Result<IncomeStatement> {
        let mut tables = Vec::with_capacity(Line::ALL.len());
        for line in Line::ALL {
            tables.push((line, self.fetcher.fetch(line).await?));
        }

        let statement = join_concepts(tables, self.policy)?;
        info!(
            cik = %self.fetcher.cik(),
            periods = statement.height(),
            "Assembled income statement"
        );
        Ok(statement)
    }
}

/// Inner-join concept tables on every non-value column.
///
/// The join keys are the first table's columns minus its value column, so only
/// observations present in every table survive. Rows without a `frame` are
/// removed afterwards.
pub fn join_concepts(
    tables: Vec<(Line, DataFrame)>,
    policy: MissingPeriodPolicy,
) -> Result<IncomeStatement> {
    let Some((first_line, first)) = tables.first() else {
        return Err(SankeyError::InvalidParameter(
            "at least one concept table is required".to_string(),
        ));
    };

    let keys: Vec<Expr> = first
        .get_column_names()
        .into_iter()
        .filter(|name| name.as_str() != first_line.label())
        .map(|name| col(name.clone()))
        .collect();

    let mut reported = BTreeSet::new();
    for (_, table) in &tables {
        reported.extend(frame_set(table)?);
    }

    let joined = tables
        .into_iter()
        .map(|(_, table)| table.lazy())
        .reduce(|left, right| {
            left.join(
                right,
                keys.as_slice(),
                keys.as_slice(),
                JoinArgs::new(JoinType::Inner),
            )
        })
        .ok_or_else(|| SankeyError::Other("no tables to join".to_string()))?
        .filter(col("frame").is_not_null())
        .collect()
        .map_err(|e| SankeyError::Other(e.to_string()))?;

    let kept = frame_set(&joined)?;
    let dropped: Vec<String> = reported.difference(&kept).cloned().collect();
    if !dropped.is_empty() {
        match policy {
            MissingPeriodPolicy::Drop => {
                warn!(frames = ?dropped, "Dropping periods missing at least one concept");
            }
            MissingPeriodPolicy::Strict => return Err(SankeyError::IncompletePeriods(dropped)),
        }
    }

    debug!(rows = joined.height(), "Joined concept tables");
    Ok(IncomeStatement { table: joined })
}

/// Distinct non-null frames of a table.
fn frame_set(table: &DataFrame) -> Result<BTreeSet<String>> {
    let frames = table
        .column("frame")
        .and_then(|c| c.str().cloned())
        .map_err(|e| SankeyError::Other(e.to_string()))?;

    Ok(frames.into_iter().flatten().map(str::to_string).collect())
}

/// Joined statement table: one row per reporting frame with every line present.
///
/// Built once and read-only afterwards.
#[derive(Debug, Clone)]
pub struct IncomeStatement {
    table: DataFrame,
}

impl IncomeStatement {
    /// The underlying table (metadata columns plus one column per line label).
    #[must_use]
    pub const fn table(&self) -> &DataFrame {
        &self.table
    }

    /// Number of periods.
    #[must_use]
    pub fn height(&self) -> usize {
        self.table.height()
    }

    /// Reporting frames present, sorted.
    pub fn frames(&self) -> Result<Vec<String>> {
        Ok(frame_set(&self.table)?.into_iter().collect())
    }

    /// Row for the annual frame of `year`, see [`PeriodType::frame`].
    pub fn row_for_year(&self, year: i32) -> Result<StatementRow> {
        self.row_for_frame(&PeriodType::Annual.frame(year))
    }

    /// Row for an explicit frame identifier.
    pub fn row_for_frame(&self, frame: &str) -> Result<StatementRow> {
        let selected = self
            .table
            .clone()
            .lazy()
            .filter(col("frame").eq(lit(frame)))
            .collect()
            .map_err(|e| SankeyError::Other(e.to_string()))?;

        match selected.height() {
            0 => return Err(SankeyError::PeriodNotFound(frame.to_string())),
            1 => {}
            n => warn!(frame, rows = n, "Multiple statement rows for frame; using the first"),
        }

        let mut values = [0_i64; 9];
        for line in Line::ALL {
            values[line.index()] = selected
                .column(line.label())
                .and_then(|c| c.i64().map(|ca| ca.get(0)))
                .map_err(|e| SankeyError::Other(e.to_string()))?
                .ok_or_else(|| {
                    SankeyError::Parse(format!("{} is null for {}", line.label(), frame))
                })?;
        }

        Ok(StatementRow::new(frame.to_string(), values))
    }
}
