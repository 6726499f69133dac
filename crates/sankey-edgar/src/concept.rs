//! Per-concept observation tables.

use std::sync::Arc;

use polars::prelude::*;
use sankey_core::{
    Cik, CompanyConcept, ConceptProvider, Line, Observation, Result, SankeyError, Scale,
};
use tracing::debug;

/// Unit whose observations are kept.
pub const VALUE_UNIT: &str = "USD";

/// Observation metadata columns shared by every concept table, in column order.
pub const METADATA_COLUMNS: [&str; 8] = [
    "start", "end", "accn", "fy", "fp", "form", "filed", "frame",
];

/// Fetches single concepts and shapes them into tables.
///
/// Every table has the [`METADATA_COLUMNS`] followed by one `Int64` column named
/// after the line's label holding the scaled value.
#[derive(Debug, Clone)]
pub struct ConceptFetcher {
    provider: Arc<dyn ConceptProvider>,
    cik: Cik,
    taxonomy: String,
    forms: Vec<String>,
    scale: Scale,
}

impl ConceptFetcher {
    /// Create a fetcher for one company.
    ///
    /// # Arguments
    /// * `provider` - Source of concept observations
    /// * `cik` - Company CIK
    /// * `taxonomy` - Taxonomy name (e.g., "us-gaap")
    /// * `forms` - Filing forms to keep (e.g., `["10-K", "10-K/A"]`)
    /// * `scale` - Divisor applied to every value
    pub fn new<S: AsRef<str>>(
        provider: Arc<dyn ConceptProvider>,
        cik: Cik,
        taxonomy: impl Into<String>,
        forms: &[S],
        scale: Scale,
    ) -> Self {
        Self {
            provider,
            cik,
            taxonomy: taxonomy.into(),
            forms: forms.iter().map(|f| f.as_ref().to_string()).collect(),
            scale,
        }
    }

    /// Company CIK.
    #[must_use]
    pub const fn cik(&self) -> &Cik {
        &self.cik
    }

    /// Scale applied to values.
    #[must_use]
    pub const fn scale(&self) -> Scale {
        self.scale
    }

    /// Fetch one line's concept and return its table.
    pub async fn fetch(&self, line: Line) -> Result<DataFrame> {
        let concept = self
            .provider
            .company_concept(&self.cik, &self.taxonomy, line.tag())
            .await?;

        let table = concept_table(&concept, line, &self.forms, self.scale)?;
        debug!(
            provider = self.provider.name(),
            tag = line.tag(),
            rows = table.height(),
            "Fetched concept"
        );
        Ok(table)
    }
}

/// Shape a concept response into a table of scaled observations.
///
/// Keeps `USD` observations whose form is in `forms`, divides each value by the
/// scale divisor and truncates it toward zero.
pub fn concept_table<S: AsRef<str>>(
    concept: &CompanyConcept,
    line: Line,
    forms: &[S],
    scale: Scale,
) -> Result<DataFrame> {
    let observations = concept
        .units
        .get(VALUE_UNIT)
        .ok_or_else(|| SankeyError::MissingUnit {
            tag: concept.tag.clone(),
            unit: VALUE_UNIT.to_string(),
        })?;

    let kept: Vec<&Observation> = observations
        .iter()
        .filter(|obs| forms.iter().any(|form| form.as_ref() == obs.form))
        .collect();

    let values = kept
        .iter()
        .map(|obs| obs.numeric_value().map(|v| scale.apply(v)))
        .collect::<Result<Vec<i64>>>()?;

    DataFrame::new(vec![
        Column::new("start".into(), kept.iter().map(|o| o.start.clone()).collect::<Vec<_>>()),
        Column::new("end".into(), kept.iter().map(|o| o.end.clone()).collect::<Vec<_>>()),
        Column::new("accn".into(), kept.iter().map(|o| o.accn.clone()).collect::<Vec<_>>()),
        Column::new("fy".into(), kept.iter().map(|o| o.fy).collect::<Vec<_>>()),
        Column::new("fp".into(), kept.iter().map(|o| o.fp.clone()).collect::<Vec<_>>()),
        Column::new("form".into(), kept.iter().map(|o| o.form.clone()).collect::<Vec<_>>()),
        Column::new("filed".into(), kept.iter().map(|o| o.filed.clone()).collect::<Vec<_>>()),
        Column::new("frame".into(), kept.iter().map(|o| o.frame.clone()).collect::<Vec<_>>()),
        Column::new(line.label().into(), values),
    ])
    .map_err(|e| SankeyError::Other(e.to_string()))
}
