//! Provider trait for fetching company concepts.
//!
//! [`ConceptProvider`] is the seam between the statement assembler and the filings
//! API. The EDGAR client implements it; tests substitute canned responses.

use async_trait::async_trait;
use std::fmt::Debug;

use crate::{
    error::Result,
    types::{Cik, CompanyConcept},
};

/// Source of per-concept observation series for a company.
#[async_trait]
pub trait ConceptProvider: Send + Sync + Debug {
    /// Returns the name of this provider (e.g., "SEC EDGAR").
    fn name(&self) -> &str;

    /// Fetches every reported observation of one concept for a company.
    ///
    /// # Arguments
    ///
    /// * `cik` - The company's Central Index Key
    /// * `taxonomy` - Taxonomy name (e.g., "us-gaap")
    /// * `tag` - Concept tag (e.g., "NetIncomeLoss")
    async fn company_concept(&self, cik: &Cik, taxonomy: &str, tag: &str)
    -> Result<CompanyConcept>;
}
