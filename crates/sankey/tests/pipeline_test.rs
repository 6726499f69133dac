//! End-to-end tests from canned concept responses to exported figures.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use sankey::{
    Cik, CompanyConcept, ConceptProvider, FinancialSankey, Line, MissingPeriodPolicy, Observation,
    Result, SankeyConfig, SankeyError, SaveAs,
};

/// Apple's reported values (USD) for fiscal 2021 and 2022.
const REPORTED: [(i32, [i64; 9]); 2] = [
    (
        2021,
        [
            365_817_000_000,
            212_981_000_000,
            152_836_000_000,
            43_887_000_000,
            108_949_000_000,
            258_000_000,
            109_207_000_000,
            14_527_000_000,
            94_680_000_000,
        ],
    ),
    (
        2022,
        [
            394_328_000_000,
            223_546_000_000,
            170_782_000_000,
            51_345_000_000,
            119_437_000_000,
            -334_000_000,
            119_103_000_000,
            19_300_000_000,
            99_803_000_000,
        ],
    ),
];

#[derive(Debug, Default)]
struct FilingsProvider {
    skip: Vec<(Line, i32)>,
}

#[async_trait]
impl ConceptProvider for FilingsProvider {
    fn name(&self) -> &str {
        "filings"
    }

    async fn company_concept(&self, cik: &Cik, taxonomy: &str, tag: &str) -> Result<CompanyConcept> {
        let line = Line::from_tag(tag).ok_or_else(|| SankeyError::ConceptNotFound {
            cik: cik.padded(),
            taxonomy: taxonomy.to_string(),
            tag: tag.to_string(),
        })?;

        let observations = REPORTED
            .iter()
            .filter(|(year, _)| !self.skip.contains(&(line, *year)))
            .map(|(year, values)| Observation {
                start: Some(format!("{}-09-26", year - 1)),
                end: format!("{year}-09-24"),
                val: serde_json::json!(values[line.index()]),
                accn: Some(format!("0000320193-{}-000108", year % 100)),
                fy: Some(*year),
                fp: Some("FY".to_string()),
                form: "10-K".to_string(),
                filed: Some(format!("{year}-10-28")),
                frame: Some(format!("CY{year}")),
            })
            .collect();

        Ok(CompanyConcept {
            cik: 320_193,
            taxonomy: taxonomy.to_string(),
            tag: tag.to_string(),
            entity_name: Some("Apple Inc.".to_string()),
            label: None,
            units: HashMap::from([("USD".to_string(), observations)]),
        })
    }
}

fn config() -> SankeyConfig {
    SankeyConfig::builder()
        .organization("Example Corp")
        .email("admin@example.com")
        .cik("320193")
        .ticker("AAPL")
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_prepare_builds_statement_figure() {
    let sankey = FinancialSankey::with_provider(Arc::new(FilingsProvider::default()), config())
        .await
        .unwrap();
    assert_eq!(sankey.frames().unwrap(), vec!["CY2021", "CY2022"]);

    let figure = sankey.prepare(2022).unwrap();
    assert_eq!(figure.year(), 2022);
    assert_eq!(figure.data().revenue, 394_328);
    assert_eq!(
        figure.node_text(Line::NetIncome),
        "Net Income<br>$99,803M<br>Margin: 25%"
    );
    assert_eq!(figure.node_text(Line::Tax), "Tax<br>$19,300M<br>Tax rate: 5%");

    let targets: Vec<usize> = figure.data().links.iter().map(|l| l.target).collect();
    assert_eq!(targets, vec![1, 2, 3, 4, 6, 6, 7, 8]);
}

#[tokio::test]
async fn test_prepare_is_idempotent() {
    let sankey = FinancialSankey::with_provider(Arc::new(FilingsProvider::default()), config())
        .await
        .unwrap();

    let first = sankey.prepare(2021).unwrap();
    let second = sankey.prepare(2021).unwrap();
    assert_eq!(first.data(), second.data());
    assert_eq!(first.to_json(), second.to_json());
}

#[tokio::test]
async fn test_unreported_year() {
    let sankey = FinancialSankey::with_provider(Arc::new(FilingsProvider::default()), config())
        .await
        .unwrap();

    assert!(matches!(
        sankey.prepare(2015),
        Err(SankeyError::PeriodNotFound(frame)) if frame == "CY2015"
    ));
}

#[tokio::test]
async fn test_partial_period_policy() {
    let provider = || {
        Arc::new(FilingsProvider {
            skip: vec![(Line::OperatingExpense, 2021)],
        })
    };

    let lenient = FinancialSankey::with_provider(provider(), config()).await.unwrap();
    assert_eq!(lenient.frames().unwrap(), vec!["CY2022"]);

    let strict_config = SankeyConfig::builder()
        .organization("Example Corp")
        .email("admin@example.com")
        .cik("320193")
        .ticker("AAPL")
        .missing_periods(MissingPeriodPolicy::Strict)
        .build()
        .unwrap();
    assert!(matches!(
        FinancialSankey::with_provider(provider(), strict_config).await,
        Err(SankeyError::IncompletePeriods(frames)) if frames == ["CY2021"]
    ));
}

#[tokio::test]
async fn test_html_export_file_name() {
    let sankey = FinancialSankey::with_provider(Arc::new(FilingsProvider::default()), config())
        .await
        .unwrap();
    let dir = tempfile::tempdir().unwrap();

    let written = sankey
        .prepare(2022)
        .unwrap()
        .show(SaveAs::Html, Some(dir.path()))
        .unwrap();

    assert_eq!(written, Some(dir.path().join("AAPL2022.html")));
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
}
