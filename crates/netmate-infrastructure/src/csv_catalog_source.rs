//! CSV-backed troubleshooting catalog.
//!
//! Expected header (extra columns are ignored):
//!
//! ```text
//! Issue,Symptoms,Possible_Causes,Solution_1,Solution_2,Solution_3,Solution_4
//! ```

use netmate_core::catalog::{Catalog, CatalogSource, IssueRecord};
use netmate_core::error::{NetmateError, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const REQUIRED_COLUMNS: [&str; 7] = [
    "Issue",
    "Symptoms",
    "Possible_Causes",
    "Solution_1",
    "Solution_2",
    "Solution_3",
    "Solution_4",
];

#[derive(Debug, Deserialize)]
struct CatalogRow {
    #[serde(rename = "Issue")]
    issue: String,
    #[serde(rename = "Symptoms")]
    symptoms: String,
    #[serde(rename = "Possible_Causes")]
    possible_causes: String,
    #[serde(rename = "Solution_1")]
    solution_1: String,
    #[serde(rename = "Solution_2")]
    solution_2: String,
    #[serde(rename = "Solution_3")]
    solution_3: String,
    #[serde(rename = "Solution_4")]
    solution_4: String,
}

impl From<CatalogRow> for IssueRecord {
    fn from(row: CatalogRow) -> Self {
        IssueRecord {
            issue: row.issue,
            symptoms: row.symptoms,
            possible_causes: row.possible_causes,
            solutions: [row.solution_1, row.solution_2, row.solution_3, row.solution_4],
        }
    }
}

/// Reads the catalog from a CSV file on every [`CatalogSource::load`].
///
/// Wrap it in a [`CatalogCache`](crate::CatalogCache) to read only once.
#[derive(Debug, Clone)]
pub struct CsvCatalogSource {
    path: PathBuf,
}

impl CsvCatalogSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parses catalog CSV from any reader.
    pub fn parse<R: std::io::Read>(reader: R) -> Result<Catalog> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = reader
            .headers()
            .map_err(|e| NetmateError::catalog_load(format!("Failed to read header: {e}")))?
            .clone();
        if let Some(missing) = REQUIRED_COLUMNS
            .iter()
            .find(|col| !headers.iter().any(|h| h == **col))
        {
            return Err(NetmateError::catalog_load(format!(
                "Missing required column '{missing}'"
            )));
        }

        let records = reader
            .deserialize::<CatalogRow>()
            .enumerate()
            .map(|(idx, row)| {
                row.map(IssueRecord::from).map_err(|e| {
                    // +2: one for the header, one for 1-based numbering
                    NetmateError::catalog_load(format!("Malformed row {}: {e}", idx + 2))
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Catalog::new(records))
    }
}

impl CatalogSource for CsvCatalogSource {
    fn load(&self) -> Result<Catalog> {
        let file = std::fs::File::open(&self.path).map_err(|e| {
            NetmateError::catalog_load(format!("Cannot open {}: {e}", self.path.display()))
        })?;
        let catalog = Self::parse(file)?;
        tracing::info!(
            "Loaded {} catalog records from {}",
            catalog.len(),
            self.path.display()
        );
        Ok(catalog)
    }
}
