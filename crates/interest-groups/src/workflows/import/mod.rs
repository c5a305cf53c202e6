mod normalizer;
mod parser;

use crate::workflows::prioritization::CaseRecord;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum CaseImportError {
    #[error("failed to read case export: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid case CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("invalid case JSON data: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unsupported case export format for {}: expected .csv or .json", path.display())]
    UnsupportedFormat { path: PathBuf },
}

/// File formats the importer understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaseFormat {
    Csv,
    Json,
}

impl CaseFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?;
        if extension.eq_ignore_ascii_case("csv") {
            Some(Self::Csv)
        } else if extension.eq_ignore_ascii_case("json") {
            Some(Self::Json)
        } else {
            None
        }
    }
}

pub struct CaseImporter;

impl CaseImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<CaseRecord>, CaseImportError> {
        let path = path.as_ref();
        let format =
            CaseFormat::from_path(path).ok_or_else(|| CaseImportError::UnsupportedFormat {
                path: path.to_path_buf(),
            })?;
        let file = BufReader::new(File::open(path)?);

        match format {
            CaseFormat::Csv => Self::from_csv_reader(file),
            CaseFormat::Json => Self::from_json_reader(file),
        }
    }

    /// Reads one case per row; the header row names the fields.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Vec<CaseRecord>, CaseImportError> {
        Ok(parser::parse_csv_records(reader)?)
    }

    /// Reads a JSON array of case objects, or an object wrapping that array under `cases`.
    pub fn from_json_reader<R: Read>(reader: R) -> Result<Vec<CaseRecord>, CaseImportError> {
        Ok(parser::parse_json_records(reader)?)
    }
}
