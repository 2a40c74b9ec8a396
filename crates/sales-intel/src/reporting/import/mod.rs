mod parser;

use crate::reporting::sales::domain::RawLead;
use std::io::Read;
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum LeadImportError {
    #[error("failed to read lead export: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid lead CSV data: {0}")]
    Csv(#[from] csv::Error),
}

/// Reads a CSV export of the lead tracker into [`RawLead`] rows.
///
/// The importer only shapes the data; it never drops or fixes rows. All
/// reconciliation of the noisy fields happens in the metrics engine.
pub struct LeadCsvImporter;

impl LeadCsvImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<RawLead>, LeadImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<RawLead>, LeadImportError> {
        Ok(parser::parse_rows(reader)?)
    }
}
