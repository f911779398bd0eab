//! Conversion service
//!
//! XML bytes in, xlsx bytes out. Shared by the HTTP upload handler and the
//! offline `convert` command.

use std::time::Instant;

use tracing::{debug, info};

use crate::errors::{FlattenerError, Result};
use crate::export::write_workbook;
use crate::flatten::{OutputRow, flatten, parse_visits_bytes};

/// Result of a single conversion
#[derive(Debug, Clone)]
pub struct Conversion {
    /// Number of visits found in the document
    pub visits: usize,
    /// Flattened rows, in (visit, action) order
    pub rows: Vec<OutputRow>,
    /// Serialized xlsx workbook
    pub workbook: Vec<u8>,
}

impl Conversion {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

#[derive(Debug, Clone, Default)]
pub struct ConvertService;

impl ConvertService {
    pub fn new() -> Self {
        Self
    }

    /// Parse, flatten and serialize one uploaded document
    pub fn convert(&self, input: &[u8]) -> Result<Conversion> {
        if input.is_empty() {
            return Err(FlattenerError::xml_file_missing("Uploaded XML file is empty"));
        }

        let started = Instant::now();

        let visits = parse_visits_bytes(input)?;
        let rows = flatten(&visits);
        let workbook = write_workbook(&rows)?;

        info!(
            "Converted {} visits into {} rows ({} input bytes)",
            visits.len(),
            rows.len(),
            input.len()
        );
        debug!("Conversion took {:?}", started.elapsed());

        Ok(Conversion {
            visits: visits.len(),
            rows,
            workbook,
        })
    }
}
