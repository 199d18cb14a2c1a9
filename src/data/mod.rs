pub mod csv_types;

use std::fs::File;
use std::path::Path;

use tracing::debug;

use crate::error::{Result, VolChartError};

pub use csv_types::{OptionCsvRow, REQUIRED_COLUMNS, VolatilityCsvRow};

/// Volatility measurements in file order, stored column by column.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VolatilityDataset {
    created_at: Vec<String>,
    implied: Vec<f64>,
    under: Vec<f64>,
}

impl VolatilityDataset {
    pub fn from_rows(rows: impl IntoIterator<Item = VolatilityCsvRow>) -> Self {
        let mut dataset = Self::default();
        for row in rows {
            dataset.created_at.push(row.created_at);
            dataset.implied.push(row.implied_volatility);
            dataset.under.push(row.under_volatility);
        }
        dataset
    }

    pub fn len(&self) -> usize {
        self.created_at.len()
    }

    pub fn is_empty(&self) -> bool {
        self.created_at.is_empty()
    }

    pub fn created_at(&self) -> &[String] {
        &self.created_at
    }

    pub fn implied(&self) -> &[f64] {
        &self.implied
    }

    pub fn under(&self) -> &[f64] {
        &self.under
    }

    /// `Implied volatility - Under volatility`, row by row.
    pub fn difference(&self) -> Vec<f64> {
        self.implied
            .iter()
            .zip(&self.under)
            .map(|(implied, under)| implied - under)
            .collect()
    }
}

/// Load the volatility CSV at `path`.
///
/// The header must name every column in [`REQUIRED_COLUMNS`]; this is checked
/// before any row is read so a header-only file without them still fails.
pub fn load_dataset(path: &Path) -> Result<VolatilityDataset> {
    let file = File::open(path).map_err(|source| VolChartError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let mut rdr = csv::Reader::from_reader(file);

    let headers = rdr
        .headers()
        .map_err(|e| VolChartError::csv(path, e))?
        .clone();
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(VolChartError::MissingColumn {
                path: path.to_path_buf(),
                column: column.to_string(),
            });
        }
    }

    let rows: Vec<VolatilityCsvRow> = rdr
        .deserialize()
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| VolChartError::csv(path, e))?;
    debug!(path = %path.display(), rows = rows.len(), "loaded volatility dataset");

    Ok(VolatilityDataset::from_rows(rows))
}

/// Write `rows` to `path` as a headed CSV file, replacing any existing file.
pub fn write_csv<T: serde::Serialize>(path: &Path, rows: &[T]) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path).map_err(|e| VolChartError::csv(path, e))?;
    for row in rows {
        wtr.serialize(row).map_err(|e| VolChartError::csv(path, e))?;
    }
    wtr.flush()?;
    Ok(())
}
