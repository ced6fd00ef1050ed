//! Loading recorded lane counts for replay.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Error type for count loading operations.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("Failed to open {path}: {source}")]
    Open {
        path: String,
        source: std::io::Error,
    },

    #[error("Failed to parse CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Row {row}: '{value}' is not a number")]
    NotNumeric { row: usize, value: String },

    #[error("Row {row} has {actual} lanes, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        actual: usize,
    },

    #[error("No count rows found")]
    Empty,
}

/// Read count rows from a CSV or JSON file, picked by extension.
///
/// CSV files carry a header row and one column per lane. JSON files hold
/// either an array of arrays or an object with a `counts` array of arrays.
pub fn load_counts(path: &Path) -> Result<Vec<Vec<f64>>, LoadError> {
    let file = File::open(path).map_err(|source| LoadError::Open {
        path: path.display().to_string(),
        source,
    })?;
    let reader = BufReader::new(file);

    let is_json = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let rows = if is_json {
        parse_json(reader)?
    } else {
        parse_csv(reader)?
    };
    check_rows(rows)
}

fn parse_csv<R: Read>(reader: R) -> Result<Vec<Vec<f64>>, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let mut rows = Vec::new();
    for (i, record) in reader.records().enumerate() {
        let record = record?;
        let row = record
            .iter()
            .map(|value| {
                value.parse::<f64>().map_err(|_| LoadError::NotNumeric {
                    row: i + 1,
                    value: value.to_string(),
                })
            })
            .collect::<Result<Vec<f64>, LoadError>>()?;
        rows.push(row);
    }
    Ok(rows)
}

#[derive(serde::Deserialize)]
#[serde(untagged)]
enum JsonCounts {
    Rows(Vec<Vec<f64>>),
    Wrapped { counts: Vec<Vec<f64>> },
}

fn parse_json<R: Read>(reader: R) -> Result<Vec<Vec<f64>>, LoadError> {
    Ok(match serde_json::from_reader(reader)? {
        JsonCounts::Rows(rows) => rows,
        JsonCounts::Wrapped { counts } => counts,
    })
}

fn check_rows(rows: Vec<Vec<f64>>) -> Result<Vec<Vec<f64>>, LoadError> {
    let expected = rows.first().ok_or(LoadError::Empty)?.len();
    if let Some((i, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != expected) {
        return Err(LoadError::Ragged {
            row: i + 1,
            expected,
            actual: row.len(),
        });
    }
    Ok(rows)
}
