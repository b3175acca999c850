// ============================================================
// Layer 4 — CSV Record Loader
// ============================================================
// Loads the weather CSV either over HTTP or from a local file
// and turns every data row into a Record.
//
// Row handling:
//   - the first row is the header and names every column
//   - the label column (Apparent_Temperature by default) is
//     taken out of the row and stored as the record's label
//   - every other selected column becomes a feature entry,
//     in header order
//   - an empty feature cell leaves that feature absent from
//     the record (the vectorizer reports it later)
//   - an empty label cell or a non-numeric cell is a LoadError
//
// HTTP uses reqwest's blocking client: there is exactly one
// outstanding request and nothing else to do while it runs.
//
// Reference: csv crate documentation
//            Rust Book §9 (Error Handling)

use std::{fs, path::PathBuf};

use crate::domain::error::LoadError;
use crate::domain::record::Record;
use crate::domain::traits::RecordSource;

/// Published weather sheet (Temperature, Humidity, Apparent_Temperature, ...)
pub const DEFAULT_CSV_URL: &str = "https://docs.google.com/spreadsheets/d/e/2PACX-1vRm-d5gwpY6E-NYgp95ycNmQzPvQ8fAh5MgOI7Tn_Podim_OVBjn168oWAEQVSq2w/pub?gid=971307772&single=true&output=csv";

/// Column predicted by the model
pub const DEFAULT_LABEL: &str = "Apparent_Temperature";

/// Where the CSV text comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum CsvSource {
    Url(String),
    File(PathBuf),
}

impl CsvSource {
    /// `http://` and `https://` locations are fetched, anything else is a path.
    pub fn parse(location: &str) -> Self {
        if location.starts_with("http://") || location.starts_with("https://") {
            CsvSource::Url(location.to_string())
        } else {
            CsvSource::File(PathBuf::from(location))
        }
    }
}

/// Loads records from a CSV source.
/// Implements the RecordSource trait from Layer 3.
pub struct CsvLoader {
    source:  CsvSource,
    label:   String,
    /// Restrict features to these columns (None = every non-label column)
    columns: Option<Vec<String>>,
}

impl CsvLoader {
    pub fn new(source: CsvSource, label: impl Into<String>) -> Self {
        Self { source, label: label.into(), columns: None }
    }

    /// Only load the given feature columns. Other columns
    /// (dates, free-text summaries, ...) are ignored entirely.
    pub fn with_columns(mut self, columns: Vec<String>) -> Self {
        self.columns = Some(columns);
        self
    }

    fn fetch_text(&self) -> Result<String, LoadError> {
        match &self.source {
            CsvSource::Url(url) => fetch_url(url),
            CsvSource::File(path) => fs::read_to_string(path).map_err(|source| LoadError::Io {
                path: path.display().to_string(),
                source,
            }),
        }
    }
}

impl RecordSource for CsvLoader {
    fn load_all(&self) -> Result<Vec<Record>, LoadError> {
        tracing::info!("Fetching CSV from {:?}", self.source);
        let text    = self.fetch_text()?;
        let records = parse_records(&text, &self.label, self.columns.as_deref())?;
        tracing::info!("Loaded {} records", records.len());
        Ok(records)
    }
}

/// Single blocking GET; non-2xx responses are errors.
fn fetch_url(url: &str) -> Result<String, LoadError> {
    let http_err = |e: reqwest::Error| LoadError::Http {
        url:     url.to_string(),
        message: e.to_string(),
    };

    let client = reqwest::blocking::Client::builder()
        .user_agent(concat!("apparent-temp/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(http_err)?;

    let response = client
        .get(url)
        .send()
        .and_then(|r| r.error_for_status())
        .map_err(http_err)?;

    let body = response.text().map_err(http_err)?;
    tracing::debug!("Downloaded {} bytes from {}", body.len(), url);
    Ok(body)
}

/// Parse CSV text into records.
///
/// # Arguments
/// * `text`    - Full CSV text including the header row
/// * `label`   - Name of the label column
/// * `columns` - Optional feature column selection
pub fn parse_records(
    text:    &str,
    label:   &str,
    columns: Option<&[String]>,
) -> Result<Vec<Record>, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader.headers()?.iter().map(|h| h.to_string()).collect();

    let label_idx = headers
        .iter()
        .position(|h| h == label)
        .ok_or_else(|| LoadError::MissingColumn(label.to_string()))?;

    // (column index, column name) for every feature we keep
    let feature_cols: Vec<(usize, String)> = match columns {
        Some(selected) => {
            let mut picked = Vec::with_capacity(selected.len());
            for name in selected {
                let idx = headers
                    .iter()
                    .position(|h| h == name)
                    .ok_or_else(|| LoadError::MissingColumn(name.clone()))?;
                if idx != label_idx {
                    picked.push((idx, name.clone()));
                }
            }
            // Keep header order regardless of the order the caller listed them in
            picked.sort_by_key(|(idx, _)| *idx);
            picked
        }
        None => headers
            .iter()
            .enumerate()
            .filter(|(idx, _)| *idx != label_idx)
            .map(|(idx, name)| (idx, name.clone()))
            .collect(),
    };

    let mut records = Vec::new();

    for (row, result) in reader.records().enumerate() {
        let raw = result?;

        let label_cell = raw.get(label_idx).unwrap_or("");
        if label_cell.is_empty() {
            return Err(LoadError::MissingLabel { row, label: label.to_string() });
        }
        let label_value = parse_cell(label_cell, row, label)?;

        let mut features = Vec::with_capacity(feature_cols.len());
        for (idx, name) in &feature_cols {
            match raw.get(*idx) {
                Some(cell) if !cell.is_empty() => {
                    features.push((name.clone(), parse_cell(cell, row, name)?));
                }
                _ => tracing::debug!("Row {}: column '{}' is empty", row, name),
            }
        }

        records.push(Record::new(features, label_value));
    }

    Ok(records)
}

fn parse_cell(cell: &str, row: usize, column: &str) -> Result<f32, LoadError> {
    cell.parse::<f32>().map_err(|_| LoadError::NonNumeric {
        row,
        column: column.to_string(),
        value:  cell.to_string(),
    })
}
