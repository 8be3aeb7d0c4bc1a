//! Loading a dataset from a CSV file or URL.

use std::fmt;
use std::io::{Cursor, Read};
use std::path::PathBuf;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{ColumnType, Dataset, Scalar, Schema};
use crate::error::LoadError;

/// Where a dataset comes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    Path(PathBuf),
    Url(String),
}

impl DataSource {
    fn is_url(s: &str) -> bool {
        s.starts_with("http://") || s.starts_with("https://")
    }

    fn fetch(&self) -> Result<Vec<u8>, LoadError> {
        match self {
            DataSource::Path(path) => std::fs::read(path).map_err(|source| LoadError::Io {
                path: path.display().to_string(),
                source,
            }),
            DataSource::Url(url) => {
                let fetch_err = |source| LoadError::Fetch {
                    url: url.clone(),
                    source,
                };
                let response = reqwest::blocking::get(url)
                    .and_then(reqwest::blocking::Response::error_for_status)
                    .map_err(fetch_err)?;
                let bytes = response.bytes().map_err(fetch_err)?;
                Ok(bytes.to_vec())
            }
        }
    }
}

impl FromStr for DataSource {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if Self::is_url(s) {
            Ok(DataSource::Url(s.to_string()))
        } else {
            Ok(DataSource::Path(PathBuf::from(s)))
        }
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::Path(path) => write!(f, "{}", path.display()),
            DataSource::Url(url) => f.write_str(url),
        }
    }
}

/// Load `source` and check it against `schema`.
///
/// This is the only blocking operation in the crate and runs once, before
/// any reactive graph is live.
pub fn load(source: &DataSource, schema: &Schema) -> Result<Dataset, LoadError> {
    let bytes = source.fetch()?;
    debug!(%source, bytes = bytes.len(), "fetched dataset");
    let dataset = read_csv(Cursor::new(bytes), schema)?;
    info!(%source, rows = dataset.len(), columns = schema.len(), "dataset loaded");
    Ok(dataset)
}

/// Parse headed CSV from any reader.
///
/// Every schema column must appear in the header; other columns are
/// ignored. Records must all have the header's width.
pub fn read_csv<R: Read>(reader: R, schema: &Schema) -> Result<Dataset, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader.headers()?.clone();
    let positions = schema
        .columns()
        .iter()
        .map(|spec| {
            headers
                .iter()
                .position(|h| h == spec.name)
                .ok_or_else(|| LoadError::MissingColumn {
                    column: spec.name.clone(),
                })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut columns: IndexMap<String, Vec<Scalar>> = schema
        .columns()
        .iter()
        .map(|c| (c.name.clone(), Vec::new()))
        .collect();
    let mut len = 0;

    for (row, record) in reader.records().enumerate() {
        let record = record?;
        for (spec, &position) in schema.columns().iter().zip(&positions) {
            let raw = record.get(position).unwrap_or_default();
            let value = match spec.ty {
                ColumnType::Number => raw
                    .parse::<f64>()
                    .map(Scalar::Number)
                    .map_err(|_| LoadError::TypeMismatch {
                        row,
                        column: spec.name.clone(),
                        value: raw.to_string(),
                    })?,
                ColumnType::Category => Scalar::Text(raw.to_string()),
            };
            if let Some(column) = columns.get_mut(&spec.name) {
                column.push(value);
            }
        }
        len += 1;
    }

    Ok(Dataset::from_columns(schema.clone(), columns, len))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn launch_schema() -> Schema {
        Schema::new().category("Launch Site").number("class")
    }

    #[test]
    fn reads_selected_columns_and_ignores_extras() {
        let csv = "Flight Number,Launch Site,class\n1,CCAFS LC-40,0\n2,KSC LC-39A,1\n";
        let dataset = read_csv(csv.as_bytes(), &launch_schema()).unwrap();
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.column("class").unwrap(), &[Scalar::from(0.0), Scalar::from(1.0)]);
        assert!(dataset.column("Flight Number").is_err());
    }

    #[test]
    fn missing_header_fails() {
        let csv = "Launch Site\nCCAFS LC-40\n";
        let err = read_csv(csv.as_bytes(), &launch_schema()).unwrap_err();
        assert!(matches!(err, LoadError::MissingColumn { ref column } if column == "class"));
    }

    #[test]
    fn unparseable_number_fails() {
        let csv = "Launch Site,class\nCCAFS LC-40,yes\n";
        let err = read_csv(csv.as_bytes(), &launch_schema()).unwrap_err();
        assert!(matches!(err, LoadError::TypeMismatch { row: 0, .. }));
    }

    #[test]
    fn ragged_record_fails() {
        let csv = "Launch Site,class\nCCAFS LC-40,1,extra\n";
        let err = read_csv(csv.as_bytes(), &launch_schema()).unwrap_err();
        assert!(matches!(err, LoadError::Csv(_)));
    }

    #[test]
    fn loads_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "Launch Site,class").unwrap();
        writeln!(file, "VAFB SLC-4E,1").unwrap();
        let source = DataSource::Path(file.path().to_path_buf());
        let dataset = load(&source, &launch_schema()).unwrap();
        assert_eq!(dataset.len(), 1);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let source = DataSource::Path(PathBuf::from("/definitely/not/here.csv"));
        assert!(matches!(load(&source, &launch_schema()), Err(LoadError::Io { .. })));
    }

    #[test]
    fn source_parses_urls_and_paths() {
        assert_eq!(
            "https://example.com/data.csv".parse::<DataSource>().unwrap(),
            DataSource::Url("https://example.com/data.csv".into())
        );
        assert_eq!(
            "data/launches.csv".parse::<DataSource>().unwrap(),
            DataSource::Path(PathBuf::from("data/launches.csv"))
        );
    }
}
