use std::io;
use std::path::{Path, PathBuf};

use calamine::{Data, Reader, open_workbook_auto};
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::domain::history::{HistoryError, HistorySample};

#[derive(Error, Debug)]
pub enum HistoryLoadError {
    #[error("failed to read history file {path}: {source}")]
    ReadFile { path: PathBuf, source: io::Error },
    #[error("failed to parse history csv: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to parse history yaml: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("failed to read history workbook: {0}")]
    Workbook(#[from] calamine::Error),
    #[error("history workbook has no worksheets")]
    EmptyWorkbook,
    #[error("no numeric columns found")]
    NoNumericColumn,
    #[error("{0}")]
    InvalidValue(#[from] HistoryError),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum HistoryYaml {
    Values(Vec<Option<f64>>),
    Record { cycle_times: Vec<Option<f64>> },
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum HistoryFormat {
    Csv,
    Yaml,
    Workbook,
}

impl HistoryFormat {
    fn from_path(path: &Path) -> Self {
        let extension = path
            .extension()
            .and_then(|extension| extension.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        match extension.as_str() {
            "yaml" | "yml" => Self::Yaml,
            "xls" | "xlsx" | "xlsm" | "xlsb" | "ods" => Self::Workbook,
            _ => Self::Csv,
        }
    }
}

enum Cell {
    Missing,
    Number(f64),
    Text,
}

/// Tracks which columns are still all-numeric while rows stream in.
struct NumericColumns {
    columns: Vec<Option<Vec<f64>>>,
}

impl NumericColumns {
    fn new(width: usize) -> Self {
        Self {
            columns: vec![Some(Vec::new()); width],
        }
    }

    fn push_row(&mut self, cell_at: impl Fn(usize) -> Cell) {
        for (index, column) in self.columns.iter_mut().enumerate() {
            let Some(values) = column.as_mut() else {
                continue;
            };
            match cell_at(index) {
                Cell::Missing => {}
                Cell::Number(value) => values.push(value),
                Cell::Text => *column = None,
            }
        }
    }

    fn first(self) -> Result<Vec<f64>, HistoryLoadError> {
        self.columns
            .into_iter()
            .flatten()
            .find(|values| !values.is_empty())
            .ok_or(HistoryLoadError::NoNumericColumn)
    }
}

/// Loads cycle times from `path`.
///
/// `.yaml` / `.yml` files hold a sequence of numbers, either at the top level
/// or under a `cycle_times` key. Spreadsheets (`.xls`, `.xlsx`, `.xlsm`,
/// `.xlsb`, `.ods`) are read from their first worksheet. Anything else is
/// read as CSV. Tabular input uses its first all-numeric column, see
/// [`parse_csv_history`]. Missing values are skipped and the row order is
/// kept.
pub fn load_history<P: AsRef<Path>>(path: P) -> Result<HistorySample, HistoryLoadError> {
    let path = path.as_ref();
    let format = HistoryFormat::from_path(path);
    let values = match format {
        HistoryFormat::Yaml => parse_yaml_history(&read_text(path)?)?,
        HistoryFormat::Csv => parse_csv_history(&read_text(path)?)?,
        HistoryFormat::Workbook => parse_workbook_history(path)?,
    };

    let history = HistorySample::new(values)?;
    debug!(
        path = %path.display(),
        ?format,
        values = history.len(),
        max = history.values().iter().copied().fold(0.0_f64, f64::max),
        "history loaded"
    );
    Ok(history)
}

fn read_text(path: &Path) -> Result<String, HistoryLoadError> {
    std::fs::read_to_string(path).map_err(|source| HistoryLoadError::ReadFile {
        path: path.to_path_buf(),
        source,
    })
}

pub fn parse_yaml_history(contents: &str) -> Result<Vec<f64>, HistoryLoadError> {
    let values = match serde_yaml::from_str::<HistoryYaml>(contents)? {
        HistoryYaml::Values(values) => values,
        HistoryYaml::Record { cycle_times } => cycle_times,
    };
    Ok(values.into_iter().flatten().collect())
}

/// Picks the first column whose non-missing cells are all numbers and
/// returns its values in row order. The first row is the header.
pub fn parse_csv_history(contents: &str) -> Result<Vec<f64>, HistoryLoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(contents.as_bytes());
    let mut columns = NumericColumns::new(reader.headers()?.len());

    for record in reader.records() {
        let record = record?;
        columns.push_row(|index| text_cell(record.get(index).unwrap_or("")));
    }
    columns.first()
}

/// Same column selection as [`parse_csv_history`], over the first worksheet.
pub fn parse_workbook_history(path: &Path) -> Result<Vec<f64>, HistoryLoadError> {
    let mut workbook = open_workbook_auto(path)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or(HistoryLoadError::EmptyWorkbook)??;

    let mut columns = NumericColumns::new(range.width());
    for row in range.rows().skip(1) {
        columns.push_row(|index| workbook_cell(row.get(index)));
    }
    columns.first()
}

fn text_cell(cell: &str) -> Cell {
    if is_missing(cell) {
        return Cell::Missing;
    }
    match cell.parse::<f64>() {
        Ok(value) => Cell::Number(value),
        Err(_) => Cell::Text,
    }
}

fn workbook_cell(cell: Option<&Data>) -> Cell {
    match cell {
        None | Some(Data::Empty) | Some(Data::Error(_)) => Cell::Missing,
        Some(Data::Float(value)) => Cell::Number(*value),
        Some(Data::Int(value)) => Cell::Number(*value as f64),
        Some(Data::String(text)) if is_missing(text.trim()) => Cell::Missing,
        Some(_) => Cell::Text,
    }
}

fn is_missing(cell: &str) -> bool {
    matches!(cell, "" | "NA" | "N/A" | "NaN" | "nan" | "null" | "NULL")
}
