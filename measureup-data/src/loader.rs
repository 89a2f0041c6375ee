//! Reference table loader.
//!
//! ## CSV Format
//!
//! Column order does **not** matter, and header names are matched
//! case-insensitively with surrounding whitespace trimmed.
//!
//! | Column                    | Required | Notes                                      |
//! |---------------------------|----------|--------------------------------------------|
//! | `Value name`              | yes      | Grouping key shown to the user             |
//! | `Level`                   | yes      | `Bronze` or `Silver` (case-insensitive)    |
//! | `Silver name`             | yes      | Cell may be empty or the `NA` sentinel     |
//! | `Silver adjustment factors` | yes    | Informational text, cell may be empty      |
//! | `Description`             | yes      |                                            |
//! | `Unit 1`                  | yes      | Name of the primary quantity               |
//! | `Unit 2`                  | yes      | Empty cell = no duration dimension         |
//! | `Fiscal`                  | yes      | Decimal, cell may be empty                 |
//! | `Economic`                | yes      | Decimal, cell may be empty                 |
//! | `Social`                  | yes      | Decimal, cell may be empty                 |
//! | `Environmental`           | yes      | Decimal, cell may be empty                 |
//! | `Bronze value`            | no       | Decimal, the Bronze monetary value         |
//! | `Silver values`           | no       | Decimal, the Silver monetary value         |
//! | `Key`                     | no       | Stable identifier                          |
//! | `URL`                     | no       | Reference link                             |
//! | `kg CO2e`                 | no       | Decimal, carbon per unit                   |
//! | `WELLBY`                  | no       | Decimal, WELLBYs per unit                  |
//!
//! ### Minimal example
//!
//! ```csv
//! Value name,Level,Silver name,Silver adjustment factors,Description,Unit 1,Unit 2,Fiscal,Economic,Social,Environmental
//! Flood resilience,Bronze,NA,,Household protected,households,years,80,200,50,30
//! ```

use std::io::Read;
use std::path::Path;

use measureup_core::models::{ReferenceRow, ValueLevel};
use measureup_core::resolver::ValueTable;
use rust_decimal::Decimal;
use thiserror::Error;
use tracing::debug;

/// Errors that can occur while loading the reference table. All of them are
/// fatal to the session: the data source must be fixed before estimating.
#[derive(Debug, Error)]
pub enum DataLoadError {
    #[error("cannot read reference data: {0}")]
    Io(#[from] std::io::Error),

    /// The underlying CSV is structurally invalid.
    #[error("CSV parse error: {0}")]
    Csv(#[from] csv::Error),

    /// A required column is absent from the header row (matching is
    /// case-insensitive and whitespace-trimmed).
    #[error("required column '{0}' is missing from the reference data")]
    MissingColumn(&'static str),

    /// A `Level` cell contained something other than Bronze or Silver.
    /// `row` is the 1-based data row number.
    #[error("unrecognised level '{value}' on row {row}")]
    InvalidLevel { value: String, row: usize },

    /// A numeric cell could not be parsed as a decimal.
    #[error("invalid number '{value}' in column '{column}' on row {row}")]
    InvalidNumber {
        column: &'static str,
        value: String,
        row: usize,
    },
}

/// Resolved positions of every recognised column in the header row.
#[derive(Debug)]
struct Columns {
    value_name: usize,
    level: usize,
    silver_name: usize,
    silver_adjustment_factors: usize,
    description: usize,
    unit1: usize,
    unit2: usize,
    fiscal: usize,
    economic: usize,
    social: usize,
    environmental: usize,
    bronze_value: Option<usize>,
    silver_value: Option<usize>,
    key: Option<usize>,
    url: Option<usize>,
    kg_co2e: Option<usize>,
    wellby: Option<usize>,
}

fn position(
    headers: &csv::StringRecord,
    name: &str,
) -> Option<usize> {
    headers
        .iter()
        .position(|header| header.trim().eq_ignore_ascii_case(name))
}

fn required(
    headers: &csv::StringRecord,
    name: &'static str,
) -> Result<usize, DataLoadError> {
    position(headers, name).ok_or(DataLoadError::MissingColumn(name))
}

impl Columns {
    fn from_headers(headers: &csv::StringRecord) -> Result<Self, DataLoadError> {
        Ok(Self {
            value_name: required(headers, "Value name")?,
            level: required(headers, "Level")?,
            silver_name: required(headers, "Silver name")?,
            silver_adjustment_factors: required(headers, "Silver adjustment factors")?,
            description: required(headers, "Description")?,
            unit1: required(headers, "Unit 1")?,
            unit2: required(headers, "Unit 2")?,
            fiscal: required(headers, "Fiscal")?,
            economic: required(headers, "Economic")?,
            social: required(headers, "Social")?,
            environmental: required(headers, "Environmental")?,
            bronze_value: position(headers, "Bronze value"),
            silver_value: position(headers, "Silver values"),
            key: position(headers, "Key"),
            url: position(headers, "URL"),
            kg_co2e: position(headers, "kg CO2e"),
            wellby: position(headers, "WELLBY"),
        })
    }
}

fn cell<'r>(
    record: &'r csv::StringRecord,
    index: usize,
) -> &'r str {
    record.get(index).unwrap_or("").trim()
}

fn text(
    record: &csv::StringRecord,
    index: usize,
) -> String {
    cell(record, index).to_string()
}

/// Empty cells become `None`; anything else is kept verbatim (including the
/// "NA" silver sentinel, which the resolver reads through).
fn optional_text(
    record: &csv::StringRecord,
    index: Option<usize>,
) -> Option<String> {
    let raw = cell(record, index?);
    if raw.is_empty() {
        None
    } else {
        Some(raw.to_string())
    }
}

fn optional_decimal(
    record: &csv::StringRecord,
    index: Option<usize>,
    column: &'static str,
    row: usize,
) -> Result<Option<Decimal>, DataLoadError> {
    let Some(index) = index else {
        return Ok(None);
    };
    let raw = cell(record, index);
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse::<Decimal>()
        .map(Some)
        .map_err(|_| DataLoadError::InvalidNumber {
            column,
            value: raw.to_string(),
            row,
        })
}

fn convert_record(
    record: &csv::StringRecord,
    columns: &Columns,
    row_number: usize,
) -> Result<ReferenceRow, DataLoadError> {
    let level_raw = cell(record, columns.level);
    let level = ValueLevel::parse(level_raw).ok_or_else(|| DataLoadError::InvalidLevel {
        value: level_raw.to_string(),
        row: row_number,
    })?;

    Ok(ReferenceRow {
        value_name: text(record, columns.value_name),
        level,
        silver_name: optional_text(record, Some(columns.silver_name)),
        silver_adjustment_factors: optional_text(record, Some(columns.silver_adjustment_factors)),
        description: text(record, columns.description),
        unit1_label: text(record, columns.unit1),
        unit2_label: optional_text(record, Some(columns.unit2)),
        key: optional_text(record, columns.key),
        url: optional_text(record, columns.url),
        bronze_value: optional_decimal(record, columns.bronze_value, "Bronze value", row_number)?,
        silver_value: optional_decimal(record, columns.silver_value, "Silver values", row_number)?,
        fiscal: optional_decimal(record, Some(columns.fiscal), "Fiscal", row_number)?,
        economic: optional_decimal(record, Some(columns.economic), "Economic", row_number)?,
        social: optional_decimal(record, Some(columns.social), "Social", row_number)?,
        environmental: optional_decimal(
            record,
            Some(columns.environmental),
            "Environmental",
            row_number,
        )?,
        kg_co2e_per_unit: optional_decimal(record, columns.kg_co2e, "kg CO2e", row_number)?,
        wellby_per_unit: optional_decimal(record, columns.wellby, "WELLBY", row_number)?,
    })
}

/// Parse reference data from any reader. Rows are kept in file order, which
/// matters for the resolver's first-in-table-order tie-break.
pub fn load_from_reader<R: Read>(reader: R) -> Result<ValueTable, DataLoadError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(true) // ragged short rows read as empty cells
        .from_reader(reader);

    let columns = Columns::from_headers(csv_reader.headers()?)?;

    let mut rows = Vec::new();
    for (index, result) in csv_reader.records().enumerate() {
        let record = result?;
        let row_number = index + 1; // 1-based for user-facing messages
        rows.push(convert_record(&record, &columns, row_number)?);
    }

    debug!(rows = rows.len(), "reference table loaded");
    Ok(ValueTable::new(rows))
}

/// Parse reference data from the full file contents as a `&str`.
pub fn load_from_str(input: &str) -> Result<ValueTable, DataLoadError> {
    load_from_reader(input.as_bytes())
}

/// Convenience wrapper: open a file from disk and delegate to
/// [`load_from_reader`].
pub fn load_from_file(path: &Path) -> Result<ValueTable, DataLoadError> {
    let file = std::fs::File::open(path)?;
    load_from_reader(file)
}
