//! Report serialization: the two-column "Item,Value" CSV offered for
//! download at the final step, plus the parser that recovers the pairs.
//!
//! Quoting follows the csv crate's RFC 4180 handling, so labels or values
//! containing the delimiter, quotes, or newlines survive a round-trip.

use thiserror::Error;

/// Header row of every exported report.
pub const REPORT_HEADER: [&str; 2] = ["Item", "Value"];

/// Errors that can occur while serializing or parsing a report CSV.
#[derive(Debug, Error)]
pub enum ReportCsvError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("report I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("report output was not valid UTF-8")]
    Utf8(#[from] std::string::FromUtf8Error),

    /// The input's first row was not the expected "Item,Value" header.
    #[error("missing 'Item,Value' header row")]
    MissingHeader,
}

/// Serialize ordered (label, value) pairs to CSV text with the
/// "Item,Value" header row.
pub fn to_csv(report: &[(String, String)]) -> Result<String, ReportCsvError> {
    let mut buffer = Vec::new();
    {
        let mut writer = csv::Writer::from_writer(&mut buffer);
        writer.write_record(REPORT_HEADER)?;
        for (label, value) in report {
            writer.write_record([label.as_str(), value.as_str()])?;
        }
        writer.flush()?;
    }
    Ok(String::from_utf8(buffer)?)
}

/// Parse report CSV text back into ordered (label, value) pairs. Values
/// come back as text; no typing is reimposed on re-parse.
pub fn parse(input: &str) -> Result<Vec<(String, String)>, ReportCsvError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(input.as_bytes());

    let headers = reader.headers()?;
    if !headers.iter().eq(REPORT_HEADER) {
        return Err(ReportCsvError::MissingHeader);
    }

    let mut pairs = Vec::new();
    for result in reader.records() {
        let record = result?;
        pairs.push((
            record.get(0).unwrap_or("").to_string(),
            record.get(1).unwrap_or("").to_string(),
        ));
    }
    Ok(pairs)
}
