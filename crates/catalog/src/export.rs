//! CSV download of a filtered view.

use serde::Serialize;

use crate::{CatalogError, Record, Result, TableSpec};

pub const CSV_CONTENT_TYPE: &str = "text/csv; charset=utf-8";

#[derive(Clone, Debug, Serialize)]
pub struct CsvExport {
    pub filename: &'static str,
    pub content_type: &'static str,
    pub rows: usize,
    pub body: String,
}

/// Wrap a cell in double quotes, doubling any embedded quote.
pub fn quote(cell: &str) -> String {
    format!("\"{}\"", cell.replace('"', "\"\""))
}

/// Serialize `records` with the columns of `spec`.
///
/// List fields are joined with `", "`; absent optional fields become empty
/// cells. An empty view is refused rather than producing a header-only file.
pub fn to_csv<R: Record>(spec: &TableSpec, records: &[&R]) -> Result<CsvExport> {
    if records.is_empty() {
        return Err(CatalogError::EmptyExport);
    }

    let mut lines = Vec::with_capacity(records.len() + 1);
    lines.push(spec.columns.iter().map(|c| quote(c.header)).collect::<Vec<_>>().join(","));

    for record in records {
        let row = spec
            .columns
            .iter()
            .map(|c| {
                let cell = record.field(c.field).map(|v| v.to_string()).unwrap_or_default();
                quote(&cell)
            })
            .collect::<Vec<_>>()
            .join(",");
        lines.push(row);
    }

    Ok(CsvExport {
        filename: spec.export_filename,
        content_type: CSV_CONTENT_TYPE,
        rows: records.len(),
        body: lines.join("\n"),
    })
}
