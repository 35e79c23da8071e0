// ============================================================
// CSV CODEC
// ============================================================
// Parse uploaded CSV text into rows and render rows back to CSV

use crate::domain::dataset::{cell_to_string, DataRow};
use crate::domain::error::AppError;
use csv::ReaderBuilder;
use serde_json::Value;

/// Parse CSV content: first record is the header, every later record
/// becomes a row keyed by header name. Empty lines are skipped and all
/// cell values come back as strings, matching what the browser sends us
/// back later for export.
pub fn parse_content(content: &str) -> Result<Vec<DataRow>, AppError> {
    let mut reader = ReaderBuilder::new()
        .flexible(true) // tolerate ragged rows
        .from_reader(content.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| AppError::ParseError(format!("Failed to read CSV headers: {}", e)))?
        .clone();

    let mut rows = Vec::new();
    for (index, result) in reader.records().enumerate() {
        let record = result.map_err(|e| {
            AppError::ParseError(format!("Failed to parse CSV row {}: {}", index + 1, e))
        })?;

        if record.iter().all(|field| field.is_empty()) {
            continue;
        }

        let mut row = DataRow::new();
        for (idx, header) in headers.iter().enumerate() {
            let value = record.get(idx).unwrap_or("").to_string();
            row.insert(header.to_string(), Value::String(value));
        }
        rows.push(row);
    }

    Ok(rows)
}

/// Render rows to CSV text. The header is the union of row keys in
/// first-seen order; cells missing from a row are written empty.
pub fn unparse(rows: &[DataRow]) -> Result<String, AppError> {
    let mut headers: Vec<String> = Vec::new();
    for row in rows {
        for key in row.keys() {
            if !headers.iter().any(|h| h == key) {
                headers.push(key.clone());
            }
        }
    }

    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(&headers)
        .map_err(|e| AppError::Internal(format!("Failed to write CSV header: {}", e)))?;

    for row in rows {
        let record: Vec<String> = headers
            .iter()
            .map(|h| row.get(h).map(cell_to_string).unwrap_or_default())
            .collect();
        writer
            .write_record(&record)
            .map_err(|e| AppError::Internal(format!("Failed to write CSV row: {}", e)))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| AppError::Internal(format!("Failed to flush CSV: {}", e)))?;
    String::from_utf8(bytes).map_err(|e| AppError::Internal(format!("CSV is not UTF-8: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_simple_csv() {
        let content = "name,age,city\nAlice,30,NYC\nBob,25,LA";
        let rows = parse_content(content).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["name"], json!("Alice"));
        assert_eq!(rows[0]["age"], json!("30"));
        assert_eq!(rows[1]["city"], json!("LA"));
    }

    #[test]
    fn test_parse_preserves_column_order() {
        let content = "ZCol,ACol\n1,2";
        let rows = parse_content(content).unwrap();
        let keys: Vec<&String> = rows[0].keys().collect();
        assert_eq!(keys, vec!["ZCol", "ACol"]);
    }

    #[test]
    fn test_parse_skips_empty_lines() {
        let content = "a,b\n1,2\n\n3,4\n";
        let rows = parse_content(content).unwrap();
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn test_parse_short_row_fills_empty() {
        let content = "a,b,c\n1,2";
        let rows = parse_content(content).unwrap();
        assert_eq!(rows[0]["c"], json!(""));
    }

    #[test]
    fn test_unparse_missing_cell_is_empty() {
        let mut a = DataRow::new();
        a.insert("x".to_string(), json!("1"));
        a.insert("y".to_string(), json!("2"));
        let mut b = DataRow::new();
        b.insert("x".to_string(), json!("3"));

        let csv = unparse(&[a, b]).unwrap();
        assert_eq!(csv, "x,y\n1,2\n3,\n");
    }

    #[test]
    fn test_export_then_reimport_round_trips_strings() {
        let content = "id,value\nC1,hello world\nC2,\"quoted, comma\"";
        let rows = parse_content(content).unwrap();
        let exported = unparse(&rows).unwrap();
        let reparsed = parse_content(&exported).unwrap();
        assert_eq!(rows, reparsed);
    }

    #[test]
    fn test_unparse_renders_numbers() {
        let mut row = DataRow::new();
        row.insert("n".to_string(), json!(7));
        let csv = unparse(&[row]).unwrap();
        assert_eq!(csv, "n\n7\n");
    }
}
