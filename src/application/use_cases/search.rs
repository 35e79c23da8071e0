use crate::domain::dataset::{cell_to_string, DataRow};

/// Keep rows where any field's string form contains the query,
/// case-insensitively.
pub fn filter_rows(rows: &[DataRow], query: &str) -> Vec<DataRow> {
    let needle = query.to_lowercase();
    rows.iter()
        .filter(|row| {
            row.values()
                .any(|value| cell_to_string(value).to_lowercase().contains(&needle))
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(name: &str, city: &str) -> DataRow {
        let mut row = DataRow::new();
        row.insert("name".to_string(), json!(name));
        row.insert("city".to_string(), json!(city));
        row
    }

    #[test]
    fn test_match_is_case_insensitive() {
        let rows = vec![row("Alice", "NYC"), row("Bob", "LA")];
        let hits = filter_rows(&rows, "alice");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0]["name"], json!("Alice"));
    }

    #[test]
    fn test_matches_any_field() {
        let rows = vec![row("Alice", "NYC"), row("Bob", "nyc east")];
        assert_eq!(filter_rows(&rows, "NYC").len(), 2);
    }

    #[test]
    fn test_substring_match() {
        let rows = vec![row("Alexandra", "Rome")];
        assert_eq!(filter_rows(&rows, "lex").len(), 1);
    }

    #[test]
    fn test_no_match_returns_empty() {
        let rows = vec![row("Alice", "NYC")];
        assert!(filter_rows(&rows, "zzz").is_empty());
    }

    #[test]
    fn test_numeric_fields_match_by_string_form() {
        let mut r = DataRow::new();
        r.insert("priority".to_string(), json!(42));
        assert_eq!(filter_rows(&[r], "42").len(), 1);
    }
}
