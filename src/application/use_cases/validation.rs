// ============================================================
// ROW VALIDATORS
// ============================================================
// Hand-coded per-dataset rules. Errors accumulate; a row may carry
// several errors across columns and no check short-circuits another.

use crate::domain::dataset::{cell_to_string, DataRow, DatasetKind, ValidationError};
use std::collections::HashMap;

/// Run every rule for the given dataset kind.
pub fn validate(kind: DatasetKind, rows: &[DataRow]) -> Vec<ValidationError> {
    let mut errors = check_required_columns(rows, kind.required_columns());
    errors.extend(find_duplicate_ids(rows, kind.id_column()));

    match kind {
        DatasetKind::Clients => {
            errors.extend(check_priority_levels(rows));
            errors.extend(check_attributes_json(rows));
        }
        DatasetKind::Workers => errors.extend(check_available_slots(rows)),
        DatasetKind::Tasks => {}
    }

    errors
}

/// Required-column presence, keyed off the first row's key set. A missing
/// column is reported once per row so every affected record is visible.
fn check_required_columns(rows: &[DataRow], required: &[&str]) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let Some(first) = rows.first() else {
        return errors;
    };

    let missing: Vec<&str> = required
        .iter()
        .filter(|col| !first.contains_key(**col))
        .copied()
        .collect();

    for index in 0..rows.len() {
        for col in &missing {
            errors.push(ValidationError {
                row: index,
                column: col.to_string(),
                error: format!("Missing required column: {}", col),
                suggestion: None,
            });
        }
    }
    errors
}

/// Flag every row whose ID value occurs more than once. Empty or absent
/// IDs are skipped. IDs are keyed by their CSV string form, so the JSON
/// number 1 and the string "1" count as the same ID.
fn find_duplicate_ids(rows: &[DataRow], id_column: &str) -> Vec<ValidationError> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for row in rows {
        let id = row.get(id_column).map(cell_to_string).unwrap_or_default();
        if id.is_empty() {
            continue;
        }
        *counts.entry(id).or_insert(0) += 1;
    }

    let mut errors = Vec::new();
    for (index, row) in rows.iter().enumerate() {
        let id = row.get(id_column).map(cell_to_string).unwrap_or_default();
        if id.is_empty() {
            continue;
        }
        if counts.get(&id).copied().unwrap_or(0) > 1 {
            errors.push(ValidationError {
                row: index,
                column: id_column.to_string(),
                error: format!("Duplicate ID: {}", id),
                suggestion: None,
            });
        }
    }
    errors
}

/// PriorityLevel must sit in [1, 5]. Out-of-range numeric values carry the
/// clamped value as a suggested fix; empty or non-numeric cells are left
/// to the other checks.
fn check_priority_levels(rows: &[DataRow]) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    for (index, row) in rows.iter().enumerate() {
        let raw = row
            .get("PriorityLevel")
            .map(cell_to_string)
            .unwrap_or_default();
        if raw.trim().is_empty() {
            continue;
        }
        let Ok(priority) = raw.trim().parse::<f64>() else {
            continue;
        };
        // "NaN" parses but has no meaningful clamp; treat it like any
        // other non-numeric cell.
        if priority.is_nan() {
            continue;
        }
        if !(1.0..=5.0).contains(&priority) {
            let clamped = priority.clamp(1.0, 5.0);
            errors.push(ValidationError {
                row: index,
                column: "PriorityLevel".to_string(),
                error: "Priority must be between 1-5".to_string(),
                suggestion: Some(format!("{}", clamped as i64)),
            });
        }
    }
    errors
}

/// AttributesJSON must hold well-formed JSON. An absent or empty cell
/// fails the parse too, which mirrors how the tool has always behaved.
fn check_attributes_json(rows: &[DataRow]) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    for (index, row) in rows.iter().enumerate() {
        let raw = row
            .get("AttributesJSON")
            .map(cell_to_string)
            .unwrap_or_default();
        if serde_json::from_str::<serde_json::Value>(&raw).is_err() {
            errors.push(ValidationError {
                row: index,
                column: "AttributesJSON".to_string(),
                error: "Invalid JSON format".to_string(),
                suggestion: None,
            });
        }
    }
    errors
}

/// AvailableSlots is a comma-separated number list, optionally wrapped in
/// brackets ("[1,2,3]"). Blank tokens are ignored; any non-numeric token
/// flags the row once.
fn check_available_slots(rows: &[DataRow]) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    for (index, row) in rows.iter().enumerate() {
        let raw = row
            .get("AvailableSlots")
            .map(cell_to_string)
            .unwrap_or_default();
        let stripped = raw.replace(['[', ']'], "");
        let has_invalid = stripped
            .split(',')
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .any(|token| token.parse::<f64>().is_err());
        if has_invalid {
            errors.push(ValidationError {
                row: index,
                column: "AvailableSlots".to_string(),
                error: "AvailableSlots contains non-numeric values".to_string(),
                suggestion: None,
            });
        }
    }
    errors
}
