// ============================================================
// DATASET TYPES
// ============================================================
// Rows, dataset kinds and validation results shared across layers

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One data record: column name -> scalar value.
///
/// Backed by serde_json's ordered map so the column order from the
/// uploaded CSV survives the round trip back to an exported CSV.
pub type DataRow = Map<String, Value>;

/// The three entity types the tool knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatasetKind {
    Clients,
    Workers,
    Tasks,
}

impl DatasetKind {
    /// Columns that must be present in an uploaded file of this kind.
    pub fn required_columns(&self) -> &'static [&'static str] {
        match self {
            DatasetKind::Clients => &[
                "ClientID",
                "ClientName",
                "PriorityLevel",
                "RequestedTaskIDs",
                "AttributesJSON",
            ],
            DatasetKind::Workers => &[
                "WorkerID",
                "WorkerName",
                "Skills",
                "AvailableSlots",
                "MaxLoadPerPhase",
            ],
            DatasetKind::Tasks => &[
                "TaskID",
                "TaskName",
                "Category",
                "Duration",
                "RequiredSkills",
            ],
        }
    }

    /// The designated primary-key column for duplicate detection.
    pub fn id_column(&self) -> &'static str {
        match self {
            DatasetKind::Clients => "ClientID",
            DatasetKind::Workers => "WorkerID",
            DatasetKind::Tasks => "TaskID",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DatasetKind::Clients => "clients",
            DatasetKind::Workers => "workers",
            DatasetKind::Tasks => "tasks",
        }
    }
}

/// A located data defect with an optional suggested fix.
///
/// Transient: recomputed on every validation pass, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    pub row: usize,
    pub column: String,
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

/// A free-text constraint suggested by the model. Descriptive metadata
/// only; nothing in this system ever evaluates it against data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleRecommendation {
    pub id: String,
    pub description: String,
}

/// Render a cell value the way it would appear in a CSV cell.
pub fn cell_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
