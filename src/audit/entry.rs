//! Audit entry data structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Types of operations that can be audited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    /// Expense was added
    Create,
    /// Expense was updated
    Update,
    /// Expense was deleted
    Delete,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Create => write!(f, "CREATE"),
            Operation::Update => write!(f, "UPDATE"),
            Operation::Delete => write!(f, "DELETE"),
        }
    }
}

/// A single audit log entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    /// When the operation occurred (UTC)
    pub timestamp: DateTime<Utc>,

    /// Type of operation performed
    pub operation: Operation,

    /// Id of the affected expense
    pub entity_id: String,

    /// Description of the affected expense
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_name: Option<String>,

    /// Record before the operation (updates/deletes)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<serde_json::Value>,

    /// Record after the operation (creates/updates)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<serde_json::Value>,

    /// Human-readable diff summary
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diff_summary: Option<String>,
}

impl AuditEntry {
    /// Create a new audit entry for a create operation
    pub fn create<T: Serialize>(
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            operation: Operation::Create,
            entity_id: entity_id.into(),
            entity_name,
            before: None,
            after: serde_json::to_value(entity).ok(),
            diff_summary: None,
        }
    }

    /// Create a new audit entry for an update operation
    pub fn update<T: Serialize>(
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        before: &T,
        after: &T,
        diff_summary: Option<String>,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            operation: Operation::Update,
            entity_id: entity_id.into(),
            entity_name,
            before: serde_json::to_value(before).ok(),
            after: serde_json::to_value(after).ok(),
            diff_summary,
        }
    }

    /// Create a new audit entry for a delete operation
    pub fn delete<T: Serialize>(
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            operation: Operation::Delete,
            entity_id: entity_id.into(),
            entity_name,
            before: serde_json::to_value(entity).ok(),
            after: None,
            diff_summary: None,
        }
    }

    /// Format the entry for human-readable output
    pub fn format_human_readable(&self) -> String {
        let mut output = format!(
            "[{}] {} Expense {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            self.operation,
            self.entity_id
        );

        if let Some(name) = &self.entity_name {
            output.push_str(&format!(" ({})", name));
        }

        if let Some(diff) = &self.diff_summary {
            output.push_str(&format!("\n  Changes: {}", diff));
        }

        output
    }
}
