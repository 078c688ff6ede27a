//! Audit entry data structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kinds of persisted change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Create,
    Update,
    Delete,
    /// A whole month's rows swapped for a new list
    Replace,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Operation::Create => "CREATE",
            Operation::Update => "UPDATE",
            Operation::Delete => "DELETE",
            Operation::Replace => "REPLACE",
        };
        f.write_str(label)
    }
}

/// What an entry is about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    BudgetCategory,
    Transfer,
    /// Month-level operations (replace-all, copy, reset, bootstrap)
    BudgetMonth,
}

impl std::fmt::Display for EntityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            EntityType::BudgetCategory => "BudgetCategory",
            EntityType::Transfer => "Transfer",
            EntityType::BudgetMonth => "BudgetMonth",
        };
        f.write_str(label)
    }
}

/// One line of the audit log
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    /// When the operation occurred (UTC)
    pub timestamp: DateTime<Utc>,

    pub operation: Operation,

    pub entity_type: EntityType,

    /// Category/transfer id, or the month key for month-level entries
    pub entity_id: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<serde_json::Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<serde_json::Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub diff_summary: Option<String>,
}

impl AuditEntry {
    pub fn new(operation: Operation, entity_type: EntityType, entity_id: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            operation,
            entity_type,
            entity_id: entity_id.into(),
            entity_name: None,
            before: None,
            after: None,
            diff_summary: None,
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.entity_name = Some(name.into());
        self
    }

    /// Attach the prior state; values that fail to serialize are dropped
    pub fn before<T: Serialize + ?Sized>(mut self, value: &T) -> Self {
        self.before = serde_json::to_value(value).ok();
        self
    }

    pub fn after<T: Serialize + ?Sized>(mut self, value: &T) -> Self {
        self.after = serde_json::to_value(value).ok();
        self
    }

    pub fn summary(mut self, summary: impl Into<String>) -> Self {
        self.diff_summary = Some(summary.into());
        self
    }

    /// Format the entry for human-readable output
    pub fn format_human_readable(&self) -> String {
        let mut output = format!(
            "[{}] {} {} {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            self.operation,
            self.entity_type,
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

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_display_labels() {
        assert_eq!(Operation::Replace.to_string(), "REPLACE");
        assert_eq!(EntityType::BudgetMonth.to_string(), "BudgetMonth");
    }

    #[test]
    fn test_builder_fields() {
        let entry = AuditEntry::new(Operation::Update, EntityType::BudgetCategory, "cat-1")
            .named("Dining")
            .before(&json!({"name": "Eating Out"}))
            .after(&json!({"name": "Dining"}))
            .summary("name: Eating Out -> Dining");

        assert_eq!(entry.entity_name.as_deref(), Some("Dining"));
        assert!(entry.before.is_some());
        assert!(entry.after.is_some());

        let text = entry.format_human_readable();
        assert!(text.contains("UPDATE BudgetCategory cat-1 (Dining)"));
        assert!(text.contains("Eating Out -> Dining"));
    }

    #[test]
    fn test_serialization_skips_empty_fields() {
        let entry = AuditEntry::new(Operation::Delete, EntityType::BudgetMonth, "2025-01");
        let line = serde_json::to_string(&entry).unwrap();

        assert!(line.contains("\"budget_month\""));
        assert!(!line.contains("before"));

        let parsed: AuditEntry = serde_json::from_str(&line).unwrap();
        assert_eq!(parsed.operation, Operation::Delete);
    }
}
