//! Binding between a record type, its REST collection, and its edit form.
//!
//! Every managed entity implements [`Resource`]. The generic CRUD client and
//! entity page in `uni-api` are written once against this trait; the only
//! per-entity knowledge is the data declared here (path, parent, fields).

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::enums::Choice;

/// A record managed through `/dashboard/{PATH}/`.
pub trait Resource: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Resource path segment (e.g., `departments`).
    const PATH: &'static str;
    /// Singular human label (e.g., `department`).
    const LABEL: &'static str;
    /// Parent collection backing the foreign key select, if any.
    const PARENT: Option<ParentSpec>;
    /// Edit form schema, in display order.
    const FIELDS: &'static [FieldSpec];

    /// Backend primary key.
    fn id(&self) -> i64;
}

/// Parent collection of an entity with a foreign key.
#[derive(Debug, Clone, Copy)]
pub struct ParentSpec {
    /// Resource path of the parent collection.
    pub path: &'static str,
    /// Render a parent row (raw JSON) as a select option label.
    pub label: fn(&Value) -> String,
}

/// One option of a foreign key select.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ForeignKeyOption {
    pub id: i64,
    pub label: String,
}

impl ParentSpec {
    /// Map raw parent rows to select options, skipping rows without an id.
    #[must_use]
    pub fn options(&self, rows: &[Value]) -> Vec<ForeignKeyOption> {
        rows.iter()
            .filter_map(|row| {
                let id = row.get("id")?.as_i64()?;
                Some(ForeignKeyOption {
                    id,
                    label: (self.label)(row),
                })
            })
            .collect()
    }
}

/// Input type of a form field; drives parsing and payload encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    /// Text column that is unique but nullable; blank is sent as `null`.
    NullableText,
    Email,
    Integer,
    Decimal,
    /// ISO `YYYY-MM-DD`.
    Date,
    Boolean,
    /// Id of a parent record.
    ForeignKey,
    Choice(&'static [Choice]),
}

/// Value a field takes when the create form opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldDefault {
    Empty,
    Value(&'static str),
    CurrentYear,
}

/// One field of an entity's edit form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    pub default: FieldDefault,
}

impl FieldSpec {
    #[must_use]
    pub const fn required(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            required: true,
            default: FieldDefault::Empty,
        }
    }

    #[must_use]
    pub const fn optional(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            required: false,
            default: FieldDefault::Empty,
        }
    }

    #[must_use]
    pub const fn with_default(mut self, default: FieldDefault) -> Self {
        self.default = default;
        self
    }
}

/// Label a row by its `name` column.
#[must_use]
pub fn name_label(row: &Value) -> String {
    row.get("name")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

/// Label a department row as `"<college_name> - <name>"`.
#[must_use]
pub fn department_label(row: &Value) -> String {
    let name = name_label(row);
    match row.get("college_name").and_then(Value::as_str) {
        Some(college) if !college.is_empty() => format!("{college} - {name}"),
        _ => name,
    }
}

/// Label a research project row as `"<project_number> - <name>"`.
#[must_use]
pub fn project_label(row: &Value) -> String {
    let name = name_label(row);
    match row.get("project_number").and_then(Value::as_str) {
        Some(number) if !number.is_empty() => format!("{number} - {name}"),
        _ => name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn department_options_include_college() {
        let spec = ParentSpec {
            path: "departments",
            label: department_label,
        };
        let rows = vec![
            json!({"id": 3, "name": "Physics", "college_name": "Science"}),
            json!({"id": 4, "name": "Orphan"}),
            json!({"name": "no id"}),
        ];
        let options = spec.options(&rows);
        assert_eq!(
            options,
            vec![
                ForeignKeyOption { id: 3, label: "Science - Physics".into() },
                ForeignKeyOption { id: 4, label: "Orphan".into() },
            ]
        );
    }

    #[test]
    fn project_label_prefixes_number() {
        let row = json!({"id": 1, "name": "Fusion", "project_number": "P-001"});
        assert_eq!(project_label(&row), "P-001 - Fusion");
    }
}
