use chrono::{DateTime, NaiveDate, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::ExpenseStatus;
use crate::resource::{FieldDefault, FieldKind, FieldSpec, ParentSpec, Resource, project_label};

/// One execution line charged against a research project budget.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ProjectExpense {
    pub id: i64,
    pub execution_id: String,
    pub project: i64,
    #[serde(default)]
    pub project_name: Option<String>,
    pub execution_date: NaiveDate,
    pub item: String,
    pub amount: i64,
    pub status: ExpenseStatus,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Resource for ProjectExpense {
    const PATH: &'static str = "expenses";
    const LABEL: &'static str = "expense";
    const PARENT: Option<ParentSpec> = Some(ParentSpec {
        path: "projects",
        label: project_label,
    });
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::required("execution_id", FieldKind::Text),
        FieldSpec::required("project", FieldKind::ForeignKey),
        FieldSpec::required("execution_date", FieldKind::Date),
        FieldSpec::required("item", FieldKind::Text),
        FieldSpec::required("amount", FieldKind::Integer),
        FieldSpec::required("status", FieldKind::Choice(ExpenseStatus::CHOICES))
            .with_default(FieldDefault::Value("처리중")),
        FieldSpec::optional("notes", FieldKind::Text),
    ];

    fn id(&self) -> i64 {
        self.id
    }
}
