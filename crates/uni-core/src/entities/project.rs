use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::resource::{FieldKind, FieldSpec, ParentSpec, Resource, department_label};

/// A funded research project run by a department.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ResearchProject {
    pub id: i64,
    pub project_number: String,
    pub name: String,
    #[serde(default)]
    pub principal_investigator: Option<String>,
    pub department: i64,
    #[serde(default)]
    pub department_name: Option<String>,
    #[serde(default)]
    pub funding_agency: Option<String>,
    #[serde(default)]
    pub total_funding_amount: Option<i64>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Resource for ResearchProject {
    const PATH: &'static str = "projects";
    const LABEL: &'static str = "project";
    const PARENT: Option<ParentSpec> = Some(ParentSpec {
        path: "departments",
        label: department_label,
    });
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::required("project_number", FieldKind::Text),
        FieldSpec::required("name", FieldKind::Text),
        FieldSpec::optional("principal_investigator", FieldKind::Text),
        FieldSpec::required("department", FieldKind::ForeignKey),
        FieldSpec::optional("funding_agency", FieldKind::Text),
        FieldSpec::optional("total_funding_amount", FieldKind::Integer),
    ];

    fn id(&self) -> i64 {
        self.id
    }
}
