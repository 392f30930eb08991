use chrono::{DateTime, NaiveDate, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::resource::{FieldKind, FieldSpec, ParentSpec, Resource, department_label};

/// A published paper credited to a department.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct Publication {
    pub id: i64,
    #[serde(default)]
    pub publication_id_str: Option<String>,
    pub publication_date: NaiveDate,
    pub department: i64,
    #[serde(default)]
    pub department_name: Option<String>,
    pub title: String,
    #[serde(default)]
    pub primary_author: Option<String>,
    #[serde(default)]
    pub contributing_authors: Option<String>,
    #[serde(default)]
    pub journal_name: Option<String>,
    #[serde(default)]
    pub journal_rank: Option<String>,
    #[serde(default, deserialize_with = "crate::de::optional_decimal")]
    #[schemars(with = "Option<f64>")]
    pub impact_factor: Option<f64>,
    #[serde(default)]
    pub is_project_linked: Option<bool>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Resource for Publication {
    const PATH: &'static str = "publications";
    const LABEL: &'static str = "publication";
    const PARENT: Option<ParentSpec> = Some(ParentSpec {
        path: "departments",
        label: department_label,
    });
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::optional("publication_id_str", FieldKind::NullableText),
        FieldSpec::required("publication_date", FieldKind::Date),
        FieldSpec::required("department", FieldKind::ForeignKey),
        FieldSpec::required("title", FieldKind::Text),
        FieldSpec::optional("primary_author", FieldKind::Text),
        FieldSpec::optional("contributing_authors", FieldKind::Text),
        FieldSpec::optional("journal_name", FieldKind::Text),
        FieldSpec::optional("journal_rank", FieldKind::Text),
        FieldSpec::optional("impact_factor", FieldKind::Decimal),
        FieldSpec::optional("is_project_linked", FieldKind::Boolean),
    ];

    fn id(&self) -> i64 {
        self.id
    }
}
