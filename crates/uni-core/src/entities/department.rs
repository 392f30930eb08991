use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::resource::{FieldKind, FieldSpec, ParentSpec, Resource, name_label};

/// A department belonging to a college.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Department {
    pub id: i64,
    pub college: i64,
    #[serde(default)]
    pub college_name: Option<String>,
    pub name: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Resource for Department {
    const PATH: &'static str = "departments";
    const LABEL: &'static str = "department";
    const PARENT: Option<ParentSpec> = Some(ParentSpec {
        path: "colleges",
        label: name_label,
    });
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::required("college", FieldKind::ForeignKey),
        FieldSpec::required("name", FieldKind::Text),
    ];

    fn id(&self) -> i64 {
        self.id
    }
}
