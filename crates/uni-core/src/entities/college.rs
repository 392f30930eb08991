use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::resource::{FieldKind, FieldSpec, ParentSpec, Resource};

/// A college (단과대학), the root of the organisation tree.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct College {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Resource for College {
    const PATH: &'static str = "colleges";
    const LABEL: &'static str = "college";
    const PARENT: Option<ParentSpec> = None;
    const FIELDS: &'static [FieldSpec] = &[FieldSpec::required("name", FieldKind::Text)];

    fn id(&self) -> i64 {
        self.id
    }
}
