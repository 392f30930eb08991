use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::resource::{
    FieldDefault, FieldKind, FieldSpec, ParentSpec, Resource, department_label,
};

/// Yearly key performance indicators of a department.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct DepartmentKpi {
    pub id: i64,
    pub department: i64,
    #[serde(default)]
    pub department_name: Option<String>,
    pub evaluation_year: i32,
    #[serde(default, deserialize_with = "crate::de::optional_decimal")]
    #[schemars(with = "Option<f64>")]
    pub employment_rate: Option<f64>,
    #[serde(default)]
    pub full_time_faculty_count: Option<i32>,
    #[serde(default)]
    pub visiting_faculty_count: Option<i32>,
    #[serde(default, deserialize_with = "crate::de::optional_decimal")]
    #[schemars(with = "Option<f64>")]
    pub tech_transfer_income: Option<f64>,
    #[serde(default)]
    pub international_conferences_count: Option<i32>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Resource for DepartmentKpi {
    const PATH: &'static str = "kpis";
    const LABEL: &'static str = "kpi";
    const PARENT: Option<ParentSpec> = Some(ParentSpec {
        path: "departments",
        label: department_label,
    });
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::required("department", FieldKind::ForeignKey),
        FieldSpec::required("evaluation_year", FieldKind::Integer)
            .with_default(FieldDefault::CurrentYear),
        FieldSpec::optional("employment_rate", FieldKind::Decimal),
        FieldSpec::optional("full_time_faculty_count", FieldKind::Integer),
        FieldSpec::optional("visiting_faculty_count", FieldKind::Integer),
        FieldSpec::optional("tech_transfer_income", FieldKind::Decimal),
        FieldSpec::optional("international_conferences_count", FieldKind::Integer),
    ];

    fn id(&self) -> i64 {
        self.id
    }
}
