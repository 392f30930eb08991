use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{AcademicStatus, ProgramLevel};
use crate::resource::{
    FieldDefault, FieldKind, FieldSpec, ParentSpec, Resource, department_label,
};

/// A student on the roster of a department.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Student {
    pub id: i64,
    pub student_id_number: String,
    pub name: String,
    pub department: i64,
    #[serde(default)]
    pub department_name: Option<String>,
    #[serde(default)]
    pub grade: Option<i16>,
    pub program_level: ProgramLevel,
    pub status: AcademicStatus,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub admission_year: Option<i32>,
    #[serde(default)]
    pub advisor_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Resource for Student {
    const PATH: &'static str = "students";
    const LABEL: &'static str = "student";
    const PARENT: Option<ParentSpec> = Some(ParentSpec {
        path: "departments",
        label: department_label,
    });
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::required("student_id_number", FieldKind::Text),
        FieldSpec::required("name", FieldKind::Text),
        FieldSpec::required("department", FieldKind::ForeignKey),
        FieldSpec::optional("grade", FieldKind::Integer),
        FieldSpec::required("program_level", FieldKind::Choice(ProgramLevel::CHOICES))
            .with_default(FieldDefault::Value("학사")),
        FieldSpec::required("status", FieldKind::Choice(AcademicStatus::CHOICES))
            .with_default(FieldDefault::Value("재학")),
        FieldSpec::optional("gender", FieldKind::Text),
        FieldSpec::optional("admission_year", FieldKind::Integer),
        FieldSpec::optional("advisor_name", FieldKind::Text),
        FieldSpec::optional("email", FieldKind::Email),
    ];

    fn id(&self) -> i64 {
        self.id
    }
}
