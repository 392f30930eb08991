//! Create/edit form state for any [`Resource`].
//!
//! Values are held as the raw strings a user typed, exactly like form inputs,
//! and converted to typed JSON only when a payload is built. Blank optional
//! fields are submitted as `null`, never as `""` or `0`, except plain text,
//! which the backend stores as an empty string.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use serde_json::{Map, Number, Value};

use crate::enums::Choice;
use crate::errors::CoreError;
use crate::resource::{FieldDefault, FieldKind, FieldSpec, Resource};

/// Whether the form creates a new record or edits an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit { id: i64 },
}

/// Open edit form for one entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState {
    entity: &'static str,
    fields: &'static [FieldSpec],
    mode: FormMode,
    values: BTreeMap<&'static str, String>,
}

impl FormState {
    /// Form for a new record, pre-filled with each field's default.
    #[must_use]
    pub fn for_create<R: Resource>() -> Self {
        Self::for_create_in_year::<R>(chrono::Local::now().year())
    }

    /// Same as [`for_create`](Self::for_create) with an explicit current year.
    #[must_use]
    pub fn for_create_in_year<R: Resource>(current_year: i32) -> Self {
        let values = R::FIELDS
            .iter()
            .map(|spec| {
                let value = match spec.default {
                    FieldDefault::Empty => String::new(),
                    FieldDefault::Value(value) => value.to_string(),
                    FieldDefault::CurrentYear => current_year.to_string(),
                };
                (spec.name, value)
            })
            .collect();

        Self {
            entity: R::LABEL,
            fields: R::FIELDS,
            mode: FormMode::Create,
            values,
        }
    }

    /// Form pre-filled from an existing record.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Other`] if the record cannot be serialized.
    pub fn for_edit<R: Resource>(record: &R) -> Result<Self, CoreError> {
        let json = serde_json::to_value(record).map_err(anyhow::Error::from)?;
        let values = R::FIELDS
            .iter()
            .map(|spec| (spec.name, json.get(spec.name).map_or_else(String::new, to_input)))
            .collect();

        Ok(Self {
            entity: R::LABEL,
            fields: R::FIELDS,
            mode: FormMode::Edit { id: record.id() },
            values,
        })
    }

    #[must_use]
    pub const fn mode(&self) -> FormMode {
        self.mode
    }

    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.values.get(field).map(String::as_str)
    }

    /// Field values in schema order.
    pub fn values(&self) -> impl Iterator<Item = (&'static str, &str)> + '_ {
        self.fields
            .iter()
            .map(|spec| (spec.name, self.get(spec.name).unwrap_or_default()))
    }

    /// Set one input value.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::UnknownField`] if the field is not in the schema.
    pub fn set(&mut self, field: &str, value: impl Into<String>) -> Result<(), CoreError> {
        let spec = lookup(self.entity, self.fields, field)?;
        self.values.insert(spec.name, value.into());
        Ok(())
    }

    /// Required fields whose input is blank, in schema order.
    #[must_use]
    pub fn missing_required(&self) -> Vec<&'static str> {
        self.fields
            .iter()
            .filter(|spec| spec.required)
            .filter(|spec| self.get(spec.name).is_none_or(|v| v.trim().is_empty()))
            .map(|spec| spec.name)
            .collect()
    }

    /// Build the full-replace JSON payload.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::MissingFields`] when any required field is blank,
    /// or [`CoreError::InvalidValue`] when an input does not parse as its kind.
    pub fn payload(&self) -> Result<Value, CoreError> {
        let missing = self.missing_required();
        if !missing.is_empty() {
            return Err(CoreError::MissingFields {
                fields: missing.into_iter().map(String::from).collect(),
            });
        }

        let mut body = Map::new();
        for spec in self.fields {
            let raw = self.get(spec.name).unwrap_or_default();
            body.insert(spec.name.to_string(), encode(spec, raw)?);
        }
        Ok(Value::Object(body))
    }
}

/// Build a partial payload containing only the given fields.
///
/// Required-field checks do not apply; values are still type-checked.
///
/// # Errors
///
/// Returns [`CoreError::UnknownField`] or [`CoreError::InvalidValue`].
pub fn partial_payload<R: Resource>(pairs: &[(String, String)]) -> Result<Value, CoreError> {
    let mut body = Map::new();
    for (field, raw) in pairs {
        let spec = lookup(R::LABEL, R::FIELDS, field)?;
        body.insert(spec.name.to_string(), encode(spec, raw)?);
    }
    Ok(Value::Object(body))
}

fn lookup(
    entity: &str,
    fields: &'static [FieldSpec],
    field: &str,
) -> Result<&'static FieldSpec, CoreError> {
    fields
        .iter()
        .find(|spec| spec.name == field)
        .ok_or_else(|| CoreError::UnknownField {
            entity: entity.to_string(),
            field: field.to_string(),
        })
}

fn encode(spec: &FieldSpec, raw: &str) -> Result<Value, CoreError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(match spec.kind {
            FieldKind::Text => Value::String(String::new()),
            _ => Value::Null,
        });
    }

    let invalid = |reason: String| CoreError::InvalidValue {
        field: spec.name.to_string(),
        reason,
    };

    match spec.kind {
        FieldKind::Text | FieldKind::NullableText => Ok(Value::String(trimmed.to_string())),
        FieldKind::Email => {
            if trimmed.contains('@') {
                Ok(Value::String(trimmed.to_string()))
            } else {
                Err(invalid(format!("'{trimmed}' is not an email address")))
            }
        }
        FieldKind::Integer | FieldKind::ForeignKey => trimmed
            .parse::<i64>()
            .map(Value::from)
            .map_err(|e| invalid(format!("'{trimmed}' is not an integer ({e})"))),
        FieldKind::Decimal => trimmed
            .parse::<f64>()
            .ok()
            .and_then(Number::from_f64)
            .map(Value::Number)
            .ok_or_else(|| invalid(format!("'{trimmed}' is not a number"))),
        FieldKind::Date => NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
            .map(|date| Value::String(date.format("%Y-%m-%d").to_string()))
            .map_err(|e| invalid(format!("'{trimmed}' is not a YYYY-MM-DD date ({e})"))),
        FieldKind::Boolean => match trimmed.to_ascii_lowercase().as_str() {
            "true" | "yes" | "y" | "1" => Ok(Value::Bool(true)),
            "false" | "no" | "n" | "0" => Ok(Value::Bool(false)),
            _ => Err(invalid(format!("'{trimmed}' is not a boolean"))),
        },
        FieldKind::Choice(choices) => Choice::resolve(choices, trimmed)
            .map(|wire| Value::String(wire.to_string()))
            .ok_or_else(|| invalid(format!("'{trimmed}' is not an allowed choice"))),
    }
}

fn to_input(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        Value::Bool(flag) => flag.to_string(),
        Value::Number(number) => number.to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::entities::{College, DepartmentKpi, Publication, ResearchProject, Student};
    use crate::enums::{AcademicStatus, ProgramLevel};

    #[test]
    fn create_form_uses_defaults() {
        let form = FormState::for_create_in_year::<DepartmentKpi>(2025);
        assert_eq!(form.mode(), FormMode::Create);
        assert_eq!(form.get("evaluation_year"), Some("2025"));
        assert_eq!(form.get("employment_rate"), Some(""));

        let student = FormState::for_create_in_year::<Student>(2025);
        assert_eq!(student.get("program_level"), Some("학사"));
        assert_eq!(student.get("status"), Some("재학"));
    }

    #[test]
    fn missing_required_blocks_payload() {
        let mut form = FormState::for_create_in_year::<Student>(2025);
        form.set("name", "   ").unwrap();
        let err = form.payload().unwrap_err();
        match err {
            CoreError::MissingFields { fields } => {
                assert_eq!(fields, vec!["student_id_number", "name", "department"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn blank_numeric_optionals_become_null() {
        let mut form = FormState::for_create_in_year::<DepartmentKpi>(2024);
        form.set("department", "7").unwrap();
        form.set("full_time_faculty_count", "12").unwrap();

        let payload = form.payload().unwrap();
        assert_eq!(payload["department"], json!(7));
        assert_eq!(payload["evaluation_year"], json!(2024));
        assert_eq!(payload["full_time_faculty_count"], json!(12));
        assert_eq!(payload["employment_rate"], Value::Null);
        assert_eq!(payload["visiting_faculty_count"], Value::Null);
        assert_eq!(payload["tech_transfer_income"], Value::Null);
    }

    #[test]
    fn blank_optional_text_stays_a_string() {
        let mut form = FormState::for_create_in_year::<ResearchProject>(2024);
        form.set("project_number", "P-1").unwrap();
        form.set("name", "Fusion").unwrap();
        form.set("department", "2").unwrap();
        let payload = form.payload().unwrap();
        assert_eq!(payload["funding_agency"], json!(""));
        assert_eq!(payload["total_funding_amount"], Value::Null);
    }

    #[test]
    fn blank_publication_id_is_null() {
        let mut form = FormState::for_create_in_year::<Publication>(2024);
        form.set("publication_date", "2024-03-01").unwrap();
        form.set("department", "2").unwrap();
        form.set("title", "Quantum dots").unwrap();
        let payload = form.payload().unwrap();
        assert!(payload["publication_id_str"].is_null());
        assert_eq!(payload["journal_name"], json!(""));

        let stored: Publication = serde_json::from_value(json!({
            "id": 4, "publication_id_str": null, "publication_date": "2024-03-01",
            "department": 2, "title": "Quantum dots"
        }))
        .unwrap();
        let edit = FormState::for_edit(&stored).unwrap();
        assert!(edit.payload().unwrap()["publication_id_str"].is_null());

        form.set("publication_id_str", " PUB-7 ").unwrap();
        assert_eq!(form.payload().unwrap()["publication_id_str"], json!("PUB-7"));
    }

    #[test]
    fn choice_alias_is_sent_as_wire_label() {
        let mut form = FormState::for_create_in_year::<Student>(2024);
        form.set("student_id_number", "2024001").unwrap();
        form.set("name", "Kim").unwrap();
        form.set("department", "1").unwrap();
        form.set("status", "leave").unwrap();
        let payload = form.payload().unwrap();
        assert_eq!(payload["status"], json!("휴학"));
        assert_eq!(payload["email"], Value::Null);
    }

    #[test]
    fn invalid_integer_is_rejected() {
        let mut form = FormState::for_create_in_year::<College>(2024);
        assert!(matches!(
            form.set("colour", "red"),
            Err(CoreError::UnknownField { .. })
        ));
        form.set("name", "Engineering").unwrap();
        assert_eq!(form.payload().unwrap(), json!({"name": "Engineering"}));

        let err = partial_payload::<DepartmentKpi>(&[("evaluation_year".into(), "twenty".into())])
            .unwrap_err();
        assert!(err.to_string().contains("evaluation_year"));
    }

    #[test]
    fn edit_form_prefills_from_record() {
        let student = Student {
            id: 9,
            student_id_number: "2023-17".into(),
            name: "Lee".into(),
            department: 4,
            department_name: Some("Physics".into()),
            grade: Some(3),
            program_level: ProgramLevel::Master,
            status: AcademicStatus::Enrolled,
            gender: None,
            admission_year: Some(2023),
            advisor_name: None,
            email: Some("lee@example.edu".into()),
            created_at: None,
        };
        let form = FormState::for_edit(&student).unwrap();
        assert_eq!(form.mode(), FormMode::Edit { id: 9 });
        assert_eq!(form.get("department"), Some("4"));
        assert_eq!(form.get("program_level"), Some("석사"));
        assert_eq!(form.get("gender"), Some(""));
        assert!(form.missing_required().is_empty());
    }

    #[test]
    fn partial_payload_contains_only_given_fields() {
        let payload =
            partial_payload::<DepartmentKpi>(&[("employment_rate".into(), "71.5".into())])
                .unwrap();
        assert_eq!(payload, json!({"employment_rate": 71.5}));
    }
}
