//! Payloads returned by the bespoke (non-CRUD) backend endpoints.

use std::collections::BTreeMap;
use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::enums::UserRole;

/// `GET /dashboard/summary/`.
///
/// When `is_empty` is true the backend omits every panel.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct DashboardSummary {
    pub is_empty: bool,
    #[serde(default)]
    pub performance_by_department: Option<Vec<DepartmentPerformance>>,
    #[serde(default)]
    pub publications_by_year: Option<Vec<YearCount>>,
    #[serde(default)]
    pub students_by_status: Option<Vec<StatusCount>>,
    #[serde(default)]
    pub budget_execution: Option<BudgetExecution>,
}

/// One bar of the department performance panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct DepartmentPerformance {
    pub department_name: String,
    #[serde(default)]
    pub college_name: String,
    #[serde(default)]
    pub student_count: u64,
    #[serde(default)]
    pub publication_count: u64,
    #[serde(default)]
    pub project_count: u64,
    #[serde(default)]
    pub total_funding: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct YearCount {
    pub year: i32,
    pub count: u64,
}

/// Count of students in one academic status. The status is kept as the raw
/// wire label so unexpected values still render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct StatusCount {
    pub status: String,
    pub count: u64,
}

/// Research budget gauge.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct BudgetExecution {
    #[serde(default)]
    pub total_budget: i64,
    #[serde(default)]
    pub executed_amount: i64,
    #[serde(default)]
    pub pending_amount: i64,
    /// Percentage in `0..=100`, two decimals.
    #[serde(default)]
    pub execution_rate: f64,
}

/// Successful `POST /data-upload/` body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    /// Imported row count per entity.
    #[serde(default)]
    pub details: Option<BTreeMap<String, u64>>,
}

impl UploadResponse {
    /// Sum of all imported rows.
    #[must_use]
    pub fn total_rows(&self) -> u64 {
        self.details.iter().flat_map(BTreeMap::values).sum()
    }
}

/// Human-readable upload result shown in the success state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UploadSummary {
    pub message: String,
    pub counts: BTreeMap<String, u64>,
}

impl From<UploadResponse> for UploadSummary {
    fn from(response: UploadResponse) -> Self {
        Self {
            message: response
                .message
                .unwrap_or_else(|| "data uploaded successfully".to_string()),
            counts: response.details.unwrap_or_default(),
        }
    }
}

impl fmt::Display for UploadSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)?;
        let counts: Vec<String> = self
            .counts
            .iter()
            .filter(|(_, count)| **count > 0)
            .map(|(entity, count)| format!("{entity}: {count}"))
            .collect();
        if !counts.is_empty() {
            write!(f, " ({})", counts.join(", "))?;
        }
        Ok(())
    }
}

/// Error body shared by every endpoint: `{message?, code?, details?}`.
///
/// `details` is free-form: a list of row errors on upload validation
/// failures, a field map on serializer errors, or a string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub details: Option<Value>,
}

/// `POST /auth/login/`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    pub user: LoginUser,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginUser {
    #[serde(default)]
    pub id: Option<String>,
    pub email: String,
}

/// `GET /auth/profile/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Profile {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub role: UserRole,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}
