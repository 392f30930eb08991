//! Dashboard summary endpoint, panel view model, and number formatting.

use serde::Serialize;
use uni_core::responses::{
    BudgetExecution, DashboardSummary, DepartmentPerformance, StatusCount, YearCount,
};

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::transport::Transport;

const SUMMARY_PATH: &str = "/dashboard/summary/";

/// Bars shown in the department performance panel.
pub const TOP_DEPARTMENTS: usize = 10;

impl<T: Transport> ApiClient<T> {
    /// `GET /dashboard/summary/`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or the body cannot be decoded.
    pub async fn dashboard_summary(&self) -> Result<DashboardSummary, ApiError> {
        self.get_json(SUMMARY_PATH).await
    }
}

/// One dashboard panel: its data, or its own empty state.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", content = "data", rename_all = "snake_case")]
pub enum Panel<T> {
    Empty,
    Ready(T),
}

impl<T> Panel<T> {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

fn list_panel<T>(rows: Option<Vec<T>>) -> Panel<Vec<T>> {
    match rows {
        Some(rows) if !rows.is_empty() => Panel::Ready(rows),
        _ => Panel::Empty,
    }
}

/// The four independent panels.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardPanels {
    pub performance: Panel<Vec<DepartmentPerformance>>,
    pub publications: Panel<Vec<YearCount>>,
    pub students: Panel<Vec<StatusCount>>,
    pub budget: Panel<BudgetExecution>,
}

/// What the dashboard page shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", content = "panels", rename_all = "snake_case")]
pub enum DashboardView {
    /// No data at all; a single page-level empty state.
    Empty,
    Panels(DashboardPanels),
}

impl From<DashboardSummary> for DashboardView {
    fn from(summary: DashboardSummary) -> Self {
        if summary.is_empty {
            return Self::Empty;
        }

        let performance = summary.performance_by_department.map(|mut rows| {
            rows.sort_by(|a, b| b.student_count.cmp(&a.student_count));
            rows.truncate(TOP_DEPARTMENTS);
            rows
        });
        let publications = summary.publications_by_year.map(|mut rows| {
            rows.sort_by_key(|row| row.year);
            rows
        });

        Self::Panels(DashboardPanels {
            performance: list_panel(performance),
            publications: list_panel(publications),
            students: list_panel(summary.students_by_status),
            budget: summary.budget_execution.map_or(Panel::Empty, Panel::Ready),
        })
    }
}

/// Thousands-separated integer (`1234567` → `"1,234,567"`); absent is `"0"`.
#[must_use]
pub fn format_number(value: Option<i64>) -> String {
    let value = value.unwrap_or(0);
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        grouped.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// Won amount in units of 100 million (억원) with one decimal; absent is `"0억원"`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn format_currency(value: Option<i64>) -> String {
    match value {
        None => "0억원".to_string(),
        Some(won) => format!("{:.1}억원", won as f64 / 100_000_000.0),
    }
}

/// Percentage with fixed decimals; absent is `"0%"`.
#[must_use]
pub fn format_percent(value: Option<f64>, decimals: usize) -> String {
    value.map_or_else(|| "0%".to_string(), |v| format!("{v:.decimals$}%"))
}
