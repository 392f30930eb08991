//! `unidash dashboard`: the four summary panels as text.

use anyhow::Context;
use uni_api::Transport;
use uni_api::dashboard::{
    DashboardPanels, DashboardView, Panel, TOP_DEPARTMENTS, format_currency, format_number,
    format_percent,
};
use uni_auth::Access;
use uni_core::responses::{BudgetExecution, DepartmentPerformance, StatusCount, YearCount};

use crate::cli::{GlobalFlags, OutputFormat};
use crate::context::AppContext;
use crate::output::{self, TableOptions, render_table};

const EMPTY_DASHBOARD: &str = "No data yet. Upload a spreadsheet with `unidash upload` to get started.";
const NO_DATA: &str = "(no data)";
const BAR_WIDTH: usize = 30;

pub async fn handle<T: Transport>(ctx: &AppContext<T>, flags: &GlobalFlags) -> anyhow::Result<()> {
    ctx.require(Access::Authenticated).await?;
    let summary = ctx
        .client
        .dashboard_summary()
        .await
        .context("failed to load dashboard")?;
    let view = DashboardView::from(summary);

    match flags.format {
        OutputFormat::Table => {
            println!("{}", render_view(&view, output::table_options()));
            Ok(())
        }
        format => output::output(&view, format),
    }
}

#[must_use]
pub fn render_view(view: &DashboardView, options: TableOptions) -> String {
    match view {
        DashboardView::Empty => EMPTY_DASHBOARD.to_string(),
        DashboardView::Panels(panels) => render_panels(panels, options),
    }
}

fn render_panels(panels: &DashboardPanels, options: TableOptions) -> String {
    [
        section(
            &format!("Department performance (top {TOP_DEPARTMENTS} by students)"),
            &panels.performance,
            |rows| performance_table(rows, options),
        ),
        section("Publications by year", &panels.publications, |rows| {
            publications_table(rows, options)
        }),
        section("Students by status", &panels.students, |rows| {
            students_table(rows, options)
        }),
        section("Budget execution", &panels.budget, |budget| {
            budget_table(budget, options)
        }),
    ]
    .join("\n\n")
}

fn section<D>(title: &str, panel: &Panel<D>, body: impl FnOnce(&D) -> String) -> String {
    let body = match panel {
        Panel::Empty => NO_DATA.to_string(),
        Panel::Ready(data) => body(data),
    };
    format!("{title}\n{body}")
}

fn count(value: u64) -> String {
    format_number(i64::try_from(value).ok())
}

/// `value` out of `max` as a bar of at most `width` blocks.
fn bar(value: u64, max: u64, width: usize) -> String {
    if max == 0 {
        return String::new();
    }
    let width_u64 = u64::try_from(width).unwrap_or(u64::MAX);
    let filled = value.min(max).saturating_mul(width_u64).saturating_add(max / 2) / max;
    "█".repeat(usize::try_from(filled).unwrap_or(width))
}

fn performance_table(rows: &[DepartmentPerformance], options: TableOptions) -> String {
    let cells = rows
        .iter()
        .map(|row| {
            vec![
                row.department_name.clone(),
                row.college_name.clone(),
                count(row.student_count),
                count(row.publication_count),
                count(row.project_count),
                format_currency(Some(row.total_funding)),
            ]
        })
        .collect::<Vec<_>>();
    render_table(
        &["department", "college", "students", "publications", "projects", "funding"],
        &cells,
        options,
    )
}

fn publications_table(rows: &[YearCount], options: TableOptions) -> String {
    let max = rows.iter().map(|row| row.count).max().unwrap_or(0);
    let cells = rows
        .iter()
        .map(|row| {
            vec![
                row.year.to_string(),
                count(row.count),
                bar(row.count, max, BAR_WIDTH),
            ]
        })
        .collect::<Vec<_>>();
    render_table(&["year", "count", ""], &cells, options)
}

#[allow(clippy::cast_precision_loss)]
fn students_table(rows: &[StatusCount], options: TableOptions) -> String {
    let total: u64 = rows.iter().map(|row| row.count).sum();
    let cells = rows
        .iter()
        .map(|row| {
            let share = (total > 0).then(|| row.count as f64 * 100.0 / total as f64);
            vec![
                row.status.clone(),
                count(row.count),
                format_percent(share, 1),
                bar(row.count, total, BAR_WIDTH),
            ]
        })
        .collect::<Vec<_>>();
    render_table(&["status", "students", "share", ""], &cells, options)
}

fn budget_table(budget: &BudgetExecution, options: TableOptions) -> String {
    let rows = vec![
        vec!["total budget".to_string(), format_currency(Some(budget.total_budget))],
        vec!["executed".to_string(), format_currency(Some(budget.executed_amount))],
        vec!["pending".to_string(), format_currency(Some(budget.pending_amount))],
        vec![
            "execution rate".to_string(),
            format_percent(Some(budget.execution_rate), 1),
        ],
    ];
    render_table(&["item", "amount"], &rows, options)
}
