use schemars::schema_for;
use uni_core::entities::{
    College, Department, DepartmentKpi, ProjectExpense, Publication, ResearchProject, Student,
};
use uni_core::responses::DashboardSummary;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::{SchemaArgs, SchemaTarget};
use crate::output::output;

/// Handle `unidash schema ENTITY`. Always JSON: the schema is the payload.
pub fn handle(args: &SchemaArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    let format = match flags.format {
        crate::cli::OutputFormat::Raw => crate::cli::OutputFormat::Raw,
        _ => crate::cli::OutputFormat::Json,
    };
    output(&schema(args.entity), format)
}

fn schema(target: SchemaTarget) -> schemars::Schema {
    match target {
        SchemaTarget::College => schema_for!(College),
        SchemaTarget::Department => schema_for!(Department),
        SchemaTarget::Student => schema_for!(Student),
        SchemaTarget::Kpi => schema_for!(DepartmentKpi),
        SchemaTarget::Publication => schema_for!(Publication),
        SchemaTarget::Project => schema_for!(ResearchProject),
        SchemaTarget::Expense => schema_for!(ProjectExpense),
        SchemaTarget::Summary => schema_for!(DashboardSummary),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schemas_name_their_record() {
        let value = serde_json::to_value(schema(SchemaTarget::Student)).unwrap();
        assert_eq!(value["title"], "Student");
        assert!(value["properties"].get("student_id_number").is_some());

        let value = serde_json::to_value(schema(SchemaTarget::Summary)).unwrap();
        assert!(value["properties"].get("is_empty").is_some());
    }
}
