//! Records for the seven managed entities.
//!
//! Each record mirrors one backend collection under `/dashboard/` and
//! implements [`Resource`](crate::resource::Resource). Read-only display
//! columns (`college_name`, `department_name`, `project_name`) are filled by
//! the backend and never submitted.

mod college;
mod department;
mod expense;
mod kpi;
mod project;
mod publication;
mod student;

pub use college::College;
pub use department::Department;
pub use expense::ProjectExpense;
pub use kpi::DepartmentKpi;
pub use project::ResearchProject;
pub use publication::Publication;
pub use student::Student;
