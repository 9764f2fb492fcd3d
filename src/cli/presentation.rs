//! CLI presentation: text and json formatters per command family.

mod plan;
mod run;
mod schedule;

pub use plan::{format_plans_json, format_plans_text};
pub use run::{format_run_report_json, format_run_report_text};
pub use schedule::{format_schedule_json, format_schedule_text, ScheduleRow};
