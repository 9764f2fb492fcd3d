//! CLI domain: parse, route, help, output, and presentation only.
//! Plan generation and scheduling live in their own modules; routes only wire them up.

mod help;
mod output;
mod parse;
mod presentation;
mod route;

pub use help::command_name;
pub use output::map_error;
pub use parse::{Cli, Commands};
pub use presentation::{
    format_plans_json, format_plans_text, format_run_report_json, format_run_report_text,
    format_schedule_json, format_schedule_text, ScheduleRow,
};
pub use route::RunContext;
