use crate::error::LaunchError;
use crate::orchestrator::{AccountStatus, RunReport};
use comfy_table::presets::UTF8_FULL;
use comfy_table::Table;
use owo_colors::OwoColorize;

fn status_text(status: &AccountStatus) -> String {
    match status {
        AccountStatus::Completed => "completed".to_string(),
        AccountStatus::Failed { action, message } => format!("failed at {}: {}", action, message),
        AccountStatus::MissingPlan => "no plan".to_string(),
    }
}

pub fn format_run_report_text(report: &RunReport) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["#", "Account", "Tasks Done", "Status"]);
    for outcome in &report.outcomes {
        table.add_row(vec![
            (outcome.launch_order + 1).to_string(),
            outcome.account.to_string(),
            outcome.completed.len().to_string(),
            status_text(&outcome.status),
        ]);
    }

    let summary = format!(
        "{} succeeded, {} failed",
        report.succeeded(),
        report.failed()
    );
    let summary = if report.failed() == 0 {
        summary.green().to_string()
    } else {
        summary.red().to_string()
    };
    format!("{}\n{}", table, summary)
}

pub fn format_run_report_json(report: &RunReport) -> Result<String, LaunchError> {
    Ok(serde_json::to_string_pretty(report)?)
}
