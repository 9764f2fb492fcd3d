use crate::error::LaunchError;
use crate::schedule::format_offset;
use crate::types::AccountId;
use chrono::{DateTime, Local};
use comfy_table::presets::UTF8_FULL;
use comfy_table::Table;
use owo_colors::OwoColorize;
use serde::Serialize;

/// One scheduled launch, ready for display.
#[derive(Debug, Clone, Serialize)]
pub struct ScheduleRow {
    pub launch_order: usize,
    pub account: AccountId,
    pub offset_secs: u64,
    /// Gap since the previous launch
    pub delay_secs: u64,
    pub launch_at: DateTime<Local>,
}

pub fn format_schedule_text(rows: &[ScheduleRow], window_secs: u64) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["#", "Account", "Starts", "Gap (s)", "Launch At"]);
    for row in rows {
        table.add_row(vec![
            (row.launch_order + 1).to_string(),
            row.account.to_string(),
            format_offset(row.offset_secs),
            row.delay_secs.to_string(),
            row.launch_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        ]);
    }
    let title = format!(
        "Launch schedule: {} accounts over {}s",
        rows.len(),
        window_secs
    );
    format!("{}\n{}", title.bold().underline(), table)
}

pub fn format_schedule_json(rows: &[ScheduleRow], window_secs: u64) -> Result<String, LaunchError> {
    Ok(serde_json::to_string_pretty(&serde_json::json!({
        "window_secs": window_secs,
        "launches": rows,
    }))?)
}
