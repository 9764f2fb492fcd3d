use crate::error::LaunchError;
use crate::orchestrator::AccountPlans;
use crate::plan::TaskPlan;
use crate::types::AccountId;
use owo_colors::OwoColorize;

/// Plans in launch order; accounts without a plan are skipped.
fn in_order<'a>(
    accounts: &'a [AccountId],
    plans: &'a AccountPlans,
) -> impl Iterator<Item = (AccountId, &'a TaskPlan)> + 'a {
    accounts
        .iter()
        .filter_map(move |&account| plans.get(account).map(|plan| (account, plan)))
}

/// One line per account: `Account 3: 1. faucet | 2. bean | 3. logs`.
pub fn format_plans_text(accounts: &[AccountId], plans: &AccountPlans) -> String {
    in_order(accounts, plans)
        .map(|(account, plan)| {
            let label = format!("Account {}:", account);
            format!("{} {}", label.bold(), plan.execution_line())
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn format_plans_json(
    accounts: &[AccountId],
    plans: &AccountPlans,
) -> Result<String, LaunchError> {
    let arr: Vec<serde_json::Value> = in_order(accounts, plans)
        .map(|(account, plan)| {
            serde_json::json!({
                "account": account,
                "actions": plan.actions(),
                "head": plan.head(),
                "body": plan.body(),
                "tail": plan.tail(),
            })
        })
        .collect();
    Ok(serde_json::to_string_pretty(&arr)?)
}
