use crate::context::{IssueType, SupportContext};

/// Record the classified issue so handoff and gating can use it.
pub fn set_issue_type(ctx: &mut SupportContext, issue_type: IssueType) -> String {
    ctx.issue_type = Some(issue_type);
    format!("issue_type set to '{issue_type}'")
}

/// Store whichever of name and account id were provided. Blank values are
/// ignored.
pub fn update_user_profile(
    ctx: &mut SupportContext,
    name: Option<String>,
    account_id: Option<String>,
) -> String {
    let mut changed = Vec::new();

    if let Some(name) = name.filter(|n| !n.trim().is_empty()) {
        changed.push(format!("name='{name}'"));
        ctx.name = Some(name);
    }
    if let Some(account_id) = account_id.filter(|a| !a.trim().is_empty()) {
        changed.push(format!("account_id='{account_id}'"));
        ctx.account_id = Some(account_id);
    }

    if changed.is_empty() {
        return "No changes made.".to_string();
    }
    format!("Updated: {}", changed.join(", "))
}
