use std::cmp::Ordering;

use tracing::debug;

use super::{Turn, billing, general, technical};
use crate::context::IssueType;
use crate::tools::{Capability, ToolCall, Toolset, parse};
use crate::{Agent, Ctx, Outcome, StepResult};

pub(super) const NAME: &str = "triage";

const TOOLS: Toolset = Toolset::new(NAME, &[Capability::SetIssueType, Capability::UpdateUserProfile]);

const BILLING_STEMS: &[&str] = &[
    "refund", "invoice", "bill", "pay", "charge", "subscri", "price", "pricing", "receipt",
    "credit", "money",
];

const TECHNICAL_STEMS: &[&str] = &[
    "restart", "reboot", "service", "server", "error", "crash", "outage", "down", "bug", "broken",
    "latency", "timeout", "deploy", "login", "password", "api", "slow",
];

fn score(words: &[String], stems: &[&str]) -> usize {
    words
        .iter()
        .filter(|w| stems.iter().any(|s| w.starts_with(s)))
        .count()
}

/// Keyword vote over the message words. Only billing and technical keywords
/// vote; the higher score wins, and a tie or no hits at all means `General`.
/// Filler such as "help" or "quick question" never outweighs a specific
/// request.
pub fn classify(text: &str) -> IssueType {
    let words: Vec<String> = parse::words(text).collect();
    let billing = score(&words, BILLING_STEMS);
    let technical = score(&words, TECHNICAL_STEMS);

    match billing.cmp(&technical) {
        Ordering::Greater => IssueType::Billing,
        Ordering::Less => IssueType::Technical,
        Ordering::Equal => IssueType::General,
    }
}

fn specialist_for(issue: IssueType) -> &'static str {
    match issue {
        IssueType::Billing => billing::NAME,
        IssueType::Technical => technical::NAME,
        IssueType::General => general::NAME,
    }
}

/// Entry point of every turn: classify, remember profile details, hand off.
pub struct TriageAgent;

impl Agent<Turn> for TriageAgent {
    fn name(&self) -> &'static str {
        NAME
    }

    fn display_name(&self) -> &'static str {
        "Triage Agent"
    }

    fn run(&mut self, state: Turn, ctx: &mut Ctx) -> StepResult<Turn> {
        let issue = classify(&state.input);
        TOOLS.invoke(ToolCall::SetIssueType(issue), ctx)?;

        let name = parse::user_name(&state.input);
        let account_id = parse::account_id(&state.input);
        if name.is_some() || account_id.is_some() {
            TOOLS.invoke(ToolCall::UpdateUserProfile { name, account_id }, ctx)?;
        }

        let target = specialist_for(issue);
        debug!(%issue, target, "triage routed message");
        Ok((state, Outcome::Next(target)))
    }
}
