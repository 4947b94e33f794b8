//! The four support agents and the workflow that connects them.

mod billing;
mod general;
mod technical;
mod triage;

pub use billing::BillingAgent;
pub use general::GeneralAgent;
pub use technical::TechnicalAgent;
pub use triage::{TriageAgent, classify};

use tracing::warn;

use crate::tools::Toolset;
use crate::tools::parse::strip_code_fences;
use crate::{Ctx, Workflow, WorkflowError};

/// State carried through one user turn.
#[derive(Clone, Debug, Default)]
pub struct Turn {
    pub input: String,
    pub reply: String,
    pub handled_by: Option<&'static str>,
}

impl Turn {
    pub fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            ..Self::default()
        }
    }
}

/// Triage at the entry, with one handoff edge to each specialist.
pub fn support_workflow() -> Result<Workflow<Turn>, WorkflowError> {
    Workflow::builder("support-desk")
        .register(TriageAgent)
        .register(BillingAgent)
        .register(TechnicalAgent)
        .register(GeneralAgent)
        .start_at(triage::NAME)
        .handoff(triage::NAME, billing::NAME)
        .handoff(triage::NAME, technical::NAME)
        .handoff(triage::NAME, general::NAME)
        .build()
}

fn bullet_list(lines: impl IntoIterator<Item = String>) -> String {
    let lines: Vec<String> = lines.into_iter().map(|l| format!("- {l}")).collect();
    if lines.is_empty() {
        "(none)".to_string()
    } else {
        lines.join("\n")
    }
}

/// Ask the model to phrase the answer from the tool results. The prompt lists
/// only the capabilities of `tools` whose gate is open for this customer.
/// Falls back to `fallback` when no model is configured or the call fails.
fn respond(
    ctx: &Ctx,
    tools: &Toolset,
    instructions: &str,
    input: &str,
    notes: &[String],
    fallback: String,
) -> String {
    if !ctx.has_model() {
        return fallback;
    }

    let available = bullet_list(
        tools
            .enabled(ctx.context())
            .into_iter()
            .map(|c| format!("{c}: {}", c.description())),
    );
    let results = bullet_list(notes.iter().cloned());

    let reply = ctx
        .llm()
        .system(instructions)
        .user(format!(
            "Customer message: {input}\n\n\
             Customer context: {}\n\n\
             Available tools:\n{available}\n\n\
             Tool results:\n{results}\n\n\
             Suggested answer: {fallback}\n\n\
             Write the reply to the customer in plain text.",
            ctx.context().snapshot()
        ))
        .send();

    match reply {
        Ok(text) => {
            let text = strip_code_fences(&text);
            if text.is_empty() { fallback } else { text }
        }
        Err(e) => {
            warn!(agent = tools.owner(), error = %e, "language model unavailable, using canned reply");
            fallback
        }
    }
}
