use super::{Turn, respond};
use crate::tools::{Capability, ToolCall, Toolset};
use crate::{Agent, Ctx, Outcome, StepResult};

pub(super) const NAME: &str = "general";

const TOOLS: Toolset = Toolset::new(NAME, &[Capability::Faq]);

const INSTRUCTIONS: &str = "You are General Support. Prefer the FAQ tool for common queries. \
    Avoid apology words.";

pub struct GeneralAgent;

impl Agent<Turn> for GeneralAgent {
    fn name(&self) -> &'static str {
        NAME
    }

    fn display_name(&self) -> &'static str {
        "General Support"
    }

    fn run(&mut self, mut state: Turn, ctx: &mut Ctx) -> StepResult<Turn> {
        let query = state.input.trim().to_string();
        let out = TOOLS.invoke(ToolCall::Faq { query }, ctx)?;

        state.reply = respond(ctx, &TOOLS, INSTRUCTIONS, &state.input, &[out.clone()], out);
        state.handled_by = Some(self.display_name());
        Ok((state, Outcome::Done))
    }
}
