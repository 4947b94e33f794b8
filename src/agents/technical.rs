use super::{Turn, respond};
use crate::tools::{Capability, ToolCall, ToolError, Toolset, parse};
use crate::{Agent, Ctx, Outcome, StepResult};

pub(super) const NAME: &str = "technical";

const TOOLS: Toolset = Toolset::new(
    NAME,
    &[Capability::RestartService, Capability::CheckServiceStatus],
);

const INSTRUCTIONS: &str = "You are the Technical Specialist. \
    Use technical tools. Restart is gated by issue_type == technical. \
    Avoid apology words.";

const NEED_SERVICE: &str = "Which service is affected? Share its name, \
    for example: restart the payments service.";

/// Restarts and health checks for backend services.
pub struct TechnicalAgent;

impl Agent<Turn> for TechnicalAgent {
    fn name(&self) -> &'static str {
        NAME
    }

    fn display_name(&self) -> &'static str {
        "Technical Specialist"
    }

    fn run(&mut self, mut state: Turn, ctx: &mut Ctx) -> StepResult<Turn> {
        let wants_restart = parse::words(&state.input)
            .any(|w| w.starts_with("restart") || w.starts_with("reboot"));
        let mut notes = Vec::new();

        let fallback = match parse::service_name(&state.input) {
            None => NEED_SERVICE.to_string(),
            Some(service_name) if wants_restart => {
                let call = ToolCall::RestartService {
                    service_name: service_name.clone(),
                };
                match TOOLS.invoke(call, ctx) {
                    Ok(out) => {
                        notes.push(out.clone());
                        out
                    }
                    Err(ToolError::Unavailable(_)) => {
                        // Gate closed: report health instead of restarting.
                        notes.push("restart tool disabled: issue is not classified technical".into());
                        let out = TOOLS.invoke(ToolCall::CheckServiceStatus { service_name }, ctx)?;
                        notes.push(out.clone());
                        format!("Restarts are reserved for confirmed technical incidents. {out}")
                    }
                    Err(e) => return Err(e.into()),
                }
            }
            Some(service_name) => {
                let out = TOOLS.invoke(ToolCall::CheckServiceStatus { service_name }, ctx)?;
                notes.push(out.clone());
                out
            }
        };

        state.reply = respond(ctx, &TOOLS, INSTRUCTIONS, &state.input, &notes, fallback);
        state.handled_by = Some(self.display_name());
        Ok((state, Outcome::Done))
    }
}
