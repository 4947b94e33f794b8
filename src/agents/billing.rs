use super::{Turn, respond};
use crate::tools::{Capability, ToolCall, ToolError, Toolset, parse};
use crate::{Agent, Ctx, Outcome, StepResult};

pub(super) const NAME: &str = "billing";

const TOOLS: Toolset = Toolset::new(NAME, &[Capability::Refund, Capability::InvoiceStatus]);

const INSTRUCTIONS: &str = "You are the Billing Specialist. \
    Use billing tools for invoicing and refunds when appropriate. \
    If the user is not premium, the refund tool is disabled; in that case explain upgrade paths \
    without using apology words.";

const UPGRADE_PATH: &str = "Refunds are handled directly for Premium members. \
    Upgrading to Premium unlocks instant refunds, or you can reply with your order number \
    and our billing team will review the request by email within 2 business days.";

const NEED_DETAILS: &str = "To process a refund, share the order number and the amount, \
    for example: refund order 123, amount 49.99.";

/// Handles refunds and invoices. Refunds are premium-only.
pub struct BillingAgent;

impl Agent<Turn> for BillingAgent {
    fn name(&self) -> &'static str {
        NAME
    }

    fn display_name(&self) -> &'static str {
        "Billing Specialist"
    }

    fn run(&mut self, mut state: Turn, ctx: &mut Ctx) -> StepResult<Turn> {
        let wants_refund = parse::words(&state.input).any(|w| w.starts_with("refund"));
        let mut notes = Vec::new();

        let fallback = if wants_refund {
            match (parse::order_id(&state.input), parse::amount(&state.input)) {
                (Some(order_id), Some(amount)) => {
                    match TOOLS.invoke(ToolCall::Refund { order_id, amount }, ctx) {
                        Ok(out) => {
                            notes.push(out.clone());
                            format!("{out} The funds usually arrive within 5-7 business days.")
                        }
                        Err(ToolError::Unavailable(_)) => {
                            notes.push("refund tool disabled: user is not a premium member".into());
                            UPGRADE_PATH.to_string()
                        }
                        Err(e) => return Err(e.into()),
                    }
                }
                _ => NEED_DETAILS.to_string(),
            }
        } else {
            let account_id = ctx.context().account_id.clone();
            let out = TOOLS.invoke(ToolCall::InvoiceStatus { account_id }, ctx)?;
            notes.push(out.clone());
            out
        };

        state.reply = respond(ctx, &TOOLS, INSTRUCTIONS, &state.input, &notes, fallback);
        state.handled_by = Some(self.display_name());
        Ok((state, Outcome::Done))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::SupportContext;
    use crate::ctx::RunEvent;

    const REFUND: &str = "I want a refund for order 123, amount 49.99";

    fn ctx(premium: bool) -> Ctx {
        Ctx::new().with_context(SupportContext::new(None, premium, Some("AC-1".into())))
    }

    #[test]
    fn premium_refund_is_issued() {
        let mut ctx = ctx(true);
        let (turn, outcome) = BillingAgent.run(Turn::new(REFUND), &mut ctx).unwrap();

        assert_eq!(outcome, Outcome::Done);
        assert!(turn.reply.starts_with("Refund issued for order 123, amount $49.99."));
        assert!(ctx.events().contains(&RunEvent::ToolCalled(Capability::Refund)));
    }

    #[test]
    fn non_premium_refund_explains_upgrade() {
        let mut ctx = ctx(false);
        let (turn, _) = BillingAgent.run(Turn::new(REFUND), &mut ctx).unwrap();

        assert_eq!(turn.reply, UPGRADE_PATH);
        assert_eq!(ctx.events(), &[RunEvent::ToolUnavailable(Capability::Refund)]);
    }

    #[test]
    fn refund_without_details_asks_for_them() {
        let mut ctx = ctx(true);
        let (turn, _) = BillingAgent.run(Turn::new("I need a refund"), &mut ctx).unwrap();
        assert_eq!(turn.reply, NEED_DETAILS);
        assert!(ctx.events().is_empty());
    }

    #[test]
    fn other_billing_questions_check_invoice() {
        let mut ctx = ctx(false);
        let (turn, _) = BillingAgent
            .run(Turn::new("Was my last invoice paid?"), &mut ctx)
            .unwrap();
        assert_eq!(turn.reply, "Invoice status for AC-1: PAID on-time (mock).");
        assert_eq!(turn.handled_by, Some("Billing Specialist"));
    }
}
