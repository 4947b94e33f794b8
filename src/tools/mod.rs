//! Capabilities the support agents can invoke, and the gating rules that
//! decide whether they may run right now.

pub mod billing;
pub mod general;
pub mod parse;
pub mod technical;
pub mod triage;

use std::fmt;

use tracing::debug;

use crate::context::{IssueType, SupportContext};
use crate::ctx::{Ctx, RunEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    SetIssueType,
    UpdateUserProfile,
    Refund,
    InvoiceStatus,
    RestartService,
    CheckServiceStatus,
    Faq,
}

impl Capability {
    pub fn name(self) -> &'static str {
        match self {
            Self::SetIssueType => "set_issue_type",
            Self::UpdateUserProfile => "update_user_profile",
            Self::Refund => "refund",
            Self::InvoiceStatus => "invoice_status",
            Self::RestartService => "restart_service",
            Self::CheckServiceStatus => "check_service_status",
            Self::Faq => "faq",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::SetIssueType => "Set the current issue_type (billing, technical or general).",
            Self::UpdateUserProfile => "Persist user name and/or account_id to shared context.",
            Self::Refund => "Process a refund for a given order_id and amount (USD). Premium users only.",
            Self::InvoiceStatus => "Provide the status of the latest invoice.",
            Self::RestartService => "Restart a backend service by name. Technical issues only.",
            Self::CheckServiceStatus => "Check the health of a backend service.",
            Self::Faq => "Answer a frequently asked question from the built-in KB.",
        }
    }

    /// Gate evaluated against the live context right before invocation.
    pub fn is_enabled(self, ctx: &SupportContext) -> bool {
        match self {
            Self::Refund => ctx.is_premium_user,
            Self::RestartService => ctx.issue_type == Some(IssueType::Technical),
            _ => true,
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A capability invocation with its arguments.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolCall {
    SetIssueType(IssueType),
    UpdateUserProfile {
        name: Option<String>,
        account_id: Option<String>,
    },
    Refund {
        order_id: String,
        amount: f64,
    },
    InvoiceStatus {
        account_id: Option<String>,
    },
    RestartService {
        service_name: String,
    },
    CheckServiceStatus {
        service_name: String,
    },
    Faq {
        query: String,
    },
}

impl ToolCall {
    pub fn capability(&self) -> Capability {
        match self {
            Self::SetIssueType(_) => Capability::SetIssueType,
            Self::UpdateUserProfile { .. } => Capability::UpdateUserProfile,
            Self::Refund { .. } => Capability::Refund,
            Self::InvoiceStatus { .. } => Capability::InvoiceStatus,
            Self::RestartService { .. } => Capability::RestartService,
            Self::CheckServiceStatus { .. } => Capability::CheckServiceStatus,
            Self::Faq { .. } => Capability::Faq,
        }
    }

    fn execute(self, support: &mut SupportContext) -> String {
        match self {
            Self::SetIssueType(issue) => triage::set_issue_type(support, issue),
            Self::UpdateUserProfile { name, account_id } => {
                triage::update_user_profile(support, name, account_id)
            }
            Self::Refund { order_id, amount } => billing::refund(&order_id, amount),
            Self::InvoiceStatus { account_id } => billing::invoice_status(account_id.as_deref()),
            Self::RestartService { service_name } => technical::restart_service(&service_name),
            Self::CheckServiceStatus { service_name } => {
                technical::check_service_status(&service_name)
            }
            Self::Faq { query } => general::faq(&query),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ToolError {
    /// The capability's gate is closed for the current context.
    #[error("capability unavailable: {0}")]
    Unavailable(Capability),
    /// The agent tried to call something outside its toolset.
    #[error("{agent} does not expose {capability}")]
    NotExposed {
        agent: &'static str,
        capability: Capability,
    },
}

/// The fixed set of capabilities one agent exposes.
#[derive(Debug, Clone, Copy)]
pub struct Toolset {
    owner: &'static str,
    capabilities: &'static [Capability],
}

impl Toolset {
    pub const fn new(owner: &'static str, capabilities: &'static [Capability]) -> Self {
        Self {
            owner,
            capabilities,
        }
    }

    pub fn owner(&self) -> &'static str {
        self.owner
    }

    pub fn exposes(&self, capability: Capability) -> bool {
        self.capabilities.contains(&capability)
    }

    /// Capabilities whose gate is open for `ctx`.
    pub fn enabled(&self, ctx: &SupportContext) -> Vec<Capability> {
        self.capabilities
            .iter()
            .copied()
            .filter(|c| c.is_enabled(ctx))
            .collect()
    }

    /// Check membership and the gate, then run the call and record it in the
    /// trace.
    pub fn invoke(&self, call: ToolCall, ctx: &mut Ctx) -> Result<String, ToolError> {
        let capability = call.capability();
        if !self.exposes(capability) {
            return Err(ToolError::NotExposed {
                agent: self.owner,
                capability,
            });
        }

        if !capability.is_enabled(ctx.context()) {
            debug!(agent = self.owner, %capability, "capability gated off");
            ctx.emit(RunEvent::ToolUnavailable(capability));
            return Err(ToolError::Unavailable(capability));
        }

        ctx.emit(RunEvent::ToolCalled(capability));
        let output = call.execute(ctx.context_mut());
        debug!(agent = self.owner, %capability, %output, "capability finished");
        ctx.emit(RunEvent::ToolOutput(output.clone()));
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BILLING: Toolset = Toolset::new("billing", &[Capability::Refund, Capability::InvoiceStatus]);
    const TECHNICAL: Toolset = Toolset::new(
        "technical",
        &[Capability::RestartService, Capability::CheckServiceStatus],
    );

    fn ctx_with(premium: bool, issue: Option<IssueType>) -> Ctx {
        let mut support = SupportContext::new(None, premium, None);
        support.issue_type = issue;
        Ctx::new().with_context(support)
    }

    fn refund_call() -> ToolCall {
        ToolCall::Refund {
            order_id: "123".into(),
            amount: 49.99,
        }
    }

    // --- gating table ---

    #[test]
    fn refund_unavailable_for_every_non_premium_context() {
        let issues = [
            None,
            Some(IssueType::Billing),
            Some(IssueType::Technical),
            Some(IssueType::General),
        ];
        for issue in issues {
            let mut ctx = ctx_with(false, issue);
            let err = BILLING.invoke(refund_call(), &mut ctx).unwrap_err();
            assert_eq!(err, ToolError::Unavailable(Capability::Refund));
            assert_eq!(ctx.events(), &[RunEvent::ToolUnavailable(Capability::Refund)]);
        }
    }

    #[test]
    fn restart_unavailable_unless_technical() {
        for premium in [true, false] {
            for issue in [None, Some(IssueType::Billing), Some(IssueType::General)] {
                let mut ctx = ctx_with(premium, issue);
                let call = ToolCall::RestartService {
                    service_name: "payments".into(),
                };
                let err = TECHNICAL.invoke(call, &mut ctx).unwrap_err();
                assert_eq!(err, ToolError::Unavailable(Capability::RestartService));
            }
        }
    }

    #[test]
    fn restart_runs_when_technical() {
        let mut ctx = ctx_with(false, Some(IssueType::Technical));
        let out = TECHNICAL
            .invoke(
                ToolCall::RestartService {
                    service_name: "payments".into(),
                },
                &mut ctx,
            )
            .unwrap();
        assert_eq!(out, "Service 'payments' restarted successfully.");
    }

    #[test]
    fn premium_refund_emits_call_and_output() {
        let mut ctx = ctx_with(true, Some(IssueType::Billing));
        let out = BILLING.invoke(refund_call(), &mut ctx).unwrap();
        assert_eq!(out, "Refund issued for order 123, amount $49.99.");
        assert_eq!(
            ctx.events(),
            &[
                RunEvent::ToolCalled(Capability::Refund),
                RunEvent::ToolOutput(out.clone()),
            ]
        );
    }

    #[test]
    fn ungated_capabilities_always_enabled() {
        let ctx = SupportContext::default();
        for cap in [
            Capability::SetIssueType,
            Capability::UpdateUserProfile,
            Capability::InvoiceStatus,
            Capability::CheckServiceStatus,
            Capability::Faq,
        ] {
            assert!(cap.is_enabled(&ctx), "{cap} should be enabled");
        }
    }

    #[test]
    fn foreign_capability_not_exposed() {
        let mut ctx = ctx_with(true, None);
        let err = TECHNICAL.invoke(refund_call(), &mut ctx).unwrap_err();
        assert!(matches!(
            err,
            ToolError::NotExposed {
                agent: "technical",
                capability: Capability::Refund
            }
        ));
        assert!(ctx.events().is_empty());
    }

    #[test]
    fn enabled_lists_only_open_gates() {
        let ctx = SupportContext::new(None, false, None);
        assert_eq!(BILLING.enabled(&ctx), vec![Capability::InvoiceStatus]);
    }
}
