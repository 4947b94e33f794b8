//! A console support desk built from small sync agents.
//!
//! A triage agent classifies each message, records the issue type in the
//! shared session context ([`Ctx`]) and hands the turn off to a billing,
//! technical or general specialist. Specialists call capabilities whose
//! availability is decided per call by rules over the context, and every
//! answer passes the output [`guardrail`] before it is shown.
//!
//! # Quick start
//!
//! ```rust
//! use support_line::agents::{Turn, support_workflow};
//! use support_line::context::{IssueType, SupportContext};
//! use support_line::{Ctx, Runner};
//!
//! let mut ctx = Ctx::new().with_context(SupportContext::new(None, true, None));
//! let mut runner = Runner::new(support_workflow().unwrap());
//!
//! let turn = runner
//!     .run(Turn::new("I want a refund for order 123, amount 49.99"), &mut ctx)
//!     .unwrap();
//!
//! assert_eq!(ctx.context().issue_type, Some(IssueType::Billing));
//! assert!(turn.reply.starts_with("Refund issued for order 123"));
//! ```

mod agent;
pub mod agents;
pub mod config;
pub mod context;
mod ctx;
pub mod guardrail;
pub mod llm;
mod runner;
pub mod session;
pub mod tools;
mod workflow;

pub use agent::{Agent, Outcome, StepError, StepResult};
pub use ctx::{Ctx, RunEvent};
pub use runner::{ErrorEvent, Runner, StepEvent};
pub use workflow::{Workflow, WorkflowBuilder, WorkflowError};
