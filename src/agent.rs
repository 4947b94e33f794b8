use crate::ctx::Ctx;
use crate::tools::ToolError;

/// The result of running a step: a new state plus what to do next.
pub type StepResult<S> = Result<(S, Outcome), StepError>;

/// A sync agent that handles one part of a support turn.
///
/// Implement this trait on your own structs and register them into a
/// [`crate::Workflow`] to build a routing graph.
pub trait Agent<S>: Send + 'static {
    /// A unique name for this agent, used for routing with [`Outcome::Next`].
    fn name(&self) -> &'static str;

    /// Human-facing name shown in the handoff trace.
    fn display_name(&self) -> &'static str {
        self.name()
    }

    /// Run one step. Returns the updated state and an [`Outcome`] that tells
    /// the runner what to do next.
    fn run(&mut self, state: S, ctx: &mut Ctx) -> StepResult<S>;
}

/// Control flow for the runner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Turn complete, return the final state.
    Done,
    /// Hand the turn off to another agent by name. The edge must be declared
    /// with [`crate::WorkflowBuilder::handoff`].
    Next(&'static str),
    /// Stop the turn with an error.
    Fail(String),
}

/// Error type for agent steps, with variants designed around what the caller
/// can do about them.
#[derive(Debug, thiserror::Error)]
pub enum StepError {
    /// Bad input or agent logic error. Don't retry, fix the code.
    #[error("invalid: {0}")]
    Invalid(String),
    /// Transient failure (network, rate limit). Retrying might help.
    #[error("transient: {0}")]
    Transient(String),
    /// Agent decided to fail explicitly via Outcome::Fail.
    #[error("failed: {0}")]
    Failed(String),
    /// Everything else. Inspect the message for details.
    #[error("{0}")]
    Other(String),
}

impl From<ureq::Error> for StepError {
    fn from(e: ureq::Error) -> Self {
        StepError::Transient(e.to_string())
    }
}

impl From<std::io::Error> for StepError {
    fn from(e: std::io::Error) -> Self {
        StepError::Other(e.to_string())
    }
}

impl From<ToolError> for StepError {
    fn from(e: ToolError) -> Self {
        StepError::Invalid(e.to_string())
    }
}

impl StepError {
    /// Create an [`Invalid`](StepError::Invalid) error.
    pub fn invalid(msg: impl Into<String>) -> Self {
        StepError::Invalid(msg.into())
    }

    /// Create an [`Other`](StepError::Other) error.
    pub fn other(msg: impl Into<String>) -> Self {
        StepError::Other(msg.into())
    }

    /// Create a [`Transient`](StepError::Transient) error.
    pub fn transient(msg: impl Into<String>) -> Self {
        StepError::Transient(msg.into())
    }
}
