use std::fmt;

use crate::context::SupportContext;
use crate::llm::{LanguageModel, LlmRequest};
use crate::tools::Capability;

/// Something worth showing in the console trace while a turn runs.
#[derive(Debug, Clone, PartialEq)]
pub enum RunEvent {
    Handoff { to: &'static str },
    ActiveAgent(&'static str),
    ToolCalled(Capability),
    ToolOutput(String),
    ToolUnavailable(Capability),
}

impl fmt::Display for RunEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Handoff { to } => write!(f, "[handoff → {to}]"),
            Self::ActiveAgent(name) => write!(f, "[active agent] {name}"),
            Self::ToolCalled(cap) => write!(f, "[tool call] {cap}"),
            Self::ToolOutput(out) => write!(f, "[tool output] {out}"),
            Self::ToolUnavailable(cap) => write!(f, "[tool unavailable] {cap}"),
        }
    }
}

/// Callback that sees every event the moment it is emitted.
pub type EventSink = Box<dyn FnMut(&RunEvent)>;

/// Execution context for agents: the session's support context, the event
/// trace of the current turn, and the language model handle.
pub struct Ctx {
    support: SupportContext,
    events: Vec<RunEvent>,
    sink: Option<EventSink>,
    model: Option<Box<dyn LanguageModel>>,
}

impl Ctx {
    pub fn new() -> Self {
        Self {
            support: SupportContext::default(),
            events: vec![],
            sink: None,
            model: None,
        }
    }

    pub fn with_context(mut self, support: SupportContext) -> Self {
        self.support = support;
        self
    }

    pub fn with_model(mut self, model: Box<dyn LanguageModel>) -> Self {
        self.model = Some(model);
        self
    }

    /// Forward events to `sink` as they happen, in addition to recording them.
    pub fn with_sink(mut self, sink: impl FnMut(&RunEvent) + 'static) -> Self {
        self.sink = Some(Box::new(sink));
        self
    }

    pub fn context(&self) -> &SupportContext {
        &self.support
    }

    pub fn context_mut(&mut self) -> &mut SupportContext {
        &mut self.support
    }

    pub fn has_model(&self) -> bool {
        self.model.is_some()
    }

    /// Start a chat request against the configured model.
    pub fn llm(&self) -> LlmRequest<'_> {
        LlmRequest::new(self.model.as_deref())
    }

    pub fn emit(&mut self, event: RunEvent) {
        if let Some(sink) = &mut self.sink {
            sink(&event);
        }
        self.events.push(event);
    }

    pub fn events(&self) -> &[RunEvent] {
        &self.events
    }

    /// Hand back the trace collected so far and start a fresh one.
    pub fn take_events(&mut self) -> Vec<RunEvent> {
        std::mem::take(&mut self.events)
    }
}

impl Default for Ctx {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn take_events_drains_trace() {
        let mut ctx = Ctx::new();
        ctx.emit(RunEvent::ActiveAgent("Billing Specialist"));
        ctx.emit(RunEvent::ToolCalled(Capability::Refund));

        let taken = ctx.take_events();
        assert_eq!(taken.len(), 2);
        assert!(ctx.events().is_empty());
    }

    #[test]
    fn sink_sees_events_immediately() {
        use std::cell::RefCell;
        use std::rc::Rc;

        let seen = Rc::new(RefCell::new(Vec::new()));
        let seen_clone = Rc::clone(&seen);
        let mut ctx = Ctx::new().with_sink(move |e| seen_clone.borrow_mut().push(e.to_string()));

        ctx.emit(RunEvent::ToolCalled(Capability::Faq));
        assert_eq!(*seen.borrow(), vec!["[tool call] faq".to_string()]);
        assert_eq!(ctx.events().len(), 1);
    }

    #[test]
    fn event_display_matches_console_trace() {
        assert_eq!(
            RunEvent::Handoff { to: "Technical Specialist" }.to_string(),
            "[handoff → Technical Specialist]"
        );
        assert_eq!(
            RunEvent::ToolCalled(Capability::RestartService).to_string(),
            "[tool call] restart_service"
        );
        assert_eq!(
            RunEvent::ToolOutput("done".into()).to_string(),
            "[tool output] done"
        );
    }

    #[test]
    fn context_mutations_are_visible() {
        let mut ctx = Ctx::new().with_context(SupportContext::new(None, true, None));
        ctx.context_mut().account_id = Some("A-9".into());
        assert!(ctx.context().is_premium_user);
        assert_eq!(ctx.context().account_id.as_deref(), Some("A-9"));
        assert!(!ctx.has_model());
    }
}
