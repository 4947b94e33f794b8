use crate::Agent;
use std::collections::{HashMap, HashSet};

// ---------------------------------------------------------------------------
// WorkflowError
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum WorkflowError {
    #[error("duplicate agent name: {0}")]
    DuplicateAgent(&'static str),
    #[error("unknown step: {0}")]
    UnknownStep(&'static str),
    #[error("workflow missing start step")]
    MissingStart,
}

// ---------------------------------------------------------------------------
// WorkflowBuilder
// ---------------------------------------------------------------------------

pub struct WorkflowBuilder<S: Clone + 'static> {
    name: &'static str,
    start: Option<&'static str>,
    agents: HashMap<&'static str, Box<dyn Agent<S>>>,
    handoffs: HashSet<(&'static str, &'static str)>,
    duplicate: Option<&'static str>,
}

impl<S: Clone + 'static> WorkflowBuilder<S> {
    pub fn register<A: Agent<S>>(mut self, agent: A) -> Self {
        let name = agent.name();
        if self.agents.contains_key(name) {
            self.duplicate = Some(name);
        }
        self.agents.insert(name, Box::new(agent));

        // The first registered agent is the entry point unless start_at says otherwise.
        if self.start.is_none() {
            self.start = Some(name);
        }

        self
    }

    pub fn start_at(mut self, step: &'static str) -> Self {
        self.start = Some(step);
        self
    }

    /// Allow `from` to hand the turn off to `to` via [`crate::Outcome::Next`].
    pub fn handoff(mut self, from: &'static str, to: &'static str) -> Self {
        self.handoffs.insert((from, to));
        self
    }

    pub fn build(self) -> Result<Workflow<S>, WorkflowError> {
        if let Some(name) = self.duplicate {
            return Err(WorkflowError::DuplicateAgent(name));
        }

        let start = self.start.ok_or(WorkflowError::MissingStart)?;
        if !self.agents.contains_key(start) {
            return Err(WorkflowError::UnknownStep(start));
        }

        // Both ends of every handoff must be registered.
        for &(from, to) in &self.handoffs {
            for step in [from, to] {
                if !self.agents.contains_key(step) {
                    return Err(WorkflowError::UnknownStep(step));
                }
            }
        }

        Ok(Workflow {
            name: self.name,
            start,
            agents: self.agents,
            handoffs: self.handoffs,
        })
    }
}

// ---------------------------------------------------------------------------
// Workflow (validated, only constructed via build())
// ---------------------------------------------------------------------------

pub struct Workflow<S: Clone + 'static> {
    name: &'static str,
    start: &'static str,
    agents: HashMap<&'static str, Box<dyn Agent<S>>>,
    handoffs: HashSet<(&'static str, &'static str)>,
}

impl<S: Clone + 'static> Workflow<S> {
    pub fn builder(name: &'static str) -> WorkflowBuilder<S> {
        WorkflowBuilder {
            name,
            start: None,
            agents: HashMap::new(),
            handoffs: HashSet::new(),
            duplicate: None,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Agents `from` may hand off to, sorted by name.
    pub fn handoffs_from(&self, from: &str) -> Vec<&'static str> {
        let mut targets: Vec<_> = self
            .handoffs
            .iter()
            .filter(|(f, _)| *f == from)
            .map(|&(_, to)| to)
            .collect();
        targets.sort_unstable();
        targets
    }

    // --- stuff the runner uses (keep pub(crate)) ---
    pub(crate) fn start(&self) -> &'static str {
        self.start
    }

    pub(crate) fn agent_mut(&mut self, name: &'static str) -> Option<&mut Box<dyn Agent<S>>> {
        self.agents.get_mut(name)
    }

    pub(crate) fn display_name(&self, name: &'static str) -> &'static str {
        self.agents.get(name).map_or(name, |a| a.display_name())
    }

    pub(crate) fn can_hand_off(&self, from: &'static str, to: &'static str) -> bool {
        self.handoffs.contains(&(from, to))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Ctx, Outcome, StepResult};

    #[derive(Clone)]
    struct S;

    struct FakeAgent(&'static str);

    impl Agent<S> for FakeAgent {
        fn name(&self) -> &'static str {
            self.0
        }
        fn run(&mut self, state: S, _ctx: &mut Ctx) -> StepResult<S> {
            Ok((state, Outcome::Done))
        }
    }

    #[test]
    fn build_valid_workflow() {
        let wf = Workflow::builder("test")
            .register(FakeAgent("a"))
            .register(FakeAgent("b"))
            .register(FakeAgent("c"))
            .start_at("a")
            .handoff("a", "c")
            .handoff("a", "b")
            .build()
            .unwrap();

        assert_eq!(wf.name(), "test");
        assert_eq!(wf.start(), "a");
        assert!(wf.can_hand_off("a", "b"));
        assert!(!wf.can_hand_off("b", "a"));
        assert_eq!(wf.handoffs_from("a"), vec!["b", "c"]);
    }

    #[test]
    fn missing_start_on_empty_builder() {
        let err = Workflow::<S>::builder("test").build().err().unwrap();
        assert!(matches!(err, WorkflowError::MissingStart));
    }

    #[test]
    fn unknown_start_at_step() {
        let err = Workflow::builder("test")
            .register(FakeAgent("a"))
            .start_at("missing")
            .build()
            .err()
            .unwrap();

        assert!(matches!(err, WorkflowError::UnknownStep("missing")));
    }

    #[test]
    fn unknown_handoff_target() {
        let err = Workflow::builder("test")
            .register(FakeAgent("a"))
            .handoff("a", "missing")
            .build()
            .err()
            .unwrap();

        assert!(matches!(err, WorkflowError::UnknownStep("missing")));
    }

    #[test]
    fn first_agent_becomes_default_start() {
        let wf = Workflow::builder("test")
            .register(FakeAgent("first"))
            .register(FakeAgent("second"))
            .build()
            .unwrap();

        assert_eq!(wf.start(), "first");
        assert_eq!(wf.display_name("second"), "second");
    }

    #[test]
    fn duplicate_agent_rejected() {
        let err = Workflow::builder("test")
            .register(FakeAgent("a"))
            .register(FakeAgent("a"))
            .build()
            .err()
            .unwrap();

        assert!(matches!(err, WorkflowError::DuplicateAgent("a")));
        assert_eq!(err.to_string(), "duplicate agent name: a");
    }
}
