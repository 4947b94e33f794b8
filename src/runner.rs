use crate::ctx::RunEvent;
use crate::{Ctx, Outcome, StepError, Workflow};
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// Passed to the `on_step` hook after each successful agent step.
pub struct StepEvent<'a> {
    pub agent: &'a str,
    pub outcome: &'a Outcome,
    pub duration: Duration,
    pub step_number: usize,
}

/// Passed to the `on_error` hook when an agent errors or a limit is exceeded.
pub struct ErrorEvent<'a> {
    pub agent: &'a str,
    pub error: &'a StepError,
    pub step_number: usize,
}

pub struct Runner<S: Clone + 'static> {
    wf: Workflow<S>,
    max_steps: usize,
    on_step: Option<Box<dyn FnMut(&StepEvent)>>,
    on_error: Option<Box<dyn FnMut(&ErrorEvent)>>,
}

impl<S: Clone + 'static> Runner<S> {
    pub fn new(wf: Workflow<S>) -> Self {
        Self {
            wf,
            max_steps: 16,
            on_step: None,
            on_error: None,
        }
    }

    /// Prevent handoff cycles from spinning forever.
    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = max_steps;
        self
    }

    /// Register a callback that fires after each successful agent step.
    pub fn on_step(mut self, cb: impl FnMut(&StepEvent) + 'static) -> Self {
        self.on_step = Some(Box::new(cb));
        self
    }

    /// Register a callback that fires when an agent errors or a limit is exceeded.
    pub fn on_error(mut self, cb: impl FnMut(&ErrorEvent) + 'static) -> Self {
        self.on_error = Some(Box::new(cb));
        self
    }

    /// Set both hooks to log step transitions and errors through `tracing`.
    pub fn with_tracing(self) -> Self {
        self.on_step(|e| {
            info!(
                step = e.step_number,
                agent = e.agent,
                outcome = ?e.outcome,
                elapsed_ms = e.duration.as_millis() as u64,
                "agent step finished"
            );
        })
        .on_error(|e| {
            warn!(step = e.step_number, agent = e.agent, error = %e.error, "agent step failed");
        })
    }

    fn fail(&mut self, agent: &str, step_number: usize, err: StepError) -> StepError {
        if let Some(cb) = &mut self.on_error {
            cb(&ErrorEvent {
                agent,
                error: &err,
                step_number,
            });
        }
        err
    }

    /// Run one turn from the start agent until an agent returns
    /// [`Outcome::Done`].
    pub fn run(&mut self, mut state: S, ctx: &mut Ctx) -> Result<S, StepError> {
        let mut current = self.wf.start();
        let mut step_number: usize = 0;

        for _ in 0..self.max_steps {
            step_number += 1;

            let agent = self
                .wf
                .agent_mut(current)
                .ok_or_else(|| StepError::other(format!("unknown step: {current}")))?;

            let start = Instant::now();
            let result = agent.run(state.clone(), ctx);
            let duration = start.elapsed();

            let (next_state, outcome) = match result {
                Ok(step) => step,
                Err(err) => return Err(self.fail(current, step_number, err)),
            };

            if let Some(cb) = &mut self.on_step {
                cb(&StepEvent {
                    agent: current,
                    outcome: &outcome,
                    duration,
                    step_number,
                });
            }

            state = next_state;

            match outcome {
                Outcome::Done => return Ok(state),
                Outcome::Fail(msg) => {
                    return Err(self.fail(current, step_number, StepError::Failed(msg)));
                }
                Outcome::Next(target) => {
                    if !self.wf.can_hand_off(current, target) {
                        let err = StepError::invalid(format!(
                            "handoff from '{current}' to '{target}' is not declared"
                        ));
                        return Err(self.fail(current, step_number, err));
                    }
                    let to = self.wf.display_name(target);
                    ctx.emit(RunEvent::Handoff { to });
                    ctx.emit(RunEvent::ActiveAgent(to));
                    current = target;
                }
            }
        }

        let err = StepError::other(format!(
            "max_steps exceeded (possible handoff loop) in workflow {}",
            self.wf.name()
        ));
        Err(self.fail(current, step_number, err))
    }
}
