//! Interactive console loop: collect the profile, then route one line at a
//! time through the support workflow.

use std::cell::RefCell;
use std::io::{self, BufRead, Write};
use std::rc::Rc;

use tracing::{debug, warn};

use crate::agents::Turn;
use crate::context::SupportContext;
use crate::{Ctx, Runner, guardrail};

pub const WELCOME: &str = "\
========================================================
 Console Support Agent System
 - Triage + Billing + Technical + General
 - Tools with dynamic enable rules
 - Shared session context
 - Agent-to-agent handoffs
 - Event trace display
 - Output guardrail (blocks 'sorry'/'apologize')
========================================================
Type 'exit' to quit.
";

const EXAMPLES: &[&str] = &[
    "I want a refund for order 123, amount 49.99",
    "Restart the payments service",
    "What's your delivery policy?",
];

const EXIT_WORDS: [&str; 2] = ["exit", "quit"];

/// Lenient yes/no parsing for console answers.
pub fn to_bool(s: &str) -> bool {
    matches!(s.trim().to_lowercase().as_str(), "1" | "y" | "yes" | "true" | "t")
}

fn non_empty(s: String) -> Option<String> {
    let s = s.trim();
    (!s.is_empty()).then(|| s.to_string())
}

pub struct Session<R: BufRead, W: Write + 'static> {
    input: R,
    out: Rc<RefCell<W>>,
    runner: Runner<Turn>,
    ctx: Ctx,
}

impl<R: BufRead, W: Write + 'static> Session<R, W> {
    /// The trace is written to `out` while the turn runs, so it shows up
    /// before the model answers.
    pub fn new(input: R, out: W, runner: Runner<Turn>, ctx: Ctx) -> Self {
        let out = Rc::new(RefCell::new(out));
        let trace = Rc::clone(&out);
        let ctx = ctx.with_sink(move |event| {
            if let Err(e) = writeln!(trace.borrow_mut(), "{event}") {
                warn!(error = %e, "could not write trace event");
            }
        });

        Self {
            input,
            out,
            runner,
            ctx,
        }
    }

    pub fn ctx(&self) -> &Ctx {
        &self.ctx
    }

    fn say(&self, text: &str) -> io::Result<()> {
        writeln!(self.out.borrow_mut(), "{text}")
    }

    /// Print `label` and read one line. `None` at end of input. A line that
    /// is not valid UTF-8 comes back empty so callers skip it.
    fn prompt(&mut self, label: &str) -> io::Result<Option<String>> {
        {
            let mut out = self.out.borrow_mut();
            write!(out, "{label}")?;
            out.flush()?;
        }

        let mut buf = Vec::new();
        if self.input.read_until(b'\n', &mut buf)? == 0 {
            return Ok(None);
        }

        match String::from_utf8(buf) {
            Ok(line) => Ok(Some(line.trim().to_string())),
            Err(e) => {
                warn!(error = %e, "ignoring input line that is not valid UTF-8");
                self.say("(input ignored: not valid UTF-8)")?;
                Ok(Some(String::new()))
            }
        }
    }

    /// Ask for name, premium status and account id and store them as the
    /// session context.
    pub fn collect_profile(&mut self) -> io::Result<()> {
        let name = self.prompt("Enter your name (or leave blank): ")?.and_then(non_empty);
        let is_premium = self
            .prompt("Are you a premium user? [y/N]: ")?
            .is_some_and(|answer| to_bool(&answer));
        let account_id = self.prompt("Account ID (optional): ")?.and_then(non_empty);

        *self.ctx.context_mut() = SupportContext::new(name, is_premium, account_id);
        self.say(&format!("\nContext saved: {}", self.ctx.context().snapshot()))
    }

    /// Route one message; the trace streams out through the context sink,
    /// then the filtered answer and the context snapshot follow. A failed
    /// turn is reported, not propagated.
    pub fn handle(&mut self, message: &str) -> io::Result<()> {
        debug!(message, "new turn");
        let result = self.runner.run(Turn::new(message), &mut self.ctx);
        self.ctx.take_events();

        match result {
            Ok(turn) => self.say(&format!("\n{}\n", guardrail::filter(&turn.reply)))?,
            Err(e) => {
                warn!(error = %e, "turn failed");
                self.say(&format!("[error] {e}\n"))?;
            }
        }

        self.say(&format!("[context] {}\n", self.ctx.context().snapshot()))
    }

    pub fn run(&mut self) -> io::Result<()> {
        self.say(WELCOME)?;
        self.collect_profile()?;

        self.say("\nAsk your question(s). Examples:")?;
        for example in EXAMPLES {
            self.say(&format!(" - {example}"))?;
        }
        self.say("")?;

        while let Some(line) = self.prompt("You: ")? {
            if line.is_empty() {
                continue;
            }
            if EXIT_WORDS.contains(&line.to_lowercase().as_str()) {
                return self.say("Goodbye.");
            }
            self.handle(&line)?;
        }

        self.say("")
    }
}
