//! Output filter applied to every answer before it reaches the console.

use std::borrow::Cow;

use tracing::info;

/// Tokens that must never reach the user, matched case-insensitively.
pub const DENYLIST: [&str; 4] = ["sorry", "apologize", "apologies", "apologise"];

/// Shown instead of an answer that tripped the filter.
pub const SAFE_FALLBACK: &str = "Thanks for your patience. Here is how to continue: \
    share any extra details about your request, such as an order number or service name, \
    and it will be handled right away.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Pass,
    Tripped { token: &'static str },
}

/// First denylisted token found in `text`, if any.
pub fn check(text: &str) -> Verdict {
    let lower = text.to_lowercase();
    DENYLIST
        .iter()
        .find(|token| lower.contains(*token))
        .map_or(Verdict::Pass, |&token| Verdict::Tripped { token })
}

/// The text to display: `text` itself, or [`SAFE_FALLBACK`] when it trips.
pub fn filter(text: &str) -> Cow<'_, str> {
    match check(text) {
        Verdict::Pass => Cow::Borrowed(text),
        Verdict::Tripped { token } => {
            info!(token, "output guardrail tripped, replacing answer");
            Cow::Borrowed(SAFE_FALLBACK)
        }
    }
}
