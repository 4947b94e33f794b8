//! Pull structured arguments out of free-form user text.

use std::sync::LazyLock;

use regex::Regex;

static ORDER_ID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\border\s*(?:#|no\.?|number|id)?\s*:?\s*([A-Za-z0-9][A-Za-z0-9-]*)")
        .expect("order id pattern")
});

static AMOUNT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:\bamount\s*(?:of\s*)?:?\s*\$?|\$\s*)(\d+(?:\.\d+)?)|(\d+(?:\.\d+)?)\s*(?:usd|dollars)\b")
        .expect("amount pattern")
});

static SERVICE_BEFORE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b([a-z0-9][a-z0-9_-]*)\s+service\b").expect("service pattern")
});

// Group 1: explicitly named. Group 2: a bare word, accepted only when it
// looks like an identifier.
static SERVICE_AFTER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bservice\s+(?:(?:named|called)\s+([a-z0-9][a-z0-9_-]*)|([a-z0-9][a-z0-9_-]*))")
        .expect("service pattern")
});

static NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:my name is|call me)\s+([\p{L}][\p{L}'-]*)").expect("name pattern")
});

// Only the phrase is case-insensitive; the name itself must be capitalised so
// "I am locked out" is not read as a name.
static NAME_INTRO: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?i:i'm|i’m|i am)\s+(\p{Lu}[\p{L}'-]*)").expect("name pattern")
});

static ACCOUNT_ID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\baccount\s*(?:id|number|no\.?|#)?\s*(?:is\s+)?:?\s*([A-Za-z0-9][A-Za-z0-9-]*)")
        .expect("account pattern")
});

const NOT_A_SERVICE: &[&str] = &[
    "a", "an", "the", "my", "your", "our", "this", "that", "is", "was", "are", "be", "status",
    "health", "restart", "reboot", "check", "of", "for", "to", "on", "customer",
];

fn has_digit(s: &str) -> bool {
    s.chars().any(|c| c.is_ascii_digit())
}

fn looks_like_identifier(s: &str) -> bool {
    s.chars().any(|c| c.is_ascii_digit() || c == '-' || c == '_')
}

/// Lowercased alphanumeric words.
pub fn words(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
}

/// First identifier following "order" that contains a digit.
pub fn order_id(text: &str) -> Option<String> {
    ORDER_ID
        .captures_iter(text)
        .map(|c| c[1].to_string())
        .find(|id| has_digit(id))
}

pub fn amount(text: &str) -> Option<f64> {
    AMOUNT.captures_iter(text).find_map(|c| {
        c.get(1)
            .or_else(|| c.get(2))
            .and_then(|m| m.as_str().parse().ok())
    })
}

/// Service name from "the payments service", "service named payments" or
/// "service auth-api". A plain word after "service" ("restart the service
/// now") is not a name.
pub fn service_name(text: &str) -> Option<String> {
    let before = SERVICE_BEFORE
        .captures_iter(text)
        .map(|c| c[1].to_lowercase());
    let after = SERVICE_AFTER.captures_iter(text).filter_map(|c| {
        match (c.get(1), c.get(2)) {
            (Some(named), _) => Some(named.as_str().to_lowercase()),
            (None, Some(bare)) if looks_like_identifier(bare.as_str()) => {
                Some(bare.as_str().to_lowercase())
            }
            _ => None,
        }
    });

    before
        .chain(after)
        .find(|name| !NOT_A_SERVICE.contains(&name.as_str()))
}

/// Self-introduced name ("my name is Ada", "call me Ada", "I'm Ada").
pub fn user_name(text: &str) -> Option<String> {
    NAME.captures(text)
        .or_else(|| NAME_INTRO.captures(text))
        .map(|c| c[1].to_string())
}

pub fn account_id(text: &str) -> Option<String> {
    ACCOUNT_ID
        .captures_iter(text)
        .map(|c| c[1].to_string())
        .find(|id| has_digit(id))
}

/// Drop a surrounding markdown code fence from a model reply.
pub fn strip_code_fences(response: &str) -> String {
    let trimmed = response.trim();
    if !trimmed.starts_with("```") {
        return trimmed.to_string();
    }

    let lines: Vec<&str> = trimmed.lines().collect();
    let end = match lines.last() {
        Some(last) if lines.len() > 1 && last.trim_start().starts_with("```") => lines.len() - 1,
        _ => lines.len(),
    };
    lines[1..end].join("\n").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_and_amount_from_refund_request() {
        let text = "I want a refund for order 123, amount 49.99";
        assert_eq!(order_id(text).as_deref(), Some("123"));
        assert_eq!(amount(text), Some(49.99));
    }

    #[test]
    fn order_id_skips_non_identifiers() {
        assert_eq!(order_id("my order is late, order #A-77"), Some("A-77".into()));
        assert_eq!(order_id("where is my order?"), None);
    }

    #[test]
    fn amount_variants() {
        assert_eq!(amount("charged $12.50 twice"), Some(12.5));
        assert_eq!(amount("refund 30 USD please"), Some(30.0));
        assert_eq!(amount("order 123"), None);
    }

    #[test]
    fn service_name_variants() {
        assert_eq!(service_name("Restart the payments service").as_deref(), Some("payments"));
        assert_eq!(service_name("restart service auth-api now").as_deref(), Some("auth-api"));
        assert_eq!(service_name("the service is down"), None);
        assert_eq!(
            service_name("restart the service named billing").as_deref(),
            Some("billing")
        );
    }

    #[test]
    fn plain_word_after_service_is_not_a_name() {
        assert_eq!(service_name("Please restart the service now"), None);
        assert_eq!(service_name("restart service please"), None);
        assert_eq!(service_name("restart service worker_2").as_deref(), Some("worker_2"));
    }

    #[test]
    fn name_from_introduction() {
        assert_eq!(user_name("Hi, I'm Ada and my invoice looks wrong").as_deref(), Some("Ada"));
        assert_eq!(user_name("i’m Grace").as_deref(), Some("Grace"));
        assert_eq!(user_name("I am Linus, the service is down").as_deref(), Some("Linus"));
        assert_eq!(user_name("I am locked out of my account"), None);
    }

    #[test]
    fn name_and_account() {
        let text = "Hi, my name is Grace and my account id is ACME-42";
        assert_eq!(user_name(text).as_deref(), Some("Grace"));
        assert_eq!(account_id(text).as_deref(), Some("ACME-42"));
        assert_eq!(account_id("my account is locked"), None);
    }

    #[test]
    fn words_are_lowercased() {
        let w: Vec<String> = words("Restart the Payments-service!").collect();
        assert_eq!(w, vec!["restart", "the", "payments", "service"]);
    }

    #[test]
    fn strip_code_fences_handles_fenced_and_plain() {
        assert_eq!(strip_code_fences("```text\nhello\n```"), "hello");
        assert_eq!(strip_code_fences("  plain  "), "plain");
        assert_eq!(strip_code_fences("```"), "");
    }
}
