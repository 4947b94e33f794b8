use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// The kind of problem the triage step decided the user has.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueType {
    Billing,
    Technical,
    General,
}

impl IssueType {
    pub const ALL: [IssueType; 3] = [IssueType::Billing, IssueType::Technical, IssueType::General];

    pub fn as_str(self) -> &'static str {
        match self {
            IssueType::Billing => "billing",
            IssueType::Technical => "technical",
            IssueType::General => "general",
        }
    }
}

impl fmt::Display for IssueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown issue type '{0}', expected billing, technical or general")]
pub struct ParseIssueTypeError(String);

impl FromStr for IssueType {
    type Err = ParseIssueTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "billing" => Ok(IssueType::Billing),
            "technical" => Ok(IssueType::Technical),
            "general" => Ok(IssueType::General),
            _ => Err(ParseIssueTypeError(s.to_string())),
        }
    }
}

/// Per-session facts about the user, shared by every agent in a turn.
///
/// `issue_type` is written only by the triage step; `name` and `account_id`
/// only through the `update_user_profile` capability.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SupportContext {
    pub name: Option<String>,
    pub is_premium_user: bool,
    pub issue_type: Option<IssueType>,
    pub account_id: Option<String>,
}

impl SupportContext {
    pub fn new(name: Option<String>, is_premium_user: bool, account_id: Option<String>) -> Self {
        Self {
            name,
            is_premium_user,
            issue_type: None,
            account_id,
        }
    }

    /// Compact JSON snapshot for the console trace.
    pub fn snapshot(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| format!("{self:?}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issue_type_parses_case_insensitively() {
        assert_eq!("Billing".parse::<IssueType>().unwrap(), IssueType::Billing);
        assert_eq!(" technical ".parse::<IssueType>().unwrap(), IssueType::Technical);
        assert!("shipping".parse::<IssueType>().is_err());
    }

    #[test]
    fn issue_type_display_matches_parse() {
        for t in IssueType::ALL {
            assert_eq!(t.to_string().parse::<IssueType>().unwrap(), t);
        }
    }

    #[test]
    fn new_context_has_no_issue_type() {
        let ctx = SupportContext::new(Some("Ada".into()), true, None);
        assert_eq!(ctx.issue_type, None);
        assert!(ctx.is_premium_user);
    }

    #[test]
    fn snapshot_is_json_with_lowercase_issue() {
        let mut ctx = SupportContext::new(None, false, Some("A-1".into()));
        ctx.issue_type = Some(IssueType::Technical);
        let json: serde_json::Value = serde_json::from_str(&ctx.snapshot()).unwrap();
        assert_eq!(json["issue_type"], "technical");
        assert_eq!(json["account_id"], "A-1");
        assert_eq!(json["name"], serde_json::Value::Null);
        assert_eq!(json["is_premium_user"], false);
    }
}
