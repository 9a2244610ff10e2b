//! Wire format of the remote grammar service's `check` response.

use serde::{Deserialize, Serialize};

/// Body of a `check` response.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckResponse {
    /// Issues the service found; possibly empty.
    pub matches: Vec<Match>,
}

/// One raw issue as reported by the service.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Match {
    /// Full human-readable description of the issue.
    pub message: String,
    /// Condensed description, possibly empty.
    pub short_message: String,
    /// Offset of the issue into the checked text, as the service counts.
    pub offset: usize,
    /// Length of the issue, as the service counts.
    pub length: usize,
    /// Ranked replacement candidates.
    pub replacements: Vec<Replacement>,
    /// The sentence the issue was found in.
    pub sentence: String,
    /// The rule that produced the issue.
    pub rule: Option<Rule>,
}

/// One replacement candidate.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Replacement {
    /// The replacement text.
    pub value: String,
}

/// The service rule behind a match.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Rule {
    /// Stable rule identifier.
    pub id: String,
    /// Human-readable rule description.
    pub description: String,
    /// Issue type as the service classifies it.
    pub issue_type: String,
    /// The rule's category.
    pub category: Option<RuleCategory>,
}

/// Category of a rule.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleCategory {
    /// Stable category identifier, e.g. `TYPOS`.
    pub id: String,
    /// Human-readable category name.
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    // trimmed from a live LanguageTool v2 response
    const BODY: &str = r#"{
      "software": { "name": "LanguageTool", "version": "5.9" },
      "language": { "name": "English (US)", "code": "en-US" },
      "matches": [
        {
          "message": "Possible spelling mistake found.",
          "shortMessage": "Spelling mistake",
          "replacements": [ { "value": "escaping" }, { "value": "escapade" } ],
          "offset": 35,
          "length": 7,
          "sentence": "This sentence tests escapng.",
          "rule": {
            "id": "MORFOLOGIK_RULE_EN_US",
            "description": "Possible spelling mistake",
            "issueType": "misspelling",
            "category": { "id": "TYPOS", "name": "Possible Typo" }
          }
        }
      ]
    }"#;

    #[test]
    fn parses_a_live_shaped_body() {
        let response: CheckResponse = serde_json::from_str(BODY).unwrap();
        assert_eq!(response.matches.len(), 1);

        let m = &response.matches[0];
        assert_eq!(m.offset, 35);
        assert_eq!(m.length, 7);
        assert_eq!(m.short_message, "Spelling mistake");
        assert_eq!(m.replacements[0].value, "escaping");

        let rule = m.rule.as_ref().unwrap();
        assert_eq!(rule.id, "MORFOLOGIK_RULE_EN_US");
        assert_eq!(rule.issue_type, "misspelling");
        assert_eq!(rule.category.as_ref().unwrap().id, "TYPOS");
    }

    #[test]
    fn missing_fields_default() {
        let response: CheckResponse =
            serde_json::from_str(r#"{ "matches": [ { "offset": 3 } ] }"#).unwrap();
        let m = &response.matches[0];
        assert_eq!(m.offset, 3);
        assert_eq!(m.length, 0);
        assert!(m.rule.is_none());
        assert!(m.replacements.is_empty());
    }

    #[test]
    fn empty_body_has_no_matches() {
        let response: CheckResponse = serde_json::from_str("{}").unwrap();
        assert!(response.matches.is_empty());
    }
}
