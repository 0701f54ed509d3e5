//! Response-selector rule engine.
//!
//! Each endpoint owns an ordered table of (predicate, directive) pairs plus
//! a list of required-field checks. Evaluation derives at most one
//! [`Directive`] per request, which [`apply_directive`] encodes into the
//! single `prefer` header understood by the backend.
//!
//! Overwrite policy: every rule in the table is visited in declaration
//! order and a later match replaces an earlier one, so when predicates
//! overlap the LAST declared match wins. The shipped tables are mutually
//! exclusive by construction; the policy is pinned by a test regardless.

mod predicate;

pub mod catalog;

pub use predicate::{Condition, Predicate, Requirement};

use axum::http::{HeaderMap, HeaderValue};
use serde_json::Value;

/// Header used to instruct the backend which canned response to serve.
pub const PREFER_HEADER: &str = "prefer";

/// The relay's decision about what the prefer header should carry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    /// Select the named example variant.
    Example(String),
    /// Force the given status code.
    Code(u16),
}

impl Directive {
    pub fn example(name: &str) -> Self {
        Directive::Example(name.to_string())
    }

    /// Wire form carried by the prefer header.
    pub fn header_value(&self) -> String {
        match self {
            Directive::Example(name) => format!("example={name}"),
            Directive::Code(code) => format!("code={code}"),
        }
    }
}

/// One selection rule: when the predicate matches, the directive is chosen.
#[derive(Debug, Clone)]
pub struct Rule {
    pub predicate: Predicate,
    pub directive: Directive,
}

/// Ordered rule table for one endpoint.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    requirements: Vec<Requirement>,
    rules: Vec<Rule>,
}

impl RuleSet {
    pub fn new(requirements: Vec<Requirement>, rules: Vec<Rule>) -> Self {
        Self {
            requirements,
            rules,
        }
    }

    /// Derive the directive for one request body.
    ///
    /// Required-field checks run first; any failure forces `Code(400)`.
    /// Otherwise the table is folded in declaration order and the last
    /// matching rule's directive is returned, or `None` when nothing
    /// matched (the backend's own default then applies).
    pub fn evaluate(&self, body: &Value) -> Option<Directive> {
        if self.requirements.iter().any(|r| !r.satisfied(body)) {
            return Some(Directive::Code(400));
        }

        let mut selected = None;
        for rule in &self.rules {
            if rule.predicate.matches(body) {
                selected = Some(rule.directive.clone());
            }
        }
        selected
    }
}

/// Encode a directive into the prefer header, overwriting any prior value.
///
/// No other header is touched; the backend interprets the value itself and
/// the relay does not check that the named example exists.
pub fn apply_directive(mut headers: HeaderMap, directive: &Directive) -> HeaderMap {
    if let Ok(value) = HeaderValue::from_str(&directive.header_value()) {
        headers.insert(PREFER_HEADER, value);
    }
    headers
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn directive_wire_forms() {
        assert_eq!(Directive::example("Variant1").header_value(), "example=Variant1");
        assert_eq!(Directive::Code(400).header_value(), "code=400");
    }

    #[test]
    fn apply_directive_sets_prefer() {
        let headers = apply_directive(HeaderMap::new(), &Directive::Code(400));
        assert_eq!(headers.get(PREFER_HEADER).unwrap(), "code=400");
    }

    #[test]
    fn apply_directive_overwrites_prior_value() {
        let headers = apply_directive(HeaderMap::new(), &Directive::example("First"));
        let headers = apply_directive(headers, &Directive::example("Second"));
        assert_eq!(headers.len(), 1);
        assert_eq!(headers.get(PREFER_HEADER).unwrap(), "example=Second");
    }

    #[test]
    fn apply_directive_touches_nothing_else() {
        let mut headers = HeaderMap::new();
        headers.insert("content-type", "application/json".parse().unwrap());
        let headers = apply_directive(headers, &Directive::example("V"));
        assert_eq!(headers.get("content-type").unwrap(), "application/json");
        assert_eq!(headers.len(), 2);
    }

    #[test]
    fn failed_requirement_forces_code_400() {
        let rules = RuleSet::new(
            vec![Requirement::NonEmptyArray("uids")],
            vec![Rule {
                predicate: Predicate::all(vec![Condition::ArrayLen("uids", 0)]),
                directive: Directive::example("ShouldNotBeReached"),
            }],
        );
        assert_eq!(rules.evaluate(&json!({"uids": []})), Some(Directive::Code(400)));
        assert_eq!(rules.evaluate(&json!({})), Some(Directive::Code(400)));
    }

    #[test]
    fn no_match_yields_no_directive() {
        let rules = RuleSet::new(
            Vec::new(),
            vec![Rule {
                predicate: Predicate::all(vec![Condition::StringIs("mode", "modeA")]),
                directive: Directive::example("modeA"),
            }],
        );
        assert_eq!(rules.evaluate(&json!({"mode": "other"})), None);
    }

    #[test]
    fn overlapping_rules_last_wins() {
        // Both predicates match the same body; the effective directive must
        // be the last declared one, never a merge.
        let rules = RuleSet::new(
            Vec::new(),
            vec![
                Rule {
                    predicate: Predicate::all(vec![Condition::ArrayLen("uids", 1)]),
                    directive: Directive::example("Earlier"),
                },
                Rule {
                    predicate: Predicate::all(vec![Condition::ArrayElement("uids", 0, "a")]),
                    directive: Directive::example("Later"),
                },
            ],
        );
        assert_eq!(
            rules.evaluate(&json!({"uids": ["a"]})),
            Some(Directive::example("Later"))
        );
    }

    #[test]
    fn empty_ruleset_with_satisfied_requirements_is_silent() {
        let rules = RuleSet::new(vec![Requirement::Present("subject")], Vec::new());
        assert_eq!(rules.evaluate(&json!({"subject": "s"})), None);
    }
}
