//! Compiled per-endpoint rule tables.
//!
//! The tables mirror the backend contract's canned examples: fixture ids
//! and variant names are compiled in so that test fixtures stay fully
//! reproducible. Predicates are exact-match only.

use super::{Condition, Directive, Predicate, Requirement, Rule, RuleSet};

/// Fixture ids baked into the backend contract.
pub const POST_UID_FIRST: &str = "999999999999999999_xxxxxxxxxxx200Post01";
pub const POST_UID_SECOND: &str = "999999999999999999_xxxxxxxxxxx200Post02";
pub const BIZ_UID: &str = "xxxxxxxxxxxx200Biz01";

/// Modes understood by the generic sample endpoint.
pub const SAMPLE_MODES: &[&str] = &["modeA", "modeB", "modeC"];

/// All endpoint rule tables, compiled once at startup.
#[derive(Debug, Clone)]
pub struct Rulebook {
    pub impressions: RuleSet,
    pub impressions_count: RuleSet,
    pub sample: RuleSet,
}

impl Rulebook {
    pub fn new() -> Self {
        Self {
            impressions: impressions(),
            impressions_count: impressions_count(),
            sample: sample(),
        }
    }
}

impl Default for Rulebook {
    fn default() -> Self {
        Self::new()
    }
}

/// View-recording endpoint: validation only. The endpoint returns no body,
/// so only the status code can be steered; a complete body leaves the
/// backend's default success response in place.
fn impressions() -> RuleSet {
    RuleSet::new(
        vec![
            Requirement::NonEmptyArray("uids"),
            Requirement::Present("subject"),
            Requirement::Present("media"),
        ],
        Vec::new(),
    )
}

/// View-count endpoint: one canned variant per (uids, bymedia) combination.
fn impressions_count() -> RuleSet {
    RuleSet::new(
        vec![Requirement::NonEmptyArray("uids")],
        vec![
            Rule {
                predicate: Predicate::all(vec![
                    Condition::ArrayLen("uids", 1),
                    Condition::ArrayElement("uids", 0, POST_UID_FIRST),
                    Condition::Absent("bymedia"),
                ]),
                directive: Directive::example("FoodApiImpression200ByMediaNonePost"),
            },
            Rule {
                predicate: Predicate::all(vec![
                    Condition::ArrayLen("uids", 2),
                    Condition::ArrayElement("uids", 0, POST_UID_FIRST),
                    Condition::ArrayElement("uids", 1, POST_UID_SECOND),
                    Condition::Absent("bymedia"),
                ]),
                directive: Directive::example("FoodApiImpression200ByMediaNonePostMultiple"),
            },
            Rule {
                predicate: Predicate::all(vec![
                    Condition::ArrayLen("uids", 1),
                    Condition::ArrayElement("uids", 0, POST_UID_FIRST),
                    Condition::BoolIs("bymedia", false),
                ]),
                directive: Directive::example("FoodApiImpression200ByMediaFalsePost"),
            },
            Rule {
                predicate: Predicate::all(vec![
                    Condition::ArrayLen("uids", 1),
                    Condition::ArrayElement("uids", 0, POST_UID_FIRST),
                    Condition::BoolIs("bymedia", true),
                ]),
                directive: Directive::example("FoodApiImpression200ByMediaTruePost"),
            },
            Rule {
                predicate: Predicate::all(vec![
                    Condition::ArrayLen("uids", 1),
                    Condition::ArrayElement("uids", 0, BIZ_UID),
                    Condition::Absent("bymedia"),
                ]),
                directive: Directive::example("FoodApiImpression200ByMediaNoneBiz"),
            },
            Rule {
                predicate: Predicate::all(vec![
                    Condition::ArrayLen("uids", 1),
                    Condition::ArrayElement("uids", 0, BIZ_UID),
                    Condition::BoolIs("bymedia", false),
                ]),
                directive: Directive::example("FoodApiImpression200ByMediaFalseBiz"),
            },
            Rule {
                predicate: Predicate::all(vec![
                    Condition::ArrayLen("uids", 1),
                    Condition::ArrayElement("uids", 0, BIZ_UID),
                    Condition::BoolIs("bymedia", true),
                ]),
                directive: Directive::example("FoodApiImpression200ByMediaTrueBiz"),
            },
        ],
    )
}

/// Generic sample endpoint: each known mode selects the example of the same
/// name; an unknown mode selects nothing.
fn sample() -> RuleSet {
    let rules = SAMPLE_MODES
        .iter()
        .copied()
        .map(|mode| Rule {
            predicate: Predicate::all(vec![Condition::StringIs("mode", mode)]),
            directive: Directive::example(mode),
        })
        .collect();
    RuleSet::new(Vec::new(), rules)
}
