//! Exact-match predicates over request-body fields.
//!
//! Bodies are untyped JSON read defensively: a missing key, a wrong type,
//! or a non-object body simply fails the check, it never errors.

use serde_json::Value;

/// A single exact-match constraint on one body field.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// Field is an array of exactly this length.
    ArrayLen(&'static str, usize),
    /// Array element at this position equals this string.
    ArrayElement(&'static str, usize, &'static str),
    /// Field is not present in the body.
    Absent(&'static str),
    /// Field is a boolean with this value.
    BoolIs(&'static str, bool),
    /// Field is a string with this value.
    StringIs(&'static str, &'static str),
}

impl Condition {
    fn holds(&self, body: &Value) -> bool {
        match self {
            Condition::ArrayLen(field, len) => body
                .get(field)
                .and_then(Value::as_array)
                .is_some_and(|a| a.len() == *len),
            Condition::ArrayElement(field, index, expected) => body
                .get(field)
                .and_then(Value::as_array)
                .and_then(|a| a.get(*index))
                .and_then(Value::as_str)
                .is_some_and(|s| s == *expected),
            Condition::Absent(field) => body.get(field).is_none(),
            Condition::BoolIs(field, expected) => body
                .get(field)
                .and_then(Value::as_bool)
                .is_some_and(|b| b == *expected),
            Condition::StringIs(field, expected) => body
                .get(field)
                .and_then(Value::as_str)
                .is_some_and(|s| s == *expected),
        }
    }
}

/// Conjunction of conditions; matches only when every condition holds.
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    conditions: Vec<Condition>,
}

impl Predicate {
    pub fn all(conditions: Vec<Condition>) -> Self {
        Self { conditions }
    }

    pub fn matches(&self, body: &Value) -> bool {
        self.conditions.iter().all(|c| c.holds(body))
    }
}

/// A required-field check evaluated before any selection rule.
#[derive(Debug, Clone, PartialEq)]
pub enum Requirement {
    /// Field must be present.
    Present(&'static str),
    /// Field must be an array with at least one element.
    NonEmptyArray(&'static str),
}

impl Requirement {
    pub fn satisfied(&self, body: &Value) -> bool {
        match self {
            Requirement::Present(field) => body.get(field).is_some(),
            Requirement::NonEmptyArray(field) => body
                .get(field)
                .and_then(Value::as_array)
                .is_some_and(|a| !a.is_empty()),
        }
    }
}
