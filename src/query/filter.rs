//! # Collection Filter
//!
//! Builds a predicate over resource data from the operation's declared
//! query parameters and the request's query string. Every criterion must
//! hold; undeclared query keys are ignored.

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

use crate::descriptor::{ParamType, ParameterDescriptor};
use crate::store::ResourceData;

use super::errors::{QueryError, QueryResult};
use super::path::{self, Lookup};
use super::query_string::QueryString;

/// How an array-valued property is matched against array candidates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArrayMatch {
    /// The property shares at least one element with the candidates
    #[default]
    Any,
    /// The property contains every candidate
    All,
}

/// Expected value of a single criterion
#[derive(Debug, Clone, PartialEq)]
pub enum Expected {
    /// Declared scalar parameter
    Scalar(Value),
    /// Declared array parameter, already split and coerced
    Candidates(Vec<Value>),
}

/// One declared parameter present on the request
#[derive(Debug, Clone, PartialEq)]
pub struct Criterion {
    /// Dotted property path
    pub path: String,
    pub expected: Expected,
}

impl Criterion {
    fn matches(&self, data: &Value, array_match: ArrayMatch) -> bool {
        let actual = match path::resolve(data, &self.path) {
            Lookup::Absent => return false,
            Lookup::Found(v) => v,
        };

        match (&self.expected, actual) {
            (Expected::Scalar(expected), actual) => values_equal(actual, expected),
            (Expected::Candidates(candidates), Value::Array(items)) => match array_match {
                ArrayMatch::Any => items
                    .iter()
                    .any(|item| candidates.iter().any(|c| values_equal(item, c))),
                ArrayMatch::All => candidates
                    .iter()
                    .all(|c| items.iter().any(|item| values_equal(item, c))),
            },
            (Expected::Candidates(candidates), actual) => {
                candidates.iter().any(|c| values_equal(actual, c))
            }
        }
    }
}

/// Predicate over resource data
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FilterPredicate {
    criteria: Vec<Criterion>,
    array_match: ArrayMatch,
}

impl FilterPredicate {
    /// A predicate that accepts everything
    pub fn always() -> Self {
        Self::default()
    }

    /// Build the predicate for the declared parameters present in `query`.
    ///
    /// Only `in: query` parameters are considered.
    pub fn build<'a>(
        params: impl IntoIterator<Item = &'a ParameterDescriptor>,
        query: &QueryString,
        array_match: ArrayMatch,
    ) -> QueryResult<Self> {
        let mut criteria = Vec::new();

        for param in params.into_iter().filter(|p| p.is_query()) {
            if !query.contains(&param.name) {
                continue;
            }

            let expected = if param.is_array() {
                Expected::Candidates(parse_candidates(param, query)?)
            } else {
                let raw = query.last(&param.name).unwrap_or_default();
                let declared = param.param_type.unwrap_or(ParamType::String);
                Expected::Scalar(coerce(&param.name, raw, declared)?)
            };

            criteria.push(Criterion {
                path: param.name.clone(),
                expected,
            });
        }

        Ok(Self {
            criteria,
            array_match,
        })
    }

    /// Whether no criterion applies
    pub fn is_unconstrained(&self) -> bool {
        self.criteria.is_empty()
    }

    pub fn criteria(&self) -> &[Criterion] {
        &self.criteria
    }

    /// Evaluate against resource data.
    ///
    /// Non-JSON data only satisfies an unconstrained predicate.
    pub fn matches(&self, data: &ResourceData) -> bool {
        if self.criteria.is_empty() {
            return true;
        }

        match data.as_json() {
            Some(value) => self
                .criteria
                .iter()
                .all(|c| c.matches(value, self.array_match)),
            None => false,
        }
    }
}

fn parse_candidates(param: &ParameterDescriptor, query: &QueryString) -> QueryResult<Vec<Value>> {
    let item_type = param.item_type();
    query
        .all(&param.name)
        .iter()
        .flat_map(|raw| param.collection_format.split(raw))
        .map(|raw| coerce(&param.name, raw, item_type))
        .collect()
}

/// Coerce a decoded query value to the declared primitive
fn coerce(name: &str, raw: &str, declared: ParamType) -> QueryResult<Value> {
    match declared {
        ParamType::Integer => raw
            .trim()
            .parse::<i64>()
            .map(Value::from)
            .map_err(|_| QueryError::invalid(name, raw, "integer")),
        ParamType::Number => raw
            .trim()
            .parse::<f64>()
            .ok()
            .and_then(Number::from_f64)
            .map(Value::Number)
            .ok_or_else(|| QueryError::invalid(name, raw, "number")),
        ParamType::Boolean => match raw.trim().to_ascii_lowercase().as_str() {
            "true" => Ok(Value::Bool(true)),
            "false" => Ok(Value::Bool(false)),
            _ => Err(QueryError::invalid(name, raw, "boolean")),
        },
        ParamType::String | ParamType::Array | ParamType::File => {
            Ok(Value::String(raw.to_string()))
        }
    }
}

/// Equality with numbers compared numerically
fn values_equal(actual: &Value, expected: &Value) -> bool {
    match (actual, expected) {
        (Value::Number(a), Value::Number(b)) => match (a.as_f64(), b.as_f64()) {
            (Some(a), Some(b)) => a == b,
            _ => a == b,
        },
        (a, b) => a == b,
    }
}
