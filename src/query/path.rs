//! # Property Paths
//!
//! Resolves dotted property names (`Vet.Address.State`) against loosely
//! typed JSON data.

use serde_json::Value;

/// Outcome of resolving a property path
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Lookup<'a> {
    /// A segment was missing or an intermediate value was not an object
    Absent,
    Found(&'a Value),
}

impl<'a> Lookup<'a> {
    pub fn value(self) -> Option<&'a Value> {
        match self {
            Lookup::Absent => None,
            Lookup::Found(v) => Some(v),
        }
    }
}

/// Resolve `path` against `value`.
///
/// A key containing dots that exists verbatim wins over the walk.
pub fn resolve<'a>(value: &'a Value, path: &str) -> Lookup<'a> {
    let Value::Object(map) = value else {
        return Lookup::Absent;
    };

    if let Some(found) = map.get(path) {
        return Lookup::Found(found);
    }

    match path.split_once('.') {
        Some((head, rest)) => match map.get(head) {
            Some(child) => resolve(child, rest),
            None => Lookup::Absent,
        },
        None => Lookup::Absent,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_top_level() {
        let data = json!({"Name": "Fido", "Age": 4});
        assert_eq!(resolve(&data, "Age"), Lookup::Found(&json!(4)));
        assert_eq!(resolve(&data, "Color"), Lookup::Absent);
    }

    #[test]
    fn test_nested() {
        let data = json!({"Vet": {"Address": {"State": "NY"}}});
        assert_eq!(resolve(&data, "Vet.Address.State"), Lookup::Found(&json!("NY")));
        assert_eq!(resolve(&data, "Vet.Address.Zip"), Lookup::Absent);
        assert_eq!(resolve(&data, "Vet.Name.First"), Lookup::Absent);
    }

    #[test]
    fn test_non_object_intermediate() {
        let data = json!({"Vet": "Dr. Smith"});
        assert_eq!(resolve(&data, "Vet.Address"), Lookup::Absent);
        assert_eq!(resolve(&json!("scalar"), "Vet"), Lookup::Absent);
    }

    #[test]
    fn test_null_is_found() {
        let data = json!({"Vet": null});
        assert_eq!(resolve(&data, "Vet").value(), Some(&Value::Null));
    }
}
