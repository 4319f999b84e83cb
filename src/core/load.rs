// Build direction: record in, object-node tree out.
// Protection is decided per key occurrence, never inherited down the
// subtree; only a record key can match the protected set.
use std::collections::{BTreeMap, BTreeSet};

use crate::core::error::{Error, ErrorKind};
use crate::core::node::Node;
use crate::core::value::Value;

/// Converts a record into a tree of object nodes. Keys named in
/// `protected` keep their value as a raw record one level down; records
/// nested deeper inside a raw value are re-evaluated against the same
/// set, so a raw subtree can still grow nodes beneath it.
pub fn load(value: Value, protected: &BTreeSet<String>) -> Result<Node, Error> {
    let Value::Record(entries) = value else {
        return Err(Error::new(ErrorKind::InvalidInput)
            .with_message("parameter must be a record")
            .with_hint(format!("got a {} at the top level", value.kind())));
    };
    tracing::trace!(keys = entries.len(), "loading record");
    Ok(Node::from_attrs(convert_entries(entries, protected)?))
}

fn convert_entries(
    entries: BTreeMap<String, Value>,
    protected: &BTreeSet<String>,
) -> Result<BTreeMap<String, Value>, Error> {
    let mut converted = BTreeMap::new();
    for (key, value) in entries {
        let keep_raw = protected.contains(&key);
        let value = convert(value, protected, keep_raw).map_err(|err| err.with_key(key.as_str()))?;
        converted.insert(key, value);
    }
    Ok(converted)
}

// `keep_raw` applies to this value only; element and child recursion
// re-derives it from each record's own keys.
fn convert(value: Value, protected: &BTreeSet<String>, keep_raw: bool) -> Result<Value, Error> {
    match value {
        Value::Record(entries) => {
            let entries = convert_entries(entries, protected)?;
            if keep_raw {
                Ok(Value::Record(entries))
            } else {
                Ok(Value::Node(Node::from_attrs(entries)))
            }
        }
        // Tuples normalize to ordered sequences on this path.
        Value::Seq(items) | Value::Tuple(items) => {
            let items = items
                .into_iter()
                .map(|item| convert(item, protected, false))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Value::Seq(items))
        }
        scalar @ Value::Scalar(_) => Ok(scalar),
        other => Err(Error::new(ErrorKind::UnsupportedType)
            .with_message(format!("cannot load a {} value", other.kind()))),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::load;
    use crate::core::error::ErrorKind;
    use crate::core::value::Value;

    fn protected(keys: &[&str]) -> BTreeSet<String> {
        keys.iter().map(|key| key.to_string()).collect()
    }

    #[test]
    fn top_level_must_be_a_record() {
        for value in [Value::from(42), Value::from("x"), Value::seq([])] {
            let err = load(value, &BTreeSet::new()).expect_err("non-record input");
            assert_eq!(err.kind(), ErrorKind::InvalidInput);
        }
    }

    #[test]
    fn empty_record_loads_to_empty_node() {
        let node = load(Value::record::<&str, _>([]), &BTreeSet::new()).expect("load");
        assert!(node.is_empty());
    }

    #[test]
    fn nested_records_become_nodes() {
        let record = Value::record([("outer", Value::record([("inner", Value::from(1))]))]);
        let node = load(record, &BTreeSet::new()).expect("load");
        let Some(Value::Node(outer)) = node.get("outer") else {
            panic!("outer should be a node");
        };
        assert_eq!(outer.get("inner"), Some(&Value::from(1)));
    }

    #[test]
    fn tuples_normalize_to_sequences() {
        let from_tuple = Value::record([("x", Value::tuple([Value::from(1), Value::from(2)]))]);
        let from_list = Value::record([("x", Value::seq([Value::from(1), Value::from(2)]))]);
        let set = BTreeSet::new();
        assert_eq!(
            load(from_tuple, &set).expect("load tuple"),
            load(from_list, &set).expect("load list")
        );
    }

    #[test]
    fn protection_applies_per_occurrence() {
        // {"a": {"b": {"a": {"z": 1}}, "c": {"d": 2}}} protected by
        // {"a"}: the outer "a" stays raw; "b" inside that raw record is
        // re-evaluated and becomes a node; the "a" inside the "b" node
        // matches again and stays raw.
        let record = Value::record([(
            "a",
            Value::record([
                (
                    "b",
                    Value::record([("a", Value::record([("z", Value::from(1))]))]),
                ),
                ("c", Value::record([("d", Value::from(2))])),
            ]),
        )]);
        let node = load(record, &protected(&["a"])).expect("load");

        let Some(Value::Record(outer)) = node.get("a") else {
            panic!("protected key must stay a raw record");
        };
        let Some(Value::Node(b)) = outer.get("b") else {
            panic!("non-matching key under a raw record becomes a node");
        };
        assert!(matches!(b.get("a"), Some(Value::Record(_))));
        assert!(matches!(outer.get("c"), Some(Value::Node(_))));
    }

    #[test]
    fn list_elements_never_match_the_protected_set() {
        // Records inside a list under a protected key still become
        // nodes; elements have no key to match.
        let record = Value::record([(
            "a",
            Value::seq([Value::record([("inner", Value::from(1))])]),
        )]);
        let node = load(record, &protected(&["a"])).expect("load");
        let Some(Value::Seq(items)) = node.get("a") else {
            panic!("sequence survives under protection");
        };
        assert!(matches!(items[0], Value::Node(_)));
    }

    #[test]
    fn sets_are_rejected_with_the_failing_key() {
        let record = Value::record([("bad", Value::set([Value::from(1)]))]);
        let err = load(record, &BTreeSet::new()).expect_err("set input");
        assert_eq!(err.kind(), ErrorKind::UnsupportedType);
        assert_eq!(err.key(), Some("bad"));
    }
}
