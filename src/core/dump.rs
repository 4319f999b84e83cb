// Dump direction: reduce any value, loaded or foreign, back to
// records, sequences, and scalars. Finite tree walk; cyclic inputs are
// out of contract.
use std::collections::BTreeMap;

use crate::core::error::{Error, ErrorKind};
use crate::core::value::{Exposed, Value};

#[derive(Clone, Copy, Debug)]
pub struct DumpOptions {
    /// When false, tuples in the input are an error instead of being
    /// carried through to the result.
    pub allow_tuples: bool,
}

impl Default for DumpOptions {
    fn default() -> Self {
        Self { allow_tuples: true }
    }
}

/// Flattens `value` to a tree containing only scalars, sequences,
/// records, and (when allowed) tuples. Object nodes become records;
/// foreign objects are read through their `Exposed` contract.
pub fn dump(value: &Value, options: &DumpOptions) -> Result<Value, Error> {
    tracing::trace!(kind = %value.kind(), "flattening value");
    flatten(value, options)
}

/// Flattens and renders JSON text. A tuple surviving into the result is
/// a conflict: JSON has no tuple type, and the encoder fails rather
/// than coercing to a list.
pub fn dump_json(value: &Value, options: &DumpOptions) -> Result<String, Error> {
    let flat = flatten(value, options)?;
    serde_json::to_string(&flat).map_err(|err| {
        Error::new(ErrorKind::SerializationConflict)
            .with_message("flattened value is not representable as JSON text")
            .with_source(err)
    })
}

fn flatten(value: &Value, options: &DumpOptions) -> Result<Value, Error> {
    match value {
        Value::Scalar(scalar) => Ok(Value::Scalar(scalar.clone())),
        Value::Seq(items) => Ok(Value::Seq(flatten_items(items, options)?)),
        Value::Tuple(items) => {
            if !options.allow_tuples {
                return Err(Error::new(ErrorKind::UnsupportedType)
                    .with_message("tuple values are disabled for this dump"));
            }
            Ok(Value::Tuple(flatten_items(items, options)?))
        }
        Value::Set(_) => Err(Error::new(ErrorKind::UnsupportedType)
            .with_message("set values cannot be flattened")),
        Value::Record(entries) => {
            let mut flat = BTreeMap::new();
            for (key, value) in entries {
                let value = flatten(value, options).map_err(|err| err.with_key(key.as_str()))?;
                flat.insert(key.clone(), value);
            }
            Ok(Value::Record(flat))
        }
        Value::Node(node) => {
            let mut flat = BTreeMap::new();
            for (key, value) in node.attrs() {
                let value = flatten(value, options).map_err(|err| err.with_key(key.as_str()))?;
                flat.insert(key.clone(), value);
            }
            Ok(Value::Record(flat))
        }
        Value::Foreign(object) => flatten_foreign(object.as_ref(), options),
    }
}

fn flatten_items(items: &[Value], options: &DumpOptions) -> Result<Vec<Value>, Error> {
    items.iter().map(|item| flatten(item, options)).collect()
}

// Best-effort by contract: an unreadable member is skipped, not fatal,
// so one uncooperative field cannot abort an otherwise valid graph.
fn flatten_foreign(object: &dyn Exposed, options: &DumpOptions) -> Result<Value, Error> {
    let mut flat = BTreeMap::new();
    for (name, value) in object.fields() {
        if is_reserved(&name) {
            tracing::debug!(field = %name, label = object.type_label(), "excluding reserved member");
            continue;
        }
        let Some(value) = value else {
            tracing::debug!(field = %name, label = object.type_label(), "skipping unreadable member");
            continue;
        };
        let value = flatten(&value, options).map_err(|err| err.with_key(name.as_str()))?;
        flat.insert(name, value);
    }
    Ok(Value::Record(flat))
}

// Double-underscore bracketing marks implementation-reserved members.
fn is_reserved(name: &str) -> bool {
    name.len() >= 4 && name.starts_with("__") && name.ends_with("__")
}
