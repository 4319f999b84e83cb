// Shared value taxonomy for the load and dump directions.
// Raw records and loaded nodes are distinct variants so both walks can
// pattern-match instead of re-deriving a value's class at each step.
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde::ser::{Error as SerError, Serialize, Serializer};

use crate::core::node::Node;

#[derive(Clone, Debug, PartialEq)]
pub enum Scalar {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Bytes(Vec<u8>),
}

/// Capability contract for foreign objects that want to participate in
/// flattening. Implementations expose public, data-bearing members by
/// name; a `None` value marks a member that cannot be read and will be
/// skipped rather than failing the walk.
pub trait Exposed: fmt::Debug + Send + Sync {
    fn type_label(&self) -> &str;

    fn fields(&self) -> Vec<(String, Option<Value>)>;
}

/// One tree position. Classification priority (sequence, then record,
/// then scalar, then foreign) is structural here: each class is its own
/// variant, so a record can never be misread as an iterable.
#[derive(Clone, Debug)]
pub enum Value {
    Scalar(Scalar),
    Seq(Vec<Value>),
    Tuple(Vec<Value>),
    Set(Vec<Value>),
    Record(BTreeMap<String, Value>),
    Node(Node),
    Foreign(Arc<dyn Exposed>),
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Kind {
    Scalar,
    Seq,
    Tuple,
    Set,
    Record,
    Node,
    Foreign,
}

impl Kind {
    pub fn as_str(self) -> &'static str {
        match self {
            Kind::Scalar => "scalar",
            Kind::Seq => "sequence",
            Kind::Tuple => "tuple",
            Kind::Set => "set",
            Kind::Record => "record",
            Kind::Node => "node",
            Kind::Foreign => "foreign object",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Value {
    pub fn kind(&self) -> Kind {
        match self {
            Value::Scalar(_) => Kind::Scalar,
            Value::Seq(_) => Kind::Seq,
            Value::Tuple(_) => Kind::Tuple,
            Value::Set(_) => Kind::Set,
            Value::Record(_) => Kind::Record,
            Value::Node(_) => Kind::Node,
            Value::Foreign(_) => Kind::Foreign,
        }
    }

    pub fn record<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        Value::Record(
            entries
                .into_iter()
                .map(|(key, value)| (key.into(), value))
                .collect(),
        )
    }

    pub fn seq(items: impl IntoIterator<Item = Value>) -> Self {
        Value::Seq(items.into_iter().collect())
    }

    pub fn tuple(items: impl IntoIterator<Item = Value>) -> Self {
        Value::Tuple(items.into_iter().collect())
    }

    pub fn set(items: impl IntoIterator<Item = Value>) -> Self {
        Value::Set(items.into_iter().collect())
    }

    pub fn foreign(object: impl Exposed + 'static) -> Self {
        Value::Foreign(Arc::new(object))
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Scalar(a), Value::Scalar(b)) => a == b,
            (Value::Seq(a), Value::Seq(b)) => a == b,
            (Value::Tuple(a), Value::Tuple(b)) => a == b,
            (Value::Set(a), Value::Set(b)) => a == b,
            (Value::Record(a), Value::Record(b)) => a == b,
            (Value::Node(a), Value::Node(b)) => a == b,
            (Value::Foreign(a), Value::Foreign(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl From<Scalar> for Value {
    fn from(scalar: Scalar) -> Self {
        Value::Scalar(scalar)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Scalar(Scalar::Bool(value))
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Scalar(Scalar::Int(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Scalar(Scalar::Float(value))
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Scalar(Scalar::Str(value.to_string()))
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Scalar(Scalar::Str(value))
    }
}

impl From<Node> for Value {
    fn from(node: Node) -> Self {
        Value::Node(node)
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Scalar(Scalar::Null),
            serde_json::Value::Bool(value) => Value::Scalar(Scalar::Bool(value)),
            serde_json::Value::Number(number) => match number.as_i64() {
                Some(value) => Value::Scalar(Scalar::Int(value)),
                // u64 beyond i64::MAX and all non-integers land here.
                None => Value::Scalar(Scalar::Float(number.as_f64().unwrap_or(f64::NAN))),
            },
            serde_json::Value::String(value) => Value::Scalar(Scalar::Str(value)),
            serde_json::Value::Array(items) => {
                Value::Seq(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => Value::Record(
                map.into_iter()
                    .map(|(key, value)| (key, Value::from(value)))
                    .collect(),
            ),
        }
    }
}

impl Serialize for Scalar {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Scalar::Null => serializer.serialize_unit(),
            Scalar::Bool(value) => serializer.serialize_bool(*value),
            Scalar::Int(value) => serializer.serialize_i64(*value),
            Scalar::Float(value) => serializer.serialize_f64(*value),
            Scalar::Str(value) => serializer.serialize_str(value),
            Scalar::Bytes(value) => serializer.serialize_bytes(value),
        }
    }
}

// JSON has no tuple, set, or foreign-object notion; rendering those is
// an error the encoder raises, never a silent coercion.
impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Scalar(scalar) => scalar.serialize(serializer),
            Value::Seq(items) => serializer.collect_seq(items),
            Value::Record(map) => serializer.collect_map(map),
            Value::Node(node) => serializer.collect_map(node.attrs()),
            Value::Tuple(_) => Err(S::Error::custom("tuple is not representable in JSON")),
            Value::Set(_) => Err(S::Error::custom("set is not representable in JSON")),
            Value::Foreign(object) => Err(S::Error::custom(format!(
                "foreign object `{}` must be flattened before JSON rendering",
                object.type_label()
            ))),
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Null => f.write_str("null"),
            Scalar::Bool(value) => write!(f, "{value}"),
            Scalar::Int(value) => write!(f, "{value}"),
            Scalar::Float(value) => write!(f, "{value}"),
            Scalar::Str(value) => write!(f, "{value:?}"),
            Scalar::Bytes(value) => write!(f, "bytes[{}]", value.len()),
        }
    }
}
