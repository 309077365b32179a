//! Payload value model.
//!
//! Packets carry a dynamic JSON-shaped tree with two extra leaf kinds the
//! wire cannot express directly: raw binary blobs and the placeholder markers
//! that stand in for them in the JSON body. Both get dedicated variants so
//! the shred/fill walks can pattern-match exhaustively instead of sniffing
//! sentinel keys out of ordinary maps.

use std::collections::BTreeMap;
use std::fmt;

use bytes::Bytes;
use serde::de::{self, MapAccess, SeqAccess, Visitor};
use serde::ser::{self, SerializeMap, SerializeSeq};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Number;

/// JSON field flagging a placeholder map on the wire.
pub const PLACEHOLDER_KEY: &str = "_placeholder";
/// JSON field carrying the attachment index on the wire.
pub const PLACEHOLDER_NUM_KEY: &str = "num";

/// A payload tree node.
///
/// `Binary` never appears on the JSON wire: encoding replaces it with
/// `Placeholder`, and decoding replaces `Placeholder` back once the
/// referenced attachment has arrived.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Number(Number),
    Str(String),
    List(Vec<Value>),
    Map(BTreeMap<String, Value>),
    /// Raw attachment bytes.
    Binary(Bytes),
    /// Stand-in for attachment `num` in a shredded tree.
    Placeholder(usize),
}

impl Value {
    /// True for `Binary` leaves.
    pub fn is_binary(&self) -> bool {
        matches!(self, Value::Binary(_))
    }

    /// String content, if this node is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Number(Number::from(v))
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        Value::Number(Number::from(v))
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_owned())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Value::List(v)
    }
}

impl From<Bytes> for Value {
    fn from(v: Bytes) -> Self {
        Value::Binary(v)
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Value::Binary(Bytes::from(v))
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Number(n) => n.serialize(serializer),
            Value::Str(s) => serializer.serialize_str(s),
            Value::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Map(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (key, value) in entries {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
            Value::Placeholder(num) => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry(PLACEHOLDER_KEY, &true)?;
                map.serialize_entry(PLACEHOLDER_NUM_KEY, num)?;
                map.end()
            }
            // Payloads must be shredded before they hit the JSON body.
            Value::Binary(_) => Err(ser::Error::custom("raw binary leaf in JSON body")),
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ValueVisitor;

        impl<'de> Visitor<'de> for ValueVisitor {
            type Value = Value;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("any JSON value")
            }

            fn visit_unit<E>(self) -> std::result::Result<Value, E> {
                Ok(Value::Null)
            }

            fn visit_bool<E>(self, v: bool) -> std::result::Result<Value, E> {
                Ok(Value::Bool(v))
            }

            fn visit_i64<E>(self, v: i64) -> std::result::Result<Value, E> {
                Ok(Value::Number(Number::from(v)))
            }

            fn visit_u64<E>(self, v: u64) -> std::result::Result<Value, E> {
                Ok(Value::Number(Number::from(v)))
            }

            fn visit_f64<E>(self, v: f64) -> std::result::Result<Value, E>
            where
                E: de::Error,
            {
                Number::from_f64(v)
                    .map(Value::Number)
                    .ok_or_else(|| E::custom("non-finite number"))
            }

            fn visit_str<E>(self, v: &str) -> std::result::Result<Value, E> {
                Ok(Value::Str(v.to_owned()))
            }

            fn visit_string<E>(self, v: String) -> std::result::Result<Value, E> {
                Ok(Value::Str(v))
            }

            fn visit_seq<A>(self, mut seq: A) -> std::result::Result<Value, A::Error>
            where
                A: SeqAccess<'de>,
            {
                let mut items = Vec::new();
                while let Some(item) = seq.next_element()? {
                    items.push(item);
                }
                Ok(Value::List(items))
            }

            fn visit_map<A>(self, mut access: A) -> std::result::Result<Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries = BTreeMap::new();
                while let Some((key, value)) = access.next_entry::<String, Value>()? {
                    entries.insert(key, value);
                }
                Ok(promote_placeholder(entries))
            }
        }

        deserializer.deserialize_any(ValueVisitor)
    }
}

/// Collapse the wire shape `{"_placeholder":true,"num":n}` into the dedicated
/// variant; anything else stays an ordinary map.
fn promote_placeholder(entries: BTreeMap<String, Value>) -> Value {
    if entries.len() == 2 {
        if let (Some(Value::Bool(true)), Some(Value::Number(n))) =
            (entries.get(PLACEHOLDER_KEY), entries.get(PLACEHOLDER_NUM_KEY))
        {
            if let Some(num) = n.as_u64().and_then(|n| usize::try_from(n).ok()) {
                return Value::Placeholder(num);
            }
        }
    }
    Value::Map(entries)
}
