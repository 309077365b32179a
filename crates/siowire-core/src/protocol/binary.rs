//! Placeholder extraction and reinsertion ("shred" / "fill").
//!
//! Extraction walks the payload tree pre-order, depth-first (sequences in
//! index order, maps in key order) and replaces each binary leaf with a
//! placeholder carrying its append position in the attachment list. The
//! inverse walk splices attachments back over their placeholders; it is
//! driven purely by each placeholder's own index, so it does not depend on
//! the extraction order. Both walks rebuild collections from owned nodes
//! rather than mutating shared structure.

use std::collections::BTreeMap;

use bytes::Bytes;

use crate::error::{Result, SioWireError};
use crate::value::Value;

/// Replace every binary leaf with `Placeholder(i)`, appending the blob at
/// position `i` of `out`. Indices are 0-based, dense, and never reused.
pub fn deconstruct(value: Value, out: &mut Vec<Bytes>) -> Value {
    match value {
        Value::Binary(blob) => {
            let num = out.len();
            out.push(blob);
            Value::Placeholder(num)
        }
        Value::List(items) => Value::List(
            items
                .into_iter()
                .map(|item| deconstruct(item, out))
                .collect(),
        ),
        Value::Map(entries) => Value::Map(
            entries
                .into_iter()
                .map(|(key, item)| (key, deconstruct(item, out)))
                .collect(),
        ),
        other => other,
    }
}

/// Reject nesting beyond `max_depth` in a parsed inbound tree.
pub fn check_depth(value: &Value, max_depth: usize) -> Result<()> {
    depth_walk(value, max_depth, 0)
}

fn depth_walk(value: &Value, max_depth: usize, depth: usize) -> Result<()> {
    if depth > max_depth {
        return Err(SioWireError::DepthExceeded { max: max_depth });
    }
    match value {
        Value::List(items) => {
            for item in items {
                depth_walk(item, max_depth, depth + 1)?;
            }
            Ok(())
        }
        Value::Map(entries) => {
            for item in entries.values() {
                depth_walk(item, max_depth, depth + 1)?;
            }
            Ok(())
        }
        _ => Ok(()),
    }
}

/// Splice `attachments[num]` back over every `Placeholder(num)`.
///
/// An index past the attachment list is a protocol violation (truncated or
/// reordered binary stream) and surfaces as `PlaceholderOutOfRange`. Nesting
/// beyond `max_depth` is rejected; inbound trees are untrusted.
pub fn reconstruct(value: Value, attachments: &[Bytes], max_depth: usize) -> Result<Value> {
    fill(value, attachments, max_depth, 0)
}

fn fill(value: Value, attachments: &[Bytes], max_depth: usize, depth: usize) -> Result<Value> {
    if depth > max_depth {
        return Err(SioWireError::DepthExceeded { max: max_depth });
    }
    match value {
        Value::Placeholder(num) => attachments
            .get(num)
            .cloned()
            .map(Value::Binary)
            .ok_or(SioWireError::PlaceholderOutOfRange {
                num,
                have: attachments.len(),
            }),
        Value::List(items) => items
            .into_iter()
            .map(|item| fill(item, attachments, max_depth, depth + 1))
            .collect::<Result<Vec<_>>>()
            .map(Value::List),
        Value::Map(entries) => entries
            .into_iter()
            .map(|(key, item)| Ok((key, fill(item, attachments, max_depth, depth + 1)?)))
            .collect::<Result<BTreeMap<_, _>>>()
            .map(Value::Map),
        other => Ok(other),
    }
}
