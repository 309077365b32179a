//! Shred/fill property tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::collections::BTreeMap;

use bytes::Bytes;

use siowire_core::error::SioWireError;
use siowire_core::protocol::binary::{deconstruct, reconstruct};
use siowire_core::value::Value;

fn map(entries: Vec<(&str, Value)>) -> Value {
    Value::Map(
        entries
            .into_iter()
            .map(|(k, v)| (k.to_owned(), v))
            .collect::<BTreeMap<_, _>>(),
    )
}

fn blob(bytes: &[u8]) -> Value {
    Value::Binary(Bytes::copy_from_slice(bytes))
}

/// Payload with binaries at several depths: list head, map value, nested list.
fn sample_tree() -> Value {
    Value::List(vec![
        blob(b"alpha"),
        map(vec![
            ("k", blob(b"beta")),
            ("plain", Value::from("text")),
            ("z", Value::List(vec![Value::Null, blob(b"gamma")])),
        ]),
        Value::from(42i64),
    ])
}

#[test]
fn extraction_is_preorder_and_dense() {
    let mut bins = Vec::new();
    let shredded = deconstruct(sample_tree(), &mut bins);

    assert_eq!(bins.len(), 3);
    assert_eq!(bins[0], Bytes::copy_from_slice(b"alpha"));
    assert_eq!(bins[1], Bytes::copy_from_slice(b"beta"));
    assert_eq!(bins[2], Bytes::copy_from_slice(b"gamma"));

    // Indices follow pre-order DFS: list head, then map keys "k" < "z".
    let expected = Value::List(vec![
        Value::Placeholder(0),
        map(vec![
            ("k", Value::Placeholder(1)),
            ("plain", Value::from("text")),
            ("z", Value::List(vec![Value::Null, Value::Placeholder(2)])),
        ]),
        Value::from(42i64),
    ]);
    assert_eq!(shredded, expected);
}

#[test]
fn roundtrip_restores_the_original_tree() {
    let original = sample_tree();
    let mut bins = Vec::new();
    let shredded = deconstruct(original.clone(), &mut bins);
    let restored = reconstruct(shredded, &bins, 64).unwrap();
    assert_eq!(restored, original);
}

#[test]
fn non_binary_tree_passes_through_unchanged() {
    let tree = map(vec![
        ("a", Value::from(true)),
        ("b", Value::List(vec![Value::from("x"), Value::Null])),
    ]);
    let mut bins = Vec::new();
    let shredded = deconstruct(tree.clone(), &mut bins);
    assert!(bins.is_empty());
    assert_eq!(shredded, tree);
}

#[test]
fn out_of_range_placeholder_is_an_error() {
    let tree = Value::List(vec![Value::Placeholder(3)]);
    let bins = vec![Bytes::from_static(b"only one")];
    let err = reconstruct(tree, &bins, 64).unwrap_err();
    match err {
        SioWireError::PlaceholderOutOfRange { num, have } => {
            assert_eq!(num, 3);
            assert_eq!(have, 1);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn reinsertion_rejects_excessive_nesting() {
    let mut tree = Value::Placeholder(0);
    for _ in 0..10 {
        tree = Value::List(vec![tree]);
    }
    let bins = vec![Bytes::from_static(b"deep")];

    // Fits inside the bound...
    assert!(reconstruct(tree.clone(), &bins, 16).is_ok());

    // ...and trips it when the bound is tighter than the tree.
    let err = reconstruct(tree, &bins, 4).unwrap_err();
    assert!(matches!(err, SioWireError::DepthExceeded { max: 4 }));
}

#[test]
fn reinsertion_order_is_index_driven() {
    // Placeholders out of traversal order still resolve by their own index.
    let tree = Value::List(vec![Value::Placeholder(1), Value::Placeholder(0)]);
    let bins = vec![Bytes::from_static(b"zero"), Bytes::from_static(b"one")];
    let restored = reconstruct(tree, &bins, 64).unwrap();
    assert_eq!(
        restored,
        Value::List(vec![
            Value::Binary(Bytes::from_static(b"one")),
            Value::Binary(Bytes::from_static(b"zero")),
        ])
    );
}
