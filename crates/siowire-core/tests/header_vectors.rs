//! Packet-string vector tests: grammar, header fields, attachment delivery.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::fs;

use bytes::Bytes;

use siowire_core::protocol::limits::DecodeLimits;
use siowire_core::protocol::packet::Packet;
use siowire_core::value::Value;

mod vector_loader;
use vector_loader::TestVector;

fn load(name: &str) -> TestVector {
    let s = fs::read_to_string(format!("tests/vectors/{name}")).unwrap();
    serde_json::from_str(&s).unwrap()
}

fn collect_binaries(value: &Value, out: &mut Vec<Vec<u8>>) {
    match value {
        Value::Binary(blob) => out.push(blob.to_vec()),
        Value::List(items) => {
            for item in items {
                collect_binaries(item, out);
            }
        }
        Value::Map(entries) => {
            for item in entries.values() {
                collect_binaries(item, out);
            }
        }
        _ => {}
    }
}

#[test]
fn packet_vectors() {
    let files = [
        "event_min.json",
        "event_nsp_ack.json",
        "ack_plain.json",
        "connect_handshake.json",
        "disconnect_min.json",
        "error_packet.json",
        "binary_event_one.json",
        "binary_ack_nested.json",
        "unknown_type.json",
        "binary_missing_count.json",
        "binary_zero_count.json",
        "bad_body_json.json",
        "empty_packet.json",
        "placeholder_out_of_range.json",
        "too_many_attachments.json",
    ];

    for f in files {
        let v = load(f);
        let mut packet = match Packet::parse(&v.packet, DecodeLimits::default()) {
            Ok(p) => p,
            Err(e) => {
                let err = v.expect_error.expect("unexpected parse error");
                assert_eq!(e.decode_code().as_str(), err.code, "vector={}", v.description);
                continue;
            }
        };

        if let Some(ex) = &v.expect {
            let digit = packet.packet_type().digit().to_digit(10).unwrap() as u64;
            assert_eq!(digit, ex["type"].as_u64().unwrap(), "vector={}", v.description);
            assert_eq!(packet.nsp(), ex["nsp"].as_str().unwrap(), "vector={}", v.description);
            if ex["ack_id"].is_null() {
                assert!(packet.ack_id().is_none(), "vector={}", v.description);
            } else {
                assert_eq!(packet.ack_id(), ex["ack_id"].as_u64(), "vector={}", v.description);
            }
            assert_eq!(
                packet.expected_attachments() as u64,
                ex["attachments"].as_u64().unwrap(),
                "vector={}",
                v.description
            );
            let payload = serde_json::to_value(packet.payload()).unwrap();
            assert_eq!(payload, ex["payload"], "vector={}", v.description);
        }

        let mut decode_err = None;
        for a in &v.attachments {
            match packet.add_attachment(Bytes::from(a.decode())) {
                Ok(_) => {}
                Err(e) => {
                    decode_err = Some(e);
                    break;
                }
            }
        }

        if let Some(err) = v.expect_error {
            let e = decode_err.expect("expected a decode error");
            assert_eq!(e.decode_code().as_str(), err.code, "vector={}", v.description);
            continue;
        }

        assert!(decode_err.is_none(), "vector={}", v.description);
        assert!(packet.is_complete(), "vector={}", v.description);

        // Spliced binaries must match the delivered frames, in order.
        let mut found = Vec::new();
        for item in packet.payload() {
            collect_binaries(item, &mut found);
        }
        let sent: Vec<Vec<u8>> = v.attachments.iter().map(|a| a.decode()).collect();
        assert_eq!(found, sent, "vector={}", v.description);
    }
}
