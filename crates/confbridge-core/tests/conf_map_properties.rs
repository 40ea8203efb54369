// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

use confbridge_core::*;
use confbridge_proto::{ConfigMap, encode_config};

fn encode(pairs: &[(&str, &str)]) -> Vec<u8> {
    encode_config(&ConfigMap::from_pairs(pairs.iter().copied()))
}

#[confbridge_test_utils::logged_test]
fn test_distinct_keys_map_one_to_one() {
    for n in [0usize, 1, 2, 17, 256] {
        let pairs: Vec<(String, String)> =
            (0..n).map(|i| (format!("spark.conf.{i}"), format!("value-{i}"))).collect();
        let data = encode_config(&ConfigMap::from_pairs(pairs.clone()));

        let confs = parse_conf_map(&data).unwrap();
        logger.log(&format!("n={} decoded={}", n, confs.len())).unwrap();
        assert_eq!(confs.len(), n);
        for (key, value) in &pairs {
            assert_eq!(confs.get(key), Some(value));
        }
    }
}

#[confbridge_test_utils::logged_test]
fn test_duplicate_key_yields_single_entry() {
    let confs = parse_conf_map(&encode(&[("dup", "first"), ("other", "x"), ("dup", "second")]))
        .unwrap();

    assert_eq!(confs.len(), 2);
    assert_eq!(confs["dup"], "second");
}

#[confbridge_test_utils::logged_test]
fn test_empty_config_formats_as_newline() {
    let confs = parse_conf_map(&encode(&[])).unwrap();

    assert!(confs.is_empty());
    assert_eq!(print_config(&confs), "\n");
}

#[confbridge_test_utils::logged_test]
fn test_two_entries_format() {
    let text = print_config(&parse_conf_map(&encode(&[("a", "1"), ("b", "2")])).unwrap());

    assert!(text.starts_with('\n'));
    assert!(text.contains(" [a, 1]\n"));
    assert!(text.contains(" [b, 2]\n"));
    assert_eq!(text.len(), "\n [a, 1]\n [b, 2]\n".len());
}

#[confbridge_test_utils::logged_test]
fn test_truncated_input_is_an_error() {
    let data = encode(&[("spark.sql.shuffle.partitions", "200"), ("k", "v")]);

    for cut in [1, 3, data.len() / 2] {
        let truncated = &data[..data.len() - cut];
        let err = parse_conf_map(truncated).unwrap_err();
        assert!(err.is_malformed(), "cut {cut} produced {err}");
    }
}

#[confbridge_test_utils::logged_test]
fn test_corrupted_input_is_an_error() {
    let cases: [&[u8]; 4] = [
        // dangling varint continuation
        &[0xff],
        // field 1 with unsupported wire type 7
        &[0x0f, 0x00],
        // length prefix with no payload
        &[0x0a],
        // entry whose value is not UTF-8
        &[0x0a, 0x06, 0x0a, 0x01, b'k', 0x12, 0x01, 0xc3],
    ];

    for bytes in cases {
        let err = parse_conf_map(bytes).unwrap_err();
        logger.log(&format!("{:02x?} -> {}", bytes, err)).unwrap();
        assert!(matches!(err, ConfError::MalformedConfig(_)));
        assert!(err.to_string().starts_with("malformed configuration input"));
    }
}

#[confbridge_test_utils::logged_test]
fn test_decode_leaves_buffer_untouched() {
    let data = encode(&[("a", "1"), ("b", "2"), ("c", "3")]);
    let snapshot = data.clone();

    let first = parse_conf_map(&data).unwrap();
    let second = parse_conf_map(&data).unwrap();

    assert_eq!(first, second);
    assert_eq!(data, snapshot);
}
