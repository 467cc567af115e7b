//---------------------------------------------------------------------------//
// Copyright (c) 2024-2026 The Andastra project contributors. All rights reserved.
//
// This file is part of the Andastra project,
// which can be found here: https://github.com/andastra-project/andastra.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/andastra-project/andastra/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! Module containing tests for decoding/encoding `Lip` files.

use std::io::Cursor;

use serde_json::json;

use crate::files::*;

use super::{Lip, LipKeyframe};

fn sample_lip() -> Lip {
    let mut lip = Lip::new(1.5);
    lip.keyframes.push(LipKeyframe { time: 0.0, shape: 0 });
    lip.keyframes.push(LipKeyframe { time: 0.5, shape: 7 });
    lip.keyframes.push(LipKeyframe { time: 1.5, shape: 0 });
    lip
}

#[test]
fn test_encode_lip_byte_identical_round_trip() {
    let mut lip = sample_lip();

    let mut before = vec![];
    lip.encode(&mut before, &None).unwrap();

    let mut decoded = Lip::decode(&mut Cursor::new(&before), &None).unwrap();
    assert_eq!(lip, decoded);

    let mut after = vec![];
    decoded.encode(&mut after, &None).unwrap();
    assert_eq!(before, after);
}

#[test]
fn test_lip_json_reads_canonical_form() {
    let value = json!({
        "duration": 1.5,
        "keyframes": [{"time": 0.0, "shape": 0}],
    });
    let lip = Lip::from_json(&value).unwrap();
    assert_eq!(lip.duration, 1.5);
    assert_eq!(lip.keyframes.len(), 1);
}

#[test]
fn test_lip_json_reads_legacy_wrapped_form() {
    let value = json!({
        "lip": {
            "duration": 1.5,
            "keyframes": [{"time": 0.0, "shape": 0}],
        }
    });
    let lip = Lip::from_json(&value).unwrap();
    assert_eq!(lip.duration, 1.5);
}

#[test]
fn test_lip_json_always_writes_canonical_form() {
    let lip = sample_lip();
    let value = lip.to_json();
    assert!(value.get("lip").is_none());
    assert!(value.get("duration").is_some());

    let rebuilt = Lip::from_json(&value).unwrap();
    assert_eq!(lip, rebuilt);
}
