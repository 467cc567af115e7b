//---------------------------------------------------------------------------//
// Copyright (c) 2024-2026 The Andastra project contributors. All rights reserved.
//
// This file is part of the Andastra project,
// which can be found here: https://github.com/andastra-project/andastra.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/andastra-project/andastra/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! Module containing tests for decoding/encoding `Rim` archives.

use std::io::Cursor;

use crate::files::*;

use super::Rim;

#[test]
fn test_encode_rim_round_trip() {
    let mut rim = Rim::new();
    rim.insert(ResRef::new("foo").unwrap(), ResourceType::UTM, b"module merchant".to_vec());
    rim.insert(ResRef::new("m01aa").unwrap(), ResourceType::ARE, b"area bytes".to_vec());

    let mut encoded = vec![];
    rim.encode(&mut encoded, &None).unwrap();

    let mut decoded = Rim::decode(&mut Cursor::new(&encoded), &None).unwrap();
    assert_eq!(decoded.entries().len(), 2);

    let mut reader = Cursor::new(&encoded);
    decoded.load_all(&mut reader).unwrap();
    assert_eq!(decoded.data_of(&ResRef::new("foo").unwrap(), ResourceType::UTM).unwrap(), b"module merchant");
    assert_eq!(decoded.data_of(&ResRef::new("M01AA").unwrap(), ResourceType::ARE).unwrap(), b"area bytes");
}

#[test]
fn test_rim_bad_signature() {
    let mut data = b"NOPE".to_vec();
    data.extend_from_slice(&[0; 16]);
    assert!(Rim::decode(&mut Cursor::new(&data), &None).is_err());
}

#[test]
fn test_rim_truncated_entry_table() {
    let mut rim = Rim::new();
    rim.insert(ResRef::new("foo").unwrap(), ResourceType::UTM, b"data".to_vec());

    let mut encoded = vec![];
    rim.encode(&mut encoded, &None).unwrap();
    encoded.truncate(30);

    assert!(Rim::decode(&mut Cursor::new(&encoded), &None).is_err());
}
