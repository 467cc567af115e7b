//---------------------------------------------------------------------------//
// Copyright (c) 2024-2026 The Andastra project contributors. All rights reserved.
//
// This file is part of the Andastra project,
// which can be found here: https://github.com/andastra-project/andastra.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/andastra-project/andastra/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! Module containing tests for the [`WriteBytes`] trait.

use std::io::Cursor;

use crate::binary::{ReadBytes, WriteBytes};

#[test]
fn test_write_integers() {
    let mut data = vec![];
    data.write_u16(10).unwrap();
    data.write_i32(-2).unwrap();
    assert_eq!(data, vec![0x0A, 0x00, 0xFE, 0xFF, 0xFF, 0xFF]);
}

#[test]
fn test_write_string_u8_0padded() {
    let mut data = vec![];
    data.write_string_u8_0padded("m1", 16).unwrap();
    assert_eq!(data.len(), 16);
    assert_eq!(&data[..2], b"m1");
    assert!(data[2..].iter().all(|byte| *byte == 0));
}

#[test]
fn test_write_string_u8_0padded_crops_oversized() {
    let mut data = vec![];
    data.write_string_u8_0padded("averyveryverylongresref", 16).unwrap();
    assert_eq!(data.len(), 16);
}

#[test]
fn test_string_fallback_round_trip_cp1252() {
    // Non-ASCII cp1252 text must survive a decode -> encode cycle byte-identical.
    let source = vec![0x68, 0xE9, 0x6C, 0x6C, 0x6F];
    let mut cursor = Cursor::new(source.to_vec());
    let decoded = cursor.read_string_fallback(5).unwrap();

    let mut reencoded = vec![];
    reencoded.write_string_fallback(&decoded).unwrap();
    assert_eq!(source, reencoded);
}

#[test]
fn test_sized_string_u32_round_trip() {
    let mut data = vec![];
    data.write_sized_string_u32("k_on_open").unwrap();

    let mut cursor = Cursor::new(data);
    assert_eq!(cursor.read_sized_string_u32().unwrap(), "k_on_open");
}
