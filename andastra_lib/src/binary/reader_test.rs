//---------------------------------------------------------------------------//
// Copyright (c) 2024-2026 The Andastra project contributors. All rights reserved.
//
// This file is part of the Andastra project,
// which can be found here: https://github.com/andastra-project/andastra.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/andastra-project/andastra/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! Module containing tests for the [`ReadBytes`] trait.

use std::io::{Cursor, Seek};

use crate::binary::ReadBytes;
use crate::error::ALibError;

#[test]
fn test_read_integers() {
    let data = vec![0x0A, 0x00, 0xFE, 0xFF, 0x01, 0x00, 0x00, 0x00];
    let mut cursor = Cursor::new(data);

    assert_eq!(cursor.read_u16().unwrap(), 10);
    assert_eq!(cursor.read_i16().unwrap(), -2);
    assert_eq!(cursor.read_u32().unwrap(), 1);
    assert!(cursor.read_u8().is_err());
}

#[test]
fn test_read_string_fallback_utf8() {
    let mut cursor = Cursor::new("héllo".as_bytes().to_vec());
    assert_eq!(cursor.read_string_fallback(6).unwrap(), "héllo");
}

#[test]
fn test_read_string_fallback_cp1252() {
    // 0xE9 is not valid UTF-8 on its own, but it's "é" in WINDOWS-1252.
    let mut cursor = Cursor::new(vec![0x68, 0xE9, 0x6C, 0x6C, 0x6F]);
    assert_eq!(cursor.read_string_fallback(5).unwrap(), "héllo");
}

#[test]
fn test_read_string_u8_0padded_trims_trailing_nuls() {
    let mut cursor = Cursor::new(b"merchant01\0\0\0\0\0\0".to_vec());
    assert_eq!(cursor.read_string_u8_0padded(16).unwrap(), "merchant01");
    assert_eq!(cursor.stream_position().unwrap(), 16);
}

#[test]
fn test_read_sized_string_u32_overflowing_prefix() {
    // Declared size of 200 bytes with only 4 bytes of payload behind it.
    let mut cursor = Cursor::new(vec![0xC8, 0x00, 0x00, 0x00, 0x61, 0x62, 0x63, 0x64]);
    match cursor.read_sized_string_u32() {
        Err(ALibError::DecodingIntegerOverflow(200, 4)) => {},
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn test_read_string_u8_0terminated_missing_terminator() {
    let mut cursor = Cursor::new(b"no terminator here".to_vec());
    assert!(cursor.read_string_u8_0terminated().is_err());
}
