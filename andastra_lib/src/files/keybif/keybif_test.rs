//---------------------------------------------------------------------------//
// Copyright (c) 2024-2026 The Andastra project contributors. All rights reserved.
//
// This file is part of the Andastra project,
// which can be found here: https://github.com/andastra-project/andastra.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/andastra-project/andastra/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! Module containing tests for decoding `Key`/`Bif` archives.

use std::io::Cursor;

use crate::binary::WriteBytes;
use crate::files::*;

use super::{Bif, Key};

/// This function assembles a KEY indexing one BIF with two resources.
pub(super) fn sample_key() -> Vec<u8> {
    let mut data: Vec<u8> = vec![];
    data.write_string_u8("KEY ").unwrap();
    data.write_string_u8("V1  ").unwrap();
    data.write_u32(1).unwrap();
    data.write_u32(2).unwrap();

    let offset_to_files = 64u32;
    let offset_to_names = offset_to_files + 12;
    let name = "data\\test.bif";
    let offset_to_keys = offset_to_names + name.len() as u32;

    data.write_u32(offset_to_files).unwrap();
    data.write_u32(offset_to_keys).unwrap();
    data.write_u32(124).unwrap();
    data.write_u32(200).unwrap();
    data.extend_from_slice(&[0; 32]);

    // File table.
    data.write_u32(64).unwrap();
    data.write_u32(offset_to_names).unwrap();
    data.write_u16(name.len() as u16).unwrap();
    data.write_u16(1).unwrap();
    data.write_string_u8(name).unwrap();

    // Key table: resource ids pack bif_index << 20 | resource_index.
    data.write_string_u8_0padded("foo", 16).unwrap();
    data.write_u16(ResourceType::UTM.code()).unwrap();
    data.write_u32(0).unwrap();
    data.write_string_u8_0padded("bar", 16).unwrap();
    data.write_u16(ResourceType::TWODA.code()).unwrap();
    data.write_u32(1).unwrap();

    data
}

/// This function assembles the matching BIF with two resources.
pub(super) fn sample_bif() -> Vec<u8> {
    let mut data: Vec<u8> = vec![];
    data.write_string_u8("BIFF").unwrap();
    data.write_string_u8("V1  ").unwrap();
    data.write_u32(2).unwrap();
    data.write_u32(0).unwrap();
    data.write_u32(20).unwrap();

    // Variable resource table, data right behind it.
    let data_start = 20 + 2 * 16;
    data.write_u32(0).unwrap();
    data.write_u32(data_start).unwrap();
    data.write_u32(9).unwrap();
    data.write_u32(ResourceType::UTM.code() as u32).unwrap();

    data.write_u32(1).unwrap();
    data.write_u32(data_start + 9).unwrap();
    data.write_u32(9).unwrap();
    data.write_u32(ResourceType::TWODA.code() as u32).unwrap();

    data.write_string_u8("UTM bytes").unwrap();
    data.write_string_u8("2DA bytes").unwrap();

    data
}

#[test]
fn test_decode_key() {
    let data = sample_key();
    let key = Key::decode(&mut Cursor::new(&data), &None).unwrap();

    assert_eq!(key.bif_names(), &["data\\test.bif".to_owned()]);
    assert_eq!(key.entries().len(), 2);

    let entry = key.entry(&ResRef::new("foo").unwrap(), ResourceType::UTM).unwrap();
    assert_eq!(*entry.bif_index(), 0);
    assert_eq!(*entry.resource_index(), 0);

    let entry = key.entry(&ResRef::new("BAR").unwrap(), ResourceType::TWODA).unwrap();
    assert_eq!(*entry.resource_index(), 1);
}

#[test]
fn test_decode_bif_and_read_through_key() {
    let key_data = sample_key();
    let bif_data = sample_bif();

    let key = Key::decode(&mut Cursor::new(&key_data), &None).unwrap();
    let bif = Bif::decode(&mut Cursor::new(&bif_data), &None).unwrap();

    let entry = key.entry(&ResRef::new("foo").unwrap(), ResourceType::UTM).unwrap();
    let mut reader = Cursor::new(&bif_data);
    let bytes = bif.read_resource(&mut reader, *entry.resource_index()).unwrap();
    assert_eq!(bytes, b"UTM bytes");

    let entry = key.entry(&ResRef::new("bar").unwrap(), ResourceType::TWODA).unwrap();
    let bytes = bif.read_resource(&mut reader, *entry.resource_index()).unwrap();
    assert_eq!(bytes, b"2DA bytes");
}

#[test]
fn test_key_bad_signature() {
    let mut data = sample_key();
    data[..4].copy_from_slice(b"NOPE");
    assert!(Key::decode(&mut Cursor::new(&data), &None).is_err());
}

#[test]
fn test_bif_truncated_table() {
    let mut data = sample_bif();
    data.truncate(30);
    assert!(Bif::decode(&mut Cursor::new(&data), &None).is_err());
}
