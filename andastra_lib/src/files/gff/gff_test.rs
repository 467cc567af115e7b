//---------------------------------------------------------------------------//
// Copyright (c) 2024-2026 The Andastra project contributors. All rights reserved.
//
// This file is part of the Andastra project,
// which can be found here: https://github.com/andastra-project/andastra.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/andastra-project/andastra/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! Module containing tests for decoding/encoding `Gff` files.

use std::io::Cursor;

use crate::binary::WriteBytes;
use crate::error::ALibError;
use crate::files::*;

use super::{Gff, GffField, GffStruct, LocalizedString};

/// This function builds a tree exercising every field type at least once.
fn sample_gff() -> Gff {
    let mut gff = Gff::new("UTM");

    let mut locstring = LocalizedString::new(-1);
    locstring.set(0, 0, "Shady merchant");
    locstring.set(1, 1, "Marchande louche");

    let mut item = GffStruct::new(0);
    item.insert("InventoryRes", GffField::ResRef(ResRef::new("g_w_blstrpstl01").unwrap())).unwrap();
    item.insert("Infinite", GffField::U8(1)).unwrap();

    let mut sub = GffStruct::new(7);
    sub.insert("Flags", GffField::U32(3)).unwrap();

    let root = gff.root_mut();
    root.insert("ResRef", GffField::ResRef(ResRef::new("merchant01").unwrap())).unwrap();
    root.insert("LocName", GffField::LocalizedString(locstring)).unwrap();
    root.insert("Tag", GffField::String("m1".to_owned())).unwrap();
    root.insert("MarkUp", GffField::I32(20)).unwrap();
    root.insert("MarkDown", GffField::I32(10)).unwrap();
    root.insert("Small", GffField::U8(200)).unwrap();
    root.insert("Signed", GffField::I8(-5)).unwrap();
    root.insert("Short", GffField::I16(-300)).unwrap();
    root.insert("Word", GffField::U16(42)).unwrap();
    root.insert("Big", GffField::U64(1 << 40)).unwrap();
    root.insert("BigSigned", GffField::I64(-(1 << 40))).unwrap();
    root.insert("Price", GffField::F32(99.5)).unwrap();
    root.insert("Precise", GffField::F64(0.125)).unwrap();
    root.insert("Blob", GffField::Void(vec![0xDE, 0xAD, 0xBE, 0xEF])).unwrap();
    root.insert("XPosition", GffField::Vector3([1.0, 2.0, 3.0])).unwrap();
    root.insert("XOrientation", GffField::Vector4([0.0, 0.0, 0.0, 1.0])).unwrap();
    root.insert("Extra", GffField::Struct(sub)).unwrap();
    root.insert("ItemList", GffField::List(vec![item])).unwrap();

    gff
}

#[test]
fn test_encode_gff_structural_round_trip() {
    let mut gff = sample_gff();

    let mut encoded = vec![];
    gff.encode(&mut encoded, &None).unwrap();

    let decoded = Gff::decode(&mut Cursor::new(&encoded), &None).unwrap();
    assert_eq!(gff, decoded);
}

#[test]
fn test_encode_gff_byte_identical_round_trip() {
    let mut gff = sample_gff();

    let mut before = vec![];
    gff.encode(&mut before, &None).unwrap();

    let mut decoded = Gff::decode(&mut Cursor::new(&before), &None).unwrap();
    let mut after = vec![];
    decoded.encode(&mut after, &None).unwrap();

    assert_eq!(before, after);
}

#[test]
fn test_gff_field_order_preserved() {
    let mut gff = sample_gff();

    let mut encoded = vec![];
    gff.encode(&mut encoded, &None).unwrap();
    let decoded = Gff::decode(&mut Cursor::new(&encoded), &None).unwrap();

    let labels_before = gff.root().fields().iter().map(|(label, _)| label.to_owned()).collect::<Vec<_>>();
    let labels_after = decoded.root().fields().iter().map(|(label, _)| label.to_owned()).collect::<Vec<_>>();
    assert_eq!(labels_before, labels_after);
}

#[test]
fn test_gff_unset_stringref_encodes_as_max_u32() {
    let mut gff = Gff::new("UTM");
    gff.root_mut().insert("LocName", GffField::LocalizedString(LocalizedString::new(-1))).unwrap();

    let mut encoded = vec![];
    gff.encode(&mut encoded, &None).unwrap();

    // Field data starts right after header + 1 struct + 1 field + 1 label. The
    // first u32 of the locstring payload is his size, the second the stringref.
    let field_data_offset = 56 + 12 + 12 + 16;
    let stringref_bytes = &encoded[field_data_offset + 4..field_data_offset + 8];
    assert_eq!(stringref_bytes, &[0xFF, 0xFF, 0xFF, 0xFF]);
}

#[test]
fn test_gff_bad_signature() {
    let mut gff = sample_gff();
    let mut encoded = vec![];
    gff.encode(&mut encoded, &None).unwrap();

    let expected: &[&str] = &["UTE "];
    let extra_data = DecodeableExtraData::default().set_expected_signatures(Some(expected)).clone();
    match Gff::decode(&mut Cursor::new(&encoded), &Some(extra_data)) {
        Err(ALibError::DecodingBadSignature(_, found)) => assert_eq!(found, "UTM "),
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn test_gff_wildcard_signature() {
    let mut gff = sample_gff();
    let mut encoded = vec![];
    gff.encode(&mut encoded, &None).unwrap();

    let expected: &[&str] = &["GFF "];
    let extra_data = DecodeableExtraData::default().set_expected_signatures(Some(expected)).clone();
    assert!(Gff::decode(&mut Cursor::new(&encoded), &Some(extra_data)).is_ok());
}

#[test]
fn test_gff_cyclic_graph_is_refused() {
    // Hand-assembled file: struct 0 holds a struct field pointing at struct 1,
    // and struct 1 holds a list containing struct 0 again.
    let mut data: Vec<u8> = vec![];
    data.write_string_u8("GFF ").unwrap();
    data.write_string_u8("V3.2").unwrap();

    let struct_offset = 56u32;
    let field_offset = struct_offset + 2 * 12;
    let label_offset = field_offset + 2 * 12;
    let field_data_offset = label_offset + 2 * 16;
    let field_indices_offset = field_data_offset;
    let list_indices_offset = field_indices_offset;

    data.write_u32(struct_offset).unwrap();
    data.write_u32(2).unwrap();
    data.write_u32(field_offset).unwrap();
    data.write_u32(2).unwrap();
    data.write_u32(label_offset).unwrap();
    data.write_u32(2).unwrap();
    data.write_u32(field_data_offset).unwrap();
    data.write_u32(0).unwrap();
    data.write_u32(field_indices_offset).unwrap();
    data.write_u32(0).unwrap();
    data.write_u32(list_indices_offset).unwrap();
    data.write_u32(8).unwrap();

    // Struct 0: one field, field 0. Struct 1: one field, field 1.
    data.write_i32(-1).unwrap();
    data.write_u32(0).unwrap();
    data.write_u32(1).unwrap();
    data.write_i32(0).unwrap();
    data.write_u32(1).unwrap();
    data.write_u32(1).unwrap();

    // Field 0: type Struct, points at struct 1. Field 1: type List, offset 0.
    data.write_u32(14).unwrap();
    data.write_u32(0).unwrap();
    data.write_u32(1).unwrap();
    data.write_u32(15).unwrap();
    data.write_u32(1).unwrap();
    data.write_u32(0).unwrap();

    data.write_string_u8_0padded("Child", 16).unwrap();
    data.write_string_u8_0padded("Loop", 16).unwrap();

    // List indices: one entry, struct 0.
    data.write_u32(1).unwrap();
    data.write_u32(0).unwrap();

    match Gff::decode(&mut Cursor::new(&data), &None) {
        Err(ALibError::DecodingCyclicGraph(0)) => {},
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn test_gff_truncated_struct_array() {
    let mut gff = sample_gff();
    let mut encoded = vec![];
    gff.encode(&mut encoded, &None).unwrap();

    // Chop the file in the middle of the struct array.
    encoded.truncate(60);
    assert!(Gff::decode(&mut Cursor::new(&encoded), &None).is_err());
}

#[test]
fn test_gff_json_round_trip() {
    let gff = sample_gff();
    let json = gff.to_json();
    let rebuilt = Gff::from_json(&json).unwrap();
    assert_eq!(gff, rebuilt);
}
