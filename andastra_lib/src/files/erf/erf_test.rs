//---------------------------------------------------------------------------//
// Copyright (c) 2024-2026 The Andastra project contributors. All rights reserved.
//
// This file is part of the Andastra project,
// which can be found here: https://github.com/andastra-project/andastra.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/andastra-project/andastra/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! Module containing tests for decoding/encoding `Erf` archives.

use std::io::Cursor;

use crate::files::*;

use super::Erf;

fn sample_erf() -> Erf {
    let mut erf = Erf::new("MOD ");
    erf.set_build_year(124);
    erf.set_build_day(200);
    erf.add_localized_string(0, "A test module");
    erf.insert(ResRef::new("foo").unwrap(), ResourceType::UTM, b"merchant bytes".to_vec());
    erf.insert(ResRef::new("bar").unwrap(), ResourceType::UTC, b"creature bytes".to_vec());
    erf
}

#[test]
fn test_encode_erf_round_trip() {
    let mut erf = sample_erf();

    let mut encoded = vec![];
    erf.encode(&mut encoded, &None).unwrap();

    let mut decoded = Erf::decode(&mut Cursor::new(&encoded), &None).unwrap();
    assert_eq!(decoded.erf_type(), "MOD ");
    assert!(!*decoded.unknown_type());
    assert_eq!(decoded.localized_strings(), &[(0, "A test module".to_owned())]);
    assert_eq!(decoded.entries().len(), 2);

    let mut reader = Cursor::new(&encoded);
    decoded.load_all(&mut reader).unwrap();
    assert_eq!(decoded.data_of(&ResRef::new("foo").unwrap(), ResourceType::UTM).unwrap(), b"merchant bytes");
    assert_eq!(decoded.data_of(&ResRef::new("bar").unwrap(), ResourceType::UTC).unwrap(), b"creature bytes");
}

#[test]
fn test_erf_lazy_read_by_location() {
    let mut erf = sample_erf();
    let mut encoded = vec![];
    erf.encode(&mut encoded, &None).unwrap();

    let decoded = Erf::decode(&mut Cursor::new(&encoded), &None).unwrap();
    let entry = decoded.entry(&ResRef::new("foo").unwrap(), ResourceType::UTM).unwrap().clone();

    let mut reader = Cursor::new(&encoded);
    let data = decoded.read_entry(&mut reader, &entry).unwrap();
    assert_eq!(data, b"merchant bytes");
}

#[test]
fn test_erf_lookup_is_case_insensitive() {
    let mut erf = sample_erf();
    let mut encoded = vec![];
    erf.encode(&mut encoded, &None).unwrap();

    let decoded = Erf::decode(&mut Cursor::new(&encoded), &None).unwrap();
    assert!(decoded.entry(&ResRef::new("FOO").unwrap(), ResourceType::UTM).is_some());
}

#[test]
fn test_erf_insert_replaces_same_identity() {
    let mut erf = sample_erf();
    erf.insert(ResRef::new("foo").unwrap(), ResourceType::UTM, b"new bytes".to_vec());
    assert_eq!(erf.entries().len(), 2);
    assert_eq!(erf.data_of(&ResRef::new("foo").unwrap(), ResourceType::UTM).unwrap(), b"new bytes");
}

#[test]
fn test_erf_unknown_type_tag_is_tolerated() {
    let mut erf = sample_erf();
    let mut encoded = vec![];
    erf.encode(&mut encoded, &None).unwrap();
    encoded[..4].copy_from_slice(b"XYZ ");

    let decoded = Erf::decode(&mut Cursor::new(&encoded), &None).unwrap();
    assert!(*decoded.unknown_type());
    assert_eq!(decoded.entries().len(), 2);
}

#[test]
fn test_erf_unsupported_version() {
    let mut erf = sample_erf();
    let mut encoded = vec![];
    erf.encode(&mut encoded, &None).unwrap();
    encoded[4..8].copy_from_slice(b"V9.9");

    assert!(Erf::decode(&mut Cursor::new(&encoded), &None).is_err());
}
