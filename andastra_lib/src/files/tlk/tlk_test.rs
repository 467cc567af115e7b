//---------------------------------------------------------------------------//
// Copyright (c) 2024-2026 The Andastra project contributors. All rights reserved.
//
// This file is part of the Andastra project,
// which can be found here: https://github.com/andastra-project/andastra.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/andastra-project/andastra/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! Module containing tests for decoding/encoding `Tlk` files.

use std::io::Cursor;

use crate::files::*;

use super::{Tlk, TlkEntry, TlkEntryFlags};

fn sample_tlk() -> Tlk {
    let mut tlk = Tlk::new(0);
    tlk.append(TlkEntry::with_text("Hello"));
    tlk.append(TlkEntry::with_text("Goodbye"));

    let mut voiced = TlkEntry::with_text("You must construct additional pylons.");
    voiced.set_flags(TlkEntryFlags::TEXT | TlkEntryFlags::SOUND | TlkEntryFlags::SOUND_LENGTH);
    voiced.set_sound(ResRef::new("n_advisor_01").unwrap());
    voiced.set_sound_length(2.5);
    tlk.append(voiced);

    tlk
}

#[test]
fn test_encode_tlk_byte_identical_round_trip() {
    let mut tlk = sample_tlk();

    let mut before = vec![];
    tlk.encode(&mut before, &None).unwrap();

    let mut decoded = Tlk::decode(&mut Cursor::new(&before), &None).unwrap();
    assert_eq!(tlk, decoded);

    let mut after = vec![];
    decoded.encode(&mut after, &None).unwrap();
    assert_eq!(before, after);
}

#[test]
fn test_tlk_append_assigns_sequential_strrefs() {
    let mut tlk = Tlk::new(0);
    assert_eq!(tlk.append(TlkEntry::with_text("first")), 0);
    assert_eq!(tlk.append(TlkEntry::with_text("second")), 1);
    assert_eq!(tlk.entry(1).unwrap().text(), "second");
    assert!(tlk.entry(-1).is_none());
}

#[test]
fn test_tlk_truncate_restores_baseline() {
    let mut tlk = sample_tlk();
    tlk.append(TlkEntry::with_text("modded string"));
    assert_eq!(tlk.len(), 4);

    tlk.truncate(3);
    assert_eq!(tlk.len(), 3);
    assert!(tlk.entry(3).is_none());

    // Truncating above the current lenght is a no-op.
    tlk.truncate(100);
    assert_eq!(tlk.len(), 3);
}

#[test]
fn test_tlk_dedup_merges_identical_strings() {
    let mut tlk = Tlk::new(0);
    tlk.append(TlkEntry::with_text("same"));
    tlk.append(TlkEntry::with_text("same"));

    let mut plain = vec![];
    tlk.encode(&mut plain, &None).unwrap();

    let extra_data = EncodeableExtraData::default().set_dedup_strings(true).clone();
    let mut deduped = vec![];
    tlk.encode(&mut deduped, &Some(extra_data)).unwrap();

    assert_eq!(plain.len() - deduped.len(), "same".len());

    // The logical table survives either layout.
    let decoded = Tlk::decode(&mut Cursor::new(&deduped), &None).unwrap();
    assert_eq!(tlk, decoded);
}

#[test]
fn test_tlk_polish_codepage_round_trip() {
    // "ł" only exists in WINDOWS-1250 among the legacy codepages.
    let mut tlk = Tlk::new(5);
    tlk.append(TlkEntry::with_text("Witaj, przybyszu! Miło cię widzieć."));

    let mut encoded = vec![];
    tlk.encode(&mut encoded, &None).unwrap();

    let decoded = Tlk::decode(&mut Cursor::new(&encoded), &None).unwrap();
    assert_eq!(tlk, decoded);
}

#[test]
fn test_tlk_bad_signature() {
    let mut data = b"NOPE".to_vec();
    data.extend_from_slice(&[0; 16]);
    assert!(Tlk::decode(&mut Cursor::new(&data), &None).is_err());
}
