//---------------------------------------------------------------------------//
// Copyright (c) 2024-2026 The Andastra project contributors. All rights reserved.
//
// This file is part of the Andastra project,
// which can be found here: https://github.com/andastra-project/andastra.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/andastra-project/andastra/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! Module containing tests for decoding/encoding `Ssf` files.

use std::io::Cursor;

use crate::files::*;

use super::{Ssf, SsfSound};

#[test]
fn test_encode_ssf_byte_identical_round_trip() {
    let mut ssf = Ssf::new();
    ssf.set_sound(SsfSound::Battlecry1, 1000);
    ssf.set_sound(SsfSound::Poisoned, 2000);

    let mut before = vec![];
    ssf.encode(&mut before, &None).unwrap();
    assert_eq!(before.len(), 12 + 40 * 4);

    let mut decoded = Ssf::decode(&mut Cursor::new(&before), &None).unwrap();
    assert_eq!(ssf, decoded);
    assert_eq!(decoded.sound(SsfSound::Battlecry1), 1000);
    assert_eq!(decoded.sound(SsfSound::Select1), -1);

    let mut after = vec![];
    decoded.encode(&mut after, &None).unwrap();
    assert_eq!(before, after);
}

#[test]
fn test_ssf_slot_labels_round_trip() {
    for slot in SsfSound::ALL {
        assert_eq!(SsfSound::from_label(slot.label()).unwrap(), slot);
    }

    assert_eq!(SsfSound::from_label("battlecry 1").unwrap(), SsfSound::Battlecry1);
    assert!(SsfSound::from_label("Yodeling").is_err());
}

#[test]
fn test_ssf_bad_signature() {
    let data = b"NOPE1.1\0\0\0\0\0".to_vec();
    assert!(Ssf::decode(&mut Cursor::new(&data), &None).is_err());
}
