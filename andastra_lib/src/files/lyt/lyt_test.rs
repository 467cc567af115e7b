//---------------------------------------------------------------------------//
// Copyright (c) 2024-2026 The Andastra project contributors. All rights reserved.
//
// This file is part of the Andastra project,
// which can be found here: https://github.com/andastra-project/andastra.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/andastra-project/andastra/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! Module containing tests for decoding/encoding `Lyt` files.

use std::io::Cursor;

use crate::files::*;

use super::Lyt;

#[test]
fn test_decode_lyt() {
    let text = "\
beginlayout
   roomcount 2
      m01aa_01a 0.0 0.0 0.0
      m01aa_01b 10.5 0.0 -2.0
   trackcount 0
   obstaclecount 0
   doorhookcount 1
      m01aa_01a door_01 0 1.0 2.0 3.0 1.0 0.0 0.0 0.0
donelayout
";

    let lyt = Lyt::decode(&mut Cursor::new(text.as_bytes()), &None).unwrap();
    assert_eq!(lyt.rooms.len(), 2);
    assert_eq!(lyt.rooms[1].model, "m01aa_01b");
    assert_eq!(lyt.rooms[1].position, [10.5, 0.0, -2.0]);
    assert_eq!(lyt.doorhooks.len(), 1);
    assert_eq!(lyt.doorhooks[0].door, "door_01");
}

#[test]
fn test_decode_lyt_keywords_are_case_insensitive() {
    let text = "BeginLayout\n   RoomCount 1\n      m01 0 0 0\nDoneLayout\n";
    let lyt = Lyt::decode(&mut Cursor::new(text.as_bytes()), &None).unwrap();
    assert_eq!(lyt.rooms.len(), 1);
}

#[test]
fn test_decode_lyt_long_doorhook_lines() {
    // 15-token door hooks carry 5 extra floats, which get dropped.
    let text = "\
beginlayout
   doorhookcount 1
      m01 door_01 0 1.0 2.0 3.0 1.0 0.0 0.0 0.0 9.0 9.0 9.0 9.0 9.0
donelayout
";
    let lyt = Lyt::decode(&mut Cursor::new(text.as_bytes()), &None).unwrap();
    assert_eq!(lyt.doorhooks[0].position, [1.0, 2.0, 3.0]);
    assert_eq!(lyt.doorhooks[0].orientation, [1.0, 0.0, 0.0, 0.0]);
}

#[test]
fn test_lyt_round_trip_writes_short_form() {
    let text = "\
beginlayout
   doorhookcount 1
      m01 door_01 0 1 2 3 1 0 0 0 9 9 9 9 9
donelayout
";
    let mut lyt = Lyt::decode(&mut Cursor::new(text.as_bytes()), &None).unwrap();

    let mut encoded = vec![];
    lyt.encode(&mut encoded, &None).unwrap();
    let written = String::from_utf8(encoded.to_vec()).unwrap();
    assert!(!written.contains('9'));

    let reparsed = Lyt::decode(&mut Cursor::new(&encoded), &None).unwrap();
    assert_eq!(lyt, reparsed);
}

#[test]
fn test_decode_lyt_wrong_token_count() {
    let text = "beginlayout\n   roomcount 1\n      m01 0 0\ndonelayout\n";
    assert!(Lyt::decode(&mut Cursor::new(text.as_bytes()), &None).is_err());
}

#[test]
fn test_decode_lyt_not_a_layout() {
    let text = "this is not a layout";
    assert!(Lyt::decode(&mut Cursor::new(text.as_bytes()), &None).is_err());
}
