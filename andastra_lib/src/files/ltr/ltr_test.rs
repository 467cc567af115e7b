//---------------------------------------------------------------------------//
// Copyright (c) 2024-2026 The Andastra project contributors. All rights reserved.
//
// This file is part of the Andastra project,
// which can be found here: https://github.com/andastra-project/andastra.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/andastra-project/andastra/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! Module containing tests for decoding/encoding `Ltr` files.

use rand::SeedableRng;
use rand::rngs::StdRng;

use std::io::Cursor;

use crate::files::*;

use super::{Ltr, LtrBlock};

/// This function builds a 26-letter table where every chain leads to "a" and
/// every name can end immediately: generation must yield all-a names.
fn all_a_table() -> Ltr {
    let n = 26;
    let mut only_a = vec![0.0; n];
    only_a[0] = 1.0;

    let block = LtrBlock {
        start: only_a.to_vec(),
        middle: only_a.to_vec(),
        end: only_a.to_vec(),
    };

    Ltr {
        letter_count: n as u8,
        singles: block.clone(),
        doubles: vec![block.clone(); n],
        triples: vec![vec![block.clone(); n]; n],
    }
}

#[test]
fn test_encode_ltr_byte_identical_round_trip() {
    let mut ltr = all_a_table();

    let mut before = vec![];
    ltr.encode(&mut before, &None).unwrap();

    // 8-byte header, letter count, then (1 + 26 + 26*26) blocks of 3*26 floats.
    assert_eq!(before.len(), 9 + (1 + 26 + 26 * 26) * 3 * 26 * 4);

    let mut decoded = Ltr::decode(&mut Cursor::new(&before), &None).unwrap();
    assert_eq!(ltr, decoded);

    let mut after = vec![];
    decoded.encode(&mut after, &None).unwrap();
    assert_eq!(before, after);
}

#[test]
fn test_ltr_generates_names_from_the_chains() {
    let ltr = all_a_table();
    let mut rng = StdRng::seed_from_u64(42);

    let name = ltr.generate(&mut rng).unwrap();
    assert!(name.starts_with('A'));
    assert!(name[1..].chars().all(|letter| letter == 'a'));
    assert!(name.len() >= 4);
}

#[test]
fn test_ltr_degenerate_table_yields_no_name() {
    let mut ltr = all_a_table();
    ltr.singles.start = vec![0.0; 26];

    let mut rng = StdRng::seed_from_u64(42);
    assert!(ltr.generate(&mut rng).is_none());
}

#[test]
fn test_ltr_rejects_unknown_letter_count() {
    let mut data: Vec<u8> = vec![];
    data.extend_from_slice(b"LTR V1.0");
    data.push(27);
    assert!(Ltr::decode(&mut Cursor::new(&data), &None).is_err());
}
