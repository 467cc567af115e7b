//---------------------------------------------------------------------------//
// Copyright (c) 2024-2026 The Andastra project contributors. All rights reserved.
//
// This file is part of the Andastra project,
// which can be found here: https://github.com/andastra-project/andastra.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/andastra-project/andastra/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! Module containing tests for decoding/encoding `TwoDA` files.

use std::io::Cursor;

use crate::files::*;

use super::TwoDA;

fn sample_table() -> TwoDA {
    let mut table = TwoDA::new(&["material", "cost", "sound"]);

    let row = table.add_row("baremetal");
    table.set_cell(row, "material", "metal").unwrap();
    table.set_cell(row, "cost", "50").unwrap();

    let row = table.add_row("plastic");
    table.set_cell(row, "material", "plastic").unwrap();
    table.set_cell(row, "cost", "50").unwrap();
    table.set_cell(row, "sound", "clack").unwrap();

    table
}

#[test]
fn test_encode_twoda_logical_round_trip() {
    let mut table = sample_table();

    let mut encoded = vec![];
    table.encode(&mut encoded, &None).unwrap();

    let decoded = TwoDA::decode(&mut Cursor::new(&encoded), &None).unwrap();
    assert_eq!(table, decoded);
}

#[test]
fn test_twoda_heap_dedupes_equal_cells() {
    let mut table = sample_table();

    let mut encoded = vec![];
    table.encode(&mut encoded, &None).unwrap();

    // Both rows share the "50" cost cell, so the heap may only contain it once.
    let heap_hits = encoded.windows(3).filter(|window| **window == b"50\0"[..]).count();
    assert_eq!(heap_hits, 1);
}

#[test]
fn test_twoda_empty_cells_use_the_4_stars_token() {
    let mut table = sample_table();

    let mut encoded = vec![];
    table.encode(&mut encoded, &None).unwrap();
    assert!(encoded.windows(5).any(|window| window == b"****\0"));

    // And they come back as empty strings.
    let decoded = TwoDA::decode(&mut Cursor::new(&encoded), &None).unwrap();
    assert_eq!(decoded.cell(0, "sound"), Some(""));
}

#[test]
fn test_twoda_case_insensitive_lookups() {
    let table = sample_table();
    assert_eq!(table.column_index("COST"), Some(1));
    assert_eq!(table.row_index_by_label("BareMetal"), Some(0));

    // Case is preserved on write though.
    assert_eq!(table.headers()[1], "cost");
    assert_eq!(table.rows()[0].label(), "baremetal");
}

#[test]
fn test_twoda_row_ops() {
    let mut table = sample_table();

    let copied = table.copy_row(0, "chrome").unwrap();
    assert_eq!(table.cell(copied, "material"), Some("metal"));

    table.add_column("weight", "10");
    assert_eq!(table.cell(0, "weight"), Some("10"));
    assert_eq!(table.cell(copied, "weight"), Some("10"));

    assert_eq!(table.row_indices_by_cell("cost", "50"), vec![0, 1, 2]);
}

#[test]
fn test_twoda_csv_round_trip() {
    let table = sample_table();

    let mut csv = vec![];
    table.csv_export(&mut csv).unwrap();

    let text = String::from_utf8(csv.to_vec()).unwrap();
    assert!(text.contains("****"));

    let imported = TwoDA::csv_import(Cursor::new(&csv)).unwrap();
    assert_eq!(table, imported);
}

#[test]
fn test_twoda_bad_signature() {
    let mut data = b"NOPE".to_vec();
    data.extend_from_slice(&[0; 16]);
    assert!(TwoDA::decode(&mut Cursor::new(&data), &None).is_err());
}
