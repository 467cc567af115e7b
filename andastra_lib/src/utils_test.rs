//---------------------------------------------------------------------------//
// Copyright (c) 2024-2026 The Andastra project contributors. All rights reserved.
//
// This file is part of the Andastra project,
// which can be found here: https://github.com/andastra-project/andastra.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/andastra-project/andastra/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! Module containing tests for the crate utils.

use tempfile::TempDir;

use std::fs;

use crate::utils::*;

#[test]
fn test_parse_str_as_bool() {
    assert!(parse_str_as_bool("true").unwrap());
    assert!(parse_str_as_bool("1").unwrap());
    assert!(!parse_str_as_bool("FALSE").unwrap());
    assert!(!parse_str_as_bool("0").unwrap());
    assert!(parse_str_as_bool("maybe").is_err());
}

#[test]
fn test_find_file_case_insensitive() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("Chitin.KEY"), b"").unwrap();

    let found = find_file_case_insensitive(dir.path(), "chitin.key").unwrap();
    assert_eq!(found.file_name().unwrap(), "Chitin.KEY");
    assert!(find_file_case_insensitive(dir.path(), "missing.key").is_none());
}

#[test]
fn test_atomic_write_creates_parents_and_replaces() {
    let dir = TempDir::new().unwrap();
    let destination = dir.path().join("override").join("foo.utm");

    atomic_write(&destination, b"first").unwrap();
    assert_eq!(fs::read(&destination).unwrap(), b"first");

    atomic_write(&destination, b"second").unwrap();
    assert_eq!(fs::read(&destination).unwrap(), b"second");
}

#[test]
fn test_starts_with_case_insensitive() {
    assert!(starts_with_case_insensitive("Override/Foo.utm", "override"));
    assert!(!starts_with_case_insensitive("Modules", "override"));
}
