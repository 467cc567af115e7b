//---------------------------------------------------------------------------//
// Copyright (c) 2024-2026 The Andastra project contributors. All rights reserved.
//
// This file is part of the Andastra project,
// which can be found here: https://github.com/andastra-project/andastra.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/andastra-project/andastra/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! Module containing tests for the `Installation` resolver.

use tempfile::TempDir;

use std::fs;

use crate::files::*;
use crate::files::rim::Rim;
use crate::games::BioWareGame;

use super::*;

/// This function stands up a fake K1 install: an exe, an override with one
/// merchant, and a module RIM holding a different copy of the same merchant.
fn fake_installation() -> TempDir {
    let dir = TempDir::new().unwrap();
    let root = dir.path();

    fs::write(root.join("swkotor.exe"), b"not really an exe").unwrap();
    fs::create_dir_all(root.join("override")).unwrap();
    fs::write(root.join("override").join("foo.utm"), b"override bytes").unwrap();

    fs::create_dir_all(root.join("modules")).unwrap();
    let mut rim = Rim::new();
    rim.insert(ResRef::new("foo").unwrap(), ResourceType::UTM, b"module bytes".to_vec());
    rim.insert(ResRef::new("only_module").unwrap(), ResourceType::UTC, b"creature".to_vec());
    let mut encoded = vec![];
    rim.encode(&mut encoded, &None).unwrap();
    fs::write(root.join("modules").join("testm_s.rim"), &encoded).unwrap();

    dir
}

#[test]
fn test_detects_the_game_from_the_exe() {
    let dir = fake_installation();
    let installation = Installation::open(dir.path()).unwrap();
    assert_eq!(*installation.game().unwrap().game(), BioWareGame::KotOR1);
}

#[test]
fn test_override_beats_the_module() {
    let dir = fake_installation();
    let mut installation = Installation::open(dir.path()).unwrap();
    installation.set_active_module("testm").unwrap();

    let resref = ResRef::new("foo").unwrap();
    let bytes = installation.resource(&resref, ResourceType::UTM).unwrap();
    assert_eq!(bytes, b"override bytes");

    // And locate returns both hits, override first.
    let locations = installation.locate(&resref, ResourceType::UTM);
    assert_eq!(locations.len(), 2);
    assert_eq!(locations[0].source, ResourceSource::Override);
    assert!(matches!(locations[1].source, ResourceSource::Module(_)));
}

#[test]
fn test_module_only_resources_resolve_through_the_module() {
    let dir = fake_installation();
    let mut installation = Installation::open(dir.path()).unwrap();
    installation.set_active_module("testm").unwrap();

    let bytes = installation.resource(&ResRef::new("only_module").unwrap(), ResourceType::UTC).unwrap();
    assert_eq!(bytes, b"creature");
}

#[test]
fn test_module_resources_are_invisible_without_an_active_module() {
    let dir = fake_installation();
    let installation = Installation::open(dir.path()).unwrap();
    assert!(installation.resource(&ResRef::new("only_module").unwrap(), ResourceType::UTC).is_err());
}

#[test]
fn test_unknown_module_is_an_error() {
    let dir = fake_installation();
    let mut installation = Installation::open(dir.path()).unwrap();
    assert!(installation.set_active_module("nope").is_err());
}

#[test]
fn test_resolver_is_deterministic() {
    let dir = fake_installation();
    let mut installation = Installation::open(dir.path()).unwrap();
    installation.set_active_module("testm").unwrap();

    let resref = ResRef::new("foo").unwrap();
    let first = installation.resolve(&resref, ResourceType::UTM).unwrap();
    let second = installation.resolve(&resref, ResourceType::UTM).unwrap();
    assert_eq!(first, second);
}
