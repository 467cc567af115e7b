//---------------------------------------------------------------------------//
// Copyright (c) 2024-2026 The Andastra project contributors. All rights reserved.
//
// This file is part of the Andastra project,
// which can be found here: https://github.com/andastra-project/andastra.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/andastra-project/andastra/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! Module containing tests for the patch engine.

use tempfile::TempDir;

use std::fs;
use std::io::Cursor;

use crate::files::*;
use crate::files::tlk::{Tlk, TlkEntry};
use crate::files::twoda::TwoDA;
use crate::installation::Installation;

use super::*;
use super::twoda_ops::{RowSelector, StoreSource, TwoDAOp};
use super::tlk_ops::TlkOp;

/// This function stands up a fake installation plus a patch folder carrying
/// a small table.
fn fake_setup() -> (TempDir, TempDir) {
    let install = TempDir::new().unwrap();
    fs::write(install.path().join("swkotor.exe"), b"exe").unwrap();
    fs::create_dir_all(install.path().join("override")).unwrap();
    fs::create_dir_all(install.path().join("modules")).unwrap();

    let patch = TempDir::new().unwrap();
    let mut table = TwoDA::new(&["cost", "strref"]);
    let row = table.add_row("baremetal");
    table.set_cell(row, "cost", "50").unwrap();
    let row = table.add_row("plastic");
    table.set_cell(row, "cost", "42").unwrap();

    let mut encoded = vec![];
    table.encode(&mut encoded, &None).unwrap();
    fs::write(patch.path().join("sample.2da"), &encoded).unwrap();

    (install, patch)
}

/// This function reads a 2DA back out of the override folder.
fn override_table(install: &TempDir, name: &str) -> TwoDA {
    let bytes = fs::read(install.path().join("override").join(name)).unwrap();
    TwoDA::decode(&mut Cursor::new(&bytes), &None).unwrap()
}

#[test]
fn test_append_tlk_then_reference_from_2da() {
    let (install, patch) = fake_setup();
    let installation = Installation::open(install.path()).unwrap();
    let engine = PatchEngine::new(&installation, patch.path(), &NoCompiler);

    // Append "Hello" to an empty table capturing StrRef5, then write the
    // captured value into a cell.
    let change_set = ChangeSet {
        patches: vec![
            FilePatch {
                file_name: "dialog.tlk".to_owned(),
                source_file: None,
                destination: Destination::Override,
                replace: true,
                skip_if_not_replace: false,
                action: PatchAction::ModifyTlk(vec![TlkOp::Append {
                    text: "Hello".to_owned(),
                    sound: String::new(),
                    stores: vec![5],
                }]),
            },
            FilePatch {
                file_name: "sample.2da".to_owned(),
                source_file: None,
                destination: Destination::Override,
                replace: false,
                skip_if_not_replace: false,
                action: PatchAction::ModifyTwoDA(vec![TwoDAOp::ChangeRow {
                    selector: RowSelector::Label("baremetal".to_owned()),
                    values: vec![("strref".to_owned(), "#StrRef5#".to_owned())],
                    stores: vec![],
                }]),
            },
        ],
    };

    let log = engine.run(&change_set, &CancellationToken::new());
    assert!(log.is_success(), "log: {:?}", log.entries());

    // The first appended entry of an empty table gets StrRef 0.
    let tlk_bytes = fs::read(install.path().join("dialog.tlk")).unwrap();
    let tlk = Tlk::decode(&mut Cursor::new(&tlk_bytes), &None).unwrap();
    assert_eq!(tlk.len(), 1);
    assert_eq!(tlk.entry(0).unwrap().text(), "Hello");

    let table = override_table(&install, "sample.2da");
    assert_eq!(table.cell(0, "strref"), Some("0"));
}

#[test]
fn test_change_row_is_idempotent() {
    let (install, patch) = fake_setup();
    let installation = Installation::open(install.path()).unwrap();
    let engine = PatchEngine::new(&installation, patch.path(), &NoCompiler);

    let change_set = ChangeSet {
        patches: vec![FilePatch {
            file_name: "sample.2da".to_owned(),
            source_file: None,
            destination: Destination::Override,
            replace: false,
            skip_if_not_replace: false,
            action: PatchAction::ModifyTwoDA(vec![TwoDAOp::ChangeRow {
                selector: RowSelector::Label("baremetal".to_owned()),
                values: vec![("cost".to_owned(), "100".to_owned())],
                stores: vec![],
            }]),
        }],
    };

    let log = engine.run(&change_set, &CancellationToken::new());
    assert!(log.is_success());
    assert_eq!(override_table(&install, "sample.2da").cell(0, "cost"), Some("100"));

    // A second run reads the already-patched override file and lands in the
    // same place.
    let installation = Installation::open(install.path()).unwrap();
    let engine = PatchEngine::new(&installation, patch.path(), &NoCompiler);
    let log = engine.run(&change_set, &CancellationToken::new());
    assert!(log.is_success());

    let table = override_table(&install, "sample.2da");
    assert_eq!(table.cell(0, "cost"), Some("100"));
    assert_eq!(table.rows().len(), 2);
}

#[test]
fn test_undefined_memory_token_fails_the_file_but_not_the_run() {
    let (install, patch) = fake_setup();
    let installation = Installation::open(install.path()).unwrap();
    let engine = PatchEngine::new(&installation, patch.path(), &NoCompiler);

    let change_set = ChangeSet {
        patches: vec![
            FilePatch {
                file_name: "sample.2da".to_owned(),
                source_file: None,
                destination: Destination::Override,
                replace: false,
                skip_if_not_replace: false,
                action: PatchAction::ModifyTwoDA(vec![TwoDAOp::ChangeRow {
                    selector: RowSelector::Label("baremetal".to_owned()),
                    values: vec![("cost".to_owned(), "#2DAMEMORY9#".to_owned())],
                    stores: vec![],
                }]),
            },
            FilePatch {
                file_name: "dialog.tlk".to_owned(),
                source_file: None,
                destination: Destination::Override,
                replace: true,
                skip_if_not_replace: false,
                action: PatchAction::ModifyTlk(vec![TlkOp::Append {
                    text: "still here".to_owned(),
                    sound: String::new(),
                    stores: vec![],
                }]),
            },
        ],
    };

    let log = engine.run(&change_set, &CancellationToken::new());
    assert_eq!(log.error_count(), 1);

    // The failed file is abandoned, the next one still processes.
    assert!(!install.path().join("override").join("sample.2da").exists());
    assert!(install.path().join("dialog.tlk").exists());
}

#[test]
fn test_store_and_reference_2da_memory_in_script() {
    let (install, patch) = fake_setup();
    fs::write(patch.path().join("k_test.nss"), b"void main(){ int x = #2DAMEMORY3#; }").unwrap();

    let installation = Installation::open(install.path()).unwrap();
    let engine = PatchEngine::new(&installation, patch.path(), &NoCompiler);

    let change_set = ChangeSet {
        patches: vec![
            // Stores "42" (the cost cell of row "plastic") into 2DAMEMORY3.
            FilePatch {
                file_name: "sample.2da".to_owned(),
                source_file: None,
                destination: Destination::Override,
                replace: false,
                skip_if_not_replace: false,
                action: PatchAction::ModifyTwoDA(vec![TwoDAOp::ChangeRow {
                    selector: RowSelector::Index(1),
                    values: vec![],
                    stores: vec![(3, StoreSource::Column("cost".to_owned()))],
                }]),
            },
            FilePatch {
                file_name: "k_test.nss".to_owned(),
                source_file: None,
                destination: Destination::Override,
                replace: false,
                skip_if_not_replace: false,
                action: PatchAction::CompileScript,
            },
        ],
    };

    let log = engine.run(&change_set, &CancellationToken::new());

    // The compiler is missing, so the run warns and installs the substituted
    // source; that's not an error.
    assert!(log.is_success(), "log: {:?}", log.entries());
    assert_eq!(log.warning_count(), 1);

    let source = fs::read_to_string(install.path().join("override").join("k_test.nss")).unwrap();
    assert_eq!(source, "void main(){ int x = 42; }");
}

#[test]
fn test_skip_if_not_replace() {
    let (install, patch) = fake_setup();
    fs::write(install.path().join("override").join("sample.2da"), b"pre-existing").unwrap();

    let installation = Installation::open(install.path()).unwrap();
    let engine = PatchEngine::new(&installation, patch.path(), &NoCompiler);

    let change_set = ChangeSet {
        patches: vec![FilePatch {
            file_name: "sample.2da".to_owned(),
            source_file: None,
            destination: Destination::Override,
            replace: false,
            skip_if_not_replace: true,
            action: PatchAction::ModifyTwoDA(vec![]),
        }],
    };

    let log = engine.run(&change_set, &CancellationToken::new());
    assert!(log.is_success());

    // The destination wasn't touched.
    assert_eq!(fs::read(install.path().join("override").join("sample.2da")).unwrap(), b"pre-existing");
}

#[test]
fn test_cancellation_stops_between_files() {
    let (install, patch) = fake_setup();
    let installation = Installation::open(install.path()).unwrap();
    let engine = PatchEngine::new(&installation, patch.path(), &NoCompiler);

    let token = CancellationToken::new();
    token.cancel();

    let change_set = ChangeSet {
        patches: vec![FilePatch {
            file_name: "sample.2da".to_owned(),
            source_file: None,
            destination: Destination::Override,
            replace: false,
            skip_if_not_replace: false,
            action: PatchAction::ModifyTwoDA(vec![]),
        }],
    };

    let log = engine.run(&change_set, &token);
    assert!(!log.is_success());
    assert!(!install.path().join("override").join("sample.2da").exists());
}

#[test]
fn test_change_set_parses_from_ini() {
    let config = br#"
; A tiny changes.ini exercising every list.
[TLKList]
Append0=hello

[hello]
Text=Hello
StrRef5=

[2DAList]
Table0=sample.2da

[sample.2da]
ChangeRow0=cheap_metal

[cheap_metal]
RowLabel=baremetal
cost=100
Store2DAMemory3=RowIndex

[GFFList]
File0=merchant01.utm

[merchant01.utm]
Replace=1
ModifyField0=markup

[markup]
Path=MarkUp
Value=25

[CompileList]
File0=k_test.nss

[InstallList]
File0=custom.tga
"#;

    let change_set = ChangeSet::parse(config).unwrap();
    let patches = change_set.patches();
    assert_eq!(patches.len(), 5);

    // Talk table first, then tables, GFFs, scripts, installs.
    assert!(matches!(patches[0].action, PatchAction::ModifyTlk(_)));
    assert!(matches!(patches[1].action, PatchAction::ModifyTwoDA(_)));
    assert!(matches!(patches[2].action, PatchAction::ModifyGff(_)));
    assert!(matches!(patches[3].action, PatchAction::CompileScript));
    assert!(matches!(patches[4].action, PatchAction::InstallFile));

    let PatchAction::ModifyTlk(ops) = &patches[0].action else { unreachable!() };
    assert_eq!(ops, &[TlkOp::Append { text: "Hello".to_owned(), sound: String::new(), stores: vec![5] }]);

    let PatchAction::ModifyTwoDA(ops) = &patches[1].action else { unreachable!() };
    assert_eq!(ops, &[TwoDAOp::ChangeRow {
        selector: RowSelector::Label("baremetal".to_owned()),
        values: vec![("cost".to_owned(), "100".to_owned())],
        stores: vec![(3, StoreSource::RowIndex)],
    }]);

    assert!(patches[2].replace);
}

#[test]
fn test_ini_tolerates_cp1252() {
    // 0xE9 is "é" in WINDOWS-1252, and not valid UTF-8.
    let mut config = b"[TLKList]\nAppend0=hello\n\n[hello]\nText=R\xE9ponse\n".to_vec();
    config.push(b'\n');

    let change_set = ChangeSet::parse(&config).unwrap();
    let PatchAction::ModifyTlk(ops) = &change_set.patches()[0].action else { unreachable!() };
    assert_eq!(ops, &[TlkOp::Append { text: "Réponse".to_owned(), sound: String::new(), stores: vec![] }]);
}

#[test]
fn test_uninstall_preserves_aspyr_buttons_and_truncates_tlk() {
    let (install, _patch) = fake_setup();

    // An inflated talk table: the K1 baseline plus two appended strings.
    let mut tlk = Tlk::new(0);
    for index in 0..crate::files::tlk::BASELINE_K1 + 2 {
        tlk.append(TlkEntry::with_text(&format!("string {index}")));
    }
    let mut encoded = vec![];
    tlk.encode(&mut encoded, &None).unwrap();
    fs::write(install.path().join("dialog.tlk"), &encoded).unwrap();

    // Override contents: one mod file, one preserved controller texture.
    fs::write(install.path().join("override").join("modded.utm"), b"mod").unwrap();
    fs::write(install.path().join("override").join("cus_button_a.tga"), b"button").unwrap();
    fs::write(install.path().join("modules").join("custom.mod"), b"mod archive").unwrap();
    fs::write(install.path().join("modules").join("vanilla.rim"), b"rim archive").unwrap();

    let installation = Installation::open(install.path()).unwrap();
    let mut log = PatchLog::new();
    uninstall::uninstall(&installation, &mut log).unwrap();
    assert!(log.is_success(), "log: {:?}", log.entries());

    assert!(!install.path().join("override").join("modded.utm").exists());
    assert!(install.path().join("override").join("cus_button_a.tga").exists());
    assert!(!install.path().join("modules").join("custom.mod").exists());
    assert!(install.path().join("modules").join("vanilla.rim").exists());

    let tlk_bytes = fs::read(install.path().join("dialog.tlk")).unwrap();
    let tlk = Tlk::decode(&mut Cursor::new(&tlk_bytes), &None).unwrap();
    assert_eq!(tlk.len(), crate::files::tlk::BASELINE_K1);
}
