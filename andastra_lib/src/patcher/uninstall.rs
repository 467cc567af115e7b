//---------------------------------------------------------------------------//
// Copyright (c) 2024-2026 The Andastra project contributors. All rights reserved.
//
// This file is part of the Andastra project,
// which can be found here: https://github.com/andastra-project/andastra.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/andastra-project/andastra/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! The uninstall routine: returns an installation to his vanilla state.
//!
//! Three things happen, each logged:
//! * `dialog.tlk` truncates back to the game's baseline entry count.
//! * `override/` empties, except the Aspyr controller-button files
//!   (`cus_button_a`, `cus_button_aps`, same for b/x/y) with
//!   `.tpc`/`.txi`/`.tga`/`.dds` extensions, which the patched console
//!   releases require.
//! * `modules/*.mod` archives are removed. `.rim` archives are vanilla data
//!   and stay.

use std::fs;
use std::io::Cursor;

use crate::error::Result;
use crate::files::{Decodeable, Encodeable};
use crate::files::tlk::Tlk;
use crate::installation::Installation;
use crate::utils::{atomic_write, files_from_subdir};

use super::log::PatchLog;

/// Base names the override cleanup always preserves.
const PRESERVED_BASE_NAMES: [&str; 8] = [
    "cus_button_a", "cus_button_aps",
    "cus_button_b", "cus_button_bps",
    "cus_button_x", "cus_button_xps",
    "cus_button_y", "cus_button_yps",
];

/// Extensions the preserved base names may carry.
const PRESERVED_EXTENSIONS: [&str; 4] = ["tpc", "txi", "tga", "dds"];

/// This function returns if an override file survives the cleanup.
fn is_preserved(base_name: &str, extension: &str) -> bool {
    PRESERVED_BASE_NAMES.iter().any(|known| known.eq_ignore_ascii_case(base_name))
        && PRESERVED_EXTENSIONS.iter().any(|known| known.eq_ignore_ascii_case(extension))
}

/// This function uninstalls every mod-made change it knows how to undo.
pub fn uninstall(installation: &Installation, log: &mut PatchLog) -> Result<()> {
    truncate_dialog_tlk(installation, log)?;
    clear_override(installation, log)?;
    remove_mod_archives(installation, log)?;

    Ok(())
}

/// This function truncates `dialog.tlk` back to the game's baseline.
fn truncate_dialog_tlk(installation: &Installation, log: &mut PatchLog) -> Result<()> {
    let Some(baseline) = installation.game().and_then(|game| *game.tlk_baseline()) else {
        log.note("no talk-table baseline known for this game, leaving dialog.tlk alone");
        return Ok(());
    };
    let Some(path) = installation.dialog_tlk() else {
        log.warning("no dialog.tlk found");
        return Ok(());
    };

    let mut tlk = Tlk::decode(&mut Cursor::new(fs::read(path)?), &None)?;
    if tlk.len() > baseline {
        let dropped = tlk.len() - baseline;
        tlk.truncate(baseline);

        let mut encoded = vec![];
        tlk.encode(&mut encoded, &None)?;
        atomic_write(path, &encoded)?;
        log.note(format!("dropped {dropped} appended talk-table entries"));
    } else {
        log.verbose("dialog.tlk already at baseline");
    }

    Ok(())
}

/// This function empties `override/`, minus the preserved files.
fn clear_override(installation: &Installation, log: &mut PatchLog) -> Result<()> {
    let override_path = installation.override_path();
    if !override_path.is_dir() {
        return Ok(());
    }

    let mut removed = 0usize;
    for path in files_from_subdir(&override_path, true)? {
        let base_name = path.file_stem().map(|stem| stem.to_string_lossy().to_string()).unwrap_or_default();
        let extension = path.extension().map(|extension| extension.to_string_lossy().to_string()).unwrap_or_default();

        if is_preserved(&base_name, &extension) {
            log.verbose(format!("preserving {}", path.display()));
            continue;
        }

        match fs::remove_file(&path) {
            Ok(()) => removed += 1,
            Err(error) => log.error(format!("couldn't remove {}: {error}", path.display())),
        }
    }

    log.note(format!("removed {removed} files from override"));
    Ok(())
}

/// This function removes every `.mod` archive under `modules/`.
fn remove_mod_archives(installation: &Installation, log: &mut PatchLog) -> Result<()> {
    for path in installation.module_paths() {
        let is_mod = path.extension()
            .map(|extension| extension.to_string_lossy().eq_ignore_ascii_case("mod"))
            .unwrap_or(false);
        if !is_mod {
            continue;
        }

        match fs::remove_file(path) {
            Ok(()) => log.note(format!("removed {}", path.display())),
            Err(error) => log.error(format!("couldn't remove {}: {error}", path.display())),
        }
    }

    Ok(())
}
