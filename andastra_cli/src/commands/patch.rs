//---------------------------------------------------------------------------//
// Copyright (c) 2024-2026 The Andastra project contributors. All rights reserved.
//
// This file is part of the Andastra project,
// which can be found here: https://github.com/andastra-project/andastra.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/andastra-project/andastra/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! This module contains the `Patch` command's functions.

use anyhow::{Context, Result, anyhow};
use log::{error, info, warn};

use std::fs;
use std::path::Path;

use andastra_lib::installation::Installation;
use andastra_lib::patcher::{CancellationToken, ChangeSet, ExternalCompiler, NoCompiler, PatchEngine, PatchLogLevel, ScriptCompiler};
use andastra_lib::utils::find_file_case_insensitive;

use crate::config::Config;

/// Name of the change-set file inside a patch folder.
const CHANGES_FILE: &str = "changes.ini";

/// This function applies a patch folder to an installation, returning the
/// process exit code.
pub fn apply(config: &Config, install_root: &Path, patch_dir: &Path, compiler_path: Option<&Path>) -> Result<i32> {
    if config.verbosity_level > 0 {
        info!("Patching installation: {}", install_root.display());
    }

    let changes_path = find_file_case_insensitive(patch_dir, CHANGES_FILE)
        .ok_or_else(|| anyhow!("no {CHANGES_FILE} found in {}", patch_dir.display()))?;
    let change_set = ChangeSet::parse(&fs::read(&changes_path)?)
        .context("the patch configuration is malformed")?;

    let installation = Installation::open(install_root)
        .context("couldn't open the installation")?;
    if installation.game().is_none() {
        warn!("No supported game detected at {}", install_root.display());
    }

    let external;
    let compiler: &dyn ScriptCompiler = match compiler_path {
        Some(path) => {
            external = ExternalCompiler::new(path);
            &external
        }
        None => &NoCompiler,
    };

    let engine = PatchEngine::new(&installation, patch_dir, compiler);
    let log = engine.run(&change_set, &CancellationToken::new());

    for entry in log.entries() {
        match entry.level {
            PatchLogLevel::Verbose => {
                if config.verbosity_level > 0 {
                    info!("{}", entry.message);
                }
            }
            PatchLogLevel::Note => info!("{}", entry.message),
            PatchLogLevel::Warning => warn!("{}", entry.message),
            PatchLogLevel::Error => error!("{}", entry.message),
        }
    }

    info!("Patch run finished: {} warnings, {} errors.", log.warning_count(), log.error_count());
    Ok(if log.is_success() { 0 } else { crate::EXIT_WITH_ERRORS })
}
