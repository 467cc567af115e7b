//---------------------------------------------------------------------------//
// Copyright (c) 2024-2026 The Andastra project contributors. All rights reserved.
//
// This file is part of the Andastra project,
// which can be found here: https://github.com/andastra-project/andastra.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/andastra-project/andastra/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! This module contains the `Uninstall` command's functions.

use anyhow::{Context, Result};
use log::{error, info, warn};

use std::path::Path;

use andastra_lib::installation::Installation;
use andastra_lib::patcher::{PatchLog, PatchLogLevel, uninstall::uninstall};

use crate::config::Config;

/// This function returns an installation to his vanilla state, returning the
/// process exit code.
pub fn run(config: &Config, install_root: &Path) -> Result<i32> {
    if config.verbosity_level > 0 {
        info!("Uninstalling mods from: {}", install_root.display());
    }

    let installation = Installation::open(install_root)
        .context("couldn't open the installation")?;

    let mut log = PatchLog::new();
    uninstall(&installation, &mut log)
        .context("uninstall failed")?;

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

    Ok(if log.is_success() { 0 } else { crate::EXIT_WITH_ERRORS })
}
