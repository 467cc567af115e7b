//---------------------------------------------------------------------------//
// Copyright (c) 2024-2026 The Andastra project contributors. All rights reserved.
//
// This file is part of the Andastra project,
// which can be found here: https://github.com/andastra-project/andastra.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/andastra-project/andastra/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! This module contains the `Extract` command's functions.

use anyhow::{Context, Result, anyhow};
use log::info;

use std::fs;
use std::path::Path;

use andastra_lib::files::{ResRef, ResourceType};
use andastra_lib::installation::Installation;

use crate::config::Config;

/// This function extracts one resource out of an installation, returning the
/// process exit code.
pub fn run(config: &Config, install_root: &Path, resref: &str, restype: &str, output: &Path) -> Result<i32> {
    let resref = ResRef::new(resref)
        .map_err(|_| anyhow!("\"{resref}\" is not a valid resource name"))?;
    let restype = ResourceType::from_extension(restype);
    if restype == ResourceType::INVALID {
        return Err(anyhow!("unknown resource type extension"));
    }

    let installation = Installation::open(install_root)
        .context("couldn't open the installation")?;

    let bytes = installation.resource(&resref, restype)
        .with_context(|| format!("couldn't find {resref}.{restype} in the installation"))?;
    fs::write(output, &bytes)?;

    if config.verbosity_level > 0 {
        info!("Extracted {resref}.{restype} ({} bytes) to {}", bytes.len(), output.display());
    }

    Ok(0)
}
