//---------------------------------------------------------------------------//
// Copyright (c) 2024-2026 The Andastra project contributors. All rights reserved.
//
// This file is part of the Andastra project,
// which can be found here: https://github.com/andastra-project/andastra.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/andastra-project/andastra/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! This crate provides the functionality to read/write BioWare engine files
//! and to patch game installations built on them.
//!
//! What it covers, per module:
//! * [`binary`]: the byte-level readers/writers every codec is built on.
//! * [`files`]: the file codecs themselves (GFF, TLK, 2DA, ERF/MOD/SAV, RIM,
//!   KEY/BIF, SSF, LIP, LTR, LYT, WAV), plus ResRefs and resource types.
//! * [`games`]: the supported-game registry and engine families.
//! * [`installation`]: the resolver aggregating a whole install into one
//!   lookup with documented precedence.
//! * [`blueprints`]: typed `construct`/`dismantle` projections of the GFF
//!   blueprint files (merchants, creatures, dialogs,...).
//! * [`patcher`]: the declarative patch engine, with his INI-shaped change
//!   sets, memory tables and uninstall routine.
//!
//! Rendering, audio playback, script execution and save-game state are out of
//! scope: this is the resource layer other tools build those on.

pub mod binary;
pub mod blueprints;
pub mod error;
pub mod files;
pub mod games;
pub mod installation;
pub mod patcher;
pub mod utils;

#[cfg(test)] mod utils_test;
