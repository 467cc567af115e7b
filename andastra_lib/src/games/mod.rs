//---------------------------------------------------------------------------//
// Copyright (c) 2024-2026 The Andastra project contributors. All rights reserved.
//
// This file is part of the Andastra project,
// which can be found here: https://github.com/andastra-project/andastra.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/andastra-project/andastra/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! Module that defines the games this lib supports.
//!
//! This module defines the list of games this lib support for any `Game-Specific`
//! feature. You should have no business here, except for supporting a new game.

use getset::Getters;

use std::path::Path;

pub mod supported_games;

//---------------------------------------------------------------------------//
//                              Enum & Structs
//---------------------------------------------------------------------------//

/// The BioWare engine family a game runs on.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum EngineFamily {

    /// KotOR 1 and 2, plus their platform variants.
    Odyssey,

    /// Neverwinter Nights 1 and 2.
    Aurora,

    /// Dragon Age and Mass Effect.
    Eclipse,

    /// Baldur's Gate, Icewind Dale, Planescape: Torment.
    Infinity,
}

/// The games this lib knows about.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum BioWareGame {
    KotOR1,
    KotOR2,
    NeverwinterNights,
    DragonAgeOrigins,
    DragonAge2,
    MassEffect,
    BaldursGate,
    BaldursGate2,
    IcewindDale,
    PlanescapeTorment,
}

impl BioWareGame {

    /// This function returns the engine family of this game.
    pub fn family(&self) -> EngineFamily {
        match self {
            Self::KotOR1 | Self::KotOR2 => EngineFamily::Odyssey,
            Self::NeverwinterNights => EngineFamily::Aurora,
            Self::DragonAgeOrigins | Self::DragonAge2 | Self::MassEffect => EngineFamily::Eclipse,
            Self::BaldursGate | Self::BaldursGate2 | Self::IcewindDale | Self::PlanescapeTorment => EngineFamily::Infinity,
        }
    }
}

/// This struct holds all the info needed for a game to be "supported" by this lib's features.
#[derive(Clone, Debug, Getters)]
#[getset(get = "pub")]
pub struct GameInfo {

    /// The game this info is for.
    game: BioWareGame,

    /// The machine-friendly key of the game (`kotor_1`, `kotor_2`,...).
    key: &'static str,

    /// This is the name it'll show up for the user. The *pretty name*.
    display_name: &'static str,

    /// Executable names whose presence in an installation root identifies the game.
    executables: &'static [&'static str],

    /// Amount of talk-table entries the unmodified game ships with, if we track it.
    ///
    /// Uninstalls truncate `dialog.tlk` back to this.
    tlk_baseline: Option<usize>,
}

impl GameInfo {

    /// This function returns if the provided installation root belongs to this game.
    pub fn detect_at(&self, root: &Path) -> bool {
        self.executables.iter().any(|executable| {
            crate::utils::find_file_case_insensitive(root, executable).is_some()
        })
    }
}
