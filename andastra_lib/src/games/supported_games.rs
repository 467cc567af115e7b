//---------------------------------------------------------------------------//
// Copyright (c) 2024-2026 The Andastra project contributors. All rights reserved.
//
// This file is part of the Andastra project,
// which can be found here: https://github.com/andastra-project/andastra.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/andastra-project/andastra/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! Module with the full list of games supported by this lib, and the data
//! needed to detect and work with each of them.

use std::path::Path;

use crate::files::tlk::{BASELINE_K1, BASELINE_K2};

use super::{BioWareGame, GameInfo};

// Key for all the supported games.
pub const KEY_KOTOR_1: &str = "kotor_1";
pub const KEY_KOTOR_2: &str = "kotor_2";
pub const KEY_NWN: &str = "nwn";
pub const KEY_DA_ORIGINS: &str = "da_origins";
pub const KEY_DA_2: &str = "da_2";
pub const KEY_MASS_EFFECT: &str = "mass_effect";
pub const KEY_BG: &str = "bg";
pub const KEY_BG_2: &str = "bg_2";
pub const KEY_IWD: &str = "iwd";
pub const KEY_PST: &str = "pst";

//-------------------------------------------------------------------------------//
//                              Enums & Structs
//-------------------------------------------------------------------------------//

/// This struct represents the list of games supported by this lib.
pub struct SupportedGames {

    /// List of games supported, in detection-priority order.
    games: Vec<GameInfo>,
}

//-------------------------------------------------------------------------------//
//                             Implementations
//-------------------------------------------------------------------------------//

impl Default for SupportedGames {
    fn default() -> Self {
        Self::new()
    }
}

/// Implementation for `SupportedGames`.
impl SupportedGames {

    /// This function builds and generates the entire SupportedGames list. For initialization.
    pub fn new() -> Self {
        let games = vec![

            // KotOR 2 goes before KotOR 1: some installs carry both exes.
            GameInfo {
                game: BioWareGame::KotOR2,
                key: KEY_KOTOR_2,
                display_name: "Star Wars: Knights of the Old Republic II - The Sith Lords",
                executables: &["swkotor2.exe"],
                tlk_baseline: Some(BASELINE_K2),
            },
            GameInfo {
                game: BioWareGame::KotOR1,
                key: KEY_KOTOR_1,
                display_name: "Star Wars: Knights of the Old Republic",
                executables: &["swkotor.exe"],
                tlk_baseline: Some(BASELINE_K1),
            },
            GameInfo {
                game: BioWareGame::NeverwinterNights,
                key: KEY_NWN,
                display_name: "Neverwinter Nights",
                executables: &["nwmain.exe"],
                tlk_baseline: None,
            },
            GameInfo {
                game: BioWareGame::DragonAgeOrigins,
                key: KEY_DA_ORIGINS,
                display_name: "Dragon Age: Origins",
                executables: &["daorigins.exe"],
                tlk_baseline: None,
            },
            GameInfo {
                game: BioWareGame::DragonAge2,
                key: KEY_DA_2,
                display_name: "Dragon Age II",
                executables: &["DragonAge2.exe"],
                tlk_baseline: None,
            },
            GameInfo {
                game: BioWareGame::MassEffect,
                key: KEY_MASS_EFFECT,
                display_name: "Mass Effect",
                executables: &["MassEffect.exe", "MassEffect2.exe", "MassEffect3.exe"],
                tlk_baseline: None,
            },
            GameInfo {
                game: BioWareGame::BaldursGate,
                key: KEY_BG,
                display_name: "Baldur's Gate",
                executables: &["bgmain.exe", "baldur.exe"],
                tlk_baseline: None,
            },
            GameInfo {
                game: BioWareGame::BaldursGate2,
                key: KEY_BG_2,
                display_name: "Baldur's Gate II",
                executables: &["bgmain2.exe"],
                tlk_baseline: None,
            },
            GameInfo {
                game: BioWareGame::IcewindDale,
                key: KEY_IWD,
                display_name: "Icewind Dale",
                executables: &["idmain.exe"],
                tlk_baseline: None,
            },
            GameInfo {
                game: BioWareGame::PlanescapeTorment,
                key: KEY_PST,
                display_name: "Planescape: Torment",
                executables: &["torment.exe"],
                tlk_baseline: None,
            },
        ];

        Self {
            games,
        }
    }

    /// This function returns the info of every supported game, in detection order.
    pub fn games(&self) -> &[GameInfo] {
        &self.games
    }

    /// This function returns the info of the game under the provided key, if supported.
    pub fn game_by_key(&self, key: &str) -> Option<&GameInfo> {
        self.games.iter().find(|game| *game.key() == key)
    }

    /// This function detects which supported game lives at the provided installation root.
    pub fn detect(&self, root: &Path) -> Option<&GameInfo> {
        self.games.iter().find(|game| game.detect_at(root))
    }
}
