//---------------------------------------------------------------------------//
// Copyright (c) 2024-2026 The Andastra project contributors. All rights reserved.
//
// This file is part of the Andastra project,
// which can be found here: https://github.com/andastra-project/andastra.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/andastra-project/andastra/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! This module contains the Config logic of the CLI tool.

//---------------------------------------------------------------------------//
//                          Struct definition
//---------------------------------------------------------------------------//

/// This struct serves to hold the configuration used during the execution of the program.
pub struct Config {

    /// Verbosity level requested on the command line.
    pub verbosity_level: u8,
}

impl Config {

    /// This function creates the Config struct for this run.
    pub fn new(verbosity_level: u8) -> Self {
        Self {
            verbosity_level,
        }
    }
}
