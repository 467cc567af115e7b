//---------------------------------------------------------------------------//
// Copyright (c) 2024-2026 The Andastra project contributors. All rights reserved.
//
// This file is part of the Andastra project,
// which can be found here: https://github.com/andastra-project/andastra.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/andastra-project/andastra/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! This is the CLI version of Andastra: install, uninstall and inspect mods
//! from the command line.
//!
//! Exit codes: 0 when a command ends without errors, 1 when a run logged
//! errors, 2 on malformed inputs (bad arguments, unreadable configs).

use anyhow::Result;
use clap::{Parser, Subcommand};
use log::error;
use simplelog::{ColorChoice, LevelFilter, TermLogger, TerminalMode};

use std::path::PathBuf;
use std::process::exit;

use crate::config::Config;

mod commands;
mod config;

/// Exit code of a run that logged errors.
const EXIT_WITH_ERRORS: i32 = 1;

/// Exit code of a run aborted by malformed inputs.
const EXIT_MALFORMED_INPUT: i32 = 2;

//---------------------------------------------------------------------------//
//                          Command-line definition
//---------------------------------------------------------------------------//

/// CLI version of Andastra. Ready to automate the most boring parts of your modding.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {

    /// Sets the level of verbosity.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {

    /// Applies a patch folder (a changes.ini plus his files) to an installation.
    Patch {

        /// Root folder of the game installation.
        install_root: PathBuf,

        /// Folder with the patch configuration and his source files.
        patch_dir: PathBuf,

        /// Path of an external script compiler, for NSS patches.
        #[arg(long)]
        compiler: Option<PathBuf>,
    },

    /// Returns an installation to his vanilla state.
    Uninstall {

        /// Root folder of the game installation.
        install_root: PathBuf,
    },

    /// Extracts a resource out of an installation.
    Extract {

        /// Root folder of the game installation.
        install_root: PathBuf,

        /// Name of the resource, without extension.
        resref: String,

        /// Type of the resource, as an extension (utm, 2da,...).
        restype: String,

        /// File the resource gets written to.
        output: PathBuf,
    },
}

//---------------------------------------------------------------------------//
//                                  Main
//---------------------------------------------------------------------------//

fn main() {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    let _ = TermLogger::init(level, simplelog::Config::default(), TerminalMode::Mixed, ColorChoice::Auto);

    let config = Config::new(cli.verbose);
    let result: Result<i32> = match cli.command {
        Commands::Patch { install_root, patch_dir, compiler } => commands::patch::apply(&config, &install_root, &patch_dir, compiler.as_deref()),
        Commands::Uninstall { install_root } => commands::uninstall::run(&config, &install_root),
        Commands::Extract { install_root, resref, restype, output } => commands::extract::run(&config, &install_root, &resref, &restype, &output),
    };

    match result {
        Ok(code) => exit(code),
        Err(error) => {
            error!("{error}");
            exit(EXIT_MALFORMED_INPUT);
        }
    }
}
