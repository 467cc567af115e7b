//---------------------------------------------------------------------------//
// Copyright (c) 2024-2026 The Andastra project contributors. All rights reserved.
//
// This file is part of the Andastra project,
// which can be found here: https://github.com/andastra-project/andastra.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/andastra-project/andastra/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! The installation resolver: one value aggregating everything a game install
//! contains, with a unified resource lookup.
//!
//! An [`Installation`] discovers `chitin.key` + his BIFs, the `override/`
//! tree, `modules/`, `lips/`, `texturepacks/`, `rims/` and `dialog.tlk`, and
//! answers lookups with a documented precedence:
//!
//! 1. `override/`, recursive, case-insensitive, loose files.
//! 2. The current module's `_s.rim`, `.mod`, `_dlg.erf` (then his base `.rim`).
//! 3. The chitin KEY/BIF directory.
//! 4. Texture packs, for image resources.
//! 5. The lips archives, for `.lip` resources.
//!
//! The resolver is built once and then immutable (apart of switching the
//! active module); archives stay on disk and reads go by `(offset, size)`.

use rayon::prelude::*;

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::error::{ALibError, Result};
use crate::files::{Archive, ArchiveEntry, Decodeable, LocationRef, ResRef, ResourceCategory, ResourceType};
use crate::files::erf::Erf;
use crate::files::keybif::{Bif, Key};
use crate::files::rim::Rim;
use crate::games::GameInfo;
use crate::games::supported_games::SupportedGames;
use crate::utils::{files_from_subdir, find_file_case_insensitive};

/// Name of the master directory file.
const CHITIN_KEY: &str = "chitin.key";

/// Name of the main talk table.
const DIALOG_TLK: &str = "dialog.tlk";

#[cfg(test)] mod installation_test;

//---------------------------------------------------------------------------//
//                              Enum & Structs
//---------------------------------------------------------------------------//

/// Where a located resource came from.
#[derive(Clone, Debug, PartialEq)]
pub enum ResourceSource {
    Override,
    Module(String),
    Chitin,
    TexturePack(String),
    Lips(String),
}

/// A located resource: his source, the file on disk holding the bytes, and
/// where inside that file they live.
#[derive(Clone, Debug, PartialEq)]
pub struct ResourceLocation {
    pub source: ResourceSource,
    pub path: PathBuf,
    pub location: LocationRef,
}

/// One archive of the active module, with his parsed directory.
enum ModulePart {
    Rim(PathBuf, Rim),
    Erf(PathBuf, Erf),
}

/// The active module: his name plus his archives, in lookup order.
struct ActiveModule {
    name: String,
    parts: Vec<ModulePart>,
}

/// This struct aggregates everything we know about a game installation.
pub struct Installation {

    /// Root folder of the installation.
    root: PathBuf,

    /// The detected game, if any.
    game: Option<GameInfo>,

    /// Directory of the base game data, with locations resolved through the BIFs.
    chitin_entries: Vec<ArchiveEntry>,

    /// Paths of the BIF files, parallel to the indices inside the chitin locations.
    bif_paths: Vec<PathBuf>,

    /// Loose files under `override/`, recursive.
    override_files: Vec<(ResRef, ResourceType, PathBuf)>,

    /// Module archives available under `modules/`.
    module_paths: Vec<PathBuf>,

    /// The currently active module, if one has been selected.
    active_module: Option<ActiveModule>,

    /// Texture pack archives, with their parsed directories.
    texturepacks: Vec<(PathBuf, Erf)>,

    /// Lips archives, with their parsed directories.
    lips: Vec<(PathBuf, Erf)>,

    /// Path of the main talk table, if present.
    dialog_tlk: Option<PathBuf>,
}

//---------------------------------------------------------------------------//
//                       Implementation of Installation
//---------------------------------------------------------------------------//

impl Installation {

    /// This function builds an Installation from the provided root folder,
    /// discovering and indexing everything it can find.
    pub fn open(root: &Path) -> Result<Self> {
        let supported_games = SupportedGames::new();
        let game = supported_games.detect(root).cloned();

        let mut installation = Self {
            root: root.to_path_buf(),
            game,
            chitin_entries: vec![],
            bif_paths: vec![],
            override_files: vec![],
            module_paths: vec![],
            active_module: None,
            texturepacks: vec![],
            lips: vec![],
            dialog_tlk: find_file_case_insensitive(root, DIALOG_TLK),
        };

        installation.load_chitin()?;
        installation.load_override()?;
        installation.scan_modules();
        installation.load_erf_folder("texturepacks", &mut |store, path, erf| store.texturepacks.push((path, erf)))?;
        installation.load_erf_folder("lips", &mut |store, path, erf| store.lips.push((path, erf)))?;

        Ok(installation)
    }

    /// This function returns the root folder of the installation.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// This function returns the detected game, if any.
    pub fn game(&self) -> Option<&GameInfo> {
        self.game.as_ref()
    }

    /// This function returns the path of the main talk table, if present.
    pub fn dialog_tlk(&self) -> Option<&Path> {
        self.dialog_tlk.as_deref()
    }

    /// This function returns the module archives discovered under `modules/`.
    pub fn module_paths(&self) -> &[PathBuf] {
        &self.module_paths
    }

    /// This function returns the folder loose overrides live in.
    pub fn override_path(&self) -> PathBuf {
        find_file_case_insensitive(&self.root, "override")
            .unwrap_or_else(|| self.root.join("override"))
    }

    //--------------------------------------------------------//
    // Discovery.
    //--------------------------------------------------------//

    /// This function loads `chitin.key` and resolves every entry against his BIFs.
    fn load_chitin(&mut self) -> Result<()> {
        let Some(key_path) = find_file_case_insensitive(&self.root, CHITIN_KEY) else {
            return Ok(())
        };

        let mut reader = BufReader::new(File::open(&key_path)?);
        let key = Key::decode(&mut reader, &None)?;

        // BIF paths are stored with Windows separators, relative to the root.
        self.bif_paths = key.bif_names().iter()
            .map(|name| self.resolve_stored_path(name))
            .collect();

        // Resolve each BIF's offset table once; entries without a loadable BIF
        // are dropped rather than poisoning the whole directory.
        let bifs = self.bif_paths.par_iter()
            .map(|path| {
                let mut reader = BufReader::new(File::open(path).ok()?);
                Bif::decode(&mut reader, &None).ok()
            })
            .collect::<Vec<_>>();

        for entry in key.entries() {
            let Some(Some(bif)) = bifs.get(*entry.bif_index()) else { continue };
            let Some(LocationRef::KeyBif { tile_offset, size, .. }) = bif.location(*entry.resource_index()) else { continue };

            self.chitin_entries.push(ArchiveEntry::new(
                entry.resref().clone(),
                *entry.restype(),
                LocationRef::KeyBif {
                    bif_index: *entry.bif_index(),
                    tile_offset: *tile_offset,
                    size: *size,
                },
            ));
        }

        Ok(())
    }

    /// This function indexes every loose file under `override/`, recursively.
    fn load_override(&mut self) -> Result<()> {
        let override_path = self.override_path();
        if !override_path.is_dir() {
            return Ok(())
        }

        for path in files_from_subdir(&override_path, true)? {
            let Some(stem) = path.file_stem().map(|stem| stem.to_string_lossy().to_string()) else { continue };
            let Some(extension) = path.extension().map(|extension| extension.to_string_lossy().to_string()) else { continue };

            let restype = ResourceType::from_extension(&extension);
            if restype == ResourceType::INVALID {
                continue;
            }

            let Ok(resref) = ResRef::new(&stem) else { continue };
            self.override_files.push((resref, restype, path));
        }

        Ok(())
    }

    /// This function lists the module archives under `modules/` and `rims/`,
    /// without parsing them.
    fn scan_modules(&mut self) {
        for folder in ["modules", "rims"] {
            let Some(folder_path) = find_file_case_insensitive(&self.root, folder) else { continue };
            let Ok(files) = files_from_subdir(&folder_path, false) else { continue };

            self.module_paths.extend(files.into_iter()
                .filter(|path| {
                    let extension = path.extension().map(|extension| extension.to_string_lossy().to_lowercase());
                    matches!(extension.as_deref(), Some("rim") | Some("mod") | Some("erf"))
                }));
        }
    }

    /// This function parses every ERF under the provided folder, in parallel.
    fn load_erf_folder(&mut self, folder: &str, store: &mut dyn FnMut(&mut Self, PathBuf, Erf)) -> Result<()> {
        let Some(folder_path) = find_file_case_insensitive(&self.root, folder) else { return Ok(()) };
        if !folder_path.is_dir() {
            return Ok(())
        }

        let parsed = files_from_subdir(&folder_path, false)?
            .into_par_iter()
            .filter_map(|path| {
                let mut reader = BufReader::new(File::open(&path).ok()?);
                let erf = Erf::decode(&mut reader, &None).ok()?;
                Some((path, erf))
            })
            .collect::<Vec<_>>();

        for (path, erf) in parsed {
            store(self, path, erf);
        }

        Ok(())
    }

    /// This function resolves a path stored inside a KEY (Windows separators,
    /// relative to the root) against the real filesystem, case-insensitively.
    fn resolve_stored_path(&self, stored: &str) -> PathBuf {
        let mut current = self.root.to_path_buf();
        for component in stored.split(['\\', '/']).filter(|component| !component.is_empty()) {
            current = find_file_case_insensitive(&current, component)
                .unwrap_or_else(|| current.join(component));
        }
        current
    }

    //--------------------------------------------------------//
    // Module selection.
    //--------------------------------------------------------//

    /// This function selects the active module by name, parsing his archives.
    ///
    /// The parts a module may have, in lookup order: `<name>_s.rim`,
    /// `<name>.mod`, `<name>_dlg.erf`, `<name>.rim`.
    pub fn set_active_module(&mut self, name: &str) -> Result<()> {
        let part_names = [
            format!("{name}_s.rim"),
            format!("{name}.mod"),
            format!("{name}_dlg.erf"),
            format!("{name}.rim"),
        ];

        let mut parts = vec![];
        for part_name in &part_names {
            let Some(path) = self.module_paths.iter().find(|path| crate::utils::file_name_matches(path, part_name)) else { continue };

            let mut reader = BufReader::new(File::open(path)?);
            if part_name.ends_with(".rim") {
                parts.push(ModulePart::Rim(path.to_path_buf(), Rim::decode(&mut reader, &None)?));
            } else {
                parts.push(ModulePart::Erf(path.to_path_buf(), Erf::decode(&mut reader, &None)?));
            }
        }

        if parts.is_empty() {
            return Err(ALibError::ModuleNotFound(name.to_owned()));
        }

        self.active_module = Some(ActiveModule {
            name: name.to_owned(),
            parts,
        });

        Ok(())
    }

    //--------------------------------------------------------//
    // Lookup.
    //--------------------------------------------------------//

    /// This function returns every location holding the provided resource, in
    /// precedence order.
    pub fn locate(&self, resref: &ResRef, restype: ResourceType) -> Vec<ResourceLocation> {
        let mut locations = vec![];

        // 1: override.
        for (known_resref, known_restype, path) in &self.override_files {
            if known_restype == &restype && known_resref == resref {
                locations.push(ResourceLocation {
                    source: ResourceSource::Override,
                    path: path.to_path_buf(),
                    location: LocationRef::Loose { path: path.to_path_buf() },
                });
            }
        }

        // 2: the active module.
        if let Some(module) = &self.active_module {
            for part in &module.parts {
                let (path, entry) = match part {
                    ModulePart::Rim(path, rim) => (path, rim.entry(resref, restype)),
                    ModulePart::Erf(path, erf) => (path, erf.entry(resref, restype)),
                };

                if let Some(entry) = entry {
                    locations.push(ResourceLocation {
                        source: ResourceSource::Module(module.name.to_owned()),
                        path: path.to_path_buf(),
                        location: entry.location().clone(),
                    });
                }
            }
        }

        // 3: the chitin directory.
        for entry in &self.chitin_entries {
            if entry.restype() == &restype && entry.resref() == resref {
                if let LocationRef::KeyBif { bif_index, .. } = entry.location() {
                    if let Some(path) = self.bif_paths.get(*bif_index) {
                        locations.push(ResourceLocation {
                            source: ResourceSource::Chitin,
                            path: path.to_path_buf(),
                            location: entry.location().clone(),
                        });
                    }
                }
            }
        }

        // 4: texture packs, for image resources only.
        if restype.category() == ResourceCategory::Image {
            for (path, erf) in &self.texturepacks {
                if let Some(entry) = erf.entry(resref, restype) {
                    locations.push(ResourceLocation {
                        source: ResourceSource::TexturePack(path.file_name().unwrap_or_default().to_string_lossy().to_string()),
                        path: path.to_path_buf(),
                        location: entry.location().clone(),
                    });
                }
            }
        }

        // 5: lips archives, for lip resources only.
        if restype == ResourceType::LIP {
            for (path, erf) in &self.lips {
                if let Some(entry) = erf.entry(resref, restype) {
                    locations.push(ResourceLocation {
                        source: ResourceSource::Lips(path.file_name().unwrap_or_default().to_string_lossy().to_string()),
                        path: path.to_path_buf(),
                        location: entry.location().clone(),
                    });
                }
            }
        }

        locations
    }

    /// This function returns the first location holding the provided resource.
    pub fn resolve(&self, resref: &ResRef, restype: ResourceType) -> Result<ResourceLocation> {
        self.locate(resref, restype)
            .into_iter()
            .next()
            .ok_or_else(|| ALibError::UnknownResource(resref.to_string(), restype.to_string()))
    }

    /// This function returns the bytes of the provided resource, from his
    /// highest-precedence location.
    pub fn resource(&self, resref: &ResRef, restype: ResourceType) -> Result<Vec<u8>> {
        let location = self.resolve(resref, restype)?;
        self.read_location(&location)
    }

    /// This function reads the bytes a location points at.
    pub fn read_location(&self, location: &ResourceLocation) -> Result<Vec<u8>> {
        match &location.location {
            LocationRef::Loose { path } => std::fs::read(path).map_err(From::from),
            LocationRef::Erf { offset, size, compressed } => {
                if *compressed {
                    return Err(ALibError::DataCannotBeDecompressed);
                }
                read_range(&location.path, *offset, *size)
            }
            LocationRef::Rim { offset, size } => read_range(&location.path, *offset, *size),
            LocationRef::KeyBif { tile_offset, size, .. } => read_range(&location.path, *tile_offset, *size),
        }
    }
}

/// This function reads an `(offset, size)` range out of a file.
fn read_range(path: &Path, offset: u64, size: u32) -> Result<Vec<u8>> {
    use crate::binary::ReadBytes;
    use std::io::{Seek, SeekFrom};

    let mut reader = BufReader::new(File::open(path)?);
    reader.seek(SeekFrom::Start(offset))?;
    reader.read_slice(size as usize, false)
}
