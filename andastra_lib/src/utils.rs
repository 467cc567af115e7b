//---------------------------------------------------------------------------//
// Copyright (c) 2024-2026 The Andastra project contributors. All rights reserved.
//
// This file is part of the Andastra project,
// which can be found here: https://github.com/andastra-project/andastra.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/andastra-project/andastra/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! Module with generic functions used by the crate.
//!
//! If a function doesn't fit anywhere, it goes here.

use std::fs::{self, File, read_dir};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{ALibError, Result};

//--------------------------------------------------------//
// Generic utils.
//--------------------------------------------------------//

/// This function parses strings to booleans, properly.
pub fn parse_str_as_bool(string: &str) -> Result<bool> {
    let str_lower_case = string.to_lowercase();
    if str_lower_case == "true" || str_lower_case == "1" {
        Ok(true)
    }
    else if str_lower_case == "false" || str_lower_case == "0" {
        Ok(false)
    }
    else {
        Err(ALibError::ParseBoolError(string.to_owned()))
    }
}

/// This function checks if a String starts with another String in a case-insensitive way.
pub fn starts_with_case_insensitive(full_str: &str, partial_str: &str) -> bool {
    let partial_len = partial_str.len();
    if full_str.len() < partial_len || !full_str.is_char_boundary(partial_len) {
        return false;
    }

    caseless::canonical_caseless_match_str(&full_str[..partial_len], partial_str)
}

/// This function compares two file names in a case-insensitive way.
pub fn file_name_matches(path: &Path, name: &str) -> bool {
    path.file_name()
        .map(|file_name| caseless::canonical_caseless_match_str(&file_name.to_string_lossy(), name))
        .unwrap_or(false)
}

/// This function checks that a decode consumed the whole source.
///
/// If we are not at the last byte, it means we didn't parse the entire file,
/// which usually means the file is corrupt or our logic for it is wrong.
pub fn check_size_mismatch(read: usize, expected: usize) -> Result<()> {
    if read != expected {
        return Err(ALibError::DecodingMismatchSizeError(read, expected));
    }

    Ok(())
}

//--------------------------------------------------------//
// Path utils.
//--------------------------------------------------------//

/// This function retuns a `Vec<PathBuf>` containing all the files in the provided folder.
pub fn files_from_subdir(current_path: &Path, scan_subdirs: bool) -> Result<Vec<PathBuf>> {
    let mut file_list: Vec<PathBuf> = vec![];
    match read_dir(current_path) {
        Ok(files_in_current_path) => {
            for file in files_in_current_path {

                // Get his path and continue, or return an error if it can't be read.
                match file {
                    Ok(file) => {
                        let file_path = file.path();

                        // If it's a file, add it to the list.
                        if file_path.is_file() {
                            file_list.push(file_path);
                        }

                        // If it's a folder, add his files to the list.
                        else if file_path.is_dir() && scan_subdirs {
                            let mut subfolder_files_path = files_from_subdir(&file_path, scan_subdirs)?;
                            file_list.append(&mut subfolder_files_path);
                        }
                    }
                    Err(_) => return Err(ALibError::ReadFileFolderError(current_path.to_string_lossy().to_string())),
                }
            }
        }

        // In case of reading error, report it.
        Err(_) => return Err(ALibError::ReadFileFolderError(current_path.to_string_lossy().to_string())),
    }

    // Return the list of paths.
    Ok(file_list)
}

/// This function finds a file inside a folder by name, in a case-insensitive way.
pub fn find_file_case_insensitive(folder: &Path, name: &str) -> Option<PathBuf> {
    read_dir(folder).ok()?
        .flatten()
        .map(|entry| entry.path())
        .find(|path| file_name_matches(path, name))
}

/// This function writes a file atomically: the data goes to a temp file in the destination's
/// folder, gets synced, and replaces the destination with a rename.
///
/// A failed write leaves the destination unchanged.
pub fn atomic_write(destination: &Path, data: &[u8]) -> Result<()> {
    let parent = destination.parent()
        .ok_or_else(|| ALibError::WriteFailed(destination.to_string_lossy().to_string()))?;
    fs::create_dir_all(parent)?;

    let mut temp = tempfile::NamedTempFile::new_in(parent)
        .map_err(|_| ALibError::WriteFailed(destination.to_string_lossy().to_string()))?;
    temp.write_all(data)?;
    temp.as_file().sync_all()?;
    temp.persist(destination)
        .map_err(|_| ALibError::WriteFailed(destination.to_string_lossy().to_string()))?;

    Ok(())
}

/// This function returns the last modified time of the provided file, in seconds.
pub fn last_modified_time_from_file(file: &File) -> Result<u64> {
    let timestamp = file.metadata()?
        .modified()?
        .duration_since(std::time::UNIX_EPOCH)
        .map_err(|_| ALibError::ReadFileFolderError("invalid file timestamp".to_owned()))?;
    Ok(timestamp.as_secs())
}
