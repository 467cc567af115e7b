//---------------------------------------------------------------------------//
// Copyright (c) 2024-2026 The Andastra project contributors. All rights reserved.
//
// This file is part of the Andastra project,
// which can be found here: https://github.com/andastra-project/andastra.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/andastra-project/andastra/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! KEY/BIF is the two-file archive system the base game data ships in: a KEY
//! file acts as the directory, and each BIF is a dumb blob with an internal
//! offset table. The KEY knows every resource's name, type and which BIF holds
//! it; the BIF knows where the bytes are.
//!
//! # KEY Structure
//!
//! ## Header
//!
//! | Bytes | Type     | Data                               |
//! | ----- | -------- | ---------------------------------- |
//! | 4     | StringU8 | File signature. Always `KEY `.     |
//! | 4     | StringU8 | Version. Always `V1  `.            |
//! | 4     | [u32]    | Amount of BIF files.               |
//! | 4     | [u32]    | Amount of keys.                    |
//! | 4     | [u32]    | Offset to the file table.          |
//! | 4     | [u32]    | Offset to the key table.           |
//! | 4     | [u32]    | Build year, since 1900.            |
//! | 4     | [u32]    | Build day, 0-based day of the year.|
//! | 32    | Vec<u8>  | Reserved. Always 0.                |
//!
//! ## File table
//!
//! One 12-byte record per BIF: `(filesize: u32, filename_offset: u32,
//! filename_size: u16, drives: u16)`. Filenames are stored NUL-padded at the
//! pointed offsets, with Windows path separators.
//!
//! ## Key table
//!
//! One 22-byte record per resource: a 16-byte ResRef, his u16 type code, and
//! a u32 resource id packing `bif_index << 20 | resource_index`.
//!
//! # BIF Structure
//!
//! | Bytes | Type     | Data                                                  |
//! | ----- | -------- | ----------------------------------------------------- |
//! | 4     | StringU8 | File signature. Always `BIFF`.                        |
//! | 4     | StringU8 | Version. Always `V1  `.                               |
//! | 4     | [u32]    | Amount of variable resources.                         |
//! | 4     | [u32]    | Amount of fixed resources. Always 0 in practice.      |
//! | 4     | [u32]    | Offset to the variable resource table.                |
//!
//! The variable resource table holds one `(id: u32, offset: u32, size: u32,
//! type: u32)` record per resource.

use getset::Getters;

use std::io::{Seek, SeekFrom};

use crate::binary::ReadBytes;
use crate::error::{ALibError, Result};
use crate::files::{Archive, ArchiveEntry, Decodeable, DecodeableExtraData, LocationRef, ResRef, ResourceType};

/// Extension used by KEY files.
pub const KEY_EXTENSION: &str = ".key";

/// Extension used by BIF files.
pub const BIF_EXTENSION: &str = ".bif";

/// This represents the value that every KEY file has in their first 8 bytes.
const KEY_SIGNATURE: &str = "KEY ";
const KEY_VERSION: &str = "V1  ";

/// This represents the value that every BIF file has in their first 8 bytes.
const BIF_SIGNATURE: &str = "BIFF";
const BIF_VERSION: &str = "V1  ";

/// Size of the header of a KEY file.
const KEY_HEADER_SIZE: u64 = 64;

/// Size of a key table record.
const KEY_ENTRY_SIZE: u64 = 22;

/// Size of a file table record.
const FILE_ENTRY_SIZE: u64 = 12;

/// Size of a BIF variable resource record.
const BIF_ENTRY_SIZE: u64 = 16;

#[cfg(test)] mod keybif_test;

//---------------------------------------------------------------------------//
//                              Enum & Structs
//---------------------------------------------------------------------------//

/// This stores the directory of a KEY file in memory.
///
/// A KEY holds no resource data himself: reads resolve through the BIF the
/// key's resource id points at.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Key {

    /// The BIF files this KEY indexes, as stored paths (Windows separators).
    bif_names: Vec<String>,

    /// The directory: one entry per resource, with `KeyBif` locations.
    ///
    /// Offsets are not known at KEY level: they're resolved against the BIF's
    /// own table on read. The location carries the resource index instead.
    entries: Vec<KeyEntry>,
}

/// An entry of a KEY directory.
#[derive(Clone, Debug, PartialEq, Getters)]
#[getset(get = "pub")]
pub struct KeyEntry {
    resref: ResRef,
    restype: ResourceType,
    bif_index: usize,
    resource_index: usize,
}

/// This stores the offset table of a BIF blob in memory.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Bif {

    /// Directory of the blob, with resolved `(offset, size)` locations.
    entries: Vec<ArchiveEntry>,
}

//---------------------------------------------------------------------------//
//                        Implementation of Key/Bif
//---------------------------------------------------------------------------//

impl Key {

    /// This function returns the stored BIF paths of this KEY.
    pub fn bif_names(&self) -> &[String] {
        &self.bif_names
    }

    /// This function returns the directory of this KEY.
    pub fn entries(&self) -> &[KeyEntry] {
        &self.entries
    }

    /// This function returns the entry matching the provided identity, if the KEY indexes it.
    pub fn entry(&self, resref: &ResRef, restype: ResourceType) -> Option<&KeyEntry> {
        self.entries.iter().find(|entry| entry.restype == restype && &entry.resref == resref)
    }
}

impl Archive for Bif {
    fn entries(&self) -> &[ArchiveEntry] {
        &self.entries
    }
}

impl Bif {

    /// This function returns the location of the resource under the provided
    /// index of this BIF's table.
    pub fn location(&self, resource_index: usize) -> Option<&LocationRef> {
        self.entries.get(resource_index).map(|entry| entry.location())
    }

    /// This function reads the bytes of the resource under the provided index.
    pub fn read_resource<R: ReadBytes>(&self, data: &mut R, resource_index: usize) -> Result<Vec<u8>> {
        let entry = self.entries.get(resource_index)
            .ok_or(ALibError::DecodingFieldIndexOutOfRange(resource_index as u32, self.entries.len()))?;
        self.read_entry(data, entry)
    }
}

//---------------------------------------------------------------------------//
//                               Decode logic
//---------------------------------------------------------------------------//

impl Decodeable for Key {

    fn decode<R: ReadBytes>(data: &mut R, _extra_data: &Option<DecodeableExtraData>) -> Result<Self> {
        let data_len = data.len()?;
        if data_len < KEY_HEADER_SIZE {
            return Err(ALibError::DecodingTruncatedSection("header"));
        }

        let signature = data.read_string_u8(4)?;
        if signature != KEY_SIGNATURE {
            return Err(ALibError::DecodingBadSignature(KEY_SIGNATURE.to_owned(), signature));
        }

        let version = data.read_string_u8(4)?;
        if version != KEY_VERSION {
            return Err(ALibError::DecodingUnsupportedVersion("KEY".to_owned(), version));
        }

        let bif_count = data.read_u32()? as u64;
        let key_count = data.read_u32()? as u64;
        let offset_to_files = data.read_u32()? as u64;
        let offset_to_keys = data.read_u32()? as u64;
        let _build_year = data.read_u32()?;
        let _build_day = data.read_u32()?;

        if offset_to_files + bif_count * FILE_ENTRY_SIZE > data_len {
            return Err(ALibError::DecodingTruncatedSection("file table"));
        }
        if offset_to_keys + key_count * KEY_ENTRY_SIZE > data_len {
            return Err(ALibError::DecodingTruncatedSection("key table"));
        }

        data.seek(SeekFrom::Start(offset_to_files))?;
        let mut name_refs = Vec::with_capacity(bif_count as usize);
        for _ in 0..bif_count {
            let _filesize = data.read_u32()?;
            let filename_offset = data.read_u32()? as u64;
            let filename_size = data.read_u16()? as usize;
            let _drives = data.read_u16()?;
            name_refs.push((filename_offset, filename_size));
        }

        let mut bif_names = Vec::with_capacity(name_refs.len());
        for (offset, size) in name_refs {
            if offset + size as u64 > data_len {
                return Err(ALibError::DecodingTruncatedSection("file names"));
            }
            data.seek(SeekFrom::Start(offset))?;
            bif_names.push(data.read_string_u8_0padded(size)?);
        }

        data.seek(SeekFrom::Start(offset_to_keys))?;
        let mut entries = Vec::with_capacity(key_count as usize);
        for _ in 0..key_count {
            let resref = ResRef::read_fixed(data)?;
            let restype = ResourceType::from_code(data.read_u16()?);
            let resource_id = data.read_u32()?;

            entries.push(KeyEntry {
                resref,
                restype,
                bif_index: (resource_id >> 20) as usize,
                resource_index: (resource_id & 0xFFFFF) as usize,
            });
        }

        Ok(Self {
            bif_names,
            entries,
        })
    }
}

impl Decodeable for Bif {

    fn decode<R: ReadBytes>(data: &mut R, _extra_data: &Option<DecodeableExtraData>) -> Result<Self> {
        let data_len = data.len()?;

        let signature = data.read_string_u8(4)
            .map_err(|_| ALibError::DecodingTruncatedSection("header"))?;
        if signature != BIF_SIGNATURE {
            return Err(ALibError::DecodingBadSignature(BIF_SIGNATURE.to_owned(), signature));
        }

        let version = data.read_string_u8(4)?;
        if version != BIF_VERSION {
            return Err(ALibError::DecodingUnsupportedVersion("BIF".to_owned(), version));
        }

        let variable_count = data.read_u32()? as u64;
        let _fixed_count = data.read_u32()?;
        let offset_to_table = data.read_u32()? as u64;

        if offset_to_table + variable_count * BIF_ENTRY_SIZE > data_len {
            return Err(ALibError::DecodingTruncatedSection("variable resource table"));
        }

        data.seek(SeekFrom::Start(offset_to_table))?;
        let mut entries = Vec::with_capacity(variable_count as usize);
        for _ in 0..variable_count {
            let _id = data.read_u32()?;
            let offset = data.read_u32()? as u64;
            let size = data.read_u32()?;
            let restype = ResourceType::from_code(data.read_u32()? as u16);

            if offset + size as u64 > data_len {
                return Err(ALibError::DecodingTruncatedSection("resource data"));
            }

            // BIF tables carry no names: identity lives in the KEY.
            entries.push(ArchiveEntry::new(ResRef::default(), restype, LocationRef::KeyBif {
                bif_index: 0,
                tile_offset: offset,
                size,
            }));
        }

        Ok(Self {
            entries,
        })
    }
}
