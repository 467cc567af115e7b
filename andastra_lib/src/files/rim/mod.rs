//---------------------------------------------------------------------------//
// Copyright (c) 2024-2026 The Andastra project contributors. All rights reserved.
//
// This file is part of the Andastra project,
// which can be found here: https://github.com/andastra-project/andastra.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/andastra-project/andastra/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! RIMs are the read-only module archives of the Odyssey engine: a simplified
//! ERF without localized descriptions or build metadata.
//!
//! # RIM Structure
//!
//! ## Header
//!
//! | Bytes | Type     | Data                           |
//! | ----- | -------- | ------------------------------ |
//! | 4     | StringU8 | File signature. Always `RIM `. |
//! | 4     | StringU8 | Version. Always `V1.0`.        |
//! | 4     | [u32]    | Reserved. Always 0.            |
//! | 4     | [u32]    | Amount of resources.           |
//! | 4     | [u32]    | Offset to the entry table.     |
//!
//! ## Entry table
//!
//! One 32-byte record per resource:
//!
//! | Bytes | Type   | Data                            |
//! | ----- | ------ | ------------------------------- |
//! | 16    | ResRef | Name of the resource.           |
//! | 2     | [u16]  | Type code of the resource.      |
//! | 2     | [u16]  | Padding. Always 0.              |
//! | 4     | [u32]  | Resource id (his position).     |
//! | 4     | [u32]  | Offset to the resource's data.  |
//! | 4     | [u32]  | Size of the resource's data.    |

use std::io::{Seek, SeekFrom, Write};

use crate::binary::{ReadBytes, WriteBytes};
use crate::error::{ALibError, Result};
use crate::files::{Archive, ArchiveEntry, Decodeable, DecodeableExtraData, Encodeable, EncodeableExtraData, LocationRef, ResRef, ResourceType};

/// Extension used by RIM archives.
pub const EXTENSION: &str = ".rim";

/// This represents the value that every RIM archive has in their first 4 bytes.
const SIGNATURE: &str = "RIM ";

/// Version used by RIM archives.
const VERSION: &str = "V1.0";

/// Size of the header of a RIM archive.
const HEADER_SIZE: u32 = 20;

/// Size of an entry table record.
const ENTRY_SIZE: u32 = 32;

#[cfg(test)] mod rim_test;

//---------------------------------------------------------------------------//
//                              Enum & Structs
//---------------------------------------------------------------------------//

/// This stores the data of a decoded RIM archive in memory.
///
/// Like [`Erf`](crate::files::erf::Erf), resource data is lazy: decode only
/// reads the directory, [`Self::load_all`] pulls the data into memory.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Rim {

    /// Directory of the archive.
    entries: Vec<ArchiveEntry>,

    /// In-memory data of each resource, parallel to `entries`. `None` means "still on disk".
    data: Vec<Option<Vec<u8>>>,
}

//---------------------------------------------------------------------------//
//                           Implementation of Rim
//---------------------------------------------------------------------------//

impl Archive for Rim {
    fn entries(&self) -> &[ArchiveEntry] {
        &self.entries
    }
}

impl Rim {

    /// This function creates a new empty RIM archive.
    pub fn new() -> Self {
        Self::default()
    }

    /// This function inserts a resource with in-memory data, replacing any
    /// previous resource under the same identity.
    pub fn insert(&mut self, resref: ResRef, restype: ResourceType, data: Vec<u8>) {
        self.remove(&resref, restype);
        self.entries.push(ArchiveEntry::new(resref, restype, LocationRef::Rim {
            offset: 0,
            size: data.len() as u32,
        }));
        self.data.push(Some(data));
    }

    /// This function removes the resource under the provided identity, if the archive holds one.
    pub fn remove(&mut self, resref: &ResRef, restype: ResourceType) -> bool {
        match self.entries.iter().position(|entry| entry.restype() == &restype && entry.resref() == resref) {
            Some(position) => {
                self.entries.remove(position);
                self.data.remove(position);
                true
            }
            None => false,
        }
    }

    /// This function loads every still-on-disk resource into memory, from the
    /// reader the archive was decoded from.
    pub fn load_all<R: ReadBytes>(&mut self, reader: &mut R) -> Result<()> {
        for index in 0..self.entries.len() {
            if self.data[index].is_none() {
                let entry = self.entries[index].clone();
                self.data[index] = Some(self.read_entry(reader, &entry)?);
            }
        }

        Ok(())
    }

    /// This function returns the in-memory data of the resource under the
    /// provided identity, if the archive holds it and it's loaded.
    pub fn data_of(&self, resref: &ResRef, restype: ResourceType) -> Option<&[u8]> {
        let position = self.entries.iter().position(|entry| entry.restype() == &restype && entry.resref() == resref)?;
        self.data[position].as_deref()
    }
}

//---------------------------------------------------------------------------//
//                            Decode/Encode logic
//---------------------------------------------------------------------------//

impl Decodeable for Rim {

    fn decode<R: ReadBytes>(data: &mut R, _extra_data: &Option<DecodeableExtraData>) -> Result<Self> {
        let data_len = data.len()?;
        if data_len < HEADER_SIZE as u64 {
            return Err(ALibError::DecodingTruncatedSection("header"));
        }

        let signature = data.read_string_u8(4)?;
        if signature != SIGNATURE {
            return Err(ALibError::DecodingBadSignature(SIGNATURE.to_owned(), signature));
        }

        let version = data.read_string_u8(4)?;
        if version != VERSION {
            return Err(ALibError::DecodingUnsupportedVersion("RIM".to_owned(), version));
        }

        let _reserved = data.read_u32()?;
        let entry_count = data.read_u32()? as u64;
        let offset_to_entries = data.read_u32()? as u64;

        if offset_to_entries + entry_count * ENTRY_SIZE as u64 > data_len {
            return Err(ALibError::DecodingTruncatedSection("entry table"));
        }

        data.seek(SeekFrom::Start(offset_to_entries))?;
        let mut entries = Vec::with_capacity(entry_count as usize);
        for _ in 0..entry_count {
            let resref = ResRef::read_fixed(data)?;
            let restype = ResourceType::from_code(data.read_u16()?);
            let _padding = data.read_u16()?;
            let _resource_id = data.read_u32()?;
            let offset = data.read_u32()? as u64;
            let size = data.read_u32()?;

            if offset + size as u64 > data_len {
                return Err(ALibError::DecodingTruncatedSection("resource data"));
            }

            entries.push(ArchiveEntry::new(resref, restype, LocationRef::Rim { offset, size }));
        }

        let data_slots = vec![None; entries.len()];
        Ok(Self {
            entries,
            data: data_slots,
        })
    }
}

impl Encodeable for Rim {

    fn encode<W: WriteBytes>(&mut self, buffer: &mut W, _extra_data: &Option<EncodeableExtraData>) -> Result<()> {
        for (index, slot) in self.data.iter().enumerate() {
            if slot.is_none() {
                return Err(ALibError::UnknownResource(
                    self.entries[index].resref().to_string(),
                    self.entries[index].restype().to_string(),
                ));
            }
        }

        buffer.write_string_u8(SIGNATURE)?;
        buffer.write_string_u8(VERSION)?;
        buffer.write_u32(0)?;
        buffer.write_u32(self.entries.len() as u32)?;
        buffer.write_u32(HEADER_SIZE)?;

        let data_start = HEADER_SIZE + self.entries.len() as u32 * ENTRY_SIZE;
        let mut offset = data_start;
        for (index, entry) in self.entries.iter().enumerate() {
            let size = self.data[index].as_ref().map(|data| data.len() as u32).unwrap_or(0);
            entry.resref().write_fixed(buffer)?;
            buffer.write_u16(entry.restype().code())?;
            buffer.write_u16(0)?;
            buffer.write_u32(index as u32)?;
            buffer.write_u32(offset)?;
            buffer.write_u32(size)?;
            offset += size;
        }

        for slot in self.data.iter().flatten() {
            buffer.write_all(slot)?;
        }

        // Refresh the directory so the in-memory offsets match what we just wrote.
        let mut offset = data_start as u64;
        for (index, slot) in self.data.iter().enumerate() {
            let size = slot.as_ref().map(|data| data.len() as u32).unwrap_or(0);
            let entry = &self.entries[index];
            self.entries[index] = ArchiveEntry::new(entry.resref().clone(), *entry.restype(), LocationRef::Rim { offset, size });
            offset += size as u64;
        }

        Ok(())
    }
}
