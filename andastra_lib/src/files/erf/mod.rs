//---------------------------------------------------------------------------//
// Copyright (c) 2024-2026 The Andastra project contributors. All rights reserved.
//
// This file is part of the Andastra project,
// which can be found here: https://github.com/andastra-project/andastra.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/andastra-project/andastra/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! ERFs are a container-type file, used to pack game resources into single
//! files: module archives (`MOD `), saves (`SAV `), texture packs and hak
//! packs are all the same layout under different type tags.
//!
//! # ERF Structure
//!
//! ## Header
//!
//! | Bytes | Type     | Data                                                    |
//! | ----- | -------- | ------------------------------------------------------- |
//! | 4     | StringU8 | Type tag: `ERF `, `MOD `, `SAV `, `HAK `.               |
//! | 4     | StringU8 | Version. Always `V1.0` on the engines we support.       |
//! | 4     | [u32]    | Amount of localized description strings.                |
//! | 4     | [u32]    | Size in bytes of the localized string list.             |
//! | 4     | [u32]    | Amount of resources.                                    |
//! | 4     | [u32]    | Offset to the localized string list.                    |
//! | 4     | [u32]    | Offset to the key list.                                 |
//! | 4     | [u32]    | Offset to the resource list.                            |
//! | 4     | [u32]    | Build year, since 1900.                                 |
//! | 4     | [u32]    | Build day, 0-based day of the year.                     |
//! | 4     | [u32]    | StrRef of the archive's description.                    |
//! | 116   | Vec<u8>  | Reserved. Always 0.                                     |
//!
//! ## Localized string list
//!
//! | Bytes | Type     | Data                           |
//! | ----- | -------- | ------------------------------ |
//! | 4     | [u32]    | Language id.                   |
//! | 4     | [u32]    | Size in bytes of the string.   |
//! | *     | StringU8 | The description string itself. |
//!
//! ## Key list
//!
//! One 24-byte record per resource: a 16-byte ResRef, his u32 resource id
//! (his position), his u16 type code, and 2 unused bytes.
//!
//! ## Resource list
//!
//! One `(offset: u32, size: u32)` pair per resource, in the same order as the
//! key list, pointing at the raw data further in the file.
//!
//! Unknown type tags are tolerated (some third-party producers invent their
//! own): the archive decodes normally and carries a warning flag instead.

use getset::{Getters, Setters};

use std::io::{Seek, SeekFrom, Write};

use crate::binary::{ReadBytes, WriteBytes};
use crate::error::{ALibError, Result};
use crate::files::{Archive, ArchiveEntry, Decodeable, DecodeableExtraData, Encodeable, EncodeableExtraData, LocationRef, ResRef, ResourceType, StrRef};

/// Extensions used by ERF-family archives.
pub const EXTENSIONS: [&str; 4] = [".erf", ".mod", ".sav", ".hak"];

/// Type tags this lib knows to be ERF-family.
const KNOWN_TYPES: [&str; 4] = ["ERF ", "MOD ", "SAV ", "HAK "];

/// Version used by ERF archives on the engines we support.
const VERSION: &str = "V1.0";

/// Size of the header of an ERF archive.
const HEADER_SIZE: u32 = 160;

/// Size of a key list record.
const KEY_SIZE: u32 = 24;

/// Size of a resource list record.
const RESOURCE_SIZE: u32 = 8;

#[cfg(test)] mod erf_test;

//---------------------------------------------------------------------------//
//                              Enum & Structs
//---------------------------------------------------------------------------//

/// This stores the data of a decoded ERF archive in memory.
///
/// Resource data supports lazy loading: a freshly decoded archive only holds
/// his directory, and reads go back to the backing reader by `(offset, size)`.
/// Use [`Self::load_all`] to pull everything into memory before mutating or
/// re-encoding the archive.
#[derive(Clone, Debug, PartialEq, Getters, Setters)]
#[getset(get = "pub", set = "pub")]
pub struct Erf {

    /// Type tag of the archive.
    erf_type: String,

    /// If the type tag is one no BioWare tool writes. Callers should surface a warning.
    unknown_type: bool,

    /// Localized description strings, as `(language id, text)` pairs.
    #[getset(skip)]
    localized_strings: Vec<(u32, String)>,

    /// StrRef of the archive's description. `-1` for none.
    description_strref: StrRef,

    /// Build year of the archive, since 1900.
    build_year: u32,

    /// Build day of the archive, 0-based day of the year.
    build_day: u32,

    /// Directory of the archive.
    #[getset(skip)]
    entries: Vec<ArchiveEntry>,

    /// In-memory data of each resource, parallel to `entries`. `None` means "still on disk".
    #[getset(skip)]
    data: Vec<Option<Vec<u8>>>,
}

//---------------------------------------------------------------------------//
//                           Implementation of Erf
//---------------------------------------------------------------------------//

impl Default for Erf {
    fn default() -> Self {
        Self::new("ERF ")
    }
}

impl Archive for Erf {
    fn entries(&self) -> &[ArchiveEntry] {
        &self.entries
    }
}

impl Erf {

    /// This function creates a new empty archive with the provided type tag.
    pub fn new(erf_type: &str) -> Self {
        Self {
            erf_type: format!("{erf_type:<4.4}"),
            unknown_type: false,
            localized_strings: vec![],
            description_strref: -1,
            build_year: 0,
            build_day: 0,
            entries: vec![],
            data: vec![],
        }
    }

    /// This function returns the localized description strings of the archive.
    pub fn localized_strings(&self) -> &[(u32, String)] {
        &self.localized_strings
    }

    /// This function adds a localized description string.
    pub fn add_localized_string(&mut self, language_id: u32, text: &str) {
        self.localized_strings.push((language_id, text.to_owned()));
    }

    /// This function inserts a resource with in-memory data, replacing any
    /// previous resource under the same identity.
    pub fn insert(&mut self, resref: ResRef, restype: ResourceType, data: Vec<u8>) {
        self.remove(&resref, restype);
        self.entries.push(ArchiveEntry::new(resref, restype, LocationRef::Erf {
            offset: 0,
            size: data.len() as u32,
            compressed: false,
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

impl Decodeable for Erf {

    fn decode<R: ReadBytes>(data: &mut R, _extra_data: &Option<DecodeableExtraData>) -> Result<Self> {
        let data_len = data.len()?;
        if data_len < HEADER_SIZE as u64 {
            return Err(ALibError::DecodingTruncatedSection("header"));
        }

        let erf_type = data.read_string_u8(4)?;
        let unknown_type = !KNOWN_TYPES.contains(&&*erf_type);

        let version = data.read_string_u8(4)?;
        if version != VERSION {
            return Err(ALibError::DecodingUnsupportedVersion("ERF".to_owned(), version));
        }

        let localized_count = data.read_u32()?;
        let _localized_size = data.read_u32()?;
        let entry_count = data.read_u32()? as u64;
        let offset_to_localized = data.read_u32()? as u64;
        let offset_to_keys = data.read_u32()? as u64;
        let offset_to_resources = data.read_u32()? as u64;
        let build_year = data.read_u32()?;
        let build_day = data.read_u32()?;
        let description_strref = data.read_u32()? as StrRef;

        if offset_to_keys + entry_count * KEY_SIZE as u64 > data_len {
            return Err(ALibError::DecodingTruncatedSection("key list"));
        }
        if offset_to_resources + entry_count * RESOURCE_SIZE as u64 > data_len {
            return Err(ALibError::DecodingTruncatedSection("resource list"));
        }

        let mut localized_strings = vec![];
        data.seek(SeekFrom::Start(offset_to_localized))?;
        for _ in 0..localized_count {
            let language_id = data.read_u32()?;
            let size = data.read_u32()? as usize;
            localized_strings.push((language_id, data.read_string_fallback(size)?));
        }

        data.seek(SeekFrom::Start(offset_to_keys))?;
        let mut identities = Vec::with_capacity(entry_count as usize);
        for _ in 0..entry_count {
            let resref = ResRef::read_fixed(data)?;
            let _resource_id = data.read_u32()?;
            let restype = ResourceType::from_code(data.read_u16()?);
            let _unused = data.read_u16()?;
            identities.push((resref, restype));
        }

        data.seek(SeekFrom::Start(offset_to_resources))?;
        let mut entries = Vec::with_capacity(entry_count as usize);
        for (resref, restype) in identities {
            let offset = data.read_u32()? as u64;
            let size = data.read_u32()?;
            if offset + size as u64 > data_len {
                return Err(ALibError::DecodingTruncatedSection("resource data"));
            }

            entries.push(ArchiveEntry::new(resref, restype, LocationRef::Erf {
                offset,
                size,
                compressed: false,
            }));
        }

        let data_slots = vec![None; entries.len()];
        Ok(Self {
            erf_type,
            unknown_type,
            localized_strings,
            description_strref,
            build_year,
            build_day,
            entries,
            data: data_slots,
        })
    }
}

impl Encodeable for Erf {

    fn encode<W: WriteBytes>(&mut self, buffer: &mut W, _extra_data: &Option<EncodeableExtraData>) -> Result<()> {

        // Encoding needs every resource in memory. Archives decoded from disk
        // must go through `load_all` first.
        for (index, slot) in self.data.iter().enumerate() {
            if slot.is_none() {
                return Err(ALibError::UnknownResource(
                    self.entries[index].resref().to_string(),
                    self.entries[index].restype().to_string(),
                ));
            }
        }

        let localized_size = self.localized_strings.iter()
            .map(|(_, text)| 8 + text.len() as u32)
            .sum::<u32>();

        let offset_to_localized = HEADER_SIZE;
        let offset_to_keys = offset_to_localized + localized_size;
        let offset_to_resources = offset_to_keys + self.entries.len() as u32 * KEY_SIZE;
        let data_start = offset_to_resources + self.entries.len() as u32 * RESOURCE_SIZE;

        buffer.write_string_u8(&self.erf_type)?;
        buffer.write_string_u8(VERSION)?;
        buffer.write_u32(self.localized_strings.len() as u32)?;
        buffer.write_u32(localized_size)?;
        buffer.write_u32(self.entries.len() as u32)?;
        buffer.write_u32(offset_to_localized)?;
        buffer.write_u32(offset_to_keys)?;
        buffer.write_u32(offset_to_resources)?;
        buffer.write_u32(self.build_year)?;
        buffer.write_u32(self.build_day)?;
        buffer.write_u32(self.description_strref as u32)?;
        for _ in 0..116 {
            buffer.write_u8(0)?;
        }

        for (language_id, text) in &self.localized_strings {
            buffer.write_u32(*language_id)?;
            buffer.write_u32(text.len() as u32)?;
            buffer.write_string_u8(text)?;
        }

        for (index, entry) in self.entries.iter().enumerate() {
            entry.resref().write_fixed(buffer)?;
            buffer.write_u32(index as u32)?;
            buffer.write_u16(entry.restype().code())?;
            buffer.write_u16(0)?;
        }

        let mut offset = data_start;
        for slot in &self.data {
            let size = slot.as_ref().map(|data| data.len() as u32).unwrap_or(0);
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
            self.entries[index] = ArchiveEntry::new(entry.resref().clone(), *entry.restype(), LocationRef::Erf {
                offset,
                size,
                compressed: false,
            });
            offset += size as u64;
        }

        Ok(())
    }
}
