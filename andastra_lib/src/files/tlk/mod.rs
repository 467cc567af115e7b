//---------------------------------------------------------------------------//
// Copyright (c) 2024-2026 The Andastra project contributors. All rights reserved.
//
// This file is part of the Andastra project,
// which can be found here: https://github.com/andastra-project/andastra.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/andastra-project/andastra/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! Talk tables (TLK) are the localised-string stores of the BioWare engines.
//!
//! All player-visible text resolves through one of these: a StrRef is simply a
//! 0-based index into the table's entry vector, with `-1` meaning "no string".
//! Text is stored in the legacy codepage the table's language declares.
//!
//! # TLK Structure
//!
//! ## Header
//!
//! | Bytes | Type     | Data                                        |
//! | ----- | -------- | ------------------------------------------- |
//! | 4     | StringU8 | File signature. Always `TLK `.              |
//! | 4     | StringU8 | Version. `V3.0` on Odyssey, `V4.0` on Jade. |
//! | 4     | [u32]    | Language id of the table.                   |
//! | 4     | [u32]    | Amount of entries on the table.             |
//! | 4     | [u32]    | Offset to the text heap.                    |
//!
//! ## String data
//!
//! One 40-byte record per entry:
//!
//! | Bytes | Type       | Data                                             |
//! | ----- | ---------- | ------------------------------------------------ |
//! | 4     | [u32]      | Flags: TEXT (1), SOUND (2), SOUND_LENGTH (4).    |
//! | 16    | ResRef     | Sound resource played with the string.           |
//! | 4     | [u32]      | Volume variance. Unused, always 0.               |
//! | 4     | [u32]      | Pitch variance. Unused, always 0.                |
//! | 4     | [u32]      | Offset of the text, relative to the text heap.   |
//! | 4     | [u32]      | Lenght of the text, in bytes.                    |
//! | 4     | [f32]      | Lenght of the sound, in seconds.                 |

use bitflags::bitflags;
use getset::{Getters, Setters};
use serde_json::{Value, json};

use std::io::{SeekFrom, Write};

use crate::binary::{ReadBytes, WriteBytes, encoding_for_language};
use crate::error::{ALibError, Result};
use crate::files::{Decodeable, DecodeableExtraData, Encodeable, EncodeableExtraData, ResRef, StrRef};

/// Extension used by talk tables.
pub const EXTENSION: &str = ".tlk";

/// This represents the value that every talk table has in their first 4 bytes.
const SIGNATURE: &str = "TLK ";

/// Size of the header of a talk table.
const HEADER_SIZE: u64 = 20;

/// Size of a string data record.
const ENTRY_SIZE: u64 = 40;

/// Amount of entries the unmodified K1 table has. Uninstalls truncate back to this.
pub const BASELINE_K1: usize = 49_265;

/// Amount of entries the unmodified K2 table has. Uninstalls truncate back to this.
pub const BASELINE_K2: usize = 136_329;

#[cfg(test)] mod tlk_test;

bitflags! {

    /// This represents the bitmasks of content a talk table entry carries.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct TlkEntryFlags: u32 {
        const TEXT = 0b0000_0001;
        const SOUND = 0b0000_0010;
        const SOUND_LENGTH = 0b0000_0100;
    }
}

//---------------------------------------------------------------------------//
//                              Enum & Structs
//---------------------------------------------------------------------------//

/// This stores the data of a decoded talk table in memory.
#[derive(Clone, Debug, PartialEq, Getters, Setters)]
#[getset(get = "pub", set = "pub")]
pub struct Tlk {

    /// Version of the table. Odyssey tools always write V3.0.
    version: TlkVersion,

    /// Numeric language id of the table. Selects the legacy codepage of the text.
    language_id: u32,

    /// The entries of the table, indexed by StrRef.
    #[getset(skip)]
    entries: Vec<TlkEntry>,
}

/// Versions of the talk table format.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum TlkVersion {
    #[default] V3_0,
    V4_0,
}

/// An entry of a talk table.
#[derive(Clone, Debug, Default, PartialEq, Getters, Setters)]
#[getset(get = "pub", set = "pub")]
pub struct TlkEntry {

    /// What content this entry carries.
    flags: TlkEntryFlags,

    /// The localised text.
    text: String,

    /// The sound resource played with the text.
    sound: ResRef,

    /// Lenght of the sound, in seconds.
    sound_length: f32,
}

//---------------------------------------------------------------------------//
//                           Implementation of Tlk
//---------------------------------------------------------------------------//

impl Tlk {

    /// This function creates a new empty talk table for the provided language.
    pub fn new(language_id: u32) -> Self {
        Self {
            version: TlkVersion::default(),
            language_id,
            entries: vec![],
        }
    }

    /// This function returns the entries of this table.
    pub fn entries(&self) -> &[TlkEntry] {
        &self.entries
    }

    /// This function returns the amount of entries in this table.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// This function returns if this table has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// This function returns the entry under the provided StrRef, if it exists.
    ///
    /// `-1` is the "no string" StrRef and never resolves.
    pub fn entry(&self, strref: StrRef) -> Option<&TlkEntry> {
        usize::try_from(strref).ok().and_then(|index| self.entries.get(index))
    }

    /// This function returns a mutable reference to the entry under the provided StrRef, if it exists.
    pub fn entry_mut(&mut self, strref: StrRef) -> Option<&mut TlkEntry> {
        usize::try_from(strref).ok().and_then(|index| self.entries.get_mut(index))
    }

    /// This function appends an entry to the table, returning the StrRef it got assigned.
    pub fn append(&mut self, entry: TlkEntry) -> StrRef {
        self.entries.push(entry);
        self.entries.len() as StrRef - 1
    }

    /// This function replaces the entry under the provided StrRef.
    pub fn replace(&mut self, strref: StrRef, entry: TlkEntry) -> Result<()> {
        let len = self.entries.len();
        match self.entry_mut(strref) {
            Some(old_entry) => {
                *old_entry = entry;
                Ok(())
            }
            None => Err(ALibError::StrRefOutOfRange(strref, len)),
        }
    }

    /// This function drops the last entries of the table until only `len` remain.
    ///
    /// Uninstalls use this to restore the vanilla baseline of a game. Tables
    /// already at or below `len` are left untouched.
    pub fn truncate(&mut self, len: usize) {
        self.entries.truncate(len);
    }

    /// This function serializes the whole table into a JSON value, for the editing surface.
    pub fn to_json(&self) -> Value {
        let entries = self.entries.iter()
            .map(|entry| json!({
                "flags": entry.flags.bits(),
                "text": entry.text,
                "sound": entry.sound.as_str(),
                "sound_length": entry.sound_length,
            }))
            .collect::<Vec<_>>();

        json!({
            "language_id": self.language_id,
            "entries": entries,
        })
    }

    /// This function rebuilds a talk table from his JSON projection.
    pub fn from_json(value: &Value) -> Result<Self> {
        let language_id = value.get("language_id")
            .and_then(Value::as_u64)
            .unwrap_or(0) as u32;

        let mut tlk = Self::new(language_id);
        if let Some(entries) = value.get("entries").and_then(Value::as_array) {
            for entry in entries {
                let mut decoded = TlkEntry::default();
                decoded.flags = TlkEntryFlags::from_bits_truncate(entry.get("flags").and_then(Value::as_u64).unwrap_or(0) as u32);
                decoded.text = entry.get("text").and_then(Value::as_str).unwrap_or_default().to_owned();
                decoded.sound = ResRef::new(entry.get("sound").and_then(Value::as_str).unwrap_or_default())?;
                decoded.sound_length = entry.get("sound_length").and_then(Value::as_f64).unwrap_or(0.0) as f32;
                tlk.append(decoded);
            }
        }

        Ok(tlk)
    }
}

impl TlkEntry {

    /// This function creates a new text-only entry.
    pub fn with_text(text: &str) -> Self {
        Self {
            flags: TlkEntryFlags::TEXT,
            text: text.to_owned(),
            sound: ResRef::default(),
            sound_length: 0.0,
        }
    }
}

impl TlkVersion {

    /// This function returns the version matching an on-disk version tag.
    pub fn from_str(version: &str) -> Result<Self> {
        match version {
            "V3.0" => Ok(Self::V3_0),
            "V4.0" => Ok(Self::V4_0),
            _ => Err(ALibError::DecodingUnsupportedVersion("TLK".to_owned(), version.to_owned())),
        }
    }
}

impl std::fmt::Display for TlkVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let version = match self {
            Self::V3_0 => "V3.0",
            Self::V4_0 => "V4.0",
        };
        write!(f, "{version}")
    }
}

//---------------------------------------------------------------------------//
//                            Decode/Encode logic
//---------------------------------------------------------------------------//

impl Decodeable for Tlk {

    fn decode<R: ReadBytes>(data: &mut R, _extra_data: &Option<DecodeableExtraData>) -> Result<Self> {
        let data_len = data.len()?;
        if data_len < HEADER_SIZE {
            return Err(ALibError::DecodingTruncatedSection("header"));
        }

        let signature = data.read_string_u8(4)?;
        if signature != SIGNATURE {
            return Err(ALibError::DecodingBadSignature(SIGNATURE.to_owned(), signature));
        }

        let version = TlkVersion::from_str(&data.read_string_u8(4)?)?;
        let language_id = data.read_u32()?;
        let entry_count = data.read_u32()? as u64;
        let entries_offset = data.read_u32()? as u64;

        if HEADER_SIZE + entry_count * ENTRY_SIZE > data_len || entries_offset > data_len {
            return Err(ALibError::DecodingTruncatedSection("string data"));
        }

        let encoding = encoding_for_language(language_id);
        let mut entries = Vec::with_capacity(entry_count as usize);
        for index in 0..entry_count {
            data.seek(SeekFrom::Start(HEADER_SIZE + index * ENTRY_SIZE))?;

            let flags = TlkEntryFlags::from_bits_truncate(data.read_u32()?);
            let sound = ResRef::read_fixed(data)?;
            let _volume_variance = data.read_u32()?;
            let _pitch_variance = data.read_u32()?;
            let text_offset = data.read_u32()? as u64;
            let text_length = data.read_u32()? as u64;
            let sound_length = data.read_f32()?;

            let text = if text_length == 0 {
                String::new()
            } else {
                if entries_offset + text_offset + text_length > data_len {
                    return Err(ALibError::DecodingTruncatedSection("text heap"));
                }
                data.seek(SeekFrom::Start(entries_offset + text_offset))?;
                data.read_string_encoding(text_length as usize, encoding)?
            };

            entries.push(TlkEntry {
                flags,
                text,
                sound,
                sound_length,
            });
        }

        Ok(Self {
            version,
            language_id,
            entries,
        })
    }
}

impl Encodeable for Tlk {

    fn encode<W: WriteBytes>(&mut self, buffer: &mut W, extra_data: &Option<EncodeableExtraData>) -> Result<()> {
        let dedup = extra_data.as_ref().map(|extra_data| *extra_data.dedup_strings()).unwrap_or(false);
        let encoding = encoding_for_language(self.language_id);

        // The heap holds the encoded strings in entry order. Dedup, when asked
        // for, only merges verbatim-identical strings.
        let mut heap: Vec<u8> = vec![];
        let mut offsets: Vec<(u32, u32)> = Vec::with_capacity(self.entries.len());
        let mut seen: Vec<(Vec<u8>, u32)> = vec![];

        for entry in &self.entries {
            let (encoded, _, _) = encoding.encode(&entry.text);
            let encoded = encoded.into_owned();

            let known = if dedup {
                seen.iter().find(|(bytes, _)| *bytes == encoded).map(|(_, offset)| *offset)
            } else {
                None
            };

            match known {
                Some(offset) => offsets.push((offset, encoded.len() as u32)),
                None => {
                    let offset = heap.len() as u32;
                    offsets.push((offset, encoded.len() as u32));
                    if dedup {
                        seen.push((encoded.to_vec(), offset));
                    }
                    heap.extend_from_slice(&encoded);
                }
            }
        }

        let entries_offset = HEADER_SIZE as u32 + self.entries.len() as u32 * ENTRY_SIZE as u32;

        buffer.write_string_u8(SIGNATURE)?;
        buffer.write_string_u8(&self.version.to_string())?;
        buffer.write_u32(self.language_id)?;
        buffer.write_u32(self.entries.len() as u32)?;
        buffer.write_u32(entries_offset)?;

        for (entry, (text_offset, text_length)) in self.entries.iter().zip(offsets.iter()) {
            buffer.write_u32(entry.flags.bits())?;
            entry.sound.write_fixed(buffer)?;
            buffer.write_u32(0)?;
            buffer.write_u32(0)?;
            buffer.write_u32(*text_offset)?;
            buffer.write_u32(*text_length)?;
            buffer.write_f32(entry.sound_length)?;
        }

        buffer.write_all(&heap)?;

        Ok(())
    }
}
