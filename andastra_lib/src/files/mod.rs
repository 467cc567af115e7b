//---------------------------------------------------------------------------//
// Copyright (c) 2024-2026 The Andastra project contributors. All rights reserved.
//
// This file is part of the Andastra project,
// which can be found here: https://github.com/andastra-project/andastra.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/andastra-project/andastra/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! This module contains the shared resource-file abstractions used by this lib
//! to decode/encode BioWare files.
//!
//! # Known file types
//!
//! | File Type   | Decoding Supported | Encoding Supported |
//! | ----------- | ------------------ | ------------------ |
//! | [`Gff`]     | Yes                | Yes                |
//! | [`Tlk`]     | Yes                | Yes                |
//! | [`TwoDA`]   | Yes                | Yes                |
//! | [`Erf`]     | Yes                | Yes                |
//! | [`Rim`]     | Yes                | Yes                |
//! | [`Key`]/[`Bif`] | Yes            | No                 |
//! | [`Ssf`]     | Yes                | Yes                |
//! | [`Lip`]     | Yes                | Yes                |
//! | [`Ltr`]     | Yes                | Yes                |
//! | [`Lyt`]     | Yes                | Yes                |
//! | [`Wav`]     | Yes                | Yes                |
//!
//! For more information about specific file types, including their binary format spec,
//! please **check their respective modules**.
//!
//! [`Gff`]: crate::files::gff::Gff
//! [`Tlk`]: crate::files::tlk::Tlk
//! [`TwoDA`]: crate::files::twoda::TwoDA
//! [`Erf`]: crate::files::erf::Erf
//! [`Rim`]: crate::files::rim::Rim
//! [`Key`]: crate::files::keybif::Key
//! [`Bif`]: crate::files::keybif::Bif
//! [`Ssf`]: crate::files::ssf::Ssf
//! [`Lip`]: crate::files::lip::Lip
//! [`Ltr`]: crate::files::ltr::Ltr
//! [`Lyt`]: crate::files::lyt::Lyt
//! [`Wav`]: crate::files::wav::Wav

use getset::*;
use serde_derive::{Deserialize, Serialize};

use std::fmt;
use std::hash::{Hash, Hasher};
use std::io::Seek;
use std::path::PathBuf;

use crate::binary::{ReadBytes, WriteBytes};
use crate::error::{ALibError, Result};

pub mod erf;
pub mod gff;
pub mod keybif;
pub mod lip;
pub mod ltr;
pub mod lyt;
pub mod rim;
pub mod ssf;
pub mod tlk;
pub mod twoda;
pub mod wav;

/// Index into a talk table. -1 means "no string".
pub type StrRef = i32;

/// StrRef value used on disk for "no string".
pub const STRREF_NONE: StrRef = -1;

//---------------------------------------------------------------------------//
//                                  ResRef
//---------------------------------------------------------------------------//

/// A resource reference: the extension-less name resources are looked up by.
///
/// ResRefs are up to 16 ASCII bytes, case-insensitive, with trailing NUL padding
/// ignored. Equality and hashing are case-folded; the original casing is kept
/// for display and for writing.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResRef(String);

impl ResRef {

    /// Max lenght of a ResRef, in bytes.
    pub const MAX_LENGTH: usize = 16;

    /// This function creates a new ResRef, validating the provided name.
    pub fn new(name: &str) -> Result<Self> {
        let name = name.trim_end_matches('\0');
        if name.len() > Self::MAX_LENGTH || name.bytes().any(|byte| byte == 0 || byte > 0x7E) {
            return Err(ALibError::InvalidResRef(name.to_owned()));
        }

        Ok(Self(name.to_owned()))
    }

    /// This function creates a new ResRef from a raw on-disk buffer, trimming the NUL padding.
    pub fn from_raw(bytes: &[u8]) -> Result<Self> {
        let significant = match memchr::memchr(0, bytes) {
            Some(pos) => &bytes[..pos],
            None => bytes,
        };

        if significant.len() > Self::MAX_LENGTH || significant.iter().any(|byte| *byte > 0x7E) {
            return Err(ALibError::InvalidResRef(String::from_utf8_lossy(bytes).to_string()));
        }

        // Only ASCII bytes reach this point, so this cannot fail.
        Ok(Self(String::from_utf8_lossy(significant).to_string()))
    }

    /// This function returns the ResRef as an `&str`, with his original casing.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// This function reads a ResRef from a fixed 16-byte on-disk field.
    pub fn read_fixed<R: ReadBytes>(data: &mut R) -> Result<Self> {
        let bytes = data.read_slice(Self::MAX_LENGTH, false)?;
        Self::from_raw(&bytes)
    }

    /// This function writes a ResRef as a fixed 16-byte NUL-padded field.
    pub fn write_fixed<W: WriteBytes>(&self, buffer: &mut W) -> Result<()> {
        buffer.write_string_u8_0padded(&self.0, Self::MAX_LENGTH)
    }
}

impl PartialEq for ResRef {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq_ignore_ascii_case(&other.0)
    }
}

impl Eq for ResRef {}

impl Hash for ResRef {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for byte in self.0.bytes() {
            byte.to_ascii_lowercase().hash(state);
        }
    }
}

impl fmt::Display for ResRef {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<&str> for ResRef {
    type Error = ALibError;
    fn try_from(value: &str) -> Result<Self> {
        Self::new(value)
    }
}

//---------------------------------------------------------------------------//
//                              ResourceType
//---------------------------------------------------------------------------//

/// Broad category a resource type belongs to.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum ResourceCategory {
    Binary,
    Text,
    Gff,
    Archive,
    Audio,
    Image,
    Model,
    Script,
    Unknown,
}

/// A resource type: the typed half of a resource's identity.
///
/// Each type pairs the numeric code the archive formats store with the file
/// extension loose files use. Unknown extensions and codes map to [`ResourceType::INVALID`].
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct ResourceType {
    code: u16,
    extension: &'static str,
    category: ResourceCategory,
}

macro_rules! resource_types {
    ($(($const_name:ident, $code:expr, $ext:expr, $category:ident),)+) => {
        impl ResourceType {
            $(pub const $const_name: Self = Self { code: $code, extension: $ext, category: ResourceCategory::$category };)+

            /// Table with every resource type known to this lib.
            const KNOWN_TYPES: &'static [Self] = &[
                $(Self::$const_name,)+
            ];
        }
    };
}

resource_types! {
    (RES, 0, "res", Gff),
    (BMP, 1, "bmp", Image),
    (TGA, 3, "tga", Image),
    (WAV, 4, "wav", Audio),
    (PLT, 6, "plt", Image),
    (INI, 7, "ini", Text),
    (TXT, 10, "txt", Text),
    (MDL, 2002, "mdl", Model),
    (NSS, 2009, "nss", Script),
    (NCS, 2010, "ncs", Script),
    (MOD, 2011, "mod", Archive),
    (ARE, 2012, "are", Gff),
    (SET, 2013, "set", Text),
    (IFO, 2014, "ifo", Gff),
    (BIC, 2015, "bic", Gff),
    (WOK, 2016, "wok", Model),
    (TWODA, 2017, "2da", Binary),
    (TLK, 2018, "tlk", Binary),
    (TXI, 2022, "txi", Text),
    (GIT, 2023, "git", Gff),
    (BTI, 2024, "bti", Gff),
    (UTI, 2025, "uti", Gff),
    (BTC, 2026, "btc", Gff),
    (UTC, 2027, "utc", Gff),
    (DLG, 2029, "dlg", Gff),
    (ITP, 2030, "itp", Binary),
    (UTT, 2032, "utt", Gff),
    (DDS, 2033, "dds", Image),
    (UTS, 2035, "uts", Gff),
    (LTR, 2036, "ltr", Binary),
    (GFF, 2037, "gff", Gff),
    (FAC, 2038, "fac", Gff),
    (UTE, 2040, "ute", Gff),
    (UTD, 2042, "utd", Gff),
    (UTP, 2044, "utp", Gff),
    (DFT, 2045, "dft", Binary),
    (GIC, 2046, "gic", Gff),
    (GUI, 2047, "gui", Gff),
    (UTM, 2051, "utm", Gff),
    (DWK, 2052, "dwk", Model),
    (PWK, 2053, "pwk", Model),
    (JRL, 2056, "jrl", Gff),
    (SAV, 2057, "sav", Archive),
    (UTW, 2058, "utw", Gff),
    (SSF, 2060, "ssf", Binary),
    (HAK, 2061, "hak", Archive),
    (NWM, 2062, "nwm", Archive),
    (BIK, 2063, "bik", Audio),
    (NDB, 2064, "ndb", Binary),
    (PTM, 2065, "ptm", Gff),
    (PTT, 2066, "ptt", Gff),
    (LYT, 3000, "lyt", Text),
    (VIS, 3001, "vis", Text),
    (RIM, 3002, "rim", Archive),
    (PTH, 3003, "pth", Gff),
    (LIP, 3004, "lip", Binary),
    (TPC, 3007, "tpc", Image),
    (MDX, 3008, "mdx", Model),
    (ERF, 9997, "erf", Archive),
    (BIF, 9998, "bif", Archive),
    (KEY, 9999, "key", Archive),
    (MP3, 25014, "mp3", Audio),
}

impl ResourceType {

    /// The "no type" marker used by the archive formats.
    pub const INVALID: Self = Self { code: 0xFFFF, extension: "", category: ResourceCategory::Unknown };

    /// This function returns the numeric code the archive formats store for this type.
    pub fn code(&self) -> u16 {
        self.code
    }

    /// This function returns the extension loose files of this type use, without the dot.
    pub fn extension(&self) -> &'static str {
        self.extension
    }

    /// This function returns the broad category of this type.
    pub fn category(&self) -> ResourceCategory {
        self.category
    }

    /// This function returns the resource type matching the provided extension
    /// (with or without leading dot), or [`Self::INVALID`] for unknown extensions.
    pub fn from_extension(extension: &str) -> Self {
        let extension = extension.trim_start_matches('.');
        Self::KNOWN_TYPES.iter()
            .find(|known| known.extension.eq_ignore_ascii_case(extension))
            .copied()
            .unwrap_or(Self::INVALID)
    }

    /// This function returns the resource type matching the provided numeric code,
    /// or [`Self::INVALID`] for unknown codes.
    pub fn from_code(code: u16) -> Self {
        Self::KNOWN_TYPES.iter()
            .find(|known| known.code == code)
            .copied()
            .unwrap_or(Self::INVALID)
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.extension)
    }
}

//---------------------------------------------------------------------------//
//                            Localised languages
//---------------------------------------------------------------------------//

/// Languages the localisation formats know about.
///
/// The numeric ids are shared between talk tables and GFF localised strings;
/// a localised substring id is `language * 2 + gender`.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Language {
    #[default] English,
    French,
    German,
    Italian,
    Spanish,
    Polish,
    Korean,
    ChineseTraditional,
    ChineseSimplified,
    Japanese,
}

/// Gender variant of a localised substring.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Gender {
    #[default] Male,
    Female,
}

impl Language {

    /// This function returns the numeric id of this language.
    pub fn id(&self) -> u32 {
        match self {
            Self::English => 0,
            Self::French => 1,
            Self::German => 2,
            Self::Italian => 3,
            Self::Spanish => 4,
            Self::Polish => 5,
            Self::Korean => 128,
            Self::ChineseTraditional => 129,
            Self::ChineseSimplified => 130,
            Self::Japanese => 131,
        }
    }

    /// This function returns the language matching the provided numeric id, if known.
    pub fn from_id(id: u32) -> Option<Self> {
        match id {
            0 => Some(Self::English),
            1 => Some(Self::French),
            2 => Some(Self::German),
            3 => Some(Self::Italian),
            4 => Some(Self::Spanish),
            5 => Some(Self::Polish),
            128 => Some(Self::Korean),
            129 => Some(Self::ChineseTraditional),
            130 => Some(Self::ChineseSimplified),
            131 => Some(Self::Japanese),
            _ => None,
        }
    }
}

impl Gender {

    /// This function returns the numeric id of this gender.
    pub fn id(&self) -> u32 {
        match self {
            Self::Male => 0,
            Self::Female => 1,
        }
    }

    /// This function returns the gender matching the provided numeric id.
    pub fn from_id(id: u32) -> Self {
        if id % 2 == 0 { Self::Male } else { Self::Female }
    }
}

//---------------------------------------------------------------------------//
//                        Decode/Encode infrastructure
//---------------------------------------------------------------------------//

/// This is a generic struct to easily pass additional data to a [Decodeable::decode] method.
///
/// To know what you need to provide to each file type, please check their documentation.
#[derive(Clone, Default, Getters, Setters)]
#[getset(get = "pub", set = "pub")]
pub struct DecodeableExtraData<'a> {

    /// Path of a file on disk, if any.
    disk_file_path: Option<&'a str>,

    /// Name of the file we're trying to decode.
    file_name: Option<&'a str>,

    /// Signatures the caller expects for a GFF-family file. `None` accepts any 4-ASCII tag.
    expected_signatures: Option<&'a [&'a str]>,
}

/// This is a generic struct to easily pass additional data to a [Encodeable::encode] method.
///
/// To know what you need to provide to each file type, please check their documentation.
#[derive(Clone, Default, Getters, Setters)]
#[getset(get = "pub", set = "pub")]
pub struct EncodeableExtraData<'a> {

    /// Name of the file we're trying to encode.
    file_name: Option<&'a str>,

    /// Only for talk tables. If equal strings should share a single heap entry.
    dedup_strings: bool,

    /// Only for blueprints. If deprecated toolset fields should be written.
    use_deprecated: bool,
}

/// A generic trait to implement decoding logic from anything implementing [ReadBytes](crate::binary::ReadBytes)
/// into structured types.
pub trait Decodeable: Send + Sync {

    /// This method provides a generic and expandable way to decode anything implementing [ReadBytes](crate::binary::ReadBytes)
    /// into the implementor's structure.
    ///
    /// The parameter `extra_data` contains arguments that can be used to provide additional data needed for the decoding process.
    fn decode<R: ReadBytes>(data: &mut R, extra_data: &Option<DecodeableExtraData>) -> Result<Self> where Self: Sized;
}

/// A generic trait to implement encoding logic from structured types into anything implementing [WriteBytes](crate::binary::WriteBytes).
pub trait Encodeable: Send + Sync {

    /// This method provides a generic and expandable way to encode any implementor's structure into anything
    /// implementing [WriteBytes](crate::binary::WriteBytes)
    ///
    /// The parameter `extra_data` contains arguments that can be used to provide additional data needed for the encoding process.
    fn encode<W: WriteBytes>(&mut self, buffer: &mut W, extra_data: &Option<EncodeableExtraData>) -> Result<()>;
}

//---------------------------------------------------------------------------//
//                            Archive interface
//---------------------------------------------------------------------------//

/// Where the bytes of an archived resource live.
#[derive(Clone, Debug, PartialEq)]
pub enum LocationRef {

    /// Inside a BIF blob, addressed through a KEY directory.
    KeyBif {
        bif_index: usize,
        tile_offset: u64,
        size: u32,
    },

    /// Inside an ERF-family archive.
    Erf {
        offset: u64,
        size: u32,
        compressed: bool,
    },

    /// Inside a RIM archive.
    Rim {
        offset: u64,
        size: u32,
    },

    /// A loose file on disk.
    Loose {
        path: PathBuf,
    },
}

/// An entry of an archive's directory: identity plus the location of the bytes.
#[derive(Clone, Debug, PartialEq, Getters)]
#[getset(get = "pub")]
pub struct ArchiveEntry {
    resref: ResRef,
    restype: ResourceType,
    location: LocationRef,
}

impl ArchiveEntry {

    /// This function creates a new ArchiveEntry.
    pub fn new(resref: ResRef, restype: ResourceType, location: LocationRef) -> Self {
        Self { resref, restype, location }
    }
}

/// An interface to easily work with container-like files.
///
/// All the archive codecs expose the same surface: an entry directory, and
/// location-based reads against the archive's backing data.
pub trait Archive {

    /// This method returns the entry directory of the archive.
    fn entries(&self) -> &[ArchiveEntry];

    /// This method returns a lazy iterator over the entry directory.
    fn iter_entries(&self) -> std::slice::Iter<ArchiveEntry> {
        self.entries().iter()
    }

    /// This method returns the entry matching the provided identity, if the archive contains it.
    fn entry(&self, resref: &ResRef, restype: ResourceType) -> Option<&ArchiveEntry> {
        self.entries().iter().find(|entry| entry.restype == restype && &entry.resref == resref)
    }

    /// This method reads the bytes of an entry from the archive's backing data.
    fn read_entry<R: ReadBytes>(&self, data: &mut R, entry: &ArchiveEntry) -> Result<Vec<u8>> {
        match entry.location() {
            LocationRef::Erf { offset, size, compressed } => {
                if *compressed {
                    return Err(ALibError::DataCannotBeDecompressed);
                }
                data.seek(std::io::SeekFrom::Start(*offset))?;
                data.read_slice(*size as usize, false)
            }
            LocationRef::Rim { offset, size } | LocationRef::KeyBif { tile_offset: offset, size, .. } => {
                data.seek(std::io::SeekFrom::Start(*offset))?;
                data.read_slice(*size as usize, false)
            }
            LocationRef::Loose { path } => {
                std::fs::read(path).map_err(From::from)
            }
        }
    }
}
