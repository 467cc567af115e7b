//---------------------------------------------------------------------------//
// Copyright (c) 2024-2026 The Andastra project contributors. All rights reserved.
//
// This file is part of the Andastra project,
// which can be found here: https://github.com/andastra-project/andastra.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/andastra-project/andastra/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! GFF (Generic File Format) files are the struct-of-fields binary container
//! almost every BioWare data file is built on: blueprints, dialogs, module
//! info, areas, journals,... all of them are GFF under a different signature.
//!
//! # GFF Structure
//!
//! ## Header
//!
//! | Bytes | Type     | Data                                                          |
//! | ----- | -------- | ------------------------------------------------------------- |
//! | 4     | StringU8 | File signature. The file type in caps, padded (`"UTM "`).     |
//! | 4     | StringU8 | Version. `V3.2` on Odyssey, `V3.3`/`V4.0`/`V4.1` on later engines. |
//! | 48    | 12×[u32] | Six `(offset, count)` pairs, one per section, in this order: structs, fields, labels, field data, field indices, list indices. |
//!
//! ## Sections
//!
//! | Section       | Element                                                       | Unit  |
//! | ------------- | ------------------------------------------------------------- | ----- |
//! | Structs       | `(struct_id: i32, data_or_offset: u32, field_count: u32)`     | 12 B  |
//! | Fields        | `(type: u32, label_index: u32, data_or_offset: u32)`          | 12 B  |
//! | Labels        | 16-byte label, NUL-padded                                     | 16 B  |
//! | Field data    | variable-size payloads for complex fields                     | bytes |
//! | Field indices | `u32` field indices for structs with more than one field      | 4 B   |
//! | List indices  | per list, a `len: u32` followed by `len` struct indices       | 4 B   |
//!
//! Simple values (at most 4 bytes) live inline in the field entry. Larger or
//! variable-sized values live in the field data section, with the field entry
//! holding a byte offset into it. Struct fields hold a struct index, and list
//! fields hold a byte offset into the list indices section.
//!
//! The struct graph must be a tree rooted at struct 0: the decoder refuses
//! files where a struct is reachable twice.

use getset::{Getters, MutGetters, Setters};
use serde_json::{Map, Value, json};

use std::io::{Cursor, Seek, SeekFrom, Write};

use crate::binary::{ReadBytes, WriteBytes};
use crate::error::{ALibError, Result};
use crate::files::{Decodeable, DecodeableExtraData, Encodeable, EncodeableExtraData, ResRef, StrRef, STRREF_NONE};

/// Extension used by generic GFF files. Most GFF files use their own signature-matching extension instead.
pub const EXTENSION: &str = ".gff";

/// Size of the header of a GFF file.
const HEADER_SIZE: u64 = 56;

/// Size of a struct entry.
const STRUCT_SIZE: u64 = 12;

/// Size of a field entry.
const FIELD_SIZE: u64 = 12;

/// Size of a label entry.
const LABEL_SIZE: u64 = 16;

/// Max lenght of a field label, in bytes.
const LABEL_MAX_LENGTH: usize = 16;

#[cfg(test)] mod gff_test;

//---------------------------------------------------------------------------//
//                              Enum & Structs
//---------------------------------------------------------------------------//

/// This stores the data of a decoded GFF file in memory.
#[derive(Clone, Debug, PartialEq, Getters, MutGetters, Setters)]
#[getset(get = "pub", get_mut = "pub", set = "pub")]
pub struct Gff {

    /// Signature of the file: the file type tag, 4 chars, space-padded.
    signature: String,

    /// Version of the file.
    version: GffVersion,

    /// The root struct of the file.
    root: GffStruct,
}

/// Versions the GFF family has gone through.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum GffVersion {

    /// The Odyssey engine version. The only one KotOR tools write.
    #[default] V3_2,
    V3_3,
    V4_0,
    V4_1,
}

/// A struct of a GFF file: an id plus an ordered list of labelled fields.
///
/// Labels are unique within a struct and field insertion order is preserved,
/// both in memory and on disk.
#[derive(Clone, Debug, PartialEq, Getters, Setters)]
pub struct GffStruct {

    /// Id of this struct's type. `-1` on root structs. Preserved verbatim on re-encode.
    #[getset(get = "pub", set = "pub")]
    struct_id: i32,

    /// Fields of this struct, in insertion order.
    fields: Vec<(String, GffField)>,
}

/// A field value: the tagged union of everything a GFF can store.
#[derive(Clone, Debug, PartialEq)]
pub enum GffField {
    U8(u8),
    I8(i8),
    U16(u16),
    I16(i16),
    U32(u32),
    I32(i32),
    U64(u64),
    I64(i64),
    F32(f32),
    F64(f64),
    String(String),
    ResRef(ResRef),
    LocalizedString(LocalizedString),
    Void(Vec<u8>),
    Struct(GffStruct),
    List(Vec<GffStruct>),
    Vector4([f32; 4]),
    Vector3([f32; 3]),
}

/// A localised string: a talk-table reference plus optional inline substrings.
///
/// Substrings are keyed by `language * 2 + gender` and kept in insertion order.
#[derive(Clone, Debug, Default, PartialEq, Getters, Setters)]
pub struct LocalizedString {

    /// Talk-table index this string resolves through, or `-1` for none.
    #[getset(get = "pub", set = "pub")]
    stringref: StrRef,

    /// Inline substrings, as `(substring id, text)` pairs.
    substrings: Vec<(u32, String)>,
}

/// Raw struct entry, as stored on disk.
#[derive(Clone, Copy, Debug)]
struct RawStruct {
    struct_id: i32,
    data: u32,
    field_count: u32,
}

/// Raw field entry, as stored on disk.
#[derive(Clone, Copy, Debug)]
struct RawField {
    field_type: u32,
    label_index: u32,
    data: u32,
}

/// Decoded raw sections, before the tree is materialised.
struct RawGff {
    structs: Vec<RawStruct>,
    fields: Vec<RawField>,
    labels: Vec<String>,
    field_data: Vec<u8>,
    field_indices: Vec<u8>,
    list_indices: Vec<u8>,
}

/// State of an in-progress encode: the six sections being assembled.
#[derive(Default)]
struct GffEncoder {
    structs: Vec<RawStruct>,
    fields: Vec<RawField>,
    labels: Vec<String>,
    field_data: Vec<u8>,
    field_indices: Vec<u8>,
    list_indices: Vec<u8>,
}

//---------------------------------------------------------------------------//
//                           Implementation of Gff
//---------------------------------------------------------------------------//

impl Gff {

    /// This function creates a new empty Gff with the provided signature and an empty root struct.
    pub fn new(signature: &str) -> Self {
        Self {
            signature: Self::pad_signature(signature),
            version: GffVersion::default(),
            root: GffStruct::new(-1),
        }
    }

    /// This function pads a signature to the 4 chars the header stores.
    fn pad_signature(signature: &str) -> String {
        format!("{signature:<4.4}")
    }

    /// This function serializes the whole file into a JSON value, for the editing surface.
    pub fn to_json(&self) -> Value {
        json!({
            "signature": self.signature.trim_end(),
            "version": self.version.to_string(),
            "root": struct_to_json(&self.root),
        })
    }

    /// This function rebuilds a Gff from his JSON projection.
    pub fn from_json(value: &Value) -> Result<Self> {
        let signature = value.get("signature")
            .and_then(Value::as_str)
            .ok_or_else(|| ALibError::InvalidPath("signature".to_owned()))?;
        let version = value.get("version")
            .and_then(Value::as_str)
            .map(GffVersion::from_str)
            .transpose()?
            .unwrap_or_default();
        let root = value.get("root")
            .ok_or_else(|| ALibError::InvalidPath("root".to_owned()))
            .and_then(struct_from_json)?;

        Ok(Self {
            signature: Self::pad_signature(signature),
            version,
            root,
        })
    }
}

impl GffVersion {

    /// This function returns the version matching an on-disk version tag.
    pub fn from_str(version: &str) -> Result<Self> {
        match version {
            "V3.2" => Ok(Self::V3_2),
            "V3.3" => Ok(Self::V3_3),
            "V4.0" => Ok(Self::V4_0),
            "V4.1" => Ok(Self::V4_1),
            _ => Err(ALibError::DecodingUnsupportedVersion("GFF".to_owned(), version.to_owned())),
        }
    }
}

impl std::fmt::Display for GffVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let version = match self {
            Self::V3_2 => "V3.2",
            Self::V3_3 => "V3.3",
            Self::V4_0 => "V4.0",
            Self::V4_1 => "V4.1",
        };
        write!(f, "{version}")
    }
}

//---------------------------------------------------------------------------//
//                        Implementation of GffStruct
//---------------------------------------------------------------------------//

impl GffStruct {

    /// This function creates a new empty struct with the provided id.
    pub fn new(struct_id: i32) -> Self {
        Self {
            struct_id,
            fields: vec![],
        }
    }

    /// This function returns the fields of this struct, in insertion order.
    pub fn fields(&self) -> &[(String, GffField)] {
        &self.fields
    }

    /// This function returns the field under the provided label, if it exists.
    ///
    /// Lookups are case-sensitive, per format rules.
    pub fn field(&self, label: &str) -> Option<&GffField> {
        self.fields.iter().find(|(field_label, _)| field_label == label).map(|(_, field)| field)
    }

    /// This function returns a mutable reference to the field under the provided label, if it exists.
    pub fn field_mut(&mut self, label: &str) -> Option<&mut GffField> {
        self.fields.iter_mut().find(|(field_label, _)| field_label == label).map(|(_, field)| field)
    }

    /// This function inserts a field under the provided label.
    ///
    /// If the label already existed, the old field is replaced in place, keeping
    /// his position. New labels are appended at the end.
    pub fn insert(&mut self, label: &str, field: GffField) -> Result<()> {
        if label.len() > LABEL_MAX_LENGTH || !label.is_ascii() || label.is_empty() {
            return Err(ALibError::InvalidLabel(label.to_owned()));
        }

        match self.fields.iter_mut().find(|(field_label, _)| field_label == label) {
            Some((_, old_field)) => *old_field = field,
            None => self.fields.push((label.to_owned(), field)),
        }

        Ok(())
    }

    /// This function removes the field under the provided label, returning it if it existed.
    pub fn remove(&mut self, label: &str) -> Option<GffField> {
        let position = self.fields.iter().position(|(field_label, _)| field_label == label)?;
        Some(self.fields.remove(position).1)
    }

    /// This function returns if this struct has a field under the provided label.
    pub fn has_field(&self, label: &str) -> bool {
        self.field(label).is_some()
    }

    //--------------------------------------------------------//
    // Typed accessors, for the blueprint layer.
    //--------------------------------------------------------//

    /// This function reads an u8 field, falling back to the provided default.
    pub fn u8_or(&self, label: &str, default: u8) -> u8 {
        match self.field(label) {
            Some(GffField::U8(value)) => *value,
            _ => default,
        }
    }

    /// This function reads an u16 field, falling back to the provided default.
    pub fn u16_or(&self, label: &str, default: u16) -> u16 {
        match self.field(label) {
            Some(GffField::U16(value)) => *value,
            _ => default,
        }
    }

    /// This function reads an i16 field, falling back to the provided default.
    pub fn i16_or(&self, label: &str, default: i16) -> i16 {
        match self.field(label) {
            Some(GffField::I16(value)) => *value,
            _ => default,
        }
    }

    /// This function reads an u32 field, falling back to the provided default.
    pub fn u32_or(&self, label: &str, default: u32) -> u32 {
        match self.field(label) {
            Some(GffField::U32(value)) => *value,
            _ => default,
        }
    }

    /// This function reads an i32 field, falling back to the provided default.
    pub fn i32_or(&self, label: &str, default: i32) -> i32 {
        match self.field(label) {
            Some(GffField::I32(value)) => *value,
            _ => default,
        }
    }

    /// This function reads an f32 field, falling back to the provided default.
    pub fn f32_or(&self, label: &str, default: f32) -> f32 {
        match self.field(label) {
            Some(GffField::F32(value)) => *value,
            _ => default,
        }
    }

    /// This function reads a string field, falling back to an empty string.
    pub fn string_or_default(&self, label: &str) -> String {
        match self.field(label) {
            Some(GffField::String(value)) => value.to_owned(),
            _ => String::new(),
        }
    }

    /// This function reads a ResRef field, falling back to an empty ResRef.
    pub fn resref_or_default(&self, label: &str) -> ResRef {
        match self.field(label) {
            Some(GffField::ResRef(value)) => value.clone(),
            _ => ResRef::default(),
        }
    }

    /// This function reads a localised string field, falling back to an unset one.
    pub fn locstring_or_default(&self, label: &str) -> LocalizedString {
        match self.field(label) {
            Some(GffField::LocalizedString(value)) => value.clone(),
            _ => LocalizedString::default(),
        }
    }

    /// This function reads a list field, falling back to an empty list.
    pub fn list_or_default(&self, label: &str) -> Vec<GffStruct> {
        match self.field(label) {
            Some(GffField::List(value)) => value.to_vec(),
            _ => vec![],
        }
    }
}

impl LocalizedString {

    /// This function creates a new LocalizedString with the provided talk-table reference
    /// and no substrings.
    pub fn new(stringref: StrRef) -> Self {
        Self {
            stringref,
            substrings: vec![],
        }
    }

    /// This function returns the substrings of this string, as `(substring id, text)` pairs.
    pub fn substrings(&self) -> &[(u32, String)] {
        &self.substrings
    }

    /// This function returns the substring for the provided language and gender ids, if set.
    pub fn get(&self, language: u32, gender: u32) -> Option<&str> {
        let id = language * 2 + gender;
        self.substrings.iter().find(|(sub_id, _)| *sub_id == id).map(|(_, text)| &**text)
    }

    /// This function sets the substring for the provided language and gender ids.
    pub fn set(&mut self, language: u32, gender: u32, text: &str) {
        let id = language * 2 + gender;
        match self.substrings.iter_mut().find(|(sub_id, _)| *sub_id == id) {
            Some((_, old_text)) => *old_text = text.to_owned(),
            None => self.substrings.push((id, text.to_owned())),
        }
    }

    /// This function pushes a raw substring pair. Internal, for the decoder.
    fn push_raw(&mut self, id: u32, text: String) {
        self.substrings.push((id, text));
    }
}

impl GffField {

    /// This function returns the numeric type id this field stores under on disk.
    pub fn type_id(&self) -> u32 {
        match self {
            Self::U8(_) => 0,
            Self::I8(_) => 1,
            Self::U16(_) => 2,
            Self::I16(_) => 3,
            Self::U32(_) => 4,
            Self::I32(_) => 5,
            Self::U64(_) => 6,
            Self::I64(_) => 7,
            Self::F32(_) => 8,
            Self::F64(_) => 9,
            Self::String(_) => 10,
            Self::ResRef(_) => 11,
            Self::LocalizedString(_) => 12,
            Self::Void(_) => 13,
            Self::Struct(_) => 14,
            Self::List(_) => 15,
            Self::Vector4(_) => 16,
            Self::Vector3(_) => 17,
        }
    }

    /// This function returns the name this field's type uses in the text projections.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::U8(_) => "u8",
            Self::I8(_) => "i8",
            Self::U16(_) => "u16",
            Self::I16(_) => "i16",
            Self::U32(_) => "u32",
            Self::I32(_) => "i32",
            Self::U64(_) => "u64",
            Self::I64(_) => "i64",
            Self::F32(_) => "f32",
            Self::F64(_) => "f64",
            Self::String(_) => "string",
            Self::ResRef(_) => "resref",
            Self::LocalizedString(_) => "locstring",
            Self::Void(_) => "void",
            Self::Struct(_) => "struct",
            Self::List(_) => "list",
            Self::Vector4(_) => "vector4",
            Self::Vector3(_) => "vector3",
        }
    }
}

//---------------------------------------------------------------------------//
//                               Decode logic
//---------------------------------------------------------------------------//

impl Decodeable for Gff {

    fn decode<R: ReadBytes>(data: &mut R, extra_data: &Option<DecodeableExtraData>) -> Result<Self> {
        let data_len = data.len()?;
        if data_len < HEADER_SIZE {
            return Err(ALibError::DecodingTruncatedSection("header"));
        }

        let signature = data.read_string_u8(4)?;
        if let Some(extra_data) = extra_data {
            if let Some(expected) = extra_data.expected_signatures() {
                let wildcard = "GFF ";
                if !expected.contains(&&*signature) && !expected.contains(&wildcard) {
                    return Err(ALibError::DecodingBadSignature(expected.join("/"), signature));
                }
            }
        }

        let version = GffVersion::from_str(&data.read_string_u8(4)?)?;

        let struct_offset = data.read_u32()? as u64;
        let struct_count = data.read_u32()? as u64;
        let field_offset = data.read_u32()? as u64;
        let field_count = data.read_u32()? as u64;
        let label_offset = data.read_u32()? as u64;
        let label_count = data.read_u32()? as u64;
        let field_data_offset = data.read_u32()? as u64;
        let field_data_count = data.read_u32()? as u64;
        let field_indices_offset = data.read_u32()? as u64;
        let field_indices_count = data.read_u32()? as u64;
        let list_indices_offset = data.read_u32()? as u64;
        let list_indices_count = data.read_u32()? as u64;

        let check_section = |offset: u64, byte_len: u64, name: &'static str| {
            if offset.checked_add(byte_len).map_or(true, |end| end > data_len) {
                Err(ALibError::DecodingTruncatedSection(name))
            } else {
                Ok(())
            }
        };
        check_section(struct_offset, struct_count * STRUCT_SIZE, "struct array")?;
        check_section(field_offset, field_count * FIELD_SIZE, "field array")?;
        check_section(label_offset, label_count * LABEL_SIZE, "label array")?;
        check_section(field_data_offset, field_data_count, "field data")?;
        check_section(field_indices_offset, field_indices_count, "field indices")?;
        check_section(list_indices_offset, list_indices_count, "list indices")?;

        data.seek(SeekFrom::Start(struct_offset))?;
        let mut structs = Vec::with_capacity(struct_count as usize);
        for _ in 0..struct_count {
            structs.push(RawStruct {
                struct_id: data.read_i32()?,
                data: data.read_u32()?,
                field_count: data.read_u32()?,
            });
        }

        data.seek(SeekFrom::Start(field_offset))?;
        let mut fields = Vec::with_capacity(field_count as usize);
        for _ in 0..field_count {
            fields.push(RawField {
                field_type: data.read_u32()?,
                label_index: data.read_u32()?,
                data: data.read_u32()?,
            });
        }

        data.seek(SeekFrom::Start(label_offset))?;
        let mut labels = Vec::with_capacity(label_count as usize);
        for _ in 0..label_count {
            labels.push(data.read_string_u8_0padded(LABEL_SIZE as usize)?);
        }

        data.seek(SeekFrom::Start(field_data_offset))?;
        let field_data = data.read_slice(field_data_count as usize, false)?;

        data.seek(SeekFrom::Start(field_indices_offset))?;
        let field_indices = data.read_slice(field_indices_count as usize, false)?;

        data.seek(SeekFrom::Start(list_indices_offset))?;
        let list_indices = data.read_slice(list_indices_count as usize, false)?;

        let raw = RawGff {
            structs,
            fields,
            labels,
            field_data,
            field_indices,
            list_indices,
        };

        if raw.structs.is_empty() {
            return Err(ALibError::DecodingTruncatedSection("struct array"));
        }

        let mut visited = vec![false; raw.structs.len()];
        let root = read_struct(&raw, 0, &mut visited)?;

        Ok(Self {
            signature,
            version,
            root,
        })
    }
}

/// This function materialises the struct under the provided index.
///
/// `visited` enforces the tree shape of the struct graph: a struct reached
/// twice means the graph is cyclic or a DAG, and the file is refused.
fn read_struct(raw: &RawGff, struct_index: u32, visited: &mut [bool]) -> Result<GffStruct> {
    let raw_struct = raw.structs.get(struct_index as usize)
        .ok_or(ALibError::DecodingStructIndexOutOfRange(struct_index, raw.structs.len()))?;

    if visited[struct_index as usize] {
        return Err(ALibError::DecodingCyclicGraph(struct_index));
    }
    visited[struct_index as usize] = true;

    let mut decoded = GffStruct::new(raw_struct.struct_id);

    let field_ids = match raw_struct.field_count {
        0 => vec![],
        1 => vec![raw_struct.data],
        count => {
            let mut cursor = Cursor::new(&raw.field_indices);
            cursor.seek(SeekFrom::Start(raw_struct.data as u64))
                .map_err(|_| ALibError::DecodingTruncatedSection("field indices"))?;

            let mut field_ids = Vec::with_capacity(count as usize);
            for _ in 0..count {
                field_ids.push(cursor.read_u32().map_err(|_| ALibError::DecodingTruncatedSection("field indices"))?);
            }
            field_ids
        }
    };

    for field_id in field_ids {
        let (label, field) = read_field(raw, field_id, visited)?;
        decoded.fields.push((label, field));
    }

    Ok(decoded)
}

/// This function materialises the field under the provided index.
fn read_field(raw: &RawGff, field_index: u32, visited: &mut [bool]) -> Result<(String, GffField)> {
    let raw_field = raw.fields.get(field_index as usize)
        .ok_or(ALibError::DecodingFieldIndexOutOfRange(field_index, raw.fields.len()))?;

    let label = raw.labels.get(raw_field.label_index as usize)
        .ok_or(ALibError::DecodingLabelIndexOutOfRange(raw_field.label_index, raw.labels.len()))?
        .to_owned();

    // Cursor over the field data section, for complex values.
    let mut complex = Cursor::new(&raw.field_data);
    fn seek_complex(cursor: &mut Cursor<&Vec<u8>>, offset: u32) -> Result<()> {
        cursor.seek(SeekFrom::Start(offset as u64))
            .map(|_| ())
            .map_err(|_| ALibError::DecodingTruncatedSection("field data"))
    }

    let inline = raw_field.data;
    let field = match raw_field.field_type {
        0 => GffField::U8(inline as u8),
        1 => GffField::I8(inline as u8 as i8),
        2 => GffField::U16(inline as u16),
        3 => GffField::I16(inline as u16 as i16),
        4 => GffField::U32(inline),
        5 => GffField::I32(inline as i32),
        6 => {
            seek_complex(&mut complex, inline)?;
            GffField::U64(complex.read_u64()?)
        }
        7 => {
            seek_complex(&mut complex, inline)?;
            GffField::I64(complex.read_i64()?)
        }
        8 => GffField::F32(f32::from_le_bytes(inline.to_le_bytes())),
        9 => {
            seek_complex(&mut complex, inline)?;
            GffField::F64(complex.read_f64()?)
        }
        10 => {
            seek_complex(&mut complex, inline)?;
            GffField::String(complex.read_sized_string_u32()?)
        }
        11 => {
            seek_complex(&mut complex, inline)?;
            let length = complex.read_u8()? as usize;
            if length > ResRef::MAX_LENGTH {
                return Err(ALibError::DecodingOversizedResRef(length));
            }
            let bytes = complex.read_slice(length, false)?;
            GffField::ResRef(ResRef::from_raw(&bytes)?)
        }
        12 => {
            seek_complex(&mut complex, inline)?;
            GffField::LocalizedString(read_localized_string(&mut complex)?)
        }
        13 => {
            seek_complex(&mut complex, inline)?;
            let length = complex.read_u32()? as usize;
            GffField::Void(complex.read_slice(length, false)?)
        }
        14 => GffField::Struct(read_struct(raw, inline, visited)?),
        15 => {
            let mut cursor = Cursor::new(&raw.list_indices);
            cursor.seek(SeekFrom::Start(inline as u64))
                .map_err(|_| ALibError::DecodingTruncatedSection("list indices"))?;

            let length = cursor.read_u32().map_err(|_| ALibError::DecodingTruncatedSection("list indices"))?;
            let mut struct_ids = Vec::with_capacity(length as usize);
            for _ in 0..length {
                struct_ids.push(cursor.read_u32().map_err(|_| ALibError::DecodingTruncatedSection("list indices"))?);
            }

            let mut items = Vec::with_capacity(struct_ids.len());
            for struct_id in struct_ids {
                items.push(read_struct(raw, struct_id, visited)?);
            }
            GffField::List(items)
        }
        16 => {
            seek_complex(&mut complex, inline)?;
            GffField::Vector4([complex.read_f32()?, complex.read_f32()?, complex.read_f32()?, complex.read_f32()?])
        }
        17 => {
            seek_complex(&mut complex, inline)?;
            GffField::Vector3([complex.read_f32()?, complex.read_f32()?, complex.read_f32()?])
        }
        unknown => return Err(ALibError::DecodingUnsupportedVersion("GFF field type".to_owned(), unknown.to_string())),
    };

    Ok((label, field))
}

/// This function reads a localised string payload from the field data section.
///
/// The leading size covers the stringref, the substring count and the substrings,
/// but not itself. A mismatch against the bytes actually consumed is fatal.
fn read_localized_string<R: ReadBytes>(data: &mut R) -> Result<LocalizedString> {
    let total_size = data.read_u32()?;
    let stringref = data.read_u32()? as StrRef;
    let substring_count = data.read_u32()?;

    let mut value = LocalizedString::new(stringref);
    let mut consumed = 8u32;
    for _ in 0..substring_count {
        let id = data.read_u32()?;
        let length = data.read_u32()? as u64;
        let left = data.bytes_left()?;
        if length > left {
            return Err(ALibError::DecodingIntegerOverflow(length, left));
        }

        let text = data.read_string_fallback(length as usize)?;
        consumed = consumed.saturating_add(8 + length as u32);
        value.push_raw(id, text);
    }

    if consumed != total_size {
        return Err(ALibError::DecodingLocalizedStringLengthMismatch(total_size, consumed));
    }

    Ok(value)
}

//---------------------------------------------------------------------------//
//                               Encode logic
//---------------------------------------------------------------------------//

impl Encodeable for Gff {

    fn encode<W: WriteBytes>(&mut self, buffer: &mut W, _extra_data: &Option<EncodeableExtraData>) -> Result<()> {
        let mut encoder = GffEncoder::default();
        encoder.encode_struct(&self.root)?;

        let struct_offset = HEADER_SIZE as u32;
        let field_offset = struct_offset + (encoder.structs.len() as u32 * STRUCT_SIZE as u32);
        let label_offset = field_offset + (encoder.fields.len() as u32 * FIELD_SIZE as u32);
        let field_data_offset = label_offset + (encoder.labels.len() as u32 * LABEL_SIZE as u32);
        let field_indices_offset = field_data_offset + encoder.field_data.len() as u32;
        let list_indices_offset = field_indices_offset + encoder.field_indices.len() as u32;

        buffer.write_string_u8(&Gff::pad_signature(&self.signature))?;
        buffer.write_string_u8(&self.version.to_string())?;
        buffer.write_u32(struct_offset)?;
        buffer.write_u32(encoder.structs.len() as u32)?;
        buffer.write_u32(field_offset)?;
        buffer.write_u32(encoder.fields.len() as u32)?;
        buffer.write_u32(label_offset)?;
        buffer.write_u32(encoder.labels.len() as u32)?;
        buffer.write_u32(field_data_offset)?;
        buffer.write_u32(encoder.field_data.len() as u32)?;
        buffer.write_u32(field_indices_offset)?;
        buffer.write_u32(encoder.field_indices.len() as u32)?;
        buffer.write_u32(list_indices_offset)?;
        buffer.write_u32(encoder.list_indices.len() as u32)?;

        for entry in &encoder.structs {
            buffer.write_i32(entry.struct_id)?;
            buffer.write_u32(entry.data)?;
            buffer.write_u32(entry.field_count)?;
        }

        for entry in &encoder.fields {
            buffer.write_u32(entry.field_type)?;
            buffer.write_u32(entry.label_index)?;
            buffer.write_u32(entry.data)?;
        }

        for label in &encoder.labels {
            buffer.write_string_u8_0padded(label, LABEL_SIZE as usize)?;
        }

        buffer.write_all(&encoder.field_data)?;
        buffer.write_all(&encoder.field_indices)?;
        buffer.write_all(&encoder.list_indices)?;

        Ok(())
    }
}

impl GffEncoder {

    /// This function serializes a struct and everything under it, returning the struct's index.
    ///
    /// Struct indices are assigned in depth-first traversal order, with the root at 0.
    fn encode_struct(&mut self, source: &GffStruct) -> Result<u32> {
        let struct_index = self.structs.len() as u32;
        self.structs.push(RawStruct {
            struct_id: source.struct_id,
            data: 0,
            field_count: source.fields.len() as u32,
        });

        let mut field_ids = Vec::with_capacity(source.fields.len());
        for (label, field) in &source.fields {
            field_ids.push(self.encode_field(label, field)?);
        }

        self.structs[struct_index as usize].data = match field_ids.len() {
            0 => 0,
            1 => field_ids[0],
            _ => {
                let offset = self.field_indices.len() as u32;
                for field_id in &field_ids {
                    self.field_indices.write_u32(*field_id)?;
                }
                offset
            }
        };

        Ok(struct_index)
    }

    /// This function serializes a single field, returning the field's index.
    fn encode_field(&mut self, label: &str, field: &GffField) -> Result<u32> {
        if label.len() > LABEL_MAX_LENGTH || !label.is_ascii() || label.is_empty() {
            return Err(ALibError::InvalidLabel(label.to_owned()));
        }

        // Labels dedupe case-sensitively, in first-seen order.
        let label_index = match self.labels.iter().position(|known| known == label) {
            Some(position) => position as u32,
            None => {
                self.labels.push(label.to_owned());
                self.labels.len() as u32 - 1
            }
        };

        let data = match field {
            GffField::U8(value) => *value as u32,
            GffField::I8(value) => *value as u8 as u32,
            GffField::U16(value) => *value as u32,
            GffField::I16(value) => *value as u16 as u32,
            GffField::U32(value) => *value,
            GffField::I32(value) => *value as u32,
            GffField::F32(value) => u32::from_le_bytes(value.to_le_bytes()),
            GffField::U64(value) => {
                let offset = self.field_data.len() as u32;
                self.field_data.write_u64(*value)?;
                offset
            }
            GffField::I64(value) => {
                let offset = self.field_data.len() as u32;
                self.field_data.write_i64(*value)?;
                offset
            }
            GffField::F64(value) => {
                let offset = self.field_data.len() as u32;
                self.field_data.write_f64(*value)?;
                offset
            }
            GffField::String(value) => {
                let offset = self.field_data.len() as u32;
                self.field_data.write_sized_string_u32(value)?;
                offset
            }
            GffField::ResRef(value) => {
                let offset = self.field_data.len() as u32;
                self.field_data.write_sized_string_u8(value.as_str())?;
                offset
            }
            GffField::LocalizedString(value) => {
                let offset = self.field_data.len() as u32;
                write_localized_string(&mut self.field_data, value)?;
                offset
            }
            GffField::Void(value) => {
                let offset = self.field_data.len() as u32;
                self.field_data.write_u32(value.len() as u32)?;
                self.field_data.write_all(value)?;
                offset
            }
            GffField::Vector4(value) => {
                let offset = self.field_data.len() as u32;
                for component in value {
                    self.field_data.write_f32(*component)?;
                }
                offset
            }
            GffField::Vector3(value) => {
                let offset = self.field_data.len() as u32;
                for component in value {
                    self.field_data.write_f32(*component)?;
                }
                offset
            }
            GffField::Struct(child) => self.encode_struct(child)?,
            GffField::List(children) => {

                // Children serialize before the run, so nested runs land earlier in the section.
                let mut child_ids = Vec::with_capacity(children.len());
                for child in children {
                    child_ids.push(self.encode_struct(child)?);
                }

                let offset = self.list_indices.len() as u32;
                self.list_indices.write_u32(child_ids.len() as u32)?;
                for child_id in child_ids {
                    self.list_indices.write_u32(child_id)?;
                }
                offset
            }
        };

        self.fields.push(RawField {
            field_type: field.type_id(),
            label_index,
            data,
        });

        Ok(self.fields.len() as u32 - 1)
    }
}

/// This function writes a localised string payload into the field data section.
fn write_localized_string<W: WriteBytes>(buffer: &mut W, value: &LocalizedString) -> Result<()> {
    let mut payload: Vec<u8> = vec![];
    payload.write_u32(value.stringref as u32)?;
    payload.write_u32(value.substrings.len() as u32)?;
    for (id, text) in &value.substrings {
        payload.write_u32(*id)?;
        payload.write_sized_string_u32(text)?;
    }

    buffer.write_u32(payload.len() as u32)?;
    buffer.write_all(&payload)?;

    Ok(())
}

//---------------------------------------------------------------------------//
//                              JSON projection
//---------------------------------------------------------------------------//

/// This function projects a struct into a JSON value.
fn struct_to_json(source: &GffStruct) -> Value {
    let fields = source.fields.iter()
        .map(|(label, field)| {
            let mut entry = Map::new();
            entry.insert("label".to_owned(), Value::from(label.to_owned()));
            entry.insert("type".to_owned(), Value::from(field.type_name()));
            entry.insert("value".to_owned(), field_value_to_json(field));
            Value::Object(entry)
        })
        .collect::<Vec<_>>();

    json!({
        "struct_id": source.struct_id,
        "fields": fields,
    })
}

/// This function projects a field value into a JSON value.
fn field_value_to_json(field: &GffField) -> Value {
    match field {
        GffField::U8(value) => json!(value),
        GffField::I8(value) => json!(value),
        GffField::U16(value) => json!(value),
        GffField::I16(value) => json!(value),
        GffField::U32(value) => json!(value),
        GffField::I32(value) => json!(value),
        GffField::U64(value) => json!(value),
        GffField::I64(value) => json!(value),
        GffField::F32(value) => json!(value),
        GffField::F64(value) => json!(value),
        GffField::String(value) => json!(value),
        GffField::ResRef(value) => json!(value.as_str()),
        GffField::LocalizedString(value) => {
            let substrings = value.substrings.iter()
                .map(|(id, text)| json!({"id": id, "text": text}))
                .collect::<Vec<_>>();
            json!({"stringref": value.stringref, "substrings": substrings})
        }
        GffField::Void(value) => json!(value),
        GffField::Struct(value) => struct_to_json(value),
        GffField::List(value) => Value::Array(value.iter().map(struct_to_json).collect()),
        GffField::Vector4(value) => json!(value),
        GffField::Vector3(value) => json!(value),
    }
}

/// This function rebuilds a struct from his JSON projection.
fn struct_from_json(value: &Value) -> Result<GffStruct> {
    let struct_id = value.get("struct_id")
        .and_then(Value::as_i64)
        .ok_or_else(|| ALibError::InvalidPath("struct_id".to_owned()))? as i32;

    let mut decoded = GffStruct::new(struct_id);
    let fields = value.get("fields")
        .and_then(Value::as_array)
        .ok_or_else(|| ALibError::InvalidPath("fields".to_owned()))?;

    for entry in fields {
        let label = entry.get("label")
            .and_then(Value::as_str)
            .ok_or_else(|| ALibError::InvalidPath("label".to_owned()))?;
        let type_name = entry.get("type")
            .and_then(Value::as_str)
            .ok_or_else(|| ALibError::InvalidPath("type".to_owned()))?;
        let field_value = entry.get("value")
            .ok_or_else(|| ALibError::InvalidPath("value".to_owned()))?;

        decoded.insert(label, field_value_from_json(type_name, field_value)?)?;
    }

    Ok(decoded)
}

/// This function rebuilds a field value from his JSON projection.
fn field_value_from_json(type_name: &str, value: &Value) -> Result<GffField> {
    let bad_value = || ALibError::InvalidPath(type_name.to_owned());

    Ok(match type_name {
        "u8" => GffField::U8(value.as_u64().ok_or_else(bad_value)? as u8),
        "i8" => GffField::I8(value.as_i64().ok_or_else(bad_value)? as i8),
        "u16" => GffField::U16(value.as_u64().ok_or_else(bad_value)? as u16),
        "i16" => GffField::I16(value.as_i64().ok_or_else(bad_value)? as i16),
        "u32" => GffField::U32(value.as_u64().ok_or_else(bad_value)? as u32),
        "i32" => GffField::I32(value.as_i64().ok_or_else(bad_value)? as i32),
        "u64" => GffField::U64(value.as_u64().ok_or_else(bad_value)?),
        "i64" => GffField::I64(value.as_i64().ok_or_else(bad_value)?),
        "f32" => GffField::F32(value.as_f64().ok_or_else(bad_value)? as f32),
        "f64" => GffField::F64(value.as_f64().ok_or_else(bad_value)?),
        "string" => GffField::String(value.as_str().ok_or_else(bad_value)?.to_owned()),
        "resref" => GffField::ResRef(ResRef::new(value.as_str().ok_or_else(bad_value)?)?),
        "locstring" => {
            let stringref = value.get("stringref").and_then(Value::as_i64).unwrap_or(STRREF_NONE as i64) as StrRef;
            let mut locstring = LocalizedString::new(stringref);
            if let Some(substrings) = value.get("substrings").and_then(Value::as_array) {
                for substring in substrings {
                    let id = substring.get("id").and_then(Value::as_u64).ok_or_else(bad_value)? as u32;
                    let text = substring.get("text").and_then(Value::as_str).ok_or_else(bad_value)?;
                    locstring.push_raw(id, text.to_owned());
                }
            }
            GffField::LocalizedString(locstring)
        }
        "void" => {
            let bytes = value.as_array()
                .ok_or_else(bad_value)?
                .iter()
                .map(|byte| byte.as_u64().map(|byte| byte as u8).ok_or_else(bad_value))
                .collect::<Result<Vec<_>>>()?;
            GffField::Void(bytes)
        }
        "struct" => GffField::Struct(struct_from_json(value)?),
        "list" => {
            let items = value.as_array()
                .ok_or_else(bad_value)?
                .iter()
                .map(struct_from_json)
                .collect::<Result<Vec<_>>>()?;
            GffField::List(items)
        }
        "vector4" => {
            let components = json_f32_array::<4>(value)?;
            GffField::Vector4(components)
        }
        "vector3" => {
            let components = json_f32_array::<3>(value)?;
            GffField::Vector3(components)
        }
        _ => return Err(bad_value()),
    })
}

/// This function reads a fixed-size f32 array from a JSON value.
fn json_f32_array<const N: usize>(value: &Value) -> Result<[f32; N]> {
    let array = value.as_array().ok_or_else(|| ALibError::InvalidPath("vector".to_owned()))?;
    if array.len() != N {
        return Err(ALibError::InvalidPath("vector".to_owned()));
    }

    let mut components = [0.0; N];
    for (component, entry) in components.iter_mut().zip(array.iter()) {
        *component = entry.as_f64().ok_or_else(|| ALibError::InvalidPath("vector".to_owned()))? as f32;
    }

    Ok(components)
}
