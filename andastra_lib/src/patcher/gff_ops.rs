//---------------------------------------------------------------------------//
// Copyright (c) 2024-2026 The Andastra project contributors. All rights reserved.
//
// This file is part of the Andastra project,
// which can be found here: https://github.com/andastra-project/andastra.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/andastra-project/andastra/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! The GFF operations of the patch engine: field additions, modifications and
//! deletions, plus list/struct splicing.
//!
//! Paths descend the tree with `/`: a field name enters a struct field, and a
//! numeric segment enters a list entry (`ItemList/0/InventoryRes`). The empty
//! path addresses the root struct.

use crate::error::{ALibError, Result};
use crate::files::{ResRef, StrRef};
use crate::files::gff::{Gff, GffField, GffStruct, LocalizedString};

use super::memory::PatchMemory;

//---------------------------------------------------------------------------//
//                              Enum & Structs
//---------------------------------------------------------------------------//

/// One GFF operation.
#[derive(Clone, Debug, PartialEq)]
pub enum GffOp {

    /// Add a new field under the struct at `path`.
    AddField {
        path: String,
        label: String,
        field_type: String,
        value: String,
        stores: Vec<usize>,
    },

    /// Overwrite the value of the field at `path`, keeping his type.
    ModifyField {
        path: String,
        value: String,
        stores: Vec<usize>,
    },

    /// Add a new empty list under the struct at `path`.
    AddList {
        path: String,
        label: String,
    },

    /// Append a struct to the list at `path`.
    AddStruct {
        path: String,
        struct_id: i32,
        fields: Vec<(String, String, String)>,
    },

    /// Delete the field at `path`.
    Delete {
        path: String,
    },
}

//---------------------------------------------------------------------------//
//                             Implementations
//---------------------------------------------------------------------------//

/// This function walks a path down to the struct it addresses.
fn descend<'a>(current: &'a mut GffStruct, segments: &[&str], full_path: &str) -> Result<&'a mut GffStruct> {
    let Some((head, rest)) = segments.split_first() else {
        return Ok(current);
    };

    match current.field_mut(head) {
        Some(GffField::Struct(child)) => descend(child, rest, full_path),
        Some(GffField::List(children)) => {
            let Some((index, rest)) = rest.split_first() else {
                return Err(ALibError::InvalidPath(full_path.to_owned()));
            };
            let index: usize = index.parse()
                .map_err(|_| ALibError::InvalidPath(full_path.to_owned()))?;
            let child = children.get_mut(index)
                .ok_or_else(|| ALibError::InvalidPath(full_path.to_owned()))?;
            descend(child, rest, full_path)
        }
        _ => Err(ALibError::InvalidPath(full_path.to_owned())),
    }
}

/// This function splits a path into his parent segments and final field label.
fn split_leaf(path: &str) -> Result<(Vec<&str>, &str)> {
    let mut segments = path.split('/').filter(|segment| !segment.is_empty()).collect::<Vec<_>>();
    match segments.pop() {
        Some(leaf) => Ok((segments, leaf)),
        None => Err(ALibError::InvalidPath(path.to_owned())),
    }
}

/// This function parses a textual value into a typed field.
fn parse_field(field_type: &str, value: &str) -> Result<GffField> {
    let bad = || ALibError::InvalidPath(format!("{field_type}={value}"));

    Ok(match field_type.to_ascii_lowercase().as_str() {
        "u8" | "byte" => GffField::U8(value.parse()?),
        "i8" | "char" => GffField::I8(value.parse()?),
        "u16" | "word" => GffField::U16(value.parse()?),
        "i16" | "short" => GffField::I16(value.parse()?),
        "u32" | "dword" => GffField::U32(value.parse()?),
        "i32" | "int" => GffField::I32(value.parse()?),
        "u64" | "dword64" => GffField::U64(value.parse()?),
        "i64" | "int64" => GffField::I64(value.parse()?),
        "f32" | "float" => GffField::F32(value.parse()?),
        "f64" | "double" => GffField::F64(value.parse()?),
        "string" | "exostring" => GffField::String(value.to_owned()),
        "resref" => GffField::ResRef(ResRef::new(value)?),
        "locstring" | "exolocstring" => {

            // A numeric value is a StrRef; anything else is inline english text.
            match value.parse::<StrRef>() {
                Ok(strref) => GffField::LocalizedString(LocalizedString::new(strref)),
                Err(_) => {
                    let mut locstring = LocalizedString::new(-1);
                    locstring.set(0, 0, value);
                    GffField::LocalizedString(locstring)
                }
            }
        }
        "vector3" | "position" => {
            let components = parse_floats::<3>(value).ok_or_else(bad)?;
            GffField::Vector3(components)
        }
        "vector4" | "orientation" => {
            let components = parse_floats::<4>(value).ok_or_else(bad)?;
            GffField::Vector4(components)
        }
        _ => return Err(bad()),
    })
}

/// This function parses a whitespace-separated fixed-size float list.
fn parse_floats<const N: usize>(value: &str) -> Option<[f32; N]> {
    let parsed = value.split_whitespace()
        .map(|token| token.parse().ok())
        .collect::<Option<Vec<f32>>>()?;
    parsed.try_into().ok()
}

/// This function overwrites a field in place, parsing the value as the
/// field's existing type.
fn overwrite_field(field: &mut GffField, value: &str) -> Result<()> {
    let new_field = match &*field {
        GffField::LocalizedString(old) => {

            // Numeric values only retarget the StrRef, keeping the substrings.
            let mut locstring = old.clone();
            match value.parse::<StrRef>() {
                Ok(strref) => { locstring.set_stringref(strref); }
                Err(_) => locstring.set(0, 0, value),
            }
            GffField::LocalizedString(locstring)
        }
        _ => parse_field(field.type_name(), value)?,
    };
    *field = new_field;

    Ok(())
}

/// This function renders a field's value back to text, for memory captures.
fn render_field(field: &GffField) -> String {
    match field {
        GffField::U8(value) => value.to_string(),
        GffField::I8(value) => value.to_string(),
        GffField::U16(value) => value.to_string(),
        GffField::I16(value) => value.to_string(),
        GffField::U32(value) => value.to_string(),
        GffField::I32(value) => value.to_string(),
        GffField::U64(value) => value.to_string(),
        GffField::I64(value) => value.to_string(),
        GffField::F32(value) => value.to_string(),
        GffField::F64(value) => value.to_string(),
        GffField::String(value) => value.to_owned(),
        GffField::ResRef(value) => value.to_string(),
        GffField::LocalizedString(value) => value.stringref().to_string(),
        _ => String::new(),
    }
}

impl GffOp {

    /// This function applies the operation to a decoded GFF, resolving memory
    /// tokens in values and recording the declared captures.
    pub fn apply(&self, gff: &mut Gff, memory: &mut PatchMemory, file: &str) -> Result<()> {
        match self {
            Self::AddField { path, label, field_type, value, stores } => {
                let value = memory.substitute(value, file)?;
                let field = parse_field(field_type, &value)?;
                let rendered = render_field(&field);

                let segments = path_segments(path);
                let target = descend(gff.root_mut(), &segments, path)?;
                target.insert(label, field)?;

                for slot in stores {
                    memory.store_twoda(*slot, rendered.to_owned());
                }
                Ok(())
            }

            Self::ModifyField { path, value, stores } => {
                let value = memory.substitute(value, file)?;
                let (parent, leaf) = split_leaf(path)?;
                let target = descend(gff.root_mut(), &parent, path)?;
                let field = target.field_mut(leaf)
                    .ok_or_else(|| ALibError::InvalidPath(path.to_owned()))?;

                overwrite_field(field, &value)?;
                let rendered = render_field(field);

                for slot in stores {
                    memory.store_twoda(*slot, rendered.to_owned());
                }
                Ok(())
            }

            Self::AddList { path, label } => {
                let segments = path_segments(path);
                let target = descend(gff.root_mut(), &segments, path)?;
                target.insert(label, GffField::List(vec![]))
            }

            Self::AddStruct { path, struct_id, fields } => {
                let mut new_struct = GffStruct::new(*struct_id);
                for (label, field_type, value) in fields {
                    let value = memory.substitute(value, file)?;
                    new_struct.insert(label, parse_field(field_type, &value)?)?;
                }

                let (parent, leaf) = split_leaf(path)?;
                let target = descend(gff.root_mut(), &parent, path)?;
                match target.field_mut(leaf) {
                    Some(GffField::List(children)) => {
                        children.push(new_struct);
                        Ok(())
                    }
                    _ => Err(ALibError::InvalidPath(path.to_owned())),
                }
            }

            Self::Delete { path } => {
                let (parent, leaf) = split_leaf(path)?;
                let target = descend(gff.root_mut(), &parent, path)?;
                target.remove(leaf)
                    .map(|_| ())
                    .ok_or_else(|| ALibError::InvalidPath(path.to_owned()))
            }
        }
    }
}

/// This function splits a path into his segments, dropping empties.
fn path_segments(path: &str) -> Vec<&str> {
    path.split('/').filter(|segment| !segment.is_empty()).collect()
}
