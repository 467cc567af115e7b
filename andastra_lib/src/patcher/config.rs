//---------------------------------------------------------------------------//
// Copyright (c) 2024-2026 The Andastra project contributors. All rights reserved.
//
// This file is part of the Andastra project,
// which can be found here: https://github.com/andastra-project/andastra.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/andastra-project/andastra/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! The declarative patch configuration: an INI-shaped document with one list
//! section per file kind, and one section per file/operation.
//!
//! ```ini
//! [TLKList]
//! Append0=hello
//! [hello]
//! Text=Hello
//! StrRef5=
//!
//! [2DAList]
//! Table0=baseitems.2da
//! [baseitems.2da]
//! ChangeRow0=cheap_blasters
//! [cheap_blasters]
//! RowLabel=blaster_pistol
//! cost=100
//! Store2DAMemory3=RowIndex
//!
//! [GFFList]
//! File0=merchant01.utm
//! [merchant01.utm]
//! Replace=1
//! ModifyField0=markup
//! [markup]
//! Path=MarkUp
//! Value=25
//! ```
//!
//! Sections and keys keep declaration order; operations against one file run
//! in the order their keys appear, and later values overwrite earlier ones.
//! Configs are tolerated in WINDOWS-1252, as the legacy tools wrote them.
//!
//! Well-known option keys per file section: `!Destination` (`override`, the
//! default, or `modules\<archive>`), `!SourceFile`, `Replace`,
//! `SkipIfNotReplace`. In 2DA operation sections, `RowIndex`/`RowLabel`/
//! `MatchColumn`+`MatchValue` select the target row, `NewRowLabel` names an
//! added/copied row, `Store2DAMemory<n>` captures into memory, and every
//! other key is a `column=value` assignment. `AddColumn` sections use
//! `ColumnLabel`, `DefaultValue`, and `I<index>`/`L<label>` per-row
//! assignments. `AddStruct` sections list fields as `Field<n>=label|type|value`.

use encoding_rs::WINDOWS_1252;

use crate::error::{ALibError, Result};
use crate::files::StrRef;
use crate::files::ssf::SsfSound;

use super::{ChangeSet, Destination, FilePatch, PatchAction};
use super::gff_ops::GffOp;
use super::ssf_ops::SsfOp;
use super::tlk_ops::TlkOp;
use super::twoda_ops::{RowSelector, StoreSource, TwoDAOp};

//---------------------------------------------------------------------------//
//                              INI document
//---------------------------------------------------------------------------//

/// One section of an INI document, with his keys in declaration order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct IniSection {
    name: String,
    entries: Vec<(String, String)>,
}

/// A parsed INI document, with his sections in declaration order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct IniDocument {
    sections: Vec<IniSection>,
}

impl IniSection {

    /// This function returns the name of the section.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// This function returns the entries of the section, in declaration order.
    pub fn entries(&self) -> &[(String, String)] {
        &self.entries
    }

    /// This function returns the value under the provided key, matched
    /// case-insensitively.
    pub fn value(&self, key: &str) -> Option<&str> {
        self.entries.iter()
            .find(|(known, _)| known.eq_ignore_ascii_case(key))
            .map(|(_, value)| &**value)
    }

    /// This function parses a boolean option, defaulting when absent.
    fn bool_option(&self, key: &str, default: bool) -> bool {
        self.value(key)
            .and_then(|value| crate::utils::parse_str_as_bool(value).ok())
            .unwrap_or(default)
    }
}

impl IniDocument {

    /// This function parses an INI document from raw bytes.
    ///
    /// Text decodes as UTF-8 when valid, WINDOWS-1252 otherwise. Lines
    /// starting with `;` are comments. Keys before any section header are
    /// collected under an unnamed section.
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        let text = match std::str::from_utf8(bytes) {
            Ok(text) => text.to_owned(),
            Err(_) => WINDOWS_1252.decode(bytes).0.to_string(),
        };

        let mut document = Self::default();
        let mut current = IniSection::default();

        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with(';') {
                continue;
            }

            if let Some(name) = line.strip_prefix('[').and_then(|line| line.strip_suffix(']')) {
                if !current.name.is_empty() || !current.entries.is_empty() {
                    document.sections.push(std::mem::take(&mut current));
                }
                current.name = name.trim().to_owned();
                continue;
            }

            match line.split_once('=') {
                Some((key, value)) => current.entries.push((key.trim().to_owned(), value.trim().to_owned())),
                None => return Err(ALibError::MalformedChangeSet(format!("line without '=': \"{line}\""))),
            }
        }

        if !current.name.is_empty() || !current.entries.is_empty() {
            document.sections.push(current);
        }

        Ok(document)
    }

    /// This function returns every section, in declaration order.
    pub fn sections(&self) -> &[IniSection] {
        &self.sections
    }

    /// This function returns the section under the provided name, matched
    /// case-insensitively.
    pub fn section(&self, name: &str) -> Option<&IniSection> {
        self.sections.iter().find(|section| section.name.eq_ignore_ascii_case(name))
    }

    /// This function returns a section an entry points at, or a malformed-set error.
    fn required_section(&self, name: &str) -> Result<&IniSection> {
        self.section(name)
            .ok_or_else(|| ALibError::MalformedChangeSet(format!("missing section [{name}]")))
    }
}

//---------------------------------------------------------------------------//
//                           Change set parsing
//---------------------------------------------------------------------------//

/// Keys with special meaning inside 2DA operation sections.
const TWODA_RESERVED_KEYS: [&str; 5] = ["RowIndex", "RowLabel", "MatchColumn", "MatchValue", "NewRowLabel"];

/// This function strips a numbered-key prefix: `Append12` matches `Append`.
fn numbered_key<'a>(key: &'a str, prefix: &str) -> bool {
    key.len() > prefix.len()
        && key[..prefix.len()].eq_ignore_ascii_case(prefix)
        && key[prefix.len()..].bytes().all(|byte| byte.is_ascii_digit())
}

/// This function parses the slot of a `Store2DAMemory<n>` / `StrRef<n>` key.
fn capture_slot(key: &str, prefix: &str) -> Option<usize> {
    if numbered_key(key, prefix) {
        key[prefix.len()..].parse().ok()
    } else {
        None
    }
}

/// This function reads the file-level options of a section.
fn file_options(section: Option<&IniSection>) -> (Destination, Option<String>, bool, bool) {
    let Some(section) = section else {
        return (Destination::Override, None, false, false);
    };

    let destination = match section.value("!Destination") {
        Some(value) if value.to_ascii_lowercase().starts_with("modules") => {
            let archive = value[7..].trim_start_matches(['\\', '/']).to_owned();
            Destination::Modules(archive)
        }
        _ => Destination::Override,
    };

    let source_file = section.value("!SourceFile").map(|value| value.to_owned());
    let replace = section.bool_option("Replace", false);
    let skip_if_not_replace = section.bool_option("SkipIfNotReplace", false);

    (destination, source_file, replace, skip_if_not_replace)
}

/// This function reads the row selector of a 2DA operation section.
fn row_selector(section: &IniSection) -> Result<RowSelector> {
    if let Some(index) = section.value("RowIndex") {
        return Ok(RowSelector::Index(index.parse()?));
    }
    if let Some(label) = section.value("RowLabel") {
        return Ok(RowSelector::Label(label.to_owned()));
    }
    if let (Some(column), Some(value)) = (section.value("MatchColumn"), section.value("MatchValue")) {
        return Ok(RowSelector::CellEquals(column.to_owned(), value.to_owned()));
    }

    Err(ALibError::MalformedChangeSet(format!("section [{}] declares no row selector", section.name())))
}

/// This function reads the `column=value` assignments and memory captures of
/// a 2DA operation section.
fn twoda_values(section: &IniSection) -> (Vec<(String, String)>, Vec<(usize, StoreSource)>) {
    let mut values = vec![];
    let mut stores = vec![];

    for (key, value) in section.entries() {
        if let Some(slot) = capture_slot(key, "Store2DAMemory") {
            let source = match value.as_str() {
                "RowIndex" => StoreSource::RowIndex,
                "RowLabel" => StoreSource::RowLabel,
                column => StoreSource::Column(column.to_owned()),
            };
            stores.push((slot, source));
        } else if !TWODA_RESERVED_KEYS.iter().any(|reserved| reserved.eq_ignore_ascii_case(key)) {
            values.push((key.to_owned(), value.to_owned()));
        }
    }

    (values, stores)
}

/// This function parses one 2DA operation section.
fn twoda_op(document: &IniDocument, kind: &str, section_name: &str) -> Result<TwoDAOp> {
    let section = document.required_section(section_name)?;

    if kind.eq_ignore_ascii_case("AddColumn") {
        let header = section.value("ColumnLabel")
            .ok_or_else(|| ALibError::MalformedChangeSet(format!("[{section_name}] misses ColumnLabel")))?
            .to_owned();
        let default = section.value("DefaultValue").unwrap_or_default().to_owned();

        let mut values = vec![];
        for (key, value) in section.entries() {
            if let Some(index) = key.strip_prefix('I').and_then(|index| index.parse().ok()) {
                values.push((RowSelector::Index(index), value.to_owned()));
            } else if let Some(label) = key.strip_prefix('L') {
                values.push((RowSelector::Label(label.to_owned()), value.to_owned()));
            }
        }

        return Ok(TwoDAOp::AddColumn { header, default, values });
    }

    let (values, stores) = twoda_values(section);
    let label = section.value("NewRowLabel").map(|label| label.to_owned());

    if kind.eq_ignore_ascii_case("ChangeRow") {
        Ok(TwoDAOp::ChangeRow { selector: row_selector(section)?, values, stores })
    } else if kind.eq_ignore_ascii_case("AddRow") {
        Ok(TwoDAOp::AddRow { label, values, stores })
    } else if kind.eq_ignore_ascii_case("CopyRow") {
        Ok(TwoDAOp::CopyRow { selector: row_selector(section)?, label, values, stores })
    } else {
        Err(ALibError::MalformedChangeSet(format!("unknown 2DA operation \"{kind}\"")))
    }
}

/// This function parses one GFF operation section.
fn gff_op(document: &IniDocument, kind: &str, section_name: &str) -> Result<GffOp> {
    let section = document.required_section(section_name)?;
    let path = section.value("Path").unwrap_or_default().to_owned();

    let stores = section.entries().iter()
        .filter_map(|(key, _)| capture_slot(key, "Store2DAMemory"))
        .collect::<Vec<_>>();

    if kind.eq_ignore_ascii_case("AddField") {
        Ok(GffOp::AddField {
            path,
            label: section.value("Label").unwrap_or_default().to_owned(),
            field_type: section.value("FieldType").unwrap_or_default().to_owned(),
            value: section.value("Value").unwrap_or_default().to_owned(),
            stores,
        })
    } else if kind.eq_ignore_ascii_case("ModifyField") {
        Ok(GffOp::ModifyField {
            path,
            value: section.value("Value").unwrap_or_default().to_owned(),
            stores,
        })
    } else if kind.eq_ignore_ascii_case("AddList") {
        Ok(GffOp::AddList {
            path,
            label: section.value("Label").unwrap_or_default().to_owned(),
        })
    } else if kind.eq_ignore_ascii_case("AddStruct") {
        let struct_id = section.value("StructId").unwrap_or("0").parse()?;
        let mut fields = vec![];
        for (key, value) in section.entries() {
            if numbered_key(key, "Field") {
                let mut parts = value.splitn(3, '|');
                let label = parts.next().unwrap_or_default().to_owned();
                let field_type = parts.next().unwrap_or_default().to_owned();
                let field_value = parts.next().unwrap_or_default().to_owned();
                fields.push((label, field_type, field_value));
            }
        }
        Ok(GffOp::AddStruct { path, struct_id, fields })
    } else if kind.eq_ignore_ascii_case("Delete") {
        Ok(GffOp::Delete { path })
    } else {
        Err(ALibError::MalformedChangeSet(format!("unknown GFF operation \"{kind}\"")))
    }
}

impl ChangeSet {

    /// This function loads a change set from raw configuration bytes.
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        Self::from_ini(&IniDocument::parse(bytes)?)
    }

    /// This function builds a change set from a parsed INI document.
    ///
    /// File patches come out in execution order: talk table first (so the
    /// StrRef slots exist), then 2DA tables, GFFs, sound sets, compiled
    /// scripts, and verbatim installs.
    pub fn from_ini(document: &IniDocument) -> Result<Self> {
        let mut patches = vec![];

        // [TLKList]: appends and replacements against dialog.tlk.
        if let Some(list) = document.section("TLKList") {
            let mut ops = vec![];
            for (key, section_name) in list.entries() {
                let section = document.required_section(section_name)?;
                if numbered_key(key, "Append") {
                    let stores = section.entries().iter()
                        .filter_map(|(key, _)| capture_slot(key, "StrRef"))
                        .collect();
                    ops.push(TlkOp::Append {
                        text: section.value("Text").unwrap_or_default().to_owned(),
                        sound: section.value("Sound").unwrap_or_default().to_owned(),
                        stores,
                    });
                } else if numbered_key(key, "Replace") {
                    let strref: StrRef = section.value("StrRef")
                        .ok_or_else(|| ALibError::MalformedChangeSet(format!("[{section_name}] misses StrRef")))?
                        .parse()?;
                    ops.push(TlkOp::Replace {
                        strref,
                        text: section.value("Text").unwrap_or_default().to_owned(),
                        sound: section.value("Sound").unwrap_or_default().to_owned(),
                    });
                }
            }

            if !ops.is_empty() {
                patches.push(FilePatch {
                    file_name: "dialog.tlk".to_owned(),
                    source_file: None,
                    destination: Destination::Override,
                    replace: true,
                    skip_if_not_replace: false,
                    action: PatchAction::ModifyTlk(ops),
                });
            }
        }

        // [2DAList]: per-table operation lists.
        if let Some(list) = document.section("2DAList") {
            for (key, table_name) in list.entries() {
                if !numbered_key(key, "Table") {
                    continue;
                }

                let table_section = document.required_section(table_name)?;
                let (destination, source_file, replace, skip_if_not_replace) = file_options(Some(table_section));

                let mut ops = vec![];
                for (op_key, op_section) in table_section.entries() {
                    for kind in ["ChangeRow", "AddRow", "CopyRow", "AddColumn"] {
                        if numbered_key(op_key, kind) {
                            ops.push(twoda_op(document, kind, op_section)?);
                        }
                    }
                }

                patches.push(FilePatch {
                    file_name: table_name.to_owned(),
                    source_file,
                    destination,
                    replace,
                    skip_if_not_replace,
                    action: PatchAction::ModifyTwoDA(ops),
                });
            }
        }

        // [GFFList]: per-file operation lists.
        if let Some(list) = document.section("GFFList") {
            for (key, file_name) in list.entries() {
                if !numbered_key(key, "File") {
                    continue;
                }

                let file_section = document.required_section(file_name)?;
                let (destination, source_file, replace, skip_if_not_replace) = file_options(Some(file_section));

                let mut ops = vec![];
                for (op_key, op_section) in file_section.entries() {
                    for kind in ["AddField", "ModifyField", "AddList", "AddStruct", "Delete"] {
                        if numbered_key(op_key, kind) {
                            ops.push(gff_op(document, kind, op_section)?);
                        }
                    }
                }

                patches.push(FilePatch {
                    file_name: file_name.to_owned(),
                    source_file,
                    destination,
                    replace,
                    skip_if_not_replace,
                    action: PatchAction::ModifyGff(ops),
                });
            }
        }

        // [SSFList]: per-file slot assignments.
        if let Some(list) = document.section("SSFList") {
            for (key, file_name) in list.entries() {
                if !numbered_key(key, "File") {
                    continue;
                }

                let file_section = document.required_section(file_name)?;
                let (destination, source_file, replace, skip_if_not_replace) = file_options(Some(file_section));

                let mut ops = vec![];
                for (slot_label, value) in file_section.entries() {
                    if let Ok(slot) = SsfSound::from_label(slot_label) {
                        ops.push(SsfOp { slot, value: value.to_owned() });
                    }
                }

                patches.push(FilePatch {
                    file_name: file_name.to_owned(),
                    source_file,
                    destination,
                    replace,
                    skip_if_not_replace,
                    action: PatchAction::ModifySsf(ops),
                });
            }
        }

        // [CompileList]: scripts to token-substitute and compile.
        if let Some(list) = document.section("CompileList") {
            for (key, file_name) in list.entries() {
                if !numbered_key(key, "File") {
                    continue;
                }

                let (destination, source_file, replace, skip_if_not_replace) = file_options(document.section(file_name));
                patches.push(FilePatch {
                    file_name: file_name.to_owned(),
                    source_file,
                    destination,
                    replace,
                    skip_if_not_replace,
                    action: PatchAction::CompileScript,
                });
            }
        }

        // [InstallList]: files copied verbatim from the patch folder.
        if let Some(list) = document.section("InstallList") {
            for (key, file_name) in list.entries() {
                if !numbered_key(key, "File") {
                    continue;
                }

                let (destination, source_file, replace, skip_if_not_replace) = file_options(document.section(file_name));
                patches.push(FilePatch {
                    file_name: file_name.to_owned(),
                    source_file,
                    destination,
                    replace,
                    skip_if_not_replace,
                    action: PatchAction::InstallFile,
                });
            }
        }

        Ok(Self { patches })
    }
}
