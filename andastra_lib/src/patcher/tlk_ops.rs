//---------------------------------------------------------------------------//
// Copyright (c) 2024-2026 The Andastra project contributors. All rights reserved.
//
// This file is part of the Andastra project,
// which can be found here: https://github.com/andastra-project/andastra.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/andastra-project/andastra/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! The talk-table operations of the patch engine: appends and replacements.
//!
//! An append records his assigned StrRef into the declared `StrRef<n>` memory
//! slots, so later 2DA/GFF/SSF operations can reference the new string.

use crate::error::Result;
use crate::files::{ResRef, StrRef};
use crate::files::tlk::{Tlk, TlkEntry, TlkEntryFlags};

use super::memory::PatchMemory;

//---------------------------------------------------------------------------//
//                              Enum & Structs
//---------------------------------------------------------------------------//

/// One talk-table operation.
#[derive(Clone, Debug, PartialEq)]
pub enum TlkOp {

    /// Append a new entry at the end of the table.
    Append {
        text: String,
        sound: String,
        stores: Vec<usize>,
    },

    /// Replace an existing entry.
    Replace {
        strref: StrRef,
        text: String,
        sound: String,
    },
}

//---------------------------------------------------------------------------//
//                             Implementations
//---------------------------------------------------------------------------//

/// This function builds a table entry from patch values.
fn build_entry(text: &str, sound: &str) -> Result<TlkEntry> {
    let mut entry = TlkEntry::with_text(text);
    if !sound.is_empty() {
        entry.set_sound(ResRef::new(sound)?);
        entry.set_flags(TlkEntryFlags::TEXT | TlkEntryFlags::SOUND);
    }

    Ok(entry)
}

impl TlkOp {

    /// This function applies the operation to a talk table, resolving memory
    /// tokens in the text and recording the declared captures.
    pub fn apply(&self, tlk: &mut Tlk, memory: &mut PatchMemory, file: &str) -> Result<()> {
        match self {
            Self::Append { text, sound, stores } => {
                let text = memory.substitute(text, file)?;
                let strref = tlk.append(build_entry(&text, sound)?);

                for slot in stores {
                    memory.store_strref(*slot, strref);
                }
                Ok(())
            }

            Self::Replace { strref, text, sound } => {
                let text = memory.substitute(text, file)?;
                tlk.replace(*strref, build_entry(&text, sound)?)
            }
        }
    }
}
