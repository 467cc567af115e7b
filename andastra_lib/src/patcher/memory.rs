//---------------------------------------------------------------------------//
// Copyright (c) 2024-2026 The Andastra project contributors. All rights reserved.
//
// This file is part of the Andastra project,
// which can be found here: https://github.com/andastra-project/andastra.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/andastra-project/andastra/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! The per-run memory tables: `2DAMEMORY` slots holding strings (usually row
//! labels or indices) and `StrRef` slots holding talk-table references.
//!
//! Operations store into the tables as they run; later operations reference
//! them through `#2DAMEMORY<n>#` and `#StrRef<n>#` tokens in any textual
//! value. Tables live for one patch run and are dropped at his end.

use regex::{Captures, Regex};

use std::collections::HashMap;

use crate::error::{ALibError, Result};
use crate::files::StrRef;

//---------------------------------------------------------------------------//
//                              Enum & Structs
//---------------------------------------------------------------------------//

/// The memory tables of one patch run.
#[derive(Debug)]
pub struct PatchMemory {

    /// `2DAMEMORY<n>` slots.
    twoda: HashMap<usize, String>,

    /// `StrRef<n>` slots.
    strref: HashMap<usize, StrRef>,

    /// Matcher for both token families.
    token_pattern: Regex,
}

impl Default for PatchMemory {
    fn default() -> Self {
        Self::new()
    }
}

impl PatchMemory {

    /// This function creates a new empty pair of memory tables.
    pub fn new() -> Self {
        Self {
            twoda: HashMap::new(),
            strref: HashMap::new(),

            // The pattern is fixed, so this can't fail.
            token_pattern: Regex::new(r"#(2DAMEMORY|StrRef)(\d+)#").unwrap(),
        }
    }

    /// This function stores a string into a `2DAMEMORY` slot.
    pub fn store_twoda(&mut self, slot: usize, value: String) {
        self.twoda.insert(slot, value);
    }

    /// This function stores a talk-table reference into a `StrRef` slot.
    pub fn store_strref(&mut self, slot: usize, value: StrRef) {
        self.strref.insert(slot, value);
    }

    /// This function returns the value of a `2DAMEMORY` slot, if an earlier
    /// operation stored one.
    pub fn twoda(&self, slot: usize) -> Option<&str> {
        self.twoda.get(&slot).map(|value| &**value)
    }

    /// This function returns the value of a `StrRef` slot, if an earlier
    /// operation stored one.
    pub fn strref(&self, slot: usize) -> Option<StrRef> {
        self.strref.get(&slot).copied()
    }

    /// This function replaces every memory token in the provided text.
    ///
    /// A token referencing a slot no earlier operation stored fails the file
    /// with [`ALibError::UndefinedMemoryToken`].
    pub fn substitute(&self, text: &str, file: &str) -> Result<String> {
        // Fast path: most values carry no token at all.
        if !text.contains('#') {
            return Ok(text.to_owned());
        }

        let mut missing: Option<ALibError> = None;
        let substituted = self.token_pattern.replace_all(text, |captures: &Captures| {
            let slot: usize = captures[2].parse().unwrap_or(usize::MAX);
            let value = match &captures[1] {
                "2DAMEMORY" => self.twoda(slot).map(|value| value.to_owned()),
                _ => self.strref(slot).map(|value| value.to_string()),
            };

            match value {
                Some(value) => value,
                None => {
                    let kind = if &captures[1] == "2DAMEMORY" { "2DAMEMORY" } else { "StrRef" };
                    missing.get_or_insert(ALibError::UndefinedMemoryToken(kind, slot, file.to_owned()));
                    String::new()
                }
            }
        });

        match missing {
            Some(error) => Err(error),
            None => Ok(substituted.to_string()),
        }
    }
}
