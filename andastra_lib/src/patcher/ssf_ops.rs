//---------------------------------------------------------------------------//
// Copyright (c) 2024-2026 The Andastra project contributors. All rights reserved.
//
// This file is part of the Andastra project,
// which can be found here: https://github.com/andastra-project/andastra.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/andastra-project/andastra/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! The sound-set operations of the patch engine: per-slot StrRef assignments.

use crate::error::Result;
use crate::files::StrRef;
use crate::files::ssf::{Ssf, SsfSound};

use super::memory::PatchMemory;

//---------------------------------------------------------------------------//
//                              Enum & Structs
//---------------------------------------------------------------------------//

/// One sound-set operation: point a slot at a StrRef.
///
/// The value is textual so it can carry a `#StrRef<n>#` token referencing a
/// string appended earlier in the run.
#[derive(Clone, Debug, PartialEq)]
pub struct SsfOp {
    pub slot: SsfSound,
    pub value: String,
}

//---------------------------------------------------------------------------//
//                             Implementations
//---------------------------------------------------------------------------//

impl SsfOp {

    /// This function applies the operation to a sound set, resolving memory
    /// tokens in the value.
    pub fn apply(&self, ssf: &mut Ssf, memory: &PatchMemory, file: &str) -> Result<()> {
        let value = memory.substitute(&self.value, file)?;
        let strref: StrRef = value.trim().parse()?;
        ssf.set_sound(self.slot, strref);

        Ok(())
    }
}
