//---------------------------------------------------------------------------//
// Copyright (c) 2024-2026 The Andastra project contributors. All rights reserved.
//
// This file is part of the Andastra project,
// which can be found here: https://github.com/andastra-project/andastra.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/andastra-project/andastra/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! Typed projections of the GFF blueprints the engines load game objects from.
//!
//! Each blueprint type pairs two operations:
//!
//! * `construct`: read a decoded [`Gff`] into a typed value, filling missing
//!   fields with the engine's documented defaults.
//! * `dismantle`: build a fresh [`Gff`] back from the typed value.
//!
//! Bit-packed flag bytes are exploded into named booleans on `construct` and
//! repacked on `dismantle`. Deprecated toolset fields (`ID`, `Comment`,
//! palette ids) are always tolerated on read, but only written when the
//! caller asks for them.
//!
//! | Blueprint | Signature | Object              |
//! | --------- | --------- | ------------------- |
//! | [`Utm`]   | `UTM `    | Merchant            |
//! | [`Utc`]   | `UTC `    | Creature            |
//! | [`Ute`]   | `UTE `    | Encounter           |
//! | [`Uti`]   | `UTI `    | Item                |
//! | [`Utd`]   | `UTD `    | Door                |
//! | [`Utp`]   | `UTP `    | Placeable           |
//! | [`Utt`]   | `UTT `    | Trigger             |
//! | [`Uts`]   | `UTS `    | Sound emitter       |
//! | [`Utw`]   | `UTW `    | Waypoint            |
//! | [`Dlg`]   | `DLG `    | Dialog              |
//! | [`Jrl`]   | `JRL `    | Journal             |
//! | [`Pth`]   | `PTH `    | Path                |
//! | [`Are`]   | `ARE `    | Area properties     |
//! | [`Git`]   | `GIT `    | Area layout         |
//! | [`Ifo`]   | `IFO `    | Module info         |
//! | [`Fac`]   | `FAC `    | Faction table       |

use crate::error::Result;
use crate::files::gff::Gff;

pub mod are;
pub mod dlg;
pub mod fac;
pub mod git;
pub mod ifo;
pub mod jrl;
pub mod pth;
pub mod utc;
pub mod utd;
pub mod ute;
pub mod uti;
pub mod utm;
pub mod utp;
pub mod uts;
pub mod utt;
pub mod utw;

#[cfg(test)] mod blueprints_test;

pub use self::are::Are;
pub use self::dlg::Dlg;
pub use self::fac::Fac;
pub use self::git::Git;
pub use self::ifo::Ifo;
pub use self::jrl::Jrl;
pub use self::pth::Pth;
pub use self::utc::Utc;
pub use self::utd::Utd;
pub use self::ute::Ute;
pub use self::uti::Uti;
pub use self::utm::Utm;
pub use self::utp::Utp;
pub use self::uts::Uts;
pub use self::utt::Utt;
pub use self::utw::Utw;

/// The operations every blueprint projection provides.
pub trait Blueprint: Sized {

    /// Signature the blueprint's GFF files carry.
    const SIGNATURE: &'static str;

    /// This function reads a decoded GFF into the typed blueprint, applying
    /// engine defaults for missing fields.
    fn construct(gff: &Gff) -> Result<Self>;

    /// This function builds a fresh GFF from the typed blueprint.
    ///
    /// `use_deprecated` also writes the legacy toolset fields modern files omit.
    fn dismantle(&self, use_deprecated: bool) -> Result<Gff>;
}
