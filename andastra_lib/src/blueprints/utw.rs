//---------------------------------------------------------------------------//
// Copyright (c) 2024-2026 The Andastra project contributors. All rights reserved.
//
// This file is part of the Andastra project,
// which can be found here: https://github.com/andastra-project/andastra.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/andastra-project/andastra/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! UTW blueprints describe waypoints: named markers scripts and map notes
//! hang off.

use getset::{Getters, MutGetters, Setters};

use crate::error::Result;
use crate::files::ResRef;
use crate::files::gff::{Gff, GffField, LocalizedString};

use super::Blueprint;

/// A waypoint blueprint.
#[derive(Clone, Debug, Default, PartialEq, Getters, MutGetters, Setters)]
#[getset(get = "pub", get_mut = "pub", set = "pub")]
pub struct Utw {
    resref: ResRef,
    tag: String,
    name: LocalizedString,
    description: LocalizedString,

    /// Row of the waypoint appearance table.
    appearance: u8,

    /// Map note attached to the waypoint.
    has_map_note: bool,
    map_note: LocalizedString,
    map_note_enabled: bool,

    /// Tag of the object the waypoint tracks, for linked waypoints.
    linked_to: String,

    /// Toolset comment. Deprecated, only written on demand.
    comment: String,

    /// Legacy palette id. Deprecated, only written on demand.
    palette_id: u8,
}

impl Blueprint for Utw {

    const SIGNATURE: &'static str = "UTW ";

    fn construct(gff: &Gff) -> Result<Self> {
        let root = gff.root();

        Ok(Self {
            resref: root.resref_or_default("TemplateResRef"),
            tag: root.string_or_default("Tag"),
            name: root.locstring_or_default("LocalizedName"),
            description: root.locstring_or_default("Description"),
            appearance: root.u8_or("Appearance", 0),
            has_map_note: root.u8_or("HasMapNote", 0) != 0,
            map_note: root.locstring_or_default("MapNote"),
            map_note_enabled: root.u8_or("MapNoteEnabled", 0) != 0,
            linked_to: root.string_or_default("LinkedTo"),
            comment: root.string_or_default("Comment"),
            palette_id: root.u8_or("PaletteID", 0),
        })
    }

    fn dismantle(&self, use_deprecated: bool) -> Result<Gff> {
        let mut gff = Gff::new(Self::SIGNATURE);
        let root = gff.root_mut();

        root.insert("TemplateResRef", GffField::ResRef(self.resref.clone()))?;
        root.insert("Tag", GffField::String(self.tag.to_owned()))?;
        root.insert("LocalizedName", GffField::LocalizedString(self.name.clone()))?;
        root.insert("Description", GffField::LocalizedString(self.description.clone()))?;
        root.insert("Appearance", GffField::U8(self.appearance))?;
        root.insert("HasMapNote", GffField::U8(self.has_map_note as u8))?;
        root.insert("MapNote", GffField::LocalizedString(self.map_note.clone()))?;
        root.insert("MapNoteEnabled", GffField::U8(self.map_note_enabled as u8))?;
        root.insert("LinkedTo", GffField::String(self.linked_to.to_owned()))?;

        if use_deprecated {
            root.insert("PaletteID", GffField::U8(self.palette_id))?;
            root.insert("Comment", GffField::String(self.comment.to_owned()))?;
        }

        Ok(gff)
    }
}
