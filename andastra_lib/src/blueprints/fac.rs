//---------------------------------------------------------------------------//
// Copyright (c) 2024-2026 The Andastra project contributors. All rights reserved.
//
// This file is part of the Andastra project,
// which can be found here: https://github.com/andastra-project/andastra.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/andastra-project/andastra/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! FAC files describe the faction table: who exists, and how much everyone
//! likes everyone else.

use getset::{Getters, MutGetters, Setters};

use crate::error::Result;
use crate::files::gff::{Gff, GffField, GffStruct};

use super::Blueprint;

/// Struct id the engine uses for faction structs.
const FACTION_STRUCT_ID: i32 = 0;

/// A faction table.
#[derive(Clone, Debug, Default, PartialEq, Getters, MutGetters, Setters)]
#[getset(get = "pub", get_mut = "pub", set = "pub")]
pub struct Fac {

    /// The factions, indexed by position.
    factions: Vec<Faction>,

    /// The pairwise reputation records.
    reputations: Vec<Reputation>,
}

/// One faction.
#[derive(Clone, Debug, Default, PartialEq, Getters, Setters)]
#[getset(get = "pub", set = "pub")]
pub struct Faction {

    /// Display label of the faction.
    label: String,

    /// If reputation changes apply globally or per-area.
    global: bool,

    /// Index of the parent faction. `0xFFFFFFFF` for roots.
    parent_id: u32,
}

/// How much faction 1 likes faction 2, 0-100.
#[derive(Clone, Copy, Debug, Default, PartialEq, Getters, Setters)]
#[getset(get = "pub", set = "pub")]
pub struct Reputation {
    faction_id1: u32,
    faction_id2: u32,
    reputation: u32,
}

impl Blueprint for Fac {

    const SIGNATURE: &'static str = "FAC ";

    fn construct(gff: &Gff) -> Result<Self> {
        let root = gff.root();

        let factions = root.list_or_default("FactionList")
            .iter()
            .map(|entry| Faction {
                label: entry.string_or_default("FactionName"),
                global: entry.u16_or("FactionGlobal", 1) != 0,
                parent_id: entry.u32_or("FactionParentID", 0xFFFF_FFFF),
            })
            .collect();

        let reputations = root.list_or_default("RepList")
            .iter()
            .map(|entry| Reputation {
                faction_id1: entry.u32_or("FactionID1", 0),
                faction_id2: entry.u32_or("FactionID2", 0),
                reputation: entry.u32_or("FactionRep", 50),
            })
            .collect();

        Ok(Self {
            factions,
            reputations,
        })
    }

    fn dismantle(&self, _use_deprecated: bool) -> Result<Gff> {
        let mut gff = Gff::new(Self::SIGNATURE);
        let root = gff.root_mut();

        let factions = self.factions.iter()
            .map(|faction| {
                let mut entry = GffStruct::new(FACTION_STRUCT_ID);
                entry.insert("FactionParentID", GffField::U32(faction.parent_id))?;
                entry.insert("FactionName", GffField::String(faction.label.to_owned()))?;
                entry.insert("FactionGlobal", GffField::U16(faction.global as u16))?;
                Ok(entry)
            })
            .collect::<Result<Vec<_>>>()?;
        root.insert("FactionList", GffField::List(factions))?;

        let reputations = self.reputations.iter()
            .map(|reputation| {
                let mut entry = GffStruct::new(FACTION_STRUCT_ID);
                entry.insert("FactionID1", GffField::U32(reputation.faction_id1))?;
                entry.insert("FactionID2", GffField::U32(reputation.faction_id2))?;
                entry.insert("FactionRep", GffField::U32(reputation.reputation))?;
                Ok(entry)
            })
            .collect::<Result<Vec<_>>>()?;
        root.insert("RepList", GffField::List(reputations))?;

        Ok(gff)
    }
}
