//---------------------------------------------------------------------------//
// Copyright (c) 2024-2026 The Andastra project contributors. All rights reserved.
//
// This file is part of the Andastra project,
// which can be found here: https://github.com/andastra-project/andastra.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/andastra-project/andastra/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! UTE blueprints describe encounters: spawn areas that pour creatures on the
//! party when triggered.

use getset::{Getters, MutGetters, Setters};

use crate::error::Result;
use crate::files::ResRef;
use crate::files::gff::{Gff, GffField, GffStruct, LocalizedString};

use super::Blueprint;

/// Struct id the engine uses for creature list entries.
const CREATURE_STRUCT_ID: i32 = 0;

/// An encounter blueprint.
#[derive(Clone, Debug, Default, PartialEq, Getters, MutGetters, Setters)]
#[getset(get = "pub", get_mut = "pub", set = "pub")]
pub struct Ute {
    resref: ResRef,
    tag: String,
    name: LocalizedString,

    /// If the encounter starts armed.
    active: bool,

    /// Row of `encdifficulty.2da`.
    difficulty_index: i32,

    /// Faction the spawned creatures fight for.
    faction_id: u32,

    /// Most creatures the encounter may have alive at once.
    max_creatures: i32,

    /// Creatures the encounter tries to keep spawned.
    rec_creatures: i32,

    /// If only the player can trigger the encounter.
    player_only: bool,

    /// If the encounter re-arms itself, and after how long.
    reset: bool,
    reset_time: i32,

    /// Times the encounter may respawn. `-1` means forever.
    respawns: i32,

    /// If the encounter fires only once.
    single_shot: bool,

    /// Event scripts.
    on_entered: ResRef,
    on_exit: ResRef,
    on_exhausted: ResRef,
    on_heartbeat: ResRef,
    on_user_defined: ResRef,

    /// The creature table the encounter spawns from.
    creatures: Vec<UteCreature>,

    /// Toolset comment. Deprecated, only written on demand.
    comment: String,

    /// Legacy palette id. Deprecated, only written on demand.
    palette_id: u8,
}

/// One spawnable creature of an encounter.
#[derive(Clone, Debug, Default, PartialEq, Getters, Setters)]
#[getset(get = "pub", set = "pub")]
pub struct UteCreature {
    resref: ResRef,
    appearance: i32,
    challenge_rating: f32,
    single_spawn: bool,
}

impl Blueprint for Ute {

    const SIGNATURE: &'static str = "UTE ";

    fn construct(gff: &Gff) -> Result<Self> {
        let root = gff.root();

        let creatures = root.list_or_default("CreatureList")
            .iter()
            .map(|entry| UteCreature {
                resref: entry.resref_or_default("ResRef"),
                appearance: entry.i32_or("Appearance", 0),
                challenge_rating: entry.f32_or("CR", 0.0),
                single_spawn: entry.u8_or("SingleSpawn", 0) != 0,
            })
            .collect();

        Ok(Self {
            resref: root.resref_or_default("TemplateResRef"),
            tag: root.string_or_default("Tag"),
            name: root.locstring_or_default("LocalizedName"),
            active: root.u8_or("Active", 1) != 0,
            difficulty_index: root.i32_or("DifficultyIndex", 0),
            faction_id: root.u32_or("Faction", 0),
            max_creatures: root.i32_or("MaxCreatures", 1),
            rec_creatures: root.i32_or("RecCreatures", 1),
            player_only: root.u8_or("PlayerOnly", 0) != 0,
            reset: root.u8_or("Reset", 0) != 0,
            reset_time: root.i32_or("ResetTime", 32000),
            respawns: root.i32_or("Respawns", 0),
            single_shot: root.u8_or("SpawnOption", 0) != 0,
            on_entered: root.resref_or_default("OnEntered"),
            on_exit: root.resref_or_default("OnExit"),
            on_exhausted: root.resref_or_default("OnExhausted"),
            on_heartbeat: root.resref_or_default("OnHeartbeat"),
            on_user_defined: root.resref_or_default("OnUserDefined"),
            creatures,
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
        root.insert("Active", GffField::U8(self.active as u8))?;
        root.insert("DifficultyIndex", GffField::I32(self.difficulty_index))?;
        root.insert("Faction", GffField::U32(self.faction_id))?;
        root.insert("MaxCreatures", GffField::I32(self.max_creatures))?;
        root.insert("RecCreatures", GffField::I32(self.rec_creatures))?;
        root.insert("PlayerOnly", GffField::U8(self.player_only as u8))?;
        root.insert("Reset", GffField::U8(self.reset as u8))?;
        root.insert("ResetTime", GffField::I32(self.reset_time))?;
        root.insert("Respawns", GffField::I32(self.respawns))?;
        root.insert("SpawnOption", GffField::U8(self.single_shot as u8))?;
        root.insert("OnEntered", GffField::ResRef(self.on_entered.clone()))?;
        root.insert("OnExit", GffField::ResRef(self.on_exit.clone()))?;
        root.insert("OnExhausted", GffField::ResRef(self.on_exhausted.clone()))?;
        root.insert("OnHeartbeat", GffField::ResRef(self.on_heartbeat.clone()))?;
        root.insert("OnUserDefined", GffField::ResRef(self.on_user_defined.clone()))?;

        let creatures = self.creatures.iter()
            .map(|creature| {
                let mut entry = GffStruct::new(CREATURE_STRUCT_ID);
                entry.insert("ResRef", GffField::ResRef(creature.resref.clone()))?;
                entry.insert("Appearance", GffField::I32(creature.appearance))?;
                entry.insert("CR", GffField::F32(creature.challenge_rating))?;
                entry.insert("SingleSpawn", GffField::U8(creature.single_spawn as u8))?;
                Ok(entry)
            })
            .collect::<Result<Vec<_>>>()?;
        root.insert("CreatureList", GffField::List(creatures))?;

        if use_deprecated {
            root.insert("PaletteID", GffField::U8(self.palette_id))?;
            root.insert("Comment", GffField::String(self.comment.to_owned()))?;
        }

        Ok(gff)
    }
}
