//---------------------------------------------------------------------------//
// Copyright (c) 2024-2026 The Andastra project contributors. All rights reserved.
//
// This file is part of the Andastra project,
// which can be found here: https://github.com/andastra-project/andastra.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/andastra-project/andastra/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! UTC blueprints describe creatures: stats, class levels, scripts and looks.

use getset::{Getters, MutGetters, Setters};

use crate::error::Result;
use crate::files::ResRef;
use crate::files::gff::{Gff, GffField, GffStruct, LocalizedString};

use super::Blueprint;

/// Struct id the engine uses for class list entries.
const CLASS_STRUCT_ID: i32 = 2;

//---------------------------------------------------------------------------//
//                              Enum & Structs
//---------------------------------------------------------------------------//

/// A creature blueprint.
#[derive(Clone, Debug, Default, PartialEq, Getters, MutGetters, Setters)]
#[getset(get = "pub", get_mut = "pub", set = "pub")]
pub struct Utc {

    /// ResRef of the blueprint itself.
    resref: ResRef,

    /// Script tag of the creature.
    tag: String,

    /// First and last display names.
    first_name: LocalizedString,
    last_name: LocalizedString,

    /// Row of `appearance.2da` the creature's looks come from.
    appearance: u16,

    /// Faction the creature fights for.
    faction_id: u16,

    /// Hit point pools.
    hit_points: i16,
    current_hit_points: i16,
    max_hit_points: i16,

    /// Ability scores.
    strength: u8,
    dexterity: u8,
    constitution: u8,
    intelligence: u8,
    wisdom: u8,
    charisma: u8,

    /// Natural armor class bonus.
    natural_ac: u8,

    /// Dialog opened when the creature is talked to.
    conversation: ResRef,

    /// Sound set row of `soundset.2da`.
    soundset: u16,

    /// Gender and race rows.
    gender: u8,
    race: u8,

    /// If the creature can't drop below 1 HP.
    min_one_hp: bool,

    /// If the creature is plot-protected.
    plot: bool,

    /// If the creature's equipment can't be looted.
    no_perm_death: bool,

    /// Movement rate row.
    walk_rate: i32,

    /// Event scripts.
    on_spawn: ResRef,
    on_heartbeat: ResRef,
    on_death: ResRef,
    on_attacked: ResRef,
    on_damaged: ResRef,
    on_dialogue: ResRef,
    on_user_defined: ResRef,

    /// Class levels of the creature.
    classes: Vec<UtcClass>,

    /// Toolset comment. Deprecated, only written on demand.
    comment: String,

    /// Legacy palette id. Deprecated, only written on demand.
    palette_id: u8,
}

/// One class level block of a creature.
#[derive(Clone, Debug, Default, PartialEq, Getters, Setters)]
#[getset(get = "pub", set = "pub")]
pub struct UtcClass {

    /// Row of `classes.2da`.
    class: i32,

    /// Levels taken in the class.
    level: i16,
}

impl UtcClass {

    /// This function creates a new class block.
    pub fn new(class: i32, level: i16) -> Self {
        Self { class, level }
    }
}

//---------------------------------------------------------------------------//
//                         Implementation of Utc
//---------------------------------------------------------------------------//

impl Blueprint for Utc {

    const SIGNATURE: &'static str = "UTC ";

    fn construct(gff: &Gff) -> Result<Self> {
        let root = gff.root();

        let classes = root.list_or_default("ClassList")
            .iter()
            .map(|entry| UtcClass {
                class: entry.i32_or("Class", 0),
                level: entry.i16_or("ClassLevel", 1),
            })
            .collect();

        Ok(Self {
            resref: root.resref_or_default("TemplateResRef"),
            tag: root.string_or_default("Tag"),
            first_name: root.locstring_or_default("FirstName"),
            last_name: root.locstring_or_default("LastName"),
            appearance: root.u16_or("Appearance_Type", 0),
            faction_id: root.u16_or("FactionID", 0),
            hit_points: root.i16_or("HitPoints", 0),
            current_hit_points: root.i16_or("CurrentHitPoints", 0),
            max_hit_points: root.i16_or("MaxHitPoints", 0),
            strength: root.u8_or("Str", 8),
            dexterity: root.u8_or("Dex", 8),
            constitution: root.u8_or("Con", 8),
            intelligence: root.u8_or("Int", 8),
            wisdom: root.u8_or("Wis", 8),
            charisma: root.u8_or("Cha", 8),
            natural_ac: root.u8_or("NaturalAC", 0),
            conversation: root.resref_or_default("Conversation"),
            soundset: root.u16_or("SoundSetFile", 0),
            gender: root.u8_or("Gender", 0),
            race: root.u8_or("Race", 0),
            min_one_hp: root.u8_or("Min1HP", 0) != 0,
            plot: root.u8_or("Plot", 0) != 0,
            no_perm_death: root.u8_or("NoPermDeath", 0) != 0,
            walk_rate: root.i32_or("WalkRate", 7),
            on_spawn: root.resref_or_default("ScriptSpawn"),
            on_heartbeat: root.resref_or_default("ScriptHeartbeat"),
            on_death: root.resref_or_default("ScriptDeath"),
            on_attacked: root.resref_or_default("ScriptAttacked"),
            on_damaged: root.resref_or_default("ScriptDamaged"),
            on_dialogue: root.resref_or_default("ScriptDialogue"),
            on_user_defined: root.resref_or_default("ScriptUserDefine"),
            classes,
            comment: root.string_or_default("Comment"),
            palette_id: root.u8_or("PaletteID", 0),
        })
    }

    fn dismantle(&self, use_deprecated: bool) -> Result<Gff> {
        let mut gff = Gff::new(Self::SIGNATURE);
        let root = gff.root_mut();

        root.insert("TemplateResRef", GffField::ResRef(self.resref.clone()))?;
        root.insert("Tag", GffField::String(self.tag.to_owned()))?;
        root.insert("FirstName", GffField::LocalizedString(self.first_name.clone()))?;
        root.insert("LastName", GffField::LocalizedString(self.last_name.clone()))?;
        root.insert("Appearance_Type", GffField::U16(self.appearance))?;
        root.insert("FactionID", GffField::U16(self.faction_id))?;
        root.insert("HitPoints", GffField::I16(self.hit_points))?;
        root.insert("CurrentHitPoints", GffField::I16(self.current_hit_points))?;
        root.insert("MaxHitPoints", GffField::I16(self.max_hit_points))?;
        root.insert("Str", GffField::U8(self.strength))?;
        root.insert("Dex", GffField::U8(self.dexterity))?;
        root.insert("Con", GffField::U8(self.constitution))?;
        root.insert("Int", GffField::U8(self.intelligence))?;
        root.insert("Wis", GffField::U8(self.wisdom))?;
        root.insert("Cha", GffField::U8(self.charisma))?;
        root.insert("NaturalAC", GffField::U8(self.natural_ac))?;
        root.insert("Conversation", GffField::ResRef(self.conversation.clone()))?;
        root.insert("SoundSetFile", GffField::U16(self.soundset))?;
        root.insert("Gender", GffField::U8(self.gender))?;
        root.insert("Race", GffField::U8(self.race))?;
        root.insert("Min1HP", GffField::U8(self.min_one_hp as u8))?;
        root.insert("Plot", GffField::U8(self.plot as u8))?;
        root.insert("NoPermDeath", GffField::U8(self.no_perm_death as u8))?;
        root.insert("WalkRate", GffField::I32(self.walk_rate))?;
        root.insert("ScriptSpawn", GffField::ResRef(self.on_spawn.clone()))?;
        root.insert("ScriptHeartbeat", GffField::ResRef(self.on_heartbeat.clone()))?;
        root.insert("ScriptDeath", GffField::ResRef(self.on_death.clone()))?;
        root.insert("ScriptAttacked", GffField::ResRef(self.on_attacked.clone()))?;
        root.insert("ScriptDamaged", GffField::ResRef(self.on_damaged.clone()))?;
        root.insert("ScriptDialogue", GffField::ResRef(self.on_dialogue.clone()))?;
        root.insert("ScriptUserDefine", GffField::ResRef(self.on_user_defined.clone()))?;

        let classes = self.classes.iter()
            .map(|class| {
                let mut entry = GffStruct::new(CLASS_STRUCT_ID);
                entry.insert("Class", GffField::I32(class.class))?;
                entry.insert("ClassLevel", GffField::I16(class.level))?;
                Ok(entry)
            })
            .collect::<Result<Vec<_>>>()?;
        root.insert("ClassList", GffField::List(classes))?;

        if use_deprecated {
            root.insert("PaletteID", GffField::U8(self.palette_id))?;
            root.insert("Comment", GffField::String(self.comment.to_owned()))?;
        }

        Ok(gff)
    }
}
