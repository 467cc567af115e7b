//---------------------------------------------------------------------------//
// Copyright (c) 2024-2026 The Andastra project contributors. All rights reserved.
//
// This file is part of the Andastra project,
// which can be found here: https://github.com/andastra-project/andastra.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/andastra-project/andastra/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! IFO files describe a module: his entry point, time settings and the
//! module-level event scripts.
//!
//! Several field labels carry the original toolset's truncated spellings
//! (`Mod_OnAcquirItem`, `Mod_OnClientEntr`), which the engine expects verbatim.

use getset::{Getters, MutGetters, Setters};

use crate::error::Result;
use crate::files::ResRef;
use crate::files::gff::{Gff, GffField, LocalizedString};

use super::Blueprint;

/// A module info file.
#[derive(Clone, Debug, Default, PartialEq, Getters, MutGetters, Setters)]
#[getset(get = "pub", get_mut = "pub", set = "pub")]
pub struct Ifo {

    /// Display name and tag of the module.
    name: LocalizedString,
    tag: String,

    /// Area the party spawns into, and where inside it.
    entry_area: ResRef,
    entry_position: [f32; 3],
    entry_direction: [f32; 2],

    /// Clock settings.
    dawn_hour: u8,
    dusk_hour: u8,
    minutes_per_hour: u8,
    start_hour: u8,

    /// Voice-over folder id of the module.
    vo_id: String,

    /// Movie played when the module loads.
    start_movie: ResRef,

    /// Module-level event scripts.
    on_acquire_item: ResRef,
    on_activate_item: ResRef,
    on_client_enter: ResRef,
    on_client_leave: ResRef,
    on_heartbeat: ResRef,
    on_module_load: ResRef,
    on_player_death: ResRef,
    on_player_rest: ResRef,
    on_spawn_button: ResRef,
    on_user_defined: ResRef,
}

impl Blueprint for Ifo {

    const SIGNATURE: &'static str = "IFO ";

    fn construct(gff: &Gff) -> Result<Self> {
        let root = gff.root();

        Ok(Self {
            name: root.locstring_or_default("Mod_Name"),
            tag: root.string_or_default("Mod_Tag"),
            entry_area: root.resref_or_default("Mod_Entry_Area"),
            entry_position: [
                root.f32_or("Mod_Entry_X", 0.0),
                root.f32_or("Mod_Entry_Y", 0.0),
                root.f32_or("Mod_Entry_Z", 0.0),
            ],
            entry_direction: [
                root.f32_or("Mod_Entry_Dir_X", 0.0),
                root.f32_or("Mod_Entry_Dir_Y", 0.0),
            ],
            dawn_hour: root.u8_or("Mod_DawnHour", 6),
            dusk_hour: root.u8_or("Mod_DuskHour", 18),
            minutes_per_hour: root.u8_or("Mod_MinPerHour", 2),
            start_hour: root.u8_or("Mod_StartHour", 13),
            vo_id: root.string_or_default("Mod_VO_ID"),
            start_movie: root.resref_or_default("Mod_StartMovie"),
            on_acquire_item: root.resref_or_default("Mod_OnAcquirItem"),
            on_activate_item: root.resref_or_default("Mod_OnActvtItem"),
            on_client_enter: root.resref_or_default("Mod_OnClientEntr"),
            on_client_leave: root.resref_or_default("Mod_OnClientLeav"),
            on_heartbeat: root.resref_or_default("Mod_OnHeartbeat"),
            on_module_load: root.resref_or_default("Mod_OnModLoad"),
            on_player_death: root.resref_or_default("Mod_OnPlrDeath"),
            on_player_rest: root.resref_or_default("Mod_OnPlrRest"),
            on_spawn_button: root.resref_or_default("Mod_OnSpawnBtnDn"),
            on_user_defined: root.resref_or_default("Mod_OnUsrDefined"),
        })
    }

    fn dismantle(&self, _use_deprecated: bool) -> Result<Gff> {
        let mut gff = Gff::new(Self::SIGNATURE);
        let root = gff.root_mut();

        root.insert("Mod_Name", GffField::LocalizedString(self.name.clone()))?;
        root.insert("Mod_Tag", GffField::String(self.tag.to_owned()))?;
        root.insert("Mod_Entry_Area", GffField::ResRef(self.entry_area.clone()))?;
        root.insert("Mod_Entry_X", GffField::F32(self.entry_position[0]))?;
        root.insert("Mod_Entry_Y", GffField::F32(self.entry_position[1]))?;
        root.insert("Mod_Entry_Z", GffField::F32(self.entry_position[2]))?;
        root.insert("Mod_Entry_Dir_X", GffField::F32(self.entry_direction[0]))?;
        root.insert("Mod_Entry_Dir_Y", GffField::F32(self.entry_direction[1]))?;
        root.insert("Mod_DawnHour", GffField::U8(self.dawn_hour))?;
        root.insert("Mod_DuskHour", GffField::U8(self.dusk_hour))?;
        root.insert("Mod_MinPerHour", GffField::U8(self.minutes_per_hour))?;
        root.insert("Mod_StartHour", GffField::U8(self.start_hour))?;
        root.insert("Mod_VO_ID", GffField::String(self.vo_id.to_owned()))?;
        root.insert("Mod_StartMovie", GffField::ResRef(self.start_movie.clone()))?;
        root.insert("Mod_OnAcquirItem", GffField::ResRef(self.on_acquire_item.clone()))?;
        root.insert("Mod_OnActvtItem", GffField::ResRef(self.on_activate_item.clone()))?;
        root.insert("Mod_OnClientEntr", GffField::ResRef(self.on_client_enter.clone()))?;
        root.insert("Mod_OnClientLeav", GffField::ResRef(self.on_client_leave.clone()))?;
        root.insert("Mod_OnHeartbeat", GffField::ResRef(self.on_heartbeat.clone()))?;
        root.insert("Mod_OnModLoad", GffField::ResRef(self.on_module_load.clone()))?;
        root.insert("Mod_OnPlrDeath", GffField::ResRef(self.on_player_death.clone()))?;
        root.insert("Mod_OnPlrRest", GffField::ResRef(self.on_player_rest.clone()))?;
        root.insert("Mod_OnSpawnBtnDn", GffField::ResRef(self.on_spawn_button.clone()))?;
        root.insert("Mod_OnUsrDefined", GffField::ResRef(self.on_user_defined.clone()))?;

        Ok(gff)
    }
}
