//---------------------------------------------------------------------------//
// Copyright (c) 2024-2026 The Andastra project contributors. All rights reserved.
//
// This file is part of the Andastra project,
// which can be found here: https://github.com/andastra-project/andastra.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/andastra-project/andastra/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! UTT blueprints describe triggers: invisible floor areas firing scripts or
//! traps when walked over.

use getset::{Getters, MutGetters, Setters};

use crate::error::Result;
use crate::files::ResRef;
use crate::files::gff::{Gff, GffField, LocalizedString};

use super::Blueprint;

/// A trigger blueprint.
#[derive(Clone, Debug, Default, PartialEq, Getters, MutGetters, Setters)]
#[getset(get = "pub", get_mut = "pub", set = "pub")]
pub struct Utt {
    resref: ResRef,
    tag: String,
    name: LocalizedString,

    /// Faction the trigger's trap counts as.
    faction_id: u32,

    /// Mouse cursor shown over the trigger.
    cursor: u8,

    /// Trigger kind: generic, transition or trap.
    trigger_type: i32,

    /// Trap behaviour.
    is_trap: bool,
    trap_detectable: bool,
    trap_detect_dc: u8,
    trap_disarmable: bool,
    trap_disarm_dc: u8,
    trap_one_shot: bool,
    trap_type: u8,

    /// Key tag that bypasses the trap.
    key_name: String,

    /// If only the player fires the trigger.
    auto_remove_key: bool,

    /// Event scripts.
    on_click: ResRef,
    on_disarm: ResRef,
    on_entered: ResRef,
    on_exit: ResRef,
    on_heartbeat: ResRef,
    on_trap_triggered: ResRef,
    on_user_defined: ResRef,

    /// Toolset comment. Deprecated, only written on demand.
    comment: String,

    /// Legacy palette id. Deprecated, only written on demand.
    palette_id: u8,
}

impl Blueprint for Utt {

    const SIGNATURE: &'static str = "UTT ";

    fn construct(gff: &Gff) -> Result<Self> {
        let root = gff.root();

        Ok(Self {
            resref: root.resref_or_default("TemplateResRef"),
            tag: root.string_or_default("Tag"),
            name: root.locstring_or_default("LocalizedName"),
            faction_id: root.u32_or("Faction", 0),
            cursor: root.u8_or("Cursor", 0),
            trigger_type: root.i32_or("Type", 0),
            is_trap: root.u8_or("TrapFlag", 0) != 0,
            trap_detectable: root.u8_or("TrapDetectable", 1) != 0,
            trap_detect_dc: root.u8_or("TrapDetectDC", 0),
            trap_disarmable: root.u8_or("TrapDisarmable", 1) != 0,
            trap_disarm_dc: root.u8_or("DisarmDC", 15),
            trap_one_shot: root.u8_or("TrapOneShot", 1) != 0,
            trap_type: root.u8_or("TrapType", 0),
            key_name: root.string_or_default("KeyName"),
            auto_remove_key: root.u8_or("AutoRemoveKey", 0) != 0,
            on_click: root.resref_or_default("OnClick"),
            on_disarm: root.resref_or_default("OnDisarm"),
            on_entered: root.resref_or_default("ScriptOnEnter"),
            on_exit: root.resref_or_default("ScriptOnExit"),
            on_heartbeat: root.resref_or_default("ScriptHeartbeat"),
            on_trap_triggered: root.resref_or_default("OnTrapTriggered"),
            on_user_defined: root.resref_or_default("ScriptUserDefine"),
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
        root.insert("Faction", GffField::U32(self.faction_id))?;
        root.insert("Cursor", GffField::U8(self.cursor))?;
        root.insert("Type", GffField::I32(self.trigger_type))?;
        root.insert("TrapFlag", GffField::U8(self.is_trap as u8))?;
        root.insert("TrapDetectable", GffField::U8(self.trap_detectable as u8))?;
        root.insert("TrapDetectDC", GffField::U8(self.trap_detect_dc))?;
        root.insert("TrapDisarmable", GffField::U8(self.trap_disarmable as u8))?;
        root.insert("DisarmDC", GffField::U8(self.trap_disarm_dc))?;
        root.insert("TrapOneShot", GffField::U8(self.trap_one_shot as u8))?;
        root.insert("TrapType", GffField::U8(self.trap_type))?;
        root.insert("KeyName", GffField::String(self.key_name.to_owned()))?;
        root.insert("AutoRemoveKey", GffField::U8(self.auto_remove_key as u8))?;
        root.insert("OnClick", GffField::ResRef(self.on_click.clone()))?;
        root.insert("OnDisarm", GffField::ResRef(self.on_disarm.clone()))?;
        root.insert("ScriptOnEnter", GffField::ResRef(self.on_entered.clone()))?;
        root.insert("ScriptOnExit", GffField::ResRef(self.on_exit.clone()))?;
        root.insert("ScriptHeartbeat", GffField::ResRef(self.on_heartbeat.clone()))?;
        root.insert("OnTrapTriggered", GffField::ResRef(self.on_trap_triggered.clone()))?;
        root.insert("ScriptUserDefine", GffField::ResRef(self.on_user_defined.clone()))?;

        if use_deprecated {
            root.insert("PaletteID", GffField::U8(self.palette_id))?;
            root.insert("Comment", GffField::String(self.comment.to_owned()))?;
        }

        Ok(gff)
    }
}
