//---------------------------------------------------------------------------//
// Copyright (c) 2024-2026 The Andastra project contributors. All rights reserved.
//
// This file is part of the Andastra project,
// which can be found here: https://github.com/andastra-project/andastra.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/andastra-project/andastra/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! UTP blueprints describe placeables: containers, workbenches, corpses and
//! every other usable piece of furniture.

use getset::{Getters, MutGetters, Setters};

use crate::error::Result;
use crate::files::ResRef;
use crate::files::gff::{Gff, GffField, GffStruct, LocalizedString};

use super::Blueprint;

/// Struct id the engine uses for stored item entries.
const ITEM_STRUCT_ID: i32 = 0;

/// A placeable blueprint.
#[derive(Clone, Debug, Default, PartialEq, Getters, MutGetters, Setters)]
#[getset(get = "pub", get_mut = "pub", set = "pub")]
pub struct Utp {
    resref: ResRef,
    tag: String,
    name: LocalizedString,

    /// Row of `placeables.2da`.
    appearance: u32,

    /// If the placeable can be interacted with at all.
    useable: bool,

    /// If the placeable opens an inventory when used.
    has_inventory: bool,

    /// Lock state.
    locked: bool,
    lockable: bool,
    open_lock_dc: u8,
    key_required: bool,
    key_name: String,

    /// Durability.
    hit_points: i16,
    current_hp: i16,
    hardness: u8,
    fortitude: u8,

    /// If the placeable can't be destroyed.
    plot: bool,
    is_static: bool,

    /// Party member the placeable belongs to, for party-puzzle placeables.
    party_interact: bool,

    /// Dialog opened when the placeable is used.
    conversation: ResRef,

    /// Event scripts.
    on_closed: ResRef,
    on_damaged: ResRef,
    on_death: ResRef,
    on_inv_disturbed: ResRef,
    on_lock: ResRef,
    on_melee_attacked: ResRef,
    on_open: ResRef,
    on_unlock: ResRef,
    on_used: ResRef,
    on_user_defined: ResRef,

    /// Items stored inside, for containers.
    items: Vec<UtpItem>,

    /// Toolset comment. Deprecated, only written on demand.
    comment: String,

    /// Legacy palette id. Deprecated, only written on demand.
    palette_id: u8,
}

/// One stored item of a container placeable.
#[derive(Clone, Debug, Default, PartialEq, Getters, Setters)]
#[getset(get = "pub", set = "pub")]
pub struct UtpItem {
    resref: ResRef,
}

impl Blueprint for Utp {

    const SIGNATURE: &'static str = "UTP ";

    fn construct(gff: &Gff) -> Result<Self> {
        let root = gff.root();

        let items = root.list_or_default("ItemList")
            .iter()
            .map(|entry| UtpItem {
                resref: entry.resref_or_default("InventoryRes"),
            })
            .collect();

        Ok(Self {
            resref: root.resref_or_default("TemplateResRef"),
            tag: root.string_or_default("Tag"),
            name: root.locstring_or_default("LocName"),
            appearance: root.u32_or("Appearance", 0),
            useable: root.u8_or("Useable", 1) != 0,
            has_inventory: root.u8_or("HasInventory", 0) != 0,
            locked: root.u8_or("Locked", 0) != 0,
            lockable: root.u8_or("Lockable", 0) != 0,
            open_lock_dc: root.u8_or("OpenLockDC", 0),
            key_required: root.u8_or("KeyRequired", 0) != 0,
            key_name: root.string_or_default("KeyName"),
            hit_points: root.i16_or("HP", 0),
            current_hp: root.i16_or("CurrentHP", 0),
            hardness: root.u8_or("Hardness", 0),
            fortitude: root.u8_or("Fort", 0),
            plot: root.u8_or("Plot", 0) != 0,
            is_static: root.u8_or("Static", 0) != 0,
            party_interact: root.u8_or("PartyInteract", 0) != 0,
            conversation: root.resref_or_default("Conversation"),
            on_closed: root.resref_or_default("OnClosed"),
            on_damaged: root.resref_or_default("OnDamaged"),
            on_death: root.resref_or_default("OnDeath"),
            on_inv_disturbed: root.resref_or_default("OnInvDisturbed"),
            on_lock: root.resref_or_default("OnLock"),
            on_melee_attacked: root.resref_or_default("OnMeleeAttacked"),
            on_open: root.resref_or_default("OnOpen"),
            on_unlock: root.resref_or_default("OnUnlock"),
            on_used: root.resref_or_default("OnUsed"),
            on_user_defined: root.resref_or_default("OnUserDefined"),
            items,
            comment: root.string_or_default("Comment"),
            palette_id: root.u8_or("PaletteID", 0),
        })
    }

    fn dismantle(&self, use_deprecated: bool) -> Result<Gff> {
        let mut gff = Gff::new(Self::SIGNATURE);
        let root = gff.root_mut();

        root.insert("TemplateResRef", GffField::ResRef(self.resref.clone()))?;
        root.insert("Tag", GffField::String(self.tag.to_owned()))?;
        root.insert("LocName", GffField::LocalizedString(self.name.clone()))?;
        root.insert("Appearance", GffField::U32(self.appearance))?;
        root.insert("Useable", GffField::U8(self.useable as u8))?;
        root.insert("HasInventory", GffField::U8(self.has_inventory as u8))?;
        root.insert("Locked", GffField::U8(self.locked as u8))?;
        root.insert("Lockable", GffField::U8(self.lockable as u8))?;
        root.insert("OpenLockDC", GffField::U8(self.open_lock_dc))?;
        root.insert("KeyRequired", GffField::U8(self.key_required as u8))?;
        root.insert("KeyName", GffField::String(self.key_name.to_owned()))?;
        root.insert("HP", GffField::I16(self.hit_points))?;
        root.insert("CurrentHP", GffField::I16(self.current_hp))?;
        root.insert("Hardness", GffField::U8(self.hardness))?;
        root.insert("Fort", GffField::U8(self.fortitude))?;
        root.insert("Plot", GffField::U8(self.plot as u8))?;
        root.insert("Static", GffField::U8(self.is_static as u8))?;
        root.insert("PartyInteract", GffField::U8(self.party_interact as u8))?;
        root.insert("Conversation", GffField::ResRef(self.conversation.clone()))?;
        root.insert("OnClosed", GffField::ResRef(self.on_closed.clone()))?;
        root.insert("OnDamaged", GffField::ResRef(self.on_damaged.clone()))?;
        root.insert("OnDeath", GffField::ResRef(self.on_death.clone()))?;
        root.insert("OnInvDisturbed", GffField::ResRef(self.on_inv_disturbed.clone()))?;
        root.insert("OnLock", GffField::ResRef(self.on_lock.clone()))?;
        root.insert("OnMeleeAttacked", GffField::ResRef(self.on_melee_attacked.clone()))?;
        root.insert("OnOpen", GffField::ResRef(self.on_open.clone()))?;
        root.insert("OnUnlock", GffField::ResRef(self.on_unlock.clone()))?;
        root.insert("OnUsed", GffField::ResRef(self.on_used.clone()))?;
        root.insert("OnUserDefined", GffField::ResRef(self.on_user_defined.clone()))?;

        let items = self.items.iter()
            .map(|item| {
                let mut entry = GffStruct::new(ITEM_STRUCT_ID);
                entry.insert("InventoryRes", GffField::ResRef(item.resref.clone()))?;
                Ok(entry)
            })
            .collect::<Result<Vec<_>>>()?;
        root.insert("ItemList", GffField::List(items))?;

        if use_deprecated {
            root.insert("PaletteID", GffField::U8(self.palette_id))?;
            root.insert("Comment", GffField::String(self.comment.to_owned()))?;
        }

        Ok(gff)
    }
}
