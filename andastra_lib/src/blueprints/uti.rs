//---------------------------------------------------------------------------//
// Copyright (c) 2024-2026 The Andastra project contributors. All rights reserved.
//
// This file is part of the Andastra project,
// which can be found here: https://github.com/andastra-project/andastra.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/andastra-project/andastra/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! UTI blueprints describe items: their base type, cost, charges and the
//! property list that makes a vibrosword more than a stick.

use getset::{Getters, MutGetters, Setters};

use crate::error::Result;
use crate::files::ResRef;
use crate::files::gff::{Gff, GffField, GffStruct, LocalizedString};

use super::Blueprint;

/// Struct id the engine uses for property list entries.
const PROPERTY_STRUCT_ID: i32 = 0;

/// An item blueprint.
#[derive(Clone, Debug, Default, PartialEq, Getters, MutGetters, Setters)]
#[getset(get = "pub", get_mut = "pub", set = "pub")]
pub struct Uti {
    resref: ResRef,
    tag: String,
    name: LocalizedString,
    description: LocalizedString,
    description_identified: LocalizedString,

    /// Row of `baseitems.2da`.
    base_item: i32,

    /// Base cost and additional enchantment cost, in credits.
    cost: u32,
    add_cost: u32,

    /// Charges left, for chargeable items.
    charges: u8,

    /// How many of the item a single inventory slot holds.
    stack_size: u16,

    /// If the item is plot-protected.
    plot: bool,

    /// If the item's properties are known to the player.
    identified: bool,

    /// If the item is flagged as stolen.
    stolen: bool,

    /// Body/texture variation rows.
    model_variation: u8,
    texture_variation: u8,

    /// Upgrade slot mask.
    upgrade_level: u8,

    /// The property list of the item.
    properties: Vec<UtiProperty>,

    /// Toolset comment. Deprecated, only written on demand.
    comment: String,

    /// Legacy palette id. Deprecated, only written on demand.
    palette_id: u8,
}

/// One property block of an item.
#[derive(Clone, Debug, Default, PartialEq, Getters, Setters)]
#[getset(get = "pub", set = "pub")]
pub struct UtiProperty {
    property_name: u16,
    subtype: u16,
    cost_table: u8,
    cost_value: u16,
    param1: u8,
    param1_value: u8,
}

impl Blueprint for Uti {

    const SIGNATURE: &'static str = "UTI ";

    fn construct(gff: &Gff) -> Result<Self> {
        let root = gff.root();

        let properties = root.list_or_default("PropertiesList")
            .iter()
            .map(|entry| UtiProperty {
                property_name: entry.u16_or("PropertyName", 0),
                subtype: entry.u16_or("Subtype", 0),
                cost_table: entry.u8_or("CostTable", 0),
                cost_value: entry.u16_or("CostValue", 0),
                param1: entry.u8_or("Param1", 0xFF),
                param1_value: entry.u8_or("Param1Value", 0),
            })
            .collect();

        Ok(Self {
            resref: root.resref_or_default("TemplateResRef"),
            tag: root.string_or_default("Tag"),
            name: root.locstring_or_default("LocalizedName"),
            description: root.locstring_or_default("Description"),
            description_identified: root.locstring_or_default("DescIdentified"),
            base_item: root.i32_or("BaseItem", 0),
            cost: root.u32_or("Cost", 0),
            add_cost: root.u32_or("AddCost", 0),
            charges: root.u8_or("Charges", 0),
            stack_size: root.u16_or("StackSize", 1),
            plot: root.u8_or("Plot", 0) != 0,
            identified: root.u8_or("Identified", 1) != 0,
            stolen: root.u8_or("Stolen", 0) != 0,
            model_variation: root.u8_or("ModelVariation", 1),
            texture_variation: root.u8_or("TextureVar", 1),
            upgrade_level: root.u8_or("UpgradeLevel", 0),
            properties,
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
        root.insert("DescIdentified", GffField::LocalizedString(self.description_identified.clone()))?;
        root.insert("BaseItem", GffField::I32(self.base_item))?;
        root.insert("Cost", GffField::U32(self.cost))?;
        root.insert("AddCost", GffField::U32(self.add_cost))?;
        root.insert("Charges", GffField::U8(self.charges))?;
        root.insert("StackSize", GffField::U16(self.stack_size))?;
        root.insert("Plot", GffField::U8(self.plot as u8))?;
        root.insert("Identified", GffField::U8(self.identified as u8))?;
        root.insert("Stolen", GffField::U8(self.stolen as u8))?;
        root.insert("ModelVariation", GffField::U8(self.model_variation))?;
        root.insert("TextureVar", GffField::U8(self.texture_variation))?;
        root.insert("UpgradeLevel", GffField::U8(self.upgrade_level))?;

        let properties = self.properties.iter()
            .map(|property| {
                let mut entry = GffStruct::new(PROPERTY_STRUCT_ID);
                entry.insert("PropertyName", GffField::U16(property.property_name))?;
                entry.insert("Subtype", GffField::U16(property.subtype))?;
                entry.insert("CostTable", GffField::U8(property.cost_table))?;
                entry.insert("CostValue", GffField::U16(property.cost_value))?;
                entry.insert("Param1", GffField::U8(property.param1))?;
                entry.insert("Param1Value", GffField::U8(property.param1_value))?;
                Ok(entry)
            })
            .collect::<Result<Vec<_>>>()?;
        root.insert("PropertiesList", GffField::List(properties))?;

        if use_deprecated {
            root.insert("PaletteID", GffField::U8(self.palette_id))?;
            root.insert("Comment", GffField::String(self.comment.to_owned()))?;
        }

        Ok(gff)
    }
}
