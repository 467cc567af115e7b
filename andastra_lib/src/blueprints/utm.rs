//---------------------------------------------------------------------------//
// Copyright (c) 2024-2026 The Andastra project contributors. All rights reserved.
//
// This file is part of the Andastra project,
// which can be found here: https://github.com/andastra-project/andastra.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/andastra-project/andastra/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! UTM blueprints describe merchants: their prices, their stock, and the
//! script run when their store opens.

use getset::{Getters, MutGetters, Setters};

use crate::error::Result;
use crate::files::ResRef;
use crate::files::gff::{Gff, GffField, GffStruct, LocalizedString};

use super::Blueprint;

/// Struct id the engine uses for item list entries.
const ITEM_STRUCT_ID: i32 = 0;

//---------------------------------------------------------------------------//
//                              Enum & Structs
//---------------------------------------------------------------------------//

/// A merchant blueprint.
#[derive(Clone, Debug, Default, PartialEq, Getters, MutGetters, Setters)]
#[getset(get = "pub", get_mut = "pub", set = "pub")]
pub struct Utm {

    /// ResRef of the blueprint itself.
    resref: ResRef,

    /// Script tag of the merchant.
    tag: String,

    /// Display name of the store.
    name: LocalizedString,

    /// Percentage added on top of an item's cost when the store sells it.
    mark_up: i32,

    /// Percentage of an item's cost the store pays when buying it.
    mark_down: i32,

    /// Gold the store holds. `-1` means unlimited.
    store_gold: i32,

    /// Price the store charges to identify an item.
    identify_price: i32,

    /// Most gold the store pays for a single item. `-1` means no cap.
    max_buy_price: i32,

    /// Script run when the store opens.
    on_open_store: ResRef,

    /// If the store buys from the player. Bit 0 of `BuySellFlag`.
    can_buy: bool,

    /// If the store sells to the player. Bit 1 of `BuySellFlag`.
    can_sell: bool,

    /// The stock of the store.
    items: Vec<UtmItem>,

    /// Toolset comment. Deprecated, only written on demand.
    comment: String,

    /// Legacy palette id. Deprecated, only written on demand.
    palette_id: u8,
}

/// One stocked item of a merchant.
#[derive(Clone, Debug, Default, PartialEq, Getters, Setters)]
#[getset(get = "pub", set = "pub")]
pub struct UtmItem {

    /// Blueprint of the stocked item.
    resref: ResRef,

    /// If the store restocks the item forever.
    infinite: bool,

    /// Position of the item in the store UI grid.
    repos_x: u16,
    repos_y: u16,
}

//---------------------------------------------------------------------------//
//                         Implementation of Utm
//---------------------------------------------------------------------------//

impl Blueprint for Utm {

    const SIGNATURE: &'static str = "UTM ";

    fn construct(gff: &Gff) -> Result<Self> {
        let root = gff.root();

        let buy_sell_flag = root.u8_or("BuySellFlag", 0);
        let items = root.list_or_default("ItemList")
            .iter()
            .map(|entry| UtmItem {
                resref: entry.resref_or_default("InventoryRes"),
                infinite: entry.u8_or("Infinite", 0) != 0,
                repos_x: entry.u16_or("Repos_PosX", 0),
                repos_y: entry.u16_or("Repos_Posy", 0),
            })
            .collect();

        Ok(Self {
            resref: root.resref_or_default("ResRef"),
            tag: root.string_or_default("Tag"),
            name: root.locstring_or_default("LocName"),
            mark_up: root.i32_or("MarkUp", 0),
            mark_down: root.i32_or("MarkDown", 0),
            store_gold: root.i32_or("StoreGold", -1),
            identify_price: root.i32_or("IdentifyPrice", 100),
            max_buy_price: root.i32_or("MaxBuyPrice", -1),
            on_open_store: root.resref_or_default("OnOpenStore"),
            can_buy: buy_sell_flag & 0x01 != 0,
            can_sell: buy_sell_flag & 0x02 != 0,
            items,
            comment: root.string_or_default("Comment"),
            palette_id: root.u8_or("ID", 0),
        })
    }

    fn dismantle(&self, use_deprecated: bool) -> Result<Gff> {
        let mut gff = Gff::new(Self::SIGNATURE);
        let root = gff.root_mut();

        root.insert("ResRef", GffField::ResRef(self.resref.clone()))?;
        root.insert("LocName", GffField::LocalizedString(self.name.clone()))?;
        root.insert("Tag", GffField::String(self.tag.to_owned()))?;
        root.insert("MarkUp", GffField::I32(self.mark_up))?;
        root.insert("MarkDown", GffField::I32(self.mark_down))?;
        root.insert("StoreGold", GffField::I32(self.store_gold))?;
        root.insert("IdentifyPrice", GffField::I32(self.identify_price))?;
        root.insert("MaxBuyPrice", GffField::I32(self.max_buy_price))?;
        root.insert("OnOpenStore", GffField::ResRef(self.on_open_store.clone()))?;

        let buy_sell_flag = (self.can_buy as u8) | ((self.can_sell as u8) << 1);
        root.insert("BuySellFlag", GffField::U8(buy_sell_flag))?;

        let items = self.items.iter()
            .map(|item| {
                let mut entry = GffStruct::new(ITEM_STRUCT_ID);
                entry.insert("InventoryRes", GffField::ResRef(item.resref.clone()))?;
                entry.insert("Repos_PosX", GffField::U16(item.repos_x))?;
                entry.insert("Repos_Posy", GffField::U16(item.repos_y))?;
                entry.insert("Infinite", GffField::U8(item.infinite as u8))?;
                Ok(entry)
            })
            .collect::<Result<Vec<_>>>()?;
        root.insert("ItemList", GffField::List(items))?;

        if use_deprecated {
            root.insert("ID", GffField::U8(self.palette_id))?;
            root.insert("Comment", GffField::String(self.comment.to_owned()))?;
        }

        Ok(gff)
    }
}
