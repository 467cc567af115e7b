//---------------------------------------------------------------------------//
// Copyright (c) 2024-2026 The Andastra project contributors. All rights reserved.
//
// This file is part of the Andastra project,
// which can be found here: https://github.com/andastra-project/andastra.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/andastra-project/andastra/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! JRL files are the quest journal: categories (quests) holding the numbered
//! entries the player unlocks as a quest progresses.

use getset::{Getters, MutGetters, Setters};

use crate::error::Result;
use crate::files::gff::{Gff, GffField, GffStruct, LocalizedString};

use super::Blueprint;

/// Struct id the engine uses for journal structs.
const JOURNAL_STRUCT_ID: i32 = 0;

/// The journal of a game.
#[derive(Clone, Debug, Default, PartialEq, Getters, MutGetters, Setters)]
#[getset(get = "pub", get_mut = "pub", set = "pub")]
pub struct Jrl {

    /// The quests of the journal.
    quests: Vec<JrlQuest>,
}

/// One quest of the journal.
#[derive(Clone, Debug, Default, PartialEq, Getters, MutGetters, Setters)]
#[getset(get = "pub", get_mut = "pub", set = "pub")]
pub struct JrlQuest {

    /// Display name of the quest.
    name: LocalizedString,

    /// Script tag quests are referenced by from scripts.
    tag: String,

    /// Planet the quest belongs to, for the K2 grouping UI.
    planet_id: i32,

    /// Sorting index inside the planet group.
    plot_index: i32,

    /// Priority bucket of the quest.
    priority: u32,

    /// The numbered states of the quest.
    entries: Vec<JrlEntry>,

    /// Toolset comment. Deprecated, only written on demand.
    comment: String,
}

/// One unlockable state of a quest.
#[derive(Clone, Debug, Default, PartialEq, Getters, Setters)]
#[getset(get = "pub", set = "pub")]
pub struct JrlEntry {

    /// Id scripts set the quest to to unlock this entry.
    id: u32,

    /// If reaching this entry closes the quest.
    end: bool,

    /// The journal text shown for the entry.
    text: LocalizedString,

    /// Experience awarded when the entry unlocks.
    xp_percentage: f32,
}

impl Blueprint for Jrl {

    const SIGNATURE: &'static str = "JRL ";

    fn construct(gff: &Gff) -> Result<Self> {
        let root = gff.root();

        let quests = root.list_or_default("Categories")
            .iter()
            .map(|category| JrlQuest {
                name: category.locstring_or_default("Name"),
                tag: category.string_or_default("Tag"),
                planet_id: category.i32_or("PlanetID", -1),
                plot_index: category.i32_or("PlotIndex", -1),
                priority: category.u32_or("Priority", 0),
                entries: category.list_or_default("EntryList")
                    .iter()
                    .map(|entry| JrlEntry {
                        id: entry.u32_or("ID", 0),
                        end: entry.u16_or("End", 0) != 0,
                        text: entry.locstring_or_default("Text"),
                        xp_percentage: entry.f32_or("XP_Percentage", 0.0),
                    })
                    .collect(),
                comment: category.string_or_default("Comment"),
            })
            .collect();

        Ok(Self {
            quests,
        })
    }

    fn dismantle(&self, use_deprecated: bool) -> Result<Gff> {
        let mut gff = Gff::new(Self::SIGNATURE);

        let categories = self.quests.iter()
            .map(|quest| {
                let mut category = GffStruct::new(JOURNAL_STRUCT_ID);
                category.insert("Name", GffField::LocalizedString(quest.name.clone()))?;
                category.insert("Tag", GffField::String(quest.tag.to_owned()))?;
                category.insert("PlanetID", GffField::I32(quest.planet_id))?;
                category.insert("PlotIndex", GffField::I32(quest.plot_index))?;
                category.insert("Priority", GffField::U32(quest.priority))?;

                let entries = quest.entries.iter()
                    .map(|entry| {
                        let mut entry_struct = GffStruct::new(JOURNAL_STRUCT_ID);
                        entry_struct.insert("ID", GffField::U32(entry.id))?;
                        entry_struct.insert("End", GffField::U16(entry.end as u16))?;
                        entry_struct.insert("Text", GffField::LocalizedString(entry.text.clone()))?;
                        entry_struct.insert("XP_Percentage", GffField::F32(entry.xp_percentage))?;
                        Ok(entry_struct)
                    })
                    .collect::<Result<Vec<_>>>()?;
                category.insert("EntryList", GffField::List(entries))?;

                if use_deprecated {
                    category.insert("Comment", GffField::String(quest.comment.to_owned()))?;
                }
                Ok(category)
            })
            .collect::<Result<Vec<_>>>()?;

        gff.root_mut().insert("Categories", GffField::List(categories))?;
        Ok(gff)
    }
}
