//---------------------------------------------------------------------------//
// Copyright (c) 2024-2026 The Andastra project contributors. All rights reserved.
//
// This file is part of the Andastra project,
// which can be found here: https://github.com/andastra-project/andastra.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/andastra-project/andastra/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! DLG files describe conversations: NPC entries and player replies, linked
//! into a graph by index lists.
//!
//! The on-disk shape keeps entries and replies in two flat lists; links point
//! into the opposite list by index, so the graph may share nodes freely
//! without the container ever becoming cyclic.

use getset::{Getters, MutGetters, Setters};

use crate::error::Result;
use crate::files::ResRef;
use crate::files::gff::{Gff, GffField, GffStruct, LocalizedString};

use super::Blueprint;

/// Struct id the engine uses for dialog nodes and links.
const NODE_STRUCT_ID: i32 = 0;

//---------------------------------------------------------------------------//
//                              Enum & Structs
//---------------------------------------------------------------------------//

/// A conversation file.
#[derive(Clone, Debug, Default, PartialEq, Getters, MutGetters, Setters)]
#[getset(get = "pub", get_mut = "pub", set = "pub")]
pub struct Dlg {

    /// Camera delays, in seconds.
    delay_entry: u32,
    delay_reply: u32,

    /// Word count of the whole conversation, for VO budgeting.
    word_count: u32,

    /// Scripts run when the conversation ends.
    on_abort: ResRef,
    on_end: ResRef,

    /// If the player may skip lines.
    skippable: bool,

    /// Ambient-track override while the conversation runs.
    ambient_track: ResRef,

    /// Camera model used for cutscene angles.
    camera_model: ResRef,

    /// NPC lines.
    entries: Vec<DlgNode>,

    /// Player lines.
    replies: Vec<DlgNode>,

    /// Links into `entries` the conversation may start from, in priority order.
    starters: Vec<DlgLink>,
}

/// One line of a conversation, either side.
#[derive(Clone, Debug, Default, PartialEq, Getters, MutGetters, Setters)]
#[getset(get = "pub", get_mut = "pub", set = "pub")]
pub struct DlgNode {

    /// Tag of the creature speaking the line. Empty means the owner.
    speaker: String,

    /// The spoken text.
    text: LocalizedString,

    /// Script fired when the line plays.
    script: ResRef,

    /// VO resource of the line.
    vo_resref: ResRef,

    /// Camera angle id.
    camera_angle: u32,

    /// Delay before the line plays. `0xFFFFFFFF` means default.
    delay: u32,

    /// Links to the opposite list.
    links: Vec<DlgLink>,

    /// Toolset comment. Deprecated, only written on demand.
    comment: String,
}

/// A link from a node to the opposite list.
#[derive(Clone, Debug, Default, PartialEq, Getters, Setters)]
#[getset(get = "pub", set = "pub")]
pub struct DlgLink {

    /// Index into the destination list.
    index: u32,

    /// Conditional script gating the link.
    active: ResRef,
}

//---------------------------------------------------------------------------//
//                         Implementation of Dlg
//---------------------------------------------------------------------------//

/// This function reads a link list field.
fn construct_links(parent: &GffStruct, label: &str) -> Vec<DlgLink> {
    parent.list_or_default(label)
        .iter()
        .map(|entry| DlgLink {
            index: entry.u32_or("Index", 0),
            active: entry.resref_or_default("Active"),
        })
        .collect()
}

/// This function writes a link list field.
fn dismantle_links(links: &[DlgLink]) -> Result<Vec<GffStruct>> {
    links.iter()
        .map(|link| {
            let mut entry = GffStruct::new(NODE_STRUCT_ID);
            entry.insert("Index", GffField::U32(link.index))?;
            entry.insert("Active", GffField::ResRef(link.active.clone()))?;
            Ok(entry)
        })
        .collect()
}

/// This function reads one side's node list.
fn construct_nodes(root: &GffStruct, list_label: &str, links_label: &str) -> Vec<DlgNode> {
    root.list_or_default(list_label)
        .iter()
        .map(|entry| DlgNode {
            speaker: entry.string_or_default("Speaker"),
            text: entry.locstring_or_default("Text"),
            script: entry.resref_or_default("Script"),
            vo_resref: entry.resref_or_default("VO_ResRef"),
            camera_angle: entry.u32_or("CameraAngle", 0),
            delay: entry.u32_or("Delay", 0xFFFF_FFFF),
            links: construct_links(entry, links_label),
            comment: entry.string_or_default("Comment"),
        })
        .collect()
}

/// This function writes one side's node list.
fn dismantle_nodes(nodes: &[DlgNode], links_label: &str, use_deprecated: bool) -> Result<Vec<GffStruct>> {
    nodes.iter()
        .map(|node| {
            let mut entry = GffStruct::new(NODE_STRUCT_ID);
            entry.insert("Speaker", GffField::String(node.speaker.to_owned()))?;
            entry.insert("Text", GffField::LocalizedString(node.text.clone()))?;
            entry.insert("Script", GffField::ResRef(node.script.clone()))?;
            entry.insert("VO_ResRef", GffField::ResRef(node.vo_resref.clone()))?;
            entry.insert("CameraAngle", GffField::U32(node.camera_angle))?;
            entry.insert("Delay", GffField::U32(node.delay))?;
            entry.insert(links_label, GffField::List(dismantle_links(&node.links)?))?;
            if use_deprecated {
                entry.insert("Comment", GffField::String(node.comment.to_owned()))?;
            }
            Ok(entry)
        })
        .collect()
}

impl Blueprint for Dlg {

    const SIGNATURE: &'static str = "DLG ";

    fn construct(gff: &Gff) -> Result<Self> {
        let root = gff.root();

        Ok(Self {
            delay_entry: root.u32_or("DelayEntry", 0),
            delay_reply: root.u32_or("DelayReply", 0),
            word_count: root.u32_or("NumWords", 0),
            on_abort: root.resref_or_default("EndConverAbort"),
            on_end: root.resref_or_default("EndConversation"),
            skippable: root.u8_or("Skippable", 0) != 0,
            ambient_track: root.resref_or_default("AmbientTrack"),
            camera_model: root.resref_or_default("CameraModel"),
            entries: construct_nodes(root, "EntryList", "RepliesList"),
            replies: construct_nodes(root, "ReplyList", "EntriesList"),
            starters: construct_links(root, "StartingList"),
        })
    }

    fn dismantle(&self, use_deprecated: bool) -> Result<Gff> {
        let mut gff = Gff::new(Self::SIGNATURE);
        let root = gff.root_mut();

        root.insert("DelayEntry", GffField::U32(self.delay_entry))?;
        root.insert("DelayReply", GffField::U32(self.delay_reply))?;
        root.insert("NumWords", GffField::U32(self.word_count))?;
        root.insert("EndConverAbort", GffField::ResRef(self.on_abort.clone()))?;
        root.insert("EndConversation", GffField::ResRef(self.on_end.clone()))?;
        root.insert("Skippable", GffField::U8(self.skippable as u8))?;
        root.insert("AmbientTrack", GffField::ResRef(self.ambient_track.clone()))?;
        root.insert("CameraModel", GffField::ResRef(self.camera_model.clone()))?;
        root.insert("EntryList", GffField::List(dismantle_nodes(&self.entries, "RepliesList", use_deprecated)?))?;
        root.insert("ReplyList", GffField::List(dismantle_nodes(&self.replies, "EntriesList", use_deprecated)?))?;
        root.insert("StartingList", GffField::List(dismantle_links(&self.starters)?))?;

        Ok(gff)
    }
}
