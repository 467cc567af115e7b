//---------------------------------------------------------------------------//
// Copyright (c) 2024-2026 The Andastra project contributors. All rights reserved.
//
// This file is part of the Andastra project,
// which can be found here: https://github.com/andastra-project/andastra.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/andastra-project/andastra/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! UTS blueprints describe sound emitters: ambient loops and randomised
//! one-shots placed around an area.

use getset::{Getters, MutGetters, Setters};

use crate::error::Result;
use crate::files::ResRef;
use crate::files::gff::{Gff, GffField, GffStruct, LocalizedString};

use super::Blueprint;

/// Struct id the engine uses for sound list entries.
const SOUND_STRUCT_ID: i32 = 0;

/// A sound emitter blueprint.
#[derive(Clone, Debug, Default, PartialEq, Getters, MutGetters, Setters)]
#[getset(get = "pub", get_mut = "pub", set = "pub")]
pub struct Uts {
    resref: ResRef,
    tag: String,
    name: LocalizedString,

    /// If the emitter starts playing.
    active: bool,

    /// Playback shape.
    continuous: bool,
    looping: bool,
    positional: bool,
    random_position: bool,
    random_pick: bool,

    /// Timing, in milliseconds.
    interval: u32,
    interval_variation: u32,

    /// Mix parameters.
    volume: u8,
    volume_variation: u8,
    pitch_variation: f32,

    /// Audible range, in meters.
    min_distance: f32,
    max_distance: f32,

    /// Height the sound plays at.
    elevation: f32,

    /// Day/night scheduling mask.
    hours: u32,

    /// Playback priority row.
    priority: u8,

    /// The WAV resources the emitter picks from.
    sounds: Vec<ResRef>,

    /// Toolset comment. Deprecated, only written on demand.
    comment: String,

    /// Legacy palette id. Deprecated, only written on demand.
    palette_id: u8,
}

impl Blueprint for Uts {

    const SIGNATURE: &'static str = "UTS ";

    fn construct(gff: &Gff) -> Result<Self> {
        let root = gff.root();

        let sounds = root.list_or_default("Sounds")
            .iter()
            .map(|entry| entry.resref_or_default("Sound"))
            .collect();

        Ok(Self {
            resref: root.resref_or_default("TemplateResRef"),
            tag: root.string_or_default("Tag"),
            name: root.locstring_or_default("LocName"),
            active: root.u8_or("Active", 1) != 0,
            continuous: root.u8_or("Continuous", 0) != 0,
            looping: root.u8_or("Looping", 0) != 0,
            positional: root.u8_or("Positional", 0) != 0,
            random_position: root.u8_or("RandomPosition", 0) != 0,
            random_pick: root.u8_or("Random", 0) != 0,
            interval: root.u32_or("Interval", 0),
            interval_variation: root.u32_or("IntervalVrtn", 0),
            volume: root.u8_or("Volume", 127),
            volume_variation: root.u8_or("VolumeVrtn", 0),
            pitch_variation: root.f32_or("PitchVariation", 0.0),
            min_distance: root.f32_or("MinDistance", 0.0),
            max_distance: root.f32_or("MaxDistance", 0.0),
            elevation: root.f32_or("Elevation", 0.0),
            hours: root.u32_or("Hours", 0),
            priority: root.u8_or("Priority", 0),
            sounds,
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
        root.insert("Active", GffField::U8(self.active as u8))?;
        root.insert("Continuous", GffField::U8(self.continuous as u8))?;
        root.insert("Looping", GffField::U8(self.looping as u8))?;
        root.insert("Positional", GffField::U8(self.positional as u8))?;
        root.insert("RandomPosition", GffField::U8(self.random_position as u8))?;
        root.insert("Random", GffField::U8(self.random_pick as u8))?;
        root.insert("Interval", GffField::U32(self.interval))?;
        root.insert("IntervalVrtn", GffField::U32(self.interval_variation))?;
        root.insert("Volume", GffField::U8(self.volume))?;
        root.insert("VolumeVrtn", GffField::U8(self.volume_variation))?;
        root.insert("PitchVariation", GffField::F32(self.pitch_variation))?;
        root.insert("MinDistance", GffField::F32(self.min_distance))?;
        root.insert("MaxDistance", GffField::F32(self.max_distance))?;
        root.insert("Elevation", GffField::F32(self.elevation))?;
        root.insert("Hours", GffField::U32(self.hours))?;
        root.insert("Priority", GffField::U8(self.priority))?;

        let sounds = self.sounds.iter()
            .map(|sound| {
                let mut entry = GffStruct::new(SOUND_STRUCT_ID);
                entry.insert("Sound", GffField::ResRef(sound.clone()))?;
                Ok(entry)
            })
            .collect::<Result<Vec<_>>>()?;
        root.insert("Sounds", GffField::List(sounds))?;

        if use_deprecated {
            root.insert("PaletteID", GffField::U8(self.palette_id))?;
            root.insert("Comment", GffField::String(self.comment.to_owned()))?;
        }

        Ok(gff)
    }
}
