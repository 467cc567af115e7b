//---------------------------------------------------------------------------//
// Copyright (c) 2024-2026 The Andastra project contributors. All rights reserved.
//
// This file is part of the Andastra project,
// which can be found here: https://github.com/andastra-project/andastra.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/andastra-project/andastra/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! LYT files are module layouts: a plain-text list of the rooms, swoop-track
//! pieces, obstacles and door hooks a module is assembled from.
//!
//! The format is line-based and keyword-delimited:
//!
//! ```text
//! beginlayout
//!    roomcount 2
//!       m01aa_01a 0.0 0.0 0.0
//!       m01aa_01b 10.0 0.0 0.0
//!    doorhookcount 1
//!       m01aa_01a door_01 0 1.0 2.0 3.0 1.0 0.0 0.0 0.0
//! donelayout
//! ```
//!
//! Keywords are case-insensitive. Door-hook lines come in a 10-token and a
//! 15-token flavour depending on the producer: both are accepted, and the
//! trailing 5 floats of the long form are dropped. The writer always emits
//! the 10-token form.

use itertools::Itertools;

use crate::binary::{ReadBytes, WriteBytes};
use crate::error::{ALibError, Result};
use crate::files::{Decodeable, DecodeableExtraData, Encodeable, EncodeableExtraData};

/// Extension used by layout files.
pub const EXTENSION: &str = ".lyt";

#[cfg(test)] mod lyt_test;

//---------------------------------------------------------------------------//
//                              Enum & Structs
//---------------------------------------------------------------------------//

/// This stores the data of a decoded layout file in memory.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Lyt {

    /// The rooms of the module.
    pub rooms: Vec<LytRoom>,

    /// The swoop-track pieces of the module.
    pub tracks: Vec<LytRoom>,

    /// The obstacles of the module.
    pub obstacles: Vec<LytRoom>,

    /// The door hooks of the module.
    pub doorhooks: Vec<LytDoorHook>,
}

/// A positioned model reference: rooms, track pieces and obstacles all share this shape.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LytRoom {
    pub model: String,
    pub position: [f32; 3],
}

/// A door hook: where a door model mounts inside a room.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LytDoorHook {
    pub room: String,
    pub door: String,
    pub unknown: i32,
    pub position: [f32; 3],
    pub orientation: [f32; 4],
}

//---------------------------------------------------------------------------//
//                            Decode/Encode logic
//---------------------------------------------------------------------------//

/// This function parses a `model x y z` line.
fn parse_room(line_number: usize, tokens: &[&str]) -> Result<LytRoom> {
    if tokens.len() != 4 {
        return Err(ALibError::DecodingLayoutLineError(line_number, format!("expected 4 tokens, found {}", tokens.len())));
    }

    Ok(LytRoom {
        model: tokens[0].to_owned(),
        position: [tokens[1].parse()?, tokens[2].parse()?, tokens[3].parse()?],
    })
}

/// This function parses a door-hook line, in either the 10 or 15 token flavour.
fn parse_doorhook(line_number: usize, tokens: &[&str]) -> Result<LytDoorHook> {
    if tokens.len() != 10 && tokens.len() != 15 {
        return Err(ALibError::DecodingLayoutLineError(line_number, format!("expected 10 or 15 tokens, found {}", tokens.len())));
    }

    Ok(LytDoorHook {
        room: tokens[0].to_owned(),
        door: tokens[1].to_owned(),
        unknown: tokens[2].parse()?,
        position: [tokens[3].parse()?, tokens[4].parse()?, tokens[5].parse()?],
        orientation: [tokens[6].parse()?, tokens[7].parse()?, tokens[8].parse()?, tokens[9].parse()?],
    })
}

impl Decodeable for Lyt {

    fn decode<R: ReadBytes>(data: &mut R, _extra_data: &Option<DecodeableExtraData>) -> Result<Self> {
        let len = data.len()? as usize;
        let text = data.read_string_fallback(len)?;

        let mut layout = Self::default();
        let mut in_layout = false;
        let mut pending: Option<(&'static str, usize)> = None;

        for (line_number, line) in text.lines().enumerate() {
            let tokens = line.split_whitespace().collect::<Vec<_>>();
            if tokens.is_empty() {
                continue;
            }
            let keyword = tokens[0].to_ascii_lowercase();

            // Lines belonging to the section currently being read.
            if let Some((section, remaining)) = pending.take() {
                if remaining > 0 {
                    match section {
                        "room" => layout.rooms.push(parse_room(line_number, &tokens)?),
                        "track" => layout.tracks.push(parse_room(line_number, &tokens)?),
                        "obstacle" => layout.obstacles.push(parse_room(line_number, &tokens)?),
                        _ => layout.doorhooks.push(parse_doorhook(line_number, &tokens)?),
                    }

                    if remaining > 1 {
                        pending = Some((section, remaining - 1));
                    }
                    continue;
                }
            }

            match &*keyword {
                "beginlayout" => in_layout = true,
                "donelayout" => break,
                "roomcount" | "trackcount" | "obstaclecount" | "doorhookcount" => {
                    if !in_layout {
                        return Err(ALibError::DecodingLayoutLineError(line_number, "section outside beginlayout".to_owned()));
                    }

                    let count: usize = tokens.get(1)
                        .ok_or_else(|| ALibError::DecodingLayoutLineError(line_number, "missing section count".to_owned()))?
                        .parse()?;
                    let section = match &*keyword {
                        "roomcount" => "room",
                        "trackcount" => "track",
                        "obstaclecount" => "obstacle",
                        _ => "doorhook",
                    };
                    if count > 0 {
                        pending = Some((section, count));
                    }
                }
                _ => return Err(ALibError::DecodingLayoutLineError(line_number, format!("unknown keyword \"{}\"", tokens[0]))),
            }
        }

        if !in_layout {
            return Err(ALibError::DecodingBadSignature("beginlayout".to_owned(), text.chars().take(12).collect()));
        }

        Ok(layout)
    }
}

impl Encodeable for Lyt {

    fn encode<W: WriteBytes>(&mut self, buffer: &mut W, _extra_data: &Option<EncodeableExtraData>) -> Result<()> {
        let mut text = String::new();
        text.push_str("beginlayout\n");

        let write_rooms = |text: &mut String, keyword: &str, rooms: &[LytRoom]| {
            text.push_str(&format!("   {keyword} {}\n", rooms.len()));
            for room in rooms {
                text.push_str(&format!("      {} {} {} {}\n", room.model, room.position[0], room.position[1], room.position[2]));
            }
        };

        write_rooms(&mut text, "roomcount", &self.rooms);
        write_rooms(&mut text, "trackcount", &self.tracks);
        write_rooms(&mut text, "obstaclecount", &self.obstacles);

        text.push_str(&format!("   doorhookcount {}\n", self.doorhooks.len()));
        for hook in &self.doorhooks {
            let floats = hook.position.iter()
                .chain(hook.orientation.iter())
                .map(|value| value.to_string())
                .join(" ");
            text.push_str(&format!("      {} {} {} {floats}\n", hook.room, hook.door, hook.unknown));
        }

        text.push_str("donelayout\n");
        buffer.write_string_u8(&text)
    }
}
