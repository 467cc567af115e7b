//---------------------------------------------------------------------------//
// Copyright (c) 2024-2026 The Andastra project contributors. All rights reserved.
//
// This file is part of the Andastra project,
// which can be found here: https://github.com/andastra-project/andastra.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/andastra-project/andastra/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! LIP files are lip-sync tracks: a duration plus a list of timed mouth
//! shapes, paired with a voice-over line.
//!
//! # LIP Structure
//!
//! | Bytes | Type     | Data                           |
//! | ----- | -------- | ------------------------------ |
//! | 4     | StringU8 | File signature. Always `LIP `. |
//! | 4     | StringU8 | Version. Always `V1.0`.        |
//! | 4     | [f32]    | Lenght of the track, in seconds. |
//! | 4     | [u32]    | Amount of keyframes.           |
//! | 5×n   | *        | Keyframes: `(time: f32, shape: u8)`. |
//!
//! # JSON projection
//!
//! The canonical JSON form is a top-level `{"duration": …, "keyframes": […]}`
//! document. Older exporters wrapped it as `{"lip": {…}}`: the reader accepts
//! both, the writer only ever emits the canonical form.

use serde_derive::{Deserialize, Serialize};
use serde_json::Value;

use crate::binary::{ReadBytes, WriteBytes};
use crate::error::{ALibError, Result};
use crate::files::{Decodeable, DecodeableExtraData, Encodeable, EncodeableExtraData};

/// Extension used by lip-sync tracks.
pub const EXTENSION: &str = ".lip";

/// This represents the value that every lip-sync track has in their first 4 bytes.
const SIGNATURE: &str = "LIP ";

/// Version used by lip-sync tracks.
const VERSION: &str = "V1.0";

#[cfg(test)] mod lip_test;

//---------------------------------------------------------------------------//
//                              Enum & Structs
//---------------------------------------------------------------------------//

/// This stores the data of a decoded lip-sync track in memory.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Lip {

    /// Lenght of the track, in seconds.
    pub duration: f32,

    /// The timed mouth shapes of the track.
    pub keyframes: Vec<LipKeyframe>,
}

/// A keyframe of a lip-sync track.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LipKeyframe {

    /// Time of the keyframe, in seconds from the start of the track.
    pub time: f32,

    /// The mouth shape to show.
    pub shape: u8,
}

/// The two JSON layouts found in the wild. Only the canonical one is written.
#[derive(Deserialize)]
#[serde(untagged)]
enum LipJson {
    Canonical(Lip),
    Wrapped { lip: Lip },
}

//---------------------------------------------------------------------------//
//                           Implementation of Lip
//---------------------------------------------------------------------------//

impl Lip {

    /// This function creates a new empty track of the provided duration.
    pub fn new(duration: f32) -> Self {
        Self {
            duration,
            keyframes: vec![],
        }
    }

    /// This function serializes the track into his canonical JSON form.
    pub fn to_json(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }

    /// This function rebuilds a track from either JSON layout.
    pub fn from_json(value: &Value) -> Result<Self> {
        let parsed: LipJson = serde_json::from_value(value.clone())?;
        Ok(match parsed {
            LipJson::Canonical(lip) => lip,
            LipJson::Wrapped { lip } => lip,
        })
    }
}

//---------------------------------------------------------------------------//
//                            Decode/Encode logic
//---------------------------------------------------------------------------//

impl Decodeable for Lip {

    fn decode<R: ReadBytes>(data: &mut R, _extra_data: &Option<DecodeableExtraData>) -> Result<Self> {
        let signature = data.read_string_u8(4)
            .map_err(|_| ALibError::DecodingTruncatedSection("header"))?;
        if signature != SIGNATURE {
            return Err(ALibError::DecodingBadSignature(SIGNATURE.to_owned(), signature));
        }

        let version = data.read_string_u8(4)?;
        if version != VERSION {
            return Err(ALibError::DecodingUnsupportedVersion("LIP".to_owned(), version));
        }

        let duration = data.read_f32()?;
        let keyframe_count = data.read_u32()?;

        let mut keyframes = Vec::with_capacity(keyframe_count as usize);
        for _ in 0..keyframe_count {
            keyframes.push(LipKeyframe {
                time: data.read_f32()?,
                shape: data.read_u8()?,
            });
        }

        Ok(Self {
            duration,
            keyframes,
        })
    }
}

impl Encodeable for Lip {

    fn encode<W: WriteBytes>(&mut self, buffer: &mut W, _extra_data: &Option<EncodeableExtraData>) -> Result<()> {
        buffer.write_string_u8(SIGNATURE)?;
        buffer.write_string_u8(VERSION)?;
        buffer.write_f32(self.duration)?;
        buffer.write_u32(self.keyframes.len() as u32)?;

        for keyframe in &self.keyframes {
            buffer.write_f32(keyframe.time)?;
            buffer.write_u8(keyframe.shape)?;
        }

        Ok(())
    }
}
