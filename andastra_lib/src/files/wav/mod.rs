//---------------------------------------------------------------------------//
// Copyright (c) 2024-2026 The Andastra project contributors. All rights reserved.
//
// This file is part of the Andastra project,
// which can be found here: https://github.com/andastra-project/andastra.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/andastra-project/andastra/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! WAV containers, as the Odyssey engine ships them. Three flavours exist:
//!
//! * Plain RIFF/WAVE files.
//! * Voice-over files: a 20-byte obfuscation prefix, then the real RIFF.
//! * Sound effects: a 470-byte prefix (`FF F3 60 C4` then zeros), then the real RIFF.
//!
//! On top of that, some "WAV" files are MP3 data behind a fake 58-byte RIFF
//! header, identified by the RIFF chunk declaring exactly 50 bytes.
//!
//! This codec only classifies and unwraps; audio playback is someone else's job.

use getset::Getters;

use std::io::Write;

use crate::binary::{ReadBytes, WriteBytes};
use crate::error::{ALibError, Result};
use crate::files::{Decodeable, DecodeableExtraData, Encodeable, EncodeableExtraData};

/// Extension used by WAV containers.
pub const EXTENSION: &str = ".wav";

/// Magic of a RIFF chunk.
const RIFF: &[u8; 4] = b"RIFF";

/// First bytes of the obfuscation prefixes.
const OBFUSCATION_MAGIC: [u8; 4] = [0xFF, 0xF3, 0x60, 0xC4];

/// Size of the voice-over obfuscation prefix.
const VO_PREFIX_SIZE: usize = 20;

/// Size of the sound-effect obfuscation prefix.
const SFX_PREFIX_SIZE: usize = 470;

/// RIFF chunk size that marks MP3 data behind a fake header.
const MP3_RIFF_SIZE: u32 = 50;

#[cfg(test)] mod wav_test;

//---------------------------------------------------------------------------//
//                              Enum & Structs
//---------------------------------------------------------------------------//

/// The flavours of WAV container the engine ships.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum WavKind {
    Plain,
    VoiceOver,
    SoundEffect,
    Mp3,
}

/// This stores a classified WAV container in memory.
///
/// The prefix is kept verbatim so a decode → encode cycle is byte-identical.
#[derive(Clone, Debug, PartialEq, Getters)]
#[getset(get = "pub")]
pub struct Wav {

    /// The flavour of the container.
    kind: WavKind,

    /// The obfuscation prefix (or fake MP3 header), verbatim. Empty on plain files.
    prefix: Vec<u8>,

    /// The payload: RIFF data, or raw MP3 data on the MP3 flavour.
    data: Vec<u8>,
}

//---------------------------------------------------------------------------//
//                           Implementation of Wav
//---------------------------------------------------------------------------//

impl Wav {

    /// This function wraps a RIFF payload as a plain WAV.
    pub fn plain(data: Vec<u8>) -> Self {
        Self {
            kind: WavKind::Plain,
            prefix: vec![],
            data,
        }
    }

    /// This function wraps a RIFF payload as an obfuscated voice-over WAV.
    pub fn voice_over(data: Vec<u8>) -> Self {
        let mut prefix = OBFUSCATION_MAGIC.to_vec();
        prefix.resize(VO_PREFIX_SIZE, 0);
        Self {
            kind: WavKind::VoiceOver,
            prefix,
            data,
        }
    }

    /// This function wraps a RIFF payload as an obfuscated sound-effect WAV.
    pub fn sound_effect(data: Vec<u8>) -> Self {
        let mut prefix = OBFUSCATION_MAGIC.to_vec();
        prefix.resize(SFX_PREFIX_SIZE, 0);
        Self {
            kind: WavKind::SoundEffect,
            prefix,
            data,
        }
    }
}

//---------------------------------------------------------------------------//
//                            Decode/Encode logic
//---------------------------------------------------------------------------//

impl Decodeable for Wav {

    fn decode<R: ReadBytes>(data: &mut R, _extra_data: &Option<DecodeableExtraData>) -> Result<Self> {
        let len = data.len()? as usize;
        let bytes = data.read_slice(len, false)?;
        if bytes.len() < 8 {
            return Err(ALibError::DecodingTruncatedSection("header"));
        }

        if &bytes[..4] == RIFF {
            let riff_size = u32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]);
            if riff_size == MP3_RIFF_SIZE {
                let split = 8 + MP3_RIFF_SIZE as usize;
                if bytes.len() < split {
                    return Err(ALibError::DecodingTruncatedSection("fake header"));
                }
                return Ok(Self {
                    kind: WavKind::Mp3,
                    prefix: bytes[..split].to_vec(),
                    data: bytes[split..].to_vec(),
                });
            }

            return Ok(Self::plain(bytes));
        }

        if bytes[..4] == OBFUSCATION_MAGIC {
            if bytes.len() >= VO_PREFIX_SIZE + 4 && &bytes[VO_PREFIX_SIZE..VO_PREFIX_SIZE + 4] == RIFF {
                return Ok(Self {
                    kind: WavKind::VoiceOver,
                    prefix: bytes[..VO_PREFIX_SIZE].to_vec(),
                    data: bytes[VO_PREFIX_SIZE..].to_vec(),
                });
            }

            if bytes.len() >= SFX_PREFIX_SIZE + 4 && &bytes[SFX_PREFIX_SIZE..SFX_PREFIX_SIZE + 4] == RIFF {
                return Ok(Self {
                    kind: WavKind::SoundEffect,
                    prefix: bytes[..SFX_PREFIX_SIZE].to_vec(),
                    data: bytes[SFX_PREFIX_SIZE..].to_vec(),
                });
            }
        }

        Err(ALibError::DecodingBadSignature("RIFF".to_owned(), String::from_utf8_lossy(&bytes[..4]).to_string()))
    }
}

impl Encodeable for Wav {

    fn encode<W: WriteBytes>(&mut self, buffer: &mut W, _extra_data: &Option<EncodeableExtraData>) -> Result<()> {
        buffer.write_all(&self.prefix)?;
        buffer.write_all(&self.data)?;
        Ok(())
    }
}
