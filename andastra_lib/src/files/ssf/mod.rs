//---------------------------------------------------------------------------//
// Copyright (c) 2024-2026 The Andastra project contributors. All rights reserved.
//
// This file is part of the Andastra project,
// which can be found here: https://github.com/andastra-project/andastra.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/andastra-project/andastra/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! SSF files are sound sets: the per-creature table of voice lines, one talk
//! table StrRef per game event (battlecry, pain, mine disarmed,...).
//!
//! # SSF Structure
//!
//! | Bytes | Type     | Data                                        |
//! | ----- | -------- | ------------------------------------------- |
//! | 4     | StringU8 | File signature. Always `SSF `.              |
//! | 4     | StringU8 | Version. Always `V1.1`.                     |
//! | 4     | [u32]    | Offset to the sound table. Always 12.       |
//! | 160   | 40×[u32] | StrRefs. 28 used slots, the rest `-1` padding. |

use std::io::{Seek, SeekFrom};

use crate::binary::{ReadBytes, WriteBytes};
use crate::error::{ALibError, Result};
use crate::files::{Decodeable, DecodeableExtraData, Encodeable, EncodeableExtraData, StrRef, STRREF_NONE};

/// Extension used by sound set files.
pub const EXTENSION: &str = ".ssf";

/// This represents the value that every sound set has in their first 4 bytes.
const SIGNATURE: &str = "SSF ";

/// Version used by sound sets.
const VERSION: &str = "V1.1";

/// Amount of sound slots a sound set uses.
pub const SOUND_COUNT: usize = 28;

/// Amount of table slots a sound set stores, padding included.
const TABLE_SIZE: usize = 40;

#[cfg(test)] mod ssf_test;

//---------------------------------------------------------------------------//
//                              Enum & Structs
//---------------------------------------------------------------------------//

/// This stores the data of a decoded sound set in memory.
#[derive(Clone, Debug, PartialEq)]
pub struct Ssf {

    /// The StrRef of each sound slot, in table order.
    sounds: [StrRef; SOUND_COUNT],
}

/// The sound slots of a sound set, in table order.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SsfSound {
    Battlecry1,
    Battlecry2,
    Battlecry3,
    Battlecry4,
    Battlecry5,
    Battlecry6,
    Select1,
    Select2,
    Select3,
    AttackGrunt1,
    AttackGrunt2,
    AttackGrunt3,
    Pain1,
    Pain2,
    LowHealth,
    Dead,
    CriticalHit,
    TargetImmune,
    LayMine,
    DisarmMine,
    BeginStealth,
    BeginSearch,
    BeginUnlock,
    UnlockFailed,
    UnlockSuccess,
    SeparatedFromParty,
    RejoinedParty,
    Poisoned,
}

//---------------------------------------------------------------------------//
//                           Implementation of Ssf
//---------------------------------------------------------------------------//

impl Default for Ssf {
    fn default() -> Self {
        Self {
            sounds: [STRREF_NONE; SOUND_COUNT],
        }
    }
}

impl Ssf {

    /// This function creates a new sound set with every slot unset.
    pub fn new() -> Self {
        Self::default()
    }

    /// This function returns the StrRef of the provided slot.
    pub fn sound(&self, slot: SsfSound) -> StrRef {
        self.sounds[slot as usize]
    }

    /// This function sets the StrRef of the provided slot.
    pub fn set_sound(&mut self, slot: SsfSound, strref: StrRef) {
        self.sounds[slot as usize] = strref;
    }
}

impl SsfSound {

    /// Every slot, in table order.
    pub const ALL: [Self; SOUND_COUNT] = [
        Self::Battlecry1, Self::Battlecry2, Self::Battlecry3, Self::Battlecry4,
        Self::Battlecry5, Self::Battlecry6, Self::Select1, Self::Select2,
        Self::Select3, Self::AttackGrunt1, Self::AttackGrunt2, Self::AttackGrunt3,
        Self::Pain1, Self::Pain2, Self::LowHealth, Self::Dead, Self::CriticalHit,
        Self::TargetImmune, Self::LayMine, Self::DisarmMine, Self::BeginStealth,
        Self::BeginSearch, Self::BeginUnlock, Self::UnlockFailed, Self::UnlockSuccess,
        Self::SeparatedFromParty, Self::RejoinedParty, Self::Poisoned,
    ];

    /// This function returns the label patch configurations use for this slot.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Battlecry1 => "Battlecry 1",
            Self::Battlecry2 => "Battlecry 2",
            Self::Battlecry3 => "Battlecry 3",
            Self::Battlecry4 => "Battlecry 4",
            Self::Battlecry5 => "Battlecry 5",
            Self::Battlecry6 => "Battlecry 6",
            Self::Select1 => "Selected 1",
            Self::Select2 => "Selected 2",
            Self::Select3 => "Selected 3",
            Self::AttackGrunt1 => "Attack 1",
            Self::AttackGrunt2 => "Attack 2",
            Self::AttackGrunt3 => "Attack 3",
            Self::Pain1 => "Pain 1",
            Self::Pain2 => "Pain 2",
            Self::LowHealth => "Low health",
            Self::Dead => "Death",
            Self::CriticalHit => "Critical hit",
            Self::TargetImmune => "Target immune",
            Self::LayMine => "Place mine",
            Self::DisarmMine => "Disarm mine",
            Self::BeginStealth => "Stealth on",
            Self::BeginSearch => "Search",
            Self::BeginUnlock => "Pick lock start",
            Self::UnlockFailed => "Pick lock fail",
            Self::UnlockSuccess => "Pick lock done",
            Self::SeparatedFromParty => "Leave party",
            Self::RejoinedParty => "Rejoin party",
            Self::Poisoned => "Poisoned",
        }
    }

    /// This function returns the slot matching a patch configuration label,
    /// matched case-insensitively.
    pub fn from_label(label: &str) -> Result<Self> {
        Self::ALL.into_iter()
            .find(|slot| slot.label().eq_ignore_ascii_case(label))
            .ok_or_else(|| ALibError::UnknownSoundSetSlot(label.to_owned()))
    }
}

//---------------------------------------------------------------------------//
//                            Decode/Encode logic
//---------------------------------------------------------------------------//

impl Decodeable for Ssf {

    fn decode<R: ReadBytes>(data: &mut R, _extra_data: &Option<DecodeableExtraData>) -> Result<Self> {
        let signature = data.read_string_u8(4)
            .map_err(|_| ALibError::DecodingTruncatedSection("header"))?;
        if signature != SIGNATURE {
            return Err(ALibError::DecodingBadSignature(SIGNATURE.to_owned(), signature));
        }

        let version = data.read_string_u8(4)?;
        if version != VERSION {
            return Err(ALibError::DecodingUnsupportedVersion("SSF".to_owned(), version));
        }

        let offset = data.read_u32()? as u64;
        data.seek(SeekFrom::Start(offset))?;

        let mut sounds = [STRREF_NONE; SOUND_COUNT];
        for sound in &mut sounds {
            *sound = data.read_u32()? as StrRef;
        }

        Ok(Self {
            sounds,
        })
    }
}

impl Encodeable for Ssf {

    fn encode<W: WriteBytes>(&mut self, buffer: &mut W, _extra_data: &Option<EncodeableExtraData>) -> Result<()> {
        buffer.write_string_u8(SIGNATURE)?;
        buffer.write_string_u8(VERSION)?;
        buffer.write_u32(12)?;

        for sound in &self.sounds {
            buffer.write_u32(*sound as u32)?;
        }
        for _ in SOUND_COUNT..TABLE_SIZE {
            buffer.write_u32(STRREF_NONE as u32)?;
        }

        Ok(())
    }
}
