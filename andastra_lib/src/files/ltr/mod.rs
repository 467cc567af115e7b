//---------------------------------------------------------------------------//
// Copyright (c) 2024-2026 The Andastra project contributors. All rights reserved.
//
// This file is part of the Andastra project,
// which can be found here: https://github.com/andastra-project/andastra.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/andastra-project/andastra/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! LTR files are letter-combination tables: Markov-chain data the engines use
//! to generate random character names.
//!
//! # LTR Structure
//!
//! | Bytes     | Type     | Data                                        |
//! | --------- | -------- | ------------------------------------------- |
//! | 4         | StringU8 | File signature. Always `LTR `.              |
//! | 4         | StringU8 | Version. Always `V1.0`.                     |
//! | 1         | [u8]     | Letter count `n`. 26, or 28 with `'` and `-`. |
//! | 3n×4      | [f32]    | Singles block.                              |
//! | n×3n×4    | [f32]    | Doubles blocks, one per previous letter.    |
//! | n×n×3n×4  | [f32]    | Triples blocks, one per previous pair.      |
//!
//! Each block is three cumulative-probability arrays of `n` values: the odds
//! of each letter starting a name, appearing in the middle, or ending it.

use rand::Rng;

use crate::binary::{ReadBytes, WriteBytes};
use crate::error::{ALibError, Result};
use crate::files::{Decodeable, DecodeableExtraData, Encodeable, EncodeableExtraData};

/// Extension used by letter-combination tables.
pub const EXTENSION: &str = ".ltr";

/// This represents the value that every letter table has in their first 4 bytes.
const SIGNATURE: &str = "LTR ";

/// Version used by letter tables.
const VERSION: &str = "V1.0";

/// The 28-letter charset. Tables with 26 letters use the alphabetic prefix.
const CHARSET: [char; 28] = [
    'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i', 'j', 'k', 'l', 'm',
    'n', 'o', 'p', 'q', 'r', 's', 't', 'u', 'v', 'w', 'x', 'y', 'z',
    '\'', '-',
];

/// Names shorter than this don't get an end-of-name roll yet.
const MIN_NAME_LENGTH: usize = 4;

/// Hard cap on generated name lenght.
const MAX_NAME_LENGTH: usize = 12;

/// Attempts before a degenerate table makes us give up.
const MAX_ATTEMPTS: usize = 100;

#[cfg(test)] mod ltr_test;

//---------------------------------------------------------------------------//
//                              Enum & Structs
//---------------------------------------------------------------------------//

/// This stores the data of a decoded letter table in memory.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Ltr {

    /// Amount of letters the table covers: 26 or 28.
    letter_count: u8,

    /// Odds of each letter opening a name, standing alone after one letter, or closing a two-letter name.
    singles: LtrBlock,

    /// Odds of each letter following a specific previous letter.
    doubles: Vec<LtrBlock>,

    /// Odds of each letter following a specific pair of previous letters.
    triples: Vec<Vec<LtrBlock>>,
}

/// One probability block: cumulative odds per letter for the three positions.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LtrBlock {
    pub start: Vec<f32>,
    pub middle: Vec<f32>,
    pub end: Vec<f32>,
}

//---------------------------------------------------------------------------//
//                           Implementation of Ltr
//---------------------------------------------------------------------------//

impl Ltr {

    /// This function returns the amount of letters the table covers.
    pub fn letter_count(&self) -> u8 {
        self.letter_count
    }

    /// This function returns the charset the table indexes into.
    pub fn charset(&self) -> &[char] {
        &CHARSET[..self.letter_count as usize]
    }

    /// This function rolls a letter from a cumulative-probability array.
    fn roll<R: Rng>(rng: &mut R, odds: &[f32]) -> Option<usize> {
        let value: f32 = rng.gen();
        odds.iter().position(|odd| *odd > value && *odd > 0.0)
    }

    /// This function generates a random name by walking the table's chains.
    ///
    /// Returns `None` when the table is too degenerate to produce one (a
    /// hand-crafted table with empty chains, mostly).
    pub fn generate<R: Rng>(&self, rng: &mut R) -> Option<String> {
        let charset = self.charset();

        'attempts: for _ in 0..MAX_ATTEMPTS {
            let first = Self::roll(rng, &self.singles.start)?;
            let Some(second) = Self::roll(rng, &self.doubles[first].start) else { continue };
            let Some(third) = Self::roll(rng, &self.triples[first][second].start) else { continue };

            let mut letters = vec![first, second, third];
            loop {
                let (prev2, prev1) = (letters[letters.len() - 2], letters[letters.len() - 1]);
                let block = &self.triples[prev2][prev1];

                // Once the name is long enough, try to close it.
                if letters.len() >= MIN_NAME_LENGTH {
                    if let Some(last) = Self::roll(rng, &block.end) {
                        letters.push(last);
                        let mut name = letters.iter().map(|index| charset[*index]).collect::<String>();
                        if let Some(first_char) = name.get_mut(0..1) {
                            first_char.make_ascii_uppercase();
                        }
                        return Some(name);
                    }
                }

                if letters.len() >= MAX_NAME_LENGTH {
                    continue 'attempts;
                }

                match Self::roll(rng, &block.middle) {
                    Some(next) => letters.push(next),
                    None => continue 'attempts,
                }
            }
        }

        None
    }
}

//---------------------------------------------------------------------------//
//                            Decode/Encode logic
//---------------------------------------------------------------------------//

/// This function reads one probability block of `n` letters.
fn read_block<R: ReadBytes>(data: &mut R, letter_count: usize) -> Result<LtrBlock> {
    let mut block = LtrBlock {
        start: Vec::with_capacity(letter_count),
        middle: Vec::with_capacity(letter_count),
        end: Vec::with_capacity(letter_count),
    };

    for _ in 0..letter_count {
        block.start.push(data.read_f32()?);
    }
    for _ in 0..letter_count {
        block.middle.push(data.read_f32()?);
    }
    for _ in 0..letter_count {
        block.end.push(data.read_f32()?);
    }

    Ok(block)
}

/// This function writes one probability block.
fn write_block<W: WriteBytes>(buffer: &mut W, block: &LtrBlock) -> Result<()> {
    for odd in &block.start {
        buffer.write_f32(*odd)?;
    }
    for odd in &block.middle {
        buffer.write_f32(*odd)?;
    }
    for odd in &block.end {
        buffer.write_f32(*odd)?;
    }

    Ok(())
}

impl Decodeable for Ltr {

    fn decode<R: ReadBytes>(data: &mut R, _extra_data: &Option<DecodeableExtraData>) -> Result<Self> {
        let signature = data.read_string_u8(4)
            .map_err(|_| ALibError::DecodingTruncatedSection("header"))?;
        if signature != SIGNATURE {
            return Err(ALibError::DecodingBadSignature(SIGNATURE.to_owned(), signature));
        }

        let version = data.read_string_u8(4)?;
        if version != VERSION {
            return Err(ALibError::DecodingUnsupportedVersion("LTR".to_owned(), version));
        }

        let letter_count = data.read_u8()?;
        if letter_count != 26 && letter_count != 28 {
            return Err(ALibError::DecodingUnsupportedVersion("LTR letter count".to_owned(), letter_count.to_string()));
        }
        let n = letter_count as usize;

        let singles = read_block(data, n)?;

        let mut doubles = Vec::with_capacity(n);
        for _ in 0..n {
            doubles.push(read_block(data, n)?);
        }

        let mut triples = Vec::with_capacity(n);
        for _ in 0..n {
            let mut row = Vec::with_capacity(n);
            for _ in 0..n {
                row.push(read_block(data, n)?);
            }
            triples.push(row);
        }

        Ok(Self {
            letter_count,
            singles,
            doubles,
            triples,
        })
    }
}

impl Encodeable for Ltr {

    fn encode<W: WriteBytes>(&mut self, buffer: &mut W, _extra_data: &Option<EncodeableExtraData>) -> Result<()> {
        buffer.write_string_u8(SIGNATURE)?;
        buffer.write_string_u8(VERSION)?;
        buffer.write_u8(self.letter_count)?;

        write_block(buffer, &self.singles)?;
        for block in &self.doubles {
            write_block(buffer, block)?;
        }
        for row in &self.triples {
            for block in row {
                write_block(buffer, block)?;
            }
        }

        Ok(())
    }
}
