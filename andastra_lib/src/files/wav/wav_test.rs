//---------------------------------------------------------------------------//
// Copyright (c) 2024-2026 The Andastra project contributors. All rights reserved.
//
// This file is part of the Andastra project,
// which can be found here: https://github.com/andastra-project/andastra.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/andastra-project/andastra/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! Module containing tests for decoding/encoding `Wav` containers.

use std::io::Cursor;

use crate::binary::WriteBytes;
use crate::files::*;

use super::{Wav, WavKind};

/// This function builds a minimal plausible RIFF/WAVE blob.
fn riff_blob() -> Vec<u8> {
    let mut data: Vec<u8> = vec![];
    data.write_string_u8("RIFF").unwrap();
    data.write_u32(100).unwrap();
    data.write_string_u8("WAVE").unwrap();
    data.extend_from_slice(&[0xAA; 92]);
    data
}

#[test]
fn test_wav_plain_riff() {
    let blob = riff_blob();
    let decoded = Wav::decode(&mut Cursor::new(&blob), &None).unwrap();
    assert_eq!(*decoded.kind(), WavKind::Plain);
    assert_eq!(decoded.data(), &blob);
}

#[test]
fn test_wav_voice_over_prefix() {
    let mut wav = Wav::voice_over(riff_blob());

    let mut encoded = vec![];
    wav.encode(&mut encoded, &None).unwrap();
    assert_eq!(&encoded[..4], &[0xFF, 0xF3, 0x60, 0xC4]);
    assert_eq!(&encoded[20..24], b"RIFF");

    let decoded = Wav::decode(&mut Cursor::new(&encoded), &None).unwrap();
    assert_eq!(*decoded.kind(), WavKind::VoiceOver);
    assert_eq!(decoded.data(), &riff_blob());

    let mut reencoded = vec![];
    Wav::decode(&mut Cursor::new(&encoded), &None).unwrap().encode(&mut reencoded, &None).unwrap();
    assert_eq!(encoded, reencoded);
}

#[test]
fn test_wav_sound_effect_prefix() {
    let mut wav = Wav::sound_effect(riff_blob());

    let mut encoded = vec![];
    wav.encode(&mut encoded, &None).unwrap();
    assert_eq!(encoded.len(), 470 + riff_blob().len());

    let decoded = Wav::decode(&mut Cursor::new(&encoded), &None).unwrap();
    assert_eq!(*decoded.kind(), WavKind::SoundEffect);
}

#[test]
fn test_wav_mp3_in_wav() {
    // A RIFF chunk declaring exactly 50 bytes marks MP3 data behind a fake header.
    let mut data: Vec<u8> = vec![];
    data.write_string_u8("RIFF").unwrap();
    data.write_u32(50).unwrap();
    data.extend_from_slice(&[0x00; 50]);
    data.extend_from_slice(&[0xFF, 0xFB, 0x90, 0x00]);

    let decoded = Wav::decode(&mut Cursor::new(&data), &None).unwrap();
    assert_eq!(*decoded.kind(), WavKind::Mp3);
    assert_eq!(decoded.data(), &[0xFF, 0xFB, 0x90, 0x00]);
}

#[test]
fn test_wav_garbage_is_refused() {
    let data = vec![0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08];
    assert!(Wav::decode(&mut Cursor::new(&data), &None).is_err());
}
