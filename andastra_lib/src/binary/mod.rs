//---------------------------------------------------------------------------//
// Copyright (c) 2024-2026 The Andastra project contributors. All rights reserved.
//
// This file is part of the Andastra project,
// which can be found here: https://github.com/andastra-project/andastra.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/andastra-project/andastra/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! Module with the traits and functions to read/write the binary layouts the
//! BioWare engines use.
//!
//! All multibyte integers and floats on disk are little-endian. Legacy text is
//! decoded with a fallback chain (UTF-8 strict, then WINDOWS-1252, which is
//! total) unless a talk-table language declares a specific codepage.

use encoding_rs::{BIG5, EUC_KR, GBK, SHIFT_JIS, WINDOWS_1250, WINDOWS_1252, Encoding};

pub use self::reader::ReadBytes;
pub use self::writer::WriteBytes;

mod reader;
mod writer;

#[cfg(test)] mod reader_test;
#[cfg(test)] mod writer_test;

/// This function returns the legacy codepage a talk-table language id declares.
///
/// Unknown language ids fall back to WINDOWS-1252, the codepage of the five
/// western localisations.
pub fn encoding_for_language(language_id: u32) -> &'static Encoding {
    match language_id {
        0..=4 => WINDOWS_1252,
        5 => WINDOWS_1250,
        128 => EUC_KR,
        129 => BIG5,
        130 => GBK,
        131 => SHIFT_JIS,
        _ => WINDOWS_1252,
    }
}
