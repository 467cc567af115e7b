//---------------------------------------------------------------------------//
// Copyright (c) 2024-2026 The Andastra project contributors. All rights reserved.
//
// This file is part of the Andastra project,
// which can be found here: https://github.com/andastra-project/andastra.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/andastra-project/andastra/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! Module with the [`WriteBytes`] trait, to write known types to bytes.

use byteorder::{LittleEndian, WriteBytesExt};
use encoding_rs::{Encoding, WINDOWS_1252};

use std::io::Write;

use crate::error::Result;

//---------------------------------------------------------------------------//
//                            Trait Definition
//---------------------------------------------------------------------------//

/// This trait allow us to easily write all kind of data types to something that implements [`Write`].
pub trait WriteBytes: Write {

    /// This function tries to write an u8 value to `self`.
    ///
    /// ```rust
    /// use andastra_lib::binary::WriteBytes;
    ///
    /// let mut data = vec![];
    /// data.write_u8(10).unwrap();
    ///
    /// assert_eq!(data, vec![10]);
    /// ```
    fn write_u8(&mut self, value: u8) -> Result<()> {
        WriteBytesExt::write_u8(self, value).map_err(From::from)
    }

    /// This function tries to write an u16 value to `self`.
    fn write_u16(&mut self, value: u16) -> Result<()> {
        WriteBytesExt::write_u16::<LittleEndian>(self, value).map_err(From::from)
    }

    /// This function tries to write an u32 value to `self`.
    ///
    /// ```rust
    /// use andastra_lib::binary::WriteBytes;
    ///
    /// let mut data = vec![];
    /// data.write_u32(10).unwrap();
    ///
    /// assert_eq!(data, vec![10, 0, 0, 0]);
    /// ```
    fn write_u32(&mut self, value: u32) -> Result<()> {
        WriteBytesExt::write_u32::<LittleEndian>(self, value).map_err(From::from)
    }

    /// This function tries to write an u64 value to `self`.
    fn write_u64(&mut self, value: u64) -> Result<()> {
        WriteBytesExt::write_u64::<LittleEndian>(self, value).map_err(From::from)
    }

    /// This function tries to write an i8 value to `self`.
    fn write_i8(&mut self, value: i8) -> Result<()> {
        WriteBytesExt::write_i8(self, value).map_err(From::from)
    }

    /// This function tries to write an i16 value to `self`.
    fn write_i16(&mut self, value: i16) -> Result<()> {
        WriteBytesExt::write_i16::<LittleEndian>(self, value).map_err(From::from)
    }

    /// This function tries to write an i32 value to `self`.
    fn write_i32(&mut self, value: i32) -> Result<()> {
        WriteBytesExt::write_i32::<LittleEndian>(self, value).map_err(From::from)
    }

    /// This function tries to write an i64 value to `self`.
    fn write_i64(&mut self, value: i64) -> Result<()> {
        WriteBytesExt::write_i64::<LittleEndian>(self, value).map_err(From::from)
    }

    /// This function tries to write an f32 value to `self`.
    fn write_f32(&mut self, value: f32) -> Result<()> {
        WriteBytesExt::write_f32::<LittleEndian>(self, value).map_err(From::from)
    }

    /// This function tries to write an f64 value to `self`.
    fn write_f64(&mut self, value: f64) -> Result<()> {
        WriteBytesExt::write_f64::<LittleEndian>(self, value).map_err(From::from)
    }

    /// This function writes an UTF-8 String to `self`, as raw bytes.
    ///
    /// ```rust
    /// use andastra_lib::binary::WriteBytes;
    ///
    /// let mut data = vec![];
    /// data.write_string_u8("Waha").unwrap();
    ///
    /// assert_eq!(data, vec![87, 97, 104, 97]);
    /// ```
    fn write_string_u8(&mut self, string: &str) -> Result<()> {
        self.write_all(string.as_bytes()).map_err(From::from)
    }

    /// This function writes a String to `self`, mirroring the legacy fallback decode chain:
    /// ASCII passes through, non-ASCII text maps back to WINDOWS-1252 when every char is
    /// representable, and falls back to raw UTF-8 bytes otherwise.
    fn write_string_fallback(&mut self, string: &str) -> Result<()> {
        if string.is_ascii() {
            return self.write_all(string.as_bytes()).map_err(From::from);
        }

        let (encoded, _, had_errors) = WINDOWS_1252.encode(string);
        if had_errors {
            self.write_all(string.as_bytes()).map_err(From::from)
        } else {
            self.write_all(&encoded).map_err(From::from)
        }
    }

    /// This function writes a String to `self`, encoded with the provided legacy codepage.
    ///
    /// Unmappable chars are replaced with the codepage's replacement, as the talk-table
    /// writers of the original tools do.
    fn write_string_encoding(&mut self, string: &str, encoding: &'static Encoding) -> Result<()> {
        let (encoded, _, _) = encoding.encode(string);
        self.write_all(&encoded).map_err(From::from)
    }

    /// This function writes a String as a 00-Padded String of the provided `size` to `self`.
    ///
    /// If the String is longer than `size`, it gets truncated to fit.
    ///
    /// ```rust
    /// use andastra_lib::binary::WriteBytes;
    ///
    /// let mut data = vec![];
    /// data.write_string_u8_0padded("Waha", 6).unwrap();
    ///
    /// assert_eq!(data, vec![87, 97, 104, 97, 0, 0]);
    /// ```
    fn write_string_u8_0padded(&mut self, string: &str, size: usize) -> Result<()> {
        let bytes = string.as_bytes();
        let used = bytes.len().min(size);
        self.write_all(&bytes[..used])?;
        for _ in used..size {
            WriteBytesExt::write_u8(self, 0)?;
        }

        Ok(())
    }

    /// This function writes a String as a 00-Terminated String to `self`.
    fn write_string_u8_0terminated(&mut self, string: &str) -> Result<()> {
        self.write_string_fallback(string)?;
        WriteBytesExt::write_u8(self, 0).map_err(From::from)
    }

    /// This function writes a String as a Sized String with an u8 size prefix to `self`.
    ///
    /// This is the layout ResRef fields use inside GFF data blocks.
    fn write_sized_string_u8(&mut self, string: &str) -> Result<()> {
        WriteBytesExt::write_u8(self, string.len() as u8)?;
        self.write_all(string.as_bytes()).map_err(From::from)
    }

    /// This function writes a String as a Sized String with an u32 size prefix to `self`.
    ///
    /// This is the layout CExoString fields use inside GFF data blocks. Encoding mirrors
    /// the legacy fallback decode chain.
    ///
    /// ```rust
    /// use andastra_lib::binary::WriteBytes;
    ///
    /// let mut data = vec![];
    /// data.write_sized_string_u32("Waha").unwrap();
    ///
    /// assert_eq!(data, vec![4, 0, 0, 0, 87, 97, 104, 97]);
    /// ```
    fn write_sized_string_u32(&mut self, string: &str) -> Result<()> {
        let mut encoded = vec![];
        encoded.write_string_fallback(string)?;

        self.write_u32(encoded.len() as u32)?;
        self.write_all(&encoded).map_err(From::from)
    }
}

// Automatic implementation for everything that implements `Write`.
impl<W: Write> WriteBytes for W {}
