//---------------------------------------------------------------------------//
// Copyright (c) 2024-2026 The Andastra project contributors. All rights reserved.
//
// This file is part of the Andastra project,
// which can be found here: https://github.com/andastra-project/andastra.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/andastra-project/andastra/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! Module with the [`ReadBytes`] trait, to read bytes to known types.

use byteorder::{LittleEndian, ReadBytesExt};
use encoding_rs::{Encoding, WINDOWS_1252};

use std::io::{Read, Seek, SeekFrom};

use crate::error::{ALibError, Result};

//---------------------------------------------------------------------------//
//                            Trait Definition
//---------------------------------------------------------------------------//

/// This trait allow us to easily read all kind of data from a source that implements [`Read`] + [`Seek`].
pub trait ReadBytes: Read + Seek {

    /// This function returns the lenght of the data we're reading.
    ///
    /// ```rust
    /// use std::io::Cursor;
    ///
    /// use andastra_lib::binary::ReadBytes;
    ///
    /// let data = vec![1, 2, 3, 4];
    /// let mut cursor = Cursor::new(data);
    /// let len = cursor.len().unwrap();
    /// assert_eq!(len, 4);
    /// ```
    fn len(&mut self) -> Result<u64> {
        let old_pos = self.stream_position()?;
        let len = self.seek(SeekFrom::End(0))?;
        // Avoid seeking a third time when we were already at the end of the stream.
        if old_pos != len {
            self.seek(SeekFrom::Start(old_pos))?;
        }
        Ok(len)
    }

    /// This function returns if the data is empty.
    fn is_empty(&mut self) -> Result<bool> {
        self.len().map(|len| len == 0)
    }

    /// This function returns the amount of bytes left to read from the current position.
    fn bytes_left(&mut self) -> Result<u64> {
        let pos = self.stream_position()?;
        Ok(self.len()?.saturating_sub(pos))
    }

    /// This function returns the amount of bytes specified in the `size` argument as a [`Vec<u8>`].
    ///
    /// If `rewind` is true, the cursor will be reset to its original position once the data is returned.
    ///
    /// ```rust
    /// use std::io::Cursor;
    ///
    /// use andastra_lib::binary::ReadBytes;
    ///
    /// let data = vec![1, 2, 3, 4];
    /// let mut cursor = Cursor::new(data.to_vec());
    /// let data_read = cursor.read_slice(4, false).unwrap();
    /// assert_eq!(data, data_read);
    /// ```
    fn read_slice(&mut self, size: usize, rewind: bool) -> Result<Vec<u8>> {
        let mut data = vec![0; size];

        // If len is 0, just return.
        if size == 0 {
            return Ok(data)
        }

        self.read_exact(&mut data)?;

        if rewind {
            self.seek(SeekFrom::Current(-(size as i64)))?;
        }

        Ok(data)
    }

    /// This function tries to read an unsigned byte value from `self`.
    ///
    /// ```rust
    /// use std::io::Cursor;
    ///
    /// use andastra_lib::binary::ReadBytes;
    ///
    /// let data = vec![10];
    /// let mut cursor = Cursor::new(data);
    /// let data = cursor.read_u8().unwrap();
    ///
    /// assert_eq!(data, 10);
    /// assert_eq!(cursor.read_u8().is_err(), true);
    /// ```
    fn read_u8(&mut self) -> Result<u8> {
        ReadBytesExt::read_u8(self).map_err(From::from)
    }

    /// This function tries to read an u16 value from `self`.
    fn read_u16(&mut self) -> Result<u16> {
        ReadBytesExt::read_u16::<LittleEndian>(self).map_err(From::from)
    }

    /// This function tries to read an u32 value from `self`.
    ///
    /// ```rust
    /// use std::io::Cursor;
    ///
    /// use andastra_lib::binary::ReadBytes;
    ///
    /// let data = vec![10, 0, 0, 0, 10, 0, 0];
    /// let mut cursor = Cursor::new(data);
    /// let data = cursor.read_u32().unwrap();
    ///
    /// assert_eq!(data, 10);
    /// assert_eq!(cursor.read_u32().is_err(), true);
    /// ```
    fn read_u32(&mut self) -> Result<u32> {
        ReadBytesExt::read_u32::<LittleEndian>(self).map_err(From::from)
    }

    /// This function tries to read an u64 value from `self`.
    fn read_u64(&mut self) -> Result<u64> {
        ReadBytesExt::read_u64::<LittleEndian>(self).map_err(From::from)
    }

    /// This function tries to read a signed byte value from `self`.
    fn read_i8(&mut self) -> Result<i8> {
        ReadBytesExt::read_i8(self).map_err(From::from)
    }

    /// This function tries to read an i16 value from `self`.
    fn read_i16(&mut self) -> Result<i16> {
        ReadBytesExt::read_i16::<LittleEndian>(self).map_err(From::from)
    }

    /// This function tries to read an i32 value from `self`.
    ///
    /// ```rust
    /// use std::io::Cursor;
    ///
    /// use andastra_lib::binary::ReadBytes;
    ///
    /// let data = vec![254, 255, 255, 255];
    /// let mut cursor = Cursor::new(data);
    /// let data = cursor.read_i32().unwrap();
    ///
    /// assert_eq!(data, -2);
    /// assert_eq!(cursor.read_i32().is_err(), true);
    /// ```
    fn read_i32(&mut self) -> Result<i32> {
        ReadBytesExt::read_i32::<LittleEndian>(self).map_err(From::from)
    }

    /// This function tries to read an i64 value from `self`.
    fn read_i64(&mut self) -> Result<i64> {
        ReadBytesExt::read_i64::<LittleEndian>(self).map_err(From::from)
    }

    /// This function tries to read an f32 value from `self`.
    ///
    /// ```rust
    /// use std::io::Cursor;
    ///
    /// use andastra_lib::binary::ReadBytes;
    ///
    /// let data = vec![0, 0, 32, 65];
    /// let mut cursor = Cursor::new(data);
    /// let data = cursor.read_f32().unwrap();
    ///
    /// assert_eq!(data, 10.0);
    /// assert_eq!(cursor.read_f32().is_err(), true);
    /// ```
    fn read_f32(&mut self) -> Result<f32> {
        ReadBytesExt::read_f32::<LittleEndian>(self).map_err(From::from)
    }

    /// This function tries to read an f64 value from `self`.
    fn read_f64(&mut self) -> Result<f64> {
        ReadBytesExt::read_f64::<LittleEndian>(self).map_err(From::from)
    }

    /// This function tries to read an UTF-8 String value of the provided `size` from `self`.
    ///
    /// It may fail if the value contains invalid characters for an UTF-8 String.
    ///
    /// ```rust
    /// use std::io::Cursor;
    ///
    /// use andastra_lib::binary::ReadBytes;
    ///
    /// let data = vec![87, 97, 104, 97, 104, 97, 104, 97, 104, 97];
    /// let mut cursor = Cursor::new(data);
    /// let data = cursor.read_string_u8(10).unwrap();
    ///
    /// assert_eq!(data, "Wahahahaha");
    /// assert_eq!(cursor.read_string_u8(10).is_err(), true);
    /// ```
    fn read_string_u8(&mut self, size: usize) -> Result<String> {
        let mut data = vec![0; size];
        self.read_exact(&mut data)?;
        String::from_utf8(data).map_err(From::from)
    }

    /// This function tries to read a String value of the provided `size` from `self`,
    /// using the legacy fallback chain: UTF-8 strict, then WINDOWS-1252.
    ///
    /// WINDOWS-1252 is total over bytes, so this decode never fails for data of the correct lenght.
    ///
    /// ```rust
    /// use std::io::Cursor;
    ///
    /// use andastra_lib::binary::ReadBytes;
    ///
    /// let data = vec![87, 97, 104, 97, 0xE9];
    /// let mut cursor = Cursor::new(data);
    /// let data = cursor.read_string_fallback(5).unwrap();
    ///
    /// assert_eq!(data, "Wahaé");
    /// ```
    fn read_string_fallback(&mut self, size: usize) -> Result<String> {
        let mut data = vec![0; size];
        self.read_exact(&mut data)?;

        match std::str::from_utf8(&data) {
            Ok(string) => Ok(string.to_owned()),
            Err(_) => Ok(WINDOWS_1252.decode(&data).0.to_string()),
        }
    }

    /// This function tries to read a String value of the provided `size` from `self`,
    /// decoded with the provided legacy codepage.
    fn read_string_encoding(&mut self, size: usize, encoding: &'static Encoding) -> Result<String> {
        let mut data = vec![0; size];
        self.read_exact(&mut data)?;

        Ok(encoding.decode(&data).0.to_string())
    }

    /// This function tries to read a 00-Padded String value of the provided `size` from `self`.
    ///
    /// Note that `size` here is the full lenght of the String, including the 00 bytes that act as padding.
    ///
    /// ```rust
    /// use std::io::Cursor;
    ///
    /// use andastra_lib::binary::ReadBytes;
    ///
    /// let data = vec![87, 97, 104, 97, 104, 97, 0, 0, 0, 0];
    /// let mut cursor = Cursor::new(data);
    /// let data = cursor.read_string_u8_0padded(10).unwrap();
    ///
    /// assert_eq!(data, "Wahaha");
    /// assert_eq!(cursor.read_string_u8_0padded(10).is_err(), true);
    /// ```
    fn read_string_u8_0padded(&mut self, size: usize) -> Result<String> {
        let mut data = vec![0; size];
        self.read_exact(&mut data)?;

        let size_no_zeros = data.iter().position(|x| *x == 0).map_or(size, |x| x);
        String::from_utf8(data[..size_no_zeros].to_vec()).map_err(From::from)
    }

    /// This function tries to read a 00-Terminated (or NULL-Terminated) String value from `self`.
    ///
    /// Decoding uses the legacy fallback chain, as these strings appear in cp1252 data heaps.
    ///
    /// ```rust
    /// use std::io::Cursor;
    ///
    /// use andastra_lib::binary::ReadBytes;
    ///
    /// let data = vec![87, 97, 104, 97, 104, 97, 104, 97, 0];
    /// let mut cursor = Cursor::new(data);
    /// let data = cursor.read_string_u8_0terminated().unwrap();
    ///
    /// assert_eq!(data, "Wahahaha");
    /// assert_eq!(cursor.read_string_u8_0terminated().is_err(), true);
    /// ```
    fn read_string_u8_0terminated(&mut self) -> Result<String> {

        // Reads are expensive, so instead of reading byte by byte, we read a bunch of them
        // and start searching with memchr. If we can't find anything, read another bunch and try again.
        let mut buf = [0; 512];
        let mut data = vec![];
        let mut curr_pos = 0u64;
        let mut end_pos = 0u64;
        let mut found = false;

        loop {
            let read = self.read(&mut buf);
            match read {
                Ok(0) => break,
                Ok(read_bytes) => {
                    if let Some(pos) = memchr::memchr(0, &buf[..read_bytes]) {
                        end_pos = curr_pos + read_bytes as u64;
                        curr_pos += pos as u64;
                        data.extend_from_slice(&buf[..pos]);
                        found = true;
                        break;
                    } else {
                        curr_pos += read_bytes as u64;
                        data.extend_from_slice(&buf[..read_bytes]);
                    }
                }

                // If there is any error, just return it.
                Err(error) => return Err(error)?,
            }
        }

        // If we exited without finding the 00 byte, return an error.
        if !found {
            return Err(ALibError::DecodingString0TerminatedNo0Error);
        }

        // Move the cursor to the end of the value, so we can continue reading.
        // -1 because we need to end after the 00 byte.
        let new_pos = (end_pos - curr_pos - 1) as i64;
        self.seek(SeekFrom::Current(-new_pos))?;

        match std::str::from_utf8(&data) {
            Ok(string) => Ok(string.to_owned()),
            Err(_) => Ok(WINDOWS_1252.decode(&data).0.to_string()),
        }
    }

    /// This function tries to read a Sized String value from `self`, where the first byte is
    /// the size in bytes of the String.
    ///
    /// This is the layout ResRef fields use inside GFF data blocks.
    ///
    /// ```rust
    /// use std::io::Cursor;
    ///
    /// use andastra_lib::binary::ReadBytes;
    ///
    /// let data = vec![4, 87, 97, 104, 97];
    /// let mut cursor = Cursor::new(data);
    /// let data = cursor.read_sized_string_u8().unwrap();
    ///
    /// assert_eq!(data, "Waha");
    /// assert_eq!(cursor.read_sized_string_u8().is_err(), true);
    /// ```
    fn read_sized_string_u8(&mut self) -> Result<String> {
        let size = self.read_u8()? as u64;
        let left = self.bytes_left()?;
        if size > left {
            return Err(ALibError::DecodingIntegerOverflow(size, left));
        }

        self.read_string_fallback(size as usize)
    }

    /// This function tries to read a Sized String value from `self`, where the first four bytes
    /// are the size in bytes of the String.
    ///
    /// This is the layout CExoString fields use inside GFF data blocks. Decoding uses the
    /// legacy fallback chain.
    ///
    /// ```rust
    /// use std::io::Cursor;
    ///
    /// use andastra_lib::binary::ReadBytes;
    ///
    /// let data = vec![10, 0, 0, 0, 87, 97, 104, 97, 104, 97, 104, 97, 104, 97];
    /// let mut cursor = Cursor::new(data);
    /// let data = cursor.read_sized_string_u32().unwrap();
    ///
    /// assert_eq!(data, "Wahahahaha");
    /// assert_eq!(cursor.read_sized_string_u32().is_err(), true);
    /// ```
    fn read_sized_string_u32(&mut self) -> Result<String> {
        let size = self.read_u32()? as u64;
        let left = self.bytes_left()?;
        if size > left {
            return Err(ALibError::DecodingIntegerOverflow(size, left));
        }

        self.read_string_fallback(size as usize)
    }
}

// Automatic implementation for everything that implements `Read + Seek`.
impl<R: Read + Seek> ReadBytes for R {}
