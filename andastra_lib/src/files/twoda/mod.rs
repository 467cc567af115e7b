//---------------------------------------------------------------------------//
// Copyright (c) 2024-2026 The Andastra project contributors. All rights reserved.
//
// This file is part of the Andastra project,
// which can be found here: https://github.com/andastra-project/andastra.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/andastra-project/andastra/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! 2DA files are the tabular data files of the BioWare engines: rules, prices,
//! appearances,... anything shaped like a spreadsheet lives in one of these.
//!
//! # 2DA Structure
//!
//! ## Header
//!
//! | Bytes | Type     | Data                                |
//! | ----- | -------- | ----------------------------------- |
//! | 4     | StringU8 | File signature. Always `2DA `.      |
//! | 4     | StringU8 | Version. Always `V2.b`.             |
//! | 1     | [u8]     | Newline (`0x0A`).                   |
//!
//! ## Data
//!
//! | Bytes | Type       | Data                                                          |
//! | ----- | ---------- | ------------------------------------------------------------- |
//! | *     | StringU8   | Column headers, each terminated by `\t`, the list by `0x00`.  |
//! | 4     | [u32]      | Amount of rows on the table.                                  |
//! | *     | StringU8   | Row labels, each terminated by `\t`.                          |
//! | 2×r×c | [u16]      | Cell offsets into the value heap, row-major.                  |
//! | 2     | [u16]      | Size of the value heap, in bytes.                             |
//! | *     | StringU8   | The value heap: NUL-terminated strings, deduplicated.         |
//!
//! Equal cell values share a single heap entry. The empty cell is stored as the
//! literal token `****`; in memory it's an empty string. The round-trip law of
//! this codec is logical: re-encoding a foreign table keeps the same headers,
//! labels and cells, but may lay the heap out differently.

use csv::{ReaderBuilder, WriterBuilder};
use getset::Getters;

use std::collections::HashMap;
use std::io::{Read, Seek, Write};

use crate::binary::{ReadBytes, WriteBytes};
use crate::error::{ALibError, Result};
use crate::files::{Decodeable, DecodeableExtraData, Encodeable, EncodeableExtraData};

/// Extension used by 2DA files.
pub const EXTENSION: &str = ".2da";

/// This represents the value that every 2DA file has in their first 4 bytes.
const SIGNATURE: &str = "2DA ";

/// Version used by 2DA files. We've only seen V2.b on Odyssey, so we stick with that one.
const VERSION: &str = "V2.b";

/// On-disk token for an empty cell.
const EMPTY_CELL: &str = "****";

#[cfg(test)] mod twoda_test;

//---------------------------------------------------------------------------//
//                              Enum & Structs
//---------------------------------------------------------------------------//

/// This stores the data of a decoded 2DA file in memory.
///
/// Headers and row labels are matched case-insensitively and stored
/// case-preserving. Every row has exactly one cell per header.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TwoDA {

    /// The column headers of the table.
    headers: Vec<String>,

    /// The rows of the table.
    rows: Vec<TwoDARow>,
}

/// A row of a 2DA file: a label plus one cell per column.
#[derive(Clone, Debug, Default, PartialEq, Getters)]
#[getset(get = "pub")]
pub struct TwoDARow {

    /// The label of the row. Usually, but not always, his index.
    label: String,

    /// The cells of the row, in column order. An empty string is an empty cell.
    cells: Vec<String>,
}

//---------------------------------------------------------------------------//
//                          Implementation of TwoDA
//---------------------------------------------------------------------------//

impl TwoDA {

    /// This function creates a new empty 2DA with the provided column headers.
    pub fn new(headers: &[&str]) -> Self {
        Self {
            headers: headers.iter().map(|header| header.to_string()).collect(),
            rows: vec![],
        }
    }

    /// This function returns the column headers of the table.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// This function returns the rows of the table.
    pub fn rows(&self) -> &[TwoDARow] {
        &self.rows
    }

    /// This function returns the position of a column, matched case-insensitively.
    pub fn column_index(&self, header: &str) -> Option<usize> {
        self.headers.iter().position(|known| known.eq_ignore_ascii_case(header))
    }

    /// This function returns the position of the first row with the provided label,
    /// matched case-insensitively.
    pub fn row_index_by_label(&self, label: &str) -> Option<usize> {
        self.rows.iter().position(|row| row.label.eq_ignore_ascii_case(label))
    }

    /// This function returns the positions of every row whose cell under the provided
    /// column equals the provided value.
    pub fn row_indices_by_cell(&self, column: &str, value: &str) -> Vec<usize> {
        match self.column_index(column) {
            Some(column) => self.rows.iter()
                .enumerate()
                .filter(|(_, row)| row.cells[column] == value)
                .map(|(index, _)| index)
                .collect(),
            None => vec![],
        }
    }

    /// This function returns the cell under the provided row and column, if both exist.
    pub fn cell(&self, row: usize, column: &str) -> Option<&str> {
        let column = self.column_index(column)?;
        self.rows.get(row).map(|row| &*row.cells[column])
    }

    /// This function sets the cell under the provided row and column.
    pub fn set_cell(&mut self, row: usize, column: &str, value: &str) -> Result<()> {
        let column_index = self.column_index(column)
            .ok_or_else(|| ALibError::ColumnNotFound(column.to_owned(), "2da".to_owned()))?;
        let row = self.rows.get_mut(row)
            .ok_or_else(|| ALibError::SelectorNoMatch(row.to_string(), "2da".to_owned()))?;
        row.cells[column_index] = value.to_owned();

        Ok(())
    }

    /// This function appends a new row with the provided label, with every cell empty,
    /// and returns his index.
    pub fn add_row(&mut self, label: &str) -> usize {
        self.rows.push(TwoDARow {
            label: label.to_owned(),
            cells: vec![String::new(); self.headers.len()],
        });
        self.rows.len() - 1
    }

    /// This function appends a copy of an existing row under a new label, returning the
    /// new row's index.
    pub fn copy_row(&mut self, source: usize, label: &str) -> Result<usize> {
        let mut row = self.rows.get(source)
            .ok_or_else(|| ALibError::SelectorNoMatch(source.to_string(), "2da".to_owned()))?
            .clone();
        row.label = label.to_owned();
        self.rows.push(row);

        Ok(self.rows.len() - 1)
    }

    /// This function appends a new column with the provided default value on every
    /// existing row.
    pub fn add_column(&mut self, header: &str, default: &str) {
        self.headers.push(header.to_owned());
        for row in &mut self.rows {
            row.cells.push(default.to_owned());
        }
    }

    /// This function replaces the label of the provided row.
    pub fn set_row_label(&mut self, row: usize, label: &str) -> Result<()> {
        let row = self.rows.get_mut(row)
            .ok_or_else(|| ALibError::SelectorNoMatch(row.to_string(), "2da".to_owned()))?;
        row.label = label.to_owned();

        Ok(())
    }

    //--------------------------------------------------------//
    // CSV surface.
    //--------------------------------------------------------//

    /// This function exports the table as CSV: a header record with an empty label
    /// column, then one record per row. Empty cells export as `****`.
    pub fn csv_export<W: Write>(&self, writer: W) -> Result<()> {
        let mut writer = WriterBuilder::new().from_writer(writer);

        let mut header_record = vec![String::new()];
        header_record.extend(self.headers.iter().cloned());
        writer.write_record(&header_record)?;

        for row in &self.rows {
            let mut record = vec![row.label.to_owned()];
            record.extend(row.cells.iter().map(|cell| if cell.is_empty() { EMPTY_CELL.to_owned() } else { cell.to_owned() }));
            writer.write_record(&record)?;
        }

        writer.flush()?;
        Ok(())
    }

    /// This function imports a table from his CSV projection.
    pub fn csv_import<R: Read>(reader: R) -> Result<Self> {
        let mut reader = ReaderBuilder::new().has_headers(false).from_reader(reader);
        let mut records = reader.records();

        let headers = match records.next() {
            Some(record) => record?.iter().skip(1).map(|header| header.to_owned()).collect::<Vec<_>>(),
            None => return Err(ALibError::DecodingTruncatedSection("csv header")),
        };

        let mut table = Self::default();
        table.headers = headers;

        for record in records {
            let record = record?;
            let label = record.get(0).unwrap_or_default().to_owned();
            let mut cells = record.iter()
                .skip(1)
                .map(|cell| if cell == EMPTY_CELL { String::new() } else { cell.to_owned() })
                .collect::<Vec<_>>();
            cells.resize(table.headers.len(), String::new());

            table.rows.push(TwoDARow { label, cells });
        }

        Ok(table)
    }
}

impl TwoDARow {

    /// This function creates a new row from a label and his cells.
    pub fn new(label: &str, cells: Vec<String>) -> Self {
        Self {
            label: label.to_owned(),
            cells,
        }
    }
}

//---------------------------------------------------------------------------//
//                            Decode/Encode logic
//---------------------------------------------------------------------------//

impl Decodeable for TwoDA {

    fn decode<R: ReadBytes>(data: &mut R, _extra_data: &Option<DecodeableExtraData>) -> Result<Self> {
        let signature = data.read_string_u8(4)
            .map_err(|_| ALibError::DecodingTruncatedSection("header"))?;
        if signature != SIGNATURE {
            return Err(ALibError::DecodingBadSignature(SIGNATURE.to_owned(), signature));
        }

        let version = data.read_string_u8(4)?;
        if version != VERSION {
            return Err(ALibError::DecodingUnsupportedVersion("2DA".to_owned(), version));
        }

        if data.read_u8()? != b'\n' {
            return Err(ALibError::DecodingTruncatedSection("header"));
        }

        // Column headers: tab-terminated tokens until the NUL that closes the list.
        let mut headers = vec![];
        let mut current = String::new();
        loop {
            match data.read_u8()? {
                0 => break,
                b'\t' => headers.push(std::mem::take(&mut current)),
                byte => current.push(byte as char),
            }
        }

        let row_count = data.read_u32()? as usize;

        let mut labels = Vec::with_capacity(row_count);
        let mut current = String::new();
        while labels.len() < row_count {
            match data.read_u8()? {
                b'\t' => labels.push(std::mem::take(&mut current)),
                byte => current.push(byte as char),
            }
        }

        let cell_count = row_count * headers.len();
        let mut offsets = Vec::with_capacity(cell_count);
        for _ in 0..cell_count {
            offsets.push(data.read_u16()?);
        }

        let heap_size = data.read_u16()? as usize;
        let heap_start = data.stream_position()?;
        if heap_start + heap_size as u64 > data.len()? {
            return Err(ALibError::DecodingTruncatedSection("value heap"));
        }
        let heap = data.read_slice(heap_size, false)?;

        let mut rows = Vec::with_capacity(row_count);
        for (row_index, label) in labels.into_iter().enumerate() {
            let mut cells = Vec::with_capacity(headers.len());
            for column_index in 0..headers.len() {
                let offset = offsets[row_index * headers.len() + column_index] as usize;
                if offset >= heap.len() {
                    return Err(ALibError::DecodingTruncatedSection("value heap"));
                }

                let end = memchr::memchr(0, &heap[offset..])
                    .map(|end| offset + end)
                    .ok_or(ALibError::DecodingTruncatedSection("value heap"))?;
                let value = String::from_utf8_lossy(&heap[offset..end]).to_string();

                cells.push(if value == EMPTY_CELL { String::new() } else { value });
            }
            rows.push(TwoDARow { label, cells });
        }

        Ok(Self {
            headers,
            rows,
        })
    }
}

impl Encodeable for TwoDA {

    fn encode<W: WriteBytes>(&mut self, buffer: &mut W, _extra_data: &Option<EncodeableExtraData>) -> Result<()> {
        buffer.write_string_u8(SIGNATURE)?;
        buffer.write_string_u8(VERSION)?;
        buffer.write_u8(b'\n')?;

        for header in &self.headers {
            buffer.write_string_u8(header)?;
            buffer.write_u8(b'\t')?;
        }
        buffer.write_u8(0)?;

        buffer.write_u32(self.rows.len() as u32)?;

        for row in &self.rows {
            buffer.write_string_u8(&row.label)?;
            buffer.write_u8(b'\t')?;
        }

        // The heap dedupes verbatim-equal values into a single entry, in
        // first-use order.
        let mut heap: Vec<u8> = vec![];
        let mut known: HashMap<&str, u16> = HashMap::new();
        let mut offsets = Vec::with_capacity(self.rows.len() * self.headers.len());

        for row in &self.rows {
            for cell in &row.cells {
                let value: &str = if cell.is_empty() { EMPTY_CELL } else { cell };
                let offset = match known.get(value) {
                    Some(offset) => *offset,
                    None => {
                        let offset = heap.len() as u16;
                        heap.extend_from_slice(value.as_bytes());
                        heap.push(0);
                        known.insert(value, offset);
                        offset
                    }
                };
                offsets.push(offset);
            }
        }

        for offset in offsets {
            buffer.write_u16(offset)?;
        }

        buffer.write_u16(heap.len() as u16)?;
        buffer.write_all(&heap)?;

        Ok(())
    }
}
