//---------------------------------------------------------------------------//
// Copyright (c) 2024-2026 The Andastra project contributors. All rights reserved.
//
// This file is part of the Andastra project,
// which can be found here: https://github.com/andastra-project/andastra.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/andastra-project/andastra/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! The 2DA operations of the patch engine: row changes, row additions, row
//! copies and column additions, with memory-slot capture.

use crate::error::{ALibError, Result};
use crate::files::twoda::TwoDA;

use super::memory::PatchMemory;

//---------------------------------------------------------------------------//
//                              Enum & Structs
//---------------------------------------------------------------------------//

/// How an operation picks his target row.
#[derive(Clone, Debug, PartialEq)]
pub enum RowSelector {

    /// By position.
    Index(usize),

    /// By row label, case-insensitive, first match.
    Label(String),

    /// By cell value under a column. More than one match is ambiguous.
    CellEquals(String, String),
}

/// What a `Store2DAMemory<n>` capture records.
#[derive(Clone, Debug, PartialEq)]
pub enum StoreSource {
    RowIndex,
    RowLabel,
    Column(String),
}

/// One 2DA operation.
#[derive(Clone, Debug, PartialEq)]
pub enum TwoDAOp {

    /// Overwrite cells of an existing row.
    ChangeRow {
        selector: RowSelector,
        values: Vec<(String, String)>,
        stores: Vec<(usize, StoreSource)>,
    },

    /// Append a new row.
    AddRow {
        label: Option<String>,
        values: Vec<(String, String)>,
        stores: Vec<(usize, StoreSource)>,
    },

    /// Append a copy of an existing row, then overwrite cells of the copy.
    CopyRow {
        selector: RowSelector,
        label: Option<String>,
        values: Vec<(String, String)>,
        stores: Vec<(usize, StoreSource)>,
    },

    /// Append a new column with a default value, then overwrite specific cells.
    AddColumn {
        header: String,
        default: String,
        values: Vec<(RowSelector, String)>,
    },
}

//---------------------------------------------------------------------------//
//                             Implementations
//---------------------------------------------------------------------------//

impl RowSelector {

    /// This function resolves the selector against a table.
    pub fn select(&self, table: &TwoDA, file: &str) -> Result<usize> {
        match self {
            Self::Index(index) => {
                if *index < table.rows().len() {
                    Ok(*index)
                } else {
                    Err(ALibError::SelectorNoMatch(index.to_string(), file.to_owned()))
                }
            }
            Self::Label(label) => table.row_index_by_label(label)
                .ok_or_else(|| ALibError::SelectorNoMatch(label.to_owned(), file.to_owned())),
            Self::CellEquals(column, value) => {
                let matches = table.row_indices_by_cell(column, value);
                match matches.len() {
                    0 => Err(ALibError::SelectorNoMatch(format!("{column}={value}"), file.to_owned())),
                    1 => Ok(matches[0]),
                    _ => Err(ALibError::AmbiguousRow(format!("{column}={value}"), file.to_owned())),
                }
            }
        }
    }
}

impl TwoDAOp {

    /// This function applies the operation to a table, resolving memory tokens
    /// in cell values and recording the declared captures.
    pub fn apply(&self, table: &mut TwoDA, memory: &mut PatchMemory, file: &str) -> Result<()> {
        match self {
            Self::ChangeRow { selector, values, stores } => {
                let row = selector.select(table, file)?;
                apply_values(table, row, values, memory, file)?;
                apply_stores(table, row, stores, memory)
            }

            Self::AddRow { label, values, stores } => {
                let label = match label {
                    Some(label) => memory.substitute(label, file)?,
                    None => table.rows().len().to_string(),
                };
                let row = table.add_row(&label);
                apply_values(table, row, values, memory, file)?;
                apply_stores(table, row, stores, memory)
            }

            Self::CopyRow { selector, label, values, stores } => {
                let source = selector.select(table, file)?;
                let label = match label {
                    Some(label) => memory.substitute(label, file)?,
                    None => table.rows().len().to_string(),
                };
                let row = table.copy_row(source, &label)?;
                apply_values(table, row, values, memory, file)?;
                apply_stores(table, row, stores, memory)
            }

            Self::AddColumn { header, default, values } => {
                let default = memory.substitute(default, file)?;
                table.add_column(header, &default);
                for (selector, value) in values {
                    let row = selector.select(table, file)?;
                    let value = memory.substitute(value, file)?;
                    table.set_cell(row, header, &value)?;
                }
                Ok(())
            }
        }
    }
}

/// This function writes a batch of `column=value` assignments into a row.
///
/// Assignments apply in declaration order: when two target the same cell, the
/// later one wins.
fn apply_values(table: &mut TwoDA, row: usize, values: &[(String, String)], memory: &PatchMemory, file: &str) -> Result<()> {
    for (column, value) in values {
        let value = memory.substitute(value, file)?;
        table.set_cell(row, column, &value)
            .map_err(|_| ALibError::ColumnNotFound(column.to_owned(), file.to_owned()))?;
    }

    Ok(())
}

/// This function records the declared memory captures for a row.
fn apply_stores(table: &TwoDA, row: usize, stores: &[(usize, StoreSource)], memory: &mut PatchMemory) -> Result<()> {
    for (slot, source) in stores {
        let value = match source {
            StoreSource::RowIndex => row.to_string(),
            StoreSource::RowLabel => table.rows()[row].label().to_owned(),
            StoreSource::Column(column) => table.cell(row, column)
                .map(|cell| cell.to_owned())
                .unwrap_or_default(),
        };
        memory.store_twoda(*slot, value);
    }

    Ok(())
}
