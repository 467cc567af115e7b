//---------------------------------------------------------------------------//
// Copyright (c) 2024-2026 The Andastra project contributors. All rights reserved.
//
// This file is part of the Andastra project,
// which can be found here: https://github.com/andastra-project/andastra.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/andastra-project/andastra/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! This module contains all kind of errors used inside this crate.
//!
//! Not much to say appart of that, really.

use thiserror::Error;

/// Custom `Result` type, to always return our custom error.
pub type Result<T, E = ALibError> = core::result::Result<T, E>;

/// Custom error type for the lib.
#[derive(Error, Debug)]
pub enum ALibError {

    //-------------------------------------------------------------------------//
    // Parse errors.
    //-------------------------------------------------------------------------//

    #[error("Invalid signature: expected one of \"{0}\", found \"{1}\".")]
    DecodingBadSignature(String, String),

    #[error("Unsupported version \"{1}\" for a \"{0}\" file.")]
    DecodingUnsupportedVersion(String, String),

    #[error("The {0} section of this file is incomplete or out of bounds.")]
    DecodingTruncatedSection(&'static str),

    #[error("Field index {0} is out of range: the field array has {1} entries.")]
    DecodingFieldIndexOutOfRange(u32, usize),

    #[error("Struct index {0} is out of range: the struct array has {1} entries.")]
    DecodingStructIndexOutOfRange(u32, usize),

    #[error("Label index {0} is out of range: the label array has {1} entries.")]
    DecodingLabelIndexOutOfRange(u32, usize),

    #[error("Struct {0} is referenced more than once: the struct graph of this file is cyclic.")]
    DecodingCyclicGraph(u32),

    #[error("A ResRef has a declared length of {0} bytes, but his length should be less or equal than 16.")]
    DecodingOversizedResRef(usize),

    #[error("A localized string declares a total size of {0} bytes, but his substrings amount to {1} bytes.")]
    DecodingLocalizedStringLengthMismatch(u32, u32),

    #[error("A length prefix of {0} bytes exceeds the {1} bytes left in the data.")]
    DecodingIntegerOverflow(u64, u64),

    #[error("Error trying to decode \"{0}\" as boolean: invalid value.")]
    DecodingBoolError(u8),

    #[error("There are no more bytes to decode in the data you provided.")]
    DecodingNotMoreBytesToDecode,

    #[error("Error trying to read an 00-Terminated String: No byte 00 found.")]
    DecodingString0TerminatedNo0Error,

    #[error("This file's reported size is '{0}' bytes, but we expected it to be '{1}' bytes. This usually means the file is corrupted, or the decoding logic for it is broken.")]
    DecodingMismatchSizeError(usize, usize),

    #[error("The value \"{0}\" is not a valid ResRef: ResRefs are up to 16 ASCII characters, without control or non-ASCII bytes.")]
    InvalidResRef(String),

    #[error("The value \"{0}\" is not a valid field label: labels are up to 16 ASCII characters.")]
    InvalidLabel(String),

    #[error("This is a compressed resource and decompression is not supported. This means this resource cannot be opened by this lib.")]
    DataCannotBeDecompressed,

    #[error("\"{0}\" is not a known resource type extension.")]
    UnknownResourceTypeExtension(String),

    #[error("Error trying to parse the line {0} of a layout file: {1}.")]
    DecodingLayoutLineError(usize, String),

    #[error("Error trying to convert the following value to a bool: {0}.")]
    ParseBoolError(String),

    //-------------------------------------------------------------------------//
    // Semantic errors.
    //-------------------------------------------------------------------------//

    #[error("The resource \"{0}.{1}\" hasn't been found in the installation.")]
    UnknownResource(String, String),

    #[error("The memory token {0}{1} is referenced in \"{2}\" before any operation stored a value for it.")]
    UndefinedMemoryToken(&'static str, usize, String),

    #[error("The row selector \"{0}\" matches no row of \"{1}\".")]
    SelectorNoMatch(String, String),

    #[error("The row selector \"{0}\" matches more than one row of \"{1}\".")]
    AmbiguousRow(String, String),

    #[error("The path \"{0}\" doesn't match any field of this file.")]
    InvalidPath(String),

    #[error("The column \"{0}\" hasn't been found in \"{1}\".")]
    ColumnNotFound(String, String),

    #[error("The StrRef {0} is out of range: the talk table has {1} entries.")]
    StrRefOutOfRange(i32, usize),

    #[error("\"{0}\" is not a known sound-set slot label.")]
    UnknownSoundSetSlot(String),

    #[error("The patch configuration is malformed: {0}.")]
    MalformedChangeSet(String),

    #[error("No supported game installation has been found at \"{0}\".")]
    GameNotDetected(String),

    #[error("No module named \"{0}\" has been found in the installation.")]
    ModuleNotFound(String),

    #[error("The patch run has been cancelled.")]
    PatchCancelled,

    //-------------------------------------------------------------------------//
    // Io and tool errors.
    //-------------------------------------------------------------------------//

    #[error("Error while trying to read the following file/folder: {0}. \
        This means that path may not be readable (permissions? other programs locking access to it?) or may not exists at all.")]
    ReadFileFolderError(String),

    #[error("Error while trying to write the following file: {0}.")]
    WriteFailed(String),

    #[error("Error while compiling the script \"{0}\": {1}")]
    CompileError(String, String),

    //-------------------------------------------------------------------------//
    // Wrapped errors.
    //-------------------------------------------------------------------------//

    /// Represents all other cases of `std::io::Error`.
    #[error(transparent)]
    IOError(#[from] std::io::Error),

    #[error(transparent)]
    DecodeIntError(#[from] std::num::ParseIntError),

    #[error(transparent)]
    DecodeFloatError(#[from] std::num::ParseFloatError),

    #[error(transparent)]
    DecodeUTF8Error(#[from] std::string::FromUtf8Error),

    /// Represents all other cases of `csv::Error`.
    #[error(transparent)]
    CSVError(#[from] csv::Error),

    /// Represents all other cases of `serde_json::Error`.
    #[error(transparent)]
    JsonError(#[from] serde_json::Error),
}
