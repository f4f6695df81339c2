//! The crate error type.

use alloc::string::String;

use thiserror::Error;

use crate::{
    profile::MessageKind,
    sans::{field::ConversionError, header::FileHeaderError, schema::SchemaError},
};

/// Errors aborting the decode of a file.
#[derive(Debug, Error)]
pub enum Error {
    /// An error from the supplied reader.
    #[cfg(feature = "std")]
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// Unexpectedly reached the end of the data.
    #[error("Unexpectedly reached the end of the data.")]
    EndOfData,
    /// Incorrect file header.
    #[error("Incorrect file header: {0}")]
    Header(#[from] FileHeaderError),
    /// Global message number outside the protocol range.
    #[error("Global message number {0:#06x} is out of range.")]
    MessageNumber(u16),
    /// Architecture byte naming neither byte order.
    #[error("Unsupported architecture ({0}).")]
    Architecture(u8),
    /// Field definition with an unknown base type.
    #[error("Field {field} has an unknown base type ({code:#04x}).")]
    BaseType { field: u8, code: u8 },
    /// Field size not a whole number of base type elements.
    #[error("Field {field} size ({size}) is not a multiple of its base type width ({width}).")]
    FieldSize { field: u8, size: u8, width: usize },
    /// Developer field definition with no preceding description.
    #[error(
        "Developer field {field_number} of developer data index {developer_data_index} is not described."
    )]
    UndefinedDeveloperField {
        developer_data_index: u8,
        field_number: u8,
    },
    /// Data record on a local slot holding no definition.
    #[error("Data record references empty local slot {0}.")]
    EmptySlot(u8),
    /// A field value could not be converted.
    #[error("Could not parse field `{field}` of message `{message}`: {source}")]
    Parse {
        message: MessageKind,
        field: String,
        source: ConversionError,
    },
    /// Declared and consumed record byte counts differ.
    #[error("Declared ({declared}) and consumed ({consumed}) payload sizes do not match.")]
    PayloadSize { declared: usize, consumed: usize },
    /// Calculated and found CRC values do not match.
    #[error("Calculated ({calculated}) and found ({found}) CRC values do not match.")]
    CyclicRedundancyCheck { found: u16, calculated: u16 },
    /// Raw bytes did not match the layout compiled for a definition.
    #[error(transparent)]
    Schema(#[from] SchemaError),
}
