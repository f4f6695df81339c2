//! Reader-based decoding.
//!
//! _Requires Cargo feature `std`._

use std::io::Read;

use super::FitFile;
use crate::{config::DecoderConfig, error::Error, sans::stream::IoSource};

/// Decode a document from a reader, with the default configuration.
///
/// This method is also re-exported as `chainring::avec::decode_reader`.
///
/// _Requires Cargo feature `std`._
pub fn decode(r: &mut impl Read) -> Result<FitFile, Error> {
    decode_with(r, DecoderConfig::default())
}

/// Decode a document from a reader.
///
/// The reader is not read past the file CRC.
pub fn decode_with(r: &mut impl Read, config: DecoderConfig) -> Result<FitFile, Error> {
    FitFile::decode(IoSource(r), config)
}
