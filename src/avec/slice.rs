//! Slice-based decoding.

use super::FitFile;
use crate::{config::DecoderConfig, error::Error};

/// Decode a document held in a slice, with the default configuration.
///
/// This method is also re-exported as `chainring::avec::decode_slice`.
pub fn decode(r: &[u8]) -> Result<FitFile, Error> {
    decode_with(r, DecoderConfig::default())
}

/// Decode a document held in a slice.
///
/// Bytes following the file CRC are ignored.
pub fn decode_with(r: &[u8], config: DecoderConfig) -> Result<FitFile, Error> {
    FitFile::decode(r, config)
}
