//! Decoder configuration.

use crate::profile::UnitSystem;

/// Options applied to a whole decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecoderConfig {
    /// Check the header and file CRC values.
    pub verify_crc: bool,
    /// Display units of measured quantities.
    pub units: UnitSystem,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            verify_crc: true,
            units: UnitSystem::Metric,
        }
    }
}

impl DecoderConfig {
    /// The default configuration: CRC values are checked and measures are
    /// reported in metric units.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable checking of the header and file CRC values.
    pub fn with_crc_check(self, verify_crc: bool) -> Self {
        Self { verify_crc, ..self }
    }

    /// Select the unit system of measured quantities.
    pub fn with_units(self, units: UnitSystem) -> Self {
        Self { units, ..self }
    }
}
