//! Cyclic redundancy checks over document bytes.

const CRC_TABLE: [u16; 16] = [
    0x0000, 0xCC01, 0xD801, 0x1400, 0xF001, 0x3C00, 0x2800, 0xE401, 0xA001, 0x6C00, 0x7800,
    0xB401, 0x5000, 0x9C01, 0x8801, 0x4400,
];

/// A running cyclic redundancy check.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Crc(u16);

impl Crc {
    pub fn new() -> Self {
        Self(0)
    }

    /// Accumulate a slice of bytes.
    pub fn update(&mut self, r: &[u8]) {
        self.0 = r.iter().fold(self.0, |acc, b| Self::byte(acc, *b));
    }

    pub fn value(self) -> u16 {
        self.0
    }

    /// Compute the check value of a complete slice.
    pub fn compute(r: &[u8]) -> u16 {
        let mut crc = Self::new();
        crc.update(r);
        crc.value()
    }

    fn byte(crc: u16, b: u8) -> u16 {
        let nibble = |crc: u16, n: u8| {
            let tmp = CRC_TABLE[(crc & 0xF) as usize];
            ((crc >> 4) & 0x0FFF) ^ tmp ^ CRC_TABLE[(n & 0xF) as usize]
        };

        nibble(nibble(crc, b), b >> 4)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_of_empty_input_is_zero() {
        assert_eq!(Crc::compute(&[]), 0);
    }

    #[test]
    fn incremental_matches_whole() {
        let r = b"\x0e\x10\x43\x08\x00\x00\x00\x00.FIT";

        let mut crc = Crc::new();
        crc.update(&r[..5]);
        crc.update(&r[5..]);

        assert_eq!(crc.value(), Crc::compute(r));
    }

    #[test]
    fn appending_the_check_value_yields_zero() {
        let mut r = b"\x0c\x10\x43\x08".to_vec();
        r.extend_from_slice(&Crc::compute(&r).to_le_bytes());

        assert_eq!(Crc::compute(&r), 0);
    }
}
