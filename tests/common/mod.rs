#![allow(dead_code)]

use chainring::sans::check::Crc;

/// 2024-01-01T00:00:00Z, in seconds since the FIT epoch.
pub const NEW_YEAR: u32 = 1_073_001_600;

pub const ENUM: u8 = 0x00;
pub const UINT8: u8 = 0x02;
pub const STRING: u8 = 0x07;
pub const UINT16: u8 = 0x84;
pub const UINT32: u8 = 0x86;
pub const UINT32Z: u8 = 0x8C;

/// Assembles FIT documents record by record.
#[derive(Debug, Clone)]
pub struct Builder {
    body: Vec<u8>,
    header_size: u8,
}

impl Default for Builder {
    fn default() -> Self {
        Self::new()
    }
}

impl Builder {
    /// A document with a fourteen-byte header.
    pub fn new() -> Self {
        Self {
            body: Vec::new(),
            header_size: 14,
        }
    }

    /// A document with a twelve-byte header, carrying no header CRC.
    pub fn short() -> Self {
        Self {
            body: Vec::new(),
            header_size: 12,
        }
    }

    /// A little-endian definition of native fields `(number, size, base type)`.
    pub fn definition(self, slot: u8, global: u16, fields: &[(u8, u8, u8)]) -> Self {
        self.define(slot, 0, &global.to_le_bytes(), fields, None)
    }

    /// A big-endian definition of native fields.
    pub fn definition_be(self, slot: u8, global: u16, fields: &[(u8, u8, u8)]) -> Self {
        self.define(slot, 1, &global.to_be_bytes(), fields, None)
    }

    /// A little-endian definition also carrying developer fields
    /// `(number, size, developer data index)`.
    pub fn developer_definition(
        self,
        slot: u8,
        global: u16,
        fields: &[(u8, u8, u8)],
        developer: &[(u8, u8, u8)],
    ) -> Self {
        self.define(slot, 0, &global.to_le_bytes(), fields, Some(developer))
    }

    /// A data message with a normal header.
    pub fn data(mut self, slot: u8, content: &[u8]) -> Self {
        self.body.push(slot & 0x0F);
        self.body.extend_from_slice(content);
        self
    }

    /// A data message with a compressed timestamp header.
    pub fn compressed(mut self, slot: u8, offset: u8, content: &[u8]) -> Self {
        self.body.push(0x80 | (slot & 0x03) << 5 | (offset & 0x1F));
        self.body.extend_from_slice(content);
        self
    }

    /// Arbitrary record bytes.
    pub fn raw(mut self, r: &[u8]) -> Self {
        self.body.extend_from_slice(r);
        self
    }

    /// The document, declaring the true number of record bytes.
    pub fn build(&self) -> Vec<u8> {
        self.build_declaring(self.body.len() as u32)
    }

    /// The document, declaring an arbitrary number of record bytes.
    pub fn build_declaring(&self, data_size: u32) -> Vec<u8> {
        let mut r = vec![self.header_size, 0x20];
        r.extend_from_slice(&2132u16.to_le_bytes());
        r.extend_from_slice(&data_size.to_le_bytes());
        r.extend_from_slice(b".FIT");

        if self.header_size >= 14 {
            let crc = Crc::compute(&r);
            r.extend_from_slice(&crc.to_le_bytes());
        }

        r.extend_from_slice(&self.body);

        let crc = Crc::compute(&r);
        r.extend_from_slice(&crc.to_le_bytes());
        r
    }

    fn define(
        mut self,
        slot: u8,
        architecture: u8,
        global: &[u8],
        fields: &[(u8, u8, u8)],
        developer: Option<&[(u8, u8, u8)]>,
    ) -> Self {
        let flag = if developer.is_some() { 0x20 } else { 0x00 };

        self.body.push(0x40 | flag | (slot & 0x0F));
        self.body.extend_from_slice(&[0, architecture]);
        self.body.extend_from_slice(global);
        self.body.push(fields.len() as u8);

        for &(number, size, base_type) in fields {
            self.body.extend_from_slice(&[number, size, base_type]);
        }

        if let Some(developer) = developer {
            self.body.push(developer.len() as u8);

            for &(number, size, index) in developer {
                self.body.extend_from_slice(&[number, size, index]);
            }
        }

        self
    }
}

/// Recompute the trailing file CRC after editing a document.
pub fn reseal(r: &mut Vec<u8>) {
    r.truncate(r.len() - 2);
    let crc = Crc::compute(r);
    r.extend_from_slice(&crc.to_le_bytes());
}

/// A zero-padded string field of a fixed size.
pub fn text(s: &str, size: usize) -> Vec<u8> {
    let mut r = s.as_bytes().to_vec();
    r.resize(size, 0);
    r
}

/// Define slot 15 as a `field_description` and emit one description.
///
/// The native reference, if any, is `(message number, field number)`.
pub fn describe(
    builder: Builder,
    number: u8,
    base_type: u8,
    name: &str,
    units: &str,
    scale: u8,
    native: Option<(u16, u8)>,
) -> Builder {
    let (native_message, native_field) = native.unwrap_or((u16::MAX, u8::MAX));

    let mut content = vec![0, number, base_type];
    content.extend(text(name, 16));
    content.push(scale);
    content.extend(text(units, 8));
    content.extend_from_slice(&native_message.to_le_bytes());
    content.push(native_field);

    builder
        .definition(
            15,
            206,
            &[
                (0, 1, UINT8),
                (1, 1, UINT8),
                (2, 1, UINT8),
                (3, 16, STRING),
                (6, 1, UINT8),
                (8, 8, STRING),
                (14, 2, UINT16),
                (15, 1, UINT8),
            ],
        )
        .data(15, &content)
}

pub fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}
