//! Document and record headers.

use tartan_bitfield::bitfield;
use thiserror::Error;
use zerocopy::FromBytes;

/// Smallest accepted document header length.
pub const MIN_HEADER_SIZE: u8 = 12;

/// Document header length at which a header CRC is present.
pub const CRC_HEADER_SIZE: u8 = 14;

/// Oldest accepted protocol version (1.0).
pub const MIN_PROTOCOL_VERSION: u8 = 0x10;

/// An error decoding a document header.
#[derive(Debug, Error)]
pub enum FileHeaderError {
    /// Header shorter than the fixed prefix.
    #[error("Bad header size ({0}).")]
    HeaderSize(u8),
    /// Protocol version older than supported.
    #[error("Bad protocol version ({0:#04x}).")]
    ProtocolVersion(u8),
    /// Incorrect file type marker.
    #[error("Bad data type ({0:?}).")]
    DataType([u8; 4]),
}

/// A decoded document header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileHeader {
    pub header_size: u8,
    pub protocol_version: u8,
    pub profile_version: u16,
    /// Number of record bytes following the header.
    pub data_size: u32,
    /// Header check value, when the header is long enough to carry one.
    pub crc: Option<u16>,
}

impl FileHeader {
    /// Decode and validate the fixed twelve-byte prefix of a document header.
    pub fn decode(r: [u8; 12]) -> Result<Self, FileHeaderError> {
        #[repr(C, packed)]
        #[derive(FromBytes)]
        struct Prefix {
            header_size: u8,
            protocol_version: u8,
            profile_version: [u8; 2],
            data_size: [u8; 4],
            data_type: [u8; 4],
        }

        let Prefix {
            header_size,
            protocol_version,
            profile_version,
            data_size,
            data_type,
        } = zerocopy::transmute!(r);

        if header_size < MIN_HEADER_SIZE {
            Err(FileHeaderError::HeaderSize(header_size))?;
        }

        if protocol_version < MIN_PROTOCOL_VERSION {
            Err(FileHeaderError::ProtocolVersion(protocol_version))?;
        }

        if &data_type != b".FIT" {
            Err(FileHeaderError::DataType(data_type))?;
        }

        Ok(Self {
            header_size,
            protocol_version,
            profile_version: u16::from_le_bytes(profile_version),
            data_size: u32::from_le_bytes(data_size),
            crc: None,
        })
    }

    /// Number of header bytes following the fixed prefix.
    pub fn extension_len(&self) -> usize {
        usize::from(self.header_size - MIN_HEADER_SIZE)
    }
}

/// The class of message following a record header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageClass {
    Definition,
    Data,
}

/// A decoded record header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordHeader {
    pub class: MessageClass,
    /// Local message slot (0 to 15) naming the applicable definition.
    pub local_slot: u8,
    /// Whether a definition message carries developer field definitions.
    pub has_developer_data: bool,
    /// Time offset of a compressed-timestamp header.
    pub time_offset: Option<u8>,
}

impl RecordHeader {
    pub fn decode(r: u8) -> Self {
        bitfield! {
            struct Header(u8) {
                [7] is_compressed,
            }
        }

        if Header(r).is_compressed() {
            bitfield! {
                struct CompressedHeader(u8) {
                    [0..5] time_offset: u8,
                    [5..7] local_message: u8,
                }
            }

            let header = CompressedHeader(r);

            Self {
                class: MessageClass::Data,
                local_slot: header.local_message(),
                has_developer_data: false,
                time_offset: Some(header.time_offset()),
            }
        } else {
            bitfield! {
                struct NormalHeader(u8) {
                    [0..4] local_message: u8,
                    [5] is_developer,
                    [6] is_definition,
                }
            }

            let header = NormalHeader(r);

            let class = if header.is_definition() {
                MessageClass::Definition
            } else {
                MessageClass::Data
            };

            Self {
                class,
                local_slot: header.local_message(),
                has_developer_data: header.is_definition() && header.is_developer(),
                time_offset: None,
            }
        }
    }
}
