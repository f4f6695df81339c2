//! Base types declared by field definitions.

use super::schema::{Primitive, Scalar};

/// A FIT base type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BaseType {
    Enum,
    SInt8,
    UInt8,
    SInt16,
    UInt16,
    SInt32,
    UInt32,
    String,
    Float32,
    Float64,
    UInt8z,
    UInt16z,
    UInt32z,
    Byte,
    SInt64,
    UInt64,
    UInt64z,
}

impl BaseType {
    /// Look up a base type by its code.
    ///
    /// The endian-ability flag in bit 7 is ignored. Any other bit outside
    /// the base type number makes the code unknown.
    pub fn from_code(code: u8) -> Option<Self> {
        Some(match code & 0x7F {
            0x00 => Self::Enum,
            0x01 => Self::SInt8,
            0x02 => Self::UInt8,
            0x03 => Self::SInt16,
            0x04 => Self::UInt16,
            0x05 => Self::SInt32,
            0x06 => Self::UInt32,
            0x07 => Self::String,
            0x08 => Self::Float32,
            0x09 => Self::Float64,
            0x0A => Self::UInt8z,
            0x0B => Self::UInt16z,
            0x0C => Self::UInt32z,
            0x0D => Self::Byte,
            0x0E => Self::SInt64,
            0x0F => Self::UInt64,
            0x10 => Self::UInt64z,
            _ => None?,
        })
    }

    /// The canonical code, including the endian-ability flag.
    pub fn code(self) -> u8 {
        match self {
            Self::Enum => 0x00,
            Self::SInt8 => 0x01,
            Self::UInt8 => 0x02,
            Self::SInt16 => 0x83,
            Self::UInt16 => 0x84,
            Self::SInt32 => 0x85,
            Self::UInt32 => 0x86,
            Self::String => 0x07,
            Self::Float32 => 0x88,
            Self::Float64 => 0x89,
            Self::UInt8z => 0x0A,
            Self::UInt16z => 0x8B,
            Self::UInt32z => 0x8C,
            Self::Byte => 0x0D,
            Self::SInt64 => 0x8E,
            Self::UInt64 => 0x8F,
            Self::UInt64z => 0x90,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Enum => "enum",
            Self::SInt8 => "sint8",
            Self::UInt8 => "uint8",
            Self::SInt16 => "sint16",
            Self::UInt16 => "uint16",
            Self::SInt32 => "sint32",
            Self::UInt32 => "uint32",
            Self::String => "string",
            Self::Float32 => "float32",
            Self::Float64 => "float64",
            Self::UInt8z => "uint8z",
            Self::UInt16z => "uint16z",
            Self::UInt32z => "uint32z",
            Self::Byte => "byte",
            Self::SInt64 => "sint64",
            Self::UInt64 => "uint64",
            Self::UInt64z => "uint64z",
        }
    }

    /// The primitive storing this base type.
    pub fn primitive(self) -> Primitive {
        match self {
            Self::Enum | Self::UInt8 | Self::UInt8z | Self::Byte => Primitive::U8,
            Self::String => Primitive::Char,
            Self::SInt8 => Primitive::I8,
            Self::SInt16 => Primitive::I16,
            Self::UInt16 | Self::UInt16z => Primitive::U16,
            Self::SInt32 => Primitive::I32,
            Self::UInt32 | Self::UInt32z => Primitive::U32,
            Self::SInt64 => Primitive::I64,
            Self::UInt64 | Self::UInt64z => Primitive::U64,
            Self::Float32 => Primitive::F32,
            Self::Float64 => Primitive::F64,
        }
    }

    pub fn width(self) -> usize {
        self.primitive().width()
    }

    /// The 'invalid' marker value of this base type.
    pub fn invalid(self) -> Scalar {
        match self {
            Self::Enum | Self::UInt8 | Self::Byte => Scalar::U8(u8::MAX),
            Self::UInt8z | Self::String => Scalar::U8(0),
            Self::SInt8 => Scalar::I8(i8::MAX),
            Self::SInt16 => Scalar::I16(i16::MAX),
            Self::UInt16 => Scalar::U16(u16::MAX),
            Self::UInt16z => Scalar::U16(0),
            Self::SInt32 => Scalar::I32(i32::MAX),
            Self::UInt32 => Scalar::U32(u32::MAX),
            Self::UInt32z => Scalar::U32(0),
            Self::SInt64 => Scalar::I64(i64::MAX),
            Self::UInt64 => Scalar::U64(u64::MAX),
            Self::UInt64z => Scalar::U64(0),
            Self::Float32 => Scalar::F32(f32::from_bits(u32::MAX)),
            Self::Float64 => Scalar::F64(f64::from_bits(u64::MAX)),
        }
    }

    /// Whether a value holds this base type's 'invalid' marker.
    ///
    /// Compares bit patterns, since the float markers are NaN.
    pub fn is_invalid(self, value: Scalar) -> bool {
        value.bits() == self.invalid().bits()
    }
}
