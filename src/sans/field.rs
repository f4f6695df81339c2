//! Field descriptors and their base conversion rules.

use alloc::{borrow::Cow, string::String, vec::Vec};

use thiserror::Error;

use super::{
    base::BaseType,
    context::fit_time,
    dispatch::Dispatch,
    schema::Scalar,
    value::{FieldSource, FieldValue, RawValue, Value},
};
use crate::profile::{
    enums::EnumTable,
    units::{Quantity, UnitSystem},
};

/// An error converting a raw field value.
#[derive(Debug, Error)]
pub enum ConversionError {
    /// A rule needing an integer received a float or negative value.
    #[error("Expected a non-negative integer, found {0:?}.")]
    NotInteger(Scalar),
    /// A string field held malformed text.
    #[error("Invalid UTF-8 in string value: {0}.")]
    Utf8(#[from] alloc::string::FromUtf8Error),
    /// A timestamp could not be represented.
    #[error("Timestamp out of range ({0}).")]
    Timestamp(i64),
}

/// A rule turning a raw value into a display value.
#[derive(Debug, Clone, Copy)]
pub enum Conversion {
    /// Keep the value, annotated with units (empty for none).
    Raw(&'static str),
    /// `raw / scale - offset`.
    Scaled {
        scale: f64,
        offset: f64,
        units: &'static str,
    },
    /// Look the code up in an enumeration.
    Enum(&'static EnumTable),
    /// Assemble text, stopping at the first zero byte.
    String,
    Bool,
    /// Seconds since the FIT epoch, in UTC.
    Timestamp,
    /// Seconds since the FIT epoch, in device local time.
    LocalTimestamp,
    /// `raw / scale - offset` in the metric base unit of a quantity, then
    /// converted to the configured unit system.
    Measure {
        quantity: Quantity,
        scale: f64,
        offset: f64,
    },
    /// Decompose an integer into named bit ranges.
    Bits(&'static [Component]),
}

/// A named bit range of a composite field.
#[derive(Debug, Clone, Copy)]
pub struct Component {
    pub name: &'static str,
    pub shift: u8,
    pub bits: u8,
    pub conversion: Conversion,
}

impl Component {
    pub const fn new(name: &'static str, shift: u8, bits: u8, conversion: Conversion) -> Self {
        Self {
            name,
            shift,
            bits,
            conversion,
        }
    }
}

impl Conversion {
    pub const NONE: Self = Self::Raw("");

    pub const fn units(units: &'static str) -> Self {
        Self::Raw(units)
    }

    pub const fn scaled(scale: f64, units: &'static str) -> Self {
        Self::Scaled {
            scale,
            offset: 0.0,
            units,
        }
    }

    pub const fn measure(quantity: Quantity, scale: f64, offset: f64) -> Self {
        Self::Measure {
            quantity,
            scale,
            offset,
        }
    }

    /// Display units of converted values.
    pub fn display_units(&self, system: UnitSystem) -> Option<&'static str> {
        match *self {
            Self::Raw(u) | Self::Scaled { units: u, .. } if !u.is_empty() => Some(u),
            Self::Measure { quantity, .. } => Some(system.unit(quantity)),
            _ => None,
        }
    }

    /// Convert a raw value, returning it with any named components.
    pub fn apply(
        &self,
        raw: &RawValue,
        base_type: BaseType,
        system: UnitSystem,
    ) -> Result<(Value, Vec<(&'static str, Value)>), ConversionError> {
        if base_type == BaseType::String || matches!(self, Self::String) {
            return Ok((text(raw)?, Vec::new()));
        }

        let mut components = Vec::new();

        let value = match raw {
            RawValue::Scalar(s) if base_type.is_invalid(*s) => Value::Invalid,
            RawValue::Scalar(s) => self.convert(*s, system, &mut components)?,
            RawValue::Array(items) => {
                let values = items
                    .iter()
                    .map(|s| {
                        if base_type.is_invalid(*s) {
                            Ok(Value::Invalid)
                        } else {
                            self.convert(*s, system, &mut Vec::new())
                        }
                    })
                    .collect::<Result<Vec<_>, _>>()?;

                if values.iter().all(Value::is_invalid) {
                    Value::Invalid
                } else {
                    Value::Array(values)
                }
            }
        };

        Ok((value, components))
    }

    /// Convert a raw value into a named field.
    pub fn field(
        &self,
        name: String,
        source: FieldSource,
        base_type: BaseType,
        raw: RawValue,
        system: UnitSystem,
    ) -> Result<FieldValue, ConversionError> {
        let (value, components) = self.apply(&raw, base_type, system)?;

        Ok(FieldValue {
            name,
            source,
            base_type,
            value,
            raw,
            units: self.display_units(system).map(Cow::Borrowed),
            components,
        })
    }

    fn convert(
        &self,
        s: Scalar,
        system: UnitSystem,
        components: &mut Vec<(&'static str, Value)>,
    ) -> Result<Value, ConversionError> {
        Ok(match *self {
            Self::Raw(_) | Self::String => Value::from(s),
            Self::Scaled { scale, offset, .. } => Value::Float(s.as_f64() / scale - offset),
            Self::Enum(table) => Value::Enum(table.lookup(integer(s)?)),
            Self::Bool => Value::Bool(integer(s)? != 0),
            Self::Timestamp => Value::Timestamp(timestamp(s)?),
            Self::LocalTimestamp => Value::LocalTimestamp(timestamp(s)?.naive_utc()),
            Self::Measure {
                quantity,
                scale,
                offset,
            } => Value::Float(system.convert(quantity, s.as_f64() / scale - offset).0),
            Self::Bits(parts) => {
                let x = integer(s)?;

                for part in parts {
                    let sub = Scalar::U64((x >> part.shift) & mask(part.bits));
                    let value = part.conversion.convert(sub, system, &mut Vec::new())?;
                    components.push((part.name, value));
                }

                Value::UInt(x)
            }
        })
    }
}

fn integer(s: Scalar) -> Result<u64, ConversionError> {
    s.as_u64().ok_or(ConversionError::NotInteger(s))
}

fn timestamp(s: Scalar) -> Result<chrono::DateTime<chrono::Utc>, ConversionError> {
    let secs = s.as_i64().ok_or(ConversionError::NotInteger(s))?;
    fit_time(secs).ok_or(ConversionError::Timestamp(secs))
}

fn mask(bits: u8) -> u64 {
    if bits >= 64 {
        u64::MAX
    } else {
        (1 << bits) - 1
    }
}

fn text(raw: &RawValue) -> Result<Value, ConversionError> {
    let bytes = raw
        .scalars()
        .iter()
        .map(|s| match s {
            Scalar::U8(b) => Ok(*b),
            Scalar::I8(b) => Ok(*b as u8),
            _ => Err(ConversionError::NotInteger(*s)),
        })
        .take_while(|b| !matches!(b, Ok(0)))
        .collect::<Result<Vec<u8>, _>>()?;

    if bytes.is_empty() {
        return Ok(Value::Invalid);
    }

    Ok(Value::String(String::from_utf8(bytes)?))
}

/// A catalogued field: its name, base conversion, and optional dependency.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub conversion: Conversion,
    /// Present when the field's true rule depends on sibling field values.
    pub dispatch: Option<&'static Dispatch>,
}

impl FieldSpec {
    pub const fn new(name: &'static str, conversion: Conversion) -> Self {
        Self {
            name,
            conversion,
            dispatch: None,
        }
    }

    /// Declare that this field is resolved through a dispatch table.
    pub const fn depends(self, dispatch: &'static Dispatch) -> Self {
        Self {
            dispatch: Some(dispatch),
            ..self
        }
    }

    /// Convert a raw value under this descriptor.
    pub fn decode(
        &self,
        source: FieldSource,
        base_type: BaseType,
        raw: RawValue,
        system: UnitSystem,
    ) -> Result<FieldValue, ConversionError> {
        self.conversion
            .field(self.name.into(), source, base_type, raw, system)
    }
}
