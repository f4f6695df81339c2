//! Decoded field values.

use alloc::{borrow::Cow, string::String, vec::Vec};
use core::fmt;

use chrono::{DateTime, NaiveDateTime, Utc};

use super::{base::BaseType, schema::Scalar};

/// A symbolic enumeration value, keeping the code it was decoded from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EnumValue {
    pub code: u64,
    /// The catalogued name, or `None` for a code the table does not describe.
    pub name: Option<&'static str>,
}

impl EnumValue {
    pub fn is_unknown(&self) -> bool {
        self.name.is_none()
    }
}

impl fmt::Display for EnumValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name {
            Some(name) => f.write_str(name),
            None => write!(f, "unknown_{}", self.code),
        }
    }
}

/// A converted, display-ready field value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// The field held its base type's 'invalid' marker.
    Invalid,
    Bool(bool),
    UInt(u64),
    SInt(i64),
    Float(f64),
    String(String),
    Enum(EnumValue),
    Timestamp(DateTime<Utc>),
    LocalTimestamp(NaiveDateTime),
    Array(Vec<Value>),
}

impl Value {
    pub fn is_invalid(&self) -> bool {
        matches!(self, Self::Invalid)
    }

    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Self::UInt(x) => Some(*x),
            Self::SInt(x) => u64::try_from(*x).ok(),
            Self::Bool(x) => Some((*x).into()),
            Self::Enum(x) => Some(x.code),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::SInt(x) => Some(*x),
            Self::UInt(x) => i64::try_from(*x).ok(),
            Self::Bool(x) => Some((*x).into()),
            Self::Enum(x) => i64::try_from(x.code).ok(),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(x) => Some(*x),
            Self::UInt(x) => Some(*x as f64),
            Self::SInt(x) => Some(*x as f64),
            _ => None,
        }
    }

    /// Text of a string value, or the name of a catalogued enumeration value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(x) => Some(x),
            Self::Enum(x) => x.name,
            _ => None,
        }
    }

    pub fn as_enum(&self) -> Option<EnumValue> {
        match self {
            Self::Enum(x) => Some(*x),
            _ => None,
        }
    }

    pub fn as_timestamp(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Timestamp(x) => Some(*x),
            _ => None,
        }
    }
}

impl From<Scalar> for Value {
    fn from(s: Scalar) -> Self {
        match s {
            Scalar::F32(x) => Self::Float(x.into()),
            Scalar::F64(x) => Self::Float(x),
            Scalar::I8(_) | Scalar::I16(_) | Scalar::I32(_) | Scalar::I64(_) => {
                Self::SInt(s.as_i64().unwrap_or_default())
            }
            _ => Self::UInt(s.as_u64().unwrap_or_default()),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Invalid => Ok(()),
            Self::Bool(x) => write!(f, "{x}"),
            Self::UInt(x) => write!(f, "{x}"),
            Self::SInt(x) => write!(f, "{x}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::String(x) => f.write_str(x),
            Self::Enum(x) => write!(f, "{x}"),
            Self::Timestamp(x) => write!(f, "{}", x.format("%Y-%m-%dT%H:%M:%SZ")),
            Self::LocalTimestamp(x) => write!(f, "{}", x.format("%Y-%m-%dT%H:%M:%S")),
            Self::Array(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i != 0 {
                        f.write_str("|")?;
                    }
                    write!(f, "{item}")?;
                }
                Ok(())
            }
        }
    }
}

/// The unconverted value of a field, as unpacked from its bytes.
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    Scalar(Scalar),
    Array(Vec<Scalar>),
}

impl RawValue {
    /// Group unpacked elements: a single element stays scalar.
    pub fn from_scalars(mut values: Vec<Scalar>, base_type: BaseType) -> Self {
        if values.len() == 1 && base_type != BaseType::String {
            Self::Scalar(values.remove(0))
        } else {
            Self::Array(values)
        }
    }

    pub fn as_scalar(&self) -> Option<Scalar> {
        match self {
            Self::Scalar(s) => Some(*s),
            Self::Array(_) => None,
        }
    }

    pub fn scalars(&self) -> &[Scalar] {
        match self {
            Self::Scalar(s) => core::slice::from_ref(s),
            Self::Array(values) => values,
        }
    }
}

/// Where a field value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldSource {
    /// A field of the message's own definition, by field number.
    Native(u8),
    /// A developer field, by developer data index and field number.
    Developer { developer_data_index: u8, number: u8 },
    /// Computed by the decoder, such as a reconstructed timestamp.
    Derived,
}

/// A named field of a data message.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldValue {
    pub(crate) name: String,
    pub(crate) source: FieldSource,
    pub(crate) base_type: BaseType,
    pub(crate) value: Value,
    pub(crate) raw: RawValue,
    pub(crate) units: Option<Cow<'static, str>>,
    pub(crate) components: Vec<(&'static str, Value)>,
}

impl FieldValue {
    /// Lower-case symbolic name.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn source(&self) -> FieldSource {
        self.source
    }

    pub fn base_type(&self) -> BaseType {
        self.base_type
    }

    /// The converted value.
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// The original value, before conversion.
    pub fn raw(&self) -> &RawValue {
        &self.raw
    }

    /// The 'invalid' marker the raw value was checked against.
    pub fn invalid(&self) -> Scalar {
        self.base_type.invalid()
    }

    pub fn units(&self) -> Option<&str> {
        self.units.as_deref()
    }

    /// Named sub-values of a composite field.
    pub fn components(&self) -> &[(&'static str, Value)] {
        &self.components
    }

    pub fn component(&self, name: &str) -> Option<&Value> {
        self.components
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v)
    }
}

/// An ordered set of field values with unique names.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Fields(Vec<FieldValue>);

impl Fields {
    /// Add a field, replacing any earlier field of the same name in place.
    pub fn insert(&mut self, field: FieldValue) -> Option<FieldValue> {
        match self.0.iter_mut().find(|f| f.name == field.name) {
            Some(existing) => Some(core::mem::replace(existing, field)),
            None => {
                self.0.push(field);
                None
            }
        }
    }

    /// Put a field in the position of the field named `name`, which may have
    /// a different name. Any other field sharing the new name is dropped.
    pub(crate) fn replace(&mut self, name: &str, field: FieldValue) {
        let Some(i) = self.0.iter().position(|f| f.name == name) else {
            self.insert(field);
            return;
        };

        self.0[i] = field;

        let mut j = 0;
        let resolved = self.0[i].name.clone();

        self.0.retain(|f| {
            let keep = j == i || f.name != resolved;
            j += 1;
            keep
        });
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.0.iter().find(|f| f.name == name)
    }

    pub fn value(&self, name: &str) -> Option<&Value> {
        self.get(name).map(FieldValue::value)
    }

    pub fn iter(&self) -> core::slice::Iter<'_, FieldValue> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl IntoIterator for Fields {
    type Item = FieldValue;
    type IntoIter = alloc::vec::IntoIter<FieldValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Fields {
    type Item = &'a FieldValue;
    type IntoIter = core::slice::Iter<'a, FieldValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
