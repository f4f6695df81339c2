//! Convenience interfaces for common decoding patterns.
//!
//! The functions in this module decode a whole document from a slice or
//! reader into a [`FitFile`], holding every data message in order and indexed
//! by [`MessageKind`](crate::MessageKind). A file can publish its messages to
//! the [`FromMessages`] and [`FromMessage`] traits.
//!
//! In many cases (when messages are of a known shape), these traits can be
//! derived. See the [`FromMessages`](macro@FromMessages) and
//! [`FromMessage`](macro@FromMessage) macros for details.

use alloc::{string::String, vec::Vec};

use chrono::{DateTime, NaiveDateTime, Utc};

use crate::sans::value::{EnumValue, FieldValue, Value};

mod file;
#[cfg(feature = "std")]
pub mod reader;
pub mod slice;

pub use file::FitFile;
#[cfg(feature = "std")]
pub use reader::{decode as decode_reader, decode_with as decode_reader_with};
pub use slice::{decode as decode_slice, decode_with as decode_slice_with};

/// Derive [`FromMessages`] for a struct holding a collection of messages.
///
/// _Requires Cargo feature `derive`._
///
/// # Example
///
/// To collect a single message, add the `message(N)` attribute to an
/// `Option<T>` struct field, where `N` is the global message number and `T` is
/// a type implementing [`FromMessage`] and [`Default`]. Additional messages
/// received for the same number will overwrite earlier ones. To collect
/// multiple occurrences of a message, apply the attribute to a `Vec<T>`
/// instead.
///
/// ```
/// #[derive(Debug, Default, FromMessages)]
/// struct Activity {
///     #[message(0)]
///     file_id: Option<FileId>,
///     #[message(20)]
///     records: Vec<Record>,
/// }
/// ```
#[cfg(feature = "derive")]
pub use chainring_derive::FromMessages;

/// Produce message receivers for a document.
///
/// See the [`FromMessages`](macro@FromMessages) derive macro for an automatic
/// implementation of this trait.
pub trait FromMessages {
    /// Retrieve a receiver for a message, if one exists.
    fn add_message(&mut self, number: u16) -> Option<&mut dyn FromMessage>;
}

/// Derive [`FromMessage`] for a struct representing a single message.
///
/// _Requires Cargo feature `derive`._
///
/// # Examples
///
/// To receive a field's value, add the `field("name")` attribute to an
/// `Option<T>` struct field, where `name` is the field's name after
/// dependent-field resolution and `T` implements [`FromValue`]. Values that
/// do not convert to `T` are skipped.
///
/// To receive the message's absolute timestamp, however it was obtained,
/// supply `time` in place of a name.
///
/// ```
/// #[derive(Debug, Default, FromMessage)]
/// struct Record {
///     #[field(time)]
///     timestamp: Option<DateTime<Utc>>,
///     #[field("position_lat")]
///     latitude: Option<f64>,
///     #[field("heart_rate")]
///     heart_rate: Option<u8>,
/// }
/// ```
///
/// To accumulate values, supply a closure. Since the value type cannot be
/// inferred, the second argument must be typed.
///
/// ```
/// #[derive(Debug, Default, FromMessage)]
/// struct Hrv {
///     #[field("time", |v, t: Vec<f64>| v.extend(t))]
///     intervals: Vec<f64>,
/// }
/// ```
#[cfg(feature = "derive")]
pub use chainring_derive::FromMessage;

/// Receive the fields of a message.
///
/// Fields holding their 'invalid' marker are not published. The default
/// implementation of each method ignores received values.
///
/// See the [`FromMessage`](macro@FromMessage) derive macro for an automatic
/// implementation of this trait.
#[allow(unused_variables)]
pub trait FromMessage {
    /// Add the absolute timestamp of the message.
    fn add_timestamp(&mut self, timestamp: DateTime<Utc>) {}
    /// Add a decoded field.
    fn add_field(&mut self, field: &FieldValue) {}
}

/// Convert a decoded value into a Rust type.
pub trait FromValue: Sized {
    fn from_value(value: &Value) -> Option<Self>;
}

macro_rules! from_integer {
    ($($t:ty => $via:ident),* $(,)?) => {
        $(
            impl FromValue for $t {
                fn from_value(value: &Value) -> Option<Self> {
                    value.$via()?.try_into().ok()
                }
            }
        )*
    };
}

from_integer!(
    u8 => as_u64,
    u16 => as_u64,
    u32 => as_u64,
    u64 => as_u64,
    i8 => as_i64,
    i16 => as_i64,
    i32 => as_i64,
    i64 => as_i64,
);

impl FromValue for f64 {
    fn from_value(value: &Value) -> Option<Self> {
        value.as_f64()
    }
}

impl FromValue for f32 {
    fn from_value(value: &Value) -> Option<Self> {
        value.as_f64().map(|x| x as f32)
    }
}

impl FromValue for bool {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Bool(x) => Some(*x),
            _ => value.as_u64().map(|x| x != 0),
        }
    }
}

/// Text of a string, or the name of a catalogued enumeration value.
impl FromValue for String {
    fn from_value(value: &Value) -> Option<Self> {
        value.as_str().map(String::from)
    }
}

impl FromValue for EnumValue {
    fn from_value(value: &Value) -> Option<Self> {
        value.as_enum()
    }
}

impl FromValue for DateTime<Utc> {
    fn from_value(value: &Value) -> Option<Self> {
        value.as_timestamp()
    }
}

impl FromValue for NaiveDateTime {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::LocalTimestamp(x) => Some(*x),
            _ => None,
        }
    }
}

impl FromValue for Value {
    fn from_value(value: &Value) -> Option<Self> {
        (!value.is_invalid()).then(|| value.clone())
    }
}

/// Array elements, skipping invalid ones. A scalar becomes a single element.
impl<T: FromValue> FromValue for Vec<T> {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Array(items) => Some(items.iter().filter_map(T::from_value).collect()),
            Value::Invalid => None,
            _ => T::from_value(value).map(|x| alloc::vec![x]),
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;

    #[test]
    fn integers_convert_in_range() {
        assert_eq!(u8::from_value(&Value::UInt(200)), Some(200));
        assert_eq!(u8::from_value(&Value::UInt(300)), None);
        assert_eq!(i16::from_value(&Value::SInt(-5)), Some(-5));
        assert_eq!(u32::from_value(&Value::Invalid), None);
    }

    #[test]
    fn arrays_skip_invalid_elements() {
        let value = Value::Array(vec![Value::UInt(1), Value::Invalid, Value::UInt(3)]);
        assert_eq!(Vec::<u16>::from_value(&value), Some(vec![1, 3]));
        assert_eq!(Vec::<u16>::from_value(&Value::UInt(7)), Some(vec![7]));
    }

    #[test]
    fn enum_names_as_strings() {
        let value = Value::Enum(EnumValue {
            code: 2,
            name: Some("cycling"),
        });

        assert_eq!(String::from_value(&value).as_deref(), Some("cycling"));
        assert_eq!(u8::from_value(&value), Some(2));
    }
}
