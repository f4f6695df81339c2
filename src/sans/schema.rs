//! Fixed binary layouts and the endian-aware unpacking routine.
//!
//! A [`Schema`] names an ordered list of primitive slots. Compiling it for an
//! [`Endianness`] yields an immutable [`Plan`], which the decoder caches in a
//! [`PlanCache`] and reuses for every record of the same shape.

use alloc::{borrow::Cow, collections::BTreeMap, sync::Arc, vec::Vec};

use thiserror::Error;

/// Byte order of multi-byte values, selected by a definition message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Endianness {
    Little,
    Big,
}

impl Endianness {
    /// Interpret the architecture byte of a definition message.
    pub fn from_architecture(architecture: u8) -> Option<Self> {
        match architecture {
            0 => Some(Self::Little),
            1 => Some(Self::Big),
            _ => None,
        }
    }
}

/// A primitive storage type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Primitive {
    I8,
    U8,
    I16,
    U16,
    I32,
    U32,
    I64,
    U64,
    F32,
    F64,
    /// A character byte, unpacked as its byte code.
    Char,
}

impl Primitive {
    /// Width of a single element in bytes.
    pub const fn width(self) -> usize {
        match self {
            Self::I8 | Self::U8 | Self::Char => 1,
            Self::I16 | Self::U16 => 2,
            Self::I32 | Self::U32 | Self::F32 => 4,
            Self::I64 | Self::U64 | Self::F64 => 8,
        }
    }
}

/// A single unpacked value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scalar {
    I8(i8),
    U8(u8),
    I16(i16),
    U16(u16),
    I32(i32),
    U32(u32),
    I64(i64),
    U64(u64),
    F32(f32),
    F64(f64),
}

impl Scalar {
    /// The value as an unsigned integer, if it is a non-negative integer.
    pub fn as_u64(self) -> Option<u64> {
        match self {
            Self::U8(x) => Some(x.into()),
            Self::U16(x) => Some(x.into()),
            Self::U32(x) => Some(x.into()),
            Self::U64(x) => Some(x),
            Self::I8(x) => u64::try_from(x).ok(),
            Self::I16(x) => u64::try_from(x).ok(),
            Self::I32(x) => u64::try_from(x).ok(),
            Self::I64(x) => u64::try_from(x).ok(),
            Self::F32(_) | Self::F64(_) => None,
        }
    }

    /// The value as a signed integer, if it is an integer in range.
    pub fn as_i64(self) -> Option<i64> {
        match self {
            Self::I8(x) => Some(x.into()),
            Self::I16(x) => Some(x.into()),
            Self::I32(x) => Some(x.into()),
            Self::I64(x) => Some(x),
            Self::U8(x) => Some(x.into()),
            Self::U16(x) => Some(x.into()),
            Self::U32(x) => Some(x.into()),
            Self::U64(x) => i64::try_from(x).ok(),
            Self::F32(_) | Self::F64(_) => None,
        }
    }

    /// The value widened to a float.
    pub fn as_f64(self) -> f64 {
        match self {
            Self::I8(x) => x.into(),
            Self::U8(x) => x.into(),
            Self::I16(x) => x.into(),
            Self::U16(x) => x.into(),
            Self::I32(x) => x.into(),
            Self::U32(x) => x.into(),
            Self::I64(x) => x as f64,
            Self::U64(x) => x as f64,
            Self::F32(x) => x.into(),
            Self::F64(x) => x,
        }
    }

    /// The stored bit pattern, zero-extended.
    pub fn bits(self) -> u64 {
        match self {
            Self::I8(x) => x as u8 as u64,
            Self::U8(x) => x.into(),
            Self::I16(x) => x as u16 as u64,
            Self::U16(x) => x.into(),
            Self::I32(x) => x as u32 as u64,
            Self::U32(x) => x.into(),
            Self::I64(x) => x as u64,
            Self::U64(x) => x,
            Self::F32(x) => x.to_bits().into(),
            Self::F64(x) => x.to_bits(),
        }
    }
}

/// An error unpacking bytes with a plan.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// Fewer bytes than the plan length.
    #[error("Expected {expected} bytes, found {found}.")]
    Short { expected: usize, found: usize },
}

/// A named, repeated primitive slot of a schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Slot {
    pub name: &'static str,
    pub primitive: Primitive,
    pub count: usize,
}

impl Slot {
    pub const fn new(name: &'static str, primitive: Primitive, count: usize) -> Self {
        Self {
            name,
            primitive,
            count,
        }
    }
}

/// An ordered description of a fixed-layout binary record.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Schema {
    slots: Cow<'static, [Slot]>,
}

impl Schema {
    /// A schema over a static slot list.
    pub const fn from_static(slots: &'static [Slot]) -> Self {
        Self {
            slots: Cow::Borrowed(slots),
        }
    }

    /// A schema holding a single repeated slot, as used for record fields.
    pub fn single(primitive: Primitive, count: usize) -> Self {
        Self {
            slots: Cow::Owned(alloc::vec![Slot::new("value", primitive, count)]),
        }
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    /// Fix the byte order, producing an unpacking plan.
    pub fn compile(&self, endianness: Endianness) -> Plan {
        let steps: Vec<_> = self.slots.iter().map(|s| (s.primitive, s.count)).collect();
        let len = steps.iter().map(|(p, n)| p.width() * n).sum();

        Plan {
            endianness,
            steps,
            len,
        }
    }
}

/// A schema compiled for an endianness.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    endianness: Endianness,
    steps: Vec<(Primitive, usize)>,
    len: usize,
}

impl Plan {
    /// Number of bytes consumed by one decode.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn endianness(&self) -> Endianness {
        self.endianness
    }

    /// Unpack the leading bytes of a slice into a flat, ordered value list.
    pub fn decode(&self, r: &[u8]) -> Result<Vec<Scalar>, SchemaError> {
        if r.len() < self.len {
            Err(SchemaError::Short {
                expected: self.len,
                found: r.len(),
            })?;
        }

        let mut values = Vec::with_capacity(self.steps.iter().map(|(_, n)| n).sum());
        let mut at = 0;

        for &(primitive, count) in &self.steps {
            for _ in 0..count {
                values.push(unpack(primitive, &r[at..], self.endianness));
                at += primitive.width();
            }
        }

        Ok(values)
    }
}

fn unpack(primitive: Primitive, r: &[u8], endianness: Endianness) -> Scalar {
    macro_rules! unpack {
        ($variant:ident, $t:ty) => {{
            let mut b = [0; size_of::<$t>()];
            b.copy_from_slice(&r[..size_of::<$t>()]);

            Scalar::$variant(match endianness {
                Endianness::Little => <$t>::from_le_bytes(b),
                Endianness::Big => <$t>::from_be_bytes(b),
            })
        }};
    }

    match primitive {
        Primitive::I8 => unpack!(I8, i8),
        Primitive::U8 | Primitive::Char => unpack!(U8, u8),
        Primitive::I16 => unpack!(I16, i16),
        Primitive::U16 => unpack!(U16, u16),
        Primitive::I32 => unpack!(I32, i32),
        Primitive::U32 => unpack!(U32, u32),
        Primitive::I64 => unpack!(I64, i64),
        Primitive::U64 => unpack!(U64, u64),
        Primitive::F32 => unpack!(F32, f32),
        Primitive::F64 => unpack!(F64, f64),
    }
}

/// Memoized plans, keyed by endianness and schema.
#[derive(Debug, Default)]
pub struct PlanCache {
    plans: BTreeMap<Endianness, BTreeMap<Schema, Arc<Plan>>>,
}

impl PlanCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Retrieve the plan for a schema, compiling it on first use.
    pub fn plan(&mut self, schema: &Schema, endianness: Endianness) -> Arc<Plan> {
        let plans = self.plans.entry(endianness).or_default();

        if let Some(plan) = plans.get(schema) {
            return plan.clone();
        }

        let plan = Arc::new(schema.compile(endianness));
        plans.insert(schema.clone(), plan.clone());
        plan
    }

    /// Number of distinct compiled plans.
    pub fn len(&self) -> usize {
        self.plans.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAIR: Schema = Schema::from_static(&[
        Slot::new("number", Primitive::U16, 1),
        Slot::new("count", Primitive::U8, 1),
    ]);

    #[test]
    fn compile_is_idempotent() {
        let a = PAIR.compile(Endianness::Big);
        let b = PAIR.compile(Endianness::Big);

        assert_eq!(a, b);
        assert_eq!(a.len(), 3);
    }

    #[test]
    fn decode_respects_endianness() {
        let r = [0x01, 0x02, 0x07];

        let little = PAIR.compile(Endianness::Little).decode(&r).unwrap();
        let big = PAIR.compile(Endianness::Big).decode(&r).unwrap();

        assert_eq!(little, [Scalar::U16(0x0201), Scalar::U8(7)]);
        assert_eq!(big, [Scalar::U16(0x0102), Scalar::U8(7)]);
    }

    #[test]
    fn decode_is_deterministic() {
        let r = [0xFF, 0x7F, 0x00, 0x00, 0x80, 0x3F];
        const SCHEMA: Schema = Schema::from_static(&[
            Slot::new("a", Primitive::I16, 1),
            Slot::new("b", Primitive::F32, 1),
        ]);

        let first = SCHEMA.compile(Endianness::Little).decode(&r).unwrap();
        let second = SCHEMA.compile(Endianness::Little).decode(&r).unwrap();

        assert_eq!(first, second);
        assert_eq!(first, [Scalar::I16(0x7FFF), Scalar::F32(1.0)]);
    }

    #[test]
    fn repeated_slots_flatten() {
        let plan = Schema::single(Primitive::Char, 3).compile(Endianness::Little);
        let values = plan.decode(b"abc").unwrap();

        assert_eq!(values, [Scalar::U8(b'a'), Scalar::U8(b'b'), Scalar::U8(b'c')]);
    }

    #[test]
    fn short_input_is_an_error() {
        let plan = PAIR.compile(Endianness::Little);

        assert!(matches!(
            plan.decode(&[0x01]),
            Err(SchemaError::Short {
                expected: 3,
                found: 1
            })
        ));
    }

    #[test]
    fn cache_memoizes_per_endianness() {
        let mut cache = PlanCache::new();

        let a = cache.plan(&PAIR, Endianness::Little);
        let b = cache.plan(&PAIR, Endianness::Little);
        let c = cache.plan(&PAIR, Endianness::Big);

        assert!(Arc::ptr_eq(&a, &b));
        assert!(!Arc::ptr_eq(&a, &c));
        assert_eq!(cache.len(), 2);
    }
}
