//! Resolution of fields whose rule depends on sibling field values.
//!
//! A dependent field owns a closed [`Dispatch`] table keyed by the value of a
//! control field decoded earlier in the same message. Resolution is total: a
//! control value missing from the table selects the table's unknown variant,
//! and a table may narrow further on a second control field.

use super::{field::FieldSpec, value::Value};

/// The outcome of a matched case.
#[derive(Debug, Clone, Copy)]
pub enum Branch {
    Field(FieldSpec),
    /// Consult another control field.
    Narrow(&'static Dispatch),
}

/// A dispatch table for a dependent field.
#[derive(Debug)]
pub struct Dispatch {
    /// Name of the control field.
    pub control: &'static str,
    /// Cases keyed by the symbolic value of the control field.
    pub cases: &'static [(&'static str, Branch)],
    /// Rule applied when no case matches.
    pub unknown: FieldSpec,
}

/// The outcome of resolving a dependent field.
#[derive(Debug, Clone, Copy)]
pub enum Resolution {
    Resolved(FieldSpec),
    /// The control value is not catalogued.
    Unknown {
        control: &'static str,
        fallback: FieldSpec,
    },
    /// The control field is absent or invalid.
    Unresolved {
        control: &'static str,
        fallback: FieldSpec,
    },
}

impl Resolution {
    /// The descriptor to decode with.
    pub fn spec(&self) -> &FieldSpec {
        match self {
            Self::Resolved(spec) => spec,
            Self::Unknown { fallback, .. } | Self::Unresolved { fallback, .. } => fallback,
        }
    }
}

impl Dispatch {
    /// Resolve against control values looked up by field name.
    pub fn resolve<'a>(&self, control: impl Fn(&str) -> Option<&'a Value>) -> Resolution {
        let mut table = self;

        loop {
            let value = match control(table.control) {
                Some(value) if !value.is_invalid() => value,
                _ => {
                    return Resolution::Unresolved {
                        control: table.control,
                        fallback: table.unknown,
                    };
                }
            };

            match table.cases.iter().find(|(key, _)| value.as_str() == Some(*key)) {
                Some((_, Branch::Field(spec))) => return Resolution::Resolved(*spec),
                Some((_, Branch::Narrow(next))) => table = *next,
                None => {
                    return Resolution::Unknown {
                        control: table.control,
                        fallback: table.unknown,
                    };
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::{collections::BTreeMap, string::String};

    use super::*;
    use crate::{
        profile::enums::SPORT,
        sans::{field::Conversion, value::EnumValue},
    };

    static BY_SUB_SPORT: Dispatch = Dispatch {
        control: "sub_sport",
        cases: &[(
            "treadmill",
            Branch::Field(FieldSpec::new("total_strides", Conversion::units("strides"))),
        )],
        unknown: FieldSpec::new("total_cycles", Conversion::units("cycles")),
    };

    static BY_SPORT: Dispatch = Dispatch {
        control: "sport",
        cases: &[
            (
                "cycling",
                Branch::Field(FieldSpec::new("total_strokes", Conversion::units("strokes"))),
            ),
            ("generic", Branch::Narrow(&BY_SUB_SPORT)),
        ],
        unknown: FieldSpec::new("total_cycles", Conversion::units("cycles")),
    };

    fn lookup<'a>(values: &'a BTreeMap<String, Value>) -> impl Fn(&str) -> Option<&'a Value> {
        move |name| values.get(name)
    }

    fn sport(code: u64) -> Value {
        Value::Enum(SPORT.lookup(code))
    }

    #[test]
    fn resolve_direct_case() {
        let values: BTreeMap<String, Value> = BTreeMap::from([("sport".into(), sport(2))]);
        let resolution = BY_SPORT.resolve(lookup(&values));

        assert!(matches!(resolution, Resolution::Resolved(_)));
        assert_eq!(resolution.spec().name, "total_strokes");
    }

    #[test]
    fn resolve_by_narrowing() {
        let values: BTreeMap<String, Value> = BTreeMap::from([
            ("sport".into(), sport(0)),
            (
                "sub_sport".into(),
                Value::Enum(EnumValue {
                    code: 1,
                    name: Some("treadmill"),
                }),
            ),
        ]);

        assert_eq!(BY_SPORT.resolve(lookup(&values)).spec().name, "total_strides");
    }

    #[test]
    fn uncatalogued_value_falls_back() {
        let values: BTreeMap<String, Value> = BTreeMap::from([("sport".into(), sport(99))]);
        let resolution = BY_SPORT.resolve(lookup(&values));

        assert!(matches!(
            resolution,
            Resolution::Unknown {
                control: "sport",
                ..
            }
        ));
        assert_eq!(resolution.spec().name, "total_cycles");
    }

    #[test]
    fn missing_control_is_unresolved() {
        let values: BTreeMap<String, Value> = BTreeMap::from([("sport".into(), sport(0))]);

        assert!(matches!(
            BY_SPORT.resolve(lookup(&values)),
            Resolution::Unresolved {
                control: "sub_sport",
                ..
            }
        ));
    }

    #[test]
    fn invalid_control_is_unresolved() {
        let values: BTreeMap<String, Value> = BTreeMap::from([("sport".into(), Value::Invalid)]);

        assert!(matches!(
            BY_SPORT.resolve(lookup(&values)),
            Resolution::Unresolved { .. }
        ));
    }
}
