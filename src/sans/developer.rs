//! Developer field descriptions and the registry resolving them.
//!
//! Developer fields are declared in-band: a `field_description` data message
//! names a field, its base type, units and scaling, under a developer data
//! index and field number. Later definition messages refer to the field by
//! that pair. The registry is filled as descriptions are decoded, so it is
//! only ever complete up to the current position of a stream.

use alloc::{
    borrow::Cow,
    collections::BTreeMap,
    format,
    string::{String, ToString},
    sync::Arc,
    vec::Vec,
};

use tracing::{debug, warn};

use super::{
    base::BaseType,
    data::DataMessage,
    field::{Conversion, ConversionError, FieldSpec},
    value::{FieldSource, FieldValue, RawValue, Value},
};
use crate::profile::{MessageKind, UnitSystem};

/// A developer field, as described by a `field_description` message.
#[derive(Debug, Clone, PartialEq)]
pub struct DeveloperField {
    pub developer_data_index: u8,
    pub field_number: u8,
    pub base_type: BaseType,
    /// Name as given by the description, lower-cased.
    pub name: String,
    pub units: Option<String>,
    pub scale: Option<f64>,
    pub offset: Option<f64>,
    /// The native message and field this field supplements, if any.
    pub native_message: Option<u16>,
    pub native_field: Option<u8>,
}

impl DeveloperField {
    /// Convert a raw value of this field.
    ///
    /// A field shadowing a measured native field is named `dev_<native name>`
    /// and reported in that field's physical quantity, but is always scaled
    /// by its own description.
    pub fn decode(&self, raw: RawValue, system: UnitSystem) -> Result<FieldValue, ConversionError> {
        let source = FieldSource::Developer {
            developer_data_index: self.developer_data_index,
            number: self.field_number,
        };

        if let Some(native) = self.native() {
            if let Conversion::Measure { quantity, .. } = native.conversion {
                let conversion = Conversion::measure(
                    quantity,
                    self.scale.unwrap_or(1.0),
                    self.offset.unwrap_or(0.0),
                );

                return conversion.field(
                    format!("dev_{}", native.name),
                    source,
                    self.base_type,
                    raw,
                    system,
                );
            }
        }

        let conversion = match (self.scale, self.offset) {
            (None, None) => Conversion::NONE,
            (scale, offset) => Conversion::Scaled {
                scale: scale.unwrap_or(1.0),
                offset: offset.unwrap_or(0.0),
                units: "",
            },
        };

        let mut field = conversion.field(self.name.clone(), source, self.base_type, raw, system)?;
        field.units = self.units.clone().map(Cow::Owned);

        Ok(field)
    }

    fn native(&self) -> Option<&'static FieldSpec> {
        MessageKind::from_number(self.native_message?)?.field(self.native_field?)
    }
}

/// An application declared by a `developer_data_id` message.
#[derive(Debug, Clone, PartialEq)]
pub struct DeveloperApplication {
    pub developer_data_index: u8,
    pub application_id: Option<Vec<u8>>,
    pub application_version: Option<u64>,
    pub manufacturer: Option<Value>,
}

/// Developer field descriptions seen so far in a stream.
#[derive(Debug, Clone, Default)]
pub struct DeveloperRegistry {
    fields: BTreeMap<(u8, u8), Arc<DeveloperField>>,
    applications: BTreeMap<u8, DeveloperApplication>,
}

impl DeveloperRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up the description of a developer field.
    pub fn lookup(
        &self,
        developer_data_index: u8,
        field_number: u8,
    ) -> Option<&Arc<DeveloperField>> {
        self.fields.get(&(developer_data_index, field_number))
    }

    pub fn application(&self, developer_data_index: u8) -> Option<&DeveloperApplication> {
        self.applications.get(&developer_data_index)
    }

    /// All described developer fields, ordered by index and number.
    pub fn fields(&self) -> impl Iterator<Item = &Arc<DeveloperField>> {
        self.fields.values()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Add a description directly, replacing any earlier one for its key.
    pub fn insert(&mut self, field: DeveloperField) {
        let key = (field.developer_data_index, field.field_number);
        self.fields.insert(key, Arc::new(field));
    }

    /// Capture developer declarations from a decoded data message.
    ///
    /// Messages of other kinds are ignored.
    pub fn observe(&mut self, message: &DataMessage) {
        match message.kind() {
            MessageKind::FieldDescription => self.observe_description(message),
            MessageKind::DeveloperDataId => self.observe_application(message),
            _ => {}
        }
    }

    fn observe_description(&mut self, message: &DataMessage) {
        let integer = |name: &str| message.value(name).and_then(Value::as_u64);

        let (Some(index), Some(number), Some(code)) = (
            integer("developer_data_index"),
            integer("field_definition_number"),
            integer("fit_base_type_id"),
        ) else {
            warn!("skipping field description missing its key or base type");
            return;
        };

        let (Ok(developer_data_index), Ok(field_number)) =
            (u8::try_from(index), u8::try_from(number))
        else {
            warn!(index, number, "skipping field description with an out of range key");
            return;
        };

        let Some(base_type) = u8::try_from(code).ok().and_then(BaseType::from_code) else {
            warn!(code, "skipping field description with an unknown base type");
            return;
        };

        let name = match message.value("field_name").and_then(Value::as_str) {
            Some(name) => name.to_lowercase(),
            None => format!("developer_{developer_data_index}_{field_number}"),
        };

        let field = DeveloperField {
            developer_data_index,
            field_number,
            base_type,
            name,
            units: message
                .value("units")
                .and_then(Value::as_str)
                .map(ToString::to_string),
            scale: integer("scale").filter(|s| *s != 0).map(|s| s as f64),
            offset: message.value("offset").and_then(Value::as_f64),
            native_message: integer("native_mesg_num").and_then(|n| u16::try_from(n).ok()),
            native_field: integer("native_field_num").and_then(|n| u8::try_from(n).ok()),
        };

        debug!(
            developer_data_index,
            field_number,
            name = field.name.as_str(),
            "developer field described"
        );

        self.insert(field);
    }

    fn observe_application(&mut self, message: &DataMessage) {
        let Some(index) = message
            .value("developer_data_index")
            .and_then(Value::as_u64)
            .and_then(|i| u8::try_from(i).ok())
        else {
            warn!("skipping developer data id without an index");
            return;
        };

        let application_id = message.get("application_id").and_then(|f| {
            if f.value().is_invalid() {
                return None;
            }

            f.raw()
                .scalars()
                .iter()
                .map(|s| s.as_u64().and_then(|b| u8::try_from(b).ok()))
                .collect()
        });

        let application = DeveloperApplication {
            developer_data_index: index,
            application_id,
            application_version: message.value("application_version").and_then(Value::as_u64),
            manufacturer: message
                .value("manufacturer_id")
                .filter(|v| !v.is_invalid())
                .cloned(),
        };

        self.applications.insert(index, application);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sans::schema::Scalar;

    fn description(native: Option<(u16, u8)>) -> DeveloperField {
        DeveloperField {
            developer_data_index: 0,
            field_number: 1,
            base_type: BaseType::UInt16,
            name: "doughnuts_earned".into(),
            units: Some("doughnuts".into()),
            scale: Some(10.0),
            offset: None,
            native_message: native.map(|(m, _)| m),
            native_field: native.map(|(_, f)| f),
        }
    }

    #[test]
    fn lookup_by_index_and_number() {
        let mut registry = DeveloperRegistry::new();
        registry.insert(description(None));

        assert!(registry.lookup(0, 1).is_some());
        assert!(registry.lookup(1, 1).is_none());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn decode_with_own_scale_and_units() {
        let field = description(None)
            .decode(RawValue::Scalar(Scalar::U16(125)), UnitSystem::Metric)
            .unwrap();

        assert_eq!(field.name(), "doughnuts_earned");
        assert_eq!(field.value(), &Value::Float(12.5));
        assert_eq!(field.units(), Some("doughnuts"));
    }

    #[test]
    fn decode_shadowing_a_measured_field() {
        // record.speed, whose own scale is 1000.
        let field = description(Some((20, 6)))
            .decode(RawValue::Scalar(Scalar::U16(25)), UnitSystem::Metric)
            .unwrap();

        assert_eq!(field.name(), "dev_speed");
        assert_eq!(field.value(), &Value::Float(2.5));
        assert_eq!(field.units(), Some("m/s"));

        let field = description(Some((20, 6)))
            .decode(RawValue::Scalar(Scalar::U16(25)), UnitSystem::Statute)
            .unwrap();

        let Value::Float(mph) = field.value() else {
            panic!("expected a float, got {:?}", field.value());
        };
        assert!((mph - 2.5 * 3600.0 / 1609.344).abs() < 1e-9);
        assert_eq!(field.units(), Some("mph"));
    }
}
