//! Definition messages and the field definitions they carry.

use alloc::{sync::Arc, vec::Vec};

use tracing::debug;

use super::{
    base::BaseType,
    developer::{DeveloperField, DeveloperRegistry},
    header::RecordHeader,
    schema::{Endianness, Plan, PlanCache, Primitive, Scalar, Schema, Slot},
    stream::{Cursor, Source},
};
use crate::{error::Error, profile::MessageKind};

const PRIMARY: Schema = Schema::from_static(&[
    Slot::new("reserved", Primitive::U8, 1),
    Slot::new("architecture", Primitive::U8, 1),
]);

const SECONDARY: Schema = Schema::from_static(&[
    Slot::new("global_message_number", Primitive::U16, 1),
    Slot::new("field_count", Primitive::U8, 1),
]);

const FIELD: Schema = Schema::from_static(&[
    Slot::new("field_definition_number", Primitive::U8, 1),
    Slot::new("size", Primitive::U8, 1),
    Slot::new("base_type", Primitive::U8, 1),
]);

const DEVELOPER_COUNT: Schema =
    Schema::from_static(&[Slot::new("developer_field_count", Primitive::U8, 1)]);

const DEVELOPER_FIELD: Schema = Schema::from_static(&[
    Slot::new("field_number", Primitive::U8, 1),
    Slot::new("size", Primitive::U8, 1),
    Slot::new("developer_data_index", Primitive::U8, 1),
]);

/// Layout of one native field of a data message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDefinition {
    pub number: u8,
    /// Size in bytes.
    pub size: u8,
    pub base_type: BaseType,
}

impl FieldDefinition {
    pub fn decode<S: Source>(cursor: &mut Cursor<S>, plan: &Plan) -> Result<Self, Error> {
        let &[Scalar::U8(number), Scalar::U8(size), Scalar::U8(code)] =
            cursor.unpack(plan)?.as_slice()
        else {
            unreachable!()
        };

        let base_type = BaseType::from_code(code).ok_or(Error::BaseType {
            field: number,
            code,
        })?;

        check_size(number, size, base_type)?;

        Ok(Self {
            number,
            size,
            base_type,
        })
    }

    /// Number of base type elements in the field.
    pub fn type_count(&self) -> usize {
        usize::from(self.size) / self.base_type.width()
    }

    pub fn type_name(&self) -> &'static str {
        self.base_type.name()
    }

    /// The 'invalid' marker of the field's base type.
    pub fn invalid(&self) -> Scalar {
        self.base_type.invalid()
    }

    /// The layout of the field's bytes.
    pub fn schema(&self) -> Schema {
        Schema::single(self.base_type.primitive(), self.type_count())
    }
}

/// Layout of one developer field of a data message.
#[derive(Debug, Clone, PartialEq)]
pub struct DeveloperFieldDefinition {
    pub number: u8,
    /// Size in bytes.
    pub size: u8,
    pub developer_data_index: u8,
    pub description: Arc<DeveloperField>,
}

impl DeveloperFieldDefinition {
    /// Decode a developer field definition, resolving it against the
    /// descriptions seen so far.
    pub fn decode<S: Source>(
        cursor: &mut Cursor<S>,
        plan: &Plan,
        registry: &DeveloperRegistry,
    ) -> Result<Self, Error> {
        let &[
            Scalar::U8(number),
            Scalar::U8(size),
            Scalar::U8(developer_data_index),
        ] = cursor.unpack(plan)?.as_slice()
        else {
            unreachable!()
        };

        let description = registry
            .lookup(developer_data_index, number)
            .ok_or(Error::UndefinedDeveloperField {
                developer_data_index,
                field_number: number,
            })?
            .clone();

        check_size(number, size, description.base_type)?;

        Ok(Self {
            number,
            size,
            developer_data_index,
            description,
        })
    }

    pub fn type_count(&self) -> usize {
        usize::from(self.size) / self.description.base_type.width()
    }

    pub fn schema(&self) -> Schema {
        Schema::single(self.description.base_type.primitive(), self.type_count())
    }
}

fn check_size(field: u8, size: u8, base_type: BaseType) -> Result<(), Error> {
    let width = base_type.width();

    if usize::from(size) % width != 0 {
        Err(Error::FieldSize { field, size, width })?;
    }

    Ok(())
}

/// The shape of the data messages on a local slot.
#[derive(Debug, Clone, PartialEq)]
pub struct DefinitionMessage {
    pub endianness: Endianness,
    pub global_number: u16,
    pub kind: MessageKind,
    pub fields: Vec<FieldDefinition>,
    pub developer_fields: Vec<DeveloperFieldDefinition>,
}

impl DefinitionMessage {
    /// Decode the content of a definition record.
    pub fn decode<S: Source>(
        header: RecordHeader,
        registry: &DeveloperRegistry,
        plans: &mut PlanCache,
        cursor: &mut Cursor<S>,
    ) -> Result<Self, Error> {
        // Single bytes read the same in either order.
        let primary = plans.plan(&PRIMARY, Endianness::Little);
        let &[_, Scalar::U8(architecture)] = cursor.unpack(&primary)?.as_slice() else {
            unreachable!()
        };

        let endianness =
            Endianness::from_architecture(architecture).ok_or(Error::Architecture(architecture))?;

        let secondary = plans.plan(&SECONDARY, endianness);
        let &[Scalar::U16(global_number), Scalar::U8(field_count)] =
            cursor.unpack(&secondary)?.as_slice()
        else {
            unreachable!()
        };

        let kind = MessageKind::from_number(global_number)
            .ok_or(Error::MessageNumber(global_number))?;

        if kind.is_unknown() {
            debug!(global_number, "message number not in catalog");
        }

        let plan = plans.plan(&FIELD, endianness);
        let fields = (0..field_count)
            .map(|_| FieldDefinition::decode(cursor, &plan))
            .collect::<Result<Vec<_>, _>>()?;

        let developer_fields = if header.has_developer_data {
            let count = plans.plan(&DEVELOPER_COUNT, endianness);
            let &[Scalar::U8(count)] = cursor.unpack(&count)?.as_slice() else {
                unreachable!()
            };

            let plan = plans.plan(&DEVELOPER_FIELD, endianness);
            (0..count)
                .map(|_| DeveloperFieldDefinition::decode(cursor, &plan, registry))
                .collect::<Result<Vec<_>, _>>()?
        } else {
            Vec::new()
        };

        debug!(
            local_slot = header.local_slot,
            message = %kind,
            fields = fields.len(),
            developer_fields = developer_fields.len(),
            "definition"
        );

        Ok(Self {
            endianness,
            global_number,
            kind,
            fields,
            developer_fields,
        })
    }

    /// Number of content bytes in each data message of this shape.
    pub fn data_len(&self) -> usize {
        let native: usize = self.fields.iter().map(|f| usize::from(f.size)).sum();
        let developer: usize = self
            .developer_fields
            .iter()
            .map(|f| usize::from(f.size))
            .sum();

        native + developer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sans::header::MessageClass;

    fn header(has_developer_data: bool) -> RecordHeader {
        RecordHeader {
            class: MessageClass::Definition,
            local_slot: 0,
            has_developer_data,
            time_offset: None,
        }
    }

    fn decode(r: &[u8], registry: &DeveloperRegistry) -> Result<DefinitionMessage, Error> {
        let mut cursor = Cursor::new(r);
        DefinitionMessage::decode(header(false), registry, &mut PlanCache::new(), &mut cursor)
    }

    #[test]
    fn decode_big_endian_definition() {
        let r = [0, 1, 0, 20, 2, 253, 4, 0x86, 3, 1, 2];
        let definition = decode(&r, &DeveloperRegistry::new()).unwrap();

        assert_eq!(definition.endianness, Endianness::Big);
        assert_eq!(definition.kind, MessageKind::Record);
        assert_eq!(definition.fields.len(), 2);
        assert_eq!(definition.fields[0].type_name(), "uint32");
        assert_eq!(definition.data_len(), 5);
    }

    #[test]
    fn zero_field_definition() {
        let definition = decode(&[0, 0, 20, 0, 0], &DeveloperRegistry::new()).unwrap();

        assert!(definition.fields.is_empty());
        assert_eq!(definition.data_len(), 0);
    }

    #[test]
    fn unknown_numbers_decode() {
        let definition = decode(&[0, 0, 0x10, 0xFF, 0], &DeveloperRegistry::new()).unwrap();
        assert_eq!(definition.kind, MessageKind::ManufacturerSpecific(0xFF10));
    }

    #[test]
    fn reject_out_of_range_number() {
        assert!(matches!(
            decode(&[0, 0, 0xFF, 0xFF, 0], &DeveloperRegistry::new()),
            Err(Error::MessageNumber(0xFFFF))
        ));
    }

    #[test]
    fn reject_bad_architecture() {
        assert!(matches!(
            decode(&[0, 2, 20, 0, 0], &DeveloperRegistry::new()),
            Err(Error::Architecture(2))
        ));
    }

    #[test]
    fn reject_unknown_base_type() {
        assert!(matches!(
            decode(&[0, 0, 20, 0, 1, 3, 1, 0x1F], &DeveloperRegistry::new()),
            Err(Error::BaseType {
                field: 3,
                code: 0x1F
            })
        ));

        // String with a stray bit 6.
        assert!(matches!(
            decode(&[0, 0, 20, 0, 1, 3, 1, 0x47], &DeveloperRegistry::new()),
            Err(Error::BaseType {
                field: 3,
                code: 0x47
            })
        ));
    }

    #[test]
    fn reject_partial_elements() {
        assert!(matches!(
            decode(&[0, 0, 20, 0, 1, 5, 3, 0x86], &DeveloperRegistry::new()),
            Err(Error::FieldSize {
                field: 5,
                size: 3,
                width: 4
            })
        ));
    }

    #[test]
    fn array_fields_count_elements() {
        let definition = decode(&[0, 0, 78, 0, 1, 0, 10, 0x84], &DeveloperRegistry::new()).unwrap();
        assert_eq!(definition.fields[0].type_count(), 5);
    }

    #[test]
    fn undefined_developer_field() {
        let r: &[u8] = &[0, 0, 20, 0, 0, 1, 0, 2, 0];
        let mut cursor = Cursor::new(r);

        assert!(matches!(
            DefinitionMessage::decode(
                header(true),
                &DeveloperRegistry::new(),
                &mut PlanCache::new(),
                &mut cursor
            ),
            Err(Error::UndefinedDeveloperField {
                developer_data_index: 0,
                field_number: 0
            })
        ));
    }
}
