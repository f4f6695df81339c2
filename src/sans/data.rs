//! Data messages.
//!
//! Decoding a data message is done in two phases over the raw values read
//! for its definition. The first phase converts every field with its base
//! rule. The second resolves fields whose rule depends on the values of their
//! siblings, looking the control values up in the first phase's results, and
//! converts them again from their raw values. Developer fields are merged in
//! and the message's timestamp reconstructed last.

use alloc::{format, string::String, sync::Arc, vec::Vec};

use chrono::{DateTime, Utc};
use tracing::{debug, trace, warn};

use super::{
    base::BaseType,
    context::{DecodingContext, TimestampSource, fit_time},
    definition::DefinitionMessage,
    dispatch::Resolution,
    field::{Conversion, ConversionError},
    header::RecordHeader,
    schema::{PlanCache, Scalar},
    stream::{Cursor, Source},
    value::{FieldSource, FieldValue, Fields, RawValue, Value},
};
use crate::{config::DecoderConfig, error::Error, profile::MessageKind};

/// A decoded data message.
#[derive(Debug, Clone, PartialEq)]
pub struct DataMessage {
    definition: Arc<DefinitionMessage>,
    raw: Vec<RawValue>,
    fields: Fields,
    timestamp: Option<DateTime<Utc>>,
    timestamp_source: TimestampSource,
}

impl DataMessage {
    /// Decode the content of a data record against its definition.
    pub fn decode<S: Source>(
        definition: Arc<DefinitionMessage>,
        header: RecordHeader,
        cursor: &mut Cursor<S>,
        plans: &mut PlanCache,
        context: &mut DecodingContext,
        config: &DecoderConfig,
    ) -> Result<Self, Error> {
        let kind = definition.kind;
        let system = config.units;

        let mut raw = Vec::with_capacity(definition.fields.len());

        for field in &definition.fields {
            let plan = plans.plan(&field.schema(), definition.endianness);
            raw.push(RawValue::from_scalars(cursor.unpack(&plan)?, field.base_type));
        }

        let mut developer_raw = Vec::with_capacity(definition.developer_fields.len());

        for field in &definition.developer_fields {
            let plan = plans.plan(&field.schema(), definition.endianness);
            let base_type = field.description.base_type;
            developer_raw.push(RawValue::from_scalars(cursor.unpack(&plan)?, base_type));
        }

        // Phase one: base conversions.
        let mut fields = Fields::default();

        for (field, raw) in definition.fields.iter().zip(&raw) {
            let source = FieldSource::Native(field.number);

            let value = match kind.field(field.number) {
                Some(spec) => spec.decode(source, field.base_type, raw.clone(), system),
                None => Conversion::NONE.field(
                    format!("unknown_{}", field.number),
                    source,
                    field.base_type,
                    raw.clone(),
                    system,
                ),
            }
            .map_err(|err| parse_error(kind, field.number, err))?;

            fields.insert(value);
        }

        // Phase two: dependent fields, resolved against the phase one values.
        let resolutions = {
            let provisional = &fields;

            definition
                .fields
                .iter()
                .zip(&raw)
                .filter_map(|(field, raw)| {
                    let spec = kind.field(field.number)?;
                    let dispatch = spec.dispatch?;
                    let resolution = dispatch.resolve(|name| provisional.value(name));

                    Some((field, raw, spec.name, resolution))
                })
                .collect::<Vec<_>>()
        };

        for (field, raw, provisional, resolution) in resolutions {
            match resolution {
                Resolution::Unresolved { control, .. } => warn!(
                    message = %kind,
                    field = provisional,
                    control,
                    "unresolved field dependency"
                ),
                Resolution::Unknown { control, .. } => trace!(
                    message = %kind,
                    field = provisional,
                    control,
                    "uncatalogued control value"
                ),
                Resolution::Resolved(_) => {}
            }

            let value = resolution
                .spec()
                .decode(
                    FieldSource::Native(field.number),
                    field.base_type,
                    raw.clone(),
                    system,
                )
                .map_err(|err| parse_error(kind, field.number, err))?;

            fields.replace(provisional, value);
        }

        for (field, raw) in definition.developer_fields.iter().zip(developer_raw) {
            let value = field
                .description
                .decode(raw, system)
                .map_err(|source| Error::Parse {
                    message: kind,
                    field: field.description.name.clone(),
                    source,
                })?;

            fields.insert(value);
        }

        let (timestamp, timestamp_source) = reconstruct(&mut fields, header, context, kind)?;

        trace!(
            message = %kind,
            fields = fields.len(),
            ?timestamp_source,
            "data"
        );

        Ok(Self {
            definition,
            raw,
            fields,
            timestamp,
            timestamp_source,
        })
    }

    pub fn kind(&self) -> MessageKind {
        self.definition.kind
    }

    pub fn global_number(&self) -> u16 {
        self.definition.global_number
    }

    /// The definition this message was decoded against.
    pub fn definition(&self) -> &Arc<DefinitionMessage> {
        &self.definition
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    pub fn value(&self, name: &str) -> Option<&Value> {
        self.fields.value(name)
    }

    pub fn fields(&self) -> &Fields {
        &self.fields
    }

    /// Raw values of the native fields, in definition order.
    pub fn raw_values(&self) -> &[RawValue] {
        &self.raw
    }

    /// The absolute time of the message, however it was obtained.
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        self.timestamp
    }

    pub fn timestamp_source(&self) -> TimestampSource {
        self.timestamp_source
    }

    /// Bytes consumed by the record, including its header.
    pub fn size(&self) -> usize {
        1 + self.definition.data_len()
    }
}

fn parse_error(message: MessageKind, number: u8, source: ConversionError) -> Error {
    let field = match message.field(number) {
        Some(spec) => String::from(spec.name),
        None => format!("unknown_{number}"),
    };

    Error::Parse {
        message,
        field,
        source,
    }
}

/// Establish the absolute time of a message, updating the context.
///
/// A full timestamp field anchors the context. Otherwise a 16-bit fragment or
/// a compressed header offset is resolved against it and written back as a
/// derived `timestamp` field. A message with none of these inherits the last
/// known time.
fn reconstruct(
    fields: &mut Fields,
    header: RecordHeader,
    context: &mut DecodingContext,
    kind: MessageKind,
) -> Result<(Option<DateTime<Utc>>, TimestampSource), Error> {
    if let Some(secs) = seconds(fields.get("timestamp")) {
        context.absolute(secs);
        return Ok((fit_time(secs), TimestampSource::Absolute));
    }

    let fragment = seconds(fields.get("timestamp_16")).and_then(|f| u16::try_from(f).ok());

    let reconstructed = match (fragment, header.time_offset) {
        (Some(fragment), _) => context
            .fragment(fragment)
            .map(|secs| (secs, TimestampSource::Fragment)),
        (None, Some(offset)) => context
            .offset(offset)
            .map(|secs| (secs, TimestampSource::Offset)),
        (None, None) => None,
    };

    let Some((secs, source)) = reconstructed else {
        debug!(message = %kind, "no timestamp, inheriting the last known");
        let inherited = context.last_timestamp().and_then(fit_time);
        return Ok((inherited, TimestampSource::Inherited));
    };

    let raw = u32::try_from(secs).map_err(|_| Error::Parse {
        message: kind,
        field: "timestamp".into(),
        source: ConversionError::Timestamp(secs),
    })?;

    let derived = Conversion::Timestamp
        .field(
            "timestamp".into(),
            FieldSource::Derived,
            BaseType::UInt32,
            RawValue::Scalar(Scalar::U32(raw)),
            Default::default(),
        )
        .map_err(|source| Error::Parse {
            message: kind,
            field: "timestamp".into(),
            source,
        })?;

    let timestamp = derived.value().as_timestamp();
    fields.insert(derived);

    Ok((timestamp, source))
}

/// The integer seconds of a valid temporal field.
fn seconds(field: Option<&FieldValue>) -> Option<i64> {
    let field = field?;

    if field.value().is_invalid() {
        return None;
    }

    field.raw().as_scalar()?.as_i64()
}
