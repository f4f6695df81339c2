//! The message catalog: global message numbers, field numbers and the rules
//! decoding them.

use core::fmt;

use super::{
    enums::{
        ACTIVITY, ACTIVITY_TYPE, ANTPLUS_DEVICE_TYPE, BATTERY_STATUS, BLE_DEVICE_TYPE, EVENT,
        EVENT_TYPE, FILE, GARMIN_PRODUCT, GENDER, LOCAL_DEVICE_TYPE, MANUFACTURER,
        RIDER_POSITION_TYPE, SOURCE_TYPE, SPORT, SUB_SPORT, TIMER_TRIGGER,
    },
    units::Quantity,
};
use crate::sans::{
    dispatch::{Branch, Dispatch},
    field::{Component, Conversion, FieldSpec},
};

/// Largest valid global message number.
pub const MAX_MESSAGE_NUMBER: u16 = 0xFFFE;

/// First global message number reserved for manufacturer-specific messages.
pub const MANUFACTURER_RANGE_START: u16 = 0xFF00;

/// The type of a message, resolved from its global message number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MessageKind {
    FileId,
    FileCreator,
    DeviceSettings,
    UserProfile,
    Sport,
    Session,
    Lap,
    Record,
    Event,
    DeviceInfo,
    Activity,
    Monitoring,
    Hrv,
    Length,
    MonitoringInfo,
    Hr,
    FieldDescription,
    DeveloperDataId,
    /// A number in the manufacturer-reserved range.
    ManufacturerSpecific(u16),
    /// A number the catalog does not describe.
    Unknown(u16),
}

impl MessageKind {
    /// Resolve a global message number, or `None` if it is out of range.
    pub fn from_number(number: u16) -> Option<Self> {
        if number > MAX_MESSAGE_NUMBER {
            return None;
        }

        Some(match CATALOG.iter().find(|m| m.number == number) {
            Some(message) => message.kind,
            None if number >= MANUFACTURER_RANGE_START => Self::ManufacturerSpecific(number),
            None => Self::Unknown(number),
        })
    }

    pub fn number(self) -> u16 {
        match self {
            Self::ManufacturerSpecific(n) | Self::Unknown(n) => n,
            _ => self.spec().map_or(0, |m| m.number),
        }
    }

    /// The catalogued name, if any.
    pub fn name(self) -> Option<&'static str> {
        self.spec().map(|m| m.name)
    }

    /// Whether the catalog does not describe this message.
    pub fn is_unknown(self) -> bool {
        matches!(self, Self::ManufacturerSpecific(_) | Self::Unknown(_))
    }

    pub fn spec(self) -> Option<&'static MessageSpec> {
        CATALOG.iter().copied().find(|m| m.kind == self)
    }

    /// Look up the descriptor of a field by number.
    ///
    /// Fields common to every message (`timestamp`, `message_index` and
    /// `part_index`) are found even if the message is not catalogued.
    pub fn field(self, number: u8) -> Option<&'static FieldSpec> {
        self.spec()
            .and_then(|m| m.fields.iter().find(|(n, _)| *n == number))
            .or_else(|| COMMON.iter().find(|(n, _)| *n == number))
            .map(|(_, spec)| spec)
    }
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ManufacturerSpecific(n) => write!(f, "manufacturer_specific_{n}"),
            Self::Unknown(n) => write!(f, "unknown_{n}"),
            _ => f.write_str(self.name().unwrap_or_default()),
        }
    }
}

/// A catalogued message.
#[derive(Debug)]
pub struct MessageSpec {
    pub number: u16,
    pub kind: MessageKind,
    pub name: &'static str,
    pub fields: &'static [(u8, FieldSpec)],
}

static COMMON: [(u8, FieldSpec); 3] = [
    (250, FieldSpec::new("part_index", Conversion::NONE)),
    (253, FieldSpec::new("timestamp", Conversion::Timestamp)),
    (254, FieldSpec::new("message_index", Conversion::NONE)),
];

pub static CATALOG: [&MessageSpec; 18] = [
    &FILE_ID,
    &FILE_CREATOR,
    &DEVICE_SETTINGS,
    &USER_PROFILE,
    &SPORT_MESSAGE,
    &SESSION,
    &LAP,
    &RECORD,
    &EVENT_MESSAGE,
    &DEVICE_INFO,
    &ACTIVITY_MESSAGE,
    &MONITORING,
    &HRV,
    &LENGTH,
    &MONITORING_INFO,
    &HR,
    &FIELD_DESCRIPTION,
    &DEVELOPER_DATA_ID,
];

const fn field(name: &'static str, conversion: Conversion) -> FieldSpec {
    FieldSpec::new(name, conversion)
}

const POSITION: Conversion = Conversion::measure(Quantity::Position, 1.0, 0.0);
const ALTITUDE: Conversion = Conversion::measure(Quantity::Altitude, 5.0, 500.0);
const DISTANCE: Conversion = Conversion::measure(Quantity::Distance, 100.0, 0.0);
const SPEED: Conversion = Conversion::measure(Quantity::Speed, 1000.0, 0.0);
const ELEVATION: Conversion = Conversion::measure(Quantity::Altitude, 1.0, 0.0);
const MILLISECONDS: Conversion = Conversion::scaled(1000.0, "s");

static PRODUCT: Dispatch = Dispatch {
    control: "manufacturer",
    cases: &[
        ("garmin", Branch::Field(GARMIN)),
        ("dynastream", Branch::Field(GARMIN)),
        ("dynastream_oem", Branch::Field(GARMIN)),
    ],
    unknown: field("product", Conversion::NONE),
};

const GARMIN: FieldSpec = field("garmin_product", Conversion::Enum(&GARMIN_PRODUCT));

static DEVICE_TYPE: Dispatch = Dispatch {
    control: "source_type",
    cases: &[
        (
            "antplus",
            Branch::Field(field(
                "antplus_device_type",
                Conversion::Enum(&ANTPLUS_DEVICE_TYPE),
            )),
        ),
        (
            "bluetooth_low_energy",
            Branch::Field(field("ble_device_type", Conversion::Enum(&BLE_DEVICE_TYPE))),
        ),
        (
            "local",
            Branch::Field(field(
                "local_device_type",
                Conversion::Enum(&LOCAL_DEVICE_TYPE),
            )),
        ),
    ],
    unknown: field("device_type", Conversion::NONE),
};

static GEAR_CHANGE: [Component; 4] = [
    Component::new("rear_gear_num", 0, 8, Conversion::NONE),
    Component::new("rear_gear", 8, 8, Conversion::units("teeth")),
    Component::new("front_gear_num", 16, 8, Conversion::NONE),
    Component::new("front_gear", 24, 8, Conversion::units("teeth")),
];

static EVENT_DATA: Dispatch = Dispatch {
    control: "event",
    cases: &[
        (
            "timer",
            Branch::Field(field("timer_trigger", Conversion::Enum(&TIMER_TRIGGER))),
        ),
        (
            "course_point",
            Branch::Field(field("course_point_index", Conversion::NONE)),
        ),
        (
            "battery",
            Branch::Field(field("battery_level", Conversion::scaled(1000.0, "V"))),
        ),
        (
            "front_gear_change",
            Branch::Field(field("gear_change_data", Conversion::Bits(&GEAR_CHANGE))),
        ),
        (
            "rear_gear_change",
            Branch::Field(field("gear_change_data", Conversion::Bits(&GEAR_CHANGE))),
        ),
        (
            "rider_position_change",
            Branch::Field(field(
                "rider_position",
                Conversion::Enum(&RIDER_POSITION_TYPE),
            )),
        ),
    ],
    unknown: field("data", Conversion::NONE),
};

const STRIDES: FieldSpec = field("total_strides", Conversion::units("strides"));
const STROKES: FieldSpec = field("total_strokes", Conversion::units("strokes"));
const CYCLES: FieldSpec = field("total_cycles", Conversion::units("cycles"));

static TOTAL_CYCLES_BY_SUB_SPORT: Dispatch = Dispatch {
    control: "sub_sport",
    cases: &[
        ("treadmill", Branch::Field(STRIDES)),
        ("track", Branch::Field(STRIDES)),
        ("indoor_rowing", Branch::Field(STROKES)),
        ("lap_swimming", Branch::Field(STROKES)),
    ],
    unknown: CYCLES,
};

static TOTAL_CYCLES: Dispatch = Dispatch {
    control: "sport",
    cases: &[
        ("running", Branch::Field(STRIDES)),
        ("walking", Branch::Field(STRIDES)),
        ("cycling", Branch::Field(STROKES)),
        ("swimming", Branch::Field(STROKES)),
        ("rowing", Branch::Field(STROKES)),
        ("generic", Branch::Narrow(&TOTAL_CYCLES_BY_SUB_SPORT)),
    ],
    unknown: CYCLES,
};

static AVG_CADENCE: Dispatch = Dispatch {
    control: "sport",
    cases: &[
        ("running", Branch::Field(AVG_RUNNING_CADENCE)),
        ("walking", Branch::Field(AVG_RUNNING_CADENCE)),
    ],
    unknown: field("avg_cadence", Conversion::units("rpm")),
};

const AVG_RUNNING_CADENCE: FieldSpec =
    field("avg_running_cadence", Conversion::units("strides/min"));

static MAX_CADENCE: Dispatch = Dispatch {
    control: "sport",
    cases: &[
        ("running", Branch::Field(MAX_RUNNING_CADENCE)),
        ("walking", Branch::Field(MAX_RUNNING_CADENCE)),
    ],
    unknown: field("max_cadence", Conversion::units("rpm")),
};

const MAX_RUNNING_CADENCE: FieldSpec =
    field("max_running_cadence", Conversion::units("strides/min"));

static MONITORING_CYCLES: Dispatch = Dispatch {
    control: "activity_type",
    cases: &[
        ("walking", Branch::Field(STEPS)),
        ("running", Branch::Field(STEPS)),
        ("cycling", Branch::Field(MONITORING_STROKES)),
        ("swimming", Branch::Field(MONITORING_STROKES)),
    ],
    unknown: field("cycles", Conversion::scaled(2.0, "cycles")),
};

const STEPS: FieldSpec = field("steps", Conversion::scaled(1.0, "steps"));
const MONITORING_STROKES: FieldSpec = field("strokes", Conversion::scaled(2.0, "strokes"));

static ACTIVITY_INTENSITY: [Component; 2] = [
    Component::new("activity_type", 0, 5, Conversion::Enum(&ACTIVITY_TYPE)),
    Component::new("intensity", 5, 3, Conversion::NONE),
];

static FILE_ID: MessageSpec = MessageSpec {
    number: 0,
    kind: MessageKind::FileId,
    name: "file_id",
    fields: &[
        (0, field("type", Conversion::Enum(&FILE))),
        (1, field("manufacturer", Conversion::Enum(&MANUFACTURER))),
        (2, field("product", Conversion::NONE).depends(&PRODUCT)),
        (3, field("serial_number", Conversion::NONE)),
        (4, field("time_created", Conversion::Timestamp)),
        (5, field("number", Conversion::NONE)),
        (8, field("product_name", Conversion::String)),
    ],
};

static FILE_CREATOR: MessageSpec = MessageSpec {
    number: 49,
    kind: MessageKind::FileCreator,
    name: "file_creator",
    fields: &[
        (0, field("software_version", Conversion::NONE)),
        (1, field("hardware_version", Conversion::NONE)),
    ],
};

static DEVICE_SETTINGS: MessageSpec = MessageSpec {
    number: 2,
    kind: MessageKind::DeviceSettings,
    name: "device_settings",
    fields: &[
        (0, field("active_time_zone", Conversion::NONE)),
        (1, field("utc_offset", Conversion::NONE)),
        (2, field("time_offset", Conversion::units("s"))),
        (5, field("time_zone_offset", Conversion::scaled(4.0, "hr"))),
    ],
};

static USER_PROFILE: MessageSpec = MessageSpec {
    number: 3,
    kind: MessageKind::UserProfile,
    name: "user_profile",
    fields: &[
        (0, field("friendly_name", Conversion::String)),
        (1, field("gender", Conversion::Enum(&GENDER))),
        (2, field("age", Conversion::units("years"))),
        (
            3,
            field("height", Conversion::measure(Quantity::Length, 100.0, 0.0)),
        ),
        (
            4,
            field("weight", Conversion::measure(Quantity::Weight, 10.0, 0.0)),
        ),
        (8, field("resting_heart_rate", Conversion::units("bpm"))),
        (11, field("default_max_heart_rate", Conversion::units("bpm"))),
    ],
};

static SPORT_MESSAGE: MessageSpec = MessageSpec {
    number: 12,
    kind: MessageKind::Sport,
    name: "sport",
    fields: &[
        (0, field("sport", Conversion::Enum(&SPORT))),
        (1, field("sub_sport", Conversion::Enum(&SUB_SPORT))),
        (3, field("name", Conversion::String)),
    ],
};

static SESSION: MessageSpec = MessageSpec {
    number: 18,
    kind: MessageKind::Session,
    name: "session",
    fields: &[
        (0, field("event", Conversion::Enum(&EVENT))),
        (1, field("event_type", Conversion::Enum(&EVENT_TYPE))),
        (2, field("start_time", Conversion::Timestamp)),
        (3, field("start_position_lat", POSITION)),
        (4, field("start_position_long", POSITION)),
        (5, field("sport", Conversion::Enum(&SPORT))),
        (6, field("sub_sport", Conversion::Enum(&SUB_SPORT))),
        (7, field("total_elapsed_time", MILLISECONDS)),
        (8, field("total_timer_time", MILLISECONDS)),
        (9, field("total_distance", DISTANCE)),
        (10, CYCLES.depends(&TOTAL_CYCLES)),
        (11, field("total_calories", Conversion::units("kcal"))),
        (14, field("avg_speed", SPEED)),
        (15, field("max_speed", SPEED)),
        (16, field("avg_heart_rate", Conversion::units("bpm"))),
        (17, field("max_heart_rate", Conversion::units("bpm"))),
        (
            18,
            field("avg_cadence", Conversion::units("rpm")).depends(&AVG_CADENCE),
        ),
        (
            19,
            field("max_cadence", Conversion::units("rpm")).depends(&MAX_CADENCE),
        ),
        (20, field("avg_power", Conversion::units("watts"))),
        (21, field("max_power", Conversion::units("watts"))),
        (22, field("total_ascent", ELEVATION)),
        (23, field("total_descent", ELEVATION)),
        (25, field("first_lap_index", Conversion::NONE)),
        (26, field("num_laps", Conversion::NONE)),
    ],
};

static LAP: MessageSpec = MessageSpec {
    number: 19,
    kind: MessageKind::Lap,
    name: "lap",
    fields: &[
        (0, field("event", Conversion::Enum(&EVENT))),
        (1, field("event_type", Conversion::Enum(&EVENT_TYPE))),
        (2, field("start_time", Conversion::Timestamp)),
        (3, field("start_position_lat", POSITION)),
        (4, field("start_position_long", POSITION)),
        (5, field("end_position_lat", POSITION)),
        (6, field("end_position_long", POSITION)),
        (7, field("total_elapsed_time", MILLISECONDS)),
        (8, field("total_timer_time", MILLISECONDS)),
        (9, field("total_distance", DISTANCE)),
        (10, CYCLES.depends(&TOTAL_CYCLES)),
        (11, field("total_calories", Conversion::units("kcal"))),
        (13, field("avg_speed", SPEED)),
        (14, field("max_speed", SPEED)),
        (15, field("avg_heart_rate", Conversion::units("bpm"))),
        (16, field("max_heart_rate", Conversion::units("bpm"))),
        (
            17,
            field("avg_cadence", Conversion::units("rpm")).depends(&AVG_CADENCE),
        ),
        (
            18,
            field("max_cadence", Conversion::units("rpm")).depends(&MAX_CADENCE),
        ),
        (19, field("avg_power", Conversion::units("watts"))),
        (20, field("max_power", Conversion::units("watts"))),
        (21, field("total_ascent", ELEVATION)),
        (22, field("total_descent", ELEVATION)),
        (25, field("sport", Conversion::Enum(&SPORT))),
        (39, field("sub_sport", Conversion::Enum(&SUB_SPORT))),
    ],
};

static RECORD: MessageSpec = MessageSpec {
    number: 20,
    kind: MessageKind::Record,
    name: "record",
    fields: &[
        (0, field("position_lat", POSITION)),
        (1, field("position_long", POSITION)),
        (2, field("altitude", ALTITUDE)),
        (3, field("heart_rate", Conversion::units("bpm"))),
        (4, field("cadence", Conversion::units("rpm"))),
        (5, field("distance", DISTANCE)),
        (6, field("speed", SPEED)),
        (7, field("power", Conversion::units("watts"))),
        (
            13,
            field("temperature", Conversion::measure(Quantity::Temperature, 1.0, 0.0)),
        ),
        (19, field("total_cycles", Conversion::units("cycles"))),
        (29, field("accumulated_power", Conversion::units("watts"))),
        (30, field("left_right_balance", Conversion::NONE)),
        (53, field("fractional_cadence", Conversion::scaled(128.0, "rpm"))),
        (73, field("enhanced_speed", SPEED)),
        (78, field("enhanced_altitude", ALTITUDE)),
    ],
};

static EVENT_MESSAGE: MessageSpec = MessageSpec {
    number: 21,
    kind: MessageKind::Event,
    name: "event",
    fields: &[
        (0, field("event", Conversion::Enum(&EVENT))),
        (1, field("event_type", Conversion::Enum(&EVENT_TYPE))),
        (2, field("data16", Conversion::NONE)),
        (3, field("data", Conversion::NONE).depends(&EVENT_DATA)),
        (4, field("event_group", Conversion::NONE)),
    ],
};

static DEVICE_INFO: MessageSpec = MessageSpec {
    number: 23,
    kind: MessageKind::DeviceInfo,
    name: "device_info",
    fields: &[
        (0, field("device_index", Conversion::NONE)),
        (1, field("device_type", Conversion::NONE).depends(&DEVICE_TYPE)),
        (2, field("manufacturer", Conversion::Enum(&MANUFACTURER))),
        (3, field("serial_number", Conversion::NONE)),
        (4, field("product", Conversion::NONE).depends(&PRODUCT)),
        (5, field("software_version", Conversion::scaled(100.0, ""))),
        (6, field("hardware_version", Conversion::NONE)),
        (7, field("cum_operating_time", Conversion::units("s"))),
        (10, field("battery_voltage", Conversion::scaled(256.0, "V"))),
        (11, field("battery_status", Conversion::Enum(&BATTERY_STATUS))),
        (19, field("descriptor", Conversion::String)),
        (20, field("ant_transmission_type", Conversion::NONE)),
        (21, field("ant_device_number", Conversion::NONE)),
        (25, field("source_type", Conversion::Enum(&SOURCE_TYPE))),
        (27, field("product_name", Conversion::String)),
    ],
};

static ACTIVITY_MESSAGE: MessageSpec = MessageSpec {
    number: 34,
    kind: MessageKind::Activity,
    name: "activity",
    fields: &[
        (0, field("total_timer_time", MILLISECONDS)),
        (1, field("num_sessions", Conversion::NONE)),
        (2, field("type", Conversion::Enum(&ACTIVITY))),
        (3, field("event", Conversion::Enum(&EVENT))),
        (4, field("event_type", Conversion::Enum(&EVENT_TYPE))),
        (5, field("local_timestamp", Conversion::LocalTimestamp)),
        (6, field("event_group", Conversion::NONE)),
    ],
};

static MONITORING: MessageSpec = MessageSpec {
    number: 55,
    kind: MessageKind::Monitoring,
    name: "monitoring",
    fields: &[
        (0, field("device_index", Conversion::NONE)),
        (1, field("calories", Conversion::units("kcal"))),
        (2, field("distance", DISTANCE)),
        (
            3,
            field("cycles", Conversion::scaled(2.0, "cycles")).depends(&MONITORING_CYCLES),
        ),
        (4, field("active_time", MILLISECONDS)),
        (5, field("activity_type", Conversion::Enum(&ACTIVITY_TYPE))),
        (6, field("activity_subtype", Conversion::NONE)),
        (19, field("active_calories", Conversion::units("kcal"))),
        (
            24,
            field(
                "current_activity_type_intensity",
                Conversion::Bits(&ACTIVITY_INTENSITY),
            ),
        ),
        (26, field("timestamp_16", Conversion::units("s"))),
        (27, field("heart_rate", Conversion::units("bpm"))),
        (29, field("duration_min", Conversion::units("min"))),
    ],
};

static HRV: MessageSpec = MessageSpec {
    number: 78,
    kind: MessageKind::Hrv,
    name: "hrv",
    fields: &[(0, field("time", MILLISECONDS))],
};

static LENGTH: MessageSpec = MessageSpec {
    number: 101,
    kind: MessageKind::Length,
    name: "length",
    fields: &[
        (0, field("event", Conversion::Enum(&EVENT))),
        (1, field("event_type", Conversion::Enum(&EVENT_TYPE))),
        (2, field("start_time", Conversion::Timestamp)),
        (3, field("total_elapsed_time", MILLISECONDS)),
        (4, field("total_timer_time", MILLISECONDS)),
        (5, field("total_strokes", Conversion::units("strokes"))),
        (6, field("avg_speed", SPEED)),
        (9, field("total_calories", Conversion::units("kcal"))),
    ],
};

static MONITORING_INFO: MessageSpec = MessageSpec {
    number: 103,
    kind: MessageKind::MonitoringInfo,
    name: "monitoring_info",
    fields: &[
        (0, field("local_timestamp", Conversion::LocalTimestamp)),
        (1, field("activity_type", Conversion::Enum(&ACTIVITY_TYPE))),
        (
            3,
            field("cycles_to_distance", Conversion::scaled(5000.0, "m/cycle")),
        ),
        (
            4,
            field("cycles_to_calories", Conversion::scaled(5000.0, "kcal/cycle")),
        ),
        (5, field("resting_metabolic_rate", Conversion::units("kcal/day"))),
    ],
};

static HR: MessageSpec = MessageSpec {
    number: 132,
    kind: MessageKind::Hr,
    name: "hr",
    fields: &[
        (0, field("fractional_timestamp", Conversion::scaled(32768.0, "s"))),
        (1, field("time256", Conversion::scaled(256.0, "s"))),
        (6, field("filtered_bpm", Conversion::units("bpm"))),
        (9, field("event_timestamp", Conversion::scaled(1024.0, "s"))),
        (10, field("event_timestamp_12", Conversion::NONE)),
    ],
};

static FIELD_DESCRIPTION: MessageSpec = MessageSpec {
    number: 206,
    kind: MessageKind::FieldDescription,
    name: "field_description",
    fields: &[
        (0, field("developer_data_index", Conversion::NONE)),
        (1, field("field_definition_number", Conversion::NONE)),
        (2, field("fit_base_type_id", Conversion::NONE)),
        (3, field("field_name", Conversion::String)),
        (4, field("array", Conversion::NONE)),
        (5, field("components", Conversion::String)),
        (6, field("scale", Conversion::NONE)),
        (7, field("offset", Conversion::NONE)),
        (8, field("units", Conversion::String)),
        (9, field("bits", Conversion::String)),
        (10, field("accumulate", Conversion::String)),
        (13, field("fit_base_unit_id", Conversion::NONE)),
        (14, field("native_mesg_num", Conversion::NONE)),
        (15, field("native_field_num", Conversion::NONE)),
    ],
};

static DEVELOPER_DATA_ID: MessageSpec = MessageSpec {
    number: 207,
    kind: MessageKind::DeveloperDataId,
    name: "developer_data_id",
    fields: &[
        (0, field("developer_id", Conversion::NONE)),
        (1, field("application_id", Conversion::NONE)),
        (2, field("manufacturer_id", Conversion::Enum(&MANUFACTURER))),
        (3, field("developer_data_index", Conversion::NONE)),
        (4, field("application_version", Conversion::NONE)),
    ],
};

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;

    #[test]
    fn resolve_message_numbers() {
        assert_eq!(MessageKind::from_number(20), Some(MessageKind::Record));
        assert_eq!(MessageKind::from_number(999), Some(MessageKind::Unknown(999)));
        assert_eq!(
            MessageKind::from_number(0xFF10),
            Some(MessageKind::ManufacturerSpecific(0xFF10))
        );
        assert_eq!(MessageKind::from_number(0xFFFF), None);
    }

    #[test]
    fn numbers_round_trip_through_the_catalog() {
        for message in CATALOG {
            assert_eq!(MessageKind::from_number(message.number), Some(message.kind));
            assert_eq!(message.kind.number(), message.number);
        }
    }

    #[test]
    fn display_names() {
        assert_eq!(MessageKind::DeviceInfo.to_string(), "device_info");
        assert_eq!(MessageKind::Unknown(999).to_string(), "unknown_999");
    }

    #[test]
    fn common_fields_apply_to_every_message() {
        assert_eq!(MessageKind::Record.field(253).unwrap().name, "timestamp");
        assert_eq!(MessageKind::Unknown(999).field(254).unwrap().name, "message_index");
        assert!(MessageKind::Record.field(200).is_none());
    }

    #[test]
    fn dependent_fields_declare_dispatch() {
        let product = MessageKind::FileId.field(2).unwrap();
        assert_eq!(product.dispatch.map(|d| d.control), Some("manufacturer"));

        let cycles = MessageKind::Session.field(10).unwrap();
        assert_eq!(cycles.dispatch.map(|d| d.control), Some("sport"));
    }
}
