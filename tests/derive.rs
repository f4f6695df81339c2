#![cfg(feature = "derive")]

mod common;

use chainring::{
    Value,
    avec::{FromMessage, FromMessages},
};
use chrono::{DateTime, Duration, TimeZone, Utc};
use pretty_assertions::assert_eq;

use common::*;

#[derive(Debug, Default, PartialEq, FromMessages)]
struct Activity {
    #[message(0)]
    file_id: Option<FileId>,
    #[message(20)]
    records: Vec<Record>,
    #[message(78)]
    hrv: Option<Hrv>,
    unrelated: u32,
}

#[derive(Debug, Default, PartialEq, FromMessage)]
struct FileId {
    #[field("type")]
    kind: Option<String>,
    #[field("manufacturer")]
    manufacturer: Option<String>,
    #[field("garmin_product")]
    product: Option<u16>,
    #[field("time_created")]
    created: Option<DateTime<Utc>>,
}

#[derive(Debug, Default, PartialEq, FromMessage)]
struct Record {
    #[field(time)]
    time: Option<DateTime<Utc>>,
    #[field("heart_rate")]
    heart_rate: Option<u8>,
    #[field("speed")]
    speed: Option<f64>,
    #[field("doughnuts", |acc, v: f64| *acc += v)]
    doughnuts: f64,
}

#[derive(Debug, Default, PartialEq, FromMessage)]
struct Hrv {
    #[field("time", |v, t: Vec<f64>| v.extend(t))]
    intervals: Vec<f64>,
}

fn document() -> Vec<u8> {
    let file_id = [
        &[4][..],
        &1u16.to_le_bytes(),
        &1036u16.to_le_bytes(),
        &NEW_YEAR.to_le_bytes(),
    ]
    .concat();

    let builder = Builder::new()
        .definition(0, 0, &[(0, 1, ENUM), (1, 2, UINT16), (2, 2, UINT16), (4, 4, UINT32)])
        .data(0, &file_id);

    let builder = describe(builder, 0, UINT8, "doughnuts", "", 2, None);

    let record = [&NEW_YEAR.to_le_bytes()[..], &[142], &2500u16.to_le_bytes(), &[5]].concat();
    let hrv = [800u16, 0xFFFF, 820]
        .iter()
        .flat_map(|x| x.to_le_bytes())
        .collect::<Vec<_>>();

    builder
        .developer_definition(
            1,
            20,
            &[(253, 4, UINT32), (3, 1, UINT8), (6, 2, UINT16)],
            &[(0, 1, 0)],
        )
        .data(1, &record)
        .definition(2, 20, &[(3, 1, UINT8), (6, 2, UINT16)])
        .compressed(2, 2, &[&[0xFF][..], &3000u16.to_le_bytes()].concat())
        .definition(3, 78, &[(0, 6, UINT16)])
        .data(3, &hrv)
        .build()
}

#[test]
fn publish_to_derived_receivers() {
    let file = chainring::avec::decode_slice(&document()).unwrap();

    let mut activity = Activity::default();
    file.publish(&mut activity);

    let new_year = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();

    assert_eq!(
        activity,
        Activity {
            file_id: Some(FileId {
                kind: Some("activity".into()),
                manufacturer: Some("garmin".into()),
                product: Some(1036),
                created: Some(new_year),
            }),
            records: vec![
                Record {
                    time: Some(new_year),
                    heart_rate: Some(142),
                    speed: Some(2.5),
                    doughnuts: 2.5,
                },
                Record {
                    time: Some(new_year + Duration::seconds(2)),
                    // Invalid values are not published.
                    heart_rate: None,
                    speed: Some(3.0),
                    doughnuts: 0.0,
                },
            ],
            hrv: Some(Hrv {
                intervals: vec![0.8, 0.82],
            }),
            unrelated: 0,
        }
    );
}

#[derive(Debug, Default)]
struct Counter {
    messages: usize,
    fields: Vec<String>,
}

impl FromMessage for Counter {
    fn add_field(&mut self, field: &chainring::FieldValue) {
        self.fields.push(field.name().to_string());
    }
}

impl FromMessages for Counter {
    fn add_message(&mut self, number: u16) -> Option<&mut dyn FromMessage> {
        self.messages += 1;
        if number == 78 { Some(self) } else { None }
    }
}

#[test]
fn publish_to_manual_receivers() {
    let file = chainring::avec::decode_slice(&document()).unwrap();

    let mut counter = Counter::default();
    file.publish(&mut counter);

    // Including the field description.
    assert_eq!(counter.messages, 5);
    assert_eq!(counter.fields, ["time"]);
}

#[test]
fn values_convert_through_from_value() {
    use chainring::avec::FromValue;

    let value = Value::Array(vec![Value::Float(0.5), Value::Invalid]);

    assert_eq!(Vec::<f64>::from_value(&value), Some(vec![0.5]));
    assert_eq!(f64::from_value(&value), None);
}
