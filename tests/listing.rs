mod common;

use chainring::avec::FitFile;
use csv::{ReaderBuilder, StringRecord};
use pretty_assertions::assert_eq;

use common::*;

/// Every valid field of every message, one row each.
fn listing(file: &FitFile) -> Vec<StringRecord> {
    file.messages()
        .iter()
        .flat_map(|message| {
            message
                .fields()
                .iter()
                .filter(|field| !field.value().is_invalid())
                .map(move |field| {
                    StringRecord::from(vec![
                        message.kind().to_string(),
                        field.name().to_string(),
                        field.value().to_string(),
                        field.units().unwrap_or_default().to_string(),
                    ])
                })
        })
        .collect()
}

fn expected(listing: &str) -> Vec<StringRecord> {
    ReaderBuilder::new()
        .has_headers(false)
        .from_reader(listing.as_bytes())
        .records()
        .collect::<Result<_, _>>()
        .unwrap()
}

#[test]
fn list_activity() {
    let file_id = [&[4][..], &1u16.to_le_bytes(), &1036u16.to_le_bytes()].concat();
    let record = [&NEW_YEAR.to_le_bytes()[..], &[142], &2500u16.to_le_bytes()].concat();
    let session = [&[1][..], &[100], &1234u32.to_le_bytes(), &[0xFF]].concat();

    let bytes = Builder::new()
        .definition(0, 0, &[(0, 1, ENUM), (1, 2, UINT16), (2, 2, UINT16)])
        .data(0, &file_id)
        .definition(1, 20, &[(253, 4, UINT32), (3, 1, UINT8), (6, 2, UINT16)])
        .data(1, &record)
        .definition(2, 20, &[(3, 1, UINT8), (6, 2, UINT16)])
        .compressed(2, 4, &[&[143][..], &2600u16.to_le_bytes()].concat())
        .definition(3, 18, &[(5, 1, ENUM), (6, 1, ENUM), (10, 4, UINT32), (16, 1, UINT8)])
        .data(3, &session)
        .build();

    let file = chainring::avec::decode_slice(&bytes).unwrap();

    let listing = listing(&file);
    let expected = expected(
        "\
file_id,type,activity,
file_id,manufacturer,garmin,
file_id,garmin_product,edge500,
record,timestamp,2024-01-01T00:00:00Z,
record,heart_rate,142,bpm
record,speed,2.5,m/s
record,heart_rate,143,bpm
record,speed,2.6,m/s
record,timestamp,2024-01-01T00:00:04Z,
session,sport,running,
session,sub_sport,unknown_100,
session,total_strides,1234,strides
",
    );

    assert_eq!(listing, expected);
}
