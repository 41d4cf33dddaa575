use rtbjson_extension::Registry;
use rtbjson_model::{
    enums::{DeviceType, Gender, NoBidReason},
    request::{BidRequest, Device, Imp, User},
    response::{Bid, BidResponse, SeatBid},
};
use rtbjson_stream::Generator;

use super::{Encoder, WriteFields};
use crate::options::Options;

fn encode<R: WriteFields>(record: &R) -> String {
    let registry = Registry::empty();
    let options = Options::default();
    let mut generator = Generator::new();

    Encoder::new(&registry, &options).record(record, &mut generator).unwrap();

    generator.finish().unwrap()
}

#[test]
fn unset_fields_are_left_out() {
    assert_eq!(encode(&BidRequest::default()), "{}");
    assert_eq!(encode(&Imp::default()), "{}");
}

#[test]
fn flags_are_integers() {
    let request = BidRequest {
        id: Some("1".to_owned()),
        test: Some(true),
        imp: vec![Imp {
            secure: Some(false),
            instl: Some(true),
            ..Imp::default()
        }],
        ..BidRequest::default()
    };

    assert_eq!(
        encode(&request),
        r#"{"id":"1","imp":[{"secure":0,"instl":1}],"test":1}"#
    );
}

#[test]
fn codes_and_lists() {
    let request = BidRequest {
        device: Some(Device {
            devicetype: Some(DeviceType::ConnectedTv),
            ..Device::default()
        }),
        user: Some(User {
            gender: Some(Gender::Other),
            yob: Some(-1),
            ..User::default()
        }),
        cur: vec!["USD".to_owned()],
        ..BidRequest::default()
    };

    assert_eq!(
        encode(&request),
        concat!(
            r#"{"device":{"devicetype":3},"user":{"yob":-1,"gender":"O"},"#,
            r#""cur":["USD"]}"#
        )
    );
}

#[test]
fn response() {
    let response = BidResponse {
        id: Some("r".to_owned()),
        seatbid: vec![SeatBid {
            bid: vec![Bid {
                price: Some(1.5),
                adomain: vec!["a.com".to_owned()],
                ..Bid::default()
            }],
            ..SeatBid::default()
        }],
        nbr: Some(NoBidReason::UnknownError),
        ..BidResponse::default()
    };

    assert_eq!(
        encode(&response),
        concat!(
            r#"{"id":"r","seatbid":[{"bid":[{"price":1.5,"#,
            r#""adomain":["a.com"]}]}],"nbr":0}"#
        )
    );
}
