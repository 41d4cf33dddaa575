use proptest::{prop_assert, prop_assert_eq, proptest};
use strum::IntoEnumIterator;

use super::{
    AdPosition, AuctionType, DeviceType, Enumeration, Gender, LocationType,
    NoBidReason,
};

fn assert_codes<E>(range: std::ops::RangeInclusive<i64>)
where
    E: Enumeration + IntoEnumIterator + PartialEq + std::fmt::Debug,
{
    for variant in E::iter() {
        assert_eq!(E::from_code(variant.code()), Some(variant));
        assert!(range.contains(&variant.code()), "{}", E::NAME);
    }

    assert_eq!(
        i64::try_from(E::iter().count()).unwrap(),
        range.end() - range.start() + 1
    );
    assert_eq!(E::from_code(range.start() - 1), None);
    assert_eq!(E::from_code(range.end() + 1), None);
}

#[test]
fn published_ranges() {
    assert_codes::<DeviceType>(1..=7);
    assert_codes::<AdPosition>(0..=7);
    assert_codes::<LocationType>(1..=3);
    assert_codes::<AuctionType>(1..=2);
    assert_codes::<NoBidReason>(0..=10);
}

#[test]
fn specific_codes() {
    assert_eq!(DeviceType::from_code(4), Some(DeviceType::Phone));
    assert_eq!(AdPosition::FullScreen.code(), 7);
    assert_eq!(NoBidReason::from_code(256), None);
    assert_eq!(NoBidReason::from_code(-1), None);
}

#[test]
fn gender_codes() {
    for gender in Gender::iter() {
        assert_eq!(Gender::from_code(gender.code()), Some(gender));
    }

    assert_eq!(Gender::from_code("F"), Some(Gender::Female));
    assert_eq!(Gender::from_code("m"), None);
    assert_eq!(Gender::from_code(""), None);
    assert_eq!(Gender::from_code("MF"), None);
}

proptest! {
    #[test]
    #[allow(clippy::ignored_unit_patterns)]
    fn from_code_is_total(code: i64) {
        match DeviceType::from_code(code) {
            Some(device_type) => prop_assert_eq!(device_type.code(), code),
            None => prop_assert!(!(1..=7).contains(&code)),
        }
    }
}
