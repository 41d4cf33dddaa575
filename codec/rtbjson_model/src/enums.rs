//! Contains the enumerations of the OpenRTB 2.x object model.

use std::str::FromStr;

#[cfg(test)]
mod test;

/// Implemented by the integer-coded OpenRTB enumerations.
pub trait Enumeration: Sized + Copy + 'static {
    /// The name used in diagnostics.
    const NAME: &'static str;

    /// Maps the wire code to the variant, [`None`] for a code outside of the
    /// published range.
    fn from_code(code: i64) -> Option<Self>;

    /// Gets the wire code of the variant.
    fn code(self) -> i64;
}

macro_rules! impl_enumeration {
    ($($enumeration:ident),* $(,)?) => {
        $(
            impl Enumeration for $enumeration {
                const NAME: &'static str = stringify!($enumeration);

                fn from_code(code: i64) -> Option<Self> {
                    u8::try_from(code).ok().and_then(Self::from_repr)
                }

                fn code(self) -> i64 { i64::from(self as u8) }
            }
        )*
    };
}

/// The general type of a device (OpenRTB list 5.21).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum_macros::FromRepr,
    strum_macros::EnumIter,
)]
#[repr(u8)]
#[allow(missing_docs)]
pub enum DeviceType {
    MobileTablet = 1,
    PersonalComputer = 2,
    ConnectedTv = 3,
    Phone = 4,
    Tablet = 5,
    ConnectedDevice = 6,
    SetTopBox = 7,
}

/// The position of the ad as a relative measure of visibility (OpenRTB list
/// 5.4).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum_macros::FromRepr,
    strum_macros::EnumIter,
)]
#[repr(u8)]
#[allow(missing_docs)]
pub enum AdPosition {
    Unknown = 0,
    AboveTheFold = 1,
    Deprecated = 2,
    BelowTheFold = 3,
    Header = 4,
    Footer = 5,
    Sidebar = 6,
    FullScreen = 7,
}

/// How a geographic location was determined (OpenRTB list 5.20).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum_macros::FromRepr,
    strum_macros::EnumIter,
)]
#[repr(u8)]
#[allow(missing_docs)]
pub enum LocationType {
    GpsLocation = 1,
    IpAddress = 2,
    UserProvided = 3,
}

/// The auction type of a bid request.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum_macros::FromRepr,
    strum_macros::EnumIter,
)]
#[repr(u8)]
#[allow(missing_docs)]
pub enum AuctionType {
    FirstPrice = 1,
    SecondPricePlus = 2,
}

/// The reason for not bidding (OpenRTB list 5.24).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum_macros::FromRepr,
    strum_macros::EnumIter,
)]
#[repr(u8)]
#[allow(missing_docs)]
pub enum NoBidReason {
    UnknownError = 0,
    TechnicalError = 1,
    InvalidRequest = 2,
    KnownWebSpider = 3,
    SuspectedNonHumanTraffic = 4,
    CloudDataCenterOrProxyIp = 5,
    UnsupportedDevice = 6,
    BlockedPublisherOrSite = 7,
    UnmatchedUser = 8,
    DailyReaderCapMet = 9,
    DailyDomainCapMet = 10,
}

impl_enumeration!(
    DeviceType,
    AdPosition,
    LocationType,
    AuctionType,
    NoBidReason,
);

/// The gender of a user, written as a single letter code.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum_macros::EnumString,
    strum_macros::IntoStaticStr,
    strum_macros::EnumIter,
)]
pub enum Gender {
    /// `M`
    #[strum(serialize = "M")]
    Male,

    /// `F`
    #[strum(serialize = "F")]
    Female,

    /// `O`, known to be other than male or female.
    #[strum(serialize = "O")]
    Other,
}

impl Gender {
    /// Parses the letter code, [`None`] for anything other than `M`, `F` or
    /// `O`.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> { Self::from_str(code).ok() }

    /// Gets the letter code of the gender.
    #[must_use]
    pub fn code(self) -> &'static str { self.into() }
}
