//! Contains the records of an OpenRTB 2.x bid request.
//!
//! Only the commonly exchanged subset of fields is modeled, every other field
//! of the wire document is skipped by the decoder. Unset fields are [`None`]
//! or empty lists and are not written back.

use crate::{
    enums::{AdPosition, AuctionType, DeviceType, Gender, LocationType},
    extension::{impl_extendable, Extensions},
};

/// The top level bid request.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BidRequest {
    /// The unique ID of the bid request.
    pub id: Option<String>,

    /// The impressions offered.
    pub imp: Vec<Imp>,

    /// Details about the website, if the impressions are on a website.
    pub site: Option<Site>,

    /// Details about the application, if the impressions are in an app.
    pub app: Option<App>,

    /// The user's device.
    pub device: Option<Device>,

    /// The human user of the device.
    pub user: Option<User>,

    /// Regulatory conditions in effect.
    pub regs: Option<Regs>,

    /// The inventory source and the upstream decisioning entity.
    pub source: Option<Source>,

    /// Whether this is a test auction.
    pub test: Option<bool>,

    /// The auction type.
    pub at: Option<AuctionType>,

    /// The maximum time in milliseconds to submit a bid.
    pub tmax: Option<u64>,

    /// The allowed currencies, ISO-4217 codes.
    pub cur: Vec<String>,

    /// The blocked content categories.
    pub bcat: Vec<String>,

    /// The blocked advertiser domains.
    pub badv: Vec<String>,

    /// The extension slots.
    pub ext: Extensions<Self>,
}

/// An ad slot being offered.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Imp {
    /// The ID of the impression, unique within the request.
    pub id: Option<String>,

    /// Present if the impression is offered as a banner.
    pub banner: Option<Banner>,

    /// Present if the impression is offered as a video.
    pub video: Option<Video>,

    /// The identifier of the ad placement.
    pub tagid: Option<String>,

    /// The minimum bid, in CPM.
    pub bidfloor: Option<f64>,

    /// The currency of the minimum bid.
    pub bidfloorcur: Option<String>,

    /// Whether the creative must be served over HTTPS.
    pub secure: Option<bool>,

    /// Whether the ad is interstitial or full screen.
    pub instl: Option<bool>,

    /// The extension slots.
    pub ext: Extensions<Self>,
}

/// A banner ad slot.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Banner {
    /// The exact width in device independent pixels.
    pub w: Option<u64>,

    /// The exact height in device independent pixels.
    pub h: Option<u64>,

    /// The position of the ad on the screen.
    pub pos: Option<AdPosition>,

    /// The extension slots.
    pub ext: Extensions<Self>,
}

/// A video ad slot.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Video {
    /// The supported content MIME types.
    pub mimes: Vec<String>,

    /// The minimum duration in seconds.
    pub minduration: Option<u64>,

    /// The maximum duration in seconds.
    pub maxduration: Option<u64>,

    /// The width of the player in device independent pixels.
    pub w: Option<u64>,

    /// The height of the player in device independent pixels.
    pub h: Option<u64>,

    /// The extension slots.
    pub ext: Extensions<Self>,
}

/// The website the impressions are shown on.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Site {
    /// The exchange specific site ID.
    pub id: Option<String>,

    /// The site name.
    pub name: Option<String>,

    /// The domain of the site.
    pub domain: Option<String>,

    /// The content categories of the site.
    pub cat: Vec<String>,

    /// The URL of the page the impressions are shown on.
    pub page: Option<String>,

    /// The publisher of the site.
    pub publisher: Option<Publisher>,

    /// The extension slots.
    pub ext: Extensions<Self>,
}

/// The application the impressions are shown in.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct App {
    /// The exchange specific app ID.
    pub id: Option<String>,

    /// The app name.
    pub name: Option<String>,

    /// The bundle or package name of the app.
    pub bundle: Option<String>,

    /// The content categories of the app.
    pub cat: Vec<String>,

    /// The publisher of the app.
    pub publisher: Option<Publisher>,

    /// The extension slots.
    pub ext: Extensions<Self>,
}

/// The publisher of a site or an app.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Publisher {
    /// The exchange specific publisher ID.
    pub id: Option<String>,

    /// The publisher name.
    pub name: Option<String>,

    /// The extension slots.
    pub ext: Extensions<Self>,
}

/// The device the impressions are shown on.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Device {
    /// The browser user agent string.
    pub ua: Option<String>,

    /// The IPv4 address closest to the device.
    pub ip: Option<String>,

    /// The general type of the device.
    pub devicetype: Option<DeviceType>,

    /// The device make.
    pub make: Option<String>,

    /// The device model.
    pub model: Option<String>,

    /// The device operating system.
    pub os: Option<String>,

    /// The location of the device.
    pub geo: Option<Geo>,

    /// The "do not track" flag set in the browser.
    pub dnt: Option<bool>,

    /// The "limit ad tracking" signal.
    pub lmt: Option<bool>,

    /// The extension slots.
    pub ext: Extensions<Self>,
}

/// A geographic location.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Geo {
    /// The latitude, from -90 to 90.
    pub lat: Option<f64>,

    /// The longitude, from -180 to 180.
    pub lon: Option<f64>,

    /// The ISO-3166-1 alpha-3 country code.
    pub country: Option<String>,

    /// The ISO-3166-2 region code.
    pub region: Option<String>,

    /// The city name.
    pub city: Option<String>,

    /// How the location was determined, written as `type`.
    pub location_type: Option<LocationType>,

    /// The extension slots.
    pub ext: Extensions<Self>,
}

/// The human user of the device.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct User {
    /// The exchange specific user ID.
    pub id: Option<String>,

    /// The buyer specific user ID.
    pub buyeruid: Option<String>,

    /// The year of birth.
    pub yob: Option<i64>,

    /// The gender.
    pub gender: Option<Gender>,

    /// The home location of the user.
    pub geo: Option<Geo>,

    /// The extension slots.
    pub ext: Extensions<Self>,
}

/// Regulatory conditions in effect for the request.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Regs {
    /// Whether the request is subject to COPPA.
    pub coppa: Option<bool>,

    /// The extension slots.
    pub ext: Extensions<Self>,
}

/// The inventory source and the entity making the final decision.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Source {
    /// Whether the exchange (`false`) or an upstream source (`true`) is
    /// responsible for the final sale decision.
    pub fd: Option<bool>,

    /// The transaction ID common across all participants.
    pub tid: Option<String>,

    /// The extension slots.
    pub ext: Extensions<Self>,
}

impl_extendable!(
    BidRequest => "BidRequest",
    Imp => "Imp",
    Banner => "Banner",
    Video => "Video",
    Site => "Site",
    App => "App",
    Publisher => "Publisher",
    Device => "Device",
    Geo => "Geo",
    User => "User",
    Regs => "Regs",
    Source => "Source",
);
