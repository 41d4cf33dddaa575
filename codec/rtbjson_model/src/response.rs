//! Contains the records of an OpenRTB 2.x bid response.

use crate::{
    enums::NoBidReason,
    extension::{impl_extendable, Extensions},
};

/// The top level bid response.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BidResponse {
    /// The ID of the bid request this is a response to.
    pub id: Option<String>,

    /// The bids, grouped by seat.
    pub seatbid: Vec<SeatBid>,

    /// The bidder generated response ID.
    pub bidid: Option<String>,

    /// The bid currency, ISO-4217 code.
    pub cur: Option<String>,

    /// The reason for not bidding.
    pub nbr: Option<NoBidReason>,

    /// The extension slots.
    pub ext: Extensions<Self>,
}

/// The bids of a single seat.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SeatBid {
    /// The ID of the buyer seat on whose behalf the bids are made.
    pub seat: Option<String>,

    /// The bids, at least one per seat bid.
    pub bid: Vec<Bid>,

    /// Whether the impressions must be won or lost as a group.
    pub group: Option<bool>,

    /// The extension slots.
    pub ext: Extensions<Self>,
}

/// An offer to buy a specific impression.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Bid {
    /// The bidder generated bid ID.
    pub id: Option<String>,

    /// The ID of the impression this bid applies to.
    pub impid: Option<String>,

    /// The bid price, in CPM.
    pub price: Option<f64>,

    /// The ID of a preloaded ad.
    pub adid: Option<String>,

    /// The win notice URL.
    pub nurl: Option<String>,

    /// The ad markup.
    pub adm: Option<String>,

    /// The advertiser domains.
    pub adomain: Vec<String>,

    /// The campaign ID.
    pub cid: Option<String>,

    /// The creative ID.
    pub crid: Option<String>,

    /// The content categories of the creative.
    pub cat: Vec<String>,

    /// The width of the creative in device independent pixels.
    pub w: Option<u64>,

    /// The height of the creative in device independent pixels.
    pub h: Option<u64>,

    /// The extension slots.
    pub ext: Extensions<Self>,
}

impl_extendable!(
    BidResponse => "BidResponse",
    SeatBid => "SeatBid",
    Bid => "Bid",
);
