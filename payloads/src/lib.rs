pub mod api_client;
pub mod generation;
pub mod loose;
pub mod requests;
pub mod responses;

pub use api_client::{APIClient, ClientError};
pub use generation::{RequestGeneration, Ticket};

use derive_more::Display;
use jiff::Timestamp;
use jiff::civil::Date;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Backend-assigned hotel identifier.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Display,
    Serialize,
    Deserialize,
)]
#[serde(transparent)]
pub struct HotelId(pub String);

/// Backend-assigned reservation identifier. Distinct from the human-facing
/// confirmation number.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Display,
    Serialize,
    Deserialize,
)]
#[serde(transparent)]
pub struct ReservationId(pub String);

#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Display, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ImageId(pub String);

/// The materialized price of one room for one night.
///
/// `total_price_with_commission` is always
/// `price + root_price * commission_rate / 100`. Construct with
/// [`PricingDay::new`] and call [`PricingDay::recompute`] after mutating any
/// of the inputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingDay {
    pub date: Date,
    #[serde(default, deserialize_with = "loose::decimal_or_zero")]
    pub price: Decimal,
    #[serde(default, deserialize_with = "loose::decimal_or_zero")]
    pub root_price: Decimal,
    /// Percentage, e.g. 10 means 10%.
    #[serde(default, deserialize_with = "loose::decimal_or_zero")]
    pub commission_rate: Decimal,
    #[serde(default, deserialize_with = "loose::decimal_or_zero")]
    pub total_price_with_commission: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("Amount out of range")]
pub struct AmountOutOfRange;

impl PricingDay {
    pub fn new(
        date: Date,
        price: Decimal,
        root_price: Decimal,
        commission_rate: Decimal,
    ) -> Result<Self, AmountOutOfRange> {
        let mut day = Self {
            date,
            price,
            root_price,
            commission_rate,
            total_price_with_commission: Decimal::ZERO,
        };
        day.recompute()?;
        Ok(day)
    }

    /// `price + root_price * commission_rate / 100`, derived from the inputs
    /// rather than read from the stored total.
    pub fn checked_total(&self) -> Result<Decimal, AmountOutOfRange> {
        self.root_price
            .checked_mul(self.commission_rate)
            .and_then(|c| c.checked_div(Decimal::ONE_HUNDRED))
            .and_then(|c| self.price.checked_add(c))
            .ok_or(AmountOutOfRange)
    }

    /// Restore the total after price, root price or rate changed.
    pub fn recompute(&mut self) -> Result<(), AmountOutOfRange> {
        self.total_price_with_commission = self.checked_total()?;
        Ok(())
    }

    /// The platform's cut for this night: everything above the root price.
    pub fn commission(&self) -> Result<Decimal, AmountOutOfRange> {
        self.total_price_with_commission
            .checked_sub(self.root_price)
            .ok_or(AmountOutOfRange)
    }
}

/// A room type picked for a reservation, with its nightly breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomSelection {
    pub room_type: String,
    #[serde(default)]
    pub display_name: String,
    pub count: u32,
    /// Empty until computed from the hotel's rate calendar.
    #[serde(default)]
    pub pricing_by_day: Vec<PricingDay>,
}

/// A sparse per-date override in a room type's rate calendar.
///
/// The backend is loose about numeric types, so every number may be absent,
/// a string, or garbage. Anything unparseable is `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateCalendarEntry {
    /// Matched verbatim against `YYYY-MM-DD`.
    pub date: String,
    #[serde(default, deserialize_with = "loose::optional_decimal")]
    pub price: Option<Decimal>,
    #[serde(default, deserialize_with = "loose::optional_decimal")]
    pub root_price: Option<Decimal>,
    #[serde(default, deserialize_with = "loose::optional_decimal")]
    pub commission_rate: Option<Decimal>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomType {
    /// Key used by reservations to refer to this room type.
    pub room_type: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default, deserialize_with = "loose::decimal_or_zero")]
    pub price: Decimal,
    #[serde(default, deserialize_with = "loose::decimal_or_zero")]
    pub root_price: Decimal,
    #[serde(default, deserialize_with = "loose::decimal_or_zero")]
    pub commission_rate: Decimal,
    #[serde(default)]
    pub rate_calendar: Vec<RateCalendarEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hotel {
    pub id: HotelId,
    pub name: String,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub room_types: Vec<RoomType>,
}

impl Hotel {
    pub fn room_type(&self, key: &str) -> Option<&RoomType> {
        self.room_types.iter().find(|r| r.room_type == key)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReservationStatus {
    Pending,
    Confirmed,
    CheckedIn,
    CheckedOut,
    Cancelled,
    /// Any status this service doesn't know about.
    #[serde(other)]
    Other,
}

impl ReservationStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Confirmed => "Confirmed",
            Self::CheckedIn => "Checked In",
            Self::CheckedOut => "Checked Out",
            Self::Cancelled => "Cancelled",
            Self::Other => "Other",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Unpaid,
    Partial,
    Paid,
    Refunded,
    #[serde(other)]
    Other,
}

impl PaymentStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Unpaid => "Unpaid",
            Self::Partial => "Partially Paid",
            Self::Paid => "Paid",
            Self::Refunded => "Refunded",
            Self::Other => "Other",
        }
    }
}

/// A reservation as owned by the booking backend.
///
/// Only `total_amount`, `commission`, `picked_rooms_type`, the hotel fields
/// and `confirmation_number` are ever written back by this service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    pub id: ReservationId,
    pub confirmation_number: String,
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    pub hotel_id: HotelId,
    #[serde(default)]
    pub hotel_name: String,
    pub status: ReservationStatus,
    pub checkin_date: Date,
    pub checkout_date: Date,
    pub payment_status: PaymentStatus,
    #[serde(default, deserialize_with = "loose::decimal_or_zero")]
    pub total_amount: Decimal,
    #[serde(default, deserialize_with = "loose::decimal_or_zero")]
    pub paid_amount: Decimal,
    #[serde(default, deserialize_with = "loose::decimal_or_zero")]
    pub commission: Decimal,
    #[serde(rename = "pickedRoomsType", default)]
    pub picked_rooms_type: Vec<RoomSelection>,
    #[serde(default)]
    pub paid_onsite: bool,
    #[serde(default)]
    pub payment_triggered: bool,
    pub created_at: Timestamp,
}

impl Reservation {
    pub fn room_count(&self) -> u32 {
        self.picked_rooms_type.iter().map(|r| r.count).sum()
    }

    pub fn is_cancelled(&self) -> bool {
        self.status == ReservationStatus::Cancelled
    }
}
