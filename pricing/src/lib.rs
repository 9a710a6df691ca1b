//! Reservation pricing rules
//!
//! Everything the admin views need to turn a hotel's rate calendar into
//! money: the per-night breakdown of each picked room, the commission and
//! deposit totals built from it, and the edits an operator can make to a
//! breakdown before it is submitted back to the backend.
//!
//! All functions are pure. Amounts are [`rust_decimal::Decimal`] so that
//! sums over nights and rooms are exact.

pub mod adjust;
pub mod calendar;
pub mod commission;
pub mod relocation;

pub use adjust::{distribute_total, edit_day};
pub use calendar::{BaseRate, nights, price_room, price_rooms, pricing_by_day};
pub use commission::{
    deposit_amount, deposit_options, recompute_totals, summarize,
};
pub use relocation::relocated_confirmation_number;

use jiff::civil::Date;
use rust_decimal::Decimal;

#[derive(Debug, thiserror::Error)]
pub enum PricingError {
    #[error("Room count must be at least 1")]
    InvalidCount,
    #[error("Room type not found: {0}")]
    UnknownRoomType(String),
    #[error("No pricing day on {0}")]
    UnknownDay(Date),
    #[error("There are no days to distribute over")]
    NoDays,
    #[error("Amounts must not be negative")]
    NegativeAmount,
    #[error("Amounts must be in whole cents")]
    SubCentAmount,
    #[error("Deposit must be greater than 0 and at most {max}")]
    InvalidDeposit { max: Decimal },
    #[error("Amount out of range")]
    AmountOutOfRange,
    #[error("Confirmation number cannot be relocated again: {0}")]
    RelocationSuffix(String),
    #[error("Date out of range")]
    DateOutOfRange(#[from] jiff::Error),
}

impl From<payloads::AmountOutOfRange> for PricingError {
    fn from(_: payloads::AmountOutOfRange) -> Self {
        PricingError::AmountOutOfRange
    }
}
