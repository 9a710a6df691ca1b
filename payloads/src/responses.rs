use crate::requests::DepositOption;
use crate::{Reservation, ReservationId, RoomSelection};
use jiff::civil::Date;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Totals over every priced room of a reservation or quote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommissionSummary {
    /// What the hotel receives: Σ root price × count.
    pub total_amount: Decimal,
    /// Everything the guest pays above `total_amount`.
    pub total_commission: Decimal,
    pub number_of_nights: u32,
    /// First night's root price × count, summed over rooms.
    pub one_night_cost: Decimal,
    /// `total_commission + one_night_cost`.
    pub final_deposit: Decimal,
}

impl CommissionSummary {
    /// What the guest pays in total.
    pub fn full_amount(&self) -> Decimal {
        self.total_amount + self.total_commission
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepositQuote {
    pub option: DepositOption,
    pub amount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingQuote {
    pub rooms: Vec<RoomSelection>,
    pub summary: CommissionSummary,
    pub deposit_options: Vec<DepositQuote>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationPage {
    pub items: Vec<Reservation>,
    /// Matching reservations across all pages.
    pub total: usize,
    pub page: u32,
    pub page_size: u32,
    pub total_pages: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationSummary {
    pub reservation_id: ReservationId,
    pub confirmation_number: String,
    pub summary: CommissionSummary,
    pub deposit_options: Vec<DepositQuote>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OccupancyDay {
    pub date: Date,
    pub rooms_booked: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepositCaptured {
    pub reservation_id: ReservationId,
    pub option: DepositOption,
    pub amount: Decimal,
}
