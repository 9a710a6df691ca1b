//! Per-night pricing from a sparse rate calendar.

use std::collections::HashMap;

use jiff::ToSpan;
use jiff::civil::Date;
use payloads::requests::RoomRequest;
use payloads::{
    Hotel, PricingDay, RateCalendarEntry, RoomSelection, RoomType,
};
use rust_decimal::Decimal;

use crate::PricingError;

/// Values used for nights without a calendar override.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BaseRate {
    pub price: Decimal,
    pub root_price: Decimal,
    pub commission_rate: Decimal,
}

impl From<&RoomType> for BaseRate {
    fn from(room_type: &RoomType) -> Self {
        Self {
            price: room_type.price,
            root_price: room_type.root_price,
            commission_rate: room_type.commission_rate,
        }
    }
}

/// Number of nights in `[checkin, checkout)`, never less than 1.
pub fn nights(checkin: Date, checkout: Date) -> Result<u32, PricingError> {
    let days = checkin.until(checkout)?.get_days();
    Ok(days.max(1) as u32)
}

/// One [`PricingDay`] per night of the stay.
///
/// An override applies when its date string equals the night's
/// `YYYY-MM-DD`. Where several overrides share a date the first one wins.
/// Numbers missing from a matched override count as zero rather than
/// falling back to `base`.
pub fn pricing_by_day(
    calendar: &[RateCalendarEntry],
    checkin: Date,
    checkout: Date,
    base: &BaseRate,
) -> Result<Vec<PricingDay>, PricingError> {
    let nights = nights(checkin, checkout)? as usize;

    let mut overrides: HashMap<&str, &RateCalendarEntry> = HashMap::new();
    for entry in calendar {
        overrides.entry(entry.date.as_str()).or_insert(entry);
    }

    // every night lies within [checkin, checkout] so the series can't
    // overflow before `nights` items
    let days = checkin
        .series(1.day())
        .take(nights)
        .map(|date| match overrides.get(date.to_string().as_str()) {
            Some(entry) => PricingDay::new(
                date,
                entry.price.unwrap_or(Decimal::ZERO),
                entry.root_price.unwrap_or(Decimal::ZERO),
                entry.commission_rate.unwrap_or(Decimal::ZERO),
            ),
            None => PricingDay::new(
                date,
                base.price,
                base.root_price,
                base.commission_rate,
            ),
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(days)
}

/// Price `count` rooms of one type for a stay.
pub fn price_room(
    room_type: &RoomType,
    count: u32,
    checkin: Date,
    checkout: Date,
) -> Result<RoomSelection, PricingError> {
    if count < 1 {
        return Err(PricingError::InvalidCount);
    }
    let pricing_by_day = pricing_by_day(
        &room_type.rate_calendar,
        checkin,
        checkout,
        &BaseRate::from(room_type),
    )?;
    Ok(RoomSelection {
        room_type: room_type.room_type.clone(),
        display_name: room_type.display_name.clone(),
        count,
        pricing_by_day,
    })
}

/// Price every requested room against a hotel's room types.
pub fn price_rooms(
    hotel: &Hotel,
    rooms: &[RoomRequest],
    checkin: Date,
    checkout: Date,
) -> Result<Vec<RoomSelection>, PricingError> {
    let selections = rooms
        .iter()
        .map(|room| {
            let room_type = hotel.room_type(&room.room_type).ok_or_else(
                || PricingError::UnknownRoomType(room.room_type.clone()),
            )?;
            price_room(room_type, room.count, checkin, checkout)
        })
        .collect::<Result<Vec<_>, _>>()?;

    tracing::debug!(
        hotel = %hotel.id,
        rooms = selections.len(),
        %checkin,
        %checkout,
        "Priced rooms"
    );
    Ok(selections)
}
