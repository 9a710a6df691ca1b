use jiff::ToSpan;
use jiff::civil::Date;
use payloads::Reservation;
use payloads::responses::OccupancyDay;

pub const MAX_OCCUPANCY_NIGHTS: i32 = 366;

#[derive(Debug, thiserror::Error)]
pub enum OccupancyError {
    #[error("The end date must be after the start date")]
    EmptyRange,
    #[error("At most {MAX_OCCUPANCY_NIGHTS} nights can be shown at once")]
    RangeTooLong,
    #[error("Date out of range")]
    DateOutOfRange(#[from] jiff::Error),
}

/// Rooms booked on each night of `[from, to)`.
///
/// A reservation occupies the nights `[checkin_date, checkout_date)`.
/// Cancelled reservations are ignored, and a reservation without priced rooms
/// still holds one room.
pub fn occupancy(
    reservations: &[Reservation],
    from: Date,
    to: Date,
) -> Result<Vec<OccupancyDay>, OccupancyError> {
    let nights = from.until(to)?.get_days();
    if nights < 1 {
        return Err(OccupancyError::EmptyRange);
    }
    if nights > MAX_OCCUPANCY_NIGHTS {
        return Err(OccupancyError::RangeTooLong);
    }

    let active: Vec<&Reservation> =
        reservations.iter().filter(|r| !r.is_cancelled()).collect();
    let days = from
        .series(1.day())
        .take(nights as usize)
        .map(|date| OccupancyDay {
            date,
            rooms_booked: active
                .iter()
                .filter(|r| r.checkin_date <= date && date < r.checkout_date)
                .map(|r| r.room_count().max(1))
                .sum(),
        })
        .collect();
    Ok(days)
}
