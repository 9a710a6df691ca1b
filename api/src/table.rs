//! The reservation table: filter, search, sort, paginate.
//!
//! Each step is a linear pass over what the backend returned. Sorting is
//! stable, so rows that compare equal (and every row when unsorted) keep the
//! backend's order.

use std::cmp::Ordering;

use jiff::civil::Date;
use payloads::requests::{
    ReservationFilter, ReservationQuery, SortColumn, SortDirection, SortState,
};
use payloads::responses::ReservationPage;
use payloads::{PaymentStatus, Reservation};

pub fn matches_filter(
    reservation: &Reservation,
    filter: ReservationFilter,
    today: Date,
) -> bool {
    use ReservationFilter::*;
    match filter {
        All => true,
        CheckinToday => {
            reservation.checkin_date == today && !reservation.is_cancelled()
        }
        CheckoutToday => {
            reservation.checkout_date == today && !reservation.is_cancelled()
        }
        PaymentTriggered => reservation.payment_triggered,
        Unpaid => reservation.payment_status == PaymentStatus::Unpaid,
        Paid => reservation.payment_status == PaymentStatus::Paid,
        Cancelled => reservation.is_cancelled(),
        Upcoming => {
            reservation.checkin_date > today && !reservation.is_cancelled()
        }
    }
}

/// Case-insensitive substring match; `term` must already be lowercase.
pub fn matches_search(reservation: &Reservation, term: &str) -> bool {
    [
        &reservation.confirmation_number,
        &reservation.name,
        &reservation.phone,
        &reservation.email,
        &reservation.hotel_name,
    ]
    .iter()
    .any(|field| field.to_lowercase().contains(term))
}

pub fn compare(a: &Reservation, b: &Reservation, column: SortColumn) -> Ordering {
    let text = |s: &str| s.to_lowercase();
    match column {
        SortColumn::ConfirmationNumber => {
            text(&a.confirmation_number).cmp(&text(&b.confirmation_number))
        }
        SortColumn::Name => text(&a.name).cmp(&text(&b.name)),
        SortColumn::HotelName => text(&a.hotel_name).cmp(&text(&b.hotel_name)),
        SortColumn::Status => a.status.label().cmp(b.status.label()),
        SortColumn::CheckinDate => a.checkin_date.cmp(&b.checkin_date),
        SortColumn::CheckoutDate => a.checkout_date.cmp(&b.checkout_date),
        SortColumn::TotalAmount => a.total_amount.cmp(&b.total_amount),
        SortColumn::PaidAmount => a.paid_amount.cmp(&b.paid_amount),
        SortColumn::CreatedAt => a.created_at.cmp(&b.created_at),
    }
}

pub fn sort_reservations(
    reservations: &mut [Reservation],
    sort: Option<SortState>,
) {
    let Some(SortState { column, direction }) = sort else {
        return;
    };
    reservations.sort_by(|a, b| {
        let ordering = compare(a, b, column);
        match direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });
}

/// Filter, hotel restriction and search; everything but paging.
pub fn select(
    reservations: Vec<Reservation>,
    query: &ReservationQuery,
    today: Date,
) -> Vec<Reservation> {
    let term = query.search_term().map(str::to_lowercase);
    reservations
        .into_iter()
        .filter(|r| matches_filter(r, query.filter, today))
        .filter(|r| query.hotel_id.as_ref().is_none_or(|id| &r.hotel_id == id))
        .filter(|r| term.as_deref().is_none_or(|t| matches_search(r, t)))
        .collect()
}

pub fn paginate(
    reservations: Vec<Reservation>,
    page: u32,
    page_size: u32,
) -> ReservationPage {
    let page_size = page_size.max(1);
    let total = reservations.len();
    let total_pages = total.div_ceil(page_size as usize) as u32;
    let skip = (page.saturating_sub(1) as usize).saturating_mul(page_size as usize);
    let items = reservations
        .into_iter()
        .skip(skip)
        .take(page_size as usize)
        .collect();
    ReservationPage {
        items,
        total,
        page,
        page_size,
        total_pages,
    }
}

/// The full table pipeline for one request.
pub fn run(
    reservations: Vec<Reservation>,
    query: &ReservationQuery,
    today: Date,
) -> ReservationPage {
    let mut rows = select(reservations, query, today);
    sort_reservations(&mut rows, query.sort_state());
    paginate(rows, query.page(), query.page_size())
}
