//! Development dataset for the dev-server and manual testing.
//!
//! Two hotels and a spread of reservations around today, so that every
//! table filter has something to show:
//! - guests arriving and leaving today
//! - upcoming and past stays
//! - a paid, a partially paid and a cancelled reservation
//! - one reservation already relocated once

use crate::{Booking, TestApp, room};
use anyhow::Result;
use jiff::ToSpan;
use jiff::civil::Date;
use payloads::{Hotel, PaymentStatus, Reservation, ReservationStatus};
use rust_decimal::Decimal;

pub struct DevDataset {
    pub seaside: Hotel,
    pub harbor: Hotel,
    pub reservations: Vec<Reservation>,
}

impl DevDataset {
    pub fn create(app: &TestApp) -> Result<Self> {
        let (seaside, harbor) = app.seed_hotels();
        let today = app.today();
        let day = |offset: i64| -> Result<Date> {
            Ok(today.checked_add(offset.days())?)
        };

        let mut reservations = vec![
            app.book(
                &seaside,
                Booking::new("1001", "Alice Martin", day(0)?, day(3)?),
            )?,
            app.book(
                &seaside,
                Booking::new("1002", "Bruno Costa", day(-2)?, day(0)?)
                    .rooms(vec![room("dbl", 2)]),
            )?,
            app.book(
                &seaside,
                Booking::new("1003", "Chloe Dubois", day(7)?, day(10)?)
                    .rooms(vec![room("dbl", 1), room("suite", 1)]),
            )?,
            app.book(
                &harbor,
                Booking::new("1004", "Dmitri Ivanov", day(1)?, day(2)?)
                    .rooms(vec![room("twin", 1)]),
            )?,
            app.book(
                &harbor,
                Booking::new("1005", "Elena Rossi", day(-10)?, day(-7)?),
            )?,
            app.book(
                &seaside,
                Booking::new("1006", "Farid Haddad", day(14)?, day(16)?)
                    .rooms(vec![room("suite", 2)]),
            )?,
        ];

        // paid in full, onsite
        let paid = &mut reservations[4];
        paid.status = ReservationStatus::CheckedOut;
        paid.payment_status = PaymentStatus::Paid;
        paid.paid_amount = paid.total_amount + paid.commission;
        paid.paid_onsite = true;

        // commission-only deposit taken
        let partial = &mut reservations[0];
        partial.payment_status = PaymentStatus::Partial;
        partial.paid_amount = partial.commission;
        partial.payment_triggered = true;

        reservations[5].status = ReservationStatus::Cancelled;

        let relocated = &mut reservations[3];
        relocated.confirmation_number.push_str("_relocate1");

        reservations[1].status = ReservationStatus::CheckedIn;

        for reservation in &reservations {
            app.backend.insert_reservation(reservation.clone());
        }
        tracing::info!(
            hotels = 2,
            reservations = reservations.len(),
            "Seeded development dataset"
        );

        Ok(Self {
            seaside,
            harbor,
            reservations,
        })
    }

    pub fn print_summary(&self) {
        tracing::info!("Hotels:");
        for hotel in [&self.seaside, &self.harbor] {
            tracing::info!("  {} ({})", hotel.name, hotel.id);
        }
        tracing::info!("Reservations:");
        for r in &self.reservations {
            let due = r.total_amount + r.commission - r.paid_amount;
            tracing::info!(
                "  {} {} at {}: {} to {}, {}, {} due",
                r.confirmation_number,
                r.name,
                r.hotel_name,
                r.checkin_date,
                r.checkout_date,
                r.status.label(),
                due.max(Decimal::ZERO),
            );
        }
    }
}
