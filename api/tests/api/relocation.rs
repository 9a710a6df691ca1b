use jiff::civil::date;
use payloads::requests::RelocateReservation;
use payloads::{HotelId, ReservationId, ReservationStatus};
use reqwest::StatusCode;
use rust_decimal::dec;
use test_helpers::{Booking, assert_status_code, room, spawn_app};

#[tokio::test]
async fn relocate_reprices_and_suffixes_confirmation() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let (seaside, harbor) = app.seed_hotels();
    let booked = app.book(
        &seaside,
        Booking::new("a", "Alice Martin", date(2025, 1, 1), date(2025, 1, 3)),
    )?;

    let moved = app
        .client
        .relocate_reservation(
            &booked.id,
            &RelocateReservation {
                target_hotel_id: harbor.id.clone(),
                rooms: vec![],
            },
        )
        .await?;
    assert_eq!(moved.hotel_id, harbor.id);
    assert_eq!(moved.hotel_name, "Harbor Hotel");
    assert_eq!(moved.confirmation_number, "HB-a_relocate1");
    // two nights of harbor doubles: 90 + 70 * 10%, root 70
    assert_eq!(moved.total_amount, dec!(140));
    assert_eq!(moved.commission, dec!(14));
    assert_eq!(moved.picked_rooms_type[0].count, 1);
    // the stay itself doesn't change
    assert_eq!(moved.checkin_date, booked.checkin_date);
    assert_eq!(moved.checkout_date, booked.checkout_date);

    let back = app
        .client
        .relocate_reservation(
            &booked.id,
            &RelocateReservation {
                target_hotel_id: seaside.id.clone(),
                rooms: vec![room("suite", 1)],
            },
        )
        .await?;
    assert_eq!(back.confirmation_number, "HB-a_relocate2");
    assert_eq!(back.picked_rooms_type[0].room_type, "suite");
    Ok(())
}

#[tokio::test]
async fn relocate_validation() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let (seaside, harbor) = app.seed_hotels();
    let booked = app.book(
        &seaside,
        Booking::new("a", "Alice Martin", date(2025, 1, 1), date(2025, 1, 3)),
    )?;
    let to = |hotel_id: &HotelId, rooms| RelocateReservation {
        target_hotel_id: hotel_id.clone(),
        rooms,
    };

    assert_status_code(
        app.client
            .relocate_reservation(&booked.id, &to(&seaside.id, vec![]))
            .await,
        StatusCode::BAD_REQUEST,
    );
    // harbor has no suites
    assert_status_code(
        app.client
            .relocate_reservation(
                &booked.id,
                &to(&harbor.id, vec![room("suite", 1)]),
            )
            .await,
        StatusCode::BAD_REQUEST,
    );
    assert_status_code(
        app.client
            .relocate_reservation(
                &booked.id,
                &to(&HotelId("nowhere".into()), vec![]),
            )
            .await,
        StatusCode::NOT_FOUND,
    );
    assert_status_code(
        app.client
            .relocate_reservation(
                &ReservationId("zzz".into()),
                &to(&harbor.id, vec![]),
            )
            .await,
        StatusCode::NOT_FOUND,
    );

    let mut cancelled = booked.clone();
    cancelled.status = ReservationStatus::Cancelled;
    app.backend.insert_reservation(cancelled);
    assert_status_code(
        app.client
            .relocate_reservation(&booked.id, &to(&harbor.id, vec![]))
            .await,
        StatusCode::BAD_REQUEST,
    );
    // nothing was written
    assert!(app.backend.last_update().is_none());
    Ok(())
}

#[tokio::test]
async fn exhausted_relocation_counter_is_rejected() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let (seaside, harbor) = app.seed_hotels();
    let mut booked = app.book(
        &seaside,
        Booking::new("a", "Alice Martin", date(2025, 1, 1), date(2025, 1, 3)),
    )?;
    booked.confirmation_number = format!("HB-a_relocate{}", u64::MAX);
    app.backend.insert_reservation(booked.clone());

    assert_status_code(
        app.client
            .relocate_reservation(
                &booked.id,
                &RelocateReservation {
                    target_hotel_id: harbor.id.clone(),
                    rooms: vec![],
                },
            )
            .await,
        StatusCode::BAD_REQUEST,
    );
    assert!(app.backend.last_update().is_none());
    Ok(())
}
