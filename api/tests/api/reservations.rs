use jiff::civil::date;
use payloads::requests::{
    ReservationFilter, ReservationQuery, SortColumn, SortDirection,
    UpdatePricing,
};
use payloads::{RequestGeneration, ReservationId, ReservationStatus};
use reqwest::StatusCode;
use rust_decimal::dec;
use test_helpers::{Booking, TestApp, assert_status_code, room, spawn_app};

/// Alice arrives today, Bruno next week, Chloe cancelled, Dmitri is at the
/// harbor hotel and leaves today.
fn seed(app: &TestApp) -> anyhow::Result<()> {
    let (seaside, harbor) = app.seed_hotels();
    app.book(
        &seaside,
        Booking::new("a", "Alice Martin", date(2025, 1, 1), date(2025, 1, 3)),
    )?;
    app.book(
        &seaside,
        Booking::new("b", "Bruno Costa", date(2025, 1, 8), date(2025, 1, 10)),
    )?;
    let mut chloe = app.book(
        &seaside,
        Booking::new("c", "Chloe Dubois", date(2025, 1, 1), date(2025, 1, 2)),
    )?;
    chloe.status = ReservationStatus::Cancelled;
    app.backend.insert_reservation(chloe);
    app.book(
        &harbor,
        Booking::new("d", "Dmitri Ivanov", date(2024, 12, 30), date(2025, 1, 1))
            .rooms(vec![room("twin", 1)]),
    )?;
    Ok(())
}

fn ids(page: &payloads::responses::ReservationPage) -> Vec<&str> {
    page.items.iter().map(|r| r.id.0.as_str()).collect()
}

fn filtered(filter: ReservationFilter) -> ReservationQuery {
    ReservationQuery {
        filter,
        ..Default::default()
    }
}

#[tokio::test]
async fn list_applies_date_filters_against_mocked_today() -> anyhow::Result<()> {
    let app = spawn_app().await;
    seed(&app)?;

    let all = app.client.list_reservations(&Default::default()).await?;
    assert_eq!(all.total, 4);

    let checkin = app
        .client
        .list_reservations(&filtered(ReservationFilter::CheckinToday))
        .await?;
    assert_eq!(ids(&checkin), ["a"]);

    let checkout = app
        .client
        .list_reservations(&filtered(ReservationFilter::CheckoutToday))
        .await?;
    assert_eq!(ids(&checkout), ["d"]);

    let upcoming = app
        .client
        .list_reservations(&filtered(ReservationFilter::Upcoming))
        .await?;
    assert_eq!(ids(&upcoming), ["b"]);

    let cancelled = app
        .client
        .list_reservations(&filtered(ReservationFilter::Cancelled))
        .await?;
    assert_eq!(ids(&cancelled), ["c"]);

    // a week later Bruno arrives
    app.time_source.advance(jiff::Span::new().hours(24 * 7));
    let checkin = app
        .client
        .list_reservations(&filtered(ReservationFilter::CheckinToday))
        .await?;
    assert_eq!(ids(&checkin), ["b"]);
    Ok(())
}

#[tokio::test]
async fn list_searches_sorts_and_pages() -> anyhow::Result<()> {
    let app = spawn_app().await;
    seed(&app)?;

    let search = ReservationQuery {
        search: Some("  ALICE.martin@".into()),
        ..Default::default()
    };
    assert_eq!(ids(&app.client.list_reservations(&search).await?), ["a"]);

    let harbor_only = ReservationQuery {
        hotel_id: Some(payloads::HotelId("h-harbor".into())),
        ..Default::default()
    };
    assert_eq!(
        ids(&app.client.list_reservations(&harbor_only).await?),
        ["d"]
    );

    let mut sorted = ReservationQuery {
        page_size: Some(3),
        ..Default::default()
    };
    sorted.set_sort(Some(payloads::requests::SortState {
        column: SortColumn::Name,
        direction: SortDirection::Desc,
    }));
    let first = app.client.list_reservations(&sorted).await?;
    assert_eq!(ids(&first), ["d", "c", "b"]);
    assert_eq!(first.total_pages, 2);

    sorted.page = Some(2);
    let second = app.client.list_reservations(&sorted).await?;
    assert_eq!(ids(&second), ["a"]);
    assert_eq!(second.total, 4);

    let too_long = ReservationQuery {
        search: Some("x".repeat(300)),
        ..Default::default()
    };
    assert_status_code(
        app.client.list_reservations(&too_long).await,
        StatusCode::BAD_REQUEST,
    );
    Ok(())
}

#[tokio::test]
async fn superseded_list_response_is_discarded() -> anyhow::Result<()> {
    let app = spawn_app().await;
    seed(&app)?;
    let generation = RequestGeneration::new();

    let older_query = ReservationQuery::default();
    let newer_query = filtered(ReservationFilter::Upcoming);
    let older = app
        .client
        .list_reservations_latest(&generation, &older_query);
    let newer = app
        .client
        .list_reservations_latest(&generation, &newer_query);
    let (older, newer) = tokio::join!(older, newer);

    assert!(older?.is_none());
    assert_eq!(ids(&newer?.unwrap()), ["b"]);

    let alone = app
        .client
        .list_reservations_latest(&generation, &Default::default())
        .await?;
    assert!(alone.is_some());
    Ok(())
}

#[tokio::test]
async fn export_ignores_paging() -> anyhow::Result<()> {
    let app = spawn_app().await;
    seed(&app)?;

    let query = ReservationQuery {
        page_size: Some(1),
        ..Default::default()
    };
    let bytes = app.client.export_reservations(&query).await?;
    assert!(bytes.starts_with(b"PK"));

    let response = app
        .client
        .inner_client
        .get(format!("{}/api/reservations/export", app.client.address))
        .send()
        .await?;
    assert_eq!(response.status(), StatusCode::OK);
    let disposition = response
        .headers()
        .get("content-disposition")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(disposition.contains("reservations_2025-01-01.xlsx"));
    Ok(())
}

#[tokio::test]
async fn summary_and_receipt() -> anyhow::Result<()> {
    let app = spawn_app().await;
    seed(&app)?;
    let id = ReservationId("a".into());

    let summary = app.client.reservation_summary(&id).await?;
    assert_eq!(summary.confirmation_number, "HB-a");
    assert_eq!(summary.summary.total_amount, dec!(200));
    assert_eq!(summary.summary.total_commission, dec!(70));
    assert_eq!(summary.summary.final_deposit, dec!(150));
    assert_eq!(summary.deposit_options.len(), 3);

    let receipt = app.client.reservation_receipt(&id).await?;
    assert!(receipt.starts_with("<!DOCTYPE html>"));
    assert!(receipt.contains("HB-a"));
    assert!(receipt.contains("270.00"));
    assert!(receipt.contains("Issued: 2025-01-01"));

    let missing = ReservationId("zzz".into());
    assert_status_code(
        app.client.get_reservation(&missing).await,
        StatusCode::NOT_FOUND,
    );
    assert_status_code(
        app.client.reservation_receipt(&missing).await,
        StatusCode::NOT_FOUND,
    );
    Ok(())
}

#[tokio::test]
async fn update_pricing_recomputes_totals() -> anyhow::Result<()> {
    let app = spawn_app().await;
    seed(&app)?;
    let id = ReservationId("a".into());
    let reservation = app.client.get_reservation(&id).await?;

    let mut rooms = reservation.picked_rooms_type.clone();
    // left stale on purpose; the service recomputes it
    rooms[0].pricing_by_day[0].root_price = dec!(100);
    let updated = app
        .client
        .update_pricing(&id, &UpdatePricing { rooms: rooms.clone() })
        .await?;
    assert_eq!(updated.total_amount, dec!(220));
    assert_eq!(updated.commission, dec!(52));
    assert_eq!(
        updated.picked_rooms_type[0].pricing_by_day[0]
            .total_price_with_commission,
        dec!(110)
    );

    let (sent_to, update) = app.backend.last_update().unwrap();
    assert_eq!(sent_to, id);
    assert_eq!(update.commission, dec!(52));
    assert_eq!(update.hotel_id, None);

    let mut zero = rooms.clone();
    zero[0].count = 0;
    assert_status_code(
        app.client
            .update_pricing(&id, &UpdatePricing { rooms: zero })
            .await,
        StatusCode::BAD_REQUEST,
    );
    assert_status_code(
        app.client
            .update_pricing(&id, &UpdatePricing { rooms: vec![] })
            .await,
        StatusCode::BAD_REQUEST,
    );
    assert_status_code(
        app.client
            .update_pricing(&ReservationId("c".into()), &UpdatePricing { rooms })
            .await,
        StatusCode::BAD_REQUEST,
    );
    Ok(())
}
