use jiff::civil::date;
use payloads::requests::{CaptureDeposit, DepositOption};
use payloads::{PaymentStatus, ReservationStatus};
use reqwest::StatusCode;
use rust_decimal::{Decimal, dec};
use test_helpers::{Booking, assert_status_code, spawn_app};

#[tokio::test]
async fn capture_each_deposit_tier() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let (seaside, _) = app.seed_hotels();
    let booked = app.book(
        &seaside,
        Booking::new("a", "Alice Martin", date(2025, 1, 1), date(2025, 1, 3)),
    )?;

    let captured = app
        .client
        .capture_deposit(
            &booked.id,
            &CaptureDeposit {
                option: DepositOption::CommissionOnly,
            },
        )
        .await?;
    assert_eq!(captured.amount, dec!(70));
    let reservation = app.client.get_reservation(&booked.id).await?;
    assert_eq!(reservation.payment_status, PaymentStatus::Partial);
    assert!(reservation.payment_triggered);

    let captured = app
        .client
        .capture_deposit(
            &booked.id,
            &CaptureDeposit {
                option: DepositOption::CommissionPlusOneNight,
            },
        )
        .await?;
    assert_eq!(captured.amount, dec!(150));

    let captured = app
        .client
        .capture_deposit(
            &booked.id,
            &CaptureDeposit {
                option: DepositOption::Custom(dec!(50)),
            },
        )
        .await?;
    assert_eq!(captured.option, DepositOption::Custom(dec!(50)));
    let reservation = app.client.get_reservation(&booked.id).await?;
    assert_eq!(reservation.paid_amount, dec!(270));
    assert_eq!(reservation.payment_status, PaymentStatus::Paid);

    let amounts: Vec<_> = app
        .backend
        .captured_payments()
        .into_iter()
        .map(|(_, amount)| amount)
        .collect();
    assert_eq!(amounts, [dec!(70), dec!(150), dec!(50)]);
    Ok(())
}

#[tokio::test]
async fn full_amount_and_custom_bounds() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let (seaside, _) = app.seed_hotels();
    let booked = app.book(
        &seaside,
        Booking::new("a", "Alice Martin", date(2025, 1, 1), date(2025, 1, 3)),
    )?;

    for amount in [dec!(0), dec!(-5), dec!(270.01)] {
        assert_status_code(
            app.client
                .capture_deposit(
                    &booked.id,
                    &CaptureDeposit {
                        option: DepositOption::Custom(amount),
                    },
                )
                .await,
            StatusCode::BAD_REQUEST,
        );
    }
    assert!(app.backend.captured_payments().is_empty());

    let full = app
        .client
        .capture_deposit(
            &booked.id,
            &CaptureDeposit {
                option: DepositOption::FullAmount,
            },
        )
        .await?;
    assert_eq!(full.amount, dec!(270));

    let mut cancelled = app.client.get_reservation(&booked.id).await?;
    cancelled.status = ReservationStatus::Cancelled;
    app.backend.insert_reservation(cancelled);
    assert_status_code(
        app.client
            .capture_deposit(
                &booked.id,
                &CaptureDeposit {
                    option: DepositOption::CommissionOnly,
                },
            )
            .await,
        StatusCode::BAD_REQUEST,
    );
    Ok(())
}

#[tokio::test]
async fn missing_nightly_totals_are_recomputed() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let (seaside, _) = app.seed_hotels();
    let mut booked = app.book(
        &seaside,
        Booking::new("a", "Alice Martin", date(2025, 1, 1), date(2025, 1, 3)),
    )?;
    // the backend never wrote the per-night totals
    for room in &mut booked.picked_rooms_type {
        for day in &mut room.pricing_by_day {
            day.total_price_with_commission = Decimal::ZERO;
        }
    }
    app.backend.insert_reservation(booked.clone());

    let summary = app.client.reservation_summary(&booked.id).await?;
    assert_eq!(summary.summary.total_amount, dec!(200));
    assert_eq!(summary.summary.total_commission, dec!(70));
    assert_eq!(summary.summary.full_amount(), dec!(270));

    let captured = app
        .client
        .capture_deposit(
            &booked.id,
            &CaptureDeposit {
                option: DepositOption::CommissionOnly,
            },
        )
        .await?;
    assert_eq!(captured.amount, dec!(70));

    let receipt = app.client.reservation_receipt(&booked.id).await?;
    assert!(receipt.contains("270.00"));
    Ok(())
}

#[tokio::test]
async fn nothing_to_charge_is_rejected() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let (seaside, _) = app.seed_hotels();
    let mut booked = app.book(
        &seaside,
        Booking::new("a", "Alice Martin", date(2025, 1, 1), date(2025, 1, 3)),
    )?;
    booked.picked_rooms_type.clear();
    app.backend.insert_reservation(booked.clone());

    for option in [
        DepositOption::CommissionOnly,
        DepositOption::CommissionPlusOneNight,
        DepositOption::FullAmount,
    ] {
        assert_status_code(
            app.client
                .capture_deposit(&booked.id, &CaptureDeposit { option })
                .await,
            StatusCode::BAD_REQUEST,
        );
    }
    assert!(app.backend.captured_payments().is_empty());
    Ok(())
}
