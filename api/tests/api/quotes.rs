use jiff::civil::date;
use payloads::requests::{
    DayEdit, DepositOption, DistributeTotal, EditDay, PriceField, QuoteRequest,
};
use payloads::{HotelId, PricingDay};
use reqwest::StatusCode;
use rust_decimal::dec;
use test_helpers::{assert_status_code, room, spawn_app};

fn quote_request(hotel_id: &HotelId) -> QuoteRequest {
    QuoteRequest {
        hotel_id: hotel_id.clone(),
        checkin: date(2025, 1, 1),
        checkout: date(2025, 1, 4),
        rooms: vec![room("dbl", 1)],
    }
}

#[tokio::test]
async fn quote_applies_rate_calendar_overrides() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let (seaside, _) = app.seed_hotels();

    let quote = app.client.quote(&quote_request(&seaside.id)).await?;
    let days = &quote.rooms[0].pricing_by_day;
    let nightly: Vec<_> =
        days.iter().map(|d| d.total_price_with_commission).collect();
    assert_eq!(nightly, [dec!(108), dec!(162), dec!(108)]);
    assert_eq!(days[1].date, date(2025, 1, 2));

    assert_eq!(quote.summary.total_amount, dec!(280));
    assert_eq!(quote.summary.total_commission, dec!(98));
    assert_eq!(quote.summary.number_of_nights, 3);
    assert_eq!(quote.summary.one_night_cost, dec!(80));
    assert_eq!(quote.summary.final_deposit, dec!(178));

    let options: Vec<_> = quote
        .deposit_options
        .iter()
        .map(|o| (o.option, o.amount))
        .collect();
    assert_eq!(
        options,
        [
            (DepositOption::CommissionOnly, dec!(98)),
            (DepositOption::CommissionPlusOneNight, dec!(178)),
            (DepositOption::FullAmount, dec!(378)),
        ]
    );
    Ok(())
}

#[tokio::test]
async fn quote_scales_with_room_count() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let (seaside, _) = app.seed_hotels();

    let mut request = quote_request(&seaside.id);
    request.rooms = vec![room("dbl", 2), room("suite", 1)];
    let quote = app.client.quote(&request).await?;

    // suites: 3 nights at 200 + 160 * 15% = 224, root 160
    assert_eq!(quote.summary.total_amount, dec!(280) * dec!(2) + dec!(480));
    assert_eq!(
        quote.summary.total_commission,
        dec!(98) * dec!(2) + (dec!(672) - dec!(480))
    );
    assert_eq!(quote.summary.one_night_cost, dec!(160) + dec!(160));
    Ok(())
}

#[tokio::test]
async fn quote_validation() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let (seaside, _) = app.seed_hotels();

    let mut no_rooms = quote_request(&seaside.id);
    no_rooms.rooms.clear();
    assert_status_code(
        app.client.quote(&no_rooms).await,
        StatusCode::BAD_REQUEST,
    );

    let mut twice = quote_request(&seaside.id);
    twice.rooms = vec![room("dbl", 1), room("dbl", 1)];
    assert_status_code(app.client.quote(&twice).await, StatusCode::BAD_REQUEST);

    let mut zero = quote_request(&seaside.id);
    zero.rooms = vec![room("dbl", 0)];
    assert_status_code(app.client.quote(&zero).await, StatusCode::BAD_REQUEST);

    let mut unknown_type = quote_request(&seaside.id);
    unknown_type.rooms = vec![room("penthouse", 1)];
    assert_status_code(
        app.client.quote(&unknown_type).await,
        StatusCode::BAD_REQUEST,
    );

    let mut backwards = quote_request(&seaside.id);
    backwards.checkout = backwards.checkin;
    assert_status_code(
        app.client.quote(&backwards).await,
        StatusCode::BAD_REQUEST,
    );

    assert_status_code(
        app.client.quote(&quote_request(&HotelId("nowhere".into()))).await,
        StatusCode::NOT_FOUND,
    );
    Ok(())
}

async fn quoted_days(
    app: &test_helpers::TestApp,
) -> anyhow::Result<Vec<PricingDay>> {
    let (seaside, _) = app.seed_hotels();
    let quote = app.client.quote(&quote_request(&seaside.id)).await?;
    Ok(quote.rooms[0].pricing_by_day.clone())
}

#[tokio::test]
async fn distribute_total_puts_remainder_on_last_day() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let days = quoted_days(&app).await?;

    let distributed = app
        .client
        .distribute_total(&DistributeTotal {
            days: days.clone(),
            total: dec!(100),
            field: PriceField::Price,
        })
        .await?;
    let prices: Vec<_> = distributed.iter().map(|d| d.price).collect();
    assert_eq!(prices, [dec!(33.33), dec!(33.33), dec!(33.34)]);
    // root prices untouched, totals recomputed
    assert_eq!(distributed[1].root_price, dec!(120));
    assert_eq!(distributed[1].total_price_with_commission, dec!(45.33));

    let roots = app
        .client
        .distribute_total(&DistributeTotal {
            days: days.clone(),
            total: dec!(300),
            field: PriceField::RootPrice,
        })
        .await?;
    assert!(roots.iter().all(|d| d.root_price == dec!(100)));

    for total in [dec!(10.005), dec!(-1)] {
        assert_status_code(
            app.client
                .distribute_total(&DistributeTotal {
                    days: days.clone(),
                    total,
                    field: PriceField::Price,
                })
                .await,
            StatusCode::BAD_REQUEST,
        );
    }
    assert_status_code(
        app.client
            .distribute_total(&DistributeTotal {
                days: vec![],
                total: dec!(10),
                field: PriceField::Price,
            })
            .await,
        StatusCode::BAD_REQUEST,
    );
    Ok(())
}

#[tokio::test]
async fn edit_single_day() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let days = quoted_days(&app).await?;

    let edited = app
        .client
        .edit_day(&EditDay {
            days: days.clone(),
            date: date(2025, 1, 2),
            edit: DayEdit {
                price: Some(dec!(140)),
                ..Default::default()
            },
        })
        .await?;
    assert_eq!(edited[1].total_price_with_commission, dec!(152));
    assert_eq!(edited[0], days[0]);
    assert_eq!(edited[2], days[2]);

    assert_status_code(
        app.client
            .edit_day(&EditDay {
                days: days.clone(),
                date: date(2025, 2, 1),
                edit: DayEdit {
                    price: Some(dec!(1)),
                    ..Default::default()
                },
            })
            .await,
        StatusCode::BAD_REQUEST,
    );
    assert_status_code(
        app.client
            .edit_day(&EditDay {
                days,
                date: date(2025, 1, 1),
                edit: DayEdit {
                    commission_rate: Some(dec!(-5)),
                    ..Default::default()
                },
            })
            .await,
        StatusCode::BAD_REQUEST,
    );
    Ok(())
}

#[tokio::test]
async fn oversized_amounts_are_rejected() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let days = quoted_days(&app).await?;

    assert_status_code(
        app.client
            .edit_day(&EditDay {
                days: days.clone(),
                date: date(2025, 1, 1),
                edit: DayEdit {
                    root_price: Some(rust_decimal::Decimal::MAX),
                    commission_rate: Some(dec!(100)),
                    ..Default::default()
                },
            })
            .await,
        StatusCode::BAD_REQUEST,
    );
    assert_status_code(
        app.client
            .distribute_total(&DistributeTotal {
                days,
                total: rust_decimal::Decimal::MAX,
                field: PriceField::RootPrice,
            })
            .await,
        StatusCode::BAD_REQUEST,
    );

    // the server is still serving
    app.client.health_check().await?;
    Ok(())
}
