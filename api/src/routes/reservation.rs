use actix_web::http::header::ContentDisposition;
use actix_web::{HttpResponse, get, post, web};
use anyhow::Context;
use jiff::tz::TimeZone;
use payloads::requests::{self, RoomRequest, SEARCH_MAX_LEN};
use payloads::{Reservation, ReservationId, RoomSelection, responses};
use rust_decimal::Decimal;

use crate::backend::{BackendService, ReservationUpdate};
use crate::receipt::Receipt;
use crate::time::TimeSource;
use crate::{export, table};

use super::{APIError, bad_request, validate_rooms};

fn validate_query(query: &requests::ReservationQuery) -> Result<(), APIError> {
    if query
        .search
        .as_ref()
        .is_some_and(|s| s.chars().count() > SEARCH_MAX_LEN)
    {
        return Err(bad_request(format!(
            "Search must be at most {SEARCH_MAX_LEN} characters"
        )));
    }
    Ok(())
}

fn reject_cancelled(
    reservation: &Reservation,
    action: &str,
) -> Result<(), APIError> {
    if reservation.is_cancelled() {
        return Err(bad_request(format!(
            "Cancelled reservations cannot be {action}"
        )));
    }
    Ok(())
}

#[tracing::instrument(skip(backend, time_source, time_zone), ret)]
#[get("/reservations")]
pub async fn list_reservations(
    query: web::Query<requests::ReservationQuery>,
    backend: web::Data<BackendService>,
    time_source: web::Data<TimeSource>,
    time_zone: web::Data<TimeZone>,
) -> Result<HttpResponse, APIError> {
    validate_query(&query)?;
    let reservations = backend.list_reservations(query.hotel_id.as_ref()).await?;
    let today = time_source.today(&time_zone);
    let page = table::run(reservations, &query, today);
    Ok(HttpResponse::Ok().json(page))
}

/// Every row matching the table's filter and search, in the table's sort
/// order, as one workbook.
#[tracing::instrument(skip(backend, time_source, time_zone))]
#[get("/reservations/export")]
pub async fn export_reservations(
    query: web::Query<requests::ReservationQuery>,
    backend: web::Data<BackendService>,
    time_source: web::Data<TimeSource>,
    time_zone: web::Data<TimeZone>,
) -> Result<HttpResponse, APIError> {
    validate_query(&query)?;
    let reservations = backend.list_reservations(query.hotel_id.as_ref()).await?;
    let today = time_source.today(&time_zone);
    let mut rows = table::select(reservations, &query, today);
    table::sort_reservations(&mut rows, query.sort_state());

    let workbook = export::reservations_workbook(&rows)
        .context("Failed to build reservations workbook")?;
    tracing::info!(rows = rows.len(), "Exported reservations");
    Ok(HttpResponse::Ok()
        .content_type(export::XLSX_CONTENT_TYPE)
        .insert_header(ContentDisposition::attachment(
            export::export_filename(today),
        ))
        .body(workbook))
}

#[tracing::instrument(skip(backend), ret)]
#[get("/reservations/{reservation_id}")]
pub async fn get_reservation(
    path: web::Path<ReservationId>,
    backend: web::Data<BackendService>,
) -> Result<HttpResponse, APIError> {
    let reservation = backend.get_reservation(&path).await?;
    Ok(HttpResponse::Ok().json(reservation))
}

#[tracing::instrument(skip(backend), ret)]
#[get("/reservations/{reservation_id}/summary")]
pub async fn reservation_summary(
    path: web::Path<ReservationId>,
    backend: web::Data<BackendService>,
) -> Result<HttpResponse, APIError> {
    let reservation = backend.get_reservation(&path).await?;
    let summary = pricing::summarize(&reservation.picked_rooms_type)?;
    Ok(HttpResponse::Ok().json(responses::ReservationSummary {
        reservation_id: reservation.id,
        confirmation_number: reservation.confirmation_number,
        deposit_options: pricing::deposit_options(&summary),
        summary,
    }))
}

#[tracing::instrument(skip(backend, time_source, time_zone))]
#[get("/reservations/{reservation_id}/receipt")]
pub async fn reservation_receipt(
    path: web::Path<ReservationId>,
    backend: web::Data<BackendService>,
    time_source: web::Data<TimeSource>,
    time_zone: web::Data<TimeZone>,
) -> Result<HttpResponse, APIError> {
    let reservation = backend.get_reservation(&path).await?;
    let receipt =
        Receipt::compose(&reservation, time_source.today(&time_zone))?;
    let html = receipt.to_html().context("Failed to render receipt")?;
    Ok(HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(html))
}

/// Submit an edited nightly breakdown. Totals are always recomputed here
/// from the days, whatever the client sent.
#[tracing::instrument(skip(backend), ret)]
#[post("/reservations/{reservation_id}/pricing")]
pub async fn update_pricing(
    path: web::Path<ReservationId>,
    details: web::Json<requests::UpdatePricing>,
    backend: web::Data<BackendService>,
) -> Result<HttpResponse, APIError> {
    let requested: Vec<RoomRequest> =
        details.rooms.iter().map(room_request).collect();
    validate_rooms(&requested)?;
    if details.rooms.iter().any(|r| r.pricing_by_day.is_empty()) {
        return Err(bad_request("Every room needs at least one night"));
    }
    let negative = details.rooms.iter().flat_map(|r| &r.pricing_by_day).any(
        |d| {
            d.price < Decimal::ZERO
                || d.root_price < Decimal::ZERO
                || d.commission_rate < Decimal::ZERO
        },
    );
    if negative {
        return Err(bad_request("Amounts must not be negative"));
    }

    let reservation = backend.get_reservation(&path).await?;
    reject_cancelled(&reservation, "repriced")?;

    let mut rooms = details.into_inner().rooms;
    pricing::recompute_totals(&mut rooms)?;
    let summary = pricing::summarize(&rooms)?;
    let update = ReservationUpdate {
        total_amount: summary.total_amount,
        commission: summary.total_commission,
        picked_rooms_type: rooms,
        hotel_id: None,
        hotel_name: None,
        confirmation_number: None,
    };
    let updated = backend.update_reservation(&reservation.id, &update).await?;

    tracing::info!(
        reservation_id = %updated.id,
        total_amount = %update.total_amount,
        commission = %update.commission,
        "Updated reservation pricing"
    );
    Ok(HttpResponse::Ok().json(updated))
}

/// Move a reservation to another hotel, repricing the same stay against the
/// target hotel's rates.
#[tracing::instrument(skip(backend), ret)]
#[post("/reservations/{reservation_id}/relocate")]
pub async fn relocate_reservation(
    path: web::Path<ReservationId>,
    details: web::Json<requests::RelocateReservation>,
    backend: web::Data<BackendService>,
) -> Result<HttpResponse, APIError> {
    let reservation = backend.get_reservation(&path).await?;
    reject_cancelled(&reservation, "relocated")?;
    if details.target_hotel_id == reservation.hotel_id {
        return Err(bad_request(
            "The reservation is already at the target hotel",
        ));
    }

    let rooms: Vec<RoomRequest> = if details.rooms.is_empty() {
        reservation.picked_rooms_type.iter().map(room_request).collect()
    } else {
        details.rooms.clone()
    };
    validate_rooms(&rooms)?;

    let target = backend.get_hotel(&details.target_hotel_id).await?;
    let picked = pricing::price_rooms(
        &target,
        &rooms,
        reservation.checkin_date,
        reservation.checkout_date,
    )?;
    let summary = pricing::summarize(&picked)?;
    let confirmation_number = pricing::relocated_confirmation_number(
        &reservation.confirmation_number,
    )?;
    let update = ReservationUpdate {
        total_amount: summary.total_amount,
        commission: summary.total_commission,
        picked_rooms_type: picked,
        hotel_id: Some(target.id.clone()),
        hotel_name: Some(target.name.clone()),
        confirmation_number: Some(confirmation_number),
    };
    let updated = backend.update_reservation(&reservation.id, &update).await?;

    tracing::info!(
        reservation_id = %updated.id,
        from_hotel = %reservation.hotel_id,
        to_hotel = %target.id,
        confirmation_number = %updated.confirmation_number,
        "Relocated reservation"
    );
    Ok(HttpResponse::Ok().json(updated))
}

#[tracing::instrument(skip(backend), ret)]
#[post("/reservations/{reservation_id}/deposit")]
pub async fn capture_deposit(
    path: web::Path<ReservationId>,
    details: web::Json<requests::CaptureDeposit>,
    backend: web::Data<BackendService>,
) -> Result<HttpResponse, APIError> {
    let reservation = backend.get_reservation(&path).await?;
    reject_cancelled(&reservation, "charged")?;

    let summary = pricing::summarize(&reservation.picked_rooms_type)?;
    let amount = pricing::deposit_amount(&summary, details.option)?;
    backend.capture_payment(&reservation.id, amount).await?;

    tracing::info!(
        reservation_id = %reservation.id,
        option = ?details.option,
        %amount,
        "Captured deposit"
    );
    Ok(HttpResponse::Ok().json(responses::DepositCaptured {
        reservation_id: reservation.id,
        option: details.option,
        amount,
    }))
}

fn room_request(room: &RoomSelection) -> RoomRequest {
    RoomRequest {
        room_type: room.room_type.clone(),
        count: room.count,
    }
}
