//! Pricing without a reservation: quotes for a new stay and the edits an
//! operator makes to a nightly breakdown before submitting it.

use actix_web::{HttpResponse, post, web};
use payloads::{requests, responses};

use crate::backend::BackendService;

use super::{APIError, validate_rooms, validate_stay};

#[tracing::instrument(skip(backend), ret)]
#[post("/pricing/quote")]
pub async fn quote(
    details: web::Json<requests::QuoteRequest>,
    backend: web::Data<BackendService>,
) -> Result<HttpResponse, APIError> {
    validate_rooms(&details.rooms)?;
    validate_stay(details.checkin, details.checkout)?;

    let hotel = backend.get_hotel(&details.hotel_id).await?;
    let rooms = pricing::price_rooms(
        &hotel,
        &details.rooms,
        details.checkin,
        details.checkout,
    )?;
    let summary = pricing::summarize(&rooms)?;
    let deposit_options = pricing::deposit_options(&summary);

    Ok(HttpResponse::Ok().json(responses::PricingQuote {
        rooms,
        summary,
        deposit_options,
    }))
}

#[tracing::instrument(ret)]
#[post("/pricing/distribute")]
pub async fn distribute_total(
    details: web::Json<requests::DistributeTotal>,
) -> Result<HttpResponse, APIError> {
    let days =
        pricing::distribute_total(&details.days, details.total, details.field)?;
    Ok(HttpResponse::Ok().json(days))
}

#[tracing::instrument(ret)]
#[post("/pricing/edit_day")]
pub async fn edit_day(
    details: web::Json<requests::EditDay>,
) -> Result<HttpResponse, APIError> {
    let days = pricing::edit_day(&details.days, details.date, &details.edit)?;
    Ok(HttpResponse::Ok().json(days))
}
