pub mod hotel;
pub mod quote;
pub mod reservation;

use actix_web::{
    HttpResponse, Responder, ResponseError, body::BoxBody,
    dev::HttpServiceFactory, get, web,
};
use jiff::civil::Date;
use payloads::requests::{self, RoomRequest};
use pricing::PricingError;

use crate::backend::BackendError;
use crate::occupancy::OccupancyError;

pub fn api_services() -> impl HttpServiceFactory {
    web::scope("/api")
        .service(health_check)
        .service(hotel::list_hotels)
        .service(hotel::get_hotel)
        .service(hotel::hotel_occupancy)
        .service(hotel::remove_image)
        .service(quote::quote)
        .service(quote::distribute_total)
        .service(quote::edit_day)
        .service(reservation::list_reservations)
        // before the {reservation_id} routes so "export" isn't taken as an id
        .service(reservation::export_reservations)
        .service(reservation::get_reservation)
        .service(reservation::reservation_summary)
        .service(reservation::reservation_receipt)
        .service(reservation::update_pricing)
        .service(reservation::relocate_reservation)
        .service(reservation::capture_deposit)
}

#[get("/health_check")]
pub async fn health_check() -> impl Responder {
    HttpResponse::Ok().body("healthy")
}

#[derive(Debug, thiserror::Error)]
pub enum APIError {
    #[error("Bad request")]
    BadRequest(#[source] anyhow::Error),
    #[error("Not found")]
    NotFound(#[source] anyhow::Error),
    #[error("Booking backend unavailable")]
    Upstream(#[source] anyhow::Error),
    #[error("Something went wrong")]
    UnexpectedError(#[from] anyhow::Error),
}

impl ResponseError for APIError {
    fn error_response(&self) -> HttpResponse<BoxBody> {
        match self {
            Self::BadRequest(e) => {
                HttpResponse::BadRequest().body(format!("{self}: {e}"))
            }
            Self::NotFound(e) => {
                HttpResponse::NotFound().body(format!("{self}: {e}"))
            }
            Self::Upstream(e) => {
                tracing::error!("{e:#}");
                HttpResponse::BadGateway().body(self.to_string())
            }
            Self::UnexpectedError(e) => {
                tracing::error!("{e:#}");
                HttpResponse::InternalServerError().body(self.to_string())
            }
        }
    }
}

impl From<BackendError> for APIError {
    fn from(e: BackendError) -> Self {
        match e {
            BackendError::HotelNotFound
            | BackendError::ReservationNotFound
            | BackendError::ImageNotFound => APIError::NotFound(e.into()),
            // the backend refused what we sent
            BackendError::Status(status, _) if status.is_client_error() => {
                APIError::BadRequest(e.into())
            }
            BackendError::Status(..) | BackendError::Network(_) => {
                APIError::Upstream(e.into())
            }
        }
    }
}

impl From<PricingError> for APIError {
    fn from(e: PricingError) -> Self {
        APIError::BadRequest(e.into())
    }
}

impl From<OccupancyError> for APIError {
    fn from(e: OccupancyError) -> Self {
        APIError::BadRequest(e.into())
    }
}

fn bad_request(message: impl Into<String>) -> APIError {
    APIError::BadRequest(anyhow::anyhow!(message.into()))
}

fn validate_rooms(rooms: &[RoomRequest]) -> Result<(), APIError> {
    match requests::validate_room_requests(rooms).error_message() {
        Some(message) => Err(bad_request(message)),
        None => Ok(()),
    }
}

fn validate_stay(checkin: Date, checkout: Date) -> Result<(), APIError> {
    if checkout <= checkin {
        return Err(bad_request("Check-out must be after check-in"));
    }
    Ok(())
}
