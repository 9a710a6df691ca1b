use actix_web::{HttpResponse, delete, get, web};
use payloads::{HotelId, ImageId, requests};

use crate::backend::BackendService;
use crate::occupancy::occupancy;

use super::APIError;

#[tracing::instrument(skip(backend), ret)]
#[get("/hotels")]
pub async fn list_hotels(
    backend: web::Data<BackendService>,
) -> Result<HttpResponse, APIError> {
    let hotels = backend.list_hotels().await?;
    Ok(HttpResponse::Ok().json(hotels))
}

#[tracing::instrument(skip(backend), ret)]
#[get("/hotels/{hotel_id}")]
pub async fn get_hotel(
    path: web::Path<HotelId>,
    backend: web::Data<BackendService>,
) -> Result<HttpResponse, APIError> {
    let hotel = backend.get_hotel(&path).await?;
    Ok(HttpResponse::Ok().json(hotel))
}

#[tracing::instrument(skip(backend), ret)]
#[get("/hotels/{hotel_id}/occupancy")]
pub async fn hotel_occupancy(
    path: web::Path<HotelId>,
    query: web::Query<requests::OccupancyQuery>,
    backend: web::Data<BackendService>,
) -> Result<HttpResponse, APIError> {
    let hotel = backend.get_hotel(&path).await?;
    let reservations = backend.list_reservations(Some(&hotel.id)).await?;
    let days = occupancy(&reservations, query.from, query.to)?;
    Ok(HttpResponse::Ok().json(days))
}

#[tracing::instrument(skip(backend), ret)]
#[delete("/images/{image_id}")]
pub async fn remove_image(
    path: web::Path<ImageId>,
    backend: web::Data<BackendService>,
) -> Result<HttpResponse, APIError> {
    backend.remove_image(&path).await?;
    tracing::info!(image_id = %path, "Removed image");
    Ok(HttpResponse::Ok().finish())
}
