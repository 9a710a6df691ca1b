//! Client for the upstream booking backend.
//!
//! The backend owns hotels and reservations; this service only reads them
//! and writes back the fields it computes. With the `mock-backend` feature
//! the HTTP client is replaced by an in-memory store that tests and the dev
//! server seed directly.

use crate::Config;
use payloads::{Hotel, HotelId, ImageId, Reservation, ReservationId, RoomSelection};
use reqwest::StatusCode;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
#[cfg(not(feature = "mock-backend"))]
use secrecy::{ExposeSecret, SecretBox};
#[cfg(not(feature = "mock-backend"))]
use std::sync::Arc;
#[cfg(feature = "mock-backend")]
use std::sync::{Arc, Mutex};

#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("Hotel not found")]
    HotelNotFound,
    #[error("Reservation not found")]
    ReservationNotFound,
    #[error("Image not found")]
    ImageNotFound,
    #[error("Backend responded with {0}: {1}")]
    Status(StatusCode, String),
    #[error("Booking backend request failed")]
    Network(#[from] reqwest::Error),
}

/// The fields of a reservation this service is allowed to write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservationUpdate {
    pub total_amount: Decimal,
    pub commission: Decimal,
    #[serde(rename = "pickedRoomsType")]
    pub picked_rooms_type: Vec<RoomSelection>,
    /// Only set when relocating.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hotel_id: Option<HotelId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hotel_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confirmation_number: Option<String>,
}

impl ReservationUpdate {
    pub fn apply(&self, reservation: &mut Reservation) {
        reservation.total_amount = self.total_amount;
        reservation.commission = self.commission;
        reservation.picked_rooms_type = self.picked_rooms_type.clone();
        if let Some(hotel_id) = &self.hotel_id {
            reservation.hotel_id = hotel_id.clone();
        }
        if let Some(hotel_name) = &self.hotel_name {
            reservation.hotel_name = hotel_name.clone();
        }
        if let Some(number) = &self.confirmation_number {
            reservation.confirmation_number = number.clone();
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapturePayment {
    pub amount: Decimal,
}

#[cfg(feature = "mock-backend")]
#[derive(Debug, Default)]
struct MockState {
    hotels: Vec<Hotel>,
    reservations: Vec<Reservation>,
    captures: Vec<(ReservationId, Decimal)>,
    images: Vec<ImageId>,
    last_update: Option<(ReservationId, ReservationUpdate)>,
}

#[derive(Clone)]
pub struct BackendService {
    #[cfg(not(feature = "mock-backend"))]
    client: reqwest::Client,
    #[cfg(not(feature = "mock-backend"))]
    base_url: String,
    #[cfg(not(feature = "mock-backend"))]
    token: Arc<SecretBox<String>>,
    #[cfg(feature = "mock-backend")]
    state: Arc<Mutex<MockState>>,
}

#[cfg(not(feature = "mock-backend"))]
impl BackendService {
    pub fn new(config: &Config) -> Self {
        let token = config.backend_token.expose_secret().clone();
        Self {
            client: reqwest::Client::new(),
            base_url: config.backend_url.trim_end_matches('/').to_string(),
            token: Arc::new(SecretBox::new(Box::new(token))),
        }
    }

    fn format_url(&self, path: &str) -> String {
        format!("{}/admin/{path}", self.base_url)
    }

    async fn get<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
        not_found: BackendError,
    ) -> Result<T, BackendError> {
        let response = self
            .client
            .get(self.format_url(path))
            .query(query)
            .bearer_auth(self.token.expose_secret())
            .send()
            .await?;
        let response = check_status(response, not_found).await?;
        Ok(response.json().await?)
    }

    #[tracing::instrument(skip(self))]
    pub async fn list_hotels(&self) -> Result<Vec<Hotel>, BackendError> {
        self.get("hotels", &[], BackendError::HotelNotFound).await
    }

    #[tracing::instrument(skip(self))]
    pub async fn get_hotel(
        &self,
        hotel_id: &HotelId,
    ) -> Result<Hotel, BackendError> {
        self.get(
            &format!("hotels/{hotel_id}"),
            &[],
            BackendError::HotelNotFound,
        )
        .await
    }

    #[tracing::instrument(skip(self))]
    pub async fn list_reservations(
        &self,
        hotel_id: Option<&HotelId>,
    ) -> Result<Vec<Reservation>, BackendError> {
        let query: Vec<(&str, &str)> = hotel_id
            .map(|id| vec![("hotel_id", id.0.as_str())])
            .unwrap_or_default();
        self.get("reservations", &query, BackendError::HotelNotFound)
            .await
    }

    #[tracing::instrument(skip(self))]
    pub async fn get_reservation(
        &self,
        reservation_id: &ReservationId,
    ) -> Result<Reservation, BackendError> {
        self.get(
            &format!("reservations/{reservation_id}"),
            &[],
            BackendError::ReservationNotFound,
        )
        .await
    }

    #[tracing::instrument(skip(self, update))]
    pub async fn update_reservation(
        &self,
        reservation_id: &ReservationId,
        update: &ReservationUpdate,
    ) -> Result<Reservation, BackendError> {
        let response = self
            .client
            .put(self.format_url(&format!("reservations/{reservation_id}")))
            .bearer_auth(self.token.expose_secret())
            .json(update)
            .send()
            .await?;
        let response =
            check_status(response, BackendError::ReservationNotFound).await?;
        Ok(response.json().await?)
    }

    #[tracing::instrument(skip(self))]
    pub async fn capture_payment(
        &self,
        reservation_id: &ReservationId,
        amount: Decimal,
    ) -> Result<(), BackendError> {
        let response = self
            .client
            .post(
                self.format_url(&format!(
                    "reservations/{reservation_id}/capture"
                )),
            )
            .bearer_auth(self.token.expose_secret())
            .json(&CapturePayment { amount })
            .send()
            .await?;
        check_status(response, BackendError::ReservationNotFound).await?;
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    pub async fn remove_image(
        &self,
        image_id: &ImageId,
    ) -> Result<(), BackendError> {
        let response = self
            .client
            .delete(self.format_url(&format!("removeimage/{image_id}")))
            .bearer_auth(self.token.expose_secret())
            .send()
            .await?;
        check_status(response, BackendError::ImageNotFound).await?;
        Ok(())
    }
}

/// Map a 404 to `not_found` and any other failure status to
/// [`BackendError::Status`].
#[cfg(not(feature = "mock-backend"))]
async fn check_status(
    response: reqwest::Response,
    not_found: BackendError,
) -> Result<reqwest::Response, BackendError> {
    let status = response.status();
    if status == StatusCode::NOT_FOUND {
        return Err(not_found);
    }
    if !status.is_success() {
        let text = response.text().await?;
        tracing::warn!(%status, "Backend request failed: {text}");
        return Err(BackendError::Status(status, text));
    }
    Ok(response)
}

#[cfg(feature = "mock-backend")]
impl BackendService {
    pub fn new(_config: &Config) -> Self {
        Self {
            state: Arc::new(Mutex::new(MockState::default())),
        }
    }

    /// Add or replace a hotel.
    pub fn insert_hotel(&self, hotel: Hotel) {
        let mut state = self.state.lock().unwrap();
        state.hotels.retain(|h| h.id != hotel.id);
        state.hotels.push(hotel);
    }

    /// Add or replace a reservation.
    pub fn insert_reservation(&self, reservation: Reservation) {
        let mut state = self.state.lock().unwrap();
        state.reservations.retain(|r| r.id != reservation.id);
        state.reservations.push(reservation);
    }

    pub fn insert_image(&self, image_id: ImageId) {
        self.state.lock().unwrap().images.push(image_id);
    }

    /// Every payment captured so far, oldest first.
    pub fn captured_payments(&self) -> Vec<(ReservationId, Decimal)> {
        self.state.lock().unwrap().captures.clone()
    }

    pub fn last_update(&self) -> Option<(ReservationId, ReservationUpdate)> {
        self.state.lock().unwrap().last_update.clone()
    }

    pub fn images(&self) -> Vec<ImageId> {
        self.state.lock().unwrap().images.clone()
    }

    #[tracing::instrument(skip(self))]
    pub async fn list_hotels(&self) -> Result<Vec<Hotel>, BackendError> {
        Ok(self.state.lock().unwrap().hotels.clone())
    }

    #[tracing::instrument(skip(self))]
    pub async fn get_hotel(
        &self,
        hotel_id: &HotelId,
    ) -> Result<Hotel, BackendError> {
        let state = self.state.lock().unwrap();
        state
            .hotels
            .iter()
            .find(|h| &h.id == hotel_id)
            .cloned()
            .ok_or(BackendError::HotelNotFound)
    }

    #[tracing::instrument(skip(self))]
    pub async fn list_reservations(
        &self,
        hotel_id: Option<&HotelId>,
    ) -> Result<Vec<Reservation>, BackendError> {
        let state = self.state.lock().unwrap();
        Ok(state
            .reservations
            .iter()
            .filter(|r| hotel_id.is_none_or(|id| &r.hotel_id == id))
            .cloned()
            .collect())
    }

    #[tracing::instrument(skip(self))]
    pub async fn get_reservation(
        &self,
        reservation_id: &ReservationId,
    ) -> Result<Reservation, BackendError> {
        let state = self.state.lock().unwrap();
        state
            .reservations
            .iter()
            .find(|r| &r.id == reservation_id)
            .cloned()
            .ok_or(BackendError::ReservationNotFound)
    }

    #[tracing::instrument(skip(self, update))]
    pub async fn update_reservation(
        &self,
        reservation_id: &ReservationId,
        update: &ReservationUpdate,
    ) -> Result<Reservation, BackendError> {
        let mut state = self.state.lock().unwrap();
        let reservation = state
            .reservations
            .iter_mut()
            .find(|r| &r.id == reservation_id)
            .ok_or(BackendError::ReservationNotFound)?;
        update.apply(reservation);
        let updated = reservation.clone();
        state.last_update = Some((reservation_id.clone(), update.clone()));
        Ok(updated)
    }

    #[tracing::instrument(skip(self))]
    pub async fn capture_payment(
        &self,
        reservation_id: &ReservationId,
        amount: Decimal,
    ) -> Result<(), BackendError> {
        use payloads::PaymentStatus;

        let mut state = self.state.lock().unwrap();
        let reservation = state
            .reservations
            .iter_mut()
            .find(|r| &r.id == reservation_id)
            .ok_or(BackendError::ReservationNotFound)?;
        reservation.paid_amount += amount;
        reservation.payment_triggered = true;
        let due = reservation.total_amount + reservation.commission;
        reservation.payment_status = if reservation.paid_amount >= due {
            PaymentStatus::Paid
        } else {
            PaymentStatus::Partial
        };
        state.captures.push((reservation_id.clone(), amount));
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    pub async fn remove_image(
        &self,
        image_id: &ImageId,
    ) -> Result<(), BackendError> {
        let mut state = self.state.lock().unwrap();
        let before = state.images.len();
        state.images.retain(|i| i != image_id);
        if state.images.len() == before {
            return Err(BackendError::ImageNotFound);
        }
        Ok(())
    }
}
