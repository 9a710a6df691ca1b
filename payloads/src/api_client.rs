use crate::{
    Hotel, HotelId, ImageId, PricingDay, RequestGeneration, Reservation,
    ReservationId, requests, responses,
};
use reqwest::StatusCode;
use serde::Serialize;

type ReqwestResult = Result<reqwest::Response, reqwest::Error>;

/// An API client for interfacing with the admin service.
pub struct APIClient {
    pub address: String,
    pub inner_client: reqwest::Client,
}

/// Helper methods for http actions
impl APIClient {
    fn format_url(&self, path: &str) -> String {
        format!("{}/api/{path}", &self.address)
    }

    async fn post(&self, path: &str, body: &impl Serialize) -> ReqwestResult {
        let request = self.inner_client.post(self.format_url(path)).json(body);

        #[cfg(target_arch = "wasm32")]
        let request = request.fetch_credentials_include();

        request.send().await
    }

    async fn get(&self, path: &str, query: &impl Serialize) -> ReqwestResult {
        let request = self.inner_client.get(self.format_url(path)).query(query);

        #[cfg(target_arch = "wasm32")]
        let request = request.fetch_credentials_include();

        request.send().await
    }

    async fn empty_get(&self, path: &str) -> ReqwestResult {
        let request = self.inner_client.get(self.format_url(path));

        #[cfg(target_arch = "wasm32")]
        let request = request.fetch_credentials_include();

        request.send().await
    }

    async fn delete(&self, path: &str) -> ReqwestResult {
        let request = self.inner_client.delete(self.format_url(path));

        #[cfg(target_arch = "wasm32")]
        let request = request.fetch_credentials_include();

        request.send().await
    }
}

/// Methods on the admin API
impl APIClient {
    pub async fn health_check(&self) -> Result<(), ClientError> {
        let response = self.empty_get("health_check").await?;
        ok_empty(response).await
    }

    pub async fn list_hotels(&self) -> Result<Vec<Hotel>, ClientError> {
        let response = self.empty_get("hotels").await?;
        ok_body(response).await
    }

    pub async fn get_hotel(
        &self,
        hotel_id: &HotelId,
    ) -> Result<Hotel, ClientError> {
        let response = self.empty_get(&format!("hotels/{hotel_id}")).await?;
        ok_body(response).await
    }

    /// Rooms booked per night in `[from, to)`.
    pub async fn hotel_occupancy(
        &self,
        hotel_id: &HotelId,
        query: &requests::OccupancyQuery,
    ) -> Result<Vec<responses::OccupancyDay>, ClientError> {
        let response = self
            .get(&format!("hotels/{hotel_id}/occupancy"), query)
            .await?;
        ok_body(response).await
    }

    /// Price rooms at a hotel for a stay, without touching any reservation.
    pub async fn quote(
        &self,
        details: &requests::QuoteRequest,
    ) -> Result<responses::PricingQuote, ClientError> {
        let response = self.post("pricing/quote", details).await?;
        ok_body(response).await
    }

    pub async fn distribute_total(
        &self,
        details: &requests::DistributeTotal,
    ) -> Result<Vec<PricingDay>, ClientError> {
        let response = self.post("pricing/distribute", details).await?;
        ok_body(response).await
    }

    pub async fn edit_day(
        &self,
        details: &requests::EditDay,
    ) -> Result<Vec<PricingDay>, ClientError> {
        let response = self.post("pricing/edit_day", details).await?;
        ok_body(response).await
    }

    pub async fn list_reservations(
        &self,
        query: &requests::ReservationQuery,
    ) -> Result<responses::ReservationPage, ClientError> {
        let response = self.get("reservations", query).await?;
        ok_body(response).await
    }

    /// List reservations, discarding the result if another request was
    /// issued on `generation` while this one was in flight.
    pub async fn list_reservations_latest(
        &self,
        generation: &RequestGeneration,
        query: &requests::ReservationQuery,
    ) -> Result<Option<responses::ReservationPage>, ClientError> {
        let ticket = generation.issue();
        let page = self.list_reservations(query).await?;
        Ok(generation.accept(ticket, page))
    }

    /// Download the filtered reservations as an xlsx workbook.
    pub async fn export_reservations(
        &self,
        query: &requests::ReservationQuery,
    ) -> Result<Vec<u8>, ClientError> {
        let response = self.get("reservations/export", query).await?;
        ok_bytes(response).await
    }

    pub async fn get_reservation(
        &self,
        reservation_id: &ReservationId,
    ) -> Result<Reservation, ClientError> {
        let response = self
            .empty_get(&format!("reservations/{reservation_id}"))
            .await?;
        ok_body(response).await
    }

    pub async fn reservation_summary(
        &self,
        reservation_id: &ReservationId,
    ) -> Result<responses::ReservationSummary, ClientError> {
        let response = self
            .empty_get(&format!("reservations/{reservation_id}/summary"))
            .await?;
        ok_body(response).await
    }

    /// The printable receipt as an HTML document.
    pub async fn reservation_receipt(
        &self,
        reservation_id: &ReservationId,
    ) -> Result<String, ClientError> {
        let response = self
            .empty_get(&format!("reservations/{reservation_id}/receipt"))
            .await?;
        ok_text(response).await
    }

    pub async fn update_pricing(
        &self,
        reservation_id: &ReservationId,
        details: &requests::UpdatePricing,
    ) -> Result<Reservation, ClientError> {
        let response = self
            .post(&format!("reservations/{reservation_id}/pricing"), details)
            .await?;
        ok_body(response).await
    }

    pub async fn relocate_reservation(
        &self,
        reservation_id: &ReservationId,
        details: &requests::RelocateReservation,
    ) -> Result<Reservation, ClientError> {
        let response = self
            .post(&format!("reservations/{reservation_id}/relocate"), details)
            .await?;
        ok_body(response).await
    }

    pub async fn capture_deposit(
        &self,
        reservation_id: &ReservationId,
        details: &requests::CaptureDeposit,
    ) -> Result<responses::DepositCaptured, ClientError> {
        let response = self
            .post(&format!("reservations/{reservation_id}/deposit"), details)
            .await?;
        ok_body(response).await
    }

    pub async fn remove_image(
        &self,
        image_id: &ImageId,
    ) -> Result<(), ClientError> {
        let response = self.delete(&format!("images/{image_id}")).await?;
        ok_empty(response).await
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// An unhandled API error to display, containing response text.
    #[error("{1}")]
    APIError(StatusCode, String),
    #[error("Network error. Please check your connection.")]
    Network(#[from] reqwest::Error),
}

/// Deserialize a successful request into the desired type, or return an
/// appropriate error.
pub async fn ok_body<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, ClientError> {
    let response = ok_status(response).await?;
    Ok(response.json::<T>().await?)
}

/// Check that an empty response is OK, returning a ClientError if not.
pub async fn ok_empty(response: reqwest::Response) -> Result<(), ClientError> {
    ok_status(response).await?;
    Ok(())
}

pub async fn ok_text(response: reqwest::Response) -> Result<String, ClientError> {
    let response = ok_status(response).await?;
    Ok(response.text().await?)
}

pub async fn ok_bytes(
    response: reqwest::Response,
) -> Result<Vec<u8>, ClientError> {
    let response = ok_status(response).await?;
    Ok(response.bytes().await?.to_vec())
}

async fn ok_status(
    response: reqwest::Response,
) -> Result<reqwest::Response, ClientError> {
    if !response.status().is_success() {
        return Err(ClientError::APIError(
            response.status(),
            response.text().await?,
        ));
    }
    Ok(response)
}
