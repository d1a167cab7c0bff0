use async_trait::async_trait;
use reqwest::Client;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::debug;

use crate::models::{Location, NewReservation, Reservation, ResultEnvelope, Spot, SubmitOutcome};

/// Errors surfaced by the backend client. The view flattens these to a
/// single display message; nothing downstream matches on the variants.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a usable response.
    #[error("request failed: {0}")]
    Transport(String),
    /// A response arrived but did not match the documented shape.
    #[error("unexpected response: {0}")]
    UnexpectedBody(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::UnexpectedBody(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }
}

/// Trait for the reservation backend to enable mocking
#[async_trait]
pub trait ParkingApi: Send + Sync {
    /// Fetch all parking locations
    async fn list_locations(&self) -> Result<Vec<Location>, ApiError>;

    /// Fetch the spot list for one location
    async fn list_spots(&self, location: &str) -> Result<Vec<Spot>, ApiError>;

    /// Fetch all reservations owned by a user
    async fn list_reservations(&self, user_id: &str) -> Result<Vec<Reservation>, ApiError>;

    /// Submit a new reservation; the backend signals acceptance in-band
    async fn create_reservation(
        &self,
        request: &NewReservation,
    ) -> Result<SubmitOutcome, ApiError>;

    /// Delete an existing reservation by id
    async fn delete_reservation(&self, reservation_id: &str) -> Result<SubmitOutcome, ApiError>;
}

/// Production client over the remote HTTP backend.
pub struct HttpApi {
    client: Client,
    base_url: String,
}

impl HttpApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }
}

#[async_trait]
impl ParkingApi for HttpApi {
    async fn list_locations(&self) -> Result<Vec<Location>, ApiError> {
        debug!("Fetching parking locations");
        let response: ResultEnvelope<Vec<Location>> = self
            .client
            .get(self.endpoint("get-locations.json"))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(response.result)
    }

    async fn list_spots(&self, location: &str) -> Result<Vec<Spot>, ApiError> {
        debug!("Fetching spots for location {}", location);
        let response: ResultEnvelope<Vec<Spot>> = self
            .client
            .get(self.endpoint("get-slots.json"))
            .query(&[("id", location)])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(response.result)
    }

    async fn list_reservations(&self, user_id: &str) -> Result<Vec<Reservation>, ApiError> {
        debug!("Fetching reservations for user {}", user_id);
        let response: ResultEnvelope<Vec<Reservation>> = self
            .client
            .get(self.endpoint("get-reservation.json"))
            .query(&[("userid", user_id)])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(response.result)
    }

    async fn create_reservation(
        &self,
        request: &NewReservation,
    ) -> Result<SubmitOutcome, ApiError> {
        debug!("Submitting reservation for spot {}", request.id_parkit);
        let response: ResultEnvelope<serde_json::Value> = self
            .client
            .post(self.endpoint("add-reservation.json"))
            .json(request)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(SubmitOutcome::from_result(&response.result))
    }

    async fn delete_reservation(&self, reservation_id: &str) -> Result<SubmitOutcome, ApiError> {
        debug!("Deleting reservation {}", reservation_id);
        let response: ResultEnvelope<serde_json::Value> = self
            .client
            .post(self.endpoint("delete-reservation.json"))
            .json(&serde_json::json!({ "id": reservation_id }))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(SubmitOutcome::from_result(&response.result))
    }
}

/// Mock implementation for testing
#[derive(Clone, Default)]
pub struct MockApi {
    locations: Arc<Mutex<Vec<Location>>>,
    spots: Arc<Mutex<HashMap<String, Vec<Spot>>>>,
    reservations: Arc<Mutex<Vec<Reservation>>>,
    created: Arc<Mutex<Vec<NewReservation>>>,
    deleted: Arc<Mutex<Vec<String>>>,
    reservation_fetches: Arc<Mutex<u32>>,
    transport_failure: Arc<Mutex<bool>>, // Simulate network failures
    reject_submissions: Arc<Mutex<bool>>, // Simulate backend-signaled conflicts
    next_id: Arc<Mutex<u32>>,
}

impl MockApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn set_locations(&self, locations: Vec<Location>) {
        *self.locations.lock().await = locations;
    }

    pub async fn set_spots(&self, location: &str, spots: Vec<Spot>) {
        self.spots.lock().await.insert(location.to_string(), spots);
    }

    pub async fn set_reservations(&self, reservations: Vec<Reservation>) {
        *self.reservations.lock().await = reservations;
    }

    /// Make every request fail at the transport level
    pub async fn set_transport_failure(&self, enabled: bool) {
        *self.transport_failure.lock().await = enabled;
    }

    /// Make create/delete requests come back with a non-success result
    pub async fn set_reject_submissions(&self, enabled: bool) {
        *self.reject_submissions.lock().await = enabled;
    }

    /// All create request bodies seen so far
    pub async fn created_requests(&self) -> Vec<NewReservation> {
        self.created.lock().await.clone()
    }

    /// All reservation ids deleted so far
    pub async fn deleted_ids(&self) -> Vec<String> {
        self.deleted.lock().await.clone()
    }

    /// How many times the reservation list has been fetched successfully
    pub async fn reservation_fetch_count(&self) -> u32 {
        *self.reservation_fetches.lock().await
    }

    async fn check_transport(&self) -> Result<(), ApiError> {
        if *self.transport_failure.lock().await {
            return Err(ApiError::Transport("connection refused".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl ParkingApi for MockApi {
    async fn list_locations(&self) -> Result<Vec<Location>, ApiError> {
        self.check_transport().await?;
        Ok(self.locations.lock().await.clone())
    }

    async fn list_spots(&self, location: &str) -> Result<Vec<Spot>, ApiError> {
        self.check_transport().await?;
        Ok(self
            .spots
            .lock()
            .await
            .get(location)
            .cloned()
            .unwrap_or_default())
    }

    async fn list_reservations(&self, _user_id: &str) -> Result<Vec<Reservation>, ApiError> {
        self.check_transport().await?;
        *self.reservation_fetches.lock().await += 1;
        Ok(self.reservations.lock().await.clone())
    }

    async fn create_reservation(
        &self,
        request: &NewReservation,
    ) -> Result<SubmitOutcome, ApiError> {
        self.check_transport().await?;
        self.created.lock().await.push(request.clone());

        if *self.reject_submissions.lock().await {
            return Ok(SubmitOutcome::Rejected);
        }

        let mut next_id = self.next_id.lock().await;
        *next_id += 1;
        self.reservations.lock().await.push(Reservation {
            id: format!("r{}", *next_id),
            sijainti: request.sijainti.clone(),
            parkki: request.id_parkit.clone(),
            rekisteri: request.rekisteri.clone().unwrap_or_default(),
            start_time: request.start_time.clone(),
            end_time: request.end_time.clone(),
        });
        Ok(SubmitOutcome::Successful)
    }

    async fn delete_reservation(&self, reservation_id: &str) -> Result<SubmitOutcome, ApiError> {
        self.check_transport().await?;
        self.deleted.lock().await.push(reservation_id.to_string());

        if *self.reject_submissions.lock().await {
            return Ok(SubmitOutcome::Rejected);
        }

        self.reservations
            .lock()
            .await
            .retain(|r| r.id != reservation_id);
        Ok(SubmitOutcome::Successful)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_joins_base_url_without_double_slash() {
        let api = HttpApi::new("https://backend.example/api/v1/web/parkki/");
        assert_eq!(
            api.endpoint("get-locations.json"),
            "https://backend.example/api/v1/web/parkki/get-locations.json"
        );
    }
}
