use std::sync::Arc;
use tracing::{info, warn};

use crate::api::ParkingApi;
use crate::models::{Location, NewReservation, Reservation, Spot};
use crate::session::Session;
use crate::time::{clamp_duration, reservation_window, Clock};

/// Where the reservation flow currently stands. Replaces the ad hoc
/// flag soup of the original page with explicit transitions:
/// Idle -> SpotSelected (spot picked), SpotSelected -> Submitting -> Idle
/// on success, any operation -> Error on failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    SpotSelected,
    Submitting,
    Error,
}

/// The reservation page state: reference data fetched from the backend,
/// transient selection state, and a single error slot. All business logic
/// lives behind the `ParkingApi`; this type only synchronizes state.
pub struct ReservationView {
    api: Arc<dyn ParkingApi>,
    clock: Arc<dyn Clock>,
    session: Session,

    locations: Vec<Location>,
    spots: Vec<Spot>,
    reservations: Vec<Reservation>,

    selected_location: Option<String>,
    selected_spot: Option<String>,
    duration_hours: i64,

    phase: Phase,
    error: Option<String>,
}

impl ReservationView {
    pub fn new(api: Arc<dyn ParkingApi>, clock: Arc<dyn Clock>, session: Session) -> Self {
        Self {
            api,
            clock,
            session,
            locations: Vec::new(),
            spots: Vec::new(),
            reservations: Vec::new(),
            selected_location: None,
            selected_spot: None,
            duration_hours: 0,
            phase: Phase::Idle,
            error: None,
        }
    }

    /// Initial reference-data load: locations always, the user's own
    /// reservations only when signed in. The two reads are independent;
    /// a failure in one does not stop the other.
    pub async fn load(&mut self) {
        match self.api.list_locations().await {
            Ok(locations) => {
                self.locations = locations;
                self.clear_error();
            }
            Err(e) => self.set_error(format!("Error fetching parking locations: {}", e)),
        }

        if let Some(user_id) = self.session.user_id.clone() {
            match self.api.list_reservations(&user_id).await {
                Ok(reservations) => self.reservations = reservations,
                Err(e) => self.set_error(format!("Error fetching user reservations: {}", e)),
            }
        } else {
            info!("No signed-in user, skipping reservation fetch");
        }
    }

    /// Select a location and fetch its spot list. The previously selected
    /// spot is cleared before the fetch so a stale spot can never be
    /// submitted against the new location.
    pub async fn select_location(&mut self, location: &str) {
        self.selected_spot = None;
        if self.phase == Phase::SpotSelected {
            self.phase = Phase::Idle;
        }
        self.selected_location = Some(location.to_string());

        match self.api.list_spots(location).await {
            Ok(spots) => {
                self.spots = spots;
                self.clear_error();
            }
            Err(e) => self.set_error(format!("Error fetching available spots: {}", e)),
        }
    }

    /// Select a spot from the currently loaded list. Only spots present in
    /// the list and marked free are accepted, mirroring the original page
    /// where taken spots were not clickable.
    pub fn select_spot(&mut self, spot_id: &str) {
        let selectable = self
            .spots
            .iter()
            .any(|s| s.id_parkit == spot_id && s.vapaa);
        if !selectable {
            self.set_error(format!("Spot {} is not available.", spot_id));
            return;
        }

        self.selected_spot = Some(spot_id.to_string());
        self.phase = Phase::SpotSelected;
    }

    /// Add one hour to the duration, clamped to the supported maximum.
    pub fn increase_hour(&mut self) {
        self.duration_hours = clamp_duration(self.duration_hours + 1);
    }

    /// Remove one hour from the duration, never going below zero.
    pub fn decrease_hour(&mut self) {
        self.duration_hours = clamp_duration(self.duration_hours - 1);
    }

    /// Whether the reserve action is currently allowed.
    pub fn can_submit(&self) -> bool {
        self.selected_spot.is_some() && self.duration_hours > 0
    }

    /// Submit the current selection as a new reservation. Preconditions are
    /// checked first; nothing is sent unless both a spot and a nonzero
    /// duration are chosen.
    pub async fn submit(&mut self) {
        let Some(spot_id) = self.selected_spot.clone() else {
            self.set_error("Please select a parking spot and reservation time.".to_string());
            return;
        };
        if self.duration_hours == 0 {
            self.set_error("Please select a parking spot and reservation time.".to_string());
            return;
        }

        self.phase = Phase::Submitting;
        let (start_time, end_time) = reservation_window(self.clock.now_utc(), self.duration_hours);
        let request = NewReservation {
            userid: self.session.user_id.clone(),
            id_parkit: spot_id,
            start_time,
            end_time,
            rekisteri: self.session.registration.clone(),
            sijainti: self.selected_location.clone().unwrap_or_default(),
        };

        match self.api.create_reservation(&request).await {
            Ok(outcome) if outcome.is_successful() => {
                info!("Reservation accepted for spot {}", request.id_parkit);
                self.error = None;
                self.selected_spot = None;
                self.phase = Phase::Idle;
                self.refresh_reservations().await;
            }
            Ok(_) => {
                warn!("Backend rejected reservation for spot {}", request.id_parkit);
                self.set_error("Reservation failed. Spot might be already reserved.".to_string());
            }
            Err(e) => self.set_error(format!("Error making reservation: {}", e)),
        }
    }

    /// Cancel a reservation by id. On success the reservation list and the
    /// current location's spot list are re-fetched; the original page did a
    /// full reload here, a targeted re-fetch covers the same state.
    pub async fn cancel(&mut self, reservation_id: &str) {
        match self.api.delete_reservation(reservation_id).await {
            Ok(outcome) if outcome.is_successful() => {
                info!("Reservation {} deleted", reservation_id);
                self.clear_error();
                self.refresh_reservations().await;
                if let Some(location) = self.selected_location.clone() {
                    match self.api.list_spots(&location).await {
                        Ok(spots) => self.spots = spots,
                        Err(e) => {
                            self.set_error(format!("Error fetching available spots: {}", e))
                        }
                    }
                }
            }
            Ok(_) => self.set_error("Error deleting reservation.".to_string()),
            Err(e) => self.set_error(format!("Error deleting reservation: {}", e)),
        }
    }

    /// Re-fetch the signed-in user's reservations, replacing the cached
    /// list verbatim.
    pub async fn refresh_reservations(&mut self) {
        let Some(user_id) = self.session.user_id.clone() else {
            return;
        };
        match self.api.list_reservations(&user_id).await {
            Ok(reservations) => self.reservations = reservations,
            Err(e) => self.set_error(format!("Error updating user reservations: {}", e)),
        }
    }

    fn set_error(&mut self, message: String) {
        warn!("{}", message);
        self.error = Some(message);
        self.phase = Phase::Error;
    }

    fn clear_error(&mut self) {
        self.error = None;
        if self.phase == Phase::Error {
            self.phase = if self.selected_spot.is_some() {
                Phase::SpotSelected
            } else {
                Phase::Idle
            };
        }
    }

    // Read accessors for rendering and tests.

    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    pub fn spots(&self) -> &[Spot] {
        &self.spots
    }

    pub fn reservations(&self) -> &[Reservation] {
        &self.reservations
    }

    pub fn selected_location(&self) -> Option<&str> {
        self.selected_location.as_deref()
    }

    pub fn selected_spot(&self) -> Option<&str> {
        self.selected_spot.as_deref()
    }

    pub fn duration_hours(&self) -> i64 {
        self.duration_hours
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}
