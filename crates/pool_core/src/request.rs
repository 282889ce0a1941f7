//! Transport requests and the store that owns them for a run.
//!
//! Requests are created once at load time and referenced everywhere else by
//! their index in [RequestStore]. The external `id` read from input is kept
//! on the record but never used for lookups.

use bevy_ecs::prelude::Resource;
use serde::{Deserialize, Serialize};

use crate::geometry::{distance, Coordinate};

/// Position of a request inside [RequestStore].
pub type RequestIndex = usize;

/// Sequential trip identifier, assigned in formation order.
pub type TripId = usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RequestState {
    /// Loaded, not yet assigned to a trip.
    Requested,
    /// Served alone.
    Individual,
    /// Shares its trip with at least one other request.
    Pooled,
    /// Final dropoff replayed.
    Completed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Request {
    id: i64,
    request_time: f64,
    origin: Coordinate,
    destination: Coordinate,
    state: RequestState,
    assigned_trip: Option<TripId>,
}

impl Request {
    pub fn new(id: i64, request_time: f64, origin: Coordinate, destination: Coordinate) -> Self {
        Self {
            id,
            request_time,
            origin,
            destination,
            state: RequestState::Requested,
            assigned_trip: None,
        }
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn request_time(&self) -> f64 {
        self.request_time
    }

    pub fn origin(&self) -> Coordinate {
        self.origin
    }

    pub fn destination(&self) -> Coordinate {
        self.destination
    }

    pub fn state(&self) -> RequestState {
        self.state
    }

    pub fn assigned_trip(&self) -> Option<TripId> {
        self.assigned_trip
    }

    pub fn is_assigned(&self) -> bool {
        self.assigned_trip.is_some()
    }

    pub fn set_state(&mut self, state: RequestState) {
        self.state = state;
    }

    /// Binds the request to `trip`. A request is never moved between trips.
    pub fn assign_to(&mut self, trip: TripId) {
        debug_assert!(
            self.assigned_trip.is_none(),
            "request {} already assigned to trip {:?}",
            self.id,
            self.assigned_trip
        );
        self.assigned_trip = Some(trip);
    }

    /// Direct origin-to-destination distance.
    pub fn travel_distance(&self) -> f64 {
        distance(self.origin, self.destination)
    }

    pub fn distance_from_origin(&self, point: Coordinate) -> f64 {
        distance(self.origin, point)
    }

    pub fn distance_from_destination(&self, point: Coordinate) -> f64 {
        distance(self.destination, point)
    }
}

/// Owns every request of a run, in input order.
#[derive(Debug, Clone, Default, Resource)]
pub struct RequestStore {
    requests: Vec<Request>,
}

impl RequestStore {
    pub fn new(requests: Vec<Request>) -> Self {
        Self { requests }
    }

    pub fn len(&self) -> usize {
        self.requests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    pub fn get(&self, index: RequestIndex) -> Option<&Request> {
        self.requests.get(index)
    }

    pub fn get_mut(&mut self, index: RequestIndex) -> Option<&mut Request> {
        self.requests.get_mut(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Request> {
        self.requests.iter()
    }
}

impl std::ops::Index<RequestIndex> for RequestStore {
    type Output = Request;

    fn index(&self, index: RequestIndex) -> &Self::Output {
        &self.requests[index]
    }
}

impl std::ops::IndexMut<RequestIndex> for RequestStore {
    fn index_mut(&mut self, index: RequestIndex) -> &mut Self::Output {
        &mut self.requests[index]
    }
}
