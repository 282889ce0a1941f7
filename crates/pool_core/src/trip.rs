//! Trips: groups of requests served by one vehicle traversal.
//!
//! Routes follow a fixed collect-then-deliver order. Starting at the first
//! member's origin, the vehicle visits the remaining origins in acceptance
//! order, then every destination in acceptance order.
//!
//! Two efficiency measures exist and are deliberately distinct:
//! [pooled_efficiency] gates admission into a group, while
//! [Trip::compute_efficiency] is reported for finished trips only.

use bevy_ecs::prelude::Resource;

use crate::geometry::{path_length, Coordinate};
use crate::request::{RequestIndex, RequestStore, TripId};

#[derive(Debug, Clone, PartialEq)]
pub struct Trip {
    members: Vec<RequestIndex>,
    capacity: usize,
    total_distance: f64,
    start_time: f64,
    planned_duration: f64,
    processed: bool,
}

impl Trip {
    /// Empty trip for a vehicle with `capacity` seats.
    pub fn new(capacity: usize) -> Self {
        Self {
            members: Vec::new(),
            capacity,
            total_distance: 0.0,
            start_time: 0.0,
            planned_duration: 0.0,
            processed: false,
        }
    }

    /// Appends `request` in acceptance order. Callers guarantee a request is
    /// added at most once.
    pub fn add_member(&mut self, request: RequestIndex) {
        debug_assert!(
            self.members.len() < self.capacity,
            "trip already holds {} members",
            self.capacity
        );
        self.members.push(request);
    }

    pub fn members(&self) -> &[RequestIndex] {
        &self.members
    }

    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    pub fn is_pooled(&self) -> bool {
        self.members.len() > 1
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn total_distance(&self) -> f64 {
        self.total_distance
    }

    /// Request time of the first member, once the route is computed.
    pub fn start_time(&self) -> f64 {
        self.start_time
    }

    /// Route length divided by vehicle speed.
    pub fn planned_duration(&self) -> f64 {
        self.planned_duration
    }

    pub fn is_processed(&self) -> bool {
        self.processed
    }

    pub fn mark_processed(&mut self) {
        self.processed = true;
    }

    /// Computes the route length and start time from the member requests.
    /// `speed` only feeds [Trip::planned_duration]; distance is geometric.
    pub fn compute_route(&mut self, store: &RequestStore, speed: f64) {
        let Some(&first) = self.members.first() else {
            return;
        };
        self.total_distance = if self.members.len() == 1 {
            store[first].travel_distance()
        } else {
            route_distance(store, &self.members)
        };
        self.start_time = store[first].request_time();
        self.planned_duration = self.total_distance / speed;
    }

    /// Reporting efficiency: the first member's direct distance as a
    /// percentage of the route length.
    pub fn compute_efficiency(&self, store: &RequestStore) -> f64 {
        if self.members.len() <= 1 {
            return 100.0;
        }
        let direct = store[self.members[0]].travel_distance();
        if self.total_distance == 0.0 {
            return 0.0;
        }
        direct / self.total_distance * 100.0
    }

    /// Planned stop sequence: all origins, then all destinations.
    pub fn stops(&self, store: &RequestStore) -> Vec<Coordinate> {
        planned_stops(store, &self.members).collect()
    }
}

fn planned_stops<'a>(
    store: &'a RequestStore,
    members: &'a [RequestIndex],
) -> impl Iterator<Item = Coordinate> + 'a {
    let origins = members.iter().map(|&m| store[m].origin());
    let destinations = members.iter().map(|&m| store[m].destination());
    origins.chain(destinations)
}

/// Two-phase route length over `members` in acceptance order.
pub fn route_distance(store: &RequestStore, members: &[RequestIndex]) -> f64 {
    path_length(planned_stops(store, members))
}

/// Admission efficiency: the members' summed direct distances over the
/// shared route length, as a plain ratio.
pub fn pooled_efficiency(store: &RequestStore, members: &[RequestIndex]) -> f64 {
    if members.len() <= 1 {
        return 100.0;
    }
    let direct: f64 = members.iter().map(|&m| store[m].travel_distance()).sum();
    let route = route_distance(store, members);
    if route == 0.0 {
        return 0.0;
    }
    direct / route
}

/// Every formed trip, indexed by [TripId].
#[derive(Debug, Clone, Default, Resource)]
pub struct TripBook {
    trips: Vec<Trip>,
}

impl TripBook {
    pub fn new(trips: Vec<Trip>) -> Self {
        Self { trips }
    }

    pub fn get(&self, id: TripId) -> Option<&Trip> {
        self.trips.get(id)
    }

    pub fn len(&self) -> usize {
        self.trips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trips.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Trip> {
        self.trips.iter()
    }
}

impl std::ops::Index<TripId> for TripBook {
    type Output = Trip;

    fn index(&self, id: TripId) -> &Self::Output {
        &self.trips[id]
    }
}
