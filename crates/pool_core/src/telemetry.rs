//! Replay telemetry: per-trip stop lists, latest event times and the order in
//! which trips complete.

use std::fmt;

use bevy_ecs::prelude::Resource;
use serde::Serialize;

use crate::geometry::Coordinate;
use crate::request::{RequestStore, TripId};
use crate::trip::TripBook;

/// Stops replayed so far for one trip.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TripProgress {
    pub stops: Vec<Coordinate>,
    /// Time of the latest event replayed for this trip.
    pub last_event_at: Option<f64>,
    pub completed: bool,
}

/// One completed trip, as reported after the replay drains.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompletedTripRecord {
    pub trip_id: TripId,
    pub started_at: f64,
    pub completed_at: f64,
    pub total_distance: f64,
    /// Route distance over vehicle speed.
    pub planned_duration: f64,
    /// Reporting efficiency (percentage), see [crate::trip::Trip::compute_efficiency].
    pub efficiency: f64,
    /// External ids of the member requests, in acceptance order.
    pub request_ids: Vec<i64>,
    pub stops: Vec<Coordinate>,
}

impl CompletedTripRecord {
    pub fn stop_count(&self) -> usize {
        self.stops.len()
    }

    /// Time from the first member's request to the last replayed stop.
    pub fn duration(&self) -> f64 {
        self.completed_at - self.started_at
    }
}

impl fmt::Display for CompletedTripRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.2} {:.2} {}",
            self.completed_at,
            self.total_distance,
            self.stop_count()
        )?;
        for stop in &self.stops {
            write!(f, " {:.2} {:.2}", stop.x, stop.y)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Resource)]
pub struct DispatchTelemetry {
    progress: Vec<TripProgress>,
    completion_order: Vec<TripId>,
}

impl DispatchTelemetry {
    pub fn with_trips(trip_count: usize) -> Self {
        Self {
            progress: vec![TripProgress::default(); trip_count],
            completion_order: Vec::new(),
        }
    }

    /// Appends `stop` to the trip's stop list and moves its latest time.
    pub fn record_stop(&mut self, trip_id: TripId, stop: Coordinate, time: f64) {
        if trip_id >= self.progress.len() {
            self.progress.resize_with(trip_id + 1, TripProgress::default);
        }
        let progress = &mut self.progress[trip_id];
        progress.stops.push(stop);
        progress.last_event_at = Some(time);
    }

    /// Fixes the trip's place in completion order. Repeated calls are ignored.
    pub fn mark_completed(&mut self, trip_id: TripId) {
        if trip_id >= self.progress.len() {
            self.progress.resize_with(trip_id + 1, TripProgress::default);
        }
        let progress = &mut self.progress[trip_id];
        if !progress.completed {
            progress.completed = true;
            self.completion_order.push(trip_id);
        }
    }

    pub fn progress(&self, trip_id: TripId) -> Option<&TripProgress> {
        self.progress.get(trip_id)
    }

    pub fn completion_order(&self) -> &[TripId] {
        &self.completion_order
    }

    /// Completed trips in completion order.
    pub fn completed_trips(&self, trips: &TripBook, store: &RequestStore) -> Vec<CompletedTripRecord> {
        self.completion_order
            .iter()
            .filter_map(|&trip_id| {
                let trip = trips.get(trip_id)?;
                let progress = self.progress.get(trip_id)?;
                Some(CompletedTripRecord {
                    trip_id,
                    started_at: trip.start_time(),
                    completed_at: progress.last_event_at.unwrap_or(trip.start_time()),
                    total_distance: trip.total_distance(),
                    planned_duration: trip.planned_duration(),
                    efficiency: trip.compute_efficiency(store),
                    request_ids: trip.members().iter().map(|&m| store[m].id()).collect(),
                    stops: progress.stops.clone(),
                })
            })
            .collect()
    }
}
