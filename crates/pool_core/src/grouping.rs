//! Greedy grouping engine: decides which requests share a trip and schedules
//! each finished trip's pickup and dropoff events.
//!
//! Requests are scanned in input order. The time-window check stops a scan
//! outright, which is only correct when the input is sorted by request time.
//! Input is not re-sorted here; unsorted input groups differently.

use tracing::{debug, trace};

use crate::clock::{Event, EventKind, EventScheduler};
use crate::geometry::distance;
use crate::params::DispatchParams;
use crate::request::{RequestIndex, RequestState, RequestStore, TripId};
use crate::trip::{pooled_efficiency, Trip, TripBook};

/// True when `candidate` is close enough to every current member, origin to
/// origin and destination to destination.
pub fn is_compatible(
    store: &RequestStore,
    group: &[RequestIndex],
    candidate: RequestIndex,
    params: &DispatchParams,
) -> bool {
    let candidate = &store[candidate];
    group.iter().all(|&member| {
        let member = &store[member];
        member.distance_from_origin(candidate.origin()) <= params.max_origin_distance
            && member.distance_from_destination(candidate.destination())
                <= params.max_destination_distance
    })
}

/// Builds the group seeded by `seed` from the requests after it that are
/// still unassigned. Returns members in acceptance order, seed first.
///
/// A candidate whose admission would drop the pooled efficiency below the
/// threshold is left out and stays available to later groups.
pub fn form_group(
    store: &RequestStore,
    seed: RequestIndex,
    params: &DispatchParams,
) -> Vec<RequestIndex> {
    let base_time = store[seed].request_time();
    let mut group = vec![seed];

    for candidate in seed + 1..store.len() {
        let request = &store[candidate];
        if request.is_assigned() {
            continue;
        }
        if group.len() >= params.capacity {
            break;
        }
        if request.request_time() - base_time >= params.max_time_window {
            break;
        }
        if !is_compatible(store, &group, candidate, params) {
            trace!(seed, candidate, "incompatible geometry");
            continue;
        }

        group.push(candidate);
        let efficiency = pooled_efficiency(store, &group);
        if efficiency < params.min_efficiency {
            group.pop();
            trace!(seed, candidate, efficiency, "rejected below minimum efficiency");
        } else {
            trace!(seed, candidate, efficiency, "admitted");
        }
    }

    group
}

/// Pushes one pickup and one dropoff per member into `scheduler`, timed by
/// walking the trip's route at `speed` from its start time. Returns the
/// number of events inserted.
pub fn schedule_trip_events(
    trip_id: TripId,
    trip: &Trip,
    store: &RequestStore,
    speed: f64,
    scheduler: &mut EventScheduler,
) -> usize {
    let members = trip.members();
    let Some(&first) = members.first() else {
        return 0;
    };

    let mut time = trip.start_time();
    let mut position = store[first].origin();
    let mut inserted = 0;

    for kind in [EventKind::Pickup, EventKind::Dropoff] {
        for (leg_index, &request_id) in members.iter().enumerate() {
            let stop = match kind {
                EventKind::Pickup => store[request_id].origin(),
                EventKind::Dropoff => store[request_id].destination(),
            };
            time += distance(position, stop) / speed;
            scheduler.insert(Event {
                time,
                kind,
                trip_id,
                request_id,
                leg_index,
            });
            position = stop;
            inserted += 1;
        }
    }

    inserted
}

/// Forms every trip of a run and schedules its events.
#[derive(Debug, Clone, Copy)]
pub struct GroupingEngine {
    params: DispatchParams,
}

impl GroupingEngine {
    pub fn new(params: DispatchParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &DispatchParams {
        &self.params
    }

    /// Consumes the store in input order. Each unassigned request seeds a new
    /// trip; members are marked [RequestState::Individual] or
    /// [RequestState::Pooled] and bound to the trip id.
    pub fn run(&self, store: &mut RequestStore, scheduler: &mut EventScheduler) -> TripBook {
        let mut trips = Vec::new();

        for seed in 0..store.len() {
            if store[seed].is_assigned() {
                continue;
            }

            let group = form_group(store, seed, &self.params);
            let trip_id = trips.len();
            let state = if group.len() == 1 {
                RequestState::Individual
            } else {
                RequestState::Pooled
            };

            let mut trip = Trip::new(self.params.capacity);
            for &member in &group {
                trip.add_member(member);
                store[member].assign_to(trip_id);
                store[member].set_state(state);
            }

            trip.compute_route(store, self.params.speed);
            let events = schedule_trip_events(trip_id, &trip, store, self.params.speed, scheduler);
            trip.mark_processed();

            debug!(
                trip_id,
                members = ?group,
                distance = trip.total_distance(),
                efficiency = trip.compute_efficiency(store),
                events,
                "trip formed"
            );
            trips.push(trip);
        }

        TripBook::new(trips)
    }
}
