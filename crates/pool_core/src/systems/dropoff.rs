use bevy_ecs::prelude::{Res, ResMut};
use tracing::{debug, trace, warn};

use crate::clock::{CurrentEvent, EventKind};
use crate::request::{RequestState, RequestStore};
use crate::telemetry::DispatchTelemetry;
use crate::trip::TripBook;

/// Records the request's destination, completes the request and, on the
/// trip's last leg, completes the trip.
pub fn dropoff_system(
    event: Res<CurrentEvent>,
    trips: Res<TripBook>,
    mut store: ResMut<RequestStore>,
    mut telemetry: ResMut<DispatchTelemetry>,
) {
    let event = event.0;
    if event.kind != EventKind::Dropoff {
        return;
    }
    let Some(request) = store.get_mut(event.request_id) else {
        warn!(request = event.request_id, "dropoff for unknown request");
        return;
    };

    request.set_state(RequestState::Completed);
    telemetry.record_stop(event.trip_id, request.destination(), event.time);
    trace!(
        time = event.time,
        trip = event.trip_id,
        request = request.id(),
        leg = event.leg_index,
        "dropoff"
    );

    let is_last_leg = trips
        .get(event.trip_id)
        .is_some_and(|trip| event.leg_index + 1 == trip.member_count());
    if is_last_leg {
        telemetry.mark_completed(event.trip_id);
        debug!(time = event.time, trip = event.trip_id, "trip completed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy_ecs::prelude::{Schedule, World};

    use crate::clock::Event;
    use crate::geometry::Coordinate;
    use crate::request::Request;
    use crate::trip::Trip;

    fn world_with_pooled_trip() -> World {
        let mut world = World::new();
        let store = RequestStore::new(vec![
            Request::new(0, 0.0, Coordinate::new(0.0, 0.0), Coordinate::new(10.0, 0.0)),
            Request::new(1, 1.0, Coordinate::new(0.0, 0.0), Coordinate::new(10.0, 5.0)),
        ]);
        let mut trip = Trip::new(2);
        trip.add_member(0);
        trip.add_member(1);
        trip.compute_route(&store, 1.0);
        world.insert_resource(store);
        world.insert_resource(TripBook::new(vec![trip]));
        world.insert_resource(DispatchTelemetry::with_trips(1));
        world
    }

    fn run_dropoff(world: &mut World, request_id: usize, leg_index: usize, time: f64) {
        world.insert_resource(CurrentEvent(Event {
            time,
            kind: EventKind::Dropoff,
            trip_id: 0,
            request_id,
            leg_index,
        }));
        let mut schedule = Schedule::default();
        schedule.add_systems(dropoff_system);
        schedule.run(world);
    }

    #[test]
    fn only_last_leg_completes_trip() {
        let mut world = world_with_pooled_trip();

        run_dropoff(&mut world, 0, 0, 10.0);
        assert_eq!(world.resource::<RequestStore>()[0].state(), RequestState::Completed);
        assert!(world.resource::<DispatchTelemetry>().completion_order().is_empty());

        run_dropoff(&mut world, 1, 1, 15.0);
        let telemetry = world.resource::<DispatchTelemetry>();
        assert_eq!(telemetry.completion_order(), &[0]);
        let progress = telemetry.progress(0).expect("trip 0");
        assert_eq!(
            progress.stops,
            vec![Coordinate::new(10.0, 0.0), Coordinate::new(10.0, 5.0)]
        );
        assert_eq!(progress.last_event_at, Some(15.0));
        assert_eq!(world.resource::<RequestStore>()[1].state(), RequestState::Completed);
    }
}
