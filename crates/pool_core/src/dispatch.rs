//! Top-level run: group requests into trips, replay their events, report.
//!
//! The run context is an ECS [World] owning the request store, the trip book,
//! the scheduler and the replay telemetry for the whole run. Grouping
//! finishes before the replay starts; the two phases never interleave.

use bevy_ecs::prelude::World;
use serde::Serialize;
use tracing::info;

use crate::clock::EventScheduler;
use crate::error::DispatchError;
use crate::grouping::GroupingEngine;
use crate::input::DispatchInput;
use crate::profiling::EventMetrics;
use crate::request::RequestStore;
use crate::runner::{replay_schedule, run_until_empty};
use crate::telemetry::{CompletedTripRecord, DispatchTelemetry};
use crate::trip::TripBook;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DispatchSummary {
    pub requests: usize,
    pub trips: usize,
    pub pooled_trips: usize,
    pub events_replayed: usize,
}

/// Completed trips in the order they finished.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DispatchReport {
    pub summary: DispatchSummary,
    pub trips: Vec<CompletedTripRecord>,
}

impl DispatchReport {
    /// One line per completed trip.
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        for trip in &self.trips {
            out.push_str(&trip.to_string());
            out.push('\n');
        }
        out
    }
}

/// Forms trips and fills a world with everything the replay needs.
pub fn build_dispatch_world(world: &mut World, input: DispatchInput) -> Result<(), DispatchError> {
    input.params.validate()?;

    let mut store = RequestStore::new(input.requests);
    let mut scheduler = EventScheduler::default();
    let trips = GroupingEngine::new(input.params).run(&mut store, &mut scheduler);

    info!(
        requests = store.len(),
        trips = trips.len(),
        pooled_trips = trips.iter().filter(|t| t.is_pooled()).count(),
        events = scheduler.len(),
        "grouping finished"
    );

    world.insert_resource(DispatchTelemetry::with_trips(trips.len()));
    world.insert_resource(EventMetrics::default());
    world.insert_resource(store);
    world.insert_resource(trips);
    world.insert_resource(scheduler);
    Ok(())
}

/// Collects the report from a drained world.
pub fn collect_report(world: &World, events_replayed: usize) -> DispatchReport {
    let store = world.resource::<RequestStore>();
    let trips = world.resource::<TripBook>();
    let telemetry = world.resource::<DispatchTelemetry>();

    DispatchReport {
        summary: DispatchSummary {
            requests: store.len(),
            trips: trips.len(),
            pooled_trips: trips.iter().filter(|t| t.is_pooled()).count(),
            events_replayed,
        },
        trips: telemetry.completed_trips(trips, store),
    }
}

/// Runs the whole pipeline. Nothing is reported unless every step succeeds.
pub fn run_dispatch(input: DispatchInput) -> Result<DispatchReport, DispatchError> {
    let mut world = World::new();
    build_dispatch_world(&mut world, input)?;

    let mut schedule = replay_schedule();
    let events_replayed = run_until_empty(&mut world, &mut schedule, usize::MAX)?;
    world.resource::<EventMetrics>().log_summary();

    Ok(collect_report(&world, events_replayed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::parse_input;
    use crate::request::RequestState;

    #[test]
    fn pooled_pair_reports_one_trip() {
        let input = parse_input("4 1 100 100 100 0\n2\n0 0 0 0 10 0\n1 1 0 0 10 0\n")
            .expect("valid input");
        let report = run_dispatch(input).expect("run");

        assert_eq!(
            report.summary,
            DispatchSummary {
                requests: 2,
                trips: 1,
                pooled_trips: 1,
                events_replayed: 4,
            }
        );
        assert_eq!(report.trips.len(), 1);
        let trip = &report.trips[0];
        assert_eq!(trip.stop_count(), 4);
        assert_eq!(trip.request_ids, vec![0, 1]);
        assert_eq!(trip.completed_at, 10.0);
        assert_eq!(trip.total_distance, 10.0);
        assert_eq!(
            report.render_text(),
            "10.00 10.00 4 0.00 0.00 0.00 0.00 10.00 0.00 10.00 0.00\n"
        );
    }

    #[test]
    fn every_request_completes() {
        let input = parse_input("2 2 5 3 3 0\n3\n0 0 0 0 4 0\n1 1 1 0 4 1\n2 9 50 50 60 60\n")
            .expect("valid input");
        let mut world = World::new();
        build_dispatch_world(&mut world, input).expect("build");
        let mut schedule = replay_schedule();
        let replayed = run_until_empty(&mut world, &mut schedule, usize::MAX).expect("replay");

        assert_eq!(replayed, 6);
        assert!(world
            .resource::<RequestStore>()
            .iter()
            .all(|r| r.state() == RequestState::Completed));
        let report = collect_report(&world, replayed);
        assert_eq!(report.trips.len(), 2);
    }

    #[test]
    fn empty_input_reports_nothing() {
        let input = parse_input("3 1 1 1 1 0\n0\n").expect("valid input");
        let report = run_dispatch(input).expect("run");
        assert!(report.trips.is_empty());
        assert_eq!(report.render_text(), "");
    }

    #[test]
    fn invalid_params_fail_before_grouping() {
        let input = DispatchInput {
            params: crate::params::DispatchParams::default().with_speed(0.0),
            requests: Vec::new(),
        };
        assert!(matches!(run_dispatch(input), Err(DispatchError::Input(_))));
    }
}
