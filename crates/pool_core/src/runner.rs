//! Replay runner: drains the scheduler and routes each event into the ECS.
//!
//! Each step extracts the earliest event from [EventScheduler], inserts it as
//! [CurrentEvent], then runs the replay schedule. The loop is DONE once the
//! scheduler is empty.

use bevy_ecs::prelude::{Res, Schedule, World};
use bevy_ecs::schedule::IntoSystemConfigs;

use crate::clock::{CurrentEvent, EventKind, EventScheduler};
use crate::error::SchedulerError;
use crate::profiling::EventMetrics;
use crate::systems::{dropoff::dropoff_system, pickup::pickup_system};

fn is_pickup(event: Option<Res<CurrentEvent>>) -> bool {
    event
        .map(|e| e.0.kind == EventKind::Pickup)
        .unwrap_or(false)
}

fn is_dropoff(event: Option<Res<CurrentEvent>>) -> bool {
    event
        .map(|e| e.0.kind == EventKind::Dropoff)
        .unwrap_or(false)
}

/// Replays one event. Returns `Ok(false)` when the scheduler is already empty.
pub fn run_next_event(world: &mut World, schedule: &mut Schedule) -> Result<bool, SchedulerError> {
    let event = {
        let mut scheduler = world.resource_mut::<EventScheduler>();
        if scheduler.is_empty() {
            return Ok(false);
        }
        scheduler.extract_min()?
    };
    world.insert_resource(CurrentEvent(event));

    if let Some(mut metrics) = world.get_resource_mut::<EventMetrics>() {
        metrics.record_event(event.kind);
    }

    schedule.run(world);
    Ok(true)
}

/// Replays events until the scheduler is empty or `max_steps` is reached.
/// Returns the number of events replayed.
pub fn run_until_empty(
    world: &mut World,
    schedule: &mut Schedule,
    max_steps: usize,
) -> Result<usize, SchedulerError> {
    let mut steps = 0;
    while steps < max_steps && run_next_event(world, schedule)? {
        steps += 1;
    }
    Ok(steps)
}

/// Builds the replay schedule: pickup and dropoff handlers, each gated on the
/// current event's kind.
pub fn replay_schedule() -> Schedule {
    let mut schedule = Schedule::default();
    schedule.add_systems((
        pickup_system.run_if(is_pickup),
        dropoff_system.run_if(is_dropoff),
    ));
    schedule
}
