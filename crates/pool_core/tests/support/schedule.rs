use bevy_ecs::prelude::World;
use bevy_ecs::schedule::Schedule;
use pool_core::dispatch::{build_dispatch_world, collect_report, DispatchReport};
use pool_core::input::DispatchInput;
use pool_core::runner::{replay_schedule, run_next_event, run_until_empty};

/// Owns a world and a reusable replay schedule so tests can step or drain.
pub struct ReplayRunner {
    pub world: World,
    schedule: Schedule,
    replayed: usize,
}

impl ReplayRunner {
    /// Forms trips for `input` and prepares the replay.
    pub fn new(input: DispatchInput) -> Self {
        let mut world = World::new();
        build_dispatch_world(&mut world, input).expect("valid dispatch input");
        Self {
            world,
            schedule: replay_schedule(),
            replayed: 0,
        }
    }

    /// Replay a single event (returns `true` if an event was processed).
    pub fn run_one(&mut self) -> bool {
        let ran = run_next_event(&mut self.world, &mut self.schedule).expect("replay step");
        if ran {
            self.replayed += 1;
        }
        ran
    }

    /// Drain the scheduler, returning the number of events replayed by this call.
    pub fn run_full(&mut self) -> usize {
        let steps =
            run_until_empty(&mut self.world, &mut self.schedule, usize::MAX).expect("replay");
        self.replayed += steps;
        steps
    }

    pub fn report(&self) -> DispatchReport {
        collect_report(&self.world, self.replayed)
    }
}
