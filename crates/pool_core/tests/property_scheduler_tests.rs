use pool_core::clock::{Event, EventKind, EventScheduler};
use pool_core::error::SchedulerError;
use proptest::prelude::*;

fn event(time: f64, request_id: usize) -> Event {
    Event {
        time,
        kind: EventKind::Pickup,
        trip_id: 0,
        request_id,
        leg_index: 0,
    }
}

#[test]
fn spec_example_order() {
    let mut scheduler = EventScheduler::default();
    for (i, time) in [5.0, 3.0, 8.0, 1.0].into_iter().enumerate() {
        scheduler.insert(event(time, i));
    }
    let times: Vec<f64> = (0..4)
        .map(|_| scheduler.extract_min().expect("event").time)
        .collect();
    assert_eq!(times, vec![1.0, 3.0, 5.0, 8.0]);
    assert_eq!(scheduler.extract_min(), Err(SchedulerError::Empty));
    assert_eq!(scheduler.peek_min(), Err(SchedulerError::Empty));
    assert!(scheduler.is_empty());
}

proptest! {
    #[test]
    fn drain_yields_every_event_once_in_time_order(
        times in prop::collection::vec(-1_000.0f64..1_000.0, 0..300),
        initial_capacity in 1usize..8,
    ) {
        let mut scheduler = EventScheduler::with_capacity(initial_capacity);
        for (i, &time) in times.iter().enumerate() {
            scheduler.insert(event(time, i));
        }
        prop_assert_eq!(scheduler.len(), times.len());

        let mut drained = Vec::with_capacity(times.len());
        while !scheduler.is_empty() {
            drained.push(scheduler.extract_min().expect("non-empty"));
        }
        prop_assert!(drained.windows(2).all(|w| w[0].time <= w[1].time));

        let mut seen: Vec<usize> = drained.iter().map(|e| e.request_id).collect();
        seen.sort_unstable();
        prop_assert_eq!(seen, (0..times.len()).collect::<Vec<_>>());
    }

    #[test]
    fn extract_returns_current_minimum_under_interleaving(
        ops in prop::collection::vec(prop::option::of(0.0f64..100.0), 0..200),
    ) {
        // Some(t) inserts, None extracts.
        let mut scheduler = EventScheduler::default();
        let mut held: Vec<f64> = Vec::new();
        for (i, op) in ops.into_iter().enumerate() {
            match op {
                Some(time) => {
                    scheduler.insert(event(time, i));
                    held.push(time);
                }
                None => match scheduler.extract_min() {
                    Ok(min) => {
                        let expected = held.iter().copied().fold(f64::INFINITY, f64::min);
                        prop_assert_eq!(min.time, expected);
                        let pos = held.iter().position(|&t| t == min.time).expect("held");
                        held.swap_remove(pos);
                    }
                    Err(err) => {
                        prop_assert!(held.is_empty());
                        prop_assert_eq!(err, SchedulerError::Empty);
                    }
                },
            }
            prop_assert_eq!(scheduler.len(), held.len());
            if let Some(next) = scheduler.next_event_time() {
                let expected = held.iter().copied().fold(f64::INFINITY, f64::min);
                prop_assert_eq!(next, expected);
            }
        }
    }
}
