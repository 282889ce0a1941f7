//! Chronological event scheduler: an array-backed binary min-heap keyed by
//! event time.
//!
//! Events with equal times come out in whatever order the sift operations
//! leave them; callers must not rely on an order among ties.

use bevy_ecs::prelude::Resource;
use serde::{Deserialize, Serialize};

use crate::error::SchedulerError;
use crate::request::{RequestIndex, TripId};

/// Initial backing capacity of a default scheduler.
pub const DEFAULT_CAPACITY: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EventKind {
    Pickup,
    Dropoff,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub time: f64,
    pub kind: EventKind,
    pub trip_id: TripId,
    /// Store index of the request this stop serves.
    pub request_id: RequestIndex,
    /// Position of the request within its trip's acceptance order.
    pub leg_index: usize,
}

/// The event currently being replayed. Inserted by the runner before each
/// schedule run.
#[derive(Debug, Clone, Copy, Resource)]
pub struct CurrentEvent(pub Event);

#[derive(Debug, Clone, Resource)]
pub struct EventScheduler {
    now: f64,
    heap: Vec<Event>,
}

impl Default for EventScheduler {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

impl EventScheduler {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            now: 0.0,
            heap: Vec::with_capacity(capacity.max(1)),
        }
    }

    /// Time of the most recently extracted event.
    pub fn now(&self) -> f64 {
        self.now
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.heap.capacity()
    }

    /// Inserts `event`, doubling the backing storage first when it is full.
    pub fn insert(&mut self, event: Event) {
        if self.heap.len() == self.heap.capacity() {
            self.grow();
        }
        self.heap.push(event);
        self.sift_up(self.heap.len() - 1);
    }

    /// Removes and returns the earliest event.
    pub fn extract_min(&mut self) -> Result<Event, SchedulerError> {
        if self.heap.is_empty() {
            return Err(SchedulerError::Empty);
        }
        // Last element moves to the root, then sinks.
        let min = self.heap.swap_remove(0);
        if !self.heap.is_empty() {
            self.sift_down(0);
        }
        self.now = min.time;
        Ok(min)
    }

    /// Returns the earliest event without removing it.
    pub fn peek_min(&self) -> Result<Event, SchedulerError> {
        self.heap.first().copied().ok_or(SchedulerError::Empty)
    }

    pub fn pop_next(&mut self) -> Option<Event> {
        self.extract_min().ok()
    }

    pub fn next_event_time(&self) -> Option<f64> {
        self.heap.first().map(|event| event.time)
    }

    fn grow(&mut self) {
        let additional = self.heap.capacity().max(1);
        self.heap.reserve_exact(additional);
    }

    fn sift_up(&mut self, mut i: usize) {
        while i > 0 {
            let parent = (i - 1) / 2;
            if self.heap[parent].time <= self.heap[i].time {
                break;
            }
            self.heap.swap(i, parent);
            i = parent;
        }
    }

    fn sift_down(&mut self, mut i: usize) {
        let len = self.heap.len();
        loop {
            let left = 2 * i + 1;
            let right = left + 1;
            let mut smallest = i;
            if left < len && self.heap[left].time < self.heap[smallest].time {
                smallest = left;
            }
            if right < len && self.heap[right].time < self.heap[smallest].time {
                smallest = right;
            }
            if smallest == i {
                break;
            }
            self.heap.swap(i, smallest);
            i = smallest;
        }
    }
}
