//! Planar geometry: coordinates and Euclidean distance.

use serde::{Deserialize, Serialize};

/// A point in the plane. Value type, no identity.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Coordinate {
    pub x: f64,
    pub y: f64,
}

impl Coordinate {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Euclidean distance between two points.
pub fn distance(a: Coordinate, b: Coordinate) -> f64 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    (dx * dx + dy * dy).sqrt()
}

/// Sum of the segment lengths along `points`, in order.
pub fn path_length<I>(points: I) -> f64
where
    I: IntoIterator<Item = Coordinate>,
{
    let mut points = points.into_iter();
    let Some(mut current) = points.next() else {
        return 0.0;
    };
    let mut total = 0.0;
    for next in points {
        total += distance(current, next);
        current = next;
    }
    total
}
