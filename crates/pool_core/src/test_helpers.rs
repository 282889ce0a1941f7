//! Test helpers shared by unit tests, integration tests and benchmarks.

use crate::geometry::Coordinate;
use crate::input::DispatchInput;
use crate::params::DispatchParams;
use crate::request::Request;

/// Request with external id `id` travelling between two points.
pub fn request_at(id: i64, time: f64, origin: (f64, f64), destination: (f64, f64)) -> Request {
    Request::new(
        id,
        time,
        Coordinate::new(origin.0, origin.1),
        Coordinate::new(destination.0, destination.1),
    )
}

/// Parameters loose enough that only capacity limits grouping.
pub fn permissive_params() -> DispatchParams {
    DispatchParams::default()
        .with_capacity(4)
        .with_speed(1.0)
        .with_max_time_window(100.0)
        .with_max_origin_distance(100.0)
        .with_max_destination_distance(100.0)
        .with_min_efficiency(0.0)
}

pub fn dispatch_input(params: DispatchParams, requests: Vec<Request>) -> DispatchInput {
    DispatchInput { params, requests }
}
