use pool_core::params::DispatchParams;
use pool_core::request::Request;
use pool_core::test_helpers::request_at;
use proptest::prelude::*;

/// Requests on a small grid with non-decreasing request times.
pub fn sorted_requests(max_len: usize) -> impl Strategy<Value = Vec<Request>> {
    prop::collection::vec(
        (0.0f64..5.0, (0.0f64..20.0, 0.0f64..20.0), (0.0f64..20.0, 0.0f64..20.0)),
        0..max_len,
    )
    .prop_map(|records| {
        let mut time = 0.0;
        records
            .into_iter()
            .enumerate()
            .map(|(i, (gap, origin, destination))| {
                time += gap;
                request_at(i as i64, time, origin, destination)
            })
            .collect()
    })
}

pub fn dispatch_params() -> impl Strategy<Value = DispatchParams> {
    (1usize..5, 0.5f64..4.0, 0.0f64..20.0, 0.0f64..15.0, 0.0f64..15.0, 0.0f64..2.0).prop_map(
        |(capacity, speed, window, alfa, beta, lambda)| DispatchParams {
            capacity,
            speed,
            max_time_window: window,
            max_origin_distance: alfa,
            max_destination_distance: beta,
            min_efficiency: lambda,
        },
    )
}
