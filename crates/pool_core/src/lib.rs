pub mod clock;
pub mod dispatch;
pub mod error;
pub mod geometry;
pub mod grouping;
pub mod input;
pub mod params;
pub mod profiling;
pub mod request;
pub mod runner;
pub mod scenario;
pub mod systems;
pub mod telemetry;
pub mod trip;

#[cfg(feature = "test-helpers")]
pub mod test_helpers;
