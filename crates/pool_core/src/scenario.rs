//! Synthetic demand: seeded requests clustered around a few hotspots so that
//! pooling actually happens. Used by benchmarks and load tests.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::geometry::Coordinate;
use crate::request::Request;

/// Axis-aligned sampling area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: Coordinate,
    pub max: Coordinate,
}

impl Default for Bounds {
    fn default() -> Self {
        Self {
            min: Coordinate::new(0.0, 0.0),
            max: Coordinate::new(100.0, 100.0),
        }
    }
}

impl Bounds {
    fn sample<R: Rng>(&self, rng: &mut R) -> Coordinate {
        debug_assert!(self.min.x <= self.max.x && self.min.y <= self.max.y);
        Coordinate::new(
            rng.gen_range(self.min.x..=self.max.x),
            rng.gen_range(self.min.y..=self.max.y),
        )
    }
}

#[derive(Debug, Clone)]
pub struct DemandScenario {
    pub num_requests: usize,
    pub seed: u64,
    pub bounds: Bounds,
    /// Request times are drawn from `[0, request_window]`.
    pub request_window: f64,
    pub hotspot_count: usize,
    /// Half-width of the square around a hotspot that endpoints fall in.
    pub hotspot_radius: f64,
}

impl Default for DemandScenario {
    fn default() -> Self {
        Self {
            num_requests: 500,
            seed: 0,
            bounds: Bounds::default(),
            request_window: 60.0,
            hotspot_count: 5,
            hotspot_radius: 3.0,
        }
    }
}

impl DemandScenario {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_num_requests(mut self, num_requests: usize) -> Self {
        self.num_requests = num_requests;
        self
    }

    pub fn with_request_window(mut self, window: f64) -> Self {
        self.request_window = window;
        self
    }

    pub fn with_hotspots(mut self, count: usize, radius: f64) -> Self {
        self.hotspot_count = count;
        self.hotspot_radius = radius;
        self
    }

    /// Requests sorted by request time, ids numbered in that order.
    pub fn generate_requests(&self) -> Vec<Request> {
        let mut rng = StdRng::seed_from_u64(self.seed);
        let hotspots: Vec<Coordinate> = (0..self.hotspot_count.max(1))
            .map(|_| self.bounds.sample(&mut rng))
            .collect();

        let mut times: Vec<f64> = (0..self.num_requests)
            .map(|_| rng.gen_range(0.0..=self.request_window.max(0.0)))
            .collect();
        times.sort_by(f64::total_cmp);

        times
            .into_iter()
            .enumerate()
            .map(|(i, time)| {
                let origin = self.near_hotspot(&hotspots, &mut rng);
                let destination = self.near_hotspot(&hotspots, &mut rng);
                Request::new(i as i64, time, origin, destination)
            })
            .collect()
    }

    fn near_hotspot<R: Rng>(&self, hotspots: &[Coordinate], rng: &mut R) -> Coordinate {
        let center = hotspots[rng.gen_range(0..hotspots.len())];
        let r = self.hotspot_radius.abs();
        Coordinate::new(
            center.x + rng.gen_range(-r..=r),
            center.y + rng.gen_range(-r..=r),
        )
    }
}
