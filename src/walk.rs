use rand::RngCore;

use crate::config::{Distributions, WalkConfig};
use crate::error::{Result, WalkError};
use crate::rng::{WalkRng, uniform_samples};

/// One polar step before conversion to a Cartesian delta.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StepSample {
    pub radius: f64,
    pub angle: f64,
}

impl StepSample {
    pub fn new(radius: f64, angle: f64) -> Self {
        Self { radius, angle }
    }

    #[inline]
    pub fn delta(self) -> (f64, f64) {
        let (sin, cos) = self.angle.sin_cos();
        (self.radius * cos, self.radius * sin)
    }
}

/// Cumulative walk coordinates. Index 0 is the start point.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Walk {
    pub xs: Vec<f64>,
    pub ys: Vec<f64>,
}

impl Walk {
    /// Running sum of `start` followed by the Cartesian delta of each step.
    pub fn from_steps(start: (f64, f64), steps: &[StepSample]) -> Self {
        let mut xs = Vec::with_capacity(steps.len() + 1);
        let mut ys = Vec::with_capacity(steps.len() + 1);
        let (mut x, mut y) = start;
        xs.push(x);
        ys.push(y);
        for step in steps {
            let (dx, dy) = step.delta();
            x += dx;
            y += dy;
            xs.push(x);
            ys.push(y);
        }
        Self { xs, ys }
    }

    pub fn len(&self) -> usize {
        self.xs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }

    pub fn start(&self) -> Option<(f64, f64)> {
        Some((*self.xs.first()?, *self.ys.first()?))
    }

    pub fn finish(&self) -> Option<(f64, f64)> {
        Some((*self.xs.last()?, *self.ys.last()?))
    }

    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.xs.iter().copied().zip(self.ys.iter().copied())
    }

    /// Euclidean distance between the first and last point.
    pub fn distance(&self) -> Result<f64> {
        distance(self)
    }
}

/// Draw `point_count - 1` radii, then as many angles, and accumulate them.
/// Nothing is sampled when the inputs are invalid.
pub fn generate<R: RngCore + ?Sized>(
    config: &WalkConfig,
    dists: &Distributions,
    rng: &mut R,
) -> Result<Walk> {
    config.validate()?;
    dists.validate()?;

    let steps = config.point_count - 1;
    let radii = uniform_samples(rng, dists.radius, steps)?;
    let angles = uniform_samples(rng, dists.angle, steps)?;
    let samples: Vec<StepSample> = radii
        .into_iter()
        .zip(angles)
        .map(|(radius, angle)| StepSample { radius, angle })
        .collect();

    Ok(Walk::from_steps(config.start_point, &samples))
}

pub fn distance(walk: &Walk) -> Result<f64> {
    if walk.xs.len() != walk.ys.len() {
        return Err(WalkError::invalid(format!(
            "walk has {} x and {} y coordinates",
            walk.xs.len(),
            walk.ys.len()
        )));
    }
    let (x0, y0) = walk.start().ok_or(WalkError::EmptyWalk)?;
    let (x1, y1) = walk.finish().ok_or(WalkError::EmptyWalk)?;
    Ok((x1 - x0).hypot(y1 - y0))
}

/// Walk generator owning its configuration and random source.
/// Not meant to be shared between threads; give each caller its own.
pub struct RandomWalk {
    config: WalkConfig,
    rng: WalkRng,
}

impl RandomWalk {
    /// Seeded from OS entropy.
    pub fn new(config: WalkConfig) -> Self {
        Self {
            config,
            rng: WalkRng::from_entropy(),
        }
    }

    pub fn seeded(config: WalkConfig, seed: u64) -> Self {
        Self {
            config,
            rng: WalkRng::seeded(seed),
        }
    }

    pub fn config(&self) -> &WalkConfig {
        &self.config
    }

    pub fn generate(&mut self, dists: &Distributions) -> Result<Walk> {
        generate(&self.config, dists, &mut self.rng)
    }
}
