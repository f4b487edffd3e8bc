pub mod canvas;
pub mod colormap;
pub mod config;
pub mod error;
pub mod render;
pub mod rng;
pub mod walk;

use std::time::Instant;

pub use colormap::{Colormap, Rgb};
pub use config::{Distributions, Interval, RenderOptions, WalkConfig};
pub use error::{Result, WalkError};
pub use render::{Figure, PngFile, Surface, draw, encode_png, render};
pub use walk::{RandomWalk, StepSample, Walk, distance, generate};

pub struct Timing {
    pub name: &'static str,
    pub ms: f64,
}

/// Generate a fresh walk with `walker` and draw it, timing each stage.
/// The start-finish distance is carried on the returned `Figure`.
pub fn plot(
    walker: &mut RandomWalk,
    dists: &Distributions,
    options: &RenderOptions,
) -> Result<(Figure, Walk, Vec<Timing>)> {
    let mut timings = Vec::new();
    let total_start = Instant::now();

    let t = Instant::now();
    let walk = walker.generate(dists)?;
    timings.push(Timing {
        name: "generate",
        ms: t.elapsed().as_secs_f64() * 1000.0,
    });

    let t = Instant::now();
    let figure = draw(&walk, options)?;
    timings.push(Timing {
        name: "draw",
        ms: t.elapsed().as_secs_f64() * 1000.0,
    });

    timings.push(Timing {
        name: "TOTAL",
        ms: total_start.elapsed().as_secs_f64() * 1000.0,
    });

    Ok((figure, walk, timings))
}
