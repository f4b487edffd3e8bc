use std::path::PathBuf;

use polar_walk::{
    Distributions, PngFile, RandomWalk, RenderOptions, Surface, WalkConfig, WalkError,
};

fn main() -> Result<(), WalkError> {
    let args: Vec<String> = std::env::args().collect();

    let seed: Option<u64> = args.get(1).and_then(|s| s.parse().ok());
    let points: usize = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(7999);
    let out: PathBuf = args
        .get(3)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("artifacts/walk.png"));

    let config = WalkConfig::new(points, (0.0, 0.0));
    let mut walker = match seed {
        Some(seed) => RandomWalk::seeded(config, seed),
        None => RandomWalk::new(config),
    };

    let options = RenderOptions {
        point_size: 1.0,
        alpha: 0.65,
        show_direct_path: true,
        figure_size: (7.0, 4.0),
        ..Default::default()
    };

    eprintln!(
        "Generating walk of {} points, seed={}",
        points,
        seed.map_or_else(|| "entropy".to_string(), |s| s.to_string())
    );

    let (figure, _walk, timings) = polar_walk::plot(&mut walker, &Distributions::default(), &options)?;

    eprintln!("\nTimings:");
    for t in &timings {
        eprintln!("  {:20} {:8.1} ms", t.name, t.ms);
    }

    eprintln!("\n{}", figure.title);
    PngFile::new(&out).present(&figure)?;
    eprintln!("Saved {}", out.display());

    Ok(())
}
