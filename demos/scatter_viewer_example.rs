//! Scatter Viewer Example
//!
//! Shows a synthetic star cluster: positions are drawn from a normal
//! distribution and each star gets a positive mass that sets its point size.
//!
//! Run with `RUST_LOG=info` to see binding and frame rate messages.

use rand::{rngs::StdRng, Rng, SeedableRng};
use rand_distr::{Distribution, Normal};
use scatterview_core::{ColumnSelection, DataTable, ViewerConfig};
use scatterview_visualization::InteractiveViewer;

const STAR_COUNT: usize = 2000;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    println!("scatterview Example");
    println!("===================");

    let table = star_cluster(STAR_COUNT, 42)?;
    log::info!("generated {} stars", STAR_COUNT);

    let config = ViewerConfig {
        azimuth_speed: 0.5,
        ..Default::default()
    };
    let mut viewer = InteractiveViewer::new(config)?.with_title("scatterview: star cluster");
    viewer.set_dataset(Box::new(table));
    viewer.set_columns(ColumnSelection::new("ra", "dec", "dist", "mass"));

    println!("Controls:");
    println!("  Mouse: Drag to rotate");
    println!("  Scroll: Zoom in/out");
    println!("  Close window to exit");

    viewer.run()?;
    Ok(())
}

/// Gaussian blob of `count` stars with masses in (0, 50)
fn star_cluster(count: usize, seed: u64) -> anyhow::Result<DataTable> {
    let mut rng = StdRng::seed_from_u64(seed);
    let spread = Normal::new(0.0, 3.0)?;
    let mut columns: [Vec<f64>; 4] = Default::default();

    for _ in 0..count {
        for axis in columns.iter_mut().take(3) {
            axis.push(spread.sample(&mut rng));
        }
        columns[3].push(rng.gen_range(f64::EPSILON..50.0));
    }

    let [ra, dec, dist, mass] = columns;
    Ok(DataTable::new("cluster")
        .with_column("ra", ra)
        .with_column("dec", dec)
        .with_column("dist", dist)
        .with_column("mass", mass))
}
